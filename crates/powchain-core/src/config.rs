use crate::constants::{DEFAULT_DIFFICULTY, MAX_NONCE};
use crate::error::Result;
use crate::pow::Target;
use serde::{Deserialize, Serialize};

/// Mining parameters shared by every block of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Required number of leading zero bits, in `[1, 256)`.
    pub difficulty: u32,
    /// Exclusive upper bound of the nonce search.
    pub max_nonce: u64,
    /// Search nonces on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            max_nonce: MAX_NONCE,
            parallel: false,
        }
    }
}

impl ChainConfig {
    pub fn with_difficulty(difficulty: u32) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn target(&self) -> Result<Target> {
        Target::from_difficulty(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_config_example() {
        let config = ChainConfig::default();
        assert_eq!(config.difficulty, 17);
        assert_eq!(config.max_nonce, i64::MAX as u64);
        assert!(!config.parallel);
        assert!(config.target().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ChainConfig = serde_json::from_str(r#"{"difficulty":4}"#).unwrap();
        assert_eq!(config, ChainConfig::with_difficulty(4));
    }

    #[test]
    fn invalid_difficulty_is_a_configuration_error() {
        assert_eq!(
            ChainConfig::with_difficulty(256).target(),
            Err(Error::Configuration(256))
        );
    }
}
