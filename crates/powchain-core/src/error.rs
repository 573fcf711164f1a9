use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("difficulty {0} is outside the supported range [1, 256)")]
    Configuration(u32),

    #[error("nonce space exhausted below {max_nonce} at difficulty {difficulty}")]
    ProofOfWorkExhausted { difficulty: u32, max_nonce: u64 },

    #[error("proof-of-work search cancelled at nonce {0}")]
    Cancelled(u64),

    #[error(transparent)]
    ChainIntegrity(#[from] ChainIntegrityError),
}

/// First mismatch found while re-checking stored blocks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainIntegrityError {
    #[error("chain has no genesis block")]
    Empty,

    #[error("block {index}: genesis must have data \"Genesis Block\" and an empty previous hash")]
    BadGenesis { index: usize },

    #[error("block {index}: stored hash does not match recomputed hash")]
    HashMismatch { index: usize },

    #[error("block {index}: previous hash does not match hash of block {}", .index - 1)]
    BrokenLink { index: usize },

    #[error("block {index}: hash does not meet the difficulty {difficulty} target")]
    InsufficientWork { index: usize, difficulty: u32 },
}

impl ChainIntegrityError {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::BadGenesis { index }
            | Self::HashMismatch { index }
            | Self::BrokenLink { index }
            | Self::InsufficientWork { index, .. } => Some(*index),
        }
    }
}
