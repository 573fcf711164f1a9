use crate::error::{ChainIntegrityError, Error, Result};
use crate::mine::mine_block;
use crate::pow::Target;
use crate::{Block, ChainConfig, SealedBlock};
use chrono::Utc;
use tracing::{debug, warn};

/// In-memory, append-only chain of mined blocks.
///
/// Appending takes `&mut self`; callers sharing a chain across threads must serialize
/// writers themselves.
#[derive(Clone, Debug)]
pub struct BlockChain {
    config: ChainConfig,
    target: Target,
    blocks: Vec<SealedBlock>,
}

impl BlockChain {
    /// A chain holding only a genesis block mined with [`ChainConfig::default`].
    pub fn new() -> Result<Self> {
        Self::with_config(ChainConfig::default())
    }

    pub fn with_config(config: ChainConfig) -> Result<Self> {
        let target = config.target()?;
        let genesis = mine_block(Block::genesis(Utc::now().timestamp()), &config)?;
        debug!(
            difficulty = config.difficulty,
            "created chain with genesis {}",
            hex::encode(genesis.hash())
        );
        Ok(Self {
            config,
            target,
            blocks: vec![genesis],
        })
    }

    /// Wrap blocks loaded by a collaborator. Nothing is checked; call [`BlockChain::verify`].
    pub fn from_blocks(config: ChainConfig, blocks: Vec<SealedBlock>) -> Result<Self> {
        Ok(Self {
            target: config.target()?,
            config,
            blocks,
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn difficulty(&self) -> u32 {
        self.config.difficulty
    }

    pub fn blocks(&self) -> &[SealedBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SealedBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn tip(&self) -> Option<&SealedBlock> {
        self.blocks.last()
    }

    /// Mine a block holding `data` on top of the current tip and append it.
    pub fn add_block(&mut self, data: impl Into<Vec<u8>>) -> Result<&SealedBlock> {
        let previous_hash = self
            .tip()
            .map(|tip| tip.hash().to_vec())
            .ok_or(ChainIntegrityError::Empty)?;
        let candidate = Block::new(data, previous_hash, Utc::now().timestamp());
        let sealed = mine_block(candidate, &self.config)?;
        self.blocks.push(sealed);
        Ok(&self.blocks[self.blocks.len() - 1])
    }

    /// Append a block mined elsewhere after checking it against the current tip.
    pub fn accept_block(&mut self, block: SealedBlock) -> Result<&SealedBlock> {
        let index = self.blocks.len();
        if let Err(err) = self.check_block(index, &block, self.tip()) {
            warn!(index, "rejected block: {err}");
            return Err(Error::ChainIntegrity(err));
        }
        self.blocks.push(block);
        Ok(&self.blocks[index])
    }

    /// Recompute every block and return the first integrity violation.
    pub fn verify(&self) -> std::result::Result<(), ChainIntegrityError> {
        if self.blocks.is_empty() {
            return Err(ChainIntegrityError::Empty);
        }
        let mut previous = None;
        for (index, block) in self.blocks.iter().enumerate() {
            if let Err(err) = self.check_block(index, block, previous) {
                warn!(index, "chain verification failed: {err}");
                return Err(err);
            }
            previous = Some(block);
        }
        Ok(())
    }

    pub fn validate_chain(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn into_blocks(self) -> Vec<SealedBlock> {
        self.blocks
    }

    fn check_block(
        &self,
        index: usize,
        block: &SealedBlock,
        previous: Option<&SealedBlock>,
    ) -> std::result::Result<(), ChainIntegrityError> {
        match previous {
            None if !block.is_genesis() => return Err(ChainIntegrityError::BadGenesis { index }),
            Some(previous) if block.previous_hash() != previous.hash() => {
                return Err(ChainIntegrityError::BrokenLink { index })
            }
            _ => {}
        }
        if !block.hash_matches(self.config.difficulty) {
            return Err(ChainIntegrityError::HashMismatch { index });
        }
        if !self.target.is_met_by(&block.hash()) {
            return Err(ChainIntegrityError::InsufficientWork {
                index,
                difficulty: self.config.difficulty,
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a BlockChain {
    type Item = &'a SealedBlock;
    type IntoIter = std::slice::Iter<'a, SealedBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
