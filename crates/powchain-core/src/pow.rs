//! Proof of work over a single candidate block.
//!
//! A nonce is valid when the block hash, read as a big-endian unsigned 256-bit integer, is
//! strictly below `2^(256 - difficulty)`; equivalently, the top `difficulty` bits of the hash
//! are zero.

use crate::constants::{HASH_BITS, HASH_SIZE, MAX_NONCE};
use crate::error::{Error, Result};
use crate::hasher::{Hasher, Sha256Hasher};
use crate::{Block, Hash};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// `2^(256 - difficulty)` as a big-endian 256-bit value.
///
/// Byte arrays compare lexicographically, which for equal-width big-endian values is the
/// same as numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Target([u8; HASH_SIZE]);

impl Target {
    pub fn from_difficulty(difficulty: u32) -> Result<Self> {
        if difficulty == 0 || difficulty >= HASH_BITS {
            return Err(Error::Configuration(difficulty));
        }
        let bit = (HASH_BITS - difficulty) as usize;
        let mut target = [0u8; HASH_SIZE];
        target[HASH_SIZE - 1 - bit / 8] = 1 << (bit % 8);
        Ok(Self(target))
    }

    pub fn is_met_by(&self, hash: &Hash) -> bool {
        hash < &self.0
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

/// The nonce found by a search together with the hash it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u64,
    pub hash: Hash,
}

/// Search/validation context bound to one block and one difficulty.
pub struct ProofOfWork<'a, H = Sha256Hasher> {
    block: &'a Block,
    difficulty: u32,
    target: Target,
    max_nonce: u64,
    hasher: H,
}

impl<'a> ProofOfWork<'a> {
    pub fn new(block: &'a Block, difficulty: u32) -> Result<Self> {
        Self::with_hasher(block, difficulty, Sha256Hasher)
    }

    pub fn with_max_nonce(block: &'a Block, difficulty: u32, max_nonce: u64) -> Result<Self> {
        Ok(Self::new(block, difficulty)?.max_nonce(max_nonce))
    }
}

impl<'a, H: Hasher> ProofOfWork<'a, H> {
    pub fn with_hasher(block: &'a Block, difficulty: u32, hasher: H) -> Result<Self> {
        Ok(Self {
            block,
            difficulty,
            target: Target::from_difficulty(difficulty)?,
            max_nonce: MAX_NONCE,
            hasher,
        })
    }

    /// Exclusive upper bound for the search.
    pub fn max_nonce(mut self, max_nonce: u64) -> Self {
        self.max_nonce = max_nonce;
        self
    }

    pub fn block(&self) -> &'a Block {
        self.block
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn nonce_bound(&self) -> u64 {
        self.max_nonce
    }

    pub fn hash_for(&self, nonce: u64) -> Hash {
        self.block
            .compute_hash_with(&self.hasher, nonce, self.difficulty)
    }

    /// Try nonces `0, 1, 2, ...` below the bound and return the first one whose hash meets the
    /// target. Blocks the calling thread until then.
    pub fn run(&self) -> Result<Solution> {
        self.search(None)
    }

    /// Like [`ProofOfWork::run`], but gives up with [`Error::Cancelled`] once `cancel` is set.
    pub fn run_cancellable(&self, cancel: &AtomicBool) -> Result<Solution> {
        self.search(Some(cancel))
    }

    fn search(&self, cancel: Option<&AtomicBool>) -> Result<Solution> {
        debug!(
            difficulty = self.difficulty,
            max_nonce = self.max_nonce,
            "mining block containing {:?}",
            String::from_utf8_lossy(self.block.data())
        );
        for nonce in 0..self.max_nonce {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!(nonce, "proof-of-work search cancelled");
                return Err(Error::Cancelled(nonce));
            }
            let hash = self.hash_for(nonce);
            if self.target.is_met_by(&hash) {
                return Ok(Solution { nonce, hash });
            }
        }
        warn!(
            difficulty = self.difficulty,
            max_nonce = self.max_nonce,
            "nonce space exhausted"
        );
        Err(Error::ProofOfWorkExhausted {
            difficulty: self.difficulty,
            max_nonce: self.max_nonce,
        })
    }

    /// Recompute the hash for `nonce` once and compare it with the target.
    pub fn validate(&self, nonce: u64) -> bool {
        self.target.is_met_by(&self.hash_for(nonce))
    }
}

pub fn count_leading_zero_bits(hash: &Hash) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 8;
        } else {
            total += b.leading_zeros();
            break;
        }
    }
    total
}
