use crate::constants::GENESIS_DATA;
use crate::hasher::{encode_integer, Hasher, Sha256Hasher};
use crate::Hash;
use serde::{Deserialize, Serialize};

/// A candidate block that has not been mined yet.
///
/// Mining produces a nonce and hash for it; [`Block::seal`] then consumes the candidate and
/// returns a [`SealedBlock`], which has no mutating methods.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    timestamp: i64,
    #[serde(with = "hex")]
    data: Vec<u8>,
    #[serde(with = "hex")]
    previous_hash: Vec<u8>,
}

impl Block {
    pub fn new(data: impl Into<Vec<u8>>, previous_hash: impl Into<Vec<u8>>, timestamp: i64) -> Self {
        Self {
            timestamp,
            data: data.into(),
            previous_hash: previous_hash.into(),
        }
    }

    /// The first block of every chain: fixed payload, no predecessor.
    pub fn genesis(timestamp: i64) -> Self {
        Self::new(GENESIS_DATA, Vec::new(), timestamp)
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn previous_hash(&self) -> &[u8] {
        &self.previous_hash
    }

    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_empty() && self.data == GENESIS_DATA
    }

    pub fn compute_hash(&self, nonce: u64, difficulty: u32) -> Hash {
        self.compute_hash_with(&Sha256Hasher, nonce, difficulty)
    }

    pub fn compute_hash_with<H: Hasher + ?Sized>(
        &self,
        hasher: &H,
        nonce: u64,
        difficulty: u32,
    ) -> Hash {
        let timestamp = encode_integer(self.timestamp);
        let difficulty = encode_integer(difficulty);
        let nonce = encode_integer(nonce);
        hasher.digest(&[
            self.previous_hash.as_slice(),
            self.data.as_slice(),
            timestamp.as_slice(),
            difficulty.as_slice(),
            nonce.as_slice(),
        ])
    }

    pub fn seal(self, nonce: u64, hash: Hash) -> SealedBlock {
        SealedBlock {
            block: self,
            nonce,
            hash,
        }
    }
}

/// A mined block. Fields are read-only once sealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBlock {
    #[serde(flatten)]
    block: Block,
    nonce: u64,
    #[serde(with = "hex")]
    hash: Hash,
}

impl SealedBlock {
    /// Rebuild a block from values read back from storage or the network.
    ///
    /// Nothing is checked here; run it through [`crate::ProofOfWork::validate`] or
    /// [`crate::BlockChain::verify`] before trusting it.
    pub fn from_parts(
        timestamp: i64,
        data: impl Into<Vec<u8>>,
        previous_hash: impl Into<Vec<u8>>,
        nonce: u64,
        hash: Hash,
    ) -> Self {
        Block::new(data, previous_hash, timestamp).seal(nonce, hash)
    }

    pub fn header(&self) -> &Block {
        &self.block
    }

    pub fn timestamp(&self) -> i64 {
        self.block.timestamp
    }

    pub fn data(&self) -> &[u8] {
        &self.block.data
    }

    pub fn previous_hash(&self) -> &[u8] {
        &self.block.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.block.is_genesis()
    }

    /// Whether the stored hash still matches the stored fields.
    pub fn hash_matches(&self, difficulty: u32) -> bool {
        self.block.compute_hash(self.nonce, difficulty) == self.hash
    }

    pub fn into_header(self) -> Block {
        self.block
    }
}
