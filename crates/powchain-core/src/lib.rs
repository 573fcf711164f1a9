//! Proof-of-work block chain primitives: block hashing, nonce search and validation, and an
//! in-memory append-only chain.

pub mod block;
pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod hasher;
pub mod mine;
pub mod pow;

pub type Hash = [u8; constants::HASH_SIZE];

pub use block::{Block, SealedBlock};
pub use chain::BlockChain;
pub use config::ChainConfig;
pub use error::{ChainIntegrityError, Error, Result};
pub use hasher::{digest, encode_integer, Hasher, Sha256Hasher};
pub use pow::{ProofOfWork, Solution, Target};
