use crate::error::{Error, Result};
use crate::hasher::Hasher;
use crate::pow::{ProofOfWork, Solution};
use crate::{Block, ChainConfig, SealedBlock};
use rayon::prelude::*;
use tracing::info;

/// Searches nonces in parallel across the rayon pool.
///
/// `find_map_first` keeps the lowest matching nonce, so the result is the same one the
/// sequential [`ProofOfWork::run`] returns.
pub fn run_parallel<H: Hasher + Sync>(pow: &ProofOfWork<'_, H>) -> Result<Solution> {
    (0..pow.nonce_bound())
        .into_par_iter()
        .find_map_first(|nonce| {
            let hash = pow.hash_for(nonce);
            pow.target().is_met_by(&hash).then_some(Solution { nonce, hash })
        })
        .ok_or(Error::ProofOfWorkExhausted {
            difficulty: pow.difficulty(),
            max_nonce: pow.nonce_bound(),
        })
}

/// Mines `block` with the difficulty, bound and strategy from `config` and seals it.
pub fn mine_block(block: Block, config: &ChainConfig) -> Result<SealedBlock> {
    let solution = {
        let pow = ProofOfWork::with_max_nonce(&block, config.difficulty, config.max_nonce)?;
        if config.parallel {
            run_parallel(&pow)?
        } else {
            pow.run()?
        }
    };

    info!(
        "Mined block {:?} with nonce {} and hash {}",
        String::from_utf8_lossy(block.data()),
        solution.nonce,
        hex::encode(solution.hash)
    );

    Ok(block.seal(solution.nonce, solution.hash))
}
