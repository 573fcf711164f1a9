use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use powchain_core::constants::{DEFAULT_DIFFICULTY, MAX_NONCE};
use powchain_core::pow::count_leading_zero_bits;
use powchain_core::{BlockChain, ChainConfig, ProofOfWork, SealedBlock};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "powchain")]
#[command(about = "Build and verify a proof-of-work block chain")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mine a new chain holding one block per DATA argument
    Mine {
        #[command(flatten)]
        mining: MiningArgs,
        /// Print the chain as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write the chain as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Block payloads, in order
        #[arg(required = true)]
        data: Vec<String>,
    },
    /// Check hashes, links and proof of work of a chain written by `mine --out`
    Verify {
        /// Chain file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct MiningArgs {
    /// Required number of leading zero bits in each block hash
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY)]
    difficulty: u32,
    /// Give up after trying this many nonces per block
    #[arg(long, default_value_t = MAX_NONCE)]
    max_nonce: u64,
    /// Search nonces on all cores
    #[arg(long)]
    parallel: bool,
}

impl From<MiningArgs> for ChainConfig {
    fn from(args: MiningArgs) -> Self {
        Self {
            difficulty: args.difficulty,
            max_nonce: args.max_nonce,
            parallel: args.parallel,
        }
    }
}

/// On-disk layout written by `mine --out` and read by `verify`.
#[derive(Serialize, Deserialize)]
struct ChainFile {
    config: ChainConfig,
    blocks: Vec<SealedBlock>,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Mine {
            mining,
            json,
            out,
            data,
        } => {
            let config = ChainConfig::from(mining);
            let mut chain = BlockChain::with_config(config).context("mining genesis block")?;
            for item in data {
                chain
                    .add_block(item.as_str())
                    .with_context(|| format!("mining block {item:?}"))?;
            }

            let file = ChainFile {
                config,
                blocks: chain.blocks().to_vec(),
            };
            if let Some(path) = out {
                fs::write(&path, serde_json::to_vec_pretty(&file)?)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("wrote {} blocks to {}", file.blocks.len(), path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&file)?);
            } else {
                print_chain(&chain)?;
            }
        }
        Command::Verify { file } => {
            let bytes =
                fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let ChainFile { config, blocks } = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", file.display()))?;
            let chain = BlockChain::from_blocks(config, blocks)?;
            chain.verify()?;
            println!(
                "chain ok: {} blocks at difficulty {}",
                chain.len(),
                chain.difficulty()
            );
        }
    }
    Ok(())
}

fn print_chain(chain: &BlockChain) -> Result<()> {
    for (index, block) in chain.iter().enumerate() {
        let pow = ProofOfWork::new(block.header(), chain.difficulty())?;
        println!("Block {index}");
        println!("Timestamp: {}", block.timestamp());
        println!("Prev. hash: {}", hex::encode(block.previous_hash()));
        println!("Data: {}", String::from_utf8_lossy(block.data()));
        println!("Nonce: {}", block.nonce());
        println!("Hash: {}", hex::encode(block.hash()));
        println!("Leading zero bits: {}", count_leading_zero_bits(&block.hash()));
        println!("PoW: {}", pow.validate(block.nonce()));
        println!();
    }
    Ok(())
}
