//! Pool of Entropy CLI
//!
//! Command-line interface for generating numbers from an entropy pool,
//! optionally seeded, modified, or configured from a TOML file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use num::BigInt;
use pool_of_entropy::{config::FileConfig, ModifiedGenerator, Request, Sample};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "pool-of-entropy", version, about = "SHA-512 entropy pool PRNG")]
struct Cli {
    /// TOML configuration file; command-line options override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of 64-byte blocks in the pool (1-256).
    #[arg(long, global = true)]
    size: Option<usize>,

    /// Start from an all-zero pool, so output is reproducible.
    #[arg(long, global = true)]
    blank: bool,

    /// Data mixed into the pool before generating (repeatable).
    #[arg(long = "seed", global = true)]
    seeds: Vec<String>,

    /// Modifier applied to every result.
    #[arg(long, global = true)]
    modify_all: Option<String>,

    /// One-shot modifier for the next result (repeatable, used in order).
    #[arg(long = "modify-next", global = true)]
    modify_next: Vec<String>,

    /// How many results to print.
    #[arg(long, short = 'n', default_value_t = 1, global = true)]
    count: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Float in [0, 1).
    Float,
    /// Integer in 0..MAX (a float if MAX <= 0).
    Int {
        #[arg(allow_negative_numbers = true)]
        max: BigInt,
    },
    /// Integer in LO..=HI.
    Range {
        #[arg(allow_negative_numbers = true)]
        lo: BigInt,
        #[arg(allow_negative_numbers = true)]
        hi: BigInt,
    },
    /// 32 hex digits.
    Hex,
    /// Integer in 0..2^128.
    Bignum,
}

fn build_generator(cli: &Cli) -> Result<ModifiedGenerator, pool_of_entropy::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    if let Some(size) = cli.size {
        config.pool.size = size;
    }
    if cli.blank {
        config.pool.blank = true;
    }
    config
        .pool
        .seeds
        .extend(cli.seeds.iter().map(|seed| seed.as_bytes().to_vec()));
    if cli.modify_all.is_some() {
        config.modifiers.all = cli.modify_all.clone();
    }
    config
        .modifiers
        .next
        .extend(cli.modify_next.iter().cloned().map(Some));

    config.build_generator()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Pool of Entropy v{}", pool_of_entropy::VERSION);

    let mut generator = match build_generator(&cli) {
        Ok(g) => g,
        Err(e) => {
            error!("Failed to build generator: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..cli.count {
        let line = match &cli.command {
            Command::Float => format_sample(generator.generate(Request::Float)),
            Command::Int { max } => format_sample(generator.generate(Request::Below(max.clone()))),
            Command::Range { lo, hi } => {
                format_sample(generator.generate(Request::Range(lo.clone(), hi.clone())))
            }
            Command::Hex => generator.rand_hex(),
            Command::Bignum => generator.rand_bignum().to_string(),
        };
        println!("{}", line);
    }

    ExitCode::SUCCESS
}

fn format_sample(sample: Option<Sample>) -> String {
    match sample {
        Some(Sample::Float(f)) => f.to_string(),
        Some(Sample::Integer(n)) => n.to_string(),
        None => "none".to_string(),
    }
}
