//! Command-line surface: `mm [OPTIONS] [SIZE]`.

use crate::config::{BenchConfig, ConfigError, DEFAULT_SEED, NITERATIONS, SPARSE_FACTOR};
use crate::schedule::Schedule;
use clap::Parser;

pub const USAGE: &str = "usage: mm <matrix size>";

/// Benchmark outer-parallel, inner-parallel and sparse matrix multiply.
#[derive(Debug, Parser)]
#[command(name = "mm", version)]
pub struct Cli {
    /// Matrix dimension n. Without it, usage is printed.
    #[arg(value_name = "SIZE", allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Row scheduling policy of the sparse kernel (required)
    #[arg(long, value_enum, env = "MM_SCHEDULE")]
    pub schedule: Option<Schedule>,

    /// Threads per parallel region [default: hardware threads]
    #[arg(long, env = "MM_THREADS")]
    pub threads: Option<usize>,

    /// Measured iterations per kernel, after one warm-up
    #[arg(long, default_value_t = NITERATIONS)]
    pub iterations: usize,

    /// Percentage of lower-half cells zeroed in the sparse operand
    #[arg(long, default_value_t = SPARSE_FACTOR)]
    pub sparse_factor: u32,

    /// Seed of the matrix initialisation stream
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// The requested matrix size, read like C's `atoi`: optional leading
    /// whitespace and sign, then as many digits as follow. Anything else
    /// reads as 0. `None` when no size was given.
    pub fn matrix_size(&self) -> Option<i64> {
        self.size.as_deref().map(parse_size)
    }

    /// Build the run configuration for a matrix of `size`.
    pub fn to_config(&self, size: usize) -> Result<BenchConfig, ConfigError> {
        let schedule = self
            .schedule
            .or(Schedule::built_in())
            .ok_or(ConfigError::MissingSchedule)?;

        let mut config = BenchConfig::new(size, schedule);
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.iterations = self.iterations;
        config.sparse_factor = self.sparse_factor;
        config.seed = self.seed;
        config.validate()?;
        Ok(config)
    }
}

fn parse_size(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    if negative { -value } else { value }
}
