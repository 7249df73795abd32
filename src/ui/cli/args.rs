// Wed Jan 15 2026 - Alex

use crate::kernel::Algorithm;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sigscan")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Searches a file for byte signatures with wildcards", long_about = None)]
pub struct Args {
    /// File to scan. It is memory mapped, not read.
    pub file: PathBuf,

    /// Patterns such as "48 8B 05 ?? ?? ?? ??"
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Force a kernel: simple, compiled, sse2 or avx2
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Hand patterns to workers one at a time
    #[arg(long)]
    pub load_balance: bool,

    /// Scan repeated patterns only once
    #[arg(long)]
    pub cached: bool,

    /// Report every match instead of the first
    #[arg(long)]
    pub all: bool,

    #[arg(long)]
    pub json: bool,

    /// JSON scanner configuration; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = LogLevel::Warn, ignore_case = true)]
    pub log_level: LogLevel,

    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if self.threads == Some(0) {
            return Err("Thread count must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "sigscan", "game.bin", "7A BB", "04 25 ?? ??", "--algorithm", "sse2", "--threads", "4",
            "--load-balance", "--json",
        ])
        .unwrap();

        assert_eq!(args.file, PathBuf::from("game.bin"));
        assert_eq!(args.patterns, vec!["7A BB", "04 25 ?? ??"]);
        assert_eq!(args.algorithm, Some(Algorithm::Sse2));
        assert_eq!(args.threads, Some(4));
        assert!(args.load_balance && args.json);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_requires_a_pattern() {
        assert!(Args::try_parse_from(["sigscan", "game.bin"]).is_err());
    }

    #[test]
    fn test_log_level_values() {
        let args = Args::try_parse_from(["sigscan", "game.bin", "7A"]).unwrap();
        assert_eq!(args.log_level, LogLevel::Warn);

        let args =
            Args::try_parse_from(["sigscan", "game.bin", "7A", "--log-level", "DEBUG"]).unwrap();
        assert_eq!(args.log_level.to_filter(), log::LevelFilter::Debug);

        let unknown = Args::try_parse_from(["sigscan", "game.bin", "7A", "--log-level", "verbose"]);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let args = Args::try_parse_from(["sigscan", "game.bin", "7A", "--threads", "0"]).unwrap();
        assert!(args.validate().is_err());
    }
}
