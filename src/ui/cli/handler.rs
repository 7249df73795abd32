// Wed Jan 15 2026 - Alex

use super::args::Args;
use crate::config::ScannerConfig;
use crate::scanner::{Scanner, ScannerFactory};
use crate::ui::report::{PatternReport, ScanReport};
use anyhow::Context;
use std::time::Instant;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        if args.no_color {
            colored::control::set_override(false);
        }

        let config = self.build_config(&args)?;
        let scanner = ScannerFactory::new(config.clone())
            .from_file(&args.file)
            .with_context(|| format!("Failed to open {}", args.file.display()))?;

        let report = self.scan(&scanner, &args, &config)?;

        if args.json {
            println!("{}", report.to_json()?);
        } else {
            print!("{}", report.render());
        }
        Ok(())
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        env_logger::Builder::new()
            .filter_level(args.log_level.to_filter())
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    /// Config file values first, then command line flags on top.
    fn build_config(&self, args: &Args) -> anyhow::Result<ScannerConfig> {
        let mut config = match &args.config {
            Some(path) => ScannerConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ScannerConfig::default(),
        };

        if let Some(threads) = args.threads {
            config.worker_threads = threads;
        }
        if let Some(algorithm) = args.algorithm {
            config.algorithm = Some(algorithm);
        }
        config.load_balance |= args.load_balance;
        config.cache_duplicates |= args.cached;

        config.validate()?;
        log::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    fn scan(
        &self,
        scanner: &Scanner<'_>,
        args: &Args,
        config: &ScannerConfig,
    ) -> anyhow::Result<ScanReport> {
        let start = Instant::now();

        let results = if config.cache_duplicates {
            scanner.find_patterns_cached(&args.patterns, config.load_balance)?
        } else {
            scanner.find_patterns(&args.patterns, config.load_balance)?
        };

        let mut report = ScanReport::new(
            args.file.display().to_string(),
            scanner.len(),
            scanner.algorithm(),
            scanner.workers(),
        );

        for (pattern, result) in args.patterns.iter().zip(results) {
            let offsets = if args.all && result.found {
                Some(scanner.find_all_patterns(pattern)?)
            } else {
                None
            };
            report.results.push(PatternReport {
                pattern: pattern.clone(),
                result,
                offsets,
            });
        }

        Ok(report.with_elapsed(start.elapsed()))
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Algorithm;
    use crate::utils::testing::reference_data;
    use clap::Parser;
    use std::path::PathBuf;

    fn write_reference(name: &str) -> PathBuf {
        let file_name = format!("sigscan-{}-{}.bin", name, std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, reference_data()).unwrap();
        path
    }

    #[test]
    fn test_flags_override_config_file() {
        let config_path = std::env::temp_dir()
            .join(format!("sigscan-cli-config-{}.json", std::process::id()));
        std::fs::write(&config_path, r#"{"worker_threads": 2, "algorithm": "simple"}"#).unwrap();

        let args = Args::try_parse_from([
            "sigscan".to_string(),
            "input.bin".to_string(),
            "7A".to_string(),
            "--config".to_string(),
            config_path.display().to_string(),
            "--algorithm".to_string(),
            "compiled".to_string(),
            "--cached".to_string(),
        ])
        .unwrap();

        let config = CommandHandler::new().build_config(&args).unwrap();
        std::fs::remove_file(&config_path).unwrap();

        assert_eq!(config.worker_threads, 2);
        assert_eq!(config.algorithm, Some(Algorithm::Compiled));
        assert!(config.cache_duplicates);
        assert!(!config.load_balance);
    }

    #[test]
    fn test_scan_builds_report() {
        let path = write_reference("report");
        let args = Args::try_parse_from([
            "sigscan".to_string(),
            path.display().to_string(),
            "7A BB".to_string(),
            "7A".to_string(),
            "BB BB".to_string(),
            "--all".to_string(),
        ])
        .unwrap();

        let handler = CommandHandler::new();
        let config = handler.build_config(&args).unwrap();
        let scanner = ScannerFactory::new(config.clone()).from_file(&path).unwrap();
        let report = handler.scan(&scanner, &args, &config).unwrap();
        drop(scanner);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.size, 256);
        assert_eq!(report.results[0].result.offset, 254);
        assert_eq!(report.results[1].offsets, Some(vec![2, 254]));
        assert!(!report.results[2].result.found);
        assert_eq!(report.results[2].offsets, None);
    }
}
