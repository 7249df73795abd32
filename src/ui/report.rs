// Wed Jan 15 2026 - Alex

use crate::kernel::Algorithm;
use crate::pattern::PatternScanResult;
use crate::utils::{format_bytes, pluralize};
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub pattern: String,
    #[serde(flatten)]
    pub result: PatternScanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offsets: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub file: String,
    pub size: usize,
    pub algorithm: Algorithm,
    pub workers: usize,
    pub elapsed_ms: f64,
    pub results: Vec<PatternReport>,
}

impl ScanReport {
    pub fn new(file: String, size: usize, algorithm: Algorithm, workers: usize) -> Self {
        Self {
            file,
            size,
            algorithm,
            workers,
            elapsed_ms: 0.0,
            results: Vec::new(),
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self
    }

    pub fn found_count(&self) -> usize {
        self.results.iter().filter(|r| r.result.found).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} {} ({}, {} kernel, {})\n",
            "[*]".blue(),
            self.file,
            format_bytes(self.size as u64),
            self.algorithm,
            pluralize(self.workers, "worker", "workers")
        ));

        let width = self.results.iter().map(|r| r.pattern.len()).max().unwrap_or(0);

        for report in &self.results {
            let pattern = format!("{:<width$}", report.pattern, width = width);
            match (&report.offsets, report.result.position()) {
                (Some(offsets), Some(_)) => {
                    let list = offsets
                        .iter()
                        .map(|o| format!("0x{:X}", o))
                        .collect::<Vec<_>>()
                        .join(", ");
                    out.push_str(&format!(
                        "{} {}  {} {}\n",
                        "[+]".green(),
                        pattern,
                        format!("{}:", pluralize(offsets.len(), "match", "matches")).bold(),
                        list.yellow()
                    ));
                }
                (None, Some(offset)) => {
                    out.push_str(&format!(
                        "{} {}  {}\n",
                        "[+]".green(),
                        pattern,
                        format!("0x{:X}", offset).yellow()
                    ));
                }
                (_, None) => {
                    out.push_str(&format!(
                        "{} {}  {}\n",
                        "[-]".red(),
                        pattern,
                        "not found".dimmed()
                    ));
                }
            }
        }

        out.push_str(&format!(
            "{} {}/{} found in {:.2}ms\n",
            "[*]".blue(),
            self.found_count(),
            self.results.len(),
            self.elapsed_ms
        ));
        out
    }
}
