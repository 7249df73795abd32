// Fri Jan 16 2026 - Alex

pub mod compiled;
pub mod simple;

#[cfg(target_arch = "x86_64")]
pub mod avx2;
#[cfg(target_arch = "x86_64")]
pub mod sse2;

use crate::pattern::{Pattern, PatternScanResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search strategies, ordered from slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Simple,
    Compiled,
    Sse2,
    Avx2,
}

static BEST_AVAILABLE: Lazy<Algorithm> = Lazy::new(|| {
    let best = Algorithm::ALL
        .iter()
        .rev()
        .copied()
        .find(|a| a.is_supported())
        .unwrap_or(Algorithm::Compiled);
    log::debug!("Best available search kernel: {}", best);
    best
});

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Simple,
        Algorithm::Compiled,
        Algorithm::Sse2,
        Algorithm::Avx2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Simple => "simple",
            Algorithm::Compiled => "compiled",
            Algorithm::Sse2 => "sse2",
            Algorithm::Avx2 => "avx2",
        }
    }

    pub fn is_supported(&self) -> bool {
        match self {
            Algorithm::Simple | Algorithm::Compiled => true,
            #[cfg(target_arch = "x86_64")]
            Algorithm::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Algorithm::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            Algorithm::Sse2 | Algorithm::Avx2 => false,
        }
    }

    /// Fastest kernel the running CPU supports. Detected once per process.
    pub fn best_available() -> Algorithm {
        *BEST_AVAILABLE
    }

    /// Next kernel down the chain: AVX2, SSE2, compiled, simple.
    pub fn fallback(&self) -> Option<Algorithm> {
        match self {
            Algorithm::Avx2 => Some(Algorithm::Sse2),
            Algorithm::Sse2 => Some(Algorithm::Compiled),
            Algorithm::Compiled => Some(Algorithm::Simple),
            Algorithm::Simple => None,
        }
    }

    /// Walks down the fallback chain until a supported kernel is reached.
    pub fn resolve(self) -> Algorithm {
        let mut current = self;
        while !current.is_supported() {
            match current.fallback() {
                Some(next) => {
                    log::debug!("{} kernel not supported on this CPU, using {}", current, next);
                    current = next;
                }
                None => break,
            }
        }
        current
    }

    pub fn kernel(&self) -> &'static dyn SearchKernel {
        match self.resolve() {
            Algorithm::Simple => &SimpleKernel,
            Algorithm::Compiled => &CompiledKernel,
            Algorithm::Sse2 => &Sse2Kernel,
            Algorithm::Avx2 => &Avx2Kernel,
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::best_available()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(Algorithm::Simple),
            "compiled" => Ok(Algorithm::Compiled),
            "sse2" | "sse" => Ok(Algorithm::Sse2),
            "avx2" | "avx" => Ok(Algorithm::Avx2),
            other => Err(format!("Unknown algorithm: {}", other)),
        }
    }
}

/// A search strategy over a byte region.
///
/// Every kernel returns the lowest offset at which the pattern matches, and
/// all of them agree on every input.
pub trait SearchKernel: Send + Sync {
    fn algorithm(&self) -> Algorithm;

    fn find(&self, data: &[u8], pattern: &Pattern) -> PatternScanResult;

    /// Searches `data[start..]` and reports region-absolute offsets.
    fn find_from(&self, data: &[u8], pattern: &Pattern, start: usize) -> PatternScanResult {
        if start > data.len() {
            return PatternScanResult::NOT_FOUND;
        }
        self.find(&data[start..], pattern).add_offset(start)
    }
}

pub struct SimpleKernel;

impl SearchKernel for SimpleKernel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Simple
    }

    fn find(&self, data: &[u8], pattern: &Pattern) -> PatternScanResult {
        simple::find(data, pattern.simple())
    }
}

pub struct CompiledKernel;

impl SearchKernel for CompiledKernel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Compiled
    }

    fn find(&self, data: &[u8], pattern: &Pattern) -> PatternScanResult {
        compiled::find(data, pattern.compiled())
    }
}

pub struct Sse2Kernel;

impl SearchKernel for Sse2Kernel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sse2
    }

    fn find(&self, data: &[u8], pattern: &Pattern) -> PatternScanResult {
        #[cfg(target_arch = "x86_64")]
        {
            if Algorithm::Sse2.is_supported() {
                // SAFETY: feature presence checked above.
                return unsafe { sse2::find(data, pattern) };
            }
        }
        CompiledKernel.find(data, pattern)
    }
}

pub struct Avx2Kernel;

impl SearchKernel for Avx2Kernel {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Avx2
    }

    fn find(&self, data: &[u8], pattern: &Pattern) -> PatternScanResult {
        #[cfg(target_arch = "x86_64")]
        {
            if Algorithm::Avx2.is_supported() {
                // SAFETY: feature presence checked above.
                return unsafe { avx2::find(data, pattern) };
            }
        }
        Sse2Kernel.find(data, pattern)
    }
}
