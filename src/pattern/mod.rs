// Fri Jan 16 2026 - Alex

pub mod cache;
pub mod compiler;
pub mod error;
pub mod match_result;
pub mod pattern;
pub mod simd;
pub mod wildcard;

pub use cache::PatternCache;
pub use compiler::{CompiledScanPattern, Instruction, WORD_SIZE};
pub use error::PatternError;
pub use match_result::PatternScanResult;
pub use pattern::{Pattern, PatternBuilder, SimplePatternScanData};
pub use simd::SimdPatternScanData;
pub use wildcard::Token;

/// Parses every pattern up front so a malformed entry fails the whole batch
/// before any scanning starts.
pub fn parse_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, PatternError> {
    patterns.iter().map(|p| Pattern::parse(p.as_ref())).collect()
}
