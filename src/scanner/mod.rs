// Fri Jan 16 2026 - Alex

pub mod dispatch;
pub mod factory;

pub use dispatch::Dispatcher;
pub use factory::ScannerFactory;

use crate::config::ScannerConfig;
use crate::error::Result;
use crate::kernel::{Algorithm, SearchKernel};
use crate::memory::{MemoryError, MemoryReader, MemoryRegion, ModuleInfo};
use crate::pattern::{parse_all, Pattern, PatternCache, PatternError, PatternScanResult};
use std::path::Path;

/// Pattern searches over one contiguous region of bytes.
///
/// Single-pattern searches run on the caller's thread with the selected
/// kernel. Multi-pattern searches fan out over a worker pool and block until
/// every pattern has a result.
pub struct Scanner<'a> {
    region: MemoryRegion<'a>,
    kernel: &'static dyn SearchKernel,
    dispatcher: Dispatcher,
}

impl<'a> Scanner<'a> {
    /// Wraps a region using the fastest kernel and rayon's global pool.
    pub fn new(region: MemoryRegion<'a>) -> Self {
        Self {
            region,
            kernel: Algorithm::best_available().kernel(),
            dispatcher: Dispatcher::global(),
        }
    }

    pub fn with_config(region: MemoryRegion<'a>, config: &ScannerConfig) -> Result<Self> {
        config.validate()?;
        let dispatcher = if config.needs_dedicated_pool() {
            Dispatcher::with_threads(config.worker_threads)?
        } else {
            Dispatcher::global()
        };
        let kernel = config.effective_algorithm().kernel();
        log::debug!(
            "Scanner over {} region of {} bytes using {} kernel",
            region.kind(),
            region.len(),
            kernel.algorithm()
        );
        Ok(Self {
            region,
            kernel,
            dispatcher,
        })
    }

    pub fn from_slice(data: &'a [u8]) -> Result<Self> {
        Ok(Self::new(MemoryRegion::borrowed(data)?))
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes for `'a` and the bytes
    /// must not change while the scanner exists.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Result<Self> {
        Ok(Self::new(MemoryRegion::from_raw_parts(ptr, len)?))
    }

    /// Scans a module of some process.
    ///
    /// A module of another process is copied out through `reader`. A module
    /// of the current process is scanned in place.
    ///
    /// # Safety
    ///
    /// For the current process, the module must stay mapped and unmodified
    /// for `'a`.
    pub unsafe fn from_process_module(
        reader: &dyn MemoryReader,
        module: &ModuleInfo,
    ) -> Result<Self> {
        let region = MemoryRegion::from_module(reader, module)?;
        log::debug!("Scanning module {} ({})", module, region.kind());
        Ok(Self::new(region))
    }

    pub fn len(&self) -> usize {
        self.region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.region.as_slice()
    }

    pub fn region(&self) -> &MemoryRegion<'a> {
        &self.region
    }

    pub fn algorithm(&self) -> Algorithm {
        self.kernel.algorithm()
    }

    pub fn workers(&self) -> usize {
        self.dispatcher.workers()
    }

    pub fn find_pattern(
        &self,
        pattern: &str,
    ) -> std::result::Result<PatternScanResult, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.scan(&pattern))
    }

    /// Lowest match at or after `offset`, reported relative to the region start.
    pub fn find_pattern_from(
        &self,
        pattern: &str,
        offset: usize,
    ) -> std::result::Result<PatternScanResult, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        Ok(self.kernel.find_from(self.as_slice(), &pattern, offset))
    }

    pub fn find_pattern_with_algorithm(
        &self,
        pattern: &str,
        algorithm: Algorithm,
    ) -> std::result::Result<PatternScanResult, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        Ok(algorithm.kernel().find(self.as_slice(), &pattern))
    }

    /// Every offset where the pattern matches, in ascending order. Matches
    /// may overlap.
    pub fn find_all_patterns(
        &self,
        pattern: &str,
    ) -> std::result::Result<Vec<usize>, PatternError> {
        let pattern = Pattern::parse(pattern)?;
        let data = self.as_slice();
        let mut offsets = Vec::new();
        let mut start = 0;

        while let Some(offset) = self.kernel.find_from(data, &pattern, start).position() {
            offsets.push(offset);
            start = offset + 1;
        }
        Ok(offsets)
    }

    /// Searches for every pattern in parallel. Result `i` belongs to
    /// `patterns[i]`. A malformed pattern fails the call before any scanning.
    pub fn find_patterns<S>(
        &self,
        patterns: &[S],
        load_balance: bool,
    ) -> std::result::Result<Vec<PatternScanResult>, PatternError>
    where
        S: AsRef<str>,
    {
        let patterns = parse_all(patterns)?;
        Ok(self.dispatcher.run(&patterns, load_balance, |p| self.scan(p)))
    }

    /// Like [`find_patterns`](Self::find_patterns), but repeated pattern
    /// strings (ignoring hex digit case) are normally scanned only once.
    pub fn find_patterns_cached<S>(
        &self,
        patterns: &[S],
        load_balance: bool,
    ) -> std::result::Result<Vec<PatternScanResult>, PatternError>
    where
        S: AsRef<str>,
    {
        let patterns = parse_all(patterns)?;
        let cache = PatternCache::with_capacity(patterns.len());
        Ok(self.dispatcher.run(&patterns, load_balance, |p| {
            cache.get_or_insert_with(p.source(), || self.scan(p))
        }))
    }

    fn scan(&self, pattern: &Pattern) -> PatternScanResult {
        self.kernel.find(self.as_slice(), pattern)
    }
}

impl Scanner<'static> {
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        Ok(Self::new(MemoryRegion::owned(data)?))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(MemoryRegion::map_file(path)?))
    }
}

impl<'a> From<MemoryRegion<'a>> for Scanner<'a> {
    fn from(region: MemoryRegion<'a>) -> Self {
        Self::new(region)
    }
}

impl TryFrom<Vec<u8>> for Scanner<'static> {
    type Error = MemoryError;

    fn try_from(data: Vec<u8>) -> std::result::Result<Self, MemoryError> {
        Ok(Self::new(MemoryRegion::owned(data)?))
    }
}
