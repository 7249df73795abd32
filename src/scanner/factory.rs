// Fri Jan 16 2026 - Alex

use crate::config::ScannerConfig;
use crate::error::Result;
use crate::memory::{MemoryReader, MemoryRegion, ModuleInfo, ProcessMemory};
use crate::scanner::Scanner;
use std::path::Path;

/// Builds scanners that all share one configuration.
#[derive(Debug, Clone, Default)]
pub struct ScannerFactory {
    config: ScannerConfig,
}

impl ScannerFactory {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn from_buffer(&self, data: Vec<u8>) -> Result<Scanner<'static>> {
        Scanner::with_config(MemoryRegion::owned(data)?, &self.config)
    }

    pub fn from_slice<'a>(&self, data: &'a [u8]) -> Result<Scanner<'a>> {
        Scanner::with_config(MemoryRegion::borrowed(data)?, &self.config)
    }

    /// # Safety
    ///
    /// See [`Scanner::from_raw_parts`].
    pub unsafe fn from_raw_parts<'a>(&self, ptr: *const u8, len: usize) -> Result<Scanner<'a>> {
        Scanner::with_config(MemoryRegion::from_raw_parts(ptr, len)?, &self.config)
    }

    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<Scanner<'static>> {
        Scanner::with_config(MemoryRegion::map_file(path)?, &self.config)
    }

    /// # Safety
    ///
    /// See [`Scanner::from_process_module`].
    pub unsafe fn from_process_module<'a>(
        &self,
        reader: &dyn MemoryReader,
        module: &ModuleInfo,
    ) -> Result<Scanner<'a>> {
        Scanner::with_config(MemoryRegion::from_module(reader, module)?, &self.config)
    }

    /// Attaches to `pid`, finds `module_name` and copies it out.
    pub fn from_process(&self, pid: u32, module_name: &str) -> Result<Scanner<'static>> {
        let process = ProcessMemory::attach(pid)?;
        let module = process.find_module(module_name)?;
        let region = MemoryRegion::read_from(&process, module.base, module.size)?;
        Scanner::with_config(region, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Algorithm;
    use crate::utils::testing::reference_data;

    #[test]
    fn test_factory_applies_config() {
        let config = ScannerConfig::new()
            .with_algorithm(Algorithm::Compiled)
            .with_worker_threads(2);
        let factory = ScannerFactory::new(config);
        let scanner = factory.from_buffer(reference_data()).unwrap();

        assert_eq!(scanner.algorithm(), Algorithm::Compiled);
        assert_eq!(scanner.workers(), 2);
        assert_eq!(scanner.find_pattern("7A BB").unwrap().offset, 254);
    }

    #[test]
    fn test_factory_from_slice_and_raw_parts() {
        let data = reference_data();
        let factory = ScannerFactory::default();

        let borrowed = factory.from_slice(&data).unwrap();
        assert_eq!(borrowed.find_pattern("D3 B2 7A").unwrap().offset, 0);

        let raw = unsafe { factory.from_raw_parts(data.as_ptr(), data.len()) }.unwrap();
        assert_eq!(raw.find_pattern("BB").unwrap().offset, 255);
    }

    #[test]
    fn test_factory_missing_process() {
        let result = ScannerFactory::default().from_process(u32::MAX, "libc.so.6");
        assert!(matches!(result, Err(crate::Error::Memory(_))));
    }
}
