// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Read of {len} bytes failed at address {address}: {source}")]
    ReadFailed {
        address: Address,
        len: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("Partial read at address {address}: expected {expected} bytes, got {actual}")]
    PartialRead {
        address: Address,
        expected: usize,
        actual: usize,
    },
    #[error("Process not found: {0}")]
    ProcessNotFound(u32),
    #[error("Module not found: {0}")]
    ModuleNotFound(String),
    #[error("Region of {0} bytes exceeds the addressable scan range")]
    RegionTooLarge(usize),
    #[error("Not supported: {0}")]
    NotSupported(String),
}
