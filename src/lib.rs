// Tue Jan 15 2026 - Alex

//! Byte signature scanning over files, buffers and process modules.
//!
//! Patterns are space separated two-digit hex bytes with `??` wildcards:
//!
//! ```
//! use sigscan::Scanner;
//!
//! let data = vec![0x48, 0x8B, 0x05, 0x10, 0x20, 0x30, 0x40, 0xC3];
//! let scanner = Scanner::from_vec(data).unwrap();
//! let result = scanner.find_pattern("8B 05 ?? ?? ?? ?? C3").unwrap();
//! assert_eq!(result.offset, 1);
//! ```

pub mod config;
pub mod error;
pub mod kernel;
pub mod memory;
pub mod pattern;
pub mod scanner;
pub mod ui;
pub mod utils;

pub use config::{ConfigError, ScannerConfig};
pub use error::{Error, Result};
pub use kernel::{Algorithm, SearchKernel};
pub use memory::{Address, MemoryError, MemoryReader, MemoryRegion, ModuleInfo, ProcessMemory};
pub use pattern::{Pattern, PatternError, PatternScanResult};
pub use scanner::{Scanner, ScannerFactory};
