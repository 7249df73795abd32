// Tue Jan 13 2026 - Alex

pub mod address;
pub mod error;
pub mod module;
pub mod process;
pub mod region;
pub mod traits;

pub use address::Address;
pub use error::MemoryError;
pub use module::{parse_maps, ModuleInfo};
pub use process::ProcessMemory;
pub use region::{MemoryRegion, MAX_REGION_LEN};
pub use traits::MemoryReader;
