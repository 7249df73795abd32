// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError};

/// Source of bytes from some process's address space.
pub trait MemoryReader: Send + Sync {
    fn pid(&self) -> u32;

    /// Reads exactly `len` bytes. A short read is an error.
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    /// Whether addresses from this reader are valid pointers in the current process.
    fn is_current_process(&self) -> bool {
        self.pid() == std::process::id()
    }
}
