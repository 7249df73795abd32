// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader, ModuleInfo};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// Largest region a scanner accepts; offsets are reported as `i32`.
pub const MAX_REGION_LEN: usize = i32::MAX as usize;

/// The bytes a scanner searches. Owned and mapped regions are released when
/// the value is dropped; borrowed regions belong to someone else.
pub enum MemoryRegion<'a> {
    Owned(Box<[u8]>),
    Borrowed(&'a [u8]),
    Mapped(Mmap),
}

impl<'a> MemoryRegion<'a> {
    pub fn owned(bytes: impl Into<Box<[u8]>>) -> Result<Self, MemoryError> {
        check_len(Self::Owned(bytes.into()))
    }

    pub fn borrowed(bytes: &'a [u8]) -> Result<Self, MemoryError> {
        check_len(Self::Borrowed(bytes))
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes for the whole lifetime
    /// `'a`, and the memory must not be written while the region exists.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Result<Self, MemoryError> {
        if len > MAX_REGION_LEN {
            return Err(MemoryError::RegionTooLarge(len));
        }
        Ok(Self::Borrowed(std::slice::from_raw_parts(ptr, len)))
    }

    /// A module of another process is copied out through `reader`; a module
    /// of the current process is borrowed in place.
    ///
    /// # Safety
    ///
    /// For the current process, the module must stay mapped and unmodified
    /// for `'a`. Modules produced by `parse_maps` cover read-only mappings
    /// only; a hand-built `ModuleInfo` spanning writable memory breaks this.
    pub unsafe fn from_module(
        reader: &dyn MemoryReader,
        module: &ModuleInfo,
    ) -> Result<Self, MemoryError> {
        if reader.is_current_process() {
            Self::from_raw_parts(module.base.as_ptr(), module.size)
        } else {
            MemoryRegion::read_from(reader, module.base, module.size)
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            MemoryRegion::Owned(bytes) => bytes,
            MemoryRegion::Borrowed(bytes) => bytes,
            MemoryRegion::Mapped(map) => map,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MemoryRegion::Owned(_) => "owned",
            MemoryRegion::Borrowed(_) => "borrowed",
            MemoryRegion::Mapped(_) => "mapped",
        }
    }
}

impl MemoryRegion<'static> {
    /// Maps a file read-only.
    pub fn map_file<P: AsRef<Path>>(path: P) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        // SAFETY: the map is read-only; truncating the file underneath it is
        // outside what this crate can guard against.
        let map = unsafe { Mmap::map(&file) }?;
        log::debug!("Mapped {} ({} bytes)", path.as_ref().display(), map.len());
        check_len(Self::Mapped(map))
    }

    /// Copies `len` bytes starting at `base` out of the reader's process.
    pub fn read_from(
        reader: &dyn MemoryReader,
        base: Address,
        len: usize,
    ) -> Result<Self, MemoryError> {
        if len > MAX_REGION_LEN {
            return Err(MemoryError::RegionTooLarge(len));
        }
        let bytes = reader.read_bytes(base, len)?;
        if bytes.len() != len {
            return Err(MemoryError::PartialRead {
                address: base,
                expected: len,
                actual: bytes.len(),
            });
        }
        Ok(Self::Owned(bytes.into_boxed_slice()))
    }
}

fn check_len(region: MemoryRegion<'_>) -> Result<MemoryRegion<'_>, MemoryError> {
    if region.len() > MAX_REGION_LEN {
        return Err(MemoryError::RegionTooLarge(region.len()));
    }
    Ok(region)
}

impl Deref for MemoryRegion<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for MemoryRegion<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for MemoryRegion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRegion")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .finish()
    }
}
