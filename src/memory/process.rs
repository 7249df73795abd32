// Tue Jan 13 2026 - Alex

use crate::memory::{parse_maps, Address, MemoryError, MemoryReader, ModuleInfo};

/// Another (or the current) process, read through the kernel.
#[derive(Debug, Clone)]
pub struct ProcessMemory {
    pid: u32,
}

impl ProcessMemory {
    pub fn current() -> Self {
        Self {
            pid: std::process::id(),
        }
    }

    #[cfg(target_os = "linux")]
    pub fn attach(pid: u32) -> Result<Self, MemoryError> {
        if !std::path::Path::new(&format!("/proc/{}", pid)).exists() {
            return Err(MemoryError::ProcessNotFound(pid));
        }
        log::debug!("Attached to process {}", pid);
        Ok(Self { pid })
    }

    #[cfg(not(target_os = "linux"))]
    pub fn attach(pid: u32) -> Result<Self, MemoryError> {
        Err(MemoryError::NotSupported(format!(
            "attaching to process {} on this platform",
            pid
        )))
    }

    #[cfg(target_os = "linux")]
    pub fn modules(&self) -> Result<Vec<ModuleInfo>, MemoryError> {
        let maps = std::fs::read_to_string(format!("/proc/{}/maps", self.pid))?;
        Ok(parse_maps(&maps))
    }

    #[cfg(not(target_os = "linux"))]
    pub fn modules(&self) -> Result<Vec<ModuleInfo>, MemoryError> {
        Err(MemoryError::NotSupported("module enumeration".to_string()))
    }

    pub fn find_module(&self, name: &str) -> Result<ModuleInfo, MemoryError> {
        self.modules()?
            .into_iter()
            .find(|m| m.name == name || m.path == name)
            .ok_or_else(|| MemoryError::ModuleNotFound(name.to_string()))
    }

    /// The module backing the process executable.
    #[cfg(target_os = "linux")]
    pub fn main_module(&self) -> Result<ModuleInfo, MemoryError> {
        let exe = std::fs::read_link(format!("/proc/{}/exe", self.pid))?;
        let exe = exe.to_string_lossy();
        self.modules()?
            .into_iter()
            .find(|m| m.path == exe)
            .ok_or_else(|| MemoryError::ModuleNotFound(exe.into_owned()))
    }

    #[cfg(not(target_os = "linux"))]
    pub fn main_module(&self) -> Result<ModuleInfo, MemoryError> {
        Err(MemoryError::NotSupported("module enumeration".to_string()))
    }
}

impl MemoryReader for ProcessMemory {
    fn pid(&self) -> u32 {
        self.pid
    }

    #[cfg(target_os = "linux")]
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mut buffer = vec![0u8; len];
        if len == 0 {
            return Ok(buffer);
        }

        let local = libc::iovec {
            iov_base: buffer.as_mut_ptr().cast(),
            iov_len: len,
        };
        let remote = libc::iovec {
            iov_base: addr.as_u64() as usize as *mut libc::c_void,
            iov_len: len,
        };

        // SAFETY: `local` covers exactly `buffer`; the kernel validates `remote`.
        let read =
            unsafe { libc::process_vm_readv(self.pid as libc::pid_t, &local, 1, &remote, 1, 0) };

        if read < 0 {
            return Err(MemoryError::ReadFailed {
                address: addr,
                len,
                source: std::io::Error::last_os_error(),
            });
        }
        if read as usize != len {
            return Err(MemoryError::PartialRead {
                address: addr,
                expected: len,
                actual: read as usize,
            });
        }
        Ok(buffer)
    }

    #[cfg(not(target_os = "linux"))]
    fn read_bytes(&self, _addr: Address, _len: usize) -> Result<Vec<u8>, MemoryError> {
        Err(MemoryError::NotSupported("cross-process reads".to_string()))
    }
}
