// Wed Jan 15 2026 - Alex

use crate::memory::Address;
use std::fmt;

/// A file mapped into a process: the contiguous read-only run of mappings
/// that starts at the file's first byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: String,
    pub path: String,
    pub base: Address,
    pub size: usize,
}

impl ModuleInfo {
    pub fn end(&self) -> Address {
        self.base + self.size as u64
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.is_within_range(self.base, self.end())
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}+0x{:x}", self.name, self.base, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MapsEntry<'a> {
    start: u64,
    end: u64,
    readable: bool,
    writable: bool,
    offset: u64,
    path: &'a str,
}

impl MapsEntry<'_> {
    fn is_read_only(&self) -> bool {
        self.readable && !self.writable
    }
}

fn parse_line(line: &str) -> Option<MapsEntry<'_>> {
    let mut fields = line.splitn(6, ' ');
    let range = fields.next()?;
    let perms = fields.next()?;
    let offset = fields.next()?;
    let _device = fields.next()?;
    let _inode = fields.next()?;
    let path = fields.next().unwrap_or("").trim();

    let (start, end) = range.split_once('-')?;
    Some(MapsEntry {
        start: u64::from_str_radix(start, 16).ok()?,
        end: u64::from_str_radix(end, 16).ok()?,
        readable: perms.starts_with('r'),
        writable: perms.as_bytes().get(1) == Some(&b'w'),
        offset: u64::from_str_radix(offset, 16).ok()?,
        path,
    })
}

/// Groups the lines of a `/proc/<pid>/maps` listing into modules.
///
/// A module begins at a read-only mapping of a file at offset 0 and extends
/// across following mappings of the same file while they stay adjacent,
/// readable and not writable. Data segments are never part of a module.
/// Anonymous and pseudo mappings (`[heap]`, `[stack]`, ...) are skipped.
pub fn parse_maps(maps: &str) -> Vec<ModuleInfo> {
    let mut modules: Vec<ModuleInfo> = Vec::new();
    let mut open: Option<(ModuleInfo, bool)> = None;

    for entry in maps.lines().filter_map(parse_line) {
        if let Some((module, extending)) = open.as_mut() {
            if entry.path == module.path {
                if *extending && entry.is_read_only() && entry.start == module.end().as_u64() {
                    module.size += (entry.end - entry.start) as usize;
                } else {
                    *extending = false;
                }
                continue;
            }
            if let Some((module, _)) = open.take() {
                modules.push(module);
            }
        }

        if entry.is_read_only() && entry.offset == 0 && entry.path.starts_with('/') {
            let name = entry.path.rsplit('/').next().unwrap_or(entry.path).to_string();
            open = Some((
                ModuleInfo {
                    name,
                    path: entry.path.to_string(),
                    base: Address::new(entry.start),
                    size: (entry.end - entry.start) as usize,
                },
                true,
            ));
        }
    }

    if let Some((module, _)) = open {
        modules.push(module);
    }
    modules
}
