// Fri Jan 16 2026 - Alex

use crate::pattern::{PatternScanResult, SimplePatternScanData};

/// Byte-at-a-time search. Never reads past `data`, which makes it the fallback
/// for every region tail the wider kernels cannot load safely.
pub fn find(data: &[u8], pattern: &SimplePatternScanData) -> PatternScanResult {
    let mask = pattern.mask();
    let bytes = pattern.bytes();

    if mask.len() > data.len() {
        return PatternScanResult::NOT_FOUND;
    }
    let last_index = data.len() - mask.len();

    'candidates: for x in 0..=last_index {
        let window = &data[x..x + mask.len()];
        let mut byte_index = 0;

        for (&m, &d) in mask.iter().zip(window) {
            if m == 0 {
                continue;
            }
            if d != bytes[byte_index] {
                continue 'candidates;
            }
            byte_index += 1;
        }

        return PatternScanResult::found(x);
    }

    PatternScanResult::NOT_FOUND
}
