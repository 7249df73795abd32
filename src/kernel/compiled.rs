// Fri Jan 16 2026 - Alex

use crate::kernel::simple;
use crate::pattern::{CompiledScanPattern, Instruction, PatternScanResult, WORD_SIZE};

/// Candidates tested against the first instruction per step before a full check.
const UNROLL: usize = 8;

/// Word-at-a-time search.
///
/// Each candidate offset loads a machine word and tests it against the first
/// instruction; only hits are checked against the remaining instructions. On a
/// mismatch the candidate slides by one byte. Offsets whose word reads would
/// run past the end of `data` are handed to the simple kernel.
pub fn find(data: &[u8], pattern: &CompiledScanPattern) -> PatternScanResult {
    let span = pattern.read_span();
    if data.len() < span {
        return simple::find(data, pattern.simple());
    }

    let instructions = pattern.instructions();
    let first = instructions[0];
    let remaining = &instructions[1..];

    // Every offset below `last_index` can read `span` bytes without overrun.
    let last_index = data.len() - span + 1;
    let base = data.as_ptr();
    let mut position = 0;

    while position + UNROLL <= last_index {
        // SAFETY: position + UNROLL - 1 < last_index, so each word read is in bounds.
        let hit = (0..UNROLL).find(|&k| unsafe { first.test(load_word(base.add(position + k))) });

        match hit {
            None => position += UNROLL,
            Some(k) => {
                position += k;
                // SAFETY: position < last_index.
                if unsafe { test_remaining(base.add(position), remaining) } {
                    return PatternScanResult::found(position);
                }
                position += 1;
            }
        }
    }

    while position < last_index {
        // SAFETY: position < last_index.
        let matched = unsafe {
            let ptr = base.add(position);
            first.test(load_word(ptr)) && test_remaining(ptr, remaining)
        };
        if matched {
            return PatternScanResult::found(position);
        }
        position += 1;
    }

    simple::find(&data[position..], pattern.simple()).add_offset(position)
}

#[inline(always)]
unsafe fn load_word(ptr: *const u8) -> usize {
    ptr.cast::<usize>().read_unaligned()
}

/// Tests every instruction after the first. `ptr` must have
/// `(remaining.len() + 1) * WORD_SIZE` readable bytes.
#[inline(always)]
unsafe fn test_remaining(ptr: *const u8, remaining: &[Instruction]) -> bool {
    let mut cursor = ptr;
    for instruction in remaining {
        cursor = cursor.add(WORD_SIZE);
        if !instruction.test(load_word(cursor)) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use crate::utils::testing::{random_bytes, reference_data};

    fn scan(data: &[u8], pattern: &str) -> PatternScanResult {
        find(data, Pattern::parse(pattern).unwrap().compiled())
    }

    #[test]
    fn test_basic_pattern() {
        assert_eq!(scan(&reference_data(), "04 25 12 2B 86 E5 E3").offset, 9);
        assert_eq!(scan(&reference_data(), "04 25 ?? ?? 86 E5 E3").offset, 9);
    }

    #[test]
    fn test_tail_is_handed_to_simple() {
        let data = reference_data();
        assert_eq!(scan(&data, "7A BB").offset, 254);
        assert_eq!(scan(&data, "BB").offset, 255);
        assert_eq!(scan(&data, "7A BB CC DD EE FF"), PatternScanResult::NOT_FOUND);
    }

    #[test]
    fn test_short_data() {
        assert_eq!(scan(&[0x01, 0x02, 0x03], "02 03").offset, 1);
        assert_eq!(scan(&[0x01, 0x02, 0x03], "03 04"), PatternScanResult::NOT_FOUND);
    }

    #[test]
    fn test_every_position_of_multiword_pattern() {
        let mut data = random_bytes(97, 3);
        let needle: Vec<u8> = (0..(WORD_SIZE as u8 * 2 + 3)).map(|b| b ^ 0xA5).collect();
        let source = needle.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ");
        let pattern = Pattern::parse(&source).unwrap();

        for at in 0..=(data.len() - needle.len()) {
            let saved = data.clone();
            data[at..at + needle.len()].copy_from_slice(&needle);
            let expected = crate::kernel::simple::find(&data, pattern.simple());
            assert_eq!(find(&data, pattern.compiled()), expected, "needle at {}", at);
            data = saved;
        }
    }
}
