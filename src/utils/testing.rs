// Tue Jan 13 2026 - Alex

//! Shared buffers for kernel and scanner tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bytes never produced as filler so the planted sequences are the first
/// occurrence of their leading bytes.
const RESERVED: [u8; 5] = [0xBB, 0x7A, 0xD3, 0x04, 0x25];

const HEADER: [u8; 3] = [0xD3, 0xB2, 0x7A];
const BODY_OFFSET: usize = 9;
const BODY: [u8; 14] = [
    0x04, 0x25, 0x12, 0x2B, 0x86, 0xE5, 0xE3, 0x21, 0xAF, 0xA3, 0x5C, 0x1E, 0x71, 0xD1,
];
const FOOTER: [u8; 2] = [0x7A, 0xBB];

pub const REFERENCE_LEN: usize = 256;

/// Routes `log` output through the test harness; honours `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Seeded generator so failures reproduce.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0u8; len];
    rng(seed).fill(&mut data[..]);
    data
}

/// The 256-byte buffer used across the kernel tests:
///
/// * `D3 B2 7A` at offset 0
/// * `04 25 12 2B 86 E5 E3 21 AF A3 5C 1E 71 D1` at offset 9
/// * `7A BB` as the last two bytes
pub fn reference_data() -> Vec<u8> {
    let mut filler = rng(0x5EED);
    let mut data: Vec<u8> = (0..REFERENCE_LEN)
        .map(|_| loop {
            let b: u8 = filler.gen();
            if !RESERVED.contains(&b) {
                break b;
            }
        })
        .collect();

    data[..HEADER.len()].copy_from_slice(&HEADER);
    data[BODY_OFFSET..BODY_OFFSET + BODY.len()].copy_from_slice(&BODY);
    data[REFERENCE_LEN - FOOTER.len()..].copy_from_slice(&FOOTER);
    data
}

/// Turns raw bytes into pattern text, replacing positions where `wildcard`
/// returns true with `??`.
pub fn pattern_text(bytes: &[u8], wildcard: impl Fn(usize) -> bool) -> String {
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if wildcard(i) {
                "??".to_string()
            } else {
                format!("{:02X}", b)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout() {
        let data = reference_data();
        assert_eq!(data.len(), 256);
        assert_eq!(&data[..3], &HEADER);
        assert_eq!(&data[9..23], &BODY);
        assert_eq!(&data[254..], &FOOTER);
        assert_eq!(data.iter().position(|&b| b == 0xBB), Some(255));
        assert_eq!(data.iter().position(|&b| b == 0x04), Some(9));
    }

    #[test]
    fn test_generator_is_reproducible() {
        assert_eq!(random_bytes(64, 7), random_bytes(64, 7));
        assert_ne!(random_bytes(64, 7), random_bytes(64, 8));
    }

    #[test]
    fn test_pattern_text() {
        assert_eq!(pattern_text(&[0x04, 0x25, 0x12], |i| i == 1), "04 ?? 12");
    }
}
