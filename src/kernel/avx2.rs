// Fri Jan 16 2026 - Alex

use crate::kernel::simple;
use crate::pattern::{Pattern, PatternScanResult};
use std::arch::x86_64::*;

const REGISTER_LENGTH: usize = 32;

/// 32-byte vector search. Same walk as the SSE2 kernel with twice the stride.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn find(data: &[u8], pattern: &Pattern) -> PatternScanResult {
    let scan = pattern.simd();
    let (anchor, anchor_byte) = match scan.anchor() {
        Some(anchor) if scan.is_vectorizable() => anchor,
        _ => return simple::find(data, pattern.simple()),
    };

    let tail = scan.padded_tail::<REGISTER_LENGTH>();
    let required = scan.verification_masks::<REGISTER_LENGTH>();

    let mut tail_vectors = Vec::with_capacity(tail.len());
    for lane in &tail {
        tail_vectors.push(_mm256_loadu_si256(lane.as_ptr().cast()));
    }

    let window = (tail_vectors.len() + 1) * REGISTER_LENGTH;
    let anchor_vector = _mm256_set1_epi8(anchor_byte as i8);
    let base = data.as_ptr();
    let mut cursor = anchor;

    while cursor + window <= data.len() {
        let chunk = _mm256_loadu_si256(base.add(cursor).cast());
        let mut candidates = _mm256_movemask_epi8(_mm256_cmpeq_epi8(anchor_vector, chunk)) as u32;

        while candidates != 0 {
            let hit = cursor + candidates.trailing_zeros() as usize;
            if verify(base.add(hit + 1), &tail_vectors, &required) {
                return PatternScanResult::found(hit - anchor);
            }
            candidates &= candidates - 1;
        }

        cursor += REGISTER_LENGTH;
    }

    let start = cursor - anchor;
    simple::find(&data[start..], pattern.simple()).add_offset(start)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn verify(ptr: *const u8, tail_vectors: &[__m256i], required: &[u32]) -> bool {
    for (i, (&expected, &mask)) in tail_vectors.iter().zip(required).enumerate() {
        let memory = _mm256_loadu_si256(ptr.add(i * REGISTER_LENGTH).cast());
        let equal = _mm256_movemask_epi8(_mm256_cmpeq_epi8(expected, memory)) as u32;
        if equal & mask != mask {
            return false;
        }
    }
    true
}
