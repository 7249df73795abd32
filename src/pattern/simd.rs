// Fri Jan 16 2026 - Alex

use crate::pattern::Token;

/// Pattern layout for the vectorized kernels.
///
/// The first non-wildcard byte (the anchor) is broadcast and searched for;
/// every candidate is then verified against the bytes that follow it, laid
/// out contiguously and zero padded to whole vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimdPatternScanData {
    bytes: Vec<u8>,
    mask: Vec<u8>,
    leading_ignore_count: usize,
    match_indexes: Vec<usize>,
}

impl SimdPatternScanData {
    pub fn new(tokens: &[Token]) -> Self {
        let bytes: Vec<u8> = tokens.iter().map(|t| t.to_byte().unwrap_or(0)).collect();
        let mask: Vec<u8> = tokens.iter().map(|t| u8::from(!t.is_wildcard())).collect();
        let leading_ignore_count = tokens.iter().take_while(|t| t.is_wildcard()).count();
        let match_indexes = build_match_indexes(&mask, leading_ignore_count);

        Self {
            bytes,
            mask,
            leading_ignore_count,
            match_indexes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub fn len(&self) -> usize {
        self.mask.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn leading_ignore_count(&self) -> usize {
        self.leading_ignore_count
    }

    /// Positions after the anchor that must compare equal, relative to the
    /// byte right after the anchor.
    pub fn match_indexes(&self) -> &[usize] {
        &self.match_indexes
    }

    /// Index and value of the first byte that is not a wildcard.
    pub fn anchor(&self) -> Option<(usize, u8)> {
        (self.leading_ignore_count < self.len())
            .then(|| (self.leading_ignore_count, self.bytes[self.leading_ignore_count]))
    }

    /// Single-byte and all-wildcard patterns are left to the simple kernel.
    pub fn is_vectorizable(&self) -> bool {
        self.len() > 1 && self.anchor().is_some()
    }

    fn tail(&self) -> &[u8] {
        &self.bytes[(self.leading_ignore_count + 1).min(self.len())..]
    }

    /// Bytes after the anchor split into `W`-wide chunks, the last one zero padded.
    pub fn padded_tail<const W: usize>(&self) -> Vec<[u8; W]> {
        self.tail()
            .chunks(W)
            .map(|chunk| {
                let mut lane = [0u8; W];
                lane[..chunk.len()].copy_from_slice(chunk);
                lane
            })
            .collect()
    }

    /// The match table folded into one "must be equal" bitmask per vector of
    /// [`padded_tail`](Self::padded_tail). `W` is at most 32.
    pub fn verification_masks<const W: usize>(&self) -> Vec<u32> {
        debug_assert!(W <= 32);
        let vector_count = (self.tail().len() + W - 1) / W;
        let mut masks = vec![0u32; vector_count];
        for &index in &self.match_indexes {
            masks[index / W] |= 1 << (index % W);
        }
        masks
    }
}

fn build_match_indexes(mask: &[u8], leading_ignore_count: usize) -> Vec<usize> {
    let first_checked = leading_ignore_count + 1;
    (first_checked..mask.len())
        .filter(|&x| mask[x] != 0)
        .map(|x| x - first_checked)
        .collect()
}
