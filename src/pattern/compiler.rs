// Fri Jan 16 2026 - Alex

use crate::pattern::{SimplePatternScanData, Token};
use std::mem::size_of;

pub const WORD_SIZE: usize = size_of::<usize>();

/// Checks one machine word of memory: `(word & mask) == value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instruction {
    pub value: usize,
    pub mask: usize,
}

impl Instruction {
    #[inline(always)]
    pub fn test(&self, word: usize) -> bool {
        word & self.mask == self.value
    }
}

/// A pattern re-encoded as word-wide value/mask pairs, in pattern order.
///
/// Each instruction covers up to [`WORD_SIZE`] tokens. Within an instruction
/// the bytes are laid out the way an unaligned native-endian load of the same
/// memory would see them, so a single AND + compare tests the whole chunk.
#[derive(Debug, Clone)]
pub struct CompiledScanPattern {
    length: usize,
    instructions: Vec<Instruction>,
    simple: SimplePatternScanData,
}

impl CompiledScanPattern {
    pub fn new(tokens: &[Token]) -> Self {
        let instructions = tokens.chunks(WORD_SIZE).map(generate_mask_and_value).collect();

        Self {
            length: tokens.len(),
            instructions,
            simple: SimplePatternScanData::new(tokens),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Bytes read from memory when all instructions are tested at one offset.
    pub fn read_span(&self) -> usize {
        self.instructions.len() * WORD_SIZE
    }

    pub fn simple(&self) -> &SimplePatternScanData {
        &self.simple
    }
}

/// Packs up to one word of tokens. Bytes are accumulated most significant
/// first, then normalized to memory order for the host.
fn generate_mask_and_value(chunk: &[Token]) -> Instruction {
    debug_assert!(!chunk.is_empty() && chunk.len() <= WORD_SIZE);

    let mut mask: usize = 0;
    let mut value: usize = 0;
    for token in chunk {
        mask <<= 8;
        value <<= 8;
        if let Token::Byte(b) = token {
            mask |= 0xFF;
            value |= *b as usize;
        }
    }

    let padding_bits = (WORD_SIZE - chunk.len()) * 8;
    Instruction {
        value: to_memory_order(value, padding_bits),
        mask: to_memory_order(mask, padding_bits),
    }
}

// The accumulated word has pattern byte 0 in its most significant used byte.
// A little-endian load puts memory byte 0 in the least significant byte, so
// reverse and drop the padding; a big-endian load needs the padding moved low.
#[inline]
fn to_memory_order(word: usize, padding_bits: usize) -> usize {
    if cfg!(target_endian = "little") {
        word.swap_bytes() >> padding_bits
    } else {
        word << padding_bits
    }
}
