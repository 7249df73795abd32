// Fri Jan 16 2026 - Alex

use crate::pattern::PatternError;

pub const WILDCARD_TOKEN: &str = "??";

/// One position of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Wildcard,
    Byte(u8),
}

impl Token {
    /// Parses a single token. Only `??` and exactly two hex digits are accepted.
    pub fn parse(s: &str, index: usize) -> Result<Self, PatternError> {
        let invalid = || PatternError::InvalidToken {
            token: s.to_string(),
            index,
        };

        if s == WILDCARD_TOKEN {
            return Ok(Self::Wildcard);
        }

        let raw = s.as_bytes();
        if raw.len() != 2 {
            return Err(invalid());
        }

        let hi = hex_value(raw[0]).ok_or_else(invalid)?;
        let lo = hex_value(raw[1]).ok_or_else(invalid)?;
        Ok(Self::Byte(hi << 4 | lo))
    }

    pub fn matches(&self, byte: u8) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Byte(b) => *b == byte,
        }
    }

    pub fn to_byte(&self) -> Option<u8> {
        match self {
            Self::Wildcard => None,
            Self::Byte(b) => Some(*b),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

impl From<u8> for Token {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

// `u8::from_str_radix` accepts a leading `+`, which is not a valid token.
fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 0xA),
        b'A'..=b'F' => Some(c - b'A' + 0xA),
        _ => None,
    }
}
