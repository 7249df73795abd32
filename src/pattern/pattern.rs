// Fri Jan 16 2026 - Alex

use crate::pattern::compiler::CompiledScanPattern;
use crate::pattern::simd::SimdPatternScanData;
use crate::pattern::{PatternError, Token};
use once_cell::sync::OnceCell;
use std::fmt;

/// A parsed signature such as `"48 8B ?? ?? 89"`.
///
/// Tokens are separated by exactly one space. The representations used by the
/// search kernels are derived lazily and cached, so a parsed pattern can be
/// reused across many scans at no extra cost.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
    simple: OnceCell<SimplePatternScanData>,
    compiled: OnceCell<CompiledScanPattern>,
    simd: OnceCell<SimdPatternScanData>,
}

impl Pattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }

        let tokens = source
            .split(' ')
            .enumerate()
            .map(|(index, token)| Token::parse(token, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_parts(source.to_string(), tokens))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, PatternError> {
        if tokens.is_empty() {
            return Err(PatternError::Empty);
        }
        let source = tokens_to_hex(&tokens);
        Ok(Self::from_parts(source, tokens))
    }

    /// Builds a pattern from a byte/mask pair where a zero mask byte marks a wildcard.
    pub fn from_bytes_and_mask(bytes: &[u8], mask: &[u8]) -> Result<Self, PatternError> {
        if bytes.len() != mask.len() {
            return Err(PatternError::InvalidToken {
                token: format!("mask length {} != byte length {}", mask.len(), bytes.len()),
                index: bytes.len().min(mask.len()),
            });
        }
        let tokens = bytes
            .iter()
            .zip(mask)
            .map(|(&b, &m)| if m == 0 { Token::Wildcard } else { Token::Byte(b) })
            .collect();
        Self::from_tokens(tokens)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        Self::from_tokens(bytes.iter().copied().map(Token::Byte).collect())
    }

    fn from_parts(source: String, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            simple: OnceCell::new(),
            compiled: OnceCell::new(),
            simd: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn significant_byte_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_wildcard()).count()
    }

    pub fn leading_wildcard_count(&self) -> usize {
        self.tokens.iter().take_while(|t| t.is_wildcard()).count()
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() >= self.tokens.len()
            && self.tokens.iter().zip(data).all(|(t, &b)| t.matches(b))
    }

    pub fn simple(&self) -> &SimplePatternScanData {
        self.simple.get_or_init(|| SimplePatternScanData::new(&self.tokens))
    }

    pub fn compiled(&self) -> &CompiledScanPattern {
        self.compiled.get_or_init(|| CompiledScanPattern::new(&self.tokens))
    }

    pub fn simd(&self) -> &SimdPatternScanData {
        self.simd.get_or_init(|| SimdPatternScanData::new(&self.tokens))
    }

    pub fn to_hex_string(&self) -> String {
        tokens_to_hex(&self.tokens)
    }

    /// Key under which equal patterns collide regardless of hex digit case.
    pub fn normalized_key(&self) -> String {
        normalize_key(&self.source)
    }
}

pub fn normalize_key(source: &str) -> String {
    source.to_ascii_uppercase()
}

fn tokens_to_hex(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::Byte(b) => format!("{:02X}", b),
            Token::Wildcard => "??".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Pattern {}

impl std::str::FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Byte/mask form consumed by the simple kernel and every tail fallback.
///
/// `bytes` holds only the non-wildcard values, in order. `mask` has one entry
/// per token: 0 for a wildcard, 1 for a byte that must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePatternScanData {
    bytes: Vec<u8>,
    mask: Vec<u8>,
}

impl SimplePatternScanData {
    pub fn new(tokens: &[Token]) -> Self {
        let mut bytes = Vec::with_capacity(tokens.len());
        let mut mask = Vec::with_capacity(tokens.len());

        for token in tokens {
            match token {
                Token::Wildcard => mask.push(0x0),
                Token::Byte(b) => {
                    bytes.push(*b);
                    mask.push(0x1);
                }
            }
        }

        Self { bytes, mask }
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
}

pub struct PatternBuilder {
    tokens: Vec<Token>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn byte(mut self, b: u8) -> Self {
        self.tokens.push(Token::Byte(b));
        self
    }

    pub fn bytes(mut self, bs: &[u8]) -> Self {
        self.tokens.extend(bs.iter().copied().map(Token::Byte));
        self
    }

    pub fn wildcard(mut self) -> Self {
        self.tokens.push(Token::Wildcard);
        self
    }

    pub fn wildcards(mut self, count: usize) -> Self {
        self.tokens.extend(std::iter::repeat(Token::Wildcard).take(count));
        self
    }

    pub fn build(self) -> Result<Pattern, PatternError> {
        Pattern::from_tokens(self.tokens)
    }
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instantiate_simple() {
        let pattern = Pattern::parse("11 22 33 ?? 55").unwrap();
        let simple = pattern.simple();

        assert_eq!(simple.mask(), &[0x01, 0x01, 0x01, 0x00, 0x01]);
        assert_eq!(simple.bytes(), &[0x11, 0x22, 0x33, 0x55]);
        assert_eq!(pattern.len(), 5);
    }

    #[test]
    fn test_simple_data_rewalks_to_tokens() {
        let source = "?? 25 ?? ?? 86 E5 E3 ?? AF A3 ??";
        let pattern = Pattern::parse(source).unwrap();
        let simple = pattern.simple();

        let mut byte_iter = simple.bytes().iter();
        let rebuilt: Vec<String> = simple
            .mask()
            .iter()
            .map(|&m| match m {
                0 => "??".to_string(),
                _ => format!("{:02X}", byte_iter.next().unwrap()),
            })
            .collect();

        assert_eq!(rebuilt.join(" "), source);
        assert!(byte_iter.next().is_none());
        assert_eq!(simple.bytes().len(), pattern.significant_byte_count());
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        assert_eq!(Pattern::parse(""), Err(PatternError::Empty));
        assert_eq!(PatternBuilder::new().build(), Err(PatternError::Empty));
    }

    #[test]
    fn test_irregular_whitespace_is_rejected() {
        let err = Pattern::parse("11  22").unwrap_err();
        assert_eq!(err, PatternError::InvalidToken { token: String::new(), index: 1 });

        let err = Pattern::parse("11 22 ").unwrap_err();
        assert_eq!(err, PatternError::InvalidToken { token: String::new(), index: 2 });

        let err = Pattern::parse(" 11").unwrap_err();
        assert_eq!(err, PatternError::InvalidToken { token: String::new(), index: 0 });

        assert!(Pattern::parse("11\t22").is_err());
    }

    #[test]
    fn test_bad_hex_reports_index() {
        let err = Pattern::parse("11 2G 33").unwrap_err();
        assert_eq!(err, PatternError::InvalidToken { token: "2G".to_string(), index: 1 });
    }

    #[test]
    fn test_all_wildcards_is_legal() {
        let pattern = Pattern::parse("?? ??").unwrap();
        assert_eq!(pattern.significant_byte_count(), 0);
        assert_eq!(pattern.leading_wildcard_count(), 2);
        assert!(pattern.simple().bytes().is_empty());
    }

    #[test]
    fn test_hex_string_and_key() {
        let pattern = Pattern::parse("4a ?? ff").unwrap();
        assert_eq!(pattern.to_hex_string(), "4A ?? FF");
        assert_eq!(pattern.normalized_key(), "4A ?? FF");
        assert_eq!(pattern.source(), "4a ?? ff");
        assert_eq!(pattern, Pattern::parse("4A ?? FF").unwrap());
    }

    #[test]
    fn test_builder_and_mask_constructors() {
        let built = PatternBuilder::new()
            .bytes(&[0x48, 0x8B])
            .wildcards(2)
            .byte(0x89)
            .build()
            .unwrap();
        let bytes = [0x48, 0x8B, 0x00, 0x00, 0x89];
        let masked = Pattern::from_bytes_and_mask(&bytes, &[1, 1, 0, 0, 1]).unwrap();

        assert_eq!(built, masked);
        assert_eq!(built.source(), "48 8B ?? ?? 89");
        assert!(built.matches(&[0x48, 0x8B, 0x10, 0x20, 0x89, 0x00]));
        assert!(!built.matches(&[0x48, 0x8B, 0x10, 0x20]));
        assert!(Pattern::from_bytes_and_mask(&[1, 2], &[1]).is_err());
    }
}
