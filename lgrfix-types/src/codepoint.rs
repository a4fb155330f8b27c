use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest valid Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A repertoire key: a single code point or a code point sequence.
///
/// Serialized as space-separated hex (`"0041"`, `"0061 0301"`), which is
/// also what [`FromStr`] accepts (an optional `U+` prefix per element is allowed).
/// [`fmt::Display`] renders the `U+` form used in logs and reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodePoint(Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodePointParseError {
    #[error("empty code point")]
    Empty,

    #[error("invalid hex code point '{token}'")]
    InvalidHex { token: String },

    #[error("code point {value:#X} is above U+10FFFF")]
    OutOfRange { value: u32 },
}

impl CodePoint {
    /// Build a code point sequence, validating every element.
    pub fn new(values: Vec<u32>) -> Result<Self, CodePointParseError> {
        if values.is_empty() {
            return Err(CodePointParseError::Empty);
        }
        if let Some(&value) = values.iter().find(|v| **v > MAX_CODE_POINT) {
            return Err(CodePointParseError::OutOfRange { value });
        }
        Ok(Self(values))
    }

    /// A single code point. Panics on values above U+10FFFF, so only use it
    /// with literals; parse untrusted input with [`CodePoint::new`] or [`FromStr`].
    pub fn single(value: u32) -> Self {
        assert!(value <= MAX_CODE_POINT, "code point {value:#X} out of range");
        Self(vec![value])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn is_sequence(&self) -> bool {
        self.0.len() > 1
    }

    /// Hex form without the `U+` prefix, as written in repertoire documents.
    pub fn to_hex(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("{:04X}", v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "U+{:04X}", v)?;
        }
        Ok(())
    }
}

impl FromStr for CodePoint {
    type Err = CodePointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::new();
        for token in s.split_whitespace() {
            let digits = token
                .strip_prefix("U+")
                .or_else(|| token.strip_prefix("u+"))
                .unwrap_or(token);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(CodePointParseError::InvalidHex {
                    token: token.to_string(),
                });
            }
            let value =
                u32::from_str_radix(digits, 16).map_err(|_| CodePointParseError::InvalidHex {
                    token: token.to_string(),
                })?;
            values.push(value);
        }
        Self::new(values)
    }
}

impl TryFrom<String> for CodePoint {
    type Error = CodePointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CodePoint> for String {
    fn from(cp: CodePoint) -> Self {
        cp.to_hex()
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        Self(vec![c as u32])
    }
}
