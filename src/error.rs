//! Error types.
//!
//! Layout and animation math never fail; the only error surface is strict
//! parsing of configuration names, which callers may opt into via `FromStr`.

use alloc::string::String;
use core::fmt;

/// A configuration name or value that could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// What was being parsed (e.g. `"start position"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: String::from(value),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized {}: {:?}", self.kind, self.value)
    }
}

impl core::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_quotes_value() {
        let e = ParseError::new("layout algorithm", "zigzag");
        assert_eq!(e.to_string(), "unrecognized layout algorithm: \"zigzag\"");
    }
}
