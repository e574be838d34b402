//! Base label validation

use crate::error::{Result, SquatScoutError};
use regex::Regex;

/// Accepted shape of a base label
const BASE_NAME_PATTERN: &str = r"^[A-Za-z0-9-]+$";

/// A validated base label (no suffix), stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseName(String);

impl BaseName {
    /// Validate raw console input.
    ///
    /// A trailing line terminator is tolerated; any other whitespace, dots or
    /// punctuation reject the input.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim_end_matches(&['\r', '\n'][..]);

        if input.is_empty() {
            return Err(SquatScoutError::validation("Domain name cannot be empty"));
        }

        let pattern = Regex::new(BASE_NAME_PATTERN)
            .map_err(|e| SquatScoutError::internal(e.to_string()))?;

        if !pattern.is_match(input) {
            return Err(SquatScoutError::validation(
                "Invalid format. Please enter the domain without the TLD.",
            ));
        }

        Ok(Self(input.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for BaseName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BaseName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for BaseName {
    type Err = SquatScoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_validation() {
        assert!(BaseName::parse("facebook").is_ok());
        assert!(BaseName::parse("my-site").is_ok());
        assert!(BaseName::parse("123").is_ok());
        assert!(BaseName::parse("-").is_ok());

        assert!(BaseName::parse("").is_err());
        assert!(BaseName::parse("facebook.com").is_err());
        assert!(BaseName::parse("face book").is_err());
        assert!(BaseName::parse(" facebook").is_err());
        assert!(BaseName::parse("fa_cebook").is_err());
        assert!(BaseName::parse("bücher").is_err());
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let base = BaseName::parse("google\n").unwrap();
        assert_eq!(base.as_str(), "google");
        let base = BaseName::parse("google\r\n").unwrap();
        assert_eq!(base.as_str(), "google");
    }

    #[test]
    fn test_lowercases_input() {
        let base: BaseName = "PayPal".parse().unwrap();
        assert_eq!(base.to_string(), "paypal");
        assert_eq!(base.len(), 6);
    }

    #[test]
    fn test_rejection_is_validation_error() {
        let err = BaseName::parse("a.b").unwrap_err();
        assert!(matches!(err, SquatScoutError::Validation { .. }));
        assert!(err.to_string().contains("without the TLD"));
    }
}
