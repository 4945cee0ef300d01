//! Optional text normalization applied before scoring.
//!
//! The default is [`Normalization::None`]: comparisons are case-sensitive and
//! whitespace-sensitive. Other modes apply the same transform to both sides,
//! and candidates keep their original text in the results.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Transform applied to source and target text before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// Compare text literally.
    #[default]
    None,
    /// Trim leading/trailing whitespace and collapse inner runs to one space.
    Whitespace,
    /// Lowercase (Unicode-aware).
    CaseFold,
    /// Whitespace collapsing followed by lowercasing.
    Full,
}

impl Normalization {
    /// Stable identifier used in cache keys and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Whitespace => "whitespace",
            Self::CaseFold => "case-fold",
            Self::Full => "full",
        }
    }

    /// Apply the transform, borrowing when the text is left untouched.
    #[must_use]
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Self::None => Cow::Borrowed(text),
            Self::Whitespace => collapse_whitespace(text),
            Self::CaseFold => Cow::Owned(text.to_lowercase()),
            Self::Full => Cow::Owned(collapse_whitespace(text).to_lowercase()),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Normalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" | "literal" => Ok(Self::None),
            "whitespace" | "trim" => Ok(Self::Whitespace),
            "case-fold" | "case" | "lowercase" => Ok(Self::CaseFold),
            "full" => Ok(Self::Full),
            other => Err(format!("unknown normalization '{other}'")),
        }
    }
}

fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_borrows() {
        let out = Normalization::None.apply("  Mixed Case ");
        assert!(matches!(out, Cow::Borrowed("  Mixed Case ")));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(Normalization::Whitespace.apply("  New   York\t"), "New York");
        assert!(matches!(
            Normalization::Whitespace.apply("already clean"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_case_fold_and_full() {
        assert_eq!(Normalization::CaseFold.apply(" ÄBC "), " äbc ");
        assert_eq!(Normalization::Full.apply("  ACME   Corp "), "acme corp");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("trim".parse::<Normalization>(), Ok(Normalization::Whitespace));
        assert_eq!("case".parse::<Normalization>(), Ok(Normalization::CaseFold));
        assert!("soundex".parse::<Normalization>().is_err());
    }
}
