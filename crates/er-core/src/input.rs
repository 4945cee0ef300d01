//! Coercion of raw column values into matcher input.

use std::fmt;

use crate::error::{MatchError, Result};

/// Which sequence a value belongs to, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Convert raw byte fields into text.
///
/// Fails with [`MatchError::InvalidArgument`] naming the side and position of
/// the first field that is not valid UTF-8.
pub fn coerce_fields<I, B>(side: Side, fields: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| {
            std::str::from_utf8(field.as_ref())
                .map(str::to_owned)
                .map_err(|err| {
                    MatchError::invalid(format!(
                        "{side} value at position {index} is not text: {err}"
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields() {
        let fields: Vec<&[u8]> = vec![b"alpha".as_slice(), b"".as_slice(), "Zürich".as_bytes()];
        let text = coerce_fields(Side::Source, fields).unwrap();
        assert_eq!(text, vec!["alpha", "", "Zürich"]);
    }

    #[test]
    fn test_invalid_field_reports_position() {
        const NOT_UTF8: &[u8] = &[0xff, 0xfe, 0x41];
        let fields: Vec<&[u8]> = vec![b"ok".as_slice(), NOT_UTF8];
        let err = coerce_fields(Side::Target, fields).unwrap_err();
        let MatchError::InvalidArgument { message } = err else {
            panic!("expected InvalidArgument");
        };
        assert!(message.starts_with("target value at position 1 is not text"));
    }
}
