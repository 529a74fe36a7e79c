//! Failure taxonomy for sfnt parsing.

use std::io;

use thiserror::Error;

/// Why a font could not be parsed.
///
/// An unrecognised sfnt version is not represented here: it is the routine
/// "not a font" outcome and surfaces as `Ok(None)` or [`Probe::NotAFont`].
///
/// [`Probe::NotAFont`]: crate::extract::Probe::NotAFont
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    Truncated { needed: u64, available: u64 },

    #[error("cannot seek to offset {offset}")]
    SeekFailed { offset: u64 },

    #[error("malformed font: {0}")]
    Malformed(String),

    #[error("name table length {length} exceeds limit of {limit} bytes")]
    TableTooLarge { length: u32, limit: u32 },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ParseError {
    /// True when the input looked like a font but its contents are damaged.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            ParseError::Truncated { .. }
                | ParseError::Malformed(_)
                | ParseError::TableTooLarge { .. }
        )
    }

    pub(crate) fn out_of_bounds(what: &str, offset: usize, len: usize) -> Self {
        ParseError::Malformed(format!("{what} at offset {offset} is outside the {len}-byte table"))
    }
}
