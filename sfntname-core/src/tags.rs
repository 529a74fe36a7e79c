//! Four-byte table tags, in both directions
//!
//! Every table in an sfnt file is labelled with a four-byte code such as
//! `name`, `glyf` or `OS/2`. Shorter codes are padded with spaces, so the
//! control-value table is really `cvt ` with a trailing blank. People type
//! these tags on the command line without the padding, and the directory
//! listing has to print them back in a form a terminal can show, so both
//! directions live here.

use anyhow::{anyhow, Result};

pub use read_fonts::types::Tag;

/// Tag of the naming table, `0x6E616D65`.
pub const NAME_TAG: Tag = Tag::new(b"name");

/// Turn a user-typed tag into the four bytes a font stores.
///
/// Accepts 1-4 printable ASCII characters and pads the rest with spaces,
/// so `cvt` and `"cvt "` name the same table. Anything longer, empty, or
/// containing control characters is rejected rather than silently matching
/// nothing.
pub fn tag4(raw: &str) -> Result<Tag> {
    if raw.is_empty() || raw.len() > 4 {
        return Err(anyhow!("table tag must be 1-4 characters: {raw:?}"));
    }

    let mut buf = [b' '; 4];
    for (slot, byte) in buf.iter_mut().zip(raw.bytes()) {
        if !byte.is_ascii_graphic() && byte != b' ' {
            return Err(anyhow!("table tag has a non-printable byte: {raw:?}"));
        }
        *slot = byte;
    }

    Ok(Tag::new(&buf))
}

/// Render a tag for display; non-UTF-8 bytes come out as U+FFFD.
pub fn tag_to_string(tag: Tag) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).into_owned()
}
