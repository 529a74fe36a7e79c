//! sfntname-core: what is this font called?
//!
//! Reads just enough of a TrueType/OpenType file to answer that question:
//! the table directory, then the `name` table, then the first record that
//! carries the family (name id 1) or style (name id 2) string.
//!
//! ## Three steps per font
//!
//! **Directory**: check the sfnt version tag (`0x00010000`, `true` or `OTTO`)
//! and walk the table records until `name` turns up.
//!
//! **Name table**: copy the table into memory, bounded by the stream length
//! and a configurable ceiling, then scan its 12-byte records in order.
//!
//! **Decode**: Macintosh strings as UTF-8, Windows strings as UTF-16BE. Other
//! platforms are skipped and the scan moves on.
//!
//! ## A quick look
//!
//! ```rust,no_run
//! use std::fs::File;
//! use sfntname_core::extract::FontNameExtractor;
//!
//! let extractor = FontNameExtractor::new();
//! let mut file = File::open("/Library/Fonts/Arial.ttf")?;
//!
//! let family = extractor.family_name(&mut file);
//! println!("family: {}", family.as_deref().unwrap_or("<unknown>"));
//! #
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Corrupt and foreign files never raise: the best-effort calls log through
//! the `log` facade and return `None`. Use the `try_*` methods or
//! [`extract::FontNameExtractor::probe`] to tell "not a font" apart from
//! "damaged font".

pub mod directory;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod name;
pub mod output;
pub mod query;
pub mod reader;
pub mod scan;
pub mod tags;
