//! Streaming output helpers
//!
//! A scan ends as a list of [`FontNamesMatch`] values, one per font that
//! produced at least one name. How that list leaves the process depends on
//! who is reading it. Scripts that want to load everything at once take the
//! pretty JSON array; pipelines that start working before the scan finishes
//! printing take NDJSON, one object per line. Shell users get the
//! tab-separated form, which `cut` and `sort` understand without a parser.
//!
//! All three write into any `Write`, so tests capture the output in a `Vec`
//! and the CLI hands in a locked stdout.

use std::io::Write;

use anyhow::Result;

use crate::scan::FontNamesMatch;

/// Write results as prettified JSON array.
pub fn write_json_pretty(results: &[FontNamesMatch], mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    w.write_all(json.as_bytes())?;
    Ok(())
}

/// Write results as newline-delimited JSON (NDJSON).
pub fn write_ndjson(results: &[FontNamesMatch], mut w: impl Write) -> Result<()> {
    for item in results {
        let line = serde_json::to_string(item)?;
        w.write_all(line.as_bytes())?;
        w.write_all(b"\n")?;
    }
    Ok(())
}

/// Write `path<TAB>family<TAB>subfamily` lines.
///
/// A missing name prints as `-`, so every line has three columns.
pub fn write_plain(results: &[FontNamesMatch], mut w: impl Write) -> Result<()> {
    for item in results {
        writeln!(
            w,
            "{}\t{}\t{}",
            item.path.display(),
            item.names.family.as_deref().unwrap_or("-"),
            item.names.subfamily.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}
