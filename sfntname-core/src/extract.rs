//! Family and subfamily name extraction entry points.
//!
//! Every call owns its stream for the duration of one parse and keeps no
//! state afterwards. The `try_*` methods expose the typed outcome; the plain
//! methods are best-effort probes that log failures and return `None`.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::directory::{find_table, locate_name_table, TableLookup};
use crate::error::ParseError;
use crate::name::{extract_name, read_table_bytes, NameQuery, NameTableView};
use crate::reader::FontReader;
use crate::tags::NAME_TAG;

/// Default ceiling on the `name` table allocation.
///
/// 16-bit record counts and string offsets cannot address more than
/// ~786 KiB of a naming table, so anything above 1 MiB is not a real font.
pub const DEFAULT_MAX_TABLE_LEN: u32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_table_len: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_table_len: DEFAULT_MAX_TABLE_LEN,
        }
    }
}

impl ExtractOptions {
    pub fn with_max_table_len(mut self, max_table_len: u32) -> Self {
        self.max_table_len = max_table_len;
        self
    }
}

/// Family (name id 1) and Macintosh subfamily (name id 2) of one font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontNames {
    pub family: Option<String>,
    pub subfamily: Option<String>,
}

impl FontNames {
    pub fn is_empty(&self) -> bool {
        self.family.is_none() && self.subfamily.is_none()
    }
}

/// Typed outcome of inspecting a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Routine: the stream does not start with a recognised sfnt version.
    NotAFont,
    NoNameTable,
    Names(FontNames),
}

/// Extracts identity strings from sfnt streams.
#[derive(Debug, Clone, Default)]
pub struct FontNameExtractor {
    options: ExtractOptions,
}

impl FontNameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Look up the first record matching `query`.
    pub fn try_lookup<R: Read + Seek>(
        &self,
        stream: R,
        query: NameQuery,
    ) -> Result<Option<String>, ParseError> {
        let mut reader = FontReader::new(stream)?;
        let Some(table) = locate_name_table(&mut reader)? else {
            return Ok(None);
        };

        extract_name(
            &mut reader,
            table.offset,
            table.length,
            query,
            self.options.max_table_len,
        )
    }

    pub fn try_family_name<R: Read + Seek>(
        &self,
        stream: R,
    ) -> Result<Option<String>, ParseError> {
        self.try_lookup(stream, NameQuery::FAMILY)
    }

    pub fn try_subfamily_name<R: Read + Seek>(
        &self,
        stream: R,
    ) -> Result<Option<String>, ParseError> {
        self.try_lookup(stream, NameQuery::SUBFAMILY)
    }

    /// Read the directory and `name` table once and resolve both names.
    ///
    /// Each lookup is settled independently: a malformed record area hides
    /// only the lookup that ran into it.
    pub fn probe<R: Read + Seek>(&self, stream: R) -> Result<Probe, ParseError> {
        let mut reader = FontReader::new(stream)?;
        let table = match find_table(&mut reader, NAME_TAG)? {
            TableLookup::NotAFont => return Ok(Probe::NotAFont),
            TableLookup::Missing => return Ok(Probe::NoNameTable),
            TableLookup::Found(table) => table,
        };

        let data = read_table_bytes(
            &mut reader,
            table.offset,
            table.length,
            self.options.max_table_len,
        )?;
        let view = NameTableView::new(&data)?;

        Ok(Probe::Names(FontNames {
            family: settle("family lookup", view.find(NameQuery::FAMILY)),
            subfamily: settle("subfamily lookup", view.find(NameQuery::SUBFAMILY)),
        }))
    }

    /// Family name, or `None` when absent or unreadable.
    pub fn family_name<R: Read + Seek>(&self, stream: R) -> Option<String> {
        settle("stream", self.try_family_name(stream))
    }

    /// Macintosh subfamily name, or `None` when absent or unreadable.
    pub fn subfamily_name<R: Read + Seek>(&self, stream: R) -> Option<String> {
        settle("stream", self.try_subfamily_name(stream))
    }

    pub fn names<R: Read + Seek>(&self, stream: R) -> FontNames {
        names_or_default("stream", self.probe(stream))
    }

    pub fn family_name_from_path(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        let stream = open_or_log(path)?;
        settle(path.display(), self.try_family_name(stream))
    }

    pub fn subfamily_name_from_path(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = path.as_ref();
        let stream = open_or_log(path)?;
        settle(path.display(), self.try_subfamily_name(stream))
    }

    pub fn names_from_path(&self, path: impl AsRef<Path>) -> FontNames {
        let path = path.as_ref();
        match open_or_log(path) {
            Some(stream) => names_or_default(path.display(), self.probe(stream)),
            None => FontNames::default(),
        }
    }
}

/// Open a font file for reading. The handle closes when dropped.
pub fn open_stream(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening font {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn open_or_log(path: &Path) -> Option<BufReader<File>> {
    match open_stream(path) {
        Ok(stream) => Some(stream),
        Err(err) => {
            debug!("{err:#}");
            None
        }
    }
}

fn settle<T>(origin: impl Display, result: Result<Option<T>, ParseError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            log_failure(origin, &err);
            None
        }
    }
}

fn names_or_default(origin: impl Display, result: Result<Probe, ParseError>) -> FontNames {
    match result {
        Ok(Probe::Names(names)) => names,
        Ok(Probe::NotAFont) => {
            debug!("{origin}: not an sfnt font");
            FontNames::default()
        }
        Ok(Probe::NoNameTable) => {
            debug!("{origin}: no name table");
            FontNames::default()
        }
        Err(err) => {
            log_failure(origin, &err);
            FontNames::default()
        }
    }
}

fn log_failure(origin: impl Display, err: &ParseError) {
    if err.is_corrupt() {
        warn!("{origin}: corrupt font: {err}");
    } else {
        debug!("{origin}: unreadable font: {err}");
    }
}
