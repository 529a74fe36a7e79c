//! Naming table decoding and record lookup.
//!
//! Layout (all values big-endian, offsets relative to the table start):
//!
//! ```text
//! 0   format            u16 (ignored)
//! 2   count             u16
//! 4   stringOffset      u16  start of the string pool
//! 6   count x 12-byte records:
//!       platformID, platformSpecificID, languageID, nameID, length, offset
//! ```

use std::io::{Read, Seek};

use byteorder::{BigEndian, ByteOrder};
use log::debug;
use read_fonts::types::NameId;

use crate::error::ParseError;
use crate::reader::{get_u16_be, FontReader};

const HEADER_LEN: usize = 6;
const RECORD_LEN: usize = 12;

/// Platform identifier of a name record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unicode,
    Macintosh,
    Iso,
    Windows,
    Other(u16),
}

impl Platform {
    pub const MACINTOSH_ID: u16 = 1;

    pub fn to_u16(self) -> u16 {
        match self {
            Platform::Unicode => 0,
            Platform::Macintosh => 1,
            Platform::Iso => 2,
            Platform::Windows => 3,
            Platform::Other(raw) => raw,
        }
    }
}

impl From<u16> for Platform {
    fn from(raw: u16) -> Self {
        match raw {
            0 => Platform::Unicode,
            1 => Platform::Macintosh,
            2 => Platform::Iso,
            3 => Platform::Windows,
            other => Platform::Other(other),
        }
    }
}

/// Which record to look for: a name id and, optionally, a required platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameQuery {
    pub name_id: NameId,
    pub platform: Option<u16>,
}

impl NameQuery {
    /// Family name (id 1) on any platform.
    pub const FAMILY: NameQuery = NameQuery {
        name_id: NameId::FAMILY_NAME,
        platform: None,
    };

    /// Subfamily/style name (id 2), Macintosh records only.
    pub const SUBFAMILY: NameQuery = NameQuery {
        name_id: NameId::SUBFAMILY_NAME,
        platform: Some(Platform::MACINTOSH_ID),
    };

    pub fn new(name_id: NameId) -> Self {
        Self {
            name_id,
            platform: None,
        }
    }

    pub fn on_platform(mut self, platform: u16) -> Self {
        self.platform = Some(platform);
        self
    }
}

/// Decode string bytes according to the record's platform.
///
/// Macintosh bytes are taken as UTF-8 and Windows bytes as UTF-16BE, both
/// lossily. Other platforms (including ISO) are not decoded.
pub fn decode_name_string(platform: Platform, bytes: &[u8]) -> Option<String> {
    match platform {
        Platform::Macintosh => Some(String::from_utf8_lossy(bytes).into_owned()),
        Platform::Windows => Some(decode_utf16_be(bytes)),
        Platform::Unicode | Platform::Iso | Platform::Other(_) => None,
    }
}

fn decode_utf16_be(bytes: &[u8]) -> String {
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    let units = chunks.map(BigEndian::read_u16);

    let mut out: String = char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if dangling {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    out
}

/// Borrowed view over a `name` table buffer.
#[derive(Debug, Clone, Copy)]
pub struct NameTableView<'a> {
    data: &'a [u8],
    count: u16,
    storage_offset: u16,
}

impl<'a> NameTableView<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, ParseError> {
        if data.len() < HEADER_LEN {
            return Err(ParseError::Malformed(format!(
                "name table is {} bytes, header needs {HEADER_LEN}",
                data.len()
            )));
        }

        Ok(Self {
            data,
            count: get_u16_be(data, 2)?,
            storage_offset: get_u16_be(data, 4)?,
        })
    }

    /// Return the first record matching `query` that decodes, in record order.
    ///
    /// A record whose string falls outside the table, or whose platform has
    /// no supported encoding, is skipped. A record header lying outside the
    /// table ends the scan with [`ParseError::Malformed`].
    pub fn find(&self, query: NameQuery) -> Result<Option<String>, ParseError> {
        let data = self.data;

        for index in 0..usize::from(self.count) {
            let base = index * RECORD_LEN + HEADER_LEN;
            let platform_id = get_u16_be(data, base).map_err(|_| {
                ParseError::out_of_bounds(&format!("name record {index}"), base, data.len())
            })?;
            let name_id = get_u16_be(data, base + 6)?;

            if name_id != query.name_id.to_u16() {
                continue;
            }
            if query.platform.is_some_and(|wanted| wanted != platform_id) {
                continue;
            }

            let length = usize::from(get_u16_be(data, base + 8)?);
            let offset = usize::from(get_u16_be(data, base + 10)?);
            let start = usize::from(self.storage_offset) + offset;
            let end = start + length;

            // The last string byte must sit strictly inside the table.
            if end >= data.len() {
                debug!(
                    "skipping name record {index}: string {start}..{end} outside {}-byte table",
                    data.len()
                );
                continue;
            }

            let platform = Platform::from(platform_id);
            match decode_name_string(platform, &data[start..end]) {
                Some(text) => return Ok(Some(text)),
                None => debug!("skipping name record {index}: no decoder for {platform:?}"),
            }
        }

        Ok(None)
    }
}

/// Copy the `name` table bytes out of the stream.
///
/// Declared lengths above `max_len`, or running past the end of the stream,
/// are rejected before anything is allocated.
pub fn read_table_bytes<R: Read + Seek>(
    reader: &mut FontReader<R>,
    table_offset: u32,
    table_length: u32,
    max_len: u32,
) -> Result<Vec<u8>, ParseError> {
    if table_length > max_len {
        return Err(ParseError::TableTooLarge {
            length: table_length,
            limit: max_len,
        });
    }

    let stream_len = reader.stream_len()?;
    let offset = u64::from(table_offset);
    if offset + u64::from(table_length) > stream_len {
        return Err(ParseError::Truncated {
            needed: u64::from(table_length),
            available: stream_len.saturating_sub(offset),
        });
    }

    reader.seek_absolute(offset)?;
    let mut table = vec![0u8; table_length as usize];
    reader.read_exact(&mut table)?;
    Ok(table)
}

/// Read the table at `table_offset` and look up `query` in it.
pub fn extract_name<R: Read + Seek>(
    reader: &mut FontReader<R>,
    table_offset: u32,
    table_length: u32,
    query: NameQuery,
    max_table_len: u32,
) -> Result<Option<String>, ParseError> {
    let table = read_table_bytes(reader, table_offset, table_length, max_table_len)?;
    NameTableView::new(&table)?.find(query)
}
