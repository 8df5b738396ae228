//! Decoder for the tagged cell records of a root slot line and grid rows.
//!
//! A record is a one-character tag followed by a run of integers. Several
//! records may share a physical line, so decoding starts at a byte offset and
//! returns the offset just past what it consumed.

use std::str::FromStr;

use roomlayout_types::{
    Cell, CellTag, Corner, Direction, ParseOptions, Slot, SlotFields, StringTable,
};
use strum::IntoEnumIterator;

use crate::error::ParseError;

/// Longest record any revision defines.
const MAX_FIELDS: usize = SlotFields::ANCHORED_LEN;

// Slot record layout.
const EDGE_NAMES: usize = 2;
const EDGE_EXITS: usize = 6;
const CORNER_GROUNDS: usize = 14;
const CORNER_HEIGHTS: usize = 18;
const SLOT_NAME: usize = 22;
const ANCHOR: usize = 23;

/// Cursor over the text of one line.
struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    fn skip_space(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek_word(&mut self) -> Option<&'a str> {
        self.skip_space();
        let rest = &self.text[self.pos..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    }

    fn read_word(&mut self) -> Option<&'a str> {
        let word = self.peek_word()?;
        self.pos += word.len();
        Some(word)
    }

    /// Consume the next word only if it is an integer.
    fn read_int(&mut self) -> Option<i64> {
        let word = self.peek_word()?;
        let value = record_int(word)?;
        self.pos += word.len();
        Some(value)
    }
}

/// `-?[0-9]+` as an `i64`.
fn record_int(word: &str) -> Option<i64> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}

/// Integer fields of one record, buffered without allocating. Counting
/// continues past the buffer so oversized records report their real length.
struct Fields {
    values: [i64; MAX_FIELDS],
    count: usize,
}

impl Fields {
    fn read(reader: &mut Reader<'_>) -> Self {
        let mut fields = Fields {
            values: [0; MAX_FIELDS],
            count: 0,
        };
        while let Some(value) = reader.read_int() {
            if let Some(slot) = fields.values.get_mut(fields.count) {
                *slot = value;
            }
            fields.count += 1;
        }
        fields
    }

    fn as_slice(&self) -> &[i64] {
        &self.values[..self.count.min(MAX_FIELDS)]
    }

    fn require_count(
        &self,
        tag: CellTag,
        count: usize,
        expected: &'static str,
        line: usize,
    ) -> Result<(), ParseError> {
        if self.count == count {
            Ok(())
        } else {
            Err(ParseError::FieldCount {
                line,
                tag: tag.as_str(),
                found: self.count,
                expected,
            })
        }
    }
}

fn resolve(strings: &StringTable, index: i64, line: usize) -> Result<Option<String>, ParseError> {
    strings
        .resolve_owned(index)
        .map_err(|e| ParseError::string_table(line, e.to_string()))
}

fn dimension(value: i64, field: &'static str, line: usize) -> Result<u32, ParseError> {
    u32::try_from(value).map_err(|_| ParseError::FieldValue { line, field, value })
}

fn decode_slot(
    fields: &Fields,
    line: usize,
    strings: &StringTable,
    layout: SlotFields,
) -> Result<Slot, ParseError> {
    if !layout.accepts(fields.count) {
        return Err(ParseError::FieldCount {
            line,
            tag: CellTag::Slot.as_str(),
            found: fields.count,
            expected: layout.describe(),
        });
    }
    let v = fields.as_slice();
    let anchor = match v.get(ANCHOR) {
        None => Corner::default(),
        Some(&value) => u8::try_from(value)
            .ok()
            .and_then(Corner::from_repr)
            .ok_or(ParseError::FieldValue {
                line,
                field: "anchor",
                value,
            })?,
    };
    let mut slot = Slot {
        width: dimension(v[0], "width", line)?,
        height: dimension(v[1], "height", line)?,
        name: resolve(strings, v[SLOT_NAME], line)?,
        anchor,
        ..Default::default()
    };
    for (i, dir) in Direction::iter().enumerate() {
        let edge = slot.edges.get_mut(dir);
        edge.edge = resolve(strings, v[EDGE_NAMES + i], line)?;
        edge.exit = v[EDGE_EXITS + 2 * i];
        edge.virtual_exit = v[EDGE_EXITS + 2 * i + 1];
    }
    for (i, corner) in Corner::iter().enumerate() {
        let info = slot.corners.get_mut(corner);
        info.ground = resolve(strings, v[CORNER_GROUNDS + i], line)?;
        info.height = v[CORNER_HEIGHTS + i];
    }
    Ok(slot)
}

/// Decode the cell record starting at byte `offset` of `text`.
///
/// Returns the cell and the offset just past its last field; the caller feeds
/// that back in to decode the next cell on the same line.
pub fn decode_cell(
    text: &str,
    offset: usize,
    line: usize,
    strings: &StringTable,
    options: &ParseOptions,
) -> Result<(Cell, usize), ParseError> {
    let mut reader = Reader::new(text, offset);
    let word = reader.read_word().ok_or_else(|| ParseError::UnexpectedCellTag {
        line,
        found: "end of line".into(),
    })?;
    let tag = CellTag::from_str(word).map_err(|_| ParseError::UnexpectedCellTag {
        line,
        found: format!("`{word}`"),
    })?;
    let fields = Fields::read(&mut reader);

    let cell = match tag {
        CellTag::Slot => Cell::Slot(decode_slot(&fields, line, strings, options.slot_fields)?),
        CellTag::Fill => {
            fields.require_count(tag, 1, "1", line)?;
            Cell::Fill {
                fill: resolve(strings, fields.values[0], line)?,
            }
        }
        CellTag::Static => {
            fields.require_count(tag, 0, "0", line)?;
            Cell::Static
        }
        CellTag::Open => {
            fields.require_count(tag, 0, "0", line)?;
            Cell::Open
        }
        CellTag::Null => {
            fields.require_count(tag, 0, "0", line)?;
            Cell::Null
        }
    };
    Ok((cell, reader.pos))
}

/// Whether a line has the shape of a grid row: a cell tag, its integers, and
/// optionally a word starting with a tag character followed by anything.
pub fn looks_like_cell_row(text: &str) -> bool {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return false;
    };
    if CellTag::from_str(first).is_err() {
        return false;
    }
    for word in words {
        if record_int(word).is_none() {
            return CellTag::iter().any(|tag| word.starts_with(tag.as_str()));
        }
    }
    true
}
