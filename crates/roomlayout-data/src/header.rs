//! The fixed preamble of a layout file, up to and including the extra
//! number blocks whose count the first block determines.

use roomlayout_types::{Cell, ParseOptions, Slot, StringTable};
use winnow::ModalResult;
use winnow::ascii::{dec_uint, space0, space1};
use winnow::combinator::delimited;
use winnow::prelude::*;

use crate::cell::decode_cell;
use crate::error::{ParseError, Stage};
use crate::source::{LineQueue, SourceLine};
use crate::tokenizer::{parse_int_vector, parse_quoted_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub strings: StringTable,
    pub dims: Vec<i64>,
    /// Two header blocks, then `sum(numbers[0]) * 2` extra blocks.
    pub numbers: Vec<Vec<i64>>,
    pub tag: String,
    pub root_slot: Slot,
}

fn version_line(input: &mut &str) -> ModalResult<u32> {
    delimited((space0, "version", space1), dec_uint, space0).parse_next(input)
}

fn count_line(input: &mut &str) -> ModalResult<u32> {
    delimited(space0, dec_uint, space0).parse_next(input)
}

fn int_vector(queue: &mut LineQueue<'_>, stage: Stage) -> Result<Vec<i64>, ParseError> {
    let line = queue.pop_for(stage)?;
    parse_int_vector(line.text, line.number)
}

fn root_slot(
    line: SourceLine<'_>,
    strings: &StringTable,
    options: &ParseOptions,
) -> Result<Slot, ParseError> {
    let (cell, end) = decode_cell(line.text, 0, line.number, strings, options)?;
    let rest = line.text[end..].trim();
    if !rest.is_empty() {
        return Err(ParseError::TrailingData {
            line: line.number,
            rest: rest.to_owned(),
        });
    }
    match cell {
        Cell::Slot(slot) => Ok(slot),
        other => Err(ParseError::UnexpectedCellTag {
            line: line.number,
            found: format!("`{}` where the root slot belongs", other.tag().as_str()),
        }),
    }
}

/// Read the preamble from the front of `queue`.
pub fn read_header(
    queue: &mut LineQueue<'_>,
    options: &ParseOptions,
) -> Result<Header, ParseError> {
    let line = queue.pop().ok_or(ParseError::MalformedHeader {
        line: 1,
        msg: "missing version line".into(),
    })?;
    let version = version_line.parse(line.text).map_err(|_| ParseError::MalformedHeader {
        line: line.number,
        msg: format!("expected `version <n>`, got `{}`", line.text),
    })?;

    let line = queue.pop_for(Stage::StringCount)?;
    let count = count_line.parse(line.text).map_err(|_| ParseError::MalformedHeader {
        line: line.number,
        msg: format!("expected string count, got `{}`", line.text),
    })? as usize;
    queue.require(Stage::StringTable, count)?;
    let strings = queue
        .take_up_to(count)
        .iter()
        .map(|l| parse_quoted_line(l.text, l.number))
        .collect::<Result<StringTable, _>>()?;
    log::trace!("version {version}, {} string(s)", strings.len());

    let dims = int_vector(queue, Stage::Dims)?;
    let mut numbers = vec![int_vector(queue, Stage::Numbers)?];
    let line = queue.pop_for(Stage::Tag)?;
    let tag = parse_quoted_line(line.text, line.number)?;
    numbers.push(int_vector(queue, Stage::Numbers)?);

    let line = queue.pop_for(Stage::RootSlot)?;
    let root_slot = root_slot(line, &strings, options)?;

    let extra = numbers[0]
        .iter()
        .fold(0i64, |sum, &n| sum.saturating_add(n))
        .max(0)
        .saturating_mul(2);
    let extra = usize::try_from(extra).unwrap_or(usize::MAX);
    queue.require(Stage::ExtraNumbers, extra)?;
    for _ in 0..extra {
        numbers.push(int_vector(queue, Stage::ExtraNumbers)?);
    }
    log::trace!("{extra} extra number block(s)");

    Ok(Header {
        version,
        strings,
        dims,
        numbers,
        tag,
        root_slot,
    })
}
