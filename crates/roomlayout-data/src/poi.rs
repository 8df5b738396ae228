//! Points-of-interest and doodads lists.
//!
//! Two list encodings share one grammar. A count line `N` introduces an entry
//! made of the next `N` lines. Otherwise multi-token lines accumulate in a group
//! that a `-1` line closes. Which encoding a file uses is only visible from the
//! shape of each line.

use roomlayout_types::{PoiGroup, PoiStyle, Token, TokenLine};

use crate::cell::looks_like_cell_row;
use crate::error::{ParseError, Stage};
use crate::source::LineQueue;
use crate::tokenizer::tokenize;

/// Which of the two lists is being read; they end differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiBlock {
    /// Followed by the grid; ends at a quoted line, which sets the overrides.
    /// `grid_follows` is false when the grid has no rows, so running out of
    /// input is a normal end.
    PointsOfInterest { grid_follows: bool },
    /// Last thing in the file; ends with the input.
    Doodads,
}

impl PoiBlock {
    fn stage(self) -> Stage {
        match self {
            PoiBlock::PointsOfInterest { .. } => Stage::PointsOfInterest,
            PoiBlock::Doodads => Stage::Doodads,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiList {
    pub entries: Vec<PoiGroup>,
    pub overrides: Option<String>,
}

/// A free-form group being accumulated, and the line that opened it.
#[derive(Default)]
struct OpenGroup {
    lines: PoiGroup,
    start: usize,
}

impl OpenGroup {
    fn push(&mut self, line: usize, tokens: TokenLine) {
        if self.lines.is_empty() {
            self.start = line;
        }
        self.lines.push(tokens);
    }

    fn take(&mut self) -> PoiGroup {
        std::mem::take(&mut self.lines)
    }
}

/// Read one list from the front of `queue`.
pub fn read_poi_block(
    queue: &mut LineQueue<'_>,
    block: PoiBlock,
    style: PoiStyle,
) -> Result<PoiList, ParseError> {
    let stage = block.stage();
    let unexpected = |line: usize, msg: String| ParseError::UnexpectedPoiLine {
        line,
        block: stage,
        msg,
    };

    let mut list = PoiList::default();
    let mut group = OpenGroup::default();

    while let Some(next) = queue.peek() {
        if block != PoiBlock::Doodads && looks_like_cell_row(next.text) {
            log::trace!("line {}: grid starts, {stage} ends", next.number);
            if !group.lines.is_empty() {
                return Err(ParseError::UnterminatedGroup { line: group.start });
            }
            return Ok(list);
        }
        queue.pop();
        let line = next.number;
        let mut tokens = tokenize(next.text, line)?;

        if tokens.len() >= 2 {
            if !style.allows_grouped() {
                return Err(unexpected(line, "free-form line in counted list".into()));
            }
            group.push(line, tokens);
            continue;
        }
        let Some(token) = tokens.pop() else {
            continue;
        };
        match token {
            Token::Quoted(content) => {
                if block == PoiBlock::Doodads {
                    return Err(unexpected(line, format!("\"{content}\"")));
                }
                if !group.lines.is_empty() {
                    list.entries.push(group.take());
                }
                log::trace!("line {line}: {stage} ends, overrides \"{content}\"");
                list.overrides = Some(content);
                return Ok(list);
            }
            Token::Integer(count) if count >= 0 => {
                if !style.allows_counted() {
                    return Err(unexpected(line, format!("count {count} in grouped list")));
                }
                if !group.lines.is_empty() {
                    return Err(ParseError::MixedArrayStyle {
                        line,
                        open: group.lines.len(),
                    });
                }
                let wanted = usize::try_from(count).unwrap_or(usize::MAX);
                if wanted > queue.remaining() {
                    log::warn!(
                        "line {line}: count {count} but only {} line(s) remain",
                        queue.remaining()
                    );
                }
                let entry = queue
                    .take_up_to(wanted)
                    .iter()
                    .map(|l| tokenize(l.text, l.number))
                    .collect::<Result<PoiGroup, _>>()?;
                list.entries.push(entry);
            }
            Token::Integer(-1) => {
                if !style.allows_grouped() {
                    return Err(unexpected(line, "group sentinel in counted list".into()));
                }
                list.entries.push(group.take());
            }
            Token::Integer(n) => {
                return Err(unexpected(line, format!("negative count {n}")));
            }
            other => return Err(unexpected(line, format!("lone value {other}"))),
        }
    }

    if !group.lines.is_empty() {
        if let PoiBlock::PointsOfInterest { grid_follows: true } = block {
            return Err(ParseError::UnterminatedGroup { line: group.start });
        }
        list.entries.push(group.take());
    }
    Ok(list)
}
