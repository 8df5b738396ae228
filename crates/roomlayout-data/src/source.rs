//! Source text handling: UTF-16 decoding and the numbered line queue every
//! parse stage pops from.

use crate::error::{EncodingError, ParseError, Stage};

/// Decode wide text, honouring a byte order mark (little-endian otherwise).
pub fn decode_utf16(bytes: &[u8]) -> Result<String, EncodingError> {
    if bytes.len() % 2 != 0 {
        return Err(EncodingError::OddLength(bytes.len()));
    }
    let (big_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };
    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });
    char::decode_utf16(units)
        .map(|c| c.map_err(|e| EncodingError::UnpairedSurrogate(e.unpaired_surrogate())))
        .collect()
}

/// A non-blank source line and its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Remaining lines of a file, front first. Blank lines never enter the queue.
#[derive(Debug, Clone)]
pub struct LineQueue<'a> {
    lines: Vec<SourceLine<'a>>,
    pos: usize,
}

impl<'a> LineQueue<'a> {
    pub fn from_text(text: &'a str) -> Self {
        Self::collect(text.lines())
    }

    pub fn from_lines<S: AsRef<str>>(lines: &'a [S]) -> Self {
        Self::collect(lines.iter().map(AsRef::as_ref))
    }

    fn collect(lines: impl Iterator<Item = &'a str>) -> Self {
        let lines = lines
            .enumerate()
            .map(|(i, text)| SourceLine {
                number: i + 1,
                text: text.trim_start_matches('\u{feff}'),
            })
            .filter(|line| !line.text.trim().is_empty())
            .collect();
        Self { lines, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek(&self) -> Option<SourceLine<'a>> {
        self.lines.get(self.pos).copied()
    }

    pub fn pop(&mut self) -> Option<SourceLine<'a>> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Number of the most recently popped line, or 0 before the first pop.
    pub fn last_number(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map_or(0, |line| line.number)
    }

    /// Fail with [`ParseError::TruncatedFile`] unless `count` lines remain.
    pub fn require(&self, stage: Stage, count: usize) -> Result<(), ParseError> {
        match count.checked_sub(self.remaining()) {
            Some(missing) if missing > 0 => Err(ParseError::TruncatedFile { stage, missing }),
            _ => Ok(()),
        }
    }

    pub fn pop_for(&mut self, stage: Stage) -> Result<SourceLine<'a>, ParseError> {
        self.pop()
            .ok_or(ParseError::TruncatedFile { stage, missing: 1 })
    }

    /// Pop up to `count` lines, stopping early at end of input.
    pub fn take_up_to(&mut self, count: usize) -> &[SourceLine<'a>] {
        let start = self.pos;
        self.pos += count.min(self.remaining());
        &self.lines[start..self.pos]
    }
}
