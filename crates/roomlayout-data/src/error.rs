/// Parse stage that ran out of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Version,
    StringCount,
    StringTable,
    Dims,
    Numbers,
    Tag,
    RootSlot,
    ExtraNumbers,
    PointsOfInterest,
    Grid,
    Doodads,
}

/// Source bytes that are not valid UTF-16 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("odd byte length {0} for UTF-16 text")]
    OddLength(usize),
    #[error("unpaired surrogate {0:#06x}")]
    UnpairedSurrogate(u16),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: malformed header: {msg}")]
    MalformedHeader { line: usize, msg: String },
    #[error("line {line}: string table: {msg}")]
    StringTable { line: usize, msg: String },
    #[error("truncated file: {stage} needs {missing} more line(s)")]
    TruncatedFile { stage: Stage, missing: usize },
    #[error("line {line}: expected a cell tag (k, f, s, o, n), found {found}")]
    UnexpectedCellTag { line: usize, found: String },
    #[error("line {line}: `{tag}` record has {found} field(s), expected {expected}")]
    FieldCount {
        line: usize,
        tag: &'static str,
        found: usize,
        expected: &'static str,
    },
    #[error("line {line}: invalid {field} {value}")]
    FieldValue {
        line: usize,
        field: &'static str,
        value: i64,
    },
    #[error("line {line}: unexpected trailing data: {rest}")]
    TrailingData { line: usize, rest: String },
    #[error("line {line}: count-prefixed array while a group of {open} line(s) is open")]
    MixedArrayStyle { line: usize, open: usize },
    #[error("line {line}: group opened here was never closed by -1")]
    UnterminatedGroup { line: usize },
    #[error("line {line}: unexpected line in {block}: {msg}")]
    UnexpectedPoiLine {
        line: usize,
        block: Stage,
        msg: String,
    },
    #[error("line {line}: {msg}")]
    Token { line: usize, msg: String },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl ParseError {
    pub(crate) fn string_table(line: usize, msg: impl Into<String>) -> Self {
        ParseError::StringTable {
            line,
            msg: msg.into(),
        }
    }

    pub(crate) fn token(line: usize, msg: impl Into<String>) -> Self {
        ParseError::Token {
            line,
            msg: msg.into(),
        }
    }

    /// Line the error was found on, when it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedHeader { line, .. }
            | ParseError::StringTable { line, .. }
            | ParseError::UnexpectedCellTag { line, .. }
            | ParseError::FieldCount { line, .. }
            | ParseError::FieldValue { line, .. }
            | ParseError::TrailingData { line, .. }
            | ParseError::MixedArrayStyle { line, .. }
            | ParseError::UnterminatedGroup { line }
            | ParseError::UnexpectedPoiLine { line, .. }
            | ParseError::Token { line, .. } => Some(*line),
            ParseError::TruncatedFile { .. } | ParseError::Encoding(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names() {
        assert_eq!(Stage::ExtraNumbers.to_string(), "extra_numbers");
        assert_eq!(Stage::PointsOfInterest.to_string(), "points_of_interest");
    }

    #[test]
    fn messages_carry_line_numbers() {
        let err = ParseError::FieldCount {
            line: 9,
            tag: "k",
            found: 3,
            expected: "23 or 24",
        };
        assert_eq!(
            err.to_string(),
            "line 9: `k` record has 3 field(s), expected 23 or 24"
        );
        assert_eq!(err.line(), Some(9));
        let err = ParseError::TruncatedFile {
            stage: Stage::Grid,
            missing: 2,
        };
        assert_eq!(err.to_string(), "truncated file: grid needs 2 more line(s)");
        assert_eq!(err.line(), None);
    }
}
