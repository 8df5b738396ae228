//! Edge type files. Only the first line matters: `id` or `id #color`.

use roomlayout_types::EdgeType;

use crate::error::EncodingError;
use crate::source::decode_utf16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeTypeError {
    #[error("edge type file is empty")]
    Empty,
    #[error("bad color `{0}`")]
    BadColor(String),
    #[error("malformed first line `{0}`")]
    Malformed(String),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

pub fn parse_edge_type(text: &str) -> Result<EdgeType, EdgeTypeError> {
    let first = text
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .ok_or(EdgeTypeError::Empty)?;
    let words: Vec<&str> = first.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(EdgeTypeError::Empty),
        [id] => Ok(EdgeType {
            id: (*id).to_owned(),
            color: None,
        }),
        [id, color] if color.starts_with('#') => Ok(EdgeType {
            id: (*id).to_owned(),
            color: Some((*color).to_owned()),
        }),
        [_, color] => Err(EdgeTypeError::BadColor((*color).to_owned())),
        _ => Err(EdgeTypeError::Malformed(first.trim().to_owned())),
    }
}

/// Decode UTF-16 source bytes, then parse.
pub fn parse_edge_type_bytes(bytes: &[u8]) -> Result<EdgeType, EdgeTypeError> {
    parse_edge_type(&decode_utf16(bytes)?)
}
