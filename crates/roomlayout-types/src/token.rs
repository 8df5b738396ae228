use std::fmt;

use serde::Serialize;

/// One value from a tokenized line, in the order it appeared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Token {
    Integer(i64),
    Float(f64),
    Quoted(String),
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{n}"),
            Token::Float(x) => write!(f, "{x}"),
            Token::Quoted(s) => write!(f, "\"{s}\""),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// A single tokenized line.
pub type TokenLine = Vec<Token>;

/// One entry of a points-of-interest or doodads list: the tokenized lines of a
/// count-prefixed array or of a sentinel-closed group.
pub type PoiGroup = Vec<TokenLine>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_strings_only() {
        assert_eq!(Token::Integer(-3).to_string(), "-3");
        assert_eq!(Token::Quoted("a b".into()).to_string(), "\"a b\"");
        assert_eq!(Token::Word("abc".into()).to_string(), "abc");
    }

    #[test]
    fn serializes_untagged() {
        let line: TokenLine = vec![
            Token::Integer(1),
            Token::Float(0.5),
            Token::Quoted("q".into()),
            Token::Word("w".into()),
        ];
        let json = serde_json::to_string(&line).expect("serialize");
        assert_eq!(json, r#"[1,0.5,"q","w"]"#);
    }
}
