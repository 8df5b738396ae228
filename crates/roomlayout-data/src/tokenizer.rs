//! Tokenizer for the free-form lines of a layout file.
//!
//! A line is a sequence of integers, decimals, double-quoted strings and bare
//! words, separated by optional whitespace. Integers are tried first, so `1.5`
//! reads as `1` followed by `.5`. Quoted strings have no escape syntax; anything
//! that looks like one is rejected rather than guessed at.

use roomlayout_types::Token;
use winnow::ModalResult;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::take_till;

use crate::error::ParseError;

fn decimal(input: &mut &str) -> ModalResult<f64> {
    (opt('-'), digit0, '.', digit1)
        .take()
        .try_map(str::parse::<f64>)
        .parse_next(input)
}

fn integer(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), digit1)
        .take()
        .try_map(str::parse::<i64>)
        .parse_next(input)
}

fn quoted<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., |c: char| c.is_whitespace())
        .verify(|w: &str| !w.starts_with('"'))
        .parse_next(input)
}

fn token(input: &mut &str) -> ModalResult<Token> {
    alt((
        integer.map(Token::Integer),
        decimal.map(Token::Float),
        quoted.map(|s: &str| Token::Quoted(s.to_owned())),
        word.map(|s: &str| Token::Word(s.to_owned())),
    ))
    .parse_next(input)
}

/// Reject quoted content that relies on backslash escapes.
fn check_quoted(content: &str, line: usize) -> Result<(), ParseError> {
    if content.contains('"') || content.contains("\\\\") {
        return Err(ParseError::string_table(
            line,
            format!("possible backslash escape in \"{content}\""),
        ));
    }
    Ok(())
}

/// Split one line into tokens, left to right.
pub fn tokenize(text: &str, line: usize) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let start = rest;
        let col = text.len() - start.len() + 1;
        let tok = token.parse_next(&mut rest).map_err(|_| {
            ParseError::token(line, format!("col {col}: unrecognised value at `{start}`"))
        })?;
        if let Token::Quoted(content) = &tok {
            check_quoted(content, line)?;
            if rest.starts_with(|c: char| !c.is_whitespace()) {
                return Err(ParseError::string_table(
                    line,
                    format!("col {col}: quote mismatch at `{start}`"),
                ));
            }
        }
        tokens.push(tok);
        rest = rest.trim_start();
    }
    Ok(tokens)
}

/// Parse a line holding nothing but one quoted string.
pub fn parse_quoted_line(text: &str, line: usize) -> Result<String, ParseError> {
    let trimmed = text.trim();
    let content = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| {
            ParseError::string_table(line, format!("expected quoted string, got {trimmed}"))
        })?;
    check_quoted(content, line)?;
    Ok(content.to_owned())
}

/// Parse a line of whitespace-separated integers.
pub fn parse_int_vector(text: &str, line: usize) -> Result<Vec<i64>, ParseError> {
    tokenize(text, line)?
        .into_iter()
        .map(|tok| match tok {
            Token::Integer(n) => Ok(n),
            other => Err(ParseError::token(
                line,
                format!("expected integer, got {other}"),
            )),
        })
        .collect()
}
