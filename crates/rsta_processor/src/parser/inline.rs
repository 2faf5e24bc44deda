/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Inline markup tokenizer using winnow.
//!
//! Recognizes ``` ``literal`` ```, `**strong**`, `*emphasis*` and
//! interpreted-text roles `:name:`content``. Anything else is plain text.

use winnow::combinator::{alt, delimited};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_until, take_while};

/// One inline token, borrowing from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    Text(&'a str),
    Emphasis(&'a str),
    Strong(&'a str),
    Literal(&'a str),
    Role {
        name: &'a str,
        content: &'a str,
        raw: &'a str,
    },
}

/// Split `text` into inline tokens.
pub fn tokenize(text: &str) -> Vec<Inline<'_>> {
    let mut tokens = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    let mut prev: Option<char> = None;

    while pos < text.len() {
        if can_start(prev) {
            let mut rest = &text[pos..];
            if let Ok(token) = markup(&mut rest) {
                if plain_start < pos {
                    tokens.push(Inline::Text(&text[plain_start..pos]));
                }
                pos = text.len() - rest.len();
                plain_start = pos;
                prev = text[..pos].chars().next_back();
                tokens.push(token);
                continue;
            }
        }
        let Some(c) = text[pos..].chars().next() else {
            break;
        };
        prev = Some(c);
        pos += c.len_utf8();
    }

    if plain_start < text.len() {
        tokens.push(Inline::Text(&text[plain_start..]));
    }
    tokens
}

/// Inline markup may only start at the beginning, after whitespace or after
/// opening punctuation.
fn can_start(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) => c.is_whitespace() || "'\"([{<-/:\u{2018}\u{201C}".contains(c),
    }
}

fn markup<'a>(input: &mut &'a str) -> winnow::Result<Inline<'a>, ContextError> {
    alt((literal_span, strong, emphasis, role)).parse_next(input)
}

fn is_inline_content(s: &str) -> bool {
    !s.is_empty() && !s.starts_with(char::is_whitespace) && !s.ends_with(char::is_whitespace)
}

fn literal_span<'a>(input: &mut &'a str) -> winnow::Result<Inline<'a>, ContextError> {
    let content = delimited("``", take_until(1.., "``"), "``").parse_next(input)?;
    if !is_inline_content(content) {
        return Err(ContextError::new());
    }
    Ok(Inline::Literal(content))
}

fn strong<'a>(input: &mut &'a str) -> winnow::Result<Inline<'a>, ContextError> {
    let content = delimited("**", take_until(1.., "**"), "**").parse_next(input)?;
    if !is_inline_content(content) {
        return Err(ContextError::new());
    }
    Ok(Inline::Strong(content))
}

fn emphasis<'a>(input: &mut &'a str) -> winnow::Result<Inline<'a>, ContextError> {
    let content = delimited('*', take_until(1.., '*'), '*').parse_next(input)?;
    if !is_inline_content(content) || content.starts_with('*') {
        return Err(ContextError::new());
    }
    Ok(Inline::Emphasis(content))
}

fn role_name<'a>(input: &mut &'a str) -> winnow::Result<&'a str, ContextError> {
    delimited(
        ':',
        take_while(1.., |c: char| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'
        }),
        ':',
    )
    .parse_next(input)
}

fn role<'a>(input: &mut &'a str) -> winnow::Result<Inline<'a>, ContextError> {
    let start = *input;
    let name = role_name.parse_next(input)?;
    let content = delimited('`', take_until(1.., '`'), '`').parse_next(input)?;
    let raw = &start[..start.len() - input.len()];
    Ok(Inline::Role { name, content, raw })
}
