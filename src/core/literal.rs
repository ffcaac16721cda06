//! JavaScript array-literal to JSON text normalization.
//!
//! Single-quoted strings become double-quoted JSON strings and bare object
//! keys get quoted. Both rewrites only apply outside string literals, so an
//! apostrophe escaped as `\'` or a `, word:` sequence inside a value is left
//! as content.

use crate::domain::model::Record;
use crate::utils::error::{ConvertError, Result};
use std::iter::Peekable;
use std::str::CharIndices;

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn js_literal_to_json(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    let mut chars = source.char_indices().peekable();
    // Last non-whitespace character emitted outside a string.
    let mut previous: Option<char> = None;

    while let Some((start, c)) = chars.next() {
        match c {
            '\'' | '"' => {
                push_string(&mut chars, c, &mut out);
                previous = Some('"');
            }
            c if is_key_char(c) && matches!(previous, Some('{') | Some(',')) => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if !is_key_char(next) {
                        break;
                    }
                    end = i + next.len_utf8();
                    chars.next();
                }

                let word = &source[start..end];
                if source[end..].trim_start().starts_with(':') {
                    out.push('"');
                    out.push_str(word);
                    out.push('"');
                } else {
                    out.push_str(word);
                }
                previous = Some(c);
            }
            c => {
                out.push(c);
                if !c.is_whitespace() {
                    previous = Some(c);
                }
            }
        }
    }

    out
}

/// Copies a string literal opened by `quote` as a double-quoted JSON string.
fn push_string(chars: &mut Peekable<CharIndices<'_>>, quote: char, out: &mut String) {
    out.push('"');

    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '\'')) => out.push('\''),
                Some((_, escaped)) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            c if c == quote => break,
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }

    out.push('"');
}

/// Normalizes and parses one array literal.
pub fn decode_records(variable: &str, source: &str) -> Result<Vec<Record>> {
    let json = js_literal_to_json(source);
    tracing::trace!("Normalized '{}': {}", variable, json);

    serde_json::from_str(&json).map_err(|source| ConvertError::JsonDecodeError {
        variable: variable.to_string(),
        source,
    })
}
