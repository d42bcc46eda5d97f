//! Resolution of the two escape forms of Turtle.
//!
//! Numeric escapes (`\uXXXX`, `\UXXXXXXXX`) may occur in IRIs and prefixed
//! names, not only in strings, so [`resolve_numeric`] runs over the whole
//! document before the scanner sees it. Short escapes (`\t`, `\n`, …) are
//! only meaningful inside string bodies and are resolved by
//! [`resolve_string`] after the quotes are stripped.
//!
//! A `\\` pair is left untouched by the numeric pass; the string pass later
//! collapses it, so `"\\u0041"` keeps its literal `A` text.

use crate::error::{Error, Result};
use std::borrow::Cow;

/// Decodes every `\uXXXX` and `\UXXXXXXXX` in `doc` to its UTF-8 character.
///
/// Sequences with too few or non-hex digits are copied through for the
/// scanner to reject. A surrogate code point or a scalar beyond U+10FFFF is
/// a fatal [`Error::Escape`].
pub fn resolve_numeric(doc: &str) -> Result<Cow<'_, str>> {
    if !doc.contains('\\') {
        return Ok(Cow::Borrowed(doc));
    }

    let mut out = String::with_capacity(doc.len());
    let mut line = 1u64;
    let mut rest = doc;

    while let Some(pos) = rest.find('\\') {
        let chunk = &rest[..pos];
        line += chunk.matches('\n').count() as u64;
        out.push_str(chunk);
        let tail = &rest[pos..];

        if tail.starts_with("\\\\") {
            out.push_str("\\\\");
            rest = &tail[2..];
        } else if tail.starts_with("\\u") {
            rest = decode_hex(tail, 4, line, &mut out)?;
        } else if tail.starts_with("\\U") {
            rest = decode_hex(tail, 8, line, &mut out)?;
        } else {
            out.push('\\');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

/// Decodes one `\u`/`\U` sequence at the start of `tail`, pushing either the
/// character or, for a malformed payload, the sequence verbatim.
fn decode_hex<'a>(tail: &'a str, digits: usize, line: u64, out: &mut String) -> Result<&'a str> {
    let payload = &tail[2..];
    let hex = match payload.get(..digits) {
        Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => hex,
        _ => {
            // not a numeric escape; the terminal regexes will refuse it
            out.push_str(&tail[..2]);
            return Ok(&tail[2..]);
        }
    };

    // the payload is hex-only, so this cannot fail
    let code = u32::from_str_radix(hex, 16).unwrap();
    let sequence = || tail[..2 + digits].to_owned();
    if (0xD800..=0xDFFF).contains(&code) {
        return Err(Error::Escape {
            sequence: sequence(),
            line,
        });
    }
    match std::char::from_u32(code) {
        Some(c) => out.push(c),
        None => {
            return Err(Error::Escape {
                sequence: sequence(),
                line,
            })
        }
    }
    Ok(&tail[2 + digits..])
}

/// Decodes the short escapes of a string body.
///
/// `line` is the line the string token started on; it is only used for
/// error reporting. A backslash followed by anything outside the escapable
/// set is a fatal [`Error::Escape`].
pub fn resolve_string(body: &str, line: u64) -> Result<Cow<'_, str>> {
    if !body.contains('\\') {
        return Ok(Cow::Borrowed(body));
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{08}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{0C}'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            other => {
                let sequence = match other {
                    Some(c) => format!("\\{}", c),
                    None => "\\".to_owned(),
                };
                return Err(Error::Escape { sequence, line });
            }
        }
    }
    Ok(Cow::Owned(out))
}

/// Drops the backslashes of `PN_LOCAL_ESC` sequences in a local name.
///
/// Only called on text the scanner already validated; percent triplets pass
/// through verbatim.
pub fn unescape_pn_local(local: &str) -> Cow<'_, str> {
    if !local.contains('\\') {
        return Cow::Borrowed(local);
    }

    let mut out = String::with_capacity(local.len());
    let mut chars = local.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("plain" => "plain" ; "untouched")]
    #[test_case("a\\u0041b" => "aAb" ; "small escape")]
    #[test_case("\\U0001F Four" => "\\U0001F Four" ; "big escape too short")]
    #[test_case("\\U0001F995" => "🦕" ; "big escape")]
    #[test_case("\\u00e9" => "é" ; "lowercase hex")]
    #[test_case("\\uzzzz" => "\\uzzzz" ; "invalid hex passes through")]
    #[test_case("\\\\u0041" => "\\\\u0041" ; "escaped backslash wins")]
    #[test_case("\\n" => "\\n" ; "short escape untouched")]
    fn check_resolve_numeric(doc: &str) -> String {
        resolve_numeric(doc).unwrap().into_owned()
    }

    #[test_case("\\uD800" ; "low surrogate")]
    #[test_case("\\uDFFF" ; "high surrogate")]
    #[test_case("\\U00110000" ; "beyond unicode")]
    fn check_resolve_numeric_fatal(doc: &str) {
        match resolve_numeric(doc) {
            Err(Error::Escape { sequence, line: 1 }) => assert_eq!(doc, sequence),
            other => panic!("expected escape error, got {:?}", other),
        }
    }

    #[test]
    fn numeric_error_carries_line() {
        match resolve_numeric("a\nb\n\\uD800") {
            Err(Error::Escape { line, .. }) => assert_eq!(3, line),
            other => panic!("expected escape error, got {:?}", other),
        }
    }

    #[test_case("plain" => "plain" ; "untouched")]
    #[test_case("a\\tb" => "a\tb" ; "tab")]
    #[test_case("a\\nb" => "a\nb" ; "newline")]
    #[test_case("a\\\"b" => "a\"b" ; "double quote")]
    #[test_case("a\\'b" => "a'b" ; "single quote")]
    #[test_case("a\\\\b" => "a\\b" ; "backslash")]
    #[test_case("\\b\\f" => "\u{08}\u{0C}" ; "rare controls")]
    fn check_resolve_string(body: &str) -> String {
        resolve_string(body, 1).unwrap().into_owned()
    }

    #[test_case("a\\x" ; "unknown escape")]
    #[test_case("tail\\" ; "dangling backslash")]
    fn check_resolve_string_fatal(body: &str) {
        assert!(matches!(
            resolve_string(body, 7),
            Err(Error::Escape { line: 7, .. })
        ));
    }

    #[test_case("plain" => "plain" ; "untouched")]
    #[test_case("a\\.b" => "a.b" ; "escaped dot")]
    #[test_case("a\\~\\-" => "a~-" ; "several escapes")]
    #[test_case("a%41" => "a%41" ; "percent kept")]
    fn check_unescape_pn_local(local: &str) -> String {
        unescape_pn_local(local).into_owned()
    }
}
