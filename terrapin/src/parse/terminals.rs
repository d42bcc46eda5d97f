//! Terminal classes of the Turtle grammar.
//!
//! # Escapes
//!
//! The regexes recognize escape sequences but do not resolve them; numeric
//! escapes are resolved before the scanner runs and short escapes when a
//! token value is built (see [`super::escape`]).
//!
//! # Provided
//!
//! Most terminals are regular expressions compiled once at load. The
//! character-range predicates (`PN_CHARS_BASE` and friends) are the exact
//! Unicode ranges of the [Turtle grammar](https://www.w3.org/TR/turtle/#sec-grammar);
//! they must not be approximated by general letter classes. Terminals too
//! involved for one expression (`PNAME_LN`, `BLANK_NODE_LABEL`) are `nom`
//! parser functions over the regexes.

use super::util::parse_regex;
use lazy_static::lazy_static;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{opt, recognize};
use nom::multi::many0;
use nom::sequence::tuple;
use nom::IResult;
use regex::Regex;

lazy_static! {
    /// Production of IRIREF, angle brackets included.
    pub static ref IRIREF: Regex = Regex::new(r#"^<([^\u{00}-\u{20}<>"\{\}\|\^`\\]|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*>"#).unwrap();
    /// IRIREF without the angle brackets, anchored at both ends.
    ///
    /// Used to validate caller-supplied base IRIs and namespaces.
    pub static ref IRIREF_ONLY: Regex = Regex::new(r#"(?x)
        ^(
            [^\u{00}-\u{20}<>"\{\}\|\^`\\]
            | (\\u [[:xdigit:]]{4})
            | (\\U [[:xdigit:]]{8})
        )* $"#).unwrap();

    /// Production of PN_CHARS_BASE.
    pub static ref PN_CHARS_BASE: Regex = Regex::new(r#"^[A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#).unwrap();

    /// Production of PN_CHARS_U.
    pub static ref PN_CHARS_U: Regex = Regex::new(r#"^[_A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#).unwrap();

    /// Production of PN_CHARS.
    pub static ref PN_CHARS: Regex = Regex::new(r#"^[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]"#).unwrap();

    /// Production of PN_PREFIX.
    pub static ref PN_PREFIX: Regex = Regex::new(r#"^([A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]([-\.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]*[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}])?)"#).unwrap();

    /// Production of PNAME_NS: an optional PN_PREFIX plus the colon.
    pub static ref PNAME_NS: Regex = Regex::new(r#"^([A-Za-z\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0370}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]([-\.0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}]*[-0-9_A-Za-z\u{00B7}\u{00C0}-\u{00D6}\u{00D8}-\u{00F6}\u{00F8}-\u{02FF}\u{0300}-\u{037D}\u{037F}-\u{1FFF}\u{200C}-\u{200D}\u{203F}-\u{2040}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\U{00010000}-\U{000EFFFF}])?)?:"#).unwrap();

    /// Production of LANGTAG, `@` included.
    pub static ref LANGTAG: Regex = Regex::new(r#"^@[[:alpha:]]+(-[[:alnum:]]+)*"#).unwrap();
    /// Production of INTEGER.
    pub static ref INTEGER: Regex = Regex::new(r#"^[+-]?[[:digit:]]+"#).unwrap();
    /// Production of DECIMAL.
    pub static ref DECIMAL: Regex = Regex::new(r#"^[+-]?[[:digit:]]*\.[[:digit:]]+"#).unwrap();
    /// Production of DOUBLE.
    pub static ref DOUBLE: Regex = Regex::new(r#"^[+-]?(([[:digit:]]+\.[[:digit:]]*[eE][+-]?[[:digit:]]+)|(\.[[:digit:]]+[eE][+-]?[[:digit:]]+)|([[:digit:]]+[eE][+-]?[[:digit:]]+))"#).unwrap();
    /// Production of BooleanLiteral. Case-sensitive; the scanner also
    /// requires a name boundary after the match.
    pub static ref BOOLEAN: Regex = Regex::new(r#"^(true|false)"#).unwrap();
    /// SPARQL-style `PREFIX`, case-insensitive, name boundary required.
    pub static ref SPARQL_PREFIX: Regex = Regex::new(r#"^(?i)prefix"#).unwrap();
    /// SPARQL-style `BASE`, case-insensitive, name boundary required.
    pub static ref SPARQL_BASE: Regex = Regex::new(r#"^(?i)base"#).unwrap();

    /// Production of STRING_LITERAL_QUOTE.
    pub static ref STRING_LITERAL_QUOTE: Regex = Regex::new(r#"^"([^\u{22}\u{5C}\u{A}\u{D}]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*""#).unwrap();
    /// Production of STRING_LITERAL_SINGLE_QUOTE.
    pub static ref STRING_LITERAL_SINGLE_QUOTE: Regex = Regex::new(r#"^'([^\u{27}\u{5C}\u{A}\u{D}]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))*'"#).unwrap();
    /// Production of STRING_LITERAL_LONG_QUOTE.
    pub static ref STRING_LITERAL_LONG_QUOTE: Regex = Regex::new(r#"^"""((("|"")?([^"\\]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))))*""""#).unwrap();
    /// Production of STRING_LITERAL_LONG_SINGLE_QUOTE.
    pub static ref STRING_LITERAL_LONG_SINGLE_QUOTE: Regex = Regex::new(r#"^'''((('|'')?([^'\\]|(\\[tbnrf"'\\])|(\\u[[:xdigit:]]{4})|(\\U[[:xdigit:]]{8}))))*'''"#).unwrap();

    /// Production of ANON: brackets around whitespace only.
    pub static ref ANON: Regex = Regex::new(r#"^\[[ \t\n\r]*\]"#).unwrap();
    /// Production of NIL: parentheses around whitespace only.
    pub static ref NIL: Regex = Regex::new(r#"^\([ \t\n\r]*\)"#).unwrap();
    /// Production of PLX.
    pub static ref PLX: Regex = Regex::new(r#"^(%[[:xdigit:]]{2})|(\\[-_~\.!\$&'\(\)\*\+,;=/\?#@%])"#).unwrap();
    /// Production of PN_LOCAL_ESC, the backslash-escaped punctuation of
    /// local names.
    pub static ref PN_LOCAL_ESC: Regex = Regex::new(r#"^\\[-_~\.!\$&'\(\)\*\+,;=/\?#@%]"#).unwrap();

    static ref DIGIT: Regex = Regex::new(r#"^[[:digit:]]"#).unwrap();
}

/// Parses Turtle's rule
/// [140s] PNAME_LN ::= PNAME_NS PN_LOCAL
///
/// Trailing unescaped dots are backed off so that `ex:s.` leaves the
/// statement terminator in the input.
pub fn pname_ln(i: &str) -> IResult<&str, &str> {
    let (_, matched) = recognize(tuple((parse_regex(&PNAME_NS), pn_local)))(i)?;
    Ok(back_off_dots(i, matched))
}

/// Parses Turtle's rule
/// [141s] BLANK_NODE_LABEL ::= '_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
///
/// As with [`pname_ln`], trailing dots are not part of the label.
pub fn blank_node_label(i: &str) -> IResult<&str, &str> {
    let (_, matched) = recognize(tuple((
        tag("_:"),
        alt((parse_regex(&PN_CHARS_U), parse_regex(&DIGIT))),
        many0(alt((parse_regex(&PN_CHARS), tag(".")))),
    )))(i)?;
    Ok(back_off_dots(i, matched))
}

/// Parses Turtle's rule
/// [168s] PN_LOCAL ::= (PN_CHARS_U | ':' | [0-9] | PLX) ((PN_CHARS | '.' | ':' | PLX)* (PN_CHARS | ':' | PLX))?
pub fn pn_local(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        alt((
            parse_regex(&PN_CHARS_U),
            tag(":"),
            parse_regex(&DIGIT),
            parse_regex(&PLX),
        )),
        many0(alt((
            parse_regex(&PN_CHARS),
            tag("."),
            tag(":"),
            parse_regex(&PLX),
        ))),
        opt(alt((parse_regex(&PN_CHARS), tag(":"), parse_regex(&PLX)))),
    )))(i)
}

/// Gives back trailing `.` characters a greedy match swallowed. An escaped
/// dot (`\.`, a PLX) stays part of the name.
fn back_off_dots<'a>(i: &'a str, matched: &'a str) -> (&'a str, &'a str) {
    let mut keep = matched.len();
    while keep > 0 && matched[..keep].ends_with('.') && !matched[..keep - 1].ends_with('\\') {
        keep -= 1;
    }
    (&i[keep..], &matched[..keep])
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("<>" => true ; "empty string")]
    #[test_case("<http://www.w3.org/1999/02/>" => true ; "IRI")]
    #[test_case("<http://www.w3.org/1999/02/22-rdf-syntax-ns#>" => true ; "IRI ending with '#'")]
    #[test_case("<../ns/vocab#>" => true ; "relative IRI")]
    #[test_case("<\\u0ace>" => true ; "numeric escape small")]
    #[test_case("<\\UFeDc0123>" => true ; "numeric escape big")]
    #[test_case("<\0>" => false ; "null character")]
    #[test_case("<  >" => false ; "space")]
    #[test_case("<\">" => false ; "quote")]
    #[test_case("<{>" => false ; "open curly")]
    #[test_case("<}>" => false ; "close curly")]
    #[test_case("<|>" => false ; "bar")]
    #[test_case("<^>" => false ; "caret")]
    #[test_case("<`>" => false ; "back tick")]
    #[test_case("<\\>" => false ; "backslash")]
    #[test_case("<\\u000>" => false ; "numeric escape small less digits")]
    #[test_case("<\\uzzzz>" => false ; "numeric escape small wrong digits")]
    #[test_case("<\\U000000>" => false ; "numeric escape big less digits")]
    #[test_case("<\\Uzzzzzzzz>" => false ; "numeric escape big wrong digits")]
    fn check_iriref(to_check: &str) -> bool {
        IRIREF.is_match(to_check)
    }

    #[test_case("rBäôí" => true ; "alpha")]
    #[test_case("" => false ; "empty")]
    #[test_case("0123456789" => false ; "numeric")]
    #[test_case("_!?-:\\,.-<>#" => false ; "special")]
    #[test_case(" " => false ; "space")]
    fn check_pn_chars_base(to_check: &str) -> bool {
        PN_CHARS_BASE.is_match(to_check)
    }

    #[test_case("rBäôí" => true ; "alpha")]
    #[test_case("_" => true ; "allowed special")]
    #[test_case("" => false ; "empty")]
    #[test_case("0123456789" => false ; "numeric")]
    #[test_case("!?-:\\,.-<>#" => false ; "unallowed special")]
    fn check_pn_chars_u(to_check: &str) -> bool {
        PN_CHARS_U.is_match(to_check)
    }

    #[test_case("rBäôí" => true ; "alpha")]
    #[test_case("_-" => true ; "allowed special")]
    #[test_case("0123456789" => true ; "numeric")]
    #[test_case("" => false ; "empty")]
    #[test_case("!?:\\,.<>#" => false ; "unallowed special")]
    fn check_pn_chars(to_check: &str) -> bool {
        PN_CHARS.is_match(to_check)
    }

    #[test_case("a_01.2-3.45ö6.78î9" => true ; "mixed")]
    #[test_case("a01.23.456.789" => true ; "with dots")]
    #[test_case("" => false ; "empty")]
    #[test_case("0" => false ; "star numeric")]
    #[test_case("_" => false ; "star allowed special")]
    fn check_pn_prefix(to_check: &str) -> bool {
        PN_PREFIX.is_match(to_check)
    }

    #[test_case("@en" => true ; "simple")]
    #[test_case("@en-uk" => true ; "expanded")]
    #[test_case("@en-uk-man" => true ; "further")]
    #[test_case("@en-2uk2-man" => true ; "number in second")]
    #[test_case("en-uk-man" => false ; "missing at")]
    #[test_case("@1en" => false ; "number in first")]
    fn check_langtag(to_check: &str) -> bool {
        LANGTAG.is_match(to_check)
    }

    #[test_case("123"        => true ; "integer")]
    #[test_case("-123"       => true ; "ninteger")]
    #[test_case(".45"        => false ; "decimal dot")]
    fn check_integer(to_check: &str) -> bool {
        INTEGER.is_match(to_check)
    }

    #[test_case("123.45"     => true ; "decimal")]
    #[test_case("-.45"       => true ; "ndecimal dot")]
    #[test_case("123"        => false ; "integer")]
    fn check_decimal(to_check: &str) -> bool {
        DECIMAL.is_match(to_check)
    }

    #[test_case("1.2345e2"   => true ; "double")]
    #[test_case("-12345E-2"  => true ; "ndouble")]
    #[test_case("-.12345E-2" => true ; "ndouble dot")]
    #[test_case("123.45"     => false ; "decimal")]
    #[test_case("123"        => false ; "integer")]
    fn check_double(to_check: &str) -> bool {
        DOUBLE.is_match(to_check)
    }

    #[test_case("_:example  rest" => Ok(("  rest", "_:example")) ; "start alpha")]
    #[test_case("_:0  rest" => Ok(("  rest", "_:0")) ; "start num")]
    #[test_case("_:_  rest" => Ok(("  rest", "_:_")) ; "start under")]
    #[test_case("_:b.  rest" => Ok((".  rest", "_:b")) ; "trailing dot returned")]
    #[test_case("_:b.c" => Ok(("", "_:b.c")) ; "inner dot kept")]
    fn check_blank_node_label(i: &str) -> IResult<&str, &str> {
        blank_node_label(i)
    }

    #[test_case("ex:s  rest" => Ok(("  rest", "ex:s")) ; "simple")]
    #[test_case(":s  rest" => Ok(("  rest", ":s")) ; "empty prefix")]
    #[test_case("ex:s. " => Ok((". ", "ex:s")) ; "trailing dot returned")]
    #[test_case("ex:s.t. " => Ok((". ", "ex:s.t")) ; "inner dot kept")]
    #[test_case("ex:s\\. " => Ok((" ", "ex:s\\.")) ; "escaped trailing dot kept")]
    #[test_case("ex:%41 " => Ok((" ", "ex:%41")) ; "percent triplet")]
    #[test_case("og:video:height " => Ok((" ", "og:video:height")) ; "colon in local")]
    fn check_pname_ln(i: &str) -> IResult<&str, &str> {
        pname_ln(i)
    }

    #[test_case("[]" => true ; "no space")]
    #[test_case("[ \t\n]" => true ; "valid space")]
    #[test_case("[ \thello\n]" => false ; "not empty")]
    fn check_anon(to_check: &str) -> bool {
        ANON.is_match(to_check)
    }

    #[test_case("()" => true ; "no space")]
    #[test_case("( \t\n)" => true ; "valid space")]
    #[test_case("( 1 )" => false ; "not empty")]
    fn check_nil(to_check: &str) -> bool {
        NIL.is_match(to_check)
    }

    #[test_case("%ab" => true ; "hex valid")]
    #[test_case("%yz" => false ; "hex invalid")]
    #[test_case("\\." => true ; "escape")]
    #[test_case("." => false ; "unescape")]
    fn check_plx(to_check: &str) -> bool {
        PLX.is_match(to_check)
    }

    #[test_case("PREFIX" => true ; "upper")]
    #[test_case("prefix" => true ; "lower")]
    #[test_case("PrEfIx" => true ; "mixed")]
    #[test_case("BASE" => false ; "other keyword")]
    fn check_sparql_prefix(to_check: &str) -> bool {
        SPARQL_PREFIX.is_match(to_check)
    }

    #[test_case("\"quote\"" => true ; "quote")]
    #[test_case("\"qu\\\"ote\"" => true ; "escaped inner quote")]
    #[test_case("\"qu\note\"" => false ; "raw newline")]
    fn check_string_literal_quote(to_check: &str) -> bool {
        STRING_LITERAL_QUOTE.is_match(to_check)
    }

    #[test_case("\"\"\"long \" quote\"\"\"" => true ; "inner quote")]
    #[test_case("\"\"\"long \"\" quote\"\"\"" => true ; "two inner quotes")]
    #[test_case("\"\"\"line\nbreak\"\"\"" => true ; "newline")]
    fn check_string_literal_long_quote(to_check: &str) -> bool {
        STRING_LITERAL_LONG_QUOTE.is_match(to_check)
    }
}
