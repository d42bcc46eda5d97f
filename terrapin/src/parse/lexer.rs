//! The terminal scanner.
//!
//! [`Lexer`] turns a UTF-8 document into a stream of [`Token`]s. Terminal
//! classes are tried in a fixed priority order at the cursor, so overlapping
//! classes (`@prefix` vs. `LANGTAG`, `PNAME_LN` vs. keywords, `NIL` vs. a
//! lone `(`) resolve deterministically. Numeric escapes are resolved over
//! the whole document before scanning starts; string bodies additionally
//! get their short escapes resolved when the token is built, so a token's
//! value is final text.
//!
//! Whitespace and `#` comments are skipped; the line counter advances on
//! every line feed, including those inside skipped regions and long string
//! literals.

use super::escape;
use super::terminals::*;
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;

/// The closed set of token kinds.
///
/// String kinds follow the W3C terminal names: `…Quote` is double-quoted,
/// `…SingleQuote` single-quoted, `Long…` triple-quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `<…>`
    IriRef,
    /// `prefix:`
    PnameNs,
    /// `prefix:local`
    PnameLn,
    /// `_:label`
    BlankNodeLabel,
    /// `@tag`
    Langtag,
    /// `42`
    Integer,
    /// `4.2`
    Decimal,
    /// `4.2e1`
    Double,
    /// `true` or `false`
    Boolean,
    /// `"…"`
    StringLiteralQuote,
    /// `'…'`
    StringLiteralSingleQuote,
    /// `"""…"""`
    StringLiteralLongQuote,
    /// `'''…'''`
    StringLiteralLongSingleQuote,
    /// `()` with only whitespace inside
    Nil,
    /// `[]` with only whitespace inside
    Anon,
    /// `@prefix`
    PrefixDirective,
    /// `@base`
    BaseDirective,
    /// SPARQL-style `PREFIX`
    SparqlPrefix,
    /// SPARQL-style `BASE`
    SparqlBase,
    /// the `a` shorthand for `rdf:type`
    KeywordA,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `^^`
    DatatypeMarker,
    /// end of input
    Eof,
}

impl TokenKind {
    /// Number of kinds; the terminal axis of the parse table.
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::IriRef => "IRIREF",
            TokenKind::PnameNs => "PNAME_NS",
            TokenKind::PnameLn => "PNAME_LN",
            TokenKind::BlankNodeLabel => "BLANK_NODE_LABEL",
            TokenKind::Langtag => "LANGTAG",
            TokenKind::Integer => "INTEGER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Double => "DOUBLE",
            TokenKind::Boolean => "BooleanLiteral",
            TokenKind::StringLiteralQuote => "STRING_LITERAL_QUOTE",
            TokenKind::StringLiteralSingleQuote => "STRING_LITERAL_SINGLE_QUOTE",
            TokenKind::StringLiteralLongQuote => "STRING_LITERAL_LONG_QUOTE",
            TokenKind::StringLiteralLongSingleQuote => "STRING_LITERAL_LONG_SINGLE_QUOTE",
            TokenKind::Nil => "NIL",
            TokenKind::Anon => "ANON",
            TokenKind::PrefixDirective => "`@prefix`",
            TokenKind::BaseDirective => "`@base`",
            TokenKind::SparqlPrefix => "`PREFIX`",
            TokenKind::SparqlBase => "`BASE`",
            TokenKind::KeywordA => "`a`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::DatatypeMarker => "`^^`",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// The decoded payload of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    /// Punctuation and keywords carry no payload.
    None,
    /// Escape-resolved text: IRI body, string body, number lexeme,
    /// blank node label.
    Text(String),
    /// A prefixed name split at its first colon, local part unescaped.
    Prefixed {
        /// The prefix, possibly empty.
        prefix: String,
        /// The local part, possibly empty.
        local: String,
    },
    /// A language tag without the `@`.
    Lang(String),
}

/// One scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The terminal class.
    pub kind: TokenKind,
    /// The decoded payload.
    pub value: TokenValue,
    /// 1-based line the token started on.
    pub line: u64,
}

impl Token {
    /// The text payload, if the token carries one.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) | TokenValue::Lang(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            TokenValue::Text(text) | TokenValue::Lang(text) => {
                write!(f, "{} `{}`", self.kind, text)
            }
            TokenValue::Prefixed { prefix, local } => {
                write!(f, "{} `{}:{}`", self.kind, prefix, local)
            }
        }
    }
}

/// The scanner.
///
/// Owns the (possibly escape-rewritten) document and a byte cursor; one
/// token of lookahead is cached for [`peek`](Lexer::peek).
pub struct Lexer<'a> {
    doc: Cow<'a, str>,
    pos: usize,
    line: u64,
    peeked: Option<Token>,
    strict_directives: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a scanner over `doc`.
    ///
    /// A leading byte order mark is ignored. Fails if the document contains
    /// a numeric escape encoding a surrogate or an out-of-range scalar.
    pub fn new(doc: &'a str) -> Result<Self> {
        let doc = match doc.strip_prefix('\u{FEFF}') {
            Some(stripped) => stripped,
            None => doc,
        };
        Ok(Self {
            doc: escape::resolve_numeric(doc)?,
            pos: 0,
            line: 1,
            peeked: None,
            strict_directives: false,
        })
    }

    /// Requires `@prefix` and `@base` in exactly that lowercase form.
    ///
    /// The two keywords overlap lexically with `LANGTAG`; by default case
    /// variants such as `@BASE` are read as directives, in strict mode
    /// they are language tags.
    pub fn strict_directives(mut self, on: bool) -> Self {
        self.strict_directives = on;
        self
    }

    /// The current 1-based line number.
    pub fn line(&self) -> u64 {
        match &self.peeked {
            Some(tok) => tok.line,
            None => self.line,
        }
    }

    /// Returns the next token, or an `Eof` token at the end of input.
    pub fn next_token(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(tok) => Ok(tok),
            None => self.scan(),
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            let tok = self.scan()?;
            self.peeked = Some(tok);
        }
        Ok(self.peeked.as_ref().unwrap())
    }

    fn scan(&mut self) -> Result<Token> {
        self.skip_trivia();
        let line = self.line;
        if self.pos >= self.doc.len() {
            return Ok(Token {
                kind: TokenKind::Eof,
                value: TokenValue::None,
                line,
            });
        }

        let (kind, value, len) =
            scan_at(&self.doc[self.pos..], line, self.pos, self.strict_directives)?;
        let newlines = self.doc[self.pos..self.pos + len].matches('\n').count() as u64;
        self.line += newlines;
        self.pos += len;
        Ok(Token { kind, value, line })
    }

    /// Skips whitespace and comments, advancing the line counter.
    fn skip_trivia(&mut self) {
        let bytes = self.doc.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b'#' => {
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }
}

/// Recognizes one token at the start of `rest`.
///
/// Classes are tried in priority order; the first match wins. Returns the
/// kind, the decoded value and the consumed byte length.
fn scan_at(
    rest: &str,
    line: u64,
    offset: usize,
    strict_directives: bool,
) -> Result<(TokenKind, TokenValue, usize)> {
    // IRIREF
    if let Some(m) = IRIREF.find(rest) {
        let inner = &m.as_str()[1..m.end() - 1];
        return Ok((
            TokenKind::IriRef,
            TokenValue::Text(inner.to_owned()),
            m.end(),
        ));
    }

    // PNAME_LN before PNAME_NS: longest match
    if let Ok((_, matched)) = pname_ln(rest) {
        let ns_end = PNAME_NS.find(matched).map(|m| m.end()).unwrap_or(1);
        let prefix = &matched[..ns_end - 1];
        let local = escape::unescape_pn_local(&matched[ns_end..]);
        return Ok((
            TokenKind::PnameLn,
            TokenValue::Prefixed {
                prefix: prefix.to_owned(),
                local: local.into_owned(),
            },
            matched.len(),
        ));
    }
    if let Some(m) = PNAME_NS.find(rest) {
        let prefix = &m.as_str()[..m.end() - 1];
        return Ok((
            TokenKind::PnameNs,
            TokenValue::Prefixed {
                prefix: prefix.to_owned(),
                local: String::new(),
            },
            m.end(),
        ));
    }

    // strings, long forms first so `"""` is not read as an empty `""`
    for (re, kind, margin) in &[
        (
            &*STRING_LITERAL_LONG_QUOTE,
            TokenKind::StringLiteralLongQuote,
            3,
        ),
        (
            &*STRING_LITERAL_LONG_SINGLE_QUOTE,
            TokenKind::StringLiteralLongSingleQuote,
            3,
        ),
        (&*STRING_LITERAL_QUOTE, TokenKind::StringLiteralQuote, 1),
        (
            &*STRING_LITERAL_SINGLE_QUOTE,
            TokenKind::StringLiteralSingleQuote,
            1,
        ),
    ] {
        if let Some(m) = re.find(rest) {
            let body = &m.as_str()[*margin..m.end() - margin];
            let body = escape::resolve_string(body, line)?;
            return Ok((*kind, TokenValue::Text(body.into_owned()), m.end()));
        }
    }

    // `@prefix` and `@base` are lexical twins of LANGTAG; scan the tag and
    // decide by its word
    if rest.starts_with('@') {
        if let Some(m) = LANGTAG.find(rest) {
            let word = &m.as_str()[1..];
            let is_keyword = |keyword: &str| {
                if strict_directives {
                    word == keyword
                } else {
                    word.eq_ignore_ascii_case(keyword)
                }
            };
            let (kind, value) = if is_keyword("prefix") {
                (TokenKind::PrefixDirective, TokenValue::None)
            } else if is_keyword("base") {
                (TokenKind::BaseDirective, TokenValue::None)
            } else {
                (TokenKind::Langtag, TokenValue::Lang(word.to_owned()))
            };
            return Ok((kind, value, m.end()));
        }
    }

    // numerics, longest class first
    for (re, kind) in &[
        (&*DOUBLE, TokenKind::Double),
        (&*DECIMAL, TokenKind::Decimal),
        (&*INTEGER, TokenKind::Integer),
    ] {
        if let Some(m) = re.find(rest) {
            return Ok((
                *kind,
                TokenValue::Text(m.as_str().to_owned()),
                m.end(),
            ));
        }
    }

    // keywords; a name character after the match means it is no keyword
    if let Some(m) = SPARQL_PREFIX.find(rest) {
        if at_name_boundary(rest, m.end()) {
            return Ok((TokenKind::SparqlPrefix, TokenValue::None, m.end()));
        }
    }
    if let Some(m) = SPARQL_BASE.find(rest) {
        if at_name_boundary(rest, m.end()) {
            return Ok((TokenKind::SparqlBase, TokenValue::None, m.end()));
        }
    }
    if let Some(m) = BOOLEAN.find(rest) {
        if at_name_boundary(rest, m.end()) {
            return Ok((
                TokenKind::Boolean,
                TokenValue::Text(m.as_str().to_owned()),
                m.end(),
            ));
        }
    }
    if rest.starts_with('a') && at_name_boundary(rest, 1) {
        return Ok((TokenKind::KeywordA, TokenValue::None, 1));
    }

    // blank node label
    if let Ok((_, matched)) = blank_node_label(rest) {
        return Ok((
            TokenKind::BlankNodeLabel,
            TokenValue::Text(matched[2..].to_owned()),
            matched.len(),
        ));
    }

    // the empty collection and the empty property list are single tokens,
    // whitespace inside included
    if let Some(m) = NIL.find(rest) {
        return Ok((TokenKind::Nil, TokenValue::None, m.end()));
    }
    if let Some(m) = ANON.find(rest) {
        return Ok((TokenKind::Anon, TokenValue::None, m.end()));
    }

    if rest.starts_with("^^") {
        return Ok((TokenKind::DatatypeMarker, TokenValue::None, 2));
    }
    let delimiter = match rest.as_bytes()[0] {
        b'.' => Some(TokenKind::Dot),
        b',' => Some(TokenKind::Comma),
        b';' => Some(TokenKind::Semicolon),
        b'(' => Some(TokenKind::OpenParen),
        b')' => Some(TokenKind::CloseParen),
        b'[' => Some(TokenKind::OpenBracket),
        b']' => Some(TokenKind::CloseBracket),
        _ => None,
    };
    if let Some(kind) = delimiter {
        return Ok((kind, TokenValue::None, 1));
    }

    let lexeme = rest
        .split(|c: char| c == ' ' || c == '\t' || c == '\r' || c == '\n' || c == '#')
        .next()
        .unwrap_or(rest);
    Err(Error::Lex {
        lexeme: lexeme.to_owned(),
        line,
        offset,
    })
}

/// true if the text after a candidate keyword cannot continue a name.
fn at_name_boundary(rest: &str, len: usize) -> bool {
    match rest[len..].chars().next() {
        None => true,
        Some(c) => {
            let mut buf = [0u8; 4];
            !PN_CHARS.is_match(c.encode_utf8(&mut buf))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn kinds(doc: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(doc).unwrap();
        let mut out = vec![];
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == TokenKind::Eof {
                return out;
            }
            out.push(tok.kind);
        }
    }

    fn single(doc: &str) -> Token {
        let mut lexer = Lexer::new(doc).unwrap();
        lexer.next_token().unwrap()
    }

    #[test]
    fn statement_with_directive() {
        use TokenKind::*;
        assert_eq!(
            vec![
                PrefixDirective,
                PnameNs,
                IriRef,
                Dot,
                PnameLn,
                PnameLn,
                StringLiteralQuote,
                Dot
            ],
            kinds("@prefix ex: <http://ex/> . ex:s ex:p \"o\" .")
        );
    }

    #[test]
    fn collection_statement() {
        use TokenKind::*;
        assert_eq!(
            vec![IriRef, IriRef, OpenParen, Integer, Integer, CloseParen, Dot],
            kinds("<s> <p> ( 1 2 ) .")
        );
    }

    #[test_case("()" => TokenKind::Nil ; "nil tight")]
    #[test_case("( \t )" => TokenKind::Nil ; "nil spaced")]
    #[test_case("[]" => TokenKind::Anon ; "anon tight")]
    #[test_case("[ \n ]" => TokenKind::Anon ; "anon spaced")]
    #[test_case("( 1 )" => TokenKind::OpenParen ; "nonempty collection")]
    #[test_case("[ :p :o ]" => TokenKind::OpenBracket ; "nonempty property list")]
    #[test_case("1.5e0" => TokenKind::Double ; "double")]
    #[test_case("1.5" => TokenKind::Decimal ; "decimal")]
    #[test_case("-15" => TokenKind::Integer ; "integer")]
    #[test_case("true" => TokenKind::Boolean ; "boolean true")]
    #[test_case("false." => TokenKind::Boolean ; "boolean then dot")]
    #[test_case("a" => TokenKind::KeywordA ; "type keyword")]
    #[test_case("a:b" => TokenKind::PnameLn ; "a as prefix")]
    #[test_case("true:b" => TokenKind::PnameLn ; "true as prefix")]
    #[test_case("BASE" => TokenKind::SparqlBase ; "sparql base")]
    #[test_case("base" => TokenKind::SparqlBase ; "sparql base lower")]
    #[test_case("PREFIX" => TokenKind::SparqlPrefix ; "sparql prefix")]
    #[test_case("@BASE" => TokenKind::BaseDirective ; "at base any case")]
    #[test_case("@prefixed" => TokenKind::Langtag ; "langtag beating keyword")]
    #[test_case("^^" => TokenKind::DatatypeMarker ; "datatype marker")]
    #[test_case("_:b0" => TokenKind::BlankNodeLabel ; "blank node label")]
    fn first_kind(doc: &str) -> TokenKind {
        single(doc).kind
    }

    #[test]
    fn strict_directives_read_case_variants_as_langtags() {
        let mut lexer = Lexer::new("@BASE").unwrap().strict_directives(true);
        assert_eq!(TokenKind::Langtag, lexer.next_token().unwrap().kind);

        let mut lexer = Lexer::new("@base @prefix").unwrap().strict_directives(true);
        assert_eq!(TokenKind::BaseDirective, lexer.next_token().unwrap().kind);
        assert_eq!(TokenKind::PrefixDirective, lexer.next_token().unwrap().kind);
    }

    #[test]
    fn langtag_value() {
        let tok = single("@en-US");
        assert_eq!(TokenKind::Langtag, tok.kind);
        assert_eq!(TokenValue::Lang("en-US".to_owned()), tok.value);
    }

    #[test]
    fn string_value_is_decoded() {
        let tok = single(r#""a\nb\u0041""#);
        assert_eq!(TokenKind::StringLiteralQuote, tok.kind);
        assert_eq!(Some("a\nbA"), tok.text());
    }

    #[test]
    fn iriref_value_is_decoded() {
        let tok = single("<http://ex/\\u0041>");
        assert_eq!(Some("http://ex/A"), tok.text());
    }

    #[test]
    fn pname_is_split_and_unescaped() {
        let tok = single("ex:a\\.b");
        assert_eq!(
            TokenValue::Prefixed {
                prefix: "ex".to_owned(),
                local: "a.b".to_owned(),
            },
            tok.value
        );
    }

    #[test]
    fn empty_prefix_pname() {
        let tok = single(":x");
        assert_eq!(
            TokenValue::Prefixed {
                prefix: String::new(),
                local: "x".to_owned(),
            },
            tok.value
        );
    }

    #[test]
    fn trailing_dot_is_a_token() {
        use TokenKind::*;
        assert_eq!(vec![PnameLn, Dot], kinds("ex:s."));
        assert_eq!(vec![BlankNodeLabel, Dot], kinds("_:b."));
        assert_eq!(vec![Integer, Dot], kinds("42."));
    }

    #[test]
    fn lines_advance_in_trivia_and_long_strings() {
        let mut lexer = Lexer::new("# comment\n\n\"\"\"a\nb\"\"\" :x :y").unwrap();
        let string = lexer.next_token().unwrap();
        assert_eq!(3, string.line);
        let pname = lexer.next_token().unwrap();
        assert_eq!(4, pname.line);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("ex:s ex:p").unwrap();
        assert_eq!(TokenKind::PnameLn, lexer.peek().unwrap().kind);
        assert_eq!(TokenKind::PnameLn, lexer.peek().unwrap().kind);
        let first = lexer.next_token().unwrap();
        assert_eq!(TokenKind::PnameLn, first.kind);
        lexer.next_token().unwrap();
        assert_eq!(TokenKind::Eof, lexer.next_token().unwrap().kind);
    }

    #[test]
    fn bom_is_skipped() {
        assert_eq!(vec![TokenKind::KeywordA], kinds("\u{FEFF}a"));
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = Lexer::new("").unwrap();
        assert_eq!(TokenKind::Eof, lexer.next_token().unwrap().kind);
        assert_eq!(TokenKind::Eof, lexer.next_token().unwrap().kind);
    }

    #[test]
    fn unmatchable_input_is_a_lex_error() {
        let mut lexer = Lexer::new(":s :p |||garbage more").unwrap();
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        match lexer.next_token() {
            Err(Error::Lex {
                lexeme,
                line: 1,
                offset: 6,
            }) => assert_eq!("|||garbage", lexeme),
            other => panic!("expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn bad_string_escape_is_rejected() {
        // `\z` is no ECHAR, so the string terminal itself refuses to match
        let mut lexer = Lexer::new("\"a\\zb\"").unwrap();
        assert!(matches!(lexer.next_token(), Err(Error::Lex { line: 1, .. })));
    }

    #[test]
    fn surrogate_escape_fails_at_construction() {
        assert!(matches!(
            Lexer::new(":s :p \"\\uD800\""),
            Err(Error::Escape { .. })
        ));
    }
}
