//! Error handling.

use crate::parse::lexer::TokenKind;

/// Type alias for `Result` with default `Error`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while turning a Turtle document into triples.
///
/// Every variant is fatal: the parse stops at the reported position and
/// triples of the offending statement are withheld.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No terminal matched at a non-whitespace position.
    #[error("invalid token `{lexeme}` on line {line} (byte {offset})")]
    Lex {
        /// The unmatchable text, cut at the next whitespace or comment.
        lexeme: String,
        /// 1-based line of the offending position.
        line: u64,
        /// Byte offset of the offending position.
        offset: usize,
    },
    /// A malformed numeric escape, a surrogate code point or an unknown
    /// short escape.
    #[error("invalid escape sequence `{sequence}` on line {line}")]
    Escape {
        /// The escape sequence as written.
        sequence: String,
        /// 1-based line of the sequence.
        line: u64,
    },
    /// The lookahead fits no production of the pending non-terminal.
    #[error("expected {} but found {found} on line {line}", fmt_expected(.expected))]
    Parse {
        /// Token kinds that would have been accepted.
        expected: Vec<TokenKind>,
        /// Description of the actual token.
        found: String,
        /// 1-based line of the actual token.
        line: u64,
    },
    /// A prefixed name used a prefix that no directive has bound.
    #[error("undefined prefix `{prefix}:` on line {line}")]
    UndefinedPrefix {
        /// The unbound prefix (may be empty).
        prefix: String,
        /// 1-based line of the use.
        line: u64,
    },
    /// An IRI reference could not be resolved against the current base.
    #[error("cannot resolve `{reference}` against base `{base}` on line {line}")]
    IriResolution {
        /// The reference as written.
        reference: String,
        /// The base in effect (empty if none).
        base: String,
        /// 1-based line of the reference.
        line: u64,
    },
    /// The value stack or parse table violated an internal invariant.
    ///
    /// Indicates a bug in the table or the semantic actions, not in the
    /// input document.
    #[error("parser invariant violated: {0}")]
    Internal(String),
}

impl Error {
    /// Internal-error shorthand used by the semantic actions.
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

fn fmt_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_owned(),
        [single] => format!("{}", single),
        more => {
            let kinds = more
                .iter()
                .map(|k| format!("{}", k))
                .collect::<Vec<_>>()
                .join(", ");
            format!("one of {}", kinds)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_carries_position() {
        let err = Error::UndefinedPrefix {
            prefix: "ex".to_owned(),
            line: 3,
        };
        assert_eq!("undefined prefix `ex:` on line 3", err.to_string());
    }

    #[test]
    fn parse_error_lists_kinds() {
        let err = Error::Parse {
            expected: vec![TokenKind::Dot, TokenKind::Semicolon],
            found: "`]`".to_owned(),
            line: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("one of"));
        assert!(msg.contains("line 7"));
    }
}
