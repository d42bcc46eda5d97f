#![deny(missing_docs)]

//! # Terrapin
//!
//! A streaming parser for the [Turtle](https://www.w3.org/TR/turtle/)
//! serialization of RDF.
//!
//! The pipeline has three layers:
//!
//! 1. a terminal scanner ([`parse::lexer`]) that turns a UTF-8 document into
//!    tokens with resolved escapes and line numbers,
//! 2. an LL(1) driver ([`parse::parser`]) walking a pre-computed parse table
//!    ([`parse::grammar`]),
//! 3. semantic actions that materialize RDF [`Term`]s and push finished
//!    triples to the consumer.
//!
//! The main entry point is [`Parser`], an `Iterator` over parsed triples:
//!
//! ```
//! use terrapin::Parser;
//!
//! let doc = r#"@prefix ex: <http://example.org/> .
//!              ex:s ex:p "o" ."#;
//! let triples: Result<Vec<_>, _> = Parser::new(doc).unwrap().collect();
//! assert_eq!(1, triples.unwrap().len());
//! ```

pub mod error;
pub mod iri;
pub mod ns;
pub mod parse;
pub mod term;

pub use self::error::{Error, Result};
pub use self::parse::lexer::{Lexer, Token, TokenKind, TokenValue};
pub use self::parse::parser::{Parser, ParserConfig};
pub use self::term::{Literal, Term, Triple, TripleSink};
