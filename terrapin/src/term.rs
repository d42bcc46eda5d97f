//! The RDF terms the parser materializes.
//!
//! The model is deliberately small: an owned [`Term`] enum, the [`Literal`]
//! record and the `[Term; 3]` triple. Construction goes through the
//! constructor functions so the "datatype or language, never both" rule is
//! structural rather than checked.

use std::fmt;

/// A parsed triple in subject, predicate, object order.
pub type Triple = [Term; 3];

/// A single RDF term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI, absolute once it leaves the parser.
    Iri(String),
    /// A blank node carrying the label minted for it.
    BlankNode(String),
    /// A literal value.
    Literal(Literal),
}

/// A literal: a lexical form with at most one of datatype and language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    value: String,
    datatype: Option<String>,
    language: Option<String>,
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }
    /// Creates a blank node from its minted label.
    pub fn blank_node(label: impl Into<String>) -> Self {
        Term::BlankNode(label.into())
    }
    /// Creates a plain literal.
    pub fn plain_literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }
    /// Creates a literal with a datatype IRI.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        })
    }
    /// Creates a language-tagged literal.
    pub fn lang_literal(value: impl Into<String>, tag: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: Some(tag.into()),
        })
    }
    /// The IRI if this term is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }
    /// The blank node label if this term is one.
    pub fn as_blank_node(&self) -> Option<&str> {
        match self {
            Term::BlankNode(label) => Some(label),
            _ => None,
        }
    }
    /// The literal if this term is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            _ => None,
        }
    }
}

impl Literal {
    /// The lexical form.
    pub fn value(&self) -> &str {
        &self.value
    }
    /// The datatype IRI, if any.
    pub fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }
    /// The language tag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    /// true if the literal has neither datatype nor language.
    pub fn is_plain(&self) -> bool {
        self.datatype.is_none() && self.language.is_none()
    }
}

impl fmt::Display for Term {
    /// Writes the term in N-Triples form.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(label) => write!(f, "_:{}", label),
            Term::Literal(lit) => {
                write!(f, "\"{}\"", escape_literal(&lit.value))?;
                if let Some(dt) = &lit.datatype {
                    write!(f, "^^<{}>", dt)
                } else if let Some(lang) = &lit.language {
                    write!(f, "@{}", lang)
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn escape_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// A consumer of parsed triples.
///
/// The sink is the only boundary the parser shares with the outside; it is
/// handed each triple in document order. Backpressure is whatever `emit`
/// makes of it.
pub trait TripleSink {
    /// Accepts one finished triple.
    fn emit(&mut self, triple: Triple);
}

impl TripleSink for Vec<Triple> {
    fn emit(&mut self, triple: Triple) {
        self.push(triple);
    }
}
