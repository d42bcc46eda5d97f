//! The LL(1) driver and the semantic actions.
//!
//! The driver keeps two stacks: `symbols` holds pending grammar symbols and
//! reduce sentinels, `values` holds the semantic values their consumption
//! produced. Expanding a non-terminal pushes a reduce sentinel below the
//! production body, so the production's action runs exactly when its body
//! has been consumed; the action pops its inputs from the value stack and
//! pushes one result.
//!
//! Triples queue up in two stages: actions append to a pending buffer and
//! the statement-terminator action moves the buffer into the committed
//! queue. A statement that fails mid-way therefore contributes nothing,
//! while everything committed before the failure stays delivered.

use super::grammar::{follow, Action, NonTerm, Production, Sym, PARSE_TABLE};
use super::lexer::{Lexer, Token, TokenKind, TokenValue};
use super::terminals::IRIREF_ONLY;
use crate::error::{Error, Result};
use crate::iri;
use crate::ns::{rdf, rdfs, xsd};
use crate::term::{Term, Triple, TripleSink};
use log::{debug, trace};
use std::collections::{HashMap, VecDeque};

/// Options accepted by the parser.
///
/// The builder-style setters consume and return the config:
///
/// ```
/// use terrapin::ParserConfig;
///
/// let config = ParserConfig::new()
///     .base_uri("http://example.org/doc")
///     .prefix("ex", "http://example.org/ns#");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    base_uri: Option<String>,
    prefixes: HashMap<String, String>,
    validate: bool,
    canonicalize: bool,
}

impl ParserConfig {
    /// An empty configuration: no base, no prefixes, case-tolerant
    /// directives, verbatim numeric lexical forms.
    pub fn new() -> Self {
        Self::default()
    }
    /// Sets the initial base IRI; a `@base` directive overrides it.
    pub fn base_uri(mut self, iri: impl Into<String>) -> Self {
        self.base_uri = Some(iri.into());
        self
    }
    /// Pre-seeds one prefix binding.
    pub fn prefix(mut self, name: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(name.into(), iri.into());
        self
    }
    /// Pre-seeds a list of prefix bindings.
    pub fn prefixes<P, N>(mut self, bindings: impl IntoIterator<Item = (P, N)>) -> Self
    where
        P: Into<String>,
        N: Into<String>,
    {
        for (name, iri) in bindings {
            self.prefixes.insert(name.into(), iri.into());
        }
        self
    }
    /// Pre-seeds the `rdf`, `rdfs` and `xsd` prefixes.
    pub fn with_default_prefixes(self) -> Self {
        self.prefix("rdf", rdf::PREFIX)
            .prefix("rdfs", rdfs::PREFIX)
            .prefix("xsd", xsd::PREFIX)
    }
    /// In strict mode the `@prefix` and `@base` keywords must be written
    /// in exactly that lowercase form; by default case variants are also
    /// read as directives. Unresolved prefixes and unresolvable relative
    /// references are fatal in both modes.
    pub fn validate(mut self, on: bool) -> Self {
        self.validate = on;
        self
    }
    /// Rewrites numeric literal lexical forms to their XSD canonical form.
    pub fn canonicalize(mut self, on: bool) -> Self {
        self.canonicalize = on;
        self
    }
}

/// A language tag or datatype trailing a string literal.
#[derive(Debug)]
enum LiteralSuffix {
    Lang(String),
    Datatype(Term),
}

/// A semantic value on the driver's value stack.
#[derive(Debug)]
enum Value {
    Token(Token),
    Term(Term),
    Terms(Vec<Term>),
    Pairs(Vec<(Term, Vec<Term>)>),
    Suffix(Option<LiteralSuffix>),
    Unit,
}

/// The mutable parse state of one document.
struct Context {
    base: Option<String>,
    prefixes: HashMap<String, String>,
    /// User-written label to minted label.
    bnode_labels: HashMap<String, String>,
    anon_counter: u64,
    /// Triples of the statement currently being parsed.
    pending: Vec<Triple>,
    /// Triples of completed statements, ready for the consumer.
    committed: VecDeque<Triple>,
    canonicalize: bool,
}

impl Context {
    fn mint_bnode(&mut self) -> Term {
        let label = format!("b{}", self.anon_counter);
        self.anon_counter += 1;
        Term::blank_node(label)
    }

    fn labeled_bnode(&mut self, label: &str) -> Term {
        if let Some(minted) = self.bnode_labels.get(label) {
            return Term::blank_node(minted.clone());
        }
        let node = self.mint_bnode();
        let minted = match &node {
            Term::BlankNode(minted) => minted.clone(),
            _ => unreachable!(),
        };
        self.bnode_labels.insert(label.to_owned(), minted);
        node
    }

    /// Resolves a reference against the base in effect.
    ///
    /// With no base, an absolute reference is taken as-is and a relative
    /// one is an error; an emitted IRI is always absolute.
    fn resolve_reference(&self, reference: &str, line: u64) -> Result<String> {
        let base = self.base.as_deref().unwrap_or("");
        match iri::resolve(base, reference) {
            Some(resolved) => Ok(resolved),
            None => Err(Error::IriResolution {
                reference: reference.to_owned(),
                base: base.to_owned(),
                line,
            }),
        }
    }

    /// Replaces the base. A relative reference resolves against the
    /// previous base; without one it is an error.
    fn set_base(&mut self, reference: &str, line: u64) -> Result<()> {
        let base = self.base.as_deref().unwrap_or("");
        match iri::resolve(base, reference) {
            Some(resolved) => {
                debug!("base is now <{}>", resolved);
                self.base = Some(resolved);
                Ok(())
            }
            None => Err(Error::IriResolution {
                reference: reference.to_owned(),
                base: base.to_owned(),
                line,
            }),
        }
    }

    /// Binds a prefix; rebinding replaces the previous namespace.
    fn bind_prefix(&mut self, prefix: &str, reference: &str, line: u64) -> Result<()> {
        let ns = self.resolve_reference(reference, line)?;
        debug!("prefix `{}:` is now <{}>", prefix, ns);
        self.prefixes.insert(prefix.to_owned(), ns);
        Ok(())
    }

    fn expand_pname(&self, prefix: &str, local: &str, line: u64) -> Result<Term> {
        match self.prefixes.get(prefix) {
            Some(ns) => Ok(Term::iri(format!("{}{}", ns, local))),
            None => Err(Error::UndefinedPrefix {
                prefix: prefix.to_owned(),
                line,
            }),
        }
    }

    fn push_triple(&mut self, subject: Term, predicate: Term, object: Term) {
        self.pending.push([subject, predicate, object]);
    }

    fn commit_statement(&mut self) {
        self.committed.extend(self.pending.drain(..));
    }
}

/// A symbol stack entry: a grammar symbol, or the reduce sentinel that runs
/// a production's action once its body is consumed.
enum Slot {
    Symbol(Sym),
    Reduce(&'static Production),
}

/// The Turtle parser, a streaming `Iterator` over parsed triples.
///
/// Parsing advances statement by statement; the triples of a statement
/// become visible when its terminating `.` has been consumed. The first
/// error ends the iteration.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    ctx: Context,
    symbols: Vec<Slot>,
    values: Vec<Value>,
    done: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default configuration.
    pub fn new(doc: &'a str) -> Result<Self> {
        Self::with_config(doc, ParserConfig::new())
    }

    /// A parser with a pre-set base IRI to resolve relative references.
    ///
    /// _Note:_ If the document contains an own `@base` directive the
    /// pre-set value is overridden.
    pub fn with_base(doc: &'a str, base: impl Into<String>) -> Result<Self> {
        Self::with_config(doc, ParserConfig::new().base_uri(base))
    }

    /// A parser with the given configuration.
    ///
    /// Fails if the configured base or a pre-seeded namespace is not an
    /// absolute IRI.
    pub fn with_config(doc: &'a str, config: ParserConfig) -> Result<Self> {
        if let Some(base) = &config.base_uri {
            check_config_iri(base)?;
        }
        for ns in config.prefixes.values() {
            check_config_iri(ns)?;
        }

        Ok(Self {
            lexer: Lexer::new(doc)?.strict_directives(config.validate),
            ctx: Context {
                base: config.base_uri,
                prefixes: config.prefixes,
                bnode_labels: HashMap::new(),
                anon_counter: 0,
                pending: Vec::new(),
                committed: VecDeque::new(),
                canonicalize: config.canonicalize,
            },
            symbols: vec![Slot::Symbol(Sym::N(NonTerm::TurtleDoc))],
            values: Vec::new(),
            done: false,
        })
    }

    /// Drives the whole document into `sink`.
    ///
    /// Triples are emitted in parse order, so a nested node's triples
    /// arrive before the triple that references it.
    pub fn drain_into<S: TripleSink>(mut self, sink: &mut S) -> Result<()> {
        loop {
            match self.next() {
                Some(Ok(triple)) => sink.emit(triple),
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            }
        }
    }

    /// One driver step. Returns `true` on accept.
    fn step(&mut self) -> Result<bool> {
        let slot = match self.symbols.pop() {
            Some(slot) => slot,
            None => {
                // table drained; only end of input may follow
                let tok = self.lexer.peek()?;
                return if tok.kind == TokenKind::Eof {
                    Ok(true)
                } else {
                    Err(Error::Parse {
                        expected: vec![TokenKind::Eof],
                        found: tok.to_string(),
                        line: tok.line,
                    })
                };
            }
        };

        match slot {
            Slot::Symbol(Sym::T(kind)) => {
                let tok = self.lexer.next_token()?;
                if tok.kind != kind {
                    return Err(Error::Parse {
                        expected: vec![kind],
                        found: tok.to_string(),
                        line: tok.line,
                    });
                }
                self.values.push(Value::Token(tok));
            }
            Slot::Symbol(Sym::N(nt)) => {
                let look = {
                    let tok = self.lexer.peek()?;
                    tok.kind
                };
                if let Some(prod) = PARSE_TABLE.production(nt, look) {
                    trace!("expand {:?} on {}", nt, look);
                    self.symbols.push(Slot::Reduce(prod));
                    for sym in prod.body.iter().rev() {
                        self.symbols.push(Slot::Symbol(*sym));
                    }
                } else {
                    match PARSE_TABLE.epsilon(nt) {
                        Some(eps) if follow(nt).contains(&look) => {
                            trace!("{:?} is empty on {}", nt, look);
                            self.reduce(eps)?;
                        }
                        _ => {
                            let (found, line) = {
                                let tok = self.lexer.peek()?;
                                (tok.to_string(), tok.line)
                            };
                            return Err(Error::Parse {
                                expected: PARSE_TABLE.expected(nt),
                                found,
                                line,
                            });
                        }
                    }
                }
            }
            Slot::Reduce(prod) => self.reduce(prod)?,
        }
        Ok(false)
    }

    fn reduce(&mut self, prod: &'static Production) -> Result<()> {
        trace!("reduce {:?} via {:?}", prod.lhs, prod.action);
        match prod.action {
            Action::Forward => {}
            Action::Unit => {
                for _ in 0..prod.body.len() {
                    self.pop_value()?;
                }
                self.values.push(Value::Unit);
            }
            Action::EndStatement => {
                for _ in 0..prod.body.len() {
                    self.pop_value()?;
                }
                self.ctx.commit_statement();
                self.values.push(Value::Unit);
            }
            Action::BindPrefix => {
                if prod.body.len() == 4 {
                    self.pop_token()?;
                }
                let iriref = self.pop_token()?;
                let pname = self.pop_token()?;
                self.pop_token()?;
                let prefix = match &pname.value {
                    TokenValue::Prefixed { prefix, .. } => prefix.clone(),
                    other => {
                        return Err(Error::internal(format!(
                            "prefix directive without a prefix: {:?}",
                            other
                        )))
                    }
                };
                let reference = self.token_text(&iriref)?;
                self.ctx.bind_prefix(&prefix, &reference, iriref.line)?;
                self.values.push(Value::Unit);
            }
            Action::SetBase => {
                if prod.body.len() == 3 {
                    self.pop_token()?;
                }
                let iriref = self.pop_token()?;
                self.pop_token()?;
                let reference = self.token_text(&iriref)?;
                self.ctx.set_base(&reference, iriref.line)?;
                self.values.push(Value::Unit);
            }
            Action::SpoEmit => {
                let pairs = self.pop_pairs()?;
                let subject = self.pop_term()?;
                for (predicate, objects) in pairs {
                    for object in objects {
                        self.ctx
                            .push_triple(subject.clone(), predicate.clone(), object);
                    }
                }
                self.values.push(Value::Unit);
            }
            Action::BnplSubjectEmit => {
                let pairs = self.pop_pairs()?;
                let node = self.pop_term()?;
                for (predicate, objects) in pairs {
                    for object in objects {
                        self.ctx
                            .push_triple(node.clone(), predicate.clone(), object);
                    }
                }
                self.values.push(Value::Unit);
            }
            Action::EmptyPairs => self.values.push(Value::Pairs(Vec::new())),
            Action::PairsCons => {
                let tail = self.pop_pairs()?;
                let objects = self.pop_terms()?;
                let verb = self.pop_term()?;
                let mut pairs = Vec::with_capacity(1 + tail.len());
                pairs.push((verb, objects));
                pairs.extend(tail);
                self.values.push(Value::Pairs(pairs));
            }
            Action::PairsSemicolon => {
                let tail = self.pop_pairs()?;
                let mut pairs = self.pop_pairs()?;
                self.pop_token()?;
                pairs.extend(tail);
                self.values.push(Value::Pairs(pairs));
            }
            Action::PairSingle => {
                let objects = self.pop_terms()?;
                let verb = self.pop_term()?;
                self.values.push(Value::Pairs(vec![(verb, objects)]));
            }
            Action::EmptyTerms => self.values.push(Value::Terms(Vec::new())),
            Action::TermsCons => {
                let tail = self.pop_terms()?;
                let head = self.pop_term()?;
                let mut terms = Vec::with_capacity(1 + tail.len());
                terms.push(head);
                terms.extend(tail);
                self.values.push(Value::Terms(terms));
            }
            Action::TermsComma => {
                let tail = self.pop_terms()?;
                let head = self.pop_term()?;
                self.pop_token()?;
                let mut terms = Vec::with_capacity(1 + tail.len());
                terms.push(head);
                terms.extend(tail);
                self.values.push(Value::Terms(terms));
            }
            Action::RdfType => {
                self.pop_token()?;
                self.values.push(Value::Term(Term::iri(rdf::TYPE)));
            }
            Action::PropertyListNode => {
                self.pop_token()?;
                let pairs = self.pop_pairs()?;
                self.pop_token()?;
                let node = self.ctx.mint_bnode();
                for (predicate, objects) in pairs {
                    for object in objects {
                        self.ctx
                            .push_triple(node.clone(), predicate.clone(), object);
                    }
                }
                self.values.push(Value::Term(node));
            }
            Action::CollectionNode => {
                self.pop_token()?;
                let items = self.pop_terms()?;
                self.pop_token()?;
                if items.is_empty() {
                    self.values.push(Value::Term(Term::iri(rdf::NIL)));
                } else {
                    let nodes: Vec<Term> =
                        items.iter().map(|_| self.ctx.mint_bnode()).collect();
                    let last = items.len() - 1;
                    // chain tail first: a consumer never sees a list node
                    // before that node's own links
                    for (idx, object) in items.into_iter().enumerate().rev() {
                        let rest = if idx == last {
                            Term::iri(rdf::NIL)
                        } else {
                            nodes[idx + 1].clone()
                        };
                        self.ctx.push_triple(
                            nodes[idx].clone(),
                            Term::iri(rdf::FIRST),
                            object,
                        );
                        self.ctx
                            .push_triple(nodes[idx].clone(), Term::iri(rdf::REST), rest);
                    }
                    self.values.push(Value::Term(nodes[0].clone()));
                }
            }
            Action::NilNode => {
                self.pop_token()?;
                self.values.push(Value::Term(Term::iri(rdf::NIL)));
            }
            Action::AssembleLiteral => {
                let suffix = self.pop_suffix()?;
                let string = self.pop_token()?;
                let value = self.token_text(&string)?;
                let term = match suffix {
                    None => Term::plain_literal(value),
                    Some(LiteralSuffix::Lang(tag)) => Term::lang_literal(value, tag),
                    Some(LiteralSuffix::Datatype(Term::Iri(dt))) => {
                        Term::typed_literal(value, dt)
                    }
                    Some(LiteralSuffix::Datatype(other)) => {
                        return Err(Error::internal(format!(
                            "datatype is not an IRI: {:?}",
                            other
                        )))
                    }
                };
                self.values.push(Value::Term(term));
            }
            Action::SuffixLang => {
                let tok = self.pop_token()?;
                let tag = match tok.value {
                    TokenValue::Lang(tag) => tag,
                    other => {
                        return Err(Error::internal(format!(
                            "language suffix without a tag: {:?}",
                            other
                        )))
                    }
                };
                self.values
                    .push(Value::Suffix(Some(LiteralSuffix::Lang(tag))));
            }
            Action::SuffixDatatype => {
                let datatype = self.pop_term()?;
                self.pop_token()?;
                self.values
                    .push(Value::Suffix(Some(LiteralSuffix::Datatype(datatype))));
            }
            Action::SuffixNone => self.values.push(Value::Suffix(None)),
            Action::NumericValue => {
                let tok = self.pop_token()?;
                let lexeme = self.token_text(&tok)?;
                let (datatype, lexeme) = match tok.kind {
                    TokenKind::Integer => (
                        xsd::INTEGER,
                        maybe_canonical(&lexeme, self.ctx.canonicalize, canonical_integer),
                    ),
                    TokenKind::Decimal => (
                        xsd::DECIMAL,
                        maybe_canonical(&lexeme, self.ctx.canonicalize, canonical_decimal),
                    ),
                    TokenKind::Double => (
                        xsd::DOUBLE,
                        maybe_canonical(&lexeme, self.ctx.canonicalize, canonical_double),
                    ),
                    other => {
                        return Err(Error::internal(format!(
                            "numeric action on {:?}",
                            other
                        )))
                    }
                };
                self.values
                    .push(Value::Term(Term::typed_literal(lexeme, datatype)));
            }
            Action::BooleanValue => {
                let tok = self.pop_token()?;
                let lexeme = self.token_text(&tok)?;
                self.values
                    .push(Value::Term(Term::typed_literal(lexeme, xsd::BOOLEAN)));
            }
            Action::ResolveIriRef => {
                let tok = self.pop_token()?;
                let reference = self.token_text(&tok)?;
                let resolved = self.ctx.resolve_reference(&reference, tok.line)?;
                self.values.push(Value::Term(Term::iri(resolved)));
            }
            Action::ExpandPname => {
                let tok = self.pop_token()?;
                let term = match &tok.value {
                    TokenValue::Prefixed { prefix, local } => {
                        self.ctx.expand_pname(prefix, local, tok.line)?
                    }
                    other => {
                        return Err(Error::internal(format!(
                            "prefixed name without parts: {:?}",
                            other
                        )))
                    }
                };
                self.values.push(Value::Term(term));
            }
            Action::LabeledBlankNode => {
                let tok = self.pop_token()?;
                let label = self.token_text(&tok)?;
                let node = self.ctx.labeled_bnode(&label);
                self.values.push(Value::Term(node));
            }
            Action::AnonBlankNode => {
                self.pop_token()?;
                let node = self.ctx.mint_bnode();
                self.values.push(Value::Term(node));
            }
        }
        Ok(())
    }

    fn pop_value(&mut self) -> Result<Value> {
        self.values
            .pop()
            .ok_or_else(|| Error::internal("value stack underflow"))
    }

    fn pop_token(&mut self) -> Result<Token> {
        match self.pop_value()? {
            Value::Token(tok) => Ok(tok),
            other => Err(Error::internal(format!(
                "expected a token on the value stack, found {:?}",
                other
            ))),
        }
    }

    fn pop_term(&mut self) -> Result<Term> {
        match self.pop_value()? {
            Value::Term(term) => Ok(term),
            other => Err(Error::internal(format!(
                "expected a term on the value stack, found {:?}",
                other
            ))),
        }
    }

    fn pop_terms(&mut self) -> Result<Vec<Term>> {
        match self.pop_value()? {
            Value::Terms(terms) => Ok(terms),
            other => Err(Error::internal(format!(
                "expected a term list on the value stack, found {:?}",
                other
            ))),
        }
    }

    fn pop_pairs(&mut self) -> Result<Vec<(Term, Vec<Term>)>> {
        match self.pop_value()? {
            Value::Pairs(pairs) => Ok(pairs),
            other => Err(Error::internal(format!(
                "expected a pair list on the value stack, found {:?}",
                other
            ))),
        }
    }

    fn pop_suffix(&mut self) -> Result<Option<LiteralSuffix>> {
        match self.pop_value()? {
            Value::Suffix(suffix) => Ok(suffix),
            other => Err(Error::internal(format!(
                "expected a literal suffix on the value stack, found {:?}",
                other
            ))),
        }
    }

    fn token_text(&self, tok: &Token) -> Result<String> {
        match tok.text() {
            Some(text) => Ok(text.to_owned()),
            None => Err(Error::internal(format!("token {} has no text", tok))),
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Result<Triple>;

    /// Returns parsed triples.
    ///
    /// The driver runs until the next statement completes, then hands out
    /// its triples one by one. After the first error (or the end of input)
    /// only `None` is returned.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(triple) = self.ctx.committed.pop_front() {
                return Some(Ok(triple));
            }
            if self.done {
                return None;
            }
            match self.step() {
                Ok(false) => {}
                Ok(true) => self.done = true,
                Err(e) => {
                    self.done = true;
                    self.ctx.pending.clear();
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Caller-supplied IRIs must be absolute before the first statement.
fn check_config_iri(candidate: &str) -> Result<()> {
    if IRIREF_ONLY.is_match(candidate) && iri::IriRef::parse(candidate).is_absolute() {
        Ok(())
    } else {
        Err(Error::IriResolution {
            reference: candidate.to_owned(),
            base: String::new(),
            line: 0,
        })
    }
}

fn maybe_canonical(lexeme: &str, on: bool, canon: fn(&str) -> String) -> String {
    if on {
        canon(lexeme)
    } else {
        lexeme.to_owned()
    }
}

fn split_sign(lexeme: &str) -> (bool, &str) {
    match lexeme.as_bytes().first() {
        Some(b'-') => (true, &lexeme[1..]),
        Some(b'+') => (false, &lexeme[1..]),
        _ => (false, lexeme),
    }
}

/// Canonical form of `xsd:integer`: no plus sign, no leading zeros.
fn canonical_integer(lexeme: &str) -> String {
    let (negative, digits) = split_sign(lexeme);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        "0".to_owned()
    } else if negative {
        format!("-{}", digits)
    } else {
        digits.to_owned()
    }
}

/// Canonical form of `xsd:decimal`: at least one digit on either side of
/// the point, no redundant zeros, no negative zero.
fn canonical_decimal(lexeme: &str) -> String {
    let (negative, body) = split_sign(lexeme);
    // a DECIMAL lexeme always contains the point
    let point = body.find('.').unwrap_or(body.len());
    let int = body[..point].trim_start_matches('0');
    let frac = body[point..].trim_start_matches('.').trim_end_matches('0');
    let int = if int.is_empty() { "0" } else { int };
    let frac = if frac.is_empty() { "0" } else { frac };
    if negative && !(int == "0" && frac == "0") {
        format!("-{}.{}", int, frac)
    } else {
        format!("{}.{}", int, frac)
    }
}

/// Canonical form of `xsd:double`: normalized mantissa with a point, `E`,
/// no redundant exponent digits.
fn canonical_double(lexeme: &str) -> String {
    // a DOUBLE lexeme is a valid f64
    let value: f64 = match lexeme.parse() {
        Ok(value) => value,
        Err(_) => return lexeme.to_owned(),
    };
    if value.is_infinite() {
        return if value < 0.0 { "-INF" } else { "INF" }.to_owned();
    }
    let formatted = format!("{:E}", value);
    match formatted.find('E') {
        Some(e) if !formatted[..e].contains('.') => {
            format!("{}.0{}", &formatted[..e], &formatted[e..])
        }
        _ => formatted,
    }
}
