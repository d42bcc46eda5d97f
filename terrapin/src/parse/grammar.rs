//! The LL(1) parse table.
//!
//! The grammar artifact lives here as data: the production list (each with
//! the lookahead set that selects it and the identifier of its semantic
//! action) and the FOLLOW sets of the nullable non-terminals. The
//! `(non-terminal, terminal)` index table is assembled from the production
//! list once at load; the driver in [`super::parser`] only ever consults
//! [`ParseTable::production`], [`ParseTable::epsilon`] and [`follow`].
//!
//! The EBNF repetitions of the W3C grammar are factored into right-recursive
//! tail non-terminals (`PredicateObjectTail`, `ObjectTail`,
//! `CollectionItems`) so that one token of lookahead always decides.

use crate::parse::lexer::TokenKind as K;
use lazy_static::lazy_static;

/// The non-terminals of the Turtle grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTerm {
    /// `turtleDoc ::= statement*`
    TurtleDoc,
    /// Right recursion over statements.
    Statements,
    /// `statement ::= directive | triples '.'`
    Statement,
    /// `directive ::= prefixID | base | sparqlPrefix | sparqlBase`
    Directive,
    /// `prefixID ::= '@prefix' PNAME_NS IRIREF '.'`
    PrefixDecl,
    /// `base ::= '@base' IRIREF '.'`
    BaseDecl,
    /// `sparqlPrefix ::= "PREFIX" PNAME_NS IRIREF`
    SparqlPrefixDecl,
    /// `sparqlBase ::= "BASE" IRIREF`
    SparqlBaseDecl,
    /// `triples ::= subject predicateObjectList | blankNodePropertyList predicateObjectList?`
    Triples,
    /// The optional predicate-object list after a property list subject.
    PredicateObjectListOpt,
    /// `predicateObjectList ::= verb objectList (';' (verb objectList)?)*`
    PredicateObjectList,
    /// The `(';' …)*` tail.
    PredicateObjectTail,
    /// The optional `verb objectList` after a `;`.
    PredicateObjectItemOpt,
    /// `objectList ::= object (',' object)*`
    ObjectList,
    /// The `(',' object)*` tail.
    ObjectTail,
    /// `verb ::= predicate | 'a'`
    Verb,
    /// `subject ::= iri | BlankNode | collection`
    Subject,
    /// `predicate ::= iri`
    Predicate,
    /// `object ::= iri | BlankNode | collection | blankNodePropertyList | literal`
    Object,
    /// `literal ::= RDFLiteral | NumericLiteral | BooleanLiteral`
    Literal,
    /// `blankNodePropertyList ::= '[' predicateObjectList ']'`
    BlankNodePropertyList,
    /// `collection ::= '(' object* ')'`, or the NIL token
    Collection,
    /// The `object*` body of a collection.
    CollectionItems,
    /// `RDFLiteral ::= String (LANGTAG | '^^' iri)?`
    RdfLiteral,
    /// The optional language tag or datatype.
    LiteralSuffix,
    /// `NumericLiteral ::= INTEGER | DECIMAL | DOUBLE`
    NumericLiteral,
    /// `BooleanLiteral ::= 'true' | 'false'`
    BooleanLiteral,
    /// `String ::=` one of the four quoting forms
    StringLit,
    /// `iri ::= IRIREF | PrefixedName`
    Iri,
    /// `PrefixedName ::= PNAME_LN | PNAME_NS`
    PrefixedName,
    /// `BlankNode ::= BLANK_NODE_LABEL | ANON`
    BlankNode,
}

impl NonTerm {
    /// Number of non-terminals; the other axis of the parse table.
    pub const COUNT: usize = NonTerm::BlankNode as usize + 1;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// A grammar symbol: terminal or non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sym {
    /// A terminal, matched against the lookahead.
    T(K),
    /// A non-terminal, expanded through the table.
    N(NonTerm),
}

/// Identifiers of the semantic actions, one meaning each; several
/// productions may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The single body value is already the result.
    Forward,
    /// Discard the body values, result is unit.
    Unit,
    /// Discard the body values and commit the statement's triples.
    EndStatement,
    /// Bind a prefix to a base-resolved IRI.
    BindPrefix,
    /// Replace the base IRI.
    SetBase,
    /// Emit the statement triples of a subject and its pairs.
    SpoEmit,
    /// Emit the statement triples of a property-list subject.
    BnplSubjectEmit,
    /// Result is an empty pair list.
    EmptyPairs,
    /// Prepend `(verb, objects)` to a pair-list tail.
    PairsCons,
    /// Splice an optional pair after `;` onto a tail.
    PairsSemicolon,
    /// A single `(verb, objects)` pair.
    PairSingle,
    /// Result is an empty term list.
    EmptyTerms,
    /// Prepend an object to a term-list tail.
    TermsCons,
    /// Prepend the object after `,` to a tail.
    TermsComma,
    /// The `a` keyword as `rdf:type`.
    RdfType,
    /// Mint a node for `[ … ]` and emit its triples.
    PropertyListNode,
    /// Expand a collection into first/rest chains.
    CollectionNode,
    /// The NIL token as `rdf:nil`.
    NilNode,
    /// Assemble a literal from a string body and its suffix.
    AssembleLiteral,
    /// Language-tag suffix.
    SuffixLang,
    /// `^^` datatype suffix.
    SuffixDatatype,
    /// No literal suffix.
    SuffixNone,
    /// A numeric token as a typed literal.
    NumericValue,
    /// A boolean token as a typed literal.
    BooleanValue,
    /// Resolve an IRIREF against the base.
    ResolveIriRef,
    /// Expand a prefixed name.
    ExpandPname,
    /// Look up or mint a labeled blank node.
    LabeledBlankNode,
    /// Mint an anonymous blank node.
    AnonBlankNode,
}

/// One row of the grammar artifact.
#[derive(Debug)]
pub struct Production {
    /// The non-terminal this production expands.
    pub lhs: NonTerm,
    /// Body symbols, left to right; empty for ε.
    pub body: &'static [Sym],
    /// Lookaheads that select this production; empty for ε (selected via
    /// [`follow`]).
    pub select: &'static [K],
    /// The semantic action run when the body has been consumed.
    pub action: Action,
}

use self::NonTerm::*;
use self::Sym::{N, T};

const FIRST_DIRECTIVE: &[K] = &[
    K::PrefixDirective,
    K::BaseDirective,
    K::SparqlPrefix,
    K::SparqlBase,
];
const FIRST_SUBJECT: &[K] = &[
    K::IriRef,
    K::PnameLn,
    K::PnameNs,
    K::BlankNodeLabel,
    K::Anon,
    K::OpenParen,
    K::Nil,
];
const FIRST_TRIPLES: &[K] = &[
    K::IriRef,
    K::PnameLn,
    K::PnameNs,
    K::BlankNodeLabel,
    K::Anon,
    K::OpenParen,
    K::Nil,
    K::OpenBracket,
];
const FIRST_STATEMENT: &[K] = &[
    K::PrefixDirective,
    K::BaseDirective,
    K::SparqlPrefix,
    K::SparqlBase,
    K::IriRef,
    K::PnameLn,
    K::PnameNs,
    K::BlankNodeLabel,
    K::Anon,
    K::OpenParen,
    K::Nil,
    K::OpenBracket,
];
const FIRST_DOC: &[K] = &[
    K::PrefixDirective,
    K::BaseDirective,
    K::SparqlPrefix,
    K::SparqlBase,
    K::IriRef,
    K::PnameLn,
    K::PnameNs,
    K::BlankNodeLabel,
    K::Anon,
    K::OpenParen,
    K::Nil,
    K::OpenBracket,
    K::Eof,
];
const FIRST_VERB: &[K] = &[K::IriRef, K::PnameLn, K::PnameNs, K::KeywordA];
const FIRST_IRI: &[K] = &[K::IriRef, K::PnameLn, K::PnameNs];
const FIRST_BLANK_NODE: &[K] = &[K::BlankNodeLabel, K::Anon];
const FIRST_COLLECTION: &[K] = &[K::OpenParen, K::Nil];
const FIRST_STRING: &[K] = &[
    K::StringLiteralQuote,
    K::StringLiteralSingleQuote,
    K::StringLiteralLongQuote,
    K::StringLiteralLongSingleQuote,
];
const FIRST_NUMERIC: &[K] = &[K::Integer, K::Decimal, K::Double];
const FIRST_LITERAL: &[K] = &[
    K::StringLiteralQuote,
    K::StringLiteralSingleQuote,
    K::StringLiteralLongQuote,
    K::StringLiteralLongSingleQuote,
    K::Integer,
    K::Decimal,
    K::Double,
    K::Boolean,
];
const FIRST_OBJECT: &[K] = &[
    K::IriRef,
    K::PnameLn,
    K::PnameNs,
    K::BlankNodeLabel,
    K::Anon,
    K::OpenParen,
    K::Nil,
    K::OpenBracket,
    K::StringLiteralQuote,
    K::StringLiteralSingleQuote,
    K::StringLiteralLongQuote,
    K::StringLiteralLongSingleQuote,
    K::Integer,
    K::Decimal,
    K::Double,
    K::Boolean,
];

/// The grammar artifact: every production of the Turtle grammar after
/// LL(1) factoring.
pub static PRODUCTIONS: [Production; 62] = [
    // 0
    Production {
        lhs: TurtleDoc,
        body: &[N(Statements)],
        select: FIRST_DOC,
        action: Action::Forward,
    },
    // 1
    Production {
        lhs: Statements,
        body: &[N(Statement), N(Statements)],
        select: FIRST_STATEMENT,
        action: Action::Unit,
    },
    // 2
    Production {
        lhs: Statements,
        body: &[],
        select: &[],
        action: Action::Unit,
    },
    // 3
    Production {
        lhs: Statement,
        body: &[N(Directive)],
        select: FIRST_DIRECTIVE,
        action: Action::Forward,
    },
    // 4
    Production {
        lhs: Statement,
        body: &[N(Triples), T(K::Dot)],
        select: FIRST_TRIPLES,
        action: Action::EndStatement,
    },
    // 5
    Production {
        lhs: Directive,
        body: &[N(PrefixDecl)],
        select: &[K::PrefixDirective],
        action: Action::Forward,
    },
    // 6
    Production {
        lhs: Directive,
        body: &[N(BaseDecl)],
        select: &[K::BaseDirective],
        action: Action::Forward,
    },
    // 7
    Production {
        lhs: Directive,
        body: &[N(SparqlPrefixDecl)],
        select: &[K::SparqlPrefix],
        action: Action::Forward,
    },
    // 8
    Production {
        lhs: Directive,
        body: &[N(SparqlBaseDecl)],
        select: &[K::SparqlBase],
        action: Action::Forward,
    },
    // 9
    Production {
        lhs: PrefixDecl,
        body: &[
            T(K::PrefixDirective),
            T(K::PnameNs),
            T(K::IriRef),
            T(K::Dot),
        ],
        select: &[K::PrefixDirective],
        action: Action::BindPrefix,
    },
    // 10
    Production {
        lhs: BaseDecl,
        body: &[T(K::BaseDirective), T(K::IriRef), T(K::Dot)],
        select: &[K::BaseDirective],
        action: Action::SetBase,
    },
    // 11
    Production {
        lhs: SparqlPrefixDecl,
        body: &[T(K::SparqlPrefix), T(K::PnameNs), T(K::IriRef)],
        select: &[K::SparqlPrefix],
        action: Action::BindPrefix,
    },
    // 12
    Production {
        lhs: SparqlBaseDecl,
        body: &[T(K::SparqlBase), T(K::IriRef)],
        select: &[K::SparqlBase],
        action: Action::SetBase,
    },
    // 13
    Production {
        lhs: Triples,
        body: &[N(Subject), N(PredicateObjectList)],
        select: FIRST_SUBJECT,
        action: Action::SpoEmit,
    },
    // 14
    Production {
        lhs: Triples,
        body: &[N(BlankNodePropertyList), N(PredicateObjectListOpt)],
        select: &[K::OpenBracket],
        action: Action::BnplSubjectEmit,
    },
    // 15
    Production {
        lhs: PredicateObjectListOpt,
        body: &[N(PredicateObjectList)],
        select: FIRST_VERB,
        action: Action::Forward,
    },
    // 16
    Production {
        lhs: PredicateObjectListOpt,
        body: &[],
        select: &[],
        action: Action::EmptyPairs,
    },
    // 17
    Production {
        lhs: PredicateObjectList,
        body: &[N(Verb), N(ObjectList), N(PredicateObjectTail)],
        select: FIRST_VERB,
        action: Action::PairsCons,
    },
    // 18
    Production {
        lhs: PredicateObjectTail,
        body: &[
            T(K::Semicolon),
            N(PredicateObjectItemOpt),
            N(PredicateObjectTail),
        ],
        select: &[K::Semicolon],
        action: Action::PairsSemicolon,
    },
    // 19
    Production {
        lhs: PredicateObjectTail,
        body: &[],
        select: &[],
        action: Action::EmptyPairs,
    },
    // 20
    Production {
        lhs: PredicateObjectItemOpt,
        body: &[N(Verb), N(ObjectList)],
        select: FIRST_VERB,
        action: Action::PairSingle,
    },
    // 21
    Production {
        lhs: PredicateObjectItemOpt,
        body: &[],
        select: &[],
        action: Action::EmptyPairs,
    },
    // 22
    Production {
        lhs: ObjectList,
        body: &[N(Object), N(ObjectTail)],
        select: FIRST_OBJECT,
        action: Action::TermsCons,
    },
    // 23
    Production {
        lhs: ObjectTail,
        body: &[T(K::Comma), N(Object), N(ObjectTail)],
        select: &[K::Comma],
        action: Action::TermsComma,
    },
    // 24
    Production {
        lhs: ObjectTail,
        body: &[],
        select: &[],
        action: Action::EmptyTerms,
    },
    // 25
    Production {
        lhs: Verb,
        body: &[N(Predicate)],
        select: FIRST_IRI,
        action: Action::Forward,
    },
    // 26
    Production {
        lhs: Verb,
        body: &[T(K::KeywordA)],
        select: &[K::KeywordA],
        action: Action::RdfType,
    },
    // 27
    Production {
        lhs: Subject,
        body: &[N(Iri)],
        select: FIRST_IRI,
        action: Action::Forward,
    },
    // 28
    Production {
        lhs: Subject,
        body: &[N(BlankNode)],
        select: FIRST_BLANK_NODE,
        action: Action::Forward,
    },
    // 29
    Production {
        lhs: Subject,
        body: &[N(Collection)],
        select: FIRST_COLLECTION,
        action: Action::Forward,
    },
    // 30
    Production {
        lhs: Predicate,
        body: &[N(Iri)],
        select: FIRST_IRI,
        action: Action::Forward,
    },
    // 31
    Production {
        lhs: Object,
        body: &[N(Iri)],
        select: FIRST_IRI,
        action: Action::Forward,
    },
    // 32
    Production {
        lhs: Object,
        body: &[N(BlankNode)],
        select: FIRST_BLANK_NODE,
        action: Action::Forward,
    },
    // 33
    Production {
        lhs: Object,
        body: &[N(Collection)],
        select: FIRST_COLLECTION,
        action: Action::Forward,
    },
    // 34
    Production {
        lhs: Object,
        body: &[N(BlankNodePropertyList)],
        select: &[K::OpenBracket],
        action: Action::Forward,
    },
    // 35
    Production {
        lhs: Object,
        body: &[N(Literal)],
        select: FIRST_LITERAL,
        action: Action::Forward,
    },
    // 36
    Production {
        lhs: Literal,
        body: &[N(RdfLiteral)],
        select: FIRST_STRING,
        action: Action::Forward,
    },
    // 37
    Production {
        lhs: Literal,
        body: &[N(NumericLiteral)],
        select: FIRST_NUMERIC,
        action: Action::Forward,
    },
    // 38
    Production {
        lhs: Literal,
        body: &[N(BooleanLiteral)],
        select: &[K::Boolean],
        action: Action::Forward,
    },
    // 39
    Production {
        lhs: BlankNodePropertyList,
        body: &[
            T(K::OpenBracket),
            N(PredicateObjectList),
            T(K::CloseBracket),
        ],
        select: &[K::OpenBracket],
        action: Action::PropertyListNode,
    },
    // 40
    Production {
        lhs: Collection,
        body: &[T(K::OpenParen), N(CollectionItems), T(K::CloseParen)],
        select: &[K::OpenParen],
        action: Action::CollectionNode,
    },
    // 41
    Production {
        lhs: Collection,
        body: &[T(K::Nil)],
        select: &[K::Nil],
        action: Action::NilNode,
    },
    // 42
    Production {
        lhs: CollectionItems,
        body: &[N(Object), N(CollectionItems)],
        select: FIRST_OBJECT,
        action: Action::TermsCons,
    },
    // 43
    Production {
        lhs: CollectionItems,
        body: &[],
        select: &[],
        action: Action::EmptyTerms,
    },
    // 44
    Production {
        lhs: RdfLiteral,
        body: &[N(StringLit), N(LiteralSuffix)],
        select: FIRST_STRING,
        action: Action::AssembleLiteral,
    },
    // 45
    Production {
        lhs: LiteralSuffix,
        body: &[T(K::Langtag)],
        select: &[K::Langtag],
        action: Action::SuffixLang,
    },
    // 46
    Production {
        lhs: LiteralSuffix,
        body: &[T(K::DatatypeMarker), N(Iri)],
        select: &[K::DatatypeMarker],
        action: Action::SuffixDatatype,
    },
    // 47
    Production {
        lhs: LiteralSuffix,
        body: &[],
        select: &[],
        action: Action::SuffixNone,
    },
    // 48
    Production {
        lhs: NumericLiteral,
        body: &[T(K::Integer)],
        select: &[K::Integer],
        action: Action::NumericValue,
    },
    // 49
    Production {
        lhs: NumericLiteral,
        body: &[T(K::Decimal)],
        select: &[K::Decimal],
        action: Action::NumericValue,
    },
    // 50
    Production {
        lhs: NumericLiteral,
        body: &[T(K::Double)],
        select: &[K::Double],
        action: Action::NumericValue,
    },
    // 51
    Production {
        lhs: BooleanLiteral,
        body: &[T(K::Boolean)],
        select: &[K::Boolean],
        action: Action::BooleanValue,
    },
    // 52
    Production {
        lhs: StringLit,
        body: &[T(K::StringLiteralQuote)],
        select: &[K::StringLiteralQuote],
        action: Action::Forward,
    },
    // 53
    Production {
        lhs: StringLit,
        body: &[T(K::StringLiteralSingleQuote)],
        select: &[K::StringLiteralSingleQuote],
        action: Action::Forward,
    },
    // 54
    Production {
        lhs: StringLit,
        body: &[T(K::StringLiteralLongQuote)],
        select: &[K::StringLiteralLongQuote],
        action: Action::Forward,
    },
    // 55
    Production {
        lhs: StringLit,
        body: &[T(K::StringLiteralLongSingleQuote)],
        select: &[K::StringLiteralLongSingleQuote],
        action: Action::Forward,
    },
    // 56
    Production {
        lhs: Iri,
        body: &[T(K::IriRef)],
        select: &[K::IriRef],
        action: Action::ResolveIriRef,
    },
    // 57
    Production {
        lhs: Iri,
        body: &[N(PrefixedName)],
        select: &[K::PnameLn, K::PnameNs],
        action: Action::Forward,
    },
    // 58
    Production {
        lhs: PrefixedName,
        body: &[T(K::PnameLn)],
        select: &[K::PnameLn],
        action: Action::ExpandPname,
    },
    // 59
    Production {
        lhs: PrefixedName,
        body: &[T(K::PnameNs)],
        select: &[K::PnameNs],
        action: Action::ExpandPname,
    },
    // 60
    Production {
        lhs: BlankNode,
        body: &[T(K::BlankNodeLabel)],
        select: &[K::BlankNodeLabel],
        action: Action::LabeledBlankNode,
    },
    // 61
    Production {
        lhs: BlankNode,
        body: &[T(K::Anon)],
        select: &[K::Anon],
        action: Action::AnonBlankNode,
    },
];

/// FOLLOW set of a nullable non-terminal; empty for the others.
///
/// Consulted when the lookahead selects no production: if the set contains
/// the lookahead the non-terminal derives ε, otherwise the parse fails.
pub fn follow(nt: NonTerm) -> &'static [K] {
    match nt {
        Statements => &[K::Eof],
        PredicateObjectListOpt => &[K::Dot],
        PredicateObjectTail => &[K::Dot, K::CloseBracket],
        PredicateObjectItemOpt => &[K::Semicolon, K::Dot, K::CloseBracket],
        ObjectTail => &[K::Semicolon, K::Dot, K::CloseBracket],
        CollectionItems => &[K::CloseParen],
        LiteralSuffix => &[
            K::IriRef,
            K::PnameLn,
            K::PnameNs,
            K::BlankNodeLabel,
            K::Anon,
            K::OpenParen,
            K::Nil,
            K::OpenBracket,
            K::StringLiteralQuote,
            K::StringLiteralSingleQuote,
            K::StringLiteralLongQuote,
            K::StringLiteralLongSingleQuote,
            K::Integer,
            K::Decimal,
            K::Double,
            K::Boolean,
            K::Comma,
            K::Semicolon,
            K::Dot,
            K::CloseBracket,
            K::CloseParen,
        ],
        _ => &[],
    }
}

/// The assembled `(non-terminal, terminal)` index table.
pub struct ParseTable {
    cells: [[i16; K::COUNT]; NonTerm::COUNT],
    epsilon: [i16; NonTerm::COUNT],
}

lazy_static! {
    /// The table, assembled once at load from [`PRODUCTIONS`].
    pub static ref PARSE_TABLE: ParseTable = ParseTable::assemble();
}

impl ParseTable {
    fn assemble() -> Self {
        let mut cells = [[-1i16; K::COUNT]; NonTerm::COUNT];
        let mut epsilon = [-1i16; NonTerm::COUNT];
        for (idx, prod) in PRODUCTIONS.iter().enumerate() {
            if prod.body.is_empty() {
                assert_eq!(
                    -1,
                    epsilon[prod.lhs.index()],
                    "two empty productions for {:?}",
                    prod.lhs
                );
                epsilon[prod.lhs.index()] = idx as i16;
                continue;
            }
            for kind in prod.select {
                let cell = &mut cells[prod.lhs.index()][kind.index()];
                assert_eq!(
                    -1, *cell,
                    "select conflict at ({:?}, {:?})",
                    prod.lhs, kind
                );
                *cell = idx as i16;
            }
        }
        ParseTable { cells, epsilon }
    }

    /// The production selected by `look` for `nt`, if any.
    pub fn production(&self, nt: NonTerm, look: K) -> Option<&'static Production> {
        match self.cells[nt.index()][look.index()] {
            -1 => None,
            idx => Some(&PRODUCTIONS[idx as usize]),
        }
    }

    /// The ε production of `nt`, if it has one.
    pub fn epsilon(&self, nt: NonTerm) -> Option<&'static Production> {
        match self.epsilon[nt.index()] {
            -1 => None,
            idx => Some(&PRODUCTIONS[idx as usize]),
        }
    }

    /// Every lookahead `nt` accepts; the expected set of a parse error.
    pub fn expected(&self, nt: NonTerm) -> Vec<K> {
        let mut out: Vec<K> = (0..K::COUNT)
            .filter(|t| self.cells[nt.index()][*t] != -1)
            .map(|t| ALL_KINDS[t])
            .collect();
        if self.epsilon(nt).is_some() {
            for kind in follow(nt) {
                if !out.contains(kind) {
                    out.push(*kind);
                }
            }
        }
        out
    }
}

/// All token kinds in index order; used to map table columns back to kinds.
const ALL_KINDS: [K; K::COUNT] = [
    K::IriRef,
    K::PnameNs,
    K::PnameLn,
    K::BlankNodeLabel,
    K::Langtag,
    K::Integer,
    K::Decimal,
    K::Double,
    K::Boolean,
    K::StringLiteralQuote,
    K::StringLiteralSingleQuote,
    K::StringLiteralLongQuote,
    K::StringLiteralLongSingleQuote,
    K::Nil,
    K::Anon,
    K::PrefixDirective,
    K::BaseDirective,
    K::SparqlPrefix,
    K::SparqlBase,
    K::KeywordA,
    K::Dot,
    K::Comma,
    K::Semicolon,
    K::OpenParen,
    K::CloseParen,
    K::OpenBracket,
    K::CloseBracket,
    K::DatatypeMarker,
    K::Eof,
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_assembles_without_conflicts() {
        // assemble() panics on a select conflict
        let _ = &*PARSE_TABLE;
    }

    #[test]
    fn kind_order_matches_indices() {
        for (idx, kind) in ALL_KINDS.iter().enumerate() {
            assert_eq!(idx, kind.index());
        }
    }

    #[test]
    fn every_production_is_reachable() {
        let table = &*PARSE_TABLE;
        for (idx, prod) in PRODUCTIONS.iter().enumerate() {
            let reachable = if prod.body.is_empty() {
                table.epsilon(prod.lhs).map(|p| p as *const Production)
                    == Some(prod as *const Production)
            } else {
                prod.select
                    .iter()
                    .any(|k| table.cells[prod.lhs.index()][k.index()] == idx as i16)
            };
            assert!(reachable, "production {} is unreachable", idx);
        }
    }

    #[test]
    fn triples_splits_on_bracket() {
        let table = &*PARSE_TABLE;
        let plain = table.production(NonTerm::Triples, K::IriRef).unwrap();
        assert_eq!(Action::SpoEmit, plain.action);
        let bnpl = table.production(NonTerm::Triples, K::OpenBracket).unwrap();
        assert_eq!(Action::BnplSubjectEmit, bnpl.action);
        let anon = table.production(NonTerm::Triples, K::Anon).unwrap();
        assert_eq!(Action::SpoEmit, anon.action);
    }

    #[test]
    fn literal_suffix_follow_allows_object_starts() {
        let set = follow(NonTerm::LiteralSuffix);
        assert!(set.contains(&K::Dot));
        assert!(set.contains(&K::CloseParen));
        assert!(set.contains(&K::IriRef));
        assert!(!set.contains(&K::Langtag));
        assert!(!set.contains(&K::Eof));
    }

    #[test]
    fn expected_set_of_a_predicate_position() {
        let expected = PARSE_TABLE.expected(NonTerm::PredicateObjectList);
        assert_eq!(
            vec![K::IriRef, K::PnameNs, K::PnameLn, K::KeywordA],
            expected
        );
    }
}
