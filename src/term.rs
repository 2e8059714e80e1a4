//! Graph terms and triples.
//!
//! Terms are value-equal and hashable so that every grouping in the exporter
//! can key on structural equality.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node or value in the knowledge graph.
///
/// # Examples
///
/// ```
/// use gpad_export::Term;
///
/// let go = Term::iri("http://purl.obolibrary.org/obo/GO_0003674");
/// let lit = Term::literal("PMID:12345");
///
/// assert!(go.is_iri());
/// assert_eq!(lit.as_literal(), Some("PMID:12345"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// Named resource.
    Iri(String),
    /// Blank node label.
    Blank(String),
    /// Plain literal value.
    Literal(String),
}

impl Term {
    /// Creates an IRI term.
    #[must_use]
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    /// Creates a blank node with the given label.
    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        Self::Blank(label.into())
    }

    /// Mints a fresh, globally unique blank node.
    #[must_use]
    pub fn fresh_blank() -> Self {
        Self::Blank(Uuid::new_v4().simple().to_string())
    }

    /// Creates a plain literal.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// True for a named resource.
    pub const fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }

    /// True for a blank node.
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank(_))
    }

    /// True for a literal.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// True for terms that can be the subject of a triple.
    pub const fn is_node(&self) -> bool {
        !self.is_literal()
    }

    /// The IRI, if this is a named resource.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(v) => Some(v),
            _ => None,
        }
    }

    /// The value, if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true if this is an IRI starting with `prefix`.
    #[must_use]
    pub fn has_iri_prefix(&self, prefix: &str) -> bool {
        self.as_iri().is_some_and(|iri| iri.starts_with(prefix))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(v) => write!(f, "<{v}>"),
            Self::Blank(v) => write!(f, "_:{v}"),
            Self::Literal(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<&str> for Term {
    fn from(iri: &str) -> Self {
        Self::iri(iri)
    }
}

/// An immutable `(subject, predicate, object)` edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject.
    pub subject: Term,
    /// Predicate.
    pub predicate: Term,
    /// Object.
    pub object: Term,
}

impl Triple {
    /// Creates a new triple.
    #[must_use]
    pub fn new(subject: impl Into<Term>, predicate: impl Into<Term>, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Returns true if `node` is the subject or the object of this triple.
    #[must_use]
    pub fn touches(&self, node: &Term) -> bool {
        &self.subject == node || &self.object == node
    }

    /// Returns true if the predicate is the IRI `predicate`.
    #[must_use]
    pub fn has_predicate(&self, predicate: &str) -> bool {
        self.predicate.as_iri() == Some(predicate)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
