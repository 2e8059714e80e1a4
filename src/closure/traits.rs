//! The fact closure provider contract.
//!
//! The exporter never reasons itself. It reads a deductively closed snapshot
//! and asks the provider for the minimal proofs of derived facts. Any triple
//! store, forward-chaining engine or incremental Datalog evaluator exposing
//! `explain` can sit behind this trait.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::term::Triple;

/// An inference rule that took part in a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier as reported by the provider.
    pub name: String,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A minimal set of supporting facts (and the rules applied to them) that
/// derives a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Explanation {
    /// Supporting facts.
    pub facts: BTreeSet<Triple>,
    /// Rules applied to them, if the provider reports any.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub rules: BTreeSet<Rule>,
}

impl Explanation {
    /// Creates an explanation from supporting facts.
    #[must_use]
    pub fn new(facts: impl IntoIterator<Item = Triple>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
            rules: BTreeSet::new(),
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.insert(Rule::new(rule));
        self
    }

    /// Explanation for an asserted fact: the fact itself.
    #[must_use]
    pub fn asserted(fact: Triple) -> Self {
        Self::new([fact])
    }
}

/// Read-only view of one model's asserted facts, their closure and proofs.
///
/// Implementations may block on I/O. They must honour:
/// - `asserted() ⊆ closure()`
/// - every `t ∈ closure() \ asserted()` has at least one explanation
/// - `explain` of an asserted, underived fact returns an empty set
pub trait WorkingMemory: Send + Sync {
    /// Asserted facts.
    fn asserted(&self) -> Result<HashSet<Triple>, ProviderError>;

    /// Asserted plus inferred facts.
    fn closure(&self) -> Result<HashSet<Triple>, ProviderError>;

    /// Minimal proofs of `fact`.
    fn explain(&self, fact: &Triple) -> Result<HashSet<Explanation>, ProviderError>;
}

impl<T: WorkingMemory + ?Sized> WorkingMemory for std::sync::Arc<T> {
    fn asserted(&self) -> Result<HashSet<Triple>, ProviderError> {
        (**self).asserted()
    }

    fn closure(&self) -> Result<HashSet<Triple>, ProviderError> {
        (**self).closure()
    }

    fn explain(&self, fact: &Triple) -> Result<HashSet<Explanation>, ProviderError> {
        (**self).explain(fact)
    }
}
