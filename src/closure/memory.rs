//! In-memory working memory.
//!
//! A reference `WorkingMemory` for embedded usage and tests: facts and
//! proofs are supplied up front by whatever engine computed them.

use std::collections::{HashMap, HashSet};

use crate::closure::traits::{Explanation, WorkingMemory};
use crate::error::{ProviderError, ValidationError};
use crate::evidence::EvidenceAssertion;
use crate::term::{Term, Triple};
use crate::vocab::RDF_TYPE;

/// Immutable snapshot of asserted facts, their closure and explanations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkingMemory {
    asserted: HashSet<Triple>,
    closure: HashSet<Triple>,
    explanations: HashMap<Triple, HashSet<Explanation>>,
}

impl InMemoryWorkingMemory {
    /// Starts a builder.
    #[must_use]
    pub fn builder() -> InMemoryWorkingMemoryBuilder {
        InMemoryWorkingMemoryBuilder::default()
    }

    /// Number of facts in the closure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.closure.len()
    }

    /// True if the closure is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closure.is_empty()
    }
}

impl WorkingMemory for InMemoryWorkingMemory {
    fn asserted(&self) -> Result<HashSet<Triple>, ProviderError> {
        Ok(self.asserted.clone())
    }

    fn closure(&self) -> Result<HashSet<Triple>, ProviderError> {
        Ok(self.closure.clone())
    }

    fn explain(&self, fact: &Triple) -> Result<HashSet<Explanation>, ProviderError> {
        Ok(self.explanations.get(fact).cloned().unwrap_or_default())
    }
}

/// Builder for [`InMemoryWorkingMemory`].
#[derive(Debug, Default)]
pub struct InMemoryWorkingMemoryBuilder {
    asserted: HashSet<Triple>,
    inferred: HashSet<Triple>,
    explanations: HashMap<Triple, HashSet<Explanation>>,
}

impl InMemoryWorkingMemoryBuilder {
    /// Adds an asserted fact.
    #[must_use]
    pub fn assert(mut self, fact: Triple) -> Self {
        self.asserted.insert(fact);
        self
    }

    /// Asserts `node rdf:type class`.
    #[must_use]
    pub fn assert_type(self, node: impl Into<Term>, class: &str) -> Self {
        self.assert(Triple::new(node, Term::iri(RDF_TYPE), Term::iri(class)))
    }

    /// Adds an inferred fact with one of its explanations.
    ///
    /// Call repeatedly to attach several alternative explanations.
    #[must_use]
    pub fn infer(mut self, fact: Triple, explanation: Explanation) -> Self {
        self.inferred.insert(fact.clone());
        self.explanations.entry(fact).or_default().insert(explanation);
        self
    }

    /// Adds an inferred fact without explanation.
    ///
    /// Only useful for facts the exporter never asks about, e.g. inferred
    /// types or an `owl:Nothing` marker.
    #[must_use]
    pub fn infer_unexplained(mut self, fact: Triple) -> Self {
        self.inferred.insert(fact);
        self
    }

    /// Infers `node rdf:type class` without explanation.
    #[must_use]
    pub fn infer_type(self, node: impl Into<Term>, class: &str) -> Self {
        self.infer_unexplained(Triple::new(node, Term::iri(RDF_TYPE), Term::iri(class)))
    }

    /// Asserts the reified evidence annotating `target`.
    #[must_use]
    pub fn evidence(mut self, target: &Triple, assertion: &EvidenceAssertion) -> Self {
        self.asserted.extend(assertion.reify(target));
        self
    }

    /// Builds the snapshot.
    ///
    /// Every explanation's supporting facts must be part of the closure.
    pub fn build(self) -> Result<InMemoryWorkingMemory, ValidationError> {
        let mut closure = self.asserted.clone();
        closure.extend(self.inferred);

        for (fact, explanations) in &self.explanations {
            for explanation in explanations {
                if explanation.facts.is_empty() {
                    return Err(ValidationError::InvalidField {
                        field: "explanation".to_string(),
                        reason: format!("empty explanation for {fact}"),
                    });
                }
                if let Some(missing) = explanation.facts.iter().find(|f| !closure.contains(*f)) {
                    return Err(ValidationError::InvalidField {
                        field: "explanation".to_string(),
                        reason: format!("supporting fact {missing} of {fact} is not in the closure"),
                    });
                }
            }
        }

        Ok(InMemoryWorkingMemory {
            asserted: self.asserted,
            closure,
            explanations: self.explanations,
        })
    }
}
