//! Per-export index over a working memory snapshot.
//!
//! Built once per export call and read-only afterwards. The explanation cache
//! memoizes provider calls so a fact shared by many candidates is explained
//! once.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::closure::traits::{Explanation, WorkingMemory};
use crate::error::ProviderError;
use crate::term::{Term, Triple};
use crate::vocab::{is_structural_type, OWL_NOTHING, RDF_TYPE};

/// Lookup structures over one snapshot.
#[derive(Debug, Default)]
pub struct FactIndex {
    asserted: HashSet<Triple>,
    closure: HashSet<Triple>,
    by_subject: HashMap<Term, Vec<Triple>>,
    by_predicate: HashMap<String, Vec<Triple>>,
}

impl FactIndex {
    /// Indexes a snapshot. Asserted facts missing from the closure are added to it.
    #[must_use]
    pub fn new(asserted: HashSet<Triple>, mut closure: HashSet<Triple>) -> Self {
        closure.extend(asserted.iter().cloned());

        let mut by_subject: HashMap<Term, Vec<Triple>> = HashMap::new();
        let mut by_predicate: HashMap<String, Vec<Triple>> = HashMap::new();
        for triple in &closure {
            by_subject
                .entry(triple.subject.clone())
                .or_default()
                .push(triple.clone());
            if let Some(p) = triple.predicate.as_iri() {
                by_predicate.entry(p.to_string()).or_default().push(triple.clone());
            }
        }

        // Sorted buckets keep every downstream iteration deterministic.
        for bucket in by_subject.values_mut().chain(by_predicate.values_mut()) {
            bucket.sort();
        }

        Self {
            asserted,
            closure,
            by_subject,
            by_predicate,
        }
    }

    /// Reads and indexes the snapshot of `memory`.
    pub fn load(memory: &dyn WorkingMemory) -> Result<Self, ProviderError> {
        let asserted = memory.asserted()?;
        let closure = memory.closure()?;
        Ok(Self::new(asserted, closure))
    }

    /// True if `fact` was asserted rather than inferred.
    #[must_use]
    pub fn is_asserted(&self, fact: &Triple) -> bool {
        self.asserted.contains(fact)
    }

    /// True if `fact` is in the closure.
    #[must_use]
    pub fn contains(&self, fact: &Triple) -> bool {
        self.closure.contains(fact)
    }

    /// Number of facts in the closure.
    #[must_use]
    pub fn closure_len(&self) -> usize {
        self.closure.len()
    }

    /// Closure facts with `subject`.
    pub fn about(&self, subject: &Term) -> &[Triple] {
        self.by_subject.get(subject).map_or(&[], Vec::as_slice)
    }

    /// Closure facts with predicate `predicate`.
    pub fn with_predicate(&self, predicate: &str) -> &[Triple] {
        self.by_predicate.get(predicate).map_or(&[], Vec::as_slice)
    }

    /// Objects of `(subject, predicate, ?)` in the closure.
    pub fn objects<'a>(&'a self, subject: &Term, predicate: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.about(subject)
            .iter()
            .filter(move |t| t.has_predicate(predicate))
            .map(|t| &t.object)
    }

    /// First literal object of `(subject, predicate, ?)`, in term order.
    #[must_use]
    pub fn literal(&self, subject: &Term, predicate: &str) -> Option<String> {
        self.objects(subject, predicate)
            .find_map(Term::as_literal)
            .map(str::to_string)
    }

    /// All literal objects of `(subject, predicate, ?)`.
    #[must_use]
    pub fn literals(&self, subject: &Term, predicate: &str) -> BTreeSet<String> {
        self.objects(subject, predicate)
            .filter_map(Term::as_literal)
            .map(str::to_string)
            .collect()
    }

    /// Asserted named classes of `node`, excluding structural OWL types.
    #[must_use]
    pub fn direct_types(&self, node: &Term) -> BTreeSet<String> {
        self.about(node)
            .iter()
            .filter(|t| t.has_predicate(RDF_TYPE) && self.asserted.contains(*t))
            .filter_map(|t| t.object.as_iri())
            .filter(|iri| !is_structural_type(iri))
            .map(str::to_string)
            .collect()
    }

    /// All named classes of `node` in the closure.
    #[must_use]
    pub fn inferred_types(&self, node: &Term) -> BTreeSet<String> {
        self.objects(node, RDF_TYPE)
            .filter_map(Term::as_iri)
            .map(str::to_string)
            .collect()
    }

    /// Anonymous class expressions `node` is an instance of.
    pub fn anonymous_types<'a>(&'a self, node: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.objects(node, RDF_TYPE).filter(|o| o.is_blank())
    }

    /// Nodes the closure types as `owl:Nothing`.
    #[must_use]
    pub fn unsatisfiable(&self) -> Vec<Term> {
        let mut nodes: Vec<Term> = self
            .with_predicate(RDF_TYPE)
            .iter()
            .filter(|t| t.object.as_iri() == Some(OWL_NOTHING))
            .map(|t| t.subject.clone())
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }
}

/// Memoizing front for `WorkingMemory::explain`.
pub struct ExplanationCache<'a> {
    memory: &'a dyn WorkingMemory,
    cache: HashMap<Triple, Arc<HashSet<Explanation>>>,
    provider_calls: usize,
}

impl<'a> ExplanationCache<'a> {
    /// Empty cache over `memory`.
    #[must_use]
    pub fn new(memory: &'a dyn WorkingMemory) -> Self {
        Self {
            memory,
            cache: HashMap::new(),
            provider_calls: 0,
        }
    }

    /// Explanations of `fact`; provider failures propagate.
    pub fn explain(&mut self, fact: &Triple) -> Result<Arc<HashSet<Explanation>>, ProviderError> {
        if let Some(hit) = self.cache.get(fact) {
            return Ok(Arc::clone(hit));
        }
        self.provider_calls += 1;
        let explanations = Arc::new(self.memory.explain(fact)?);
        self.cache.insert(fact.clone(), Arc::clone(&explanations));
        Ok(explanations)
    }

    /// Number of distinct facts sent to the provider.
    #[must_use]
    pub const fn provider_calls(&self) -> usize {
        self.provider_calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::memory::InMemoryWorkingMemory;
    use crate::vocab::{MOLECULAR_FUNCTION, OWL_NAMED_INDIVIDUAL};

    #[test]
    fn direct_types_skip_inferred_and_structural() {
        let node = Term::iri("http://x/mf1");
        let wm = InMemoryWorkingMemory::builder()
            .assert_type(node.clone(), "http://purl.obolibrary.org/obo/GO_0004672")
            .assert_type(node.clone(), OWL_NAMED_INDIVIDUAL)
            .infer_type(node.clone(), MOLECULAR_FUNCTION)
            .build()
            .unwrap();
        let index = FactIndex::load(&wm).unwrap();

        let direct = index.direct_types(&node);
        assert_eq!(direct.len(), 1);
        assert!(direct.contains("http://purl.obolibrary.org/obo/GO_0004672"));
        assert!(index.inferred_types(&node).contains(MOLECULAR_FUNCTION));
    }

    #[test]
    fn unsatisfiable_nodes_are_reported_once() {
        let wm = InMemoryWorkingMemory::builder()
            .infer_type("http://x/bad", OWL_NOTHING)
            .assert_type("http://x/bad", "http://x/C")
            .build()
            .unwrap();
        let index = FactIndex::load(&wm).unwrap();
        assert_eq!(index.unsatisfiable(), vec![Term::iri("http://x/bad")]);
    }

    #[test]
    fn explanation_cache_calls_provider_once_per_fact() {
        let base = Triple::new("http://x/a", "http://x/p", "http://x/b");
        let derived = Triple::new("http://x/b", "http://x/q", "http://x/a");
        let wm = InMemoryWorkingMemory::builder()
            .assert(base.clone())
            .infer(derived.clone(), Explanation::new([base]))
            .build()
            .unwrap();

        let mut cache = ExplanationCache::new(&wm);
        assert_eq!(cache.explain(&derived).unwrap().len(), 1);
        assert_eq!(cache.explain(&derived).unwrap().len(), 1);
        assert_eq!(cache.provider_calls(), 1);
    }
}
