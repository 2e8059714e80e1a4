//! Explanation validation and evidence selection.
//!
//! A candidate is exported only if its fact is derived and at least one of
//! its explanations is grounded: every relational supporting fact carries
//! evidence of its own. The evidence chosen for the record is the evidence
//! local to the target class node, not evidence found elsewhere in the proof.

use std::collections::BTreeSet;

use tracing::debug;

use crate::candidate::CandidateAnnotation;
use crate::closure::{Explanation, ExplanationCache};
use crate::error::ProviderError;
use crate::evidence::{Evidence, EvidenceMap};
use crate::term::Term;
use crate::vocab::RDF_TYPE;

/// Why a candidate yielded no evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The fact is asserted only; nothing to export.
    NotDerived,
    /// Every explanation has an unevidenced relational step.
    Ungrounded,
    /// Grounded, but no evidence touches the class node.
    NoLocalEvidence,
    /// Evidence selected.
    Selected,
}

/// Selected evidence for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceSelection {
    /// Why evidence was or was not found.
    pub outcome: Selection,
    /// One entry per record to emit, sorted.
    pub evidence: Vec<Evidence>,
}

/// True if every non-typing fact of `explanation` has evidence.
#[must_use]
pub fn is_grounded(explanation: &Explanation, evidence: &EvidenceMap) -> bool {
    explanation
        .facts
        .iter()
        .filter(|f| !f.has_predicate(RDF_TYPE))
        .all(|f| evidence.is_evidenced(f))
}

/// Evidence on facts of `explanation` incident to `class_node`.
fn local_evidence<'e>(
    explanation: &Explanation,
    class_node: &Term,
    evidence: &'e EvidenceMap,
) -> impl Iterator<Item = &'e Evidence> + 'e {
    let incident: Vec<_> = explanation
        .facts
        .iter()
        .filter(|f| f.touches(class_node))
        .filter_map(|f| evidence.get(f))
        .collect();
    incident.into_iter().flatten()
}

/// Validates the explanations of `candidate` and selects its evidence.
pub fn select_evidence(
    candidate: &CandidateAnnotation,
    cache: &mut ExplanationCache<'_>,
    evidence: &EvidenceMap,
) -> Result<EvidenceSelection, ProviderError> {
    let fact = candidate.triple();
    let explanations = cache.explain(&fact)?;

    if explanations.is_empty() {
        debug!(fact = %fact, "candidate is not derived; skipping");
        return Ok(EvidenceSelection {
            outcome: Selection::NotDerived,
            evidence: Vec::new(),
        });
    }

    let grounded: Vec<&Explanation> = explanations
        .iter()
        .filter(|e| is_grounded(e, evidence))
        .collect();
    if grounded.is_empty() {
        debug!(fact = %fact, explanations = explanations.len(), "no grounded explanation");
        return Ok(EvidenceSelection {
            outcome: Selection::Ungrounded,
            evidence: Vec::new(),
        });
    }

    let selected: BTreeSet<Evidence> = grounded
        .into_iter()
        .flat_map(|e| local_evidence(e, &candidate.class_node, evidence))
        .cloned()
        .collect();

    let outcome = if selected.is_empty() {
        debug!(fact = %fact, "grounded but no evidence incident to the class node");
        Selection::NoLocalEvidence
    } else {
        Selection::Selected
    };

    Ok(EvidenceSelection {
        outcome,
        evidence: selected.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::extract;
    use crate::closure::{FactIndex, InMemoryWorkingMemory, InMemoryWorkingMemoryBuilder};
    use crate::curie::CurieMap;
    use crate::evidence::{resolve, EvidenceAssertion, ModelProvenance};
    use crate::term::Triple;
    use crate::vocab::{ENABLED_BY, ENABLES, PART_OF};

    const IDA: &str = "http://purl.obolibrary.org/obo/ECO_0000314";
    const KINASE: &str = "http://purl.obolibrary.org/obo/GO_0004672";
    const GP: &str = "http://identifiers.org/uniprot/P1";

    struct Fixture {
        mf: Term,
        gp: Term,
        enabled_by: Triple,
        enables: Triple,
    }

    fn fixture() -> (Fixture, InMemoryWorkingMemoryBuilder) {
        let mf = Term::iri("http://model.geneontology.org/m/mf");
        let gp = Term::iri("http://model.geneontology.org/m/gp");
        let enabled_by = Triple::new(mf.clone(), Term::iri(ENABLED_BY), gp.clone());
        let enables = Triple::new(gp.clone(), Term::iri(ENABLES), mf.clone());
        let builder = InMemoryWorkingMemory::builder()
            .assert_type(mf.clone(), KINASE)
            .assert_type(gp.clone(), GP)
            .assert(enabled_by.clone());
        (
            Fixture {
                mf,
                gp,
                enabled_by,
                enables,
            },
            builder,
        )
    }

    fn run(wm: &InMemoryWorkingMemory) -> EvidenceSelection {
        let index = FactIndex::load(wm).unwrap();
        let model = ModelProvenance::read(&index, "http://model.geneontology.org/m", &CurieMap::default());
        let evidence = resolve(&index, &model, "GO_Noctua").map;
        let relations = [ENABLES.to_string()].into_iter().collect();
        let candidates = extract(&index, &relations);
        let mut cache = ExplanationCache::new(wm);
        select_evidence(&candidates.annotations[0], &mut cache, &evidence).unwrap()
    }

    #[test]
    fn asserted_candidate_is_not_derived() {
        let (f, builder) = fixture();
        let wm = builder
            .assert(f.enables.clone())
            .evidence(&f.enables, &EvidenceAssertion::new(IDA, "PMID:1", "2020-01-01"))
            .build()
            .unwrap();
        let selection = run(&wm);
        assert_eq!(selection.outcome, Selection::NotDerived);
        assert!(selection.evidence.is_empty());
    }

    #[test]
    fn unevidenced_step_rejects_explanation() {
        let (f, builder) = fixture();
        let wm = builder
            .infer(f.enables.clone(), Explanation::new([f.enabled_by.clone()]))
            .build()
            .unwrap();
        assert_eq!(run(&wm).outcome, Selection::Ungrounded);
    }

    #[test]
    fn one_record_per_evidence_entry() {
        let (f, builder) = fixture();
        let wm = builder
            .evidence(&f.enabled_by, &EvidenceAssertion::new(IDA, "PMID:1", "2020-01-01"))
            .evidence(&f.enabled_by, &EvidenceAssertion::new(IDA, "PMID:2", "2020-01-01"))
            .infer(f.enables.clone(), Explanation::new([f.enabled_by.clone()]))
            .build()
            .unwrap();
        let selection = run(&wm);
        assert_eq!(selection.outcome, Selection::Selected);
        let refs: Vec<&str> = selection.evidence.iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["PMID:1", "PMID:2"]);
    }

    #[test]
    fn evidence_away_from_class_node_is_not_selected() {
        let (f, builder) = fixture();
        let bp = Term::iri("http://model.geneontology.org/m/bp");
        let part_of = Triple::new(f.gp.clone(), Term::iri(PART_OF), bp.clone());
        let wm = builder
            .assert_type(bp, "http://purl.obolibrary.org/obo/GO_0006468")
            .assert(part_of.clone())
            .evidence(&f.enabled_by, &EvidenceAssertion::new(IDA, "PMID:1", "2020-01-01"))
            .evidence(&part_of, &EvidenceAssertion::new(IDA, "PMID:99", "2020-01-01"))
            .infer(
                f.enables.clone(),
                Explanation::new([f.enabled_by.clone(), part_of]),
            )
            .build()
            .unwrap();
        let selection = run(&wm);
        assert_eq!(selection.evidence.len(), 1);
        assert_eq!(selection.evidence[0].reference, "PMID:1");
    }

    #[test]
    fn typing_facts_need_no_evidence() {
        let (f, _builder) = fixture();
        let typing = Triple::new(f.mf.clone(), Term::iri(RDF_TYPE), Term::iri(KINASE));
        let explanation = Explanation::new([f.enabled_by.clone(), typing]);
        let mut map = EvidenceMap::new();
        assert!(!is_grounded(&explanation, &map));
        map.insert(
            f.enabled_by.clone(),
            Evidence {
                evidence_type: IDA.to_string(),
                reference: "PMID:1".to_string(),
                with_from: None,
                date: "2020-01-01".to_string(),
                assigned_by: "GO_Noctua".to_string(),
                annotations: BTreeSet::new(),
            },
        );
        assert!(is_grounded(&explanation, &map));
    }
}
