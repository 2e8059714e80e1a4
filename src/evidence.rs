//! Evidence records and the evidence resolver.
//!
//! Evidence is attached to facts through reified axiom annotations:
//!
//! ```text
//! _:ax owl:annotatedSource    s
//! _:ax owl:annotatedProperty  p
//! _:ax owl:annotatedTarget    o
//! _:ax lego:evidence          ev
//! ev   rdf:type               ECO:...
//! ev   dc:source              "PMID:..."
//! ev   dc:date                "2019-03-12"
//! ev   lego:evidence-with     "UniProtKB:..."     (optional)
//! ev   dc:contributor         "orcid:..."         (optional, repeatable)
//! ev   pav:providedBy         "MGI"               (optional)
//! ```
//!
//! An axiom node without `lego:evidence` links is read as its own evidence
//! node. Evidence missing a reference, type or date is skipped and logged.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::closure::FactIndex;
use crate::curie::CurieMap;
use crate::error::ValidationError;
use crate::term::{Term, Triple};
use crate::vocab::{
    DC_CONTRIBUTOR, DC_DATE, DC_SOURCE, EVIDENCE, EVIDENCE_WITH, MODEL_STATE,
    OWL_ANNOTATED_PROPERTY, OWL_ANNOTATED_SOURCE, OWL_ANNOTATED_TARGET, OWL_AXIOM, PROVIDED_BY,
    RDF_TYPE,
};

/// Annotation pair key for evidence contributors.
pub const CONTRIBUTOR_KEY: &str = "contributor";
/// Annotation pair key for the model state.
pub const MODEL_STATE_KEY: &str = "model-state";
/// Annotation pair key for the compact model id.
pub const MODEL_ID_KEY: &str = "noctua-model-id";

/// One piece of evidence backing a fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Evidence {
    /// Evidence class IRI (ECO).
    pub evidence_type: String,
    /// Reference, e.g. `PMID:12345`.
    pub reference: String,
    /// With/from values joined by `|`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_from: Option<String>,
    /// Modification date as written in the model.
    pub date: String,
    /// Providing group after model and default fallback.
    pub assigned_by: String,
    /// Contributor and model-state key/value pairs.
    #[serde(default)]
    pub annotations: BTreeSet<(String, String)>,
}

/// Model-level provenance, read once per export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProvenance {
    /// Model IRI as given by the caller.
    pub model_iri: String,
    /// Compact model id used in the `noctua-model-id` annotation.
    pub model_id: String,
    /// Model curation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Model-level providing group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_by: Option<String>,
}

impl ModelProvenance {
    /// Reads state and provider annotations on the model node.
    #[must_use]
    pub fn read(index: &FactIndex, model_iri: &str, curies: &CurieMap) -> Self {
        let model = Term::iri(model_iri);
        Self {
            model_iri: model_iri.to_string(),
            model_id: curies.compact(model_iri),
            state: index.literal(&model, MODEL_STATE),
            provided_by: index.literal(&model, PROVIDED_BY),
        }
    }
}

/// Multimap from annotated fact to the evidence backing it.
#[derive(Debug, Clone, Default)]
pub struct EvidenceMap {
    by_fact: HashMap<Triple, HashSet<Evidence>>,
}

impl EvidenceMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `evidence` for `fact`.
    pub fn insert(&mut self, fact: Triple, evidence: Evidence) {
        self.by_fact.entry(fact).or_default().insert(evidence);
    }

    /// Evidence for `fact`, if any.
    #[must_use]
    pub fn get(&self, fact: &Triple) -> Option<&HashSet<Evidence>> {
        self.by_fact.get(fact)
    }

    /// True if at least one evidence entry backs `fact`.
    #[must_use]
    pub fn is_evidenced(&self, fact: &Triple) -> bool {
        self.by_fact.get(fact).is_some_and(|set| !set.is_empty())
    }

    /// True if `fact` is backed by evidence with `reference`.
    #[must_use]
    pub fn has_reference(&self, fact: &Triple, reference: &str) -> bool {
        self.by_fact
            .get(fact)
            .is_some_and(|set| set.iter().any(|e| e.reference == reference))
    }

    /// Number of annotated facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_fact.len()
    }

    /// True if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_fact.is_empty()
    }
}

/// Outcome of resolving evidence for one snapshot.
#[derive(Debug, Default)]
pub struct ResolvedEvidence {
    /// Evidence per annotated fact.
    pub map: EvidenceMap,
    /// Evidence nodes skipped for missing required fields.
    pub skipped: usize,
}

/// Reads every reified evidence assertion in the closure.
///
/// Assigned-by precedence: evidence/axiom value, then the model's
/// `providedBy`, then `default_assigned_by`.
#[must_use]
pub fn resolve(
    index: &FactIndex,
    model: &ModelProvenance,
    default_assigned_by: &str,
) -> ResolvedEvidence {
    let mut resolved = ResolvedEvidence::default();

    let mut axioms: Vec<&Term> = index
        .with_predicate(OWL_ANNOTATED_SOURCE)
        .iter()
        .map(|t| &t.subject)
        .collect();
    axioms.dedup();

    for axiom in axioms {
        let Some(target) = annotated_fact(index, axiom) else {
            debug!(axiom = %axiom, "axiom annotation without complete source/property/target");
            continue;
        };

        let linked: Vec<&Term> = index.objects(axiom, EVIDENCE).filter(|o| o.is_node()).collect();
        let carriers = if linked.is_empty() { vec![axiom] } else { linked };

        for carrier in carriers {
            match read_evidence(index, axiom, carrier, model, default_assigned_by) {
                Ok(entries) => {
                    for evidence in entries {
                        resolved.map.insert(target.clone(), evidence);
                    }
                }
                Err(err) => {
                    warn!(evidence = %carrier, fact = %target, error = %err, "skipping malformed evidence");
                    resolved.skipped += 1;
                }
            }
        }
    }

    resolved
}

fn annotated_fact(index: &FactIndex, axiom: &Term) -> Option<Triple> {
    let subject = index.objects(axiom, OWL_ANNOTATED_SOURCE).next()?;
    let predicate = index.objects(axiom, OWL_ANNOTATED_PROPERTY).next()?;
    let object = index.objects(axiom, OWL_ANNOTATED_TARGET).next()?;
    Some(Triple::new(subject.clone(), predicate.clone(), object.clone()))
}

/// Reads one evidence node; one entry per (evidence type, reference) pair.
fn read_evidence(
    index: &FactIndex,
    axiom: &Term,
    carrier: &Term,
    model: &ModelProvenance,
    default_assigned_by: &str,
) -> Result<Vec<Evidence>, ValidationError> {
    let types: BTreeSet<String> = index
        .direct_types(carrier)
        .into_iter()
        .filter(|t| t != OWL_AXIOM)
        .collect();
    if types.is_empty() {
        return Err(ValidationError::missing("evidence type"));
    }

    let references = index.literals(carrier, DC_SOURCE);
    if references.is_empty() {
        return Err(ValidationError::missing("reference"));
    }

    let date = index
        .literal(carrier, DC_DATE)
        .or_else(|| index.literal(axiom, DC_DATE))
        .ok_or_else(|| ValidationError::missing("date"))?;

    let with_values = index.literals(carrier, EVIDENCE_WITH);
    let with_from = if with_values.is_empty() {
        None
    } else {
        Some(with_values.into_iter().collect::<Vec<_>>().join("|"))
    };

    let assigned_by = index
        .literal(carrier, PROVIDED_BY)
        .or_else(|| index.literal(axiom, PROVIDED_BY))
        .or_else(|| model.provided_by.clone())
        .unwrap_or_else(|| default_assigned_by.to_string());

    let mut contributors = index.literals(carrier, DC_CONTRIBUTOR);
    if contributors.is_empty() {
        contributors = index.literals(axiom, DC_CONTRIBUTOR);
    }

    let mut annotations: BTreeSet<(String, String)> = contributors
        .into_iter()
        .map(|c| (CONTRIBUTOR_KEY.to_string(), c))
        .collect();
    if let Some(state) = &model.state {
        annotations.insert((MODEL_STATE_KEY.to_string(), state.clone()));
    }
    annotations.insert((MODEL_ID_KEY.to_string(), model.model_id.clone()));

    let mut entries = Vec::with_capacity(types.len() * references.len());
    for evidence_type in &types {
        for reference in &references {
            entries.push(Evidence {
                evidence_type: evidence_type.clone(),
                reference: reference.clone(),
                with_from: with_from.clone(),
                date: date.clone(),
                assigned_by: assigned_by.clone(),
                annotations: annotations.clone(),
            });
        }
    }
    Ok(entries)
}

/// Evidence to be reified onto a fact; the inverse of [`resolve`].
///
/// Used by model builders and tests to produce the triple shape the resolver
/// reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvidenceAssertion {
    /// ECO class IRI.
    pub evidence_type: Option<String>,
    /// Reference literal.
    pub reference: Option<String>,
    /// With/from value.
    pub with_from: Option<String>,
    /// Date literal as written in the model.
    pub date: Option<String>,
    /// Contributor literals.
    #[serde(default)]
    pub contributors: Vec<String>,
    /// Providing group.
    pub provided_by: Option<String>,
}

impl EvidenceAssertion {
    /// Evidence with the three required fields.
    #[must_use]
    pub fn new(evidence_type: impl Into<String>, reference: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            evidence_type: Some(evidence_type.into()),
            reference: Some(reference.into()),
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Sets the with/from value.
    #[must_use]
    pub fn with_from(mut self, value: impl Into<String>) -> Self {
        self.with_from = Some(value.into());
        self
    }

    /// Adds a contributor.
    #[must_use]
    pub fn contributor(mut self, value: impl Into<String>) -> Self {
        self.contributors.push(value.into());
        self
    }

    /// Sets the providing group.
    #[must_use]
    pub fn provided_by(mut self, value: impl Into<String>) -> Self {
        self.provided_by = Some(value.into());
        self
    }

    /// Triples annotating `target` with this evidence, using fresh blank nodes.
    #[must_use]
    pub fn reify(&self, target: &Triple) -> Vec<Triple> {
        let axiom = Term::fresh_blank();
        let evidence = Term::fresh_blank();
        let rdf_type = Term::iri(RDF_TYPE);

        let mut triples = vec![
            Triple::new(axiom.clone(), rdf_type.clone(), Term::iri(OWL_AXIOM)),
            Triple::new(axiom.clone(), Term::iri(OWL_ANNOTATED_SOURCE), target.subject.clone()),
            Triple::new(axiom.clone(), Term::iri(OWL_ANNOTATED_PROPERTY), target.predicate.clone()),
            Triple::new(axiom.clone(), Term::iri(OWL_ANNOTATED_TARGET), target.object.clone()),
            Triple::new(axiom, Term::iri(EVIDENCE), evidence.clone()),
        ];

        if let Some(evidence_type) = &self.evidence_type {
            triples.push(Triple::new(evidence.clone(), rdf_type, Term::iri(evidence_type.as_str())));
        }
        let literals = [
            (DC_SOURCE, &self.reference),
            (DC_DATE, &self.date),
            (EVIDENCE_WITH, &self.with_from),
            (PROVIDED_BY, &self.provided_by),
        ];
        for (predicate, value) in literals {
            if let Some(value) = value {
                triples.push(Triple::new(evidence.clone(), Term::iri(predicate), Term::literal(value.as_str())));
            }
        }
        for contributor in &self.contributors {
            triples.push(Triple::new(
                evidence.clone(),
                Term::iri(DC_CONTRIBUTOR),
                Term::literal(contributor.as_str()),
            ));
        }
        triples
    }
}
