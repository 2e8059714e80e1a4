//! Extension and interacting-taxon resolution.
//!
//! An extension edge leaving the class node is kept on a record only when it
//! is corroborated by the record's own reference: some explanation of the
//! edge has every supporting fact backed by evidence citing that reference.

use std::collections::BTreeSet;

use tracing::debug;

use crate::candidate::{CandidateAnnotation, CandidateExtension};
use crate::closure::{Explanation, ExplanationCache, FactIndex};
use crate::config::Namespaces;
use crate::error::ProviderError;
use crate::evidence::EvidenceMap;
use crate::record::Extension;
use crate::vocab::HAS_INPUT;

/// Extensions accepted for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedExtensions {
    /// Accepted extensions.
    pub extensions: BTreeSet<Extension>,
    /// Taxon class taken from a `has_input` filler.
    pub interacting_taxon: Option<String>,
    /// Candidates dropped for lack of same-source corroboration.
    pub rejected: usize,
}

/// True if every supporting fact of `explanation` cites `reference`,
/// typing facts included.
#[must_use]
pub fn corroborates(explanation: &Explanation, reference: &str, evidence: &EvidenceMap) -> bool {
    explanation
        .facts
        .iter()
        .all(|f| evidence.has_reference(f, reference))
}

/// Resolves the extensions of one record with reference `reference`.
///
/// `candidates` must be the extension candidates leaving the record's class
/// node, sorted; the first taxon filler in that order wins.
pub fn resolve_extensions(
    annotation: &CandidateAnnotation,
    reference: &str,
    candidates: &[CandidateExtension],
    index: &FactIndex,
    cache: &mut ExplanationCache<'_>,
    evidence: &EvidenceMap,
    namespaces: &Namespaces,
) -> Result<ResolvedExtensions, ProviderError> {
    let mut resolved = ResolvedExtensions::default();

    for candidate in candidates {
        if candidate.target != annotation.class_node || candidate.filler == annotation.gene_product {
            continue;
        }

        let fact = candidate.triple();
        let mut explanations: Vec<Explanation> = cache.explain(&fact)?.iter().cloned().collect();
        if explanations.is_empty() && index.is_asserted(&fact) {
            explanations.push(Explanation::asserted(fact.clone()));
        }

        if !explanations
            .iter()
            .any(|e| corroborates(e, reference, evidence))
        {
            debug!(extension = %fact, reference, "extension not corroborated by the record's reference");
            resolved.rejected += 1;
            continue;
        }

        if candidate.relation == HAS_INPUT && namespaces.is_taxon(&candidate.filler_type) {
            if resolved.interacting_taxon.is_none() {
                resolved.interacting_taxon = Some(candidate.filler_type.clone());
            }
            continue;
        }

        resolved
            .extensions
            .insert(Extension::new(candidate.relation.as_str(), candidate.filler_type.as_str()));
    }

    if resolved
        .extensions
        .iter()
        .any(|e| namespaces.is_preferred_anatomy(&e.filler))
    {
        resolved
            .extensions
            .retain(|e| !namespaces.is_suppressed_anatomy(&e.filler));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::extract;
    use crate::closure::{InMemoryWorkingMemory, InMemoryWorkingMemoryBuilder};
    use crate::curie::CurieMap;
    use crate::evidence::{resolve, EvidenceAssertion, ModelProvenance};
    use crate::term::{Term, Triple};
    use crate::vocab::{ENABLED_BY, ENABLES, OCCURS_IN, PART_OF, RDF_TYPE};

    const IDA: &str = "http://purl.obolibrary.org/obo/ECO_0000314";
    const KINASE: &str = "http://purl.obolibrary.org/obo/GO_0004672";
    const GP: &str = "http://identifiers.org/uniprot/P1";
    const HUMAN: &str = "http://purl.obolibrary.org/obo/NCBITaxon_9606";
    const MOUSE: &str = "http://purl.obolibrary.org/obo/NCBITaxon_10090";
    const EMAPA_LIVER: &str = "http://purl.obolibrary.org/obo/EMAPA_17549";
    const UBERON_LIVER: &str = "http://purl.obolibrary.org/obo/UBERON_0002107";
    const CELL: &str = "http://purl.obolibrary.org/obo/CL_0000182";

    fn node(local: &str) -> Term {
        Term::iri(format!("http://model.geneontology.org/m/{local}"))
    }

    /// Builder with a derived `gp enables mf` backed by PMID:1, plus asserted
    /// edges from `mf` as given by `(relation, filler local name, filler class, reference)`.
    fn activity(edges: &[(&str, &str, &str, &str)]) -> InMemoryWorkingMemoryBuilder {
        let mf = node("mf");
        let gp = node("gp");
        let enabled_by = Triple::new(mf.clone(), Term::iri(ENABLED_BY), gp.clone());
        let mut builder = InMemoryWorkingMemory::builder()
            .assert_type(mf.clone(), KINASE)
            .assert_type(gp.clone(), GP)
            .assert(enabled_by.clone())
            .evidence(&enabled_by, &EvidenceAssertion::new(IDA, "PMID:1", "2020-01-01"))
            .infer(
                Triple::new(gp, Term::iri(ENABLES), mf.clone()),
                Explanation::new([enabled_by]),
            );
        for (relation, filler, class, reference) in edges {
            let edge = Triple::new(mf.clone(), Term::iri(*relation), node(filler));
            builder = builder
                .assert_type(node(filler), class)
                .assert(edge.clone())
                .evidence(&edge, &EvidenceAssertion::new(IDA, *reference, "2020-01-01"));
        }
        builder
    }

    fn resolve_for(edges: &[(&str, &str, &str, &str)]) -> ResolvedExtensions {
        resolve_in(&activity(edges).build().unwrap())
    }

    /// Extensions of the `enables` record with reference PMID:1.
    fn resolve_in(wm: &InMemoryWorkingMemory) -> ResolvedExtensions {
        let index = FactIndex::load(wm).unwrap();
        let model = ModelProvenance::read(&index, "http://model.geneontology.org/m", &CurieMap::default());
        let evidence = resolve(&index, &model, "GO_Noctua").map;
        let relations = [ENABLES.to_string()].into_iter().collect();
        let candidates = extract(&index, &relations);
        let annotation = &candidates.annotations[0];
        let mut cache = ExplanationCache::new(wm);
        resolve_extensions(
            annotation,
            "PMID:1",
            candidates.extensions_of(&annotation.class_node),
            &index,
            &mut cache,
            &evidence,
            &Namespaces::default(),
        )
        .unwrap()
    }

    #[test]
    fn same_reference_extension_is_accepted() {
        let resolved = resolve_for(&[(OCCURS_IN, "cell", "http://purl.obolibrary.org/obo/CL_0000182", "PMID:1")]);
        assert_eq!(resolved.extensions.len(), 1);
        let ext = resolved.extensions.iter().next().unwrap();
        assert_eq!(ext.relation, OCCURS_IN);
        assert_eq!(ext.filler, "http://purl.obolibrary.org/obo/CL_0000182");
    }

    #[test]
    fn other_reference_extension_is_rejected() {
        let resolved = resolve_for(&[(OCCURS_IN, "cell", "http://purl.obolibrary.org/obo/CL_0000182", "PMID:2")]);
        assert!(resolved.extensions.is_empty());
        assert_eq!(resolved.rejected, 1);
    }

    #[test]
    fn self_loop_to_gene_product_is_ignored() {
        // enabled_by points back at the gene product and must never become an extension.
        let resolved = resolve_for(&[]);
        assert!(resolved.extensions.is_empty());
        assert_eq!(resolved.rejected, 0);
    }

    #[test]
    fn first_taxon_input_becomes_interacting_taxon() {
        let resolved = resolve_for(&[
            (HAS_INPUT, "human", HUMAN, "PMID:1"),
            (HAS_INPUT, "mouse", MOUSE, "PMID:1"),
        ]);
        assert!(resolved.extensions.is_empty());
        // Candidates are sorted by filler node, so the "human" node comes first.
        assert_eq!(resolved.interacting_taxon.as_deref(), Some(HUMAN));
    }

    #[test]
    fn emapa_filler_suppresses_uberon() {
        let resolved = resolve_for(&[
            (OCCURS_IN, "emapa", EMAPA_LIVER, "PMID:1"),
            (OCCURS_IN, "uberon", UBERON_LIVER, "PMID:1"),
        ]);
        let fillers: Vec<&str> = resolved.extensions.iter().map(|e| e.filler.as_str()).collect();
        assert_eq!(fillers, vec![EMAPA_LIVER]);
    }

    #[test]
    fn uberon_alone_is_kept() {
        let resolved = resolve_for(&[(OCCURS_IN, "uberon", UBERON_LIVER, "PMID:1")]);
        assert_eq!(resolved.extensions.len(), 1);
    }

    #[test]
    fn derived_extension_with_unevidenced_typing_step_is_rejected() {
        let mf = node("mf");
        let cell = node("cell");
        let part_of = Triple::new(mf.clone(), Term::iri(PART_OF), cell.clone());
        let cell_type = Triple::new(cell.clone(), Term::iri(RDF_TYPE), Term::iri(CELL));
        let wm = activity(&[(PART_OF, "cell", CELL, "PMID:1")])
            .infer(
                Triple::new(mf, Term::iri(OCCURS_IN), cell),
                Explanation::new([part_of, cell_type]),
            )
            .build()
            .unwrap();

        let resolved = resolve_in(&wm);
        let relations: Vec<&str> = resolved.extensions.iter().map(|e| e.relation.as_str()).collect();
        assert_eq!(relations, vec![PART_OF]);
        assert_eq!(resolved.rejected, 1);
    }

    #[test]
    fn derived_extension_with_fully_cited_proof_is_accepted() {
        let mf = node("mf");
        let cell = node("cell");
        let part_of = Triple::new(mf.clone(), Term::iri(PART_OF), cell.clone());
        let cell_type = Triple::new(cell.clone(), Term::iri(RDF_TYPE), Term::iri(CELL));
        let wm = activity(&[(PART_OF, "cell", CELL, "PMID:1")])
            .evidence(&cell_type, &EvidenceAssertion::new(IDA, "PMID:1", "2020-01-01"))
            .infer(
                Triple::new(mf, Term::iri(OCCURS_IN), cell),
                Explanation::new([part_of, cell_type]),
            )
            .build()
            .unwrap();

        let resolved = resolve_in(&wm);
        assert_eq!(resolved.extensions.len(), 2);
        assert_eq!(resolved.rejected, 0);
    }
}
