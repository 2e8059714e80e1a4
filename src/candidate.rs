//! Candidate extraction.
//!
//! Pattern-matches the closure for basic annotations
//! `(gene-product node, qualifier, class node)` and for the extension edges
//! leaving each class node. Pure: reads the index, never the provider.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::closure::FactIndex;
use crate::record::{Aspect, Polarity};
use crate::term::{Term, Triple};
use crate::vocab::{
    is_structural_type, OWL_COMPLEMENT_OF, OWL_ON_PROPERTY, OWL_SOME_VALUES_FROM, RDF_TYPE,
};

/// A derived gene product -> ontology class relationship.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CandidateAnnotation {
    /// Gene product individual.
    pub gene_product: Term,
    /// Class of the gene product; the GPAD object.
    pub gene_product_type: String,
    /// Qualifier relation IRI.
    pub qualifier: String,
    /// Individual the gene product relates to.
    pub class_node: Term,
    /// Ontology class of `class_node`.
    pub class_type: String,
    /// Positive or negated.
    pub polarity: Polarity,
    /// GO aspects of `class_node`.
    pub aspects: BTreeSet<Aspect>,
}

impl CandidateAnnotation {
    /// The fact whose derivation justifies this annotation.
    #[must_use]
    pub fn triple(&self) -> Triple {
        Triple::new(
            self.gene_product.clone(),
            Term::iri(self.qualifier.as_str()),
            self.class_node.clone(),
        )
    }
}

/// An edge `(class node, relation, filler node)` with one filler class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CandidateExtension {
    /// Class node the edge leaves.
    pub target: Term,
    /// Extension relation IRI.
    pub relation: String,
    /// Filler individual.
    pub filler: Term,
    /// One direct class of the filler.
    pub filler_type: String,
}

impl CandidateExtension {
    /// The extension edge as a fact.
    #[must_use]
    pub fn triple(&self) -> Triple {
        Triple::new(
            self.target.clone(),
            Term::iri(self.relation.as_str()),
            self.filler.clone(),
        )
    }
}

/// Everything extracted from one snapshot.
#[derive(Debug, Default)]
pub struct Candidates {
    /// Sorted basic-annotation candidates.
    pub annotations: Vec<CandidateAnnotation>,
    /// Sorted extension candidates keyed by target class node.
    pub extensions: BTreeMap<Term, Vec<CandidateExtension>>,
}

impl Candidates {
    /// Extension candidates leaving `class_node`.
    pub fn extensions_of(&self, class_node: &Term) -> &[CandidateExtension] {
        self.extensions.get(class_node).map_or(&[], Vec::as_slice)
    }

    /// Positive annotations held by each gene product class, as class IRIs.
    #[must_use]
    pub fn held_terms(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut held: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for candidate in self.annotations.iter().filter(|c| !c.polarity.is_negated()) {
            held.entry(candidate.gene_product_type.clone())
                .or_default()
                .insert(candidate.class_type.clone());
        }
        held
    }
}

/// Extracts annotation and extension candidates.
///
/// `relations` are the qualifier IRIs that form basic annotations. No
/// candidates is a valid result.
#[must_use]
pub fn extract(index: &FactIndex, relations: &HashSet<String>) -> Candidates {
    let mut annotations = BTreeSet::new();

    let mut sorted_relations: Vec<&String> = relations.iter().collect();
    sorted_relations.sort();

    for relation in sorted_relations {
        for fact in index.with_predicate(relation) {
            if !fact.subject.is_node() || !fact.object.is_node() {
                continue;
            }
            let gp_types = index.direct_types(&fact.subject);
            let class_types = index.direct_types(&fact.object);
            if gp_types.is_empty() || class_types.is_empty() {
                continue;
            }
            let aspects = aspects_of(index, &fact.object);

            for gp_type in &gp_types {
                for class_type in &class_types {
                    let polarity = polarity_of(index, &fact.subject, relation, class_type);
                    annotations.insert(CandidateAnnotation {
                        gene_product: fact.subject.clone(),
                        gene_product_type: gp_type.clone(),
                        qualifier: relation.clone(),
                        class_node: fact.object.clone(),
                        class_type: class_type.clone(),
                        polarity,
                        aspects: aspects.clone(),
                    });
                }
            }
        }
    }

    let class_nodes: BTreeSet<&Term> = annotations.iter().map(|c| &c.class_node).collect();
    let mut extensions = BTreeMap::new();
    for node in class_nodes {
        let found = extensions_from(index, node);
        if !found.is_empty() {
            extensions.insert(node.clone(), found);
        }
    }

    Candidates {
        annotations: annotations.into_iter().collect(),
        extensions,
    }
}

/// GO aspects of a class node, from its inferred types.
#[must_use]
pub fn aspects_of(index: &FactIndex, class_node: &Term) -> BTreeSet<Aspect> {
    index
        .inferred_types(class_node)
        .iter()
        .filter_map(|t| Aspect::from_root(t))
        .collect()
}

/// NOT binds when the gene product is an instance of
/// `complementOf(qualifier some class_type)`.
fn polarity_of(index: &FactIndex, gene_product: &Term, qualifier: &str, class_type: &str) -> Polarity {
    let negated = index.anonymous_types(gene_product).any(|complement| {
        index.objects(complement, OWL_COMPLEMENT_OF).any(|restriction| {
            let on_qualifier = index
                .objects(restriction, OWL_ON_PROPERTY)
                .any(|p| p.as_iri() == Some(qualifier));
            let on_class = index
                .objects(restriction, OWL_SOME_VALUES_FROM)
                .any(|c| c.as_iri() == Some(class_type));
            on_qualifier && on_class
        })
    });
    if negated {
        Polarity::Negated
    } else {
        Polarity::Positive
    }
}

fn extensions_from(index: &FactIndex, node: &Term) -> Vec<CandidateExtension> {
    let mut found = Vec::new();
    for fact in index.about(node) {
        let Some(relation) = fact.predicate.as_iri() else {
            continue;
        };
        if relation == RDF_TYPE || !fact.object.is_node() {
            continue;
        }
        for filler_type in index.direct_types(&fact.object) {
            if is_structural_type(&filler_type) {
                continue;
            }
            found.push(CandidateExtension {
                target: node.clone(),
                relation: relation.to_string(),
                filler: fact.object.clone(),
                filler_type,
            });
        }
    }
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::{Explanation, InMemoryWorkingMemory};
    use crate::vocab::{
        ENABLED_BY, ENABLES, HAS_INPUT, MOLECULAR_FUNCTION, OWL_RESTRICTION,
    };

    const KINASE: &str = "http://purl.obolibrary.org/obo/GO_0004672";
    const GP: &str = "http://identifiers.org/uniprot/P1";
    const CHEBI: &str = "http://purl.obolibrary.org/obo/CHEBI_15422";

    fn relations() -> HashSet<String> {
        [ENABLES.to_string()].into_iter().collect()
    }

    fn basic_model() -> InMemoryWorkingMemory {
        let mf = Term::iri("http://model.geneontology.org/m/mf");
        let gp = Term::iri("http://model.geneontology.org/m/gp");
        let chem = Term::iri("http://model.geneontology.org/m/chem");
        let enabled_by = Triple::new(mf.clone(), Term::iri(ENABLED_BY), gp.clone());
        InMemoryWorkingMemory::builder()
            .assert_type(mf.clone(), KINASE)
            .infer_type(mf.clone(), MOLECULAR_FUNCTION)
            .assert_type(gp.clone(), GP)
            .assert_type(chem.clone(), CHEBI)
            .assert(enabled_by.clone())
            .assert(Triple::new(mf.clone(), Term::iri(HAS_INPUT), chem))
            .infer(
                Triple::new(gp, Term::iri(ENABLES), mf),
                Explanation::new([enabled_by]).with_rule("inverse_of"),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn extracts_basic_annotation_and_extensions() {
        let index = FactIndex::load(&basic_model()).unwrap();
        let candidates = extract(&index, &relations());

        assert_eq!(candidates.annotations.len(), 1);
        let c = &candidates.annotations[0];
        assert_eq!(c.gene_product_type, GP);
        assert_eq!(c.class_type, KINASE);
        assert_eq!(c.polarity, Polarity::Positive);
        assert!(c.aspects.contains(&Aspect::MolecularFunction));

        let exts = candidates.extensions_of(&c.class_node);
        let relations: BTreeSet<&str> = exts.iter().map(|e| e.relation.as_str()).collect();
        assert!(relations.contains(HAS_INPUT));
        assert!(relations.contains(ENABLED_BY));
    }

    #[test]
    fn empty_closure_yields_no_candidates() {
        let wm = InMemoryWorkingMemory::builder().build().unwrap();
        let index = FactIndex::load(&wm).unwrap();
        let candidates = extract(&index, &relations());
        assert!(candidates.annotations.is_empty());
        assert!(candidates.extensions.is_empty());
    }

    #[test]
    fn complement_restriction_marks_negation() {
        let gp = Term::iri("http://model.geneontology.org/m/gp");
        let mf = Term::iri("http://model.geneontology.org/m/mf");
        let complement = Term::blank("not");
        let restriction = Term::blank("r");
        let wm = InMemoryWorkingMemory::builder()
            .assert_type(gp.clone(), GP)
            .assert_type(mf.clone(), KINASE)
            .assert(Triple::new(gp.clone(), Term::iri(RDF_TYPE), complement.clone()))
            .assert(Triple::new(complement, Term::iri(OWL_COMPLEMENT_OF), restriction.clone()))
            .assert_type(restriction.clone(), OWL_RESTRICTION)
            .assert(Triple::new(restriction.clone(), Term::iri(OWL_ON_PROPERTY), Term::iri(ENABLES)))
            .assert(Triple::new(restriction, Term::iri(OWL_SOME_VALUES_FROM), Term::iri(KINASE)))
            .assert(Triple::new(gp, Term::iri(ENABLES), mf))
            .build()
            .unwrap();
        let index = FactIndex::load(&wm).unwrap();
        let candidates = extract(&index, &relations());
        assert_eq!(candidates.annotations.len(), 1);
        assert_eq!(candidates.annotations[0].polarity, Polarity::Negated);
    }

    #[test]
    fn held_terms_group_by_gene_product_class() {
        let index = FactIndex::load(&basic_model()).unwrap();
        let held = extract(&index, &relations()).held_terms();
        assert!(held[GP].contains(KINASE));
    }
}
