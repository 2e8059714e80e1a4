//! Well-known IRIs used by causal-activity models.
//!
//! Covers the RDF/OWL structural vocabulary, the evidence annotation
//! properties of the model format, GO aspect roots, and the relation
//! shorthands used in GPAD qualifier and extension columns.

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `owl:Nothing`.
pub const OWL_NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
/// `owl:Thing`.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
/// `owl:NamedIndividual`.
pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
/// `owl:Class`.
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
/// `owl:Axiom`.
pub const OWL_AXIOM: &str = "http://www.w3.org/2002/07/owl#Axiom";
/// `owl:Restriction`.
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
/// `owl:annotatedSource`.
pub const OWL_ANNOTATED_SOURCE: &str = "http://www.w3.org/2002/07/owl#annotatedSource";
/// `owl:annotatedProperty`.
pub const OWL_ANNOTATED_PROPERTY: &str = "http://www.w3.org/2002/07/owl#annotatedProperty";
/// `owl:annotatedTarget`.
pub const OWL_ANNOTATED_TARGET: &str = "http://www.w3.org/2002/07/owl#annotatedTarget";
/// `owl:complementOf`.
pub const OWL_COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#complementOf";
/// `owl:onProperty`.
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
/// `owl:someValuesFrom`.
pub const OWL_SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";

/// Links an axiom annotation node to its evidence individual.
pub const EVIDENCE: &str = "http://geneontology.org/lego/evidence";
/// With/from value of an evidence individual.
pub const EVIDENCE_WITH: &str = "http://geneontology.org/lego/evidence-with";
/// Curation state of a model, e.g. `production`.
pub const MODEL_STATE: &str = "http://geneontology.org/lego/modelstate";
/// Reference of an evidence individual, e.g. `PMID:12345`.
pub const DC_SOURCE: &str = "http://purl.org/dc/elements/1.1/source";
/// Modification date of an evidence individual or axiom.
pub const DC_DATE: &str = "http://purl.org/dc/elements/1.1/date";
/// Curator who contributed an evidence individual or axiom.
pub const DC_CONTRIBUTOR: &str = "http://purl.org/dc/elements/1.1/contributor";
/// Group that provided a model or evidence individual.
pub const PROVIDED_BY: &str = "http://purl.org/pav/providedBy";

/// OBO PURL namespace.
pub const OBO: &str = "http://purl.obolibrary.org/obo/";

/// GO molecular function root.
pub const MOLECULAR_FUNCTION: &str = "http://purl.obolibrary.org/obo/GO_0003674";
/// GO biological process root.
pub const BIOLOGICAL_PROCESS: &str = "http://purl.obolibrary.org/obo/GO_0008150";
/// GO cellular component root.
pub const CELLULAR_COMPONENT: &str = "http://purl.obolibrary.org/obo/GO_0005575";

/// ECO code for "no biological data available" (ND).
pub const NO_DATA_EVIDENCE: &str = "http://purl.obolibrary.org/obo/ECO_0000307";

/// NCBI taxonomy class namespace.
pub const NCBI_TAXON_NAMESPACE: &str = "http://purl.obolibrary.org/obo/NCBITaxon_";
/// Mouse developmental anatomy (EMAPA) class namespace.
pub const EMAPA_NAMESPACE: &str = "http://purl.obolibrary.org/obo/EMAPA_";
/// Uberon anatomy class namespace.
pub const UBERON_NAMESPACE: &str = "http://purl.obolibrary.org/obo/UBERON_";

/// `enables` (RO:0002327).
pub const ENABLES: &str = "http://purl.obolibrary.org/obo/RO_0002327";
/// `contributes_to` (RO:0002326).
pub const CONTRIBUTES_TO: &str = "http://purl.obolibrary.org/obo/RO_0002326";
/// `involved_in` (RO:0002331).
pub const INVOLVED_IN: &str = "http://purl.obolibrary.org/obo/RO_0002331";
/// `acts_upstream_of` (RO:0002263).
pub const ACTS_UPSTREAM_OF: &str = "http://purl.obolibrary.org/obo/RO_0002263";
/// `acts_upstream_of_or_within` (RO:0002264).
pub const ACTS_UPSTREAM_OF_OR_WITHIN: &str = "http://purl.obolibrary.org/obo/RO_0002264";
/// `acts_upstream_of_or_within_positive_effect` (RO:0004032).
pub const ACTS_UPSTREAM_OF_OR_WITHIN_POSITIVE: &str = "http://purl.obolibrary.org/obo/RO_0004032";
/// `acts_upstream_of_or_within_negative_effect` (RO:0004033).
pub const ACTS_UPSTREAM_OF_OR_WITHIN_NEGATIVE: &str = "http://purl.obolibrary.org/obo/RO_0004033";
/// `acts_upstream_of_positive_effect` (RO:0004034).
pub const ACTS_UPSTREAM_OF_POSITIVE: &str = "http://purl.obolibrary.org/obo/RO_0004034";
/// `acts_upstream_of_negative_effect` (RO:0004035).
pub const ACTS_UPSTREAM_OF_NEGATIVE: &str = "http://purl.obolibrary.org/obo/RO_0004035";
/// `part_of` (BFO:0000050).
pub const PART_OF: &str = "http://purl.obolibrary.org/obo/BFO_0000050";
/// `has_part` (BFO:0000051).
pub const HAS_PART: &str = "http://purl.obolibrary.org/obo/BFO_0000051";
/// `occurs_in` (BFO:0000066).
pub const OCCURS_IN: &str = "http://purl.obolibrary.org/obo/BFO_0000066";
/// `located_in` (RO:0001025).
pub const LOCATED_IN: &str = "http://purl.obolibrary.org/obo/RO_0001025";
/// `is_active_in` (RO:0002432).
pub const IS_ACTIVE_IN: &str = "http://purl.obolibrary.org/obo/RO_0002432";
/// `colocalizes_with` (RO:0002325).
pub const COLOCALIZES_WITH: &str = "http://purl.obolibrary.org/obo/RO_0002325";
/// `enabled_by` (RO:0002333).
pub const ENABLED_BY: &str = "http://purl.obolibrary.org/obo/RO_0002333";
/// `has_input` (RO:0002233).
pub const HAS_INPUT: &str = "http://purl.obolibrary.org/obo/RO_0002233";
/// `has_output` (RO:0002234).
pub const HAS_OUTPUT: &str = "http://purl.obolibrary.org/obo/RO_0002234";
/// `happens_during` (RO:0002092).
pub const HAPPENS_DURING: &str = "http://purl.obolibrary.org/obo/RO_0002092";
/// `regulates` (RO:0002211).
pub const REGULATES: &str = "http://purl.obolibrary.org/obo/RO_0002211";
/// `negatively_regulates` (RO:0002212).
pub const NEGATIVELY_REGULATES: &str = "http://purl.obolibrary.org/obo/RO_0002212";
/// `positively_regulates` (RO:0002213).
pub const POSITIVELY_REGULATES: &str = "http://purl.obolibrary.org/obo/RO_0002213";
/// `causally_upstream_of` (RO:0002411).
pub const CAUSALLY_UPSTREAM_OF: &str = "http://purl.obolibrary.org/obo/RO_0002411";
/// `directly_provides_input_for` (RO:0002413).
pub const DIRECTLY_PROVIDES_INPUT_FOR: &str = "http://purl.obolibrary.org/obo/RO_0002413";
/// `directly_positively_regulates` (RO:0002629).
pub const DIRECTLY_POSITIVELY_REGULATES: &str = "http://purl.obolibrary.org/obo/RO_0002629";
/// `directly_negatively_regulates` (RO:0002630).
pub const DIRECTLY_NEGATIVELY_REGULATES: &str = "http://purl.obolibrary.org/obo/RO_0002630";

const RELATION_LABELS: &[(&str, &str)] = &[
    (ENABLES, "enables"),
    (CONTRIBUTES_TO, "contributes_to"),
    (INVOLVED_IN, "involved_in"),
    (ACTS_UPSTREAM_OF, "acts_upstream_of"),
    (ACTS_UPSTREAM_OF_OR_WITHIN, "acts_upstream_of_or_within"),
    (ACTS_UPSTREAM_OF_OR_WITHIN_POSITIVE, "acts_upstream_of_or_within_positive_effect"),
    (ACTS_UPSTREAM_OF_OR_WITHIN_NEGATIVE, "acts_upstream_of_or_within_negative_effect"),
    (ACTS_UPSTREAM_OF_POSITIVE, "acts_upstream_of_positive_effect"),
    (ACTS_UPSTREAM_OF_NEGATIVE, "acts_upstream_of_negative_effect"),
    (PART_OF, "part_of"),
    (HAS_PART, "has_part"),
    (OCCURS_IN, "occurs_in"),
    (LOCATED_IN, "located_in"),
    (IS_ACTIVE_IN, "is_active_in"),
    (COLOCALIZES_WITH, "colocalizes_with"),
    (ENABLED_BY, "enabled_by"),
    (HAS_INPUT, "has_input"),
    (HAS_OUTPUT, "has_output"),
    (HAPPENS_DURING, "happens_during"),
    (REGULATES, "regulates"),
    (NEGATIVELY_REGULATES, "negatively_regulates"),
    (POSITIVELY_REGULATES, "positively_regulates"),
    (CAUSALLY_UPSTREAM_OF, "causally_upstream_of"),
    (DIRECTLY_PROVIDES_INPUT_FOR, "directly_provides_input_for"),
    (DIRECTLY_POSITIVELY_REGULATES, "directly_positively_regulates"),
    (DIRECTLY_NEGATIVELY_REGULATES, "directly_negatively_regulates"),
];

/// Relations that connect a gene product to an ontology class in a basic
/// annotation.
pub const DEFAULT_ANNOTATION_RELATIONS: &[&str] = &[
    ENABLES,
    CONTRIBUTES_TO,
    INVOLVED_IN,
    ACTS_UPSTREAM_OF,
    ACTS_UPSTREAM_OF_OR_WITHIN,
    ACTS_UPSTREAM_OF_OR_WITHIN_POSITIVE,
    ACTS_UPSTREAM_OF_OR_WITHIN_NEGATIVE,
    ACTS_UPSTREAM_OF_POSITIVE,
    ACTS_UPSTREAM_OF_NEGATIVE,
    PART_OF,
    LOCATED_IN,
    IS_ACTIVE_IN,
    COLOCALIZES_WITH,
];

/// The three GO aspect roots.
pub const ROOT_TERMS: [&str; 3] = [MOLECULAR_FUNCTION, BIOLOGICAL_PROCESS, CELLULAR_COMPONENT];

/// Returns the GPAD shorthand for a relation IRI, if one is known.
#[must_use]
pub fn relation_label(iri: &str) -> Option<&'static str> {
    RELATION_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == iri)
        .map(|(_, label)| *label)
}

/// Returns true if `iri` is one of the GO aspect roots.
#[must_use]
pub fn is_root_term(iri: &str) -> bool {
    ROOT_TERMS.contains(&iri)
}

/// Returns true for structural types that never count as a direct class.
#[must_use]
pub fn is_structural_type(iri: &str) -> bool {
    matches!(
        iri,
        OWL_NAMED_INDIVIDUAL | OWL_THING | OWL_CLASS | OWL_AXIOM | OWL_RESTRICTION
    )
}
