//! Annotation records, the unit of GPAD output.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vocab::{BIOLOGICAL_PROCESS, CELLULAR_COMPONENT, MOLECULAR_FUNCTION};

/// Whether the annotation is asserted or negated (NOT).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Plain annotation.
    #[default]
    Positive,
    /// Rendered with a `NOT` qualifier.
    Negated,
}

impl Polarity {
    /// True for [`Polarity::Negated`].
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(self, Self::Negated)
    }
}

/// GO aspect of an ontology class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    /// Molecular function (F).
    MolecularFunction,
    /// Biological process (P).
    BiologicalProcess,
    /// Cellular component (C).
    CellularComponent,
}

impl Aspect {
    /// Root class IRI of this aspect.
    #[must_use]
    pub const fn root(self) -> &'static str {
        match self {
            Self::MolecularFunction => MOLECULAR_FUNCTION,
            Self::BiologicalProcess => BIOLOGICAL_PROCESS,
            Self::CellularComponent => CELLULAR_COMPONENT,
        }
    }

    /// Aspect whose root is `iri`.
    #[must_use]
    pub fn from_root(iri: &str) -> Option<Self> {
        match iri {
            MOLECULAR_FUNCTION => Some(Self::MolecularFunction),
            BIOLOGICAL_PROCESS => Some(Self::BiologicalProcess),
            CELLULAR_COMPONENT => Some(Self::CellularComponent),
            _ => None,
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MolecularFunction => write!(f, "F"),
            Self::BiologicalProcess => write!(f, "P"),
            Self::CellularComponent => write!(f, "C"),
        }
    }
}

/// A `relation(filler)` pair refining an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Extension {
    /// Relation IRI.
    pub relation: String,
    /// Class IRI of the filler.
    pub filler: String,
}

impl Extension {
    /// Creates an extension.
    #[must_use]
    pub fn new(relation: impl Into<String>, filler: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            filler: filler.into(),
        }
    }
}

/// One exported annotation line. Equality covers every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Gene product class IRI.
    pub object: String,
    /// Qualifier relation IRI.
    pub qualifier: String,
    /// Ontology class IRI.
    pub ontology_class: String,
    /// Positive or negated.
    pub polarity: Polarity,
    /// Corroborated extensions.
    #[serde(default)]
    pub extensions: BTreeSet<Extension>,
    /// Reference of the evidence this line stands for.
    pub reference: String,
    /// Evidence class IRI.
    pub evidence_type: String,
    /// With/from value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_from: Option<String>,
    /// Kept for callers; never written to the GPAD column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interacting_taxon: Option<String>,
    /// Date as written in the model.
    pub date: String,
    /// Providing group.
    pub assigned_by: String,
    /// Contributor, model-state and model-id pairs.
    #[serde(default)]
    pub annotations: BTreeSet<(String, String)>,
}

/// A record together with the aspects of its class node, as needed by
/// curation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordDraft {
    /// The record itself.
    pub record: AnnotationRecord,
    /// GO aspects of the annotated class node.
    pub aspects: BTreeSet<Aspect>,
}

impl RecordDraft {
    /// True if the class node is a molecular function.
    #[must_use]
    pub fn is_molecular_function(&self) -> bool {
        self.aspects.contains(&Aspect::MolecularFunction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_roots_round_trip() {
        for aspect in [
            Aspect::MolecularFunction,
            Aspect::BiologicalProcess,
            Aspect::CellularComponent,
        ] {
            assert_eq!(Aspect::from_root(aspect.root()), Some(aspect));
        }
        assert_eq!(Aspect::from_root("http://x/other"), None);
    }

    #[test]
    fn polarity_defaults_to_positive() {
        assert!(!Polarity::default().is_negated());
        assert!(Polarity::Negated.is_negated());
    }
}
