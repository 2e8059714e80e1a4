//! Curation policy filters applied after extension resolution.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::RecordDraft;
use crate::vocab::{is_root_term, MOLECULAR_FUNCTION, NO_DATA_EVIDENCE};

/// Static map from a term to the terms it regulates.
///
/// A gene product annotated to a regulating term must not also be exported
/// with the regulated term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegulatorMap(BTreeMap<String, BTreeSet<String>>);

impl RegulatorMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `regulator` regulates `regulated`.
    pub fn insert(&mut self, regulator: impl Into<String>, regulated: impl Into<String>) {
        self.0.entry(regulator.into()).or_default().insert(regulated.into());
    }

    /// Terms regulated by `term`.
    #[must_use]
    pub fn regulated_by(&self, term: &str) -> Option<&BTreeSet<String>> {
        self.0.get(term)
    }

    /// True if any of `held` regulates `class`.
    #[must_use]
    pub fn is_regulated_by_any(&self, held: &BTreeSet<String>, class: &str) -> bool {
        held.iter()
            .filter_map(|term| self.regulated_by(term))
            .any(|regulated| regulated.contains(class))
    }

    /// Number of regulating terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for RegulatorMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (regulator, regulated) in iter {
            map.insert(regulator, regulated);
        }
        map
    }
}

/// Why a record was dropped by curation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// The gene product is annotated to a regulator of this term.
    RegulationViolation,
    /// Root term with evidence other than "no data".
    RootTermViolation,
    /// Molecular function root while a specific function is exported.
    RootFunctionSuppressed,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegulationViolation => write!(f, "regulation_violation"),
            Self::RootTermViolation => write!(f, "root_term_violation"),
            Self::RootFunctionSuppressed => write!(f, "root_function_suppressed"),
        }
    }
}

/// Result of curation.
#[derive(Debug, Clone, Default)]
pub struct CurationOutcome {
    /// Records that passed every rule.
    pub kept: Vec<RecordDraft>,
    /// Drop counts per rule.
    pub dropped: BTreeMap<DropReason, usize>,
}

/// Applies the regulation, root-term and root-MF rules.
///
/// `held` maps gene product class -> classes it is annotated to.
#[must_use]
pub fn curate(
    drafts: Vec<RecordDraft>,
    held: &BTreeMap<String, BTreeSet<String>>,
    regulators: &RegulatorMap,
) -> CurationOutcome {
    let mut outcome = CurationOutcome::default();
    let empty = BTreeSet::new();

    let mut survivors = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let record = &draft.record;
        let held_terms = held.get(&record.object).unwrap_or(&empty);

        let reason = if regulators.is_regulated_by_any(held_terms, &record.ontology_class) {
            Some(DropReason::RegulationViolation)
        } else if is_root_term(&record.ontology_class) && record.evidence_type != NO_DATA_EVIDENCE {
            Some(DropReason::RootTermViolation)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!(object = %record.object, class = %record.ontology_class, %reason, "curation drop");
                *outcome.dropped.entry(reason).or_default() += 1;
            }
            None => survivors.push(draft),
        }
    }

    let with_specific_function: HashSet<String> = survivors
        .iter()
        .filter(|d| d.is_molecular_function() && d.record.ontology_class != MOLECULAR_FUNCTION)
        .map(|d| d.record.object.clone())
        .collect();

    for draft in survivors {
        let record = &draft.record;
        if record.ontology_class == MOLECULAR_FUNCTION && with_specific_function.contains(&record.object) {
            debug!(object = %record.object, reason = %DropReason::RootFunctionSuppressed, "curation drop");
            *outcome
                .dropped
                .entry(DropReason::RootFunctionSuppressed)
                .or_default() += 1;
            continue;
        }
        outcome.kept.push(draft);
    }

    outcome
}
