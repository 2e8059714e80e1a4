//! Export configuration.
//!
//! Everything the exporter treats as static policy (regulator map, namespace
//! predicates, qualifier relations, CURIE prefixes) is passed in explicitly
//! through [`ExportConfig`] rather than held in global state.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::curation::RegulatorMap;
use crate::curie::{CurieMap, CuriePattern};
use crate::error::ConfigError;
use crate::vocab::{
    DEFAULT_ANNOTATION_RELATIONS, EMAPA_NAMESPACE, NCBI_TAXON_NAMESPACE, UBERON_NAMESPACE,
};

/// Assigned-by value used when neither the evidence nor the model provides one.
pub const DEFAULT_ASSIGNED_BY: &str = "GO_Noctua";

/// Configuration for [`crate::GpadExporter`] and [`crate::ExportRuntime`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Term -> regulated terms.
    pub regulators: RegulatorMap,
    /// IRI prefixes of the taxon namespace.
    pub taxon_namespaces: Vec<String>,
    /// Anatomy namespace that wins when both are present (EMAPA).
    pub anatomy_preferred_namespace: String,
    /// Anatomy namespace dropped in favour of the preferred one (UBERON).
    pub anatomy_suppressed_namespace: String,
    /// Assigned-by fallback when neither evidence nor model provides one.
    pub default_assigned_by: String,
    /// Qualifier relations that form basic annotations.
    pub annotation_relations: Vec<String>,
    /// Extra IRI-prefix -> CURIE-prefix pairs.
    pub prefixes: BTreeMap<String, String>,
    /// Regex contraction rules tried before the prefixes.
    pub curie_patterns: Vec<CuriePattern>,
    /// Outer timeout for one export, in milliseconds.
    pub timeout_ms: u64,
    /// Worker threads of [`crate::ExportRuntime`].
    pub runtime_workers: usize,
    /// Pending exports the runtime accepts before failing fast.
    pub queue_capacity: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            regulators: RegulatorMap::default(),
            taxon_namespaces: vec![NCBI_TAXON_NAMESPACE.to_string()],
            anatomy_preferred_namespace: EMAPA_NAMESPACE.to_string(),
            anatomy_suppressed_namespace: UBERON_NAMESPACE.to_string(),
            default_assigned_by: DEFAULT_ASSIGNED_BY.to_string(),
            annotation_relations: DEFAULT_ANNOTATION_RELATIONS
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
            prefixes: BTreeMap::new(),
            curie_patterns: Vec::new(),
            timeout_ms: 60_000,
            runtime_workers: 2,
            queue_capacity: 64,
        }
    }
}

impl ExportConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.taxon_namespaces.iter().any(|ns| ns.trim().is_empty()) {
            return Err(invalid("taxon_namespaces", "namespace prefixes must be non-empty"));
        }
        if self.anatomy_preferred_namespace.trim().is_empty() {
            return Err(invalid("anatomy_preferred_namespace", "must be non-empty"));
        }
        if self.anatomy_suppressed_namespace.trim().is_empty() {
            return Err(invalid("anatomy_suppressed_namespace", "must be non-empty"));
        }
        if self.default_assigned_by.trim().is_empty() {
            return Err(invalid("default_assigned_by", "must be non-empty"));
        }
        if self.annotation_relations.is_empty() {
            return Err(invalid("annotation_relations", "at least one relation is required"));
        }
        if self.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than zero"));
        }
        Ok(())
    }

    /// Outer export timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Namespace predicates derived from this config.
    #[must_use]
    pub fn namespaces(&self) -> Namespaces {
        Namespaces {
            taxon: self.taxon_namespaces.clone(),
            preferred_anatomy: self.anatomy_preferred_namespace.clone(),
            suppressed_anatomy: self.anatomy_suppressed_namespace.clone(),
        }
    }

    /// Qualifier relations as a set.
    #[must_use]
    pub fn relation_set(&self) -> HashSet<String> {
        self.annotation_relations.iter().cloned().collect()
    }

    /// Builds the CURIE map.
    pub fn curie_map(&self) -> Result<CurieMap, ConfigError> {
        CurieMap::new(&self.prefixes, &self.curie_patterns)
    }
}

/// Namespace membership tests used by extension resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    taxon: Vec<String>,
    preferred_anatomy: String,
    suppressed_anatomy: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        ExportConfig::default().namespaces()
    }
}

impl Namespaces {
    /// True if `iri` is a taxon class.
    #[must_use]
    pub fn is_taxon(&self, iri: &str) -> bool {
        self.taxon.iter().any(|ns| iri.starts_with(ns.as_str()))
    }

    /// True if `iri` is in the preferred anatomy namespace.
    #[must_use]
    pub fn is_preferred_anatomy(&self, iri: &str) -> bool {
        iri.starts_with(self.preferred_anatomy.as_str())
    }

    /// True if `iri` is in the suppressed anatomy namespace.
    #[must_use]
    pub fn is_suppressed_anatomy(&self, iri: &str) -> bool {
        iri.starts_with(self.suppressed_anatomy.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExportConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.relation_set().contains(crate::vocab::ENABLES));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ExportConfig::from_json_str(r#"{"default_assigned_by": "MGI", "timeout_ms": 500}"#).unwrap();
        assert_eq!(config.default_assigned_by, "MGI");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.taxon_namespaces, vec![NCBI_TAXON_NAMESPACE.to_string()]);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ExportConfig::from_json_str(r#"{"timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "timeout_ms"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ExportConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn namespace_predicates() {
        let ns = Namespaces::default();
        assert!(ns.is_taxon("http://purl.obolibrary.org/obo/NCBITaxon_9606"));
        assert!(!ns.is_taxon("http://purl.obolibrary.org/obo/CHEBI_1"));
        assert!(ns.is_preferred_anatomy("http://purl.obolibrary.org/obo/EMAPA_1"));
        assert!(ns.is_suppressed_anatomy("http://purl.obolibrary.org/obo/UBERON_1"));
    }
}
