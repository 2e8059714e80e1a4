//! IRI contraction to compact identifiers.
//!
//! GPAD columns carry compact ids (`GO:0003674`, `UniProtKB:P12345`). The map
//! applies, in order: configured regex rules, the OBO PURL rule
//! (`.../obo/GO_0003674` -> `GO:0003674`), then the longest matching IRI
//! prefix.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vocab::OBO;

/// A user-supplied contraction rule applied before the built-in ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuriePattern {
    /// Regex matched against the full IRI.
    pub pattern: String,
    /// Replacement using `$1`-style capture references.
    pub replacement: String,
}

/// Contracts IRIs to compact ids.
#[derive(Debug, Clone)]
pub struct CurieMap {
    patterns: Vec<(Regex, String)>,
    // Longest prefix first.
    prefixes: Vec<(String, String)>,
}

impl Default for CurieMap {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            prefixes: sort_prefixes(default_prefixes()),
        }
    }
}

/// Default IRI-prefix -> CURIE-prefix pairs for gene products and models.
#[must_use]
pub fn default_prefixes() -> BTreeMap<String, String> {
    [
        ("http://identifiers.org/uniprot/", "UniProtKB"),
        ("http://identifiers.org/mgi/", "MGI"),
        ("http://identifiers.org/rgd/", "RGD"),
        ("http://identifiers.org/zfin/", "ZFIN"),
        ("http://identifiers.org/sgd/", "SGD"),
        ("http://identifiers.org/wormbase/", "WB"),
        ("http://identifiers.org/flybase/", "FB"),
        ("http://identifiers.org/tair.locus/", "TAIR"),
        ("http://identifiers.org/pombase/", "PomBase"),
        ("http://identifiers.org/dictybase.gene/", "dictyBase"),
        ("http://model.geneontology.org/", "gomodel"),
    ]
    .into_iter()
    .map(|(iri, prefix)| (iri.to_string(), prefix.to_string()))
    .collect()
}

fn sort_prefixes(prefixes: BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut sorted: Vec<(String, String)> = prefixes.into_iter().collect();
    sorted.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    sorted
}

impl CurieMap {
    /// Builds a map from extra prefixes (merged over the defaults) and regex rules.
    pub fn new(
        extra_prefixes: &BTreeMap<String, String>,
        patterns: &[CuriePattern],
    ) -> Result<Self, ConfigError> {
        let mut prefixes = default_prefixes();
        for (iri, prefix) in extra_prefixes {
            if iri.trim().is_empty() || prefix.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: "prefixes".to_string(),
                    reason: "IRI prefix and CURIE prefix must be non-empty".to_string(),
                });
            }
            prefixes.insert(iri.clone(), prefix.clone());
        }

        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(&p.pattern)
                    .map(|re| (re, p.replacement.clone()))
                    .map_err(|e| ConfigError::Invalid {
                        field: "curie_patterns".to_string(),
                        reason: format!("invalid regex '{}': {e}", p.pattern),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns: compiled,
            prefixes: sort_prefixes(prefixes),
        })
    }

    /// Contracts `iri`, or returns `None` if no rule applies.
    #[must_use]
    pub fn contract(&self, iri: &str) -> Option<String> {
        for (re, replacement) in &self.patterns {
            if re.is_match(iri) {
                return Some(re.replace(iri, replacement.as_str()).into_owned());
            }
        }

        if let Some(curie) = contract_obo(iri) {
            return Some(curie);
        }

        self.prefixes.iter().find_map(|(prefix, curie_prefix)| {
            iri.strip_prefix(prefix.as_str())
                .filter(|local| !local.is_empty())
                .map(|local| format!("{curie_prefix}:{local}"))
        })
    }

    /// Contracts `iri`, falling back to the full IRI.
    #[must_use]
    pub fn compact(&self, iri: &str) -> String {
        self.contract(iri).unwrap_or_else(|| iri.to_string())
    }
}

fn contract_obo(iri: &str) -> Option<String> {
    let local = iri.strip_prefix(OBO)?;
    let (prefix, id) = local.split_once('_')?;
    let valid_prefix = prefix
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && prefix.chars().all(|c| c.is_ascii_alphanumeric());
    if !valid_prefix || id.is_empty() {
        return None;
    }
    Some(format!("{prefix}:{id}"))
}

/// Splits a compact id into `(db, local_id)` at its first colon.
///
/// Without a colon the DB is empty and the whole value is the local id.
#[must_use]
pub fn split_db_local(compact: &str) -> (&str, &str) {
    compact.split_once(':').unwrap_or(("", compact))
}

/// DB and local id for an IRI: the split compact id, or an empty DB and the
/// full IRI when the IRI does not contract.
#[must_use]
pub fn db_and_local(map: &CurieMap, iri: &str) -> (String, String) {
    match map.contract(iri) {
        Some(compact) => {
            let (db, local) = split_db_local(&compact);
            (db.to_string(), local.to_string())
        }
        None => (String::new(), iri.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obo_purls_contract_to_curies() {
        let map = CurieMap::default();
        assert_eq!(
            map.contract("http://purl.obolibrary.org/obo/GO_0003674").as_deref(),
            Some("GO:0003674")
        );
        assert_eq!(
            map.contract("http://purl.obolibrary.org/obo/NCBITaxon_9606").as_deref(),
            Some("NCBITaxon:9606")
        );
    }

    #[test]
    fn gene_product_prefixes_contract() {
        let map = CurieMap::default();
        assert_eq!(map.compact("http://identifiers.org/uniprot/P12345"), "UniProtKB:P12345");
        assert_eq!(map.compact("http://identifiers.org/mgi/MGI:97490"), "MGI:MGI:97490");
    }

    #[test]
    fn unknown_iris_stay_whole() {
        let map = CurieMap::default();
        assert_eq!(map.contract("http://example.org/thing"), None);
        assert_eq!(map.compact("http://example.org/thing"), "http://example.org/thing");
    }

    #[test]
    fn configured_patterns_win() {
        let map = CurieMap::new(
            &BTreeMap::new(),
            &[CuriePattern {
                pattern: r"^http://example\.org/gene/(\w+)$".to_string(),
                replacement: "EX:$1".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(map.compact("http://example.org/gene/abc1"), "EX:abc1");
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = CurieMap::new(
            &BTreeMap::new(),
            &[CuriePattern {
                pattern: "(".to_string(),
                replacement: String::new(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn split_at_first_colon() {
        assert_eq!(split_db_local("MGI:MGI:97490"), ("MGI", "MGI:97490"));
        assert_eq!(split_db_local("http//no-colon"), ("", "http//no-colon"));
    }

    #[test]
    fn uncontractible_iri_has_empty_db() {
        let map = CurieMap::default();
        assert_eq!(
            db_and_local(&map, "http://example.org/gp/1"),
            (String::new(), "http://example.org/gp/1".to_string())
        );
        assert_eq!(
            db_and_local(&map, "http://identifiers.org/uniprot/P12345"),
            ("UniProtKB".to_string(), "P12345".to_string())
        );
    }
}
