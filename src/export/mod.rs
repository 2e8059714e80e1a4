//! Explanation-driven GPAD export.
//!
//! `GpadExporter` runs one synchronous, read-only pass over a working memory
//! snapshot:
//!
//! 1. load and index the snapshot; fail fast on `owl:Nothing`
//! 2. extract candidates and resolve evidence (once each)
//! 3. per candidate: validate explanations, select evidence, one record per
//!    evidence entry, resolve extensions against that record's reference
//! 4. deduplicate, curate, sort, render
//!
//! Any provider failure aborts the export; nothing partial is returned.

pub mod runtime;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::candidate::{self, CandidateAnnotation};
use crate::closure::{ExplanationCache, FactIndex, WorkingMemory};
use crate::config::{ExportConfig, Namespaces};
use crate::curation::{self, DropReason, RegulatorMap};
use crate::error::{ExportError, ExportResult};
use crate::evidence::{self, Evidence, EvidenceMap, ModelProvenance};
use crate::extension::resolve_extensions;
use crate::gpad::GpadRenderer;
use crate::record::{AnnotationRecord, Extension, RecordDraft};
use crate::validate::{select_evidence, Selection};

pub use runtime::{ExportHandle, ExportRuntime};

/// Counters for one export, including every locally recovered condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportStats {
    /// Facts in the closure.
    pub closure_facts: usize,
    /// Basic-annotation candidates found.
    pub candidates: usize,
    /// Candidates that are asserted only.
    pub not_derived: usize,
    /// Candidates without a fully evidenced explanation.
    pub ungrounded: usize,
    /// Grounded candidates with no evidence on the class node.
    pub no_local_evidence: usize,
    /// Malformed evidence nodes skipped.
    pub evidence_skipped: usize,
    /// Extensions not corroborated by the record reference.
    pub extensions_rejected: usize,
    /// Records equal to one already accepted.
    pub duplicates: usize,
    /// Curation drops per rule.
    pub dropped: BTreeMap<DropReason, usize>,
    /// Records in the document.
    pub records: usize,
    /// Calls to `explain` after caching.
    pub provider_calls: usize,
}

/// A complete export result.
#[derive(Debug, Clone, Serialize)]
pub struct GpadDocument {
    /// Exported model.
    pub model_iri: String,
    /// When the export finished.
    pub generated_at: DateTime<Utc>,
    /// Accepted records in output order.
    pub records: Vec<AnnotationRecord>,
    /// Counters for this export.
    pub stats: ExportStats,
    /// Rendered GPAD text.
    pub text: String,
}

impl GpadDocument {
    /// True if no annotation qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable digest of the rendered lines, independent of line order.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut lines: Vec<&str> = self.text.lines().collect();
        lines.sort_unstable();
        let mut hasher = blake3::Hasher::new();
        for line in lines {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Explanation-driven exporter. Holds only immutable policy; one instance can
/// serve concurrent exports of independent snapshots.
#[derive(Debug, Clone)]
pub struct GpadExporter {
    relations: HashSet<String>,
    regulators: RegulatorMap,
    namespaces: Namespaces,
    default_assigned_by: String,
    renderer: GpadRenderer,
}

impl GpadExporter {
    /// Builds an exporter from a validated config.
    pub fn new(config: &ExportConfig) -> ExportResult<Self> {
        config.validate()?;
        let curies = config.curie_map()?;
        Ok(Self {
            relations: config.relation_set(),
            regulators: config.regulators.clone(),
            namespaces: config.namespaces(),
            default_assigned_by: config.default_assigned_by.clone(),
            renderer: GpadRenderer::new(curies),
        })
    }

    /// Exports the annotations of the model `model_iri` held in `memory`.
    pub fn export(&self, memory: &dyn WorkingMemory, model_iri: &str) -> ExportResult<GpadDocument> {
        let index = FactIndex::load(memory)?;
        let mut stats = ExportStats {
            closure_facts: index.closure_len(),
            ..ExportStats::default()
        };

        let unsatisfiable = index.unsatisfiable();
        if !unsatisfiable.is_empty() {
            return Err(ExportError::SourceInconsistent {
                witnesses: unsatisfiable.iter().map(ToString::to_string).collect(),
            });
        }

        let model = ModelProvenance::read(&index, model_iri, self.renderer.curies());
        let candidates = candidate::extract(&index, &self.relations);
        let resolved = evidence::resolve(&index, &model, &self.default_assigned_by);
        stats.candidates = candidates.annotations.len();
        stats.evidence_skipped = resolved.skipped;

        let mut cache = ExplanationCache::new(memory);
        let mut drafts: Vec<RecordDraft> = Vec::new();
        let mut seen: HashSet<AnnotationRecord> = HashSet::new();

        for annotation in &candidates.annotations {
            let selection = select_evidence(annotation, &mut cache, &resolved.map)?;
            match selection.outcome {
                Selection::NotDerived => stats.not_derived += 1,
                Selection::Ungrounded => stats.ungrounded += 1,
                Selection::NoLocalEvidence => stats.no_local_evidence += 1,
                Selection::Selected => {}
            }

            for chosen in selection.evidence {
                let extensions = resolve_extensions(
                    annotation,
                    &chosen.reference,
                    candidates.extensions_of(&annotation.class_node),
                    &index,
                    &mut cache,
                    &resolved.map,
                    &self.namespaces,
                )?;
                stats.extensions_rejected += extensions.rejected;

                let record = build_record(annotation, chosen, extensions.extensions, extensions.interacting_taxon);
                if seen.insert(record.clone()) {
                    drafts.push(RecordDraft {
                        record,
                        aspects: annotation.aspects.clone(),
                    });
                } else {
                    stats.duplicates += 1;
                }
            }
        }

        let outcome = curation::curate(drafts, &candidates.held_terms(), &self.regulators);
        stats.dropped = outcome.dropped;

        let mut records: Vec<AnnotationRecord> = outcome.kept.into_iter().map(|d| d.record).collect();
        records.sort();
        stats.records = records.len();
        stats.provider_calls = cache.provider_calls();

        let text = self.renderer.render(&records);
        info!(
            model = model_iri,
            records = stats.records,
            candidates = stats.candidates,
            not_derived = stats.not_derived,
            ungrounded = stats.ungrounded,
            evidence_skipped = stats.evidence_skipped,
            "gpad export complete"
        );

        Ok(GpadDocument {
            model_iri: model_iri.to_string(),
            generated_at: Utc::now(),
            records,
            stats,
            text,
        })
    }
}

fn build_record(
    annotation: &CandidateAnnotation,
    evidence: Evidence,
    extensions: BTreeSet<Extension>,
    interacting_taxon: Option<String>,
) -> AnnotationRecord {
    debug!(
        object = %annotation.gene_product_type,
        class = %annotation.class_type,
        reference = %evidence.reference,
        extensions = extensions.len(),
        "record accepted"
    );
    AnnotationRecord {
        object: annotation.gene_product_type.clone(),
        qualifier: annotation.qualifier.clone(),
        ontology_class: annotation.class_type.clone(),
        polarity: annotation.polarity,
        extensions,
        reference: evidence.reference,
        evidence_type: evidence.evidence_type,
        with_from: evidence.with_from,
        interacting_taxon,
        date: evidence.date,
        assigned_by: evidence.assigned_by,
        annotations: evidence.annotations,
    }
}

/// Evidence map of a snapshot as the exporter resolves it.
pub fn evidence_of(
    memory: &dyn WorkingMemory,
    model_iri: &str,
    config: &ExportConfig,
) -> ExportResult<EvidenceMap> {
    let index = FactIndex::load(memory)?;
    let curies = config.curie_map()?;
    let model = ModelProvenance::read(&index, model_iri, &curies);
    Ok(evidence::resolve(&index, &model, &config.default_assigned_by).map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::InMemoryWorkingMemory;
    use crate::vocab::OWL_NOTHING;

    const MODEL: &str = "http://model.geneontology.org/m1";

    #[test]
    fn empty_model_exports_header_only() {
        let wm = InMemoryWorkingMemory::builder().build().unwrap();
        let exporter = GpadExporter::new(&ExportConfig::default()).unwrap();
        let doc = exporter.export(&wm, MODEL).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.text, "!gpa-version: 1.1\n");
        assert_eq!(doc.stats.candidates, 0);
    }

    #[test]
    fn unsatisfiable_node_fails_before_candidates() {
        let wm = InMemoryWorkingMemory::builder()
            .infer_type("http://model.geneontology.org/m1/x", OWL_NOTHING)
            .build()
            .unwrap();
        let exporter = GpadExporter::new(&ExportConfig::default()).unwrap();
        let err = exporter.export(&wm, MODEL).unwrap_err();
        let ExportError::SourceInconsistent { witnesses } = err else {
            panic!("expected SourceInconsistent, got {err:?}");
        };
        assert_eq!(witnesses, vec!["<http://model.geneontology.org/m1/x>".to_string()]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ExportConfig {
            timeout_ms: 0,
            ..ExportConfig::default()
        };
        let err = GpadExporter::new(&config).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn fingerprint_ignores_line_order() {
        let doc = |text: &str| GpadDocument {
            model_iri: MODEL.to_string(),
            generated_at: Utc::now(),
            records: Vec::new(),
            stats: ExportStats::default(),
            text: text.to_string(),
        };
        assert_eq!(doc("h\na\nb\n").fingerprint(), doc("h\nb\na\n").fingerprint());
        assert_ne!(doc("h\na\n").fingerprint(), doc("h\nb\n").fingerprint());
    }
}
