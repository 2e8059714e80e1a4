//! GPAD 1.1 rendering.
//!
//! One record per line, twelve tab-separated columns:
//!
//! ```text
//! DB  local-id  qualifier[|NOT]  GO-id  reference  evidence  with/from
//!     interacting-taxon  date  assigned-by  extensions  annotation-pairs
//! ```

use crate::curie::{db_and_local, CurieMap};
use crate::record::AnnotationRecord;
use crate::vocab::relation_label;

/// Fixed first line of every document.
pub const GPAD_HEADER: &str = "!gpa-version: 1.1";

/// Serializes annotation records.
#[derive(Debug, Clone, Default)]
pub struct GpadRenderer {
    curies: CurieMap,
}

impl GpadRenderer {
    /// Renderer using `curies` for compact ids.
    #[must_use]
    pub const fn new(curies: CurieMap) -> Self {
        Self { curies }
    }

    /// The CURIE map used for compact ids.
    #[must_use]
    pub const fn curies(&self) -> &CurieMap {
        &self.curies
    }

    /// Renders a full document: header plus one newline-terminated line per record.
    #[must_use]
    pub fn render<'a>(&self, records: impl IntoIterator<Item = &'a AnnotationRecord>) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(GPAD_HEADER);
        out.push('\n');
        for record in records {
            out.push_str(&self.render_line(record));
            out.push('\n');
        }
        out
    }

    /// Renders one record without trailing newline.
    #[must_use]
    pub fn render_line(&self, record: &AnnotationRecord) -> String {
        let (db, local_id) = db_and_local(&self.curies, &record.object);

        let mut qualifier = self.relation_symbol(&record.qualifier);
        if record.polarity.is_negated() {
            qualifier.push_str("|NOT");
        }

        let columns = [
            db,
            local_id,
            qualifier,
            self.curies.compact(&record.ontology_class),
            record.reference.clone(),
            self.curies.compact(&record.evidence_type),
            record.with_from.clone().unwrap_or_default(),
            // Interacting taxon column is reserved and always emitted empty.
            String::new(),
            gpad_date(&record.date),
            record.assigned_by.clone(),
            self.extensions_column(record),
            annotations_column(record),
        ];
        columns.join("\t")
    }

    /// Shorthand label for a relation, or its compact id.
    #[must_use]
    pub fn relation_symbol(&self, relation: &str) -> String {
        relation_label(relation).map_or_else(|| self.curies.compact(relation), str::to_string)
    }

    fn extensions_column(&self, record: &AnnotationRecord) -> String {
        let mut rendered: Vec<(String, String)> = record
            .extensions
            .iter()
            .map(|e| (self.relation_symbol(&e.relation), self.curies.compact(&e.filler)))
            .collect();
        rendered.sort_by(|a, b| (a.0.clone() + &a.1).cmp(&(b.0.clone() + &b.1)));
        rendered.dedup();

        rendered
            .iter()
            .map(|(relation, filler)| format!("{relation}({filler})"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn annotations_column(record: &AnnotationRecord) -> String {
    record
        .annotations
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("|")
}

/// `YYYY-MM-DD` -> `YYYYMMDD`: keeps only the digits.
#[must_use]
pub fn gpad_date(date: &str) -> String {
    date.chars().filter(char::is_ascii_digit).collect()
}
