//! # gpad-export - explanation-driven GPAD annotation export
//!
//! Exports flat, evidence-attributed GPAD 1.1 annotation lines from a
//! deductively closed causal-activity model. A relationship is exported only
//! when it is derived, every relational step of one of its proofs carries
//! evidence, and its extensions are corroborated by the same reference.
//!
//! ## Core Concepts
//!
//! - **WorkingMemory**: asserted facts, their closure, and `explain(fact)`
//! - **Evidence**: reified axiom annotations resolved per annotated fact
//! - **AnnotationRecord**: one GPAD line, deduplicated by full equality
//! - **GpadExporter** / **ExportRuntime**: synchronous export and its
//!   timeout-bounded worker pool
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gpad_export::{ExportConfig, GpadExporter, InMemoryWorkingMemory};
//!
//! let memory = InMemoryWorkingMemory::builder()
//!     // ... asserted facts, inferred facts with explanations, evidence ...
//!     .build()?;
//!
//! let exporter = GpadExporter::new(&ExportConfig::default())?;
//! let document = exporter.export(&memory, "http://model.geneontology.org/5a7e68a100000001")?;
//! print!("{}", document.text);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Graph model and provider seam
pub mod closure;
pub mod term;
pub mod vocab;

// Export pipeline
pub mod candidate;
pub mod curation;
pub mod evidence;
pub mod export;
pub mod extension;
pub mod validate;

// Output and policy
pub mod config;
pub mod curie;
pub mod error;
pub mod gpad;
pub mod record;

pub use closure::{Explanation, InMemoryWorkingMemory, Rule, WorkingMemory};
pub use config::{ExportConfig, Namespaces};
pub use curation::{DropReason, RegulatorMap};
pub use curie::CurieMap;
pub use error::{ConfigError, ExportError, ExportResult, ProviderError, ValidationError};
pub use evidence::{Evidence, EvidenceAssertion};
pub use export::{ExportHandle, ExportRuntime, ExportStats, GpadDocument, GpadExporter};
pub use gpad::{GpadRenderer, GPAD_HEADER};
pub use record::{AnnotationRecord, Aspect, Extension, Polarity};
pub use term::{Term, Triple};
