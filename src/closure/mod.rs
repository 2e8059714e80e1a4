//! Fact closure provider seam and the per-export index built on top of it.

pub mod index;
pub mod memory;
pub mod traits;

pub use index::{ExplanationCache, FactIndex};
pub use memory::{InMemoryWorkingMemory, InMemoryWorkingMemoryBuilder};
pub use traits::{Explanation, Rule, WorkingMemory};
