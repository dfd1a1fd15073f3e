//! # wngraph — WordNet-style lexical graph
//!
//! The synset/word graph of a WordNet-class lexical database, reimplemented
//! as a typed, lazily-resolved directed graph with bounded traversal.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Dictionary` is the contract between the graph core
//!    and any backing store (file-backed, in-memory, remote).
//! 2. **Clean DTOs**: `Synset`, `Word`, `Pointer` cross all boundaries.
//! 3. **Lazy edges**: a `Pointer` carries an unresolved `(pos, offset, word)`
//!    descriptor and pages its target in on first use.
//! 4. **Best-effort traversal**: dangling edges resolve to `None` and are
//!    skipped, never aborting a walk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wngraph::{
//!     MemoryDictionary, PartOfSpeech, Pointer, PointerType, TargetKey, finder,
//! };
//!
//! # fn example() -> wngraph::Result<()> {
//! let dict = MemoryDictionary::editable();
//!
//! let dog = dict.create_synset(PartOfSpeech::Noun, 2084071, "a domesticated canid")?;
//! let canine = dict.create_synset(PartOfSpeech::Noun, 2083346, "any of various fissiped mammals")?;
//!
//! dict.add_word(dog, "dog", 0)?;
//! dict.add_word(canine, "canine", 0)?;
//!
//! // Adding a hypernym also mirrors a hyponym edge at the target.
//! dict.add_pointer(dog, Pointer::new(
//!     PointerType::Hypernym,
//!     TargetKey::synset(dog),
//!     TargetKey::synset(canine),
//! ))?;
//!
//! let found = finder::find_relationships(&dict, dog, canine, PointerType::Hypernym)?;
//! println!("shortest: {:?}", found.shallowest().map(|r| r.depth()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Backing Stores
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | Memory | `dict::memory` | In-memory arena for testing/embedding |
//! | (yours) | — | Anything implementing `Dictionary` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod dict;
pub mod list;
pub mod tree;
pub mod traverse;
pub mod relationship;
pub mod finder;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    IndexWord, PartOfSpeech, Pointer, PointerTarget, PointerType, Synset, SynsetKey, TargetKey,
    Word,
};

// ============================================================================
// Re-exports: Dictionary seam
// ============================================================================

pub use dict::{DictId, Dictionary, MemoryDictionary};

// ============================================================================
// Re-exports: Traversal results
// ============================================================================

pub use list::{PointerTargetNode, PointerTargetNodeList};
pub use relationship::{Relationship, RelationshipFlavor, RelationshipList};
pub use tree::{PointerTargetTree, PointerTargetTreeNode, PointerTargetTreeNodeList};

// ============================================================================
// Error Types
// ============================================================================

/// Failures raised by the graph core.
///
/// Absent lookups are deliberately NOT an error: a pointer whose target
/// offset has no synset resolves to `None` so traversal can skip the
/// dangling edge and keep a partial result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("search exhausted at depth {max_depth}: no {kind} path from {from} to {target}")]
    SearchExhausted {
        from: SynsetKey,
        target: SynsetKey,
        kind: PointerType,
        max_depth: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
