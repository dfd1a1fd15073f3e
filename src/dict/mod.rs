//! # Dictionary Seam
//!
//! This is THE contract between the graph core and any backing store.
//! File readers, databases, and caches all live behind it; the core only
//! ever asks for synsets by key and index words by lemma.
//!
//! Lookups return cloned snapshots, never references into the store —
//! traversal holds no locks while walking.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryDictionary` | `memory` | In-memory arena for testing/embedding |

pub mod memory;

pub use memory::MemoryDictionary;

use crate::model::{IndexWord, PartOfSpeech, Synset, SynsetKey};
use crate::Result;

/// Identity of one dictionary instance within the process.
///
/// Pointers record the dictionary they were inserted into; after a
/// cross-dictionary move, read-path pruning uses this to drop strays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DictId(pub u64);

impl std::fmt::Display for DictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dict#{}", self.0)
    }
}

/// The narrow interface the graph core consumes.
///
/// Synchronous by design: the core never blocks on I/O itself, but a
/// backing store may block inside these calls. There is no timeout or
/// cancellation contract at this seam.
pub trait Dictionary: Send + Sync {
    /// This instance's identity.
    fn id(&self) -> DictId;

    /// Resolve a synset by POS + offset. `None` when absent — dangling
    /// offsets are tolerated by traversal, not errors.
    fn synset(&self, pos: PartOfSpeech, offset: u64) -> Option<Synset>;

    /// Resolve the inverted-index entry for a lemma (case-insensitive).
    fn index_word(&self, pos: PartOfSpeech, lemma: &str) -> Option<IndexWord>;

    /// Ensure an index word exists for the lemma and that it lists `sense`.
    /// Used by the word-list mutation discipline.
    fn create_index_word(
        &self,
        pos: PartOfSpeech,
        lemma: &str,
        sense: SynsetKey,
    ) -> Result<IndexWord>;

    /// Whether mutation-consistency logic (mirror pointers, index-word
    /// sync) is active.
    fn is_editable(&self) -> bool;

    /// Cache-invalidation hook fired when a synset's offset is rewritten
    /// during an edit session.
    fn notify_offset_changed(&self, old: SynsetKey, new: SynsetKey);

    /// Convenience: resolve by key.
    fn synset_by_key(&self, key: SynsetKey) -> Option<Synset> {
        self.synset(key.pos, key.offset)
    }
}
