//! Pointer — a directed, typed, lazily-resolved edge.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dict::{DictId, Dictionary};

use super::{PartOfSpeech, PointerTarget, PointerType, TargetKey};

/// Resolution state of the far end of a pointer.
#[derive(Debug, Clone)]
enum TargetRef {
    /// Descriptor only — the target has not been paged in yet.
    Unresolved(TargetKey),
    /// Cached snapshot. The descriptor is recomputed from it on demand.
    Resolved(PointerTarget),
}

impl TargetRef {
    fn key(&self) -> TargetKey {
        match self {
            TargetRef::Unresolved(key) => *key,
            TargetRef::Resolved(target) => target.key(),
        }
    }
}

/// A directed, typed edge between two pointer targets.
///
/// The target side starts as a raw `(pos, offset, word)` descriptor and is
/// resolved through a [`Dictionary`] on first use; the resolved snapshot is
/// cached behind a lock so resolution happens at most once per pointer.
///
/// Equality and hashing use `(kind, source, current target key)` and are
/// therefore stable whether or not resolution has happened.
pub struct Pointer {
    kind: PointerType,
    source: TargetKey,
    target: RwLock<TargetRef>,
    /// Dictionary this pointer was inserted into, if any. Read-path pruning
    /// drops pointers homed elsewhere after a cross-dictionary move.
    home: Option<DictId>,
}

impl Pointer {
    /// An unresolved pointer from a source endpoint to a target descriptor.
    pub fn new(kind: PointerType, source: TargetKey, target: TargetKey) -> Self {
        Self {
            kind,
            source,
            target: RwLock::new(TargetRef::Unresolved(target)),
            home: None,
        }
    }

    /// An eagerly-resolved pointer between two in-memory targets.
    pub fn between(kind: PointerType, source: TargetKey, target: PointerTarget) -> Self {
        Self {
            kind,
            source,
            target: RwLock::new(TargetRef::Resolved(target)),
            home: None,
        }
    }

    pub fn kind(&self) -> PointerType {
        self.kind
    }

    pub fn source(&self) -> TargetKey {
        self.source
    }

    /// A pointer is lexical when it hangs off an individual word sense.
    pub fn is_lexical(&self) -> bool {
        !self.source.is_synset()
    }

    // ========================================================================
    // Target descriptor accessors — valid before and after resolution
    // ========================================================================

    pub fn target_key(&self) -> TargetKey {
        self.target.read().key()
    }

    pub fn target_pos(&self) -> PartOfSpeech {
        self.target_key().pos()
    }

    pub fn target_offset(&self) -> u64 {
        self.target_key().offset()
    }

    /// 0 for a semantic pointer, the 1-based sense position otherwise.
    pub fn target_index(&self) -> u16 {
        self.target_key().word
    }

    pub fn is_resolved(&self) -> bool {
        matches!(&*self.target.read(), TargetRef::Resolved(_))
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve the target through the dictionary, caching the snapshot.
    ///
    /// Returns `None` (and stays unresolved) when the descriptor dangles —
    /// no synset at that offset, or no word at that index. Traversal
    /// tolerates dangling edges by skipping them.
    pub fn resolve(&self, dict: &dyn Dictionary) -> Option<PointerTarget> {
        {
            let guard = self.target.read();
            if let TargetRef::Resolved(target) = &*guard {
                return Some(target.clone());
            }
        }

        let key = self.target_key();
        let Some(synset) = dict.synset(key.pos(), key.offset()) else {
            debug!(target_key = %key, kind = %self.kind, "dangling pointer: no synset");
            return None;
        };
        let resolved = if key.is_synset() {
            PointerTarget::Synset(synset)
        } else {
            match synset.word_at(key.word) {
                Some(word) => PointerTarget::Word(word.clone()),
                None => {
                    debug!(target_key = %key, kind = %self.kind, "dangling pointer: no word at index");
                    return None;
                }
            }
        };

        let mut guard = self.target.write();
        // A racing resolve may have won; keep the first snapshot.
        if let TargetRef::Unresolved(_) = &*guard {
            *guard = TargetRef::Resolved(resolved.clone());
        }
        Some(resolved)
    }

    /// Replace the target with an in-memory one, discarding the descriptor.
    /// Subsequent descriptor accessors recompute from the live target.
    pub fn set_target(&self, target: PointerTarget) {
        *self.target.write() = TargetRef::Resolved(target);
    }

    /// The mirror of this pointer (target back to source, symmetric kind),
    /// if the kind has a symmetric counterpart.
    pub fn mirror(&self) -> Option<Pointer> {
        self.kind
            .symmetric()
            .map(|sym| Pointer::new(sym, self.target_key(), self.source))
    }

    // ========================================================================
    // Dictionary bookkeeping (crate-internal)
    // ========================================================================

    pub(crate) fn home(&self) -> Option<DictId> {
        self.home
    }

    pub(crate) fn set_home(&mut self, home: Option<DictId>) {
        self.home = home;
    }

    /// Follow a synset relocation: rewrite the target descriptor (or the
    /// resolved snapshot's key) if it referenced `old`.
    pub(crate) fn rewrite_target_synset(&self, old: crate::model::SynsetKey, new: crate::model::SynsetKey) {
        let mut guard = self.target.write();
        match &mut *guard {
            TargetRef::Unresolved(key) if key.synset == old => key.synset = new,
            TargetRef::Resolved(PointerTarget::Synset(s)) if s.key == old => s.key = new,
            TargetRef::Resolved(PointerTarget::Word(w)) if w.synset == old => w.synset = new,
            _ => {}
        }
    }

    /// Follow a synset relocation on the source side.
    pub(crate) fn rewrite_source_synset(&mut self, old: crate::model::SynsetKey, new: crate::model::SynsetKey) {
        if self.source.synset == old {
            self.source.synset = new;
        }
    }
}

impl Clone for Pointer {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            source: self.source,
            target: RwLock::new(self.target.read().clone()),
            home: self.home,
        }
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.source == other.source
            && self.target_key() == other.target_key()
    }
}

impl Eq for Pointer {}

impl std::hash::Hash for Pointer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.source.hash(state);
        self.target_key().hash(state);
    }
}

impl std::fmt::Debug for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pointer")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .field("target", &self.target_key())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl std::fmt::Display for Pointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -[{}]-> {}", self.source, self.kind, self.target_key())
    }
}

// ============================================================================
// Serde — always the unresolved wire form, never the cache
// ============================================================================

#[derive(Serialize, Deserialize)]
struct PointerWire {
    kind: PointerType,
    source: TargetKey,
    target: TargetKey,
}

impl Serialize for Pointer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PointerWire {
            kind: self.kind,
            source: self.source,
            target: self.target_key(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PointerWire::deserialize(deserializer)?;
        Ok(Pointer::new(wire.kind, wire.source, wire.target))
    }
}
