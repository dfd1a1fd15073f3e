//! In-memory dictionary.
//!
//! This is the reference implementation of [`Dictionary`], and the owner of
//! the mutation-consistency discipline: mirror pointers for symmetric kinds,
//! index-word sync for word edits, and read-triggered pruning of pointers
//! that no longer belong here.
//!
//! It uses hashbrown maps protected by `parking_lot::RwLock`.
//!
//! ## Limitations
//!
//! - **Single-writer discipline**: per-map locks mean multi-step mutations
//!   are serialized but not transactional. Safe for single-threaded or
//!   read-heavy use.
//! - **No persistence**: everything lives and dies with the process.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::model::{IndexWord, PartOfSpeech, Pointer, Synset, SynsetKey, Word};
use crate::{Error, Result};

use super::{DictId, Dictionary};

static NEXT_DICT_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// MemoryDictionary
// ============================================================================

/// In-memory lexical graph storage.
#[derive(Clone)]
pub struct MemoryDictionary {
    inner: Arc<Inner>,
}

struct Inner {
    id: DictId,
    editable: bool,
    synsets: RwLock<HashMap<SynsetKey, Synset>>,
    /// (pos, lowercased lemma) → index word. The stored lemma keeps its
    /// original casing; only the map key is folded.
    index_words: RwLock<HashMap<(PartOfSpeech, String), IndexWord>>,
}

impl MemoryDictionary {
    fn with_mode(editable: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: DictId(NEXT_DICT_ID.fetch_add(1, Ordering::Relaxed)),
                editable,
                synsets: RwLock::new(HashMap::new()),
                index_words: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// An empty, mutable dictionary.
    pub fn editable() -> Self {
        Self::with_mode(true)
    }

    /// A read-only dictionary seeded from existing synsets. Index words are
    /// derived from the synsets' word lists.
    pub fn read_only(synsets: impl IntoIterator<Item = Synset>) -> Self {
        let dict = Self::with_mode(false);
        {
            let mut map = dict.inner.synsets.write();
            let mut index = dict.inner.index_words.write();
            for mut synset in synsets {
                for p in &mut synset.pointers {
                    p.set_home(Some(dict.inner.id));
                }
                for w in &synset.words {
                    index
                        .entry((synset.key.pos, w.lemma.to_lowercase()))
                        .or_insert_with(|| IndexWord::new(synset.key.pos, w.lemma.clone()))
                        .add_sense(synset.key);
                }
                map.insert(synset.key, synset);
            }
        }
        dict
    }

    /// A read-only snapshot of this dictionary's current contents.
    pub fn frozen(&self) -> Self {
        let synsets: Vec<Synset> = self.inner.synsets.read().values().cloned().collect();
        Self::read_only(synsets)
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.inner.editable {
            Ok(())
        } else {
            Err(Error::InvalidState("dictionary is not editable".into()))
        }
    }

    // ========================================================================
    // Synset CRUD
    // ========================================================================

    /// Create an empty synset. Duplicate keys are rejected.
    pub fn create_synset(
        &self,
        pos: PartOfSpeech,
        offset: u64,
        gloss: impl Into<String>,
    ) -> Result<SynsetKey> {
        let key = SynsetKey::new(pos, offset);
        self.insert_synset(Synset::new(key, gloss))?;
        Ok(key)
    }

    /// Insert a fully-built synset, adopting its pointers and indexing its
    /// words.
    pub fn insert_synset(&self, mut synset: Synset) -> Result<()> {
        self.ensure_editable()?;
        let mut map = self.inner.synsets.write();
        if map.contains_key(&synset.key) {
            return Err(Error::InvalidArgument(format!(
                "synset {} already exists",
                synset.key
            )));
        }
        for p in &mut synset.pointers {
            p.set_home(Some(self.inner.id));
        }
        {
            let mut index = self.inner.index_words.write();
            for w in &synset.words {
                index
                    .entry((synset.key.pos, w.lemma.to_lowercase()))
                    .or_insert_with(|| IndexWord::new(synset.key.pos, w.lemma.clone()))
                    .add_sense(synset.key);
            }
        }
        map.insert(synset.key, synset);
        Ok(())
    }

    /// Detach a synset. Pointers elsewhere that referenced it become
    /// dangling; they are tolerated on traversal, not cleaned up.
    pub fn remove_synset(&self, key: SynsetKey) -> Result<bool> {
        self.ensure_editable()?;
        let removed = self.inner.synsets.write().remove(&key);
        if let Some(synset) = &removed {
            let mut index = self.inner.index_words.write();
            for w in &synset.words {
                if let Some(iw) = index.get_mut(&(key.pos, w.lemma.to_lowercase())) {
                    iw.remove_sense(key);
                }
            }
        }
        Ok(removed.is_some())
    }

    pub fn synset_count(&self) -> usize {
        self.inner.synsets.read().len()
    }

    pub fn index_word_count(&self) -> usize {
        self.inner.index_words.read().len()
    }

    // ========================================================================
    // Pointer-list mutation discipline
    // ========================================================================

    /// Append a pointer to a synset's list.
    ///
    /// If the kind has a symmetric counterpart and the target synset is
    /// present, the mirror pointer is synthesized at the target in the same
    /// write pass. Both the primary add and the mirror are idempotent.
    pub fn add_pointer(&self, source: SynsetKey, mut pointer: Pointer) -> Result<()> {
        self.ensure_editable()?;
        if pointer.source().synset != source {
            return Err(Error::InvalidArgument(format!(
                "pointer source {} does not match synset {}",
                pointer.source(),
                source
            )));
        }
        if !pointer.kind().applies_to(source.pos) {
            return Err(Error::InvalidArgument(format!(
                "{} does not apply to {}",
                pointer.kind(),
                source.pos.label()
            )));
        }

        // Compute the mirror before touching the arena: collect-then-apply,
        // no consistency pass re-enters here.
        let mirror = pointer.mirror();
        pointer.set_home(Some(self.inner.id));

        let mut map = self.inner.synsets.write();
        {
            let synset = map.get_mut(&source).ok_or_else(|| {
                Error::InvalidArgument(format!("no synset {source}"))
            })?;
            if synset.pointers.contains(&pointer) {
                return Ok(());
            }
            synset.pointers.push(pointer);
        }

        if let Some(mut mirror) = mirror {
            let target_key = mirror.source().synset;
            mirror.set_home(Some(self.inner.id));
            // Target may legitimately be absent (dangling edge) — skip.
            if let Some(target) = map.get_mut(&target_key) {
                if !target.pointers.contains(&mirror) {
                    trace!(%target_key, kind = %mirror.kind(), "synthesizing mirror pointer");
                    target.pointers.push(mirror);
                }
            }
        }
        Ok(())
    }

    /// Remove one pointer equal to `pointer` from the synset's list, plus
    /// exactly one matching mirror from the target's list.
    pub fn remove_pointer(&self, source: SynsetKey, pointer: &Pointer) -> Result<bool> {
        self.ensure_editable()?;
        let mut map = self.inner.synsets.write();
        let removed = match map.get_mut(&source) {
            Some(synset) => match synset.pointers.iter().position(|p| p == pointer) {
                Some(pos) => {
                    synset.pointers.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };
        if removed {
            Self::remove_mirror_locked(&mut map, pointer);
        }
        Ok(removed)
    }

    /// Remove the pointer at a position in the synset's list (with its
    /// mirror). Out-of-range positions are rejected.
    pub fn remove_pointer_at(&self, source: SynsetKey, position: usize) -> Result<Pointer> {
        self.ensure_editable()?;
        let mut map = self.inner.synsets.write();
        let synset = map
            .get_mut(&source)
            .ok_or_else(|| Error::InvalidArgument(format!("no synset {source}")))?;
        if position >= synset.pointers.len() {
            return Err(Error::InvalidArgument(format!(
                "pointer index {position} out of range for {source}"
            )));
        }
        let removed = synset.pointers.remove(position);
        Self::remove_mirror_locked(&mut map, &removed);
        Ok(removed)
    }

    /// Drop every pointer of a synset, cleaning up each mirror.
    pub fn clear_pointers(&self, source: SynsetKey) -> Result<()> {
        self.ensure_editable()?;
        let mut map = self.inner.synsets.write();
        let drained = match map.get_mut(&source) {
            Some(synset) => std::mem::take(&mut synset.pointers),
            None => return Err(Error::InvalidArgument(format!("no synset {source}"))),
        };
        for pointer in &drained {
            Self::remove_mirror_locked(&mut map, pointer);
        }
        Ok(())
    }

    /// Scan the target synset's list for the mirror of `pointer` and remove
    /// exactly one match.
    fn remove_mirror_locked(map: &mut HashMap<SynsetKey, Synset>, pointer: &Pointer) {
        let Some(mirror) = pointer.mirror() else {
            return;
        };
        let target_key = mirror.source().synset;
        if let Some(target) = map.get_mut(&target_key) {
            if let Some(pos) = target.pointers.iter().position(|p| *p == mirror) {
                trace!(%target_key, kind = %mirror.kind(), "removing mirror pointer");
                target.pointers.remove(pos);
            }
        }
    }

    // ========================================================================
    // Read path — lazy pruning
    // ========================================================================

    /// A synset's pointers, after the read-triggered prune.
    pub fn synset_pointers(&self, key: SynsetKey) -> Vec<Pointer> {
        self.prune_on_read(key);
        self.inner
            .synsets
            .read()
            .get(&key)
            .map(|s| s.pointers.clone())
            .unwrap_or_default()
    }

    pub fn pointer_count(&self, key: SynsetKey) -> usize {
        self.synset_pointers(key).len()
    }

    /// Drop pointers that no longer belong to this dictionary: homed in
    /// another instance after a cross-dictionary move, or hanging off a word
    /// position the synset no longer has. Runs regardless of editability.
    fn prune_on_read(&self, key: SynsetKey) {
        let id = self.inner.id;
        let needs_prune = {
            let map = self.inner.synsets.read();
            match map.get(&key) {
                Some(s) => s.pointers.iter().any(|p| !Self::pointer_belongs(id, s, p)),
                None => false,
            }
        };
        if !needs_prune {
            return;
        }
        // Collect-then-apply under the write lock; the validity pass never
        // re-enters pruning.
        let mut map = self.inner.synsets.write();
        if let Some(s) = map.get_mut(&key) {
            let keep: Vec<bool> = s
                .pointers
                .iter()
                .map(|p| Self::pointer_belongs(id, s, p))
                .collect();
            let before = s.pointers.len();
            let mut flags = keep.into_iter();
            s.pointers.retain(|_| flags.next().unwrap_or(true));
            debug!(%key, pruned = before - s.pointers.len(), "pruned stray pointers");
        }
    }

    fn pointer_belongs(id: DictId, synset: &Synset, pointer: &Pointer) -> bool {
        if pointer.home().is_some_and(|h| h != id) {
            return false;
        }
        let word = pointer.source().word;
        word == 0 || (word as usize) <= synset.words.len()
    }

    // ========================================================================
    // Word-list mutation discipline
    // ========================================================================

    /// Append a word to a synset, keeping the index word for its lemma in
    /// sync (created if absent, this synset appended to its senses).
    ///
    /// The lemma is trimmed; an empty lemma or a duplicate within the synset
    /// is `InvalidArgument`, raised before anything is touched.
    pub fn add_word(&self, key: SynsetKey, lemma: &str, lex_id: u32) -> Result<Word> {
        self.ensure_editable()?;
        let lemma = lemma.trim();
        if lemma.is_empty() {
            return Err(Error::InvalidArgument("empty lemma".into()));
        }

        let word = {
            let mut map = self.inner.synsets.write();
            let synset = map
                .get_mut(&key)
                .ok_or_else(|| Error::InvalidArgument(format!("no synset {key}")))?;
            if synset.contains_lemma(lemma) {
                return Err(Error::InvalidArgument(format!(
                    "{key} already contains lemma {lemma:?}"
                )));
            }
            let word = Word::new(key, synset.words.len() as u16 + 1, lemma, lex_id);
            synset.words.push(word.clone());
            word
        };

        self.inner
            .index_words
            .write()
            .entry((key.pos, lemma.to_lowercase()))
            .or_insert_with(|| IndexWord::new(key.pos, lemma))
            .add_sense(key);

        Ok(word)
    }

    /// Insert a pre-built word. It must name this synset as its owner.
    pub fn insert_word(&self, key: SynsetKey, word: Word) -> Result<Word> {
        if word.synset != key {
            return Err(Error::InvalidArgument(format!(
                "word {} belongs to {}, not {key}",
                word.lemma, word.synset
            )));
        }
        self.add_word(key, &word.lemma, word.lex_id)
    }

    /// Detach a word from its synset and from its index word's senses.
    ///
    /// An index word emptied by this is left in place — removing it is the
    /// caller's separate responsibility (see [`Self::remove_index_word`]).
    pub fn remove_word(&self, key: SynsetKey, lemma: &str) -> Result<bool> {
        self.ensure_editable()?;
        let removed = {
            let mut map = self.inner.synsets.write();
            let synset = map
                .get_mut(&key)
                .ok_or_else(|| Error::InvalidArgument(format!("no synset {key}")))?;
            match synset.words.iter().position(|w| w.matches_lemma(lemma)) {
                Some(pos) => {
                    let word = synset.words.remove(pos);
                    // Word indexes are positions; renumber the survivors.
                    for (i, w) in synset.words.iter_mut().enumerate() {
                        w.index = i as u16 + 1;
                    }
                    Some(word)
                }
                None => None,
            }
        };
        let Some(word) = removed else {
            return Ok(false);
        };
        if let Some(iw) = self
            .inner
            .index_words
            .write()
            .get_mut(&(key.pos, word.lemma.to_lowercase()))
        {
            iw.remove_sense(key);
        }
        Ok(true)
    }

    /// Delete an index word outright.
    pub fn remove_index_word(&self, pos: PartOfSpeech, lemma: &str) -> Result<bool> {
        self.ensure_editable()?;
        Ok(self
            .inner
            .index_words
            .write()
            .remove(&(pos, lemma.trim().to_lowercase()))
            .is_some())
    }

    // ========================================================================
    // Offset rewriting
    // ========================================================================

    /// Move a synset to a new offset, rewriting every descriptor in the
    /// arena that referenced the old key — its own source descriptors, other
    /// synsets' target descriptors (resolved or not), and index-word senses.
    /// Fires the offset-changed hook when done.
    pub fn set_offset(&self, old: SynsetKey, new_offset: u64) -> Result<SynsetKey> {
        self.ensure_editable()?;
        let new = SynsetKey::new(old.pos, new_offset);
        if new == old {
            return Ok(new);
        }
        {
            let mut map = self.inner.synsets.write();
            if map.contains_key(&new) {
                return Err(Error::InvalidArgument(format!(
                    "synset {new} already exists"
                )));
            }
            let mut synset = map
                .remove(&old)
                .ok_or_else(|| Error::InvalidArgument(format!("no synset {old}")))?;
            synset.key = new;
            for w in &mut synset.words {
                w.synset = new;
            }
            for p in &mut synset.pointers {
                p.rewrite_source_synset(old, new);
                p.rewrite_target_synset(old, new);
            }
            map.insert(new, synset);

            for s in map.values_mut() {
                for p in &s.pointers {
                    p.rewrite_target_synset(old, new);
                }
            }
        }
        {
            let mut index = self.inner.index_words.write();
            for iw in index.values_mut() {
                for sense in &mut iw.senses {
                    if *sense == old {
                        *sense = new;
                    }
                }
            }
        }
        self.notify_offset_changed(old, new);
        Ok(new)
    }

    // ========================================================================
    // Cross-dictionary moves
    // ========================================================================

    /// Move a synset out of `other` into this dictionary.
    ///
    /// Unresolved pointers travel with it and re-resolve here; pointers
    /// already resolved against `other` keep their old home and are pruned
    /// the next time the list is read.
    pub fn import_synset(&self, other: &MemoryDictionary, key: SynsetKey) -> Result<()> {
        self.ensure_editable()?;
        other.ensure_editable()?;
        let mut synset = {
            let mut map = other.inner.synsets.write();
            map.remove(&key)
                .ok_or_else(|| Error::InvalidArgument(format!("no synset {key}")))?
        };
        {
            let mut index = other.inner.index_words.write();
            for w in &synset.words {
                if let Some(iw) = index.get_mut(&(key.pos, w.lemma.to_lowercase())) {
                    iw.remove_sense(key);
                }
            }
        }

        for p in &mut synset.pointers {
            if !p.is_resolved() {
                p.set_home(Some(self.inner.id));
            }
        }

        let mut map = self.inner.synsets.write();
        if map.contains_key(&key) {
            return Err(Error::InvalidArgument(format!(
                "synset {key} already exists"
            )));
        }
        {
            let mut index = self.inner.index_words.write();
            for w in &synset.words {
                index
                    .entry((key.pos, w.lemma.to_lowercase()))
                    .or_insert_with(|| IndexWord::new(key.pos, w.lemma.clone()))
                    .add_sense(key);
            }
        }
        map.insert(key, synset);
        Ok(())
    }
}

impl Default for MemoryDictionary {
    fn default() -> Self {
        Self::editable()
    }
}

// ============================================================================
// Dictionary impl
// ============================================================================

impl Dictionary for MemoryDictionary {
    fn id(&self) -> DictId {
        self.inner.id
    }

    fn synset(&self, pos: PartOfSpeech, offset: u64) -> Option<Synset> {
        let key = SynsetKey::new(pos, offset);
        self.prune_on_read(key);
        self.inner.synsets.read().get(&key).cloned()
    }

    fn index_word(&self, pos: PartOfSpeech, lemma: &str) -> Option<IndexWord> {
        self.inner
            .index_words
            .read()
            .get(&(pos, lemma.trim().to_lowercase()))
            .cloned()
    }

    fn create_index_word(
        &self,
        pos: PartOfSpeech,
        lemma: &str,
        sense: SynsetKey,
    ) -> Result<IndexWord> {
        self.ensure_editable()?;
        let lemma = lemma.trim();
        if lemma.is_empty() {
            return Err(Error::InvalidArgument("empty lemma".into()));
        }
        let mut index = self.inner.index_words.write();
        let iw = index
            .entry((pos, lemma.to_lowercase()))
            .or_insert_with(|| IndexWord::new(pos, lemma));
        iw.add_sense(sense);
        Ok(iw.clone())
    }

    fn is_editable(&self) -> bool {
        self.inner.editable
    }

    fn notify_offset_changed(&self, old: SynsetKey, new: SynsetKey) {
        // The arena is rewritten eagerly in set_offset; nothing else caches.
        trace!(%old, %new, "offset changed");
    }
}

// ============================================================================
// Tests
// ============================================================================
