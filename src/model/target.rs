//! PointerTarget — the polymorphic node type of the graph.

use serde::{Deserialize, Serialize};

use super::{PartOfSpeech, Synset, SynsetKey, Word};

/// Address of a pointer endpoint: a synset plus an optional word position.
///
/// `word == 0` addresses the whole synset (a semantic endpoint); `word >= 1`
/// addresses the 1-based sense within it (a lexical endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetKey {
    pub synset: SynsetKey,
    pub word: u16,
}

impl TargetKey {
    /// Address a whole synset.
    pub fn synset(key: SynsetKey) -> Self {
        Self { synset: key, word: 0 }
    }

    /// Address a word sense. `index` is 1-based.
    pub fn word(key: SynsetKey, index: u16) -> Self {
        Self { synset: key, word: index }
    }

    pub fn is_synset(self) -> bool {
        self.word == 0
    }

    pub fn pos(self) -> PartOfSpeech {
        self.synset.pos
    }

    pub fn offset(self) -> u64 {
        self.synset.offset
    }
}

impl std::fmt::Display for TargetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.word == 0 {
            write!(f, "{}", self.synset)
        } else {
            write!(f, "{}#{}", self.synset, self.word)
        }
    }
}

/// A resolved pointer endpoint: either a concept or one sense of it.
///
/// This is a snapshot sum type — traversal code matches on the variant
/// instead of downcasting, and holds cloned data rather than references
/// into the dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerTarget {
    Synset(Synset),
    Word(Word),
}

impl PointerTarget {
    pub fn pos(&self) -> PartOfSpeech {
        self.synset_key().pos
    }

    /// The owning synset's key (self, for the `Synset` variant).
    pub fn synset_key(&self) -> SynsetKey {
        match self {
            PointerTarget::Synset(s) => s.key,
            PointerTarget::Word(w) => w.synset,
        }
    }

    /// 0 iff this is a whole synset; the sense's 1-based position otherwise.
    pub fn index(&self) -> u16 {
        match self {
            PointerTarget::Synset(_) => 0,
            PointerTarget::Word(w) => w.index,
        }
    }

    pub fn key(&self) -> TargetKey {
        TargetKey {
            synset: self.synset_key(),
            word: self.index(),
        }
    }

    pub fn lemma(&self) -> Option<&str> {
        match self {
            PointerTarget::Synset(_) => None,
            PointerTarget::Word(w) => Some(&w.lemma),
        }
    }

    pub fn as_synset(&self) -> Option<&Synset> {
        match self {
            PointerTarget::Synset(s) => Some(s),
            PointerTarget::Word(_) => None,
        }
    }

    pub fn as_word(&self) -> Option<&Word> {
        match self {
            PointerTarget::Synset(_) => None,
            PointerTarget::Word(w) => Some(w),
        }
    }
}

/// Identity comparison: same endpoint address.
impl PartialEq for PointerTarget {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PointerTarget {}

impl std::hash::Hash for PointerTarget {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl std::fmt::Display for PointerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerTarget::Synset(s) => write!(f, "{s}"),
            PointerTarget::Word(w) => write!(f, "{w}"),
        }
    }
}
