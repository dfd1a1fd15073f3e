//! Synset — a concept node in the lexical graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{PartOfSpeech, Pointer, Word};

/// Global identity of a synset: POS partition + offset within it.
///
/// This is the primary key of the whole graph; everything else refers to
/// synsets through it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SynsetKey {
    pub pos: PartOfSpeech,
    pub offset: u64,
}

impl SynsetKey {
    pub fn new(pos: PartOfSpeech, offset: u64) -> Self {
        Self { pos, offset }
    }
}

impl std::fmt::Display for SynsetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:08}", self.pos, self.offset)
    }
}

/// A WordNet concept: a set of synonymous senses sharing one gloss, plus the
/// outgoing pointers whose source is this synset or one of its words.
///
/// Equality and hashing use the `(pos, offset)` key only — two snapshots of
/// the same synset compare equal regardless of staleness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synset {
    pub key: SynsetKey,
    pub gloss: String,
    pub lex_file_num: u32,
    pub words: SmallVec<[Word; 4]>,
    pub pointers: Vec<Pointer>,
    /// Head-of-cluster flag, meaningful for adjective synsets only.
    pub adjective_cluster: bool,
    /// Verb-frame bitset, meaningful for verb synsets only.
    pub verb_frames: u64,
}

impl Synset {
    pub fn new(key: SynsetKey, gloss: impl Into<String>) -> Self {
        Self {
            key,
            gloss: gloss.into(),
            lex_file_num: 0,
            words: SmallVec::new(),
            pointers: Vec::new(),
            adjective_cluster: false,
            verb_frames: 0,
        }
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.key.pos
    }

    pub fn offset(&self) -> u64 {
        self.key.offset
    }

    /// Look up a word by lemma (case-insensitive, the lookup convention).
    pub fn word(&self, lemma: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.matches_lemma(lemma))
    }

    /// Look up a word by its 1-based position.
    pub fn word_at(&self, index: u16) -> Option<&Word> {
        if index == 0 {
            return None;
        }
        self.words.get(index as usize - 1)
    }

    pub fn contains_lemma(&self, lemma: &str) -> bool {
        self.word(lemma).is_some()
    }

    pub fn has_verb_frame(&self, frame: u8) -> bool {
        frame < 64 && self.verb_frames & (1 << frame) != 0
    }

    pub fn set_verb_frame(&mut self, frame: u8) {
        if frame < 64 {
            self.verb_frames |= 1 << frame;
        }
    }
}

impl PartialEq for Synset {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Synset {}

impl std::hash::Hash for Synset {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl std::fmt::Display for Synset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.key)?;
        for (i, w) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", w.lemma)?;
        }
        write!(f, " -- ({})", self.gloss)
    }
}
