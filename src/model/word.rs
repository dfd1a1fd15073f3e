//! Word — one lexicalized sense inside a synset.

use serde::{Deserialize, Serialize};

use super::{PartOfSpeech, SynsetKey};

/// One lexicalization of a synset.
///
/// The back-reference to the owning synset is its key, not an owning
/// pointer — a `Word` can always be re-joined with its synset through the
/// dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub synset: SynsetKey,
    /// 1-based position within the synset's word list. Never 0 — 0 is the
    /// "whole synset" marker in target descriptors.
    pub index: u16,
    pub lemma: String,
    pub lex_id: u32,
}

impl Word {
    pub fn new(synset: SynsetKey, index: u16, lemma: impl Into<String>, lex_id: u32) -> Self {
        Self {
            synset,
            index,
            lemma: lemma.into(),
            lex_id,
        }
    }

    pub fn pos(&self) -> PartOfSpeech {
        self.synset.pos
    }

    /// The case-insensitive compare used for lookups. Equality itself is
    /// case-sensitive.
    pub fn matches_lemma(&self, lemma: &str) -> bool {
        self.lemma.eq_ignore_ascii_case(lemma)
    }
}

/// Same owning synset + same lemma, case-sensitive.
impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.synset == other.synset && self.lemma == other.lemma
    }
}

impl Eq for Word {}

impl std::hash::Hash for Word {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.synset.hash(state);
        self.lemma.hash(state);
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{} [{}]", self.lemma, self.index, self.synset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_case_sensitive_lookup_is_not() {
        let key = SynsetKey::new(PartOfSpeech::Noun, 42);
        let a = Word::new(key, 1, "Dog", 0);
        let b = Word::new(key, 2, "dog", 3);
        assert_ne!(a, b);
        assert!(a.matches_lemma("DOG"));
        assert!(b.matches_lemma("Dog"));
    }
}
