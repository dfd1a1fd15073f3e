//! IndexWord — the inverted-index entry for a lemma+POS.

use serde::{Deserialize, Serialize};

use super::{PartOfSpeech, SynsetKey};

/// All synsets in which a lemma appears within one POS partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexWord {
    pub pos: PartOfSpeech,
    pub lemma: String,
    /// Sense keys in sense order.
    pub senses: Vec<SynsetKey>,
}

impl IndexWord {
    pub fn new(pos: PartOfSpeech, lemma: impl Into<String>) -> Self {
        Self {
            pos,
            lemma: lemma.into(),
            senses: Vec::new(),
        }
    }

    pub fn sense_count(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    pub fn contains_sense(&self, key: SynsetKey) -> bool {
        self.senses.contains(&key)
    }

    /// Append a sense if not already present.
    pub fn add_sense(&mut self, key: SynsetKey) {
        if !self.contains_sense(key) {
            self.senses.push(key);
        }
    }

    /// Remove a sense. Returns whether it was present.
    pub fn remove_sense(&mut self, key: SynsetKey) -> bool {
        let before = self.senses.len();
        self.senses.retain(|s| *s != key);
        self.senses.len() != before
    }
}

impl std::fmt::Display for IndexWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({} senses)", self.lemma, self.pos, self.senses.len())
    }
}
