//! # Lexical Graph Model
//!
//! Clean DTOs that define the synset/word graph. These types cross every
//! boundary: dictionary ↔ traversal ↔ relationship search ↔ user.
//!
//! Design rule: NO I/O, NO file-format knowledge, NO global state here.
//! This module is pure data plus lazy edge resolution through the
//! `Dictionary` seam.

pub mod pos;
pub mod pointer_type;
pub mod word;
pub mod synset;
pub mod index_word;
pub mod target;
pub mod pointer;

pub use pos::PartOfSpeech;
pub use pointer_type::PointerType;
pub use word::Word;
pub use synset::{Synset, SynsetKey};
pub use index_word::IndexWord;
pub use target::{PointerTarget, TargetKey};
pub use pointer::Pointer;
