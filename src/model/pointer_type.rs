//! The catalog of pointer (edge) kinds.
//!
//! Each kind carries its Princeton symbol, the POS partitions it applies to,
//! and an optional symmetric counterpart. HYPERNYM↔HYPONYM-style pairs drive
//! the mirror-pointer discipline in editable dictionaries and the asymmetric
//! branch of relationship search; self-symmetric kinds (ANTONYM, SIMILAR_TO,
//! VERB_GROUP, ...) drive the symmetric branch.

use serde::{Deserialize, Serialize};

use super::PartOfSpeech;

// POS applicability bitmask.
const N: u8 = 1;
const V: u8 = 2;
const ADJ: u8 = 4;
const ADV: u8 = 8;

/// A pointer kind — the type tag on every edge of the lexical graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerType {
    Antonym,
    Hypernym,
    Hyponym,
    InstanceHypernym,
    InstanceHyponym,
    MemberHolonym,
    SubstanceHolonym,
    PartHolonym,
    MemberMeronym,
    SubstanceMeronym,
    PartMeronym,
    Attribute,
    SimilarTo,
    Entailment,
    Cause,
    ParticipleOf,
    AlsoSee,
    Pertainym,
    Derivation,
    VerbGroup,
    CategoryDomain,
    CategoryMember,
    RegionDomain,
    RegionMember,
    UsageDomain,
    UsageMember,
}

impl PointerType {
    pub const ALL: [PointerType; 26] = [
        PointerType::Antonym,
        PointerType::Hypernym,
        PointerType::Hyponym,
        PointerType::InstanceHypernym,
        PointerType::InstanceHyponym,
        PointerType::MemberHolonym,
        PointerType::SubstanceHolonym,
        PointerType::PartHolonym,
        PointerType::MemberMeronym,
        PointerType::SubstanceMeronym,
        PointerType::PartMeronym,
        PointerType::Attribute,
        PointerType::SimilarTo,
        PointerType::Entailment,
        PointerType::Cause,
        PointerType::ParticipleOf,
        PointerType::AlsoSee,
        PointerType::Pertainym,
        PointerType::Derivation,
        PointerType::VerbGroup,
        PointerType::CategoryDomain,
        PointerType::CategoryMember,
        PointerType::RegionDomain,
        PointerType::RegionMember,
        PointerType::UsageDomain,
        PointerType::UsageMember,
    ];

    /// The Princeton data-file symbol for this kind.
    pub fn key(self) -> &'static str {
        match self {
            PointerType::Antonym => "!",
            PointerType::Hypernym => "@",
            PointerType::Hyponym => "~",
            PointerType::InstanceHypernym => "@i",
            PointerType::InstanceHyponym => "~i",
            PointerType::MemberHolonym => "#m",
            PointerType::SubstanceHolonym => "#s",
            PointerType::PartHolonym => "#p",
            PointerType::MemberMeronym => "%m",
            PointerType::SubstanceMeronym => "%s",
            PointerType::PartMeronym => "%p",
            PointerType::Attribute => "=",
            PointerType::SimilarTo => "&",
            PointerType::Entailment => "*",
            PointerType::Cause => ">",
            PointerType::ParticipleOf => "<",
            PointerType::AlsoSee => "^",
            PointerType::Pertainym => "\\",
            PointerType::Derivation => "+",
            PointerType::VerbGroup => "$",
            PointerType::CategoryDomain => ";c",
            PointerType::CategoryMember => "-c",
            PointerType::RegionDomain => ";r",
            PointerType::RegionMember => "-r",
            PointerType::UsageDomain => ";u",
            PointerType::UsageMember => "-u",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        PointerType::ALL.iter().copied().find(|t| t.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            PointerType::Antonym => "antonym",
            PointerType::Hypernym => "hypernym",
            PointerType::Hyponym => "hyponym",
            PointerType::InstanceHypernym => "instance hypernym",
            PointerType::InstanceHyponym => "instance hyponym",
            PointerType::MemberHolonym => "member holonym",
            PointerType::SubstanceHolonym => "substance holonym",
            PointerType::PartHolonym => "part holonym",
            PointerType::MemberMeronym => "member meronym",
            PointerType::SubstanceMeronym => "substance meronym",
            PointerType::PartMeronym => "part meronym",
            PointerType::Attribute => "attribute",
            PointerType::SimilarTo => "similar to",
            PointerType::Entailment => "entailment",
            PointerType::Cause => "cause",
            PointerType::ParticipleOf => "participle of",
            PointerType::AlsoSee => "also see",
            PointerType::Pertainym => "pertainym",
            PointerType::Derivation => "derivation",
            PointerType::VerbGroup => "verb group",
            PointerType::CategoryDomain => "category domain",
            PointerType::CategoryMember => "category member",
            PointerType::RegionDomain => "region domain",
            PointerType::RegionMember => "region member",
            PointerType::UsageDomain => "usage domain",
            PointerType::UsageMember => "usage member",
        }
    }

    fn pos_mask(self) -> u8 {
        match self {
            PointerType::Antonym => N | V | ADJ | ADV,
            PointerType::Hypernym | PointerType::Hyponym => N | V,
            PointerType::InstanceHypernym | PointerType::InstanceHyponym => N,
            PointerType::MemberHolonym
            | PointerType::SubstanceHolonym
            | PointerType::PartHolonym
            | PointerType::MemberMeronym
            | PointerType::SubstanceMeronym
            | PointerType::PartMeronym => N,
            PointerType::Attribute => N | ADJ,
            PointerType::SimilarTo => ADJ,
            PointerType::Entailment | PointerType::Cause | PointerType::VerbGroup => V,
            PointerType::ParticipleOf => ADJ,
            PointerType::AlsoSee => N | V | ADJ,
            PointerType::Pertainym => ADJ | ADV,
            PointerType::Derivation => N | V | ADJ | ADV,
            PointerType::CategoryDomain
            | PointerType::RegionDomain
            | PointerType::UsageDomain => N | V | ADJ | ADV,
            PointerType::CategoryMember
            | PointerType::RegionMember
            | PointerType::UsageMember => N,
        }
    }

    /// Whether edges of this kind may originate from the given partition.
    pub fn applies_to(self, pos: PartOfSpeech) -> bool {
        let bit = match pos {
            PartOfSpeech::Noun => N,
            PartOfSpeech::Verb => V,
            PartOfSpeech::Adjective => ADJ,
            PartOfSpeech::Adverb => ADV,
        };
        self.pos_mask() & bit != 0
    }

    /// The mirror kind, if any. Self-symmetric kinds return themselves.
    pub fn symmetric(self) -> Option<PointerType> {
        match self {
            PointerType::Antonym => Some(PointerType::Antonym),
            PointerType::Hypernym => Some(PointerType::Hyponym),
            PointerType::Hyponym => Some(PointerType::Hypernym),
            PointerType::InstanceHypernym => Some(PointerType::InstanceHyponym),
            PointerType::InstanceHyponym => Some(PointerType::InstanceHypernym),
            PointerType::MemberHolonym => Some(PointerType::MemberMeronym),
            PointerType::SubstanceHolonym => Some(PointerType::SubstanceMeronym),
            PointerType::PartHolonym => Some(PointerType::PartMeronym),
            PointerType::MemberMeronym => Some(PointerType::MemberHolonym),
            PointerType::SubstanceMeronym => Some(PointerType::SubstanceHolonym),
            PointerType::PartMeronym => Some(PointerType::PartHolonym),
            PointerType::Attribute => Some(PointerType::Attribute),
            PointerType::SimilarTo => Some(PointerType::SimilarTo),
            PointerType::AlsoSee => Some(PointerType::AlsoSee),
            PointerType::Derivation => Some(PointerType::Derivation),
            PointerType::VerbGroup => Some(PointerType::VerbGroup),
            PointerType::CategoryDomain => Some(PointerType::CategoryMember),
            PointerType::CategoryMember => Some(PointerType::CategoryDomain),
            PointerType::RegionDomain => Some(PointerType::RegionMember),
            PointerType::RegionMember => Some(PointerType::RegionDomain),
            PointerType::UsageDomain => Some(PointerType::UsageMember),
            PointerType::UsageMember => Some(PointerType::UsageDomain),
            PointerType::Entailment
            | PointerType::Cause
            | PointerType::ParticipleOf
            | PointerType::Pertainym => None,
        }
    }

    /// True for kinds whose mirror is the kind itself.
    pub fn is_self_symmetric(self) -> bool {
        self.symmetric() == Some(self)
    }

    /// Kinds that connect individual word senses rather than whole synsets.
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            PointerType::Antonym
                | PointerType::ParticipleOf
                | PointerType::Pertainym
                | PointerType::Derivation
        )
    }
}

impl std::fmt::Display for PointerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
