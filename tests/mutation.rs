//! End-to-end tests for the mutation-consistency discipline.
//!
//! Exercises mirror-pointer synthesis/cleanup, index-word sync, offset
//! rewriting, and the editability gate through the public API only.

use pretty_assertions::assert_eq;

use wngraph::{
    Dictionary, Error, MemoryDictionary, PartOfSpeech, Pointer, PointerType, SynsetKey, TargetKey,
};

fn semantic(kind: PointerType, from: SynsetKey, to: SynsetKey) -> Pointer {
    Pointer::new(kind, TargetKey::synset(from), TargetKey::synset(to))
}

// ============================================================================
// 1. Mirror invariant across a small hierarchy
// ============================================================================

#[test]
fn mirrors_track_adds_and_removes() {
    let dict = MemoryDictionary::editable();
    let animal = dict.create_synset(PartOfSpeech::Noun, 15388, "a living organism").unwrap();
    let dog = dict.create_synset(PartOfSpeech::Noun, 2084071, "a domesticated canid").unwrap();
    let cat = dict.create_synset(PartOfSpeech::Noun, 2121620, "a feline mammal").unwrap();

    dict.add_pointer(dog, semantic(PointerType::Hypernym, dog, animal)).unwrap();
    dict.add_pointer(cat, semantic(PointerType::Hypernym, cat, animal)).unwrap();

    // One mirror per add, at the shared target.
    let down: Vec<_> = dict
        .synset_pointers(animal)
        .into_iter()
        .filter(|p| p.kind() == PointerType::Hyponym)
        .collect();
    assert_eq!(down.len(), 2);

    // Removing one primary removes exactly its own mirror.
    dict.remove_pointer(dog, &semantic(PointerType::Hypernym, dog, animal)).unwrap();
    let down: Vec<_> = dict
        .synset_pointers(animal)
        .into_iter()
        .filter(|p| p.kind() == PointerType::Hyponym)
        .collect();
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].target_key(), TargetKey::synset(cat));
}

// ============================================================================
// 2. Self-symmetric kinds mirror with the same kind
// ============================================================================

#[test]
fn antonym_mirrors_as_antonym() {
    let dict = MemoryDictionary::editable();
    let hot = dict.create_synset(PartOfSpeech::Adjective, 1, "high temperature").unwrap();
    let cold = dict.create_synset(PartOfSpeech::Adjective, 2, "low temperature").unwrap();

    dict.add_pointer(hot, semantic(PointerType::Antonym, hot, cold)).unwrap();

    let back = dict.synset_pointers(cold);
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].kind(), PointerType::Antonym);
    assert_eq!(back[0].target_key(), TargetKey::synset(hot));
}

// ============================================================================
// 3. Read-only dictionaries refuse mutation but still resolve
// ============================================================================

#[test]
fn frozen_dictionary_is_immutable_but_readable() {
    let dict = MemoryDictionary::editable();
    let a = dict.create_synset(PartOfSpeech::Noun, 1, "a").unwrap();
    let b = dict.create_synset(PartOfSpeech::Noun, 2, "b").unwrap();
    dict.add_word(a, "alpha", 0).unwrap();
    dict.add_pointer(a, semantic(PointerType::Hypernym, a, b)).unwrap();

    let frozen = dict.frozen();
    assert!(!frozen.is_editable());

    // Reads work; resolution works.
    let synset = frozen.synset(PartOfSpeech::Noun, 1).unwrap();
    assert_eq!(synset.words.len(), 1);
    assert!(synset.pointers[0].resolve(&frozen).is_some());

    // Every mutation path is gated.
    assert!(matches!(
        frozen.add_pointer(a, semantic(PointerType::Hypernym, a, b)),
        Err(Error::InvalidState(_))
    ));
    assert!(matches!(frozen.remove_word(a, "alpha"), Err(Error::InvalidState(_))));
    assert!(matches!(frozen.set_offset(a, 99), Err(Error::InvalidState(_))));
    assert!(matches!(frozen.clear_pointers(a), Err(Error::InvalidState(_))));
}

// ============================================================================
// 4. Word/index-word discipline
// ============================================================================

#[test]
fn words_and_index_words_stay_in_sync() {
    let dict = MemoryDictionary::editable();
    let bank1 = dict.create_synset(PartOfSpeech::Noun, 1, "financial institution").unwrap();
    let bank2 = dict.create_synset(PartOfSpeech::Noun, 2, "sloping land beside water").unwrap();

    dict.add_word(bank1, "bank", 0).unwrap();
    dict.add_word(bank2, "bank", 0).unwrap();
    dict.add_word(bank2, "riverbank", 1).unwrap();

    let bank = dict.index_word(PartOfSpeech::Noun, "bank").unwrap();
    assert_eq!(bank.senses, vec![bank1, bank2]);
    assert_eq!(dict.index_word(PartOfSpeech::Noun, "riverbank").unwrap().senses, vec![bank2]);

    // Detaching the last sense leaves the entry, empty, until the caller
    // removes it explicitly.
    dict.remove_word(bank2, "riverbank").unwrap();
    assert!(dict.index_word(PartOfSpeech::Noun, "riverbank").unwrap().is_empty());
    assert!(dict.remove_index_word(PartOfSpeech::Noun, "riverbank").unwrap());
    assert!(dict.index_word(PartOfSpeech::Noun, "riverbank").is_none());
}

// ============================================================================
// 5. Offset rewriting keeps the graph consistent
// ============================================================================

#[test]
fn offset_change_follows_every_reference() {
    let dict = MemoryDictionary::editable();
    let a = dict.create_synset(PartOfSpeech::Noun, 1, "a").unwrap();
    let b = dict.create_synset(PartOfSpeech::Noun, 2, "b").unwrap();
    dict.add_word(b, "moved", 0).unwrap();
    dict.add_pointer(a, semantic(PointerType::Hypernym, a, b)).unwrap();

    let b2 = dict.set_offset(b, 777).unwrap();
    assert_eq!(b2, SynsetKey::new(PartOfSpeech::Noun, 777));

    // a's pointer descriptor follows the move and still resolves.
    let a_pointers = dict.synset_pointers(a);
    assert_eq!(a_pointers[0].target_key(), TargetKey::synset(b2));
    assert_eq!(
        a_pointers[0].resolve(&dict).unwrap().synset_key(),
        b2
    );

    // The index word follows too.
    assert_eq!(dict.index_word(PartOfSpeech::Noun, "moved").unwrap().senses, vec![b2]);

    // Removing the relocated pointer still finds and removes the mirror.
    dict.remove_pointer(a, &semantic(PointerType::Hypernym, a, b2)).unwrap();
    assert_eq!(dict.synset_pointers(b2).len(), 0);
}

// ============================================================================
// 6. Duplicate adds are idempotent end to end
// ============================================================================

#[test]
fn repeated_adds_do_not_duplicate() {
    let dict = MemoryDictionary::editable();
    let a = dict.create_synset(PartOfSpeech::Noun, 1, "a").unwrap();
    let b = dict.create_synset(PartOfSpeech::Noun, 2, "b").unwrap();

    for _ in 0..3 {
        dict.add_pointer(a, semantic(PointerType::Hypernym, a, b)).unwrap();
    }
    assert_eq!(dict.synset_pointers(a).len(), 1);
    assert_eq!(dict.synset_pointers(b).len(), 1);
}
