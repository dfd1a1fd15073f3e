//! End-to-end traversal and relationship-search scenarios on realistic
//! hierarchies.

use pretty_assertions::assert_eq;

use wngraph::finder;
use wngraph::traverse;
use wngraph::{
    Dictionary, Error, MemoryDictionary, PartOfSpeech, Pointer, PointerType, SynsetKey, TargetKey,
};

fn up(dict: &MemoryDictionary, from: SynsetKey, to: SynsetKey) {
    dict.add_pointer(
        from,
        Pointer::new(
            PointerType::Hypernym,
            TargetKey::synset(from),
            TargetKey::synset(to),
        ),
    )
    .unwrap();
}

/// A strictly linear hypernym chain of `len` noun synsets, bottom first.
fn chain(dict: &MemoryDictionary, len: u64) -> Vec<SynsetKey> {
    let keys: Vec<SynsetKey> = (0..len)
        .map(|i| {
            dict.create_synset(PartOfSpeech::Noun, 100 + i, format!("level {i}"))
                .unwrap()
        })
        .collect();
    for pair in keys.windows(2) {
        up(dict, pair[0], pair[1]);
    }
    keys
}

// ============================================================================
// 1. Linear chain: depth reporting and ranking
// ============================================================================

#[test]
fn sixteen_link_chain_reports_exact_depth() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 16);

    let list = finder::find_relationships(&dict, keys[0], keys[15], PointerType::Hypernym).unwrap();
    assert_eq!(list.len(), 1);

    let rel = list.shallowest().unwrap();
    assert_eq!(rel.depth(), 15);
    assert_eq!(rel.nodes().len(), 16);
    assert_eq!(rel.source(), keys[0]);
    assert_eq!(rel.target(), keys[15]);

    // The path visits every link in order.
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(rel.nodes()[i].synset_key(), *key);
    }
}

#[test]
fn shortcut_edge_wins_the_shallowest_slot() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 6);
    // A shortcut from the bottom straight to level 4.
    up(&dict, keys[0], keys[4]);

    let list = finder::find_relationships(&dict, keys[0], keys[5], PointerType::Hypernym).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.shallowest().unwrap().depth(), 2);
    assert_eq!(list.deepest().unwrap().depth(), 5);
}

// ============================================================================
// 2. Common-ancestor search
// ============================================================================

#[test]
fn cousins_meet_at_their_common_ancestor() {
    let dict = MemoryDictionary::editable();
    let animal = dict.create_synset(PartOfSpeech::Noun, 1, "animal").unwrap();
    let canine = dict.create_synset(PartOfSpeech::Noun, 2, "canine").unwrap();
    let feline = dict.create_synset(PartOfSpeech::Noun, 3, "feline").unwrap();
    let dog = dict.create_synset(PartOfSpeech::Noun, 4, "dog").unwrap();
    let cat = dict.create_synset(PartOfSpeech::Noun, 5, "cat").unwrap();
    up(&dict, canine, animal);
    up(&dict, feline, animal);
    up(&dict, dog, canine);
    up(&dict, cat, feline);

    let list = finder::find_relationships(&dict, dog, cat, PointerType::Hypernym).unwrap();
    assert_eq!(list.len(), 1);

    let rel = list.shallowest().unwrap();
    assert_eq!(rel.depth(), 4);
    assert_eq!(rel.common_parent_index(), Some(2));
    assert_eq!(rel.nodes()[2].synset_key(), animal);

    // Ascending half keeps the search kind, descending half is retagged
    // with the mirror kind.
    assert_eq!(rel.nodes()[1].kind, Some(PointerType::Hypernym));
    assert_eq!(rel.nodes()[3].kind, Some(PointerType::Hyponym));
    assert_eq!(rel.nodes()[4].synset_key(), cat);
}

// ============================================================================
// 3. Exhaustion and absence are different outcomes
// ============================================================================

#[test]
fn truncated_search_with_no_hit_is_exhausted() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 12);

    let err = finder::find_relationships_with_depth(
        &dict,
        keys[0],
        keys[11],
        PointerType::Hypernym,
        4,
    )
    .unwrap_err();
    assert!(matches!(err, Error::SearchExhausted { max_depth: 4, .. }));

    // A wider bound succeeds on the same data.
    let list =
        finder::find_relationships_with_depth(&dict, keys[0], keys[11], PointerType::Hypernym, 16)
            .unwrap();
    assert_eq!(list.shallowest().unwrap().depth(), 11);
}

#[test]
fn disconnected_synsets_yield_empty_not_error() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 3);
    let island = dict.create_synset(PartOfSpeech::Noun, 999, "island").unwrap();

    let list = finder::find_relationships(&dict, keys[0], island, PointerType::Hypernym).unwrap();
    assert!(list.is_empty());
}

// ============================================================================
// 4. Tree expansion and flattening
// ============================================================================

#[test]
fn hypernym_tree_flattens_with_retagged_roots() {
    let dict = MemoryDictionary::editable();
    let entity = dict.create_synset(PartOfSpeech::Noun, 1, "entity").unwrap();
    let object = dict.create_synset(PartOfSpeech::Noun, 2, "object").unwrap();
    let idea = dict.create_synset(PartOfSpeech::Noun, 3, "idea").unwrap();
    let rock = dict.create_synset(PartOfSpeech::Noun, 4, "rock").unwrap();
    up(&dict, rock, object);
    up(&dict, rock, idea);
    up(&dict, object, entity);
    up(&dict, idea, entity);

    let root = dict.synset(PartOfSpeech::Noun, 4).unwrap();
    let tree = traverse::target_tree(&dict, &root, PointerType::Hypernym, 10);

    let paths = tree.to_list();
    // The visited-set guard expands entity under whichever parent reaches
    // it first, so one branch ends early.
    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert_eq!(path[0].synset_key(), rock);
        // Root entries are retagged with the path's relation.
        assert_eq!(path[0].kind, Some(PointerType::Hypernym));
    }
    let longest = paths.iter().map(|p| p.len()).max().unwrap();
    assert_eq!(longest, 3);
}

#[test]
fn tree_search_stops_at_first_match() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 5);
    let root = dict.synset_by_key(keys[0]).unwrap();
    let tree = traverse::target_tree(&dict, &root, PointerType::Hypernym, 10);

    let found = tree.find_first(TargetKey::synset(keys[3])).unwrap();
    assert_eq!(found.target_key(), TargetKey::synset(keys[3]));
    assert!(tree.find_first(TargetKey::synset(SynsetKey::new(PartOfSpeech::Verb, 1))).is_none());
}

// ============================================================================
// 5. Dangling pointers are skipped everywhere
// ============================================================================

#[test]
fn removed_target_never_breaks_a_walk() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 4);
    // Dangle the middle of the chain.
    dict.remove_synset(keys[2]).unwrap();

    let root = dict.synset_by_key(keys[1]).unwrap();
    assert!(traverse::targets(&dict, &root, PointerType::Hypernym).is_empty());

    let tree = traverse::target_tree(&dict, &root, PointerType::Hypernym, 10);
    assert!(!tree.root().has_valid_children());

    // The finder sees the break as absence, not an error, once the search
    // space is exhausted below the bound.
    let list = finder::find_relationships(&dict, keys[0], keys[3], PointerType::Hypernym).unwrap();
    assert!(list.is_empty());
}

// ============================================================================
// 6. Indented rendering
// ============================================================================

#[test]
fn paths_render_one_node_per_line() {
    let dict = MemoryDictionary::editable();
    let keys = chain(&dict, 3);
    let root = dict.synset_by_key(keys[0]).unwrap();
    let tree = traverse::target_tree(&dict, &root, PointerType::Hypernym, 10);

    let path = &tree.to_list()[0];
    let mut out = String::new();
    path.write_indented(&mut out, 0, 2).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.len() - line.trim_start().len(), 2 * i);
        assert!(line.contains("hypernym"));
    }
}
