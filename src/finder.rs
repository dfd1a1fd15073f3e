//! Relationship finding — bounded search for connecting paths.
//!
//! Two search shapes, chosen by the pointer kind's symmetry:
//!
//! - **Symmetric** (SIMILAR_TO, ANTONYM, ...): breadth-first over edges of
//!   the kind from the source until the target is reached; depth is the
//!   combined edge count.
//! - **Asymmetric** (HYPERNYM/HYPONYM and the other hierarchy pairs): both
//!   endpoints climb along the kind, and paths are joined at every common
//!   ancestor; the meeting point's position is recorded as the common
//!   parent index.
//!
//! All discovered paths are returned, ranked by depth with ties in
//! discovery order. Searches are bounded by an explicit depth guard; a
//! fruitless search that was truncated by the guard is the defined
//! `SearchExhausted` outcome rather than an unbounded loop.

use tracing::debug;

use crate::dict::Dictionary;
use crate::list::{PointerTargetNode, PointerTargetNodeList};
use crate::model::{PointerTarget, PointerType, Synset, SynsetKey};
use crate::relationship::{Relationship, RelationshipList};
use crate::{Error, Result};

/// Default search bound, in edges per direction.
pub const DEFAULT_SEARCH_DEPTH: usize = 32;

/// Find all relationships of the given kind between two synsets, bounded by
/// [`DEFAULT_SEARCH_DEPTH`].
pub fn find_relationships(
    dict: &dyn Dictionary,
    source: SynsetKey,
    target: SynsetKey,
    kind: PointerType,
) -> Result<RelationshipList> {
    find_relationships_with_depth(dict, source, target, kind, DEFAULT_SEARCH_DEPTH)
}

/// Find all relationships of the given kind between two synsets, each
/// search direction bounded by `max_depth` edges.
pub fn find_relationships_with_depth(
    dict: &dyn Dictionary,
    source: SynsetKey,
    target: SynsetKey,
    kind: PointerType,
    max_depth: usize,
) -> Result<RelationshipList> {
    let src = dict
        .synset_by_key(source)
        .ok_or_else(|| Error::InvalidArgument(format!("no synset {source}")))?;
    let tgt = dict
        .synset_by_key(target)
        .ok_or_else(|| Error::InvalidArgument(format!("no synset {target}")))?;
    if !kind.applies_to(source.pos) && !kind.applies_to(target.pos) {
        return Err(Error::InvalidArgument(format!(
            "{kind} applies to neither {} nor {}",
            source.pos.label(),
            target.pos.label()
        )));
    }

    let mut truncated = false;
    let results = match kind.symmetric() {
        Some(sym) if sym != kind => {
            asymmetric_search(dict, &src, &tgt, kind, sym, max_depth, &mut truncated)
        }
        // Self-symmetric kinds, and kinds with no counterpart at all, walk
        // one relation outward from the source.
        _ => symmetric_search(dict, &src, target, kind, max_depth, &mut truncated),
    };

    if results.is_empty() && truncated {
        return Err(Error::SearchExhausted {
            from: source,
            target,
            kind,
            max_depth,
        });
    }
    Ok(results)
}

/// Probe for a single-hop relationship between two synsets.
pub fn immediate_relationship(
    dict: &dyn Dictionary,
    source: SynsetKey,
    target: SynsetKey,
    kind: PointerType,
) -> Option<Relationship> {
    let src = dict.synset_by_key(source)?;
    for pointer in src.pointers.iter().filter(|p| p.kind() == kind) {
        let Some(resolved) = pointer.resolve(dict) else {
            continue;
        };
        if resolved.synset_key() == target {
            let mut nodes = PointerTargetNodeList::new();
            nodes.push(PointerTargetNode::new(PointerTarget::Synset(src), kind));
            nodes.push(PointerTargetNode::new(resolved, kind));
            return Some(Relationship::symmetric(kind, source, target, nodes));
        }
    }
    None
}

// ============================================================================
// Symmetric search
// ============================================================================

/// BFS over one relation, collecting every simple path that reaches the
/// target within the bound. Paths are found in increasing depth order, so
/// discovery order is also rank order.
fn symmetric_search(
    dict: &dyn Dictionary,
    src: &Synset,
    target: SynsetKey,
    kind: PointerType,
    max_depth: usize,
    truncated: &mut bool,
) -> RelationshipList {
    let mut results = RelationshipList::new();

    let mut start = PointerTargetNodeList::new();
    start.push(PointerTargetNode::new(
        PointerTarget::Synset(src.clone()),
        kind,
    ));
    let mut frontier = vec![start];

    for _ in 0..max_depth {
        let mut next = Vec::new();
        for path in &frontier {
            let tip = path.last().expect("search path never empty").synset_key();
            let Some(tip_synset) = dict.synset_by_key(tip) else {
                continue;
            };
            for pointer in tip_synset.pointers.iter().filter(|p| p.kind() == kind) {
                let Some(resolved) = pointer.resolve(dict) else {
                    debug!(%pointer, "skipping dangling pointer in search");
                    continue;
                };
                let step = resolved.synset_key();
                if path.contains_synset(step) {
                    continue;
                }
                let mut extended = path.deep_clone();
                extended.push(PointerTargetNode::new(resolved, kind));
                if step == target {
                    results.push_unique(Relationship::symmetric(
                        kind, src.key, target, extended,
                    ));
                } else {
                    next.push(extended);
                }
            }
        }
        frontier = next;
        if frontier.is_empty() {
            break;
        }
    }
    if !frontier.is_empty() {
        *truncated = true;
    }
    results
}

// ============================================================================
// Asymmetric search
// ============================================================================

/// Climb from both endpoints, join at common ancestors.
fn asymmetric_search(
    dict: &dyn Dictionary,
    src: &Synset,
    tgt: &Synset,
    kind: PointerType,
    mirror_kind: PointerType,
    max_depth: usize,
    truncated: &mut bool,
) -> RelationshipList {
    let src_paths = ancestor_paths(dict, src, kind, max_depth, truncated);
    let tgt_paths = ancestor_paths(dict, tgt, kind, max_depth, truncated);

    let mut results = RelationshipList::new();
    for sp in &src_paths {
        for tp in &tgt_paths {
            let Some((i, j)) = first_common(sp, tp) else {
                continue;
            };
            // source → common ancestor along `kind`, then back down to the
            // target along the mirror kind.
            let mut nodes = PointerTargetNodeList::with_capacity(i + j + 1);
            for k in 0..=i {
                nodes.push(sp[k].clone());
            }
            for k in (0..j).rev() {
                let mut node = tp[k].clone();
                node.kind = Some(mirror_kind);
                nodes.push(node);
            }
            results.push_unique(Relationship::asymmetric(
                kind, src.key, tgt.key, nodes, i,
            ));
        }
    }
    results
}

/// All maximal upward paths from a synset along one kind, each starting
/// with the synset itself (untagged). Cycle-guarded per path; sets the
/// truncation flag when the depth bound cut a path short.
fn ancestor_paths(
    dict: &dyn Dictionary,
    synset: &Synset,
    kind: PointerType,
    max_depth: usize,
    truncated: &mut bool,
) -> Vec<PointerTargetNodeList> {
    let mut out = Vec::new();
    let mut start = PointerTargetNodeList::new();
    start.push(PointerTargetNode::untyped(PointerTarget::Synset(
        synset.clone(),
    )));
    climb(dict, synset, kind, max_depth, &start, &mut out, truncated);
    out
}

fn climb(
    dict: &dyn Dictionary,
    synset: &Synset,
    kind: PointerType,
    depth_left: usize,
    path: &PointerTargetNodeList,
    out: &mut Vec<PointerTargetNodeList>,
    truncated: &mut bool,
) {
    if depth_left == 0 {
        if synset.pointers.iter().any(|p| p.kind() == kind) {
            *truncated = true;
        }
        out.push(path.deep_clone());
        return;
    }
    let mut extended = false;
    for pointer in synset.pointers.iter().filter(|p| p.kind() == kind) {
        let Some(resolved) = pointer.resolve(dict) else {
            debug!(%pointer, "skipping dangling pointer in climb");
            continue;
        };
        if path.contains_synset(resolved.synset_key()) {
            continue;
        }
        extended = true;
        let mut next = path.deep_clone();
        next.push(PointerTargetNode::new(resolved.clone(), kind));
        match resolved {
            PointerTarget::Synset(next_synset) => {
                climb(dict, &next_synset, kind, depth_left - 1, &next, out, truncated)
            }
            PointerTarget::Word(_) => out.push(next),
        }
    }
    if !extended {
        out.push(path.deep_clone());
    }
}

/// The earliest pair of indices at which two upward paths meet: smallest
/// source-side index first, then smallest target-side index.
fn first_common(sp: &PointerTargetNodeList, tp: &PointerTargetNodeList) -> Option<(usize, usize)> {
    for (i, sn) in sp.iter().enumerate() {
        for (j, tn) in tp.iter().enumerate() {
            if sn.synset_key() == tn.synset_key() {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::MemoryDictionary;
    use crate::model::{PartOfSpeech, Pointer, TargetKey};

    fn link(dict: &MemoryDictionary, kind: PointerType, from: SynsetKey, to: SynsetKey) {
        dict.add_pointer(
            from,
            Pointer::new(kind, TargetKey::synset(from), TargetKey::synset(to)),
        )
        .unwrap();
    }

    fn noun(dict: &MemoryDictionary, offset: u64) -> SynsetKey {
        dict.create_synset(PartOfSpeech::Noun, offset, format!("synset {offset}"))
            .unwrap()
    }

    fn adj(dict: &MemoryDictionary, offset: u64) -> SynsetKey {
        dict.create_synset(PartOfSpeech::Adjective, offset, format!("synset {offset}"))
            .unwrap()
    }

    #[test]
    fn asymmetric_common_ancestor() {
        let dict = MemoryDictionary::editable();
        // dog -> canine -> carnivore <- feline <- cat
        let dog = noun(&dict, 1);
        let canine = noun(&dict, 2);
        let carnivore = noun(&dict, 3);
        let feline = noun(&dict, 4);
        let cat = noun(&dict, 5);
        link(&dict, PointerType::Hypernym, dog, canine);
        link(&dict, PointerType::Hypernym, canine, carnivore);
        link(&dict, PointerType::Hypernym, cat, feline);
        link(&dict, PointerType::Hypernym, feline, carnivore);

        let found = find_relationships(&dict, dog, cat, PointerType::Hypernym).unwrap();
        assert_eq!(found.len(), 1);

        let rel = found.shallowest().unwrap();
        assert_eq!(rel.depth(), 4);
        assert_eq!(rel.common_parent_index(), Some(2));
        assert_eq!(rel.nodes()[2].synset_key(), carnivore);
        // Descending side is tagged with the mirror kind.
        assert_eq!(rel.nodes()[3].kind, Some(PointerType::Hyponym));
        assert_eq!(rel.nodes()[4].synset_key(), cat);
    }

    #[test]
    fn target_on_source_ancestor_line() {
        let dict = MemoryDictionary::editable();
        let a = noun(&dict, 1);
        let b = noun(&dict, 2);
        let c = noun(&dict, 3);
        link(&dict, PointerType::Hypernym, a, b);
        link(&dict, PointerType::Hypernym, b, c);

        let found = find_relationships(&dict, a, c, PointerType::Hypernym).unwrap();
        let rel = found.shallowest().unwrap();
        assert_eq!(rel.depth(), 2);
        // The common ancestor IS the target.
        assert_eq!(rel.common_parent_index(), Some(2));
    }

    #[test]
    fn all_paths_ranked_by_depth() {
        let dict = MemoryDictionary::editable();
        // Two routes from a to z: short via s, long via l1 -> l2.
        let a = noun(&dict, 1);
        let s = noun(&dict, 2);
        let l1 = noun(&dict, 3);
        let l2 = noun(&dict, 4);
        let z = noun(&dict, 5);
        link(&dict, PointerType::Hypernym, a, s);
        link(&dict, PointerType::Hypernym, s, z);
        link(&dict, PointerType::Hypernym, a, l1);
        link(&dict, PointerType::Hypernym, l1, l2);
        link(&dict, PointerType::Hypernym, l2, z);

        let found = find_relationships(&dict, a, z, PointerType::Hypernym).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found.shallowest().unwrap().depth(), 2);
        assert_eq!(found.deepest().unwrap().depth(), 3);
    }

    #[test]
    fn symmetric_search_finds_all_simple_paths() {
        let dict = MemoryDictionary::editable();
        let a = adj(&dict, 1);
        let b = adj(&dict, 2);
        let c = adj(&dict, 3);
        // a - b - c plus a - c directly; SIMILAR_TO mirrors itself, so each
        // link is walkable from both ends.
        link(&dict, PointerType::SimilarTo, a, b);
        link(&dict, PointerType::SimilarTo, b, c);
        link(&dict, PointerType::SimilarTo, a, c);

        let found = find_relationships(&dict, a, c, PointerType::SimilarTo).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found.shallowest().unwrap().depth(), 1);
        assert_eq!(found.deepest().unwrap().depth(), 2);
        assert!(found.iter().all(|r| r.common_parent_index().is_none()));
    }

    #[test]
    fn search_exhausted_when_bound_truncates() {
        let dict = MemoryDictionary::editable();
        let keys: Vec<SynsetKey> = (1..=10).map(|i| adj(&dict, i)).collect();
        for pair in keys.windows(2) {
            link(&dict, PointerType::SimilarTo, pair[0], pair[1]);
        }
        let far = keys[9];

        let err = find_relationships_with_depth(&dict, keys[0], far, PointerType::SimilarTo, 3)
            .unwrap_err();
        assert!(matches!(err, Error::SearchExhausted { max_depth: 3, .. }));

        // A generous bound succeeds on the same data.
        let found =
            find_relationships_with_depth(&dict, keys[0], far, PointerType::SimilarTo, 16).unwrap();
        assert_eq!(found.shallowest().unwrap().depth(), 9);
    }

    #[test]
    fn unrelated_synsets_give_empty_results() {
        let dict = MemoryDictionary::editable();
        let a = noun(&dict, 1);
        let b = noun(&dict, 2);

        let found = find_relationships(&dict, a, b, PointerType::Hypernym).unwrap();
        assert!(found.is_empty());
        assert!(found.shallowest().is_none());
    }

    #[test]
    fn dangling_edges_are_skipped() {
        let dict = MemoryDictionary::editable();
        let a = noun(&dict, 1);
        let b = noun(&dict, 2);
        let ghost = SynsetKey::new(PartOfSpeech::Noun, 999);
        link(&dict, PointerType::Hypernym, a, ghost);
        link(&dict, PointerType::Hypernym, a, b);

        let found = find_relationships(&dict, a, b, PointerType::Hypernym).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.shallowest().unwrap().depth(), 1);
    }

    #[test]
    fn inapplicable_kind_is_rejected() {
        let dict = MemoryDictionary::editable();
        let a = noun(&dict, 1);
        let b = noun(&dict, 2);
        let err = find_relationships(&dict, a, b, PointerType::SimilarTo).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn immediate_probe() {
        let dict = MemoryDictionary::editable();
        let a = noun(&dict, 1);
        let b = noun(&dict, 2);
        let c = noun(&dict, 3);
        link(&dict, PointerType::Hypernym, a, b);

        let hit = immediate_relationship(&dict, a, b, PointerType::Hypernym).unwrap();
        assert_eq!(hit.depth(), 1);
        assert!(immediate_relationship(&dict, a, c, PointerType::Hypernym).is_none());
    }
}
