//! Walking pointers through a dictionary into lists and trees.
//!
//! All walks are bounded: an explicit depth limit plus a visited set guard
//! against malformed cyclic data. Dangling pointers are skipped, never
//! fatal.

use hashbrown::HashSet;
use tracing::debug;

use crate::dict::Dictionary;
use crate::list::{PointerTargetNode, PointerTargetNodeList};
use crate::model::{PointerTarget, PointerType, Synset, SynsetKey};
use crate::tree::{PointerTargetTree, PointerTargetTreeNode, PointerTargetTreeNodeList};

/// Default expansion bound for tree builders. WordNet hierarchies are
/// shallow in practice; this caps the damage from a malformed resource.
pub const DEFAULT_TREE_DEPTH: usize = 32;

// ============================================================================
// Flat materialization
// ============================================================================

/// The immediate neighbors of a synset along one pointer kind.
pub fn targets(dict: &dyn Dictionary, synset: &Synset, kind: PointerType) -> PointerTargetNodeList {
    let mut list = PointerTargetNodeList::new();
    for pointer in synset.pointers.iter().filter(|p| p.kind() == kind) {
        match pointer.resolve(dict) {
            Some(target) => list.push(PointerTargetNode::new(target, kind)),
            None => debug!(%pointer, "skipping dangling pointer"),
        }
    }
    list
}

/// Every immediate neighbor of a synset, regardless of kind.
pub fn all_targets(dict: &dyn Dictionary, synset: &Synset) -> PointerTargetNodeList {
    let mut list = PointerTargetNodeList::new();
    for pointer in &synset.pointers {
        match pointer.resolve(dict) {
            Some(target) => list.push(PointerTargetNode::new(target, pointer.kind())),
            None => debug!(%pointer, "skipping dangling pointer"),
        }
    }
    list
}

// ============================================================================
// Tree materialization
// ============================================================================

/// Expand a synset into a tree along one pointer kind, to the given depth.
///
/// The root carries no kind of its own. A synset reached once is not
/// expanded again (visited-set cycle guard shared across branches).
pub fn target_tree(
    dict: &dyn Dictionary,
    synset: &Synset,
    kind: PointerType,
    depth: usize,
) -> PointerTargetTree {
    target_tree_with(dict, synset, kind, &[], depth)
}

/// Like [`target_tree`], additionally attaching each node's one-hop
/// neighbors along the `secondary` kinds as its orthogonal pointer list.
pub fn target_tree_with(
    dict: &dyn Dictionary,
    synset: &Synset,
    kind: PointerType,
    secondary: &[PointerType],
    depth: usize,
) -> PointerTargetTree {
    let mut visited = HashSet::new();
    visited.insert(synset.key);

    let mut root = PointerTargetTreeNode::new(PointerTargetNode::untyped(PointerTarget::Synset(
        synset.clone(),
    )));
    root.pointers = secondary_list(dict, synset, secondary);
    root.children = expand(dict, synset, kind, secondary, depth, &mut visited);
    PointerTargetTree::new(root)
}

fn expand(
    dict: &dyn Dictionary,
    synset: &Synset,
    kind: PointerType,
    secondary: &[PointerType],
    depth: usize,
    visited: &mut HashSet<SynsetKey>,
) -> Option<PointerTargetTreeNodeList> {
    if depth == 0 {
        return None;
    }
    let mut list = PointerTargetTreeNodeList::new();
    for pointer in synset.pointers.iter().filter(|p| p.kind() == kind) {
        let Some(target) = pointer.resolve(dict) else {
            debug!(%pointer, "skipping dangling pointer");
            continue;
        };
        if !visited.insert(target.synset_key()) {
            continue;
        }
        let mut node = PointerTargetTreeNode::new(PointerTargetNode::new(target.clone(), kind));
        if let PointerTarget::Synset(next) = &target {
            node.pointers = secondary_list(dict, next, secondary);
            node.children = expand(dict, next, kind, secondary, depth - 1, visited);
        }
        list.push(node);
    }
    (!list.is_empty()).then_some(list)
}

fn secondary_list(
    dict: &dyn Dictionary,
    synset: &Synset,
    kinds: &[PointerType],
) -> Option<PointerTargetTreeNodeList> {
    if kinds.is_empty() {
        return None;
    }
    let mut list = PointerTargetTreeNodeList::new();
    for &kind in kinds {
        for node in targets(dict, synset, kind) {
            list.push(PointerTargetTreeNode::new(node));
        }
    }
    (!list.is_empty()).then_some(list)
}
