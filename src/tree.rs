//! Hierarchical traversal results — multi-branch trees of pointer targets.
//!
//! A tree node has two orthogonal axes: `children` continues the primary
//! traversal (hyponyms-of-hyponyms), while `pointers` hangs a secondary
//! relation off the same node (e.g. the synonyms of each hyponym). A list is
//! "valid" only when present AND non-empty — absence and emptiness behave
//! identically everywhere.

use serde::{Deserialize, Serialize};

use crate::list::{PointerTargetNode, PointerTargetNodeList};
use crate::model::{PointerTarget, PointerType, TargetKey};
use crate::{Error, Result};

// ============================================================================
// PointerTargetTreeNode
// ============================================================================

/// A node of a traversal tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTargetTreeNode {
    pub node: PointerTargetNode,
    /// Primary branching axis.
    pub children: Option<PointerTargetTreeNodeList>,
    /// Secondary axis, orthogonal to the main traversal.
    pub pointers: Option<PointerTargetTreeNodeList>,
}

impl PointerTargetTreeNode {
    pub fn new(node: PointerTargetNode) -> Self {
        Self {
            node,
            children: None,
            pointers: None,
        }
    }

    pub fn leaf(target: PointerTarget, kind: PointerType) -> Self {
        Self::new(PointerTargetNode::new(target, kind))
    }

    pub fn target_key(&self) -> TargetKey {
        self.node.target.key()
    }

    /// Present and non-empty.
    pub fn has_valid_children(&self) -> bool {
        self.valid_children().is_some()
    }

    pub fn has_valid_pointers(&self) -> bool {
        self.valid_pointers().is_some()
    }

    pub fn valid_children(&self) -> Option<&PointerTargetTreeNodeList> {
        self.children.as_ref().filter(|c| !c.is_empty())
    }

    pub fn valid_pointers(&self) -> Option<&PointerTargetTreeNodeList> {
        self.pointers.as_ref().filter(|p| !p.is_empty())
    }

    /// Deep clone is deliberately not implemented for tree nodes; the
    /// failure is hard, never a silent shallow copy.
    pub fn deep_clone(&self) -> Result<Self> {
        Err(Error::Unsupported(
            "deep clone of tree nodes is not implemented".into(),
        ))
    }

    /// Pre-order first-match over this node and its subtree: the node's own
    /// predicate runs before any descent.
    pub fn first_match<R>(
        &self,
        f: &mut impl FnMut(&PointerTargetTreeNode) -> Option<R>,
    ) -> Option<R> {
        if let Some(result) = f(self) {
            return Some(result);
        }
        self.valid_children().and_then(|c| c.first_match(f))
    }

    /// Exhaustive pre-order match over this node and its subtree.
    pub fn all_matches<R>(
        &self,
        f: &mut impl FnMut(&PointerTargetTreeNode) -> Option<R>,
        out: &mut Vec<R>,
    ) {
        if let Some(result) = f(self) {
            out.push(result);
        }
        if let Some(children) = self.valid_children() {
            children.all_matches(f, out);
        }
    }
}

impl std::fmt::Display for PointerTargetTreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node)
    }
}

// ============================================================================
// PointerTargetTreeNodeList
// ============================================================================

/// An ordered list of sibling tree nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTargetTreeNodeList(Vec<PointerTargetTreeNode>);

impl PointerTargetTreeNodeList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, node: PointerTargetTreeNode) {
        self.0.push(node);
    }

    pub fn get(&self, index: usize) -> Option<&PointerTargetTreeNode> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointerTargetTreeNode> {
        self.0.iter()
    }

    /// Propagates the tree-node deep-clone refusal.
    pub fn deep_clone(&self) -> Result<Self> {
        self.0
            .iter()
            .map(PointerTargetTreeNode::deep_clone)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// First non-null predicate result in pre-order: each sibling's
    /// predicate is consulted before descending into that sibling's
    /// children, and the search stops dead on the first hit.
    pub fn first_match<R>(
        &self,
        f: &mut impl FnMut(&PointerTargetTreeNode) -> Option<R>,
    ) -> Option<R> {
        for node in &self.0 {
            if let Some(result) = f(node) {
                return Some(result);
            }
            if let Some(children) = node.valid_children() {
                if let Some(result) = children.first_match(f) {
                    return Some(result);
                }
            }
        }
        None
    }

    /// Every non-null predicate result, in document (pre-)order.
    pub fn all_matches<R>(
        &self,
        f: &mut impl FnMut(&PointerTargetTreeNode) -> Option<R>,
        out: &mut Vec<R>,
    ) {
        for node in &self.0 {
            if let Some(result) = f(node) {
                out.push(result);
            }
            if let Some(children) = node.valid_children() {
                children.all_matches(f, out);
            }
        }
    }

    /// First node addressing the given target, pre-order.
    pub fn find_first(&self, key: TargetKey) -> Option<&PointerTargetTreeNode> {
        for node in &self.0 {
            if node.target_key() == key {
                return Some(node);
            }
            if let Some(children) = node.valid_children() {
                if let Some(found) = children.find_first(key) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Every node addressing the given target, pre-order.
    pub fn find_all(&self, key: TargetKey) -> Vec<&PointerTargetTreeNode> {
        let mut out = Vec::new();
        self.collect_matching(key, &mut out);
        out
    }

    fn collect_matching<'a>(&'a self, key: TargetKey, out: &mut Vec<&'a PointerTargetTreeNode>) {
        for node in &self.0 {
            if node.target_key() == key {
                out.push(node);
            }
            if let Some(children) = node.valid_children() {
                children.collect_matching(key, out);
            }
        }
    }

    /// Flatten every root-to-leaf path below `prefix` into `out`. The
    /// accumulator is cloned at each branch point so sibling paths share no
    /// state.
    fn flatten_into(&self, prefix: &PointerTargetNodeList, out: &mut Vec<PointerTargetNodeList>) {
        for node in &self.0 {
            let mut path = prefix.deep_clone();
            path.push(node.node.clone());
            match node.valid_children() {
                Some(children) => children.flatten_into(&path, out),
                None => out.push(path),
            }
        }
    }
}

impl std::ops::Index<usize> for PointerTargetTreeNodeList {
    type Output = PointerTargetTreeNode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PointerTargetTreeNodeList {
    type Item = PointerTargetTreeNode;
    type IntoIter = std::vec::IntoIter<PointerTargetTreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointerTargetTreeNodeList {
    type Item = &'a PointerTargetTreeNode;
    type IntoIter = std::slice::Iter<'a, PointerTargetTreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<PointerTargetTreeNode> for PointerTargetTreeNodeList {
    fn from_iter<T: IntoIterator<Item = PointerTargetTreeNode>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// PointerTargetTree
// ============================================================================

/// A whole traversal tree. The root is type-agnostic — it may fan out along
/// several pointer kinds at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTargetTree {
    root: PointerTargetTreeNode,
}

impl PointerTargetTree {
    pub fn new(root: PointerTargetTreeNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PointerTargetTreeNode {
        &self.root
    }

    /// Check the root, then its children, pre-order, stopping on the first
    /// hit.
    pub fn first_match<R>(
        &self,
        mut f: impl FnMut(&PointerTargetTreeNode) -> Option<R>,
    ) -> Option<R> {
        self.root.first_match(&mut f)
    }

    /// Every hit, in document order.
    pub fn all_matches<R>(
        &self,
        mut f: impl FnMut(&PointerTargetTreeNode) -> Option<R>,
    ) -> Vec<R> {
        let mut out = Vec::new();
        self.root.all_matches(&mut f, &mut out);
        out
    }

    pub fn find_first(&self, key: TargetKey) -> Option<&PointerTargetTreeNode> {
        if self.root.target_key() == key {
            return Some(&self.root);
        }
        self.root.valid_children()?.find_first(key)
    }

    pub fn find_all(&self, key: TargetKey) -> Vec<&PointerTargetTreeNode> {
        let mut out = Vec::new();
        if self.root.target_key() == key {
            out.push(&self.root);
        }
        if let Some(children) = self.root.valid_children() {
            children.collect_matching(key, &mut out);
        }
        out
    }

    /// Flatten the tree into one path per leaf.
    ///
    /// The root is type-agnostic, but each flattened path follows a single
    /// relation, so a path of two or more nodes gets its root entry retagged
    /// with the kind of its second node — the path's actual relation.
    pub fn to_list(&self) -> Vec<PointerTargetNodeList> {
        let mut out = Vec::new();
        let mut prefix = PointerTargetNodeList::new();
        prefix.push(self.root.node.clone());
        match self.root.valid_children() {
            Some(children) => children.flatten_into(&prefix, &mut out),
            None => out.push(prefix),
        }

        for path in &mut out {
            if path.len() >= 2 {
                let kind = path[1].kind;
                if let Some(root) = path.get_mut(0) {
                    root.kind = kind;
                }
            }
        }
        out
    }
}
