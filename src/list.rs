//! Flattened traversal paths — an ordered list of typed nodes.

use serde::{Deserialize, Serialize};

use crate::model::{PointerTarget, PointerType, SynsetKey, TargetKey};

/// One step of a traversal path: a target plus the pointer kind that
/// produced it. The kind is `None` for a type-agnostic root — a tree root
/// may fan out along several kinds at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTargetNode {
    pub target: PointerTarget,
    pub kind: Option<PointerType>,
}

impl PointerTargetNode {
    pub fn new(target: PointerTarget, kind: PointerType) -> Self {
        Self {
            target,
            kind: Some(kind),
        }
    }

    pub fn untyped(target: PointerTarget) -> Self {
        Self { target, kind: None }
    }

    pub fn synset_key(&self) -> SynsetKey {
        self.target.synset_key()
    }
}

impl std::fmt::Display for PointerTargetNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{} -> {}", kind, self.target),
            None => write!(f, "{}", self.target),
        }
    }
}

/// An ordered, reversible sequence of nodes — one traversal path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerTargetNodeList(Vec<PointerTargetNode>);

impl PointerTargetNodeList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, node: PointerTargetNode) {
        self.0.push(node);
    }

    pub fn get(&self, index: usize) -> Option<&PointerTargetNode> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PointerTargetNode> {
        self.0.get_mut(index)
    }

    pub fn first(&self) -> Option<&PointerTargetNode> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PointerTargetNode> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointerTargetNode> {
        self.0.iter()
    }

    pub fn contains(&self, node: &PointerTargetNode) -> bool {
        self.0.contains(node)
    }

    /// Whether any node on the path sits in the given synset. The cycle
    /// check used by simple-path searches.
    pub fn contains_synset(&self, key: SynsetKey) -> bool {
        self.0.iter().any(|n| n.synset_key() == key)
    }

    pub fn contains_target(&self, key: TargetKey) -> bool {
        self.0.iter().any(|n| n.target.key() == key)
    }

    /// A new list with the element order inverted. The original is left
    /// untouched.
    pub fn reverse(&self) -> Self {
        Self(self.0.iter().rev().cloned().collect())
    }

    /// Element-wise clone. Nodes are value types, so this is a full copy
    /// with no sharing.
    pub fn deep_clone(&self) -> Self {
        Self(self.0.iter().cloned().collect())
    }

    // ========================================================================
    // Printing
    // ========================================================================

    /// Render each node on its own line, indenting by `indent` spaces and
    /// growing by `increment` per node.
    pub fn write_indented<W: std::fmt::Write>(
        &self,
        w: &mut W,
        indent: usize,
        increment: usize,
    ) -> std::fmt::Result {
        self.write_indented_from(w, 0, indent, increment)
    }

    /// Same, starting from an arbitrary position. The list itself carries no
    /// cursor, so printing from any position is side-effect free.
    pub fn write_indented_from<W: std::fmt::Write>(
        &self,
        w: &mut W,
        start: usize,
        indent: usize,
        increment: usize,
    ) -> std::fmt::Result {
        let mut pad = indent;
        for node in self.0.iter().skip(start) {
            writeln!(w, "{:pad$}{node}", "")?;
            pad += increment;
        }
        Ok(())
    }
}

impl std::fmt::Display for PointerTargetNodeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f, 0, 2)
    }
}

impl std::ops::Index<usize> for PointerTargetNodeList {
    type Output = PointerTargetNode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PointerTargetNodeList {
    type Item = PointerTargetNode;
    type IntoIter = std::vec::IntoIter<PointerTargetNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointerTargetNodeList {
    type Item = &'a PointerTargetNode;
    type IntoIter = std::slice::Iter<'a, PointerTargetNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<PointerTargetNode> for PointerTargetNodeList {
    fn from_iter<T: IntoIterator<Item = PointerTargetNode>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
