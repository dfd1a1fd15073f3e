//! Discovered relationships — connecting paths between two synsets.

use serde::{Deserialize, Serialize};

use crate::list::PointerTargetNodeList;
use crate::model::{PointerType, SynsetKey};

/// How a relationship was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipFlavor {
    /// Both endpoints searched outward along the same relation and met.
    Symmetric,
    /// One side searched up, the other down; the frontiers met at a common
    /// ancestor sitting at this index of the node list.
    Asymmetric { common_parent_index: usize },
}

/// One connecting path between two synsets along a pointer kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    kind: PointerType,
    source: SynsetKey,
    target: SynsetKey,
    nodes: PointerTargetNodeList,
    flavor: RelationshipFlavor,
}

impl Relationship {
    pub fn symmetric(
        kind: PointerType,
        source: SynsetKey,
        target: SynsetKey,
        nodes: PointerTargetNodeList,
    ) -> Self {
        Self {
            kind,
            source,
            target,
            nodes,
            flavor: RelationshipFlavor::Symmetric,
        }
    }

    pub fn asymmetric(
        kind: PointerType,
        source: SynsetKey,
        target: SynsetKey,
        nodes: PointerTargetNodeList,
        common_parent_index: usize,
    ) -> Self {
        Self {
            kind,
            source,
            target,
            nodes,
            flavor: RelationshipFlavor::Asymmetric {
                common_parent_index,
            },
        }
    }

    pub fn kind(&self) -> PointerType {
        self.kind
    }

    pub fn source(&self) -> SynsetKey {
        self.source
    }

    pub fn target(&self) -> SynsetKey {
        self.target
    }

    pub fn nodes(&self) -> &PointerTargetNodeList {
        &self.nodes
    }

    pub fn flavor(&self) -> RelationshipFlavor {
        self.flavor
    }

    /// Path length in edges.
    pub fn depth(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Where the two frontiers met, for asymmetric discoveries.
    pub fn common_parent_index(&self) -> Option<usize> {
        match self.flavor {
            RelationshipFlavor::Asymmetric {
                common_parent_index,
            } => Some(common_parent_index),
            RelationshipFlavor::Symmetric => None,
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} relationship {} -> {} (depth {}):",
            self.kind,
            self.source,
            self.target,
            self.depth()
        )?;
        self.nodes.write_indented(f, 2, 2)
    }
}

/// Relationships ranked by increasing depth.
///
/// Insertion keeps the list depth-sorted while preserving discovery order
/// among equal depths, so results are deterministic for a deterministic
/// pointer ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipList(Vec<Relationship>);

impl RelationshipList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Relationship> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.0.iter()
    }

    pub fn contains(&self, relationship: &Relationship) -> bool {
        self.0.contains(relationship)
    }

    /// Insert in depth order, after any existing entry of the same depth.
    pub fn push(&mut self, relationship: Relationship) {
        let depth = relationship.depth();
        let position = self.0.partition_point(|r| r.depth() <= depth);
        self.0.insert(position, relationship);
    }

    /// Insert unless an equal relationship is already present
    /// (first-found-first-kept).
    pub fn push_unique(&mut self, relationship: Relationship) {
        if !self.contains(&relationship) {
            self.push(relationship);
        }
    }

    /// The first (lowest-depth) result.
    pub fn shallowest(&self) -> Option<&Relationship> {
        self.0.first()
    }

    /// The last (highest-depth) result.
    pub fn deepest(&self) -> Option<&Relationship> {
        self.0.last()
    }
}

impl std::ops::Index<usize> for RelationshipList {
    type Output = Relationship;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for RelationshipList {
    type Item = Relationship;
    type IntoIter = std::vec::IntoIter<Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RelationshipList {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
