use crate::{
    MerkleError, MerkleNode,
    helper::{leaf_level, level_width},
};

/// Read-only view over a node list produced by `Merkle::build`.
///
/// Nodes are stored root first, level by level, left to right, and only
/// nodes covering at least one value are present. `offsets[level]` is the
/// position of the first node of `level`; `offsets[max_level + 1]` is the
/// total node count.
#[derive(Debug)]
pub(crate) struct TreeLayout<'a> {
    nodes: &'a [MerkleNode],
    leaf_count: u64,
    max_level: u32,
    offsets: Vec<usize>,
}

impl<'a> TreeLayout<'a> {
    /// Check that `nodes` has exactly the shape `build` emits and index it.
    pub(crate) fn parse(nodes: &'a [MerkleNode]) -> Result<Self, MerkleError> {
        let root = nodes
            .first()
            .ok_or_else(|| MerkleError::InvalidTree("empty node list".into()))?;
        if !root.is_root() {
            return Err(MerkleError::InvalidTree(format!(
                "first node must be the root, got level {} index {}",
                root.level, root.index
            )));
        }

        // An empty tree is just its root; otherwise the last level holds
        // one node per value.
        let (leaf_count, max_level) = match nodes.last() {
            Some(last) if nodes.len() > 1 => {
                let max_level = last.level;
                let leaf_count = nodes
                    .iter()
                    .rev()
                    .take_while(|node| node.level == max_level)
                    .count() as u64;
                (leaf_count, max_level)
            }
            _ => (0, leaf_level(0)),
        };

        if leaf_level(leaf_count) != max_level {
            return Err(MerkleError::InvalidTree(format!(
                "{} leaves cannot sit at level {}",
                leaf_count, max_level
            )));
        }

        let mut offsets = Vec::with_capacity(max_level as usize + 2);
        let mut position = 0usize;
        for level in 0..=max_level {
            offsets.push(position);
            for index in 0..level_width(leaf_count, level, max_level) {
                let node = nodes.get(position).ok_or_else(|| {
                    MerkleError::InvalidTree(format!(
                        "missing node at level {}, index {}",
                        level, index
                    ))
                })?;
                if node.position() != (level, index) {
                    return Err(MerkleError::InvalidTree(format!(
                        "expected node at level {}, index {} but found level {}, index {}",
                        level, index, node.level, node.index
                    )));
                }
                position += 1;
            }
        }
        offsets.push(position);

        if position != nodes.len() {
            return Err(MerkleError::InvalidTree(format!(
                "{} unexpected trailing nodes",
                nodes.len() - position
            )));
        }

        Ok(TreeLayout {
            nodes,
            leaf_count,
            max_level,
            offsets,
        })
    }

    pub(crate) fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    pub(crate) fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Node at `(level, index)`, or `None` if it is filler-only or outside
    /// the tree.
    pub(crate) fn get(&self, level: u32, index: u64) -> Option<&'a MerkleNode> {
        if level > self.max_level {
            return None;
        }
        let start = self.offsets[level as usize];
        let end = self.offsets[level as usize + 1];
        let width = (end - start) as u64;
        if index >= width {
            return None;
        }
        self.nodes.get(start + index as usize)
    }
}
