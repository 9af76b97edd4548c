use bincode::{Decode, Encode};

/// A value at its position in the original (unpadded) input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleValue {
    /// Position in the original input.
    pub index: u64,
    pub value: String,
}

impl MerkleValue {
    /// Create a value at `index`.
    pub fn new(index: u64, value: impl Into<String>) -> Self {
        MerkleValue {
            index,
            value: value.into(),
        }
    }

    /// Index a sequence of values by position.
    pub fn from_values<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| MerkleValue::new(i as u64, v))
            .collect()
    }
}

/// A hash at `(level, index)` in the tree; level 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleNode {
    /// Depth from the root.
    pub level: u32,
    /// Position within the level, left to right.
    pub index: u64,
    pub hash: String,
}

impl MerkleNode {
    /// Create a node.
    pub fn new(level: u32, index: u64, hash: impl Into<String>) -> Self {
        MerkleNode {
            level,
            index,
            hash: hash.into(),
        }
    }

    /// `(level, index)` coordinates, ordered root first, left to right.
    pub fn position(&self) -> (u32, u64) {
        (self.level, self.index)
    }

    pub(crate) fn is_root(&self) -> bool {
        self.level == 0 && self.index == 0
    }
}
