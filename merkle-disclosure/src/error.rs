use thiserror::Error;

use crate::HashError;

/// Errors from Merkle tree operations.
#[derive(Debug, Error)]
pub enum MerkleError {
    /// Value, exposed or proof index outside the tree or repeated.
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    /// Neither a disclosed value nor a proof node covers this leaf.
    #[error("missing proof data for node at level {level}, index {index}")]
    MissingProofData { level: u32, index: u64 },
    #[error("invalid proof: {0}")]
    InvalidProof(String),
    #[error("invalid tree: {0}")]
    InvalidTree(String),
    #[error("too many values ({count}) for a tree of max depth {max_depth}")]
    TooManyValues { count: u64, max_depth: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    /// The hash backend failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}
