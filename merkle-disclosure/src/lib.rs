//! Selective-disclosure Merkle tree.
//!
//! A binary hash tree over an ordered list of string values, padded to a
//! power-of-two leaf count that always keeps at least one filler slot
//! (`"-"` by default). The engine supports three operations:
//!
//! - [`Merkle::build`]: hash every value and combine pairs level by level,
//!   returning the tree as a flat, root-first list of [`MerkleNode`]s.
//! - [`Merkle::pack`]: select the minimal set of nodes needed to verify a
//!   subset of disclosed values against the root.
//! - [`Merkle::calculate`]: recompute the root from disclosed values and the
//!   packed proof nodes.
//!
//! Nodes whose subtree covers only filler slots are never emitted: their
//! hashes depend on nothing but their height, so a verifier that knows the
//! total value count derives them itself.
//!
//! The hash function is injected through [`MerkleHasher`]; SHA-256 and Blake3
//! strategies are provided.

#![warn(missing_docs)]

mod config;
mod error;
mod evidence;
mod hasher;
/// Tree position arithmetic.
pub mod helper;
mod merkle;
mod node;
mod tree;
pub mod visualize;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::MerkleConfig;
pub use error::MerkleError;
pub use evidence::{MAX_EVIDENCE_ITEMS, MerkleEvidence};
pub use hasher::{Blake3Hasher, FnHasher, HashError, MerkleHasher, Sha256Hasher};
pub use merkle::Merkle;
pub use node::{MerkleNode, MerkleValue};
