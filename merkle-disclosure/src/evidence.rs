//! Disclosure bundles exchanged between provers and verifiers.
//!
//! A `MerkleEvidence` carries the disclosed values, the proof nodes packed
//! for them and the total value count, which is all a verifier needs to
//! recompute the root.

use std::collections::BTreeSet;

use bincode::{Decode, Encode};
use tracing::warn;

use crate::{Merkle, MerkleError, MerkleHasher, MerkleNode, MerkleValue};

/// Maximum number of values or proof nodes accepted when decoding evidence.
pub const MAX_EVIDENCE_ITEMS: usize = 100_000;

/// Disclosed values of a tree together with their proof nodes.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleEvidence {
    /// Number of values the tree was built from.
    pub leaf_count: u64,
    /// The disclosed values, ordered by index.
    pub values: Vec<MerkleValue>,
    /// Nodes packed for the disclosed values, root first.
    pub proofs: Vec<MerkleNode>,
}

impl MerkleEvidence {
    /// Encode to bytes using bincode.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_no_limit();
        bincode::encode_to_vec(self, config)
            .map_err(|e| MerkleError::InvalidData(format!("encode error: {}", e)))
    }

    /// Decode from bytes using bincode.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_limit::<{ 100 * 1024 * 1024 }>(); // 100MB limit
        let (evidence, _): (Self, _) = bincode::decode_from_slice(bytes, config)
            .map_err(|e| MerkleError::InvalidData(format!("decode error: {}", e)))?;
        if evidence.values.len() > MAX_EVIDENCE_ITEMS || evidence.proofs.len() > MAX_EVIDENCE_ITEMS
        {
            return Err(MerkleError::InvalidData(format!(
                "evidence contains too many items (max {} per field)",
                MAX_EVIDENCE_ITEMS
            )));
        }
        Ok(evidence)
    }
}

impl<H: MerkleHasher> Merkle<H> {
    /// Build the tree over `values` and pack evidence for `expose`.
    ///
    /// Returns the root together with the evidence for the exposed values.
    pub fn disclose(
        &self,
        values: &[MerkleValue],
        expose: &[u64],
    ) -> Result<(MerkleNode, MerkleEvidence), MerkleError> {
        let nodes = self.build(values)?;
        let proofs = self.pack(&nodes, expose)?;
        let root = nodes
            .first()
            .cloned()
            .ok_or_else(|| MerkleError::InvalidTree("build returned no root".into()))?;

        // pack validated every exposed index against the value count
        let exposed: BTreeSet<u64> = expose.iter().copied().collect();
        let disclosed = values
            .iter()
            .filter(|value| exposed.contains(&value.index))
            .cloned()
            .collect();

        Ok((
            root,
            MerkleEvidence {
                leaf_count: values.len() as u64,
                values: disclosed,
                proofs,
            },
        ))
    }

    /// Verify evidence against an expected root hash.
    ///
    /// Returns the disclosed values on success.
    pub fn verify(
        &self,
        evidence: &MerkleEvidence,
        expected_root: &str,
    ) -> Result<Vec<MerkleValue>, MerkleError> {
        let root = self.calculate(&evidence.values, &evidence.proofs, evidence.leaf_count)?;
        if root.hash != expected_root {
            warn!(
                expected = expected_root,
                computed = %root.hash,
                "merkle root mismatch"
            );
            return Err(MerkleError::InvalidProof(format!(
                "root hash mismatch: expected {}, got {}",
                expected_root, root.hash
            )));
        }
        Ok(evidence.values.clone())
    }
}
