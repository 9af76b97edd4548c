//! The Merkle engine: build, pack and calculate.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::{
    MerkleConfig, MerkleError, MerkleHasher, MerkleNode, MerkleValue,
    helper::{leaf_level, level_width, subtree_start},
    tree::TreeLayout,
};

/// Merkle tree engine parameterized by its hash strategy.
///
/// Every operation is a pure function of its inputs: the engine holds no
/// tree state, so one instance can serve any number of trees.
#[derive(Debug, Clone)]
pub struct Merkle<H> {
    hasher: H,
    config: MerkleConfig,
}

/// Data available to `calculate` while walking the tree.
struct Evidence<'a> {
    total: u64,
    max_level: u32,
    disclosed: HashMap<u64, &'a str>,
    proofs: HashMap<(u32, u64), &'a str>,
    fillers: Vec<String>,
}

impl<H: MerkleHasher> Merkle<H> {
    /// Create an engine with the default config (filler `"-"`).
    pub fn new(hasher: H) -> Self {
        Merkle {
            hasher,
            config: MerkleConfig::default(),
        }
    }

    /// Create an engine with a custom config.
    pub fn with_config(hasher: H, config: MerkleConfig) -> Result<Self, MerkleError> {
        config.validate()?;
        Ok(Merkle { hasher, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &MerkleConfig {
        &self.config
    }

    /// The hash strategy.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Build the tree over `values`.
    ///
    /// `values[i].index` must be `i`. Returns every node covering at least
    /// one value, root first, level by level, left to right. An empty input
    /// yields a single root over two filler leaves.
    pub fn build(&self, values: &[MerkleValue]) -> Result<Vec<MerkleNode>, MerkleError> {
        for (position, value) in values.iter().enumerate() {
            if value.index != position as u64 {
                return Err(MerkleError::InvalidIndex(format!(
                    "value at position {} has index {}, indices must be contiguous from 0",
                    position, value.index
                )));
            }
        }

        let count = values.len() as u64;
        let max_level = self.leaf_level_for(count)?;
        let fillers = self.filler_hashes(max_level - 1)?;

        let mut current: Vec<String> = values
            .iter()
            .map(|v| self.hash(&v.value))
            .collect::<Result<_, _>>()?;

        // Bottom-up; `levels` ends up leaf level first.
        let mut levels: Vec<Vec<String>> = Vec::with_capacity(max_level as usize + 1);
        for level in (0..max_level).rev() {
            let child_filler = &fillers[(max_level - level - 1) as usize];
            let width = level_width(count, level, max_level) as usize;
            let mut parents = Vec::with_capacity(width);
            for i in 0..width {
                let left = current.get(2 * i).unwrap_or(child_filler);
                let right = current.get(2 * i + 1).unwrap_or(child_filler);
                parents.push(self.combine(left, right)?);
            }
            trace!(level, width, "combined tree level");
            levels.push(std::mem::replace(&mut current, parents));
        }
        levels.push(current);

        let nodes: Vec<MerkleNode> = levels
            .into_iter()
            .rev()
            .enumerate()
            .flat_map(|(level, hashes)| {
                hashes
                    .into_iter()
                    .enumerate()
                    .map(move |(index, hash)| {
                        MerkleNode::new(level as u32, index as u64, hash)
                    })
            })
            .collect();

        debug!(values = count, max_level, nodes = nodes.len(), "built merkle tree");
        Ok(nodes)
    }

    /// Build the tree over plain strings, indexing them by position.
    pub fn build_from_strings<S: AsRef<str>>(
        &self,
        values: &[S],
    ) -> Result<Vec<MerkleNode>, MerkleError> {
        let values = MerkleValue::from_values(values.iter().map(|v| v.as_ref()));
        self.build(&values)
    }

    /// Select the proof nodes needed to verify the values at `expose`.
    ///
    /// `nodes` must be the output of [`build`](Self::build). For every node
    /// on the path from an exposed leaf to the root, its sibling is packed
    /// unless it is itself on an exposed path or covers only filler. The
    /// result is unique and ordered like `nodes`. Exposing nothing packs
    /// nothing.
    pub fn pack(
        &self,
        nodes: &[MerkleNode],
        expose: &[u64],
    ) -> Result<Vec<MerkleNode>, MerkleError> {
        let tree = TreeLayout::parse(nodes)?;

        for &index in expose {
            if index >= tree.leaf_count() {
                return Err(MerkleError::InvalidIndex(format!(
                    "exposed index {} is out of range (count={})",
                    index,
                    tree.leaf_count()
                )));
            }
        }

        let mut frontier: BTreeSet<u64> = expose.iter().copied().collect();
        let mut packed: Vec<MerkleNode> = Vec::new();
        for level in (1..=tree.max_level()).rev() {
            for &index in &frontier {
                let sibling = index ^ 1;
                if frontier.contains(&sibling) {
                    continue;
                }
                if let Some(node) = tree.get(level, sibling) {
                    packed.push(node.clone());
                }
            }
            frontier = frontier.iter().map(|index| index >> 1).collect();
        }
        packed.sort_by_key(MerkleNode::position);

        debug!(exposed = expose.len(), proofs = packed.len(), "packed merkle proof");
        Ok(packed)
    }

    /// Recompute the root from disclosed values and proof nodes.
    ///
    /// `total` is the number of values the tree was built from. Fails with
    /// [`MerkleError::MissingProofData`] when some leaf on the way to the
    /// root is neither disclosed nor covered by a proof node.
    pub fn calculate(
        &self,
        values: &[MerkleValue],
        proofs: &[MerkleNode],
        total: u64,
    ) -> Result<MerkleNode, MerkleError> {
        let max_level = self.leaf_level_for(total)?;

        let mut disclosed = HashMap::with_capacity(values.len());
        for value in values {
            if value.index >= total {
                return Err(MerkleError::InvalidIndex(format!(
                    "value index {} is out of range (count={})",
                    value.index, total
                )));
            }
            if disclosed.insert(value.index, value.value.as_str()).is_some() {
                return Err(MerkleError::InvalidIndex(format!(
                    "duplicate value at index {}",
                    value.index
                )));
            }
        }

        let mut proof_map = HashMap::with_capacity(proofs.len());
        for node in proofs {
            if node.level == 0 || node.level > max_level {
                return Err(MerkleError::InvalidIndex(format!(
                    "proof node level {} is outside 1..={}",
                    node.level, max_level
                )));
            }
            if node.index >= level_width(total, node.level, max_level) {
                return Err(MerkleError::InvalidIndex(format!(
                    "proof node at level {}, index {} is outside the tree or covers only filler",
                    node.level, node.index
                )));
            }
            if proof_map.insert(node.position(), node.hash.as_str()).is_some() {
                return Err(MerkleError::InvalidIndex(format!(
                    "duplicate proof node at level {}, index {}",
                    node.level, node.index
                )));
            }
        }

        // A proof node on a disclosed path would shadow the disclosed value.
        for &index in disclosed.keys() {
            for level in 1..=max_level {
                let ancestor = index >> (max_level - level);
                if proof_map.contains_key(&(level, ancestor)) {
                    return Err(MerkleError::InvalidProof(format!(
                        "proof node at level {}, index {} covers disclosed value {}",
                        level, ancestor, index
                    )));
                }
            }
        }

        let evidence = Evidence {
            total,
            max_level,
            disclosed,
            proofs: proof_map,
            fillers: self.filler_hashes(max_level)?,
        };
        let hash = self.recompute(&evidence, 0, 0)?;

        debug!(
            disclosed = values.len(),
            proofs = proofs.len(),
            total,
            "calculated merkle root"
        );
        Ok(MerkleNode::new(0, 0, hash))
    }

    fn recompute(
        &self,
        evidence: &Evidence<'_>,
        level: u32,
        index: u64,
    ) -> Result<String, MerkleError> {
        let height = evidence.max_level - level;
        if subtree_start(level, index, evidence.max_level) >= evidence.total {
            return Ok(evidence.fillers[height as usize].clone());
        }
        if let Some(hash) = evidence.proofs.get(&(level, index)) {
            return Ok((*hash).to_string());
        }
        if height == 0 {
            let value = evidence
                .disclosed
                .get(&index)
                .ok_or(MerkleError::MissingProofData { level, index })?;
            return self.hash(value);
        }
        let left = self.recompute(evidence, level + 1, 2 * index)?;
        let right = self.recompute(evidence, level + 1, 2 * index + 1)?;
        self.combine(&left, &right)
    }

    fn leaf_level_for(&self, count: u64) -> Result<u32, MerkleError> {
        let max_level = leaf_level(count);
        if max_level > self.config.max_depth {
            return Err(MerkleError::TooManyValues {
                count,
                max_depth: self.config.max_depth,
            });
        }
        Ok(max_level)
    }

    /// Hashes of filler-only subtrees by height, `0..=height`.
    fn filler_hashes(&self, height: u32) -> Result<Vec<String>, MerkleError> {
        let mut hashes = Vec::with_capacity(height as usize + 1);
        hashes.push(self.hash(&self.config.filler)?);
        for h in 1..=height as usize {
            let next = {
                let below = &hashes[h - 1];
                self.combine(below, below)?
            };
            hashes.push(next);
        }
        Ok(hashes)
    }

    fn hash(&self, input: &str) -> Result<String, MerkleError> {
        Ok(self.hasher.hash(input)?)
    }

    fn combine(&self, left: &str, right: &str) -> Result<String, MerkleError> {
        let mut input = String::with_capacity(left.len() + right.len());
        input.push_str(left);
        input.push_str(right);
        self.hash(&input)
    }
}
