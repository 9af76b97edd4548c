//! Levels count from the root (level 0) down to the leaves. Within a level,
//! nodes are indexed left to right from 0, so the children of
//! `(level, index)` are `(level + 1, 2 * index)` and
//! `(level + 1, 2 * index + 1)`.

/// Smallest depth `L` such that `count_for_depth(L) >= n`.
///
/// Subtracts `2^level` from `n` for increasing levels until nothing remains.
/// `depth_for_count(0) == 0`, `depth_for_count(16) == 4`.
pub fn depth_for_count(n: u64) -> u32 {
    let mut remaining = n;
    let mut level = 0u32;
    loop {
        let capacity = 1u64 << level;
        if remaining <= capacity {
            return level;
        }
        remaining -= capacity;
        level += 1;
    }
}

/// Number of nodes in a complete binary tree of the given depth,
/// `2^(level + 1) - 1`. Saturates at `u64::MAX` from depth 63 on.
pub fn count_for_depth(level: u32) -> u64 {
    if level >= 63 {
        return u64::MAX;
    }
    u64::MAX >> (63 - level)
}

/// Offset of the first node of `level` in a root-first, level-order node
/// list of a complete tree.
pub fn window_start(level: u32) -> u64 {
    match level {
        0 => 0,
        _ => count_for_depth(level - 1),
    }
}

/// Leaf level of the tree holding `n` values.
///
/// One slot is always reserved for filler, so the leaf level has
/// `2^leaf_level >= n + 1` slots.
pub fn leaf_level(n: u64) -> u32 {
    depth_for_count(n) + 1
}

/// First leaf slot covered by the node at `(level, index)`.
///
/// A node is filler-only when this is `>= n`.
pub fn subtree_start(level: u32, index: u64, max_level: u32) -> u64 {
    index << (max_level - level)
}

/// Number of nodes at `level` that cover at least one of the `n` values.
///
/// The root is always present, even for an empty tree.
pub fn level_width(n: u64, level: u32, max_level: u32) -> u64 {
    if level == 0 {
        return 1;
    }
    n.div_ceil(1u64 << (max_level - level))
}
