//! Test fixtures: value builders and instrumented hashers.

use std::cell::{Cell, RefCell};

use crate::{HashError, MerkleHasher, MerkleValue};

/// `n` values `"a"`, `"b"`, ... (`"v26"`, `"v27"`, ... past the alphabet).
pub(crate) fn letters(n: usize) -> Vec<MerkleValue> {
    MerkleValue::from_values((0..n).map(|i| {
        if i < 26 {
            ((b'a' + i as u8) as char).to_string()
        } else {
            format!("v{}", i)
        }
    }))
}

/// Values at the given indices of `values`.
pub(crate) fn values_at(values: &[MerkleValue], indices: &[u64]) -> Vec<MerkleValue> {
    indices
        .iter()
        .map(|&i| values[i as usize].clone())
        .collect()
}

/// Hasher that wraps its input in brackets, so tree shapes can be read off
/// the root hash directly.
pub(crate) struct BracketHasher;

impl MerkleHasher for BracketHasher {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        Ok(format!("[{}]", input))
    }
}

/// Hasher that records every input it sees.
#[derive(Default)]
pub(crate) struct RecordingHasher {
    pub calls: RefCell<Vec<String>>,
}

impl MerkleHasher for RecordingHasher {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        self.calls.borrow_mut().push(input.to_string());
        Ok(format!("h({})", input))
    }
}

/// Hasher that fails once it has been called `fail_after` times.
pub(crate) struct FailingHasher {
    pub fail_after: usize,
    pub calls: Cell<usize>,
}

impl FailingHasher {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            calls: Cell::new(0),
        }
    }
}

impl MerkleHasher for FailingHasher {
    fn hash(&self, input: &str) -> Result<String, HashError> {
        let calls = self.calls.get();
        self.calls.set(calls + 1);
        if calls >= self.fail_after {
            return Err(HashError::new(format!("backend unavailable on call {}", calls)));
        }
        Ok(input.chars().rev().collect())
    }
}
