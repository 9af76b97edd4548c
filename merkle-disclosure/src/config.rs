use crate::MerkleError;

/// Filler written into every padding slot.
pub(crate) const DEFAULT_FILLER: &str = "-";

/// Deepest tree built by default (`2^32` leaf slots).
pub(crate) const DEFAULT_MAX_DEPTH: u32 = 32;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleConfig {
    /// Value hashed into padding slots.
    pub filler: String,
    /// Maximum leaf level. Must be in `1..=63`.
    pub max_depth: u32,
}

impl Default for MerkleConfig {
    fn default() -> Self {
        Self {
            filler: DEFAULT_FILLER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MerkleConfig {
    /// Replace the filler value.
    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.filler = filler.into();
        self
    }

    /// Replace the maximum leaf level.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), MerkleError> {
        if !(1..=63).contains(&self.max_depth) {
            return Err(MerkleError::InvalidConfig(format!(
                "max_depth must be between 1 and 63, got {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
