//! Configuration options for tree conversion

/// Default bound on element nesting accepted by [`convert`](crate::convert).
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for a single conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Deepest node nesting the converter will descend into before giving up
    /// with [`ConvertError::TooDeep`](crate::ConvertError::TooDeep).
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    /// Options with a custom nesting bound
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}
