/// Default bound on nested nodes accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest node depth the decoder can honor.
///
/// The JSON parser refuses input nested deeper than 127 levels, and a node
/// reached through a list field (`items`, `tag`, `object`, …) sits two levels
/// below its parent. Larger settings are clamped to this value.
pub const MAX_SUPPORTED_DEPTH: usize = 64;

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Maximum number of nested nodes (the document root counts as one).
    /// Values above [`MAX_SUPPORTED_DEPTH`] behave as that bound.
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_SUPPORTED_DEPTH);
        self
    }

    /// The node depth bound actually enforced.
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_SUPPORTED_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_depths_are_clamped() {
        let options = CodecOptions::new().with_max_depth(500);
        assert_eq!(options.max_depth, MAX_SUPPORTED_DEPTH);

        let direct = CodecOptions { max_depth: 500 };
        assert_eq!(direct.depth_limit(), MAX_SUPPORTED_DEPTH);
        assert_eq!(CodecOptions::new().with_max_depth(8).depth_limit(), 8);
    }
}
