//! Evaluation settings for region trees.

/// Controls how [`RegionNode::mask_with`](crate::regions::RegionNode::mask_with)
/// walks a tree.
///
/// Sibling subtrees share no state, so with the `parallel` feature enabled
/// they can be evaluated on the rayon pool. Forking only pays off for large
/// sample counts; below `parallel_threshold` evaluation stays on the calling
/// thread. Without the feature both fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskConfig {
    /// Evaluate the two children of each combinator concurrently.
    pub parallel: bool,
    /// Minimum number of samples before a combinator forks.
    pub parallel_threshold: usize,
}

impl MaskConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

    /// Single-threaded evaluation regardless of enabled features.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Whether combinators should fork for a batch of `samples` points.
    pub fn should_fork(&self, samples: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && samples >= self.parallel_threshold
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            parallel: cfg!(feature = "parallel"),
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
