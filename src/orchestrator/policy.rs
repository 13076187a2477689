use serde::{Deserialize, Serialize};

/// Maximum number of professors rendered per response
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// How a professor list is turned into log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultLayout {
    /// One `result` message holding a pre-formatted block
    Block,
    /// One `header` message followed by one `match` message per professor
    #[default]
    Split,
}

/// Knobs of response normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationPolicy {
    pub max_results: usize,
    pub layout: ResultLayout,
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self { max_results: DEFAULT_MAX_RESULTS, layout: ResultLayout::default() }
    }
}
