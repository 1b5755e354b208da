//! Engine configuration.
//!
//! Games configure the resolution layer at startup with an `EngineConfig`:
//! - how card references render in result text (`LinkStyle`)
//! - whether and how much of the result log is retained
//!
//! Nothing here affects rules decisions.

use serde::{Deserialize, Serialize};

/// How a card reference is rendered in result text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStyle {
    /// Bare card title.
    #[default]
    Plain,
    /// Card-hint markup for clients that show a card preview on hover:
    /// `<div class='cardHint' value='<blueprint>'>title</div>`.
    Hint,
}

/// Configuration for the result dispatcher and text rendering.
///
/// ## Example
///
/// ```
/// use swccg_engine::core::{EngineConfig, LinkStyle};
///
/// let config = EngineConfig::new()
///     .with_link_style(LinkStyle::Hint)
///     .with_log_capacity(500);
///
/// assert_eq!(config.result_log_capacity, Some(500));
/// assert!(config.log_results);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rendering of card references in result text.
    pub link_style: LinkStyle,

    /// Maximum retained result-log entries. `None` for unbounded.
    pub result_log_capacity: Option<usize>,

    /// Record every dispatched result in the result log.
    pub log_results: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            link_style: LinkStyle::Plain,
            result_log_capacity: None,
            log_results: true,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the card link style.
    #[must_use]
    pub fn with_link_style(mut self, style: LinkStyle) -> Self {
        self.link_style = style;
        self
    }

    /// Bound the result log.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.result_log_capacity = Some(capacity);
        self
    }

    /// Turn result logging off.
    #[must_use]
    pub fn without_result_log(mut self) -> Self {
        self.log_results = false;
        self
    }
}
