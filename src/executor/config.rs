use serde::{Deserialize, Serialize};

/// Tunables for a simulated run.
///
/// The outcome labels are a product decision rather than engine logic, so they live here
/// instead of being baked into the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Final outcome when a walk ends on a passing non-terminal step.
    pub approved_label: String,
    /// Final outcome when a walk ends on a failing non-terminal step.
    pub denied_label: String,
    /// Step ceiling as a multiple of the node count.
    pub step_limit_factor: usize,
    /// Fixed step ceiling, overriding `step_limit_factor` when set.
    ///
    /// The ceiling counts real node visits. The synthetic step that closes an aborted walk is
    /// not counted, so an aborted trace holds at most `limit + 1` steps.
    pub step_limit: Option<usize>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            approved_label: "Approved".to_string(),
            denied_label: "Denied".to_string(),
            step_limit_factor: 2,
            step_limit: None,
        }
    }
}

impl ExecutorConfig {
    pub fn with_outcome_labels(mut self, approved: &str, denied: &str) -> Self {
        self.approved_label = approved.to_string();
        self.denied_label = denied.to_string();
        self
    }

    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn with_step_limit_factor(mut self, factor: usize) -> Self {
        self.step_limit_factor = factor;
        self
    }

    /// The effective ceiling for a graph with `node_count` nodes. Never below one step.
    pub fn step_limit_for(&self, node_count: usize) -> usize {
        self.step_limit
            .unwrap_or_else(|| node_count.saturating_mul(self.step_limit_factor))
            .max(1)
    }
}
