use crate::error::{ConditionError, WalkError};
use crate::workflow::NodeType;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    Pass,
    Fail,
    Terminal,
    /// Only used on the synthetic step that closes an aborted walk.
    Aborted,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepOutcome::Pass => "pass",
            StepOutcome::Fail => "fail",
            StepOutcome::Terminal => "terminal",
            StepOutcome::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// A rule that could not be evaluated and was treated as a non-match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleAnomaly {
    /// One-based position of the rule on its node.
    pub rule_number: usize,
    pub condition: String,
    pub error: ConditionError,
}

impl fmt::Display for RuleAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} skipped: {}", self.rule_number, self.error)
    }
}

/// One visited node of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    pub node_id: String,
    pub node_label: String,
    pub node_type: NodeType,
    pub outcome: StepOutcome,
    pub reason: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<RuleAnomaly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum TraceStatus {
    /// The walk reached a terminal node.
    Completed,
    /// The walk stopped early; the last step of the trace describes why.
    Aborted(WalkError),
}

/// The ordered log of one simulated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTrace {
    pub steps: Vec<ExecutionStep>,
    pub final_outcome: String,
    pub status: TraceStatus,
}

impl ExecutionTrace {
    /// Ids of the nodes the walk actually visited, in order.
    pub fn execution_path(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|step| step.outcome != StepOutcome::Aborted)
            .map(|step| step.node_id.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.status == TraceStatus::Completed
    }

    pub fn abort_reason(&self) -> Option<&WalkError> {
        match &self.status {
            TraceStatus::Completed => None,
            TraceStatus::Aborted(err) => Some(err),
        }
    }
}
