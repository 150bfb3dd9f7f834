use crate::workflow::Handle;
use serde::Serialize;
use thiserror::Error;

/// Structural errors found while compiling a workflow graph.
///
/// These reject the whole run: no trace is produced for a graph that fails here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Workflow has no entry point: every node has an incoming edge, or the graph is empty")]
    NoEntryPoint,

    #[error("Workflow has {} entry points ({}), exactly one node may lack incoming edges", .node_ids.len(), .node_ids.join(", "))]
    MultipleEntryPoints { node_ids: Vec<String> },

    #[error("Node '{node_id}' has more than one outgoing edge on the {handle} handle")]
    AmbiguousBranch { node_id: String, handle: Handle },

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which is not part of the workflow")]
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Edge '{edge_id}' leaves node '{node_id}' on unknown handle '{handle}'")]
    InvalidHandle {
        edge_id: String,
        node_id: String,
        handle: String,
    },

    #[error("Terminal node '{node_id}' cannot have outgoing edges (found edge '{edge_id}')")]
    TerminalHasOutgoingEdge { node_id: String, edge_id: String },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNodeId(String),
}

/// Errors raised while parsing or evaluating a single rule condition.
///
/// The executor treats these as a rule non-match and records them on the step.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionError {
    #[error("Malformed condition '{condition}' at position {position}: {message}")]
    MalformedCondition {
        condition: String,
        position: usize,
        message: String,
    },

    #[error("Unknown identifier '{name}' in condition")]
    UnknownIdentifier { name: String },
}

/// Errors that abort a walk after it started.
///
/// The partial trace is kept and ends with a synthetic step carrying this error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalkError {
    #[error("Cycle detected: node '{node_id}' would be visited twice")]
    CycleDetected { node_id: String },

    #[error("Incomplete branch: node '{node_id}' has no outgoing {handle} edge")]
    IncompleteBranch { node_id: String, handle: Handle },

    #[error("Step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },
}

/// Errors that can occur when converting an editor-specific format into a `WorkflowGraph`.
#[derive(Error, Debug)]
pub enum WorkflowConversionError {
    #[error("Failed to parse workflow JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node '{node_id}' has unsupported type '{type_name}'")]
    UnsupportedNodeType { node_id: String, type_name: String },

    #[error("Terminal node '{node_id}' has unknown terminal type '{terminal_type}'")]
    UnknownTerminalType {
        node_id: String,
        terminal_type: String,
    },
}
