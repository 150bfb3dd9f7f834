//! # Shinsa - Underwriting Workflow Execution Engine
//!
//! **Shinsa** simulates loan-underwriting decision workflows: directed graphs of application
//! decision, offer filtering, offer optimization and terminal blocks connected by pass/fail
//! edges. Given a graph and an applicant record it produces a deterministic execution trace.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the graph**: Build a [`WorkflowGraph`](workflow::WorkflowGraph) directly, or
//!     implement [`IntoWorkflow`](workflow::IntoWorkflow) for your editor's format (the
//!     [`ui`] module does this for the visual editor's JSON).
//! 2.  **Compile**: [`Compiler::builder`](compiler::Compiler::builder) validates the structure
//!     (single entry point, no dangling or ambiguous edges) and pre-parses every rule condition.
//! 3.  **Run**: An [`Executor`](executor::Executor) walks the compiled graph from its entry
//!     node. The compiled form is immutable, so it can be reused for any number of runs.
//!
//! ## Quick Start
//!
//! ```rust
//! use shinsa::prelude::*;
//!
//! let graph = WorkflowGraph {
//!     nodes: vec![
//!         WorkflowNode {
//!             id: "credit".to_string(),
//!             label: "Credit Eligibility Check".to_string(),
//!             description: String::new(),
//!             kind: NodeKind::ApplicationDecision(DecisionConfig {
//!                 rules: vec![Rule::new("credit_score >= 650", "Approve", RuleOutcome::Pass)],
//!                 execution_flow_enabled: true,
//!             }),
//!         },
//!         WorkflowNode {
//!             id: "approve".to_string(),
//!             label: "STOP WITH AUTO APPROVAL".to_string(),
//!             description: String::new(),
//!             kind: NodeKind::Terminal { terminal_type: TerminalType::AutoApproval },
//!         },
//!         WorkflowNode {
//!             id: "deny".to_string(),
//!             label: "STOP WITH AUTO DENIAL".to_string(),
//!             description: String::new(),
//!             kind: NodeKind::Terminal { terminal_type: TerminalType::AutoDenial },
//!         },
//!     ],
//!     edges: vec![
//!         WorkflowEdge::new("e1", "credit", "pass", "approve"),
//!         WorkflowEdge::new("e2", "credit", "fail", "deny"),
//!     ],
//! };
//!
//! let compiled = Compiler::builder(graph).build().compile()?;
//! let input = ValidationInput { credit_score: 700, ..ValidationInput::default() };
//! let trace = Executor::new(&compiled).run(&input);
//!
//! assert_eq!(trace.final_outcome, "STOP WITH AUTO APPROVAL");
//! println!("{}", TraceFormatter::format_execution(&trace));
//! # Ok::<(), GraphError>(())
//! ```

pub mod ast;
pub mod compiler;
pub mod condition;
pub mod data;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod trace;
pub mod ui;
pub mod workflow;

use compiler::Compiler;
use data::ValidationInput;
use error::GraphError;
use executor::{ExecutionTrace, Executor};
use workflow::WorkflowGraph;

/// Checks that `graph` can be executed, using the default handle names.
pub fn validate(graph: &WorkflowGraph) -> Result<(), GraphError> {
    compiler::validate(graph)
}

/// Validates `graph` and runs it once against `inputs` with the default configuration.
///
/// Structural problems are returned as an error before any walking begins. Problems found
/// during the walk end the returned trace instead.
pub fn run(graph: &WorkflowGraph, inputs: &ValidationInput) -> Result<ExecutionTrace, GraphError> {
    let compiled = Compiler::builder(graph.clone()).build().compile()?;
    Ok(Executor::new(&compiled).run(inputs))
}
