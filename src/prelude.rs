//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the shinsa crate.
//!
//! # Example
//!
//! ```rust
//! use shinsa::prelude::*;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{ "nodes": [
//!     { "id": "t", "type": "terminal", "data": { "terminalType": "manual-review" } }
//! ] }"#;
//! let graph = UiWorkflow::from_json_str(json)?.into_workflow()?;
//!
//! let compiled = Compiler::builder(graph).build().compile()?;
//! let trace = Executor::new(&compiled).run(&ValidationInput::default());
//! assert_eq!(trace.final_outcome, "STOP WITH MANUAL REVIEW");
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Core compilation and execution
pub use crate::compiler::{CompiledWorkflow, Compiler};
pub use crate::executor::{
    ExecutionStep, ExecutionTrace, Executor, ExecutorConfig, RuleAnomaly, StepOutcome,
    TraceStatus,
};

// Conditions
pub use crate::ast::{EvaluationTrace, Expression, Operand, Value};
pub use crate::condition::Condition;

// Data structures
pub use crate::data::{DataSource, ValidationInput};
pub use crate::ui::{ActionKeywords, UiWorkflow};
pub use crate::workflow::{
    DecisionConfig, Handle, IntoWorkflow, NodeKind, NodeType, Rule, RuleOutcome, TerminalType,
    WorkflowEdge, WorkflowGraph, WorkflowNode,
};

// Error types
pub use crate::error::{ConditionError, GraphError, WalkError, WorkflowConversionError};

// Trace formatting
pub use crate::trace::TraceFormatter;
