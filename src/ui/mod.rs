//! Shapes of the visual editor's node and edge JSON, and their conversion into a
//! [`crate::workflow::WorkflowGraph`].

mod types;

pub use types::*;
