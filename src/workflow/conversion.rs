use super::definition::WorkflowGraph;
use crate::error::WorkflowConversionError;

/// A trait for editor-specific data models that can be converted into a `WorkflowGraph`.
///
/// The engine never looks at a UI framework's object shapes. Whatever the canvas stores
/// (positions, colors, expanded flags, callbacks) stays on that side; implementing this trait
/// is the translation layer that hands the engine plain node and edge lists.
///
/// # Example
///
/// ```rust
/// use shinsa::prelude::*;
///
/// struct Canvas {
///     blocks: Vec<(String, String)>, // (id, label)
/// }
///
/// impl IntoWorkflow for Canvas {
///     fn into_workflow(self) -> Result<WorkflowGraph, WorkflowConversionError> {
///         let nodes = self
///             .blocks
///             .into_iter()
///             .map(|(id, label)| WorkflowNode {
///                 id,
///                 label,
///                 description: String::new(),
///                 kind: NodeKind::Terminal { terminal_type: TerminalType::ManualReview },
///             })
///             .collect();
///         Ok(WorkflowGraph { nodes, edges: vec![] })
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into the engine's canonical graph.
    fn into_workflow(self) -> Result<WorkflowGraph, WorkflowConversionError>;
}

impl IntoWorkflow for WorkflowGraph {
    fn into_workflow(self) -> Result<WorkflowGraph, WorkflowConversionError> {
        Ok(self)
    }
}
