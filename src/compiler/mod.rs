use crate::condition::Condition;
use crate::error::{ConditionError, GraphError};
use crate::workflow::{
    Handle, HandleVocabulary, NodeKind, Rule, WorkflowEdge, WorkflowGraph, WorkflowNode,
};
use ahash::AHashMap;
use tracing::{debug, warn};

mod validator;

use validator::{GraphValidator, ResolvedEdge};

/// A rule together with its pre-parsed condition.
///
/// A condition that fails to parse is kept as an error rather than rejecting the graph:
/// the executor reports it as an anomaly on the step and moves on to the next rule.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub condition: Result<Condition, ConditionError>,
}

#[derive(Debug, Clone)]
pub struct CompiledNode {
    pub node: WorkflowNode,
    pub rules: Vec<CompiledRule>,
}

/// An immutable, validated snapshot of a workflow graph.
///
/// Built once per graph and shared by any number of runs; every lookup the executor needs is
/// answered from indexes computed at compile time.
#[derive(Debug, Clone)]
pub struct CompiledWorkflow {
    nodes: Vec<CompiledNode>,
    edges: Vec<WorkflowEdge>,
    node_index: AHashMap<String, usize>,
    branches: AHashMap<(usize, Handle), ResolvedEdge>,
    entry: usize,
}

impl CompiledWorkflow {
    /// The unique node without incoming edges.
    pub fn entry_node(&self) -> &WorkflowNode {
        &self.nodes[self.entry].node
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i].node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The edge leaving `node_id` on `handle`, if one is connected.
    pub fn outgoing_edge(&self, node_id: &str, handle: Handle) -> Option<&WorkflowEdge> {
        let source = *self.node_index.get(node_id)?;
        self.branches
            .get(&(source, handle))
            .map(|resolved| &self.edges[resolved.edge])
    }

    pub(crate) fn entry_index(&self) -> usize {
        self.entry
    }

    pub(crate) fn compiled_node(&self, index: usize) -> &CompiledNode {
        &self.nodes[index]
    }

    /// Index of the node reached from `source` on `handle`.
    pub(crate) fn next_index(&self, source: usize, handle: Handle) -> Option<usize> {
        self.branches
            .get(&(source, handle))
            .map(|resolved| resolved.target)
    }
}

pub struct Compiler {
    graph: WorkflowGraph,
    handles: HandleVocabulary,
}

pub struct CompilerBuilder {
    graph: WorkflowGraph,
    handles: HandleVocabulary,
}

impl CompilerBuilder {
    pub fn new(graph: WorkflowGraph) -> Self {
        Self {
            graph,
            handles: HandleVocabulary::default(),
        }
    }

    /// Registers an additional edge handle name, e.g. `"approve"` for [`Handle::Pass`].
    pub fn with_handle_alias(mut self, name: &str, handle: Handle) -> Self {
        self.handles.insert(name, handle);
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            graph: self.graph,
            handles: self.handles,
        }
    }
}

impl Compiler {
    pub fn builder(graph: WorkflowGraph) -> CompilerBuilder {
        CompilerBuilder::new(graph)
    }

    /// Runs the structural checks without building the executable form.
    pub fn validate(&self) -> Result<(), GraphError> {
        GraphValidator::new(&self.graph, &self.handles)
            .validate()
            .map(|_| ())
    }

    pub fn compile(self) -> Result<CompiledWorkflow, GraphError> {
        let validated = GraphValidator::new(&self.graph, &self.handles).validate()?;

        let WorkflowGraph { nodes, edges } = self.graph;
        let nodes: Vec<CompiledNode> = nodes.into_iter().map(compile_node).collect();

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            entry = %nodes[validated.entry].node.id,
            "compiled workflow"
        );

        Ok(CompiledWorkflow {
            nodes,
            edges,
            node_index: validated.node_index,
            branches: validated.branches,
            entry: validated.entry,
        })
    }
}

/// Runs the structural checks over `graph` with the default handle names.
pub fn validate(graph: &WorkflowGraph) -> Result<(), GraphError> {
    GraphValidator::new(graph, &HandleVocabulary::default())
        .validate()
        .map(|_| ())
}

fn compile_node(node: WorkflowNode) -> CompiledNode {
    let rules = match &node.kind {
        NodeKind::ApplicationDecision(config) | NodeKind::OfferFiltering(config) => config
            .rules
            .iter()
            .map(|rule| {
                let condition = Condition::parse(&rule.condition);
                if let Err(e) = &condition {
                    warn!(node = %node.id, condition = %rule.condition, error = %e, "rule condition does not parse");
                }
                CompiledRule {
                    rule: rule.clone(),
                    condition,
                }
            })
            .collect(),
        NodeKind::OfferOptimization { .. } | NodeKind::Terminal { .. } => Vec::new(),
    };
    CompiledNode { node, rules }
}
