use crate::error::GraphError;
use crate::workflow::{Handle, HandleVocabulary, WorkflowGraph};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// An edge whose endpoints and handle have been resolved against the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ResolvedEdge {
    pub(super) edge: usize,
    pub(super) source: usize,
    pub(super) handle: Handle,
    pub(super) target: usize,
}

/// The structural facts established by a successful validation pass.
pub(super) struct ValidatedGraph {
    pub(super) node_index: AHashMap<String, usize>,
    pub(super) branches: AHashMap<(usize, Handle), ResolvedEdge>,
    pub(super) entry: usize,
}

/// Runs the structural checks over a graph, reporting the first offender in list order.
pub(super) struct GraphValidator<'a> {
    graph: &'a WorkflowGraph,
    handles: &'a HandleVocabulary,
}

impl<'a> GraphValidator<'a> {
    pub(super) fn new(graph: &'a WorkflowGraph, handles: &'a HandleVocabulary) -> Self {
        Self { graph, handles }
    }

    pub(super) fn validate(&self) -> Result<ValidatedGraph, GraphError> {
        let node_index = self.index_nodes()?;
        let edges = self.resolve_edges(&node_index)?;
        self.check_terminals(&edges)?;
        let branches = self.index_branches(&edges)?;
        let entry = self.find_entry(&edges)?;
        Ok(ValidatedGraph {
            node_index,
            branches,
            entry,
        })
    }

    fn index_nodes(&self) -> Result<AHashMap<String, usize>, GraphError> {
        if let Some(id) = self.graph.nodes.iter().map(|n| &n.id).duplicates().next() {
            return Err(GraphError::DuplicateNodeId(id.clone()));
        }
        Ok(self
            .graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect())
    }

    fn resolve_edges(
        &self,
        node_index: &AHashMap<String, usize>,
    ) -> Result<Vec<ResolvedEdge>, GraphError> {
        self.graph
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let lookup = |id: &str| {
                    node_index
                        .get(id)
                        .copied()
                        .ok_or_else(|| GraphError::DanglingEdge {
                            edge_id: edge.id.clone(),
                            missing_node_id: id.to_string(),
                        })
                };
                let source = lookup(&edge.source)?;
                let target = lookup(&edge.target)?;
                let handle = self.handles.resolve(&edge.source_handle).ok_or_else(|| {
                    GraphError::InvalidHandle {
                        edge_id: edge.id.clone(),
                        node_id: edge.source.clone(),
                        handle: edge.source_handle.clone(),
                    }
                })?;
                Ok(ResolvedEdge {
                    edge: i,
                    source,
                    handle,
                    target,
                })
            })
            .collect()
    }

    fn check_terminals(&self, edges: &[ResolvedEdge]) -> Result<(), GraphError> {
        match edges
            .iter()
            .find(|e| self.graph.nodes[e.source].is_terminal())
        {
            Some(e) => Err(GraphError::TerminalHasOutgoingEdge {
                node_id: self.graph.nodes[e.source].id.clone(),
                edge_id: self.graph.edges[e.edge].id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn index_branches(
        &self,
        edges: &[ResolvedEdge],
    ) -> Result<AHashMap<(usize, Handle), ResolvedEdge>, GraphError> {
        let mut branches = AHashMap::with_capacity(edges.len());
        for edge in edges {
            if branches.insert((edge.source, edge.handle), *edge).is_some() {
                return Err(GraphError::AmbiguousBranch {
                    node_id: self.graph.nodes[edge.source].id.clone(),
                    handle: edge.handle,
                });
            }
        }
        Ok(branches)
    }

    fn find_entry(&self, edges: &[ResolvedEdge]) -> Result<usize, GraphError> {
        let targets: AHashSet<usize> = edges.iter().map(|e| e.target).collect();
        let entries: Vec<usize> = (0..self.graph.nodes.len())
            .filter(|i| !targets.contains(i))
            .collect();

        match entries.as_slice() {
            [] => Err(GraphError::NoEntryPoint),
            [entry] => Ok(*entry),
            many => Err(GraphError::MultipleEntryPoints {
                node_ids: many
                    .iter()
                    .map(|&i| self.graph.nodes[i].id.clone())
                    .collect(),
            }),
        }
    }
}
