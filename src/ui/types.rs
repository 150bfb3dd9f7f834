use crate::error::WorkflowConversionError;
use crate::workflow::{
    DecisionConfig, IntoWorkflow, NodeKind, Rule, RuleOutcome, TerminalType, WorkflowEdge,
    WorkflowGraph, WorkflowNode,
};
use serde::Deserialize;

/// Editor rule as stored on a node; `outcome` is absent on rules authored before it existed.
#[derive(Debug, Deserialize, Clone)]
pub struct UiRule {
    pub condition: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub outcome: Option<RuleOutcome>,
}

/// Editor node data. Layout and rendering fields are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiNodeData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<UiRule>,
    #[serde(default, alias = "executionFlowEnabled")]
    pub execution_flow_enabled: Option<bool>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default, alias = "terminalType")]
    pub terminal_type: Option<String>,
}

/// UI node with ID, type tag and data
#[derive(Debug, Deserialize, Clone)]
pub struct UiNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: UiNodeData,
}

/// UI edge connecting nodes
#[derive(Debug, Deserialize, Clone)]
pub struct UiEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    pub target: String,
}

/// Complete editor workflow structure
#[derive(Debug, Deserialize, Clone)]
pub struct UiWorkflow {
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
    #[serde(skip)]
    keywords: ActionKeywords,
}

impl UiWorkflow {
    pub fn from_json_str(json: &str) -> Result<Self, WorkflowConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces the keyword table used for rules that carry no explicit outcome.
    pub fn with_action_keywords(mut self, keywords: ActionKeywords) -> Self {
        self.keywords = keywords;
        self
    }
}

/// Explicit action-text → outcome table for rules saved without an `outcome`.
///
/// Applied once at conversion time. Anything that matches no pass keyword fails.
#[derive(Debug, Clone)]
pub struct ActionKeywords {
    pass_keywords: Vec<String>,
}

impl ActionKeywords {
    pub fn new<I, S>(pass_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            pass_keywords: pass_keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn outcome_for(&self, action: &str) -> RuleOutcome {
        let action = action.to_lowercase();
        if self.pass_keywords.iter().any(|k| action.contains(k.as_str())) {
            RuleOutcome::Pass
        } else {
            RuleOutcome::Fail
        }
    }
}

impl Default for ActionKeywords {
    fn default() -> Self {
        Self::new(["approve", "proceed"])
    }
}

impl IntoWorkflow for UiWorkflow {
    fn into_workflow(self) -> Result<WorkflowGraph, WorkflowConversionError> {
        let keywords = self.keywords;
        let nodes = self
            .nodes
            .into_iter()
            .map(|node| convert_node(node, &keywords))
            .collect::<Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .map(|edge| WorkflowEdge {
                id: edge
                    .id
                    .unwrap_or_else(|| format!("{}-{}", edge.source, edge.target)),
                source_handle: edge.source_handle.unwrap_or_default(),
                source: edge.source,
                target: edge.target,
            })
            .collect();

        Ok(WorkflowGraph { nodes, edges })
    }
}

fn convert_node(
    node: UiNode,
    keywords: &ActionKeywords,
) -> Result<WorkflowNode, WorkflowConversionError> {
    let data = node.data;
    let decision = |rules: Vec<UiRule>, enabled: Option<bool>| DecisionConfig {
        rules: rules
            .into_iter()
            .map(|r| Rule {
                outcome: r.outcome.unwrap_or_else(|| keywords.outcome_for(&r.action)),
                condition: r.condition,
                action: r.action,
            })
            .collect(),
        execution_flow_enabled: enabled.unwrap_or(true),
    };

    let kind = match node.node_type.as_str() {
        "application-decision" => {
            NodeKind::ApplicationDecision(decision(data.rules, data.execution_flow_enabled))
        }
        "offer-filtering" => {
            NodeKind::OfferFiltering(decision(data.rules, data.execution_flow_enabled))
        }
        "offer-optimization" => NodeKind::OfferOptimization {
            goal: data.goal.unwrap_or_default(),
        },
        "terminal" => {
            let name = data.terminal_type.unwrap_or_default();
            let terminal_type = TerminalType::from_name(&name).ok_or_else(|| {
                WorkflowConversionError::UnknownTerminalType {
                    node_id: node.id.clone(),
                    terminal_type: name.clone(),
                }
            })?;
            NodeKind::Terminal { terminal_type }
        }
        other => {
            return Err(WorkflowConversionError::UnsupportedNodeType {
                node_id: node.id,
                type_name: other.to_string(),
            });
        }
    };

    Ok(WorkflowNode {
        id: node.id,
        label: data.label.unwrap_or_default(),
        description: data.description.unwrap_or_default(),
        kind,
    })
}
