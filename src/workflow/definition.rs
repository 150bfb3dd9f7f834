use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete, canonical definition of an underwriting workflow.
/// This is the target structure for any editor-specific format conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
}

/// A single block of the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl WorkflowNode {
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// The label shown for this node, falling back to a per-type default when empty.
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            return &self.label;
        }
        match &self.kind {
            NodeKind::Terminal { terminal_type } => terminal_type.default_label(),
            NodeKind::ApplicationDecision(_) | NodeKind::OfferFiltering(_) => "Decision Node",
            NodeKind::OfferOptimization { .. } => "Node",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }
}

/// The type-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    ApplicationDecision(DecisionConfig),
    OfferFiltering(DecisionConfig),
    #[serde(rename_all = "camelCase")]
    OfferOptimization {
        #[serde(default)]
        goal: String,
    },
    #[serde(rename_all = "camelCase")]
    Terminal { terminal_type: TerminalType },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::ApplicationDecision(_) => NodeType::ApplicationDecision,
            NodeKind::OfferFiltering(_) => NodeType::OfferFiltering,
            NodeKind::OfferOptimization { .. } => NodeType::OfferOptimization,
            NodeKind::Terminal { .. } => NodeType::Terminal,
        }
    }
}

/// Rules and flow switch shared by both decision node types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionConfig {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default = "enabled")]
    pub execution_flow_enabled: bool,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            execution_flow_enabled: true,
        }
    }
}

fn enabled() -> bool {
    true
}

/// A condition/action pair. `outcome` is decided when the rule is authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub condition: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub outcome: RuleOutcome,
}

impl Rule {
    pub fn new(condition: &str, action: &str, outcome: RuleOutcome) -> Self {
        Self {
            condition: condition.to_string(),
            action: action.to_string(),
            outcome,
        }
    }
}

/// What a matching rule does to the application. Absent outcomes fail closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOutcome {
    Pass,
    #[default]
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalType {
    AutoDenial,
    ManualReview,
    AutoApproval,
}

impl TerminalType {
    pub fn default_label(&self) -> &'static str {
        match self {
            TerminalType::AutoDenial => "STOP WITH AUTO DENIAL",
            TerminalType::ManualReview => "STOP WITH MANUAL REVIEW",
            TerminalType::AutoApproval => "STOP WITH AUTO APPROVAL",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            TerminalType::AutoDenial => "Automatically deny the application",
            TerminalType::ManualReview => "Send application for manual review",
            TerminalType::AutoApproval => "Automatically approve the application",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto-denial" => Some(TerminalType::AutoDenial),
            "manual-review" => Some(TerminalType::ManualReview),
            "auto-approval" => Some(TerminalType::AutoApproval),
            _ => None,
        }
    }
}

/// Bare type tag of a node, as reported on execution steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    ApplicationDecision,
    OfferFiltering,
    OfferOptimization,
    Terminal,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::ApplicationDecision => "application-decision",
            NodeType::OfferFiltering => "offer-filtering",
            NodeType::OfferOptimization => "offer-optimization",
            NodeType::Terminal => "terminal",
        };
        write!(f, "{}", name)
    }
}

/// A connection from one node's outcome handle to another node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
}

impl WorkflowEdge {
    pub fn new(id: &str, source: &str, source_handle: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
        }
    }
}
