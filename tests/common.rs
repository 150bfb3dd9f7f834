//! Common test utilities for building workflow graphs and inputs.
use shinsa::prelude::*;

/// Routes engine logs to the test output. Set `RUST_LOG=shinsa=trace` to see every step.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a decision node of the `application-decision` type.
#[allow(dead_code)]
pub fn decision(id: &str, label: &str, rules: Vec<Rule>) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        label: label.to_string(),
        description: String::new(),
        kind: NodeKind::ApplicationDecision(DecisionConfig {
            rules,
            execution_flow_enabled: true,
        }),
    }
}

/// Creates a terminal node labelled with its type's default label.
#[allow(dead_code)]
pub fn terminal(id: &str, terminal_type: TerminalType) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        label: terminal_type.default_label().to_string(),
        description: terminal_type.default_description().to_string(),
        kind: NodeKind::Terminal { terminal_type },
    }
}

#[allow(dead_code)]
pub fn optimization(id: &str, goal: &str) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        label: "Offer Optimization".to_string(),
        description: String::new(),
        kind: NodeKind::OfferOptimization {
            goal: goal.to_string(),
        },
    }
}

#[allow(dead_code)]
pub fn pass_rule(condition: &str) -> Rule {
    Rule::new(condition, "Approve for further review", RuleOutcome::Pass)
}

#[allow(dead_code)]
pub fn fail_rule(condition: &str) -> Rule {
    Rule::new(condition, "Decline application", RuleOutcome::Fail)
}

#[allow(dead_code)]
pub fn edge(source: &str, handle: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(&format!("{}-{}", source, target), source, handle, target)
}

/// Creates the basic credit check workflow.
///
/// Logic: `credit_score >= 650` -> auto approval, otherwise -> auto denial
#[allow(dead_code)]
pub fn create_credit_check_graph() -> WorkflowGraph {
    WorkflowGraph {
        nodes: vec![
            decision(
                "credit",
                "Credit Eligibility Check",
                vec![pass_rule("credit_score >= 650")],
            ),
            terminal("approve", TerminalType::AutoApproval),
            terminal("deny", TerminalType::AutoDenial),
        ],
        edges: vec![
            edge("credit", "pass", "approve"),
            edge("credit", "fail", "deny"),
        ],
    }
}

/// Creates a three-stage workflow using the editor's `continue` / `terminal` handle names.
///
/// credit check -> offer filtering (no rules) -> optimization -> manual review
#[allow(dead_code)]
pub fn create_pipeline_graph() -> WorkflowGraph {
    WorkflowGraph {
        nodes: vec![
            decision(
                "credit",
                "Credit Eligibility Check",
                vec![
                    pass_rule("credit_score >= 650"),
                    fail_rule("credit_score < 650"),
                ],
            ),
            WorkflowNode {
                id: "filter".to_string(),
                label: "Offer Filtering".to_string(),
                description: String::new(),
                kind: NodeKind::OfferFiltering(DecisionConfig::default()),
            },
            optimization("optimize", "Maximize return"),
            terminal("review", TerminalType::ManualReview),
            terminal("deny", TerminalType::AutoDenial),
        ],
        edges: vec![
            edge("credit", "continue", "filter"),
            edge("credit", "terminal", "deny"),
            edge("filter", "continue", "optimize"),
            edge("optimize", "continue", "review"),
        ],
    }
}

#[allow(dead_code)]
pub fn applicant(credit_score: i64) -> ValidationInput {
    ValidationInput {
        credit_score,
        ..ValidationInput::default()
    }
}

/// The editor's own sample workflow, as the canvas serializes it.
#[allow(dead_code)]
pub const EDITOR_WORKFLOW_JSON: &str = r#"{
  "nodes": [
    {
      "id": "application-decision-1",
      "type": "application-decision",
      "position": { "x": 100, "y": 100 },
      "data": {
        "label": "Credit Eligibility Check",
        "description": "Evaluate whether the application meets minimum credit criteria.",
        "rules": [
          { "condition": "credit_score >= 650", "action": "Approve for further review" },
          { "condition": "credit_score < 650", "action": "Decline application" }
        ],
        "expanded": false,
        "executionFlowEnabled": true,
        "passOutcome": "proceed",
        "failOutcome": "auto-denial"
      }
    },
    {
      "id": "offer-filtering-1",
      "type": "offer-filtering",
      "position": { "x": 100, "y": 300 },
      "data": {
        "label": "Offer Filtering",
        "rules": [],
        "executionFlowEnabled": true
      }
    },
    {
      "id": "optimization-1",
      "type": "offer-optimization",
      "position": { "x": 100, "y": 500 },
      "data": { "label": "Offer Optimization", "goal": "Maximize return" }
    },
    {
      "id": "terminal-auto-denial-1",
      "type": "terminal",
      "data": {
        "label": "STOP WITH AUTO DENIAL",
        "description": "Automatically deny the application",
        "terminalType": "auto-denial"
      }
    }
  ],
  "edges": [
    { "id": "e1-2", "source": "application-decision-1", "sourceHandle": "continue", "target": "offer-filtering-1", "animated": true },
    { "id": "e1-d", "source": "application-decision-1", "sourceHandle": "terminal", "target": "terminal-auto-denial-1" },
    { "id": "e2-3", "source": "offer-filtering-1", "sourceHandle": "continue", "target": "optimization-1" }
  ]
}"#;
