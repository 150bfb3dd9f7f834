//! Tests for graph validation and compilation.
mod common;
use common::*;
use shinsa::prelude::*;

#[test]
fn test_compiler_builds_credit_check() {
    let compiled = Compiler::builder(create_credit_check_graph())
        .build()
        .compile()
        .expect("Failed to compile");

    assert_eq!(compiled.node_count(), 3);
    assert_eq!(compiled.entry_node().id, "credit");
    assert_eq!(
        compiled.node("approve").map(|n| n.display_label()),
        Some("STOP WITH AUTO APPROVAL")
    );
    assert!(compiled.node("missing").is_none());
}

#[test]
fn test_outgoing_edge_lookup() {
    let compiled = Compiler::builder(create_pipeline_graph())
        .build()
        .compile()
        .unwrap();

    let pass = compiled.outgoing_edge("credit", Handle::Pass).unwrap();
    assert_eq!(pass.target, "filter");
    let fail = compiled.outgoing_edge("credit", Handle::Fail).unwrap();
    assert_eq!(fail.target, "deny");

    // Filtering only connects its pass side.
    assert!(compiled.outgoing_edge("filter", Handle::Fail).is_none());
    assert!(compiled.outgoing_edge("review", Handle::Pass).is_none());
}

#[test]
fn test_empty_graph_has_no_entry_point() {
    let result = Compiler::builder(WorkflowGraph::default()).build().compile();
    assert_eq!(result.err(), Some(GraphError::NoEntryPoint));
}

#[test]
fn test_closed_loop_has_no_entry_point() {
    let graph = WorkflowGraph {
        nodes: vec![
            decision("a", "A", vec![pass_rule("credit_score > 1")]),
            decision("b", "B", vec![pass_rule("credit_score > 1")]),
        ],
        edges: vec![edge("a", "pass", "b"), edge("b", "pass", "a")],
    };
    assert_eq!(shinsa::validate(&graph), Err(GraphError::NoEntryPoint));
}

#[test]
fn test_multiple_entry_points_are_listed_in_order() {
    let mut graph = create_credit_check_graph();
    graph
        .nodes
        .push(decision("orphan", "Orphan", vec![pass_rule("credit_score > 1")]));
    graph.nodes.push(terminal("review", TerminalType::ManualReview));

    match shinsa::validate(&graph) {
        Err(GraphError::MultipleEntryPoints { node_ids }) => {
            assert_eq!(node_ids, vec!["credit", "orphan", "review"]);
        }
        other => panic!("Expected MultipleEntryPoints, got {:?}", other),
    }
}

#[test]
fn test_ambiguous_branch() {
    let mut graph = create_credit_check_graph();
    graph.nodes.push(terminal("review", TerminalType::ManualReview));
    // `continue` is an alias of `pass`, so this is a second pass edge.
    graph.edges.push(edge("credit", "continue", "review"));

    assert_eq!(
        shinsa::validate(&graph),
        Err(GraphError::AmbiguousBranch {
            node_id: "credit".to_string(),
            handle: Handle::Pass,
        })
    );
}

#[test]
fn test_dangling_edge() {
    let mut graph = create_credit_check_graph();
    graph.edges[1].target = "nowhere".to_string();

    assert_eq!(
        shinsa::validate(&graph),
        Err(GraphError::DanglingEdge {
            edge_id: "credit-deny".to_string(),
            missing_node_id: "nowhere".to_string(),
        })
    );
}

#[test]
fn test_unknown_handle_is_rejected() {
    let mut graph = create_credit_check_graph();
    graph.edges[0].source_handle = "approve".to_string();

    assert_eq!(
        shinsa::validate(&graph),
        Err(GraphError::InvalidHandle {
            edge_id: "credit-approve".to_string(),
            node_id: "credit".to_string(),
            handle: "approve".to_string(),
        })
    );
}

#[test]
fn test_handle_alias_is_accepted() {
    let mut graph = create_credit_check_graph();
    graph.edges[0].source_handle = "approve".to_string();

    let compiled = Compiler::builder(graph)
        .with_handle_alias("approve", Handle::Pass)
        .build()
        .compile()
        .expect("alias should resolve");
    assert_eq!(
        compiled.outgoing_edge("credit", Handle::Pass).unwrap().target,
        "approve"
    );
}

#[test]
fn test_terminal_with_outgoing_edge() {
    let mut graph = create_credit_check_graph();
    graph.nodes.push(terminal("review", TerminalType::ManualReview));
    graph.edges.push(edge("deny", "pass", "review"));

    assert_eq!(
        shinsa::validate(&graph),
        Err(GraphError::TerminalHasOutgoingEdge {
            node_id: "deny".to_string(),
            edge_id: "deny-review".to_string(),
        })
    );
}

#[test]
fn test_duplicate_node_id() {
    let mut graph = create_credit_check_graph();
    graph.nodes.push(terminal("approve", TerminalType::ManualReview));

    assert_eq!(
        shinsa::validate(&graph),
        Err(GraphError::DuplicateNodeId("approve".to_string()))
    );
}

#[test]
fn test_first_structural_error_wins() {
    // Both a dangling edge and an unknown handle; the dangling endpoint is checked first.
    let mut graph = create_credit_check_graph();
    graph.edges[0].target = "nowhere".to_string();
    graph.edges[0].source_handle = "sideways".to_string();

    assert!(matches!(
        shinsa::validate(&graph),
        Err(GraphError::DanglingEdge { .. })
    ));
}

#[test]
fn test_malformed_condition_does_not_reject_graph() {
    let graph = WorkflowGraph {
        nodes: vec![
            decision(
                "credit",
                "Credit",
                vec![pass_rule("credit_score >= 650; drop()")],
            ),
            terminal("approve", TerminalType::AutoApproval),
            terminal("deny", TerminalType::AutoDenial),
        ],
        edges: vec![
            edge("credit", "pass", "approve"),
            edge("credit", "fail", "deny"),
        ],
    };

    let compiler = Compiler::builder(graph).build();
    assert!(compiler.validate().is_ok());
    assert!(compiler.compile().is_ok());
}

#[test]
fn test_graph_round_trips_through_json() {
    let graph = create_pipeline_graph();
    let json = serde_json::to_string(&graph).unwrap();
    assert!(json.contains(r#""type":"offer-filtering""#));
    assert!(json.contains(r#""sourceHandle":"continue""#));

    let parsed: WorkflowGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, graph);
}
