//! Unit tests for small building blocks: values, traces, errors, inputs and configuration.
use ahash::AHashMap;
use shinsa::ast::format_number;
use shinsa::prelude::*;

#[test]
fn test_number_formatting() {
    assert_eq!(format_number(650.0), "650");
    assert_eq!(format_number(-3.0), "-3");
    assert_eq!(format_number(0.35), "0.35");
    assert_eq!(Value::Number(50_000.0).to_string(), "50000");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Null.to_string(), "null");
}

#[test]
fn test_operand_display() {
    assert_eq!(Operand::Literal(0.4).to_string(), "0.4");
    assert_eq!(Operand::Input("credit_score".to_string()).to_string(), "credit_score");
}

#[test]
fn test_expression_display_adds_needed_parens_only() {
    let cmp = |name: &str, n: f64| {
        Expression::GreaterThan(Operand::Input(name.to_string()), Operand::Literal(n))
    };
    let expr = Expression::And(
        Box::new(Expression::Or(Box::new(cmp("a", 1.0)), Box::new(cmp("b", 2.0)))),
        Box::new(cmp("c", 3.0)),
    );
    assert_eq!(expr.to_string(), "(a > 1 OR b > 2) AND c > 3");
    assert_eq!(expr.op_symbol(), "AND");

    let flat = Expression::Or(
        Box::new(Expression::And(Box::new(cmp("a", 1.0)), Box::new(cmp("b", 2.0)))),
        Box::new(cmp("c", 3.0)),
    );
    assert_eq!(flat.to_string(), "a > 1 AND b > 2 OR c > 3");
}

#[test]
fn test_trace_formatter_hides_short_circuited_side() {
    let trace = EvaluationTrace::BinaryOp {
        op_symbol: "AND",
        left: Box::new(EvaluationTrace::BinaryOp {
            op_symbol: "<",
            left: Box::new(EvaluationTrace::Input {
                name: "credit_score".to_string(),
                value: Value::Number(700.0),
            }),
            right: Box::new(EvaluationTrace::Literal {
                value: Value::Number(600.0),
            }),
            outcome: Value::Bool(false),
        }),
        right: Box::new(EvaluationTrace::NotEvaluated),
        outcome: Value::Bool(false),
    };

    assert!(!trace.is_true());
    assert_eq!(trace.get_outcome(), Value::Bool(false));
    assert_eq!(
        TraceFormatter::format_trace(&trace),
        "credit_score (was 700) < 600"
    );
}

#[test]
fn test_trace_formatter_parenthesizes_or_under_and() {
    let condition = Condition::parse("(credit_score < 600 || debt_to_income < 0.4) && employment_years >= 2").unwrap();
    let trace = condition.evaluate_traced(&ValidationInput::default()).unwrap();

    assert!(trace.is_true());
    assert_eq!(
        TraceFormatter::format_trace(&trace),
        "(credit_score (was 650) < 600 OR debt_to_income (was 0.35) < 0.4) AND employment_years (was 2) >= 2"
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GraphError::MultipleEntryPoints {
            node_ids: vec!["a".to_string(), "b".to_string()]
        }
        .to_string(),
        "Workflow has 2 entry points (a, b), exactly one node may lack incoming edges"
    );
    assert_eq!(
        GraphError::AmbiguousBranch {
            node_id: "n".to_string(),
            handle: Handle::Fail
        }
        .to_string(),
        "Node 'n' has more than one outgoing edge on the fail handle"
    );
    assert_eq!(
        WalkError::StepLimitExceeded { limit: 8 }.to_string(),
        "Step limit of 8 exceeded"
    );
    assert_eq!(
        ConditionError::UnknownIdentifier {
            name: "foo".to_string()
        }
        .to_string(),
        "Unknown identifier 'foo' in condition"
    );
}

#[test]
fn test_errors_serialize_with_kind_tag() {
    let json = serde_json::to_value(WalkError::CycleDetected {
        node_id: "a".to_string(),
    })
    .unwrap();
    assert_eq!(json["kind"], "cycle_detected");
    assert_eq!(json["node_id"], "a");

    let json = serde_json::to_value(ConditionError::UnknownIdentifier {
        name: "x".to_string(),
    })
    .unwrap();
    assert_eq!(json["kind"], "unknown_identifier");
}

#[test]
fn test_validation_input_lookup() {
    let input = ValidationInput::default();
    assert_eq!(input.credit_score, 650);
    assert_eq!(input.annual_income, 50_000);
    assert_eq!(input.lookup("debt_to_income"), Some(0.35));
    assert_eq!(input.lookup("employment_years"), Some(2.0));
    assert_eq!(input.lookup("loan_amount"), None);

    for field in ValidationInput::FIELDS {
        assert!(input.lookup(field).is_some(), "field {} should resolve", field);
    }
}

#[test]
fn test_map_lookup() {
    let mut map = AHashMap::new();
    map.insert("credit_score".to_string(), 710.0);
    assert_eq!(map.lookup("credit_score"), Some(710.0));
    assert_eq!(map.lookup("annual_income"), None);
}

#[test]
fn test_step_limit() {
    let config = ExecutorConfig::default();
    assert_eq!(config.step_limit_for(5), 10);
    assert_eq!(config.step_limit_for(0), 1);
    assert_eq!(config.clone().with_step_limit_factor(3).step_limit_for(4), 12);
    assert_eq!(config.with_step_limit(7).step_limit_for(100), 7);
}

#[test]
fn test_executor_config_serde_defaults() {
    let config: ExecutorConfig = serde_json::from_str(r#"{ "denied_label": "Declined" }"#).unwrap();
    assert_eq!(config.approved_label, "Approved");
    assert_eq!(config.denied_label, "Declined");
    assert_eq!(config.step_limit_factor, 2);
    assert_eq!(config.step_limit, None);
}

#[test]
fn test_display_label_fallbacks() {
    let node = WorkflowNode {
        id: "t".to_string(),
        label: String::new(),
        description: String::new(),
        kind: NodeKind::Terminal {
            terminal_type: TerminalType::AutoApproval,
        },
    };
    assert_eq!(node.display_label(), "STOP WITH AUTO APPROVAL");
    assert!(node.is_terminal());
    assert_eq!(node.node_type().to_string(), "terminal");

    let node = WorkflowNode {
        id: "o".to_string(),
        label: String::new(),
        description: String::new(),
        kind: NodeKind::OfferOptimization {
            goal: String::new(),
        },
    };
    assert_eq!(node.display_label(), "Node");
    assert_eq!(TerminalType::from_name("manual-review"), Some(TerminalType::ManualReview));
    assert_eq!(TerminalType::from_name("Manual Review"), None);
}

#[test]
fn test_action_keywords() {
    let keywords = ActionKeywords::default();
    assert_eq!(keywords.outcome_for("Approve for further review"), RuleOutcome::Pass);
    assert_eq!(keywords.outcome_for("PROCEED to offers"), RuleOutcome::Pass);
    assert_eq!(keywords.outcome_for("Decline application"), RuleOutcome::Fail);
    assert_eq!(keywords.outcome_for(""), RuleOutcome::Fail);
}

#[test]
fn test_rule_outcome_defaults_to_fail() {
    let rule: Rule = serde_json::from_str(r#"{ "condition": "credit_score > 1" }"#).unwrap();
    assert_eq!(rule.outcome, RuleOutcome::Fail);
    assert_eq!(rule.action, "");
}
