use crate::compiler::{CompiledNode, CompiledRule, CompiledWorkflow};
use crate::data::DataSource;
use crate::error::WalkError;
use crate::trace::TraceFormatter;
use crate::workflow::{DecisionConfig, Handle, NodeKind, RuleOutcome};
use ahash::AHashSet;
use itertools::Itertools;
use tracing::{debug, trace, warn};

mod config;
mod record;

pub use config::ExecutorConfig;
pub use record::{ExecutionStep, ExecutionTrace, RuleAnomaly, StepOutcome, TraceStatus};

/// A visited node's step and the handle the walk leaves it on (`None` for terminals).
struct Visit {
    step: ExecutionStep,
    next: Option<Handle>,
}

/// Walks a compiled workflow against one set of inputs.
///
/// The workflow is only borrowed; every run owns its trace and visited set, so any number of
/// executors can share one `CompiledWorkflow`, including across threads.
pub struct Executor<'a> {
    workflow: &'a CompiledWorkflow,
    config: ExecutorConfig,
}

impl<'a> Executor<'a> {
    pub fn new(workflow: &'a CompiledWorkflow) -> Self {
        Self {
            workflow,
            config: ExecutorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Runs the workflow from its entry node until a terminal node or an abort.
    pub fn run<D>(&self, data: &D) -> ExecutionTrace
    where
        D: DataSource + ?Sized,
    {
        let limit = self.config.step_limit_for(self.workflow.node_count());
        let mut steps: Vec<ExecutionStep> = Vec::new();
        let mut visited = AHashSet::new();
        let mut current = self.workflow.entry_index();
        visited.insert(current);

        let status = loop {
            let visit = self.visit(self.workflow.compiled_node(current), data);
            trace!(
                node = %visit.step.node_id,
                outcome = %visit.step.outcome,
                reason = %visit.step.reason,
                "visited node"
            );
            steps.push(visit.step);

            let Some(handle) = visit.next else {
                break TraceStatus::Completed;
            };
            let node_id = &self.workflow.compiled_node(current).node.id;
            let Some(next) = self.workflow.next_index(current, handle) else {
                let err = WalkError::IncompleteBranch {
                    node_id: node_id.clone(),
                    handle,
                };
                break self.abort(&mut steps, current, err);
            };
            if steps.len() >= limit {
                break self.abort(&mut steps, next, WalkError::StepLimitExceeded { limit });
            }
            if !visited.insert(next) {
                let err = WalkError::CycleDetected {
                    node_id: self.workflow.compiled_node(next).node.id.clone(),
                };
                break self.abort(&mut steps, next, err);
            }
            current = next;
        };

        let final_outcome = self.final_outcome(&steps);
        debug!(steps = steps.len(), outcome = %final_outcome, "workflow run finished");
        ExecutionTrace {
            steps,
            final_outcome,
            status,
        }
    }

    fn visit<D>(&self, compiled: &CompiledNode, data: &D) -> Visit
    where
        D: DataSource + ?Sized,
    {
        let node = &compiled.node;
        let (outcome, reason, anomalies) = match &node.kind {
            NodeKind::Terminal { terminal_type } => {
                let reason = if node.description.is_empty() {
                    terminal_type.default_description().to_string()
                } else {
                    node.description.clone()
                };
                (StepOutcome::Terminal, reason, Vec::new())
            }
            NodeKind::ApplicationDecision(config) | NodeKind::OfferFiltering(config) => {
                self.decide(config, &compiled.rules, data)
            }
            NodeKind::OfferOptimization { goal } => {
                let reason = if goal.is_empty() {
                    "No optimization goal set - defaulting to pass".to_string()
                } else {
                    format!("Optimization goal '{}' - defaulting to pass", goal)
                };
                (StepOutcome::Pass, reason, Vec::new())
            }
        };

        let next = match outcome {
            StepOutcome::Pass => Some(Handle::Pass),
            StepOutcome::Fail => Some(Handle::Fail),
            StepOutcome::Terminal | StepOutcome::Aborted => None,
        };
        Visit {
            step: ExecutionStep {
                node_id: node.id.clone(),
                node_label: node.display_label().to_string(),
                node_type: node.node_type(),
                outcome,
                reason,
                anomalies,
            },
            next,
        }
    }

    /// Evaluates a decision node's rules in order; the first matching rule decides.
    fn decide<D>(
        &self,
        config: &DecisionConfig,
        rules: &[CompiledRule],
        data: &D,
    ) -> (StepOutcome, String, Vec<RuleAnomaly>)
    where
        D: DataSource + ?Sized,
    {
        if !config.execution_flow_enabled {
            return (
                StepOutcome::Pass,
                "Execution flow disabled - defaulting to pass".to_string(),
                Vec::new(),
            );
        }
        if rules.is_empty() {
            return (
                StepOutcome::Pass,
                "No rules defined - defaulting to pass".to_string(),
                Vec::new(),
            );
        }

        let mut anomalies = Vec::new();
        let mut decision = None;
        for (i, compiled) in rules.iter().enumerate() {
            let evaluated = compiled
                .condition
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|condition| condition.evaluate_traced(data));
            match evaluated {
                Ok(trace) if trace.is_true() => {
                    decision = Some((i + 1, &compiled.rule, trace));
                    break;
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(rule = i + 1, condition = %compiled.rule.condition, %error, "rule skipped");
                    anomalies.push(RuleAnomaly {
                        rule_number: i + 1,
                        condition: compiled.rule.condition.clone(),
                        error,
                    });
                }
            }
        }

        let (outcome, mut reason) = match decision {
            Some((number, rule, trace)) => {
                let outcome = match rule.outcome {
                    RuleOutcome::Pass => StepOutcome::Pass,
                    RuleOutcome::Fail => StepOutcome::Fail,
                };
                let mut reason = format!(
                    "Rule {} matched: {}",
                    number,
                    TraceFormatter::format_trace(&trace)
                );
                if !rule.action.is_empty() {
                    reason.push_str(&format!(" → {}", rule.action));
                }
                (outcome, reason)
            }
            None => (StepOutcome::Fail, "No rules matched".to_string()),
        };
        if !anomalies.is_empty() {
            reason.push_str(&format!(" ({})", anomalies.iter().join("; ")));
        }
        (outcome, reason, anomalies)
    }

    /// Closes the trace with a synthetic step describing why the walk stopped.
    fn abort(&self, steps: &mut Vec<ExecutionStep>, at: usize, err: WalkError) -> TraceStatus {
        let node = &self.workflow.compiled_node(at).node;
        warn!(node = %node.id, error = %err, "workflow run aborted");
        steps.push(ExecutionStep {
            node_id: node.id.clone(),
            node_label: node.display_label().to_string(),
            node_type: node.node_type(),
            outcome: StepOutcome::Aborted,
            reason: err.to_string(),
            anomalies: Vec::new(),
        });
        TraceStatus::Aborted(err)
    }

    fn final_outcome(&self, steps: &[ExecutionStep]) -> String {
        let last = steps
            .iter()
            .rev()
            .find(|step| step.outcome != StepOutcome::Aborted);
        match last {
            Some(step) if step.outcome == StepOutcome::Terminal => step.node_label.clone(),
            Some(step) if step.outcome == StepOutcome::Pass => self.config.approved_label.clone(),
            _ => self.config.denied_label.clone(),
        }
    }
}
