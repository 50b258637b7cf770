use crate::classifier::EncodedFeature;
use crate::rules::schema::LadderOutcome;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    RuleCheck,
    RuleFired,
    FeatureEncoding,
    ClassifierPrediction,
    ClassifierSkipped,
    ClassifierFailed,
    DefaultApplied,
    Directive,
    Archetype,
}

impl TraceStepType {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceStepType::RuleCheck => "rule_check",
            TraceStepType::RuleFired => "rule_fired",
            TraceStepType::FeatureEncoding => "feature_encoding",
            TraceStepType::ClassifierPrediction => "classifier_prediction",
            TraceStepType::ClassifierSkipped => "classifier_skipped",
            TraceStepType::ClassifierFailed => "classifier_failed",
            TraceStepType::DefaultApplied => "default_applied",
            TraceStepType::Directive => "directive",
            TraceStepType::Archetype => "archetype",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// Every step the engine took for one recommendation, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub trace_schema_version: String,
    pub steps: Vec<TraceStep>,
}

impl Default for DecisionTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            steps: Vec::new(),
        }
    }
}

impl DecisionTrace {
    pub fn push(&mut self, step_type: TraceStepType, message: impl Into<String>) {
        self.steps.push(TraceStep {
            step_type,
            message: message.into(),
        });
    }

    pub fn steps_of(&self, step_type: TraceStepType) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(move |s| s.step_type == step_type)
    }

    pub fn record_ladder(&mut self, outcome: &LadderOutcome) {
        let fired = outcome.matched.as_ref().map(|m| m.rule);
        for id in &outcome.checked {
            if Some(*id) == fired {
                continue;
            }
            self.push(TraceStepType::RuleCheck, format!("Rule '{}' did not apply", id));
        }
        match &outcome.matched {
            Some(m) => self.push(
                TraceStepType::RuleFired,
                format!("Rule '{}' fired -> {}", m.rule, m.formation),
            ),
            None => self.push(TraceStepType::RuleCheck, "No rule applied"),
        }
    }

    pub fn record_features(&mut self, features: &[EncodedFeature]) {
        for f in features {
            self.push(
                TraceStepType::FeatureEncoding,
                format!("Encoded {} '{}' as {}", f.field, f.raw, f.value),
            );
        }
    }
}
