use crate::artifacts::Artifacts;
use crate::classifier;
use crate::model::MatchContext;
use crate::recommend::outcome::{DefaultCause, Recommendation, RecommendationResult, Resolution};
use crate::recommend::{archetype, directives};
use crate::rules;
use crate::trace::{DecisionTrace, TraceStepType};

/// Formation used when neither the rules nor the classifier decide.
pub const DEFAULT_FORMATION: &str = "4-2-3-1";

/// Explanation for the default formation, by cause.
pub fn default_fragment(cause: &DefaultCause) -> &'static str {
    match cause {
        DefaultCause::NoClassifier => {
            "Selected as a balanced starting point to assess opponent weaknesses."
        }
        DefaultCause::ClassifierFailed { .. } => {
            "Recommended largely due to its balanced nature and flexibility."
        }
    }
}

/// Recommend a formation, tactics and key player for a validated context.
///
/// Resolution order: rule ladder, then classifier fallback (only when no rule
/// fired and all artifacts are loaded), then the fixed default. Directives and
/// archetype are derived from the context regardless of which path chose the
/// formation. This never fails.
pub fn recommend(ctx: &MatchContext, artifacts: &Artifacts) -> Recommendation {
    let mut trace = DecisionTrace::default();

    let ladder = rules::evaluate(ctx);
    trace.record_ladder(&ladder);

    let (formation, fragments, resolution) = match ladder.matched {
        Some(m) => (m.formation, m.fragments, Resolution::Rule { rule: m.rule }),
        None => resolve_without_rule(ctx, artifacts, &mut trace),
    };

    let tactics = directives::generate(ctx);
    trace.push(
        TraceStepType::Directive,
        format!(
            "Attacking {}, defending {}, tempo {}",
            tactics.attacking_style, tactics.defensive_style, tactics.tempo
        ),
    );

    let key_player = archetype::select(ctx);
    trace.push(
        TraceStepType::Archetype,
        format!(
            "Key player '{}' for possession {}% with {} pressing",
            key_player.name,
            ctx.possession(),
            ctx.pressing_style()
        ),
    );

    Recommendation {
        result: RecommendationResult {
            recommended_formation: formation,
            tactical_explanation: fragments.join(" "),
            tactics,
            key_player_archetype: key_player,
        },
        resolution,
        trace,
    }
}

fn resolve_without_rule(
    ctx: &MatchContext,
    artifacts: &Artifacts,
    trace: &mut DecisionTrace,
) -> (String, Vec<String>, Resolution) {
    let cause = match artifacts.fallback() {
        None => {
            trace.push(
                TraceStepType::ClassifierSkipped,
                "Classifier artifacts not loaded",
            );
            DefaultCause::NoClassifier
        }
        Some(model) => match classifier::resolve(ctx, model) {
            Ok(m) => {
                trace.record_features(&m.features);
                trace.push(
                    TraceStepType::ClassifierPrediction,
                    format!("Classifier predicted {}", m.label),
                );
                let fragment = m.fragment();
                return (
                    m.label.clone(),
                    vec![fragment],
                    Resolution::Classifier { label: m.label },
                );
            }
            Err(e) => {
                let stage = if e.is_encoding() { "Encoding" } else { "Inference" };
                log::warn!("classifier fallback failed during {}: {}", stage.to_lowercase(), e);
                trace.push(
                    TraceStepType::ClassifierFailed,
                    format!("{} failed: {}", stage, e),
                );
                DefaultCause::ClassifierFailed {
                    detail: e.to_string(),
                }
            }
        },
    };

    trace.push(
        TraceStepType::DefaultApplied,
        format!("Default formation {}", DEFAULT_FORMATION),
    );
    (
        DEFAULT_FORMATION.to_string(),
        vec![default_fragment(&cause).to_string()],
        Resolution::Default { cause },
    )
}
