pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod model;
pub mod parsing;
pub mod recommend;
pub mod rules;
pub mod trace;

use artifacts::Artifacts;
use error::ValidationError;
use model::RawMatchInput;

pub use recommend::{recommend, Recommendation, RecommendationResult, Resolution};

/// Main API entry point: recommend a formation for raw match statistics.
///
/// Fails only when the input does not normalize. Every classifier problem is
/// absorbed and degrades to the default formation, so any valid input yields
/// a recommendation. `artifacts` is shared read-only and may be used from
/// many threads at once.
pub fn predict(
    raw: &RawMatchInput,
    artifacts: &Artifacts,
) -> Result<Recommendation, ValidationError> {
    let ctx = parsing::normalize(raw)?;
    Ok(recommend(&ctx, artifacts))
}
