pub mod archetype;
pub mod directives;
pub mod engine;
pub mod outcome;

pub use engine::recommend;
pub use outcome::{
    Archetype, DefaultCause, PlayerArchetype, Recommendation, RecommendationResult, Resolution,
    Tactics,
};
