use crate::model::MatchContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one rung of the rule ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    PossessionDominance,
    HighPress,
    CentralOverload,
    FlatMidfield,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::PossessionDominance => "possession_dominance",
            RuleId::HighPress => "high_press",
            RuleId::CentralOverload => "central_overload",
            RuleId::FlatMidfield => "flat_midfield",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule recommends once its condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub formation: &'static str,
    pub fragments: Vec<String>,
}

/// A single (condition, action) pair on the ladder.
pub struct Rule {
    pub id: RuleId,
    /// One-line description of the condition, for `rules list`.
    pub condition: &'static str,
    /// Possible outcomes, for `rules list`.
    pub outcomes: &'static str,
    pub applies: fn(&MatchContext) -> bool,
    pub verdict: fn(&MatchContext) -> Verdict,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("condition", &self.condition)
            .finish()
    }
}

/// The rule that fired, with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    pub rule: RuleId,
    pub formation: String,
    pub fragments: Vec<String>,
}

/// Result of walking the ladder: every rule that was checked, in order,
/// and the one that fired (if any). The matched rule is the last checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderOutcome {
    pub checked: Vec<RuleId>,
    pub matched: Option<RuleMatch>,
}
