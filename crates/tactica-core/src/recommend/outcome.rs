use crate::rules::schema::RuleId;
use crate::trace::DecisionTrace;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackingStyle {
    #[serde(rename = "Counter Attack")]
    CounterAttack,
    #[serde(rename = "Possession Control")]
    PossessionControl,
    #[serde(rename = "Wing Play")]
    WingPlay,
    Balanced,
}

impl AttackingStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            AttackingStyle::CounterAttack => "Counter Attack",
            AttackingStyle::PossessionControl => "Possession Control",
            AttackingStyle::WingPlay => "Wing Play",
            AttackingStyle::Balanced => "Balanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefensiveStyle {
    #[serde(rename = "Low Block")]
    LowBlock,
    #[serde(rename = "High Press")]
    HighPress,
    #[serde(rename = "Mid Block")]
    MidBlock,
}

impl DefensiveStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            DefensiveStyle::LowBlock => "Low Block",
            DefensiveStyle::HighPress => "High Press",
            DefensiveStyle::MidBlock => "Mid Block",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tempo {
    #[serde(rename = "Slow & Patient")]
    SlowAndPatient,
    #[serde(rename = "Fast / Direct")]
    FastDirect,
    Standard,
}

impl Tempo {
    pub fn as_str(self) -> &'static str {
        match self {
            Tempo::SlowAndPatient => "Slow & Patient",
            Tempo::FastDirect => "Fast / Direct",
            Tempo::Standard => "Standard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyInstruction {
    #[serde(rename = "Overload the flanks and cross early.")]
    OverloadFlanks,
    #[serde(rename = "Stay compact and force shots from distance.")]
    StayCompact,
    #[serde(rename = "Bypass midfield with long balls to strikers.")]
    BypassMidfield,
    #[serde(rename = "Maintain formation discipline.")]
    MaintainDiscipline,
}

impl KeyInstruction {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyInstruction::OverloadFlanks => "Overload the flanks and cross early.",
            KeyInstruction::StayCompact => "Stay compact and force shots from distance.",
            KeyInstruction::BypassMidfield => "Bypass midfield with long balls to strikers.",
            KeyInstruction::MaintainDiscipline => "Maintain formation discipline.",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(AttackingStyle, DefensiveStyle, Tempo, KeyInstruction, Archetype);

/// Match instructions that accompany the formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactics {
    pub attacking_style: AttackingStyle,
    pub defensive_style: DefensiveStyle,
    pub tempo: Tempo,
    pub key_instruction: KeyInstruction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Messi,
    Ronaldo,
    Neymar,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Archetype::Messi => "messi",
            Archetype::Ronaldo => "ronaldo",
            Archetype::Neymar => "neymar",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Archetype::Messi => "Orchestrator needed to control tempo and exploit small spaces.",
            Archetype::Ronaldo => {
                "Clinical finisher needed for fast transitions and counter-attacks."
            }
            Archetype::Neymar => {
                "Creative playmaker needed to unlock defense with individual brilliance."
            }
        }
    }
}

/// The kind of player best suited to carry out the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerArchetype {
    pub name: Archetype,
    pub description: String,
}

impl From<Archetype> for PlayerArchetype {
    fn from(name: Archetype) -> Self {
        Self {
            name,
            description: name.description().to_string(),
        }
    }
}

/// The full recommendation returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Always set, whichever path chose it.
    pub recommended_formation: String,
    /// Explanation fragments joined by single spaces, in the order produced.
    pub tactical_explanation: String,
    pub tactics: Tactics,
    pub key_player_archetype: PlayerArchetype,
}

/// Why the default formation was used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DefaultCause {
    /// Classifier, encoders or decoder were not loaded.
    NoClassifier,
    /// The classifier path ran and failed.
    ClassifierFailed { detail: String },
}

/// Which layer decided the formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Resolution {
    Rule { rule: RuleId },
    Classifier { label: String },
    Default { cause: DefaultCause },
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Rule { rule } => write!(f, "rule:{rule}"),
            Resolution::Classifier { label } => write!(f, "classifier:{label}"),
            Resolution::Default {
                cause: DefaultCause::NoClassifier,
            } => write!(f, "default:no_classifier"),
            Resolution::Default {
                cause: DefaultCause::ClassifierFailed { .. },
            } => write!(f, "default:classifier_failed"),
        }
    }
}

/// Engine output: the result plus how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub result: RecommendationResult,
    pub resolution: Resolution,
    pub trace: DecisionTrace,
}
