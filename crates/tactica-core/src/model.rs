use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The five match statistics, in feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OpponentFormation,
    OpponentPossession,
    PassAccuracy,
    ShotsOnTarget,
    PressingStyle,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::OpponentFormation,
        Field::OpponentPossession,
        Field::PassAccuracy,
        Field::ShotsOnTarget,
        Field::PressingStyle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::OpponentFormation => "opponent_formation",
            Field::OpponentPossession => "opponent_possession",
            Field::PassAccuracy => "pass_accuracy",
            Field::ShotsOnTarget => "shots_on_target",
            Field::PressingStyle => "pressing_style",
        }
    }

    /// Categorical fields go through a label encoder before inference.
    pub fn is_categorical(self) -> bool {
        matches!(self, Field::OpponentFormation | Field::PressingStyle)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressingStyle {
    Low,
    Medium,
    High,
}

impl PressingStyle {
    pub const ALL: [PressingStyle; 3] =
        [PressingStyle::Low, PressingStyle::Medium, PressingStyle::High];

    pub fn as_str(self) -> &'static str {
        match self {
            PressingStyle::Low => "Low",
            PressingStyle::Medium => "Medium",
            PressingStyle::High => "High",
        }
    }

    /// Case-insensitive: "high" and "HIGH" both mean `High` and so trigger
    /// the high-press rule. The encoder only ever sees the canonical spelling.
    pub fn from_str_loose(s: &str) -> Option<PressingStyle> {
        let lower = s.trim().to_lowercase();
        PressingStyle::ALL
            .into_iter()
            .find(|p| p.as_str().to_lowercase() == lower)
    }
}

impl fmt::Display for PressingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated match statistics for one recommendation.
///
/// Only [`crate::parsing::normalize`] builds this, so every value is known to
/// be present and in range by the time the rule ladder sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchContext {
    opponent_formation: String,
    opponent_possession: u32,
    pass_accuracy: u32,
    shots_on_target: u32,
    pressing_style: PressingStyle,
}

impl MatchContext {
    pub(crate) fn from_parts(
        opponent_formation: String,
        opponent_possession: u32,
        pass_accuracy: u32,
        shots_on_target: u32,
        pressing_style: PressingStyle,
    ) -> Self {
        Self {
            opponent_formation,
            opponent_possession,
            pass_accuracy,
            shots_on_target,
            pressing_style,
        }
    }

    /// Build a context from already-typed values, applying the same checks
    /// as request input.
    pub fn try_new(
        opponent_formation: &str,
        opponent_possession: i64,
        pass_accuracy: i64,
        shots_on_target: i64,
        pressing_style: &str,
    ) -> Result<Self, ValidationError> {
        let mut raw = RawMatchInput::new();
        raw.insert(Field::OpponentFormation, opponent_formation)
            .insert(Field::OpponentPossession, opponent_possession)
            .insert(Field::PassAccuracy, pass_accuracy)
            .insert(Field::ShotsOnTarget, shots_on_target)
            .insert(Field::PressingStyle, pressing_style);
        crate::parsing::normalize(&raw)
    }

    pub fn formation(&self) -> &str {
        &self.opponent_formation
    }

    pub fn possession(&self) -> u32 {
        self.opponent_possession
    }

    pub fn pass_accuracy(&self) -> u32 {
        self.pass_accuracy
    }

    pub fn shots_on_target(&self) -> u32 {
        self.shots_on_target
    }

    pub fn pressing_style(&self) -> PressingStyle {
        self.pressing_style
    }

    pub fn is_high_press(&self) -> bool {
        self.pressing_style == PressingStyle::High
    }
}

/// Untyped request fields as they arrive from JSON or `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMatchInput {
    fields: Map<String, Value>,
}

impl RawMatchInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object body. Anything other than an object is rejected.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Form-style input: every value arrives as text.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { fields }
    }

    pub fn insert(&mut self, field: Field, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.as_str().to_string(), value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: RawMatchInput) {
        self.fields.extend(other.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressing_style_loose() {
        assert_eq!(PressingStyle::from_str_loose("High"), Some(PressingStyle::High));
        assert_eq!(PressingStyle::from_str_loose(" medium "), Some(PressingStyle::Medium));
        assert_eq!(PressingStyle::from_str_loose("LOW"), Some(PressingStyle::Low));
        assert_eq!(PressingStyle::from_str_loose("gegenpress"), None);
    }

    #[test]
    fn test_lowercase_high_is_a_high_press() {
        let ctx = MatchContext::try_new("4-2-3-1", 50, 80, 5, "high").unwrap();
        assert!(ctx.is_high_press());
        assert_eq!(ctx.pressing_style().as_str(), "High");
    }

    #[test]
    fn test_raw_input_rejects_non_object() {
        assert!(RawMatchInput::from_json_str("[1, 2]").is_err());
        assert!(RawMatchInput::from_json_str(r#"{"pass_accuracy": 80}"#).is_ok());
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = RawMatchInput::from_pairs([("opponent_possession", "40")]);
        let mut top = RawMatchInput::new();
        top.insert(Field::OpponentPossession, 55);
        base.merge(top);
        assert_eq!(base.get(Field::OpponentPossession), Some(&Value::from(55)));
    }

    #[test]
    fn test_categorical_fields() {
        let cats: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_categorical()).collect();
        assert_eq!(cats, vec![Field::OpponentFormation, Field::PressingStyle]);
    }
}
