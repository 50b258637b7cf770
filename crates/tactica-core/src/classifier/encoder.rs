use crate::error::TacticaError;
use crate::model::Field;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Maps category labels to the integer codes a model was trained on.
///
/// The code for a label is its position in `classes`. The same type decodes
/// model output back into formation names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, TacticaError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Check that the class list is non-empty and free of duplicates.
    pub fn validate(&self) -> Result<(), TacticaError> {
        if self.classes.is_empty() {
            return Err(TacticaError::ArtifactInvalid(
                "encoder classes must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class.as_str()) {
                return Err(TacticaError::ArtifactInvalid(format!(
                    "duplicate encoder class '{}'",
                    class
                )));
            }
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn inverse_transform(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// Fitted encoders for the categorical input fields, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureEncoders {
    by_field: BTreeMap<String, LabelEncoder>,
}

impl FeatureEncoders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, encoder: LabelEncoder) -> Self {
        self.by_field.insert(field.as_str().to_string(), encoder);
        self
    }

    pub fn get(&self, field: Field) -> Option<&LabelEncoder> {
        self.by_field.get(field.as_str())
    }

    /// Validate every encoder. Keys that are not input fields are reported
    /// as errors so a typo in the artifact does not silently disable one.
    pub fn validate(&self) -> Result<(), TacticaError> {
        for (name, encoder) in &self.by_field {
            if !Field::ALL.iter().any(|f| f.as_str() == name) {
                return Err(TacticaError::ArtifactInvalid(format!(
                    "encoder for unknown field '{}'",
                    name
                )));
            }
            encoder.validate().map_err(|e| {
                TacticaError::ArtifactInvalid(format!("encoder '{}': {}", name, e))
            })?;
        }
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.by_field.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(classes: &[&str]) -> LabelEncoder {
        LabelEncoder::new(classes.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_transform_and_inverse() {
        let enc = encoder(&["High", "Low", "Medium"]);
        assert_eq!(enc.transform("Low"), Some(1));
        assert_eq!(enc.transform("low"), None);
        assert_eq!(enc.inverse_transform(2), Some("Medium"));
        assert_eq!(enc.inverse_transform(3), None);
    }

    #[test]
    fn test_empty_and_duplicate_classes_rejected() {
        assert!(LabelEncoder::new(vec![]).is_err());
        assert!(LabelEncoder::new(vec!["a".into(), "a".into()]).is_err());
    }

    #[test]
    fn test_feature_encoders_from_json() {
        let json = r#"{
            "opponent_formation": { "classes": ["3-5-2", "4-3-3"] },
            "pressing_style": { "classes": ["High", "Low", "Medium"] }
        }"#;
        let encoders: FeatureEncoders = serde_json::from_str(json).unwrap();
        encoders.validate().unwrap();
        assert_eq!(
            encoders.get(Field::OpponentFormation).unwrap().transform("4-3-3"),
            Some(1)
        );
        assert!(encoders.get(Field::PassAccuracy).is_none());
    }

    #[test]
    fn test_unknown_encoder_key_rejected() {
        let json = r#"{ "pressing": { "classes": ["High"] } }"#;
        let encoders: FeatureEncoders = serde_json::from_str(json).unwrap();
        assert!(encoders.validate().is_err());
    }
}
