pub mod encoder;
pub mod forest;

use crate::model::{Field, MatchContext};
use encoder::{FeatureEncoders, LabelEncoder};
use serde::{Deserialize, Serialize};

/// Trait for pre-trained formation classifiers.
pub trait Classifier: Send + Sync {
    /// Predict the encoded output class for one feature row.
    fn predict(&self, features: &[f64]) -> Result<usize, FallbackError>;

    /// Name of this model kind (for diagnostics).
    fn model_name(&self) -> &str;
}

/// Recoverable failures on the classifier path. None of these reach the
/// caller of `predict`; they route the decision to the default formation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FallbackError {
    #[error("no encoder fitted for {field}")]
    MissingEncoder { field: Field },

    #[error("{field} value '{value}' was not seen during training")]
    UnseenCategory { field: Field, value: String },

    #[error("model expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("malformed model: {0}")]
    MalformedModel(String),

    #[error("predicted class {index} is outside the decoder's {classes} labels")]
    UnknownClass { index: usize, classes: usize },
}

impl FallbackError {
    /// True for failures while building the feature vector, as opposed to
    /// failures inside the model or the output decoder.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            FallbackError::MissingEncoder { .. } | FallbackError::UnseenCategory { .. }
        )
    }
}

/// One slot of the feature vector, before and after encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeature {
    pub field: Field,
    pub raw: String,
    pub value: f64,
}

/// Borrowed view of everything the fallback needs. Only exists when all
/// three artifacts were loaded.
#[derive(Clone, Copy)]
pub struct FallbackModel<'a> {
    pub classifier: &'a dyn Classifier,
    pub encoders: &'a FeatureEncoders,
    pub decoder: &'a LabelEncoder,
}

/// A formation chosen by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierMatch {
    pub label: String,
    pub features: Vec<EncodedFeature>,
}

impl ClassifierMatch {
    pub fn fragment(&self) -> String {
        format!(
            "Statistical analysis of similar match situations suggests {} is the optimal counter.",
            self.label
        )
    }
}

/// Build the feature vector in training order:
/// [formation, possession, pass_accuracy, shots_on_target, pressing_style].
///
/// Categorical fields are replaced by their encoder code; numeric fields pass
/// through unchanged.
pub fn encode_features(
    ctx: &MatchContext,
    encoders: &FeatureEncoders,
) -> Result<Vec<EncodedFeature>, FallbackError> {
    Field::ALL
        .into_iter()
        .map(|field| -> Result<EncodedFeature, FallbackError> {
            let raw = raw_value(ctx, field);
            let value = if field.is_categorical() {
                let encoder = encoders
                    .get(field)
                    .ok_or(FallbackError::MissingEncoder { field })?;
                let code = encoder
                    .transform(&raw)
                    .ok_or_else(|| FallbackError::UnseenCategory {
                        field,
                        value: raw.clone(),
                    })?;
                code as f64
            } else {
                numeric_value(ctx, field)
            };
            log::debug!("encoded {} '{}' -> {}", field, raw, value);
            Ok(EncodedFeature { field, raw, value })
        })
        .collect()
}

/// Encode, infer and decode. Any failure aborts with no partial result.
pub fn resolve(ctx: &MatchContext, model: FallbackModel<'_>) -> Result<ClassifierMatch, FallbackError> {
    let features = encode_features(ctx, model.encoders)?;
    let row: Vec<f64> = features.iter().map(|f| f.value).collect();

    let index = model.classifier.predict(&row)?;
    let label = model
        .decoder
        .inverse_transform(index)
        .ok_or(FallbackError::UnknownClass {
            index,
            classes: model.decoder.classes().len(),
        })?
        .to_string();

    log::debug!(
        "{} predicted class {} ({})",
        model.classifier.model_name(),
        index,
        label
    );
    Ok(ClassifierMatch { label, features })
}

fn raw_value(ctx: &MatchContext, field: Field) -> String {
    match field {
        Field::OpponentFormation => ctx.formation().to_string(),
        Field::OpponentPossession => ctx.possession().to_string(),
        Field::PassAccuracy => ctx.pass_accuracy().to_string(),
        Field::ShotsOnTarget => ctx.shots_on_target().to_string(),
        Field::PressingStyle => ctx.pressing_style().as_str().to_string(),
    }
}

fn numeric_value(ctx: &MatchContext, field: Field) -> f64 {
    match field {
        Field::OpponentPossession => f64::from(ctx.possession()),
        Field::PassAccuracy => f64::from(ctx.pass_accuracy()),
        Field::ShotsOnTarget => f64::from(ctx.shots_on_target()),
        Field::OpponentFormation | Field::PressingStyle => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier(Result<usize, FallbackError>);

    impl Classifier for FixedClassifier {
        fn predict(&self, features: &[f64]) -> Result<usize, FallbackError> {
            assert_eq!(features.len(), 5);
            self.0.clone()
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn encoder(classes: &[&str]) -> LabelEncoder {
        LabelEncoder::new(classes.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn encoders() -> FeatureEncoders {
        FeatureEncoders::new()
            .with(Field::OpponentFormation, encoder(&["3-4-3", "4-2-3-1", "4-3-3"]))
            .with(Field::PressingStyle, encoder(&["High", "Low", "Medium"]))
    }

    fn ctx(formation: &str) -> MatchContext {
        MatchContext::try_new(formation, 50, 82, 4, "Low").unwrap()
    }

    #[test]
    fn test_feature_order_and_encoding() {
        let features = encode_features(&ctx("4-3-3"), &encoders()).unwrap();
        let values: Vec<f64> = features.iter().map(|f| f.value).collect();
        assert_eq!(values, vec![2.0, 50.0, 82.0, 4.0, 1.0]);
        assert_eq!(features[0].raw, "4-3-3");
        assert_eq!(features[4].raw, "Low");
    }

    #[test]
    fn test_unseen_category() {
        let err = encode_features(&ctx("4-1-4-1"), &encoders()).unwrap_err();
        assert_eq!(
            err,
            FallbackError::UnseenCategory {
                field: Field::OpponentFormation,
                value: "4-1-4-1".into()
            }
        );
        assert!(err.is_encoding());
    }

    #[test]
    fn test_missing_encoder() {
        let only_formation =
            FeatureEncoders::new().with(Field::OpponentFormation, encoder(&["4-3-3"]));
        let err = encode_features(&ctx("4-3-3"), &only_formation).unwrap_err();
        assert_eq!(
            err,
            FallbackError::MissingEncoder {
                field: Field::PressingStyle
            }
        );
    }

    #[test]
    fn test_resolve_decodes_label() {
        let classifier = FixedClassifier(Ok(1));
        let encoders = encoders();
        let decoder = encoder(&["3-5-2", "4-2-3-1"]);
        let model = FallbackModel {
            classifier: &classifier,
            encoders: &encoders,
            decoder: &decoder,
        };
        let m = resolve(&ctx("4-3-3"), model).unwrap();
        assert_eq!(m.label, "4-2-3-1");
        assert_eq!(
            m.fragment(),
            "Statistical analysis of similar match situations suggests 4-2-3-1 is the optimal counter."
        );
    }

    #[test]
    fn test_resolve_rejects_undecodable_class() {
        let classifier = FixedClassifier(Ok(5));
        let encoders = encoders();
        let decoder = encoder(&["3-5-2", "4-2-3-1"]);
        let model = FallbackModel {
            classifier: &classifier,
            encoders: &encoders,
            decoder: &decoder,
        };
        let err = resolve(&ctx("4-3-3"), model).unwrap_err();
        assert_eq!(err, FallbackError::UnknownClass { index: 5, classes: 2 });
        assert!(!err.is_encoding());
    }

    #[test]
    fn test_resolve_passes_model_errors_through() {
        let classifier = FixedClassifier(Err(FallbackError::MalformedModel("boom".into())));
        let encoders = encoders();
        let decoder = encoder(&["4-3-3"]);
        let model = FallbackModel {
            classifier: &classifier,
            encoders: &encoders,
            decoder: &decoder,
        };
        assert!(matches!(
            resolve(&ctx("4-3-3"), model),
            Err(FallbackError::MalformedModel(_))
        ));
    }
}
