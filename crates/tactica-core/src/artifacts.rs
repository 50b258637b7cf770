use crate::classifier::encoder::{FeatureEncoders, LabelEncoder};
use crate::classifier::forest::DecisionForest;
use crate::classifier::{Classifier, FallbackModel};
use crate::error::TacticaError;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_PATH: &str = "model.json";
pub const DEFAULT_ENCODERS_PATH: &str = "encoders.json";
pub const DEFAULT_DECODER_PATH: &str = "output_encoder.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoders: PathBuf,
    pub decoder: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            encoders: PathBuf::from(DEFAULT_ENCODERS_PATH),
            decoder: PathBuf::from(DEFAULT_DECODER_PATH),
        }
    }
}

/// Classifier, encoders and output decoder, loaded once at startup and shared
/// read-only by every recommendation. Any of them may be absent.
#[derive(Default)]
pub struct Artifacts {
    classifier: Option<Box<dyn Classifier>>,
    encoders: Option<FeatureEncoders>,
    decoder: Option<LabelEncoder>,
}

impl Artifacts {
    /// No classifier: recommendations come from the rule ladder or the default.
    pub fn rules_only() -> Self {
        Self::default()
    }

    pub fn new(
        classifier: Option<Box<dyn Classifier>>,
        encoders: Option<FeatureEncoders>,
        decoder: Option<LabelEncoder>,
    ) -> Self {
        Self {
            classifier,
            encoders,
            decoder,
        }
    }

    /// The classifier fallback, if every piece of it is available.
    pub fn fallback(&self) -> Option<FallbackModel<'_>> {
        Some(FallbackModel {
            classifier: self.classifier.as_deref()?,
            encoders: self.encoders.as_ref()?,
            decoder: self.decoder.as_ref()?,
        })
    }

    pub fn classifier(&self) -> Option<&dyn Classifier> {
        self.classifier.as_deref()
    }

    pub fn encoders(&self) -> Option<&FeatureEncoders> {
        self.encoders.as_ref()
    }

    pub fn decoder(&self) -> Option<&LabelEncoder> {
        self.decoder.as_ref()
    }
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("classifier", &self.classifier.as_ref().map(|c| c.model_name()))
            .field("encoders", &self.encoders)
            .field("decoder", &self.decoder)
            .finish()
    }
}

/// Load every artifact that exists and parses.
///
/// A missing file leaves that component absent. A file that fails to load is
/// logged and also left absent; the engine then runs rules-only. Components
/// load independently of each other.
pub fn load_artifacts(paths: &ArtifactPaths) -> Artifacts {
    let classifier = lenient("model", &paths.model, load_classifier(&paths.model))
        .map(|forest| Box::new(forest) as Box<dyn Classifier>);
    let encoders = lenient("encoders", &paths.encoders, load_encoders(&paths.encoders));
    let decoder = lenient("output decoder", &paths.decoder, load_decoder(&paths.decoder));

    let artifacts = Artifacts::new(classifier, encoders, decoder);
    if artifacts.fallback().is_none() {
        log::info!("classifier fallback unavailable, running rules-only");
    }
    artifacts
}

fn lenient<T>(what: &str, path: &Path, loaded: Result<Option<T>, TacticaError>) -> Option<T> {
    match loaded {
        Ok(Some(value)) => {
            log::info!("loaded {} from {}", what, path.display());
            Some(value)
        }
        Ok(None) => {
            log::info!("no {} at {}", what, path.display());
            None
        }
        Err(e) => {
            log::warn!("ignoring {}: {}", what, e);
            None
        }
    }
}

/// Load a decision-forest model. `Ok(None)` if the file does not exist.
pub fn load_classifier(path: &Path) -> Result<Option<DecisionForest>, TacticaError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    DecisionForest::from_json_str(&content)
        .map(Some)
        .map_err(|e| load_error(path, e))
}

/// Load the categorical feature encoders. `Ok(None)` if the file does not exist.
pub fn load_encoders(path: &Path) -> Result<Option<FeatureEncoders>, TacticaError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    let encoders: FeatureEncoders =
        serde_json::from_str(&content).map_err(|e| load_error(path, e))?;
    encoders.validate().map_err(|e| load_error(path, e))?;
    Ok(Some(encoders))
}

/// Load the output label decoder. `Ok(None)` if the file does not exist.
pub fn load_decoder(path: &Path) -> Result<Option<LabelEncoder>, TacticaError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    let decoder: LabelEncoder = serde_json::from_str(&content).map_err(|e| load_error(path, e))?;
    decoder.validate().map_err(|e| load_error(path, e))?;
    Ok(Some(decoder))
}

fn read_optional(path: &Path) -> Result<Option<String>, TacticaError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(load_error(path, e)),
    }
}

fn load_error(path: &Path, reason: impl fmt::Display) -> TacticaError {
    TacticaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
