use crate::model::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TacticaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("failed to load artifact from {path}: {reason}")]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("invalid artifact: {0}")]
    ArtifactInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single input field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    NotNumeric { value: String },
    OutOfRange { value: i64, min: i64, max: Option<i64> },
    InvalidValue { value: String, expected: String },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => write!(f, "missing"),
            FieldProblem::NotNumeric { value } => write!(f, "'{value}' is not a whole number"),
            FieldProblem::OutOfRange {
                value,
                min,
                max: Some(max),
            } => write!(f, "{value} is outside {min}..={max}"),
            FieldProblem::OutOfRange {
                value,
                min,
                max: None,
            } => write!(f, "{value} is below the minimum {min}"),
            FieldProblem::InvalidValue { value, expected } => {
                write!(f, "invalid value '{value}' (expected {expected})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: Field,
    pub problem: FieldProblem,
}

/// Every field that failed normalization, in feature order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("invalid match input: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// The offending fields, in the order they were reported.
    pub fn fields(&self) -> Vec<Field> {
        self.issues.iter().map(|i| i.field).collect()
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.problem))
        .collect::<Vec<_>>()
        .join("; ")
}
