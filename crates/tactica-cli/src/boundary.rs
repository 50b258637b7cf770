//! Request and response shapes at the edge of the engine.
//!
//! Maps CLI input onto a `RawMatchInput` and engine output onto HTTP-style
//! bodies: 200 for a recommendation, 400 for bad input, 500 for anything
//! unexpected. The status also decides the process exit code.

use crate::MatchArgs;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tactica_core::error::{FieldIssue, TacticaError};
use tactica_core::model::{Field, RawMatchInput};
use tactica_core::recommend::outcome::Archetype;
use tactica_core::trace::DecisionTrace;
use tactica_core::{Recommendation, RecommendationResult, Resolution};

const INTERNAL_ERROR_MESSAGE: &str = "internal error while generating the recommendation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    InternalError,
}

impl Status {
    pub fn for_error(err: &TacticaError) -> Status {
        match err {
            TacticaError::Validation(_) | TacticaError::MalformedRequest(_) => Status::BadRequest,
            _ => Status::InternalError,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::InternalError => 500,
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::BadRequest => 2,
            Status::InternalError => 1,
        }
    }
}

/// Image URLs for the recommended formation and key player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualAssets {
    pub formation_image: String,
    pub player_image: String,
}

impl VisualAssets {
    pub fn new(asset_base: &str, formation: &str, player: Archetype) -> Self {
        let base = asset_base.trim_end_matches('/');
        Self {
            formation_image: format!("{base}/static/images/formations/{formation}.png"),
            player_image: format!("{base}/static/images/players/{}.png", player.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse<'a> {
    pub status: u16,
    #[serde(flatten)]
    pub result: &'a RecommendationResult,
    pub resolution: &'a Resolution,
    pub visual_assets: VisualAssets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<&'a DecisionTrace>,
}

impl<'a> RecommendationResponse<'a> {
    pub fn new(rec: &'a Recommendation, asset_base: &str, with_trace: bool) -> Self {
        Self {
            status: Status::Ok.code(),
            result: &rec.result,
            resolution: &rec.resolution,
            visual_assets: VisualAssets::new(
                asset_base,
                &rec.result.recommended_formation,
                rec.result.key_player_archetype.name,
            ),
            trace: with_trace.then_some(&rec.trace),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldIssue>,
}

impl ErrorResponse {
    /// Bad input is echoed back in full. Internal failures get a generic
    /// message; the cause only goes to the log.
    pub fn from_error(err: &TacticaError) -> Self {
        let status = Status::for_error(err);
        match (status, err) {
            (Status::BadRequest, TacticaError::Validation(v)) => Self {
                status: status.code(),
                error: v.to_string(),
                fields: v.issues.clone(),
            },
            (Status::BadRequest, other) => Self {
                status: status.code(),
                error: other.to_string(),
                fields: Vec::new(),
            },
            _ => Self {
                status: status.code(),
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                fields: Vec::new(),
            },
        }
    }
}

/// Print a failed request in the requested format and return the exit code.
pub fn report_error(err: &TacticaError, output_format: &str) -> i32 {
    let status = Status::for_error(err);
    if status == Status::InternalError {
        log::error!("recommendation failed: {err}");
    }
    let body = ErrorResponse::from_error(err);

    let printed_json = output_format == "json"
        && match serde_json::to_string_pretty(&body) {
            Ok(json) => {
                println!("{json}");
                true
            }
            Err(e) => {
                log::error!("could not serialize error body: {e}");
                false
            }
        };
    if !printed_json {
        eprintln!("Error: {}", body.error);
        for issue in &body.fields {
            eprintln!("  {}: {}", issue.field, issue.problem);
        }
    }
    status.exit_code()
}

/// Merge every request source into one raw input. Later sources win.
pub fn build_request(args: &MatchArgs) -> Result<RawMatchInput, TacticaError> {
    let mut raw = match &args.input {
        Some(path) => read_body(path)?,
        None => RawMatchInput::new(),
    };
    raw.merge(RawMatchInput::from_pairs(args.fields.iter().cloned()));

    let flags = [
        (Field::OpponentFormation, &args.formation),
        (Field::OpponentPossession, &args.possession),
        (Field::PassAccuracy, &args.pass_accuracy),
        (Field::ShotsOnTarget, &args.shots),
        (Field::PressingStyle, &args.pressing),
    ];
    raw.merge(RawMatchInput::from_pairs(flags.into_iter().filter_map(
        |(field, value)| value.as_deref().map(|v| (field.as_str(), v)),
    )));

    log::debug!("request: {}", serde_json::to_string(&raw)?);
    Ok(raw)
}

/// An unreadable body is the caller's fault, so it is a bad request.
fn read_body(path: &Path) -> Result<RawMatchInput, TacticaError> {
    let read = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    let body = read.map_err(|e| {
        TacticaError::MalformedRequest(format!("cannot read body from {}: {e}", path.display()))
    })?;
    RawMatchInput::from_json_str(&body)
        .map_err(|e| TacticaError::MalformedRequest(format!("body is not a JSON object: {e}")))
}

/// Parse `KEY=VALUE` for `--field`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactica_core::artifacts::Artifacts;
    use tactica_core::error::FieldProblem;

    fn args() -> MatchArgs {
        MatchArgs {
            input: None,
            fields: Vec::new(),
            formation: None,
            possession: None,
            pass_accuracy: None,
            shots: None,
            pressing: None,
        }
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("pass_accuracy=85").unwrap(),
            ("pass_accuracy".to_string(), "85".to_string())
        );
        assert_eq!(
            parse_key_val("opponent_formation=4-3-3").unwrap().1,
            "4-3-3"
        );
        assert!(parse_key_val("pass_accuracy").is_err());
        assert!(parse_key_val("=85").is_err());
    }

    #[test]
    fn test_asset_urls() {
        let assets = VisualAssets::new("", "5-4-1", Archetype::Messi);
        assert_eq!(assets.formation_image, "/static/images/formations/5-4-1.png");
        assert_eq!(assets.player_image, "/static/images/players/messi.png");

        let assets = VisualAssets::new("https://cdn.example.com/", "4-3-3", Archetype::Neymar);
        assert_eq!(
            assets.formation_image,
            "https://cdn.example.com/static/images/formations/4-3-3.png"
        );
    }

    #[test]
    fn test_flags_override_fields_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(
            &path,
            r#"{"opponent_formation": "4-4-2", "opponent_possession": 50, "shots_on_target": 3}"#,
        )
        .unwrap();

        let mut a = args();
        a.input = Some(path);
        a.fields = vec![
            ("opponent_possession".into(), "55".into()),
            ("pressing_style".into(), "Low".into()),
        ];
        a.possession = Some("70".into());

        let raw = build_request(&a).unwrap();
        assert_eq!(raw.get(Field::OpponentFormation).unwrap(), "4-4-2");
        assert_eq!(raw.get(Field::OpponentPossession).unwrap(), "70");
        assert_eq!(raw.get(Field::ShotsOnTarget).unwrap(), 3);
        assert_eq!(raw.get(Field::PressingStyle).unwrap(), "Low");
    }

    #[test]
    fn test_non_object_body_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let mut a = args();
        a.input = Some(path);
        let err = build_request(&a).unwrap_err();
        assert!(matches!(err, TacticaError::MalformedRequest(_)));
        assert_eq!(Status::for_error(&err), Status::BadRequest);
    }

    #[test]
    fn test_unreadable_body_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args();
        a.input = Some(dir.path().join("missing.json"));
        let err = build_request(&a).unwrap_err();
        assert!(matches!(err, TacticaError::MalformedRequest(_)));
        assert_eq!(Status::for_error(&err), Status::BadRequest);
        assert_eq!(Status::for_error(&err).exit_code(), 2);
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_validation_error_body_lists_fields() {
        let mut a = args();
        a.formation = Some("4-3-3".into());
        a.possession = Some("lots".into());
        let raw = build_request(&a).unwrap();
        let err: TacticaError = tactica_core::predict(&raw, &Artifacts::rules_only())
            .unwrap_err()
            .into();

        let body = ErrorResponse::from_error(&err);
        assert_eq!(body.status, 400);
        assert_eq!(Status::for_error(&err).exit_code(), 2);
        assert_eq!(body.fields.len(), 4);
        assert_eq!(body.fields[0].field, Field::OpponentPossession);
        assert_eq!(
            body.fields[0].problem,
            FieldProblem::NotNumeric {
                value: "lots".into()
            }
        );
    }

    #[test]
    fn test_internal_error_body_hides_cause() {
        let err = TacticaError::ArtifactInvalid("secret path /srv/model.json".into());
        let body = ErrorResponse::from_error(&err);
        assert_eq!(body.status, 500);
        assert_eq!(body.error, INTERNAL_ERROR_MESSAGE);
        assert_eq!(Status::for_error(&err).exit_code(), 1);
    }

    #[test]
    fn test_response_flattens_result() {
        let mut a = args();
        a.formation = Some("4-3-3".into());
        a.possession = Some("70".into());
        a.pass_accuracy = Some("80".into());
        a.shots = Some("5".into());
        a.pressing = Some("Low".into());
        let raw = build_request(&a).unwrap();
        let rec = tactica_core::predict(&raw, &Artifacts::rules_only()).unwrap();

        let json = serde_json::to_value(RecommendationResponse::new(&rec, "", false)).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["recommended_formation"], "5-4-1");
        assert_eq!(json["resolution"]["path"], "rule");
        assert_eq!(json["resolution"]["rule"], "possession_dominance");
        assert_eq!(
            json["visual_assets"]["player_image"],
            "/static/images/players/messi.png"
        );
        assert!(json.get("trace").is_none());

        let json = serde_json::to_value(RecommendationResponse::new(&rec, "", true)).unwrap();
        assert_eq!(json["trace"]["trace_schema_version"], "1.0");
    }
}
