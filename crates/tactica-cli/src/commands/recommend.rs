use crate::boundary::{self, RecommendationResponse};
use crate::output;
use crate::{ArtifactArgs, MatchArgs};
use tactica_core::artifacts::{load_artifacts, Artifacts};
use tactica_core::error::TacticaError;

pub struct Options<'a> {
    pub rules_only: bool,
    pub asset_base: &'a str,
    pub output: &'a str,
    pub trace: bool,
}

pub fn run(
    request: &MatchArgs,
    artifact_args: &ArtifactArgs,
    options: &Options<'_>,
) -> Result<(), TacticaError> {
    let raw = boundary::build_request(request)?;

    let artifacts = if options.rules_only {
        log::info!("rules-only mode, skipping artifact loading");
        Artifacts::rules_only()
    } else {
        load_artifacts(&artifact_args.paths())
    };

    let rec = tactica_core::predict(&raw, &artifacts)?;
    log::info!(
        "recommended {} via {}",
        rec.result.recommended_formation,
        rec.resolution
    );

    let response = RecommendationResponse::new(&rec, options.asset_base, options.trace);
    match options.output {
        "json" => output::json::print(&response)?,
        _ => output::table::print(&response),
    }

    Ok(())
}
