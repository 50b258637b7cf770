use crate::boundary;
use crate::MatchArgs;
use std::path::Path;
use tactica_core::artifacts::{load_classifier, load_decoder, load_encoders, ArtifactPaths};
use tactica_core::classifier::encoder::LabelEncoder;
use tactica_core::classifier::{encode_features, Classifier};
use tactica_core::error::TacticaError;
use tactica_core::model::Field;
use tactica_core::parsing::normalize;
use tactica_core::recommend::engine::DEFAULT_FORMATION;

pub fn check(paths: &ArtifactPaths) -> Result<(), TacticaError> {
    let mut failures = 0;

    let forest = report("model", &paths.model, load_classifier(&paths.model), &mut failures, |f| {
        format!(
            "decision forest, {} trees, {} features, {} classes",
            f.trees.len(),
            f.n_features,
            f.n_classes
        )
    });
    let encoders = report(
        "encoders",
        &paths.encoders,
        load_encoders(&paths.encoders),
        &mut failures,
        |e| format!("fields: {}", e.fields().collect::<Vec<_>>().join(", ")),
    );
    let decoder = report("decoder", &paths.decoder, load_decoder(&paths.decoder), &mut failures, |d| {
        format!("{} labels: {}", d.classes().len(), d.classes().join(", "))
    });

    let mut warnings = Vec::new();
    if let Some(ref forest) = forest {
        if forest.n_features != Field::ALL.len() {
            warnings.push(format!(
                "model expects {} features but inputs have {}",
                forest.n_features,
                Field::ALL.len()
            ));
        }
        if let Some(ref decoder) = decoder {
            if forest.n_classes != decoder.classes().len() {
                warnings.push(format!(
                    "model has {} classes but the decoder has {} labels",
                    forest.n_classes,
                    decoder.classes().len()
                ));
            }
        }
    }
    if let Some(ref encoders) = encoders {
        for field in Field::ALL.into_iter().filter(|f| f.is_categorical()) {
            if encoders.get(field).is_none() {
                warnings.push(format!("no encoder for categorical field '{}'", field));
            }
        }
    }
    if forest.is_none() || encoders.is_none() || decoder.is_none() {
        warnings.push(format!(
            "classifier fallback unavailable; unmatched inputs get {}",
            DEFAULT_FORMATION
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    if failures > 0 {
        return Err(TacticaError::ArtifactInvalid(format!(
            "{} artifact(s) failed to load",
            failures
        )));
    }
    Ok(())
}

fn report<T>(
    what: &str,
    path: &Path,
    loaded: Result<Option<T>, TacticaError>,
    failures: &mut usize,
    describe: impl Fn(&T) -> String,
) -> Option<T> {
    match loaded {
        Ok(Some(value)) => {
            println!("  {:<9} ok        {}", what, path.display());
            println!("  {:<9}           {}", "", describe(&value));
            Some(value)
        }
        Ok(None) => {
            println!("  {:<9} missing   {}", what, path.display());
            None
        }
        Err(e) => {
            println!("  {:<9} INVALID   {}", what, e);
            *failures += 1;
            None
        }
    }
}

/// Walk one input through encoding, inference and decoding, printing each
/// step.
pub fn probe(request: &MatchArgs, paths: &ArtifactPaths) -> Result<(), TacticaError> {
    let raw = boundary::build_request(request)?;
    let ctx = normalize(&raw)?;

    println!("Input:");
    println!("  {:<20} {}", Field::OpponentFormation.as_str(), ctx.formation());
    println!("  {:<20} {}", Field::OpponentPossession.as_str(), ctx.possession());
    println!("  {:<20} {}", Field::PassAccuracy.as_str(), ctx.pass_accuracy());
    println!("  {:<20} {}", Field::ShotsOnTarget.as_str(), ctx.shots_on_target());
    println!("  {:<20} {}", Field::PressingStyle.as_str(), ctx.pressing_style());
    println!();

    let encoders = load_encoders(&paths.encoders)?.ok_or_else(|| not_found(&paths.encoders))?;
    for field in Field::ALL.into_iter().filter(|f| f.is_categorical()) {
        match encoders.get(field) {
            Some(e) => println!("Encoder '{}' classes: {}", field, e.classes().join(", ")),
            None => println!("Encoder '{}' missing", field),
        }
    }
    println!();

    println!("Encoding:");
    let features = match encode_features(&ctx, &encoders) {
        Ok(features) => features,
        Err(e) => {
            println!("  FAILED: {}", e);
            println!("\nThe classifier would fail; the recommendation falls back to {DEFAULT_FORMATION}.");
            return Ok(());
        }
    };
    for f in &features {
        println!("  {:<20} {:<10} -> {}", f.field.as_str(), f.raw, f.value);
    }
    let row: Vec<f64> = features.iter().map(|f| f.value).collect();
    println!("\nFeature vector: {:?}\n", row);

    let Some(forest) = load_classifier(&paths.model)? else {
        println!("No model at {}; nothing to predict.", paths.model.display());
        return Ok(());
    };
    let decoder = load_decoder(&paths.decoder)?;

    match forest.predict_proba(&row) {
        Ok(proba) => {
            println!("Class probabilities:");
            for (i, p) in proba.iter().enumerate() {
                println!("  {:>2} {:<10} {:.3}", i, label(decoder.as_ref(), i), p);
            }
            println!();
        }
        Err(e) => {
            println!("Inference FAILED: {}", e);
            return Ok(());
        }
    }

    let index = forest
        .predict(&row)
        .map_err(|e| TacticaError::ArtifactInvalid(e.to_string()))?;
    println!("Predicted class {} -> {}", index, label(decoder.as_ref(), index));
    Ok(())
}

fn label(decoder: Option<&LabelEncoder>, index: usize) -> &str {
    match decoder {
        Some(d) => d.inverse_transform(index).unwrap_or("<undecodable>"),
        None => "<no decoder>",
    }
}

fn not_found(path: &Path) -> TacticaError {
    TacticaError::ArtifactLoad {
        path: path.to_path_buf(),
        reason: "file not found".to_string(),
    }
}
