use serde::Serialize;
use tactica_core::error::TacticaError;

pub fn print<T: Serialize>(body: &T) -> Result<(), TacticaError> {
    let json = serde_json::to_string_pretty(body)?;
    println!("{json}");
    Ok(())
}
