use crate::boundary::RecommendationResponse;
use tactica_core::trace::DecisionTrace;

pub fn print(response: &RecommendationResponse<'_>) {
    let result = response.result;

    println!("=== Recommendation ===\n");
    println!("  Formation:   {}", result.recommended_formation);
    println!("  Decided by:  {}\n", response.resolution);

    println!("  {}\n", result.tactical_explanation);

    let tactics = &result.tactics;
    println!("  Tactics:");
    println!("    {:<17} {}", "Attacking style", tactics.attacking_style);
    println!("    {:<17} {}", "Defensive style", tactics.defensive_style);
    println!("    {:<17} {}", "Tempo", tactics.tempo);
    println!("    {:<17} {}", "Key instruction", tactics.key_instruction);
    println!();

    let player = &result.key_player_archetype;
    println!("  Key player: {}", player.name.as_str().to_uppercase());
    println!("    {}\n", player.description);

    println!("  Images:");
    println!("    formation  {}", response.visual_assets.formation_image);
    println!("    player     {}", response.visual_assets.player_image);
    println!();

    if let Some(trace) = response.trace {
        print_trace(trace);
    }
}

fn print_trace(trace: &DecisionTrace) {
    println!("  Decision trace (schema {}):", trace.trace_schema_version);
    let width = trace
        .steps
        .iter()
        .map(|s| s.step_type.as_str().len())
        .max()
        .unwrap_or(10);
    for step in &trace.steps {
        println!(
            "    {:<width$}  {}",
            step.step_type.as_str(),
            step.message,
            width = width
        );
    }
    println!();
}
