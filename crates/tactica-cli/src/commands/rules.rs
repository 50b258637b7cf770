use tactica_core::error::TacticaError;
use tactica_core::recommend::engine::DEFAULT_FORMATION;
use tactica_core::recommend::outcome::KeyInstruction;
use tactica_core::recommend::{archetype, directives};
use tactica_core::rules;

pub fn list() -> Result<(), TacticaError> {
    println!("Formation rules, checked in order (first match wins):\n");
    for (i, rule) in rules::ladder().iter().enumerate() {
        println!("  {}. {:<22} when {}", i + 1, rule.id.as_str(), rule.condition);
        println!("     {:<22} -> {}", "", rule.outcomes);
        println!();
    }
    println!("If no rule applies, the classifier fallback decides when its model,");
    println!("encoders and decoder are all loaded. Otherwise, or if the classifier");
    println!("fails, the recommendation is {DEFAULT_FORMATION}.\n");
    Ok(())
}

pub fn explain() -> Result<(), TacticaError> {
    println!("Tactics are derived from the opponent statistics alone, whichever");
    println!("path chose the formation.\n");

    println!("Attacking style (first match wins):");
    println!(
        "  {:<20} opponent possession > {}%",
        "Counter Attack",
        directives::COUNTER_ATTACK_POSSESSION
    );
    println!(
        "  {:<20} opponent possession < {}%",
        "Possession Control",
        directives::POSSESSION_CONTROL_POSSESSION
    );
    println!("  {:<20} opponent formation contains 4-4-2 or 4-3-1-2", "Wing Play");
    println!("  {:<20} otherwise\n", "Balanced");

    println!("Defensive style (first match wins):");
    println!(
        "  {:<20} opponent shots on target > {}",
        "Low Block",
        directives::LOW_BLOCK_SHOTS
    );
    println!("  {:<20} opponent presses high", "High Press");
    println!("  {:<20} otherwise\n", "Mid Block");

    println!("Tempo:");
    println!(
        "  {:<20} opponent pass accuracy > {}%",
        "Slow & Patient",
        directives::PATIENT_PASS_ACCURACY
    );
    println!("  {:<20} attacking style is Counter Attack", "Fast / Direct");
    println!("  {:<20} otherwise\n", "Standard");

    println!("Key instruction (first match wins):");
    println!("  {:<20} {}", "wing play attack", KeyInstruction::OverloadFlanks);
    println!("  {:<20} {}", "low block defence", KeyInstruction::StayCompact);
    println!("  {:<20} {}", "high press", KeyInstruction::BypassMidfield);
    println!("  {:<20} {}\n", "otherwise", KeyInstruction::MaintainDiscipline);

    println!("Key player:");
    println!(
        "  {:<20} opponent possession > {}%",
        "messi",
        archetype::ORCHESTRATOR_POSSESSION
    );
    println!(
        "  {:<20} opponent presses high or possession < {}%",
        "ronaldo",
        archetype::FINISHER_POSSESSION
    );
    println!("  {:<20} otherwise\n", "neymar");

    Ok(())
}
