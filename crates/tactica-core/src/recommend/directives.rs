//! Match instructions derived from the raw context.
//!
//! These ignore the chosen formation entirely. Their possession thresholds
//! (60/40) are independent of the rule ladder's 65.

use crate::model::MatchContext;
use crate::recommend::outcome::{AttackingStyle, DefensiveStyle, KeyInstruction, Tactics, Tempo};

pub const COUNTER_ATTACK_POSSESSION: u32 = 60;
pub const POSSESSION_CONTROL_POSSESSION: u32 = 40;
pub const LOW_BLOCK_SHOTS: u32 = 8;
pub const PATIENT_PASS_ACCURACY: u32 = 88;

/// Substrings of the opponent formation that invite wing play.
const NARROW_SHAPES: &[&str] = &["4-4-2", "4-3-1-2"];

pub fn generate(ctx: &MatchContext) -> Tactics {
    let attacking_style = attacking_style(ctx);
    let defensive_style = defensive_style(ctx);
    Tactics {
        attacking_style,
        defensive_style,
        tempo: tempo(ctx, attacking_style),
        key_instruction: key_instruction(ctx, attacking_style, defensive_style),
    }
}

pub fn attacking_style(ctx: &MatchContext) -> AttackingStyle {
    if ctx.possession() > COUNTER_ATTACK_POSSESSION {
        AttackingStyle::CounterAttack
    } else if ctx.possession() < POSSESSION_CONTROL_POSSESSION {
        AttackingStyle::PossessionControl
    } else if NARROW_SHAPES.iter().any(|s| ctx.formation().contains(s)) {
        AttackingStyle::WingPlay
    } else {
        AttackingStyle::Balanced
    }
}

pub fn defensive_style(ctx: &MatchContext) -> DefensiveStyle {
    if ctx.shots_on_target() > LOW_BLOCK_SHOTS {
        DefensiveStyle::LowBlock
    } else if ctx.is_high_press() {
        DefensiveStyle::HighPress
    } else {
        DefensiveStyle::MidBlock
    }
}

pub fn tempo(ctx: &MatchContext, attacking: AttackingStyle) -> Tempo {
    if ctx.pass_accuracy() > PATIENT_PASS_ACCURACY {
        Tempo::SlowAndPatient
    } else if attacking == AttackingStyle::CounterAttack {
        Tempo::FastDirect
    } else {
        Tempo::Standard
    }
}

pub fn key_instruction(
    ctx: &MatchContext,
    attacking: AttackingStyle,
    defensive: DefensiveStyle,
) -> KeyInstruction {
    if attacking == AttackingStyle::WingPlay {
        KeyInstruction::OverloadFlanks
    } else if defensive == DefensiveStyle::LowBlock {
        KeyInstruction::StayCompact
    } else if ctx.is_high_press() {
        KeyInstruction::BypassMidfield
    } else {
        KeyInstruction::MaintainDiscipline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(formation: &str, possession: i64, pass: i64, shots: i64, pressing: &str) -> MatchContext {
        MatchContext::try_new(formation, possession, pass, shots, pressing).unwrap()
    }

    #[test]
    fn test_attacking_ladder() {
        assert_eq!(attacking_style(&ctx("4-4-2", 61, 80, 5, "Low")), AttackingStyle::CounterAttack);
        assert_eq!(attacking_style(&ctx("4-4-2", 60, 80, 5, "Low")), AttackingStyle::WingPlay);
        assert_eq!(attacking_style(&ctx("4-4-2", 39, 80, 5, "Low")), AttackingStyle::PossessionControl);
        assert_eq!(attacking_style(&ctx("4-3-3", 50, 80, 5, "Low")), AttackingStyle::Balanced);
    }

    #[test]
    fn test_wing_play_is_substring_match() {
        assert_eq!(attacking_style(&ctx("4-3-1-2", 50, 80, 5, "Low")), AttackingStyle::WingPlay);
        assert_eq!(
            attacking_style(&ctx("4-4-2 diamond", 50, 80, 5, "Low")),
            AttackingStyle::WingPlay
        );
    }

    #[test]
    fn test_wing_play_only_after_possession_checks() {
        assert_eq!(attacking_style(&ctx("4-4-2", 70, 80, 5, "Low")), AttackingStyle::CounterAttack);
        assert_eq!(attacking_style(&ctx("4-4-2", 30, 80, 5, "Low")), AttackingStyle::PossessionControl);
    }

    #[test]
    fn test_defensive_ladder() {
        assert_eq!(defensive_style(&ctx("4-3-3", 50, 80, 9, "High")), DefensiveStyle::LowBlock);
        assert_eq!(defensive_style(&ctx("4-3-3", 50, 80, 8, "High")), DefensiveStyle::HighPress);
        assert_eq!(defensive_style(&ctx("4-3-3", 50, 80, 8, "Medium")), DefensiveStyle::MidBlock);
    }

    #[test]
    fn test_tempo_pass_accuracy_overrides_counter() {
        let c = ctx("4-3-3", 70, 89, 5, "Low");
        assert_eq!(tempo(&c, attacking_style(&c)), Tempo::SlowAndPatient);
        let c = ctx("4-3-3", 70, 88, 5, "Low");
        assert_eq!(tempo(&c, attacking_style(&c)), Tempo::FastDirect);
        let c = ctx("4-3-3", 50, 88, 5, "Low");
        assert_eq!(tempo(&c, attacking_style(&c)), Tempo::Standard);
    }

    #[test]
    fn test_key_instruction_ladder() {
        assert_eq!(
            generate(&ctx("4-4-2", 50, 80, 12, "High")).key_instruction,
            KeyInstruction::OverloadFlanks
        );
        assert_eq!(
            generate(&ctx("4-3-3", 50, 80, 12, "High")).key_instruction,
            KeyInstruction::StayCompact
        );
        assert_eq!(
            generate(&ctx("4-3-3", 50, 80, 3, "High")).key_instruction,
            KeyInstruction::BypassMidfield
        );
        assert_eq!(
            generate(&ctx("4-3-3", 50, 80, 3, "Low")).key_instruction,
            KeyInstruction::MaintainDiscipline
        );
    }
}
