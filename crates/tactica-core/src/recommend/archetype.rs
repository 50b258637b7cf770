use crate::model::MatchContext;
use crate::recommend::outcome::{Archetype, PlayerArchetype};

pub const ORCHESTRATOR_POSSESSION: u32 = 60;
pub const FINISHER_POSSESSION: u32 = 45;

/// Pick the key player profile from possession and pressing alone.
pub fn select(ctx: &MatchContext) -> PlayerArchetype {
    let name = if ctx.possession() > ORCHESTRATOR_POSSESSION {
        Archetype::Messi
    } else if ctx.possession() < FINISHER_POSSESSION || ctx.is_high_press() {
        Archetype::Ronaldo
    } else {
        Archetype::Neymar
    };
    PlayerArchetype::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(formation: &str, possession: i64, pressing: &str) -> Archetype {
        select(&MatchContext::try_new(formation, possession, 80, 5, pressing).unwrap()).name
    }

    #[test]
    fn test_high_possession_orchestrator() {
        assert_eq!(pick("4-3-3", 61, "High"), Archetype::Messi);
        assert_eq!(pick("4-3-3", 60, "Low"), Archetype::Neymar);
    }

    #[test]
    fn test_finisher_on_low_possession_or_press() {
        assert_eq!(pick("4-3-3", 44, "Low"), Archetype::Ronaldo);
        assert_eq!(pick("4-3-3", 55, "High"), Archetype::Ronaldo);
        assert_eq!(pick("4-3-3", 45, "Medium"), Archetype::Neymar);
    }

    #[test]
    fn test_formation_does_not_matter() {
        for formation in ["4-4-2", "5-3-2", "4-1-4-1"] {
            assert_eq!(pick(formation, 50, "Medium"), Archetype::Neymar);
        }
    }

    #[test]
    fn test_description_attached() {
        let p = select(&MatchContext::try_new("4-3-3", 70, 80, 5, "Low").unwrap());
        assert_eq!(
            p.description,
            "Orchestrator needed to control tempo and exploit small spaces."
        );
    }
}
