use crate::model::MatchContext;
use crate::rules::schema::{Rule, RuleId, Verdict};

/// Opponent possession above this means they dominate the ball.
pub const DOMINANT_POSSESSION: u32 = 65;

/// Under a high press, opponent possession below this calls for direct play.
pub const DIRECT_OUTLET_POSSESSION: u32 = 40;

const WIDE_FRONT_THREE: &[&str] = &["4-3-3", "3-4-3"];
const WING_BACK_SHAPES: &[&str] = &["3-5-2", "5-3-2"];
const FLAT_FOUR_FOUR_TWO: &str = "4-4-2";

/// The rule ladder, highest priority first. Evaluation stops at the first
/// rule whose condition holds; later rules assume earlier ones did not.
pub static LADDER: [Rule; 4] = [
    Rule {
        id: RuleId::PossessionDominance,
        condition: "opponent possession > 65%",
        outcomes: "5-4-1 against 4-3-3/3-4-3, otherwise 4-4-2",
        applies: possession_dominance_applies,
        verdict: possession_dominance,
    },
    Rule {
        id: RuleId::HighPress,
        condition: "opponent presses high",
        outcomes: "4-4-2 when possession < 40%, otherwise 4-3-3",
        applies: high_press_applies,
        verdict: high_press,
    },
    Rule {
        id: RuleId::CentralOverload,
        condition: "opponent plays 3-5-2 or 5-3-2",
        outcomes: "4-3-3",
        applies: central_overload_applies,
        verdict: central_overload,
    },
    Rule {
        id: RuleId::FlatMidfield,
        condition: "opponent plays 4-4-2",
        outcomes: "4-2-3-1",
        applies: flat_midfield_applies,
        verdict: flat_midfield,
    },
];

fn possession_dominance_applies(ctx: &MatchContext) -> bool {
    ctx.possession() > DOMINANT_POSSESSION
}

fn possession_dominance(ctx: &MatchContext) -> Verdict {
    let mut fragments = vec![
        "Opponent dominates possession (>65%). A compact defensive structure is required to absorb pressure and counter-attack into space.".to_string(),
    ];
    let formation = if WIDE_FRONT_THREE.contains(&ctx.formation()) {
        fragments.push("A 5-4-1 formation provides defensive width and prevents overload on the wings against their 3-forward line.".into());
        "5-4-1"
    } else {
        fragments.push("A structured 4-4-2 low block allows for two banks of four to deny space between lines.".into());
        "4-4-2"
    };
    Verdict {
        formation,
        fragments,
    }
}

fn high_press_applies(ctx: &MatchContext) -> bool {
    ctx.is_high_press()
}

fn high_press(ctx: &MatchContext) -> Verdict {
    let mut fragments =
        vec!["Opponent employs a High Press. Risks of turnover in build-up are high.".to_string()];
    let formation = if ctx.possession() < DIRECT_OUTLET_POSSESSION {
        fragments.push("Use a 4-4-2 to provide two direct outlets (strikers) and bypass their midfield press.".into());
        "4-4-2"
    } else {
        fragments.push(
            "A 4-3-3 offers triangles for passing options to play through the high press.".into(),
        );
        "4-3-3"
    };
    Verdict {
        formation,
        fragments,
    }
}

fn central_overload_applies(ctx: &MatchContext) -> bool {
    WING_BACK_SHAPES.contains(&ctx.formation())
}

fn central_overload(ctx: &MatchContext) -> Verdict {
    Verdict {
        formation: "4-3-3",
        fragments: vec![
            format!(
                "Opponent is playing {}, which is strong centrally.",
                ctx.formation()
            ),
            "A 4-3-3 allows us to exploit the spaces behind their wingbacks with our wingers."
                .into(),
        ],
    }
}

fn flat_midfield_applies(ctx: &MatchContext) -> bool {
    ctx.formation() == FLAT_FOUR_FOUR_TWO
}

fn flat_midfield(_ctx: &MatchContext) -> Verdict {
    Verdict {
        formation: "4-2-3-1",
        fragments: vec![
            "Against a flat 4-4-2, a 4-2-3-1 gives us a 3v2 numerical advantage in central midfield.".into(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(formation: &str, possession: i64, pressing: &str) -> MatchContext {
        MatchContext::try_new(formation, possession, 80, 5, pressing).unwrap()
    }

    #[test]
    fn test_ladder_order_is_fixed() {
        let ids: Vec<RuleId> = LADDER.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                RuleId::PossessionDominance,
                RuleId::HighPress,
                RuleId::CentralOverload,
                RuleId::FlatMidfield,
            ]
        );
    }

    #[test]
    fn test_possession_threshold_is_strict() {
        assert!(!possession_dominance_applies(&ctx("4-3-3", 65, "Low")));
        assert!(possession_dominance_applies(&ctx("4-3-3", 66, "Low")));
    }

    #[test]
    fn test_wide_front_three_gets_back_five() {
        for formation in ["4-3-3", "3-4-3"] {
            let v = possession_dominance(&ctx(formation, 70, "Low"));
            assert_eq!(v.formation, "5-4-1");
            assert_eq!(v.fragments.len(), 2);
        }
        assert_eq!(possession_dominance(&ctx("4-2-3-1", 70, "Low")).formation, "4-4-2");
    }

    #[test]
    fn test_high_press_split_at_forty() {
        assert_eq!(high_press(&ctx("4-2-3-1", 39, "High")).formation, "4-4-2");
        assert_eq!(high_press(&ctx("4-2-3-1", 40, "High")).formation, "4-3-3");
    }

    #[test]
    fn test_central_overload_names_formation() {
        let v = central_overload(&ctx("5-3-2", 50, "Medium"));
        assert_eq!(v.formation, "4-3-3");
        assert_eq!(
            v.fragments[0],
            "Opponent is playing 5-3-2, which is strong centrally."
        );
    }

    #[test]
    fn test_flat_midfield_exact_match_only() {
        assert!(flat_midfield_applies(&ctx("4-4-2", 50, "Low")));
        assert!(!flat_midfield_applies(&ctx("4-4-2 diamond", 50, "Low")));
    }
}
