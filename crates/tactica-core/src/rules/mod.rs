pub mod builtin;
pub mod schema;

use crate::model::MatchContext;
use builtin::LADDER;
use schema::{LadderOutcome, Rule, RuleMatch};

/// The rule ladder in priority order.
pub fn ladder() -> &'static [Rule] {
    &LADDER
}

/// Walk the ladder until the first rule whose condition holds.
pub fn evaluate(ctx: &MatchContext) -> LadderOutcome {
    let mut checked = Vec::with_capacity(LADDER.len());

    for rule in &LADDER {
        checked.push(rule.id);
        if !(rule.applies)(ctx) {
            log::debug!("rule {} did not apply", rule.id);
            continue;
        }

        let verdict = (rule.verdict)(ctx);
        log::debug!("rule {} fired -> {}", rule.id, verdict.formation);
        return LadderOutcome {
            checked,
            matched: Some(RuleMatch {
                rule: rule.id,
                formation: verdict.formation.to_string(),
                fragments: verdict.fragments,
            }),
        };
    }

    log::debug!("no rule applied to formation '{}'", ctx.formation());
    LadderOutcome {
        checked,
        matched: None,
    }
}
