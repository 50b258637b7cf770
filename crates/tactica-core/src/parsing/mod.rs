pub mod values;

use crate::error::{FieldIssue, FieldProblem, ValidationError};
use crate::model::{Field, MatchContext, PressingStyle, RawMatchInput};
use values::{coerce_integer, coerce_text};

const PERCENT_RANGE: (i64, Option<i64>) = (0, Some(100));
const COUNT_RANGE: (i64, Option<i64>) = (0, Some(u32::MAX as i64));

/// Validate raw request fields and build a [`MatchContext`].
///
/// Every field is checked before returning, so a single error reports all
/// missing or malformed fields at once.
pub fn normalize(raw: &RawMatchInput) -> Result<MatchContext, ValidationError> {
    let mut issues = Vec::new();

    let formation = text_field(raw, Field::OpponentFormation, &mut issues);
    let possession = integer_field(raw, Field::OpponentPossession, PERCENT_RANGE, &mut issues);
    let pass_accuracy = integer_field(raw, Field::PassAccuracy, PERCENT_RANGE, &mut issues);
    let shots = integer_field(raw, Field::ShotsOnTarget, COUNT_RANGE, &mut issues);
    let pressing = pressing_field(raw, &mut issues);

    match (formation, possession, pass_accuracy, shots, pressing) {
        (Some(formation), Some(possession), Some(pass_accuracy), Some(shots), Some(pressing))
            if issues.is_empty() =>
        {
            Ok(MatchContext::from_parts(
                formation,
                possession,
                pass_accuracy,
                shots,
                pressing,
            ))
        }
        _ => Err(ValidationError { issues }),
    }
}

fn text_field(raw: &RawMatchInput, field: Field, issues: &mut Vec<FieldIssue>) -> Option<String> {
    let Some(value) = raw.get(field) else {
        issues.push(missing(field));
        return None;
    };
    match coerce_text(value) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            issues.push(missing(field));
            None
        }
        Err(problem) => {
            issues.push(FieldIssue { field, problem });
            None
        }
    }
}

fn integer_field(
    raw: &RawMatchInput,
    field: Field,
    (min, max): (i64, Option<i64>),
    issues: &mut Vec<FieldIssue>,
) -> Option<u32> {
    let Some(value) = raw.get(field) else {
        issues.push(missing(field));
        return None;
    };
    let n = match coerce_integer(value) {
        Ok(Some(n)) => n,
        Ok(None) => {
            issues.push(missing(field));
            return None;
        }
        Err(problem) => {
            issues.push(FieldIssue { field, problem });
            return None;
        }
    };

    let in_range = n >= min && max.map_or(true, |max| n <= max);
    match u32::try_from(n) {
        Ok(v) if in_range => Some(v),
        _ => {
            issues.push(FieldIssue {
                field,
                problem: FieldProblem::OutOfRange { value: n, min, max },
            });
            None
        }
    }
}

fn pressing_field(raw: &RawMatchInput, issues: &mut Vec<FieldIssue>) -> Option<PressingStyle> {
    let text = text_field(raw, Field::PressingStyle, issues)?;
    match PressingStyle::from_str_loose(&text) {
        Some(style) => Some(style),
        None => {
            issues.push(FieldIssue {
                field: Field::PressingStyle,
                problem: FieldProblem::InvalidValue {
                    value: text,
                    expected: "Low, Medium or High".into(),
                },
            });
            None
        }
    }
}

fn missing(field: Field) -> FieldIssue {
    FieldIssue {
        field,
        problem: FieldProblem::Missing,
    }
}
