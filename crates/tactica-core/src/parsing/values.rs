use crate::error::FieldProblem;
use serde_json::Value;

/// Coerce a raw value into a whole number.
///
/// Handles:
/// - JSON integers -> as-is
/// - finite JSON floats -> truncated toward zero (70.9 -> 70)
/// - strings like "68", " 68 ", "+68" -> parsed
///
/// Whole numbers beyond `i64` saturate to `i64::MIN`/`i64::MAX`, so the range
/// check reports them as out of range rather than as non-numeric.
///
/// Returns `Ok(None)` when the value counts as absent (null or blank text).
pub fn coerce_integer(value: &Value) -> Result<Option<i64>, FieldProblem> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(i));
            }
            match n.as_f64() {
                // `as` saturates at the i64 bounds.
                Some(f) if f.is_finite() => Ok(Some(f.trunc() as i64)),
                _ => Err(FieldProblem::NotNumeric {
                    value: n.to_string(),
                }),
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<i64>() {
                Ok(n) => Ok(Some(n)),
                Err(_) if is_whole_number(s) => Ok(Some(if s.starts_with('-') {
                    i64::MIN
                } else {
                    i64::MAX
                })),
                Err(_) => Err(FieldProblem::NotNumeric {
                    value: s.to_string(),
                }),
            }
        }
        other => Err(FieldProblem::NotNumeric {
            value: other.to_string(),
        }),
    }
}

fn is_whole_number(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Coerce a raw value into trimmed text.
///
/// Returns `Ok(None)` when the value counts as absent (null or blank text).
pub fn coerce_text(value: &Value) -> Result<Option<String>, FieldProblem> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                Ok(Some(s.to_string()))
            }
        }
        other => Err(FieldProblem::InvalidValue {
            value: other.to_string(),
            expected: "text".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_from_number() {
        assert_eq!(coerce_integer(&json!(68)).unwrap(), Some(68));
    }

    #[test]
    fn test_integer_from_float_truncates() {
        assert_eq!(coerce_integer(&json!(70.9)).unwrap(), Some(70));
        assert_eq!(coerce_integer(&json!(-0.5)).unwrap(), Some(0));
    }

    #[test]
    fn test_integer_from_string() {
        assert_eq!(coerce_integer(&json!("  68  ")).unwrap(), Some(68));
        assert_eq!(coerce_integer(&json!("+12")).unwrap(), Some(12));
    }

    #[test]
    fn test_integer_overflow_saturates() {
        assert_eq!(coerce_integer(&json!(2e19)).unwrap(), Some(i64::MAX));
        assert_eq!(coerce_integer(&json!(-2e19)).unwrap(), Some(i64::MIN));
        assert_eq!(
            coerce_integer(&json!("99999999999999999999")).unwrap(),
            Some(i64::MAX)
        );
        assert_eq!(
            coerce_integer(&json!("-99999999999999999999")).unwrap(),
            Some(i64::MIN)
        );
        assert!(coerce_integer(&json!("9e99")).is_err());
    }

    #[test]
    fn test_integer_blank_is_absent() {
        assert_eq!(coerce_integer(&json!("   ")).unwrap(), None);
        assert_eq!(coerce_integer(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_integer_rejects_junk() {
        assert!(coerce_integer(&json!("abc")).is_err());
        assert!(coerce_integer(&json!("70.5")).is_err());
        assert!(coerce_integer(&json!(true)).is_err());
        assert!(coerce_integer(&json!([70])).is_err());
    }

    #[test]
    fn test_text_trims() {
        assert_eq!(coerce_text(&json!(" 4-3-3 ")).unwrap(), Some("4-3-3".into()));
        assert_eq!(coerce_text(&json!("")).unwrap(), None);
        assert!(coerce_text(&json!(433)).is_err());
    }
}
