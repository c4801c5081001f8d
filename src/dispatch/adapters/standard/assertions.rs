//! Predicates of the standard `assert` vocabulary.
//!
//! Apart from `NotNull` and `NotBlank`, every assertion accepts `null`;
//! combine with `assert::NotNull` to require a value.

use super::messages;
use crate::dispatch::domain::Constraint;
use regex::Regex;
use serde_json::{Map, Value, json};
use std::cmp::Ordering;

const NULL_TOLERANT: [&str; 7] = [
    "Type",
    "EqualTo",
    "NotEqualTo",
    "Regex",
    "Choice",
    "Length",
    "Range",
];

/// Result of evaluating one assertion.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Outcome {
    Valid,
    Invalid {
        template: &'static str,
        context: Map<String, Value>,
    },
    Misconfigured(String),
}

impl Outcome {
    fn invalid(template: &'static str) -> Self {
        Self::Invalid {
            template,
            context: Map::new(),
        }
    }

    fn invalid_with(template: &'static str, context: Value) -> Self {
        let Value::Object(map) = context else {
            return Self::invalid(template);
        };
        Self::Invalid {
            template,
            context: map,
        }
    }

    fn from_check(valid: bool, template: &'static str, context: Value) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::invalid_with(template, context)
        }
    }
}

/// Evaluates a standard assertion by name. Returns `None` for names outside
/// the vocabulary.
pub(super) fn evaluate(name: &str, value: &Value, constraint: &Constraint) -> Option<Outcome> {
    let evaluated = match name {
        "NotNull" => Ok(Outcome::from_check(
            !value.is_null(),
            messages::NOT_NULL,
            json!({}),
        )),
        "NotBlank" => Ok(not_blank(value, constraint)),
        known if value.is_null() && NULL_TOLERANT.contains(&known) => Ok(Outcome::Valid),
        "Type" => type_of(value, constraint),
        "EqualTo" => comparison(value, constraint, true),
        "NotEqualTo" => comparison(value, constraint, false),
        "Regex" => regex(value, constraint),
        "Choice" => choice(value, constraint),
        "Length" => length(value, constraint),
        "Range" => range(value, constraint),
        _ => return None,
    };
    Some(evaluated.unwrap_or_else(Outcome::Misconfigured))
}

/// Checks the options of a standard assertion without evaluating it.
/// Returns `None` for names outside the vocabulary.
pub(super) fn verify(name: &str, constraint: &Constraint) -> Option<Result<(), String>> {
    let verified = match name {
        "NotNull" | "NotBlank" => Ok(()),
        "Type" => type_kinds(constraint).map(drop),
        "EqualTo" | "NotEqualTo" => compared_value(constraint).map(drop),
        "Regex" => pattern(constraint).map(drop),
        "Choice" => choices(constraint).map(drop),
        "Length" => length_limits(constraint).map(drop),
        "Range" => range_limits(constraint).map(drop),
        _ => return None,
    };
    Some(verified)
}

fn not_blank(value: &Value, constraint: &Constraint) -> Outcome {
    let allow_null = constraint
        .option("allow_null")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let blank = match value {
        Value::Null => !allow_null,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Number(_) => false,
    };
    Outcome::from_check(!blank, messages::NOT_BLANK, json!({}))
}

fn type_kinds(constraint: &Constraint) -> Result<Vec<&str>, String> {
    let kinds: Vec<&str> = match constraint.option("type") {
        Some(Value::String(kind)) => vec![kind.as_str()],
        Some(Value::Array(kinds)) => kinds.iter().filter_map(Value::as_str).collect(),
        _ => return Err("option 'type' must be a string or list of strings".to_owned()),
    };
    if kinds.is_empty() {
        return Err("option 'type' lists no types".to_owned());
    }
    if let Some(unknown) = kinds
        .iter()
        .find(|kind| matches_type(kind, &Value::Null).is_none())
    {
        return Err(format!("unknown type '{unknown}'"));
    }
    Ok(kinds)
}

fn type_of(value: &Value, constraint: &Constraint) -> Result<Outcome, String> {
    let kinds = type_kinds(constraint)?;
    let matched = kinds
        .iter()
        .any(|kind| matches_type(kind, value).unwrap_or(false));
    Ok(Outcome::from_check(
        matched,
        messages::TYPE,
        json!({ "type": kinds.join("|") }),
    ))
}

fn matches_type(kind: &str, value: &Value) -> Option<bool> {
    let matched = match kind {
        "integer" | "int" => value.is_i64() || value.is_u64(),
        "float" | "double" => value.is_f64(),
        "number" => value.is_number(),
        "numeric" => value.is_number() || value.as_str().is_some_and(is_numeric),
        "string" => value.is_string(),
        "bool" | "boolean" => value.is_boolean(),
        "array" | "list" => value.is_array(),
        "object" | "map" => value.is_object(),
        "null" => value.is_null(),
        "scalar" => value.is_number() || value.is_string() || value.is_boolean(),
        "alnum" => all_chars(value, char::is_ascii_alphanumeric),
        "alpha" => all_chars(value, char::is_ascii_alphabetic),
        "digit" => all_chars(value, char::is_ascii_digit),
        "xdigit" => all_chars(value, char::is_ascii_hexdigit),
        "lower" => all_chars(value, char::is_ascii_lowercase),
        "upper" => all_chars(value, char::is_ascii_uppercase),
        "space" => all_chars(value, char::is_ascii_whitespace),
        "punct" => all_chars(value, char::is_ascii_punctuation),
        _ => return None,
    };
    Some(matched)
}

fn all_chars(value: &Value, predicate: fn(&char) -> bool) -> bool {
    value
        .as_str()
        .is_some_and(|text| !text.is_empty() && text.chars().all(|c| predicate(&c)))
}

fn is_numeric(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn compared_value(constraint: &Constraint) -> Result<&Value, String> {
    constraint
        .option("value")
        .ok_or_else(|| "option 'value' is required".to_owned())
}

fn comparison(
    value: &Value,
    constraint: &Constraint,
    expect_equal: bool,
) -> Result<Outcome, String> {
    let compared = compared_value(constraint)?;
    let equal = loosely_equal(value, compared);
    let template = if expect_equal {
        messages::EQUAL_TO
    } else {
        messages::NOT_EQUAL_TO
    };
    Ok(Outcome::from_check(
        equal == expect_equal,
        template,
        json!({ "compared_value": compared }),
    ))
}

/// Equality that treats numeric strings and numbers as comparable, so
/// `"0"` equals `0`.
fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(l), Some(r)) => l.partial_cmp(&r) == Some(Ordering::Equal),
        _ => left == right,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) if is_numeric(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn pattern(constraint: &Constraint) -> Result<Regex, String> {
    let source = constraint
        .option("pattern")
        .and_then(Value::as_str)
        .ok_or_else(|| "option 'pattern' must be a string".to_owned())?;
    Regex::new(source).map_err(|error| format!("invalid pattern: {error}"))
}

fn regex(value: &Value, constraint: &Constraint) -> Result<Outcome, String> {
    let compiled = pattern(constraint)?;
    let expect_match = constraint
        .option("match")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let valid = as_text(value).is_some_and(|text| compiled.is_match(&text) == expect_match);
    Ok(Outcome::from_check(
        valid,
        messages::REGEX,
        json!({ "pattern": compiled.as_str() }),
    ))
}

fn choices(constraint: &Constraint) -> Result<&Vec<Value>, String> {
    constraint
        .option("choices")
        .and_then(Value::as_array)
        .ok_or_else(|| "option 'choices' must be a list".to_owned())
}

fn choice(value: &Value, constraint: &Constraint) -> Result<Outcome, String> {
    let allowed = choices(constraint)?;
    let multiple = constraint
        .option("multiple")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if multiple {
        let valid = value
            .as_array()
            .is_some_and(|selected| selected.iter().all(|item| allowed.contains(item)));
        return Ok(Outcome::from_check(
            valid,
            messages::CHOICE_MULTIPLE,
            json!({}),
        ));
    }

    Ok(Outcome::from_check(
        allowed.contains(value),
        messages::CHOICE,
        json!({ "choices": allowed }),
    ))
}

fn length_limits(constraint: &Constraint) -> Result<(Option<u64>, Option<u64>), String> {
    let min = constraint.option("min").and_then(Value::as_u64);
    let max = constraint.option("max").and_then(Value::as_u64);
    if min.is_none() && max.is_none() {
        return Err("option 'min' or 'max' is required".to_owned());
    }
    Ok((min, max))
}

fn length(value: &Value, constraint: &Constraint) -> Result<Outcome, String> {
    let (min, max) = length_limits(constraint)?;
    let Some(text) = as_text(value) else {
        return Ok(Outcome::invalid(messages::NOT_TEXT));
    };

    let count = u64::try_from(text.chars().count()).unwrap_or(u64::MAX);
    if let Some(limit) = min.filter(|limit| count < *limit) {
        return Ok(Outcome::invalid_with(
            messages::TOO_SHORT,
            json!({ "limit": limit }),
        ));
    }
    if let Some(limit) = max.filter(|limit| count > *limit) {
        return Ok(Outcome::invalid_with(
            messages::TOO_LONG,
            json!({ "limit": limit }),
        ));
    }
    Ok(Outcome::Valid)
}

fn range_limits(constraint: &Constraint) -> Result<(Option<f64>, Option<f64>), String> {
    let min = constraint.option("min").and_then(Value::as_f64);
    let max = constraint.option("max").and_then(Value::as_f64);
    if min.is_none() && max.is_none() {
        return Err("option 'min' or 'max' is required".to_owned());
    }
    Ok((min, max))
}

fn range(value: &Value, constraint: &Constraint) -> Result<Outcome, String> {
    let (min, max) = range_limits(constraint)?;
    let Some(number) = as_number(value) else {
        return Ok(Outcome::invalid(messages::NOT_NUMBER));
    };

    let below = min.is_some_and(|limit| number < limit);
    let above = max.is_some_and(|limit| number > limit);
    // Messages quote the limits as declared, so `0` is not rendered as `0.0`.
    let low = constraint.option("min");
    let high = constraint.option("max");
    let outcome = match (min.is_some(), max.is_some()) {
        (true, true) => Outcome::from_check(
            !below && !above,
            messages::RANGE_BETWEEN,
            json!({ "min": low, "max": high }),
        ),
        (true, false) => {
            Outcome::from_check(!below, messages::RANGE_MIN, json!({ "limit": low }))
        }
        _ => Outcome::from_check(!above, messages::RANGE_MAX, json!({ "limit": high })),
    };
    Ok(outcome)
}
