//! Violation message templates.
//!
//! Templates use `minijinja` syntax. A constraint's `message` option
//! replaces the default template and sees the same context.

use minijinja::Environment;
use serde_json::{Map, Value};

pub(super) const TYPE: &str = "This value should be of type {{ type }}.";
pub(super) const EQUAL_TO: &str = "This value should be equal to {{ compared_value }}.";
pub(super) const NOT_EQUAL_TO: &str = "This value should not be equal to {{ compared_value }}.";
pub(super) const REGEX: &str = "This value is not valid.";
pub(super) const CHOICE: &str = "The value you selected is not a valid choice.";
pub(super) const CHOICE_MULTIPLE: &str = "One or more of the given values is invalid.";
pub(super) const NOT_BLANK: &str = "This value should not be blank.";
pub(super) const NOT_NULL: &str = "This value should not be null.";
pub(super) const NOT_TEXT: &str = "This value should be a string.";
pub(super) const NOT_NUMBER: &str = "This value should be a valid number.";
pub(super) const TOO_SHORT: &str =
    "This value is too short. It should have {{ limit }} characters or more.";
pub(super) const TOO_LONG: &str =
    "This value is too long. It should have {{ limit }} characters or less.";
pub(super) const RANGE_BETWEEN: &str = "This value should be between {{ min }} and {{ max }}.";
pub(super) const RANGE_MIN: &str = "This value should be {{ limit }} or more.";
pub(super) const RANGE_MAX: &str = "This value should be {{ limit }} or less.";
pub(super) const NOT_LIST: &str = "This value should be a list.";
pub(super) const ELEMENT: &str = "Element {{ index }}: {{ message }}";
pub(super) const PREDICATE_FAILED: &str = "This value is not valid.";
pub(super) const UNSUPPORTED: &str = "No checker is registered for constraint {{ constraint }}.";
pub(super) const MISCONFIGURED: &str = "Constraint {{ constraint }} is misconfigured: {{ reason }}.";

/// Renders `template` with `context`, falling back to the raw template when
/// it does not render.
pub(super) fn render(
    environment: &Environment<'_>,
    template: &str,
    context: &Map<String, Value>,
) -> String {
    environment
        .render_str(template, context)
        .unwrap_or_else(|_| template.to_owned())
}
