//! Binding of caller-supplied arguments onto formal parameters.

use crate::dispatch::domain::{
    Arguments, BoundArguments, MethodName, MethodSignature, MissingArgumentError,
};

/// Produces the complete positional argument vector for a call.
///
/// Each parameter takes the supplied value (by index for positional
/// arguments, by exact name for named arguments) or else its default.
/// Surplus positional values and unknown names are ignored.
///
/// # Errors
///
/// Returns [`MissingArgumentError`] for the first parameter, in position
/// order, that has neither a supplied value nor a default.
///
/// # Examples
///
/// ```
/// use paramguard::dispatch::domain::{Arguments, MethodName, MethodSignature};
/// use paramguard::dispatch::services::bind;
/// use serde_json::json;
///
/// let method = MethodName::new("string/concat").expect("valid name");
/// let signature = MethodSignature::builder()
///     .required("a")
///     .optional("b", "nothing")
///     .build()
///     .expect("valid signature");
///
/// let bound = bind(&method, &signature, &Arguments::named([("a", "abc")]))
///     .expect("binding succeeds");
/// assert_eq!(bound.as_slice(), &[json!("abc"), json!("nothing")]);
/// ```
pub fn bind(
    method: &MethodName,
    signature: &MethodSignature,
    arguments: &Arguments,
) -> Result<BoundArguments, MissingArgumentError> {
    signature
        .parameters()
        .iter()
        .map(|parameter| {
            arguments
                .supplied(parameter)
                .or(parameter.default.as_ref())
                .cloned()
                .ok_or_else(|| MissingArgumentError {
                    method: method.clone(),
                    parameter: parameter.name.clone(),
                    position: parameter.position,
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(BoundArguments::new)
}
