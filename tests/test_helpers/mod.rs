//! Example RPC API shared by the integration and behaviour tests.
//!
//! Handlers live under `math/*`, `string/*` and `util/*`; their rules are
//! loaded from the JSON documents in `tests/fixtures/rules`. Two handlers
//! carry deliberately broken rules: `math/pow` constrains an undeclared
//! parameter and `math/abs` uses a constraint outside every recognized
//! namespace.

use camino::Utf8PathBuf;
use paramguard::dispatch::{
    adapters::{
        InMemoryMethodMapper, InMemoryRuleRegistry, MethodRegistration, RuleFileLoader,
        SimpleDispatcher, StandardConstraintChecker,
    },
    config::DispatcherConfig,
    domain::{BoundArguments, ConstraintId, HandlerError, MethodName, MethodSignature},
    services::ValidatingDispatcher,
    vocabulary::ConstraintVocabulary,
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Validating dispatcher over the example API.
pub type ExampleDispatcher = ValidatingDispatcher<
    SimpleDispatcher,
    InMemoryMethodMapper,
    InMemoryRuleRegistry,
    StandardConstraintChecker,
>;

/// Fault code raised by `util/fail`.
pub const FAILURE_CODE: i64 = -32_010;

/// Directory holding the example rule documents.
#[must_use]
pub fn rules_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rules")
}

/// Loads the example rules from [`rules_dir`].
///
/// # Panics
///
/// Panics when the fixture documents cannot be loaded.
#[must_use]
pub fn example_rules() -> InMemoryRuleRegistry {
    RuleFileLoader::open_ambient(&rules_dir())
        .and_then(|loader| loader.load_all())
        .expect("example rules should load")
}

/// Checker recognizing the standard vocabulary plus `acme::Positive`.
///
/// # Panics
///
/// Panics if the predicate identifier is rejected.
#[must_use]
pub fn example_checker() -> StandardConstraintChecker {
    StandardConstraintChecker::new().with_predicate(
        ConstraintId::new("acme::Positive").expect("valid constraint id"),
        |value, _| value.as_i64().is_some_and(|number| number > 0),
    )
}

/// Builds a validating dispatcher over the example API.
#[must_use]
pub fn example_dispatcher(
    vocabulary: &ConstraintVocabulary,
    config: &DispatcherConfig,
) -> ExampleDispatcher {
    dispatcher_with_rules(example_rules(), vocabulary, config)
}

/// Builds a validating dispatcher over the example handlers with `rules`
/// in place of the example rule documents.
#[must_use]
pub fn dispatcher_with_rules(
    rules: InMemoryRuleRegistry,
    vocabulary: &ConstraintVocabulary,
    config: &DispatcherConfig,
) -> ExampleDispatcher {
    let mapper = Arc::new(example_mapper());
    ValidatingDispatcher::new(
        Arc::new(SimpleDispatcher::new(Arc::clone(&mapper))),
        mapper,
        Arc::new(rules),
        Arc::new(example_checker()),
        vocabulary,
        config,
    )
}

/// Registers every example handler.
///
/// # Panics
///
/// Panics if a fixture name or signature is invalid.
#[must_use]
pub fn example_mapper() -> InMemoryMethodMapper {
    InMemoryMethodMapper::with_methods([
        binary("math/subtract", |a, b| a.checked_sub(b)),
        binary("math/divide", |a, b| a.checked_div(b)),
        binary("math/add", |a, b| a.checked_add(b)),
        binary("math/multiply", |a, b| a.checked_mul(b)),
        binary("math/pow", |a, b| {
            u32::try_from(b).ok().and_then(|exponent| a.checked_pow(exponent))
        }),
        register("math/abs", &["a"], |bound| {
            integer(bound, 0)?
                .checked_abs()
                .map(Value::from)
                .ok_or_else(|| HandlerError::new("overflow"))
        }),
        register("string/no_validation_on_c", &["a", "b", "c"], |bound| {
            Ok(json!(integer(bound, 0)? + integer(bound, 1)?))
        }),
        register("string/hex_to_lower", &["a"], |bound| {
            Ok(json!(text(bound, 0)?.to_lowercase()))
        }),
        MethodRegistration::new(
            name("string/concat"),
            MethodSignature::builder()
                .required("a")
                .optional("b", "nothing")
                .build()
                .expect("valid signature"),
            |bound| Ok(json!(format!("{}{}", text(bound, 0)?, text(bound, 1)?))),
        ),
        MethodRegistration::new(
            name("string/join"),
            MethodSignature::builder()
                .required("parts")
                .optional("separator", ",")
                .build()
                .expect("valid signature"),
            |bound| {
                let parts = bound
                    .get(0)
                    .and_then(Value::as_array)
                    .ok_or_else(|| HandlerError::new("parts must be a list"))?;
                let words: Vec<String> = parts.iter().filter_map(as_text).collect();
                Ok(json!(words.join(text(bound, 1)?.as_str())))
            },
        ),
        register("util/sqrt", &["a"], |bound| {
            integer(bound, 0)?
                .checked_isqrt()
                .map(Value::from)
                .ok_or_else(|| HandlerError::new("negative radicand"))
        }),
        register("util/fail", &[], |_| {
            Err(HandlerError::new("always fails")
                .with_code(FAILURE_CODE)
                .with_data(json!({ "retry": false })))
        }),
    ])
    .expect("example handlers register")
}

fn name(value: &str) -> MethodName {
    MethodName::new(value).expect("valid method name")
}

fn register<F>(method: &str, parameters: &[&str], function: F) -> MethodRegistration
where
    F: Fn(&BoundArguments) -> Result<Value, HandlerError> + Send + Sync + 'static,
{
    let signature = parameters
        .iter()
        .fold(MethodSignature::builder(), |builder, parameter| {
            builder.required(*parameter)
        })
        .build()
        .expect("valid signature");
    MethodRegistration::new(name(method), signature, function)
}

fn binary(method: &str, operation: fn(i64, i64) -> Option<i64>) -> MethodRegistration {
    register(method, &["a", "b"], move |bound| {
        operation(integer(bound, 0)?, integer(bound, 1)?)
            .map(Value::from)
            .ok_or_else(|| HandlerError::new("arithmetic overflow"))
    })
}

fn integer(bound: &BoundArguments, position: usize) -> Result<i64, HandlerError> {
    bound
        .get(position)
        .and_then(Value::as_i64)
        .ok_or_else(|| HandlerError::new(format!("argument {position} is not an integer")))
}

fn text(bound: &BoundArguments, position: usize) -> Result<String, HandlerError> {
    bound
        .get(position)
        .and_then(as_text)
        .ok_or_else(|| HandlerError::new(format!("argument {position} is not text")))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
