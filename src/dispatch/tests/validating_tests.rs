//! Validating dispatcher tests.

use super::fixtures::{mapper, rules};
use crate::dispatch::{
    adapters::{
        InMemoryMethodMapper, InMemoryRuleRegistry, SimpleDispatcher, StandardConstraintChecker,
    },
    config::DispatcherConfig,
    domain::{
        Arguments, ConfigurationError, Constraint, ConstraintDefect, ConstraintId,
        ConstraintNamespace, DispatchError, HandlerError, HandlerId, Ruleset,
    },
    ports::{Dispatcher, dispatcher::MockDispatcher},
    services::ValidatingDispatcher,
    vocabulary::ConstraintVocabulary,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

type Validating<D> =
    ValidatingDispatcher<D, InMemoryMethodMapper, InMemoryRuleRegistry, StandardConstraintChecker>;

fn acme_positive() -> StandardConstraintChecker {
    StandardConstraintChecker::new().with_predicate(
        ConstraintId::new("acme::Positive").expect("valid id"),
        |value, _| value.as_i64().is_some_and(|n| n > 0),
    )
}

fn build<D: Dispatcher>(
    inner: D,
    vocabulary: &ConstraintVocabulary,
    config: &DispatcherConfig,
) -> Validating<D> {
    ValidatingDispatcher::new(
        Arc::new(inner),
        Arc::new(mapper()),
        Arc::new(rules()),
        Arc::new(acme_positive()),
        vocabulary,
        config,
    )
}

#[fixture]
fn validating() -> Validating<SimpleDispatcher> {
    let inner = SimpleDispatcher::new(Arc::new(mapper()));
    build(inner, &ConstraintVocabulary::new(), &DispatcherConfig::default())
}

fn untouched_inner() -> MockDispatcher {
    let mut inner = MockDispatcher::new();
    inner.expect_invoke().times(0);
    inner
}

#[rstest]
fn divide_forwards_valid_arguments(validating: Validating<SimpleDispatcher>) {
    let result = validating.invoke("math/divide", &Arguments::positional([10, 2]));
    assert_eq!(result, Ok(json!(5)));
}

#[rstest]
#[case(Arguments::positional([1, 0]), "b", 1)]
#[case(Arguments::positional([json!("1"), json!(2)]), "a", 0)]
#[case(Arguments::named([("a", json!(1)), ("b", json!("0"))]), "b", 1)]
fn invalid_arguments_never_reach_inner(
    #[case] arguments: Arguments,
    #[case] parameter: &str,
    #[case] position: usize,
) {
    let validating = build(
        untouched_inner(),
        &ConstraintVocabulary::new(),
        &DispatcherConfig::default(),
    );

    let result = validating.invoke("math/divide", &arguments);

    assert!(matches!(
        result,
        Err(DispatchError::Argument(ref error))
            if error.parameter() == parameter && error.position() == position
    ));
}

#[rstest]
fn concat_validates_the_bound_default(validating: Validating<SimpleDispatcher>) {
    let result = validating.invoke("string/concat", &Arguments::named([("a", "abc")]));
    assert_eq!(result, Ok(json!("abcnothing")));
}

#[rstest]
fn concat_rejects_values_outside_the_choice(validating: Validating<SimpleDispatcher>) {
    let result = validating.invoke(
        "string/concat",
        &Arguments::named([("a", "abc"), ("b", "anything")]),
    );
    assert!(matches!(
        result,
        Err(DispatchError::Argument(ref error)) if error.parameter() == "b"
    ));
}

#[rstest]
#[case(json!(1), json!(2))]
#[case(json!(-7), json!(1_000_000))]
fn unconstrained_method_always_validates(
    validating: Validating<SimpleDispatcher>,
    #[case] a: Value,
    #[case] b: Value,
) {
    assert_eq!(
        validating.validate("math/add", &Arguments::positional([a, b])),
        Ok(())
    );
}

#[rstest]
#[case(json!(3))]
#[case(json!("three"))]
#[case(json!(null))]
#[case(json!({ "nested": [1, 2] }))]
fn unconstrained_parameter_never_affects_outcome(
    validating: Validating<SimpleDispatcher>,
    #[case] c: Value,
) {
    let arguments = Arguments::positional([json!(1), json!(2), c]);
    assert_eq!(
        validating.invoke("string/no_validation_on_c", &arguments),
        Ok(json!(3))
    );
}

#[rstest]
fn missing_argument_is_reported_before_inner() {
    let validating = build(
        untouched_inner(),
        &ConstraintVocabulary::new(),
        &DispatcherConfig::default(),
    );

    let result = validating.invoke("math/divide", &Arguments::positional([10]));

    assert!(matches!(
        result,
        Err(DispatchError::MissingArgument(ref missing)) if missing.parameter == "b"
    ));
}

#[rstest]
fn missing_argument_can_be_delegated() {
    let mut inner = MockDispatcher::new();
    inner
        .expect_invoke()
        .withf(|method, arguments| method == "math/divide" && arguments.len() == 1)
        .times(1)
        .returning(|_, _| Err(HandlerError::new("inner reports missing b").into()));
    let config = DispatcherConfig {
        delegate_missing_arguments: true,
        ..DispatcherConfig::default()
    };
    let validating = build(inner, &ConstraintVocabulary::new(), &config);

    let result = validating.invoke("math/divide", &Arguments::positional([10]));

    assert_eq!(
        result,
        Err(DispatchError::Handler(HandlerError::new(
            "inner reports missing b"
        )))
    );
}

#[rstest]
fn forwards_original_arguments_and_inner_result() {
    let mut inner = MockDispatcher::new();
    inner
        .expect_invoke()
        .withf(|method, arguments| {
            method == "string/concat" && *arguments == Arguments::named([("a", "abc")])
        })
        .times(1)
        .returning(|_, _| Ok(json!("from inner")));
    let validating = build(inner, &ConstraintVocabulary::new(), &DispatcherConfig::default());

    let result = validating.invoke("string/concat", &Arguments::named([("a", "abc")]));

    assert_eq!(result, Ok(json!("from inner")));
}

#[rstest]
fn unknown_method_is_a_resolution_error(validating: Validating<SimpleDispatcher>) {
    assert!(matches!(
        validating.invoke("math/nope", &Arguments::default()),
        Err(DispatchError::Resolution(_))
    ));
}

#[rstest]
fn collect_all_reports_every_invalid_parameter() {
    let validating = build(
        untouched_inner(),
        &ConstraintVocabulary::new(),
        &DispatcherConfig::collect_all(),
    );

    let result = validating.invoke("math/divide", &Arguments::positional(["x", "y"]));

    let Err(DispatchError::Argument(error)) = result else {
        panic!("expected an argument error");
    };
    assert_eq!(error.parameter(), "a");
    assert_eq!(error.failures().count(), 2);
}

#[rstest]
fn unrecognized_namespace_fails_before_arguments_are_examined() {
    let validating = build(
        untouched_inner(),
        &ConstraintVocabulary::new(),
        &DispatcherConfig::default(),
    );

    // No arguments at all: binding would fail, but resolution fails first.
    let result = validating.invoke("util/sqrt", &Arguments::default());

    assert!(matches!(
        result,
        Err(DispatchError::Configuration(
            ConfigurationError::UnrecognizedConstraint { .. }
        ))
    ));
}

fn guarding_sqrt_with(constraint: Constraint) -> Validating<MockDispatcher> {
    let rules = InMemoryRuleRegistry::new()
        .with_ruleset(
            HandlerId::new("util/sqrt"),
            Ruleset::new().with_rule("a", [constraint]),
        )
        .expect("rules register");
    ValidatingDispatcher::new(
        Arc::new(untouched_inner()),
        Arc::new(mapper()),
        Arc::new(rules),
        Arc::new(acme_positive()),
        &ConstraintVocabulary::new(),
        &DispatcherConfig::default(),
    )
}

#[rstest]
#[case(json!([]))]
#[case(json!([1, 2]))]
fn nested_unrecognized_constraint_rejects_any_list(#[case] list: Value) {
    let each = Constraint::parse("paramguard::Each")
        .expect("valid id")
        .with_option("constraints", json!([{ "id": "evil::Thing" }]));

    let result = guarding_sqrt_with(each).invoke("util/sqrt", &Arguments::positional([list]));

    assert!(matches!(
        result,
        Err(DispatchError::Configuration(
            ConfigurationError::UnrecognizedConstraint { constraint, .. }
        )) if constraint.as_str() == "evil::Thing"
    ));
}

#[rstest]
fn unsupported_standard_constraint_is_a_configuration_error() {
    let awesome = Constraint::parse("assert::Awesome").expect("valid id");

    let result = guarding_sqrt_with(awesome).invoke("util/sqrt", &Arguments::positional([4]));

    assert!(matches!(
        result,
        Err(DispatchError::Configuration(ConfigurationError::InvalidConstraint {
            defect: ConstraintDefect::Unsupported,
            ..
        }))
    ));
}

#[rstest]
fn extending_the_vocabulary_applies_to_later_calls_only() {
    let vocabulary = ConstraintVocabulary::new();
    let acme = ConstraintNamespace::new("acme").expect("valid namespace");
    let sqrt_args = Arguments::positional([16]);

    let first = build(
        SimpleDispatcher::new(Arc::new(mapper())),
        &vocabulary,
        &DispatcherConfig::default(),
    );
    let earlier = first.invoke("util/sqrt", &sqrt_args);
    assert!(matches!(earlier, Err(DispatchError::Configuration(_))));

    let second = build(
        SimpleDispatcher::new(Arc::new(mapper())),
        &vocabulary,
        &DispatcherConfig::with_namespaces([acme]),
    );
    assert_eq!(second.invoke("util/sqrt", &sqrt_args), Ok(json!(4)));

    let third = build(
        SimpleDispatcher::new(Arc::new(mapper())),
        &vocabulary,
        &DispatcherConfig::default(),
    );
    assert_eq!(third.invoke("util/sqrt", &sqrt_args), Ok(json!(4)));

    // The shared vocabulary also serves the dispatcher built before the
    // extension; its earlier result is unchanged.
    assert_eq!(first.invoke("util/sqrt", &sqrt_args), Ok(json!(4)));
    assert!(matches!(earlier, Err(DispatchError::Configuration(_))));
}

#[rstest]
fn preflight_surfaces_rule_defects() {
    let vocabulary = ConstraintVocabulary::new();
    let validating = build(untouched_inner(), &vocabulary, &DispatcherConfig::default());

    assert!(matches!(
        validating.preflight(),
        Err(DispatchError::Configuration(_))
    ));

    vocabulary.extend([ConstraintNamespace::new("acme").expect("valid namespace")]);
    assert_eq!(validating.preflight(), Ok(5));
}

#[rstest]
fn validators_stack() {
    let vocabulary = ConstraintVocabulary::new();
    let innermost = build(
        SimpleDispatcher::new(Arc::new(mapper())),
        &vocabulary,
        &DispatcherConfig::default(),
    );
    let outer = build(innermost, &vocabulary, &DispatcherConfig::default());

    assert_eq!(
        outer.invoke("math/divide", &Arguments::positional([9, 3])),
        Ok(json!(3))
    );
}
