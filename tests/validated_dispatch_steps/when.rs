//! When steps for validated dispatch BDD scenarios.

use super::world::DispatchWorld;
use eyre::WrapErr;
use paramguard::dispatch::{
    config::DispatcherConfig,
    domain::{Arguments, ConstraintNamespace},
};
use rstest_bdd_macros::when;

#[when(r#""{method}" is called with {a:i64} and {b:i64}"#)]
fn call_with_two_integers(
    world: &mut DispatchWorld,
    method: String,
    a: i64,
    b: i64,
) -> Result<(), eyre::Report> {
    world.call(&method, &Arguments::positional([a, b]))
}

#[when(r#""{method}" is called with the single argument {a:i64}"#)]
fn call_with_one_integer(
    world: &mut DispatchWorld,
    method: String,
    a: i64,
) -> Result<(), eyre::Report> {
    world.call(&method, &Arguments::positional([a]))
}

#[when(r#""{method}" is called with the texts "{a}" and "{b}""#)]
fn call_with_two_texts(
    world: &mut DispatchWorld,
    method: String,
    a: String,
    b: String,
) -> Result<(), eyre::Report> {
    world.call(&method, &Arguments::positional([a, b]))
}

#[when(r#""{method}" is called with only a = "{value}""#)]
fn call_with_named_a(
    world: &mut DispatchWorld,
    method: String,
    value: String,
) -> Result<(), eyre::Report> {
    world.call(&method, &Arguments::named([("a", value)]))
}

#[when(r#""{method}" is called without arguments"#)]
fn call_without_arguments(world: &mut DispatchWorld, method: String) -> Result<(), eyre::Report> {
    world.call(&method, &Arguments::default())
}

#[when(r#"a dispatcher recognizing the "{namespace}" namespace is constructed"#)]
fn dispatcher_with_namespace(
    world: &mut DispatchWorld,
    namespace: String,
) -> Result<(), eyre::Report> {
    let extra = ConstraintNamespace::new(namespace).wrap_err("parse scenario namespace")?;
    world.rebuild(&DispatcherConfig::with_namespaces([extra]));
    Ok(())
}
