//! Then steps for validated dispatch BDD scenarios.

use super::world::DispatchWorld;
use paramguard::dispatch::domain::{DispatchError, RpcFault};
use rstest_bdd_macros::then;
use serde_json::json;

#[then("the call returns {expected:i64}")]
fn call_returns_integer(world: &DispatchWorld, expected: i64) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if result != &Ok(json!(expected)) {
        return Err(eyre::eyre!("expected {expected}, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the call returns the text "{expected}""#)]
fn call_returns_text(world: &DispatchWorld, expected: String) -> Result<(), eyre::Report> {
    let result = world.last_result()?;
    if result != &Ok(json!(expected)) {
        return Err(eyre::eyre!("expected {expected:?}, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the call fails with an invalid argument "{parameter}" at position {position:u64}"#)]
fn call_fails_with_invalid_argument(
    world: &DispatchWorld,
    parameter: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let DispatchError::Argument(error) = world.last_error()? else {
        return Err(eyre::eyre!("expected an argument error"));
    };
    if error.parameter() != parameter || u64::try_from(error.position()) != Ok(position) {
        return Err(eyre::eyre!(
            "expected parameter {parameter} at {position}, got {} at {}",
            error.parameter(),
            error.position()
        ));
    }
    Ok(())
}

#[then("{count:u64} parameters are reported invalid")]
fn parameters_reported_invalid(world: &DispatchWorld, count: u64) -> Result<(), eyre::Report> {
    let DispatchError::Argument(error) = world.last_error()? else {
        return Err(eyre::eyre!("expected an argument error"));
    };
    let reported = error.failures().count();
    if u64::try_from(reported) != Ok(count) {
        return Err(eyre::eyre!("expected {count} failures, got {reported}"));
    }
    Ok(())
}

#[then(r#"the call fails with a missing argument "{parameter}""#)]
fn call_fails_with_missing_argument(
    world: &DispatchWorld,
    parameter: String,
) -> Result<(), eyre::Report> {
    match world.last_error()? {
        DispatchError::MissingArgument(missing) if missing.parameter == parameter => Ok(()),
        other => Err(eyre::eyre!("expected missing {parameter}, got {other}")),
    }
}

#[then("the call fails with a configuration error")]
fn call_fails_with_configuration_error(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match world.last_error()? {
        DispatchError::Configuration(_) => Ok(()),
        other => Err(eyre::eyre!("expected a configuration error, got {other}")),
    }
}

#[then("the first call failed with a configuration error")]
fn first_call_failed_with_configuration_error(world: &DispatchWorld) -> Result<(), eyre::Report> {
    match world.results.first() {
        Some(Err(DispatchError::Configuration(_))) => Ok(()),
        other => Err(eyre::eyre!("expected a configuration error, got {other:?}")),
    }
}

#[then("the fault code is {code:i64}")]
fn fault_code_is(world: &DispatchWorld, code: i64) -> Result<(), eyre::Report> {
    let fault = RpcFault::from(world.last_error()?);
    if fault.code != code {
        return Err(eyre::eyre!("expected fault code {code}, got {}", fault.code));
    }
    Ok(())
}
