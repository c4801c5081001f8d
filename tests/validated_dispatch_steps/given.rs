//! Given steps for validated dispatch BDD scenarios.

use super::world::DispatchWorld;
use paramguard::dispatch::config::DispatcherConfig;
use rstest_bdd_macros::given;

#[given("a validating dispatcher over the example API")]
fn validating_dispatcher(world: &mut DispatchWorld) {
    world.rebuild(&DispatcherConfig::default());
}

#[given("the dispatcher reports every invalid parameter")]
fn collecting_dispatcher(world: &mut DispatchWorld) {
    world.rebuild(&DispatcherConfig::collect_all());
}
