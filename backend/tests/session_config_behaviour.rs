//! Behaviour of session configuration under release and debug builds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use tempfile::NamedTempFile;

use recipe_api::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};

struct SessionWorld {
    vars: RefCell<HashMap<String, String>>,
    mode: RefCell<BuildMode>,
    outcome: RefCell<Option<Result<SessionSettings, SessionConfigError>>>,
    key_files: RefCell<Vec<NamedTempFile>>,
}

impl SessionWorld {
    fn set(&self, name: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld {
        vars: RefCell::new(HashMap::new()),
        mode: RefCell::new(BuildMode::Release),
        outcome: RefCell::new(None),
        key_files: RefCell::new(Vec::new()),
    }
}

#[given("a release build")]
fn a_release_build(world: &SessionWorld) {
    *world.mode.borrow_mut() = BuildMode::Release;
}

#[given("a debug build")]
fn a_debug_build(world: &SessionWorld) {
    *world.mode.borrow_mut() = BuildMode::Debug;
}

#[given("a session key file with {len} bytes")]
fn a_session_key_file(world: &SessionWorld, len: usize) {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    world.set("SESSION_KEY_FILE", &file.path().to_string_lossy());
    world.key_files.borrow_mut().push(file);
}

#[given("{name} is set to {value}")]
fn variable_is_set(world: &SessionWorld, name: String, value: String) {
    world.set(&name, &value);
}

#[when("the session configuration is loaded")]
fn the_session_configuration_is_loaded(world: &SessionWorld) {
    let vars = world.vars.borrow().clone();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    let outcome = session_settings_from_env(&env, *world.mode.borrow());
    *world.outcome.borrow_mut() = Some(outcome);
}

#[then("the cookie is secure with SameSite {expected}")]
fn the_cookie_is_secure(world: &SessionWorld, expected: String) {
    let outcome = world.outcome.borrow();
    let settings = outcome
        .as_ref()
        .expect("configuration evaluated")
        .as_ref()
        .expect("settings accepted");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site.to_string(), expected);
}

#[then("loading fails mentioning {reason}")]
fn loading_fails(world: &SessionWorld, reason: String) {
    let outcome = world.outcome.borrow();
    match outcome.as_ref().expect("configuration evaluated") {
        Ok(_) => panic!("settings unexpectedly accepted"),
        Err(error) => assert!(error.to_string().contains(&reason), "unexpected error: {error}"),
    }
}

fn release_toggles(world: &SessionWorld) {
    a_release_build(world);
    a_session_key_file(world, 64);
    for (name, value) in [
        ("SESSION_COOKIE_SECURE", "1"),
        ("SESSION_SAMESITE", "Strict"),
        ("SESSION_ALLOW_EPHEMERAL", "0"),
    ] {
        variable_is_set(world, name.to_owned(), value.to_owned());
    }
}

#[rstest]
fn release_build_with_explicit_toggles_loads(world: SessionWorld) {
    release_toggles(&world);
    the_session_configuration_is_loaded(&world);
    the_cookie_is_secure(&world, "Strict".to_owned());
}

#[rstest]
fn release_build_refuses_ephemeral_keys(world: SessionWorld) {
    release_toggles(&world);
    variable_is_set(&world, "SESSION_ALLOW_EPHEMERAL".to_owned(), "1".to_owned());
    the_session_configuration_is_loaded(&world);
    loading_fails(&world, "SESSION_ALLOW_EPHEMERAL must be 0".to_owned());
}

#[rstest]
fn release_build_refuses_short_keys(world: SessionWorld) {
    release_toggles(&world);
    a_session_key_file(&world, 16);
    the_session_configuration_is_loaded(&world);
    loading_fails(&world, "too short".to_owned());
}

#[rstest]
fn release_build_refuses_insecure_same_site_none(world: SessionWorld) {
    release_toggles(&world);
    variable_is_set(&world, "SESSION_COOKIE_SECURE".to_owned(), "0".to_owned());
    variable_is_set(&world, "SESSION_SAMESITE".to_owned(), "None".to_owned());
    the_session_configuration_is_loaded(&world);
    loading_fails(&world, "requires SESSION_COOKIE_SECURE=1".to_owned());
}

#[rstest]
fn debug_build_without_toggles_uses_defaults(world: SessionWorld) {
    a_debug_build(&world);
    the_session_configuration_is_loaded(&world);
    the_cookie_is_secure(&world, "Lax".to_owned());
}
