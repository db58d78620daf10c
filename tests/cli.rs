mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn blank_slate_initialises_store() {
    let ctx = TestContext::new();

    ctx.cli()
        .assert()
        .success()
        .stderr("")
        .stdout(predicate::str::contains("Initialising"))
        .stdout(predicate::str::is_match(r"Creating .*\.yarnrcs").unwrap())
        .stdout(predicate::str::contains("Activating .yarnrc \"default\""));

    ctx.assert_link_is_symlink();
    assert_eq!(fs::read_link(ctx.link()).unwrap(), ctx.profile("default"));
    assert_eq!(fs::read_to_string(ctx.profile("default")).unwrap(), "");
}

#[test]
fn existing_yarnrc_becomes_default() {
    let ctx = TestContext::new();
    fs::write(ctx.link(), "foobar").unwrap();

    ctx.cli()
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Making .*\.yarnrc the default").unwrap());

    ctx.assert_link_is_symlink();
    assert_eq!(fs::read_to_string(ctx.link()).unwrap(), "foobar");
    assert_eq!(fs::read_to_string(ctx.profile("default")).unwrap(), "foobar");
    let entries: Vec<_> = fs::read_dir(ctx.store())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["default"]);
}

#[test]
fn second_run_lists_and_marks_active() {
    let ctx = TestContext::initialized();
    fs::write(ctx.profile(".dotfile"), "").unwrap();

    ctx.cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("Available yarnrcs"))
        .stdout(predicate::str::is_match(r"\*\s+default").unwrap())
        .stdout(predicate::str::contains("Initialising").not())
        .stdout(predicate::str::contains(".dotfile").not());
}

#[test]
fn create_then_switch_with_fuzzy_name() {
    let ctx = TestContext::initialized();

    ctx.cli().args(["-c", "work"]).assert().success();
    assert!(ctx.profile("work").exists());
    assert_eq!(ctx.active().as_deref(), Some("default"));

    ctx.cli()
        .arg("wo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removing old .yarnrc (default)"))
        .stdout(predicate::str::contains("Activating .yarnrc \"work\""));
    assert_eq!(ctx.active().as_deref(), Some("work"));
}

#[test]
fn switch_to_active_profile_is_noop() {
    let ctx = TestContext::initialized();

    ctx.cli()
        .arg("default")
        .assert()
        .success()
        .stdout(predicate::str::contains("is already \"default\""))
        .stdout(predicate::str::contains("Removing").not());
    assert_eq!(ctx.active().as_deref(), Some("default"));
}

#[test]
fn switch_to_unknown_profile_fails() {
    let ctx = TestContext::initialized();

    ctx.cli()
        .arg("nowhere")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"nowhere\""));
    assert_eq!(ctx.active().as_deref(), Some("default"));
}

#[test]
fn create_existing_profile_fails_without_touching_it() {
    let ctx = TestContext::initialized();
    fs::write(ctx.profile("default"), "registry = keep").unwrap();

    ctx.cli()
        .args(["--create", "default"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(ctx.profile("default")).unwrap(),
        "registry = keep"
    );
}

#[test]
fn change_registry_url() {
    let ctx = TestContext::initialized();

    ctx.cli()
        .args(["-r", "au"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://registry.npmjs.org.au/"));
    let contents = fs::read_to_string(ctx.profile("default")).unwrap();
    assert_eq!(
        contents.lines().next(),
        Some("registry = http://registry.npmjs.org.au/")
    );

    ctx.cli().args(["-r", "cn"]).assert().success();
    let contents = fs::read_to_string(ctx.profile("default")).unwrap();
    assert_eq!(contents.matches("registry").count(), 1);
    assert_eq!(contents.lines().next(), Some("registry = http://r.cnpmjs.org/"));
}

#[test]
fn unknown_registry_fails_with_usage() {
    let ctx = TestContext::initialized();

    ctx.cli()
        .args(["-r", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a valid registry name"))
        .stderr(predicate::str::contains("Available mirrors"));
}

#[test]
fn plain_file_at_link_path_is_never_overwritten() {
    let ctx = TestContext::initialized();
    ctx.cli().args(["-c", "work"]).assert().success();
    fs::remove_file(ctx.link()).unwrap();
    fs::write(ctx.link(), "precious").unwrap();

    ctx.cli()
        .arg("work")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a symlink"));
    assert_eq!(fs::read_to_string(ctx.link()).unwrap(), "precious");
}

#[test]
fn store_path_that_is_a_file_fails() {
    let ctx = TestContext::new();
    fs::write(ctx.store(), "").unwrap();

    ctx.cli()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn unknown_options_are_reported_each() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["-x", "--bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown option: -x"))
        .stderr(predicate::str::contains("Unknown option: --bogus"))
        .stderr(predicate::str::contains("Usage"));
    assert!(!ctx.store().exists());
}

#[test]
fn help_exits_one() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("-h")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("yarnrc -r eu"));
    assert!(!ctx.store().exists());
}

#[test]
fn combined_actions_are_rejected() {
    let ctx = TestContext::initialized();

    ctx.cli()
        .args(["-c", "foo", "bar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot be combined"));
    assert!(!ctx.profile("foo").exists());
}

#[test]
fn env_overrides_locations() {
    let ctx = TestContext::new();
    let store = ctx.home().join("elsewhere/profiles");
    let link = ctx.home().join("custom-rc");

    ctx.cli()
        .env("YARNRC_STORE", &store)
        .env("YARNRC", &link)
        .assert()
        .success();

    assert_eq!(fs::read_link(&link).unwrap(), store.join("default"));
    assert!(!ctx.store().exists());
}

#[test]
fn names_outside_the_store_are_not_activated() {
    let ctx = TestContext::initialized();
    let outside = ctx.home().join("outside");
    fs::write(&outside, "registry = elsewhere").unwrap();

    for name in ["..", outside.to_str().unwrap()] {
        ctx.cli()
            .arg(name)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Couldn't find yarnrc file"));
        assert_eq!(fs::read_link(ctx.link()).unwrap(), ctx.profile("default"));
    }
}

#[test]
fn relative_overrides_resolve_against_working_directory() {
    let ctx = TestContext::new();

    ctx.cli()
        .current_dir(ctx.home())
        .env("YARNRC_STORE", "profiles")
        .env("YARNRC", "rc")
        .assert()
        .success();

    let link = ctx.home().join("rc");
    let target = fs::read_link(&link).unwrap();
    assert!(target.is_absolute());
    assert_eq!(target, ctx.home().join("profiles/default"));
    assert_eq!(fs::read_to_string(&link).unwrap(), "");
}
