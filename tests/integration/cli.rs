use predicates::prelude::*;

use blueprint_console::test_utils::{ConfigFixture, ScenarioFixture};

use crate::common::TestEnvironment;

#[test]
fn test_render_to_stdout() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::basic());

    env.bpconsole()
        .arg("render")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Blueprint Containers</h2>"))
        .stdout(predicate::str::contains("com.example.orders"))
        .stdout(predicate::str::contains("com.example.billing"))
        .stdout(predicate::str::contains("Grace period"))
        .stdout(predicate::str::contains("[dep.Foo]"));
}

#[test]
fn test_render_to_file() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::failure());
    let output = env.path().join("page.html");

    env.bpconsole()
        .args(["render", "--output"])
        .arg(&output)
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Failure"));
    assert!(html.contains("Unable to start blueprint container"));
    assert!(html.contains("Caused by: Unresolved reference &lt;dataSource&gt;"));
}

#[test]
fn test_list_table() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::basic());

    env.bpconsole()
        .args(["list", "--recipes"])
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("Symbolic name"))
        .stdout(predicate::str::contains("com.example.orders"))
        .stdout(predicate::str::contains("billingService"))
        .stdout(predicate::str::contains("2 containers, 1 unsatisfied"));
}

#[test]
fn test_list_json_is_ordered() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::basic());

    let output = env
        .bpconsole()
        .args(["list", "--format", "json"])
        .arg(&scenario)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let containers = json.as_array().unwrap();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0]["symbolic_name"], "com.example.orders");
    assert_eq!(containers[0]["event_type"], "Created");
    assert_eq!(containers[1]["symbolic_name"], "com.example.billing");
    assert_eq!(containers[1]["missing_dependencies"], "[dep.Foo]");
    assert_eq!(containers[1]["recipes"][0]["name"], "billingService");
    assert_eq!(containers[1]["recipes"][1]["satisfied"], "false");
}

#[test]
fn test_destroyed_module_not_listed() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::destroyed());

    env.bpconsole()
        .arg("list")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("No blueprint containers available."))
        .stdout(predicate::str::contains("com.example.gone").not());
}

#[test]
fn test_config_label_and_title() {
    let env = TestEnvironment::new();
    env.config(ConfigFixture::labelled("ariesblueprint", "Aries Blueprint"));
    let scenario = env.scenario(ScenarioFixture::basic());

    env.bpconsole()
        .arg("render")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Aries Blueprint</h2>"))
        .stdout(predicate::str::contains(r#"data-label="ariesblueprint""#));
}

#[test]
fn test_custom_template_via_config() {
    let env = TestEnvironment::new();
    let template = env.path().join("custom.html");
    std::fs::write(&template, "{{ container_count }} containers").unwrap();
    env.config(ConfigFixture::with_template(&template));
    let scenario = env.scenario(ScenarioFixture::basic());

    env.bpconsole()
        .arg("render")
        .arg(&scenario)
        .assert()
        .success()
        .stdout(predicate::str::diff("2 containers"));
}

#[test]
fn test_unknown_config_key_fails() {
    let env = TestEnvironment::new();
    env.config(ConfigFixture::unknown_key());
    let scenario = env.scenario(ScenarioFixture::basic());

    env.bpconsole()
        .arg("render")
        .arg(&scenario)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn test_unknown_event_kind_fails() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::unknown_event_kind());

    env.bpconsole()
        .arg("render")
        .arg(&scenario)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown event type: 99"));
}

#[test]
fn test_undeclared_module_fails() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::undeclared_module());

    env.bpconsole()
        .arg("list")
        .arg(&scenario)
        .assert()
        .failure()
        .stderr(predicate::str::contains("undeclared module 42"));
}

#[test]
fn test_invalid_scenario_syntax_fails() {
    let env = TestEnvironment::new();
    let scenario = env.scenario(ScenarioFixture::invalid_syntax());

    env.bpconsole()
        .arg("list")
        .arg(&scenario)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("TOML parsing error"))
        .stderr(predicate::str::contains("Failed to load scenario from"))
        .stderr(predicate::str::contains("invalid.toml"));
}

#[test]
fn test_missing_scenario_fails() {
    let env = TestEnvironment::new();

    env.bpconsole()
        .args(["render", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
}
