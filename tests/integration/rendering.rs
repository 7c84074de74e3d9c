use tempfile::TempDir;

use blueprint_console::config::PluginConfig;
use blueprint_console::core::ConsoleError;
use blueprint_console::engine::{EventCause, EventKind, ModuleId};
use blueprint_console::plugin::ConsolePlugin;
use blueprint_console::registry::{ContainerDiscovery, LifecycleListener};
use blueprint_console::scenario::Scenario;
use blueprint_console::test_utils::{ScenarioFixture, event, module, sample_container};

#[tokio::test]
async fn test_page_reflects_notifications() {
    let mut plugin = ConsolePlugin::new(PluginConfig::default()).await.unwrap();
    let (tracker, listener) = plugin.activate();

    tracker.on_discovered(ModuleId(1), sample_container("R1"));
    listener.on_event(
        event(EventKind::Waiting, module(1, "com.example.m1", "1.0.0"), 0)
            .with_dependencies(["dep.Foo"]),
    );

    let html = plugin.render_page().unwrap();
    assert!(html.contains("com.example.m1"));
    assert!(html.contains("Waiting"));
    assert!(html.contains("[dep.Foo]"));
    assert!(html.contains("1970-01-01 00:00:00.000 UTC"));
    assert!(html.contains("(objectClass=Absent)"));
    // plain, then satisfied, then unsatisfied
    let service = html.find(">service<").unwrap();
    let present = html.find(">present<").unwrap();
    let absent = html.find(">absent<").unwrap();
    assert!(service < present && present < absent);

    listener.on_event(event(EventKind::Destroyed, module(1, "com.example.m1", "1.0.0"), 1));
    let html = plugin.render_page().unwrap();
    assert!(!html.contains("com.example.m1"));
    assert!(html.contains("No blueprint containers available."));
}

#[tokio::test]
async fn test_render_twice_is_identical() {
    let mut plugin = ConsolePlugin::new(PluginConfig::default()).await.unwrap();
    let (tracker, listener) = plugin.activate();
    for id in 0..5u64 {
        tracker.on_discovered(ModuleId(id), sample_container("c"));
        listener.on_event(event(EventKind::Created, module(id, "m", "1.0.0"), 3));
    }
    assert_eq!(plugin.render_page().unwrap(), plugin.render_page().unwrap());
}

#[tokio::test]
async fn test_failure_cause_rendered_escaped() {
    let mut plugin = ConsolePlugin::new(PluginConfig::default()).await.unwrap();
    let (_, listener) = plugin.activate();
    let cause = EventCause::from_chain(["Unable to start", "Unresolved <ref>"]).unwrap();
    listener.on_event(event(EventKind::Failure, module(2, "m2", "1.0.0"), 0).with_cause(cause));

    let html = plugin.render_page().unwrap();
    assert!(html.contains("Unable to start"));
    assert!(html.contains("Caused by: Unresolved &lt;ref&gt;"));
}

#[tokio::test]
async fn test_unknown_event_kind_fails_whole_page() {
    let mut plugin = ConsolePlugin::new(PluginConfig::default()).await.unwrap();
    let (tracker, listener) = plugin.activate();
    tracker.on_discovered(ModuleId(1), sample_container("c"));
    listener.on_event(event(EventKind::Created, module(1, "ok", "1.0.0"), 0));
    listener.on_event(event(EventKind::from_code(99), module(2, "odd", "1.0.0"), 1));

    assert!(matches!(
        plugin.render_page(),
        Err(ConsoleError::UnknownEventKind {
            code: 99
        })
    ));
}

#[tokio::test]
async fn test_custom_template_and_title() {
    let temp = TempDir::new().unwrap();
    let template = temp.path().join("page.html");
    std::fs::write(
        &template,
        "<h1>{{ title }}</h1>{% for c in containers %}<p>{{ c.symbolic_name }}={{ c.unsatisfied_count }}</p>{% endfor %}",
    )
    .unwrap();

    let config = PluginConfig {
        title: "Containers".to_string(),
        template: Some(template),
        ..PluginConfig::default()
    };
    let mut plugin = ConsolePlugin::new(config).await.unwrap();
    let (tracker, listener) = plugin.activate();

    let scenario = Scenario::parse(&ScenarioFixture::basic().content).unwrap();
    scenario.replay(&tracker, &listener).unwrap();

    assert_eq!(
        plugin.render_page().unwrap(),
        "<h1>Containers</h1><p>com.example.orders=0</p><p>com.example.billing=1</p>"
    );
}

#[tokio::test]
async fn test_missing_template_fails_plugin_construction() {
    let config = PluginConfig {
        template: Some("/nonexistent/template.html".into()),
        ..PluginConfig::default()
    };
    assert!(matches!(
        ConsolePlugin::new(config).await,
        Err(ConsoleError::TemplateError { .. })
    ));
}
