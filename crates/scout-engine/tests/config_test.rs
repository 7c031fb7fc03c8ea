use pretty_assertions::assert_eq;
use scout_engine::config::{ConfigError, ConfigLoader, ScoutConfig};
use scout_engine::pipeline::Timeouts;
use scout_engine::scenario::ScenarioKind;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_default_values() {
    let config = ScoutConfig::default();
    assert_eq!(config.base_url, "https://ostrovok.ru");
    assert_eq!(config.browser.webdriver_url, "http://localhost:4444");
    assert_eq!(config.browser.window_width, 1920);
    assert_eq!(config.browser.window_height, 1080);
    assert!(!config.browser.headless);
    assert_eq!(config.resolver.element_timeout_ms, 5000);

    let names: Vec<_> = config.scenario_names().collect();
    assert_eq!(names, vec!["sochi_winter", "andorra", "full_analysis"]);

    let andorra = config.scenario("andorra").unwrap();
    assert_eq!(andorra.destination.as_deref(), Some("Андорра"));
    assert_eq!(andorra.check_in.as_deref(), Some("2024-12-25"));
    assert_eq!(andorra.guests, 2);
    assert_eq!(
        config.scenario("full_analysis").unwrap().kind,
        ScenarioKind::FullJourney
    );
}

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url: "https://staging.example.test"
browser:
  headless: true
resolver:
  element_timeout_ms: 1500
scenarios:
  - name: kazan_spring
    destination: Казань
    check_in: "2025-04-10"
    check_out: "2025-04-14"
    guests: 3
  - name: checkout
    kind: booking
    guest_email: qa@example.test
"#
    )
    .unwrap();

    let config = ConfigLoader::load_from(file.path())
        .await
        .expect("Failed to load config from file");

    assert_eq!(config.base_url, "https://staging.example.test");
    assert!(config.browser.headless);
    assert_eq!(config.browser.webdriver_url, "http://localhost:4444");
    assert_eq!(config.resolver.element_timeout_ms, 1500);
    assert_eq!(config.resolver.settle_timeout_ms, 3000);

    // the configured list replaces the defaults
    let names: Vec<_> = config.scenario_names().collect();
    assert_eq!(names, vec!["kazan_spring", "checkout"]);

    let kazan = config.scenario("kazan_spring").unwrap();
    assert_eq!(kazan.kind, ScenarioKind::HotelSearch);
    assert_eq!(kazan.guests, 3);
    assert_eq!(kazan.rooms, 1);
    assert_eq!(kazan.amenities, vec!["wi-fi", "wifi"]);

    let checkout = config.scenario("checkout").unwrap();
    assert_eq!(checkout.kind, ScenarioKind::Booking);
    assert_eq!(checkout.guest_email.as_deref(), Some("qa@example.test"));
}

#[test]
fn test_resolver_config_becomes_timeouts() {
    let config = ConfigLoader::parse(
        "resolver:\n  element_timeout_ms: 800\n  settle_timeout_ms: 400\n  poll_interval_ms: 100\n",
    )
    .unwrap();
    let timeouts = Timeouts::from(&config.resolver);
    assert_eq!(timeouts.element, Duration::from_millis(800));
    assert_eq!(timeouts.settle, Duration::from_millis(400));
    assert_eq!(timeouts.poll_interval, Duration::from_millis(100));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_load_from_nonexistent_file() {
    let result =
        ConfigLoader::load_from(std::path::Path::new("/nonexistent/path/scout.yaml")).await;
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[tokio::test]
async fn test_load_from_invalid_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{invalid yaml: [unclosed").unwrap();

    let result = ConfigLoader::load_from(file.path()).await;
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[tokio::test]
async fn test_load_from_empty_file() {
    let file = NamedTempFile::new().unwrap();

    let config = ConfigLoader::load_from(file.path()).await.unwrap();
    assert_eq!(config.scenarios.len(), 3);
    assert_eq!(config.base_url, "https://ostrovok.ru");
}

#[test]
fn test_duplicate_scenario_names_are_rejected() {
    let result = ConfigLoader::parse(
        r#"
scenarios:
  - name: sochi
    destination: Сочи
  - name: sochi
    destination: Адлер
"#,
    );
    match result {
        Err(ConfigError::DuplicateScenario(name)) => assert_eq!(name, "sochi"),
        other => panic!("expected duplicate error, got {:?}", other),
    }
}

#[test]
fn test_unknown_scenario_kind_is_a_parse_error() {
    let result = ConfigLoader::parse("scenarios:\n  - name: x\n    kind: teleport\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
