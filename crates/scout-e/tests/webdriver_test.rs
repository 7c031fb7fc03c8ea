//! WebDriver session integration tests
//!
//! These tests need a running chromedriver (default http://localhost:4444,
//! override with SCOUT_WEBDRIVER_URL). They share one driver, so they run
//! sequentially via `#[serial]`.

use scout_e::driver::WebDriverSession;
use scout_e::webdriver::SessionOptions;
use scout_engine::driver::Driver;
use scout_engine::pipeline::{ScenarioPipeline, StepDef};
use scout_engine::protocol::{Locator, Scope};
use scout_engine::scenario::builtin::navigate::Navigate;
use scout_engine::scenario::{Scenario, ScenarioParams};
use serial_test::serial;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn session() -> WebDriverSession {
    let webdriver_url = std::env::var("SCOUT_WEBDRIVER_URL")
        .unwrap_or_else(|_| "http://localhost:4444".to_string());
    WebDriverSession::new(SessionOptions {
        webdriver_url,
        headless: true,
        ..SessionOptions::default()
    })
}

#[tokio::test]
#[serial]
#[ignore] // Requires a running chromedriver
async fn test_session_lifecycle() {
    init_tracing();
    let mut driver = session();
    assert!(!driver.is_ready().await);

    driver.launch().await.expect("Failed to launch session");
    assert!(driver.is_ready().await);

    let nav = driver
        .navigate("https://example.com")
        .await
        .expect("Navigation failed");
    assert!(nav.url.contains("example.com"));
    assert!(nav.title.contains("Example"));

    driver.close().await.expect("Close failed");
    assert!(!driver.is_ready().await);
}

#[tokio::test]
#[serial]
#[ignore] // Requires a running chromedriver
async fn test_same_node_yields_same_handle() {
    init_tracing();
    let mut driver = session();
    driver.launch().await.expect("Failed to launch session");
    driver.navigate("https://example.com").await.unwrap();

    let by_css = driver
        .find_elements(&Locator::css("h1"), &Scope::Document)
        .await
        .unwrap();
    let by_xpath = driver
        .find_elements(&Locator::xpath("//h1"), &Scope::Document)
        .await
        .unwrap();
    assert_eq!(by_css.len(), 1);
    assert_eq!(by_css, by_xpath);

    let text = driver.text(by_css[0]).await.unwrap();
    assert!(text.contains("Example Domain"));

    let missing = driver
        .find_elements(&Locator::css(".hotel-card"), &Scope::Document)
        .await
        .unwrap();
    assert!(missing.is_empty());

    driver.close().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore] // Requires a running chromedriver
async fn test_pipeline_navigates_with_live_session() {
    init_tracing();
    let mut driver = session();
    driver.launch().await.expect("Failed to launch session");

    let params = ScenarioParams {
        base_url: "https://example.com".to_string(),
        ..ScenarioParams::default()
    };
    let scenario = Scenario::new("smoke", params).step(StepDef::gate(Navigate));

    let mut pipeline = ScenarioPipeline::new(driver);
    let result = pipeline.run(&scenario).await;
    assert_eq!(result.success_count(), 1);
    assert!(!result.is_halted());

    pipeline.into_driver().close().await.unwrap();
}
