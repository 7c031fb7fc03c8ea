use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use scout_engine::config::BrowserConfig;
use scout_engine::driver::DriverError;
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Browser settings used when opening a WebDriver session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub webdriver_url: String,
    pub headless: bool,
    pub window_size: (u32, u32),
    pub user_agent: Option<String>,
    pub page_load_timeout: Duration,
}

impl From<&BrowserConfig> for SessionOptions {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            window_size: (config.window_width, config.window_height),
            user_agent: config.user_agent.clone(),
            page_load_timeout: Duration::from_millis(config.page_load_timeout_ms),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&BrowserConfig::default())
    }
}

impl SessionOptions {
    /// W3C capabilities for Chrome and Firefox drivers.
    pub fn capabilities(&self) -> Map<String, Value> {
        let (width, height) = self.window_size;

        let mut chrome_args = vec![
            format!("--window-size={},{}", width, height),
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
        ];
        let mut firefox_args = vec![
            format!("--width={}", width),
            format!("--height={}", height),
        ];
        if self.headless {
            chrome_args.push("--headless=new".to_string());
            firefox_args.push("-headless".to_string());
        }
        if let Some(ua) = &self.user_agent {
            chrome_args.push(format!("--user-agent={}", ua));
        }

        let mut firefox = json!({ "args": firefox_args });
        if let Some(ua) = &self.user_agent {
            firefox["prefs"] = json!({ "general.useragent.override": ua });
        }

        let mut caps = Map::new();
        caps.insert("goog:chromeOptions".into(), json!({ "args": chrome_args }));
        caps.insert("moz:firefoxOptions".into(), firefox);
        caps
    }
}

pub struct WebDriverClient {
    pub client: Client,
}

impl WebDriverClient {
    pub async fn connect(options: &SessionOptions) -> Result<Self, DriverError> {
        let client = ClientBuilder::native()
            .capabilities(options.capabilities())
            .connect(&options.webdriver_url)
            .await
            .map_err(|e| {
                DriverError::Other(format!(
                    "Failed to connect to WebDriver at {}: {}",
                    options.webdriver_url, e
                ))
            })?;

        let timeouts = TimeoutConfiguration::new(None, Some(options.page_load_timeout), None);
        client
            .update_timeouts(timeouts)
            .await
            .map_err(|e| DriverError::Other(format!("Failed to set timeouts: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn close(self) -> Result<(), DriverError> {
        self.client
            .close()
            .await
            .map_err(|e| DriverError::Other(format!("Failed to close session: {}", e)))
    }
}
