use crate::scenario::ScenarioKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            browser: BrowserConfig::default(),
            resolver: ResolverConfig::default(),
            scenarios: default_scenarios(),
        }
    }
}

impl ScoutConfig {
    pub fn scenario(&self, name: &str) -> Option<&ScenarioConfig> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.name.as_str())
    }
}

pub(crate) fn default_base_url() -> String {
    "https://ostrovok.ru".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,
    #[serde(default = "default_page_load_timeout_ms")]
    pub page_load_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            window_width: default_window_width(),
            window_height: default_window_height(),
            user_agent: default_user_agent(),
            page_load_timeout_ms: default_page_load_timeout_ms(),
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_user_agent() -> Option<String> {
    Some(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string(),
    )
}

fn default_page_load_timeout_ms() -> u64 {
    30000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: default_element_timeout_ms(),
            settle_timeout_ms: default_settle_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_element_timeout_ms() -> u64 {
    5000
}

fn default_settle_timeout_ms() -> u64 {
    3000
}

fn default_poll_interval_ms() -> u64 {
    250
}

/// One named scenario and the parameters it runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub kind: ScenarioKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    #[serde(default = "default_max_price")]
    pub max_price: u32,
    #[serde(default = "default_amenities")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_email: Option<String>,
}

impl ScenarioConfig {
    pub fn new(name: impl Into<String>, kind: ScenarioKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            destination: None,
            check_in: None,
            check_out: None,
            guests: default_guests(),
            rooms: default_rooms(),
            max_price: default_max_price(),
            amenities: default_amenities(),
            guest_name: None,
            guest_email: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_dates(mut self, check_in: impl Into<String>, check_out: impl Into<String>) -> Self {
        self.check_in = Some(check_in.into());
        self.check_out = Some(check_out.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn default_guests() -> u32 {
    2
}

fn default_rooms() -> u32 {
    1
}

fn default_max_price() -> u32 {
    5000
}

pub(crate) fn default_amenities() -> Vec<String> {
    vec!["wi-fi".to_string(), "wifi".to_string()]
}

fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig::new("sochi_winter", ScenarioKind::HotelSearch)
            .with_destination("Сочи")
            .with_dates("2024-12-20", "2024-12-27")
            .with_description("Поиск отелей в Сочи на зимний сезон"),
        ScenarioConfig::new("andorra", ScenarioKind::HotelSearch)
            .with_destination("Андорра")
            .with_dates("2024-12-25", "2025-01-02")
            .with_description("Поиск отелей в Андорре для горнолыжного отдыха"),
        ScenarioConfig::new("full_analysis", ScenarioKind::FullJourney)
            .with_destination("Сочи")
            .with_dates("2024-12-20", "2024-12-27")
            .with_description("Полный анализ всех функций сайта"),
    ]
}
