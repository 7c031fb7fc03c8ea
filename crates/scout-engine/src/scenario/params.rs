use crate::config::schema::{ScenarioConfig, default_amenities};
use crate::pipeline::StepError;

/// Named inputs the built-in steps read.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioParams {
    pub base_url: String,
    pub destination: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub guests: u32,
    pub rooms: u32,
    pub max_price: u32,
    /// Lowercase keywords an amenity filter label must contain.
    pub amenities: Vec<String>,
    pub guest_name: String,
    pub guest_email: String,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            base_url: crate::config::schema::default_base_url(),
            destination: None,
            check_in: None,
            check_out: None,
            guests: 2,
            rooms: 1,
            max_price: 5000,
            amenities: default_amenities(),
            guest_name: "Тест Тестов".to_string(),
            guest_email: "test@example.com".to_string(),
        }
    }
}

impl ScenarioParams {
    pub fn from_config(base_url: &str, entry: &ScenarioConfig) -> Self {
        let defaults = Self::default();
        Self {
            base_url: base_url.to_string(),
            destination: entry.destination.clone(),
            check_in: entry.check_in.clone(),
            check_out: entry.check_out.clone(),
            guests: entry.guests,
            rooms: entry.rooms,
            max_price: entry.max_price,
            amenities: entry
                .amenities
                .iter()
                .map(|a| a.to_lowercase())
                .collect(),
            guest_name: entry.guest_name.clone().unwrap_or(defaults.guest_name),
            guest_email: entry.guest_email.clone().unwrap_or(defaults.guest_email),
        }
    }

    pub fn destination(&self) -> Result<&str, StepError> {
        self.destination
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(StepError::MissingParameter("destination"))
    }

    pub fn dates(&self) -> Result<(&str, &str), StepError> {
        let check_in = self
            .check_in
            .as_deref()
            .ok_or(StepError::MissingParameter("check_in"))?;
        let check_out = self
            .check_out
            .as_deref()
            .ok_or(StepError::MissingParameter("check_out"))?;
        Ok((check_in, check_out))
    }
}
