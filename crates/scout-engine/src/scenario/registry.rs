use super::{Scenario, ScenarioError, ScenarioParams};
use crate::config::schema::{ScenarioConfig, ScoutConfig};

/// Configured scenarios, turned into runnable [`Scenario`]s on demand.
pub struct ScenarioRegistry {
    base_url: String,
    entries: Vec<ScenarioConfig>,
}

impl ScenarioRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: Vec::new(),
        }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            entries: config.scenarios.clone(),
        }
    }

    /// Add an entry, replacing any entry with the same name.
    pub fn register(&mut self, entry: ScenarioConfig) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[ScenarioConfig] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioConfig> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn build(&self, name: &str) -> Result<Scenario, ScenarioError> {
        let entry = self
            .get(name)
            .ok_or_else(|| ScenarioError::Unknown(name.to_string()))?;
        validate(entry)?;

        let params = ScenarioParams::from_config(&self.base_url, entry);
        let scenario = Scenario::from_kind(&entry.name, entry.kind, params);
        Ok(match &entry.description {
            Some(description) => scenario.with_description(description),
            None => scenario,
        })
    }

    /// Build every named scenario, failing before any is returned if one is invalid.
    pub fn build_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Scenario>, ScenarioError> {
        names.iter().map(|n| self.build(n.as_ref())).collect()
    }
}

fn validate(entry: &ScenarioConfig) -> Result<(), ScenarioError> {
    if !entry.kind.searches() {
        return Ok(());
    }

    let missing = |parameter| ScenarioError::MissingParameter {
        scenario: entry.name.clone(),
        parameter,
    };
    if entry.destination.as_deref().is_none_or(|d| d.trim().is_empty()) {
        return Err(missing("destination"));
    }
    if entry.check_in.is_none() {
        return Err(missing("check_in"));
    }
    if entry.check_out.is_none() {
        return Err(missing("check_out"));
    }
    Ok(())
}
