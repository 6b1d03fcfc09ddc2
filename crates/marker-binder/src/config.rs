//! JSON configuration for the binder.

use std::collections::HashSet;

use marker_binder_core::ProxyTemplate;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("duplicate proxy template name '{0}'")]
    DuplicateTemplate(String),
}

/// Binder configuration: the ordered list of spawnable proxy templates.
///
/// An empty list is valid and yields an inert binder with no proxies.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BinderConfig {
    #[serde(default)]
    pub templates: Vec<ProxyTemplate>,
}

impl BinderConfig {
    pub fn new(templates: Vec<ProxyTemplate>) -> Self {
        Self { templates }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Template names key the proxy registry, so they must be unique; a
    /// duplicate is rejected here instead of silently overwriting an entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.templates.len());
        for template in &self.templates {
            if !seen.insert(template.name.as_str()) {
                return Err(ConfigError::DuplicateTemplate(template.name.clone()));
            }
        }
        Ok(())
    }
}
