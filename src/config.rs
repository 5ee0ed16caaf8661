//! Render configuration.
//!
//! Loaded from a JSON file bundled with the app, with environment overrides:
//! - `STEP_RENDER_CONFIG`: path to the JSON config file
//! - `STEP_RENDER_DEFAULT_SECTION_TITLE`: title key for the implicit grid section

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StepError};

pub const CONFIG_PATH_ENV: &str = "STEP_RENDER_CONFIG";
pub const DEFAULT_SECTION_TITLE_ENV: &str = "STEP_RENDER_DEFAULT_SECTION_TITLE";

/// Title key used for the implicit section when a grid has no headers.
pub const DEFAULT_SECTION_TITLE: &str = "Items";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    pub grid: GridConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Localization key for the implicit section title.
    pub default_section_title: String,
    pub leading_items: LeadingItems,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_section_title: DEFAULT_SECTION_TITLE.to_string(),
            leading_items: LeadingItems::default(),
        }
    }
}

/// What happens to plain items that appear before the first section header.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LeadingItems {
    /// Dropped when the first header arrives.
    #[default]
    Discard,
    /// Kept in the buffer, so they end up in the first section.
    MergeIntoFirstSection,
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| StepError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StepError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Defaults, then the file named by `STEP_RENDER_CONFIG`, then single-value overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(title) = std::env::var(DEFAULT_SECTION_TITLE_ENV) {
            if !title.trim().is_empty() {
                config.grid.default_section_title = title;
            }
        }

        tracing::debug!("Render config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.grid.default_section_title, "Items");
        assert_eq!(config.grid.leading_items, LeadingItems::Discard);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = RenderConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_partial_grid_config() {
        let config = RenderConfig::from_json_str(
            r#"{"grid": {"leadingItems": "mergeIntoFirstSection"}}"#,
        )
        .unwrap();
        assert_eq!(config.grid.leading_items, LeadingItems::MergeIntoFirstSection);
        assert_eq!(config.grid.default_section_title, "Items");
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = RenderConfig::from_json_str(r#"{"grid": {"leadingItems": "keep"}}"#).unwrap_err();
        assert!(matches!(err, StepError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = RenderConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }
}
