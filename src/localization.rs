//! Localization capability consumed by the step builders.
//!
//! The real translation service lives outside this crate. Builders only need
//! `translate(string?) -> string?`, so anything implementing [`Localizer`]
//! works: a string table, the identity localizer, or a plain closure.

use std::collections::HashMap;

use crate::error::{Result, StepError};

pub trait Localizer {
    /// Translate a single key. `None` means the text cannot be shown.
    fn translate(&self, text: &str) -> Option<String>;

    /// Translate an optional key, keeping `None` as `None`.
    fn translate_opt(&self, text: Option<&str>) -> Option<String> {
        text.and_then(|t| self.translate(t))
    }
}

impl<F> Localizer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// Returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn translate(&self, text: &str) -> Option<String> {
        Some(text.to_string())
    }
}

/// Key/value string table, e.g. one language file of the app bundle.
///
/// Unknown keys fall back to the key itself, the same way platform string
/// catalogs behave, unless `strict` is set.
#[derive(Debug, Clone, Default)]
pub struct TableLocalizer {
    table: HashMap<String, String>,
    strict: bool,
}

impl TableLocalizer {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table, strict: false }
    }

    /// Unknown keys translate to `None` instead of the key.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Load a flat `{"key": "value"}` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| StepError::Config(format!("invalid string table: {}", e)))?;
        Ok(Self::new(table))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Localizer for TableLocalizer {
    fn translate(&self, text: &str) -> Option<String> {
        match self.table.get(text) {
            Some(value) => Some(value.clone()),
            None if self.strict => None,
            None => Some(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> TableLocalizer {
        TableLocalizer::from_json_str(r#"{"welcome": "Bienvenido", "next": "Siguiente"}"#)
            .expect("valid table")
    }

    #[test]
    fn test_identity_keeps_text() {
        assert_eq!(IdentityLocalizer.translate("Hello"), Some("Hello".to_string()));
        assert_eq!(IdentityLocalizer.translate_opt(None), None);
    }

    #[test]
    fn test_table_translates_known_keys() {
        let loc = spanish();
        assert_eq!(loc.len(), 2);
        assert_eq!(loc.translate("welcome").as_deref(), Some("Bienvenido"));
    }

    #[test]
    fn test_table_falls_back_to_key() {
        let loc = spanish();
        assert_eq!(loc.translate("missing").as_deref(), Some("missing"));
    }

    #[test]
    fn test_strict_table_rejects_unknown_keys() {
        let loc = spanish().strict();
        assert_eq!(loc.translate("missing"), None);
        assert_eq!(loc.translate_opt(Some("next")).as_deref(), Some("Siguiente"));
    }

    #[test]
    fn test_closure_localizer() {
        let upper = |s: &str| Some(s.to_uppercase());
        assert_eq!(upper.translate("grid").as_deref(), Some("GRID"));
    }

    #[test]
    fn test_invalid_table_is_config_error() {
        let err = TableLocalizer::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, StepError::Config(_)), "Should be a config error");
    }
}
