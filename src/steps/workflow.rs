//! Whole workflow documents.
//!
//! An app file lists many steps. Each one is built independently, so a
//! malformed step only removes that step from the workflow.

use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;

use crate::config::RenderConfig;
use crate::error::{Result, StepError};
use crate::localization::Localizer;
use crate::steps::builder::{build_step_with, StepDescriptor};
use crate::steps::types::StepPayload;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub steps: Vec<StepPayload>,
}

impl WorkflowDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StepError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }
}

/// Build every step of the document, keeping document order.
pub fn build_all(
    document: &WorkflowDocument,
    localizer: &(dyn Localizer + Sync),
    config: &RenderConfig,
) -> Vec<Result<StepDescriptor>> {
    let results: Vec<Result<StepDescriptor>> = document
        .steps
        .par_iter()
        .map(|payload| build_step_with(payload, localizer, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        tracing::warn!("{} of {} steps could not be built", failed, results.len());
    } else {
        tracing::info!("Built {} steps", results.len());
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::IdentityLocalizer;

    const DOCUMENT: &str = r#"{
        "steps": [
            {"id": "intro", "type": "contentStack", "content": {"items": [{"type": "title", "id": "t", "title": "Hi"}]}},
            {"id": "broken", "type": "slideshow", "content": {}},
            {"id": "videos", "type": "grid", "content": {"items": [{"id": "v1", "text": "Video 1"}]}},
            {"id": "feed", "type": "networkGrid", "content": {"url": "https://example.com/feed"}}
        ]
    }"#;

    #[test]
    fn test_build_all_keeps_order_and_isolates_failures() {
        let doc = WorkflowDocument::from_json_str(DOCUMENT).unwrap();
        let results = build_all(&doc, &IdentityLocalizer, &RenderConfig::default());
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().id(), "intro");
        assert!(results[1].as_ref().unwrap_err().is_invalid_step_data());
        assert_eq!(results[2].as_ref().unwrap().id(), "videos");
        assert_eq!(results[3].as_ref().unwrap().id(), "feed");
    }

    #[test]
    fn test_empty_document() {
        let doc = WorkflowDocument::from_json_str("{}").unwrap();
        assert!(build_all(&doc, &IdentityLocalizer, &RenderConfig::default()).is_empty());
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = WorkflowDocument::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, StepError::Json(_)));
    }
}
