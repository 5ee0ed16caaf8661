//! Step descriptor construction.
//!
//! Entry point for turning a [`StepPayload`] into a typed [`StepDescriptor`].
//! Step-level defects (unknown type, grid item without id) fail the whole
//! step; item-level defects only drop the item.

use url::Url;

use crate::config::RenderConfig;
use crate::error::{Result, StepError};
use crate::localization::Localizer;
use crate::steps::grid::{group_sections_with, parse_grid_items, GridItem, GridSection, GroupingOptions};
use crate::steps::items::{parse_items, ContentItem};
use crate::steps::types::{get_str, get_url, parse_url, workflow_ids, StepPayload, StepType};

#[derive(Debug, Clone, PartialEq)]
pub enum StepDescriptor {
    LocalGrid(LocalGridStep),
    RemoteGrid(RemoteGridStep),
    ContentStack(ContentStackStep),
}

/// Grid whose items come from the step payload itself.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalGridStep {
    pub id: String,
    pub secondary_workflow_ids: Vec<String>,
    pub items: Vec<GridItem>,
    pub grouping: GroupingOptions,
}

/// Grid whose items are fetched later from `source_url`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteGridStep {
    pub id: String,
    pub secondary_workflow_ids: Vec<String>,
    pub empty_text: Option<String>,
    pub source_url: Option<Url>,
    pub grouping: GroupingOptions,
}

/// Vertically stacked title/text/list content under an optional header image.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStackStep {
    pub id: String,
    pub title: Option<String>,
    pub header_image_url: Option<Url>,
    pub items: Vec<ContentItem>,
}

impl StepDescriptor {
    pub fn id(&self) -> &str {
        match self {
            StepDescriptor::LocalGrid(step) => &step.id,
            StepDescriptor::RemoteGrid(step) => &step.id,
            StepDescriptor::ContentStack(step) => &step.id,
        }
    }

    pub fn step_type(&self) -> StepType {
        match self {
            StepDescriptor::LocalGrid(_) => StepType::LocalGrid,
            StepDescriptor::RemoteGrid(_) => StepType::RemoteGrid,
            StepDescriptor::ContentStack(_) => StepType::ContentStack,
        }
    }

    /// Workflows reachable from this step. Always empty for content stacks.
    pub fn secondary_workflow_ids(&self) -> &[String] {
        match self {
            StepDescriptor::LocalGrid(step) => &step.secondary_workflow_ids,
            StepDescriptor::RemoteGrid(step) => &step.secondary_workflow_ids,
            StepDescriptor::ContentStack(_) => &[],
        }
    }
}

impl LocalGridStep {
    /// Recomputed on every call; cheap and pure.
    pub fn sections(&self) -> Vec<GridSection> {
        group_sections_with(&self.items, &self.grouping)
    }
}

/// Build a step with the default render configuration.
pub fn build_step(payload: &StepPayload, localizer: &dyn Localizer) -> Result<StepDescriptor> {
    build_step_with(payload, localizer, &RenderConfig::default())
}

/// Build a step descriptor from its payload.
pub fn build_step_with(
    payload: &StepPayload,
    localizer: &dyn Localizer,
    config: &RenderConfig,
) -> Result<StepDescriptor> {
    let step_type = payload
        .step_type
        .as_deref()
        .and_then(StepType::from_type_name)
        .ok_or_else(|| {
            StepError::invalid(
                &payload.id,
                match payload.step_type.as_deref() {
                    Some(name) => format!("Unsupported step type '{}'", name),
                    None => "Missing step type".to_string(),
                },
            )
        })?;

    tracing::debug!("Building {} step '{}'", step_type.type_name(), payload.id);

    let descriptor = match step_type {
        StepType::LocalGrid => StepDescriptor::LocalGrid(build_local_grid(payload, localizer, config)?),
        StepType::RemoteGrid => StepDescriptor::RemoteGrid(build_remote_grid(payload, localizer, config)),
        StepType::ContentStack => StepDescriptor::ContentStack(build_content_stack(payload, localizer)),
    };
    Ok(descriptor)
}

fn build_local_grid(
    payload: &StepPayload,
    localizer: &dyn Localizer,
    config: &RenderConfig,
) -> Result<LocalGridStep> {
    let entries = payload
        .content
        .get("items")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    Ok(LocalGridStep {
        id: payload.id.clone(),
        secondary_workflow_ids: workflow_ids(&payload.content),
        items: parse_grid_items(&payload.id, entries, localizer)?,
        grouping: GroupingOptions::from_config(&config.grid, localizer),
    })
}

fn build_remote_grid(payload: &StepPayload, localizer: &dyn Localizer, config: &RenderConfig) -> RemoteGridStep {
    let raw_url = get_str(&payload.content, "url");
    let source_url = raw_url.and_then(parse_url);
    if let (Some(raw), None) = (raw_url, &source_url) {
        tracing::warn!("Remote grid '{}' has a malformed url '{}'", payload.id, raw);
    }

    RemoteGridStep {
        id: payload.id.clone(),
        secondary_workflow_ids: workflow_ids(&payload.content),
        empty_text: localizer.translate_opt(get_str(&payload.content, "emptyText")),
        source_url,
        grouping: GroupingOptions::from_config(&config.grid, localizer),
    }
}

fn build_content_stack(payload: &StepPayload, localizer: &dyn Localizer) -> ContentStackStep {
    let entries = payload
        .content
        .get("items")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    ContentStackStep {
        id: payload.id.clone(),
        title: localizer.translate_opt(payload.title.as_deref()),
        header_image_url: get_url(&payload.content, "imageURL"),
        items: parse_items(entries, localizer),
    }
}
