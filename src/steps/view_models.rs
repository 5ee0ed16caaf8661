//! View Models for the rendering layer
//!
//! Minimal, serializable records handed to the native views.
//! These are shared with the mobile side via Typeshare.

use serde::Serialize;
use typeshare::typeshare;
use url::Url;

use crate::steps::builder::{ContentStackStep, LocalGridStep, RemoteGridStep, StepDescriptor};
use crate::steps::grid::{GridItem, GridSection, SectionKind};
use crate::steps::items::ContentItem;
use crate::steps::types::parse_url;

// ============================================================================
// Grid
// ============================================================================

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionViewData {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<ItemViewData>,
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemViewData {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: Option<Url>,
}

impl SectionViewData {
    pub fn is_large(&self) -> bool {
        self.kind.is_large()
    }
}

impl From<&GridItem> for ItemViewData {
    fn from(item: &GridItem) -> Self {
        ItemViewData {
            id: item.id.clone(),
            title: item.text.clone(),
            subtitle: item.detail_text.clone(),
            image_url: item.image_url.as_deref().and_then(parse_url),
        }
    }
}

impl From<&GridSection> for SectionViewData {
    fn from(section: &GridSection) -> Self {
        SectionViewData {
            id: section.id.clone(),
            kind: section.kind,
            title: section.title.clone(),
            items: section.items.iter().map(ItemViewData::from).collect(),
        }
    }
}

pub fn build_section_views(sections: &[GridSection]) -> Vec<SectionViewData> {
    sections.iter().map(SectionViewData::from).collect()
}

// ============================================================================
// Stacked content
// ============================================================================

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum ContentViewData {
    Title(TitleViewData),
    Text(TextViewData),
    ListItem(ListItemViewData),
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleViewData {
    pub id: String,
    pub title: Option<String>,
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextViewData {
    pub id: String,
    pub text: Option<String>,
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemViewData {
    pub id: String,
    pub title: Option<String>,
    pub detail_text: Option<String>,
    pub image_url: Option<Url>,
}

impl From<&ContentItem> for ContentViewData {
    fn from(item: &ContentItem) -> Self {
        match item {
            ContentItem::Title(t) => ContentViewData::Title(TitleViewData {
                id: t.id.clone(),
                title: t.title.clone(),
            }),
            ContentItem::Text(t) => ContentViewData::Text(TextViewData {
                id: t.id.clone(),
                text: t.text.clone(),
            }),
            ContentItem::ListItem(li) => ContentViewData::ListItem(ListItemViewData {
                id: li.id.clone(),
                title: li.title.clone(),
                detail_text: li.detail_text.clone(),
                image_url: li.image_url.clone(),
            }),
        }
    }
}

impl ContentViewData {
    pub fn id(&self) -> &str {
        match self {
            ContentViewData::Title(v) => &v.id,
            ContentViewData::Text(v) => &v.id,
            ContentViewData::ListItem(v) => &v.id,
        }
    }
}

// ============================================================================
// Whole step
// ============================================================================

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum StepViewData {
    Grid(GridViewData),
    RemoteGrid(RemoteGridViewData),
    ContentStack(ContentStackViewData),
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridViewData {
    pub step_id: String,
    pub secondary_workflow_ids: Vec<String>,
    pub sections: Vec<SectionViewData>,
}

/// Placeholder until the networking layer delivers items.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteGridViewData {
    pub step_id: String,
    pub secondary_workflow_ids: Vec<String>,
    pub empty_text: Option<String>,
    pub source_url: Option<Url>,
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStackViewData {
    pub step_id: String,
    pub title: Option<String>,
    pub header_image_url: Option<Url>,
    pub items: Vec<ContentViewData>,
}

impl From<&LocalGridStep> for GridViewData {
    fn from(step: &LocalGridStep) -> Self {
        GridViewData {
            step_id: step.id.clone(),
            secondary_workflow_ids: step.secondary_workflow_ids.clone(),
            sections: build_section_views(&step.sections()),
        }
    }
}

impl From<&RemoteGridStep> for RemoteGridViewData {
    fn from(step: &RemoteGridStep) -> Self {
        RemoteGridViewData {
            step_id: step.id.clone(),
            secondary_workflow_ids: step.secondary_workflow_ids.clone(),
            empty_text: step.empty_text.clone(),
            source_url: step.source_url.clone(),
        }
    }
}

impl From<&ContentStackStep> for ContentStackViewData {
    fn from(step: &ContentStackStep) -> Self {
        ContentStackViewData {
            step_id: step.id.clone(),
            title: step.title.clone(),
            header_image_url: step.header_image_url.clone(),
            items: step.items.iter().map(ContentViewData::from).collect(),
        }
    }
}

/// Project a built step into its view data.
pub fn build_step_view(step: &StepDescriptor) -> StepViewData {
    match step {
        StepDescriptor::LocalGrid(s) => StepViewData::Grid(s.into()),
        StepDescriptor::RemoteGrid(s) => StepViewData::RemoteGrid(s.into()),
        StepDescriptor::ContentStack(s) => StepViewData::ContentStack(s.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::grid::GridItemKind;
    use crate::steps::items::{ListItem, TextItem, TitleItem};
    use serde_json::json;

    fn grid_item(id: &str, image: Option<&str>) -> GridItem {
        GridItem {
            id: id.to_string(),
            kind: GridItemKind::ItemSmall,
            text: format!("{} text", id),
            detail_text: Some("detail".to_string()),
            image_url: image.map(str::to_string),
        }
    }

    #[test]
    fn test_item_projection() {
        let view = ItemViewData::from(&grid_item("a", Some("https://example.com/a.png")));
        assert_eq!(view.title, "a text");
        assert_eq!(view.subtitle.as_deref(), Some("detail"));
        assert_eq!(view.image_url.unwrap().as_str(), "https://example.com/a.png");
    }

    #[test]
    fn test_malformed_and_empty_image_urls_project_to_none() {
        assert!(ItemViewData::from(&grid_item("a", Some("not a url"))).image_url.is_none());
        assert!(ItemViewData::from(&grid_item("b", Some(""))).image_url.is_none());
        assert!(ItemViewData::from(&grid_item("c", None)).image_url.is_none());
    }

    #[test]
    fn test_section_projection_preserves_order_and_count() {
        let section = GridSection {
            id: "s".to_string(),
            kind: SectionKind::CarouselLarge,
            title: "Section".to_string(),
            items: vec![grid_item("x", None), grid_item("y", None), grid_item("z", None)],
        };
        let view = SectionViewData::from(&section);
        assert!(view.is_large());
        assert_eq!(view.items.len(), section.items.len());
        let ids: Vec<&str> = view.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_content_projection_is_one_to_one() {
        let items = vec![
            ContentItem::Title(TitleItem { id: "t".into(), title: Some("T".into()) }),
            ContentItem::Text(TextItem { id: "x".into(), text: None }),
            ContentItem::ListItem(ListItem {
                id: "l".into(),
                title: Some("L".into()),
                detail_text: None,
                image_url: None,
            }),
        ];
        let views: Vec<ContentViewData> = items.iter().map(ContentViewData::from).collect();
        assert!(matches!(views[0], ContentViewData::Title(_)));
        assert!(matches!(views[1], ContentViewData::Text(_)));
        assert!(matches!(views[2], ContentViewData::ListItem(_)));
        assert_eq!(views.iter().map(|v| v.id()).collect::<Vec<_>>(), vec!["t", "x", "l"]);
    }

    #[test]
    fn test_serialized_shape() {
        let view = ContentViewData::ListItem(ListItemViewData {
            id: "l".into(),
            title: Some("Row".into()),
            detail_text: Some("More".into()),
            image_url: Url::parse("https://example.com/i.png").ok(),
        });
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "listItem",
                "content": {
                    "id": "l",
                    "title": "Row",
                    "detailText": "More",
                    "imageUrl": "https://example.com/i.png"
                }
            })
        );

        let kind = serde_json::to_value(SectionKind::CarouselSmall).unwrap();
        assert_eq!(kind, json!("carouselSmall"));
    }
}
