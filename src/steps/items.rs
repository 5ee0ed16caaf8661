//! Stacked content items (title, text, list item).
//!
//! Each JSON entry in a content stack's `items` array becomes one
//! [`ContentItem`]. Parsing is tolerant: entries that do not match a known
//! type, or that lack an id, are dropped without failing the step.

use rustc_hash::FxHashSet;
use serde_json::Value;
use url::Url;

use crate::localization::Localizer;
use crate::steps::types::{get_str, get_url, JsonObject};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Title(TitleItem),
    Text(TextItem),
    ListItem(ListItem),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleItem {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub id: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub id: String,
    pub title: Option<String>,
    pub detail_text: Option<String>,
    pub image_url: Option<Url>,
}

impl ContentItem {
    pub fn id(&self) -> &str {
        match self {
            ContentItem::Title(item) => &item.id,
            ContentItem::Text(item) => &item.id,
            ContentItem::ListItem(item) => &item.id,
        }
    }

    /// The `type` tag this variant is parsed from.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ContentItem::Title(_) => TITLE_TAG,
            ContentItem::Text(_) => TEXT_TAG,
            ContentItem::ListItem(_) => LIST_ITEM_TAG,
        }
    }
}

pub const TITLE_TAG: &str = "title";
pub const TEXT_TAG: &str = "text";
pub const LIST_ITEM_TAG: &str = "listItem";

type ItemParser = fn(&JsonObject, &dyn Localizer) -> Option<ContentItem>;

/// Tried in order; the first parser that accepts the entry wins.
const ITEM_PARSERS: [ItemParser; 3] = [parse_title, parse_text, parse_list_item];

/// Parse one JSON object into a content item.
pub fn parse_item(json: &JsonObject, localizer: &dyn Localizer) -> Option<ContentItem> {
    ITEM_PARSERS.iter().find_map(|parse| parse(json, localizer))
}

/// Parse a whole `items` array. Entries that fail to parse are omitted and
/// the order of the rest is preserved.
pub fn parse_items(entries: &[Value], localizer: &dyn Localizer) -> Vec<ContentItem> {
    let items: Vec<ContentItem> = entries
        .iter()
        .filter_map(|entry| match entry.as_object() {
            Some(json) => parse_item(json, localizer),
            None => {
                tracing::debug!("Skipping non-object content item: {}", entry);
                None
            }
        })
        .collect();

    if items.len() < entries.len() {
        tracing::debug!("Parsed {} of {} content items", items.len(), entries.len());
    }
    warn_on_duplicate_ids(items.iter().map(ContentItem::id));
    items
}

/// Ids should be unique within a collection; duplicates are kept but reported.
pub(crate) fn warn_on_duplicate_ids<'a>(ids: impl Iterator<Item = &'a str>) {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!("Duplicate item id '{}'", id);
        }
    }
}

// ============================================================================
// Variant parsers
// ============================================================================

/// Check the `type` discriminant, then the mandatory id.
fn matching_id(json: &JsonObject, tag: &str) -> Option<String> {
    if get_str(json, "type") != Some(tag) {
        return None;
    }
    let id = json.get("id").and_then(|v| v.as_str()).filter(|s| !s.is_empty());
    match id {
        Some(id) => Some(id.to_string()),
        None => {
            tracing::warn!("Missing id in '{}' item, dropping it", tag);
            None
        }
    }
}

fn parse_title(json: &JsonObject, localizer: &dyn Localizer) -> Option<ContentItem> {
    let id = matching_id(json, TITLE_TAG)?;
    Some(ContentItem::Title(TitleItem {
        id,
        title: localizer.translate_opt(get_str(json, "title")),
    }))
}

fn parse_text(json: &JsonObject, localizer: &dyn Localizer) -> Option<ContentItem> {
    let id = matching_id(json, TEXT_TAG)?;
    Some(ContentItem::Text(TextItem {
        id,
        text: localizer.translate_opt(get_str(json, "text")),
    }))
}

fn parse_list_item(json: &JsonObject, localizer: &dyn Localizer) -> Option<ContentItem> {
    let id = matching_id(json, LIST_ITEM_TAG)?;
    Some(ContentItem::ListItem(ListItem {
        id,
        title: localizer.translate_opt(get_str(json, "text")),
        detail_text: localizer.translate_opt(get_str(json, "detailText")),
        image_url: get_url(json, "imageURL"),
    }))
}
