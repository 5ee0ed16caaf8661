//! Grid items and section grouping.
//!
//! A grid step is a flat list of items. Carousel items act as section
//! headers; plain items fill the section opened by the header before them.
//!
//! ## Grouping rules
//! 1. A header flushes the pending header (with its buffered items) and
//!    becomes the new pending header.
//! 2. A plain item is buffered.
//! 3. At the end the pending header is flushed with whatever is buffered.
//! 4. No header at all: buffered items go into one implicit default section.
//! 5. Items seen before the first header are discarded when that header
//!    arrives, unless [`LeadingItems::MergeIntoFirstSection`] is configured.

use serde::Serialize;
use serde_json::Value;
use typeshare::typeshare;

use crate::config::{GridConfig, LeadingItems, DEFAULT_SECTION_TITLE};
use crate::error::{Result, StepError};
use crate::localization::Localizer;
use crate::steps::items::warn_on_duplicate_ids;
use crate::steps::types::{get_id, get_str, JsonObject};

/// Id of the implicit section created for header-less grids.
pub const DEFAULT_SECTION_ID: &str = "DEFAULT_SECTION";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridItemKind {
    #[default]
    ItemSmall,
    CarouselSmall,
    CarouselLarge,
}

impl GridItemKind {
    /// Unknown or absent tags are plain items.
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("carouselSmall") => GridItemKind::CarouselSmall,
            Some("carouselLarge") => GridItemKind::CarouselLarge,
            _ => GridItemKind::ItemSmall,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            GridItemKind::ItemSmall => "item",
            GridItemKind::CarouselSmall => "carouselSmall",
            GridItemKind::CarouselLarge => "carouselLarge",
        }
    }

    /// `Some` when this kind opens a new section.
    pub fn section_kind(&self) -> Option<SectionKind> {
        match self {
            GridItemKind::ItemSmall => None,
            GridItemKind::CarouselSmall => Some(SectionKind::CarouselSmall),
            GridItemKind::CarouselLarge => Some(SectionKind::CarouselLarge),
        }
    }

    pub fn is_section_header(&self) -> bool {
        self.section_kind().is_some()
    }
}

#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    CarouselSmall,
    CarouselLarge,
}

impl SectionKind {
    pub fn is_large(&self) -> bool {
        matches!(self, SectionKind::CarouselLarge)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    pub id: String,
    pub kind: GridItemKind,
    pub text: String,
    pub detail_text: Option<String>,
    /// Raw string; resolved to a URL only when projected for display.
    pub image_url: Option<String>,
}

impl GridItem {
    pub fn new(id: &str, kind: GridItemKind, text: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            text: text.to_string(),
            detail_text: None,
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSection {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub items: Vec<GridItem>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse one grid item.
///
/// `Ok(None)` when the text is missing or cannot be localized (the item is
/// skipped). A missing id is a hard error: grid items are structural.
pub fn parse_grid_item(
    step_id: &str,
    json: &JsonObject,
    localizer: &dyn Localizer,
) -> Result<Option<GridItem>> {
    let Some(text) = localizer.translate_opt(get_str(json, "text")) else {
        tracing::debug!("Skipping grid item without displayable text in step '{}'", step_id);
        return Ok(None);
    };
    let detail_text = localizer.translate_opt(get_str(json, "detailText"));

    let id = get_id(json, "id")
        .ok_or_else(|| StepError::invalid(step_id, "Grid item has invalid id"))?;

    Ok(Some(GridItem {
        id,
        kind: GridItemKind::from_type_tag(get_str(json, "type")),
        text,
        detail_text,
        image_url: get_str(json, "imageURL").map(str::to_string),
    }))
}

/// Parse a grid `items` array, stopping at the first structural error.
pub fn parse_grid_items(
    step_id: &str,
    entries: &[Value],
    localizer: &dyn Localizer,
) -> Result<Vec<GridItem>> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(json) = entry.as_object() else {
            tracing::debug!("Skipping non-object grid item in step '{}'", step_id);
            continue;
        };
        if let Some(item) = parse_grid_item(step_id, json, localizer)? {
            items.push(item);
        }
    }
    warn_on_duplicate_ids(items.iter().map(|i| i.id.as_str()));
    Ok(items)
}

// ============================================================================
// Grouping
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GroupingOptions {
    /// Already-localized title of the implicit section.
    pub default_section_title: String,
    pub leading_items: LeadingItems,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            default_section_title: DEFAULT_SECTION_TITLE.to_string(),
            leading_items: LeadingItems::default(),
        }
    }
}

impl GroupingOptions {
    pub fn from_config(config: &GridConfig, localizer: &dyn Localizer) -> Self {
        let title_key = config.default_section_title.as_str();
        Self {
            default_section_title: localizer
                .translate(title_key)
                .unwrap_or_else(|| title_key.to_string()),
            leading_items: config.leading_items,
        }
    }
}

#[derive(Default)]
struct GroupingState {
    pending_header: Option<(SectionKind, GridItem)>,
    pending_items: Vec<GridItem>,
    sections: Vec<GridSection>,
}

impl GroupingState {
    fn push(mut self, item: &GridItem, options: &GroupingOptions) -> Self {
        let Some(kind) = item.kind.section_kind() else {
            self.pending_items.push(item.clone());
            return self;
        };

        match self.pending_header.take() {
            Some(header) => self.flush(header),
            None if options.leading_items == LeadingItems::Discard => {
                if !self.pending_items.is_empty() {
                    tracing::debug!(
                        "Discarding {} grid item(s) before first section header '{}'",
                        self.pending_items.len(),
                        item.id
                    );
                    self.pending_items.clear();
                }
            }
            None => {}
        }
        self.pending_header = Some((kind, item.clone()));
        self
    }

    fn flush(&mut self, (kind, header): (SectionKind, GridItem)) {
        self.sections.push(GridSection {
            id: header.id,
            kind,
            title: header.text,
            items: std::mem::take(&mut self.pending_items),
        });
    }

    fn finish(mut self, options: &GroupingOptions) -> Vec<GridSection> {
        if let Some(header) = self.pending_header.take() {
            self.flush(header);
        } else if !self.pending_items.is_empty() {
            self.sections.push(GridSection {
                id: DEFAULT_SECTION_ID.to_string(),
                kind: SectionKind::CarouselSmall,
                title: options.default_section_title.clone(),
                items: std::mem::take(&mut self.pending_items),
            });
        }
        self.sections
    }
}

/// Group items into sections with default options.
pub fn group_sections(items: &[GridItem]) -> Vec<GridSection> {
    group_sections_with(items, &GroupingOptions::default())
}

/// Group items into sections in a single left-to-right pass.
pub fn group_sections_with(items: &[GridItem], options: &GroupingOptions) -> Vec<GridSection> {
    items
        .iter()
        .fold(GroupingState::default(), |state, item| state.push(item, options))
        .finish(options)
}
