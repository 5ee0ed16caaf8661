//! Step Rendering Module
//!
//! Turns declarative step descriptions into typed render models.
//!
//! ## Pipeline
//! 1. Builder - payload -> `StepDescriptor` (local grid, remote grid, content stack)
//! 2. Items - content stack entries -> `ContentItem`s
//! 3. Grid - grid entries -> `GridItem`s, grouped into `GridSection`s
//! 4. Remote - deferred grid items fetched through a `RemoteGridSource`
//! 5. View models - sections and items -> serializable view records

pub mod types;
pub mod items;
pub mod grid;
pub mod builder;
pub mod remote;
pub mod view_models;
pub mod workflow;

pub use builder::{build_step, build_step_with, ContentStackStep, LocalGridStep, RemoteGridStep, StepDescriptor};
pub use grid::{group_sections, group_sections_with, GridItem, GridItemKind, GridSection, GroupingOptions, SectionKind, DEFAULT_SECTION_ID};
pub use items::{parse_item, parse_items, ContentItem, ListItem, TextItem, TitleItem};
pub use remote::{items_from_response, RemoteGridSource};
pub use types::{StepPayload, StepType};
pub use view_models::{build_section_views, build_step_view, ContentViewData, ItemViewData, SectionViewData, StepViewData};
pub use workflow::{build_all, WorkflowDocument};
