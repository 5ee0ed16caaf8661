//! Step Render
//!
//! Content-rendering core for guided mobile workflows: declarative, localized
//! JSON step descriptions in, typed and sectioned render models out.
//!
//! - `steps/`: payload parsing, grid grouping, view model projection
//! - `localization`: the translation capability the builders consume
//! - `images`: generation-guarded async image loads for reusable view slots
//! - `config`: render configuration (file + environment)

pub mod config;
pub mod error;
pub mod images;
pub mod localization;
pub mod steps;

// Re-export commonly used types
pub use config::{LeadingItems, RenderConfig};
pub use error::{Result, StepError};
pub use localization::{IdentityLocalizer, Localizer, TableLocalizer};
pub use steps::{
    build_step, build_step_with, build_step_view, group_sections, ContentItem, GridItem,
    GridItemKind, GridSection, SectionKind, StepDescriptor, StepPayload, StepViewData,
};
