//! Remote grid resolution.
//!
//! A remote grid only knows its source URL at build time. The networking
//! layer implements [`RemoteGridSource`]; the fetched entries are then parsed
//! with exactly the rules used for local grids.

use std::future::Future;

use serde_json::Value;
use url::Url;

use crate::error::{Result, StepError};
use crate::localization::Localizer;
use crate::steps::builder::RemoteGridStep;
use crate::steps::grid::{group_sections_with, parse_grid_items, GridItem, GridSection};

/// Fetches the items array of a remote grid.
pub trait RemoteGridSource {
    fn fetch_items(&self, url: &Url) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

/// Accept either a bare items array or an object wrapping it in `items`.
pub fn items_from_response(response: Value) -> Result<Vec<Value>> {
    match response {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StepError::RemoteFetch("response object has no items array".to_string())),
        },
        other => Err(StepError::RemoteFetch(format!("unexpected response: {}", other))),
    }
}

impl RemoteGridStep {
    /// Fetch and parse the grid items. Without a source URL there is nothing
    /// to fetch and the grid is empty (the renderer shows `empty_text`).
    pub async fn load<S>(&self, source: &S, localizer: &dyn Localizer) -> Result<Vec<GridItem>>
    where
        S: RemoteGridSource,
    {
        let Some(url) = &self.source_url else {
            tracing::debug!("Remote grid '{}' has no source url", self.id);
            return Ok(Vec::new());
        };

        let entries = source.fetch_items(url).await?;
        tracing::debug!("Fetched {} items for remote grid '{}'", entries.len(), self.id);
        parse_grid_items(&self.id, &entries, localizer)
    }

    pub async fn load_sections<S>(&self, source: &S, localizer: &dyn Localizer) -> Result<Vec<GridSection>>
    where
        S: RemoteGridSource,
    {
        let items = self.load(source, localizer).await?;
        Ok(group_sections_with(&items, &self.grouping))
    }
}
