// SPDX-License-Identifier: MPL-2.0
//! Pure grid layout model.
//!
//! A [`Grid`] is what one render pass produces: items distributed
//! round-robin across a fixed number of columns, plus a record of items
//! that were skipped with their per-item error. Any UI layer can walk the
//! columns and draw the items; nothing here depends on a toolkit.
//!
//! Item at position `i` of the truncated listing lands in column
//! `i % columns`. A skipped item still consumes its position, so the
//! surviving siblings keep their columns.

use crate::error::ServiceError;
use crate::service::Payload;
use std::sync::Arc;

/// What a grid cell displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    /// An absolute reference rendered directly, without retrieval.
    Remote(String),

    /// A payload fetched through the retrieval cache.
    Fetched(Arc<Payload>),
}

/// One rendered grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    /// The item identifier from the listing.
    pub id: String,

    pub content: ItemContent,

    /// Equals the identifier when captions are enabled, `None` otherwise.
    pub caption: Option<String>,
}

/// An item dropped from the grid, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    pub id: String,
    pub reason: ServiceError,
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    columns: Vec<Vec<GridItem>>,
    image_width: u32,
    skipped: Vec<SkippedItem>,
    cursor: usize,
}

impl Grid {
    /// Creates an empty grid with `columns` columns (at least one).
    #[must_use]
    pub fn with_columns(columns: usize, image_width: u32) -> Self {
        Self {
            columns: vec![Vec::new(); columns.max(1)],
            image_width,
            skipped: Vec::new(),
            cursor: 0,
        }
    }

    /// Places the next item into its round-robin column.
    pub fn push(&mut self, item: GridItem) {
        let column = self.cursor % self.columns.len();
        self.columns[column].push(item);
        self.cursor += 1;
    }

    /// Records a skipped item. Its position is consumed so siblings keep
    /// their columns.
    pub fn skip(&mut self, id: String, reason: ServiceError) {
        self.skipped.push(SkippedItem { id, reason });
        self.cursor += 1;
    }

    /// The grid columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Vec<GridItem>] {
        &self.columns
    }

    /// Items that failed to render during this pass.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// Rendered image width in pixels.
    #[must_use]
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Number of successfully rendered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}

/// Checks whether an identifier is an absolute reference that is rendered
/// directly instead of going through the retrieval cache.
#[must_use]
pub fn is_remote(id: &str) -> bool {
    id.starts_with("http://") || id.starts_with("https://")
}
