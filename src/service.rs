// SPDX-License-Identifier: MPL-2.0
//! Data model and collaborator port for the external media service.
//!
//! The media-listing/retrieval service is an out-of-scope collaborator;
//! only its contract lives here. The [`MediaService`] trait exposes the
//! four operations the browsing core needs: the source registry, a
//! filtered/sorted listing, single-item retrieval, and path resolution.
//!
//! Calls block until the service answers. Failures propagate to the
//! caller uncaught at this layer.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Source-specific configuration, immutable once loaded.
///
/// The registry as a whole may be reloaded wholesale (recycle) to pick up
/// external configuration changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Where the source's items live (directory, bucket, or feed URL).
    pub location: String,

    /// Kind of source, e.g. `local` or `s3`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// Opaque credentials reference for non-local sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// Snapshot of the configured media sources, keyed by name.
///
/// A `BTreeMap` keeps iteration deterministic, so "select the first
/// source" is stable across recycles.
pub type SourceRegistry = BTreeMap<String, SourceConfig>;

/// Parameters of one listing request. Also the listing cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub source: String,
    pub filter: Option<String>,
    pub sort: bool,
    pub sort_by_date: bool,
    pub ascending: bool,
}

/// Result of a listing request: ordered item identifiers plus the filter
/// string the service actually applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<String>,
    pub effective_filter: String,
}

impl Listing {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Retrieval cache key: one item within one source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaKey {
    pub source: String,
    pub item: String,
}

impl MediaKey {
    #[must_use]
    pub fn new(source: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
        }
    }
}

/// A single retrieved media item, either raw bytes or their base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Base64(String),
}

impl Payload {
    /// Wraps raw bytes, base64-encoding them when `encode` is set.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, encode: bool) -> Self {
        if encode {
            Payload::Base64(STANDARD.encode(&bytes))
        } else {
            Payload::Bytes(bytes)
        }
    }

    /// Returns the raw bytes if this is the unencoded variant.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Base64(_) => None,
        }
    }

    /// Returns the base64 text if this is the encoded variant.
    #[must_use]
    pub fn encoded(&self) -> Option<&str> {
        match self {
            Payload::Bytes(_) => None,
            Payload::Base64(text) => Some(text),
        }
    }

    /// Payload size in bytes as stored.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Payload::Bytes(bytes) => bytes.len(),
            Payload::Base64(text) => text.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Port for the external media-listing/retrieval service.
pub trait MediaService {
    /// Returns the current source registry snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot enumerate its sources.
    fn sources(&self) -> Result<SourceRegistry>;

    /// Lists item identifiers for a source, filtered and sorted
    /// service-side, echoing back the effective filter string.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown source or a failed listing call.
    fn list_media(&self, query: &ListQuery) -> Result<Listing>;

    /// Retrieves one item's payload, base64-encoded when `encode` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is missing or cannot be transferred
    /// or decoded.
    fn media(&self, source: &str, item: &str, encode: bool) -> Result<Payload>;

    /// Resolves an item identifier to a full path within its source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown source.
    fn full_path(&self, source: &str, item: &str) -> Result<PathBuf>;
}
