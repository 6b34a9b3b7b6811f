// SPDX-License-Identifier: MPL-2.0
//! The browsing orchestrator.
//!
//! [`Browser`] owns the service port, the configuration, the source
//! registry snapshot, the session state and the three caches. Each user
//! interaction is one synchronous pass: apply the confirmed edit, consult
//! the caches (computed on miss), and produce a [`Grid`].
//!
//! # Caching
//!
//! - Listing results are memoized per query with no expiry; the cache is
//!   cleared only by [`Browser::recycle`].
//! - Retrieved payloads are memoized in two independent caches (raw and
//!   base64), each capacity-bounded with a TTL window.

use crate::cache::{CacheStats, MemoCache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::{self, Grid, GridItem, ItemContent};
use crate::service::{ListQuery, Listing, MediaKey, MediaService, Payload, SourceRegistry};
use crate::session::{ControlsForm, LayoutChoice, SessionState, SourceForm};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default capacity of the listing cache.
pub const DEFAULT_LISTING_CAPACITY: usize = 64;

/// Default capacity of each retrieval cache. Practically unbounded for
/// this workload, but a ceiling must exist.
pub const DEFAULT_MEDIA_CAPACITY: usize = 10_000;

/// Default retrieval cache TTL.
pub const DEFAULT_MEDIA_TTL: Duration = Duration::from_secs(3600);

/// Cache sizing for a [`Browser`].
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Listing cache capacity.
    pub listing_capacity: usize,

    /// Capacity of each retrieval cache.
    pub media_capacity: usize,

    /// Expiry window for retrieved payloads. `None` disables expiry.
    pub media_ttl: Option<Duration>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            listing_capacity: DEFAULT_LISTING_CAPACITY,
            media_capacity: DEFAULT_MEDIA_CAPACITY,
            media_ttl: Some(DEFAULT_MEDIA_TTL),
        }
    }
}

impl CacheSettings {
    fn listing_cache<V: Clone>(&self) -> MemoCache<ListQuery, V> {
        MemoCache::new(non_zero(self.listing_capacity, DEFAULT_LISTING_CAPACITY))
    }

    fn media_cache(&self) -> MemoCache<MediaKey, Arc<Payload>> {
        let capacity = non_zero(self.media_capacity, DEFAULT_MEDIA_CAPACITY);
        match self.media_ttl {
            Some(ttl) => MemoCache::with_ttl(capacity, ttl),
            None => MemoCache::new(capacity),
        }
    }
}

fn non_zero(value: usize, fallback: usize) -> NonZeroUsize {
    NonZeroUsize::new(value)
        .or_else(|| NonZeroUsize::new(fallback))
        .expect("fallback capacity must be non-zero")
}

/// One browsing session over a media service.
#[derive(Debug)]
pub struct Browser<S> {
    service: S,
    config: Config,
    sources: SourceRegistry,
    session: SessionState,
    listing_cache: MemoCache<ListQuery, Listing>,
    raw_cache: MemoCache<MediaKey, Arc<Payload>>,
    encoded_cache: MemoCache<MediaKey, Arc<Payload>>,
}

impl<S: MediaService> Browser<S> {
    /// Creates a session with default cache sizing.
    ///
    /// Loads the registry, selects the first source and primes its
    /// listing. An empty registry leaves no source selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails to enumerate sources or to
    /// list the initially selected one.
    pub fn new(service: S, config: Config) -> Result<Self> {
        Self::with_cache_settings(service, config, CacheSettings::default())
    }

    /// Creates a session with explicit cache sizing.
    ///
    /// # Errors
    ///
    /// Same as [`Browser::new`].
    pub fn with_cache_settings(
        service: S,
        config: Config,
        settings: CacheSettings,
    ) -> Result<Self> {
        let session = SessionState::with_defaults(&config);
        let mut browser = Self {
            service,
            sources: SourceRegistry::new(),
            session,
            listing_cache: settings.listing_cache(),
            raw_cache: settings.media_cache(),
            encoded_cache: settings.media_cache(),
            config,
        };
        browser.initialize()?;
        Ok(browser)
    }

    /// Reloads the registry snapshot and selects the first source.
    fn initialize(&mut self) -> Result<()> {
        self.sources = self.service.sources()?;
        self.session.source = self.sources.keys().next().cloned();
        if let Some(query) = self.session.query() {
            self.listing_for(&query)?;
        }
        Ok(())
    }

    /// The current source registry snapshot.
    #[must_use]
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// The current session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The configuration this session was started with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the listing for the current selection, memoized per query.
    ///
    /// If the selected source is no longer present in the registry
    /// snapshot, initialization is re-run first. An empty registry yields
    /// an empty listing.
    ///
    /// # Errors
    ///
    /// Propagates service failures uncaught.
    pub fn listing(&mut self) -> Result<Listing> {
        let selection_valid = self
            .session
            .source
            .as_ref()
            .is_some_and(|source| self.sources.contains_key(source));
        if !selection_valid {
            self.initialize()?;
        }

        match self.session.query() {
            Some(query) => self.listing_for(&query),
            None => Ok(Listing::default()),
        }
    }

    fn listing_for(&mut self, query: &ListQuery) -> Result<Listing> {
        if let Some(hit) = self.listing_cache.get(query) {
            return Ok(hit);
        }
        let listing = self.service.list_media(query)?;
        self.listing_cache.insert(query.clone(), listing.clone());
        Ok(listing)
    }

    /// Retrieves one item's payload through the retrieval cache.
    ///
    /// The raw and base64 variants are cached independently. A miss
    /// blocks on the service.
    ///
    /// # Errors
    ///
    /// Propagates service failures uncaught.
    pub fn media(&mut self, source: &str, item: &str, encode: bool) -> Result<Arc<Payload>> {
        let key = MediaKey::new(source, item);
        let hit = if encode {
            self.encoded_cache.get(&key)
        } else {
            self.raw_cache.get(&key)
        };
        if let Some(payload) = hit {
            return Ok(payload);
        }

        let payload = Arc::new(self.service.media(source, item, encode)?);
        if encode {
            self.encoded_cache.insert(key, Arc::clone(&payload));
        } else {
            self.raw_cache.insert(key, Arc::clone(&payload));
        }
        Ok(payload)
    }

    /// Resolves an item identifier to a full path. Never cached.
    ///
    /// # Errors
    ///
    /// Propagates service failures uncaught.
    pub fn full_path(&self, source: &str, item: &str) -> Result<PathBuf> {
        self.service.full_path(source, item)
    }

    /// Applies a confirmed source selection and re-issues the listing
    /// query for the new selection.
    ///
    /// # Errors
    ///
    /// Propagates the listing failure.
    pub fn apply_source_form(&mut self, form: &SourceForm) -> Result<()> {
        self.session = self.session.apply_source_form(form, &self.config);
        self.listing().map(|_| ())
    }

    /// Applies confirmed filter and sort settings and re-issues the
    /// listing query.
    ///
    /// # Errors
    ///
    /// Propagates the listing failure.
    pub fn apply_controls_form(&mut self, form: &ControlsForm) -> Result<()> {
        self.session = self.session.apply_controls_form(form);
        self.listing().map(|_| ())
    }

    /// Applies a confirmed layout choice. Layout never touches the
    /// listing, so nothing is re-issued.
    pub fn apply_layout(&mut self, choice: LayoutChoice) {
        self.session = self.session.apply_layout(choice, &self.config);
    }

    /// Toggles caption visibility.
    pub fn set_captions(&mut self, show_captions: bool) {
        self.session = self.session.set_captions(show_captions);
    }

    /// Discards all cached state, re-reads the registry and resets the
    /// session to defaults. Used to pick up out-of-band configuration
    /// changes without restarting the process.
    ///
    /// # Errors
    ///
    /// Same as [`Browser::new`].
    pub fn recycle(&mut self) -> Result<()> {
        self.listing_cache.clear();
        self.raw_cache.clear();
        self.encoded_cache.clear();
        self.session = SessionState::with_defaults(&self.config);
        self.initialize()
    }

    /// Like [`Browser::recycle`], but with a freshly re-read
    /// configuration. The embedding layer decides where configuration
    /// comes from, so re-reading it is its job.
    ///
    /// # Errors
    ///
    /// Same as [`Browser::recycle`].
    pub fn recycle_with_config(&mut self, config: Config) -> Result<()> {
        self.config = config;
        self.recycle()
    }

    /// Runs one render pass over the current listing.
    ///
    /// The listing is truncated to the configured maximum, distributed
    /// round-robin across the configured columns, and each local item is
    /// fetched through the raw retrieval cache. Remote identifiers are
    /// rendered directly. A skippable per-item failure drops that item
    /// with a diagnostic note and rendering continues with its siblings.
    ///
    /// # Errors
    ///
    /// Propagates listing failures and non-skippable retrieval failures.
    pub fn render(&mut self) -> Result<Grid> {
        let listing = self.listing()?;
        let max_items = self.session.max_items;
        let show_captions = self.session.show_captions;
        let mut result = Grid::with_columns(self.session.columns, self.session.image_width);

        let Some(source) = self.session.source.clone() else {
            return Ok(result);
        };

        for id in listing.items.iter().take(max_items) {
            let caption = show_captions.then(|| id.clone());
            if grid::is_remote(id) {
                result.push(GridItem {
                    id: id.clone(),
                    content: ItemContent::Remote(id.clone()),
                    caption,
                });
                continue;
            }

            match self.media(&source, id, false) {
                Ok(payload) => result.push(GridItem {
                    id: id.clone(),
                    content: ItemContent::Fetched(payload),
                    caption,
                }),
                Err(Error::Service(err)) if err.skips_item() => {
                    eprintln!("Skipping {}: {}", id, err);
                    result.skip(id.clone(), err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(result)
    }

    /// Listing cache statistics.
    #[must_use]
    pub fn listing_stats(&self) -> CacheStats {
        self.listing_cache.stats()
    }

    /// Retrieval cache statistics for one encoding variant.
    #[must_use]
    pub fn media_stats(&self, encode: bool) -> CacheStats {
        if encode {
            self.encoded_cache.stats()
        } else {
            self.raw_cache.stats()
        }
    }
}
