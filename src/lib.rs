// SPDX-License-Identifier: MPL-2.0
//! `media_lens` is the core of a media browsing front-end: session state,
//! memoization of listing/retrieval calls, and paginated grid layout.
//!
//! It is a thin orchestration layer over two out-of-scope collaborators:
//! an external media-listing/retrieval service (the [`service::MediaService`]
//! port) and a UI toolkit, which consumes the [`grid::Grid`] a render pass
//! produces. One user interaction is one synchronous pass through
//! [`browser::Browser`]: apply the confirmed edit, consult the caches,
//! lay out the grid.

#![doc(html_root_url = "https://docs.rs/media_lens/0.1.0")]

pub mod browser;
pub mod cache;
pub mod config;
pub mod error;
pub mod grid;
pub mod service;
pub mod session;
