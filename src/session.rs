// SPDX-License-Identifier: MPL-2.0
//! Session state and its transitions.
//!
//! [`SessionState`] is the explicit record of every user-adjustable
//! browsing parameter. It is passed by reference into each interaction
//! handler; there are no ambient globals. Confirmed edits are pure
//! transitions returning a new state, so the state logic is testable
//! without any UI toolkit. The rendering layer is responsible for
//! invoking them and triggering a re-render.

use crate::config::Config;
use crate::service::ListQuery;
use serde::{Deserialize, Serialize};

/// Minimum number of grid columns for manual layout entry.
pub const MIN_COLUMNS: usize = 1;

/// Maximum number of grid columns for manual layout entry.
pub const MAX_COLUMNS: usize = 80;

/// Minimum image width in pixels for manual layout entry.
pub const MIN_IMAGE_WIDTH: u32 = 32;

/// Maximum image width in pixels for manual layout entry.
pub const MAX_IMAGE_WIDTH: u32 = 3200;

/// User-adjustable parameters that persist across re-renders within one
/// browsing session.
///
/// Lifecycle: built with [`SessionState::with_defaults`] on first load,
/// mutated only through the `apply_*` transitions, and reset wholesale on
/// recycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Selected source name, `None` while the registry is empty.
    pub source: Option<String>,

    /// Filter keyword; `None` means unfiltered.
    pub filter: Option<String>,

    /// Whether the listing is sorted at all.
    pub sort: bool,

    /// Sort by date instead of by name. Only honored when `sort` is set.
    pub sort_by_date: bool,

    /// Ascending sort order. Only honored when `sort` is set.
    pub ascending: bool,

    /// Maximum number of items rendered per pass.
    pub max_items: usize,

    /// Number of grid columns.
    pub columns: usize,

    /// Rendered image width in pixels.
    pub image_width: u32,

    /// Whether the layout follows a preset or manual columns/width.
    pub use_preset: bool,

    /// Index into the configured preset list.
    pub preset_index: usize,

    /// Whether each item carries its identifier as a caption.
    pub show_captions: bool,
}

/// Confirmed values from the source selection form.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceForm {
    pub source: String,
    pub max_items: usize,
    pub show_captions: bool,
}

/// Confirmed values from the filter and sort settings form.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsForm {
    pub source: String,
    pub filter: Option<String>,
    pub sort: bool,
    pub sort_by_date: bool,
    pub ascending: bool,
}

/// Confirmed layout selection: a preset or manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutChoice {
    Preset(usize),
    Manual { columns: usize, image_width: u32 },
}

impl SessionState {
    /// The single apply-defaults constructor.
    ///
    /// Sorting starts enabled, by date, descending; captions start
    /// hidden; item count and layout come from the configuration.
    #[must_use]
    pub fn with_defaults(config: &Config) -> Self {
        let preset = config.default_preset();
        Self {
            source: None,
            filter: None,
            sort: true,
            sort_by_date: true,
            ascending: false,
            max_items: clamp_max_items(config.default_max_items, config),
            columns: preset.columns,
            image_width: preset.image_width,
            use_preset: true,
            preset_index: clamp_preset_index(config.default_preset, config),
            show_captions: false,
        }
    }

    /// Applies a confirmed source selection.
    ///
    /// Switching sources resets the filter and the sort flags to their
    /// defaults; the dependent listing must be re-issued by the caller.
    #[must_use]
    pub fn apply_source_form(&self, form: &SourceForm, config: &Config) -> Self {
        Self {
            source: Some(form.source.clone()),
            filter: None,
            sort: true,
            sort_by_date: true,
            ascending: false,
            max_items: clamp_max_items(form.max_items, config),
            show_captions: form.show_captions,
            ..self.clone()
        }
    }

    /// Applies confirmed filter and sort settings.
    #[must_use]
    pub fn apply_controls_form(&self, form: &ControlsForm) -> Self {
        Self {
            source: Some(form.source.clone()),
            filter: normalize_filter(form.filter.clone()),
            sort: form.sort,
            sort_by_date: form.sort_by_date,
            ascending: form.ascending,
            ..self.clone()
        }
    }

    /// Applies a confirmed layout choice.
    ///
    /// Manual values clamp to the supported column and width ranges;
    /// preset indices clamp to the configured list.
    #[must_use]
    pub fn apply_layout(&self, choice: LayoutChoice, config: &Config) -> Self {
        match choice {
            LayoutChoice::Preset(index) => {
                let preset = config.preset(index);
                Self {
                    use_preset: true,
                    preset_index: clamp_preset_index(index, config),
                    columns: preset.columns,
                    image_width: preset.image_width,
                    ..self.clone()
                }
            }
            LayoutChoice::Manual {
                columns,
                image_width,
            } => Self {
                use_preset: false,
                columns: columns.clamp(MIN_COLUMNS, MAX_COLUMNS),
                image_width: image_width.clamp(MIN_IMAGE_WIDTH, MAX_IMAGE_WIDTH),
                ..self.clone()
            },
        }
    }

    /// Toggles caption visibility. Item selection and ordering are
    /// unaffected.
    #[must_use]
    pub fn set_captions(&self, show_captions: bool) -> Self {
        Self {
            show_captions,
            ..self.clone()
        }
    }

    /// Returns the listing query for the current selection, or `None`
    /// when no source is selected.
    #[must_use]
    pub fn query(&self) -> Option<ListQuery> {
        self.source.as_ref().map(|source| ListQuery {
            source: source.clone(),
            filter: self.filter.clone(),
            sort: self.sort,
            sort_by_date: self.sort_by_date,
            ascending: self.ascending,
        })
    }
}

fn clamp_max_items(value: usize, config: &Config) -> usize {
    value.clamp(1, config.max_items_limit.max(1))
}

fn clamp_preset_index(index: usize, config: &Config) -> usize {
    if config.presets.is_empty() {
        0
    } else {
        index.min(config.presets.len() - 1)
    }
}

/// An empty filter field means "no filter".
fn normalize_filter(filter: Option<String>) -> Option<String> {
    filter.filter(|f| !f.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::default()
    }

    #[test]
    fn defaults_sort_descending_by_date_without_captions() {
        let state = SessionState::with_defaults(&config());
        assert!(state.source.is_none());
        assert!(state.filter.is_none());
        assert!(state.sort);
        assert!(state.sort_by_date);
        assert!(!state.ascending);
        assert!(!state.show_captions);
        assert!(state.use_preset);
    }

    #[test]
    fn defaults_take_layout_from_config_preset() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let preset = cfg.default_preset();
        assert_eq!(state.columns, preset.columns);
        assert_eq!(state.image_width, preset.image_width);
    }

    #[test]
    fn source_form_resets_filter_and_sort_flags() {
        let cfg = config();
        let state = SessionState {
            filter: Some("beach".into()),
            sort: false,
            ascending: true,
            ..SessionState::with_defaults(&cfg)
        };

        let form = SourceForm {
            source: "photos".into(),
            max_items: 50,
            show_captions: true,
        };
        let next = state.apply_source_form(&form, &cfg);

        assert_eq!(next.source.as_deref(), Some("photos"));
        assert_eq!(next.max_items, 50);
        assert!(next.show_captions);
        assert!(next.filter.is_none());
        assert!(next.sort);
        assert!(next.sort_by_date);
        assert!(!next.ascending);
    }

    #[test]
    fn source_form_clamps_max_items_to_configured_limit() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let form = SourceForm {
            source: "photos".into(),
            max_items: usize::MAX,
            show_captions: false,
        };
        assert_eq!(
            state.apply_source_form(&form, &cfg).max_items,
            cfg.max_items_limit
        );

        let form = SourceForm {
            max_items: 0,
            ..form
        };
        assert_eq!(state.apply_source_form(&form, &cfg).max_items, 1);
    }

    #[test]
    fn controls_form_sets_filter_and_sort_flags() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let form = ControlsForm {
            source: "photos".into(),
            filter: Some("beach".into()),
            sort: true,
            sort_by_date: false,
            ascending: true,
        };
        let next = state.apply_controls_form(&form);

        assert_eq!(next.filter.as_deref(), Some("beach"));
        assert!(!next.sort_by_date);
        assert!(next.ascending);
        // Layout is untouched by the controls form
        assert_eq!(next.columns, state.columns);
        assert_eq!(next.image_width, state.image_width);
    }

    #[test]
    fn blank_filter_normalizes_to_none() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let form = ControlsForm {
            source: "photos".into(),
            filter: Some("   ".into()),
            sort: true,
            sort_by_date: true,
            ascending: false,
        };
        assert!(state.apply_controls_form(&form).filter.is_none());
    }

    #[test]
    fn preset_layout_copies_columns_and_width() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let next = state.apply_layout(LayoutChoice::Preset(0), &cfg);

        assert!(next.use_preset);
        assert_eq!(next.preset_index, 0);
        assert_eq!(next.columns, cfg.presets[0].columns);
        assert_eq!(next.image_width, cfg.presets[0].image_width);
    }

    #[test]
    fn out_of_range_preset_index_clamps() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let next = state.apply_layout(LayoutChoice::Preset(usize::MAX), &cfg);
        assert_eq!(next.preset_index, cfg.presets.len() - 1);
    }

    #[test]
    fn manual_layout_clamps_to_supported_ranges() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let next = state.apply_layout(
            LayoutChoice::Manual {
                columns: 500,
                image_width: 10,
            },
            &cfg,
        );

        assert!(!next.use_preset);
        assert_eq!(next.columns, MAX_COLUMNS);
        assert_eq!(next.image_width, MIN_IMAGE_WIDTH);
    }

    #[test]
    fn set_captions_changes_only_caption_flag() {
        let cfg = config();
        let state = SessionState::with_defaults(&cfg);
        let next = state.set_captions(true);

        assert!(next.show_captions);
        assert_eq!(
            SessionState {
                show_captions: false,
                ..next
            },
            state
        );
    }

    #[test]
    fn query_is_none_without_a_source() {
        let state = SessionState::with_defaults(&config());
        assert!(state.query().is_none());
    }

    #[test]
    fn query_mirrors_selection_and_sort_flags() {
        let cfg = config();
        let form = ControlsForm {
            source: "photos".into(),
            filter: Some("beach".into()),
            sort: true,
            sort_by_date: false,
            ascending: true,
        };
        let state = SessionState::with_defaults(&cfg).apply_controls_form(&form);
        let query = state.query().expect("query should exist");

        assert_eq!(query.source, "photos");
        assert_eq!(query.filter.as_deref(), Some("beach"));
        assert!(query.sort);
        assert!(!query.sort_by_date);
        assert!(query.ascending);
    }
}
