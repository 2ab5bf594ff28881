//! Leaderboard panels.
//!
//! Three tab-selected panels, each with its own `{loading, data, error}`
//! triple. Panels never share state.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::content::EvaluatedItem;

/// Identifier of a leaderboard tab.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PanelKind {
    #[default]
    TopLike,
    TopDislike,
    LastEvaluated,
}

impl PanelKind {
    /// Resolves a tab value coming from the presentation layer.
    ///
    /// Empty or unknown values resolve to [`PanelKind::TopLike`].
    pub fn resolve(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }

    /// Message shown when this panel's query fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            PanelKind::TopLike => "Could not load the top liked item",
            PanelKind::TopDislike => "Could not load the top disliked item",
            PanelKind::LastEvaluated => "Could not load the last evaluated item",
        }
    }
}

/// State of a single panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PanelState {
    pub loading: bool,
    pub data: Option<EvaluatedItem>,
    /// Empty when the last fetch did not fail.
    pub error: String,
}

impl PanelState {
    /// Clears data and error and marks the panel as loading.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error.clear();
        self.data = None;
    }

    /// Records a settled fetch: exactly one of data or error is set.
    pub fn settle(&mut self, result: Result<Option<EvaluatedItem>, String>) {
        match result {
            Ok(data) => self.data = data,
            Err(error) => self.error = error,
        }
        self.loading = false;
    }
}

/// The three panels side by side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Panels {
    pub top_like: PanelState,
    pub top_dislike: PanelState,
    pub last_evaluated: PanelState,
}

impl Panels {
    pub fn get(&self, kind: PanelKind) -> &PanelState {
        match kind {
            PanelKind::TopLike => &self.top_like,
            PanelKind::TopDislike => &self.top_dislike,
            PanelKind::LastEvaluated => &self.last_evaluated,
        }
    }

    pub fn get_mut(&mut self, kind: PanelKind) -> &mut PanelState {
        match kind {
            PanelKind::TopLike => &mut self.top_like,
            PanelKind::TopDislike => &mut self.top_dislike,
            PanelKind::LastEvaluated => &mut self.last_evaluated,
        }
    }

    /// Returns every panel to `{loading: false, data: None, error: ""}`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resolve_known_tabs() {
        assert_eq!(PanelKind::resolve("top-like"), PanelKind::TopLike);
        assert_eq!(PanelKind::resolve("top-dislike"), PanelKind::TopDislike);
        assert_eq!(PanelKind::resolve("last-evaluated"), PanelKind::LastEvaluated);
    }

    #[test]
    fn test_resolve_unknown_defaults_to_top_like() {
        assert_eq!(PanelKind::resolve(""), PanelKind::TopLike);
        assert_eq!(PanelKind::resolve("most-viewed"), PanelKind::TopLike);
        assert_eq!(PanelKind::resolve("42"), PanelKind::TopLike);
    }

    #[test]
    fn test_tab_names_round_trip_through_display() {
        for kind in PanelKind::iter() {
            assert_eq!(PanelKind::resolve(kind.as_ref()), kind);
        }
    }

    #[test]
    fn test_settle_sets_exactly_one_of_data_or_error() {
        let mut state = PanelState::default();
        state.begin();
        assert!(state.loading);

        state.settle(Err("down".to_string()));
        assert!(!state.loading);
        assert!(state.data.is_none());
        assert_eq!(state.error, "down");

        state.begin();
        assert!(state.error.is_empty());
        state.settle(Ok(None));
        assert!(!state.loading);
        assert!(state.error.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut panels = Panels::default();
        panels.get_mut(PanelKind::TopDislike).begin();
        panels.get_mut(PanelKind::LastEvaluated).settle(Err("x".into()));
        panels.reset();
        assert_eq!(panels, Panels::default());
    }
}
