//! Automatic media download form

use crate::layout::BoxMetrics;
use crate::types::{AutoDownloadPreferences, DownloadScope, MediaCategory};

/// Result of confirming the auto-download dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoDownloadCommit {
    pub preferences: AutoDownloadPreferences,
    /// Categories where a previously disabled scope was switched on
    pub reload_categories: Vec<MediaCategory>,
    /// Autoplay went from on to off
    pub stop_gif_playback: bool,
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct AutoDownloadForm {
    opened: AutoDownloadPreferences,
    current: AutoDownloadPreferences,
}

impl AutoDownloadForm {
    pub fn new(preferences: &AutoDownloadPreferences) -> Self {
        Self {
            opened: preferences.clone(),
            current: preferences.clone(),
        }
    }

    pub fn is_allowed(&self, category: MediaCategory, scope: DownloadScope) -> bool {
        self.current.scopes(category).allows(scope)
    }

    pub fn set_allowed(&mut self, category: MediaCategory, scope: DownloadScope, allowed: bool) {
        self.current.scopes_mut(category).set(scope, allowed);
    }

    pub fn autoplay_gif(&self) -> bool {
        self.current.autoplay_gif
    }

    pub fn set_autoplay_gif(&mut self, enabled: bool) {
        self.current.autoplay_gif = enabled;
    }

    /// Every combination of switches is valid, so this cannot fail
    pub fn confirm(&self) -> AutoDownloadCommit {
        let reload_categories = MediaCategory::ALL
            .into_iter()
            .filter(|category| {
                let before = self.opened.scopes(*category);
                let after = self.current.scopes(*category);
                after != before && after.newly_enabled(before)
            })
            .collect();

        AutoDownloadCommit {
            preferences: self.current.clone(),
            reload_categories,
            stop_gif_playback: self.opened.autoplay_gif && !self.current.autoplay_gif,
            changed: self.current != self.opened,
        }
    }

    pub fn preferred_height(&self, metrics: &BoxMetrics) -> i32 {
        metrics.auto_download_height()
    }
}
