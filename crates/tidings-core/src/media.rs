//! In-memory registry of the media items loaded in this session

use std::collections::BTreeMap;

use crate::collaborators::{MediaItemId, MediaLibrary};
use crate::types::MediaCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub category: MediaCategory,
    /// Number of times the item was asked to re-check auto-load eligibility
    pub auto_load_checks: u32,
    /// Only animations auto-play
    pub playing: bool,
}

#[derive(Debug, Default)]
pub struct MediaRegistry {
    items: BTreeMap<MediaItemId, MediaEntry>,
}

impl MediaRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaLibrary for MediaRegistry {
    fn known_items(&self, category: MediaCategory) -> Vec<MediaItemId> {
        self.items
            .iter()
            .filter(|(_, entry)| entry.category == category)
            .map(|(id, _)| *id)
            .collect()
    }

    fn notify_auto_load_settings_changed(&mut self, item: MediaItemId) {
        if let Some(entry) = self.items.get_mut(&item) {
            entry.auto_load_checks += 1;
        }
    }

    fn stop_auto_playing_items(&mut self) {
        let mut stopped = 0;
        for entry in self.items.values_mut().filter(|e| e.playing) {
            entry.playing = false;
            stopped += 1;
        }
        log::debug!("Stopped {} auto-playing items", stopped);
    }
}

#[cfg(test)]
impl MediaRegistry {
    fn register(&mut self, category: MediaCategory) -> MediaItemId {
        let id = MediaItemId(self.items.len() as u64 + 1);
        self.items.insert(
            id,
            MediaEntry {
                category,
                auto_load_checks: 0,
                playing: false,
            },
        );
        id
    }

    fn get(&self, id: MediaItemId) -> Option<&MediaEntry> {
        self.items.get(&id)
    }

    fn start_playing(&mut self, id: MediaItemId) {
        if let Some(entry) = self.items.get_mut(&id) {
            if entry.category == MediaCategory::Gif {
                entry.playing = true;
            }
        }
    }
}
