//! Settings publication with arc-swap for lock-free reads.

use crate::schema::Settings;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Holds the active settings; readers get a snapshot, writers swap it whole.
pub struct SettingsCache {
    settings: ArcSwap<Settings>,
}

impl SettingsCache {
    /// Creates a new cache with the given initial settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: ArcSwap::from_pointee(settings),
        }
    }

    /// Gets the current settings.
    pub fn get(&self) -> Arc<Settings> {
        self.settings.load_full()
    }

    /// Replaces the settings atomically.
    pub fn update(&self, settings: Settings) {
        self.settings.store(Arc::new(settings));
    }
}

impl Default for SettingsCache {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl std::fmt::Debug for SettingsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsCache")
            .field("settings", &self.settings.load())
            .finish()
    }
}
