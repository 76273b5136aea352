//! File-browser preferences, stored as one JSON document.

use leptos::logging;
use platform_host::{read_pref, write_pref, PrefsStore};
use serde::{Deserialize, Serialize};

pub const FILE_BROWSER_PREFS_KEY: &str = "file-browser.prefs.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBrowserPrefs {
    /// Directory listed at startup; `None` lets the backend choose.
    pub start_directory: Option<String>,
    /// Whether the global keyboard shortcuts are active.
    pub keyboard_shortcuts: bool,
    /// Whether Enter in the search box submits the search.
    pub search_on_enter: bool,
}

impl Default for FileBrowserPrefs {
    fn default() -> Self {
        Self {
            start_directory: None,
            keyboard_shortcuts: true,
            search_on_enter: true,
        }
    }
}

/// Loads the stored preferences, falling back to defaults when absent or unreadable.
pub fn load_file_browser_prefs(store: &dyn PrefsStore) -> FileBrowserPrefs {
    match read_pref::<FileBrowserPrefs>(store, FILE_BROWSER_PREFS_KEY) {
        Ok(Some(prefs)) => prefs,
        Ok(None) => FileBrowserPrefs::default(),
        Err(err) => {
            logging::warn!("file browser prefs load failed: {err}");
            FileBrowserPrefs::default()
        }
    }
}

/// Stores `prefs`.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub fn save_file_browser_prefs(store: &dyn PrefsStore, prefs: &FileBrowserPrefs) -> Result<(), String> {
    write_pref(store, FILE_BROWSER_PREFS_KEY, prefs)
}
