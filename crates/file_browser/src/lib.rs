//! Browser session controller for a webview-hosted file manager.
//!
//! The session lives in [`SessionState`] and changes only through [`reduce_browser`], which
//! turns a [`BrowserAction`] into a list of [`BrowserEffect`] intents (backend calls,
//! confirmations, notices). Two drivers execute those intents: [`BrowserController`] awaits
//! them one by one for tests and non-UI hosts, and [`FileBrowserApp`] runs them on the Leptos
//! runtime in the browser.

pub mod app;
pub mod controller;
pub mod model;
pub mod prefs;
pub mod presentation;
pub mod reducer;
pub mod requests;
pub mod shortcuts;

pub use app::{BrowserRuntime, FileBrowserApp};
pub use controller::BrowserController;
pub use model::*;
pub use prefs::{
    load_file_browser_prefs, save_file_browser_prefs, FileBrowserPrefs, FILE_BROWSER_PREFS_KEY,
};
pub use reducer::{
    reduce_browser, BrowserAction, BrowserEffect, ContextCommand, Notice, NoticeLevel,
    ReducerError, DELETE_PROMPT,
};
pub use requests::{execute_request, BackendRequest, BackendResponse, FileInfoIntent, ReplyScope};
pub use shortcuts::{resolve_shortcut, KeyChord, Shortcut};
