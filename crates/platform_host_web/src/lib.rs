//! Browser (`wasm32`) implementations of the [`platform_host`] service contracts.
//!
//! File operations go through the page host API (`window.pywebview.api`), dialogs through
//! the page window, and preferences through `localStorage`. Native builds compile the same
//! types with inert fallbacks so the workspace tests run off-browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time backend selection and the service-bundle factory.
pub mod adapters;
mod bridge;
pub mod dialogs;
pub mod fs;
pub mod prefs;

pub use adapters::{
    demo_file_manager, host_services, host_strategy_name, selected_host_strategy, HostStrategy,
};
pub use dialogs::WebDialogService;
pub use fs::WebFileManagerService;
pub use prefs::WebPrefsStore;
