//! Typed host contracts for the browser file manager.
//!
//! The file browser never touches a filesystem itself. Everything it needs from the outside
//! world is expressed here as object-safe service traits: the file-manager API, blocking
//! dialogs and confirmation, and preference storage. Concrete browser adapters live in
//! `platform_host_web`; [`MemoryFileManagerService`] and [`ScriptedDialogService`] back tests
//! and offline demos.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dialogs;
pub mod fs;
pub mod host;
pub mod prefs;
pub mod time;

pub use dialogs::{DialogFuture, HostDialogService, NoopDialogService, ScriptedDialogService};
pub use fs::memory::{MemoryFileManagerService, MAX_READ_BYTES, SEARCH_RESULT_LIMIT};
pub use fs::path::{
    extension_of, file_name_of, join_path, normalize_virtual_path, parent_path, trailing_suffix,
};
pub use fs::service::{FileManagerFuture, FileManagerService, NoopFileManagerService};
pub use fs::types::{
    decode_host_reply, DirectoryEntry, DirectoryListing, FileContent, FileMetadata,
    OperationMessage, SearchMatch, SearchResults, UNKNOWN_HOST_ERROR,
};
pub use host::HostServices;
pub use prefs::{read_pref, write_pref, MemoryPrefsStore, PrefsStore};
pub use time::{format_unix_ms_iso, next_monotonic_timestamp_ms, unix_time_ms_now};
