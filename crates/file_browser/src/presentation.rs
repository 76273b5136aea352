//! Pure display helpers: icons, size labels, status texts, and the listing display model.

pub mod markup;

use platform_host::{trailing_suffix, FileMetadata};

use crate::model::{BrowseMode, SessionState, StatusKind};

pub const FOLDER_ICON: &str = "📁";
pub const DEFAULT_FILE_ICON: &str = "📄";

const FILE_ICONS: [(&str, &str); 23] = [
    (".txt", "📄"),
    (".py", "🐍"),
    (".js", "📜"),
    (".html", "🌐"),
    (".css", "🎨"),
    (".json", "📋"),
    (".md", "📝"),
    (".pdf", "📕"),
    (".doc", "📘"),
    (".docx", "📘"),
    (".xls", "📗"),
    (".xlsx", "📗"),
    (".ppt", "📙"),
    (".pptx", "📙"),
    (".jpg", "🖼️"),
    (".jpeg", "🖼️"),
    (".png", "🖼️"),
    (".gif", "🖼️"),
    (".mp3", "🎵"),
    (".mp4", "🎬"),
    (".zip", "📦"),
    (".rar", "📦"),
    (".exe", "⚙️"),
];

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Icon for a file extension such as `".txt"`. Lookup is exact (case-sensitive); anything
/// unmapped gets [`DEFAULT_FILE_ICON`].
pub fn file_icon(extension: &str) -> &'static str {
    FILE_ICONS
        .iter()
        .find(|(known, _)| *known == extension)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_FILE_ICON)
}

/// Icon for a search match, taken from the text after the last `.` of its path.
pub fn search_icon(path: &str) -> &'static str {
    trailing_suffix(path)
        .map(|suffix| file_icon(&format!(".{suffix}")))
        .unwrap_or(DEFAULT_FILE_ICON)
}

/// Formats a byte count with base-1024 units and one decimal (`1536` -> `"1.5 KB"`).
///
/// Whole bytes print without a decimal, zero prints as `"0 B"`, and anything from 1024³ up
/// stays in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", SIZE_UNITS[unit])
    }
}

pub fn status_label(status: StatusKind) -> String {
    match status {
        StatusKind::Ready => "Ready".to_string(),
        StatusKind::Loading => "Loading directory...".to_string(),
        StatusKind::Searching => "Searching...".to_string(),
        StatusKind::Found(count) => format!("Found {count} result(s)"),
        StatusKind::Error => "Error".to_string(),
        StatusKind::Done => "Operation complete".to_string(),
    }
}

pub fn path_label(directory: &str) -> String {
    format!("Current path: {directory}")
}

pub fn count_label(count: usize) -> String {
    format!("{count} item(s)")
}

pub fn editor_title(name: Option<&str>, path: &str) -> String {
    let shown = name.filter(|name| !name.is_empty()).unwrap_or(path);
    format!("📝 Edit: {shown}")
}

/// Multi-line properties text for a `get_file_info` result.
pub fn describe_metadata(meta: &FileMetadata) -> String {
    let mut info = String::from("File information:\n\n");
    info.push_str(&format!("Name: {}\n", meta.name));
    info.push_str(&format!("Path: {}\n", meta.path));
    info.push_str(&format!("Size: {}\n", format_file_size(meta.size)));
    info.push_str(&format!(
        "Type: {}\n",
        if meta.is_directory { "Folder" } else { "File" }
    ));
    info.push_str(&format!(
        "Created: {}\n",
        meta.created.as_deref().unwrap_or("unknown")
    ));
    info.push_str(&format!(
        "Modified: {}\n",
        meta.modified.as_deref().unwrap_or("unknown")
    ));
    if let Some(extension) = &meta.extension {
        info.push_str(&format!("Extension: {extension}\n"));
    }
    info
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a double-click on an item does.
pub enum ItemActivation {
    /// Resolve the item and list or edit it.
    Open,
    /// Open the item in the editor directly.
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub name: String,
    pub path: String,
    pub icon: &'static str,
    pub size_label: String,
    pub is_directory: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display model for the main pane, built from [`SessionState`] alone.
pub struct ListingView {
    /// Search heading; `None` in the directory view.
    pub heading: Option<String>,
    /// Label of the control that returns to the directory view.
    pub back_label: Option<&'static str>,
    /// Shown instead of the grid when there is nothing to list.
    pub empty_message: Option<String>,
    pub items: Vec<ItemView>,
    pub activation: ItemActivation,
    /// Whether items offer the context menu.
    pub context_menu: bool,
}

pub fn render_listing(state: &SessionState) -> ListingView {
    match &state.mode {
        BrowseMode::Browsing => {
            let items: Vec<ItemView> = state
                .entries
                .iter()
                .map(|entry| ItemView {
                    name: entry.name.clone(),
                    path: entry.path.clone(),
                    icon: if entry.is_directory {
                        FOLDER_ICON
                    } else {
                        file_icon(entry.extension.as_deref().unwrap_or_default())
                    },
                    size_label: entry
                        .display_size()
                        .map(format_file_size)
                        .unwrap_or_default(),
                    is_directory: entry.is_directory,
                    selected: state.is_selected(&entry.path),
                })
                .collect();
            ListingView {
                heading: None,
                back_label: None,
                empty_message: items
                    .is_empty()
                    .then(|| "This folder is empty".to_string()),
                items,
                activation: ItemActivation::Open,
                context_menu: true,
            }
        }
        BrowseMode::Searching(search) => {
            let items: Vec<ItemView> = search
                .matches
                .iter()
                .map(|found| ItemView {
                    name: found.name.clone(),
                    path: found.path.clone(),
                    icon: search_icon(&found.path),
                    size_label: format_file_size(found.size),
                    is_directory: false,
                    selected: state.is_selected(&found.path),
                })
                .collect();
            ListingView {
                heading: Some(format!("Search results: {} file(s)", items.len())),
                back_label: Some("Back to file list"),
                empty_message: items
                    .is_empty()
                    .then(|| format!("No files containing \"{}\" found", search.pattern)),
                items,
                activation: ItemActivation::Edit,
                context_menu: false,
            }
        }
    }
}
