//! File-manager data types exchanged with the host API.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error text used when the host reports failure without a message.
pub const UNKNOWN_HOST_ERROR: &str = "unknown host error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One file or directory record returned by a directory listing.
pub struct DirectoryEntry {
    /// Base name of the entry.
    pub name: String,
    /// Full host path.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// File size in bytes. Hosts may send `0` for directories; use [`Self::display_size`].
    #[serde(default)]
    pub size: Option<u64>,
    /// Last-modified timestamp as formatted by the host.
    #[serde(default)]
    pub modified: Option<String>,
    /// Lower-cased extension including the leading dot (`".txt"`), files only.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub extension: Option<String>,
}

impl DirectoryEntry {
    /// Returns the size that should be shown for this entry (`None` for directories).
    pub fn display_size(&self) -> Option<u64> {
        if self.is_directory {
            None
        } else {
            Some(self.size.unwrap_or(0))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Result payload for `list_directory`.
pub struct DirectoryListing {
    /// Directory that was listed, as resolved by the host.
    pub directory: String,
    /// Entries in host order.
    pub items: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Result payload for `get_file_info`.
pub struct FileMetadata {
    /// Base name of the path.
    pub name: String,
    /// Absolute host path.
    pub path: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Whether the path is a directory.
    pub is_directory: bool,
    /// Creation timestamp as formatted by the host.
    #[serde(default)]
    pub created: Option<String>,
    /// Last-modified timestamp as formatted by the host.
    #[serde(default)]
    pub modified: Option<String>,
    /// Last-access timestamp as formatted by the host.
    #[serde(default)]
    pub accessed: Option<String>,
    /// Lower-cased extension including the leading dot.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub extension: Option<String>,
    /// Guessed MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Result payload for `read_file`.
pub struct FileContent {
    /// Display name, when the host provides one.
    #[serde(default)]
    pub name: Option<String>,
    /// Decoded text content.
    pub content: String,
    /// File size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Guessed MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Text encoding the host used to decode the file.
    #[serde(default)]
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One match returned by `search_files`.
pub struct SearchMatch {
    /// File name.
    pub name: String,
    /// Full host path.
    pub path: String,
    /// File size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Last-modified timestamp as formatted by the host.
    #[serde(default)]
    pub modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Result payload for `search_files`.
pub struct SearchResults {
    /// Matches in host order.
    pub results: Vec<SearchMatch>,
    /// Number of matches reported by the host.
    pub count: usize,
    /// Directory that was searched.
    #[serde(default)]
    pub search_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Confirmation payload returned by mutating host calls.
pub struct OperationMessage {
    /// Human-readable confirmation text.
    #[serde(default)]
    pub message: Option<String>,
}

impl OperationMessage {
    /// Builds a confirmation carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Returns the confirmation text, or `fallback` when the host sent none.
    pub fn text_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Decodes a host reply of the form `{ "success": bool, "error"?: string, ...payload }`.
///
/// # Errors
///
/// Returns the host's `error` text when `success` is false or missing, and a decode message
/// when the payload does not match `T`.
pub fn decode_host_reply<T: DeserializeOwned>(reply: Value) -> Result<T, String> {
    let success = reply
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        return Err(reply
            .get("error")
            .and_then(Value::as_str)
            .filter(|error| !error.is_empty())
            .unwrap_or(UNKNOWN_HOST_ERROR)
            .to_string());
    }
    serde_json::from_value(reply).map_err(|err| format!("malformed host reply: {err}"))
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.is_empty()))
}
