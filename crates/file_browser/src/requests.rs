//! Backend requests emitted by the reducer and the typed replies fed back into it.

use platform_host::{
    DirectoryListing, FileContent, FileManagerService, FileMetadata, OperationMessage,
    SearchResults,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a `get_file_info` lookup was made.
pub enum FileInfoIntent {
    /// Open the path: list it when it is a directory, edit it otherwise.
    Open,
    /// Show the properties notice.
    Properties,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Exactly one backend call.
pub enum BackendRequest {
    ListDirectory { path: Option<String> },
    NavigateToParent,
    GetFileInfo { path: String, intent: FileInfoIntent },
    ReadFile { path: String },
    WriteFile { path: String, content: String },
    CreateFile { name: String, content: String },
    CreateDirectory { name: String },
    DeleteItem { path: String },
    RenameItem { old_path: String, new_name: String },
    SearchFiles { pattern: String, scope: String },
}

impl BackendRequest {
    /// Host API method name.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ListDirectory { .. } => "list_directory",
            Self::NavigateToParent => "navigate_to_parent",
            Self::GetFileInfo { .. } => "get_file_info",
            Self::ReadFile { .. } => "read_file",
            Self::WriteFile { .. } => "write_file",
            Self::CreateFile { .. } => "create_file",
            Self::CreateDirectory { .. } => "create_directory",
            Self::DeleteItem { .. } => "delete_item",
            Self::RenameItem { .. } => "rename_item",
            Self::SearchFiles { .. } => "search_files",
        }
    }

    /// Whether issuing this request starts a new view generation.
    pub fn replaces_view(&self) -> bool {
        matches!(
            self,
            Self::ListDirectory { .. } | Self::NavigateToParent | Self::SearchFiles { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reply to a [`BackendRequest`], carrying the request context the reducer needs.
pub enum BackendResponse {
    DirectoryListed(Result<DirectoryListing, String>),
    NavigatedToParent(Result<(), String>),
    FileInfoLoaded {
        path: String,
        intent: FileInfoIntent,
        result: Result<FileMetadata, String>,
    },
    FileRead {
        path: String,
        result: Result<FileContent, String>,
    },
    FileWritten {
        path: String,
        result: Result<OperationMessage, String>,
    },
    FileCreated {
        name: String,
        result: Result<OperationMessage, String>,
    },
    DirectoryCreated {
        name: String,
        result: Result<OperationMessage, String>,
    },
    ItemDeleted {
        path: String,
        result: Result<OperationMessage, String>,
    },
    ItemRenamed {
        old_path: String,
        result: Result<OperationMessage, String>,
    },
    SearchCompleted {
        pattern: String,
        result: Result<SearchResults, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which newer requests can make a reply obsolete.
pub enum ReplyScope {
    /// Feeds the visible listing; obsolete once a newer view request was issued.
    View,
    /// Opens an item; obsolete once a newer open or edit request was issued.
    Opener,
    /// Reports something the backend already did; always applied.
    Always,
}

impl BackendResponse {
    pub fn scope(&self) -> ReplyScope {
        match self {
            Self::DirectoryListed(_) | Self::SearchCompleted { .. } => ReplyScope::View,
            Self::FileRead { .. }
            | Self::FileInfoLoaded {
                intent: FileInfoIntent::Open,
                ..
            } => ReplyScope::Opener,
            // The backend has moved its working directory by the time this arrives.
            Self::NavigatedToParent(_)
            | Self::FileInfoLoaded { .. }
            | Self::FileWritten { .. }
            | Self::FileCreated { .. }
            | Self::DirectoryCreated { .. }
            | Self::ItemDeleted { .. }
            | Self::ItemRenamed { .. } => ReplyScope::Always,
        }
    }

    /// Whether this reply answers a view request, so the view is no longer waiting on it.
    pub fn settles_view(&self) -> bool {
        matches!(
            self,
            Self::DirectoryListed(_) | Self::NavigatedToParent(_) | Self::SearchCompleted { .. }
        )
    }
}

/// Performs `request` against `files` and wraps the outcome for the reducer.
pub async fn execute_request(
    files: &dyn FileManagerService,
    request: BackendRequest,
) -> BackendResponse {
    match request {
        BackendRequest::ListDirectory { path } => {
            BackendResponse::DirectoryListed(files.list_directory(path.as_deref()).await)
        }
        BackendRequest::NavigateToParent => {
            BackendResponse::NavigatedToParent(files.navigate_to_parent().await)
        }
        BackendRequest::GetFileInfo { path, intent } => {
            let result = files.get_file_info(&path).await;
            BackendResponse::FileInfoLoaded {
                path,
                intent,
                result,
            }
        }
        BackendRequest::ReadFile { path } => {
            let result = files.read_file(&path).await;
            BackendResponse::FileRead { path, result }
        }
        BackendRequest::WriteFile { path, content } => {
            let result = files.write_file(&path, &content).await;
            BackendResponse::FileWritten { path, result }
        }
        BackendRequest::CreateFile { name, content } => {
            let result = files.create_file(&name, &content).await;
            BackendResponse::FileCreated { name, result }
        }
        BackendRequest::CreateDirectory { name } => {
            let result = files.create_directory(&name).await;
            BackendResponse::DirectoryCreated { name, result }
        }
        BackendRequest::DeleteItem { path } => {
            let result = files.delete_item(&path).await;
            BackendResponse::ItemDeleted { path, result }
        }
        BackendRequest::RenameItem { old_path, new_name } => {
            let result = files.rename_item(&old_path, &new_name).await;
            BackendResponse::ItemRenamed { old_path, result }
        }
        BackendRequest::SearchFiles { pattern, scope } => {
            let result = files.search_files(&pattern, &scope).await;
            BackendResponse::SearchCompleted { pattern, result }
        }
    }
}
