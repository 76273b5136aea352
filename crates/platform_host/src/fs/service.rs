//! File-manager service contract consumed by the browser session controller.

use std::{future::Future, pin::Pin};

use super::types::{
    DirectoryListing, FileContent, FileMetadata, OperationMessage, SearchResults,
};

/// Object-safe boxed future used by [`FileManagerService`] async methods.
pub type FileManagerFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service performing all filesystem work on behalf of the file browser.
///
/// Every call is one request/response round trip. Failures carry the host's human-readable
/// message and are never partially applied.
pub trait FileManagerService {
    /// Lists `path`, or the host's current directory when `path` is `None`.
    fn list_directory<'a>(
        &'a self,
        path: Option<&'a str>,
    ) -> FileManagerFuture<'a, Result<DirectoryListing, String>>;

    /// Returns metadata for a file or directory.
    fn get_file_info<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileMetadata, String>>;

    /// Reads a text file.
    fn read_file<'a>(&'a self, path: &'a str)
        -> FileManagerFuture<'a, Result<FileContent, String>>;

    /// Replaces the content of a text file.
    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>>;

    /// Moves the host's current directory to its parent.
    fn navigate_to_parent<'a>(&'a self) -> FileManagerFuture<'a, Result<(), String>>;

    /// Creates a file named `name` in the host's current directory.
    fn create_file<'a>(
        &'a self,
        name: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>>;

    /// Creates a directory named `name` in the host's current directory.
    fn create_directory<'a>(
        &'a self,
        name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>>;

    /// Deletes a file or a directory tree.
    fn delete_item<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>>;

    /// Renames `old_path` to `new_name` within the same parent directory.
    fn rename_item<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>>;

    /// Searches file names under `scope` for `pattern`.
    fn search_files<'a>(
        &'a self,
        pattern: &'a str,
        scope: &'a str,
    ) -> FileManagerFuture<'a, Result<SearchResults, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// File-manager adapter for targets without a host API.
pub struct NoopFileManagerService;

impl NoopFileManagerService {
    fn unavailable<T>(op: &str) -> FileManagerFuture<'static, Result<T, String>>
    where
        T: 'static,
    {
        let message = format!("file manager unavailable: {op}");
        Box::pin(async move { Err(message) })
    }
}

impl FileManagerService for NoopFileManagerService {
    fn list_directory<'a>(
        &'a self,
        _path: Option<&'a str>,
    ) -> FileManagerFuture<'a, Result<DirectoryListing, String>> {
        Self::unavailable("list_directory")
    }

    fn get_file_info<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileMetadata, String>> {
        Self::unavailable("get_file_info")
    }

    fn read_file<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileContent, String>> {
        Self::unavailable("read_file")
    }

    fn write_file<'a>(
        &'a self,
        _path: &'a str,
        _content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Self::unavailable("write_file")
    }

    fn navigate_to_parent<'a>(&'a self) -> FileManagerFuture<'a, Result<(), String>> {
        Self::unavailable("navigate_to_parent")
    }

    fn create_file<'a>(
        &'a self,
        _name: &'a str,
        _content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Self::unavailable("create_file")
    }

    fn create_directory<'a>(
        &'a self,
        _name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Self::unavailable("create_directory")
    }

    fn delete_item<'a>(
        &'a self,
        _path: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Self::unavailable("delete_item")
    }

    fn rename_item<'a>(
        &'a self,
        _old_path: &'a str,
        _new_name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Self::unavailable("rename_item")
    }

    fn search_files<'a>(
        &'a self,
        _pattern: &'a str,
        _scope: &'a str,
    ) -> FileManagerFuture<'a, Result<SearchResults, String>> {
        Self::unavailable("search_files")
    }
}
