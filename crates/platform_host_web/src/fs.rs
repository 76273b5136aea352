//! File-manager service backed by the page host API.

use platform_host::{
    DirectoryListing, FileContent, FileManagerFuture, FileManagerService, FileMetadata,
    OperationMessage, SearchResults,
};
use serde::de::IgnoredAny;
use serde_json::json;

use crate::bridge::host_call;

#[derive(Debug, Clone, Copy, Default)]
/// [`FileManagerService`] that forwards each call to `window.pywebview.api`.
pub struct WebFileManagerService;

impl FileManagerService for WebFileManagerService {
    fn list_directory<'a>(
        &'a self,
        path: Option<&'a str>,
    ) -> FileManagerFuture<'a, Result<DirectoryListing, String>> {
        Box::pin(async move { host_call("list_directory", json!([path])).await })
    }

    fn get_file_info<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileMetadata, String>> {
        Box::pin(async move { host_call("get_file_info", json!([path])).await })
    }

    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileContent, String>> {
        Box::pin(async move { host_call("read_file", json!([path])).await })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { host_call("write_file", json!([path, content])).await })
    }

    fn navigate_to_parent<'a>(&'a self) -> FileManagerFuture<'a, Result<(), String>> {
        Box::pin(async move {
            host_call::<IgnoredAny>("navigate_to_parent", json!([]))
                .await
                .map(|_| ())
        })
    }

    fn create_file<'a>(
        &'a self,
        name: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { host_call("create_file", json!([name, content])).await })
    }

    fn create_directory<'a>(
        &'a self,
        name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { host_call("create_directory", json!([name])).await })
    }

    fn delete_item<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { host_call("delete_item", json!([path])).await })
    }

    fn rename_item<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { host_call("rename_item", json!([old_path, new_name])).await })
    }

    fn search_files<'a>(
        &'a self,
        pattern: &'a str,
        scope: &'a str,
    ) -> FileManagerFuture<'a, Result<SearchResults, String>> {
        Box::pin(async move { host_call("search_files", json!([pattern, scope])).await })
    }
}
