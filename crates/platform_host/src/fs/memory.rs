//! In-memory file-manager backend for tests and offline demos.
//!
//! Mirrors the observable behavior of the desktop host API: a backend-side current directory,
//! directories-first listings, and mutations relative to that directory.

use std::{cell::RefCell, collections::BTreeMap, collections::HashMap, rc::Rc};

use super::path::{extension_of, file_name_of, join_path, normalize_virtual_path, parent_path};
use super::service::{FileManagerFuture, FileManagerService};
use super::types::{
    DirectoryEntry, DirectoryListing, FileContent, FileMetadata, OperationMessage, SearchMatch,
    SearchResults,
};
use crate::time::{format_unix_ms_iso, next_monotonic_timestamp_ms};

/// Largest file `read_file` returns.
pub const MAX_READ_BYTES: usize = 5 * 1024 * 1024;
/// Maximum number of matches returned by `search_files`.
pub const SEARCH_RESULT_LIMIT: usize = 100;

#[derive(Debug, Clone)]
enum NodeKind {
    Directory,
    File(String),
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    created_ms: u64,
    modified_ms: u64,
}

impl MemoryNode {
    fn directory() -> Self {
        let now = next_monotonic_timestamp_ms();
        Self {
            kind: NodeKind::Directory,
            created_ms: now,
            modified_ms: now,
        }
    }

    fn file(content: &str) -> Self {
        let now = next_monotonic_timestamp_ms();
        Self {
            kind: NodeKind::File(content.to_string()),
            created_ms: now,
            modified_ms: now,
        }
    }

    fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::Directory => 0,
            NodeKind::File(content) => content.len() as u64,
        }
    }
}

#[derive(Debug)]
struct MemoryFs {
    nodes: BTreeMap<String, MemoryNode>,
    cwd: String,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, String>,
}

fn is_within(path: &str, dir: &str) -> bool {
    dir == "/" || path == dir || path.starts_with(&format!("{dir}/"))
}

impl MemoryFs {
    fn record(&mut self, op: &'static str) -> Result<(), String> {
        self.calls.push(op);
        match self.failures.get(op) {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }

    fn ensure_dir_all(&mut self, path: &str) {
        let path = normalize_virtual_path(path);
        if path != "/" {
            self.ensure_dir_all(&parent_path(&path));
        }
        self.nodes
            .entry(path)
            .or_insert_with(MemoryNode::directory);
    }

    fn require_dir(&self, path: &str) -> Result<(), String> {
        match self.nodes.get(path) {
            Some(node) if node.is_directory() => Ok(()),
            Some(_) => Err("Not a directory".to_string()),
            None => Err("Path does not exist".to_string()),
        }
    }

    fn entry_for(&self, path: &str, node: &MemoryNode) -> DirectoryEntry {
        let name = file_name_of(path).to_string();
        DirectoryEntry {
            extension: if node.is_directory() {
                None
            } else {
                extension_of(&name)
            },
            name,
            path: path.to_string(),
            is_directory: node.is_directory(),
            size: Some(node.size()),
            modified: Some(format_unix_ms_iso(node.modified_ms)),
        }
    }

    fn list(&self) -> DirectoryListing {
        let mut items: Vec<DirectoryEntry> = self
            .nodes
            .iter()
            .filter(|(path, _)| path.as_str() != "/" && parent_path(path) == self.cwd)
            .map(|(path, node)| self.entry_for(path, node))
            .collect();
        items.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        DirectoryListing {
            directory: self.cwd.clone(),
            items,
        }
    }

    fn create(&mut self, name: &str, node: MemoryNode, exists_error: &str) -> Result<String, String> {
        if name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
        let path = join_path(&self.cwd, name);
        if self.nodes.contains_key(&path) {
            return Err(exists_error.to_string());
        }
        self.require_dir(&parent_path(&path))
            .map_err(|_| "Parent directory does not exist".to_string())?;
        self.nodes.insert(path.clone(), node);
        Ok(path)
    }

    fn relocate_cwd_after_removal(&mut self, removed: &str) {
        if is_within(&self.cwd, removed) {
            self.cwd = parent_path(removed);
        }
    }

    fn move_tree(&mut self, from: &str, to: &str) {
        let moved: Vec<String> = self
            .nodes
            .keys()
            .filter(|path| is_within(path, from))
            .cloned()
            .collect();
        for old in moved {
            if let Some(node) = self.nodes.remove(&old) {
                let new = format!("{to}{}", &old[from.len()..]);
                self.nodes.insert(new, node);
            }
        }
        if is_within(&self.cwd, from) {
            self.cwd = format!("{to}{}", &self.cwd[from.len()..]);
        }
    }
}

#[derive(Debug, Clone)]
/// In-memory [`FileManagerService`] with a backend-side current directory.
///
/// Clones share the same tree, so a test can keep a handle for assertions while the controller
/// owns another.
pub struct MemoryFileManagerService {
    inner: Rc<RefCell<MemoryFs>>,
}

impl Default for MemoryFileManagerService {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryFileManagerService {
    /// Creates an empty tree whose current directory is `home` (created if needed).
    pub fn new(home: &str) -> Self {
        let mut fs = MemoryFs {
            nodes: BTreeMap::new(),
            cwd: normalize_virtual_path(home),
            calls: Vec::new(),
            failures: HashMap::new(),
        };
        let cwd = fs.cwd.clone();
        fs.ensure_dir_all(&cwd);
        Self {
            inner: Rc::new(RefCell::new(fs)),
        }
    }

    /// Adds a directory (and any missing parents).
    pub fn with_dir(self, path: &str) -> Self {
        self.inner.borrow_mut().ensure_dir_all(path);
        self
    }

    /// Adds a text file (and any missing parent directories).
    pub fn with_file(self, path: &str, content: &str) -> Self {
        {
            let mut fs = self.inner.borrow_mut();
            let path = normalize_virtual_path(path);
            fs.ensure_dir_all(&parent_path(&path));
            fs.nodes.insert(path, MemoryNode::file(content));
        }
        self
    }

    /// Returns the backend-side current directory.
    pub fn current_directory(&self) -> String {
        self.inner.borrow().cwd.clone()
    }

    /// Returns whether `path` exists.
    pub fn exists(&self, path: &str) -> bool {
        self.inner
            .borrow()
            .nodes
            .contains_key(&normalize_virtual_path(path))
    }

    /// Returns the text content of a file, if present.
    pub fn file_text(&self, path: &str) -> Option<String> {
        match &self.inner.borrow().nodes.get(&normalize_virtual_path(path))?.kind {
            NodeKind::File(content) => Some(content.clone()),
            NodeKind::Directory => None,
        }
    }

    /// Returns the names of service operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.borrow().calls.clone()
    }

    /// Makes every later call to `op` fail with `message`.
    pub fn fail_operation(&self, op: &'static str, message: impl Into<String>) {
        self.inner.borrow_mut().failures.insert(op, message.into());
    }

    /// Removes a failure installed with [`Self::fail_operation`].
    pub fn clear_failure(&self, op: &'static str) {
        self.inner.borrow_mut().failures.remove(op);
    }

    fn list_directory_now(&self, path: Option<&str>) -> Result<DirectoryListing, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("list_directory")?;
        if let Some(path) = path {
            let path = normalize_virtual_path(path);
            fs.require_dir(&path)?;
            fs.cwd = path;
        }
        Ok(fs.list())
    }

    fn get_file_info_now(&self, path: &str) -> Result<FileMetadata, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("get_file_info")?;
        let path = normalize_virtual_path(path);
        let node = fs
            .nodes
            .get(&path)
            .ok_or_else(|| "Path does not exist".to_string())?;
        let name = if path == "/" {
            "/".to_string()
        } else {
            file_name_of(&path).to_string()
        };
        Ok(FileMetadata {
            extension: if node.is_directory() {
                None
            } else {
                extension_of(&name)
            },
            name,
            size: node.size(),
            is_directory: node.is_directory(),
            created: Some(format_unix_ms_iso(node.created_ms)),
            modified: Some(format_unix_ms_iso(node.modified_ms)),
            accessed: Some(format_unix_ms_iso(node.modified_ms)),
            mime_type: None,
            path,
        })
    }

    fn read_file_now(&self, path: &str) -> Result<FileContent, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("read_file")?;
        let path = normalize_virtual_path(path);
        match fs.nodes.get(&path).map(|node| &node.kind) {
            None => Err("File does not exist".to_string()),
            Some(NodeKind::Directory) => Err("Not a file".to_string()),
            Some(NodeKind::File(content)) if content.len() > MAX_READ_BYTES => {
                Err("File is larger than the 5 MB limit".to_string())
            }
            Some(NodeKind::File(content)) => Ok(FileContent {
                name: None,
                content: content.clone(),
                size: Some(content.len() as u64),
                mime_type: None,
                encoding: Some("utf-8".to_string()),
            }),
        }
    }

    fn write_file_now(&self, path: &str, content: &str) -> Result<OperationMessage, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("write_file")?;
        let path = normalize_virtual_path(path);
        if path == "/" {
            return Err("Cannot write to the root directory".to_string());
        }
        fs.require_dir(&parent_path(&path))
            .map_err(|_| "Parent directory does not exist".to_string())?;
        match fs.nodes.get(&path).map(MemoryNode::is_directory) {
            Some(true) => return Err("Not a file".to_string()),
            Some(false) => {
                if let Some(node) = fs.nodes.get_mut(&path) {
                    node.kind = NodeKind::File(content.to_string());
                    node.modified_ms = next_monotonic_timestamp_ms();
                }
            }
            None => {
                fs.nodes.insert(path, MemoryNode::file(content));
            }
        }
        Ok(OperationMessage::new("File saved"))
    }

    fn navigate_to_parent_now(&self) -> Result<(), String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("navigate_to_parent")?;
        fs.cwd = parent_path(&fs.cwd);
        Ok(())
    }

    fn create_file_now(&self, name: &str, content: &str) -> Result<OperationMessage, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("create_file")?;
        fs.create(name, MemoryNode::file(content), "File already exists")?;
        Ok(OperationMessage::new(format!("File '{name}' created")))
    }

    fn create_directory_now(&self, name: &str) -> Result<OperationMessage, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("create_directory")?;
        fs.create(name, MemoryNode::directory(), "Directory already exists")?;
        Ok(OperationMessage::new(format!("Directory '{name}' created")))
    }

    fn delete_item_now(&self, path: &str) -> Result<OperationMessage, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("delete_item")?;
        let path = normalize_virtual_path(path);
        if path == "/" {
            return Err("Cannot delete the root directory".to_string());
        }
        let is_directory = fs
            .nodes
            .get(&path)
            .map(MemoryNode::is_directory)
            .ok_or_else(|| "Path does not exist".to_string())?;
        fs.nodes.retain(|candidate, _| !is_within(candidate, &path));
        fs.relocate_cwd_after_removal(&path);
        Ok(OperationMessage::new(if is_directory {
            "Directory deleted"
        } else {
            "File deleted"
        }))
    }

    fn rename_item_now(&self, old_path: &str, new_name: &str) -> Result<OperationMessage, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("rename_item")?;
        let old_path = normalize_virtual_path(old_path);
        if old_path == "/" || !fs.nodes.contains_key(&old_path) {
            return Err("Path does not exist".to_string());
        }
        if new_name.trim().is_empty() || new_name.contains(['/', '\\']) {
            return Err("Invalid name".to_string());
        }
        let new_path = join_path(&parent_path(&old_path), new_name);
        if fs.nodes.contains_key(&new_path) {
            return Err("Target name already exists".to_string());
        }
        fs.move_tree(&old_path, &new_path);
        Ok(OperationMessage::new("Renamed"))
    }

    fn search_files_now(&self, pattern: &str, scope: &str) -> Result<SearchResults, String> {
        let mut fs = self.inner.borrow_mut();
        fs.record("search_files")?;
        let scope = if scope.trim().is_empty() {
            fs.cwd.clone()
        } else {
            normalize_virtual_path(scope)
        };
        fs.require_dir(&scope)
            .map_err(|_| "Search path does not exist".to_string())?;
        let needle = pattern.to_lowercase();
        let results: Vec<SearchMatch> = fs
            .nodes
            .iter()
            .filter(|(path, node)| {
                !node.is_directory()
                    && path.as_str() != scope
                    && is_within(path, &scope)
                    && file_name_of(path).to_lowercase().contains(&needle)
            })
            .take(SEARCH_RESULT_LIMIT)
            .map(|(path, node)| SearchMatch {
                name: file_name_of(path).to_string(),
                path: path.clone(),
                size: node.size(),
                modified: Some(format_unix_ms_iso(node.modified_ms)),
            })
            .collect();
        Ok(SearchResults {
            count: results.len(),
            results,
            search_path: Some(scope),
        })
    }
}

impl FileManagerService for MemoryFileManagerService {
    fn list_directory<'a>(
        &'a self,
        path: Option<&'a str>,
    ) -> FileManagerFuture<'a, Result<DirectoryListing, String>> {
        Box::pin(async move { self.list_directory_now(path) })
    }

    fn get_file_info<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileMetadata, String>> {
        Box::pin(async move { self.get_file_info_now(path) })
    }

    fn read_file<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<FileContent, String>> {
        Box::pin(async move { self.read_file_now(path) })
    }

    fn write_file<'a>(
        &'a self,
        path: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { self.write_file_now(path, content) })
    }

    fn navigate_to_parent<'a>(&'a self) -> FileManagerFuture<'a, Result<(), String>> {
        Box::pin(async move { self.navigate_to_parent_now() })
    }

    fn create_file<'a>(
        &'a self,
        name: &'a str,
        content: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { self.create_file_now(name, content) })
    }

    fn create_directory<'a>(
        &'a self,
        name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { self.create_directory_now(name) })
    }

    fn delete_item<'a>(
        &'a self,
        path: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { self.delete_item_now(path) })
    }

    fn rename_item<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> FileManagerFuture<'a, Result<OperationMessage, String>> {
        Box::pin(async move { self.rename_item_now(old_path, new_name) })
    }

    fn search_files<'a>(
        &'a self,
        pattern: &'a str,
        scope: &'a str,
    ) -> FileManagerFuture<'a, Result<SearchResults, String>> {
        Box::pin(async move { self.search_files_now(pattern, scope) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> MemoryFileManagerService {
        MemoryFileManagerService::new("/home")
            .with_file("/home/b.txt", "bee")
            .with_file("/home/A.md", "# a")
            .with_dir("/home/zeta")
            .with_dir("/home/Alpha")
            .with_file("/home/zeta/deep/notes.TXT", "deep")
    }

    #[test]
    fn listing_sorts_directories_first_then_case_insensitive_names() {
        let fs = sample();
        let listing = block_on(fs.list_directory(None)).expect("list");
        let names: Vec<&str> = listing.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta", "A.md", "b.txt"]);
        assert_eq!(listing.directory, "/home");
        assert_eq!(listing.items[2].extension.as_deref(), Some(".md"));
        assert_eq!(listing.items[0].extension, None);
    }

    #[test]
    fn listing_a_path_moves_backend_directory_and_validates() {
        let fs = sample();
        block_on(fs.list_directory(Some("/home/zeta"))).expect("list zeta");
        assert_eq!(fs.current_directory(), "/home/zeta");

        let err = block_on(fs.list_directory(Some("/home/b.txt"))).expect_err("file");
        assert_eq!(err, "Not a directory");
        let err = block_on(fs.list_directory(Some("/missing"))).expect_err("missing");
        assert_eq!(err, "Path does not exist");
        assert_eq!(fs.current_directory(), "/home/zeta");
    }

    #[test]
    fn navigate_to_parent_stops_at_root() {
        let fs = sample();
        block_on(fs.navigate_to_parent()).expect("up");
        assert_eq!(fs.current_directory(), "/");
        block_on(fs.navigate_to_parent()).expect("up again");
        assert_eq!(fs.current_directory(), "/");
    }

    #[test]
    fn create_rename_delete_follow_host_contract() {
        let fs = sample();
        let msg = block_on(fs.create_file("c.txt", "sea")).expect("create");
        assert_eq!(msg.message.as_deref(), Some("File 'c.txt' created"));
        let err = block_on(fs.create_file("c.txt", "")).expect_err("duplicate");
        assert_eq!(err, "File already exists");

        let err = block_on(fs.rename_item("/home/c.txt", "b.txt")).expect_err("collision");
        assert_eq!(err, "Target name already exists");
        block_on(fs.rename_item("/home/zeta", "omega")).expect("rename dir");
        assert_eq!(fs.file_text("/home/omega/deep/notes.TXT").as_deref(), Some("deep"));
        assert!(!fs.exists("/home/zeta"));

        let msg = block_on(fs.delete_item("/home/omega")).expect("delete tree");
        assert_eq!(msg.message.as_deref(), Some("Directory deleted"));
        assert!(!fs.exists("/home/omega/deep/notes.TXT"));
    }

    #[test]
    fn read_and_write_round_trip_and_reject_directories() {
        let fs = sample();
        block_on(fs.write_file("/home/b.txt", "buzz")).expect("write");
        let read = block_on(fs.read_file("/home/b.txt")).expect("read");
        assert_eq!(read.content, "buzz");
        assert_eq!(read.size, Some(4));

        let err = block_on(fs.read_file("/home/zeta")).expect_err("dir read");
        assert_eq!(err, "Not a file");
        let err = block_on(fs.read_file("/home/nope")).expect_err("missing read");
        assert_eq!(err, "File does not exist");
    }

    #[test]
    fn search_matches_file_names_case_insensitively_within_scope() {
        let fs = sample();
        let found = block_on(fs.search_files("txt", "/home")).expect("search");
        let paths: Vec<&str> = found.results.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/home/b.txt", "/home/zeta/deep/notes.TXT"]);
        assert_eq!(found.count, 2);

        let none = block_on(fs.search_files("alpha", "/home")).expect("dirs never match");
        assert_eq!(none.count, 0);

        let err = block_on(fs.search_files("a", "/nowhere")).expect_err("bad scope");
        assert_eq!(err, "Search path does not exist");
    }

    #[test]
    fn injected_failures_and_call_log_are_observable() {
        let fs = sample();
        fs.fail_operation("delete_item", "Permission denied");
        let err = block_on(fs.delete_item("/home/b.txt")).expect_err("injected");
        assert_eq!(err, "Permission denied");
        assert!(fs.exists("/home/b.txt"));
        fs.clear_failure("delete_item");
        block_on(fs.delete_item("/home/b.txt")).expect("delete after clear");
        assert_eq!(fs.calls(), vec!["delete_item", "delete_item"]);
    }
}
