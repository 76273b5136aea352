use std::rc::Rc;

use platform_host::{HostServices, MemoryFileManagerService};

use crate::{WebDialogService, WebFileManagerService, WebPrefsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected filesystem backend.
pub enum HostStrategy {
    /// Forward every file operation to `window.pywebview.api`.
    PageHostApi,
    /// Serve file operations from a seeded in-memory tree.
    DemoBackend,
}

/// Returns the compile-time selected backend for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "demo-backend")]
    {
        HostStrategy::DemoBackend
    }

    #[cfg(not(feature = "demo-backend"))]
    {
        HostStrategy::PageHostApi
    }
}

/// Returns the selected backend as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::PageHostApi => "page-host-api",
        HostStrategy::DemoBackend => "demo-backend",
    }
}

/// In-memory tree used by the demo backend.
pub fn demo_file_manager() -> MemoryFileManagerService {
    MemoryFileManagerService::new("/home/demo")
        .with_dir("/home/demo/Documents")
        .with_dir("/home/demo/Pictures")
        .with_file("/home/demo/Documents/notes.md", "# Notes\n\n- try the search box\n")
        .with_file("/home/demo/Documents/report.txt", "Quarterly report draft.\n")
        .with_file("/home/demo/Pictures/cat.png", "")
        .with_file("/home/demo/readme.txt", "Welcome to the file browser demo.\n")
        .with_file("/home/demo/script.py", "print('hello')\n")
}

/// Builds the service bundle for the compile-time selected backend.
pub fn host_services() -> HostServices {
    let files: Rc<dyn platform_host::FileManagerService> = match selected_host_strategy() {
        HostStrategy::PageHostApi => Rc::new(WebFileManagerService),
        HostStrategy::DemoBackend => Rc::new(demo_file_manager()),
    };
    HostServices::new(files, Rc::new(WebDialogService), Rc::new(WebPrefsStore))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn demo_tree_lists_folders_first() {
        let fs = demo_file_manager();
        let listing = block_on(platform_host::FileManagerService::list_directory(&fs, None))
            .expect("demo tree lists");
        assert_eq!(listing.directory, "/home/demo");
        let names: Vec<_> = listing.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Documents", "Pictures", "readme.txt", "script.py"]
        );
    }

    #[test]
    fn strategy_name_matches_feature() {
        let expected = if cfg!(feature = "demo-backend") {
            "demo-backend"
        } else {
            "page-host-api"
        };
        assert_eq!(host_strategy_name(), expected);
    }
}
