//! Host service bundle handed to the file browser by the entry layer.

use std::rc::Rc;

use crate::{FileManagerService, HostDialogService, PrefsStore};

#[derive(Clone)]
/// Concrete services the file browser runs against.
pub struct HostServices {
    /// Filesystem backend.
    pub files: Rc<dyn FileManagerService>,
    /// Alerts, confirmation, and clipboard.
    pub dialogs: Rc<dyn HostDialogService>,
    /// Preference storage.
    pub prefs: Rc<dyn PrefsStore>,
}

impl HostServices {
    /// Bundles the given services.
    pub fn new(
        files: Rc<dyn FileManagerService>,
        dialogs: Rc<dyn HostDialogService>,
        prefs: Rc<dyn PrefsStore>,
    ) -> Self {
        Self {
            files,
            dialogs,
            prefs,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}
