//! Sequential driver that runs the reducer against host services without a UI.
//!
//! Every effect is executed in emission order and awaited before the next one; replies and
//! confirmation answers are queued and fed back through [`reduce_browser`] until nothing is
//! left. Tests and non-UI hosts drive sessions through [`BrowserController`].

use std::{collections::VecDeque, rc::Rc};

use leptos::logging;
use platform_host::{FileManagerService, HostDialogService, HostServices};

use crate::{
    model::{DraftField, SessionState, Surface},
    prefs::{load_file_browser_prefs, FileBrowserPrefs},
    reducer::{reduce_browser, BrowserAction, BrowserEffect, ContextCommand, ReducerError},
    requests::execute_request,
    shortcuts::{resolve_shortcut, KeyChord},
};

/// A browsing session bound to concrete host services.
pub struct BrowserController {
    state: SessionState,
    prefs: FileBrowserPrefs,
    files: Rc<dyn FileManagerService>,
    dialogs: Rc<dyn HostDialogService>,
}

impl BrowserController {
    pub fn new(files: Rc<dyn FileManagerService>, dialogs: Rc<dyn HostDialogService>) -> Self {
        Self {
            state: SessionState::default(),
            prefs: FileBrowserPrefs::default(),
            files,
            dialogs,
        }
    }

    /// Loads preferences from `host` and lists the start directory.
    ///
    /// # Errors
    ///
    /// Propagates reducer errors from the initial load.
    pub async fn start(host: &HostServices) -> Result<Self, ReducerError> {
        let mut controller = Self::new(host.files.clone(), host.dialogs.clone());
        let prefs = load_file_browser_prefs(host.prefs.as_ref());
        controller.prefs = prefs.clone();
        controller
            .load_directory(prefs.start_directory.as_deref())
            .await?;
        Ok(controller)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn prefs(&self) -> &FileBrowserPrefs {
        &self.prefs
    }

    pub fn set_prefs(&mut self, prefs: FileBrowserPrefs) {
        self.prefs = prefs;
    }

    /// Runs `action` and every follow-up it causes to completion.
    ///
    /// # Errors
    ///
    /// Returns the first reducer error; effects already executed are not undone.
    pub async fn dispatch(&mut self, action: BrowserAction) -> Result<(), ReducerError> {
        let mut queue = VecDeque::from([action]);
        while let Some(action) = queue.pop_front() {
            for effect in reduce_browser(&mut self.state, action)? {
                if let Some(follow_up) = self.run_effect(effect).await {
                    queue.push_back(follow_up);
                }
            }
        }
        Ok(())
    }

    async fn run_effect(&self, effect: BrowserEffect) -> Option<BrowserAction> {
        match effect {
            BrowserEffect::Request { ticket, request } => {
                let response = execute_request(self.files.as_ref(), request).await;
                Some(BrowserAction::BackendCompleted { ticket, response })
            }
            BrowserEffect::ConfirmDelete { prompt, .. } => {
                let accepted = self.dialogs.confirm(&prompt).await;
                Some(BrowserAction::DeleteConfirmed { accepted })
            }
            BrowserEffect::Notify(notice) => {
                if let Err(err) = self.dialogs.alert(&notice.text()).await {
                    logging::warn!("notice dropped: {err}");
                }
                None
            }
            BrowserEffect::CopyToClipboard(text) => {
                if let Err(err) = self.dialogs.copy_text(&text).await {
                    logging::warn!("clipboard write failed: {err}");
                }
                None
            }
            BrowserEffect::FocusSearchInput => None,
        }
    }

    pub async fn load_directory(&mut self, path: Option<&str>) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::LoadDirectory {
            path: path.map(str::to_string),
        })
        .await
    }

    pub async fn navigate_to_parent(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::NavigateToParent).await
    }

    pub async fn navigate_home(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::NavigateHome).await
    }

    pub async fn refresh(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::Refresh).await
    }

    pub async fn select_item(&mut self, path: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::SelectItem {
            path: path.to_string(),
        })
        .await
    }

    pub async fn open_item(&mut self, path: Option<&str>) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::OpenItem {
            path: path.map(str::to_string),
        })
        .await
    }

    pub async fn edit_file(&mut self, path: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::EditFile {
            path: path.to_string(),
        })
        .await
    }

    pub async fn set_editor_text(&mut self, text: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::SetEditorText {
            text: text.to_string(),
        })
        .await
    }

    pub async fn save_file(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::SaveFile).await
    }

    pub async fn close_editor(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::HideSurface(Surface::Editor))
            .await
    }

    /// Opens the create-file surface, fills it, and submits.
    pub async fn create_file(&mut self, name: &str, content: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::ShowSurface(Surface::CreateFile))
            .await?;
        self.edit_draft(DraftField::NewFileName, name).await?;
        self.edit_draft(DraftField::NewFileContent, content).await?;
        self.dispatch(BrowserAction::CreateFile).await
    }

    /// Opens the create-folder surface, fills it, and submits.
    pub async fn create_folder(&mut self, name: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::ShowSurface(Surface::CreateFolder))
            .await?;
        self.edit_draft(DraftField::NewFolderName, name).await?;
        self.dispatch(BrowserAction::CreateFolder).await
    }

    /// Deletes the selection once the host dialog confirms it.
    pub async fn delete_selected(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::RequestDelete).await
    }

    pub async fn show_rename(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::ShowRenameSurface).await
    }

    /// Renames the selection to `new_name`, opening the rename surface if needed.
    pub async fn rename_selected(&mut self, new_name: &str) -> Result<(), ReducerError> {
        if !self.state.surfaces.is_open(Surface::Rename) {
            self.show_rename().await?;
        }
        self.edit_draft(DraftField::RenameName, new_name).await?;
        self.dispatch(BrowserAction::SubmitRename).await
    }

    pub async fn search_files(&mut self, pattern: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::SetSearchInput {
            text: pattern.to_string(),
        })
        .await?;
        self.dispatch(BrowserAction::SubmitSearch).await
    }

    pub async fn exit_search(&mut self) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::ExitSearch).await
    }

    pub async fn open_context_menu(&mut self, path: &str, x: i32, y: i32) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::OpenContextMenu {
            path: path.to_string(),
            x,
            y,
        })
        .await
    }

    pub async fn context_command(&mut self, command: ContextCommand) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::ContextMenu(command)).await
    }

    /// Runs the shortcut bound to `chord`, if shortcuts are enabled and one matches.
    pub async fn press_key(&mut self, chord: &KeyChord) -> Result<(), ReducerError> {
        if !self.prefs.keyboard_shortcuts {
            return Ok(());
        }
        match resolve_shortcut(chord) {
            Some(shortcut) => self.dispatch(BrowserAction::KeyPressed(shortcut)).await,
            None => Ok(()),
        }
    }

    pub async fn edit_draft(&mut self, field: DraftField, value: &str) -> Result<(), ReducerError> {
        self.dispatch(BrowserAction::EditDraft {
            field,
            value: value.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryFileManagerService, ScriptedDialogService};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::StatusKind;

    #[test]
    fn dispatch_drains_follow_ups_in_order() {
        let fs = MemoryFileManagerService::new("/home/ada/docs").with_dir("/home/ada/music");
        let dialogs = ScriptedDialogService::default();
        let mut controller = BrowserController::new(Rc::new(fs.clone()), Rc::new(dialogs));

        block_on(controller.navigate_to_parent()).expect("up");
        assert_eq!(controller.state().current_directory, "/home/ada");
        assert_eq!(controller.state().status, StatusKind::Ready);
        assert_eq!(fs.calls(), vec!["navigate_to_parent", "list_directory"]);
    }

    #[test]
    fn disabled_shortcuts_are_ignored() {
        let fs = MemoryFileManagerService::new("/");
        let mut controller =
            BrowserController::new(Rc::new(fs.clone()), Rc::new(ScriptedDialogService::default()));
        controller.set_prefs(FileBrowserPrefs {
            keyboard_shortcuts: false,
            ..FileBrowserPrefs::default()
        });
        block_on(controller.press_key(&KeyChord::new("r").with_ctrl())).expect("key");
        assert!(fs.calls().is_empty());
    }
}
