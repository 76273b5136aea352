//! Reducer actions, side-effect intents, and transition logic for a browsing session.

mod responses;

use leptos::logging;
use platform_host::file_name_of;
use thiserror::Error;

use crate::{
    model::{
        BrowserError, ContextMenuState, DraftField, RequestTicket, SessionState, StatusKind,
        Surface,
    },
    requests::{BackendRequest, BackendResponse, FileInfoIntent, ReplyScope},
    shortcuts::Shortcut,
};

/// Prompt shown before anything is deleted.
pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete the selected item? This cannot be undone!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Entries of the item context menu.
pub enum ContextCommand {
    Open,
    Edit,
    CopyPath,
    Properties,
    Rename,
    Delete,
}

impl ContextCommand {
    pub const ALL: [ContextCommand; 6] = [
        ContextCommand::Open,
        ContextCommand::Edit,
        ContextCommand::CopyPath,
        ContextCommand::Properties,
        ContextCommand::Rename,
        ContextCommand::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "📂 Open",
            Self::Edit => "✏️ Edit",
            Self::CopyPath => "📋 Copy path",
            Self::Properties => "ℹ️ Properties",
            Self::Rename => "🏷️ Rename",
            Self::Delete => "🗑️ Delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_browser`].
pub enum BrowserAction {
    /// List `path`, or the backend's current directory when `None`.
    LoadDirectory {
        /// Directory to list.
        path: Option<String>,
    },
    /// Ask the backend to move up one level, then list.
    NavigateToParent,
    /// List the backend's default directory.
    NavigateHome,
    /// Reload the current directory.
    Refresh,
    /// Replace the selection with `path`.
    SelectItem {
        /// Item to select.
        path: String,
    },
    /// Open `path` (or the selection): list it when it is a directory, edit it otherwise.
    OpenItem {
        /// Explicit target; falls back to the selection.
        path: Option<String>,
    },
    /// Load `path` into the editor surface.
    EditFile {
        /// File to edit.
        path: String,
    },
    /// Write the editor text back to the file being edited.
    SaveFile,
    /// Create a file from the create-file drafts.
    CreateFile,
    /// Create a directory from the create-folder draft.
    CreateFolder,
    /// Delete the selection after host confirmation.
    RequestDelete,
    /// The host's answer to [`BrowserEffect::ConfirmDelete`].
    DeleteConfirmed {
        /// Whether the user accepted.
        accepted: bool,
    },
    /// Open the rename surface pre-filled with the selected item's name.
    ShowRenameSurface,
    /// Rename the selection to the rename draft.
    SubmitRename,
    /// Search the current directory for the search box text.
    SubmitSearch,
    /// Leave the search view and reload the directory.
    ExitSearch,
    /// Show a modal surface.
    ShowSurface(Surface),
    /// Hide a modal surface.
    HideSurface(Surface),
    /// Right-click on an item: select it and open the menu at the pointer.
    OpenContextMenu {
        /// Item under the pointer.
        path: String,
        /// Pointer x in page coordinates.
        x: i32,
        /// Pointer y in page coordinates.
        y: i32,
    },
    /// Any primary click in the document.
    DocumentClick,
    /// A context menu entry was chosen.
    ContextMenu(ContextCommand),
    /// A global keyboard shortcut fired.
    KeyPressed(Shortcut),
    /// Text typed into a modal field.
    EditDraft {
        /// Field being edited.
        field: DraftField,
        /// New field text.
        value: String,
    },
    /// Text typed into the editor.
    SetEditorText {
        /// New editor text.
        text: String,
    },
    /// Text typed into the search box.
    SetSearchInput {
        /// New search box text.
        text: String,
    },
    /// A backend call issued through [`BrowserEffect::Request`] finished.
    BackendCompleted {
        /// Ticket the request was issued with.
        ticket: RequestTicket,
        /// Reply payload.
        response: BackendResponse,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A blocking notification for the user.
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Text as shown to the user.
    pub fn text(&self) -> String {
        match self.level {
            NoticeLevel::Info => self.message.clone(),
            NoticeLevel::Success => format!("Success: {}", self.message),
            NoticeLevel::Error => format!("Error: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_browser`] for the driver to execute in order.
pub enum BrowserEffect {
    /// Perform exactly one backend call and feed the reply back as
    /// [`BrowserAction::BackendCompleted`].
    Request {
        /// Ticket to echo back with the reply.
        ticket: RequestTicket,
        /// Call to perform.
        request: BackendRequest,
    },
    /// Ask the host to confirm deleting `path`; answer with [`BrowserAction::DeleteConfirmed`].
    ConfirmDelete {
        /// Path awaiting deletion.
        path: String,
        /// Question to show.
        prompt: String,
    },
    /// Show a blocking notification.
    Notify(Notice),
    /// Copy the text to the system clipboard.
    CopyToClipboard(String),
    /// Move keyboard focus into the search box.
    FocusSearchInput,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that cannot apply to the current state.
pub enum ReducerError {
    /// A reply arrived for a ticket this session never issued.
    #[error("reply for unknown request #{seq}")]
    UnknownTicket {
        /// Sequence number of the unknown ticket.
        seq: u64,
    },
    /// A delete answer arrived with no delete awaiting confirmation.
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
}

/// Applies a [`BrowserAction`] to the session and collects resulting side effects.
///
/// This is the only place session state changes. Validation failures (empty names, empty
/// search pattern, missing selection) are reported through [`BrowserEffect::Notify`] and the
/// error status without issuing a backend call. Keyboard shortcuts whose preconditions are
/// not met do nothing at all.
///
/// Replies are checked against the view generation: a reply that feeds the listing or the
/// editor is dropped when a newer view request has been issued since.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownTicket`] for a reply this session never asked for and
/// [`ReducerError::NoPendingDelete`] for an unsolicited delete answer.
pub fn reduce_browser(
    state: &mut SessionState,
    action: BrowserAction,
) -> Result<Vec<BrowserEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        BrowserAction::LoadDirectory { path } => {
            issue(state, &mut effects, BackendRequest::ListDirectory { path });
        }
        BrowserAction::NavigateToParent => {
            issue(state, &mut effects, BackendRequest::NavigateToParent);
        }
        BrowserAction::NavigateHome => {
            issue(state, &mut effects, BackendRequest::ListDirectory { path: None });
        }
        BrowserAction::Refresh | BrowserAction::ExitSearch => {
            reload_current_directory(state, &mut effects);
        }
        BrowserAction::SelectItem { path } => state.select_only(path),
        BrowserAction::OpenItem { path } => {
            state.context_menu = None;
            open_item(state, &mut effects, path);
        }
        BrowserAction::EditFile { path } => {
            issue(state, &mut effects, BackendRequest::ReadFile { path });
        }
        BrowserAction::SaveFile => {
            if let Some(path) = state.editing_path.clone() {
                let content = state.editor_text.clone();
                issue(state, &mut effects, BackendRequest::WriteFile { path, content });
            }
        }
        BrowserAction::CreateFile => {
            let name = state.drafts.new_file_name.trim().to_string();
            if name.is_empty() {
                fail(state, &mut effects, BrowserError::MissingFileName);
            } else {
                let content = state.drafts.new_file_content.clone();
                issue(state, &mut effects, BackendRequest::CreateFile { name, content });
            }
        }
        BrowserAction::CreateFolder => {
            let name = state.drafts.new_folder_name.trim().to_string();
            if name.is_empty() {
                fail(state, &mut effects, BrowserError::MissingFolderName);
            } else {
                issue(state, &mut effects, BackendRequest::CreateDirectory { name });
            }
        }
        BrowserAction::RequestDelete => match state.selected_path().map(str::to_string) {
            Some(path) => begin_delete(state, &mut effects, path),
            None => fail(state, &mut effects, BrowserError::NothingSelectedForDelete),
        },
        BrowserAction::DeleteConfirmed { accepted } => {
            let path = state
                .pending_delete
                .take()
                .ok_or(ReducerError::NoPendingDelete)?;
            if accepted {
                issue(state, &mut effects, BackendRequest::DeleteItem { path });
            }
        }
        BrowserAction::ShowRenameSurface | BrowserAction::ShowSurface(Surface::Rename) => {
            show_rename_surface(state, &mut effects);
        }
        BrowserAction::SubmitRename => {
            let new_name = state.drafts.rename_name.trim().to_string();
            match state.selected_path().map(str::to_string) {
                Some(old_path) if !new_name.is_empty() => {
                    issue(
                        state,
                        &mut effects,
                        BackendRequest::RenameItem { old_path, new_name },
                    );
                }
                _ => fail(state, &mut effects, BrowserError::MissingNewName),
            }
        }
        BrowserAction::SubmitSearch => {
            let pattern = state.search_input.trim().to_string();
            if pattern.is_empty() {
                fail(state, &mut effects, BrowserError::EmptySearchPattern);
            } else {
                let scope = state.current_directory.clone();
                issue(state, &mut effects, BackendRequest::SearchFiles { pattern, scope });
            }
        }
        BrowserAction::ShowSurface(surface) => show_surface(state, surface),
        BrowserAction::HideSurface(surface) => {
            state.surfaces.set(surface, false);
            if surface == Surface::Editor {
                state.editing_path = None;
            }
        }
        BrowserAction::OpenContextMenu { path, x, y } => {
            state.select_only(path.clone());
            state.context_menu = Some(ContextMenuState { x, y, path });
        }
        BrowserAction::DocumentClick => state.context_menu = None,
        BrowserAction::ContextMenu(command) => {
            state.context_menu = None;
            run_context_command(state, &mut effects, command);
        }
        BrowserAction::KeyPressed(shortcut) => run_shortcut(state, &mut effects, shortcut),
        BrowserAction::EditDraft { field, value } => state.drafts.set(field, value),
        BrowserAction::SetEditorText { text } => state.editor_text = text,
        BrowserAction::SetSearchInput { text } => state.search_input = text,
        BrowserAction::BackendCompleted { ticket, response } => {
            if ticket.seq >= state.next_request_seq {
                return Err(ReducerError::UnknownTicket { seq: ticket.seq });
            }
            if !reply_applies(state, ticket, &response) {
                logging::debug_warn!(
                    "dropping stale reply #{} (generation {} < {})",
                    ticket.seq,
                    ticket.generation,
                    state.view_generation
                );
                return Ok(effects);
            }
            if response.settles_view() {
                state.settle_view(ticket);
            }
            responses::apply_response(state, &mut effects, response);
        }
    }

    Ok(effects)
}

pub(crate) fn issue(
    state: &mut SessionState,
    effects: &mut Vec<BrowserEffect>,
    request: BackendRequest,
) {
    match request {
        BackendRequest::ListDirectory { .. } | BackendRequest::NavigateToParent => {
            state.status = StatusKind::Loading;
        }
        BackendRequest::SearchFiles { .. } => state.status = StatusKind::Searching,
        _ => {}
    }
    let ticket = state.issue_ticket(request.replaces_view());
    if matches!(
        request,
        BackendRequest::ReadFile { .. }
            | BackendRequest::GetFileInfo {
                intent: FileInfoIntent::Open,
                ..
            }
    ) {
        state.latest_open_seq = Some(ticket.seq);
    }
    effects.push(BrowserEffect::Request { ticket, request });
}

fn reply_applies(state: &SessionState, ticket: RequestTicket, response: &BackendResponse) -> bool {
    match response.scope() {
        ReplyScope::View => state.is_current(ticket),
        ReplyScope::Opener => {
            // Entering a directory replaces the view, so a newer view request wins.
            let enters_directory = matches!(
                response,
                BackendResponse::FileInfoLoaded { result: Ok(meta), .. } if meta.is_directory
            );
            state.is_latest_open(ticket) && (!enters_directory || state.is_current(ticket))
        }
        ReplyScope::Always => true,
    }
}

pub(crate) fn fail(state: &mut SessionState, effects: &mut Vec<BrowserEffect>, error: BrowserError) {
    state.status = StatusKind::Error;
    effects.push(BrowserEffect::Notify(Notice::error(error.to_string())));
    state.last_error = Some(error);
}

pub(crate) fn succeed(
    state: &mut SessionState,
    effects: &mut Vec<BrowserEffect>,
    message: impl Into<String>,
) {
    state.status = StatusKind::Done;
    state.last_error = None;
    effects.push(BrowserEffect::Notify(Notice::success(message)));
}

fn reload_current_directory(state: &mut SessionState, effects: &mut Vec<BrowserEffect>) {
    let path = (!state.current_directory.is_empty()).then(|| state.current_directory.clone());
    issue(state, effects, BackendRequest::ListDirectory { path });
}

/// Re-lists the visible directory after a mutation, unless a newer view is already on its way.
///
/// The re-list shares the current view generation so it does not cancel replies to other
/// requests still in flight.
pub(crate) fn resync_listing(state: &mut SessionState, effects: &mut Vec<BrowserEffect>) {
    if state.has_pending_view() {
        return;
    }
    let path = (!state.current_directory.is_empty()).then(|| state.current_directory.clone());
    state.status = StatusKind::Loading;
    let ticket = state.issue_ticket(false);
    effects.push(BrowserEffect::Request {
        ticket,
        request: BackendRequest::ListDirectory { path },
    });
}

fn open_item(state: &mut SessionState, effects: &mut Vec<BrowserEffect>, path: Option<String>) {
    let Some(path) = path.or_else(|| state.selected_path().map(str::to_string)) else {
        return;
    };
    issue(
        state,
        effects,
        BackendRequest::GetFileInfo {
            path,
            intent: FileInfoIntent::Open,
        },
    );
}

fn begin_delete(state: &mut SessionState, effects: &mut Vec<BrowserEffect>, path: String) {
    state.pending_delete = Some(path.clone());
    effects.push(BrowserEffect::ConfirmDelete {
        path,
        prompt: DELETE_PROMPT.to_string(),
    });
}

fn show_surface(state: &mut SessionState, surface: Surface) {
    match surface {
        Surface::CreateFile => {
            state.drafts.new_file_name.clear();
            state.drafts.new_file_content.clear();
        }
        Surface::CreateFolder => state.drafts.new_folder_name.clear(),
        Surface::Rename | Surface::Editor => {}
    }
    state.surfaces.set(surface, true);
}

fn show_rename_surface(state: &mut SessionState, effects: &mut Vec<BrowserEffect>) {
    let Some(path) = state.selected_path() else {
        fail(state, effects, BrowserError::NothingSelectedForRename);
        return;
    };
    let name = file_name_of(path).to_string();
    state.drafts.rename_name = name;
    state.surfaces.set(Surface::Rename, true);
}

fn run_context_command(
    state: &mut SessionState,
    effects: &mut Vec<BrowserEffect>,
    command: ContextCommand,
) {
    let selected = state.selected_path().map(str::to_string);
    match (command, selected) {
        (ContextCommand::Open, path) => open_item(state, effects, path),
        (ContextCommand::Rename, _) => show_rename_surface(state, effects),
        (ContextCommand::Delete, Some(path)) => begin_delete(state, effects, path),
        (ContextCommand::Delete, None) => {
            fail(state, effects, BrowserError::NothingSelectedForDelete);
        }
        (ContextCommand::Edit, Some(path)) => {
            issue(state, effects, BackendRequest::ReadFile { path });
        }
        (ContextCommand::CopyPath, Some(path)) => {
            effects.push(BrowserEffect::CopyToClipboard(path.clone()));
            succeed(state, effects, format!("Path copied to clipboard: {path}"));
        }
        (ContextCommand::Properties, Some(path)) => {
            issue(
                state,
                effects,
                BackendRequest::GetFileInfo {
                    path,
                    intent: FileInfoIntent::Properties,
                },
            );
        }
        (ContextCommand::Edit | ContextCommand::CopyPath | ContextCommand::Properties, None) => {}
    }
}

fn run_shortcut(state: &mut SessionState, effects: &mut Vec<BrowserEffect>, shortcut: Shortcut) {
    match shortcut {
        Shortcut::NewFile => show_surface(state, Surface::CreateFile),
        Shortcut::Refresh => reload_current_directory(state, effects),
        Shortcut::FocusSearch => effects.push(BrowserEffect::FocusSearchInput),
        Shortcut::DeleteSelection => {
            if let Some(path) = state.selected_path().map(str::to_string) {
                begin_delete(state, effects, path);
            }
        }
        Shortcut::Rename => {
            if state.selected_path().is_some() {
                show_rename_surface(state, effects);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{DirectoryEntry, DirectoryListing, FileContent, OperationMessage};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::BrowseMode;

    fn entry(name: &str, path: &str, is_directory: bool) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            path: path.to_string(),
            is_directory,
            size: Some(0),
            modified: None,
            extension: None,
        }
    }

    fn single_request(effects: &[BrowserEffect]) -> (RequestTicket, BackendRequest) {
        let requests: Vec<_> = effects
            .iter()
            .filter_map(|effect| match effect {
                BrowserEffect::Request { ticket, request } => Some((*ticket, request.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(requests.len(), 1, "expected one request in {effects:?}");
        requests[0].clone()
    }

    fn loaded(directory: &str, items: Vec<DirectoryEntry>) -> SessionState {
        let mut state = SessionState::default();
        let effects = reduce_browser(
            &mut state,
            BrowserAction::LoadDirectory {
                path: Some(directory.to_string()),
            },
        )
        .expect("load");
        let (ticket, _) = single_request(&effects);
        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::DirectoryListed(Ok(DirectoryListing {
                    directory: directory.to_string(),
                    items,
                })),
            },
        )
        .expect("listing");
        state
    }

    fn has_notice(effects: &[BrowserEffect], level: NoticeLevel) -> bool {
        effects
            .iter()
            .any(|effect| matches!(effect, BrowserEffect::Notify(n) if n.level == level))
    }

    #[test]
    fn listing_replaces_directory_and_clears_selection() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        assert_eq!(state.current_directory, "/home");
        assert_eq!(state.status, StatusKind::Ready);

        reduce_browser(
            &mut state,
            BrowserAction::SelectItem {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("select");
        let effects = reduce_browser(&mut state, BrowserAction::Refresh).expect("refresh");
        let (ticket, request) = single_request(&effects);
        assert_eq!(
            request,
            BackendRequest::ListDirectory {
                path: Some("/home".to_string())
            }
        );
        assert_eq!(state.status, StatusKind::Loading);

        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::DirectoryListed(Ok(DirectoryListing {
                    directory: "/home".to_string(),
                    items: Vec::new(),
                })),
            },
        )
        .expect("reload");
        assert!(state.selected_paths.is_empty());
        assert!(state.entries.is_empty());
    }

    #[test]
    fn selecting_always_leaves_exactly_one_path() {
        let mut state = SessionState::default();
        for path in ["/a", "/b", "/b", "/c"] {
            reduce_browser(
                &mut state,
                BrowserAction::SelectItem {
                    path: path.to_string(),
                },
            )
            .expect("select");
            assert_eq!(state.selected_paths, vec![path.to_string()]);
        }
    }

    #[test]
    fn failed_listing_keeps_previous_state_and_reports() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        let before_entries = state.entries.clone();
        let effects = reduce_browser(
            &mut state,
            BrowserAction::LoadDirectory {
                path: Some("/nope".to_string()),
            },
        )
        .expect("load");
        let (ticket, _) = single_request(&effects);
        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::DirectoryListed(Err("Path does not exist".to_string())),
            },
        )
        .expect("failure");

        assert_eq!(state.current_directory, "/home");
        assert_eq!(state.entries, before_entries);
        assert_eq!(state.status, StatusKind::Error);
        assert_eq!(
            effects,
            vec![BrowserEffect::Notify(Notice::error("Path does not exist"))]
        );
    }

    #[test]
    fn stale_listing_is_dropped_after_newer_navigation() {
        let mut state = loaded("/home", Vec::new());
        let first = reduce_browser(
            &mut state,
            BrowserAction::LoadDirectory {
                path: Some("/slow".to_string()),
            },
        )
        .expect("first");
        let second = reduce_browser(
            &mut state,
            BrowserAction::LoadDirectory {
                path: Some("/fast".to_string()),
            },
        )
        .expect("second");
        let (slow, _) = single_request(&first);
        let (fast, _) = single_request(&second);

        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: fast,
                response: BackendResponse::DirectoryListed(Ok(DirectoryListing {
                    directory: "/fast".to_string(),
                    items: Vec::new(),
                })),
            },
        )
        .expect("fast");
        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: slow,
                response: BackendResponse::DirectoryListed(Ok(DirectoryListing {
                    directory: "/slow".to_string(),
                    items: vec![entry("x", "/slow/x", false)],
                })),
            },
        )
        .expect("slow");

        assert!(effects.is_empty());
        assert_eq!(state.current_directory, "/fast");
        assert!(state.entries.is_empty());
    }

    fn created(name: &str) -> BackendResponse {
        BackendResponse::DirectoryCreated {
            name: name.to_string(),
            result: Ok(OperationMessage::default()),
        }
    }

    fn create_folder(state: &mut SessionState, name: &str) -> RequestTicket {
        reduce_browser(state, BrowserAction::ShowSurface(Surface::CreateFolder)).expect("show");
        reduce_browser(
            state,
            BrowserAction::EditDraft {
                field: DraftField::NewFolderName,
                value: name.to_string(),
            },
        )
        .expect("draft");
        let effects = reduce_browser(state, BrowserAction::CreateFolder).expect("create");
        single_request(&effects).0
    }

    #[test]
    fn mutation_reply_skips_reload_while_newer_navigation_is_pending() {
        let mut state = loaded("/home", Vec::new());
        let create = create_folder(&mut state, "new");
        let effects = reduce_browser(
            &mut state,
            BrowserAction::LoadDirectory {
                path: Some("/home/docs".to_string()),
            },
        )
        .expect("navigate");
        let (docs, _) = single_request(&effects);

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: create,
                response: created("new"),
            },
        )
        .expect("created");
        assert_eq!(
            effects,
            vec![BrowserEffect::Notify(Notice::success("Folder 'new' created"))]
        );

        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: docs,
                response: BackendResponse::DirectoryListed(Ok(DirectoryListing {
                    directory: "/home/docs".to_string(),
                    items: Vec::new(),
                })),
            },
        )
        .expect("docs");
        assert_eq!(state.current_directory, "/home/docs");
        assert!(!state.has_pending_view());
    }

    #[test]
    fn mutation_reload_does_not_cancel_an_edit_in_flight() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        let create = create_folder(&mut state, "new");
        let effects = reduce_browser(
            &mut state,
            BrowserAction::EditFile {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("edit");
        let (read, _) = single_request(&effects);

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: create,
                response: created("new"),
            },
        )
        .expect("created");
        let (_, reload) = single_request(&effects);
        assert_eq!(
            reload,
            BackendRequest::ListDirectory {
                path: Some("/home".to_string())
            }
        );

        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: read,
                response: BackendResponse::FileRead {
                    path: "/home/a.txt".to_string(),
                    result: Ok(FileContent {
                        name: Some("a.txt".to_string()),
                        content: "hello".to_string(),
                        size: Some(5),
                        mime_type: None,
                        encoding: None,
                    }),
                },
            },
        )
        .expect("read");
        assert!(state.surfaces.is_open(Surface::Editor));
        assert_eq!(state.editing_path.as_deref(), Some("/home/a.txt"));
        assert_eq!(state.editor_text, "hello");
    }

    #[test]
    fn superseded_edit_reply_is_dropped() {
        let mut state = loaded("/home", Vec::new());
        let mut tickets = Vec::new();
        for path in ["/home/a.txt", "/home/b.txt"] {
            let effects = reduce_browser(
                &mut state,
                BrowserAction::EditFile {
                    path: path.to_string(),
                },
            )
            .expect("edit");
            tickets.push(single_request(&effects).0);
        }

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: tickets[0],
                response: BackendResponse::FileRead {
                    path: "/home/a.txt".to_string(),
                    result: Err("Permission denied".to_string()),
                },
            },
        )
        .expect("old read");
        assert!(effects.is_empty());
        assert_eq!(state.status, StatusKind::Ready);
    }

    #[test]
    fn late_parent_navigation_still_relists_the_backend_directory() {
        let mut state = loaded("/home/docs", Vec::new());
        let effects = reduce_browser(&mut state, BrowserAction::NavigateToParent).expect("up");
        let (up, _) = single_request(&effects);
        reduce_browser(
            &mut state,
            BrowserAction::SetSearchInput {
                text: "notes".to_string(),
            },
        )
        .expect("input");
        reduce_browser(&mut state, BrowserAction::SubmitSearch).expect("search");

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: up,
                response: BackendResponse::NavigatedToParent(Ok(())),
            },
        )
        .expect("late up");
        let (_, relist) = single_request(&effects);
        assert_eq!(relist, BackendRequest::ListDirectory { path: None });
    }

    #[test]
    fn unknown_ticket_is_rejected() {
        let mut state = SessionState::default();
        let err = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket: RequestTicket {
                    seq: 7,
                    generation: 0,
                },
                response: BackendResponse::NavigatedToParent(Ok(())),
            },
        )
        .expect_err("never issued");
        assert_eq!(err, ReducerError::UnknownTicket { seq: 7 });
    }

    #[test]
    fn delete_requires_accepted_confirmation() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        reduce_browser(
            &mut state,
            BrowserAction::SelectItem {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("select");

        let effects = reduce_browser(&mut state, BrowserAction::RequestDelete).expect("ask");
        assert_eq!(
            effects,
            vec![BrowserEffect::ConfirmDelete {
                path: "/home/a.txt".to_string(),
                prompt: DELETE_PROMPT.to_string(),
            }]
        );

        let effects = reduce_browser(
            &mut state,
            BrowserAction::DeleteConfirmed { accepted: false },
        )
        .expect("declined");
        assert!(effects.is_empty());
        assert_eq!(state.pending_delete, None);

        let err = reduce_browser(&mut state, BrowserAction::DeleteConfirmed { accepted: true })
            .expect_err("nothing pending");
        assert_eq!(err, ReducerError::NoPendingDelete);

        reduce_browser(&mut state, BrowserAction::RequestDelete).expect("ask again");
        let effects = reduce_browser(
            &mut state,
            BrowserAction::DeleteConfirmed { accepted: true },
        )
        .expect("accepted");
        let (_, request) = single_request(&effects);
        assert_eq!(
            request,
            BackendRequest::DeleteItem {
                path: "/home/a.txt".to_string()
            }
        );
    }

    #[test]
    fn delete_without_selection_reports_from_button_but_not_from_key() {
        let mut state = loaded("/home", Vec::new());
        let effects = reduce_browser(
            &mut state,
            BrowserAction::KeyPressed(Shortcut::DeleteSelection),
        )
        .expect("key");
        assert!(effects.is_empty());
        assert_eq!(state.status, StatusKind::Ready);

        let effects = reduce_browser(&mut state, BrowserAction::RequestDelete).expect("button");
        assert_eq!(
            effects,
            vec![BrowserEffect::Notify(Notice::error(
                "Select an item to delete first"
            ))]
        );
        assert_eq!(state.last_error, Some(BrowserError::NothingSelectedForDelete));
    }

    #[test]
    fn save_without_editing_path_does_nothing() {
        let mut state = loaded("/home", Vec::new());
        state.editor_text = "draft".to_string();
        let before = state.clone();
        let effects = reduce_browser(&mut state, BrowserAction::SaveFile).expect("save");
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn rename_with_blank_name_keeps_surface_open_and_skips_backend() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        reduce_browser(
            &mut state,
            BrowserAction::SelectItem {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("select");
        reduce_browser(&mut state, BrowserAction::ShowRenameSurface).expect("show");
        assert_eq!(state.drafts.rename_name, "a.txt");
        assert!(state.surfaces.is_open(Surface::Rename));

        reduce_browser(
            &mut state,
            BrowserAction::EditDraft {
                field: DraftField::RenameName,
                value: "   ".to_string(),
            },
        )
        .expect("edit");
        let effects = reduce_browser(&mut state, BrowserAction::SubmitRename).expect("submit");
        assert_eq!(
            effects,
            vec![BrowserEffect::Notify(Notice::error(
                "Select an item and enter a new name"
            ))]
        );
        assert!(state.surfaces.is_open(Surface::Rename));
    }

    #[test]
    fn mutation_failure_changes_nothing_and_does_not_reload() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        reduce_browser(
            &mut state,
            BrowserAction::SelectItem {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("select");
        reduce_browser(&mut state, BrowserAction::ShowSurface(Surface::CreateFolder))
            .expect("show");
        reduce_browser(
            &mut state,
            BrowserAction::EditDraft {
                field: DraftField::NewFolderName,
                value: "docs".to_string(),
            },
        )
        .expect("draft");
        let effects = reduce_browser(&mut state, BrowserAction::CreateFolder).expect("create");
        let (ticket, _) = single_request(&effects);

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::DirectoryCreated {
                    name: "docs".to_string(),
                    result: Err("Directory already exists".to_string()),
                },
            },
        )
        .expect("reply");
        assert_eq!(
            effects,
            vec![BrowserEffect::Notify(Notice::error("Directory already exists"))]
        );
        assert_eq!(state.current_directory, "/home");
        assert_eq!(state.selected_paths, vec!["/home/a.txt".to_string()]);
        assert!(state.surfaces.is_open(Surface::CreateFolder));
    }

    #[test]
    fn rename_success_closes_surface_clears_selection_and_reloads() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        reduce_browser(
            &mut state,
            BrowserAction::SelectItem {
                path: "/home/a.txt".to_string(),
            },
        )
        .expect("select");
        reduce_browser(&mut state, BrowserAction::ShowRenameSurface).expect("show");
        reduce_browser(
            &mut state,
            BrowserAction::EditDraft {
                field: DraftField::RenameName,
                value: "b.txt".to_string(),
            },
        )
        .expect("edit");
        let effects = reduce_browser(&mut state, BrowserAction::SubmitRename).expect("submit");
        let (ticket, request) = single_request(&effects);
        assert_eq!(
            request,
            BackendRequest::RenameItem {
                old_path: "/home/a.txt".to_string(),
                new_name: "b.txt".to_string(),
            }
        );

        let effects = reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::ItemRenamed {
                    old_path: "/home/a.txt".to_string(),
                    result: Ok(OperationMessage::new("Renamed")),
                },
            },
        )
        .expect("renamed");
        assert!(!state.surfaces.is_open(Surface::Rename));
        assert!(state.selected_paths.is_empty());
        assert!(has_notice(&effects, NoticeLevel::Success));
        let (_, reload) = single_request(&effects);
        assert_eq!(
            reload,
            BackendRequest::ListDirectory {
                path: Some("/home".to_string())
            }
        );
    }

    #[test]
    fn context_menu_selects_target_and_closes_on_click_or_command() {
        let mut state = loaded("/home", vec![entry("a.txt", "/home/a.txt", false)]);
        reduce_browser(
            &mut state,
            BrowserAction::OpenContextMenu {
                path: "/home/a.txt".to_string(),
                x: 40,
                y: 60,
            },
        )
        .expect("menu");
        assert_eq!(state.selected_path(), Some("/home/a.txt"));
        assert!(state.context_menu.is_some());
        reduce_browser(&mut state, BrowserAction::DocumentClick).expect("click");
        assert_eq!(state.context_menu, None);

        reduce_browser(
            &mut state,
            BrowserAction::OpenContextMenu {
                path: "/home/a.txt".to_string(),
                x: 1,
                y: 2,
            },
        )
        .expect("menu again");
        let effects = reduce_browser(
            &mut state,
            BrowserAction::ContextMenu(ContextCommand::CopyPath),
        )
        .expect("copy");
        assert_eq!(state.context_menu, None);
        assert_eq!(
            effects,
            vec![
                BrowserEffect::CopyToClipboard("/home/a.txt".to_string()),
                BrowserEffect::Notify(Notice::success(
                    "Path copied to clipboard: /home/a.txt"
                )),
            ]
        );
    }

    #[test]
    fn empty_search_is_rejected_and_search_enters_search_mode() {
        let mut state = loaded("/home", Vec::new());
        let effects = reduce_browser(&mut state, BrowserAction::SubmitSearch).expect("empty");
        assert!(has_notice(&effects, NoticeLevel::Error));
        assert_eq!(state.last_error, Some(BrowserError::EmptySearchPattern));

        reduce_browser(
            &mut state,
            BrowserAction::SetSearchInput {
                text: " notes ".to_string(),
            },
        )
        .expect("type");
        let effects = reduce_browser(&mut state, BrowserAction::SubmitSearch).expect("search");
        let (ticket, request) = single_request(&effects);
        assert_eq!(
            request,
            BackendRequest::SearchFiles {
                pattern: "notes".to_string(),
                scope: "/home".to_string(),
            }
        );
        assert_eq!(state.status, StatusKind::Searching);

        reduce_browser(
            &mut state,
            BrowserAction::BackendCompleted {
                ticket,
                response: BackendResponse::SearchCompleted {
                    pattern: "notes".to_string(),
                    result: Ok(platform_host::SearchResults {
                        results: Vec::new(),
                        count: 0,
                        search_path: Some("/home".to_string()),
                    }),
                },
            },
        )
        .expect("results");
        assert!(matches!(state.mode, BrowseMode::Searching(ref view) if view.count == 0));
        assert_eq!(state.status, StatusKind::Found(0));
    }

    #[test]
    fn shortcuts_open_surfaces_and_focus_search() {
        let mut state = loaded("/home", Vec::new());
        state.drafts.new_file_name = "old".to_string();
        reduce_browser(&mut state, BrowserAction::KeyPressed(Shortcut::NewFile)).expect("new");
        assert!(state.surfaces.is_open(Surface::CreateFile));
        assert_eq!(state.drafts.new_file_name, "");

        let effects = reduce_browser(&mut state, BrowserAction::KeyPressed(Shortcut::FocusSearch))
            .expect("focus");
        assert_eq!(effects, vec![BrowserEffect::FocusSearchInput]);

        let effects =
            reduce_browser(&mut state, BrowserAction::KeyPressed(Shortcut::Rename)).expect("f2");
        assert!(effects.is_empty());
        assert!(!state.surfaces.is_open(Surface::Rename));
    }

    #[test]
    fn closing_editor_clears_editing_path() {
        let mut state = SessionState {
            editing_path: Some("/a.txt".to_string()),
            ..SessionState::default()
        };
        state.surfaces.set(Surface::Editor, true);
        reduce_browser(&mut state, BrowserAction::HideSurface(Surface::Editor)).expect("hide");
        assert_eq!(state.editing_path, None);
        assert!(!state.surfaces.is_open(Surface::Editor));
    }

    #[test]
    fn notice_text_prefixes_level() {
        assert_eq!(Notice::error("x").text(), "Error: x");
        assert_eq!(Notice::success("y").text(), "Success: y");
        assert_eq!(Notice::info("z").text(), "z");
    }
}
