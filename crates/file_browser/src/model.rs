use platform_host::{DirectoryEntry, SearchMatch};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identity of one outbound backend request.
///
/// `seq` is unique per session; `generation` is the view generation the request belongs to.
pub struct RequestTicket {
    pub seq: u64,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    CreateFile,
    CreateFolder,
    Rename,
    Editor,
}

impl Surface {
    pub const ALL: [Surface; 4] = [
        Surface::CreateFile,
        Surface::CreateFolder,
        Surface::Rename,
        Surface::Editor,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::CreateFile => "New File",
            Self::CreateFolder => "New Folder",
            Self::Rename => "Rename",
            Self::Editor => "Edit File",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Open/closed flags for the modal surfaces. Any combination may be open at once.
pub struct SurfaceSet {
    create_file: bool,
    create_folder: bool,
    rename: bool,
    editor: bool,
}

impl SurfaceSet {
    pub fn is_open(&self, surface: Surface) -> bool {
        match surface {
            Surface::CreateFile => self.create_file,
            Surface::CreateFolder => self.create_folder,
            Surface::Rename => self.rename,
            Surface::Editor => self.editor,
        }
    }

    pub fn set(&mut self, surface: Surface, open: bool) {
        let slot = match surface {
            Surface::CreateFile => &mut self.create_file,
            Surface::CreateFolder => &mut self.create_folder,
            Surface::Rename => &mut self.rename,
            Surface::Editor => &mut self.editor,
        };
        *slot = open;
    }

    pub fn open_count(&self) -> usize {
        Surface::ALL
            .iter()
            .filter(|surface| self.is_open(**surface))
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    NewFileName,
    NewFileContent,
    NewFolderName,
    RenameName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Text typed into the modal surfaces.
pub struct Drafts {
    pub new_file_name: String,
    pub new_file_content: String,
    pub new_folder_name: String,
    pub rename_name: String,
}

impl Drafts {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::NewFileName => &self.new_file_name,
            DraftField::NewFileContent => &self.new_file_content,
            DraftField::NewFolderName => &self.new_folder_name,
            DraftField::RenameName => &self.rename_name,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::NewFileName => self.new_file_name = value,
            DraftField::NewFileContent => self.new_file_content = value,
            DraftField::NewFolderName => self.new_folder_name = value,
            DraftField::RenameName => self.rename_name = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub pattern: String,
    pub matches: Vec<SearchMatch>,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BrowseMode {
    #[default]
    Browsing,
    Searching(SearchView),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusKind {
    #[default]
    Ready,
    Loading,
    Searching,
    Found(usize),
    Error,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuState {
    pub x: i32,
    pub y: i32,
    pub path: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// User-facing failures. Every variant is shown the same way: a blocking notice plus the
/// error status.
pub enum BrowserError {
    /// The backend rejected a call or could not be reached.
    #[error("{message}")]
    Backend { message: String },
    #[error("Please enter a file name")]
    MissingFileName,
    #[error("Please enter a folder name")]
    MissingFolderName,
    #[error("Select an item and enter a new name")]
    MissingNewName,
    #[error("Enter a search keyword")]
    EmptySearchPattern,
    #[error("Select an item to delete first")]
    NothingSelectedForDelete,
    #[error("Select an item to rename first")]
    NothingSelectedForRename,
}

impl BrowserError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Everything one browsing session knows. Owned by a single writer (the reducer).
pub struct SessionState {
    /// Directory of the last applied listing, as resolved by the backend.
    pub current_directory: String,
    /// Selected paths; holds zero or one element.
    pub selected_paths: Vec<String>,
    /// File open in the editor surface.
    pub editing_path: Option<String>,
    pub entries: Vec<DirectoryEntry>,
    pub mode: BrowseMode,
    pub surfaces: SurfaceSet,
    pub drafts: Drafts,
    pub editor_title: String,
    pub editor_text: String,
    pub search_input: String,
    pub context_menu: Option<ContextMenuState>,
    pub status: StatusKind,
    pub last_error: Option<BrowserError>,
    /// Path waiting for the host's delete confirmation.
    pub pending_delete: Option<String>,
    pub next_request_seq: u64,
    pub view_generation: u64,
    /// Newest view generation whose reply has arrived.
    pub settled_view_generation: u64,
    /// Sequence of the newest open or edit request.
    pub latest_open_seq: Option<u64>,
}

impl SessionState {
    pub fn selected_path(&self) -> Option<&str> {
        self.selected_paths.first().map(String::as_str)
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selected_paths.iter().any(|selected| selected == path)
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, BrowseMode::Searching(_))
    }

    pub fn is_editing(&self) -> bool {
        self.editing_path.is_some()
    }

    pub fn search_view(&self) -> Option<&SearchView> {
        match &self.mode {
            BrowseMode::Searching(view) => Some(view),
            BrowseMode::Browsing => None,
        }
    }

    /// Whether a reply tagged with `ticket` still belongs to the visible view.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.generation == self.view_generation
    }

    /// Whether a listing, parent navigation, or search is still waiting on its reply.
    pub fn has_pending_view(&self) -> bool {
        self.settled_view_generation < self.view_generation
    }

    pub fn is_latest_open(&self, ticket: RequestTicket) -> bool {
        self.latest_open_seq == Some(ticket.seq)
    }

    pub(crate) fn settle_view(&mut self, ticket: RequestTicket) {
        self.settled_view_generation = self.settled_view_generation.max(ticket.generation);
    }

    pub(crate) fn issue_ticket(&mut self, replaces_view: bool) -> RequestTicket {
        let seq = self.next_request_seq;
        self.next_request_seq += 1;
        if replaces_view {
            self.view_generation += 1;
        }
        RequestTicket {
            seq,
            generation: self.view_generation,
        }
    }

    pub(crate) fn select_only(&mut self, path: String) {
        self.selected_paths.clear();
        self.selected_paths.push(path);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn view_tickets_advance_generation_and_others_share_it() {
        let mut state = SessionState::default();
        let list = state.issue_ticket(true);
        let info = state.issue_ticket(false);
        let search = state.issue_ticket(true);

        assert_eq!(list, RequestTicket { seq: 0, generation: 1 });
        assert_eq!(info, RequestTicket { seq: 1, generation: 1 });
        assert_eq!(search, RequestTicket { seq: 2, generation: 2 });
        assert!(!state.is_current(info));
        assert!(state.is_current(search));
    }

    #[test]
    fn view_stays_pending_until_its_newest_generation_settles() {
        let mut state = SessionState::default();
        assert!(!state.has_pending_view());

        let first = state.issue_ticket(true);
        let second = state.issue_ticket(true);
        assert!(state.has_pending_view());

        state.settle_view(second);
        assert!(!state.has_pending_view());
        state.settle_view(first);
        assert_eq!(state.settled_view_generation, second.generation);
        assert!(!state.has_pending_view());
    }

    #[test]
    fn only_the_newest_open_is_latest() {
        let mut state = SessionState::default();
        let first = state.issue_ticket(false);
        state.latest_open_seq = Some(first.seq);
        let second = state.issue_ticket(false);
        assert!(state.is_latest_open(first));

        state.latest_open_seq = Some(second.seq);
        assert!(!state.is_latest_open(first));
        assert!(state.is_latest_open(second));
    }

    #[test]
    fn select_only_keeps_a_single_path() {
        let mut state = SessionState::default();
        state.selected_paths = vec!["/a".to_string(), "/b".to_string()];
        state.select_only("/c".to_string());
        assert_eq!(state.selected_paths, vec!["/c".to_string()]);
        assert!(state.is_selected("/c"));
        assert!(!state.is_selected("/a"));
    }

    #[test]
    fn surfaces_open_independently() {
        let mut surfaces = SurfaceSet::default();
        surfaces.set(Surface::Rename, true);
        surfaces.set(Surface::Editor, true);
        assert!(surfaces.is_open(Surface::Rename));
        assert!(!surfaces.is_open(Surface::CreateFile));
        assert_eq!(surfaces.open_count(), 2);
        surfaces.set(Surface::Rename, false);
        assert_eq!(surfaces.open_count(), 1);
    }
}
