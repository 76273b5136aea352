//! Global keyboard bindings.

use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A key press with its modifiers, independent of the DOM event type.
pub struct KeyChord {
    /// `KeyboardEvent.key` value (`"n"`, `"Delete"`, `"F2"`, ...).
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    /// Whether the event came from a text input, where Delete and F2 keep their editing meaning.
    pub in_text_field: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }

    pub fn from_keyboard_event(ev: &web_sys::KeyboardEvent) -> Self {
        let in_text_field = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .map(|element| {
                let tag = element.tag_name();
                tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
            })
            .unwrap_or(false);
        Self {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
            in_text_field,
        }
    }

    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewFile,
    Refresh,
    FocusSearch,
    DeleteSelection,
    Rename,
}

impl Shortcut {
    /// Whether the browser's own binding for the chord must be suppressed.
    pub fn overrides_browser(self) -> bool {
        matches!(self, Self::NewFile | Self::Refresh | Self::FocusSearch)
    }

    /// Key combination shown in toolbar tooltips.
    pub fn hint(self) -> &'static str {
        match self {
            Self::NewFile => "Ctrl+N",
            Self::Refresh => "Ctrl+R",
            Self::FocusSearch => "Ctrl+F",
            Self::DeleteSelection => "Delete",
            Self::Rename => "F2",
        }
    }
}

/// Maps a key press to its global shortcut.
///
/// Ctrl or Cmd with `n`, `r`, `f` open the new-file surface, refresh, and focus search; `Delete`
/// deletes the selection and `F2` renames it, except while typing in a text field.
pub fn resolve_shortcut(chord: &KeyChord) -> Option<Shortcut> {
    if chord.has_command_modifier() {
        let command = match chord.key.to_ascii_lowercase().as_str() {
            "n" => Some(Shortcut::NewFile),
            "r" => Some(Shortcut::Refresh),
            "f" => Some(Shortcut::FocusSearch),
            _ => None,
        };
        if command.is_some() {
            return command;
        }
    }
    if chord.in_text_field {
        return None;
    }
    match chord.key.as_str() {
        "Delete" => Some(Shortcut::DeleteSelection),
        "F2" => Some(Shortcut::Rename),
        _ => None,
    }
}

/// Enter in the search box submits the search.
pub fn is_search_submit(chord: &KeyChord) -> bool {
    chord.key == "Enter"
}
