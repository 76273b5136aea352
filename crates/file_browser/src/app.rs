//! Leptos view for the file browser.
//!
//! [`FileBrowserApp`] keeps the session in a signal and funnels every user interaction through
//! [`reduce_browser`]. Emitted effects are queued and drained by an effect; backend calls run on
//! `spawn_local`, so several may be in flight at once and the reducer's stale guard decides
//! which replies still apply.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use platform_host::HostServices;

use crate::{
    model::{DraftField, SessionState, Surface},
    prefs::{load_file_browser_prefs, FileBrowserPrefs},
    presentation::{count_label, path_label, render_listing, status_label, ItemActivation, ItemView},
    reducer::{reduce_browser, BrowserAction, BrowserEffect, ContextCommand},
    requests::execute_request,
    shortcuts::{is_search_submit, resolve_shortcut, KeyChord, Shortcut},
};

#[derive(Clone, Copy)]
/// Reactive handles shared by the file browser view tree.
pub struct BrowserRuntime {
    /// Host services the effects run against.
    pub host: StoredValue<HostServices>,
    /// Session state, written only by [`Self::dispatch`].
    pub state: RwSignal<SessionState>,
    /// Preferences loaded at startup.
    pub prefs: RwSignal<FileBrowserPrefs>,
    /// Effects waiting to be executed.
    pub effects: RwSignal<Vec<BrowserEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<BrowserAction>,
    /// The toolbar search box, focused by the find shortcut.
    pub search_input: NodeRef<html::Input>,
}

impl BrowserRuntime {
    pub fn dispatch_action(&self, action: BrowserAction) {
        self.dispatch.call(action);
    }

    fn edit_draft(&self, field: DraftField, value: String) {
        self.dispatch_action(BrowserAction::EditDraft { field, value });
    }
}

fn run_effect(runtime: BrowserRuntime, effect: BrowserEffect) {
    match effect {
        BrowserEffect::Request { ticket, request } => {
            let files = runtime.host.get_value().files;
            spawn_local(async move {
                let response = execute_request(files.as_ref(), request).await;
                runtime.dispatch_action(BrowserAction::BackendCompleted { ticket, response });
            });
        }
        BrowserEffect::ConfirmDelete { prompt, .. } => {
            let dialogs = runtime.host.get_value().dialogs;
            spawn_local(async move {
                let accepted = dialogs.confirm(&prompt).await;
                runtime.dispatch_action(BrowserAction::DeleteConfirmed { accepted });
            });
        }
        BrowserEffect::Notify(notice) => {
            let dialogs = runtime.host.get_value().dialogs;
            spawn_local(async move {
                if let Err(err) = dialogs.alert(&notice.text()).await {
                    logging::warn!("notice dropped: {err}");
                }
            });
        }
        BrowserEffect::CopyToClipboard(text) => {
            let dialogs = runtime.host.get_value().dialogs;
            spawn_local(async move {
                if let Err(err) = dialogs.copy_text(&text).await {
                    logging::warn!("clipboard write failed: {err}");
                }
            });
        }
        BrowserEffect::FocusSearchInput => {
            if let Some(input) = runtime.search_input.get_untracked() {
                if let Err(err) = input.focus() {
                    logging::debug_warn!("search box focus failed: {err:?}");
                }
            }
        }
    }
}

fn install_effect_executor(runtime: BrowserRuntime) {
    // Take the batch before running it so dispatches made while draining queue a new one.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }
        runtime.effects.set(Vec::new());
        for effect in queued {
            run_effect(runtime, effect);
        }
    });
}

fn install_boot(runtime: BrowserRuntime) {
    create_effect(move |_| {
        let prefs = load_file_browser_prefs(runtime.host.get_value().prefs.as_ref());
        let path = prefs.start_directory.clone();
        runtime.prefs.set(prefs);
        runtime.dispatch_action(BrowserAction::LoadDirectory { path });
    });
}

fn install_window_listeners(runtime: BrowserRuntime) {
    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || !runtime.prefs.get_untracked().keyboard_shortcuts {
            return;
        }
        let Some(shortcut) = resolve_shortcut(&KeyChord::from_keyboard_event(&ev)) else {
            return;
        };
        if shortcut.overrides_browser() {
            ev.prevent_default();
        }
        runtime.dispatch_action(BrowserAction::KeyPressed(shortcut));
    });
    on_cleanup(move || shortcut_listener.remove());

    let dismiss_listener = window_event_listener(ev::click, move |_| {
        if runtime.state.with_untracked(|state| state.context_menu.is_some()) {
            runtime.dispatch_action(BrowserAction::DocumentClick);
        }
    });
    on_cleanup(move || dismiss_listener.remove());
}

#[component]
/// Complete file browser bound to `host_services`.
pub fn FileBrowserApp(
    /// Host service bundle assembled by the entry layer.
    host_services: HostServices,
) -> impl IntoView {
    let host = store_value(host_services);
    let state = create_rw_signal(SessionState::default());
    let prefs = create_rw_signal(FileBrowserPrefs::default());
    let effects = create_rw_signal(Vec::<BrowserEffect>::new());
    let search_input = create_node_ref::<html::Input>();

    let dispatch = Callback::new(move |action: BrowserAction| {
        let mut session = state.get_untracked();
        let previous = session.clone();
        match reduce_browser(&mut session, action) {
            Ok(new_effects) => {
                if session != previous {
                    state.set(session);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("file browser reducer error: {err}"),
        }
    });

    let runtime = BrowserRuntime {
        host,
        state,
        prefs,
        effects,
        dispatch,
        search_input,
    };

    install_effect_executor(runtime);
    install_window_listeners(runtime);
    install_boot(runtime);

    view! {
        <div class="file-browser">
            <Sidebar runtime=runtime />
            <main class="main-content">
                <Toolbar runtime=runtime />
                <div class="path-bar">
                    {move || state.with(|state| path_label(&state.current_directory))}
                </div>
                <Listing runtime=runtime />
                <div class="status-bar">
                    <span>{move || state.with(|state| status_label(state.status))}</span>
                    <span>
                        {move || {
                            state.with(|state| match state.search_view() {
                                Some(search) => count_label(search.count),
                                None => count_label(state.entries.len()),
                            })
                        }}
                    </span>
                </div>
            </main>
            <ContextMenu runtime=runtime />
            <CreateFileModal runtime=runtime />
            <CreateFolderModal runtime=runtime />
            <RenameModal runtime=runtime />
            <EditorModal runtime=runtime />
        </div>
    }
}

#[component]
fn Sidebar(runtime: BrowserRuntime) -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-section">
                <div
                    class="sidebar-item"
                    on:click=move |_| runtime.dispatch_action(BrowserAction::NavigateHome)
                >
                    "🏠 Home"
                </div>
                <div
                    class="sidebar-item"
                    on:click=move |_| run_effect(runtime, BrowserEffect::FocusSearchInput)
                >
                    "🔍 Search files"
                </div>
            </div>
            <div class="sidebar-section">
                <div
                    class="sidebar-item"
                    on:click=move |_| {
                        runtime.dispatch_action(BrowserAction::ShowSurface(Surface::CreateFile))
                    }
                >
                    "📄 New file"
                </div>
                <div
                    class="sidebar-item"
                    on:click=move |_| {
                        runtime.dispatch_action(BrowserAction::ShowSurface(Surface::CreateFolder))
                    }
                >
                    "📁 New folder"
                </div>
            </div>
        </aside>
    }
}

#[component]
fn Toolbar(runtime: BrowserRuntime) -> impl IntoView {
    let state = runtime.state;
    let submit_search = move || runtime.dispatch_action(BrowserAction::SubmitSearch);
    let search_node = runtime.search_input;

    view! {
        <div class="toolbar">
            <button
                type="button"
                class="btn"
                on:click=move |_| runtime.dispatch_action(BrowserAction::NavigateToParent)
            >
                "⬆️ Up"
            </button>
            <button
                type="button"
                class="btn"
                title=Shortcut::Refresh.hint()
                on:click=move |_| runtime.dispatch_action(BrowserAction::Refresh)
            >
                "🔄 Refresh"
            </button>
            <button
                type="button"
                class="btn btn-secondary"
                title=Shortcut::NewFile.hint()
                on:click=move |_| {
                    runtime.dispatch_action(BrowserAction::ShowSurface(Surface::CreateFile))
                }
            >
                "📄 New file"
            </button>
            <button
                type="button"
                class="btn btn-secondary"
                on:click=move |_| {
                    runtime.dispatch_action(BrowserAction::ShowSurface(Surface::CreateFolder))
                }
            >
                "📁 New folder"
            </button>
            <button
                type="button"
                class="btn btn-danger"
                title=Shortcut::DeleteSelection.hint()
                on:click=move |_| runtime.dispatch_action(BrowserAction::RequestDelete)
            >
                "🗑️ Delete"
            </button>
            <button
                type="button"
                class="btn btn-secondary"
                title=Shortcut::Rename.hint()
                on:click=move |_| runtime.dispatch_action(BrowserAction::ShowRenameSurface)
            >
                "✏️ Rename"
            </button>
            <div class="search-box">
                <input
                    type="text"
                    placeholder="Search files..."
                    title=Shortcut::FocusSearch.hint()
                    node_ref=search_node
                    prop:value=move || state.with(|state| state.search_input.clone())
                    on:input=move |ev| {
                        runtime.dispatch_action(BrowserAction::SetSearchInput {
                            text: event_target_value(&ev),
                        })
                    }
                    on:keydown=move |ev: ev::KeyboardEvent| {
                        if runtime.prefs.get_untracked().search_on_enter
                            && is_search_submit(&KeyChord::from_keyboard_event(&ev))
                        {
                            submit_search();
                        }
                    }
                />
            </div>
            <button type="button" class="btn" on:click=move |_| submit_search()>
                "🔍 Search"
            </button>
        </div>
    }
}

#[component]
fn Listing(runtime: BrowserRuntime) -> impl IntoView {
    let listing = create_memo(move |_| runtime.state.with(render_listing));

    view! {
        <div class="file-list">
            {move || {
                listing
                    .with(|listing| listing.heading.clone().zip(listing.back_label))
                    .map(|(heading, back)| {
                        view! {
                            <div class="search-heading">
                                <h3>{heading}</h3>
                                <button
                                    type="button"
                                    class="btn btn-secondary"
                                    on:click=move |_| runtime.dispatch_action(BrowserAction::ExitSearch)
                                >
                                    {back}
                                </button>
                            </div>
                        }
                    })
            }}
            {move || {
                let listing = listing.get();
                if let Some(message) = listing.empty_message {
                    return view! { <div class="loading">{message}</div> }.into_view();
                }
                let activation = listing.activation;
                let context_menu = listing.context_menu;
                view! {
                    <div class="file-grid">
                        {listing
                            .items
                            .into_iter()
                            .map(|item| view! {
                                <ListingItem
                                    runtime=runtime
                                    item=item
                                    activation=activation
                                    context_menu=context_menu
                                />
                            })
                            .collect_view()}
                    </div>
                }
                .into_view()
            }}
        </div>
    }
}

#[component]
fn ListingItem(
    runtime: BrowserRuntime,
    item: ItemView,
    activation: ItemActivation,
    context_menu: bool,
) -> impl IntoView {
    let ItemView {
        name,
        path,
        icon,
        size_label,
        selected,
        ..
    } = item;
    let select_path = path.clone();
    let activate_path = path.clone();
    let menu_path = path.clone();

    view! {
        <div
            class=if selected { "file-item selected" } else { "file-item" }
            title=path
            on:click=move |_| {
                runtime.dispatch_action(BrowserAction::SelectItem {
                    path: select_path.clone(),
                })
            }
            on:dblclick=move |_| {
                let path = activate_path.clone();
                runtime.dispatch_action(match activation {
                    ItemActivation::Open => BrowserAction::OpenItem { path: Some(path) },
                    ItemActivation::Edit => BrowserAction::EditFile { path },
                })
            }
            on:contextmenu=move |ev: ev::MouseEvent| {
                if !context_menu {
                    return;
                }
                ev.prevent_default();
                runtime.dispatch_action(BrowserAction::OpenContextMenu {
                    path: menu_path.clone(),
                    x: ev.page_x(),
                    y: ev.page_y(),
                });
            }
        >
            <div class="file-icon">{icon}</div>
            <div class="file-name">{name}</div>
            <div class="file-size">{size_label}</div>
        </div>
    }
}

#[component]
fn ContextMenu(runtime: BrowserRuntime) -> impl IntoView {
    let state = runtime.state;
    let position = move || {
        state.with(|state| {
            state
                .context_menu
                .as_ref()
                .map(|menu| format!("left: {}px; top: {}px;", menu.x, menu.y))
                .unwrap_or_default()
        })
    };

    view! {
        <Show when=move || state.with(|state| state.context_menu.is_some()) fallback=|| ()>
            <div class="context-menu" role="menu" style=position>
                {ContextCommand::ALL
                    .into_iter()
                    .map(|command| view! {
                        <div
                            class="context-menu-item"
                            role="menuitem"
                            on:click=move |_| runtime.dispatch_action(BrowserAction::ContextMenu(command))
                        >
                            {command.label()}
                        </div>
                    })
                    .collect_view()}
            </div>
        </Show>
    }
}

#[component]
fn Modal(runtime: BrowserRuntime, surface: Surface, children: ChildrenFn) -> impl IntoView {
    let state = runtime.state;
    let title = move || {
        state.with(|state| match surface {
            Surface::Editor if !state.editor_title.is_empty() => state.editor_title.clone(),
            _ => surface.title().to_string(),
        })
    };

    view! {
        <Show when=move || state.with(|state| state.surfaces.is_open(surface)) fallback=|| ()>
            <div class="modal" role="dialog" aria-label=surface.title()>
                <div class="modal-content">
                    <div class="modal-header">
                        <h3>{title}</h3>
                        <button
                            type="button"
                            class="close"
                            on:click=move |_| runtime.dispatch_action(BrowserAction::HideSurface(surface))
                        >
                            "×"
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn DraftInput(runtime: BrowserRuntime, field: DraftField, label: &'static str) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                prop:value=move || runtime.state.with(|state| state.drafts.get(field).to_string())
                on:input=move |ev| runtime.edit_draft(field, event_target_value(&ev))
            />
        </div>
    }
}

#[component]
fn ModalActions(
    runtime: BrowserRuntime,
    surface: Surface,
    submit_label: &'static str,
    submit: BrowserAction,
) -> impl IntoView {
    view! {
        <div class="modal-actions">
            <button
                type="button"
                class="btn"
                on:click=move |_| runtime.dispatch_action(submit.clone())
            >
                {submit_label}
            </button>
            <button
                type="button"
                class="btn btn-secondary"
                on:click=move |_| runtime.dispatch_action(BrowserAction::HideSurface(surface))
            >
                "Cancel"
            </button>
        </div>
    }
}

#[component]
fn CreateFileModal(runtime: BrowserRuntime) -> impl IntoView {
    view! {
        <Modal runtime=runtime surface=Surface::CreateFile>
            <DraftInput runtime=runtime field=DraftField::NewFileName label="File name" />
            <div class="form-group">
                <label>"Content"</label>
                <textarea
                    rows="8"
                    prop:value=move || {
                        runtime
                            .state
                            .with(|state| state.drafts.get(DraftField::NewFileContent).to_string())
                    }
                    on:input=move |ev| {
                        runtime.edit_draft(DraftField::NewFileContent, event_target_value(&ev))
                    }
                ></textarea>
            </div>
            <ModalActions
                runtime=runtime
                surface=Surface::CreateFile
                submit_label="Create"
                submit=BrowserAction::CreateFile
            />
        </Modal>
    }
}

#[component]
fn CreateFolderModal(runtime: BrowserRuntime) -> impl IntoView {
    view! {
        <Modal runtime=runtime surface=Surface::CreateFolder>
            <DraftInput runtime=runtime field=DraftField::NewFolderName label="Folder name" />
            <ModalActions
                runtime=runtime
                surface=Surface::CreateFolder
                submit_label="Create"
                submit=BrowserAction::CreateFolder
            />
        </Modal>
    }
}

#[component]
fn RenameModal(runtime: BrowserRuntime) -> impl IntoView {
    view! {
        <Modal runtime=runtime surface=Surface::Rename>
            <DraftInput runtime=runtime field=DraftField::RenameName label="New name" />
            <ModalActions
                runtime=runtime
                surface=Surface::Rename
                submit_label="Rename"
                submit=BrowserAction::SubmitRename
            />
        </Modal>
    }
}

#[component]
fn EditorModal(runtime: BrowserRuntime) -> impl IntoView {
    view! {
        <Modal runtime=runtime surface=Surface::Editor>
            <textarea
                class="editor"
                rows="20"
                prop:value=move || runtime.state.with(|state| state.editor_text.clone())
                on:input=move |ev| {
                    runtime.dispatch_action(BrowserAction::SetEditorText {
                        text: event_target_value(&ev),
                    })
                }
            ></textarea>
            <ModalActions
                runtime=runtime
                surface=Surface::Editor
                submit_label="💾 Save"
                submit=BrowserAction::SaveFile
            />
        </Modal>
    }
}
