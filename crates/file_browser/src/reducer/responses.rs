//! Reducer helpers for applying backend replies.

use platform_host::OperationMessage;

use crate::{
    model::{BrowseMode, BrowserError, SearchView, SessionState, StatusKind, Surface},
    presentation::{describe_metadata, editor_title},
    reducer::{fail, issue, resync_listing, succeed, BrowserEffect, Notice},
    requests::{BackendRequest, BackendResponse, FileInfoIntent},
};

pub(super) fn apply_response(
    state: &mut SessionState,
    effects: &mut Vec<BrowserEffect>,
    response: BackendResponse,
) {
    match response {
        BackendResponse::DirectoryListed(Ok(listing)) => {
            state.current_directory = listing.directory;
            state.entries = listing.items;
            state.selected_paths.clear();
            state.context_menu = None;
            state.mode = BrowseMode::Browsing;
            state.status = StatusKind::Ready;
            state.last_error = None;
        }
        BackendResponse::NavigatedToParent(Ok(())) => {
            issue(state, effects, BackendRequest::ListDirectory { path: None });
        }
        BackendResponse::FileInfoLoaded {
            path,
            intent: FileInfoIntent::Open,
            result: Ok(meta),
        } => {
            let request = if meta.is_directory {
                BackendRequest::ListDirectory { path: Some(path) }
            } else {
                BackendRequest::ReadFile { path }
            };
            issue(state, effects, request);
        }
        BackendResponse::FileInfoLoaded {
            intent: FileInfoIntent::Properties,
            result: Ok(meta),
            ..
        } => {
            effects.push(BrowserEffect::Notify(Notice::info(describe_metadata(&meta))));
        }
        BackendResponse::FileRead {
            path,
            result: Ok(file),
        } => {
            state.editor_title = editor_title(file.name.as_deref(), &path);
            state.editor_text = file.content;
            state.editing_path = Some(path);
            state.surfaces.set(Surface::Editor, true);
        }
        BackendResponse::FileWritten { result: Ok(_), .. } => {
            state.surfaces.set(Surface::Editor, false);
            state.editing_path = None;
            succeed(state, effects, "File saved");
            resync_listing(state, effects);
        }
        BackendResponse::FileCreated {
            name,
            result: Ok(message),
        } => {
            let fallback = format!("File '{name}' created");
            finish_mutation(state, effects, Some(Surface::CreateFile), None, &message, &fallback);
        }
        BackendResponse::DirectoryCreated {
            name,
            result: Ok(message),
        } => {
            let fallback = format!("Folder '{name}' created");
            finish_mutation(
                state,
                effects,
                Some(Surface::CreateFolder),
                None,
                &message,
                &fallback,
            );
        }
        BackendResponse::ItemDeleted {
            path,
            result: Ok(message),
        } => {
            finish_mutation(state, effects, None, Some(&path), &message, "Item deleted");
        }
        BackendResponse::ItemRenamed {
            old_path,
            result: Ok(message),
        } => {
            finish_mutation(
                state,
                effects,
                Some(Surface::Rename),
                Some(&old_path),
                &message,
                "Item renamed",
            );
        }
        BackendResponse::SearchCompleted {
            pattern,
            result: Ok(found),
        } => {
            state.status = StatusKind::Found(found.count);
            state.context_menu = None;
            state.last_error = None;
            state.mode = BrowseMode::Searching(SearchView {
                pattern,
                matches: found.results,
                count: found.count,
            });
        }
        BackendResponse::DirectoryListed(Err(message))
        | BackendResponse::NavigatedToParent(Err(message))
        | BackendResponse::FileInfoLoaded {
            result: Err(message),
            ..
        }
        | BackendResponse::FileRead {
            result: Err(message),
            ..
        }
        | BackendResponse::FileWritten {
            result: Err(message),
            ..
        }
        | BackendResponse::FileCreated {
            result: Err(message),
            ..
        }
        | BackendResponse::DirectoryCreated {
            result: Err(message),
            ..
        }
        | BackendResponse::ItemDeleted {
            result: Err(message),
            ..
        }
        | BackendResponse::ItemRenamed {
            result: Err(message),
            ..
        }
        | BackendResponse::SearchCompleted {
            result: Err(message),
            ..
        } => fail(state, effects, BrowserError::backend(message)),
    }
}

fn finish_mutation(
    state: &mut SessionState,
    effects: &mut Vec<BrowserEffect>,
    surface: Option<Surface>,
    mutated_path: Option<&str>,
    message: &OperationMessage,
    fallback: &str,
) {
    if let Some(surface) = surface {
        state.surfaces.set(surface, false);
    }
    if let Some(path) = mutated_path {
        state.selected_paths.retain(|selected| selected != path);
    }
    succeed(state, effects, message.text_or(fallback));
    resync_listing(state, effects);
}
