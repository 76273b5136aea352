//! Blocking dialog, confirmation, and clipboard contracts provided by the host page.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`HostDialogService`].
pub type DialogFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for user-facing dialogs.
pub trait HostDialogService {
    /// Shows a blocking notification.
    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, Result<(), String>>;

    /// Asks the user to accept or reject `message`. Resolves to `true` only on explicit acceptance.
    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool>;

    /// Copies `text` to the system clipboard.
    fn copy_text<'a>(&'a self, text: &'a str) -> DialogFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Dialog adapter for targets without a page: alerts are dropped and nothing is ever confirmed.
pub struct NoopDialogService;

impl HostDialogService for NoopDialogService {
    fn alert<'a>(&'a self, _message: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn confirm<'a>(&'a self, _message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async { false })
    }

    fn copy_text<'a>(&'a self, _text: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async { Err("clipboard unavailable".to_string()) })
    }
}

#[derive(Debug, Default)]
struct ScriptedDialogs {
    alerts: Vec<String>,
    prompts: Vec<String>,
    answers: VecDeque<bool>,
    clipboard: Vec<String>,
}

#[derive(Debug, Clone, Default)]
/// Scripted dialog adapter: records alerts, prompts, and clipboard writes, and answers
/// confirmations from a queue (an empty queue answers `false`).
pub struct ScriptedDialogService {
    inner: Rc<RefCell<ScriptedDialogs>>,
}

impl ScriptedDialogService {
    /// Queues the answer for the next confirmation prompt.
    pub fn answer_next_confirm(&self, accepted: bool) {
        self.inner.borrow_mut().answers.push_back(accepted);
    }

    /// Returns every alert message shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }

    /// Returns every confirmation prompt shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.inner.borrow().prompts.clone()
    }

    /// Returns every clipboard write so far.
    pub fn clipboard(&self) -> Vec<String> {
        self.inner.borrow().clipboard.clone()
    }
}

impl HostDialogService for ScriptedDialogService {
    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().alerts.push(message.to_string());
            Ok(())
        })
    }

    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async move {
            let mut dialogs = self.inner.borrow_mut();
            dialogs.prompts.push(message.to_string());
            dialogs.answers.pop_front().unwrap_or(false)
        })
    }

    fn copy_text<'a>(&'a self, text: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().clipboard.push(text.to_string());
            Ok(())
        })
    }
}
