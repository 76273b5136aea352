//! Browser dialogs: `window.alert`, `window.confirm`, and the async clipboard API.

use platform_host::{DialogFuture, HostDialogService};

#[derive(Debug, Clone, Copy, Default)]
/// [`HostDialogService`] backed by the page window.
pub struct WebDialogService;

impl HostDialogService for WebDialogService {
    fn alert<'a>(&'a self, message: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
                return window
                    .alert_with_message(message)
                    .map_err(|e| format!("alert failed: {e:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = message;
                Ok(())
            }
        })
    }

    fn confirm<'a>(&'a self, message: &'a str) -> DialogFuture<'a, bool> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                return web_sys::window()
                    .and_then(|w| w.confirm_with_message(message).ok())
                    .unwrap_or(false);
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = message;
                false
            }
        })
    }

    fn copy_text<'a>(&'a self, text: &'a str) -> DialogFuture<'a, Result<(), String>> {
        Box::pin(async move { crate::bridge::copy_text(text).await })
    }
}
