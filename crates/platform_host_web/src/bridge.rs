//! Transport to the page-provided host API (`window.pywebview.api`).
//!
//! Every host method resolves to a `{ success, error?, ...payload }` object. The wasm build
//! forwards calls through a small inline JS shim; the native build rejects every call.

use serde::de::DeserializeOwned;
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
mod imp {
    use js_sys::Promise;
    use serde::Serialize;
    use serde_json::Value;
    use serde_wasm_bindgen::{from_value, Serializer};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
function hostApi() {
  const api = globalThis.pywebview && globalThis.pywebview.api;
  if (!api) {
    throw new Error('host API is not available (window.pywebview.api is missing)');
  }
  return api;
}

export async function jsHostCall(method, args) {
  const api = hostApi();
  const fn = api[method];
  if (typeof fn !== 'function') {
    throw new Error(`host API has no method ${method}`);
  }
  return await fn.apply(api, args);
}

export async function jsCopyText(text) {
  if (!globalThis.navigator || !globalThis.navigator.clipboard) {
    throw new Error('clipboard unavailable');
  }
  await globalThis.navigator.clipboard.writeText(text);
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsHostCall)]
        fn js_host_call(method: &str, args: JsValue) -> Promise;
        #[wasm_bindgen(js_name = jsCopyText)]
        fn js_copy_text(text: &str) -> Promise;
    }

    async fn await_promise(promise: Promise) -> Result<JsValue, String> {
        JsFuture::from(promise).await.map_err(js_error_to_string)
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    pub async fn host_call(method: &str, args: Value) -> Result<Value, String> {
        let args = args
            .serialize(&Serializer::json_compatible())
            .map_err(|e| e.to_string())?;
        let reply = await_promise(js_host_call(method, args)).await?;
        if reply.is_null() || reply.is_undefined() {
            return Err(format!("host API returned nothing for {method}"));
        }
        from_value(reply).map_err(|e| e.to_string())
    }

    pub async fn copy_text(text: &str) -> Result<(), String> {
        await_promise(js_copy_text(text)).await.map(|_| ())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use serde_json::Value;

    fn unsupported() -> String {
        "host API requires a wasm32 browser target".to_string()
    }

    pub async fn host_call(_method: &str, _args: Value) -> Result<Value, String> {
        Err(unsupported())
    }

    pub async fn copy_text(_text: &str) -> Result<(), String> {
        Err(unsupported())
    }
}

/// Calls `method` with positional `args` and decodes the reply payload.
pub(crate) async fn host_call<T: DeserializeOwned>(method: &str, args: Value) -> Result<T, String> {
    let reply = imp::host_call(method, args).await?;
    platform_host::decode_host_reply(reply)
}

pub(crate) async fn copy_text(text: &str) -> Result<(), String> {
    imp::copy_text(text).await
}
