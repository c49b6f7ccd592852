//! Clipboard access through the Web Clipboard API

use wasm_bindgen_futures::JsFuture;

/// Copy text to the system clipboard
///
/// Resolves once the browser confirms the write.
pub async fn write_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| format!("Failed to write clipboard: {:?}", e))
}
