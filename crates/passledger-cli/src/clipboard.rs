//! Clipboard copy with a delayed clear.

use std::thread;
use std::time::Duration;

use arboard::Clipboard;
use zeroize::Zeroizing;

/// Put `secret` on the clipboard, wait `clear_after`, then clear it.
///
/// The clipboard is only cleared if it still holds `secret`; anything the
/// user copied in the meantime is left alone. A zero delay returns at once
/// without clearing.
pub fn copy_then_clear(secret: &str, clear_after: Duration) -> anyhow::Result<()> {
    let mut clipboard =
        Clipboard::new().map_err(|e| anyhow::anyhow!("Clipboard unavailable: {}", e))?;
    clipboard
        .set_text(secret)
        .map_err(|e| anyhow::anyhow!("Failed to copy to clipboard: {}", e))?;
    tracing::debug!(seconds = clear_after.as_secs(), "Copied password to clipboard");

    if clear_after.is_zero() {
        return Ok(());
    }
    thread::sleep(clear_after);

    let current = clipboard.get_text().ok().map(Zeroizing::new);
    if current.as_deref().map(String::as_str) == Some(secret) {
        clipboard
            .clear()
            .map_err(|e| anyhow::anyhow!("Failed to clear clipboard: {}", e))?;
        tracing::debug!("Cleared clipboard");
    }
    Ok(())
}
