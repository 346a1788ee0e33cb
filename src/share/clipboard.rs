use crate::error::AppError;

/// Put `text` on the system clipboard.
///
/// On X11/Wayland the selection is owned by this process, so without a
/// clipboard manager the content is gone once the process exits.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<(), AppError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
