//! Clipboard functionality for copying calculator results.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("nothing to copy")]
    Empty,
    #[error("failed to access clipboard: {0}")]
    Access(#[source] arboard::Error),
    #[error("failed to copy to clipboard: {0}")]
    Write(#[source] arboard::Error),
}

/// Copy an operand to the system clipboard.
///
/// The raw buffer is copied, without thousands separators, so it can be
/// pasted into other programs as a number.
pub fn copy_to_clipboard(operand: &str) -> Result<(), ClipboardError> {
    if operand.is_empty() {
        return Err(ClipboardError::Empty);
    }

    let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;

    clipboard
        .set_text(operand.to_string())
        .map_err(ClipboardError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_operand_not_copied() {
        assert!(matches!(copy_to_clipboard(""), Err(ClipboardError::Empty)));
    }
}
