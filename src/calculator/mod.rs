//! Calculator module for the four-function keypad.
//!
//! This module provides:
//! - The computation engine holding operands and the pending operation
//! - Locale-aware formatting of operands for display
//! - Copying results to the clipboard

mod clipboard;
mod engine;
mod format;
mod operation;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use engine::{Calculator, Projection};
pub use format::{Locale, LocaleError};
pub use operation::{Operation, OperationParseError};
