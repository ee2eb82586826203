//! Terminal rendering of the calculator display.
//!
//! Renders the projection as two right-aligned lines: the previous operand
//! with its pending operation on top, the current operand below.

use crate::calculator::Projection;

/// Render both display slots, each right-aligned to `width` characters.
pub fn render_display(projection: &Projection, width: usize) -> String {
    format!(
        "{}\n{}",
        render_slot(&projection.previous, width),
        render_slot(&projection.current, width)
    )
}

/// Right-align one slot. Text wider than the slot keeps its rightmost
/// characters behind a leading ellipsis.
fn render_slot(text: &str, width: usize) -> String {
    let len = text.chars().count();

    if len <= width {
        return format!("{text:>width$}");
    }

    if width == 0 {
        return String::new();
    }

    let tail: String = text.chars().skip(len - (width - 1)).collect();
    format!("…{tail}")
}
