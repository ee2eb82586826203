//! Routing of keypad input into the calculator.
//!
//! Every key maps to exactly one engine operation; the caller refreshes the
//! display from [`Calculator::format_display`] afterwards.

mod keys;

pub use keys::{InputError, Key, parse_line};

use crate::calculator::Calculator;
use tracing::trace;

/// What the caller still has to do after a key was dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatched {
    /// The engine handled the key.
    Applied,
    /// The key asks for the current operand to be copied.
    CopyRequested,
}

/// Forward a key to the matching engine operation.
pub fn dispatch(calculator: &mut Calculator, key: Key) -> Dispatched {
    trace!(%key, "dispatch");

    match key {
        Key::Digit(c) => calculator.append_digit_or_point(c),
        Key::Point => calculator.append_digit_or_point('.'),
        Key::Operation(op) => calculator.choose_operation(op),
        Key::Equals => {
            calculator.compute();
        }
        Key::Delete => calculator.delete_last_character(),
        Key::Clear => calculator.clear(),
        Key::Copy => return Dispatched::CopyRequested,
    }

    Dispatched::Applied
}
