//! The keypad computation engine.
//!
//! Holds the operand being typed, the operand captured before the last
//! operation, and the pending operation. Operands stay text until
//! [`Calculator::compute`] so typing never shows float artifacts.
//! Invalid input is absorbed as a no-op; nothing here returns an error.

use super::format::Locale;
use super::operation::Operation;
use serde::Serialize;
use tracing::{debug, trace};

/// Display-ready rendering of the engine state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Previous operand and pending operation symbol, e.g. `1,234 +`.
    pub previous: String,
    /// The operand being typed (or the last result).
    pub current: String,
}

/// Four-function calculator state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calculator {
    current_operand: String,
    previous_operand: String,
    operation: Option<Operation>,
    locale: Locale,
}

impl Calculator {
    /// Create an empty calculator formatting with the default locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty calculator formatting with `locale`.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn current_operand(&self) -> &str {
        &self.current_operand
    }

    pub fn previous_operand(&self) -> &str {
        &self.previous_operand
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Reset both operands and the pending operation. The locale is kept.
    pub fn clear(&mut self) {
        self.current_operand.clear();
        self.previous_operand.clear();
        self.operation = None;
    }

    /// Append a digit or a decimal point to the current operand.
    ///
    /// A second `.` is ignored, as is anything that is not `0`-`9` or `.`.
    pub fn append_digit_or_point(&mut self, token: char) {
        if token == '.' && self.current_operand.contains('.') {
            trace!("ignoring second decimal point");
            return;
        }
        if token != '.' && !token.is_ascii_digit() {
            trace!(%token, "ignoring non-digit token");
            return;
        }
        self.current_operand.push(token);
    }

    /// Remove the last character of the current operand, if any.
    pub fn delete_last_character(&mut self) {
        self.current_operand.pop();
    }

    /// Select the pending operation.
    ///
    /// Ignored while the current operand is empty. If an operation is already
    /// pending it is computed first, so `5 + 3 −` leaves `8 −` pending.
    pub fn choose_operation(&mut self, operation: Operation) {
        if self.current_operand.is_empty() {
            trace!(%operation, "ignoring operation without an operand");
            return;
        }
        if !self.previous_operand.is_empty() {
            self.compute();
        }
        self.operation = Some(operation);
        self.previous_operand = std::mem::take(&mut self.current_operand);
    }

    /// Apply the pending operation to the two operands.
    ///
    /// Returns the result, or `None` when either operand does not parse or no
    /// operation is pending; in that case the state is left untouched.
    pub fn compute(&mut self) -> Option<f64> {
        let lhs = parse_operand(&self.previous_operand)?;
        let rhs = parse_operand(&self.current_operand)?;
        let operation = self.operation?;

        let result = operation.apply(lhs, rhs);
        debug!(lhs, %operation, rhs, result, "computed");

        self.current_operand = render_number(result);
        self.previous_operand.clear();
        self.operation = None;

        Some(result)
    }

    /// Format both display slots with the configured locale.
    pub fn format_display(&self) -> Projection {
        let previous = match self.operation {
            Some(operation) => format!(
                "{} {}",
                self.locale.format_operand(&self.previous_operand),
                operation.symbol()
            ),
            None => String::new(),
        };

        Projection {
            previous,
            current: self.locale.format_operand(&self.current_operand),
        }
    }
}

/// Parse an operand buffer.
///
/// Only the forms a buffer can legitimately hold are numbers: digits with at
/// most one `.` and an optional leading `-`, or exactly `Infinity` and
/// `-Infinity`. Anything else, `NaN` and truncated `Inf` included, is not.
fn parse_operand(text: &str) -> Option<f64> {
    let magnitude = text.strip_prefix('-').unwrap_or(text);

    if magnitude == "Infinity" {
        return text.parse().ok();
    }

    let has_digit = magnitude.bytes().any(|b| b.is_ascii_digit());
    let well_formed = magnitude.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && magnitude.bytes().filter(|&b| b == b'.').count() <= 1;
    if !has_digit || !well_formed {
        return None;
    }

    text.parse().ok()
}

/// Render a result back into an operand buffer.
///
/// Finite values use the shortest round-trip form without an exponent.
/// Negative zero renders as `0`.
fn render_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        value.to_string()
    }
}
