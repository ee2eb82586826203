//! Key tokens and the line tokenizer.

use crate::calculator::Operation;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// A single keypad key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `0` through `9`
    Digit(char),
    /// The decimal point
    Point,
    /// `+`, `−`, `×` or `÷`
    Operation(Operation),
    /// `=`
    Equals,
    /// Backspace
    Delete,
    /// All clear
    Clear,
    /// Copy the current operand
    Copy,
}

impl Key {
    /// Map a named key such as `del` or `ac`. Case-insensitive.
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "del" | "delete" | "backspace" => Some(Self::Delete),
            "ac" | "clear" => Some(Self::Clear),
            "copy" => Some(Self::Copy),
            _ => None,
        }
    }

    /// Map a single character key.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' => Some(Self::Point),
            '=' => Some(Self::Equals),
            _ => Operation::from_char(c).map(Self::Operation),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(c) => write!(f, "{c}"),
            Self::Point => f.write_str("."),
            Self::Operation(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Delete => f.write_str("DEL"),
            Self::Clear => f.write_str("AC"),
            Self::Copy => f.write_str("COPY"),
        }
    }
}

impl FromStr for Key {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(key) = Self::from_name(trimmed) {
            return Ok(key);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
        .ok_or_else(|| InputError::UnknownKey(trimmed.to_string()))
    }
}

/// Split a line of input into keys.
///
/// Words are separated by whitespace. A word naming a single key (`del`,
/// `ac`, `copy`, `7`, ...) is one key; any other word is read one character per key, so `12.5+3=`
/// yields seven keys. The whole line is rejected if any character is unknown.
pub fn parse_line(line: &str) -> Result<Vec<Key>, InputError> {
    let mut keys = Vec::new();

    for word in line.split_whitespace() {
        if let Ok(key) = word.parse::<Key>() {
            keys.push(key);
            continue;
        }

        for c in word.chars() {
            let key = Key::from_char(c).ok_or_else(|| InputError::UnknownKey(c.to_string()))?;
            keys.push(key);
        }
    }

    Ok(keys)
}
