//! Locale-aware formatting of operand buffers.
//!
//! Only the integer part of an operand is formatted: it is grouped with the
//! locale's thousands separator. The fractional part is appended verbatim so
//! that trailing zeros the user typed stay visible.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    /// Language subtag followed by optional region/script subtags.
    static ref LOCALE_TAG: Regex = Regex::new(
        r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$"
    ).unwrap();
}

/// Errors produced while resolving a locale tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("malformed locale tag `{0}`")]
    Malformed(String),
    #[error("unsupported locale `{0}`")]
    Unsupported(String),
}

/// How digits of an integer are grouped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Grouping {
    separator: &'static str,
    /// Size of the rightmost group.
    primary: usize,
    /// Size of every group left of the primary one.
    secondary: usize,
    /// Integers with fewer digits are left ungrouped.
    min_digits: usize,
}

impl Grouping {
    const fn thousands(separator: &'static str) -> Self {
        Self {
            separator,
            primary: 3,
            secondary: 3,
            min_digits: 4,
        }
    }

    const fn thousands_from_five(separator: &'static str) -> Self {
        Self {
            min_digits: 5,
            ..Self::thousands(separator)
        }
    }

    const fn lakh() -> Self {
        Self {
            separator: ",",
            primary: 3,
            secondary: 2,
            min_digits: 4,
        }
    }

    const fn ungrouped() -> Self {
        Self {
            separator: "",
            primary: 3,
            secondary: 3,
            min_digits: usize::MAX,
        }
    }
}

/// A formatting locale, selected with the `locale` configuration option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    grouping: Grouping,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            tag: "en-US".to_string(),
            grouping: Grouping::thousands(","),
        }
    }
}

impl Locale {
    /// The normalized tag, e.g. `de-DE`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Format a whole operand buffer for display.
    ///
    /// The text before the first `.` is grouped; `.` and everything after it
    /// is appended unchanged.
    pub fn format_operand(&self, operand: &str) -> String {
        match operand.split_once('.') {
            Some((integer, fraction)) => {
                format!("{}.{}", self.format_integer(integer), fraction)
            }
            None => self.format_integer(operand),
        }
    }

    /// Format the integer part of an operand.
    ///
    /// Returns an empty string when the text is not a number.
    pub fn format_integer(&self, integer: &str) -> String {
        let (sign, magnitude) = match integer.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", integer),
        };

        if magnitude == "Infinity" {
            return format!("{sign}∞");
        }

        if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return String::new();
        }

        let digits = magnitude.trim_start_matches('0');
        let digits = if digits.is_empty() { "0" } else { digits };

        format!("{sign}{}", self.group_digits(digits))
    }

    /// Insert separators into a string of ASCII digits.
    fn group_digits(&self, digits: &str) -> String {
        let grouping = &self.grouping;
        if grouping.separator.is_empty() || digits.len() < grouping.min_digits {
            return digits.to_string();
        }

        let mut groups = Vec::new();
        let mut end = digits.len();
        let mut size = grouping.primary;
        while end > size {
            groups.push(&digits[end - size..end]);
            end -= size;
            size = grouping.secondary;
        }
        groups.push(&digits[..end]);
        groups.reverse();

        groups.join(grouping.separator)
    }

    fn resolve(language: &str, region: Option<&str>) -> Option<Grouping> {
        let grouping = match (language, region) {
            ("en", Some("IN")) | ("hi", _) => Grouping::lakh(),
            ("de", Some("CH" | "LI")) => Grouping::thousands("\u{2019}"),
            ("pt", Some("BR")) => Grouping::thousands("."),
            ("en" | "ja" | "zh" | "ko" | "he" | "th", _) => Grouping::thousands(","),
            ("de" | "it" | "nl" | "id" | "tr" | "da" | "el", _) => Grouping::thousands("."),
            ("es" | "pt", _) => Grouping::thousands_from_five("."),
            ("fr", _) => Grouping::thousands("\u{202f}"),
            ("ru" | "uk" | "cs" | "sk" | "sv" | "fi" | "nb", _) => {
                Grouping::thousands("\u{a0}")
            }
            ("pl", _) => Grouping::thousands_from_five("\u{a0}"),
            _ => return None,
        };
        Some(grouping)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if matches!(trimmed, "none" | "C" | "POSIX") {
            return Ok(Self {
                tag: trimmed.to_string(),
                grouping: Grouping::ungrouped(),
            });
        }

        if !LOCALE_TAG.is_match(trimmed) {
            return Err(LocaleError::Malformed(trimmed.to_string()));
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
        // Script subtags (e.g. `Latn`) are skipped; the first 2-letter or
        // 3-digit subtag is the region.
        let region = subtags
            .find(|s| s.len() == 2 || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())))
            .map(str::to_ascii_uppercase);

        let grouping = Self::resolve(&language, region.as_deref())
            .ok_or_else(|| LocaleError::Unsupported(trimmed.to_string()))?;

        let tag = match region {
            Some(region) => format!("{language}-{region}"),
            None => language,
        };

        Ok(Self { tag, grouping })
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.tag)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Locale::from_str(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        tag.parse().unwrap()
    }

    #[test]
    fn test_default_groups_thousands() {
        let l = Locale::default();
        assert_eq!(l.format_operand("1234567"), "1,234,567");
        assert_eq!(l.format_operand("123"), "123");
        assert_eq!(l.format_operand("1000"), "1,000");
    }

    #[test]
    fn test_fraction_kept_verbatim() {
        let l = Locale::default();
        assert_eq!(l.format_operand("1234.5000"), "1,234.5000");
        assert_eq!(l.format_operand("12."), "12.");
        assert_eq!(l.format_operand(".5"), ".5");
        assert_eq!(l.format_operand("."), ".");
    }

    #[test]
    fn test_empty_and_non_numeric_render_empty() {
        let l = Locale::default();
        assert_eq!(l.format_operand(""), "");
        assert_eq!(l.format_operand("NaN"), "");
        assert_eq!(l.format_operand("-"), "");
    }

    #[test]
    fn test_integer_normalized() {
        let l = Locale::default();
        assert_eq!(l.format_operand("007"), "7");
        assert_eq!(l.format_operand("0000"), "0");
        assert_eq!(l.format_operand("-0.5"), "-0.5");
        assert_eq!(l.format_operand("-1234567"), "-1,234,567");
    }

    #[test]
    fn test_long_input_keeps_every_digit() {
        let l = Locale::default();
        assert_eq!(
            l.format_operand("12345678901234567890"),
            "12,345,678,901,234,567,890"
        );
    }

    #[test]
    fn test_infinity() {
        let l = Locale::default();
        assert_eq!(l.format_operand("Infinity"), "∞");
        assert_eq!(l.format_operand("-Infinity"), "-∞");
    }

    #[test]
    fn test_german_grouping() {
        assert_eq!(locale("de-DE").format_operand("1234567"), "1.234.567");
    }

    #[test]
    fn test_indian_grouping() {
        let l = locale("en-IN");
        assert_eq!(l.format_operand("1234567"), "12,34,567");
        assert_eq!(l.format_operand("123456789"), "12,34,56,789");
        assert_eq!(l.format_operand("1234"), "1,234");
    }

    #[test]
    fn test_spanish_minimum_grouping() {
        let l = locale("es-ES");
        assert_eq!(l.format_operand("1234"), "1234");
        assert_eq!(l.format_operand("12345"), "12.345");
    }

    #[test]
    fn test_french_and_swiss_separators() {
        assert_eq!(locale("fr-FR").format_operand("1234"), "1\u{202f}234");
        assert_eq!(locale("de-CH").format_operand("1234"), "1\u{2019}234");
    }

    #[test]
    fn test_ungrouped() {
        assert_eq!(locale("none").format_operand("1234567"), "1234567");
        assert_eq!(locale("POSIX").format_operand("1234"), "1234");
    }

    #[test]
    fn test_tag_normalized() {
        assert_eq!(locale("de_de").tag(), "de-DE");
        assert_eq!(locale("EN").tag(), "en");
        assert_eq!(locale("zh-Hant-TW").tag(), "zh-TW");
    }

    #[test]
    fn test_bad_tags_rejected() {
        assert_eq!(
            "klingon!".parse::<Locale>(),
            Err(LocaleError::Malformed("klingon!".to_string()))
        );
        assert_eq!(
            "xx-YY".parse::<Locale>(),
            Err(LocaleError::Unsupported("xx-YY".to_string()))
        );
    }
}
