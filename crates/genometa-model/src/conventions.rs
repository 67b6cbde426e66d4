//! Value conventions shared by validation and transformation.
//!
//! Both stages must agree on what counts as a missing value and how a cell
//! is coerced to its declared type, otherwise a row could pass validation
//! and still fail to curate. Everything here is a pure function of the
//! [`Conventions`] value and the raw cell text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Result of coercing a raw cell to a typed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    /// The cell is empty or holds a missing-value token.
    Missing,
    /// The cell parsed cleanly.
    Value(T),
    /// The cell holds text that does not parse as the declared type.
    Invalid,
}

impl<T> Coerced<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Coerced::Value(value) => Some(value),
            Coerced::Missing | Coerced::Invalid => None,
        }
    }
}

/// Tokens and formats that govern how raw text is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Trimmed cell values treated as missing (exact match).
    pub missing_tokens: Vec<String>,
    /// Tokens mapping to `true` for boolean flags (case-insensitive).
    pub truthy_tokens: Vec<String>,
    /// `chrono` formats accepted for calendar dates.
    pub date_formats: Vec<String>,
    /// `chrono` formats accepted for timestamps, reduced to their date.
    pub datetime_formats: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            missing_tokens: ["", "NA", "null", "NULL"].map(String::from).to_vec(),
            truthy_tokens: ["true", "1", "yes"].map(String::from).to_vec(),
            date_formats: ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
                .map(String::from)
                .to_vec(),
            datetime_formats: ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Conventions {
    /// Trim the cell and map missing-value tokens to `None`.
    pub fn normalize_text<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let trimmed = raw.trim();
        if self.missing_tokens.iter().any(|token| token == trimmed) {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Normalized text as an owned string.
    pub fn text(&self, raw: &str) -> Option<String> {
        self.normalize_text(raw).map(str::to_string)
    }

    pub fn parse_date(&self, raw: &str) -> Coerced<NaiveDate> {
        let Some(value) = self.normalize_text(raw) else {
            return Coerced::Missing;
        };
        for format in &self.date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(value, format) {
                return Coerced::Value(date);
            }
        }
        for format in &self.datetime_formats {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
                return Coerced::Value(datetime.date());
            }
        }
        match DateTime::parse_from_rfc3339(value) {
            Ok(datetime) => Coerced::Value(datetime.date_naive()),
            Err(_) => Coerced::Invalid,
        }
    }

    /// Parse an integer; integral floats such as `150.0` are accepted.
    pub fn parse_integer(&self, raw: &str) -> Coerced<i64> {
        let Some(value) = self.normalize_text(raw) else {
            return Coerced::Missing;
        };
        if let Ok(parsed) = value.parse::<i64>() {
            return Coerced::Value(parsed);
        }
        match value.parse::<f64>() {
            Ok(parsed)
                if parsed.is_finite()
                    && parsed.fract() == 0.0
                    && parsed >= i64::MIN as f64
                    && parsed < i64::MAX as f64 =>
            {
                Coerced::Value(parsed as i64)
            }
            _ => Coerced::Invalid,
        }
    }

    /// Parse a finite float. `NaN` and infinities are invalid.
    pub fn parse_float(&self, raw: &str) -> Coerced<f64> {
        let Some(value) = self.normalize_text(raw) else {
            return Coerced::Missing;
        };
        match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Coerced::Value(parsed),
            _ => Coerced::Invalid,
        }
    }

    /// Truthy tokens map to `true`; anything else, missing included, is `false`.
    pub fn parse_flag(&self, raw: &str) -> bool {
        let value = raw.trim();
        self.truthy_tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(value))
    }

    /// Normalized text, uppercased.
    pub fn canonical_upper(&self, raw: &str) -> Option<String> {
        self.normalize_text(raw).map(str::to_uppercase)
    }
}
