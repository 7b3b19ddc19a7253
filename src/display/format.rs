//! Locale-aware number formatting

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Marker shown wherever a value is absent
pub const NOT_AVAILABLE: &str = "N/A";

/// Decimal places used for development factors
pub const FACTOR_DECIMALS: usize = 4;

/// Separators and precision for displayed estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub group_separator: char,
    pub decimal_separator: char,
    /// Fraction digits kept after rounding; trailing zeros are trimmed
    pub max_fraction_digits: usize,
}

impl NumberFormat {
    pub fn en_us() -> Self {
        Self {
            group_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: 3,
        }
    }

    pub fn de_de() -> Self {
        Self {
            group_separator: '.',
            decimal_separator: ',',
            max_fraction_digits: 3,
        }
    }

    pub fn fr_fr() -> Self {
        Self {
            group_separator: '\u{202F}',
            decimal_separator: ',',
            max_fraction_digits: 3,
        }
    }

    /// Format an estimate with digit grouping, e.g. `1,234,567.891`.
    /// Rounds on the exact decimal value of the input. Non-finite values have
    /// no display form.
    pub fn format(&self, value: f64) -> Option<String> {
        if !value.is_finite() {
            return None;
        }

        let fixed = format!("{:.*}", self.max_fraction_digits, value.abs());

        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, f.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let mut out = String::new();
        let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, self.group_separator));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        Some(out)
    }

    /// Fixed four-decimal rendering used for development factors
    pub fn format_factor(&self, factor: f64) -> Option<String> {
        if !factor.is_finite() {
            return None;
        }
        let fixed = format!("{:.*}", FACTOR_DECIMALS, factor);
        Some(fixed.replace('.', &self.decimal_separator.to_string()))
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::en_us()
    }
}

impl FromStr for NumberFormat {
    type Err = String;

    /// Accepts BCP 47 style tags: `en-US`, `de-DE`, `fr-FR` (or `_` separated)
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::en_us()),
            "de" | "de-de" => Ok(Self::de_de()),
            "fr" | "fr-fr" => Ok(Self::fr_fr()),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
