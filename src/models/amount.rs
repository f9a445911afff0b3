//! Amount type for expense values
//!
//! Amounts are stored as plain JSON numbers so the persisted collection keeps
//! the `amount: number` shape. Parsing and display follow vi-VN conventions
//! (`.` groups thousands, `,` marks decimals, `đ` suffix).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Default currency symbol appended on display
pub const DEFAULT_CURRENCY_SYMBOL: &str = "đ";

/// A monetary amount in the user's currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    /// An amount is storable when it is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Parse an amount typed by a user
    ///
    /// Accepts formats: "25000", "25.000", "1.250.000", "25,5", "25000.5",
    /// "25.000đ", "1.250.000,75 ₫"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let original = s;
        let s = s.trim();
        let s = s
            .strip_suffix(DEFAULT_CURRENCY_SYMBOL)
            .or_else(|| s.strip_suffix('₫'))
            .unwrap_or(s)
            .trim();

        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }

        let dots = s.matches('.').count();
        let commas = s.matches(',').count();

        let normalized = match (dots, commas) {
            // "1.250.000,75"
            (_, 1) if dots > 0 => s.replace('.', "").replace(',', "."),
            // "25,5"
            (0, 1) => s.replace(',', "."),
            // "1,250,000"
            (0, c) if c > 1 => s.replace(',', ""),
            // "1.250.000"
            (d, 0) if d > 1 => s.replace('.', ""),
            // "25.000" groups thousands; "25000.5" and "0.500" are decimals
            (1, 0) => {
                let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
                let int_digits = int_part.trim_start_matches('-');
                let grouped = frac_part.len() == 3
                    && !int_digits.is_empty()
                    && int_digits.len() <= 3
                    && !int_digits.starts_with('0');
                if grouped {
                    s.replace('.', "")
                } else {
                    s.to_string()
                }
            }
            (0, 0) => s.to_string(),
            _ => return Err(AmountParseError::InvalidFormat(original.to_string())),
        };

        let value: f64 = normalized
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(original.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(original.to_string()));
        }

        Ok(Self(value))
    }

    /// Format with vi-VN grouping and the given currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let negative = self.0 < 0.0;
        let hundredths = (self.0.abs() * 100.0).round() as i64;
        let whole = hundredths / 100;
        let frac = hundredths % 100;

        let mut out = String::new();
        if negative && hundredths != 0 {
            out.push('-');
        }
        out.push_str(&group_thousands(whole));
        if frac != 0 {
            out.push(',');
            if frac % 10 == 0 {
                out.push_str(&(frac / 10).to_string());
            } else {
                out.push_str(&format!("{:02}", frac));
            }
        }
        out.push_str(symbol);
        out
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + *x)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "amount is empty"),
            Self::InvalidFormat(s) => write!(f, "invalid amount format: '{}'", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
