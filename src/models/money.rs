//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that splitting an expense never
//! loses or invents a cent. Provides arithmetic, parsing, and the decimal
//! string form the Splitwise API expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use splitr::models::Money;
    /// let amount = Money::from_cents(1758); // $17.58
    /// assert_eq!(amount.to_decimal_string(), "17.58");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Half of the amount, rounded toward zero to the cent
    ///
    /// `self - self.half()` carries any odd cent, so the two halves always
    /// sum back to `self`.
    pub const fn half(&self) -> Self {
        Self(self.0 / 2)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "17.58", "-17.58", "$17.58", "17", "17.5".
    /// More than two decimal places is rejected rather than rounded, as is
    /// any amount too large to hold in cents.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let (dollars_str, cents_str) = s.split_once('.').unwrap_or((s, ""));
        if cents_str.contains('.')
            || cents_str.len() > 2
            || (dollars_str.is_empty() && cents_str.is_empty())
        {
            return Err(invalid());
        }

        let dollars: i64 = if dollars_str.is_empty() {
            0
        } else {
            dollars_str.parse().map_err(|_| invalid())?
        };

        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let total = dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Plain decimal form with two places and no currency symbol ("8.79")
    pub fn to_decimal_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
