//! The currencies amounts can be displayed in.
//!
//! Amounts are stored without a currency; the currency is purely a display
//! preference chosen in the UI or with the `--currency` flag.

use std::{str::FromStr, sync::OnceLock};

use numfmt::{Formatter, Precision};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A display currency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Currency {
    /// South African Rand.
    #[default]
    #[serde(rename = "ZAR")]
    #[value(name = "ZAR")]
    Zar,
    /// Indian Rupee.
    #[serde(rename = "INR")]
    #[value(name = "INR")]
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Zar, Currency::Inr];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Zar => "R",
            Currency::Inr => "₹",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Zar => "ZAR",
            Currency::Inr => "INR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Zar => "South African Rand",
            Currency::Inr => "Indian Rupee",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| Error::InvalidCurrency(s.to_owned()))
    }
}

/// Format `amount` with the currency symbol, thousands separators and two
/// decimal places, e.g. "R 1,234.50".
pub fn format_currency(amount: f64, currency: Currency) -> String {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    let formatter = FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let sign = if amount < 0.0 { "-" } else { "" };
    let digits = pad_decimals(formatter.fmt_string(amount.abs()));

    format!("{} {sign}{digits}", currency.symbol())
}

// numfmt drops trailing zeros (and renders zero as "0"), so pad back to two
// decimal places.
fn pad_decimals(mut digits: String) -> String {
    match digits.find('.') {
        None => digits.push_str(".00"),
        Some(point) if digits.len() - point == 2 => digits.push('0'),
        Some(_) => {}
    }

    digits
}
