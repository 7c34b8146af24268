//! Fixed-rate conversion from BRL cents into the selected currency.
//!
//! Integer arithmetic only; every division truncates, which is a floor
//! because all operands are non-negative.

use crate::config::{BTC_DIVISOR, RATE_BTC_SAT, RATE_EUR_CENT, RATE_USD_CENT};

/// Target currencies offered on the selection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Currency {
    Usd = 1,
    Eur = 2,
    Btc = 3,
}

impl Currency {
    /// Lowest selectable code.
    pub const MIN_CODE: u8 = Currency::Usd as u8;
    /// Highest selectable code.
    pub const MAX_CODE: u8 = Currency::Btc as u8;

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Currency::Usd),
            2 => Some(Currency::Eur),
            3 => Some(Currency::Btc),
            _ => None,
        }
    }

    /// Three-letter code shown on the result screen.
    pub const fn iso_code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Btc => "BTC",
        }
    }

    /// Name shown while browsing currencies.
    pub const fn display_name(self) -> &'static str {
        match self {
            Currency::Usd => "Dolar",
            Currency::Eur => "Euro",
            Currency::Btc => "BitCoin",
        }
    }

    /// `false` for currencies expressed in whole sub-units only.
    pub const fn is_fractional(self) -> bool {
        !matches!(self, Currency::Btc)
    }

    pub fn convert(self, amount_cents: u32) -> Conversion {
        convert(self.code(), amount_cents)
    }
}

/// A converted amount split for display.
///
/// `frac_part` is always in `0..=99` and is `0` for BTC, where
/// `int_part` counts satoshi.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conversion {
    pub int_part: u32,
    pub frac_part: u8,
}

impl Conversion {
    fn from_cents(cents: u64) -> Self {
        Self {
            int_part: (cents / 100) as u32,
            frac_part: (cents % 100) as u8,
        }
    }
}

/// Convert `amount_cents` BRL into the currency with the given code.
///
/// Unknown codes echo the amount back unconverted.
pub fn convert(code: u8, amount_cents: u32) -> Conversion {
    let amount = amount_cents as u64;
    match Currency::from_code(code) {
        Some(Currency::Usd) => Conversion::from_cents(amount * RATE_USD_CENT as u64 / 100),
        Some(Currency::Eur) => Conversion::from_cents(amount * RATE_EUR_CENT as u64 / 100),
        Some(Currency::Btc) => Conversion {
            int_part: (amount * RATE_BTC_SAT as u64 / BTC_DIVISOR as u64) as u32,
            frac_part: 0,
        },
        None => Conversion::from_cents(amount),
    }
}
