//! User interface subsystem - 16×2 character LCD + analog joystick.
//!
//! Each control-loop tick feeds one input [`Snapshot`] into
//! [`session::step`], which updates the [`Session`] and tells the caller
//! which screen (if any) to redraw.
//!
//! ## Components
//!
//! - **Input**: axis classification, edge latches, button falling edge
//! - **Session**: phase machine, currency choice, 5-digit amount entry
//! - **Display**: screen layouts drawn through the LCD driver

pub mod display;
pub mod input;
pub mod input_logic;
pub mod session;

pub use input::{AxisDirection, EdgeLatch, InputSampler, Snapshot};
pub use session::{step, Session};

use crate::conversion::{Conversion, Currency};

/// Phases (screens) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Browse currencies with the X axis; press to choose.
    SelectCurrency,
    /// Edit the BRL amount digit by digit; press to convert.
    EnterAmount,
    /// Converted amount on screen; press to start over.
    ShowResult,
    /// Display bus or ADC failed repeatedly; UI halted until power cycle.
    Fault,
}

/// Screen the display must show after a tick.
///
/// Every variant is a full-screen redraw, so a newer one always
/// supersedes an older one that was not drawn yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Redraw {
    /// "Pick a currency" start screen.
    Prompt,
    /// Name of the currency under the cursor.
    CurrencyName(Currency),
    /// Amount digits with a caret under the editable one.
    AmountEntry { digits: [u8; 5], cursor: u8 },
    /// Entered BRL amount and its conversion.
    Result {
        currency: Currency,
        amount_cents: u32,
        conversion: Conversion,
    },
    /// Fault message.
    Fault,
}
