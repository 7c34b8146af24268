//! UI session state and the per-tick phase machine.
//!
//! ```text
//!            press              press              press
//! SelectCurrency ──▶ EnterAmount ──▶ ShowResult ──▶ SelectCurrency
//!   X: currency      X: cursor
//!                    Y: digit
//! ```
//!
//! The session is owned by the control loop and only ever mutated
//! through [`step`] (and [`Session::enter_fault`]).

use super::input::{AxisDirection, EdgeLatch, Snapshot};
use super::input_logic::{step_down, step_up};
use super::{Phase, Redraw};
use crate::config::BUTTON_EVENT_SPACING_MS;
use crate::conversion::Currency;

/// Number of editable amount digits (`DDD.DD`).
pub const AMOUNT_DIGITS: usize = 5;

/// Highest cursor position.
pub const MAX_CURSOR: u8 = AMOUNT_DIGITS as u8 - 1;

/// Highest value of a single digit.
const MAX_DIGIT: u8 = 9;

/// Everything the UI remembers between ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    currency: Option<Currency>,
    digits: [u8; AMOUNT_DIGITS],
    cursor: u8,
    x_latch: EdgeLatch,
    y_latch: EdgeLatch,
    last_press_ms: Option<u64>,
}

impl Session {
    /// Fresh session on the currency selection screen, nothing chosen.
    pub const fn new() -> Self {
        Self {
            phase: Phase::SelectCurrency,
            currency: None,
            digits: [0; AMOUNT_DIGITS],
            cursor: 0,
            x_latch: EdgeLatch::new(),
            y_latch: EdgeLatch::new(),
            last_press_ms: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Chosen (or browsed) currency; `None` until the stick first moves.
    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    pub fn digits(&self) -> [u8; AMOUNT_DIGITS] {
        self.digits
    }

    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Entered amount in BRL cents.
    pub fn amount_cents(&self) -> u32 {
        self.digits
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32)
    }

    /// Halt the UI. Only a power cycle leaves this phase.
    pub fn enter_fault(&mut self) {
        self.set_phase(Phase::Fault);
    }

    fn set_phase(&mut self, phase: Phase) {
        if phase != self.phase {
            #[cfg(feature = "defmt")]
            defmt::info!("UI: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn reset_amount(&mut self) {
        self.digits = [0; AMOUNT_DIGITS];
        self.cursor = 0;
    }

    fn amount_entry(&self) -> Redraw {
        Redraw::AmountEntry {
            digits: self.digits,
            cursor: self.cursor,
        }
    }

    fn browse(&mut self, direction: AxisDirection) -> Option<Redraw> {
        let code = self.currency.map_or(0, Currency::code);
        let code = match direction {
            AxisDirection::Positive => step_up(code, Currency::MAX_CODE),
            AxisDirection::Negative => step_down(code, Currency::MIN_CODE),
            AxisDirection::Centered => return None,
        };
        let currency = Currency::from_code(code)?;
        self.currency = Some(currency);
        Some(Redraw::CurrencyName(currency))
    }

    /// Returns `true` when the cursor actually moved.
    fn move_cursor(&mut self, direction: AxisDirection) -> bool {
        let before = self.cursor;
        self.cursor = match direction {
            AxisDirection::Positive => step_up(self.cursor, MAX_CURSOR),
            AxisDirection::Negative => step_down(self.cursor, 0),
            AxisDirection::Centered => self.cursor,
        };
        self.cursor != before
    }

    /// Returns `true` when the digit under the cursor changed.
    ///
    /// Pushing the stick up (negative Y) counts up.
    fn edit_digit(&mut self, direction: AxisDirection) -> bool {
        let slot = &mut self.digits[self.cursor as usize];
        let before = *slot;
        *slot = match direction {
            AxisDirection::Positive => step_down(*slot, 0),
            AxisDirection::Negative => step_up(*slot, MAX_DIGIT),
            AxisDirection::Centered => *slot,
        };
        *slot != before
    }

    fn press_allowed(&self, now_ms: u64) -> bool {
        match self.last_press_ms {
            Some(last) => now_ms.saturating_sub(last) >= BUTTON_EVENT_SPACING_MS,
            None => true,
        }
    }

    fn press(&mut self) -> Option<Redraw> {
        match self.phase {
            Phase::SelectCurrency => {
                let currency = self.currency.unwrap_or(Currency::Usd);
                self.currency = Some(currency);
                self.reset_amount();
                self.set_phase(Phase::EnterAmount);
                Some(self.amount_entry())
            }
            Phase::EnterAmount => {
                let currency = self.currency.unwrap_or(Currency::Usd);
                let amount_cents = self.amount_cents();
                let conversion = currency.convert(amount_cents);
                self.set_phase(Phase::ShowResult);
                Some(Redraw::Result {
                    currency,
                    amount_cents,
                    conversion,
                })
            }
            Phase::ShowResult => {
                self.currency = None;
                self.reset_amount();
                self.set_phase(Phase::SelectCurrency);
                Some(Redraw::Prompt)
            }
            Phase::Fault => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the session by one tick.
///
/// Axis latches are fed on every tick so that a deflection held across a
/// phase change still counts as the one it was. Returns the screen to
/// draw, if anything visible changed.
pub fn step(session: &mut Session, input: &Snapshot, now_ms: u64) -> Option<Redraw> {
    let x = session.x_latch.update(input.x, now_ms);
    let y = session.y_latch.update(input.y, now_ms);

    let mut redraw = match session.phase {
        Phase::SelectCurrency => x.and_then(|dir| session.browse(dir)),
        Phase::EnterAmount => {
            let moved = x.is_some_and(|dir| session.move_cursor(dir));
            let edited = y.is_some_and(|dir| session.edit_digit(dir));
            (moved || edited).then(|| session.amount_entry())
        }
        Phase::ShowResult | Phase::Fault => None,
    };

    if input.pressed && session.press_allowed(now_ms) {
        if let Some(screen) = session.press() {
            session.last_press_ms = Some(now_ms);
            redraw = Some(screen);
        }
    }

    redraw
}
