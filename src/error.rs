//! Unified error type for the kiosk firmware.
//!
//! We avoid `alloc` - all error variants are fieldless so the enum stays
//! `Copy` and cheap to log with `defmt`.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Display bus
    /// An I²C byte to the LCD expander was not acknowledged within the
    /// retry budget.
    BusTimeout,

    // Joystick
    /// The analog conversion of the joystick axes did not complete in time.
    AdcTimeout,
}
