//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, thresholds and
//! conversion rates live here so they can be tuned in one place.

// Display

/// I²C address of the PCF8574 expander behind the LCD backpack.
pub const LCD_I2C_ADDRESS: u8 = 0x27;

/// Visible columns per LCD line.
pub const LCD_COLUMNS: usize = 16;

/// Time the HD44780 needs after power-on before it accepts commands (ms).
pub const LCD_POWER_ON_DELAY_MS: u32 = 50;

/// Settle time after each "8-bit interface" wake-up nibble (ms).
pub const LCD_WAKE_DELAY_MS: u32 = 5;

/// Settle time after the enable-asserted word of a nibble transfer (µs).
pub const LCD_STROBE_SETTLE_US: u32 = 2_000;

/// Time the controller needs to finish a clear-display command (ms).
pub const LCD_CLEAR_DELAY_MS: u32 = 5;

/// Attempts per bus byte before the transfer is reported as `BusTimeout`.
pub const BUS_RETRY_LIMIT: u8 = 3;

// Joystick
//
// Samples are 8-bit. The stick rests around 125.

/// Lower bound (inclusive) of the center band. Re-arms the edge latch.
pub const AXIS_CENTER_MIN: u8 = 110;

/// Upper bound (exclusive) of the center band.
pub const AXIS_CENTER_MAX: u8 = 140;

/// Readings at or above this are a positive deflection.
pub const AXIS_POSITIVE_MIN: u8 = 180;

/// Readings at or below this are a negative deflection.
pub const AXIS_NEGATIVE_MAX: u8 = 50;

/// Minimum time between two actions on the same axis (ms).
pub const AXIS_EVENT_SPACING_MS: u64 = 200;

/// Minimum time between two accepted button presses (ms).
pub const BUTTON_EVENT_SPACING_MS: u64 = 300;

// Control loop

/// Delay between two polling ticks (ms).
pub const POLL_INTERVAL_MS: u64 = 10;

/// Maximum time a joystick conversion may take before `AdcTimeout` (ms).
pub const ADC_TIMEOUT_MS: u64 = 50;

/// Consecutive failed ticks tolerated before the UI enters the fault phase.
pub const FAULT_TICK_LIMIT: u8 = 5;

// Conversion rates
//
// Rates are fixed. Amounts are BRL cents.

/// US cents per 100 BRL cents (0.20 USD per BRL).
pub const RATE_USD_CENT: u32 = 20;

/// Euro cents per 100 BRL cents (0.18 EUR per BRL).
pub const RATE_EUR_CENT: u32 = 18;

/// Satoshi numerator per `BTC_DIVISOR` BRL cents.
pub const RATE_BTC_SAT: u32 = 5;

/// Divisor applied to `amount * RATE_BTC_SAT`.
pub const BTC_DIVISOR: u32 = 100_000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `board.rs`.  Adjust for your custom PCB.
//
//   Joystick X     → P0.02 (AIN0)
//   Joystick Y     → P0.03 (AIN1)
//   Joystick SW    → P0.24 (active-low, internal pull-up)
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
