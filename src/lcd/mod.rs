//! HD44780 16×2 character LCD behind a PCF8574 I²C backpack.
//!
//! The controller runs in 4-bit mode. Each expander byte carries one
//! nibble plus the control lines:
//!
//! ```text
//! Bit 7..4: D7..D4 (nibble)
//! Bit 3:    backlight (always on)
//! Bit 2:    EN  (enable strobe, data latched on falling edge)
//! Bit 1:    RW  (always 0 = write)
//! Bit 0:    RS  (1 = character data, 0 = command)
//! ```
//!
//! A nibble transfer is three expander writes: the word, the word with EN
//! asserted, then the word again. A full byte is the high nibble followed
//! by the low nibble.

pub mod transport;

pub use transport::{BusTransport, I2cTransport};

use crate::config::{
    LCD_CLEAR_DELAY_MS, LCD_I2C_ADDRESS, LCD_POWER_ON_DELAY_MS, LCD_STROBE_SETTLE_US,
    LCD_WAKE_DELAY_MS,
};
use crate::error::Error;
use embedded_hal::delay::DelayNs;

/// Register-select bit.
pub const RS: u8 = 0x01;
/// Enable strobe bit.
pub const EN: u8 = 0x04;
/// Backlight bit.
pub const BACKLIGHT: u8 = 0x08;

/// HD44780 instruction bytes used by the firmware.
pub mod command {
    /// Clear display, cursor to row 0 / column 0.
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Entry mode: increment cursor, no display shift.
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off.
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    /// Function set: 4-bit interface, 2 lines, 5×8 font.
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR with the address).
    pub const SET_DDRAM_ADDRESS: u8 = 0x80;
    /// DDRAM address of the first column of line 2.
    pub const LINE_TWO_ADDRESS: u8 = 0x40;
    /// Move cursor to the start of line 2.
    pub const LINE_TWO: u8 = SET_DDRAM_ADDRESS | LINE_TWO_ADDRESS;

    /// Wake-up nibble ("function set, 8-bit interface").
    pub(crate) const WAKE_8BIT: u8 = 0x30;
    /// Switch-to-4-bit nibble.
    pub(crate) const SELECT_4BIT: u8 = 0x20;
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Register {
    Command,
    Data,
}

/// Character LCD driver.
pub struct Lcd<T, D> {
    bus: T,
    delay: D,
    address: u8,
    backlight: u8,
}

impl<T, D> Lcd<T, D>
where
    T: BusTransport,
    D: DelayNs,
{
    /// Create a driver for the expander at [`LCD_I2C_ADDRESS`].
    ///
    /// Nothing is sent until [`Lcd::initialize`] is called.
    pub fn new(bus: T, delay: D) -> Self {
        Self {
            bus,
            delay,
            address: LCD_I2C_ADDRESS,
            backlight: BACKLIGHT,
        }
    }

    /// Use a different expander address (e.g. 0x3F on PCF8574A backpacks).
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Bring the controller from an unknown state into 4-bit, 2-line mode.
    ///
    /// Must run exactly once after power-on, before any other call.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.delay.delay_ms(LCD_POWER_ON_DELAY_MS);

        // Three 8-bit wake-ups recover from any interface state.
        for _ in 0..3 {
            self.write_nibble(command::WAKE_8BIT, Register::Command)?;
            self.delay.delay_ms(LCD_WAKE_DELAY_MS);
        }
        self.write_nibble(command::SELECT_4BIT, Register::Command)?;

        self.write_byte(command::FUNCTION_SET_4BIT_2LINE, Register::Command)?;
        self.write_byte(command::DISPLAY_ON_CURSOR_OFF, Register::Command)?;
        self.write_byte(command::ENTRY_MODE_INCREMENT, Register::Command)?;
        self.write_byte(command::CLEAR_DISPLAY, Register::Command)?;
        self.delay.delay_ms(LCD_CLEAR_DELAY_MS);
        Ok(())
    }

    /// Clear both lines and home the cursor.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.write_byte(command::CLEAR_DISPLAY, Register::Command)?;
        self.delay.delay_ms(LCD_CLEAR_DELAY_MS);
        Ok(())
    }

    /// Write `text` at the current cursor position.
    ///
    /// With `line_break_on_newline`, `'\n'` moves the cursor to the start
    /// of line 2 instead of being written. Non-ASCII characters are shown
    /// as `?`. Text is not wrapped or truncated at the 16th column.
    pub fn write_text(&mut self, text: &str, line_break_on_newline: bool) -> Result<(), Error> {
        for c in text.chars() {
            if c == '\n' && line_break_on_newline {
                self.write_raw_command(command::LINE_TWO)?;
            } else {
                let byte = if c.is_ascii() { c as u8 } else { b'?' };
                self.write_byte(byte, Register::Data)?;
            }
        }
        Ok(())
    }

    /// [`Lcd::write_text`] with newline handling enabled.
    pub fn write_str(&mut self, text: &str) -> Result<(), Error> {
        self.write_text(text, true)
    }

    /// Send an instruction byte as-is.
    pub fn write_raw_command(&mut self, byte: u8) -> Result<(), Error> {
        self.write_byte(byte, Register::Command)
    }

    /// Move the cursor to `row` (0 or 1) and `col`.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Error> {
        let base = if row == 0 {
            0x00
        } else {
            command::LINE_TWO_ADDRESS
        };
        self.write_raw_command(command::SET_DDRAM_ADDRESS | (base + (col & 0x3F)))
    }

    fn write_byte(&mut self, byte: u8, register: Register) -> Result<(), Error> {
        self.write_nibble(byte & 0xF0, register)?;
        self.write_nibble((byte << 4) & 0xF0, register)
    }

    fn write_nibble(&mut self, nibble: u8, register: Register) -> Result<(), Error> {
        let mut word = (nibble & 0xF0) | self.backlight;
        if register == Register::Data {
            word |= RS;
        }

        self.bus.write_byte(self.address, word)?;
        self.bus.write_byte(self.address, word | EN)?;
        self.delay.delay_us(LCD_STROBE_SETTLE_US);
        self.bus.write_byte(self.address, word)
    }
}
