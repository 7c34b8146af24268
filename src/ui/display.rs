//! Screen layouts for the 16×2 character LCD.
//!
//! Rendering is split from drawing: [`render`] builds the two text lines
//! for a [`Redraw`], and [`draw`] pushes them through the LCD driver.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;

use super::Redraw;
use crate::config::LCD_COLUMNS;
use crate::conversion::{Conversion, Currency};
use crate::error::Error;
use crate::lcd::{command, BusTransport, Lcd};

/// One LCD line of text.
pub type Line = heapless::String<LCD_COLUMNS>;

/// Both lines of a screen. An empty bottom line is left blank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    pub top: Line,
    pub bottom: Line,
}

fn line(text: &str) -> Line {
    let mut line = Line::new();
    let _ = line.push_str(text);
    line
}

/// Build the text of a screen without touching the hardware.
pub fn render(redraw: &Redraw) -> Screen {
    match *redraw {
        Redraw::Prompt => Screen {
            top: line("Selecione >>"),
            bottom: line("a moeda:  >>"),
        },
        Redraw::CurrencyName(currency) => Screen {
            top: line(currency.display_name()),
            bottom: Line::new(),
        },
        Redraw::AmountEntry { digits, cursor } => Screen {
            top: amount_line(&digits),
            bottom: caret_line(cursor),
        },
        Redraw::Result {
            currency,
            amount_cents,
            conversion,
        } => result_screen(currency, amount_cents, conversion),
        Redraw::Fault => Screen {
            top: line("Falha no sistema"),
            bottom: line("Reinicie"),
        },
    }
}

/// `DDD.DD BRL`
pub fn amount_line(digits: &[u8; 5]) -> Line {
    let mut line = Line::new();
    let _ = write!(
        line,
        "{}{}{}.{}{} BRL",
        digits[0], digits[1], digits[2], digits[3], digits[4]
    );
    line
}

/// Caret under the edited digit. Positions past the decimal point shift
/// one column right.
pub fn caret_line(cursor: u8) -> Line {
    let column = if cursor < 3 {
        cursor as usize
    } else {
        cursor as usize + 1
    };

    let mut line = Line::new();
    for col in 0..LCD_COLUMNS {
        let _ = line.push(if col == column { '^' } else { ' ' });
    }
    line
}

fn result_screen(currency: Currency, amount_cents: u32, conversion: Conversion) -> Screen {
    let mut top = Line::new();
    let _ = write!(top, "BRL {}.{:02} =", amount_cents / 100, amount_cents % 100);

    let mut bottom = Line::new();
    if currency.is_fractional() {
        let _ = write!(
            bottom,
            "{} {}.{:02}",
            currency.iso_code(),
            conversion.int_part,
            conversion.frac_part
        );
    } else {
        let _ = write!(bottom, "{} {} sat", currency.iso_code(), conversion.int_part);
    }

    Screen { top, bottom }
}

/// Clear the display and draw the screen for `redraw`.
pub fn draw<T, D>(lcd: &mut Lcd<T, D>, redraw: &Redraw) -> Result<(), Error>
where
    T: BusTransport,
    D: DelayNs,
{
    let screen = render(redraw);

    lcd.clear()?;
    lcd.write_text(&screen.top, false)?;
    if !screen.bottom.is_empty() {
        lcd.write_raw_command(command::LINE_TWO)?;
        lcd.write_text(&screen.bottom, false)?;
    }
    Ok(())
}
