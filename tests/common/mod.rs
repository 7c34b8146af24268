//! Shared test rig: a minimal HD44780 model behind a PCF8574 expander.
//!
//! The model decodes the expander word stream the same way the real
//! controller does (data latched on the falling edge of EN, 8-bit mode
//! until the 4-bit function set) and keeps its DDRAM so tests can read
//! back what is on screen.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use currency_kiosk::config::LCD_I2C_ADDRESS;
use currency_kiosk::controller::Controller;
use currency_kiosk::error::Error;
use currency_kiosk::lcd::{I2cTransport, Lcd, EN, RS};
use currency_kiosk::ui::{InputSampler, Session};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

pub const CENTER: u8 = 125;
pub const HIGH: u8 = 230;
pub const LOW: u8 = 15;

const DDRAM_SIZE: usize = 0x68;
const LINE_LENGTH: u8 = 0x28;
const VISIBLE: usize = 16;

pub struct Hd44780 {
    four_bit: bool,
    high_nibble: Option<u8>,
    last_word: u8,
    address: u8,
    ddram: [u8; DDRAM_SIZE],
}

impl Hd44780 {
    pub fn new() -> Self {
        Self {
            four_bit: false,
            high_nibble: None,
            last_word: 0,
            address: 0,
            ddram: [b' '; DDRAM_SIZE],
        }
    }

    pub fn on_word(&mut self, word: u8) {
        let falling = self.last_word & EN != 0 && word & EN == 0;
        self.last_word = word;
        if !falling {
            return;
        }

        let nibble = word & 0xF0;
        let is_data = word & RS != 0;

        if !self.four_bit {
            if !is_data {
                self.command(nibble);
            }
            return;
        }

        match self.high_nibble.take() {
            None => self.high_nibble = Some(nibble),
            Some(high) => {
                let byte = high | (nibble >> 4);
                if is_data {
                    self.data(byte);
                } else {
                    self.command(byte);
                }
            }
        }
    }

    fn command(&mut self, byte: u8) {
        if byte & 0x80 != 0 {
            self.address = byte & 0x7F;
        } else if byte & 0x40 != 0 {
            // CGRAM address, unused.
        } else if byte & 0x20 != 0 {
            self.four_bit = byte & 0x10 == 0;
        } else if byte == 0x01 {
            self.ddram = [b' '; DDRAM_SIZE];
            self.address = 0;
        } else if byte & 0xFE == 0x02 {
            self.address = 0;
        }
    }

    fn data(&mut self, byte: u8) {
        if let Some(cell) = self.ddram.get_mut(self.address as usize) {
            *cell = byte;
        }
        self.address = match self.address {
            a if a + 1 == LINE_LENGTH => 0x40,
            a if a + 1 == 0x40 + LINE_LENGTH => 0x00,
            a => a + 1,
        };
    }

    /// Visible text of `row`, trailing blanks removed.
    pub fn line(&self, row: usize) -> String {
        let base = if row == 0 { 0 } else { 0x40 };
        let text: String = self.ddram[base..base + VISIBLE]
            .iter()
            .map(|&b| b as char)
            .collect();
        text.trim_end().to_string()
    }

    /// Visible text of `row`, all 16 columns.
    pub fn raw_line(&self, row: usize) -> String {
        let base = if row == 0 { 0 } else { 0x40 };
        self.ddram[base..base + VISIBLE]
            .iter()
            .map(|&b| b as char)
            .collect()
    }
}

/// I²C master wired to an [`Hd44780`] model.
#[derive(Clone)]
pub struct ModelBus {
    pub lcd: Rc<RefCell<Hd44780>>,
    pub nack: Rc<Cell<bool>>,
    pub attempts: Rc<Cell<usize>>,
}

impl ModelBus {
    pub fn new() -> Self {
        Self {
            lcd: Rc::new(RefCell::new(Hd44780::new())),
            nack: Rc::new(Cell::new(false)),
            attempts: Rc::new(Cell::new(0)),
        }
    }
}

impl ErrorType for ModelBus {
    type Error = ErrorKind;
}

impl I2c for ModelBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, LCD_I2C_ADDRESS);
        self.attempts.set(self.attempts.get() + 1);
        if self.nack.get() {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                for &word in bytes.iter() {
                    self.lcd.borrow_mut().on_word(word);
                }
            }
        }
        Ok(())
    }
}

pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Time between two simulated polls; long enough for every spacing guard.
pub const TICK_MS: u64 = 400;

/// The whole kiosk on top of the model, driven like the firmware loop.
pub struct Kiosk {
    pub controller: Controller<I2cTransport<ModelBus>, NoDelay>,
    pub session: Session,
    pub bus: ModelBus,
    sampler: InputSampler,
    now_ms: u64,
}

impl Kiosk {
    pub fn start() -> Self {
        let bus = ModelBus::new();
        let lcd = Lcd::new(I2cTransport::new(bus.clone()), NoDelay);
        let mut kiosk = Self {
            controller: Controller::new(lcd),
            session: Session::new(),
            bus,
            sampler: InputSampler::new(),
            now_ms: 0,
        };
        kiosk
            .controller
            .start(&mut kiosk.session)
            .expect("display start-up");
        kiosk
    }

    pub fn poll(&mut self, x: u8, y: u8, button_high: bool) -> Result<(), Error> {
        self.now_ms += TICK_MS;
        let input = self.sampler.observe(x, y, button_high);
        self.controller.tick(&mut self.session, &input, self.now_ms)
    }

    pub fn flick_x(&mut self, x: u8) {
        self.poll(x, CENTER, true).expect("deflect");
        self.poll(CENTER, CENTER, true).expect("re-center");
    }

    pub fn flick_y(&mut self, y: u8) {
        self.poll(CENTER, y, true).expect("deflect");
        self.poll(CENTER, CENTER, true).expect("re-center");
    }

    /// Press and release the button.
    pub fn press(&mut self) {
        self.poll(CENTER, CENTER, false).expect("press");
        self.poll(CENTER, CENTER, true).expect("release");
    }

    /// Both visible lines, trailing blanks removed.
    pub fn screen(&self) -> (String, String) {
        let lcd = self.bus.lcd.borrow();
        (lcd.line(0), lcd.line(1))
    }
}
