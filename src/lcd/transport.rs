//! Two-wire transport to the LCD's PCF8574 I/O expander.
//!
//! Every expander write is a single byte framed by its own start/stop.
//! A byte that is not acknowledged is retried a bounded number of times
//! before the failure is surfaced as [`Error::BusTimeout`].

use crate::config::BUS_RETRY_LIMIT;
use crate::error::Error;
use embedded_hal::i2c::I2c;

/// Byte-level bus primitive the LCD driver is written against.
pub trait BusTransport {
    /// Write one byte to the device at `address`, blocking until it is
    /// acknowledged or the retry budget is exhausted.
    fn write_byte(&mut self, address: u8, byte: u8) -> Result<(), Error>;
}

/// [`BusTransport`] over any blocking `embedded-hal` I²C master.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    attempts: u8,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Wrap an I²C master using the default [`BUS_RETRY_LIMIT`].
    pub fn new(i2c: I2C) -> Self {
        Self::with_attempts(i2c, BUS_RETRY_LIMIT)
    }

    /// Wrap an I²C master with an explicit attempt budget (at least one).
    pub fn with_attempts(i2c: I2C, attempts: u8) -> Self {
        Self {
            i2c,
            attempts: attempts.max(1),
        }
    }
}

impl<I2C: I2c> BusTransport for I2cTransport<I2C> {
    fn write_byte(&mut self, address: u8, byte: u8) -> Result<(), Error> {
        for _attempt in 0..self.attempts {
            match self.i2c.write(address, &[byte]) {
                Ok(()) => return Ok(()),
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    {
                        use embedded_hal::i2c::Error as _;
                        defmt::debug!(
                            "LCD bus attempt {} failed: {}",
                            _attempt + 1,
                            defmt::Debug2Format(&_e.kind())
                        );
                    }
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "LCD bus: byte {=u8:#x} to {=u8:#x} not acknowledged",
            byte,
            address
        );
        Err(Error::BusTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// I²C master that NACKs the first `fail_first` writes.
    struct FlakyBus {
        fail_first: usize,
        calls: usize,
        written: Vec<(u8, u8)>,
    }

    impl FlakyBus {
        fn new(fail_first: usize) -> Self {
            Self {
                fail_first,
                calls: 0,
                written: Vec::new(),
            }
        }
    }

    impl ErrorType for FlakyBus {
        type Error = ErrorKind;
    }

    impl I2c for FlakyBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.calls += 1;
            if self.calls <= self.fail_first {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        self.written.push((address, b));
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn acknowledged_byte_is_written_once() {
        let mut transport = I2cTransport::new(FlakyBus::new(0));
        assert_eq!(transport.write_byte(0x27, 0x5A), Ok(()));
        assert_eq!(transport.i2c.calls, 1);
        assert_eq!(transport.i2c.written, vec![(0x27, 0x5A)]);
    }

    #[test]
    fn transient_nack_is_retried() {
        let mut transport = I2cTransport::new(FlakyBus::new(2));
        assert_eq!(transport.write_byte(0x27, 0x08), Ok(()));
        assert_eq!(transport.i2c.calls, 3);
        assert_eq!(transport.i2c.written, vec![(0x27, 0x08)]);
    }

    #[test]
    fn persistent_nack_becomes_bus_timeout() {
        let mut transport = I2cTransport::new(FlakyBus::new(usize::MAX));
        assert_eq!(transport.write_byte(0x27, 0x08), Err(Error::BusTimeout));
        assert_eq!(transport.i2c.calls, BUS_RETRY_LIMIT as usize);
        assert!(transport.i2c.written.is_empty());
    }

    #[test]
    fn zero_attempt_budget_still_tries_once() {
        let mut transport = I2cTransport::with_attempts(FlakyBus::new(0), 0);
        assert_eq!(transport.write_byte(0x3F, 0x01), Ok(()));
        assert_eq!(transport.i2c.calls, 1);
    }
}
