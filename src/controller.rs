//! Control-loop glue between the UI session and the display.
//!
//! The firmware calls [`Controller::tick`] once per poll with a fresh input
//! snapshot, or [`Controller::record_failure`] when the joystick could not
//! be read. Redraws that fail stay pending and are retried on the next
//! tick; too many failed ticks in a row halt the UI on the fault screen.

use embedded_hal::delay::DelayNs;

use crate::config::FAULT_TICK_LIMIT;
use crate::error::Error;
use crate::lcd::{BusTransport, Lcd};
use crate::ui::{display, step, Phase, Redraw, Session, Snapshot};

pub struct Controller<T, D> {
    lcd: Lcd<T, D>,
    pending: Option<Redraw>,
    failures: u8,
}

impl<T, D> Controller<T, D>
where
    T: BusTransport,
    D: DelayNs,
{
    pub fn new(lcd: Lcd<T, D>) -> Self {
        Self {
            lcd,
            pending: None,
            failures: 0,
        }
    }

    /// Screen still waiting to be drawn after a failed attempt.
    pub fn pending(&self) -> Option<Redraw> {
        self.pending
    }

    /// Consecutive failed ticks so far.
    pub fn failures(&self) -> u8 {
        self.failures
    }

    /// Initialize the display and show the start prompt.
    ///
    /// A display that cannot be initialized is unusable, so the session
    /// goes straight to the fault phase.
    pub fn start(&mut self, session: &mut Session) -> Result<(), Error> {
        let result = self
            .lcd
            .initialize()
            .and_then(|()| display::draw(&mut self.lcd, &Redraw::Prompt));

        if let Err(e) = result {
            #[cfg(feature = "defmt")]
            defmt::error!("LCD start-up failed: {}", e);
            self.enter_fault(session);
            return Err(e);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("LCD ready");
        Ok(())
    }

    /// Run one UI step and draw whatever it asks for.
    ///
    /// Does nothing once the session is in the fault phase.
    pub fn tick(&mut self, session: &mut Session, input: &Snapshot, now_ms: u64) -> Result<(), Error> {
        if session.phase() == Phase::Fault {
            return Ok(());
        }

        if let Some(redraw) = step(session, input, now_ms) {
            self.pending = Some(redraw);
        }

        if let Some(redraw) = self.pending {
            if let Err(e) = display::draw(&mut self.lcd, &redraw) {
                self.record_failure(session, e);
                return Err(e);
            }
            self.pending = None;
        }

        self.failures = 0;
        Ok(())
    }

    /// Count a failed tick; enters the fault phase at [`FAULT_TICK_LIMIT`].
    pub fn record_failure(&mut self, session: &mut Session, error: Error) {
        if session.phase() == Phase::Fault {
            return;
        }

        self.failures = self.failures.saturating_add(1);

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "tick failed: {} ({}/{})",
            error,
            self.failures,
            FAULT_TICK_LIMIT
        );
        #[cfg(not(feature = "defmt"))]
        let _ = error;

        if self.failures >= FAULT_TICK_LIMIT {
            self.enter_fault(session);
        }
    }

    fn enter_fault(&mut self, session: &mut Session) {
        session.enter_fault();
        self.pending = None;

        #[cfg(feature = "defmt")]
        defmt::error!("UI halted, power cycle required");

        // Best effort: the bus may be the thing that failed.
        let _ = display::draw(&mut self.lcd, &Redraw::Fault);
    }
}
