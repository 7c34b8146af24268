//! Joystick sampling: axis classification, per-axis edge latches and
//! button falling-edge detection.
//!
//! Axes are 8-bit samples:
//!
//! ```text
//!   0 ..= 50     Negative
//!  51 ..< 110    no event (latch kept)
//! 110 ..< 140    center band (latch re-armed)
//! 140 ..< 180    no event (latch kept)
//! 180 ..= 255    Positive
//! ```

use crate::config::{
    AXIS_CENTER_MAX, AXIS_CENTER_MIN, AXIS_EVENT_SPACING_MS, AXIS_NEGATIVE_MAX,
    AXIS_POSITIVE_MIN,
};

/// Direction an axis is deflected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisDirection {
    Centered,
    Positive,
    Negative,
}

impl AxisDirection {
    /// Classify a raw axis sample.
    pub const fn of(reading: u8) -> Self {
        if reading >= AXIS_POSITIVE_MIN {
            AxisDirection::Positive
        } else if reading <= AXIS_NEGATIVE_MAX {
            AxisDirection::Negative
        } else {
            AxisDirection::Centered
        }
    }
}

/// `true` inside the rest band that re-arms an edge latch.
pub const fn is_centered(reading: u8) -> bool {
    reading >= AXIS_CENTER_MIN && reading < AXIS_CENTER_MAX
}

/// Turns a continuously deflected axis into single actions.
///
/// Fires once per deflection, and never sooner than
/// [`AXIS_EVENT_SPACING_MS`] after the previous action on the same axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeLatch {
    latched: AxisDirection,
    last_action_ms: Option<u64>,
}

impl EdgeLatch {
    pub const fn new() -> Self {
        Self {
            latched: AxisDirection::Centered,
            last_action_ms: None,
        }
    }

    /// Direction that last produced an action, or `Centered` once re-armed.
    pub fn latched(&self) -> AxisDirection {
        self.latched
    }

    /// Feed one sample; returns the direction of a new action, if any.
    pub fn update(&mut self, reading: u8, now_ms: u64) -> Option<AxisDirection> {
        if is_centered(reading) {
            self.latched = AxisDirection::Centered;
            return None;
        }

        let direction = AxisDirection::of(reading);
        if direction == AxisDirection::Centered || direction == self.latched {
            return None;
        }

        if let Some(last) = self.last_action_ms {
            if now_ms.saturating_sub(last) < AXIS_EVENT_SPACING_MS {
                return None;
            }
        }

        self.latched = direction;
        self.last_action_ms = Some(now_ms);
        Some(direction)
    }
}

impl Default for EdgeLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// One tick's worth of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Raw X axis sample.
    pub x: u8,
    /// Raw Y axis sample.
    pub y: u8,
    /// A press started this tick (falling edge of the button line).
    pub pressed: bool,
}

/// Combines the raw reads of a tick into a [`Snapshot`].
pub struct InputSampler {
    last_level_high: bool,
}

impl InputSampler {
    /// The line starts out as released, so a button already held at
    /// power-on registers on the first tick.
    pub const fn new() -> Self {
        Self {
            last_level_high: true,
        }
    }

    /// `button_level_high` is the raw line level (pull-up, active-low).
    pub fn observe(&mut self, x: u8, y: u8, button_level_high: bool) -> Snapshot {
        let pressed = self.last_level_high && !button_level_high;
        self.last_level_high = button_level_high;
        Snapshot { x, y, pressed }
    }
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}
