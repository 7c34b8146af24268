//! Hardware-independent core of the currency kiosk firmware.
//!
//! Everything that can run on the host lives here: the LCD protocol, the
//! joystick input logic, the UI phase machine and the conversion engine.
//! The embedded binary (`main.rs`, `embedded` feature) only binds these to
//! the nRF52840 peripherals.
//!
//! Usage: `cargo test` runs the unit, integration and property tests on
//! the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod conversion;
pub mod error;
pub mod lcd;
pub mod ui;

pub use controller::Controller;
pub use conversion::{convert, Conversion, Currency};
pub use error::Error;
