//! Currency kiosk firmware for the nRF52840.
//!
//! Polls the joystick every [`POLL_INTERVAL_MS`], feeds the readings
//! through the UI session and redraws the 16×2 LCD when the screen
//! changes.

#![no_std]
#![no_main]

mod board;

use currency_kiosk::config::POLL_INTERVAL_MS;
use currency_kiosk::controller::Controller;
use currency_kiosk::lcd::{I2cTransport, Lcd};
use currency_kiosk::ui::{InputSampler, Phase, Session};
use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_time::{Delay, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("currency-kiosk starting");

    let p = embassy_nrf::init(Default::default());
    let board::Board {
        lcd_bus,
        mut joystick,
        button,
    } = board::init(p).await;
    info!("Peripherals initialized");

    let lcd = Lcd::new(I2cTransport::new(lcd_bus), Delay);
    let mut controller = Controller::new(lcd);
    let mut session = Session::new();
    let mut sampler = InputSampler::new();

    if let Err(e) = controller.start(&mut session) {
        error!("Display start-up failed: {}", e);
    }

    while session.phase() != Phase::Fault {
        let now_ms = Instant::now().as_millis();

        match joystick.read().await {
            Ok((x, y)) => {
                let input = sampler.observe(x, y, button.is_high());
                if let Err(e) = controller.tick(&mut session, &input, now_ms) {
                    warn!("Redraw failed: {}", e);
                }
            }
            Err(e) => {
                warn!("Joystick read failed: {}", e);
                controller.record_failure(&mut session, e);
            }
        }

        Timer::after_millis(POLL_INTERVAL_MS).await;
    }

    error!("Halted in fault state");
    loop {
        Timer::after_secs(60).await;
    }
}
