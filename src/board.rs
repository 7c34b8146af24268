//! nRF52840 peripheral bring-up.
//!
//! Binds the pins listed in `config.rs` to the TWIM (LCD expander), the
//! SAADC (joystick axes) and a GPIO input (joystick switch).

use currency_kiosk::config::ADC_TIMEOUT_MS;
use currency_kiosk::error::Error;
use defmt::info;
use embassy_nrf::gpio::{Input, Pull};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::saadc::{self, ChannelConfig, Gain, Reference, Resolution, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals, Peripherals};
use embassy_time::{with_timeout, Duration};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Peripherals the control loop needs, already configured.
pub struct Board {
    pub lcd_bus: Twim<'static, TWISPI0>,
    pub joystick: Joystick,
    pub button: Input<'static>,
}

/// Configure every peripheral the firmware uses.
pub async fn init(p: Peripherals) -> Board {
    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K100;
    let lcd_bus = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);

    let joystick = Joystick::new(p.SAADC, p.P0_02, p.P0_03).await;

    // Active-low switch to ground.
    let button = Input::new(p.P0_24, Pull::Up);

    Board {
        lcd_bus,
        joystick,
        button,
    }
}

/// Two-axis analog joystick on AIN0 (X) and AIN1 (Y).
pub struct Joystick {
    adc: Saadc<'static, 2>,
}

impl Joystick {
    async fn new(
        saadc: peripherals::SAADC,
        x_pin: peripherals::P0_02,
        y_pin: peripherals::P0_03,
    ) -> Self {
        let mut config = saadc::Config::default();
        config.resolution = Resolution::_8BIT;

        let x = axis_channel(ChannelConfig::single_ended(x_pin));
        let y = axis_channel(ChannelConfig::single_ended(y_pin));

        let adc = Saadc::new(saadc, Irqs, config, [x, y]);
        adc.calibrate().await;
        info!("SAADC calibrated");

        Self { adc }
    }

    /// Sample both axes as 8-bit values.
    pub async fn read(&mut self) -> Result<(u8, u8), Error> {
        let mut samples = [0i16; 2];
        with_timeout(
            Duration::from_millis(ADC_TIMEOUT_MS),
            self.adc.sample(&mut samples),
        )
        .await
        .map_err(|_| Error::AdcTimeout)?;

        Ok((to_reading(samples[0]), to_reading(samples[1])))
    }
}

/// Full scale equals VDD, so a centered stick reads mid-range.
fn axis_channel(mut channel: ChannelConfig<'static>) -> ChannelConfig<'static> {
    channel.gain = Gain::GAIN1_4;
    channel.reference = Reference::VDD1_4;
    channel
}

/// Single-ended conversions can dip slightly below zero.
fn to_reading(sample: i16) -> u8 {
    sample.clamp(0, u8::MAX as i16) as u8
}
