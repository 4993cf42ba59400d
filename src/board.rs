//! NUCLEO-G071RB wiring for the comparator LED demo
//!
//! | signal           | pin | board connector |
//! |------------------|-----|-----------------|
//! | comparator input | PA1 | Arduino A1      |
//! | LED LD4          | PA5 | Arduino D13     |
//!
//! COMP1 compares PA1 against VREFINT through the scaler at 1/1. The output
//! polarity is inverted so the LED lights while the input sits below the
//! reference.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::comparator::{
    Comparator, ComparatorExt, ComparatorSplit, Config, Enabled, RefintInput, COMP1,
};
use crate::gpio::{gpioa, Analog, GpioExt, Output, PushPull};
use crate::rcc::Rcc;
use crate::stm32::{COMP, GPIOA};

/// Analog input fed to the comparator's positive input
pub type ComparatorInput = gpioa::PA1<Analog>;

/// User LED, active high
pub type Led = gpioa::PA5<Output<PushPull>>;

/// Comparator negative input
pub const REFERENCE: RefintInput = RefintInput::VRefint;

/// Comparator options: defaults plus inverted output
pub fn comparator_config() -> Config {
    Config::default().output_inverted()
}

/// Enables the GPIO port and configures the comparator input and the LED
///
/// The LED output latch is cleared before the pin turns into an output.
pub fn init_gpio(port: GPIOA, rcc: &mut Rcc) -> (ComparatorInput, Led) {
    let gpioa = port.split(rcc);

    let input = gpioa.pa1.into_analog();
    let led = gpioa.pa5.into_push_pull_output_in_state(PinState::Low);

    (input, led)
}

/// Brings up COMP1 and waits out its start-up time
pub fn init_comparator<D: DelayNs>(
    comp: COMP,
    input: ComparatorInput,
    rcc: &mut Rcc,
    delay: &mut D,
) -> Comparator<COMP1, Enabled> {
    let comp1 = comp
        .split(rcc)
        .comparator(input, REFERENCE, comparator_config(), &rcc.clocks)
        .enable();
    comp1.wait_active(delay);

    comp1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::PowerMode;
    use fugit::ExtU32;

    #[test]
    fn led_lights_below_reference() {
        let config = comparator_config();
        assert!(config.is_inverted());
        assert_eq!(config, Config::default().output_inverted());
        assert_eq!(config, Config::default().power_mode(PowerMode::HighSpeed).output_inverted());
        assert_eq!(config.startup_time(), 5.micros::<1, 1_000_000>());
    }

    #[test]
    fn reference_is_full_scale_vrefint() {
        assert_eq!(REFERENCE, RefintInput::VRefint);
        assert_eq!(REFERENCE as u8, 0b0011);
    }
}
