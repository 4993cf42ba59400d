//! Comparator
//!
//! COMP1 compares its positive input pin against a fraction of VREFINT and
//! exposes the result as a digital output bit. A comparator is initialized in
//! the [`Disabled`] state, so every input and option is in place before
//! [`Comparator::enable`] turns it on. Its output is only meaningful once
//! [`Comparator::wait_active`] returns.

use core::marker::PhantomData;

use embedded_hal::delay::DelayNs;
use fugit::{ExtU32, MicrosDurationU32};

use crate::gpio::*;
use crate::rcc::{Clocks, Enable, Rcc, Reset};
use crate::sense::ComparatorOutput;
use crate::stm32::comp::COMP1_CSR;
use crate::stm32::COMP;

/// Enabled Comparator (type state)
pub struct Enabled;

/// Disabled Comparator (type state)
pub struct Disabled;

pub struct COMP1 {
    _rb: PhantomData<()>,
}

impl COMP1 {
    pub fn csr(&self) -> &COMP1_CSR {
        // SAFETY: The COMP1 type is only constructed with logical ownership of
        // these registers.
        unsafe { &*COMP::ptr() }.comp1_csr()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    power_mode: PowerMode,
    inverted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inverted: false,
            power_mode: PowerMode::HighSpeed,
        }
    }
}

impl Config {
    pub fn output_inverted(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.power_mode = power_mode;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Worst-case start-up time of the configured power mode
    pub fn startup_time(&self) -> MicrosDurationU32 {
        self.power_mode.startup_time()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    HighSpeed = 0b00,
    MediumSpeed = 0b01,
}

impl PowerMode {
    /// Worst-case start-up time until the output is valid
    pub fn startup_time(self) -> MicrosDurationU32 {
        match self {
            PowerMode::HighSpeed => 5.micros(),
            PowerMode::MediumSpeed => 80.micros(),
        }
    }
}

/// Comparator positive input
pub trait PositiveInput<C> {
    fn setup(&self, comp: &C);
}

/// Comparator negative input
pub trait NegativeInput<C> {
    fn setup(&self, comp: &C);
}

impl PositiveInput<COMP1> for gpioa::PA1<Analog> {
    fn setup(&self, comp: &COMP1) {
        comp.csr().modify(|_, w| unsafe { w.inpsel().bits(0b10) });
    }
}

/// Internal reference voltage through the comparator's scaler
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefintInput {
    /// VRefint * 1/4
    VRefintM14 = 0b0000,
    /// VRefint * 1/2
    VRefintM12 = 0b0001,
    /// VRefint * 3/4
    VRefintM34 = 0b0010,
    /// VRefint
    VRefint = 0b0011,
}

impl NegativeInput<COMP1> for RefintInput {
    fn setup(&self, comp: &COMP1) {
        comp.csr()
            .modify(|_, w| unsafe { w.inmsel().bits(*self as u8) });
    }
}

pub struct Comparator<C, ED> {
    regs: C,
    config: Config,
    _enabled: PhantomData<ED>,
}

pub trait ComparatorExt<COMP> {
    /// Initializes a comparator, leaving it disabled
    fn comparator<P: PositiveInput<COMP>, N: NegativeInput<COMP>>(
        self,
        positive_input: P,
        negative_input: N,
        config: Config,
        clocks: &Clocks,
    ) -> Comparator<COMP, Disabled>;
}

impl ComparatorExt<COMP1> for COMP1 {
    fn comparator<P: PositiveInput<COMP1>, N: NegativeInput<COMP1>>(
        self,
        positive_input: P,
        negative_input: N,
        config: Config,
        clocks: &Clocks,
    ) -> Comparator<COMP1, Disabled> {
        self.csr().modify(|_, w| w.en().clear_bit());
        positive_input.setup(&self);
        negative_input.setup(&self);
        // Delay for scaler voltage bridge initialization for VREFINT inputs
        let voltage_scaler_delay = clocks.sys_clk.raw() / (1_000_000 / 200); // 200us
        cortex_m::asm::delay(voltage_scaler_delay);
        self.csr().modify(|_, w| unsafe {
            w.polarity()
                .bit(config.inverted)
                .pwrmode()
                .bits(config.power_mode as u8)
        });

        Comparator {
            regs: self,
            config,
            _enabled: PhantomData,
        }
    }
}

impl Comparator<COMP1, Disabled> {
    /// Enables the comparator
    ///
    /// The output is not valid until [`Comparator::wait_active`] returns.
    pub fn enable(self) -> Comparator<COMP1, Enabled> {
        self.regs.csr().modify(|_, w| w.en().set_bit());
        Comparator {
            regs: self.regs,
            config: self.config,
            _enabled: PhantomData,
        }
    }
}

impl Comparator<COMP1, Enabled> {
    /// Waits out the analog start-up time of the configured power mode
    ///
    /// The comparator has no ready flag, so this is a fixed delay.
    pub fn wait_active<D: DelayNs>(&self, delay: &mut D) {
        delay.delay_us(self.config.startup_time().to_micros());
    }

    /// Returns the value of the output of the comparator
    pub fn output(&self) -> bool {
        self.regs.csr().read().value().bit_is_set()
    }
}

impl ComparatorOutput for Comparator<COMP1, Enabled> {
    fn output(&self) -> bool {
        Comparator::<COMP1, Enabled>::output(self)
    }
}

pub fn split(_comp: COMP, rcc: &mut Rcc) -> COMP1 {
    // Enable and reset SYSCFG/COMP/VREFBUF
    COMP::enable(rcc);
    COMP::reset(rcc);

    COMP1 { _rb: PhantomData }
}

pub trait ComparatorSplit {
    fn split(self, rcc: &mut Rcc) -> COMP1;
}

impl ComparatorSplit for COMP {
    fn split(self, rcc: &mut Rcc) -> COMP1 {
        split(self, rcc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDelay {
        waited_ns: u64,
        calls: u32,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.waited_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn enabled(config: Config) -> Comparator<COMP1, Enabled> {
        Comparator {
            regs: COMP1 { _rb: PhantomData },
            config,
            _enabled: PhantomData,
        }
    }

    #[test]
    fn wait_active_is_a_single_startup_delay() {
        let mut delay = RecordingDelay::default();
        enabled(Config::default()).wait_active(&mut delay);
        assert_eq!((delay.waited_ns, delay.calls), (5_000, 1));

        let mut delay = RecordingDelay::default();
        enabled(Config::default().power_mode(PowerMode::MediumSpeed)).wait_active(&mut delay);
        assert_eq!(delay.waited_ns, 80_000);
    }

    #[test]
    fn default_config_is_high_speed_non_inverted() {
        let config = Config::default();
        assert_eq!(config.power_mode, PowerMode::HighSpeed);
        assert!(!config.is_inverted());
        assert_eq!(config.startup_time(), 5.micros::<1, 1_000_000>());
    }

    #[test]
    fn startup_time_follows_power_mode() {
        assert_eq!(PowerMode::HighSpeed.startup_time(), 5.micros::<1, 1_000_000>());
        assert_eq!(PowerMode::MediumSpeed.startup_time(), 80.micros::<1, 1_000_000>());

        let config = Config::default().power_mode(PowerMode::MediumSpeed);
        assert_eq!(config.startup_time().to_micros(), 80);
    }

    #[test]
    fn builder_keeps_other_options() {
        let config = Config::default()
            .power_mode(PowerMode::MediumSpeed)
            .output_inverted();
        assert!(config.is_inverted());
        assert_eq!(config.power_mode, PowerMode::MediumSpeed);
    }

    #[test]
    fn refint_selects_scaler_taps() {
        assert_eq!(RefintInput::VRefintM14 as u8, 0b0000);
        assert_eq!(RefintInput::VRefintM12 as u8, 0b0001);
        assert_eq!(RefintInput::VRefintM34 as u8, 0b0010);
        assert_eq!(RefintInput::VRefint as u8, 0b0011);
    }

    #[test]
    fn power_mode_register_encoding() {
        assert_eq!(PowerMode::HighSpeed as u8, 0b00);
        assert_eq!(PowerMode::MediumSpeed as u8, 0b01);
    }
}
