//! Delays
use core::cmp;

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use embedded_hal::delay::DelayNs;
use fugit::HertzU32;

use crate::rcc::Clocks;

/// System timer (SysTick) as a delay provider
pub struct Delay {
    clk: HertzU32,
    syst: SYST,
}

impl Delay {
    /// Configures the system timer (SysTick) as a delay provider
    pub fn new(mut syst: SYST, clocks: &Clocks) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        Delay {
            syst,
            clk: clocks.core_clk,
        }
    }

    fn wait_cycles(&mut self, mut cycles: u64) {
        while cycles > 0 {
            let reload = cmp::min(cycles, 0x00FF_FFFF);
            cycles -= reload;
            self.syst.set_reload(reload as u32);
            self.syst.clear_current();
            self.syst.enable_counter();
            while !self.syst.has_wrapped() {}
            self.syst.disable_counter();
        }
    }
}

/// Core clock cycles covering `ticks` at `per_second` ticks per second, rounded up
fn cycles(clk: HertzU32, ticks: u32, per_second: u64) -> u64 {
    let ticks = u64::from(ticks) * u64::from(clk.raw());
    (ticks + per_second - 1) / per_second
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_cycles(cycles(self.clk, ns, 1_000_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_cycles(cycles(self.clk, us, 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait_cycles(cycles(self.clk, ms, 1_000));
    }
}

pub trait DelayExt {
    fn delay(self, clocks: &Clocks) -> Delay;
}

impl DelayExt for SYST {
    fn delay(self, clocks: &Clocks) -> Delay {
        Delay::new(self, clocks)
    }
}
