//! Reset and Clock Control
//!
//! The demo runs on the reset clock tree: HSI16 undivided feeds SYSCLK and the
//! core. [`Rcc`] records those frequencies and gates peripheral clocks.

use fugit::{HertzU32, RateExtU32};

use crate::stm32::RCC;

/// HSI speed
pub const HSI_FREQ: u32 = 16_000_000;

/// Clock frequencies
#[derive(Clone, Copy, Debug)]
pub struct Clocks {
    /// System frequency
    pub sys_clk: HertzU32,
    /// Core (SysTick) frequency
    pub core_clk: HertzU32,
}

impl Default for Clocks {
    fn default() -> Clocks {
        Clocks {
            sys_clk: HSI_FREQ.Hz(),
            core_clk: HSI_FREQ.Hz(),
        }
    }
}

/// Constrained RCC peripheral
pub struct Rcc {
    /// Clock configuration
    pub clocks: Clocks,
    pub(crate) rb: RCC,
}

/// Extension trait that constrains the `RCC` peripheral
pub trait RccExt {
    /// Constrains the `RCC` peripheral so it plays nicely with the other abstractions
    fn constrain(self) -> Rcc;
}

impl RccExt for RCC {
    fn constrain(self) -> Rcc {
        Rcc {
            rb: self,
            clocks: Clocks::default(),
        }
    }
}

/// Enable peripheral clock
pub trait Enable: crate::Sealed {
    fn enable(rcc: &mut Rcc);
}

/// Reset peripheral
pub trait Reset: crate::Sealed {
    fn reset(rcc: &mut Rcc);
}

macro_rules! bus {
    ($($PER:ident => ($enr:ident, $rstr:ident, $bit:expr),)+) => {
        $(
            impl crate::Sealed for crate::stm32::$PER {}

            impl Enable for crate::stm32::$PER {
                #[inline(always)]
                fn enable(rcc: &mut Rcc) {
                    // NOTE(unsafe) only this peripheral's enable bit changes
                    rcc.rb.$enr().modify(|r, w| unsafe { w.bits(r.bits() | (1 << $bit)) });
                }
            }

            impl Reset for crate::stm32::$PER {
                #[inline(always)]
                fn reset(rcc: &mut Rcc) {
                    // NOTE(unsafe) only this peripheral's reset bit changes
                    rcc.rb.$rstr().modify(|r, w| unsafe { w.bits(r.bits() | (1 << $bit)) });
                    rcc.rb.$rstr().modify(|r, w| unsafe { w.bits(r.bits() & !(1 << $bit)) });
                }
            }
        )+
    }
}

bus! {
    GPIOA => (iopenr, ioprstr, 0),

    // SYSCFGEN gates SYSCFG, COMP and VREFBUF together
    COMP => (apbenr2, apbrstr2, 0),
}
