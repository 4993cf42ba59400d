#![cfg_attr(not(test), no_std)]
#![allow(non_camel_case_types)]

#[cfg(all(feature = "device-selected", not(feature = "stm32g0x1")))]
compile_error!("This crate requires one of the following features enabled: stm32g071 or stm32g081");

pub extern crate cortex_m;
pub extern crate embedded_hal as hal;
pub extern crate nb;

#[cfg(feature = "device-selected")]
pub extern crate stm32g0;

pub use nb::block;

#[cfg(feature = "stm32g071")]
pub use stm32g0::stm32g071 as stm32;

#[cfg(feature = "stm32g081")]
pub use stm32g0::stm32g081 as stm32;

#[cfg(all(feature = "rt", feature = "device-selected"))]
pub use crate::stm32::interrupt;

#[macro_use]
pub mod debug;

pub mod sense;
pub mod wait;

#[cfg(feature = "device-selected")]
pub mod board;
#[cfg(feature = "device-selected")]
pub mod comparator;
#[cfg(feature = "device-selected")]
pub mod delay;
#[cfg(feature = "device-selected")]
pub mod gpio;
#[cfg(feature = "device-selected")]
pub mod prelude;
#[cfg(feature = "device-selected")]
pub mod rcc;

#[cfg(feature = "device-selected")]
mod sealed {
    pub trait Sealed {}
}
#[cfg(feature = "device-selected")]
pub(crate) use sealed::Sealed;
