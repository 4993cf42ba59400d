//! General Purpose Input / Output
use core::marker::PhantomData;

use crate::rcc::Rcc;

/// Default pin mode
pub type DefaultMode = Analog;

/// Extension trait to split a GPIO peripheral in independent pins and registers
pub trait GpioExt {
    /// The parts to split the GPIO into
    type Parts;

    /// Splits the GPIO block into independent pins and registers
    fn split(self, rcc: &mut Rcc) -> Self::Parts;
}

/// Analog mode (type state)
pub struct Analog;

/// Output mode (type state)
pub struct Output<MODE> {
    _mode: PhantomData<MODE>,
}

/// Push pull output (type state)
pub struct PushPull;

const MODER_OUTPUT: u32 = 0b01;
const MODER_ANALOG: u32 = 0b11;

macro_rules! gpio {
    ($GPIOX:ident, $gpiox:ident, [
        $($PXi:ident: ($pxi:ident, $i:expr),)+
    ]) => {
        /// GPIO
        pub mod $gpiox {
            use core::convert::Infallible;
            use core::marker::PhantomData;
            use embedded_hal::digital::{ErrorType, OutputPin, PinState};
            use crate::stm32::$GPIOX;
            use crate::rcc::{Enable, Rcc};
            use super::*;

            /// GPIO parts
            pub struct Parts {
                $(
                    pub $pxi: $PXi<DefaultMode>,
                )+
            }

            impl GpioExt for $GPIOX {
                type Parts = Parts;

                fn split(self, rcc: &mut Rcc) -> Parts {
                    <$GPIOX>::enable(rcc);

                    Parts {
                        $(
                            $pxi: $PXi { _mode: PhantomData },
                        )+
                    }
                }
            }

            $(
                pub struct $PXi<MODE> {
                    _mode: PhantomData<MODE>,
                }

                impl<MODE> $PXi<MODE> {
                    /// Switches the pin to `moder` with no pull resistor
                    fn set_mode(&self, moder: u32) {
                        let offset = 2 * $i;
                        // NOTE(unsafe) read-modify-write limited to this pin's bits
                        unsafe {
                            let gpio = &*$GPIOX::ptr();
                            gpio.pupdr().modify(|r, w| w.bits(r.bits() & !(0b11 << offset)));
                            gpio.otyper().modify(|r, w| w.bits(r.bits() & !(0b1 << $i)));
                            gpio.moder().modify(|r, w| {
                                w.bits((r.bits() & !(0b11 << offset)) | (moder << offset))
                            });
                        }
                    }

                    /// Configures the pin to operate as an analog pin
                    pub fn into_analog(self) -> $PXi<Analog> {
                        self.set_mode(MODER_ANALOG);
                        $PXi { _mode: PhantomData }
                    }

                    /// Configures the pin to operate as a push pull output pin with
                    /// `initial_state` latched before the output driver turns on
                    pub fn into_push_pull_output_in_state(
                        self,
                        initial_state: PinState,
                    ) -> $PXi<Output<PushPull>> {
                        let mut pin: $PXi<Output<PushPull>> = $PXi { _mode: PhantomData };
                        match pin.set_state(initial_state) {
                            Ok(()) => {}
                            Err(never) => match never {},
                        }
                        self.set_mode(MODER_OUTPUT);
                        pin
                    }
                }

                impl<MODE> ErrorType for $PXi<MODE> {
                    type Error = Infallible;
                }

                impl OutputPin for $PXi<Output<PushPull>> {
                    fn set_high(&mut self) -> Result<(), Self::Error> {
                        // NOTE(unsafe) atomic write to a stateless register
                        unsafe { (*$GPIOX::ptr()).bsrr().write(|w| w.bits(1 << $i)) };
                        Ok(())
                    }

                    fn set_low(&mut self) -> Result<(), Self::Error> {
                        // NOTE(unsafe) atomic write to a stateless register
                        unsafe { (*$GPIOX::ptr()).bsrr().write(|w| w.bits(1 << ($i + 16))) };
                        Ok(())
                    }
                }
            )+
        }
    }
}

gpio!(GPIOA, gpioa, [
    PA0: (pa0, 0),
    PA1: (pa1, 1),
    PA2: (pa2, 2),
    PA3: (pa3, 3),
    PA4: (pa4, 4),
    PA5: (pa5, 5),
    PA6: (pa6, 6),
    PA7: (pa7, 7),
    PA8: (pa8, 8),
    PA9: (pa9, 9),
    PA10: (pa10, 10),
    PA11: (pa11, 11),
    PA12: (pa12, 12),
    PA13: (pa13, 13),
    PA14: (pa14, 14),
    PA15: (pa15, 15),
]);
