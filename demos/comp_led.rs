//! Lights LD4 while the voltage on PA1 is below the internal reference.

#![deny(warnings)]
#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate comp_led as hal;
extern crate cortex_m;
extern crate cortex_m_rt as rt;
extern crate panic_halt;

use hal::board;
use hal::prelude::*;
use hal::println;
use hal::sense::Follower;
use hal::stm32;
use rt::entry;

#[entry]
fn main() -> ! {
    hal::debug::init();

    let dp = stm32::Peripherals::take().expect("cannot take peripherals");
    let cp = cortex_m::Peripherals::take().expect("cannot take core peripherals");

    let mut rcc = dp.RCC.constrain();
    let mut delay = cp.SYST.delay(&rcc.clocks);

    let (input, led) = board::init_gpio(dp.GPIOA, &mut rcc);

    let comp = board::init_comparator(dp.COMP, input, &mut rcc, &mut delay);
    println!("COMP1 active, following PA1");

    let follower = match Follower::new(comp, led) {
        Ok(follower) => follower,
        Err(never) => match never {},
    };

    match follower.run() {
        Ok(never) | Err(never) => match never {},
    }
}
