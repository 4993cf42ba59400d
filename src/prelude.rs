pub use embedded_hal::delay::DelayNs as _;
pub use embedded_hal::digital::OutputPin as _;
pub use fugit::ExtU32 as _;
pub use fugit::RateExtU32 as _;

pub use crate::comparator::ComparatorExt as _;
pub use crate::comparator::ComparatorSplit as _;
pub use crate::delay::DelayExt as _;
pub use crate::gpio::GpioExt as _;
pub use crate::rcc::RccExt as _;
pub use crate::sense::ComparatorOutput as _;
