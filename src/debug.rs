//! Provides debug output based on semihosting
//!
//! If you're running your program attached to a debugger, you might want to use
//! this module to enable debug output based on semihosting. This requires the
//! `debug` feature to be enabled.
//!
//! Without the `debug` feature, [`init`] does nothing and the [`print!`] and
//! [`println!`] macros discard their arguments, so the same program runs
//! without a debugger attached.
//!
//! ATTENTION: Programs that enable semihosting cannot run without a debugger
//! attached. Release builds for a standalone board must not enable `debug`.

use core::fmt;

#[cfg(feature = "debug")]
use core::cell::RefCell;

#[cfg(feature = "debug")]
use cortex_m::interrupt::Mutex;
#[cfg(feature = "debug")]
use cortex_m_semihosting::hio::HostStream;

/// Host stdout, opened by [`init`]
#[cfg(feature = "debug")]
pub static STDOUT: Mutex<RefCell<Option<HostStream>>> = Mutex::new(RefCell::new(None));

/// Initializes the debug output, if semihosting is enabled
///
/// Call this once, early in `main`. Messages printed before it are dropped.
pub fn init() {
    #[cfg(feature = "debug")]
    cortex_m::interrupt::free(|cs| {
        // no host attached means no output, not a failure
        *STDOUT.borrow(cs).borrow_mut() = cortex_m_semihosting::hio::hstdout().ok();
    });
}

#[doc(hidden)]
pub fn write_fmt(args: fmt::Arguments<'_>) {
    #[cfg(feature = "debug")]
    cortex_m::interrupt::free(|cs| {
        if let Some(stdout) = STDOUT.borrow(cs).borrow_mut().as_mut() {
            use core::fmt::Write;
            let _ = stdout.write_fmt(args);
        }
    });

    #[cfg(not(feature = "debug"))]
    let _ = args;
}

/// Sends a debug message to the host, if semihosting is enabled
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::debug::write_fmt(format_args!($($arg)*))
    };
}

/// Sends a debug message to the host, if semihosting is enabled
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($fmt:expr) => {
        $crate::print!(concat!($fmt, "\n"))
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::print!(concat!($fmt, "\n"), $($arg)*)
    };
}
