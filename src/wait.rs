//! Bounded busy-waits
//!
//! The comparator exposes its state only through status bits, so every wait in
//! this crate is a poll loop. [`until`] runs that loop either unbounded (tight
//! spin, nothing else runs on the core) or against a timeout paced by a
//! [`DelayNs`] provider.

use core::fmt;

use embedded_hal::delay::DelayNs;
use fugit::MicrosDurationU32;

/// A bounded wait ran out of time before its condition held
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut;

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out before the condition held")
    }
}

/// Polls `ready` until it returns `true`
///
/// With `timeout == None` this spins on `ready` forever and never touches
/// `delay`. With a timeout, `ready` is polled once per microsecond of delay
/// and checked one last time after the budget is spent.
pub fn until<D, F>(
    delay: &mut D,
    timeout: Option<MicrosDurationU32>,
    mut ready: F,
) -> Result<(), TimedOut>
where
    D: DelayNs,
    F: FnMut() -> bool,
{
    let budget = match timeout {
        Some(timeout) => timeout.to_micros(),
        None => {
            while !ready() {}
            return Ok(());
        }
    };

    for _ in 0..budget {
        if ready() {
            return Ok(());
        }
        delay.delay_us(1);
    }

    if ready() {
        Ok(())
    } else {
        Err(TimedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::ExtU32;

    #[derive(Default)]
    struct CountingDelay {
        ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += u64::from(ns);
        }
    }

    fn ready_after(polls: u32) -> impl FnMut() -> bool {
        let mut seen = 0;
        move || {
            seen += 1;
            seen > polls
        }
    }

    #[test]
    fn ready_on_first_poll_does_not_delay() {
        let mut delay = CountingDelay::default();
        assert_eq!(until(&mut delay, Some(10.micros()), || true), Ok(()));
        assert_eq!(delay.ns, 0);
    }

    #[test]
    fn waits_one_microsecond_per_failed_poll() {
        let mut delay = CountingDelay::default();
        assert_eq!(until(&mut delay, Some(10.micros()), ready_after(3)), Ok(()));
        assert_eq!(delay.ns, 3_000);
    }

    #[test]
    fn gives_up_after_budget() {
        let mut delay = CountingDelay::default();
        let mut polls = 0;
        let res = until(&mut delay, Some(10.micros()), || {
            polls += 1;
            false
        });
        assert_eq!(res, Err(TimedOut));
        assert_eq!(polls, 11);
        assert_eq!(delay.ns, 10_000);
    }

    #[test]
    fn last_chance_poll_after_budget() {
        let mut delay = CountingDelay::default();
        assert_eq!(until(&mut delay, Some(4.micros()), ready_after(4)), Ok(()));
        assert_eq!(delay.ns, 4_000);
    }

    #[test]
    fn zero_timeout_polls_once() {
        let mut delay = CountingDelay::default();
        assert_eq!(until(&mut delay, Some(0.micros()), || false), Err(TimedOut));
        assert_eq!(until(&mut delay, Some(0.micros()), || true), Ok(()));
        assert_eq!(delay.ns, 0);
    }

    #[test]
    fn unbounded_wait_spins_without_delay() {
        let mut delay = CountingDelay::default();
        assert_eq!(until(&mut delay, None, ready_after(1_000)), Ok(()));
        assert_eq!(delay.ns, 0);
    }
}
