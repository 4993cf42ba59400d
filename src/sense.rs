//! Comparator-to-LED follower
//!
//! A two-state machine that mirrors the digital output of a comparator onto an
//! LED. In [`LedState::Off`] the LED is driven low until the comparator output
//! reads high; in [`LedState::On`] it is driven high until the output reads
//! low. The LED is only written on a level change.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use fugit::MicrosDurationU32;

use crate::wait;

/// Digital output of an analog comparator
pub trait ComparatorOutput {
    /// Returns `true` while the comparator output is high
    fn output(&self) -> bool;
}

impl<T: ComparatorOutput> ComparatorOutput for &T {
    fn output(&self) -> bool {
        (**self).output()
    }
}

/// LED state driven by the follower
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// LED pin low, waiting for the comparator output to rise
    Off,
    /// LED pin high, waiting for the comparator output to fall
    On,
}

impl LedState {
    pub fn is_on(self) -> bool {
        self == LedState::On
    }
}

/// Mirrors a comparator output onto an LED pin
pub struct Follower<C, L> {
    comparator: C,
    led: L,
    state: LedState,
}

impl<C, L> Follower<C, L>
where
    C: ComparatorOutput,
    L: OutputPin,
{
    /// Takes ownership of the comparator and the LED and drives the LED low
    pub fn new(comparator: C, mut led: L) -> Result<Self, L::Error> {
        led.set_low()?;
        Ok(Follower {
            comparator,
            led,
            state: LedState::Off,
        })
    }

    /// Returns the state the LED was last driven to
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Samples the comparator once
    ///
    /// Returns the new state if the output level changed since the last
    /// transition, `WouldBlock` otherwise.
    pub fn poll(&mut self) -> nb::Result<LedState, L::Error> {
        let next = match (self.state, self.comparator.output()) {
            (LedState::Off, true) => LedState::On,
            (LedState::On, false) => LedState::Off,
            _ => return Err(nb::Error::WouldBlock),
        };

        match next {
            LedState::On => self.led.set_high(),
            LedState::Off => self.led.set_low(),
        }
        .map_err(nb::Error::Other)?;

        self.state = next;
        Ok(next)
    }

    /// Spins until the comparator output changes level
    pub fn wait_transition(&mut self) -> Result<LedState, L::Error> {
        nb::block!(self.poll())
    }

    /// Waits at most `timeout` for the comparator output to change level
    ///
    /// Returns `Ok(None)` if the level held for the whole timeout.
    pub fn wait_transition_within<D: DelayNs>(
        &mut self,
        delay: &mut D,
        timeout: MicrosDurationU32,
    ) -> Result<Option<LedState>, L::Error> {
        let mut outcome = None;
        let waited = wait::until(delay, Some(timeout), || {
            outcome = match self.poll() {
                Ok(state) => Some(Ok(state)),
                Err(nb::Error::Other(e)) => Some(Err(e)),
                Err(nb::Error::WouldBlock) => None,
            };
            outcome.is_some()
        });

        match waited {
            Ok(()) => outcome.transpose(),
            Err(wait::TimedOut) => Ok(None),
        }
    }

    /// Follows the comparator forever
    ///
    /// Only returns if driving the LED fails.
    pub fn run(mut self) -> Result<Infallible, L::Error> {
        loop {
            self.wait_transition()?;
        }
    }

    /// Releases the comparator and the LED
    pub fn release(self) -> (C, L) {
        (self.comparator, self.led)
    }
}
