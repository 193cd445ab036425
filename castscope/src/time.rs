//! Data types for the passage of time between frames.

use core::fmt;
use core::num::NonZeroU16;

#[doc(no_inline)]
pub use core::time::Duration;

// -------------------------------------------------------------------------------------------------

/// Specifies an amount of time passing, once per frame of the host's scheduler.
///
/// [`Tick`] values are passed along through the `step()` operations that advance
/// presentations and scenario selection.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tick {
    delta_t: Duration,

    /// Whether time is paused, and `delta_t` should not be considered
    /// as an amount of time passing. See [`Self::paused()`] for details.
    paused: bool,
}

impl Tick {
    /// Constructs a non-paused [`Tick`] of the given length.
    pub const fn new(delta_t: Duration) -> Self {
        Self {
            delta_t,
            paused: false,
        }
    }

    /// Construct a non-paused [`Tick`] from a duration expressed in fractional seconds.
    ///
    /// Negative and NaN values are treated as zero.
    pub fn from_seconds(dt: f64) -> Self {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        Self::new(Duration::from_nanos((dt * 1e9) as u64))
    }

    /// Returns the amount of time passed, as a [`Duration`].
    pub fn delta_t_duration(self) -> Duration {
        self.delta_t
    }

    /// Returns the amount of time passed, as a floating-point number of seconds.
    pub fn delta_t_f64(self) -> f64 {
        self.delta_t.as_secs_f64()
    }

    /// Set the paused flag. See [`Tick::paused`] for more information.
    #[must_use]
    pub fn pause(self) -> Self {
        Self {
            paused: true,
            ..self
        }
    }

    /// Returns the "paused" state of this Tick. If true, then step operations should
    /// not perform any changes that reflect time passing: markers stay where they are
    /// and countdowns do not advance.
    pub fn paused(&self) -> bool {
        self.paused
    }
}

// -------------------------------------------------------------------------------------------------

/// Defines a fixed rate of [`Tick`]s, for hosts that do not have a variable frame time
/// of their own (such as headless runs and tests).
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct TickSchedule {
    base_duration: Duration,
    divisor: NonZeroU16,
}

impl TickSchedule {
    /// Construct a [`TickSchedule`] which specifies `divisor` ticks per second.
    pub const fn per_second(divisor: u16) -> Self {
        Self {
            base_duration: Duration::from_secs(1),
            divisor: match NonZeroU16::new(divisor) {
                Some(x) => x,
                None => panic!("divisor must be nonzero"),
            },
        }
    }

    /// Returns the length of a [`Tick`] in this schedule.
    pub fn delta_t(&self) -> Duration {
        self.base_duration / u32::from(self.divisor.get())
    }

    /// Returns a tick of this schedule's length.
    pub fn tick(&self) -> Tick {
        Tick::new(self.delta_t())
    }

    /// Returns how many ticks of this schedule it takes for `duration` to pass,
    /// rounded up.
    pub fn ticks_in(&self, duration: Duration) -> u64 {
        let per_tick = self.delta_t().as_nanos();
        if per_tick == 0 {
            return 0;
        }
        u64::try_from(duration.as_nanos().div_ceil(per_tick)).unwrap_or(u64::MAX)
    }
}

impl fmt::Debug for TickSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TickSchedule {
            base_duration,
            divisor,
        } = *self;
        write!(f, "TickSchedule({base_duration:?} / {divisor})")
    }
}

impl Default for TickSchedule {
    /// Sixty ticks per second.
    fn default() -> Self {
        Self::per_second(60)
    }
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_seconds() {
        assert_eq!(
            Tick::from_seconds(0.5).delta_t_duration(),
            Duration::from_millis(500)
        );
        assert_eq!(Tick::from_seconds(-1.0).delta_t_f64(), 0.0);
        assert_eq!(Tick::from_seconds(f64::NAN).delta_t_f64(), 0.0);
    }

    #[test]
    fn pause() {
        let tick = Tick::from_seconds(0.25);
        assert!(!tick.paused());
        assert!(tick.pause().paused());
        assert_eq!(tick.pause().delta_t_duration(), tick.delta_t_duration());
    }

    #[test]
    fn schedule() {
        let schedule = TickSchedule::per_second(4);
        assert_eq!(schedule.delta_t(), Duration::from_millis(250));
        assert_eq!(schedule.tick(), Tick::from_seconds(0.25));
        assert_eq!(schedule.ticks_in(Duration::from_secs(2)), 8);
        assert_eq!(schedule.ticks_in(Duration::from_millis(2100)), 9);
        assert_eq!(
            format!("{:?}", TickSchedule::default()),
            "TickSchedule(1s / 60)"
        );
    }
}
