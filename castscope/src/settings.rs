//! Author-tunable parameters of presentations.

use core::fmt;
use core::ops::RangeInclusive;

use ordered_float::NotNan;

use crate::math::{FreeCoordinate, Rgba};
use crate::time::Duration;

/// Color painted onto every target a presentation reaches.
pub const HIGHLIGHT_COLOR: Rgba = Rgba::GREEN;

/// Width of the line display while a ray is presented.
pub const LINE_WIDTH: FreeCoordinate = 0.01;

/// Distance a line marker travels when a ray hit nothing.
pub const LINE_FALLBACK_DISTANCE: FreeCoordinate = 15.0;

/// Distance a proxy marker travels when a swept cast hit nothing.
pub const PROXY_FALLBACK_DISTANCE: FreeCoordinate = 100.0;

/// What happens to a presentation which is cancelled before it finishes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CancelPolicy {
    /// Stop where it is. Highlights stay painted and markers stay where they were.
    #[default]
    Abandon,
    /// Immediately restore highlighted targets and reset the marker.
    Revert,
}

/// Parameters of presentations, each kept within its allowed range.
///
/// Setters clamp out-of-range values into range and replace NaN with the default.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Settings {
    display_speed: NotNan<f64>,
    display_duration: NotNan<f64>,
    start_delay: NotNan<f64>,
    cancel_policy: CancelPolicy,
}

impl Settings {
    /// Allowed range of [`Self::display_speed()`], in distance units per second.
    pub const DISPLAY_SPEED_RANGE: RangeInclusive<f64> = 1.0..=10.0;
    /// Allowed range of [`Self::display_duration()`], in seconds.
    pub const DISPLAY_DURATION_RANGE: RangeInclusive<f64> = 0.0..=6.0;
    /// Allowed range of [`Self::start_delay()`], in seconds.
    pub const START_DELAY_RANGE: RangeInclusive<f64> = 0.25..=2.0;

    const DEFAULT_DISPLAY_SPEED: f64 = 2.0;
    const DEFAULT_DISPLAY_DURATION: f64 = 5.0;
    const DEFAULT_START_DELAY: f64 = 2.0;

    /// How fast markers travel along a cast, in distance units per second.
    pub fn display_speed(&self) -> f64 {
        self.display_speed.into_inner()
    }

    /// How long, in seconds, a finished result is held before it is reverted.
    pub fn display_duration(&self) -> f64 {
        self.display_duration.into_inner()
    }

    /// How long, in seconds, to wait after switching to a different scenario before
    /// casting, so the camera has time to move.
    pub fn start_delay(&self) -> f64 {
        self.start_delay.into_inner()
    }

    /// What to do with a presentation that is interrupted.
    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    /// [`Self::display_duration()`] as a [`Duration`].
    pub fn hold_duration(&self) -> Duration {
        Duration::from_secs_f64(self.display_duration())
    }

    /// [`Self::start_delay()`] as a [`Duration`].
    pub fn start_delay_duration(&self) -> Duration {
        Duration::from_secs_f64(self.start_delay())
    }

    /// Sets [`Self::display_speed()`].
    pub fn set_display_speed(&mut self, value: f64) {
        self.display_speed =
            clamp_or_default(value, Self::DISPLAY_SPEED_RANGE, Self::DEFAULT_DISPLAY_SPEED);
    }

    /// Sets [`Self::display_duration()`].
    pub fn set_display_duration(&mut self, value: f64) {
        self.display_duration = clamp_or_default(
            value,
            Self::DISPLAY_DURATION_RANGE,
            Self::DEFAULT_DISPLAY_DURATION,
        );
    }

    /// Sets [`Self::start_delay()`].
    pub fn set_start_delay(&mut self, value: f64) {
        self.start_delay =
            clamp_or_default(value, Self::START_DELAY_RANGE, Self::DEFAULT_START_DELAY);
    }

    /// Sets [`Self::cancel_policy()`].
    pub fn set_cancel_policy(&mut self, policy: CancelPolicy) {
        self.cancel_policy = policy;
    }

    /// Builder-style [`Self::set_display_speed()`].
    #[must_use]
    pub fn with_display_speed(mut self, value: f64) -> Self {
        self.set_display_speed(value);
        self
    }

    /// Builder-style [`Self::set_display_duration()`].
    #[must_use]
    pub fn with_display_duration(mut self, value: f64) -> Self {
        self.set_display_duration(value);
        self
    }

    /// Builder-style [`Self::set_start_delay()`].
    #[must_use]
    pub fn with_start_delay(mut self, value: f64) -> Self {
        self.set_start_delay(value);
        self
    }

    /// Builder-style [`Self::set_cancel_policy()`].
    #[must_use]
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.set_cancel_policy(policy);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_speed: nn(Self::DEFAULT_DISPLAY_SPEED),
            display_duration: nn(Self::DEFAULT_DISPLAY_DURATION),
            start_delay: nn(Self::DEFAULT_START_DELAY),
            cancel_policy: CancelPolicy::Abandon,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // strips off the NotNan wrappers
        f.debug_struct("Settings")
            .field("display_speed", &self.display_speed())
            .field("display_duration", &self.display_duration())
            .field("start_delay", &self.start_delay())
            .field("cancel_policy", &self.cancel_policy)
            .finish()
    }
}

fn clamp_or_default(value: f64, range: RangeInclusive<f64>, default: f64) -> NotNan<f64> {
    let value = if value.is_nan() {
        default
    } else {
        value.clamp(*range.start(), *range.end())
    };
    nn(value)
}

/// Only for values already known not to be NaN.
fn nn(value: f64) -> NotNan<f64> {
    NotNan::new(value).unwrap_or_default()
}
