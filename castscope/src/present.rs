//! The per-tick state machine which animates one cast result.

use alloc::vec::Vec;

use crate::highlight::HighlightLedger;
use crate::math::{FreeCoordinate, FreePoint, FreeVector, lerp_clamped};
use crate::query::QueryResult;
use crate::scenario::ProxyId;
use crate::settings::{
    CancelPolicy, LINE_FALLBACK_DISTANCE, PROXY_FALLBACK_DISTANCE, Settings,
};
use crate::stage::Stage;
use crate::time::{Duration, Tick};


/// Log target for messages produced on every tick.
/// [`util::log::standard_filter`](crate::util::log::standard_filter) excludes it.
pub(crate) const FRAME_LOG_TARGET: &str = "castscope::frame";

/// What moves along the cast while it is presented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Marker {
    /// The [`LineDisplay`](crate::stage::LineDisplay), whose far endpoint is moved.
    Line,
    /// A [`ProxyObject`](crate::stage::ProxyObject), which is moved bodily.
    Proxy(ProxyId),
}

impl Marker {
    /// Distance to travel when the cast hit nothing.
    pub fn fallback_distance(self) -> FreeCoordinate {
        match self {
            Marker::Line => LINE_FALLBACK_DISTANCE,
            Marker::Proxy(_) => PROXY_FALLBACK_DISTANCE,
        }
    }
}

/// Where a [`Presentation`] is in its life.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::IntoStaticStr)]
pub enum Phase {
    /// Finished (or never started); nothing further will happen.
    Idle,
    /// The marker is moving along the cast and hits are being highlighted.
    Traveling,
    /// The marker has reached the end, and the result is left on screen.
    Holding,
    /// Highlights and the marker are being put back.
    Reverting,
}

/// Return value of [`Presentation::step()`], saying whether it wants to be stepped again.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[must_use]
pub enum Then {
    /// Call `step()` again on the next tick.
    Step,
    /// The presentation has finished and is [`Phase::Idle`].
    Done,
}

/// One run of a cast result: a marker travels from the cast origin to the farthest hit
/// (or a fallback distance), highlighting each hit as it is reached, then the result is
/// held and finally reverted.
///
/// A presentation does not own the scene; every operation which changes it takes the
/// [`Stage`] as a parameter.
#[derive(Clone, Debug)]
pub struct Presentation {
    phase: Phase,
    marker: Marker,
    start: FreePoint,
    direction: FreeVector,
    result: QueryResult,
    target_distance: FreeCoordinate,
    elapsed: FreeCoordinate,
    speed: f64,
    hold: Duration,
    hold_remaining: Duration,
    /// Parallel to `result.hits()`.
    triggered: Vec<bool>,
    ledger: HighlightLedger,
}

impl Presentation {
    /// Begins presenting `result`, in [`Phase::Traveling`] with nothing traveled yet.
    ///
    /// `direction` should be a unit vector. The travel speed and hold time are read from
    /// `settings` now; later changes to the settings do not affect this presentation.
    pub fn start(
        start: FreePoint,
        direction: FreeVector,
        marker: Marker,
        result: QueryResult,
        settings: &Settings,
    ) -> Self {
        let target_distance = result
            .farthest_distance()
            .unwrap_or_else(|| marker.fallback_distance());
        log::debug!(
            "presenting {count} hit(s) with {marker:?}, traveling {target_distance}",
            count = result.hits().len()
        );
        Self {
            phase: Phase::Traveling,
            marker,
            start,
            direction,
            triggered: vec![false; result.hits().len()],
            result,
            target_distance,
            elapsed: 0.0,
            speed: settings.display_speed(),
            hold: settings.hold_duration(),
            hold_remaining: settings.hold_duration(),
            ledger: HighlightLedger::new(),
        }
    }

    /// Advances the presentation by one tick.
    ///
    /// Paused ticks change nothing.
    pub fn step<S: Stage + ?Sized>(&mut self, tick: Tick, stage: &mut S) -> Then {
        if self.phase == Phase::Idle {
            return Then::Done;
        }
        if tick.paused() {
            return Then::Step;
        }

        match self.phase {
            Phase::Idle => {}
            Phase::Traveling => {
                self.elapsed =
                    (self.elapsed + self.speed * tick.delta_t_f64()).min(self.target_distance);
                self.place_marker(stage);
                self.trigger_reached(stage);
                if self.elapsed >= self.target_distance {
                    self.elapsed = self.target_distance;
                    self.place_marker(stage);
                    self.hold_remaining = self.hold;
                    self.set_phase(Phase::Holding);
                }
            }
            Phase::Holding => {
                self.hold_remaining = self.hold_remaining.saturating_sub(tick.delta_t_duration());
                if self.hold_remaining.is_zero() {
                    self.set_phase(Phase::Reverting);
                }
            }
            Phase::Reverting => {}
        }

        if self.phase == Phase::Reverting {
            self.revert(stage);
            Then::Done
        } else {
            Then::Step
        }
    }

    /// Stops the presentation before it finishes, dealing with what it has changed
    /// according to `policy`.
    ///
    /// [`CancelPolicy::Abandon`] leaves the scene exactly as it is.
    /// [`CancelPolicy::Revert`] restores highlighted targets and resets the marker, just as
    /// the end of the hold would have.
    pub fn cancel<S: Stage + ?Sized>(mut self, policy: CancelPolicy, stage: &mut S) {
        if self.phase == Phase::Idle {
            return;
        }
        log::debug!("cancelling {:?} presentation: {policy:?}", self.phase);
        match policy {
            CancelPolicy::Abandon => {}
            CancelPolicy::Revert => self.revert(stage),
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns what is being moved along the cast.
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Returns the result being presented.
    pub fn result(&self) -> &QueryResult {
        &self.result
    }

    /// Returns where the cast started.
    pub fn start_point(&self) -> FreePoint {
        self.start
    }

    /// Returns the direction of the cast.
    pub fn direction(&self) -> FreeVector {
        self.direction
    }

    /// Returns how far the marker will travel in total.
    pub fn target_distance(&self) -> FreeCoordinate {
        self.target_distance
    }

    /// Returns how far the marker has traveled so far.
    pub fn elapsed(&self) -> FreeCoordinate {
        self.elapsed
    }

    /// Returns where the marker stops.
    pub fn end_point(&self) -> FreePoint {
        self.start + self.direction * self.target_distance
    }

    /// Returns how much of the hold is left. Only meaningful in [`Phase::Holding`].
    pub fn hold_remaining(&self) -> Duration {
        self.hold_remaining
    }

    /// Returns the record of currently highlighted targets.
    pub fn highlights(&self) -> &HighlightLedger {
        &self.ledger
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("{:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }

    fn place_marker<S: Stage + ?Sized>(&self, stage: &mut S) {
        match self.marker {
            Marker::Line => {
                let tip = self.start + self.direction * self.elapsed;
                let line = stage.line_mut();
                line.set_position(0, self.start);
                line.set_position(1, tip);
                log::trace!(target: FRAME_LOG_TARGET, "line tip {tip:?}");
            }
            Marker::Proxy(id) => {
                let position = lerp_clamped(
                    self.start,
                    self.end_point(),
                    self.elapsed / self.target_distance,
                );
                if let Some(proxy) = stage.proxy_mut(id) {
                    proxy.position = position;
                }
                log::trace!(target: FRAME_LOG_TARGET, "{id:?} at {position:?}");
            }
        }
    }

    /// Highlights every hit the marker has reached that was not highlighted yet.
    fn trigger_reached<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        for (hit, triggered) in self.result.hits().iter().zip(&mut self.triggered) {
            if !*triggered && hit.distance() <= self.elapsed {
                *triggered = true;
                log::trace!(
                    "reached {target:?} at {distance}",
                    target = hit.target(),
                    distance = hit.distance()
                );
                self.ledger.highlight(hit.target(), stage);
            }
        }
    }

    fn revert<S: Stage + ?Sized>(&mut self, stage: &mut S) {
        self.ledger.restore_all(stage);
        match self.marker {
            Marker::Line => stage.line_mut().clear(),
            Marker::Proxy(id) => {
                if let Some(proxy) = stage.proxy_mut(id) {
                    proxy.position = self.start;
                }
            }
        }
        self.set_phase(Phase::Idle);
    }
}
