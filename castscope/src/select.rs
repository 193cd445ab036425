//! Choosing which scenario to present, and owning the single active run.

use alloc::vec::Vec;
use core::fmt;

use crate::dispatch::{DispatchError, dispatch};
use crate::physics::PhysicsQueries;
use crate::present::{Presentation, Then};
use crate::scenario::Scenario;
use crate::settings::Settings;
use crate::stage::{CameraRig, Stage};
use crate::time::{Duration, Tick};

/// The external objects a [`ScenarioSelector`] acts on, borrowed for one operation.
pub struct Collaborators<'a> {
    /// Answers casts.
    pub physics: &'a dyn PhysicsQueries,
    /// Shows presentations.
    pub stage: &'a mut dyn Stage,
    /// Is pointed at newly selected scenarios.
    pub camera: &'a mut dyn CameraRig,
}

impl fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Identifies one call to [`ScenarioSelector::select()`], so that the caller can tell
/// whether the run it started is still the active one.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RunHandle(u64);

/// Error from [`ScenarioSelector`] operations.
#[derive(Clone, Debug, Eq, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum SelectError {
    /// there are no scenarios to select from
    NoScenarios,
    /// scenario index {index} is out of range; there are {count} scenarios
    NoSuchScenario {
        /// The requested index.
        index: usize,
        /// Number of scenarios.
        count: usize,
    },
    /// failed to start the selected scenario
    Dispatch(DispatchError),
}

impl core::error::Error for SelectError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SelectError::NoScenarios | SelectError::NoSuchScenario { .. } => None,
            SelectError::Dispatch(e) => Some(e),
        }
    }
}

impl From<DispatchError> for SelectError {
    fn from(value: DispatchError) -> Self {
        SelectError::Dispatch(value)
    }
}

/// The active run, if there is one.
#[derive(Debug)]
enum Run {
    /// Waiting for the camera to move to a newly selected scenario.
    Delayed { remaining: Duration },
    Presenting(Presentation),
}

/// Holds the ordered list of scenarios and runs at most one of them at a time.
///
/// Selecting a scenario cancels whatever run was in progress. Selecting a *different*
/// scenario than last time first points the camera at it and waits for
/// [`Settings::start_delay()`]; selecting the same one again casts immediately.
#[derive(Debug)]
pub struct ScenarioSelector {
    scenarios: Vec<Scenario>,
    current: usize,
    settings: Settings,
    generation: u64,
    run: Option<Run>,
}

impl ScenarioSelector {
    /// Constructs a selector with scenario 0 current and nothing running.
    ///
    /// The camera is pointed at scenario 0.
    pub fn new(
        scenarios: Vec<Scenario>,
        settings: Settings,
        camera: &mut dyn CameraRig,
    ) -> Result<Self, SelectError> {
        let first = scenarios.first().ok_or(SelectError::NoScenarios)?;
        camera.set_follow(first.camera_target);
        camera.set_look_at(first.camera_target);
        Ok(Self {
            scenarios,
            current: 0,
            settings,
            generation: 0,
            run: None,
        })
    }

    /// Cancels any active run and starts scenario `index`.
    ///
    /// If `index` is the current scenario, its cast is dispatched now. Otherwise, the
    /// camera is reassigned, and the cast is dispatched by [`Self::step()`] once the
    /// start delay has passed.
    pub fn select(
        &mut self,
        index: usize,
        env: Collaborators<'_>,
    ) -> Result<RunHandle, SelectError> {
        let count = self.scenarios.len();
        let scenario = self
            .scenarios
            .get(index)
            .ok_or(SelectError::NoSuchScenario { index, count })?;

        if let Some(Run::Presenting(previous)) = self.run.take() {
            previous.cancel(self.settings.cancel_policy(), env.stage);
        }
        self.generation += 1;
        let handle = RunHandle(self.generation);

        if index != self.current {
            log::debug!(
                "selected scenario {index} ({kind}); waiting {delay:?} for the camera",
                kind = scenario.kind(),
                delay = self.settings.start_delay_duration(),
            );
            self.current = index;
            env.camera.set_follow(scenario.camera_target);
            env.camera.set_look_at(scenario.camera_target);
            self.run = Some(Run::Delayed {
                remaining: self.settings.start_delay_duration(),
            });
        } else {
            log::debug!("selected scenario {index} ({}) again", scenario.kind());
            let presentation = dispatch(scenario, env.physics, env.stage, &self.settings)?;
            self.run = Some(Run::Presenting(presentation));
        }
        Ok(handle)
    }

    /// Advances the active run, if any, by one tick.
    ///
    /// An error means the pending scenario could not be dispatched; the run is dropped.
    pub fn step(&mut self, tick: Tick, env: Collaborators<'_>) -> Result<(), SelectError> {
        match &mut self.run {
            None => {}
            Some(Run::Delayed { remaining }) => {
                if !tick.paused() {
                    *remaining = remaining.saturating_sub(tick.delta_t_duration());
                    if remaining.is_zero() {
                        self.run = None;
                        let scenario = &self.scenarios[self.current];
                        let presentation =
                            dispatch(scenario, env.physics, env.stage, &self.settings)?;
                        self.run = Some(Run::Presenting(presentation));
                    }
                }
            }
            Some(Run::Presenting(presentation)) => {
                if presentation.step(tick, env.stage) == Then::Done {
                    self.run = None;
                }
            }
        }
        Ok(())
    }

    /// Cancels the active run, if any, according to the configured [`CancelPolicy`].
    ///
    /// [`CancelPolicy`]: crate::settings::CancelPolicy
    pub fn cancel(&mut self, stage: &mut dyn Stage) {
        if let Some(Run::Presenting(previous)) = self.run.take() {
            previous.cancel(self.settings.cancel_policy(), stage);
        }
        self.generation += 1;
    }

    /// Returns whether `handle` refers to the run which is still in progress.
    pub fn is_current(&self, handle: RunHandle) -> bool {
        handle.0 == self.generation && self.run.is_some()
    }

    /// Returns whether any run is in progress (including waiting out the start delay).
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Returns the active presentation, if the run has got that far.
    pub fn presentation(&self) -> Option<&Presentation> {
        match &self.run {
            Some(Run::Presenting(p)) => Some(p),
            _ => None,
        }
    }

    /// Returns how much of the start delay is left, if the run is waiting for it.
    pub fn pending_delay(&self) -> Option<Duration> {
        match self.run {
            Some(Run::Delayed { remaining }) => Some(remaining),
            _ => None,
        }
    }

    /// Returns the index of the current scenario.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns all scenarios, in order.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings. A presentation already in progress is not affected.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rgba;
    use crate::query::TargetId;
    use crate::scenario::{CameraTargetId, CastMode, CastShape};
    use crate::settings::CancelPolicy;
    use crate::stage::SceneObjects;
    use crate::testing::{ScriptedPhysics, hit, scenario, test_scene};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Records every camera assignment.
    #[derive(Debug, Default)]
    struct CountingCamera(Vec<CameraTargetId>);

    impl CameraRig for CountingCamera {
        fn set_follow(&mut self, target: CameraTargetId) {
            self.0.push(target);
        }
        fn set_look_at(&mut self, _: CameraTargetId) {}
    }

    struct Harness {
        physics: ScriptedPhysics,
        scene: SceneObjects,
        camera: CountingCamera,
        selector: ScenarioSelector,
    }

    impl Harness {
        fn new(settings: Settings) -> Self {
            let mut camera = CountingCamera::default();
            let mut second = scenario(CastShape::Ray, CastMode::Nearest);
            second.camera_target = CameraTargetId(1);
            let selector = ScenarioSelector::new(
                vec![scenario(CastShape::Ray, CastMode::Nearest), second],
                settings,
                &mut camera,
            )
            .unwrap();
            Self {
                physics: ScriptedPhysics::new().with_nearest(hit(1.0, 1)),
                scene: test_scene(&[1]),
                camera,
                selector,
            }
        }

        fn select(&mut self, index: usize) -> Result<RunHandle, SelectError> {
            self.selector.select(
                index,
                Collaborators {
                    physics: &self.physics,
                    stage: &mut self.scene,
                    camera: &mut self.camera,
                },
            )
        }

        fn step(&mut self) {
            self.selector
                .step(
                    Tick::from_seconds(0.25),
                    Collaborators {
                        physics: &self.physics,
                        stage: &mut self.scene,
                        camera: &mut self.camera,
                    },
                )
                .unwrap();
        }

        fn is_green(&self) -> bool {
            self.scene.color_of(TargetId(1)) == Some(Rgba::GREEN)
        }
    }

    #[test]
    fn new_points_camera_at_first() {
        let h = Harness::new(Settings::default());
        assert_eq!(h.camera.0, vec![CameraTargetId(0)]);
        assert_eq!(h.selector.current_index(), 0);
        assert!(!h.selector.is_running());
    }

    #[test]
    fn no_scenarios() {
        assert_eq!(
            ScenarioSelector::new(
                Vec::new(),
                Settings::default(),
                &mut CountingCamera::default()
            )
            .unwrap_err(),
            SelectError::NoScenarios
        );
    }

    #[test]
    fn out_of_range() {
        let mut h = Harness::new(Settings::default());
        assert_eq!(
            h.select(2).unwrap_err(),
            SelectError::NoSuchScenario { index: 2, count: 2 }
        );
        assert!(h.physics.calls().is_empty());
    }

    #[test]
    fn same_index_dispatches_immediately() {
        let mut h = Harness::new(Settings::default());
        let handle = h.select(0).unwrap();
        assert_eq!(h.physics.calls().len(), 1);
        assert_eq!(h.camera.0.len(), 1, "camera not reassigned");
        assert!(h.selector.is_current(handle));
        assert!(h.selector.presentation().is_some());
    }

    #[test]
    fn changed_index_reassigns_camera_and_waits() {
        let mut h = Harness::new(Settings::default().with_start_delay(1.0));
        let handle = h.select(1).unwrap();
        assert_eq!(h.camera.0, vec![CameraTargetId(0), CameraTargetId(1)]);
        assert_eq!(h.selector.pending_delay(), Some(Duration::from_secs(1)));
        assert!(h.selector.is_current(handle));

        for _ in 0..3 {
            h.step();
            assert!(h.physics.calls().is_empty());
        }
        h.step();
        assert_eq!(h.physics.calls().len(), 1);
        assert_eq!(h.selector.pending_delay(), None);
        assert!(h.selector.presentation().is_some());
        assert_eq!(h.selector.current_index(), 1);
    }

    #[test]
    fn run_completes() {
        let mut h = Harness::new(Settings::default().with_display_duration(0.0));
        let handle = h.select(0).unwrap();
        // 1.0 at 0.5 per tick, then one tick of zero hold
        h.step();
        h.step();
        assert!(h.is_green());
        h.step();
        assert!(!h.is_green());
        assert!(!h.selector.is_running());
        assert!(!h.selector.is_current(handle));
    }

    #[rstest]
    fn reselect_cancels(#[values(CancelPolicy::Abandon, CancelPolicy::Revert)] policy: CancelPolicy) {
        let mut h = Harness::new(Settings::default().with_cancel_policy(policy));
        let first = h.select(0).unwrap();
        h.step();
        h.step();
        assert!(h.is_green());

        let second = h.select(0).unwrap();
        assert!(!h.selector.is_current(first));
        assert!(h.selector.is_current(second));
        assert_eq!(h.physics.calls().len(), 2);
        assert_eq!(h.is_green(), policy == CancelPolicy::Abandon);
    }

    #[test]
    fn cancel_without_selecting() {
        let mut h = Harness::new(Settings::default());
        let handle = h.select(0).unwrap();
        h.selector.cancel(&mut h.scene);
        assert!(!h.selector.is_running());
        assert!(!h.selector.is_current(handle));
    }

    #[test]
    fn dispatch_error_is_reported() {
        let mut camera = CountingCamera::default();
        let mut selector = ScenarioSelector::new(
            vec![Scenario::new(
                CastShape::default_sphere(),
                CastMode::Nearest,
                crate::math::Pose::default(),
                CameraTargetId(0),
            )],
            Settings::default(),
            &mut camera,
        )
        .unwrap();
        let physics = ScriptedPhysics::new();
        let mut scene = test_scene(&[]);
        let error = selector
            .select(
                0,
                Collaborators {
                    physics: &physics,
                    stage: &mut scene,
                    camera: &mut camera,
                },
            )
            .unwrap_err();
        assert!(matches!(error, SelectError::Dispatch(_)));
        assert!(core::error::Error::source(&error).is_some());
        assert!(!selector.is_running());
    }
}
