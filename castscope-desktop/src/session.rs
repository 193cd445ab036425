use anyhow::Context as _;

use castscope::present::Phase;
use castscope::select::{Collaborators, RunHandle, ScenarioSelector, SelectError};
use castscope::settings::Settings;
use castscope::stage::{FollowCamera, SceneObjects};
use castscope::time::TickSchedule;

use crate::demo_scene::DemoScene;
use crate::physics_parry::ParryWorld;

/// Runs scenarios of a [`DemoScene`] with no window, advancing on a fixed
/// [`TickSchedule`] rather than real time.
#[derive(Debug)]
pub struct HeadlessSession {
    physics: ParryWorld,
    stage: SceneObjects,
    camera: FollowCamera,
    selector: ScenarioSelector,
    schedule: TickSchedule,
    ticks: u64,
    status: &'static str,
}

impl HeadlessSession {
    /// Takes ownership of `scene` and points the camera at its first scenario.
    pub fn new(
        scene: DemoScene,
        settings: Settings,
        schedule: TickSchedule,
    ) -> Result<Self, SelectError> {
        let DemoScene {
            scenarios,
            physics,
            stage,
        } = scene;
        let mut camera = FollowCamera::default();
        let selector = ScenarioSelector::new(scenarios, settings, &mut camera)?;
        Ok(Self {
            physics,
            stage,
            camera,
            selector,
            schedule,
            ticks: 0,
            status: "idle",
        })
    }

    /// Starts scenario `index`, cancelling whatever was running.
    pub fn select(&mut self, index: usize) -> Result<RunHandle, SelectError> {
        let Self {
            physics,
            stage,
            camera,
            selector,
            ..
        } = self;
        let handle = selector.select(
            index,
            Collaborators {
                physics: &*physics,
                stage,
                camera,
            },
        )?;
        self.note_status();
        Ok(handle)
    }

    /// Cancels the active run, if any.
    pub fn cancel(&mut self) {
        self.selector.cancel(&mut self.stage);
        self.note_status();
    }

    /// Advances by one tick of the schedule.
    pub fn step(&mut self) -> Result<(), SelectError> {
        let Self {
            physics,
            stage,
            camera,
            selector,
            schedule,
            ..
        } = self;
        selector.step(
            schedule.tick(),
            Collaborators {
                physics: &*physics,
                stage,
                camera,
            },
        )?;
        self.ticks += 1;
        self.note_status();
        Ok(())
    }

    /// Steps until nothing is running, giving up after `max_ticks` ticks.
    ///
    /// Returns the number of ticks taken.
    pub fn run_to_completion(&mut self, max_ticks: u64) -> Result<u64, anyhow::Error> {
        let start = self.ticks;
        while self.selector.is_running() {
            let taken = self.ticks - start;
            if taken >= max_ticks {
                anyhow::bail!(
                    "scenario {index} did not finish within {max_ticks} ticks",
                    index = self.selector.current_index()
                );
            }
            self.step().context("failed to step scenario")?;
        }
        Ok(self.ticks - start)
    }

    /// Returns the total number of ticks stepped so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns the tick schedule.
    pub fn schedule(&self) -> TickSchedule {
        self.schedule
    }

    /// Returns the scenario selector, which knows the scenarios, settings, and active run.
    pub fn selector(&self) -> &ScenarioSelector {
        &self.selector
    }

    /// Returns the scene's visible state.
    pub fn stage(&self) -> &SceneObjects {
        &self.stage
    }

    /// Returns what the camera was last told to do.
    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Returns the physics world the casts run against.
    pub fn physics(&self) -> &ParryWorld {
        &self.physics
    }

    /// Logs transitions between run states.
    fn note_status(&mut self) {
        let status: &'static str = if self.selector.pending_delay().is_some() {
            "waiting for camera"
        } else if let Some(presentation) = self.selector.presentation() {
            presentation.phase().into()
        } else {
            <&'static str>::from(Phase::Idle)
        };
        if status == self.status {
            return;
        }
        self.status = status;

        let index = self.selector.current_index();
        log::info!("scenario {}: {status}", index + 1);
        if let Some(presentation) = self.selector.presentation()
            && presentation.phase() == Phase::Traveling
        {
            let hits = presentation.result().hits();
            log::debug!(
                "{kind} found {count} hit(s) over {distance:.3}",
                kind = self.selector.scenarios()[index].kind(),
                count = hits.len(),
                distance = presentation.target_distance(),
            );
            for hit in hits {
                log::debug!(
                    "  {target:?} at {distance:.3}",
                    target = hit.target(),
                    distance = hit.distance()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_scene::target_id;
    use castscope::math::Rgba;
    use castscope::settings::HIGHLIGHT_COLOR;
    use pretty_assertions::assert_eq;

    fn session() -> HeadlessSession {
        HeadlessSession::new(
            DemoScene::new(),
            Settings::default()
                .with_display_speed(10.0)
                .with_display_duration(0.5),
            TickSchedule::per_second(60),
        )
        .unwrap()
    }

    fn phase(session: &HeadlessSession) -> Option<Phase> {
        session.selector().presentation().map(|p| p.phase())
    }

    #[test]
    fn highlights_then_restores() {
        let mut session = session();
        let cube = target_id(0, 0);
        let original = session.stage().color_of(cube).unwrap();
        assert_ne!(original, HIGHLIGHT_COLOR);

        session.select(0).unwrap();
        assert_eq!(phase(&session), Some(Phase::Traveling));
        let mut guard = 0;
        while phase(&session) != Some(Phase::Holding) {
            session.step().unwrap();
            guard += 1;
            assert!(guard < 1000, "never reached Holding");
        }
        assert_eq!(session.stage().color_of(cube), Some(HIGHLIGHT_COLOR));

        session.run_to_completion(1000).unwrap();
        assert_eq!(phase(&session), None);
        assert_eq!(session.stage().color_of(cube), Some(original));
    }

    #[test]
    fn other_scenarios_wait_for_camera() {
        let mut session = session();
        session.select(3).unwrap();
        assert!(session.selector().pending_delay().is_some());
        assert_eq!(
            session.camera().follow,
            Some(session.selector().scenarios()[3].camera_target)
        );
        let delay = session.selector().settings().start_delay_duration();
        for _ in 0..session.schedule().ticks_in(delay) {
            session.step().unwrap();
        }
        assert_eq!(session.selector().pending_delay(), None);
        assert_eq!(phase(&session), Some(Phase::Traveling));
    }

    #[test]
    fn every_scenario_completes() {
        let mut session = session();
        for index in 0..session.selector().scenarios().len() {
            session.select(index).unwrap();
            session.run_to_completion(10_000).unwrap();
        }
        // The slab's mesh is shared, so its vertex colors survive only if each run
        // restored what it saved.
        let slab_colors = session
            .stage()
            .vertex_colors_of(target_id(0, 3))
            .unwrap()
            .to_vec();
        assert_eq!(slab_colors, vec![Rgba::new(0.5, 0.5, 0.5, 1.0); 8]);
    }

    #[test]
    fn run_to_completion_gives_up() {
        let mut session = session();
        session.select(0).unwrap();
        assert!(session.run_to_completion(2).is_err());
    }
}
