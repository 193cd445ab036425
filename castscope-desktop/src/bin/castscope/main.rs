//! Binary which runs castscope scenarios against the built-in demo scene, without a window,
//! and logs what each presentation does.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser as _;

use castscope_desktop::demo_scene::DemoScene;
use castscope_desktop::{HeadlessSession, logging};

mod command_options;
use command_options::CastscopeArgs;

static TITLE: &str = "castscope";

/// Simulated time after which a single run is considered stuck.
const RUN_TIME_LIMIT: Duration = Duration::from_secs(600);

fn main() -> Result<(), anyhow::Error> {
    let options = CastscopeArgs::parse();
    logging::install(&options.logging)?;

    let scene = DemoScene::new();

    if options.list {
        for (index, scenario) in scene.scenarios.iter().enumerate() {
            println!(
                "{n:>2}. {kind}{proxy}",
                n = index + 1,
                kind = scenario.kind(),
                proxy = match scenario.proxy {
                    Some(id) => format!(" (proxy {id:?})"),
                    None => String::new(),
                },
            );
        }
        return Ok(());
    }

    let indices = options.scenario_indices(scene.scenarios.len())?;
    let settings = options.settings();
    let schedule = options.schedule();
    let switch_after_ticks = options
        .switch_after
        .map(|seconds| {
            Duration::try_from_secs_f64(seconds)
                .map(|duration| schedule.ticks_in(duration))
                .context("invalid --switch-after duration")
        })
        .transpose()?;
    let max_ticks = schedule.ticks_in(RUN_TIME_LIMIT);
    log::debug!("{settings:?}, {schedule:?}");

    let mut session =
        HeadlessSession::new(scene, settings, schedule).context("failed to create session")?;

    let start_time = Instant::now();
    for (position, &index) in indices.iter().enumerate() {
        session
            .select(index)
            .with_context(|| format!("failed to start scenario {}", index + 1))?;

        let is_last = position + 1 == indices.len();
        match switch_after_ticks {
            Some(limit) if !is_last => {
                for _ in 0..limit {
                    if !session.selector().is_running() {
                        break;
                    }
                    session
                        .step()
                        .with_context(|| format!("failed to run scenario {}", index + 1))?;
                }
            }
            _ => {
                session.run_to_completion(max_ticks)?;
            }
        }
    }

    log::info!(
        "finished {runs} run(s): {ticks} ticks ({simulated:.3} s simulated, {real:.3} s real)",
        runs = indices.len(),
        ticks = session.ticks(),
        simulated = schedule.delta_t().as_secs_f64() * session.ticks() as f64,
        real = start_time.elapsed().as_secs_f64(),
    );
    Ok(())
}
