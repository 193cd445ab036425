//! Command line option parsing.

use std::num::NonZeroUsize;

use clap::Parser;

use castscope::settings::{CancelPolicy, Settings};
use castscope::time::TickSchedule;
use castscope_desktop::logging::LoggingArgs;

#[derive(Clone, Debug, Parser)]
#[command(
    name = crate::TITLE, author, about, version,
    help_template = "\
{name} {version}
{about-with-newline}
{usage-heading}
    {usage}

{all-args}{after-help}",
)]
pub(crate) struct CastscopeArgs {
    /// List the demo scenarios and exit.
    #[arg(long)]
    pub(crate) list: bool,

    /// Scenario to run, counting from 1. May be repeated to run several in order.
    ///
    /// If not specified, every scenario is run once.
    #[arg(long = "scenario", short = 's', value_name = "N")]
    pub(crate) scenarios: Vec<NonZeroUsize>,

    /// Simulated frames per second.
    #[arg(
        long = "fps",
        value_name = "RATE",
        default_value_t = 60,
        value_parser = clap::value_parser!(u16).range(1..),
    )]
    pub(crate) fps: u16,

    /// Speed of the marker travelling along a cast, in distance units per second.
    ///
    /// Clamped to 1 through 10.
    #[arg(long = "speed", value_name = "UNITS")]
    pub(crate) speed: Option<f64>,

    /// How long a result stays on screen before it is put back, in seconds.
    ///
    /// Clamped to 0 through 6.
    #[arg(long = "duration", value_name = "SECONDS")]
    pub(crate) duration: Option<f64>,

    /// How long to wait for the camera after selecting a different scenario, in seconds.
    ///
    /// Clamped to 0.25 through 2.
    #[arg(long = "start-delay", value_name = "SECONDS")]
    pub(crate) start_delay: Option<f64>,

    /// When a run is interrupted, put back everything it highlighted.
    ///
    /// Otherwise, interrupted runs leave the scene as it was at the moment of interruption.
    #[arg(long = "revert-on-cancel")]
    pub(crate) revert_on_cancel: bool,

    /// Select the next scenario after this many seconds even if the current one has not
    /// finished, interrupting it.
    #[arg(long = "switch-after", value_name = "SECONDS")]
    pub(crate) switch_after: Option<f64>,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

impl CastscopeArgs {
    /// Builds [`Settings`] from the defaults and whichever options were given.
    pub(crate) fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(speed) = self.speed {
            settings.set_display_speed(speed);
        }
        if let Some(duration) = self.duration {
            settings.set_display_duration(duration);
        }
        if let Some(delay) = self.start_delay {
            settings.set_start_delay(delay);
        }
        if self.revert_on_cancel {
            settings.set_cancel_policy(CancelPolicy::Revert);
        }
        settings
    }

    pub(crate) fn schedule(&self) -> TickSchedule {
        TickSchedule::per_second(self.fps)
    }

    /// Zero-based indices of the scenarios to run, given how many there are.
    ///
    /// Returns an error naming the first index that is out of range.
    pub(crate) fn scenario_indices(&self, count: usize) -> Result<Vec<usize>, anyhow::Error> {
        if self.scenarios.is_empty() {
            return Ok((0..count).collect());
        }
        self.scenarios
            .iter()
            .map(|n| {
                let index = n.get() - 1;
                if index < count {
                    Ok(index)
                } else {
                    Err(anyhow::anyhow!(
                        "there is no scenario {n}; use --list to see the {count} scenarios"
                    ))
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> clap::error::Result<CastscopeArgs> {
        CastscopeArgs::try_parse_from(std::iter::once("castscope").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.settings(), Settings::default());
        assert_eq!(args.schedule(), TickSchedule::per_second(60));
        assert_eq!(args.scenario_indices(8).unwrap(), (0..8).collect::<Vec<_>>());
        assert!(!args.list);
        assert_eq!(args.switch_after, None);
    }

    #[test]
    fn settings_options() {
        let settings = parse(&[
            "--speed",
            "20",
            "--duration",
            "1.5",
            "--start-delay",
            "0.5",
            "--revert-on-cancel",
        ])
        .unwrap()
        .settings();
        assert_eq!(settings.display_speed(), 10.0);
        assert_eq!(settings.display_duration(), 1.5);
        assert_eq!(settings.start_delay(), 0.5);
        assert_eq!(settings.cancel_policy(), CancelPolicy::Revert);
    }

    #[test]
    fn scenarios_are_one_based_and_repeatable() {
        let args = parse(&["--scenario", "3", "-s", "1", "-s", "3"]).unwrap();
        assert_eq!(args.scenario_indices(8).unwrap(), vec![2, 0, 2]);
        assert!(args.scenario_indices(2).is_err());
    }

    #[test]
    fn scenario_zero_is_rejected() {
        assert_eq!(
            parse(&["--scenario", "0"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn fps_must_be_positive() {
        assert_eq!(
            parse(&["--fps", "0"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--fps", "30"]).unwrap().schedule(),
            TickSchedule::per_second(30)
        );
    }

    #[test]
    fn invalid_number() {
        assert_eq!(
            parse(&["--speed", "fast"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }
}
