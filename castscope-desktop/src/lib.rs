//! Components for running [`castscope`] scenarios outside of any game engine: collision
//! queries answered by [`parry3d`], a built-in demo scene, and a headless session which
//! steps scenarios on a fixed schedule.
//!
//! This library exists mainly for the `castscope` binary in this package, and so that
//! its pieces can be tested without a process boundary.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

pub mod demo_scene;
pub mod logging;
pub mod physics_parry;
mod session;

pub use session::HeadlessSession;
