//! Castscope presents the result of a physics-query cast as a short animation:
//! a marker travels along the cast, every object it reaches is highlighted,
//! the result is held on screen for a while, and then everything is put back.
//!
//! The pieces, from the leaves up:
//!
//! * [`query`] describes the outcome of a cast ([`QueryResult`](query::QueryResult)).
//! * [`scenario`] describes an authored cast to perform.
//! * [`physics`] is the seam to whatever collision engine answers the casts.
//! * [`stage`] is the seam to the visible scene: a line display, proxy objects,
//!   and optional per-object color capabilities.
//! * [`dispatch`] turns a scenario into exactly one cast and a new presentation.
//! * [`present`] is the per-tick state machine which animates one result.
//! * [`select`] owns the scenario list and the single active run.
//! * [`menu`] lays out the scenario picker buttons.
//!
//! None of these ever block or sleep; everything advances when the host calls
//! `step()` once per frame with a [`Tick`](time::Tick).

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(test),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[cfg(test)]
#[macro_use]
extern crate std;
#[macro_use]
extern crate alloc;

pub mod dispatch;
pub mod highlight;
pub mod math;
pub mod menu;
pub mod physics;
pub mod present;
pub mod query;
pub mod scenario;
pub mod select;
pub mod settings;
pub mod stage;
pub mod time;
pub mod util;

#[doc(hidden)] // public for use by tests in other packages
pub mod testing;

// reexport for convenience of our dependents and tests
#[doc(hidden)]
pub use euclid;
