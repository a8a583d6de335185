//! Polling cycle: fetch each creator's newest post, compare it with the
//! seen-state, notify on change, persist.
//!
//! [`CycleRunner`] is generic over the three collaborators in [`ports`] so
//! tests can swap in fakes; [`build_runner`] wires the production ones.

pub mod cycle;
pub mod detect;
pub mod error;
pub mod messages;
pub mod ports;
pub mod setup;
pub mod stats;

mod pacer;

pub use cycle::{CycleConfig, CycleRunner, PersistPolicy, RunMode};
pub use detect::{detect, Transition};
pub use error::TrackerError;
pub use ports::{Notify, PostSource, StateStore};
pub use setup::{build_runner, DefaultRunner};
pub use stats::RunStats;
