//! Headless starfield host.
//!
//! Drives a [`starfield_shared::world::World`] from a tokio timer instead of a
//! display, for soak runs and tests.

pub mod cli;
pub mod host;
