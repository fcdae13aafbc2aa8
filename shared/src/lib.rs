//! Starfield simulation shared by the headless host and the Bevy client.
//!
//! Nothing in here knows about windows or GPUs: the [`world::World`] is
//! driven by explicit `tick` / `on_key` / `resize` calls and hands back a
//! [`frame::Frame`] of pixel-space draw commands for the host to present.

pub mod config;
pub mod entity;
pub mod factory;
pub mod frame;
pub mod input;
pub mod projection;
pub mod vec3;
pub mod world;
