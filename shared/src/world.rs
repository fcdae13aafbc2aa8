use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{Settings, SettingsError};
use crate::entity::{DepthBounds, MotionContext, PointEntity};
use crate::factory;
use crate::frame::{Frame, FrameStatus};
use crate::input::{DepthControl, Key};
use crate::projection::{Projection, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Owns the settings, the stars and the run state, and advances them one
/// tick at a time. Hosts call [`World::on_key`] and [`World::resize`]
/// between ticks, never during one.
pub struct World {
    settings: Settings,
    pause_key: Key,
    entities: Vec<PointEntity>,
    state: RunState,
    control: DepthControl,
    viewport: Viewport,
    rng: ChaCha8Rng,
    frame_count: u64,
}

impl World {
    /// Validate `settings` and spawn the configured star grid. Seeded from
    /// `settings.seed` when present.
    pub fn initialize(settings: Settings, viewport: Viewport) -> Result<Self, SettingsError> {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(settings, viewport, rng)
    }

    pub fn with_rng(
        settings: Settings,
        viewport: Viewport,
        rng: ChaCha8Rng,
    ) -> Result<Self, SettingsError> {
        let mut world = Self::empty(settings, viewport, rng)?;
        let count = world.settings.star_count();
        world.add_stars(count);
        tracing::info!(
            name = %world.settings.name,
            stars = world.entities.len(),
            "world \"{}\" initialized",
            world.settings.name
        );
        if world.settings.debug {
            tracing::debug!(settings = ?world.settings, "world settings");
        }
        Ok(world)
    }

    /// A world with validated settings and no entities yet.
    pub fn empty(
        settings: Settings,
        viewport: Viewport,
        rng: ChaCha8Rng,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            pause_key: settings.pause_key(),
            control: DepthControl::new(settings.initial_depth_velocity),
            settings,
            entities: Vec::new(),
            state: RunState::Running,
            viewport,
            rng,
            frame_count: 0,
        })
    }

    pub fn add_stars(&mut self, count: u32) -> usize {
        factory::add_stars(&mut self.entities, &self.settings, count, &mut self.rng)
    }

    pub fn spawn(&mut self, entity: PointEntity) {
        self.entities.push(entity);
    }

    /// Run one frame: update (unless paused), then render every visible
    /// entity in insertion order.
    pub fn tick(&mut self, dt: Duration) -> Frame {
        if self.settings.debug {
            tracing::debug!(
                frame = self.frame_count,
                delta_ms = dt.as_secs_f64() * 1000.0,
                "tick"
            );
        }

        if self.state == RunState::Running {
            let ctx = self.motion_context();
            for entity in &mut self.entities {
                entity.update(&ctx);
            }
        }

        let projection = self.projection();
        let mut frame = Frame::default();
        for entity in &mut self.entities {
            if !entity.visible {
                continue;
            }
            frame.visible_count += 1;
            if let Some(command) = entity.render(&projection, &mut self.rng) {
                frame.commands.push(command);
            }
        }

        if frame.visible_count == 0 {
            frame.status = Some(FrameStatus::NoneVisible);
        }
        self.frame_count += 1;
        frame
    }

    /// Feed a key press or release. The pause key toggles the run state;
    /// anything else only reaches the motion controls while running.
    /// Returns whether the key was handled.
    pub fn on_key(&mut self, key: Key, pressed: bool) -> bool {
        if key == self.pause_key {
            if pressed {
                self.toggle_pause();
            }
            return true;
        }
        if self.state == RunState::Paused {
            return false;
        }
        if pressed {
            self.control.key_pressed(key)
        } else {
            self.control.key_released(key)
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        tracing::info!(state = ?self.state, "pause toggled");
    }

    /// Re-fit output to a new surface size before the next frame.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let changed = self.viewport.resize(width, height);
        if changed {
            tracing::debug!(width, height, "viewport resized");
        }
        changed
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.control.angle(), self.viewport)
    }

    fn motion_context(&self) -> MotionContext {
        MotionContext {
            bounds: DepthBounds::new(self.settings.min_z, self.settings.max_z),
            depth_velocity: Some(self.control.depth_velocity()),
            wrap_depth: self.settings.wrap_depth,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entities(&self) -> &[PointEntity] {
        &self.entities
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn depth_velocity(&self) -> f64 {
        self.control.depth_velocity()
    }

    pub fn angle(&self) -> f64 {
        self.control.angle()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
