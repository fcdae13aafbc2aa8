use starfield_shared::input::Key;
use starfield_shared::world::World;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// Input delivered to the host loop between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Key { key: Key, pressed: bool },
    Resize { width: f64, height: f64 },
    Stop,
}

/// What a finished run looked like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostReport {
    pub ticks: u64,
    /// Frames in which no star was visible
    pub empty_frames: u64,
    pub paused_ticks: u64,
    pub last_visible: usize,
    pub last_drawn: usize,
}

/// Run the world at its configured frame rate until `max_ticks` frames have
/// been produced or a [`HostCommand::Stop`] arrives. Commands already queued
/// are applied before the next tick. Hands the world back with the report.
pub async fn run_host_loop(
    mut world: World,
    mut cmd_rx: mpsc::Receiver<HostCommand>,
    max_ticks: Option<u64>,
) -> (World, HostReport) {
    let mut report = HostReport::default();
    if max_ticks == Some(0) {
        return (world, report);
    }

    let frame_duration = world.settings().frame_duration();
    let log_every = world.settings().fps.round().max(1.0) as u64;

    let mut tick_interval = tokio::time::interval(frame_duration);
    tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            biased;

            Some(cmd) = cmd_rx.recv() => {
                match cmd {
                    HostCommand::Key { key, pressed } => {
                        let handled = world.on_key(key, pressed);
                        tracing::debug!(?key, pressed, handled, "key");
                    }
                    HostCommand::Resize { width, height } => {
                        world.resize(width, height);
                    }
                    HostCommand::Stop => break,
                }
            }

            _ = tick_interval.tick() => {
                let now = Instant::now();
                let frame = world.tick(now - last_tick);
                last_tick = now;

                report.ticks += 1;
                report.last_visible = frame.visible_count;
                report.last_drawn = frame.commands.len();
                if world.is_paused() {
                    report.paused_ticks += 1;
                }
                if let Some(status) = frame.status {
                    report.empty_frames += 1;
                    if report.empty_frames == 1 {
                        tracing::warn!("{}", status.message());
                    }
                }

                if report.ticks % log_every == 0 {
                    tracing::info!(
                        tick = report.ticks,
                        visible = frame.visible_count,
                        drawn = frame.commands.len(),
                        paused = world.is_paused(),
                        depth_velocity = world.depth_velocity(),
                        "frame"
                    );
                }

                if max_ticks.is_some_and(|max| report.ticks >= max) {
                    break;
                }
            }
        }
    }

    tracing::info!(ticks = report.ticks, "host loop ended");
    (world, report)
}
