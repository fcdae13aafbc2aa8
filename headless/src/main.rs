use starfield_headless::cli::{Args, DEFAULT_CONFIG_PATH, USAGE};
use starfield_headless::host::{run_host_loop, HostCommand};
use starfield_shared::config::Settings;
use starfield_shared::input::Key;
use starfield_shared::projection::Viewport;
use starfield_shared::world::World;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    let default_config =
        std::env::var("STARFIELD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let Args {
        config_path,
        max_ticks,
        width,
        height,
    } = match Args::parse(std::env::args().skip(1), default_config) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let settings = match Settings::load(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid starfield configuration: {}", e);
            std::process::exit(1);
        }
    };

    let level = if settings.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let world = match World::initialize(settings, Viewport::new(width, height)) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Invalid starfield configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "{}: {}",
        world.settings().name,
        world.settings().description
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>(64);

    // One key per stdin line; each line is a press followed by a release.
    let stdin_tx = cmd_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim_end_matches(['\r', '\n']);
            if line == "quit" {
                let _ = stdin_tx.send(HostCommand::Stop).await;
                break;
            }
            let Some(key) = Key::parse(line) else {
                tracing::warn!("unknown key {:?}", line);
                continue;
            };
            for pressed in [true, false] {
                if stdin_tx.send(HostCommand::Key { key, pressed }).await.is_err() {
                    return;
                }
            }
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cmd_tx.send(HostCommand::Stop).await;
        }
    });

    let (_world, report) = run_host_loop(world, cmd_rx, max_ticks).await;
    println!(
        "ticks: {}, empty frames: {}, paused ticks: {}, last visible: {}",
        report.ticks, report.empty_frames, report.paused_ticks, report.last_visible
    );
}
