//! Replays a portfolio page's scroll session against the sequencer
//!
//! Runs a deterministic frame loop: the scroll script says where the
//! scrollbar is at each moment, the sequencer turns that into channel
//! values, and selected channels are logged.

mod config;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use scrollkit_animation::ScrollState;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;

#[derive(Parser)]
#[command(
    name = "scrollkit-demo",
    about = "Replay a scripted scroll session against the scrollkit sequencer"
)]
struct Args {
    /// Path to a TOML scroll script; defaults to the built-in session
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override frames per second
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    let fps = args.fps.unwrap_or(config.playback.fps).max(1);
    let log_every = config.playback.log_every.max(1);
    let frame_ms = 1000.0 / fps as f64;

    let scene::Scene {
        mut sequencer,
        watched,
    } = scene::build(config.viewport.height)?;

    tracing::info!(
        fps,
        duration_ms = config.duration_ms(),
        triggers = sequencer.trigger_count(),
        loops = sequencer.repeating_count(),
        "starting playback"
    );

    let mut now_ms = 0.0;
    let mut frame_index = 0u64;
    while now_ms <= config.duration_ms() {
        let scroll = ScrollState::new(config.offset_at(now_ms), config.viewport.height);
        let frame = sequencer.tick(scroll, now_ms);

        if frame_index % log_every as u64 == 0 {
            for (element, property) in &watched {
                if let Some(value) = frame.get(element, *property) {
                    tracing::info!(
                        t_ms = now_ms,
                        offset = scroll.offset,
                        element = element.as_str(),
                        ?property,
                        value
                    );
                }
            }
            for pin in frame.pins() {
                tracing::info!(element = pin.target.as_str(), held_at = pin.held_at, "pinned");
            }
        }

        now_ms += frame_ms;
        frame_index += 1;
    }

    for err in sequencer.missing_targets() {
        tracing::warn!(%err, "missing target was skipped during this session");
    }

    sequencer.teardown();
    tracing::info!(frames = frame_index, "playback complete");
    Ok(())
}
