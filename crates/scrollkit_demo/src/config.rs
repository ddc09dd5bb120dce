//! Demo configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level demo configuration (scrollkit-demo.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Piecewise-linear scroll script: document offset over wall-clock time
    #[serde(default = "default_script")]
    pub script: Vec<ScrollKey>,
}

/// Frame loop settings
#[derive(Debug, Deserialize, Serialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Log sampled channels every Nth frame
    #[serde(default = "default_log_every")]
    pub log_every: u32,
}

fn default_fps() -> u32 {
    60
}

fn default_log_every() -> u32 {
    30
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            log_every: default_log_every(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_height() -> f32 {
    900.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
        }
    }
}

/// One point of the scroll script
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ScrollKey {
    pub at_ms: f64,
    pub offset: f32,
}

/// The built-in session: settle on the hero, scroll to the footer,
/// scroll back up (reversing the toggles), then back down.
fn default_script() -> Vec<ScrollKey> {
    [
        (0.0, 0.0),
        (1200.0, 0.0),
        (5200.0, 2400.0),
        (6400.0, 600.0),
        (8000.0, 2400.0),
    ]
    .into_iter()
    .map(|(at_ms, offset)| ScrollKey { at_ms, offset })
    .collect()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            viewport: ViewportConfig::default(),
            script: default_script(),
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading demo config {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&text)
            .with_context(|| format!("parsing demo config {}", path.display()))?;
        Ok(config)
    }

    /// Wall-clock length of the session
    pub fn duration_ms(&self) -> f64 {
        self.script.last().map(|k| k.at_ms).unwrap_or(0.0)
    }

    /// Scroll offset at a wall-clock time, interpolated between keys
    pub fn offset_at(&self, now_ms: f64) -> f32 {
        let Some(first) = self.script.first() else {
            return 0.0;
        };
        if now_ms <= first.at_ms {
            return first.offset;
        }
        for pair in self.script.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if now_ms <= b.at_ms {
                let span = b.at_ms - a.at_ms;
                if span <= 0.0 {
                    return b.offset;
                }
                let t = ((now_ms - a.at_ms) / span) as f32;
                return a.offset + (b.offset - a.offset) * t;
            }
        }
        self.script.last().map(|k| k.offset).unwrap_or(0.0)
    }
}
