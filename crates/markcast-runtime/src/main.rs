// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Replays a recorded tracking session against the headless backends and
//! logs every scene, media and UI action.
//!
//! Run with: `markcast-runtime demos/blazes.ron --settings demos/settings.ron`

mod script;

use anyhow::{Context, Result};
use clap::Parser;
use markcast_core::SessionSettings;
use markcast_infra::{HeadlessEngine, HeadlessScene, RecordingUi, SimulatedMediaBackend};
use markcast_io::DirectoryAssetSource;
use markcast_sdk::{ArVideoSession, ConfigureOutcome, SessionBackends};
use markcast_telemetry::init_logging;
use script::{ReplayScript, ScriptStep};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "markcast-runtime",
    about = "Replay a recorded augmented-image session",
    version
)]
struct Cli {
    /// The replay script (RON).
    script: PathBuf,
    /// Session settings (RON). Defaults apply when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Directory reference images are read from. Defaults to the script's directory.
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Delay before a started stream reports its first decoded frame.
    #[arg(long, default_value_t = 50)]
    first_frame_ms: u64,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, default_value = "info")]
    log: String,
}

fn load_settings(path: Option<&Path>) -> Result<SessionSettings> {
    let Some(path) = path else {
        log::info!("No settings file given, using defaults.");
        return Ok(SessionSettings::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    SessionSettings::from_ron_str(&source)
        .with_context(|| format!("failed to parse settings {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);

    let settings = load_settings(cli.settings.as_deref())?;
    let script = ReplayScript::load(&cli.script)?;
    let asset_root = cli.assets.clone().unwrap_or_else(|| {
        cli.script
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    log::info!(
        "Replaying {} ({} frame(s), assets from {}).",
        cli.script.display(),
        script.frame_count(),
        asset_root.display()
    );

    let tick = script.tick_interval();
    let scene = Arc::new(Mutex::new(HeadlessScene::new()));
    let media = SimulatedMediaBackend::new().with_decoder(
        Duration::from_millis(cli.first_frame_ms),
        tick.max(Duration::from_millis(1)),
    );
    let mut session = ArVideoSession::new(
        settings,
        SessionBackends {
            engine: Box::new(HeadlessEngine::new()),
            scene: scene.clone(),
            media: Box::new(media),
            ui: Box::new(RecordingUi::new()),
            assets: Arc::new(DirectoryAssetSource::new(asset_root)),
        },
    );

    if session.configure() == ConfigureOutcome::TrackingDisabled {
        log::warn!("Tracking is disabled; the replay will not spawn any overlay.");
    }
    session.resume();

    for step in &script.steps {
        match step {
            ScriptStep::Tick(targets) => {
                let raw: Vec<_> = targets.iter().map(|t| t.to_raw()).collect();
                session.on_frame(&raw);
                thread::sleep(tick);
            }
            ScriptStep::Idle(frames) => {
                for _ in 0..*frames {
                    session.on_frame(&[]);
                    thread::sleep(tick);
                }
            }
            ScriptStep::Pause => session.pause(),
            ScriptStep::Resume => session.resume(),
        }
    }

    session.shutdown();
    drop(session);

    let scene = scene
        .lock()
        .map_err(|_| anyhow::anyhow!("scene lock poisoned during replay"))?;
    log::info!("--- Scene Journal ---");
    for command in scene.journal() {
        log::info!("  {command:?}");
    }
    log::info!("---------------------");
    Ok(())
}
