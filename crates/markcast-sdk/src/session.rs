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

use anyhow::{Context, Result};
use markcast_agents::{OverlayAgent, OverlayContent, OverlayMetrics, OverlayState};
use markcast_core::asset::AssetSource;
use markcast_core::media::MediaBackend;
use markcast_core::scene::SharedScene;
use markcast_core::tracking::TrackingEngine;
use markcast_core::ui::{UiChrome, MSG_DATABASE_SETUP_FAILED};
use markcast_core::{RawTrackedTarget, SessionSettings};
use markcast_io::TargetRegistry;
use markcast_telemetry::MetricsRegistry;
use std::sync::Arc;

/// The collaborators a session runs against.
pub struct SessionBackends {
    /// The image-tracking engine to configure.
    pub engine: Box<dyn TrackingEngine>,
    /// The scene graph overlays are placed in.
    pub scene: SharedScene,
    /// The media subsystem playing the overlay video.
    pub media: Box<dyn MediaBackend>,
    /// The host's UI chrome.
    pub ui: Box<dyn UiChrome>,
    /// Where reference images are read from.
    pub assets: Arc<dyn AssetSource>,
}

/// What [`ArVideoSession::configure`] achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// The image database is attached; targets will be detected.
    Configured,
    /// Setup failed. The session still runs but nothing will be detected.
    TrackingDisabled,
}

/// An augmented-image video session.
pub struct ArVideoSession {
    settings: SessionSettings,
    engine: Box<dyn TrackingEngine>,
    assets: Arc<dyn AssetSource>,
    agent: OverlayAgent,
    registry: Option<TargetRegistry>,
    metrics: MetricsRegistry,
    outcome: Option<ConfigureOutcome>,
    shut_down: bool,
}

impl ArVideoSession {
    /// Wires a session. Nothing is loaded or started until
    /// [`configure`](Self::configure).
    pub fn new(settings: SessionSettings, backends: SessionBackends) -> Self {
        let SessionBackends {
            engine,
            scene,
            media,
            ui,
            assets,
        } = backends;

        let metrics = MetricsRegistry::new();
        let overlay_metrics = OverlayMetrics::register(&metrics).unwrap_or_else(|e| {
            log::warn!("Overlay counters not registered ({e}), using private ones.");
            OverlayMetrics::detached()
        });
        let agent = OverlayAgent::new(scene, media, ui, OverlayContent::from_settings(&settings))
            .with_metrics(overlay_metrics);

        Self {
            settings,
            engine,
            assets,
            agent,
            registry: None,
            metrics,
            outcome: None,
            shut_down: false,
        }
    }

    /// Configures the tracking engine: focus mode, reference images, database.
    ///
    /// Failures are not returned. They are logged, reported once through the
    /// UI, and leave the session running with tracking disabled. Calling this
    /// again returns the first outcome without redoing any work.
    pub fn configure(&mut self) -> ConfigureOutcome {
        if let Some(outcome) = self.outcome {
            log::warn!("Session already configured ({outcome:?}).");
            return outcome;
        }

        let outcome = match self.setup_database() {
            Ok(count) => {
                log::info!("Tracking configured with {count} reference image(s).");
                ConfigureOutcome::Configured
            }
            Err(e) => {
                log::error!("Image database setup failed: {e:#}");
                self.agent.ui_mut().show_error(MSG_DATABASE_SETUP_FAILED);
                ConfigureOutcome::TrackingDisabled
            }
        };
        self.outcome = Some(outcome);
        outcome
    }

    fn setup_database(&mut self) -> Result<usize> {
        self.engine.set_focus_mode(self.settings.focus_mode);

        let registry = TargetRegistry::load(self.assets.as_ref(), &self.settings.marker_images)
            .context("failed to load the reference images")?;
        self.engine
            .attach_image_database(registry.image_database())
            .context("the tracking engine rejected the image database")?;

        let count = registry.len();
        self.registry = Some(registry);
        Ok(count)
    }

    /// Feeds one camera frame's tracking reports to the overlay agent.
    ///
    /// Reports are dropped unless [`configure`](Self::configure) succeeded.
    pub fn on_frame(&mut self, targets: &[RawTrackedTarget]) {
        if self.outcome != Some(ConfigureOutcome::Configured) {
            log::trace!(
                "Dropping {} report(s): tracking is not configured.",
                targets.len()
            );
            return;
        }
        self.agent.on_tick(targets);
    }

    /// The host came back to the foreground.
    pub fn resume(&mut self) {
        self.shut_down = false;
        self.agent.resume();
    }

    /// The host went to the background.
    pub fn pause(&mut self) {
        self.agent.pause();
    }

    /// Releases the overlay and logs the session's counters.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.agent.shutdown();
        self.metrics.log_summary();
    }

    /// The settings the session was created with.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The outcome of [`configure`](Self::configure), if it ran.
    pub fn outcome(&self) -> Option<ConfigureOutcome> {
        self.outcome
    }

    /// The loaded reference images, once configured.
    pub fn registry(&self) -> Option<&TargetRegistry> {
        self.registry.as_ref()
    }

    /// The overlay state.
    pub fn state(&self) -> &OverlayState {
        self.agent.state()
    }

    /// The session's counters.
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }
}

impl Drop for ArVideoSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
