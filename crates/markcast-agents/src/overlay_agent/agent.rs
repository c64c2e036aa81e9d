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

//! The agent owning the overlay slot.

use super::content::OverlayContent;
use super::state::{ActiveOverlay, OverlayState};
use crate::metrics::OverlayMetrics;
use crate::playback::{lock_scene, PlaybackSynchronizer};
use markcast_core::math::Pose;
use markcast_core::media::MediaBackend;
use markcast_core::scene::SharedScene;
use markcast_core::ui::{UiChrome, MSG_TARGET_PAUSED, MSG_VIDEO_UNAVAILABLE};
use markcast_core::{RawTrackedTarget, TargetExtent, TargetId, TrackingEvent};
use markcast_lanes::{SpatialBindingLane, TrackingEventLane};

/// Drives the overlay lifecycle from the engine's per-tick reports.
///
/// | State  | Event                          | Result                       |
/// |--------|--------------------------------|------------------------------|
/// | Idle   | `Detected`                     | spawn, hide prompt → Active  |
/// | Active | `Detected` for another target  | ignored                      |
/// | Active | `StillTracking` (bound target) | no-op                        |
/// | any    | `Paused`                       | transient notice             |
/// | Active | `Lost` (bound target)          | teardown, show prompt → Idle |
/// | any    | `Lost` for another target      | ignored                      |
///
/// All methods run on the tick thread. Only the frame listener installed by
/// the [`PlaybackSynchronizer`] runs elsewhere.
pub struct OverlayAgent {
    state: OverlayState,
    scene: SharedScene,
    media: Box<dyn MediaBackend>,
    ui: Box<dyn UiChrome>,
    content: OverlayContent,
    tracking_lane: TrackingEventLane,
    spatial_lane: SpatialBindingLane,
    playback: PlaybackSynchronizer,
    metrics: OverlayMetrics,
    media_failure_reported: bool,
}

impl OverlayAgent {
    /// Creates an idle agent.
    pub fn new(
        scene: SharedScene,
        media: Box<dyn MediaBackend>,
        ui: Box<dyn UiChrome>,
        content: OverlayContent,
    ) -> Self {
        let metrics = OverlayMetrics::detached();
        let playback = PlaybackSynchronizer::new(scene.clone(), content.looping)
            .with_stale_counter(metrics.stale_frames.clone());
        Self {
            state: OverlayState::Idle,
            scene,
            media,
            ui,
            content,
            tracking_lane: TrackingEventLane::new(),
            spatial_lane: SpatialBindingLane::new(),
            playback,
            metrics,
            media_failure_reported: false,
        }
    }

    /// Reports into `metrics` instead of private counters.
    pub fn with_metrics(mut self, metrics: OverlayMetrics) -> Self {
        self.playback.set_stale_counter(metrics.stale_frames.clone());
        self.metrics = metrics;
        self
    }

    /// The current state.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// The target the overlay is bound to, if any.
    pub fn bound_target(&self) -> Option<&TargetId> {
        self.state.bound_target()
    }

    /// Returns `true` while an overlay exists.
    pub fn is_active(&self) -> bool {
        matches!(self.state, OverlayState::Active(_))
    }

    /// The counters this agent reports to.
    pub fn metrics(&self) -> &OverlayMetrics {
        &self.metrics
    }

    /// The UI surface this agent drives, for messages raised outside the
    /// state machine.
    pub fn ui_mut(&mut self) -> &mut dyn UiChrome {
        self.ui.as_mut()
    }

    /// Processes one tick of engine reports, in report order.
    ///
    /// Each report is classified against the binding as it stands when the
    /// report is reached, so a spawn earlier in the tick affects later reports.
    pub fn on_tick(&mut self, targets: &[RawTrackedTarget]) {
        if let OverlayState::Active(overlay) = &mut self.state {
            self.playback.poll(&mut overlay.playback);
        }
        for raw in targets {
            let event = self.tracking_lane.classify(raw, self.state.bound_target());
            self.handle(event);
        }
    }

    /// Applies one event to the state machine.
    pub fn handle(&mut self, event: TrackingEvent<'_>) {
        match event {
            TrackingEvent::Detected { id, pose, extent } => match &self.state {
                OverlayState::Idle => self.spawn(id, pose, extent),
                OverlayState::Active(overlay) if overlay.id == *id => {
                    log::trace!("'{id}' re-detected while already bound.");
                }
                OverlayState::Active(overlay) => {
                    self.metrics.ignored_events.increment();
                    log::debug!(
                        "Ignoring detection of '{id}': overlay is bound to '{}'.",
                        overlay.id
                    );
                }
            },
            TrackingEvent::StillTracking(id) => {
                if self.state.bound_target() != Some(id) {
                    self.metrics.ignored_events.increment();
                    log::trace!("'{id}' reported as still tracking but is not bound.");
                }
            }
            TrackingEvent::Paused(id) => {
                self.metrics.paused_notices.increment();
                log::debug!("'{id}' paused.");
                self.ui.show_message(MSG_TARGET_PAUSED);
            }
            TrackingEvent::Lost(id) => {
                if self.state.bound_target() == Some(id) {
                    self.teardown();
                    self.ui.set_scan_prompt_visible(true);
                } else {
                    self.metrics.ignored_events.increment();
                    log::trace!("Ignoring loss of unbound target '{id}'.");
                }
            }
        }
    }

    /// Host resumed: shows the prompt when idle, restarts playback otherwise.
    pub fn resume(&mut self) {
        match &mut self.state {
            OverlayState::Idle => self.ui.set_scan_prompt_visible(true),
            OverlayState::Active(overlay) => {
                overlay.playback.resume();
                log::debug!("Resumed playback for '{}'.", overlay.id);
            }
        }
    }

    /// Host paused: pauses playback if it is running.
    pub fn pause(&mut self) {
        if let OverlayState::Active(overlay) = &mut self.state {
            overlay.playback.pause();
            log::debug!("Paused playback for '{}'.", overlay.id);
        }
    }

    /// Host is going away: tears the overlay down without touching the UI.
    pub fn shutdown(&mut self) {
        if self.teardown() {
            log::info!("Overlay agent shut down with a live overlay.");
        }
    }

    fn spawn(&mut self, id: &TargetId, pose: Pose, extent: TargetExtent) {
        let stream = match self.media.open(&self.content.video_asset) {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("Cannot show an overlay for '{id}': {e}");
                if !self.media_failure_reported {
                    self.ui.show_error(MSG_VIDEO_UNAVAILABLE);
                    self.media_failure_reported = true;
                }
                return;
            }
        };
        self.media_failure_reported = false;

        let binding = self.spatial_lane.bind(pose, extent);
        let (anchor, node) = {
            let mut scene = lock_scene(&self.scene);
            let anchor = scene.create_anchor(binding.anchor_pose);
            let node = scene.add_node(anchor, binding.node_transform);
            (anchor, node)
        };

        let renderable = self.content.renderable(stream.texture());
        let playback = self.playback.begin(stream, node, renderable);
        log::info!(
            "Overlay #{} spawned for '{id}' ({:.3} m x {:.3} m).",
            playback.generation(),
            extent.x,
            extent.z
        );

        self.state = OverlayState::Active(ActiveOverlay {
            id: id.clone(),
            anchor,
            node,
            playback,
        });
        self.metrics.spawned.increment();
        self.ui.set_scan_prompt_visible(false);
    }

    /// Returns `false` if there was nothing to tear down.
    fn teardown(&mut self) -> bool {
        let OverlayState::Active(overlay) = std::mem::take(&mut self.state) else {
            return false;
        };
        let ActiveOverlay {
            id,
            anchor,
            node,
            playback,
        } = overlay;
        let generation = playback.generation();

        self.playback.end(playback);
        {
            let mut scene = lock_scene(&self.scene);
            scene.remove_node(node);
            scene.release_anchor(anchor);
        }

        self.metrics.torn_down.increment();
        log::info!("Overlay #{generation} for '{id}' torn down.");
        true
    }
}

impl Drop for OverlayAgent {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for OverlayAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayAgent")
            .field("state", &self.state)
            .field("content", &self.content)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}
