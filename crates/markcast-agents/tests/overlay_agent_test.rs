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

use markcast_agents::{OverlayAgent, OverlayContent, OverlayMetrics};
use markcast_core::math::{Pose, Vec3};
use markcast_core::scene::SharedScene;
use markcast_core::ui::{MSG_TARGET_PAUSED, MSG_VIDEO_UNAVAILABLE};
use markcast_core::{RawTrackedTarget, TargetExtent, TargetId, TrackingEvent, TrackingState};
use markcast_infra::{
    HeadlessScene, RecordingUi, SceneCommand, SimulatedMediaBackend, StreamProbes, UiJournal,
};
use markcast_telemetry::MetricsRegistry;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// --- Test Setup ---
struct Harness {
    agent: OverlayAgent,
    scene: Arc<Mutex<HeadlessScene>>,
    streams: StreamProbes,
    ui: UiJournal,
}

impl Harness {
    fn new() -> Self {
        Self::with_media(SimulatedMediaBackend::new())
    }

    fn with_media(media: SimulatedMediaBackend) -> Self {
        let scene = Arc::new(Mutex::new(HeadlessScene::new()));
        let shared: SharedScene = scene.clone();
        let streams = media.probes();
        let ui = RecordingUi::new();
        let journal = ui.journal();
        let agent = OverlayAgent::new(
            shared,
            Box::new(media),
            Box::new(ui),
            OverlayContent::default(),
        );
        Self {
            agent,
            scene,
            streams,
            ui: journal,
        }
    }

    fn anchors_created(&self) -> usize {
        self.scene
            .lock()
            .unwrap()
            .journal()
            .iter()
            .filter(|cmd| matches!(cmd, SceneCommand::CreateAnchor(_)))
            .count()
    }

    fn rendered(&self) -> usize {
        self.scene.lock().unwrap().rendered_count()
    }
}

fn report(name: &str, state: TrackingState) -> RawTrackedTarget {
    RawTrackedTarget {
        id: TargetId::new(name),
        state,
        center_pose: Pose::from_translation(Vec3::new(0.1, 0.0, -0.5)),
        extent: TargetExtent::new(2.0, 1.0),
    }
}

fn tracking(name: &str) -> RawTrackedTarget {
    report(name, TrackingState::Tracking)
}

fn stopped(name: &str) -> RawTrackedTarget {
    report(name, TrackingState::Stopped)
}
// ---

#[test]
fn test_first_detection_spawns_a_bound_overlay() {
    // Arrange
    let mut h = Harness::new();

    // Act
    h.agent.on_tick(&[tracking("A")]);

    // Assert
    assert!(h.agent.is_active());
    assert_eq!(h.agent.bound_target(), Some(&TargetId::new("A")));
    assert_eq!(h.streams.len(), 1);
    assert_eq!(h.agent.metrics().spawned.get(), 1);
    assert!(!h.ui.prompt_visible());

    let scene = h.scene.lock().unwrap();
    let (_, pose) = scene.anchors().iter().next().unwrap();
    assert_eq!(pose.translation, Vec3::new(0.1, 0.0, -0.5));
    let node = scene.nodes().values().next().unwrap();
    assert_eq!(node.transform.scale, Vec3::new(2.0, 1.5, 1.0));
    assert_eq!(node.transform.translation, Vec3::new(0.0, 0.0, 0.5));
    assert!(node.renderable.is_none(), "no renderable before the first frame");
}

#[test]
fn test_first_detected_target_wins() {
    // Arrange
    let mut h = Harness::new();

    // Act
    h.agent.on_tick(&[tracking("A"), tracking("B")]);
    h.agent.on_tick(&[tracking("B")]);

    // Assert
    assert_eq!(h.agent.bound_target(), Some(&TargetId::new("A")));
    assert_eq!(h.anchors_created(), 1);
    assert_eq!(h.streams.len(), 1);
    assert_eq!(h.agent.metrics().ignored_events.get(), 2);
}

#[test]
fn test_still_tracking_is_idempotent() {
    // Arrange
    let mut h = Harness::new();

    // Act
    for _ in 0..10 {
        h.agent.on_tick(&[tracking("A")]);
    }

    // Assert
    assert_eq!(h.anchors_created(), 1);
    assert_eq!(h.streams.len(), 1);
    assert_eq!(h.streams.last().unwrap().start_count(), 1);
}

#[test]
fn test_first_frame_attaches_the_renderable_once() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();
    assert!(stream.is_playing());
    assert!(stream.is_looping());

    // Act
    assert!(stream.deliver_frame());
    assert!(stream.deliver_frame());
    h.agent.on_tick(&[tracking("A")]);

    // Assert
    let attaches = h
        .scene
        .lock()
        .unwrap()
        .journal()
        .iter()
        .filter(|cmd| matches!(cmd, SceneCommand::AttachRenderable(..)))
        .count();
    assert_eq!(attaches, 1);
    assert_eq!(h.rendered(), 1);
    let scene = h.scene.lock().unwrap();
    let renderable = scene.nodes().values().next().unwrap().renderable.clone().unwrap();
    assert_eq!(renderable.texture, stream.texture());
    assert_eq!(renderable.model, "chroma_key_video.sfb");
    drop(scene);
    assert!(!stream.has_listener(), "listener is dropped once it fired");
}

#[test]
fn test_listener_is_unregistered_on_the_tick_after_it_fired() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();

    // Act
    assert!(stream.deliver_frame());
    let registered_until_tick = stream.has_listener();
    assert!(stream.deliver_frame());
    h.agent.on_tick(&[]);

    // Assert
    assert!(registered_until_tick);
    assert!(!stream.has_listener());
    assert!(!stream.deliver_frame());
    assert_eq!(h.rendered(), 1);
    assert_eq!(h.agent.metrics().stale_frames.get(), 0);
}

#[test]
fn test_losing_the_bound_target_tears_everything_down() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();
    stream.deliver_frame();

    // Act
    h.agent.on_tick(&[stopped("A")]);

    // Assert
    assert!(!h.agent.is_active());
    assert_eq!(stream.stop_count(), 1);
    assert!(!stream.has_listener());
    assert!(h.ui.prompt_visible());
    let scene = h.scene.lock().unwrap();
    assert!(scene.anchors().is_empty());
    assert!(scene.nodes().is_empty());
    drop(scene);
    assert_eq!(h.agent.metrics().torn_down.get(), 1);
}

#[test]
fn test_losing_another_target_keeps_the_overlay() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);

    // Act
    h.agent.on_tick(&[stopped("B")]);

    // Assert
    assert_eq!(h.agent.bound_target(), Some(&TargetId::new("A")));
    assert!(h.streams.last().unwrap().is_playing());
}

#[test]
fn test_detected_for_the_bound_target_is_a_no_op() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let a = TargetId::new("A");

    // Act
    h.agent.handle(TrackingEvent::Detected {
        id: &a,
        pose: Pose::IDENTITY,
        extent: TargetExtent::new(1.0, 1.0),
    });

    // Assert
    assert_eq!(h.agent.bound_target(), Some(&a));
    assert_eq!(h.streams.len(), 1);
    assert_eq!(h.anchors_created(), 1);
    assert_eq!(h.streams.last().unwrap().start_count(), 1);
    assert_eq!(h.agent.metrics().spawned.get(), 1);
    assert_eq!(h.agent.metrics().ignored_events.get(), 0);
}

#[test]
fn test_still_tracking_for_an_unbound_target_is_ignored() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let b = TargetId::new("B");

    // Act
    h.agent.handle(TrackingEvent::StillTracking(&b));

    // Assert
    assert_eq!(h.agent.bound_target(), Some(&TargetId::new("A")));
    assert_eq!(h.streams.len(), 1);
    assert_eq!(h.anchors_created(), 1);
    assert_eq!(h.streams.last().unwrap().start_count(), 1);
    assert_eq!(h.agent.metrics().ignored_events.get(), 1);
}

#[test]
fn test_redetection_gets_a_fresh_anchor_and_stream() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let first_anchor = h.agent.state().active().unwrap().anchor();
    h.agent.on_tick(&[stopped("A")]);

    // Act
    h.agent.on_tick(&[tracking("A")]);

    // Assert
    let second_anchor = h.agent.state().active().unwrap().anchor();
    assert_ne!(first_anchor, second_anchor);
    assert_eq!(h.streams.len(), 2);
    assert_ne!(
        h.streams.get(0).unwrap().texture(),
        h.streams.get(1).unwrap().texture()
    );
    assert_eq!(h.scene.lock().unwrap().anchors().len(), 1);
}

#[test]
fn test_late_frame_after_teardown_attaches_nothing() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let in_flight = h.streams.last().unwrap().listener().unwrap();
    h.agent.on_tick(&[stopped("A")]);

    // Act
    in_flight();

    // Assert
    assert_eq!(h.rendered(), 0);
    assert!(!h
        .scene
        .lock()
        .unwrap()
        .journal()
        .iter()
        .any(|cmd| matches!(cmd, SceneCommand::AttachRenderable(..))));
    assert_eq!(h.agent.metrics().stale_frames.get(), 1);
}

#[test]
fn test_late_frame_from_a_previous_overlay_does_not_touch_the_new_one() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let old_listener = h.streams.last().unwrap().listener().unwrap();
    h.agent.on_tick(&[stopped("A")]);
    h.agent.on_tick(&[tracking("A")]);

    // Act
    old_listener();

    // Assert
    assert_eq!(h.rendered(), 0);
    assert!(!h.agent.state().active().unwrap().playback().is_frame_attached());

    // The new overlay still gets its own first frame.
    assert!(h.streams.last().unwrap().deliver_frame());
    assert_eq!(h.rendered(), 1);
}

#[test]
fn test_paused_target_shows_a_notice_only() {
    // Arrange
    let mut h = Harness::new();

    // Act
    h.agent.on_tick(&[report("A", TrackingState::Paused)]);

    // Assert
    assert!(!h.agent.is_active());
    assert_eq!(h.ui.messages(), vec![MSG_TARGET_PAUSED.to_owned()]);
    assert_eq!(h.streams.len(), 0);
}

#[test]
fn test_paused_bound_target_keeps_the_overlay() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);

    // Act
    h.agent.on_tick(&[report("A", TrackingState::Paused)]);

    // Assert
    assert!(h.agent.is_active());
    assert_eq!(h.agent.metrics().paused_notices.get(), 1);
}

#[test]
fn test_media_failure_keeps_idle_and_reports_once() {
    // Arrange
    let media = SimulatedMediaBackend::new().with_unavailable("for_bigger_blazes.mp4");
    let mut h = Harness::with_media(media);

    // Act
    h.agent.on_tick(&[tracking("A")]);
    h.agent.on_tick(&[tracking("A")]);

    // Assert
    assert!(!h.agent.is_active());
    assert_eq!(h.anchors_created(), 0);
    assert_eq!(h.ui.errors(), vec![MSG_VIDEO_UNAVAILABLE.to_owned()]);
}

#[test]
fn test_host_pause_and_resume_drive_playback() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();

    // Act & Assert
    h.agent.pause();
    assert!(!stream.is_playing());
    assert_eq!(stream.pause_count(), 1);

    h.agent.pause();
    assert_eq!(stream.pause_count(), 1, "pausing twice is a no-op");

    h.agent.resume();
    assert!(stream.is_playing());
    assert_eq!(stream.start_count(), 2);
}

#[test]
fn test_resume_while_idle_shows_the_prompt() {
    // Arrange
    let mut h = Harness::new();

    // Act
    h.agent.resume();

    // Assert
    assert!(h.ui.prompt_visible());
}

#[test]
fn test_shutdown_releases_the_overlay() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();
    let prompt_before = h.ui.prompt_visible();

    // Act
    h.agent.shutdown();
    h.agent.shutdown();

    // Assert
    assert!(!h.agent.is_active());
    assert_eq!(stream.stop_count(), 1);
    assert!(h.scene.lock().unwrap().anchors().is_empty());
    assert_eq!(h.ui.prompt_visible(), prompt_before);
}

#[test]
fn test_dropping_the_agent_releases_the_overlay() {
    // Arrange
    let mut h = Harness::new();
    h.agent.on_tick(&[tracking("A")]);
    let stream = h.streams.last().unwrap();
    let scene = h.scene.clone();

    // Act
    drop(h);

    // Assert
    assert_eq!(stream.stop_count(), 1);
    assert!(scene.lock().unwrap().anchors().is_empty());
}

#[test]
fn test_registered_metrics_are_shared() {
    // Arrange
    let registry = MetricsRegistry::new();
    let metrics = OverlayMetrics::register(&registry).unwrap();
    let scene: SharedScene = Arc::new(Mutex::new(HeadlessScene::new()));
    let mut agent = OverlayAgent::new(
        scene,
        Box::new(SimulatedMediaBackend::new()),
        Box::new(RecordingUi::new()),
        OverlayContent::default(),
    )
    .with_metrics(metrics);

    // Act
    agent.on_tick(&[tracking("A")]);
    agent.on_tick(&[stopped("A")]);

    // Assert
    let snapshot = registry.snapshot();
    let value = |name: &str| {
        snapshot
            .iter()
            .find(|(id, _)| id.name == name)
            .map(|(_, v)| *v)
    };
    assert_eq!(value("spawned"), Some(1));
    assert_eq!(value("torn_down"), Some(1));
}

#[test]
fn test_decoder_thread_attaches_and_teardown_wins() {
    // Arrange
    let media = SimulatedMediaBackend::new()
        .with_decoder(Duration::from_millis(1), Duration::from_millis(1));
    let mut h = Harness::with_media(media);

    // Act
    h.agent.on_tick(&[tracking("A")]);
    let deadline = Instant::now() + Duration::from_secs(5);
    while h.rendered() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(1));
    }
    let attached = h.rendered();
    h.agent.on_tick(&[stopped("A")]);
    thread::sleep(Duration::from_millis(20));

    // Assert
    assert_eq!(attached, 1);
    assert_eq!(h.rendered(), 0);
    assert!(h.scene.lock().unwrap().nodes().is_empty());
}
