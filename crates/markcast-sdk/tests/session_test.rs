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

use image::{ImageFormat, Rgba, RgbaImage};
use markcast_agents::OverlayState;
use markcast_core::ui::MSG_DATABASE_SETUP_FAILED;
use markcast_infra::{
    EngineProbe, HeadlessEngine, HeadlessScene, RecordingUi, SimulatedMediaBackend,
    StreamProbes, UiJournal,
};
use markcast_io::MemoryAssetSource;
use markcast_sdk::prelude::*;
use markcast_telemetry::MetricId;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

// --- Test Setup ---
const MARKER: &str = "for_bigger_blazes.jpg";

fn png_bytes() -> Vec<u8> {
    let img = RgbaImage::from_pixel(4, 4, Rgba([0, 128, 255, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding should succeed");
    bytes
}

struct Fixture {
    session: ArVideoSession,
    engine: EngineProbe,
    streams: StreamProbes,
    ui: UiJournal,
    scene: Arc<Mutex<HeadlessScene>>,
}

fn fixture(engine: HeadlessEngine, assets: MemoryAssetSource) -> Fixture {
    let engine_probe = engine.probe();
    let media = SimulatedMediaBackend::new();
    let streams = media.probes();
    let ui = RecordingUi::new();
    let journal = ui.journal();
    let scene = Arc::new(Mutex::new(HeadlessScene::new()));
    let shared: SharedScene = scene.clone();

    let session = ArVideoSession::new(
        SessionSettings::default(),
        SessionBackends {
            engine: Box::new(engine),
            scene: shared,
            media: Box::new(media),
            ui: Box::new(ui),
            assets: Arc::new(assets),
        },
    );
    Fixture {
        session,
        engine: engine_probe,
        streams,
        ui: journal,
        scene,
    }
}

fn bundled_assets() -> MemoryAssetSource {
    let mut assets = MemoryAssetSource::new();
    assets.insert(MARKER, png_bytes());
    assets
}

fn tracking(name: &str) -> RawTrackedTarget {
    RawTrackedTarget {
        id: TargetId::new(name),
        state: TrackingState::Tracking,
        center_pose: Pose::IDENTITY,
        extent: TargetExtent::new(0.3, 0.2),
    }
}
// ---

#[test]
fn test_configure_registers_the_marker_with_autofocus() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), bundled_assets());

    // --- 2. ACT ---
    let outcome = f.session.configure();

    // --- 3. ASSERT ---
    assert_eq!(outcome, ConfigureOutcome::Configured);
    assert_eq!(f.engine.focus_mode(), Some(FocusMode::Auto));
    assert_eq!(f.engine.registered_targets(), vec![TargetId::new(MARKER)]);
    assert_eq!(f.session.registry().map(|r| r.len()), Some(1));
    assert!(f.ui.errors().is_empty());
}

#[test]
fn test_missing_marker_disables_tracking_with_one_error() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), MemoryAssetSource::new());

    // --- 2. ACT ---
    let outcome = f.session.configure();
    let again = f.session.configure();

    // --- 3. ASSERT ---
    assert_eq!(outcome, ConfigureOutcome::TrackingDisabled);
    assert_eq!(again, ConfigureOutcome::TrackingDisabled);
    assert_eq!(f.ui.errors(), vec![MSG_DATABASE_SETUP_FAILED.to_owned()]);
    assert_eq!(f.engine.attach_attempts(), 0);
    assert!(f.session.registry().is_none());
}

#[test]
fn test_corrupt_marker_disables_tracking() {
    // --- 1. ARRANGE ---
    let mut assets = MemoryAssetSource::new();
    assets.insert(MARKER, b"definitely not an image".to_vec());
    let mut f = fixture(HeadlessEngine::new(), assets);

    // --- 2. ACT ---
    let outcome = f.session.configure();

    // --- 3. ASSERT ---
    assert_eq!(outcome, ConfigureOutcome::TrackingDisabled);
    assert_eq!(f.ui.errors().len(), 1);
}

#[test]
fn test_engine_rejection_disables_tracking_with_one_error() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::rejecting("unsupported"), bundled_assets());

    // --- 2. ACT ---
    let outcome = f.session.configure();

    // --- 3. ASSERT ---
    assert_eq!(outcome, ConfigureOutcome::TrackingDisabled);
    assert_eq!(f.ui.errors(), vec![MSG_DATABASE_SETUP_FAILED.to_owned()]);
    assert!(!f.engine.has_database());
    assert_eq!(f.session.outcome(), Some(ConfigureOutcome::TrackingDisabled));
}

#[test]
fn test_disabled_tracking_never_spawns_an_overlay() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), MemoryAssetSource::new());
    f.session.on_frame(&[tracking(MARKER)]);
    assert_eq!(f.session.configure(), ConfigureOutcome::TrackingDisabled);

    // --- 2. ACT ---
    f.session.on_frame(&[tracking(MARKER)]);

    // --- 3. ASSERT ---
    assert!(matches!(f.session.state(), OverlayState::Idle));
    assert!(f.streams.is_empty());
    assert!(f.scene.lock().unwrap().anchors().is_empty());
}

#[test]
fn test_frames_before_configure_are_dropped() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), bundled_assets());

    // --- 2. ACT ---
    f.session.on_frame(&[tracking(MARKER)]);
    let before = f.streams.len();
    f.session.configure();
    f.session.on_frame(&[tracking(MARKER)]);

    // --- 3. ASSERT ---
    assert_eq!(before, 0);
    assert_eq!(f.streams.len(), 1);
}

#[test]
fn test_frames_drive_the_overlay_and_drop_releases_it() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), bundled_assets());
    f.session.configure();
    f.session.resume();
    assert!(f.ui.prompt_visible());

    // --- 2. ACT ---
    f.session.on_frame(&[tracking(MARKER)]);
    let stream = f.streams.last().expect("a stream should be opened on spawn");
    stream.deliver_frame();

    // --- 3. ASSERT ---
    assert!(!f.ui.prompt_visible());
    assert_eq!(f.scene.lock().unwrap().rendered_count(), 1);
    assert_eq!(
        f.session
            .metrics()
            .counter_value(&MetricId::new("overlay", "spawned"))
            .unwrap(),
        1
    );

    let Fixture { session, scene, .. } = f;
    drop(session);
    assert_eq!(stream.stop_count(), 1);
    assert!(scene.lock().unwrap().anchors().is_empty());
}

#[test]
fn test_pause_and_resume_forward_to_playback() {
    // --- 1. ARRANGE ---
    let mut f = fixture(HeadlessEngine::new(), bundled_assets());
    f.session.configure();
    f.session.on_frame(&[tracking(MARKER)]);
    let stream = f.streams.last().unwrap();

    // --- 2. ACT ---
    f.session.pause();
    let paused = !stream.is_playing();
    f.session.resume();

    // --- 3. ASSERT ---
    assert!(paused);
    assert!(stream.is_playing());
}
