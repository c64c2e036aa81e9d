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

//! Synchronizes video playback with the first texture attachment.
//!
//! Playback starts as soon as an overlay spawns, so the clip's timeline
//! begins at detection time. The renderable, however, is only attached once
//! the stream reports a decoded frame; until then the node stays empty
//! instead of showing an uninitialised texture.

mod gate;
mod synchronizer;

pub use gate::FrameGate;
pub use synchronizer::{PlaybackSession, PlaybackSynchronizer};

use markcast_core::scene::{SceneGraph, SharedScene};
use std::sync::MutexGuard;

/// Locks the shared scene, recovering the guard if a previous holder panicked.
pub fn lock_scene(scene: &SharedScene) -> MutexGuard<'_, dyn SceneGraph + 'static> {
    scene.lock().unwrap_or_else(|poisoned| {
        log::warn!("Scene lock was poisoned, recovering the guard.");
        poisoned.into_inner()
    })
}
