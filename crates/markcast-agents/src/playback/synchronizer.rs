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

use super::{lock_scene, FrameGate};
use markcast_core::media::MediaStream;
use markcast_core::scene::{NodeId, SharedScene, VideoRenderable};
use markcast_telemetry::{CounterHandle, MetricId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation value meaning "no overlay is live".
const NO_GENERATION: u64 = 0;

/// The live playback of one overlay.
///
/// Owned by the overlay that started it and handed back to
/// [`PlaybackSynchronizer::end`] on teardown.
pub struct PlaybackSession {
    stream: Box<dyn MediaStream>,
    gate: FrameGate,
    generation: u64,
    node: NodeId,
    listening: bool,
}

impl PlaybackSession {
    /// The generation number of the overlay this playback belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The node the renderable is (or will be) attached to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns `true` once the first frame has attached the renderable.
    pub fn is_frame_attached(&self) -> bool {
        self.gate.is_fired()
    }

    /// Returns `true` while the frame listener is still registered.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Returns `true` while the stream is playing.
    pub fn is_playing(&self) -> bool {
        self.stream.is_playing()
    }

    /// Resumes the stream.
    pub fn resume(&mut self) {
        self.stream.start();
    }

    /// Pauses the stream if it is playing.
    pub fn pause(&mut self) {
        if self.stream.is_playing() {
            self.stream.pause();
        }
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("generation", &self.generation)
            .field("node", &self.node)
            .field("texture", &self.stream.texture())
            .field("frame_attached", &self.gate.is_fired())
            .finish()
    }
}

/// The state captured by a stream's frame listener.
struct FrameAttach {
    scene: SharedScene,
    active_generation: Arc<AtomicU64>,
    generation: u64,
    gate: FrameGate,
    node: NodeId,
    renderable: VideoRenderable,
    stale_frames: CounterHandle,
}

impl FrameAttach {
    /// Runs on a media thread. The scene lock serializes this against
    /// teardown, which cancels the gate while holding the same lock.
    fn on_frame(&self) {
        let mut scene = lock_scene(&self.scene);
        let is_current = self.active_generation.load(Ordering::Acquire) == self.generation;
        if is_current && self.gate.try_fire() {
            scene.attach_renderable(self.node, self.renderable.clone());
            log::debug!(
                "First frame for overlay #{}: renderable attached to node {:?}.",
                self.generation,
                self.node
            );
        } else if !is_current || self.gate.is_cancelled() {
            self.stale_frames.increment();
            log::debug!(
                "Dropped a frame callback for retired overlay #{}.",
                self.generation
            );
        }
    }
}

/// Starts playback on spawn and attaches the video renderable on the first
/// decoded frame, never after the overlay has been torn down.
///
/// Every [`begin`](Self::begin) opens a new generation. A frame callback
/// only acts if its generation is still the active one and its gate is still
/// pending, both checked under the scene lock.
///
/// The listener cannot unregister itself from inside its own callback, so
/// the registration is cleared by the next [`poll`](Self::poll) after the
/// gate fired. Firings in between fail `try_fire` and attach nothing.
pub struct PlaybackSynchronizer {
    scene: SharedScene,
    looping: bool,
    active_generation: Arc<AtomicU64>,
    last_generation: u64,
    stale_frames: CounterHandle,
}

impl PlaybackSynchronizer {
    /// Creates a synchronizer attaching renderables into `scene`.
    pub fn new(scene: SharedScene, looping: bool) -> Self {
        Self {
            scene,
            looping,
            active_generation: Arc::new(AtomicU64::new(NO_GENERATION)),
            last_generation: NO_GENERATION,
            stale_frames: CounterHandle::detached(MetricId::new("overlay", "stale_frames")),
        }
    }

    /// Reports late frame callbacks to `counter`.
    pub fn with_stale_counter(mut self, counter: CounterHandle) -> Self {
        self.set_stale_counter(counter);
        self
    }

    /// Replaces the counter late frame callbacks are reported to. Applies to
    /// playbacks begun afterwards.
    pub fn set_stale_counter(&mut self, counter: CounterHandle) {
        self.stale_frames = counter;
    }

    /// The generation of the live overlay, if any.
    pub fn active_generation(&self) -> Option<u64> {
        match self.active_generation.load(Ordering::Acquire) {
            NO_GENERATION => None,
            generation => Some(generation),
        }
    }

    /// Starts `stream` and arranges for `renderable` to be attached to `node`
    /// once the stream reports its first frame.
    ///
    /// Must not be called while holding the scene lock: a backend is free to
    /// report a frame synchronously from `start`.
    pub fn begin(
        &mut self,
        mut stream: Box<dyn MediaStream>,
        node: NodeId,
        renderable: VideoRenderable,
    ) -> PlaybackSession {
        self.last_generation += 1;
        let generation = self.last_generation;
        self.active_generation.store(generation, Ordering::Release);

        let gate = FrameGate::new();
        let attach = FrameAttach {
            scene: self.scene.clone(),
            active_generation: self.active_generation.clone(),
            generation,
            gate: gate.clone(),
            node,
            renderable,
            stale_frames: self.stale_frames.clone(),
        };

        stream.set_looping(self.looping);
        stream.set_frame_listener(Some(Box::new(move || attach.on_frame())));
        stream.start();
        log::debug!(
            "Overlay #{generation}: playback started on texture {:?}.",
            stream.texture()
        );

        PlaybackSession {
            stream,
            gate,
            generation,
            node,
            listening: true,
        }
    }

    /// Drops the frame listener once it has done its job. Call once per tick.
    pub fn poll(&self, session: &mut PlaybackSession) {
        if session.listening && session.gate.is_fired() {
            session.stream.set_frame_listener(None);
            session.listening = false;
            log::trace!(
                "Overlay #{}: frame listener unregistered.",
                session.generation
            );
        }
    }

    /// Retires `session`: no callback can attach anything afterwards, the
    /// renderable is detached if it was attached, and the stream is stopped.
    ///
    /// Must not be called while holding the scene lock. The node and anchor
    /// themselves are left for the caller to release.
    pub fn end(&mut self, mut session: PlaybackSession) {
        {
            let mut scene = lock_scene(&self.scene);
            let attached = !session.gate.cancel();
            let _ = self.active_generation.compare_exchange(
                session.generation,
                NO_GENERATION,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            if attached {
                scene.detach_renderable(session.node);
            }
        }
        // Outside the lock: a backend may wait for an in-flight callback here.
        session.stream.set_frame_listener(None);
        session.stream.stop();
        log::debug!("Overlay #{}: playback stopped.", session.generation);
    }
}

impl std::fmt::Debug for PlaybackSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSynchronizer")
            .field("looping", &self.looping)
            .field("active_generation", &self.active_generation())
            .field("last_generation", &self.last_generation)
            .finish()
    }
}
