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

//! A media backend that decodes nothing but behaves like one that does.
//!
//! Without a decoder configured, frames are only reported when a test calls
//! [`StreamProbe::deliver_frame`]. With one, every playing stream owns a
//! thread that reports a first frame after a delay and then one per interval
//! until the stream is paused, stopped or dropped.

use crossbeam_channel::{RecvTimeoutError, Sender};
use markcast_core::error::MediaError;
use markcast_core::media::{ExternalTextureId, FrameListener, MediaBackend, MediaStream};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

type SharedListener = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy)]
struct DecoderTiming {
    first_frame: Duration,
    interval: Duration,
}

struct StreamShared {
    asset: String,
    texture: ExternalTextureId,
    playing: AtomicBool,
    looping: AtomicBool,
    starts: AtomicU32,
    pauses: AtomicU32,
    stops: AtomicU32,
    listener: Mutex<Option<SharedListener>>,
}

impl StreamShared {
    fn listener(&self) -> MutexGuard<'_, Option<SharedListener>> {
        self.listener
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn deliver_frame(&self) -> bool {
        // Clone out so the listener runs without our lock held.
        let listener = self.listener().clone();
        match listener {
            Some(listener) => {
                listener();
                true
            }
            None => false,
        }
    }
}

/// Test-side view of a stream opened by a [`SimulatedMediaBackend`].
#[derive(Clone)]
pub struct StreamProbe {
    shared: Arc<StreamShared>,
}

impl StreamProbe {
    /// The asset the stream was opened for.
    pub fn asset(&self) -> &str {
        &self.shared.asset
    }

    /// The texture the stream decodes into.
    pub fn texture(&self) -> ExternalTextureId {
        self.shared.texture
    }

    /// Reports a decoded frame to the registered listener, on the calling
    /// thread. Returns `false` if no listener is registered.
    pub fn deliver_frame(&self) -> bool {
        self.shared.deliver_frame()
    }

    /// Returns `true` while a frame listener is registered.
    pub fn has_listener(&self) -> bool {
        self.shared.listener().is_some()
    }

    /// A handle to the registered listener that outlives its registration,
    /// like a callback already queued on a decoder thread.
    pub fn listener(&self) -> Option<SharedListener> {
        self.shared.listener().clone()
    }

    /// Returns `true` while the stream is playing.
    pub fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    /// Returns `true` if looping was requested.
    pub fn is_looping(&self) -> bool {
        self.shared.looping.load(Ordering::Acquire)
    }

    /// Number of `start` requests.
    pub fn start_count(&self) -> u32 {
        self.shared.starts.load(Ordering::Acquire)
    }

    /// Number of `pause` requests.
    pub fn pause_count(&self) -> u32 {
        self.shared.pauses.load(Ordering::Acquire)
    }

    /// Number of `stop` requests.
    pub fn stop_count(&self) -> u32 {
        self.shared.stops.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for StreamProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamProbe")
            .field("asset", &self.shared.asset)
            .field("texture", &self.shared.texture)
            .field("playing", &self.is_playing())
            .finish()
    }
}

/// Every stream a backend has opened, in opening order.
#[derive(Debug, Clone, Default)]
pub struct StreamProbes(Arc<Mutex<Vec<StreamProbe>>>);

impl StreamProbes {
    fn lock(&self) -> MutexGuard<'_, Vec<StreamProbe>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of streams opened.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no stream was opened.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The `index`-th stream opened.
    pub fn get(&self, index: usize) -> Option<StreamProbe> {
        self.lock().get(index).cloned()
    }

    /// The most recently opened stream.
    pub fn last(&self) -> Option<StreamProbe> {
        self.lock().last().cloned()
    }

    fn push(&self, probe: StreamProbe) {
        self.lock().push(probe);
    }
}

struct SimulatedStream {
    shared: Arc<StreamShared>,
    decoder: Option<DecoderTiming>,
    halt: Option<Sender<()>>,
}

impl SimulatedStream {
    fn spawn_decoder(&mut self, timing: DecoderTiming) {
        // Dropping the sender disconnects the channel and ends the thread.
        let (tx, rx) = crossbeam_channel::bounded::<()>(1);
        let shared = self.shared.clone();
        let spawned = thread::Builder::new()
            .name(format!("decoder-{}", shared.texture.0))
            .spawn(move || {
                let mut wait = timing.first_frame;
                loop {
                    match rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {
                            shared.deliver_frame();
                            wait = timing.interval;
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });
        match spawned {
            Ok(_) => self.halt = Some(tx),
            Err(e) => log::warn!(
                "Could not spawn a decoder thread for '{}': {e}",
                self.shared.asset
            ),
        }
    }

    fn halt_decoder(&mut self) {
        self.halt = None;
    }
}

impl MediaStream for SimulatedStream {
    fn texture(&self) -> ExternalTextureId {
        self.shared.texture
    }

    fn set_looping(&mut self, looping: bool) {
        self.shared.looping.store(looping, Ordering::Release);
    }

    fn start(&mut self) {
        self.shared.starts.fetch_add(1, Ordering::AcqRel);
        self.shared.playing.store(true, Ordering::Release);
        if let Some(timing) = self.decoder {
            if self.halt.is_none() {
                self.spawn_decoder(timing);
            }
        }
    }

    fn pause(&mut self) {
        self.shared.pauses.fetch_add(1, Ordering::AcqRel);
        self.shared.playing.store(false, Ordering::Release);
        self.halt_decoder();
    }

    fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    fn stop(&mut self) {
        self.shared.stops.fetch_add(1, Ordering::AcqRel);
        self.shared.playing.store(false, Ordering::Release);
        self.halt_decoder();
        log::trace!("Media: stream on texture {:?} stopped.", self.shared.texture);
    }

    fn set_frame_listener(&mut self, listener: Option<FrameListener>) {
        *self.shared.listener() = listener.map(SharedListener::from);
    }
}

impl Drop for SimulatedStream {
    fn drop(&mut self) {
        self.halt_decoder();
    }
}

/// A [`MediaBackend`] producing simulated streams.
#[derive(Debug, Default)]
pub struct SimulatedMediaBackend {
    next_texture: u64,
    unavailable: HashSet<String>,
    decoder: Option<DecoderTiming>,
    probes: StreamProbes,
}

impl SimulatedMediaBackend {
    /// Creates a backend whose streams only report frames on demand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives every started stream a decoder thread that reports its first
    /// frame after `first_frame` and then one frame per `interval`.
    pub fn with_decoder(mut self, first_frame: Duration, interval: Duration) -> Self {
        self.decoder = Some(DecoderTiming {
            first_frame,
            interval,
        });
        self
    }

    /// Makes `asset` fail to open.
    pub fn with_unavailable(mut self, asset: impl Into<String>) -> Self {
        self.unavailable.insert(asset.into());
        self
    }

    /// A handle onto every stream this backend opens.
    pub fn probes(&self) -> StreamProbes {
        self.probes.clone()
    }
}

impl MediaBackend for SimulatedMediaBackend {
    fn open(&mut self, asset: &str) -> Result<Box<dyn MediaStream>, MediaError> {
        if self.unavailable.contains(asset) {
            return Err(MediaError::NotFound(asset.to_owned()));
        }
        self.next_texture += 1;
        let shared = Arc::new(StreamShared {
            asset: asset.to_owned(),
            texture: ExternalTextureId(self.next_texture),
            playing: AtomicBool::new(false),
            looping: AtomicBool::new(false),
            starts: AtomicU32::new(0),
            pauses: AtomicU32::new(0),
            stops: AtomicU32::new(0),
            listener: Mutex::new(None),
        });
        self.probes.push(StreamProbe {
            shared: shared.clone(),
        });
        log::debug!("Media: opened '{asset}' on texture {:?}.", shared.texture);
        Ok(Box::new(SimulatedStream {
            shared,
            decoder: self.decoder,
            halt: None,
        }))
    }
}
