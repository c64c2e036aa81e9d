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

//! Defines the abstract media contracts: a backend that opens video assets,
//! and the streams it returns.
//!
//! Each stream decodes into its own GPU-backed external texture. Decoding runs
//! on threads owned by the backend, which report progress through a
//! frame-available listener.

use crate::error::MediaError;

/// An opaque handle to a GPU texture fed by a decoded video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExternalTextureId(pub u64);

/// A listener invoked whenever the stream's texture receives a new frame.
///
/// The backend may call it from any of its threads, any number of times.
pub type FrameListener = Box<dyn Fn() + Send + Sync>;

/// Opens media assets.
pub trait MediaBackend: Send {
    /// Creates a stream for `asset`, bound to a fresh external texture.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] if the asset cannot be found or opened.
    fn open(&mut self, asset: &str) -> Result<Box<dyn MediaStream>, MediaError>;
}

/// A single video stream decoding into an external texture.
///
/// All control calls are asynchronous requests and must not block.
pub trait MediaStream: Send {
    /// The texture this stream decodes into.
    fn texture(&self) -> ExternalTextureId;

    /// Enables or disables looping at the end of the clip.
    fn set_looping(&mut self, looping: bool);

    /// Requests playback to start or resume.
    fn start(&mut self);

    /// Requests playback to pause.
    fn pause(&mut self);

    /// Returns `true` while the stream is playing.
    fn is_playing(&self) -> bool;

    /// Stops playback and resets the stream, releasing its decoder.
    fn stop(&mut self);

    /// Registers the frame-available listener, replacing any previous one.
    /// `None` clears the registration.
    fn set_frame_listener(&mut self, listener: Option<FrameListener>);
}
