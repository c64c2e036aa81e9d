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

//! Types exchanged with the image-tracking engine, and the engine contract itself.
//!
//! The engine is a black box: it is configured once with an [`ImageDatabase`]
//! and a [`FocusMode`], then reports a list of [`RawTrackedTarget`]s every
//! camera frame. Those raw reports are classified into [`TrackingEvent`]s by
//! the tracking lane before the overlay agent sees them.

use crate::asset::{AssetHandle, ReferenceImage};
use crate::config::FocusMode;
use crate::error::EngineError;
use crate::math::Pose;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of a reference image, as registered with the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    /// Creates a new target identity.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The engine's confidence classification for a target this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingState {
    /// The target is visible and its pose is being updated.
    Tracking,
    /// The target was seen but tracking is temporarily suspended.
    Paused,
    /// The engine has stopped tracking the target.
    Stopped,
}

/// The physical size of a planar target, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetExtent {
    /// Width of the image along its local X axis.
    pub x: f32,
    /// Depth of the image along its local Z axis.
    pub z: f32,
}

impl TargetExtent {
    /// Creates a new extent.
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// A target report produced by the engine for the current tick.
///
/// Reports are only valid for the tick that produced them. Ticks hand them out
/// as a borrowed slice so nothing downstream can keep them around.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTrackedTarget {
    /// The identity the engine matched.
    pub id: TargetId,
    /// The tracking state for this tick.
    pub state: TrackingState,
    /// The pose of the image centre.
    pub center_pose: Pose,
    /// The estimated physical extent of the image.
    pub extent: TargetExtent,
}

/// A normalized tracking event, borrowed from the tick's raw reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingEvent<'a> {
    /// A target is tracking and is not the one currently bound to the overlay.
    Detected {
        /// The detected identity.
        id: &'a TargetId,
        /// The centre pose of the target.
        pose: Pose,
        /// The physical extent of the target.
        extent: TargetExtent,
    },
    /// The bound target is still tracking.
    StillTracking(&'a TargetId),
    /// A target is paused; only worth a transient notice.
    Paused(&'a TargetId),
    /// A target has stopped tracking.
    Lost(&'a TargetId),
}

impl<'a> TrackingEvent<'a> {
    /// Returns the identity this event refers to.
    pub fn target(&self) -> &'a TargetId {
        match *self {
            TrackingEvent::Detected { id, .. }
            | TrackingEvent::StillTracking(id)
            | TrackingEvent::Paused(id)
            | TrackingEvent::Lost(id) => id,
        }
    }
}

/// A reference image registered for detection.
#[derive(Debug, Clone)]
pub struct ReferenceTarget {
    /// The identity reported back by the engine when the image is matched.
    pub id: TargetId,
    /// The decoded image.
    pub image: AssetHandle<ReferenceImage>,
}

/// The set of reference images handed to the engine at session start.
#[derive(Debug, Clone, Default)]
pub struct ImageDatabase {
    entries: Vec<ReferenceTarget>,
}

impl ImageDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an image under `id`.
    pub fn add_image(&mut self, id: TargetId, image: AssetHandle<ReferenceImage>) {
        self.entries.push(ReferenceTarget { id, image });
    }

    /// Returns the registered entries in insertion order.
    pub fn entries(&self) -> &[ReferenceTarget] {
        &self.entries
    }

    /// Returns the number of registered images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no image is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The configuration surface of the external image-tracking engine.
///
/// Per-frame reports are not pulled through this trait: the host calls the
/// session's frame entry point with whatever slice its engine produced.
pub trait TrackingEngine: Send {
    /// Sets the camera focus mode for the session.
    fn set_focus_mode(&mut self, mode: FocusMode);

    /// Registers the image database for detection.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the engine refuses the database. The
    /// session keeps running with tracking effectively disabled.
    fn attach_image_database(&mut self, database: ImageDatabase) -> Result<(), EngineError>;
}
