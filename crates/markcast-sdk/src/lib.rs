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

//! The public-facing API of Markcast.
//!
//! A host wires its tracking engine, scene graph, media subsystem, UI and
//! asset folder into an [`ArVideoSession`], calls
//! [`configure`](ArVideoSession::configure) once, then feeds it every camera
//! frame's tracking reports through [`on_frame`](ArVideoSession::on_frame).

mod session;

pub use session::{ArVideoSession, ConfigureOutcome, SessionBackends};

/// The types a host needs to drive a session.
pub mod prelude {
    pub use crate::{ArVideoSession, ConfigureOutcome, SessionBackends};
    pub use markcast_core::asset::AssetSource;
    pub use markcast_core::math::{LinearRgba, Pose, Quaternion, Vec3};
    pub use markcast_core::media::{ExternalTextureId, FrameListener, MediaBackend, MediaStream};
    pub use markcast_core::scene::{
        AnchorId, NodeId, NodeTransform, SceneGraph, SharedScene, VideoRenderable,
    };
    pub use markcast_core::tracking::{ImageDatabase, TrackingEngine};
    pub use markcast_core::ui::UiChrome;
    pub use markcast_core::{
        FocusMode, RawTrackedTarget, SessionSettings, TargetExtent, TargetId, TrackingState,
    };
}
