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

//! # Markcast Agents
//!
//! The stateful half of the pipeline. The [`OverlayAgent`] owns the single
//! overlay slot and decides, tick by tick, whether to spawn, keep, or tear
//! down the overlay. The [`PlaybackSynchronizer`] makes sure the video
//! renderable only reaches the scene once real frames are being decoded.

#![warn(missing_docs)]

pub mod metrics;
pub mod overlay_agent;
pub mod playback;

pub use metrics::OverlayMetrics;
pub use overlay_agent::{ActiveOverlay, OverlayAgent, OverlayContent, OverlayState};
pub use playback::{FrameGate, PlaybackSession, PlaybackSynchronizer};
