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

use crate::playback::PlaybackSession;
use markcast_core::scene::{AnchorId, NodeId};
use markcast_core::TargetId;

/// The live overlay and everything it owns.
#[derive(Debug)]
pub struct ActiveOverlay {
    pub(crate) id: TargetId,
    pub(crate) anchor: AnchorId,
    pub(crate) node: NodeId,
    pub(crate) playback: PlaybackSession,
}

impl ActiveOverlay {
    /// The target this overlay is bound to.
    pub fn id(&self) -> &TargetId {
        &self.id
    }

    /// The anchor the overlay hangs from.
    pub fn anchor(&self) -> AnchorId {
        self.anchor
    }

    /// The render node carrying the video plane.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The overlay's playback.
    pub fn playback(&self) -> &PlaybackSession {
        &self.playback
    }
}

/// Whether an overlay currently exists.
#[derive(Debug, Default)]
pub enum OverlayState {
    /// No overlay; the scan prompt is up.
    #[default]
    Idle,
    /// Exactly one overlay, bound to one target.
    Active(ActiveOverlay),
}

impl OverlayState {
    /// The bound target, if any.
    pub fn bound_target(&self) -> Option<&TargetId> {
        match self {
            OverlayState::Idle => None,
            OverlayState::Active(overlay) => Some(&overlay.id),
        }
    }

    /// The live overlay, if any.
    pub fn active(&self) -> Option<&ActiveOverlay> {
        match self {
            OverlayState::Idle => None,
            OverlayState::Active(overlay) => Some(overlay),
        }
    }
}
