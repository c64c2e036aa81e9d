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

//! Classifies the engine's raw per-tick reports into normalized tracking events.

use markcast_core::tracking::{RawTrackedTarget, TargetId, TrackingEvent, TrackingState};

/// A lane that maps [`RawTrackedTarget`]s to [`TrackingEvent`]s.
///
/// Classification only depends on the report and on which target, if any, is
/// currently bound to the overlay. It never arbitrates between several
/// detections in the same tick; that is the overlay agent's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingEventLane;

impl TrackingEventLane {
    /// Creates a new lane.
    pub fn new() -> Self {
        Self
    }

    /// Classifies a single report against the currently bound identity.
    pub fn classify<'a>(
        &self,
        raw: &'a RawTrackedTarget,
        bound: Option<&TargetId>,
    ) -> TrackingEvent<'a> {
        match raw.state {
            TrackingState::Tracking if bound == Some(&raw.id) => {
                TrackingEvent::StillTracking(&raw.id)
            }
            TrackingState::Tracking => TrackingEvent::Detected {
                id: &raw.id,
                pose: raw.center_pose,
                extent: raw.extent,
            },
            TrackingState::Paused => TrackingEvent::Paused(&raw.id),
            TrackingState::Stopped => TrackingEvent::Lost(&raw.id),
        }
    }
}
