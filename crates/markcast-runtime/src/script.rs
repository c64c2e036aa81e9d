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

//! The replay script format.
//!
//! A script is a RON document listing what the tracking engine reported on
//! each camera frame, interleaved with host lifecycle events:
//!
//! ```ron
//! (
//!     tick_interval_ms: 33,
//!     steps: [
//!         Idle(3),
//!         Tick([(id: "marker.png", state: Tracking, position: (x: 0.0, y: 0.0, z: -0.5))]),
//!         Pause,
//!         Resume,
//!         Tick([(id: "marker.png", state: Stopped)]),
//!     ],
//! )
//! ```

use anyhow::{Context, Result};
use markcast_core::math::{Pose, Quaternion, Vec3};
use markcast_core::{RawTrackedTarget, TargetExtent, TargetId, TrackingState};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_tick_interval_ms() -> u64 {
    33
}

fn default_extent() -> TargetExtent {
    TargetExtent::new(0.3, 0.2)
}

fn default_rotation() -> Quaternion {
    Quaternion::IDENTITY
}

/// One target report in a scripted tick.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedTarget {
    /// The reported identity.
    pub id: TargetId,
    /// The reported tracking state.
    pub state: TrackingState,
    /// Centre of the image in world space.
    #[serde(default)]
    pub position: Vec3,
    /// Orientation of the image.
    #[serde(default = "default_rotation")]
    pub rotation: Quaternion,
    /// Physical size of the image.
    #[serde(default = "default_extent")]
    pub extent: TargetExtent,
}

impl ScriptedTarget {
    /// The engine report this entry stands for.
    pub fn to_raw(&self) -> RawTrackedTarget {
        RawTrackedTarget {
            id: self.id.clone(),
            state: self.state,
            center_pose: Pose::new(self.position, self.rotation),
            extent: self.extent,
        }
    }
}

/// A single step of a replay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ScriptStep {
    /// One camera frame with these reports.
    Tick(Vec<ScriptedTarget>),
    /// This many camera frames with no reports.
    Idle(u32),
    /// The host went to the background.
    Pause,
    /// The host came back.
    Resume,
}

/// A recorded session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplayScript {
    /// Wall-clock time between two camera frames.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// The steps, in order.
    pub steps: Vec<ScriptStep>,
}

impl ReplayScript {
    /// Parses a script from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).context("invalid replay script")
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read replay script {}", path.display()))?;
        Self::from_ron_str(&source)
            .with_context(|| format!("failed to parse replay script {}", path.display()))
    }

    /// The interval between two camera frames.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Total number of camera frames the script plays.
    pub fn frame_count(&self) -> u64 {
        self.steps
            .iter()
            .map(|step| match step {
                ScriptStep::Tick(_) => 1,
                ScriptStep::Idle(frames) => u64::from(*frames),
                ScriptStep::Pause | ScriptStep::Resume => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_a_minimal_script_with_defaults() {
        let script = ReplayScript::from_ron_str(
            r#"(steps: [Idle(2), Tick([(id: "marker.png", state: Tracking)]), Pause, Resume])"#,
        )
        .unwrap();

        assert_eq!(script.tick_interval(), Duration::from_millis(33));
        assert_eq!(script.frame_count(), 3);
        let ScriptStep::Tick(targets) = &script.steps[1] else {
            panic!("second step should be a tick");
        };
        let raw = targets[0].to_raw();
        assert_eq!(raw.id, TargetId::new("marker.png"));
        assert_eq!(raw.center_pose, Pose::IDENTITY);
        assert_eq!(raw.extent, TargetExtent::new(0.3, 0.2));
    }

    #[test]
    fn test_explicit_pose_and_extent() {
        let script = ReplayScript::from_ron_str(
            r#"(
                tick_interval_ms: 10,
                steps: [Tick([(
                    id: "a",
                    state: Stopped,
                    position: (x: 1.0, y: 2.0, z: 3.0),
                    extent: (x: 2.0, z: 1.0),
                )])],
            )"#,
        )
        .unwrap();

        let ScriptStep::Tick(targets) = &script.steps[0] else {
            panic!("expected a tick");
        };
        let raw = targets[0].to_raw();
        assert_eq!(raw.state, TrackingState::Stopped);
        assert_eq!(raw.center_pose.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(raw.extent, TargetExtent::new(2.0, 1.0));
    }

    #[test]
    fn test_rejects_unknown_steps() {
        assert!(ReplayScript::from_ron_str("(steps: [Jump])").is_err());
    }
}
