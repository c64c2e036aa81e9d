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

//! A rigid pose in tracked world space.

use serde::{Deserialize, Serialize};

use super::{Quaternion, Vec3};

/// A position and orientation, with no scale.
///
/// The tracking engine reports the centre of each target as a `Pose`, and
/// anchors are created from one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// The position of the pose origin, in metres.
    pub translation: Vec3,
    /// The orientation of the pose.
    pub rotation: Quaternion,
}

impl Pose {
    /// The pose at the world origin with no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
    };

    /// Creates a new `Pose`.
    pub fn new(translation: Vec3, rotation: Quaternion) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Creates a pose at `translation` with no rotation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quaternion::IDENTITY)
    }

    /// Maps a point expressed in this pose's local frame into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }
}
