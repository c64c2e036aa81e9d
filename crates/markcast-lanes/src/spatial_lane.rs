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

//! Converts a tracked target's pose and extent into an anchor pose and the
//! local transform of the video plane.

use markcast_core::math::{degrees_to_radians, Pose, Quaternion, Vec3};
use markcast_core::scene::NodeTransform;
use markcast_core::tracking::TargetExtent;

/// Height of the video plane as a fraction of the target width (4:3 footage).
pub const VIDEO_HEIGHT_RATIO: f32 = 0.75;

/// Tilt applied about local X so the flat-authored plane stands upright.
pub const PLANE_TILT_DEGREES: f32 = -90.0;

/// Where an overlay goes: the anchor pose, and the node transform relative to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBinding {
    /// The pose the anchor is created at.
    pub anchor_pose: Pose,
    /// The node's local transform under that anchor.
    pub node_transform: NodeTransform,
}

/// A lane computing [`SpatialBinding`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialBindingLane;

impl SpatialBindingLane {
    /// Creates a new lane.
    pub fn new() -> Self {
        Self
    }

    /// Binds an overlay to a target.
    ///
    /// Zero or negative extents are passed through as-is and produce a
    /// degenerate scale.
    pub fn bind(&self, pose: Pose, extent: TargetExtent) -> SpatialBinding {
        SpatialBinding {
            anchor_pose: pose,
            node_transform: Self::node_transform(extent),
        }
    }

    /// The node transform for a given extent. Independent of the target pose.
    pub fn node_transform(extent: TargetExtent) -> NodeTransform {
        NodeTransform {
            // The image is planar, so height is derived from width.
            scale: Vec3::new(extent.x, extent.x * VIDEO_HEIGHT_RATIO, extent.z),
            rotation: Quaternion::from_axis_angle(Vec3::X, degrees_to_radians(PLANE_TILT_DEGREES)),
            // Moves the plane's origin from its bottom edge to its centre.
            translation: Vec3::new(0.0, 0.0, extent.z / 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_extent() {
        let binding = SpatialBindingLane::new().bind(Pose::IDENTITY, TargetExtent::new(2.0, 1.0));
        let t = binding.node_transform;
        assert_eq!(t.scale, Vec3::new(2.0, 1.5, 1.0));
        assert_relative_eq!(t.translation.z, 0.5);
        assert_eq!(t.translation.x, 0.0);
        assert_eq!(t.translation.y, 0.0);
        let expected = Quaternion::from_axis_angle(Vec3::X, degrees_to_radians(-90.0));
        assert!(t.rotation.approx_eq_rotation(&expected, 1e-6));
    }

    #[test]
    fn test_transform_independent_of_pose() {
        let lane = SpatialBindingLane::new();
        let extent = TargetExtent::new(0.4, 0.3);
        let a = lane.bind(Pose::IDENTITY, extent);
        let b = lane.bind(
            Pose::new(
                Vec3::new(3.0, -1.0, 2.0),
                Quaternion::from_axis_angle(Vec3::Y, 1.0),
            ),
            extent,
        );
        assert_eq!(a.node_transform, b.node_transform);
        assert_eq!(b.anchor_pose.translation, Vec3::new(3.0, -1.0, 2.0));
    }

    #[test]
    fn test_degenerate_extent_is_passed_through() {
        let t = SpatialBindingLane::node_transform(TargetExtent::new(-1.0, 0.0));
        assert_eq!(t.scale, Vec3::new(-1.0, -0.75, 0.0));
        assert_eq!(t.translation, Vec3::ZERO);
    }

    #[test]
    fn test_plane_stands_upright() {
        // A plane authored lying flat spans local X/Z; after binding, its far
        // edge (local +Z) must end up above the anchor.
        let t = SpatialBindingLane::node_transform(TargetExtent::new(1.0, 1.0));
        let far_edge = t.apply(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(far_edge.y, 1.0, epsilon = 1e-5);
    }
}
