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

//! The contract between the overlay pipeline and the external scene graph.
//!
//! The pipeline never owns scene objects directly. It asks the graph for an
//! anchor and a node, keeps the returned ids, and hands them back on teardown.

use crate::math::{LinearRgba, Pose, Quaternion, Vec3};
use crate::media::ExternalTextureId;
use std::sync::{Arc, Mutex};

/// An opaque handle to an anchor fixed in tracked space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// An opaque handle to a render node parented to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// The local transform of a render node relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Local position offset.
    pub translation: Vec3,
    /// Local rotation.
    pub rotation: Quaternion,
    /// Local, possibly non-uniform, scale.
    pub scale: Vec3,
}

impl NodeTransform {
    /// Creates a new `NodeTransform`.
    pub fn new(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Maps a point in the node's local space into its anchor's space.
    ///
    /// Applied in the standard `Scale -> Rotate -> Translate` order.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        let scaled = Vec3::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.translation + self.rotation * scaled
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quaternion::IDENTITY, Vec3::ONE)
    }
}

/// Material parameters for the chroma-keyed video plane.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMaterial {
    /// Name of the sampler parameter that receives the external texture.
    pub texture_param: String,
    /// Name of the `float4` parameter that receives the key colour.
    pub key_color_param: String,
    /// The colour keyed out of the video.
    pub key_color: LinearRgba,
}

impl VideoMaterial {
    /// Creates the material used by the bundled chroma-key model.
    pub fn chroma_key(key_color: LinearRgba) -> Self {
        Self {
            texture_param: "videoTexture".to_owned(),
            key_color_param: "keyColor".to_owned(),
            key_color,
        }
    }
}

/// The renderable attached to an overlay node once video frames are flowing.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRenderable {
    /// The model asset the plane geometry comes from.
    pub model: String,
    /// The texture the media stream decodes into.
    pub texture: ExternalTextureId,
    /// The material configuration.
    pub material: VideoMaterial,
}

/// The operations the pipeline needs from the external scene graph.
pub trait SceneGraph: Send {
    /// Creates an anchor fixed at `pose`.
    fn create_anchor(&mut self, pose: Pose) -> AnchorId;

    /// Detaches and releases an anchor, along with anything still parented to it.
    fn release_anchor(&mut self, anchor: AnchorId);

    /// Adds an empty render node under `anchor` with the given local transform.
    fn add_node(&mut self, anchor: AnchorId, transform: NodeTransform) -> NodeId;

    /// Removes a node from the graph.
    fn remove_node(&mut self, node: NodeId);

    /// Sets the renderable drawn by `node`.
    fn attach_renderable(&mut self, node: NodeId, renderable: VideoRenderable);

    /// Clears whatever renderable `node` draws.
    fn detach_renderable(&mut self, node: NodeId);
}

/// A scene graph shared between the tick loop and frame-available callbacks.
pub type SharedScene = Arc<Mutex<dyn SceneGraph>>;
