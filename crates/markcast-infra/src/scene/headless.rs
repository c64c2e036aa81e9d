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

//! An in-memory scene graph that keeps a journal of every command.

use markcast_core::math::Pose;
use markcast_core::media::ExternalTextureId;
use markcast_core::scene::{AnchorId, NodeId, NodeTransform, SceneGraph, VideoRenderable};
use std::collections::BTreeMap;

/// A command applied to a [`HeadlessScene`], in the order it was received.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// An anchor was created.
    CreateAnchor(AnchorId),
    /// An anchor was released.
    ReleaseAnchor(AnchorId),
    /// A node was added under an anchor.
    AddNode(NodeId, AnchorId),
    /// A node was removed.
    RemoveNode(NodeId),
    /// A renderable bound to the given texture was attached to a node.
    AttachRenderable(NodeId, ExternalTextureId),
    /// A node's renderable was cleared.
    DetachRenderable(NodeId),
}

/// A node living in a [`HeadlessScene`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    /// The anchor the node is parented to.
    pub anchor: AnchorId,
    /// The node's local transform.
    pub transform: NodeTransform,
    /// The renderable the node draws, if any.
    pub renderable: Option<VideoRenderable>,
}

/// A [`SceneGraph`] that only keeps bookkeeping.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_id: u64,
    anchors: BTreeMap<AnchorId, Pose>,
    nodes: BTreeMap<NodeId, HeadlessNode>,
    journal: Vec<SceneCommand>,
}

impl HeadlessScene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live anchors and their poses.
    pub fn anchors(&self) -> &BTreeMap<AnchorId, Pose> {
        &self.anchors
    }

    /// The live nodes.
    pub fn nodes(&self) -> &BTreeMap<NodeId, HeadlessNode> {
        &self.nodes
    }

    /// Looks up a node.
    pub fn node(&self, node: NodeId) -> Option<&HeadlessNode> {
        self.nodes.get(&node)
    }

    /// Number of nodes currently drawing a renderable.
    pub fn rendered_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|node| node.renderable.is_some())
            .count()
    }

    /// Every command received so far.
    pub fn journal(&self) -> &[SceneCommand] {
        &self.journal
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl SceneGraph for HeadlessScene {
    fn create_anchor(&mut self, pose: Pose) -> AnchorId {
        let anchor = AnchorId(self.allocate());
        self.anchors.insert(anchor, pose);
        self.journal.push(SceneCommand::CreateAnchor(anchor));
        log::trace!("Scene: anchor {anchor:?} created.");
        anchor
    }

    fn release_anchor(&mut self, anchor: AnchorId) {
        if self.anchors.remove(&anchor).is_none() {
            log::warn!("Scene: release of unknown anchor {anchor:?}.");
            return;
        }
        // Children go with their anchor.
        self.nodes.retain(|_, node| node.anchor != anchor);
        self.journal.push(SceneCommand::ReleaseAnchor(anchor));
        log::trace!("Scene: anchor {anchor:?} released.");
    }

    fn add_node(&mut self, anchor: AnchorId, transform: NodeTransform) -> NodeId {
        let node = NodeId(self.allocate());
        if !self.anchors.contains_key(&anchor) {
            log::warn!("Scene: node {node:?} added under unknown anchor {anchor:?}.");
        }
        self.nodes.insert(
            node,
            HeadlessNode {
                anchor,
                transform,
                renderable: None,
            },
        );
        self.journal.push(SceneCommand::AddNode(node, anchor));
        node
    }

    fn remove_node(&mut self, node: NodeId) {
        if self.nodes.remove(&node).is_some() {
            self.journal.push(SceneCommand::RemoveNode(node));
        }
    }

    fn attach_renderable(&mut self, node: NodeId, renderable: VideoRenderable) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            log::warn!("Scene: renderable for unknown node {node:?} dropped.");
            return;
        };
        self.journal
            .push(SceneCommand::AttachRenderable(node, renderable.texture));
        entry.renderable = Some(renderable);
    }

    fn detach_renderable(&mut self, node: NodeId) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            if entry.renderable.take().is_some() {
                self.journal.push(SceneCommand::DetachRenderable(node));
            }
        }
    }
}
