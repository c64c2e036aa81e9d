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

use markcast_core::math::LinearRgba;
use markcast_core::media::ExternalTextureId;
use markcast_core::scene::{VideoMaterial, VideoRenderable};
use markcast_core::SessionSettings;

/// What an overlay shows: the clip, the model it plays on, and how it loops.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    /// The media asset opened for every new overlay.
    pub video_asset: String,
    /// The model asset providing the video plane.
    pub video_model: String,
    /// The chroma-key material applied to the plane.
    pub material: VideoMaterial,
    /// Whether playback loops.
    pub looping: bool,
}

impl OverlayContent {
    /// Creates content for `video_asset` on `video_model`, keying out `key_color`.
    pub fn new(
        video_asset: impl Into<String>,
        video_model: impl Into<String>,
        key_color: LinearRgba,
        looping: bool,
    ) -> Self {
        Self {
            video_asset: video_asset.into(),
            video_model: video_model.into(),
            material: VideoMaterial::chroma_key(key_color),
            looping,
        }
    }

    /// Extracts the overlay content from the session settings.
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(
            settings.video_asset.clone(),
            settings.video_model.clone(),
            settings.key_color,
            settings.looping,
        )
    }

    /// Builds the renderable for a stream decoding into `texture`.
    pub fn renderable(&self, texture: ExternalTextureId) -> VideoRenderable {
        VideoRenderable {
            model: self.video_model.clone(),
            texture,
            material: self.material.clone(),
        }
    }
}

impl Default for OverlayContent {
    fn default() -> Self {
        Self::from_settings(&SessionSettings::default())
    }
}
