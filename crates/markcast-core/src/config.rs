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

//! Session configuration.
//!
//! Settings are plain `serde` data so hosts can ship them as a RON file next
//! to their assets. Every field has a default matching the bundled demo
//! content, so an empty `()` document is a valid configuration.

use crate::math::LinearRgba;
use serde::{Deserialize, Serialize};

/// Camera focus behaviour requested from the tracking engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusMode {
    /// Focus stays at the engine's fixed distance.
    Fixed,
    /// Continuous autofocus. Keeps a static image sharp at varying distances.
    #[default]
    Auto,
}

/// Everything a session needs to know about its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Asset names of the reference images to register. The asset name doubles
    /// as the target identity.
    pub marker_images: Vec<String>,
    /// The media asset played on the overlay.
    pub video_asset: String,
    /// The model asset providing the video plane.
    pub video_model: String,
    /// The colour keyed out of the video.
    pub key_color: LinearRgba,
    /// The requested focus mode.
    pub focus_mode: FocusMode,
    /// Whether the clip loops while the target stays visible.
    pub looping: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            marker_images: vec!["for_bigger_blazes.jpg".to_owned()],
            video_asset: "for_bigger_blazes.mp4".to_owned(),
            video_model: "chroma_key_video.sfb".to_owned(),
            key_color: LinearRgba::CHROMA_GREEN,
            focus_mode: FocusMode::Auto,
            looping: true,
        }
    }
}

impl SessionSettings {
    /// Parses settings from a RON document.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the document is not valid RON for this type.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}
