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

//! Reference image decoding.

use super::AssetLoader;
use anyhow::Context;
use markcast_core::asset::ReferenceImage;

/// Decodes JPEG/PNG reference images into RGBA8 pixel buffers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceImageLoader;

impl AssetLoader<ReferenceImage> for ReferenceImageLoader {
    fn load(
        &self,
        bytes: &[u8],
    ) -> Result<ReferenceImage, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err("reference image has no pixels".into());
        }
        log::debug!("Decoded reference image ({width}x{height})");

        Ok(ReferenceImage {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}
