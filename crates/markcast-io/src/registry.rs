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

//! The registry of reference images a session detects.

use markcast_core::asset::{AssetHandle, AssetSource};
use markcast_core::error::AssetLoadError;
use markcast_core::tracking::{ImageDatabase, ReferenceTarget, TargetId};
use markcast_lanes::asset_lane::{AssetLoader, ReferenceImageLoader};

/// Owns the reference targets for the lifetime of a session.
///
/// Targets are immutable once loaded. The asset name is used as the target
/// identity, which is also what the engine reports back when it matches one.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<ReferenceTarget>,
}

impl TargetRegistry {
    /// Loads and decodes every named image from `source`.
    ///
    /// Loading is all-or-nothing: the first unreadable or undecodable asset
    /// aborts the whole registry.
    ///
    /// # Errors
    ///
    /// Returns [`AssetLoadError::Read`] or [`AssetLoadError::Decode`] naming
    /// the offending asset.
    pub fn load<S: AsRef<str>>(
        source: &dyn AssetSource,
        names: &[S],
    ) -> Result<Self, AssetLoadError> {
        let loader = ReferenceImageLoader;
        let mut targets = Vec::with_capacity(names.len());

        for name in names.iter().map(AsRef::as_ref) {
            let bytes = source.read(name).map_err(|source| AssetLoadError::Read {
                name: name.to_owned(),
                source,
            })?;
            let image = loader
                .load(&bytes)
                .map_err(|source| AssetLoadError::Decode {
                    name: name.to_owned(),
                    source,
                })?;
            log::info!(
                "Registered reference image '{name}' ({}x{})",
                image.width,
                image.height
            );
            targets.push(ReferenceTarget {
                id: TargetId::new(name),
                image: AssetHandle::new(image),
            });
        }

        Ok(Self { targets })
    }

    /// Creates a registry from already-decoded targets.
    pub fn from_targets(targets: Vec<ReferenceTarget>) -> Self {
        Self { targets }
    }

    /// All registered targets, in registration order.
    pub fn targets(&self) -> &[ReferenceTarget] {
        &self.targets
    }

    /// Looks up a target by identity.
    pub fn get(&self, id: &TargetId) -> Option<&ReferenceTarget> {
        self.targets.iter().find(|t| &t.id == id)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Builds the database handed to the tracking engine. Image data is shared,
    /// not copied.
    pub fn image_database(&self) -> ImageDatabase {
        let mut database = ImageDatabase::new();
        for target in &self.targets {
            database.add_image(target.id.clone(), target.image.clone());
        }
        database
    }
}
