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

//! Concrete [`AssetSource`] implementations.

use markcast_core::asset::AssetSource;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Serves assets from a directory on disk.
///
/// Names are resolved relative to the root. Names that would escape the root
/// (absolute paths, `..`) are refused.
#[derive(Debug, Clone)]
pub struct DirectoryAssetSource {
    root: PathBuf,
}

impl DirectoryAssetSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let relative = Path::new(name);
        let is_contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !is_contained {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset name '{name}' escapes the asset root"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetSource for DirectoryAssetSource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(name)?;
        log::trace!("Reading asset '{name}' from {}", path.display());
        std::fs::read(path)
    }
}

/// Serves assets from memory. Handy for embedded content and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryAssetSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an asset.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(name.into(), bytes);
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.entries.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no asset named '{name}'"))
        })
    }
}
