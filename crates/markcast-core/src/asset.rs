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

//! Provides the foundational asset types: the [`Asset`] marker, the shared
//! [`AssetHandle`], the decoded [`ReferenceImage`], and the [`AssetSource`]
//! contract used to fetch raw bytes.

use std::{io, ops::Deref, sync::Arc};

/// A marker trait for types that can be managed by the asset system.
///
/// `Send + Sync + 'static` lets handles cross into engine-owned threads.
pub trait Asset: Send + Sync + 'static {}

/// A thread-safe, reference-counted handle to a loaded asset.
///
/// Cloning a handle only increments the reference count.
#[derive(Debug)]
pub struct AssetHandle<T: Asset>(Arc<T>);

impl<T: Asset> AssetHandle<T> {
    /// Creates a new `AssetHandle` that takes ownership of the asset data.
    pub fn new(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    /// Returns `true` if both handles point at the same loaded asset.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A decoded reference image, stored as tightly packed RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes of RGBA8 data.
    pub pixels: Vec<u8>,
}

impl Asset for ReferenceImage {}

impl ReferenceImage {
    /// Returns the number of bytes a well-formed image of this size holds.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// A read-only store of named assets (an APK asset folder, a directory on disk...).
pub trait AssetSource: Send + Sync {
    /// Reads the full contents of the asset called `name`.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}
