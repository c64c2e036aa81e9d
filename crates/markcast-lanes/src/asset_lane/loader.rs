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

use markcast_core::asset::Asset;
use std::error::Error;

/// A trait for types that can load a specific kind of asset from a byte slice.
///
/// Implementors do the CPU-side work of parsing raw file data into an asset
/// of type `A`. Fetching the bytes is the caller's business.
pub trait AssetLoader<A: Asset> {
    /// Parses a byte slice into an instance of `A`.
    ///
    /// # Errors
    ///
    /// Returns a boxed, thread-safe error when the bytes are not a valid `A`.
    fn load(&self, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;
}
