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

//! Provides the small set of 3D math primitives the overlay pipeline needs.
//!
//! Poses reported by the tracking engine, render-node transforms, and the
//! chroma-key colour are all expressed with the types in this module.
//!
//! All angular functions in this module operate in **radians** by default, unless
//! explicitly specified otherwise (e.g., `degrees_to_radians`).

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;

pub mod color;
pub mod pose;
pub mod quaternion;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::pose::Pose;
pub use self::quaternion::Quaternion;
pub use self::vector::Vec3;

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use markcast_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}
