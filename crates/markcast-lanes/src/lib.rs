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

//! # Markcast Lanes
//!
//! Stateless processing steps used by the agents.
//!
//! A lane does one job and holds no session state: the tracking lane
//! classifies raw engine reports, the spatial lane turns a pose and extent
//! into an anchor pose and node transform, and the asset lane decodes
//! reference images.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod spatial_lane;
pub mod tracking_lane;

pub use asset_lane::{AssetLoader, ReferenceImageLoader};
pub use spatial_lane::{SpatialBinding, SpatialBindingLane};
pub use tracking_lane::TrackingEventLane;
