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

//! # Markcast Core
//!
//! Foundational crate containing the math primitives, core types, and the
//! interface contracts of every collaborator the overlay pipeline talks to:
//! the tracking engine, the scene graph, the media subsystem, the UI chrome,
//! and the asset source.
//!
//! Nothing in here knows how a frame is tracked or rendered. Concrete
//! implementations live in `markcast-infra` (or in the host application).

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod error;
pub mod math;
pub mod media;
pub mod scene;
pub mod tracking;
pub mod ui;

pub use config::{FocusMode, SessionSettings};
pub use error::{AssetLoadError, EngineError, MediaError};
pub use tracking::{RawTrackedTarget, TargetExtent, TargetId, TrackingEvent, TrackingState};
