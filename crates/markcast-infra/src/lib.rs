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

//! # Markcast Infra
//!
//! Concrete implementations of the collaborator contracts defined in
//! `markcast-core`.
//!
//! Everything here runs headless: an in-memory scene graph, a simulated media
//! backend whose decoder threads report frames on a timer, a UI surface that
//! records and logs what it is asked to show, and a tracking engine stand-in
//! that records its configuration. Hosts with a real engine, renderer and
//! decoder provide their own implementations of the same traits.

#![warn(missing_docs)]

pub mod media;
pub mod scene;
pub mod tracking;
pub mod ui;

pub use media::{SimulatedMediaBackend, StreamProbe, StreamProbes};
pub use scene::{HeadlessNode, HeadlessScene, SceneCommand};
pub use tracking::{EngineProbe, HeadlessEngine};
pub use ui::{RecordingUi, UiEvent, UiJournal};
