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

//! The overlay state machine.
//!
//! At most one overlay exists at a time. It is spawned by the first target
//! detected while idle, follows that target only, and is torn down when the
//! engine stops tracking it.

mod agent;
mod content;
mod state;

pub use agent::OverlayAgent;
pub use content::OverlayContent;
pub use state::{ActiveOverlay, OverlayState};
