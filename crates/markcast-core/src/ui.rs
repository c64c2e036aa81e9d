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

//! The UI chrome the overlay pipeline drives: the "fit to scan" prompt and
//! transient status messages.

/// Shown when a target was seen but the engine paused tracking it.
pub const MSG_TARGET_PAUSED: &str = "Marker image detected, keep the camera steady";

/// Shown once when the image database could not be configured.
pub const MSG_DATABASE_SETUP_FAILED: &str = "Could not setup augmented image database";

/// Shown when the video for a detected target could not be opened.
pub const MSG_VIDEO_UNAVAILABLE: &str = "Could not start video playback";

/// Host-side UI surface.
pub trait UiChrome: Send {
    /// Shows or hides the "fit the image in the frame" prompt.
    fn set_scan_prompt_visible(&mut self, visible: bool);

    /// Shows a transient informational message.
    fn show_message(&mut self, message: &str);

    /// Shows a transient error message.
    fn show_error(&mut self, message: &str);
}
