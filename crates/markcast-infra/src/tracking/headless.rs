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

//! A tracking engine stand-in that only records its configuration.
//!
//! Per-tick reports come from whoever drives the session (a script, a test),
//! so this engine never produces any itself.

use markcast_core::error::EngineError;
use markcast_core::tracking::{ImageDatabase, TrackingEngine};
use markcast_core::{FocusMode, TargetId};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct EngineState {
    focus_mode: Option<FocusMode>,
    database: Option<ImageDatabase>,
    attach_attempts: u32,
}

/// A shared view of a [`HeadlessEngine`]'s configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineProbe(Arc<Mutex<EngineState>>);

impl EngineProbe {
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The focus mode last requested, if any.
    pub fn focus_mode(&self) -> Option<FocusMode> {
        self.lock().focus_mode
    }

    /// The identities in the attached database, in registration order.
    pub fn registered_targets(&self) -> Vec<TargetId> {
        self.lock()
            .database
            .as_ref()
            .map(|db| db.entries().iter().map(|entry| entry.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns `true` once a database was accepted.
    pub fn has_database(&self) -> bool {
        self.lock().database.is_some()
    }

    /// Number of times a database was offered, accepted or not.
    pub fn attach_attempts(&self) -> u32 {
        self.lock().attach_attempts
    }
}

/// A [`TrackingEngine`] that accepts (or rejects) configuration in memory.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    probe: EngineProbe,
    rejection: Option<String>,
}

impl HeadlessEngine {
    /// Creates an engine that accepts any database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every database attachment fail with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            probe: EngineProbe::default(),
            rejection: Some(reason.into()),
        }
    }

    /// A handle onto this engine's configuration.
    pub fn probe(&self) -> EngineProbe {
        self.probe.clone()
    }
}

impl TrackingEngine for HeadlessEngine {
    fn set_focus_mode(&mut self, mode: FocusMode) {
        log::debug!("Engine: focus mode {mode:?}.");
        self.probe.lock().focus_mode = Some(mode);
    }

    fn attach_image_database(&mut self, database: ImageDatabase) -> Result<(), EngineError> {
        let mut state = self.probe.lock();
        state.attach_attempts += 1;
        if let Some(reason) = &self.rejection {
            return Err(EngineError::DatabaseRejected(reason.clone()));
        }
        log::debug!("Engine: image database with {} image(s) attached.", database.len());
        state.database = Some(database);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markcast_core::asset::{AssetHandle, ReferenceImage};

    fn database() -> ImageDatabase {
        let mut db = ImageDatabase::new();
        db.add_image(
            TargetId::new("poster.jpg"),
            AssetHandle::new(ReferenceImage {
                width: 1,
                height: 1,
                pixels: vec![255; 4],
            }),
        );
        db
    }

    #[test]
    fn test_accepts_database() {
        let mut engine = HeadlessEngine::new();
        let probe = engine.probe();

        engine.set_focus_mode(FocusMode::Auto);
        engine.attach_image_database(database()).unwrap();

        assert_eq!(probe.focus_mode(), Some(FocusMode::Auto));
        assert_eq!(probe.registered_targets(), vec![TargetId::new("poster.jpg")]);
    }

    #[test]
    fn test_rejecting_engine_keeps_no_database() {
        let mut engine = HeadlessEngine::rejecting("quota exceeded");
        let probe = engine.probe();

        let result = engine.attach_image_database(database());

        assert!(matches!(result, Err(EngineError::DatabaseRejected(r)) if r == "quota exceeded"));
        assert!(!probe.has_database());
        assert_eq!(probe.attach_attempts(), 1);
    }
}
