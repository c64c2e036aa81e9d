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

//! A UI surface that logs and records every request.

use markcast_core::ui::UiChrome;
use std::sync::{Arc, Mutex, MutexGuard};

/// A request made to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The scan prompt was shown (`true`) or hidden (`false`).
    ScanPrompt(bool),
    /// An informational message was shown.
    Message(String),
    /// An error message was shown.
    Error(String),
}

#[derive(Debug, Default)]
struct JournalState {
    prompt_visible: bool,
    events: Vec<UiEvent>,
}

/// A shared view of what a [`RecordingUi`] was asked to show.
#[derive(Debug, Clone, Default)]
pub struct UiJournal(Arc<Mutex<JournalState>>);

impl UiJournal {
    fn lock(&self) -> MutexGuard<'_, JournalState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Whether the scan prompt is currently visible.
    pub fn prompt_visible(&self) -> bool {
        self.lock().prompt_visible
    }

    /// Every request so far, in order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.lock().events.clone()
    }

    /// The error messages shown so far.
    pub fn errors(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                UiEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// The informational messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .events
            .iter()
            .filter_map(|event| match event {
                UiEvent::Message(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: UiEvent) {
        let mut state = self.lock();
        if let UiEvent::ScanPrompt(visible) = event {
            state.prompt_visible = visible;
        }
        state.events.push(event);
    }
}

/// A [`UiChrome`] that writes to the log and keeps a [`UiJournal`].
#[derive(Debug, Default)]
pub struct RecordingUi {
    journal: UiJournal,
}

impl RecordingUi {
    /// Creates a UI with the prompt hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto this UI's journal.
    pub fn journal(&self) -> UiJournal {
        self.journal.clone()
    }
}

impl UiChrome for RecordingUi {
    fn set_scan_prompt_visible(&mut self, visible: bool) {
        if self.journal.prompt_visible() != visible {
            log::info!(
                "[ui] scan prompt {}",
                if visible { "shown" } else { "hidden" }
            );
        }
        self.journal.record(UiEvent::ScanPrompt(visible));
    }

    fn show_message(&mut self, message: &str) {
        log::info!("[ui] {message}");
        self.journal.record(UiEvent::Message(message.to_owned()));
    }

    fn show_error(&mut self, message: &str) {
        log::error!("[ui] {message}");
        self.journal.record(UiEvent::Error(message.to_owned()));
    }
}
