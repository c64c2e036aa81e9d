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

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// A cancellable one-shot flag shared between the tick loop and a callback.
///
/// The gate starts pending. Exactly one of `try_fire` or `cancel` wins the
/// transition out of pending; every later attempt to fire fails. Clones share
/// the same state.
#[derive(Debug, Clone, Default)]
pub struct FrameGate(Arc<AtomicU8>);

impl FrameGate {
    /// Creates a pending gate.
    pub fn new() -> Self {
        Self(Arc::new(AtomicU8::new(PENDING)))
    }

    /// Fires the gate. Returns `true` only for the single call that moved it
    /// out of pending.
    pub fn try_fire(&self) -> bool {
        self.0
            .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Cancels the gate, whatever its current state. Returns `true` if it was
    /// still pending, i.e. the callback never got through.
    pub fn cancel(&self) -> bool {
        self.0.swap(CANCELLED, Ordering::AcqRel) == PENDING
    }

    /// Returns `true` once the gate has fired and has not been cancelled since.
    pub fn is_fired(&self) -> bool {
        self.0.load(Ordering::Acquire) == FIRED
    }

    /// Returns `true` once the gate has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire) == CANCELLED
    }
}
