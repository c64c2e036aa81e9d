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

//! Counters reported by the overlay agent.

use markcast_telemetry::{CounterHandle, MetricId, MetricsError, MetricsRegistry};

const NAMESPACE: &str = "overlay";

/// The counters the overlay agent and its synchronizer update.
#[derive(Debug, Clone)]
pub struct OverlayMetrics {
    /// Overlays spawned.
    pub spawned: CounterHandle,
    /// Overlays torn down.
    pub torn_down: CounterHandle,
    /// Frame-available callbacks that arrived after their overlay was gone.
    pub stale_frames: CounterHandle,
    /// "Target paused" notices surfaced.
    pub paused_notices: CounterHandle,
    /// Events dropped because they referenced an unbound or mismatched target.
    pub ignored_events: CounterHandle,
}

impl OverlayMetrics {
    /// Registers the counters in `registry` under the `overlay` namespace.
    pub fn register(registry: &MetricsRegistry) -> Result<Self, MetricsError> {
        Ok(Self {
            spawned: registry.register_counter(NAMESPACE, "spawned")?,
            torn_down: registry.register_counter(NAMESPACE, "torn_down")?,
            stale_frames: registry.register_counter(NAMESPACE, "stale_frames")?,
            paused_notices: registry.register_counter(NAMESPACE, "paused_notices")?,
            ignored_events: registry.register_counter(NAMESPACE, "ignored_events")?,
        })
    }

    /// Counters that belong to no registry.
    pub fn detached() -> Self {
        let counter = |name| CounterHandle::detached(MetricId::new(NAMESPACE, name));
        Self {
            spawned: counter("spawned"),
            torn_down: counter("torn_down"),
            stale_frames: counter("stale_frames"),
            paused_notices: counter("paused_notices"),
            ignored_events: counter("ignored_events"),
        }
    }
}

impl Default for OverlayMetrics {
    fn default() -> Self {
        Self::detached()
    }
}
