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

//! Registry for named counters.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// A structured identifier for a metric: a namespace and a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    /// The broad category of the metric (e.g., "overlay").
    pub namespace: String,
    /// The specific name of the metric (e.g., "spawned").
    pub name: String,
}

impl MetricId {
    /// Creates a new `MetricId`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Errors returned by the registry.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// The lock protecting the registry was poisoned by a panicking writer.
    #[error("metrics storage lock poisoned")]
    StoragePoisoned,
    /// No metric is registered under that id.
    #[error("metric {0} not found")]
    NotFound(MetricId),
}

/// A cheap, cloneable handle to a registered counter.
///
/// Increments are lock-free and may happen from any thread.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    value: Arc<AtomicU64>,
}

impl CounterHandle {
    /// Creates a counter that is not attached to any registry.
    pub fn detached(id: MetricId) -> Self {
        Self {
            id,
            value: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Adds one to the counter and returns the new value.
    pub fn increment(&self) -> u64 {
        self.add(1)
    }

    /// Adds `delta` to the counter and returns the new value.
    pub fn add(&self, delta: u64) -> u64 {
        self.value.fetch_add(delta, Ordering::Relaxed) + delta
    }

    /// Reads the current value.
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// The id this counter is registered under.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Central registry of counters.
///
/// Registering the same id twice returns a handle to the same counter.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    counters: RwLock<HashMap<MetricId, CounterHandle>>,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or looks up) a counter.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<CounterHandle, MetricsError> {
        let id = MetricId::new(namespace, name);
        let mut counters = self
            .counters
            .write()
            .map_err(|_| MetricsError::StoragePoisoned)?;
        let handle = counters
            .entry(id.clone())
            .or_insert_with(|| CounterHandle::detached(id));
        Ok(handle.clone())
    }

    /// Reads a counter by id.
    pub fn counter_value(&self, id: &MetricId) -> Result<u64, MetricsError> {
        let counters = self
            .counters
            .read()
            .map_err(|_| MetricsError::StoragePoisoned)?;
        counters
            .get(id)
            .map(CounterHandle::get)
            .ok_or_else(|| MetricsError::NotFound(id.clone()))
    }

    /// Returns every counter as `(id, value)`, sorted by id.
    pub fn snapshot(&self) -> Vec<(MetricId, u64)> {
        let Ok(counters) = self.counters.read() else {
            return Vec::new();
        };
        let mut values: Vec<_> = counters
            .iter()
            .map(|(id, handle)| (id.clone(), handle.get()))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }

    /// Logs every counter at `info` level.
    pub fn log_summary(&self) {
        log::info!("--- Telemetry Summary ---");
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            log::info!("  No counters registered.");
        }
        for (id, value) in snapshot {
            log::info!("  {id}: {value}");
        }
        log::info!("-------------------------");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_register_is_idempotent() {
        let registry = MetricsRegistry::new();
        let a = registry.register_counter("overlay", "spawned").unwrap();
        let b = registry.register_counter("overlay", "spawned").unwrap();
        a.increment();
        b.increment();
        assert_eq!(a.get(), 2);
        assert_eq!(
            registry
                .counter_value(&MetricId::new("overlay", "spawned"))
                .unwrap(),
            2
        );
    }

    #[test]
    fn test_unknown_counter() {
        let registry = MetricsRegistry::new();
        assert!(matches!(
            registry.counter_value(&MetricId::new("x", "y")),
            Err(MetricsError::NotFound(_))
        ));
    }

    #[test]
    fn test_concurrent_increments() {
        let registry = MetricsRegistry::new();
        let counter = registry.register_counter("overlay", "stale_frames").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let c = counter.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        c.increment();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(counter.get(), 400);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let registry = MetricsRegistry::new();
        registry.register_counter("overlay", "torn_down").unwrap();
        registry.register_counter("overlay", "spawned").unwrap().add(3);
        let names: Vec<_> = registry
            .snapshot()
            .into_iter()
            .map(|(id, v)| (id.name, v))
            .collect();
        assert_eq!(
            names,
            vec![("spawned".to_owned(), 3), ("torn_down".to_owned(), 0)]
        );
    }
}
