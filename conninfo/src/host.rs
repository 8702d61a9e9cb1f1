//! Host-facing interfaces consumed by the filter.
//!
//! The surrounding proxy owns the property store and the logging sink; this
//! module defines the two traits the filter talks to them through, plus a
//! small in-memory store for tests and embedding demos.

use bytes::Bytes;
use conninfo_core::{PropertyError, PropertyPath};

/// Read-only access to the host's connection property store.
///
/// The filter only ever asks for the four well-known paths in
/// [`conninfo_core::CONNECTION_PROPERTIES`]; arbitrary paths are not
/// validated here. A lookup is a synchronous host call that returns
/// data-or-absence immediately, never a network round trip.
pub trait PropertyStore {
    /// Look up one property by path.
    ///
    /// # Errors
    /// [`PropertyError`] when the property is absent or the host store
    /// reports a failure. Both are recoverable per-field conditions.
    fn lookup(&self, path: PropertyPath) -> Result<Bytes, PropertyError>;
}

/// Fire-and-forget consumer of pre-formatted report text.
pub trait LogSink {
    /// Accept one multi-line message. No return value is consulted.
    fn log(&self, message: &str);
}

/// [`LogSink`] adapter that forwards messages to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// In-memory [`PropertyStore`] for tests and local embedding.
///
/// Holds at most a handful of entries, so a linear scan beats a map.
#[derive(Clone, Debug, Default)]
pub struct MemoryPropertyStore {
    entries: Vec<(PropertyPath, Bytes)>,
}

impl MemoryPropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value at the same path.
    pub fn insert(&mut self, path: PropertyPath, value: impl Into<Bytes>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            entry.1 = value;
        } else {
            self.entries.push((path, value));
        }
    }

    /// Remove a property if present.
    pub fn remove(&mut self, path: PropertyPath) {
        self.entries.retain(|(p, _)| *p != path);
    }
}

impl PropertyStore for MemoryPropertyStore {
    fn lookup(&self, path: PropertyPath) -> Result<Bytes, PropertyError> {
        self.entries
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, v)| v.clone())
            .ok_or(PropertyError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conninfo_core::{SOURCE_ADDRESS, SOURCE_PORT};

    #[test]
    fn test_memory_store_lookup() {
        let mut store = MemoryPropertyStore::new();
        store.insert(SOURCE_ADDRESS, &b"10.0.0.1"[..]);

        assert_eq!(
            store.lookup(SOURCE_ADDRESS),
            Ok(Bytes::from_static(b"10.0.0.1"))
        );
        assert_eq!(store.lookup(SOURCE_PORT), Err(PropertyError::Unavailable));
    }

    #[test]
    fn test_memory_store_insert_replaces() {
        let mut store = MemoryPropertyStore::new();
        store.insert(SOURCE_PORT, vec![80, 0, 0, 0]);
        store.insert(SOURCE_PORT, vec![187, 1, 0, 0]);

        assert_eq!(
            store.lookup(SOURCE_PORT),
            Ok(Bytes::from(vec![187, 1, 0, 0]))
        );
    }

    #[test]
    fn test_memory_store_remove() {
        let mut store = MemoryPropertyStore::new();
        store.insert(SOURCE_ADDRESS, &b"10.0.0.1"[..]);
        store.remove(SOURCE_ADDRESS);

        assert_eq!(
            store.lookup(SOURCE_ADDRESS),
            Err(PropertyError::Unavailable)
        );
    }
}
