//! # conninfo
//!
//! Connection-property introspection for proxy HTTP filters.
//!
//! A proxy host drives one filter per HTTP exchange through lifecycle
//! callbacks. At each header and body phase the filter queries the host's
//! property store for the four connection properties (source/destination
//! address and port), decodes the ports from their 4-byte little-endian
//! representation, and hands a best-effort report to the logging sink.
//! Missing or malformed properties degrade individual report fields; they
//! never stop exchange processing.
//!
//! ## Modules
//!
//! - [`host`]: Traits the surrounding proxy implements (store, sink)
//! - [`report`]: Report assembly and formatting
//! - [`filter`]: Per-exchange lifecycle state machine
//! - [`root`]: Process-wide filter factory
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use conninfo::{HttpFilter, MemoryPropertyStore, PluginRoot, RootConfig, TracingLogSink};
//! use conninfo::{SOURCE_ADDRESS, SOURCE_PORT};
//!
//! let mut store = MemoryPropertyStore::new();
//! store.insert(SOURCE_ADDRESS, &b"10.0.0.1"[..]);
//! store.insert(SOURCE_PORT, vec![80, 0, 0, 0]);
//!
//! let root = PluginRoot::new(RootConfig::default(), Arc::new(store), Arc::new(TracingLogSink));
//! root.on_plugin_start();
//!
//! let mut filter = root.create_filter(1);
//! filter.on_request_headers();
//! filter.on_done();
//! ```

pub mod filter;
pub mod host;
pub mod report;
pub mod root;

pub use filter::{
    ConnectionFilter, ExchangeFilter, FilterAction, HttpFilter, NullFilter, Phase, StartAction,
};
pub use host::{LogSink, MemoryPropertyStore, PropertyStore, TracingLogSink};
pub use report::{ConnectionReport, FieldOutcome, ReportField};
pub use root::{PluginRoot, RootConfig};

// Re-export the core types embedders need alongside the filter.
pub use conninfo_core::{
    CONNECTION_PROPERTIES, DESTINATION_ADDRESS, DESTINATION_PORT, PORT_PROPERTY_LEN,
    PortDecodeError, PropertyError, PropertyPath, SOURCE_ADDRESS, SOURCE_PORT, decode_port,
};
