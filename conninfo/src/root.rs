//! Plugin root: process-wide factory for per-exchange filters.
//!
//! One [`PluginRoot`] is created explicitly at process start with the
//! host's store and sink handles, and torn down at process exit. Nothing
//! in this crate reaches it through globals; all interaction is explicit
//! construction calls.

use std::sync::Arc;

use crate::filter::{ConnectionFilter, ExchangeFilter, NullFilter, StartAction};
use crate::host::{LogSink, PropertyStore};

/// Process-wide configuration for the plugin root.
#[derive(Clone, Copy, Debug)]
pub struct RootConfig {
    /// When false, exchanges get the explicit [`NullFilter`] and no
    /// property lookups are ever issued.
    pub introspection: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            introspection: true,
        }
    }
}

/// Process-wide singleton owning filter creation.
///
/// Its only responsibility is exchange-filter factory behavior; it holds
/// no per-exchange state.
pub struct PluginRoot {
    config: RootConfig,
    store: Arc<dyn PropertyStore>,
    sink: Arc<dyn LogSink>,
}

impl PluginRoot {
    /// Create the root with the host's property store and logging sink.
    pub fn new(config: RootConfig, store: Arc<dyn PropertyStore>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            config,
            store,
            sink,
        }
    }

    /// Plugin start callback. Always succeeds.
    pub fn on_plugin_start(&self) -> StartAction {
        tracing::info!(introspection = self.config.introspection, "plugin started");
        StartAction::Ok
    }

    /// Instantiate one filter for a new inbound exchange.
    ///
    /// `context_id` is the opaque identity the host assigned to the
    /// exchange at creation.
    pub fn create_filter(&self, context_id: u32) -> ExchangeFilter {
        if self.config.introspection {
            ExchangeFilter::Introspect(ConnectionFilter::new(
                context_id,
                Arc::clone(&self.store),
                Arc::clone(&self.sink),
            ))
        } else {
            ExchangeFilter::Null(NullFilter)
        }
    }
}
