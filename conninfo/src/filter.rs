//! Per-exchange lifecycle handling.
//!
//! The host drives one filter per HTTP exchange through a fixed set of
//! phase callbacks. This module is purely observational: every callback
//! returns [`FilterAction::Continue`] — the filter never pauses, blocks,
//! or terminates the exchange.

use std::sync::Arc;

use crate::host::{LogSink, PropertyStore};
use crate::report::ConnectionReport;

/// Verdict returned from every phase callback.
///
/// Only one variant exists: this module never requests pause or
/// termination of the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterAction {
    Continue,
}

/// Verdict returned from plugin start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAction {
    Ok,
}

/// Lifecycle phase of one HTTP exchange.
///
/// Transitions are driven entirely by host events; the filter relays them
/// and never skips or reorders phases on its own. Trailer phases are
/// optional and may never arrive. `Done` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Created,
    RequestHeaders,
    RequestBody,
    ResponseHeaders,
    ResponseBody,
    RequestTrailers,
    ResponseTrailers,
    Done,
}

impl Phase {
    /// Phases at which the filter runs a retrieval cycle.
    fn reports(self) -> bool {
        matches!(
            self,
            Phase::RequestHeaders
                | Phase::RequestBody
                | Phase::ResponseHeaders
                | Phase::ResponseBody
        )
    }
}

/// Per-exchange callback surface the host drives.
///
/// One method per phase event, no default bodies: a filter that wants
/// no-op behavior is the explicit [`NullFilter`], not inherited defaults.
pub trait HttpFilter {
    fn on_request_headers(&mut self) -> FilterAction;
    fn on_request_body(&mut self) -> FilterAction;
    fn on_response_headers(&mut self) -> FilterAction;
    fn on_response_body(&mut self) -> FilterAction;
    fn on_request_trailers(&mut self) -> FilterAction;
    fn on_response_trailers(&mut self) -> FilterAction;
    /// Stream completion. After this the filter is eligible for disposal.
    fn on_done(&mut self);
}

/// No-op filter, selected by the plugin root when introspection is
/// disabled for the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFilter;

impl HttpFilter for NullFilter {
    fn on_request_headers(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_request_body(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_response_headers(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_response_body(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_request_trailers(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_response_trailers(&mut self) -> FilterAction {
        FilterAction::Continue
    }

    fn on_done(&mut self) {}
}

/// The introspecting exchange filter.
///
/// Owns its exchange's identity and phase exclusively; shares nothing
/// mutable with other exchanges. At each header/body phase it collects a
/// fresh [`ConnectionReport`] and hands the formatted text to the sink.
pub struct ConnectionFilter {
    context_id: u32,
    phase: Phase,
    store: Arc<dyn PropertyStore>,
    sink: Arc<dyn LogSink>,
}

impl ConnectionFilter {
    pub(crate) fn new(
        context_id: u32,
        store: Arc<dyn PropertyStore>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            context_id,
            phase: Phase::Created,
            store,
            sink,
        }
    }

    /// Host-assigned identity of this exchange.
    pub fn context_id(&self) -> u32 {
        self.context_id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn observe(&mut self, phase: Phase) -> FilterAction {
        // Events after teardown are ignored (early-teardown rule).
        if self.phase == Phase::Done {
            return FilterAction::Continue;
        }
        self.phase = phase;
        tracing::debug!(context_id = self.context_id, ?phase, "phase event");

        if phase.reports() {
            let report = ConnectionReport::collect(self.store.as_ref());
            self.sink.log(&report.to_string());
        }

        FilterAction::Continue
    }
}

impl HttpFilter for ConnectionFilter {
    fn on_request_headers(&mut self) -> FilterAction {
        self.observe(Phase::RequestHeaders)
    }

    fn on_request_body(&mut self) -> FilterAction {
        self.observe(Phase::RequestBody)
    }

    fn on_response_headers(&mut self) -> FilterAction {
        self.observe(Phase::ResponseHeaders)
    }

    fn on_response_body(&mut self) -> FilterAction {
        self.observe(Phase::ResponseBody)
    }

    fn on_request_trailers(&mut self) -> FilterAction {
        self.observe(Phase::RequestTrailers)
    }

    fn on_response_trailers(&mut self) -> FilterAction {
        self.observe(Phase::ResponseTrailers)
    }

    fn on_done(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        self.phase = Phase::Done;
        self.sink.log(&format!("exchange {} finished", self.context_id));
    }
}

/// A per-exchange filter as handed out by the plugin root: either the
/// introspecting filter or the explicit null variant.
pub enum ExchangeFilter {
    Introspect(ConnectionFilter),
    Null(NullFilter),
}

impl HttpFilter for ExchangeFilter {
    fn on_request_headers(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_request_headers(),
            ExchangeFilter::Null(f) => f.on_request_headers(),
        }
    }

    fn on_request_body(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_request_body(),
            ExchangeFilter::Null(f) => f.on_request_body(),
        }
    }

    fn on_response_headers(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_response_headers(),
            ExchangeFilter::Null(f) => f.on_response_headers(),
        }
    }

    fn on_response_body(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_response_body(),
            ExchangeFilter::Null(f) => f.on_response_body(),
        }
    }

    fn on_request_trailers(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_request_trailers(),
            ExchangeFilter::Null(f) => f.on_request_trailers(),
        }
    }

    fn on_response_trailers(&mut self) -> FilterAction {
        match self {
            ExchangeFilter::Introspect(f) => f.on_response_trailers(),
            ExchangeFilter::Null(f) => f.on_response_trailers(),
        }
    }

    fn on_done(&mut self) {
        match self {
            ExchangeFilter::Introspect(f) => f.on_done(),
            ExchangeFilter::Null(f) => f.on_done(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryPropertyStore;
    use conninfo_core::{SOURCE_ADDRESS, SOURCE_PORT};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        messages: RefCell<Vec<String>>,
    }

    impl LogSink for RecordingSink {
        fn log(&self, message: &str) {
            self.messages.borrow_mut().push(message.to_owned());
        }
    }

    fn filter_with(store: MemoryPropertyStore) -> (ConnectionFilter, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let filter = ConnectionFilter::new(7, Arc::new(store), sink.clone());
        (filter, sink)
    }

    #[test]
    fn test_phases_report_and_continue() {
        let mut store = MemoryPropertyStore::new();
        store.insert(SOURCE_ADDRESS, &b"10.0.0.1"[..]);
        store.insert(SOURCE_PORT, vec![80, 0, 0, 0]);
        let (mut filter, sink) = filter_with(store);

        assert_eq!(filter.phase(), Phase::Created);
        assert_eq!(filter.on_request_headers(), FilterAction::Continue);
        assert_eq!(filter.phase(), Phase::RequestHeaders);
        assert_eq!(filter.on_request_body(), FilterAction::Continue);
        assert_eq!(filter.on_response_headers(), FilterAction::Continue);
        assert_eq!(filter.on_response_body(), FilterAction::Continue);
        assert_eq!(filter.phase(), Phase::ResponseBody);

        let messages = sink.messages.borrow();
        assert_eq!(messages.len(), 4);
        assert!(messages.iter().all(|m| m.starts_with("connection properties:")));
        assert!(messages[0].contains("source.port: [80, 0, 0, 0] 80"));
    }

    #[test]
    fn test_trailers_are_pass_through() {
        let (mut filter, sink) = filter_with(MemoryPropertyStore::new());

        assert_eq!(filter.on_request_trailers(), FilterAction::Continue);
        assert_eq!(filter.phase(), Phase::RequestTrailers);
        assert_eq!(filter.on_response_trailers(), FilterAction::Continue);
        assert_eq!(filter.phase(), Phase::ResponseTrailers);
        assert!(sink.messages.borrow().is_empty());
    }

    #[test]
    fn test_done_logs_identity_once() {
        let (mut filter, sink) = filter_with(MemoryPropertyStore::new());

        filter.on_done();
        assert_eq!(filter.phase(), Phase::Done);
        filter.on_done();

        let messages = sink.messages.borrow();
        assert_eq!(messages.as_slice(), ["exchange 7 finished"]);
    }

    #[test]
    fn test_events_after_done_are_ignored() {
        let mut store = MemoryPropertyStore::new();
        store.insert(SOURCE_PORT, vec![80, 0, 0, 0]);
        let (mut filter, sink) = filter_with(store);

        filter.on_done();
        assert_eq!(filter.on_response_headers(), FilterAction::Continue);
        assert_eq!(filter.phase(), Phase::Done);

        // Only the identity log, no report after teardown.
        assert_eq!(sink.messages.borrow().len(), 1);
    }

    #[test]
    fn test_null_filter_is_silent() {
        let mut filter = NullFilter;

        assert_eq!(filter.on_request_headers(), FilterAction::Continue);
        assert_eq!(filter.on_request_body(), FilterAction::Continue);
        assert_eq!(filter.on_response_headers(), FilterAction::Continue);
        assert_eq!(filter.on_response_body(), FilterAction::Continue);
        assert_eq!(filter.on_request_trailers(), FilterAction::Continue);
        assert_eq!(filter.on_response_trailers(), FilterAction::Continue);
        filter.on_done();
    }
}
