//! Property lookup and port decode error types.
//!
//! Both error kinds are local, per-field conditions: a failed lookup or a
//! malformed port buffer degrades one field of the report and never stops
//! exchange processing.

use crate::port::PORT_PROPERTY_LEN;

/// A property lookup against the host's property store failed.
///
/// Lookups are read-only and failures are always recoverable: the caller
/// records the field as unavailable and moves on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The property is not set for this exchange.
    #[error("property not available")]
    Unavailable,

    /// The host-side store reported an error.
    #[error("property store error: {0}")]
    Host(String),
}

/// Decoding a port property buffer failed.
///
/// Reported distinctly from [`PropertyError`] so a missing property and a
/// present-but-corrupt one stay distinguishable in the report.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PortDecodeError {
    /// The buffer is not exactly [`PORT_PROPERTY_LEN`] bytes.
    #[error("port property must be {PORT_PROPERTY_LEN} bytes, got {actual}")]
    Truncated { actual: usize },

    /// The decoded value does not fit a signed 32-bit integer.
    #[error("port value {0} exceeds i32::MAX")]
    Overflow(u32),
}
