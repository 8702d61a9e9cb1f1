//! Introspection report assembly and formatting.
//!
//! One report covers one retrieval cycle: four independent property
//! lookups, two port decodes, and a per-field outcome for each. Assembly
//! never fails outright — a fully-missing property set still produces a
//! report with every field marked failed.

use serde::Serialize;

use conninfo_core::{
    DESTINATION_ADDRESS, DESTINATION_PORT, PropertyPath, SOURCE_ADDRESS, SOURCE_PORT, decode_port,
};

use crate::host::PropertyStore;

/// Outcome of retrieving and decoding one connection property.
///
/// A failed lookup ([`Unavailable`](FieldOutcome::Unavailable)) and a
/// successful lookup that failed to decode
/// ([`Malformed`](FieldOutcome::Malformed)) are kept distinct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Lookup succeeded; the payload is reinterpreted as text, never
    /// decoded numerically.
    Address { raw: Vec<u8>, text: String },
    /// Lookup succeeded and the 4-byte little-endian buffer decoded.
    Port { raw: Vec<u8>, value: i32 },
    /// Lookup failed: property absent or host-side error.
    Unavailable { reason: String },
    /// Lookup succeeded but the payload did not decode.
    Malformed { raw: Vec<u8>, reason: String },
}

impl FieldOutcome {
    /// Whether the field was retrieved and decoded successfully.
    pub fn is_ok(&self) -> bool {
        matches!(self, FieldOutcome::Address { .. } | FieldOutcome::Port { .. })
    }
}

impl std::fmt::Display for FieldOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOutcome::Address { raw, text } => write!(f, "{raw:?} {text:?}"),
            FieldOutcome::Port { raw, value } => write!(f, "{raw:?} {value}"),
            FieldOutcome::Unavailable { reason } => write!(f, "<unavailable: {reason}>"),
            FieldOutcome::Malformed { raw, reason } => write!(f, "{raw:?} <malformed: {reason}>"),
        }
    }
}

/// One (path, outcome) entry of a report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportField {
    pub path: PropertyPath,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

impl ReportField {
    /// Retrieve an address property: raw bytes reinterpreted as text.
    fn address<S: PropertyStore + ?Sized>(store: &S, path: PropertyPath) -> Self {
        let outcome = match store.lookup(path) {
            Ok(raw) => FieldOutcome::Address {
                text: String::from_utf8_lossy(&raw).into_owned(),
                raw: raw.to_vec(),
            },
            Err(err) => FieldOutcome::Unavailable {
                reason: err.to_string(),
            },
        };
        Self { path, outcome }
    }

    /// Retrieve a port property: raw bytes fed through the port decoder
    /// only when the lookup itself succeeded.
    fn port<S: PropertyStore + ?Sized>(store: &S, path: PropertyPath) -> Self {
        let outcome = match store.lookup(path) {
            Ok(raw) => match decode_port(&raw) {
                Ok(value) => FieldOutcome::Port {
                    raw: raw.to_vec(),
                    value,
                },
                Err(err) => FieldOutcome::Malformed {
                    raw: raw.to_vec(),
                    reason: err.to_string(),
                },
            },
            Err(err) => FieldOutcome::Unavailable {
                reason: err.to_string(),
            },
        };
        Self { path, outcome }
    }
}

impl std::fmt::Display for ReportField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.outcome)
    }
}

/// One introspection pass over the four connection properties.
///
/// Ephemeral: produced, handed to the sink, dropped. Never retained
/// across phases — a later phase collects a fresh one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub source_address: ReportField,
    pub source_port: ReportField,
    pub destination_address: ReportField,
    pub destination_port: ReportField,
}

impl ConnectionReport {
    /// Run one retrieval cycle against the store.
    ///
    /// The four lookups are independent; a failure in one never prevents
    /// attempting the others. This call itself cannot fail.
    pub fn collect<S: PropertyStore + ?Sized>(store: &S) -> Self {
        Self {
            source_address: ReportField::address(store, SOURCE_ADDRESS),
            source_port: ReportField::port(store, SOURCE_PORT),
            destination_address: ReportField::address(store, DESTINATION_ADDRESS),
            destination_port: ReportField::port(store, DESTINATION_PORT),
        }
    }

    /// The four fields in report order.
    pub fn fields(&self) -> [&ReportField; 4] {
        [
            &self.source_address,
            &self.source_port,
            &self.destination_address,
            &self.destination_port,
        ]
    }
}

impl std::fmt::Display for ConnectionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "connection properties:")?;
        for field in self.fields() {
            write!(f, "\n  {field}")?;
        }
        Ok(())
    }
}
