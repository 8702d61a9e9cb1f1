//! Well-known connection property paths.
//!
//! A property path is an ordered sequence of string segments identifying a
//! piece of connection metadata in the host's property store. This module
//! only knows the four paths the filter ever asks for; it is a thin typed
//! layer over the store's generic segment-list lookup.

use serde::{Serialize, Serializer};

/// An ordered sequence of string segments addressing one connection
/// property (e.g. `["source", "address"]`).
///
/// Paths are compile-time constants; the filter never constructs one at
/// runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyPath {
    segments: &'static [&'static str],
}

impl PropertyPath {
    /// Create a path from its segments.
    pub const fn new(segments: &'static [&'static str]) -> Self {
        Self { segments }
    }

    /// The ordered segments of this path.
    pub fn segments(&self) -> &'static [&'static str] {
        self.segments
    }
}

impl std::fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for PropertyPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Address of the downstream peer.
pub const SOURCE_ADDRESS: PropertyPath = PropertyPath::new(&["source", "address"]);

/// Port of the downstream peer (4-byte little-endian buffer).
pub const SOURCE_PORT: PropertyPath = PropertyPath::new(&["source", "port"]);

/// Address of the upstream destination.
pub const DESTINATION_ADDRESS: PropertyPath = PropertyPath::new(&["destination", "address"]);

/// Port of the upstream destination (4-byte little-endian buffer).
pub const DESTINATION_PORT: PropertyPath = PropertyPath::new(&["destination", "port"]);

/// The four connection properties, in report order.
pub const CONNECTION_PROPERTIES: [PropertyPath; 4] = [
    SOURCE_ADDRESS,
    SOURCE_PORT,
    DESTINATION_ADDRESS,
    DESTINATION_PORT,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        assert_eq!(SOURCE_ADDRESS.to_string(), "source.address");
        assert_eq!(DESTINATION_PORT.to_string(), "destination.port");
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(SOURCE_PORT.segments(), ["source", "port"]);
        assert_eq!(DESTINATION_ADDRESS.segments(), ["destination", "address"]);
    }

    #[test]
    fn test_report_order() {
        let rendered: Vec<String> = CONNECTION_PROPERTIES
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            rendered,
            [
                "source.address",
                "source.port",
                "destination.address",
                "destination.port"
            ]
        );
    }

    #[test]
    fn test_path_serialize() {
        let json = serde_json::to_string(&SOURCE_PORT).unwrap();
        assert_eq!(json, "\"source.port\"");
    }
}
