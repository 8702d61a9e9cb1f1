//! Core connection-property types for conninfo.
//!
//! This crate provides the host-independent pieces shared by the filter
//! (`conninfo`) and by embedders that talk to a property store directly.
//!
//! ## Modules
//!
//! - [`error`]: Property lookup and port decode error types
//! - [`path`]: Well-known connection property paths
//! - [`port`]: Little-endian port decoding

mod error;
mod path;
mod port;

pub use error::*;
pub use path::*;
pub use port::*;
