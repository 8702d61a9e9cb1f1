//! Little-endian port decoding.
//!
//! The host's property store serves port numbers as fixed-width binary
//! buffers:
//!
//! ```text
//! [value:4, unsigned, little-endian]
//! ```
//!
//! Downstream consumers expect a signed integer, so decoding rejects any
//! value that would not fit an `i32`. Real ports never exceed 65535, which
//! makes the bound deliberately looser than the semantic range; the check
//! defends against a corrupted or misinterpreted property, not against
//! out-of-range ports.

use crate::error::PortDecodeError;

/// Exact length of a port property buffer.
pub const PORT_PROPERTY_LEN: usize = 4;

/// Decode a port property buffer into a host integer.
///
/// The buffer must be exactly [`PORT_PROPERTY_LEN`] bytes, interpreted as
/// an unsigned 32-bit little-endian integer.
///
/// # Errors
/// - [`PortDecodeError::Truncated`] if the buffer length is wrong
/// - [`PortDecodeError::Overflow`] if the value exceeds `i32::MAX`
pub fn decode_port(buf: &[u8]) -> Result<i32, PortDecodeError> {
    let bytes: [u8; PORT_PROPERTY_LEN] = buf
        .try_into()
        .map_err(|_| PortDecodeError::Truncated { actual: buf.len() })?;

    let value = u32::from_le_bytes(bytes);
    if value > i32::MAX as u32 {
        return Err(PortDecodeError::Overflow(value));
    }

    Ok(value as i32)
}
