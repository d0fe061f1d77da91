//! Error types for transaction decoding

use thiserror::Error;

/// Errors that can occur while decoding a transaction
///
/// Decoding is best-effort: every error here is recovered locally and its
/// `Display` text becomes the annotation body, so a malformed transaction
/// still yields a readable result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Opcode not present in the active command table
    #[error("0x{0:02x} (unknown command)")]
    UnknownOpcode(u8),
}
