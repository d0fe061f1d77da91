//! Table-driven command dispatch
//!
//! A [`CommandTable`] is plain static data: one [`CommandDescriptor`] per
//! opcode plus a register-name table. The two published table generations are
//! two instances of this type ([`crate::legacy::TABLE`],
//! [`crate::extended::TABLE`]) driving the same dispatch path, so a protocol
//! revision is a new data instance rather than a fork of the engine.
//!
//! Payload decoders receive an [`Exchange`]: the paired MOSI/MISO slices of
//! one transaction (opcode at MOSI index 0) plus the active table for
//! register-name lookups. All accessors are total — out-of-range reads return
//! `None` and decoders substitute an inline fallback for just that field.

use std::ops::Range;

use tracing::debug;

use crate::error::DecodeError;
use crate::fields::Status;
use crate::DecodeCtx;

/// Payload decoder: pure except for the packet-type context update performed
/// by the set/get packet type commands
pub type DecodeFn = fn(&mut DecodeCtx, &Exchange<'_>) -> String;

/// One transaction's paired byte sequences, as seen by a payload decoder
#[derive(Clone, Copy)]
pub struct Exchange<'a> {
    /// Host-to-device bytes, opcode at index 0
    pub mosi: &'a [u8],
    /// Device-to-host bytes, paired index-by-index with `mosi`
    pub miso: &'a [u8],
    /// Active command table, for register-name lookups
    pub table: &'a CommandTable,
}

impl Exchange<'_> {
    /// Command opcode (first MOSI byte; 0 for an empty sequence)
    pub fn opcode(&self) -> u8 {
        self.mosi.first().copied().unwrap_or(0)
    }

    pub fn mosi_u8(&self, idx: usize) -> Option<u8> {
        self.mosi.get(idx).copied()
    }

    pub fn miso_u8(&self, idx: usize) -> Option<u8> {
        self.miso.get(idx).copied()
    }

    /// Big-endian unsigned integer over a MOSI byte range
    pub fn mosi_be(&self, range: Range<usize>) -> Option<u64> {
        be_uint(self.mosi, range)
    }

    /// Big-endian unsigned integer over a MISO byte range
    pub fn miso_be(&self, range: Range<usize>) -> Option<u64> {
        be_uint(self.miso, range)
    }

    /// Remaining MOSI bytes from `idx` rendered as contiguous lowercase hex
    pub fn mosi_hex_from(&self, idx: usize) -> String {
        hex_tail(self.mosi, idx)
    }

    /// Remaining MISO bytes from `idx` rendered as contiguous lowercase hex
    pub fn miso_hex_from(&self, idx: usize) -> String {
        hex_tail(self.miso, idx)
    }
}

fn be_uint(bytes: &[u8], range: Range<usize>) -> Option<u64> {
    let slice = bytes.get(range)?;
    Some(slice.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
}

fn hex_tail(bytes: &[u8], idx: usize) -> String {
    bytes
        .get(idx..)
        .unwrap_or(&[])
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Static description of one command
pub struct CommandDescriptor {
    /// Opcode byte (first MOSI byte of the transaction)
    pub opcode: u8,
    /// Command mnemonic
    pub name: &'static str,
    /// Canonical transfer count for this command, informational only: shorter
    /// transactions still decode, substituting fallbacks per missing field
    pub min_len: usize,
    /// Payload decoder
    pub decode: DecodeFn,
}

/// One published generation of the command set
pub struct CommandTable {
    name: &'static str,
    commands: &'static [CommandDescriptor],
    registers: &'static [(u16, &'static str)],
}

impl CommandTable {
    pub const fn new(
        name: &'static str,
        commands: &'static [CommandDescriptor],
        registers: &'static [(u16, &'static str)],
    ) -> Self {
        Self {
            name,
            commands,
            registers,
        }
    }

    /// Returns the table's generation name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up the descriptor for an opcode
    pub fn descriptor(&self, opcode: u8) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|d| d.opcode == opcode)
    }

    /// All descriptors in this table, in opcode order
    pub fn descriptors(&self) -> &[CommandDescriptor] {
        self.commands
    }

    /// Looks up a register mnemonic by address
    pub fn register_name(&self, addr: u16) -> Option<&'static str> {
        self.registers
            .iter()
            .find(|(a, _)| *a == addr)
            .map(|(_, name)| *name)
    }

    /// Decodes one transaction against this table
    ///
    /// Returns the command summary, or [`DecodeError::UnknownOpcode`] when
    /// the opcode is not in this table. Everything else degrades inline.
    pub fn decode(
        &self,
        ctx: &mut DecodeCtx,
        mosi: &[u8],
        miso: &[u8],
    ) -> Result<String, DecodeError> {
        let opcode = mosi.first().copied().unwrap_or(0);
        let descriptor = self
            .descriptor(opcode)
            .ok_or(DecodeError::UnknownOpcode(opcode))?;

        if mosi.len() < descriptor.min_len {
            debug!(
                command = descriptor.name,
                got = mosi.len(),
                expected = descriptor.min_len,
                "short transaction"
            );
        }

        let exchange = Exchange {
            mosi,
            miso,
            table: self,
        };
        Ok((descriptor.decode)(ctx, &exchange))
    }
}

/// Decodes one transaction into its full annotation text
///
/// Composes the command summary (or the unknown-opcode fallback) with the
/// device status suffix, which is present whenever the device-to-host
/// sequence carries at least two bytes. Pure in (table, context, bytes);
/// only the packet-type commands mutate `ctx`.
pub fn describe_transaction(
    table: &CommandTable,
    ctx: &mut DecodeCtx,
    mosi: &[u8],
    miso: &[u8],
) -> String {
    let mut text = match table.decode(ctx, mosi, miso) {
        Ok(text) => text,
        Err(err) => err.to_string(),
    };
    if miso.len() > 1 {
        text.push(' ');
        text.push_str(&Status::from_byte(miso[1]).describe());
    }
    text
}
