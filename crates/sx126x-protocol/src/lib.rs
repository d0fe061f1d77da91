//! SX126x SPI Command Decoding Library
//!
//! This crate decodes the command/response protocol spoken over SPI between a
//! host controller and a Semtech SX126x sub-GHz radio transceiver. Given the
//! two byte streams of one chip-select framed transaction (MOSI and MISO,
//! paired index by index), it produces a human-readable summary of the
//! command, its parameters, and the device status word:
//!
//! ```text
//! [0x8B, 0x07, 0x04, 0x01, 0x00]  →  "SetModulationParams SF7 bw 125KHz CR4/5 LDRO OFF"
//! ```
//!
//! # Architecture
//!
//! - [`command`]: table-driven opcode dispatch and the transaction view
//! - [`decoders`]: one pure decode function per command
//! - [`fields`]: bit-field decomposition of the packed status/IRQ/error words
//! - [`tables`]: bandwidth, calibration-band and ramp-time lookup tables
//! - [`legacy`] / [`extended`]: the two published command-table generations
//!
//! Two generations of the command table exist. They differ in supported
//! opcodes, in the wording of some payload fields, and in their register-name
//! tables. Both are plain data instances driving the same engine; select one
//! with [`CommandSet`].
//!
//! Several command payloads (modulation and packet parameters) change layout
//! with the active modulation. That state is the [`DecodeCtx`] the caller
//! owns and threads through every decode; it is only ever mutated by the
//! SetPacketType/GetPacketType decoders.
//!
//! # Example
//!
//! ```rust
//! use sx126x_protocol::{describe_transaction, CommandSet, DecodeCtx};
//!
//! let table = CommandSet::Legacy.table();
//! let mut ctx = DecodeCtx::default();
//!
//! // SetStandby(STDBY_RC); device answered with two status bytes.
//! let text = describe_transaction(table, &mut ctx, &[0x80, 0x00], &[0xA2, 0x24]);
//! assert_eq!(text, "SetStandby STDBY_RC (STBY_RC dataAvail)");
//! ```
//!
//! Decoding never fails: unknown opcodes, short payloads and unmapped lookup
//! values all degrade to inline hex fallbacks so one malformed transaction can
//! never poison the next.

pub mod command;
pub mod decoders;
pub mod error;
pub mod extended;
pub mod fields;
pub mod legacy;
pub mod tables;

pub use command::{describe_transaction, CommandDescriptor, CommandTable, Exchange};
pub use error::DecodeError;
pub use fields::{DeviceErrors, FskRxStatus, IrqFlags, SleepConfig, Status};

/// Identifies which published command-table generation to decode against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandSet {
    /// The original command catalogue (21 opcodes)
    Legacy,
    /// The revised catalogue: adds the status/buffer/error query commands and
    /// reworded payload fields (27 opcodes)
    Extended,
}

impl CommandSet {
    /// Returns a human-readable name for the command set
    pub fn name(&self) -> &'static str {
        match self {
            CommandSet::Legacy => "legacy",
            CommandSet::Extended => "extended",
        }
    }

    /// Returns the static dispatch table for this command set
    pub fn table(&self) -> &'static CommandTable {
        match self {
            CommandSet::Legacy => &legacy::TABLE,
            CommandSet::Extended => &extended::TABLE,
        }
    }
}

/// Active modulation scheme, carried across transactions
///
/// Several command payloads (SetModulationParams, SetPacketParams,
/// GetPacketStatus) change layout with the packet type most recently
/// configured on the device. The decoder tracks that configuration as it goes
/// past on the bus; until a SetPacketType/GetPacketType is observed the
/// context stays [`PacketType::None`] and layout-dependent payloads render a
/// placeholder instead of garbage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PacketType {
    /// No packet type observed yet
    #[default]
    None,
    /// LoRa modulation
    LoRa,
    /// (G)FSK modulation
    Fsk,
    /// Long-range FHSS
    Fhss,
}

impl std::fmt::Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PacketType::None => "None",
            PacketType::LoRa => "LoRa",
            PacketType::Fsk => "FSK",
            PacketType::Fhss => "FHSS",
        })
    }
}

/// Mutable decode context threaded through every payload decoder
///
/// Owned by the caller (one per capture session), never shared between
/// sessions. The only decoders that write to it are SetPacketType and
/// GetPacketType.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeCtx {
    /// Modulation most recently configured on the device
    pub packet_type: PacketType,
}
