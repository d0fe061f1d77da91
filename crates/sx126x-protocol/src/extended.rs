//! Extended command table
//!
//! The revised command catalogue. On top of the 21 legacy opcodes it adds the
//! six device query/transmit commands (GetStatus, GetPacketType,
//! GetRxBufferStatus, GetPacketStatus, GetDeviceErrors, SetTx), decodes the
//! sleep-config and IRQ flag words by name, appends the converted MHz value
//! to SetRfFrequency, and uses the datasheet field wording for
//! SetPacketParams (including the FSK whitening field the legacy table never
//! rendered). It also carries its own, larger register-name table. See
//! [`crate::legacy`] for the original generation.

use crate::command::{CommandDescriptor, CommandTable, Exchange};
use crate::decoders::{self, timeout_label, MISSING};
use crate::fields::{DeviceErrors, FskRxStatus, IrqFlags, SleepConfig};
use crate::{DecodeCtx, PacketType};

pub static TABLE: CommandTable = CommandTable::new("extended", COMMANDS, REGISTERS);

static REGISTERS: &[(u16, &str)] = &[
    (0x06B8, "WhiteningInit"),
    (0x06BC, "CrcInit"),
    (0x06BE, "CrcPoly"),
    (0x06C0, "SyncWord"),
    (0x06CD, "NodeAddress"),
    (0x06CE, "BroadcastAddress"),
    (0x0736, "IqPolarity"),
    (0x0740, "LoRaSyncWord"),
    (0x0819, "RandomNumberGen"),
    (0x0889, "TxModulation"),
    (0x08AC, "RxGain"),
    (0x08D8, "TxClampConfig"),
    (0x08E7, "OcpConfig"),
    (0x0902, "RtcControl"),
    (0x0911, "XTATrim"),
    (0x0912, "XTBTrim"),
    (0x0920, "Dio3OutputVoltage"),
    (0x0944, "EventMask"),
];

static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        opcode: 0x02,
        name: "ClearIrqStatus",
        min_len: 3,
        decode: decoders::clear_irq_status,
    },
    CommandDescriptor {
        opcode: 0x08,
        name: "SetDioIrqParams",
        min_len: 9,
        decode: decoders::set_dio_irq_params,
    },
    CommandDescriptor {
        opcode: 0x0D,
        name: "WriteRegister",
        min_len: 4,
        decode: decoders::write_register,
    },
    CommandDescriptor {
        opcode: 0x11,
        name: "GetPacketType",
        min_len: 3,
        decode: get_packet_type,
    },
    CommandDescriptor {
        opcode: 0x12,
        name: "GetIrqStatus",
        min_len: 4,
        decode: get_irq_status,
    },
    CommandDescriptor {
        opcode: 0x13,
        name: "GetRxBufferStatus",
        min_len: 4,
        decode: get_rx_buffer_status,
    },
    CommandDescriptor {
        opcode: 0x14,
        name: "GetPacketStatus",
        min_len: 5,
        decode: get_packet_status,
    },
    CommandDescriptor {
        opcode: 0x17,
        name: "GetDeviceErrors",
        min_len: 4,
        decode: get_device_errors,
    },
    CommandDescriptor {
        opcode: 0x1D,
        name: "ReadRegister",
        min_len: 5,
        decode: decoders::read_register,
    },
    CommandDescriptor {
        opcode: 0x80,
        name: "SetStandby",
        min_len: 2,
        decode: decoders::set_standby,
    },
    CommandDescriptor {
        opcode: 0x82,
        name: "SetRx",
        min_len: 4,
        decode: decoders::set_rx,
    },
    CommandDescriptor {
        opcode: 0x83,
        name: "SetTx",
        min_len: 4,
        decode: set_tx,
    },
    CommandDescriptor {
        opcode: 0x84,
        name: "SetSleep",
        min_len: 2,
        decode: set_sleep,
    },
    CommandDescriptor {
        opcode: 0x86,
        name: "SetRfFrequency",
        min_len: 5,
        decode: set_rf_frequency,
    },
    CommandDescriptor {
        opcode: 0x88,
        name: "SetCadParams",
        min_len: 7,
        decode: decoders::set_cad_params,
    },
    CommandDescriptor {
        opcode: 0x8A,
        name: "SetPacketType",
        min_len: 2,
        decode: decoders::set_packet_type,
    },
    CommandDescriptor {
        opcode: 0x8B,
        name: "SetModulationParams",
        min_len: 5,
        decode: decoders::set_modulation_params,
    },
    CommandDescriptor {
        opcode: 0x8C,
        name: "SetPacketParams",
        min_len: 7,
        decode: set_packet_params,
    },
    CommandDescriptor {
        opcode: 0x8E,
        name: "SetTxParams",
        min_len: 3,
        decode: decoders::set_tx_params,
    },
    CommandDescriptor {
        opcode: 0x8F,
        name: "SetBufferBaseAddress",
        min_len: 3,
        decode: decoders::set_buffer_base_address,
    },
    CommandDescriptor {
        opcode: 0x95,
        name: "SetPaConfig",
        min_len: 5,
        decode: decoders::set_pa_config,
    },
    CommandDescriptor {
        opcode: 0x96,
        name: "SetRegulatorMode",
        min_len: 2,
        decode: decoders::set_regulator_mode,
    },
    CommandDescriptor {
        opcode: 0x98,
        name: "CalImg",
        min_len: 3,
        decode: decoders::cal_img,
    },
    CommandDescriptor {
        opcode: 0x9D,
        name: "SetDIO2AsRfSwitchCtrl",
        min_len: 2,
        decode: decoders::set_dio2_as_rf_switch_ctrl,
    },
    CommandDescriptor {
        opcode: 0x9F,
        name: "StopTimerOnPreamble",
        min_len: 2,
        decode: decoders::stop_timer_on_preamble,
    },
    CommandDescriptor {
        opcode: 0xA0,
        name: "SetLoRaSymbNumTimeout",
        min_len: 2,
        decode: decoders::set_lora_symb_num_timeout,
    },
    CommandDescriptor {
        opcode: 0xC0,
        name: "GetStatus",
        min_len: 2,
        decode: get_status,
    },
];

/// Renders a flag word as hex, with the set flag names appended when any
fn hex_with_flags(value: u64, names: String) -> String {
    if names.is_empty() {
        format!("{value:#x}")
    } else {
        format!("{value:#x} [{names}]")
    }
}

fn get_status(_ctx: &mut DecodeCtx, _ex: &Exchange<'_>) -> String {
    // The status suffix carries the payload for this one
    "GetStatus".to_string()
}

fn set_tx(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_be(1..4) {
        Some(ticks) => format!("SetTx {}", timeout_label(ticks, 0xFF_FFFF)),
        None => format!("SetTx {MISSING}"),
    }
}

fn set_sleep(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_u8(1) {
        Some(cfg) => format!(
            "SetSleep {}",
            SleepConfig::from_bits_retain(cfg).describe()
        ),
        None => format!("SetSleep {MISSING}"),
    }
}

fn set_rf_frequency(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_be(1..5) {
        Some(frf) => {
            // frf is in units of F_XTAL / 2^25 = 32 MHz / 33554432
            let hz = frf as f64 * 32_000_000.0 / 33_554_432.0;
            format!("SetRfFrequency {frf} ({:.3}MHz)", hz / 1_000_000.0)
        }
        None => format!("SetRfFrequency {MISSING}"),
    }
}

fn get_irq_status(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.miso_be(2..4) {
        Some(flags) => {
            let named = IrqFlags::from_bits_retain(flags as u16).describe();
            format!("GetIrqStatus {}", hex_with_flags(flags, named))
        }
        None => format!("GetIrqStatus {MISSING}"),
    }
}

fn get_packet_type(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let label = match ex.miso_u8(2) {
        Some(0) => {
            ctx.packet_type = PacketType::Fsk;
            "FSK".to_string()
        }
        Some(1) => {
            ctx.packet_type = PacketType::LoRa;
            "LoRa".to_string()
        }
        Some(3) => {
            ctx.packet_type = PacketType::Fhss;
            "FHSS".to_string()
        }
        Some(other) => {
            ctx.packet_type = PacketType::None;
            other.to_string()
        }
        None => MISSING.to_string(),
    };
    format!("GetPacketType {label}")
}

fn get_rx_buffer_status(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let len = match ex.miso_u8(2) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    let offset = match ex.miso_u8(3) {
        Some(v) => format!("{v:#x}"),
        None => MISSING.to_string(),
    };
    format!("GetRxBufferStatus len {len} offset {offset}")
}

fn get_packet_status(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mut out = String::from("GetPacketStatus ");
    match ctx.packet_type {
        PacketType::LoRa => {
            match ex.miso_u8(2) {
                Some(raw) => out.push_str(&format!("rssi {}dBm", -(raw as f64) / 2.0)),
                None => out.push_str(&format!("rssi {MISSING}")),
            }
            match ex.miso_u8(3) {
                Some(raw) => out.push_str(&format!(" snr {}dB", (raw as i8) as f64 / 4.0)),
                None => out.push_str(&format!(" snr {MISSING}")),
            }
            match ex.miso_u8(4) {
                Some(raw) => out.push_str(&format!(" signalRssi {}dBm", -(raw as f64) / 2.0)),
                None => out.push_str(&format!(" signalRssi {MISSING}")),
            }
        }
        PacketType::Fsk => {
            match ex.miso_u8(2) {
                Some(raw) => {
                    let named = FskRxStatus::from_bits_retain(raw).describe();
                    out.push_str(&format!("rxStatus {}", hex_with_flags(raw.into(), named)));
                }
                None => out.push_str(&format!("rxStatus {MISSING}")),
            }
            match ex.miso_u8(3) {
                Some(raw) => out.push_str(&format!(" rssiSync {}dBm", -(raw as f64) / 2.0)),
                None => out.push_str(&format!(" rssiSync {MISSING}")),
            }
            match ex.miso_u8(4) {
                Some(raw) => out.push_str(&format!(" rssiAvg {}dBm", -(raw as f64) / 2.0)),
                None => out.push_str(&format!(" rssiAvg {MISSING}")),
            }
        }
        other => out.push_str(&format!("TODO pktType {other}")),
    }
    out
}

fn get_device_errors(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.miso_be(2..4) {
        Some(errors) => {
            let named = DeviceErrors::from_bits_retain(errors as u16).describe();
            format!("GetDeviceErrors {}", hex_with_flags(errors, named))
        }
        None => format!("GetDeviceErrors {MISSING}"),
    }
}

fn set_packet_params(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mut out = String::from("SetPacketParams ");
    match ctx.packet_type {
        PacketType::Fsk => {
            match ex.mosi_be(1..3) {
                Some(preamble) => out.push_str(&format!("preambleLen {preamble}")),
                None => out.push_str(&format!("preambleLen {MISSING}")),
            }
            match ex.mosi_u8(3) {
                Some(0) => out.push_str(" preambleDetect OFF"),
                Some(4) => out.push_str(" preambleDetect 8bits"),
                Some(5) => out.push_str(" preambleDetect 16bits"),
                Some(6) => out.push_str(" preambleDetect 24bits"),
                Some(7) => out.push_str(" preambleDetect 32bits"),
                Some(other) => out.push_str(&format!(" preambleDetect {other:#x}")),
                None => out.push_str(&format!(" preambleDetect {MISSING}")),
            }
            match ex.mosi_u8(4) {
                Some(bits) => out.push_str(&format!(" syncWordLen {bits}bits")),
                None => out.push_str(&format!(" syncWordLen {MISSING}")),
            }
            match ex.mosi_u8(5) {
                Some(0) => out.push_str(" addrFilt OFF"),
                Some(1) => out.push_str(" addrFilt node"),
                Some(2) => out.push_str(" addrFilt node+bcast"),
                Some(other) => out.push_str(&format!(" addrFilt {other:#x}")),
                None => out.push_str(&format!(" addrFilt {MISSING}")),
            }
            match ex.mosi_u8(6) {
                Some(0) => out.push_str(" fixedLen"),
                Some(1) => out.push_str(" varLen"),
                Some(other) => out.push_str(&format!(" pktLenType {other:#x}")),
                None => out.push_str(&format!(" {MISSING}")),
            }
            match ex.mosi_u8(7) {
                Some(len) => out.push_str(&format!(" payloadLen {len}")),
                None => out.push_str(&format!(" payloadLen {MISSING}")),
            }
            match ex.mosi_u8(8) {
                Some(1) => out.push_str(" crc OFF"),
                Some(0) => out.push_str(" crc 1_BYTE"),
                Some(2) => out.push_str(" crc 2_BYTE"),
                Some(4) => out.push_str(" crc 1_BYTE_INV"),
                Some(6) => out.push_str(" crc 2_BYTE_INV"),
                Some(other) => out.push_str(&format!(" crc {other:#x}")),
                None => out.push_str(&format!(" crc {MISSING}")),
            }
            match ex.mosi_u8(9) {
                Some(0) => out.push_str(" whitening OFF"),
                Some(1) => out.push_str(" whitening ON"),
                Some(other) => out.push_str(&format!(" whitening {other:#x}")),
                None => out.push_str(&format!(" whitening {MISSING}")),
            }
        }
        PacketType::LoRa => {
            match ex.mosi_be(1..3) {
                Some(preamble) => out.push_str(&format!("preambleLen {preamble}")),
                None => out.push_str(&format!("preambleLen {MISSING}")),
            }
            match ex.mosi_u8(3) {
                Some(0) => out.push_str(" header explicit"),
                Some(1) => out.push_str(" header implicit"),
                Some(other) => out.push_str(&format!(" header {other:#x}")),
                None => out.push_str(&format!(" header {MISSING}")),
            }
            match ex.mosi_u8(4) {
                Some(len) => out.push_str(&format!(" payloadLen {len}")),
                None => out.push_str(&format!(" payloadLen {MISSING}")),
            }
            match ex.mosi_u8(5) {
                Some(0) => out.push_str(" crc OFF"),
                Some(1) => out.push_str(" crc ON"),
                Some(other) => out.push_str(&format!(" crc {other:#x}")),
                None => out.push_str(&format!(" crc {MISSING}")),
            }
            match ex.mosi_u8(6) {
                Some(0) => out.push_str(" invertIQ standard"),
                Some(1) => out.push_str(" invertIQ inverted"),
                Some(other) => out.push_str(&format!(" invertIQ {other:#x}")),
                None => out.push_str(&format!(" invertIQ {MISSING}")),
            }
        }
        other => out.push_str(&format!("TODO pktType {other}")),
    }
    out
}
