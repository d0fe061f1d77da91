//! Legacy command table
//!
//! The original published command catalogue: 21 opcodes and an 8-entry
//! register-name table. Field wording is preserved exactly as first shipped
//! (including the `fixrLen` header label and the inverted LoRa CRC labels),
//! so annotations stay comparable against captures decoded with the original
//! tooling. The revised catalogue lives in [`crate::extended`]; the two are
//! independently versioned and intentionally not reconciled.

use crate::command::{CommandDescriptor, CommandTable, Exchange};
use crate::decoders::{self, MISSING};
use crate::{DecodeCtx, PacketType};

pub static TABLE: CommandTable = CommandTable::new("legacy", COMMANDS, REGISTERS);

static REGISTERS: &[(u16, &str)] = &[
    (0x06C0, "SyncWord"),
    (0x0736, "IQInvert"),
    (0x0740, "LoRaSync"),
    (0x0889, "SdCfg0"),
    (0x08AC, "AgcSensiAdj"),
    (0x08E7, "paImax"),
    (0x0911, "XTAtrim"),
    (0x0912, "XTBtrim"),
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
        opcode: 0x12,
        name: "GetIrqStatus",
        min_len: 4,
        decode: get_irq_status,
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
        opcode: 0x84,
        name: "SetSleep",
        min_len: 1,
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
];

/// The legacy generation takes no sleep-config argument
fn set_sleep(_ctx: &mut DecodeCtx, _ex: &Exchange<'_>) -> String {
    "SetSleep".to_string()
}

/// Raw 32-bit PLL frequency word, as first shipped
fn set_rf_frequency(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_be(1..5) {
        Some(frf) => format!("SetRfFrequency {frf}"),
        None => format!("SetRfFrequency {MISSING}"),
    }
}

/// Raw hex IRQ word; the extended table adds flag names
fn get_irq_status(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.miso_be(2..4) {
        Some(flags) => format!("GetIrqStatus {flags:#x}"),
        None => format!("GetIrqStatus {MISSING}"),
    }
}

fn set_packet_params(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mut out = String::from("SetPacketParams ");
    match ctx.packet_type {
        PacketType::Fsk => {
            match ex.mosi_be(1..3) {
                Some(preamble) => out.push_str(&format!("preamble TX {preamble}")),
                None => out.push_str(&format!("preamble TX {MISSING}")),
            }
            match ex.mosi_u8(3) {
                Some(0) => out.push_str(" detect OFFbits"),
                Some(4) => out.push_str(" detect 8bits"),
                Some(5) => out.push_str(" detect 16bits"),
                Some(6) => out.push_str(" detect 24bits"),
                Some(7) => out.push_str(" detect 32bits"),
                Some(_) => out.push_str(" detect ?bits"),
                None => out.push_str(&format!(" detect {MISSING}")),
            }
            match ex.mosi_u8(4) {
                Some(bits) => out.push_str(&format!(" syncWord {bits}bits")),
                None => out.push_str(&format!(" syncWord {MISSING}")),
            }
            match ex.mosi_u8(5) {
                Some(0) => out.push_str(" addrFilt OFF"),
                Some(1) => out.push_str(" addrFilt node"),
                Some(2) => out.push_str(" addrFilt node & bcast"),
                Some(_) => out.push_str(" addrFilt ?"),
                None => out.push_str(&format!(" addrFilt {MISSING}")),
            }
            match ex.mosi_u8(6) {
                Some(0) => out.push_str(" fixLen"),
                Some(_) => out.push_str(" varLen"),
                None => out.push_str(&format!(" {MISSING}")),
            }
            match ex.mosi_u8(7) {
                Some(len) => out.push_str(&format!(" payLen {len}")),
                None => out.push_str(&format!(" payLen {MISSING}")),
            }
            match ex.mosi_u8(8) {
                Some(1) => out.push_str(" CRC OFF"),
                Some(0) => out.push_str(" CRC 1_BYTE"),
                Some(2) => out.push_str(" CRC 2_BYTE"),
                Some(4) => out.push_str(" CRC 1_BYTE_INV"),
                Some(6) => out.push_str(" CRC 2_BYTE_INV"),
                Some(other) => out.push_str(&format!(" CRC {other:#x}")),
                None => out.push_str(&format!(" CRC {MISSING}")),
            }
        }
        PacketType::LoRa => {
            match ex.mosi_be(1..3) {
                Some(preamble) => out.push_str(&format!("preamble {preamble}")),
                None => out.push_str(&format!("preamble {MISSING}")),
            }
            match ex.mosi_u8(3) {
                Some(0) => out.push_str(" header varLen"),
                Some(1) => out.push_str(" header fixrLen"),
                Some(other) => out.push_str(&format!(" header {other:#x}")),
                None => out.push_str(&format!(" header {MISSING}")),
            }
            match ex.mosi_u8(4) {
                Some(len) => out.push_str(&format!(" payLen{len}")),
                None => out.push_str(&format!(" payLen{MISSING}")),
            }
            match ex.mosi_u8(5) {
                Some(0) => out.push_str(" CRC_ON"),
                Some(1) => out.push_str(" CRC_OFF"),
                Some(other) => out.push_str(&format!(" CRC_{other:#x}")),
                None => out.push_str(&format!(" CRC_{MISSING}")),
            }
            match ex.mosi_u8(6) {
                Some(0) => out.push_str(" IQ STD"),
                Some(1) => out.push_str(" IQ INV"),
                Some(other) => out.push_str(&format!(" IQ {other:#x}")),
                None => out.push_str(&format!(" IQ {MISSING}")),
            }
        }
        other => out.push_str(&format!("TODO pktType {other}")),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(ctx: &mut DecodeCtx, mosi: &[u8]) -> String {
        TABLE.decode(ctx, mosi, &[0u8; 1]).expect("opcode known")
    }

    fn lora_ctx() -> DecodeCtx {
        DecodeCtx {
            packet_type: PacketType::LoRa,
        }
    }

    #[test]
    fn test_every_descriptor_opcode_is_unique_and_sorted() {
        for pair in COMMANDS.windows(2) {
            assert!(pair[0].opcode < pair[1].opcode);
        }
    }

    #[test]
    fn test_set_sleep_has_no_arguments() {
        assert_eq!(decode(&mut DecodeCtx::default(), &[0x84]), "SetSleep");
    }

    #[test]
    fn test_set_rf_frequency_is_raw_pll_word() {
        // 915 MHz → frf 0x39300000
        assert_eq!(
            decode(&mut DecodeCtx::default(), &[0x86, 0x39, 0x30, 0x00, 0x00]),
            "SetRfFrequency 959447040"
        );
    }

    #[test]
    fn test_get_irq_status_is_raw_hex() {
        let mut ctx = DecodeCtx::default();
        let text = TABLE
            .decode(&mut ctx, &[0x12, 0x00, 0x00, 0x00], &[0xA2, 0x24, 0x02, 0x42])
            .unwrap();
        assert_eq!(text, "GetIrqStatus 0x242");
    }

    #[test]
    fn test_lora_packet_params_keeps_original_wording() {
        let text = decode(
            &mut lora_ctx(),
            &[0x8C, 0x00, 0x08, 0x00, 0x0C, 0x00, 0x00],
        );
        assert_eq!(text, "SetPacketParams preamble 8 header varLen payLen12 CRC_ON IQ STD");
    }

    #[test]
    fn test_fsk_packet_params_golden() {
        let ctx = &mut DecodeCtx {
            packet_type: PacketType::Fsk,
        };
        let text = decode(ctx, &[0x8C, 0x00, 0x20, 0x05, 0x10, 0x01, 0x01, 0x40, 0x02]);
        assert_eq!(
            text,
            "SetPacketParams preamble TX 32 detect 16bits syncWord 16bits addrFilt node \
             varLen payLen 64 CRC 2_BYTE"
        );
    }

    #[test]
    fn test_packet_params_without_context_is_placeholder() {
        let text = decode(&mut DecodeCtx::default(), &[0x8C, 0x00, 0x08]);
        assert_eq!(text, "SetPacketParams TODO pktType None");
    }

    #[test]
    fn test_register_table_contents() {
        assert_eq!(TABLE.register_name(0x06C0), Some("SyncWord"));
        assert_eq!(TABLE.register_name(0x0912), Some("XTBtrim"));
        assert_eq!(TABLE.register_name(0x06B8), None);
    }
}
