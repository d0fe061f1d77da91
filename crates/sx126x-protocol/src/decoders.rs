//! Payload decoders shared by both command-table generations
//!
//! One function per opcode, each pure in (context, exchange). Field decoding
//! is total: a byte missing from a short transaction renders as `??`, an
//! enumerated value outside its mapping renders as hex, and a lookup-table
//! miss renders as hex plus a `(not found)` note. Decoders that differ
//! between the two table generations live next to their table in
//! [`crate::legacy`] / [`crate::extended`].

use crate::tables;
use crate::{DecodeCtx, Exchange, PacketType};

/// Inline fallback for a field whose bytes never arrived
pub(crate) const MISSING: &str = "??";

/// Renders a RX/TX timeout field: 0 and all-ones are modes, not durations
pub(crate) fn timeout_label(ticks: u64, all_ones: u64) -> String {
    if ticks == 0 {
        "single".to_string()
    } else if ticks == all_ones {
        "continuous".to_string()
    } else {
        // 15.625 μs per tick; exact in binary floating point
        format!("{}μs", ticks as f64 * 1000.0 / 64.0)
    }
}

fn format_bps(bps: f64) -> String {
    if (bps - bps.round()).abs() < 0.05 {
        format!("{bps:.0}")
    } else {
        format!("{bps:.1}")
    }
}

pub fn clear_irq_status(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_be(1..3) {
        Some(mask) => format!("ClearIrqStatus {mask:#x}"),
        None => format!("ClearIrqStatus {MISSING}"),
    }
}

pub fn set_dio_irq_params(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mask = |range| match ex.mosi_be(range) {
        Some(v) => format!("{v:#x}"),
        None => MISSING.to_string(),
    };
    format!(
        "SetDioIrqParams {} DIO1 {} DIO2 {} DIO3 {}",
        mask(1..3),
        mask(3..5),
        mask(5..7),
        mask(7..9)
    )
}

fn register_label(ex: &Exchange<'_>, addr_range: std::ops::Range<usize>) -> String {
    match ex.mosi_be(addr_range) {
        Some(addr) => match ex.table.register_name(addr as u16) {
            Some(name) => name.to_string(),
            None => format!("{addr:#x} (not found)"),
        },
        None => MISSING.to_string(),
    }
}

pub fn write_register(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    format!(
        "WriteRegister {} <-- {}",
        register_label(ex, 1..3),
        ex.mosi_hex_from(3)
    )
}

pub fn read_register(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    // Data starts after opcode, two address bytes and one dummy byte
    format!(
        "ReadRegister {} --> {}",
        register_label(ex, 1..3),
        ex.miso_hex_from(4)
    )
}

pub fn set_standby(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let cfg = match ex.mosi_u8(1) {
        Some(0) => "STDBY_RC".to_string(),
        Some(1) => "STDBY_XOSC".to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    format!("SetStandby {cfg}")
}

pub fn set_rx(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_be(1..4) {
        Some(ticks) => format!("SetRx {}", timeout_label(ticks, 0xFF_FFFF)),
        None => format!("SetRx {MISSING}"),
    }
}

pub fn set_cad_params(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let symbols = match ex.mosi_u8(1) {
        // Field is an exponent: 0..=4 select 1..16 symbols
        Some(n @ 0..=4) => (1u32 << n).to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    let det_peak = match ex.mosi_u8(2) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    let det_min = match ex.mosi_u8(3) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    let exit = match ex.mosi_u8(4) {
        Some(0) => "CAD_ONLY".to_string(),
        Some(1) => "CAD_RX".to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    let timeout = match ex.mosi_be(5..7) {
        Some(v) => format!("{v:#x}"),
        None => MISSING.to_string(),
    };
    format!(
        "SetCadParams cadSymbolNum {symbols}, cadDetPeak {det_peak}, cadDetMin {det_min}, \
         exit {exit}, timeout {timeout}"
    )
}

pub fn set_packet_type(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let label = match ex.mosi_u8(1) {
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
    format!("SetPacketType {label}")
}

pub fn set_modulation_params(ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mut out = String::from("SetModulationParams ");
    match ctx.packet_type {
        PacketType::Fsk => {
            match ex.mosi_be(1..4) {
                Some(0) => out.push_str("br 0x0"),
                Some(br) => {
                    let bps = 32.0 * 32_000_000.0 / br as f64;
                    out.push_str(&format!("{}bps", format_bps(bps)));
                }
                None => out.push_str(&format!("{MISSING}bps")),
            }
            out.push(' ');
            match ex.mosi_u8(4) {
                Some(0x00) => out.push_str("noFilter"),
                Some(0x08) => out.push_str("BT 0.3"),
                Some(0x09) => out.push_str("BT 0.5"),
                Some(0x0A) => out.push_str("BT 0.7"),
                Some(0x0B) => out.push_str("BT 1.0"),
                Some(other) => out.push_str(&format!("{other:#x}")),
                None => out.push_str(MISSING),
            }
            out.push(' ');
            match ex.mosi_u8(5) {
                Some(code) => match tables::fsk_bandwidth_hz(code) {
                    Some(hz) => out.push_str(&format!("{hz}Hz")),
                    None => out.push_str(&format!("BW({code:#x} not found)")),
                },
                None => out.push_str(MISSING),
            }
            out.push(' ');
            match ex.mosi_be(6..9) {
                Some(fdev) => out.push_str(&fdev.to_string()),
                None => out.push_str(MISSING),
            }
        }
        PacketType::LoRa => {
            match ex.mosi_u8(1) {
                Some(sf) => out.push_str(&format!("SF{sf}")),
                None => out.push_str(&format!("SF{MISSING}")),
            }
            match ex.mosi_u8(2) {
                Some(code) => match tables::lora_bandwidth_khz(code) {
                    Some(khz) => out.push_str(&format!(" bw {khz}KHz")),
                    None => out.push_str(&format!(" bw {code:#x} (not found)")),
                },
                None => out.push_str(&format!(" bw {MISSING}")),
            }
            match ex.mosi_u8(3) {
                Some(1) => out.push_str(" CR4/5"),
                Some(2) => out.push_str(" CR4/6"),
                Some(3) => out.push_str(" CR4/7"),
                Some(4) => out.push_str(" CR4/8"),
                Some(other) => out.push_str(&format!(" CR{other:#x}")),
                None => out.push_str(&format!(" CR{MISSING}")),
            }
            match ex.mosi_u8(4) {
                Some(0) => out.push_str(" LDRO OFF"),
                Some(1) => out.push_str(" LDRO ON"),
                Some(other) => out.push_str(&format!(" LDRO {other:#x}")),
                None => out.push_str(&format!(" LDRO {MISSING}")),
            }
        }
        other => out.push_str(&format!("TODO pktType {other}")),
    }
    out
}

pub fn set_tx_params(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let power = match ex.mosi_u8(1) {
        // Two's complement over the byte range
        Some(raw) => format!("{}dBm", raw as i8),
        None => format!("{MISSING}dBm"),
    };
    let ramp = match ex.mosi_u8(2) {
        Some(code) => match tables::pa_ramp_time_us(code) {
            Some(us) => format!("ramp {us}μs"),
            None => format!("ramp {code:#x}"),
        },
        None => format!("ramp {MISSING}"),
    };
    format!("SetTxParams {power} {ramp}")
}

pub fn set_buffer_base_address(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let hex = |idx| match ex.mosi_u8(idx) {
        Some(v) => format!("{v:#x}"),
        None => MISSING.to_string(),
    };
    format!("SetBufferBaseAddress TX={} RX={}", hex(1), hex(2))
}

pub fn set_pa_config(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let duty = match ex.mosi_u8(1) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    let hp_max = match ex.mosi_u8(2) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    let device = match ex.mosi_u8(3) {
        Some(0) => "SX1262".to_string(),
        Some(1) => "SX1261".to_string(),
        Some(other) => other.to_string(),
        None => MISSING.to_string(),
    };
    let lut = match ex.mosi_u8(4) {
        Some(v) => v.to_string(),
        None => MISSING.to_string(),
    };
    format!("SetPaConfig paDuty {duty} hpMax {hp_max} {device} {lut}")
}

pub fn cal_img(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let band = |idx, lookup: fn(u8) -> Option<&'static str>| match ex.mosi_u8(idx) {
        Some(code) => match lookup(code) {
            Some(band) => band.to_string(),
            None => format!("{code:#x}"),
        },
        None => MISSING.to_string(),
    };
    format!(
        "CalImg {} {}",
        band(1, tables::image_cal_band_from),
        band(2, tables::image_cal_band_to)
    )
}

pub fn set_regulator_mode(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let mode = match ex.mosi_u8(1) {
        Some(0) => "LDO".to_string(),
        Some(1) => "DC-DC".to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    format!("SetRegulatorMode {mode}")
}

pub fn set_dio2_as_rf_switch_ctrl(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let enable = match ex.mosi_u8(1) {
        Some(0) => "OFF".to_string(),
        Some(1) => "ON".to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    format!("SetDIO2AsRfSwitchCtrl {enable}")
}

pub fn stop_timer_on_preamble(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    let cond = match ex.mosi_u8(1) {
        Some(0) => "stop on sync or header".to_string(),
        Some(1) => "stop on preamble".to_string(),
        Some(other) => format!("{other:#x}"),
        None => MISSING.to_string(),
    };
    format!("StopTimerOnPreamble {cond}")
}

pub fn set_lora_symb_num_timeout(_ctx: &mut DecodeCtx, ex: &Exchange<'_>) -> String {
    match ex.mosi_u8(1) {
        Some(n) => format!("SetLoRaSymbNumTimeout {n}"),
        None => format!("SetLoRaSymbNumTimeout {MISSING}"),
    }
}
