//! Shared lookup tables
//!
//! Chip-level value→meaning maps used by the payload decoders of both command
//! table generations. All lookups return `Option`; callers render a hex
//! fallback on a miss.

/// FSK receiver bandwidth code → bandwidth in Hz
pub fn fsk_bandwidth_hz(code: u8) -> Option<u32> {
    match code {
        0x1F => Some(4_800),
        0x17 => Some(5_800),
        0x0F => Some(7_300),
        0x1E => Some(9_700),
        0x16 => Some(11_700),
        0x0E => Some(14_600),
        0x1D => Some(19_500),
        0x15 => Some(23_400),
        0x0D => Some(29_300),
        0x1C => Some(39_000),
        0x14 => Some(46_900),
        0x0C => Some(58_600),
        0x1B => Some(78_200),
        0x13 => Some(93_800),
        0x0B => Some(117_300),
        0x1A => Some(156_200),
        0x12 => Some(187_200),
        0x0A => Some(234_300),
        0x19 => Some(312_000),
        0x11 => Some(373_600),
        0x09 => Some(476_000),
        _ => None,
    }
}

/// LoRa bandwidth code → bandwidth label in kHz
///
/// Returned as the display string to keep the fractional entries exact.
pub fn lora_bandwidth_khz(code: u8) -> Option<&'static str> {
    match code {
        0x00 => Some("7.81"),
        0x08 => Some("10.42"),
        0x01 => Some("15.63"),
        0x09 => Some("20.8"),
        0x02 => Some("31.25"),
        0x0A => Some("41.67"),
        0x03 => Some("62.5"),
        0x04 => Some("125"),
        0x05 => Some("250"),
        0x06 => Some("500"),
        _ => None,
    }
}

/// First image-calibration byte → frequency band in MHz
pub fn image_cal_band_from(code: u8) -> Option<&'static str> {
    match code {
        0x68 => Some("430-440"),
        0x75 => Some("470-510"),
        0xC1 => Some("779-787"),
        0xD7 => Some("863-870"),
        0xE1 => Some("902-928"),
        _ => None,
    }
}

/// Second image-calibration byte → frequency band in MHz
pub fn image_cal_band_to(code: u8) -> Option<&'static str> {
    match code {
        0x6F => Some("430-440"),
        0x81 => Some("470-510"),
        0xC5 => Some("779-787"),
        0xD8 => Some("863-870"),
        0xE9 => Some("902-928"),
        _ => None,
    }
}

/// PA ramp time code → ramp time in microseconds
pub fn pa_ramp_time_us(code: u8) -> Option<u32> {
    match code {
        0x00 => Some(10),
        0x01 => Some(20),
        0x02 => Some(40),
        0x03 => Some(80),
        0x04 => Some(200),
        0x05 => Some(800),
        0x06 => Some(1_700),
        0x07 => Some(3_400),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fsk_bandwidth_lookup() {
        assert_eq!(fsk_bandwidth_hz(0x1F), Some(4_800));
        assert_eq!(fsk_bandwidth_hz(0x09), Some(476_000));
        assert_eq!(fsk_bandwidth_hz(0x00), None);
    }

    #[test]
    fn test_lora_bandwidth_lookup() {
        assert_eq!(lora_bandwidth_khz(0x04), Some("125"));
        assert_eq!(lora_bandwidth_khz(0x00), Some("7.81"));
        assert_eq!(lora_bandwidth_khz(0x07), None);
    }

    #[test]
    fn test_image_cal_bands_pair_up() {
        assert_eq!(image_cal_band_from(0xD7), Some("863-870"));
        assert_eq!(image_cal_band_to(0xD8), Some("863-870"));
        assert_eq!(image_cal_band_from(0xD8), None);
    }

    #[test]
    fn test_pa_ramp_time_lookup() {
        assert_eq!(pa_ramp_time_us(0x00), Some(10));
        assert_eq!(pa_ramp_time_us(0x07), Some(3_400));
        assert_eq!(pa_ramp_time_us(0x08), None);
    }
}
