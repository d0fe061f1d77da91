//! Bit-field decomposition of the packed SX126x status words
//!
//! Every word here is a plain integer pulled out of a transaction; the types
//! below are transient views built from explicit shifts and masks. The flag
//! words (IRQ, FSK receive status, sleep config, device errors) are
//! `bitflags` sets with label tables for rendering; the status byte carries
//! two multi-bit fields and gets hand-rolled accessors instead.

use bitflags::bitflags;

/// Device status byte, returned on MISO during nearly every command
///
/// # Layout
/// - Bit 7: reserved
/// - Bits 6:4: chip mode
/// - Bits 3:1: command status
/// - Bit 0: reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub fn from_byte(byte: u8) -> Self {
        Status(byte)
    }

    /// Chip mode field (bits 6:4)
    pub fn chip_mode(&self) -> u8 {
        (self.0 >> 4) & 0x07
    }

    /// Command status field (bits 3:1)
    pub fn command_status(&self) -> u8 {
        (self.0 >> 1) & 0x07
    }

    /// Label for the chip mode, if the value is defined
    pub fn chip_mode_label(&self) -> Option<&'static str> {
        match self.chip_mode() {
            0x2 => Some("STBY_RC"),
            0x3 => Some("STBY_XOSC"),
            0x4 => Some("FS"),
            0x5 => Some("RX"),
            0x6 => Some("TX"),
            _ => None,
        }
    }

    /// Label for the command status, if the value is defined
    pub fn command_status_label(&self) -> Option<&'static str> {
        match self.command_status() {
            0x2 => Some("dataAvail"),
            0x3 => Some("cmdTimeout"),
            0x4 => Some("cmdErr"),
            0x5 => Some("fail"),
            0x6 => Some("cmdTxDone"),
            _ => None,
        }
    }

    /// Renders the `(chipMode cmdStatus)` suffix appended to command summaries
    ///
    /// Undefined field values fall back to their decimal form.
    pub fn describe(&self) -> String {
        let mode = self
            .chip_mode_label()
            .map(String::from)
            .unwrap_or_else(|| self.chip_mode().to_string());
        let cmd = self
            .command_status_label()
            .map(String::from)
            .unwrap_or_else(|| self.command_status().to_string());
        format!("({mode} {cmd})")
    }
}

bitflags! {
    /// IRQ flags word (16 bits)
    ///
    /// Bits 10:13 and 15 are reserved.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags: u16 {
        const TX_DONE            = 1 << 0;
        const RX_DONE            = 1 << 1;
        const PREAMBLE_DETECTED  = 1 << 2;
        const SYNC_WORD_VALID    = 1 << 3;
        const HEADER_VALID       = 1 << 4;
        const HEADER_ERR         = 1 << 5;
        const CRC_ERR            = 1 << 6;
        const CAD_DONE           = 1 << 7;
        const CAD_DETECTED       = 1 << 8;
        const TIMEOUT            = 1 << 9;
        const LR_FHSS_HOP        = 1 << 14;
    }
}

const IRQ_LABELS: &[(IrqFlags, &str)] = &[
    (IrqFlags::TX_DONE, "TxDone"),
    (IrqFlags::RX_DONE, "RxDone"),
    (IrqFlags::PREAMBLE_DETECTED, "PreambleDetected"),
    (IrqFlags::SYNC_WORD_VALID, "SyncWordValid"),
    (IrqFlags::HEADER_VALID, "HeaderValid"),
    (IrqFlags::HEADER_ERR, "HeaderErr"),
    (IrqFlags::CRC_ERR, "CrcErr"),
    (IrqFlags::CAD_DONE, "CadDone"),
    (IrqFlags::CAD_DETECTED, "CadDetected"),
    (IrqFlags::TIMEOUT, "Timeout"),
    (IrqFlags::LR_FHSS_HOP, "LrFhssHop"),
];

impl IrqFlags {
    /// Renders the set flags as `TxDone|RxDone`; empty set renders empty
    pub fn describe(&self) -> String {
        join_labels(IRQ_LABELS.iter().filter(|(f, _)| self.contains(*f)))
    }
}

bitflags! {
    /// FSK receive status byte, reported by the packet status query
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FskRxStatus: u8 {
        const PKT_SENT      = 1 << 0;
        const PKT_RECEIVED  = 1 << 1;
        const ABORT_ERR     = 1 << 2;
        const LENGTH_ERR    = 1 << 3;
        const CRC_ERR       = 1 << 4;
        const ADRS_ERR      = 1 << 5;
        const SYNC_ERR      = 1 << 6;
        const PREAMBLE_ERR  = 1 << 7;
    }
}

const FSK_RX_LABELS: &[(FskRxStatus, &str)] = &[
    (FskRxStatus::PKT_SENT, "pktSent"),
    (FskRxStatus::PKT_RECEIVED, "pktReceived"),
    (FskRxStatus::ABORT_ERR, "abortErr"),
    (FskRxStatus::LENGTH_ERR, "lengthErr"),
    (FskRxStatus::CRC_ERR, "crcErr"),
    (FskRxStatus::ADRS_ERR, "adrsErr"),
    (FskRxStatus::SYNC_ERR, "syncErr"),
    (FskRxStatus::PREAMBLE_ERR, "preambleErr"),
];

impl FskRxStatus {
    pub fn describe(&self) -> String {
        join_labels(FSK_RX_LABELS.iter().filter(|(f, _)| self.contains(*f)))
    }
}

bitflags! {
    /// Sleep configuration byte (bit 1 reserved)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SleepConfig: u8 {
        /// Wake on RTC timeout in addition to NSS
        const RTC_WAKEUP = 1 << 0;
        /// Retain configuration in sleep (cold start when clear)
        const WARM_START = 1 << 2;
    }
}

const SLEEP_LABELS: &[(SleepConfig, &str)] = &[
    (SleepConfig::RTC_WAKEUP, "rtcWakeup"),
    (SleepConfig::WARM_START, "warmStart"),
];

impl SleepConfig {
    /// Renders the set flags; an empty set means a cold start
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "coldStart".to_string();
        }
        join_labels(SLEEP_LABELS.iter().filter(|(f, _)| self.contains(*f)))
    }
}

bitflags! {
    /// Device error word reported by the error query command (bit 7 reserved)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceErrors: u16 {
        const RC64K_CALIB_ERR = 1 << 0;
        const RC13M_CALIB_ERR = 1 << 1;
        const PLL_CALIB_ERR   = 1 << 2;
        const ADC_CALIB_ERR   = 1 << 3;
        const IMG_CALIB_ERR   = 1 << 4;
        const XOSC_START_ERR  = 1 << 5;
        const PLL_LOCK_ERR    = 1 << 6;
        const PA_RAMP_ERR     = 1 << 8;
    }
}

const DEVICE_ERROR_LABELS: &[(DeviceErrors, &str)] = &[
    (DeviceErrors::RC64K_CALIB_ERR, "rc64kCalib"),
    (DeviceErrors::RC13M_CALIB_ERR, "rc13mCalib"),
    (DeviceErrors::PLL_CALIB_ERR, "pllCalib"),
    (DeviceErrors::ADC_CALIB_ERR, "adcCalib"),
    (DeviceErrors::IMG_CALIB_ERR, "imgCalib"),
    (DeviceErrors::XOSC_START_ERR, "xoscStart"),
    (DeviceErrors::PLL_LOCK_ERR, "pllLock"),
    (DeviceErrors::PA_RAMP_ERR, "paRamp"),
];

impl DeviceErrors {
    pub fn describe(&self) -> String {
        join_labels(DEVICE_ERROR_LABELS.iter().filter(|(f, _)| self.contains(*f)))
    }
}

fn join_labels<'a, F: 'a>(labels: impl Iterator<Item = &'a (F, &'a str)>) -> String {
    labels
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_field_extraction() {
        // chipMode=FS (4), cmdStatus=dataAvail (2)
        let status = Status::from_byte(0b0100_0100);
        assert_eq!(status.chip_mode(), 4);
        assert_eq!(status.command_status(), 2);
        assert_eq!(status.describe(), "(FS dataAvail)");
    }

    #[test]
    fn test_status_reserved_bits_ignored() {
        let with_reserved = Status::from_byte(0b1100_0101);
        let without = Status::from_byte(0b0100_0100);
        assert_eq!(with_reserved.describe(), without.describe());
    }

    #[test]
    fn test_status_undefined_values_fall_back_to_decimal() {
        // chipMode=0, cmdStatus=7
        let status = Status::from_byte(0b0000_1110);
        assert_eq!(status.describe(), "(0 7)");
    }

    #[test]
    fn test_irq_flags_describe() {
        let flags = IrqFlags::TX_DONE | IrqFlags::TIMEOUT;
        assert_eq!(flags.describe(), "TxDone|Timeout");
        assert_eq!(IrqFlags::empty().describe(), "");
    }

    #[test]
    fn test_irq_reserved_bits_not_rendered() {
        let flags = IrqFlags::from_bits_retain(0x0402); // RxDone + reserved bit 10
        assert_eq!(flags.describe(), "RxDone");
    }

    #[test]
    fn test_fsk_rx_status_describe() {
        let status = FskRxStatus::PKT_RECEIVED | FskRxStatus::CRC_ERR;
        assert_eq!(status.describe(), "pktReceived|crcErr");
    }

    #[test]
    fn test_sleep_config_describe() {
        assert_eq!(SleepConfig::empty().describe(), "coldStart");
        assert_eq!(SleepConfig::WARM_START.describe(), "warmStart");
        assert_eq!(
            (SleepConfig::RTC_WAKEUP | SleepConfig::WARM_START).describe(),
            "rtcWakeup|warmStart"
        );
    }

    #[test]
    fn test_device_errors_describe() {
        let errors = DeviceErrors::PLL_LOCK_ERR | DeviceErrors::PA_RAMP_ERR;
        assert_eq!(errors.describe(), "pllLock|paRamp");
    }
}
