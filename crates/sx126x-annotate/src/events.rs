//! Capture-layer event stream
//!
//! The capture collaborator delivers these in arrival order, one transaction
//! at a time: `FrameStart, Transfer*, FrameEnd`. Timestamps are offsets from
//! the start of the capture.

use std::time::Duration;

/// One event from the SPI capture layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureEvent {
    /// Chip select asserted: a transaction begins
    FrameStart {
        /// Offset from capture start
        time: Duration,
    },

    /// One full byte clocked in each direction
    Transfer {
        /// Host-to-device byte
        mosi: u8,
        /// Device-to-host byte
        miso: u8,
    },

    /// Chip select deasserted: the transaction is complete
    FrameEnd {
        /// Offset from capture start
        time: Duration,
    },

    /// The capture layer detected malformed framing
    Error,
}

impl CaptureEvent {
    /// Check if this event delimits a transaction
    pub fn is_frame_boundary(&self) -> bool {
        matches!(
            self,
            CaptureEvent::FrameStart { .. } | CaptureEvent::FrameEnd { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_boundary_classification() {
        let start = CaptureEvent::FrameStart {
            time: Duration::ZERO,
        };
        assert!(start.is_frame_boundary());

        let transfer = CaptureEvent::Transfer {
            mosi: 0x80,
            miso: 0xA2,
        };
        assert!(!transfer.is_frame_boundary());
        assert!(!CaptureEvent::Error.is_frame_boundary());
    }
}
