//! Annotation records and display helpers

use std::time::Duration;

/// One decoded transaction, ready for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    /// Chip-select assert time (offset from capture start)
    pub start: Duration,
    /// Chip-select deassert time
    pub end: Duration,
    /// Human-readable transaction summary
    pub text: String,
}

impl Annotation {
    /// Time covered by this transaction
    pub fn span(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

/// Format a duration with a unit matched to its magnitude
///
/// Used for wake-up pulses, where the elapsed time *is* the payload.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        scaled(nanos as f64 / 1_000.0, "μs")
    } else if nanos < 1_000_000_000 {
        scaled(nanos as f64 / 1_000_000.0, "ms")
    } else {
        scaled(nanos as f64 / 1_000_000_000.0, "s")
    }
}

fn scaled(value: f64, unit: &str) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_unit_selection() {
        assert_eq!(format_duration(Duration::from_nanos(640)), "640ns");
        assert_eq!(format_duration(Duration::from_micros(500)), "500μs");
        assert_eq!(format_duration(Duration::from_nanos(1_250_000)), "1.25ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.5s");
    }

    #[test]
    fn test_annotation_span_is_saturating() {
        let annotation = Annotation {
            start: Duration::from_micros(50),
            end: Duration::from_micros(20),
            text: String::new(),
        };
        assert_eq!(annotation.span(), Duration::ZERO);
    }
}
