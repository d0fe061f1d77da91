//! SX126x SPI Transaction Annotator
//!
//! This crate turns a stream of per-byte SPI capture events into one
//! human-readable annotation per chip-select framed transaction, using the
//! command tables from [`sx126x_protocol`].
//!
//! # Architecture
//!
//! The capture layer (logic analyzer integration, replay tool, …) delivers
//! three event kinds per transaction — frame start, paired byte transfers,
//! frame end — plus an error signal for malformed framing. The [`Annotator`]
//! accumulates the two byte sequences, decodes on frame end, and emits an
//! [`Annotation`] spanning the transaction:
//!
//! ```rust
//! use std::time::Duration;
//! use sx126x_annotate::{Annotator, CaptureEvent};
//! use sx126x_protocol::CommandSet;
//!
//! let mut annotator = Annotator::new(CommandSet::Legacy);
//!
//! annotator.process_event(CaptureEvent::FrameStart { time: Duration::from_micros(10) });
//! annotator.process_event(CaptureEvent::Transfer { mosi: 0x80, miso: 0xA2 });
//! annotator.process_event(CaptureEvent::Transfer { mosi: 0x00, miso: 0x24 });
//! let annotation = annotator
//!     .process_event(CaptureEvent::FrameEnd { time: Duration::from_micros(25) })
//!     .expect("frame end always yields an annotation");
//!
//! assert_eq!(annotation.text, "SetStandby STDBY_RC (STBY_RC dataAvail)");
//! ```
//!
//! Decoding is strictly best-effort: framing anomalies are logged and
//! skipped, unknown opcodes and short payloads degrade to hex fallbacks, and
//! no transaction can corrupt the decoding of the next. The only state
//! carried across transactions is the packet-type context the decoders need.

pub mod annotation;
pub mod engine;
pub mod events;

pub use annotation::{format_duration, Annotation};
pub use engine::Annotator;
pub use events::CaptureEvent;
