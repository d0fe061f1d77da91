//! Integration tests for the SX126x annotator
//!
//! These tests drive the full pipeline from capture events to emitted
//! annotations, including:
//! - Golden annotations per command against both table generations
//! - Packet-type context carried across transactions
//! - Degradation on unknown opcodes and malformed framing
//! - Decode determinism over replayed event streams

use std::time::Duration;

use sx126x_annotate::{Annotation, Annotator, CaptureEvent};
use sx126x_protocol::CommandSet;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// One framed transaction as paired (mosi, miso) bytes
    pub fn transaction(start_us: u64, end_us: u64, bytes: &[(u8, u8)]) -> Vec<CaptureEvent> {
        let mut events = vec![CaptureEvent::FrameStart {
            time: Duration::from_micros(start_us),
        }];
        events.extend(bytes.iter().map(|&(mosi, miso)| CaptureEvent::Transfer {
            mosi,
            miso,
        }));
        events.push(CaptureEvent::FrameEnd {
            time: Duration::from_micros(end_us),
        });
        events
    }

    /// Run an event stream through a fresh annotator
    pub fn run(set: CommandSet, events: &[CaptureEvent]) -> Vec<Annotation> {
        let mut annotator = Annotator::new(set);
        events
            .iter()
            .filter_map(|&event| annotator.process_event(event))
            .collect()
    }

    /// Pair every MOSI byte with an idle-status MISO byte
    pub fn with_status_miso(mosi: &[u8]) -> Vec<(u8, u8)> {
        // chipMode STBY_RC, cmdStatus dataAvail on every returned byte
        mosi.iter().map(|&b| (b, 0x24)).collect()
    }
}

use helpers::{run, transaction, with_status_miso};

// ============================================================================
// Golden Annotations
// ============================================================================

#[test]
fn test_lora_modulation_params_after_set_packet_type() {
    let mut events = transaction(0, 20, &with_status_miso(&[0x8A, 0x01]));
    events.extend(transaction(
        30,
        80,
        &with_status_miso(&[0x8B, 0x07, 0x04, 0x01, 0x00]),
    ));

    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0].text, "SetPacketType LoRa (STBY_RC dataAvail)");

    let text = &annotations[1].text;
    assert!(text.contains("SF7"), "{text}");
    assert!(text.contains("bw 125KHz"), "{text}");
    assert!(text.contains("CR4/5"), "{text}");
    assert!(text.contains("LDRO OFF"), "{text}");
}

#[test]
fn test_fsk_modulation_params_pulse_shape() {
    let mut events = transaction(0, 20, &with_status_miso(&[0x8A, 0x00]));
    // bit rate ≈ 300 kbps, Gaussian BT 0.5
    events.extend(transaction(
        30,
        90,
        &with_status_miso(&[0x8B, 0x00, 0x0D, 0x55, 0x09, 0x0B, 0x00, 0x10, 0x00]),
    ));

    let annotations = run(CommandSet::Legacy, &events);
    assert!(annotations[1].text.contains("BT 0.5"), "{}", annotations[1].text);
}

#[test]
fn test_register_write_against_both_generations() {
    let events = transaction(0, 30, &with_status_miso(&[0x0D, 0x08, 0xE7, 0x38]));

    let legacy = run(CommandSet::Legacy, &events);
    assert_eq!(
        legacy[0].text,
        "WriteRegister paImax <-- 38 (STBY_RC dataAvail)"
    );

    let extended = run(CommandSet::Extended, &events);
    assert_eq!(
        extended[0].text,
        "WriteRegister OcpConfig <-- 38 (STBY_RC dataAvail)"
    );
}

#[test]
fn test_register_write_to_unknown_address() {
    let events = transaction(0, 30, &with_status_miso(&[0x0D, 0x12, 0x34, 0xAB]));
    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(
        annotations[0].text,
        "WriteRegister 0x1234 (not found) <-- ab (STBY_RC dataAvail)"
    );
}

#[test]
fn test_extended_only_commands_are_unknown_to_legacy() {
    let events = transaction(0, 30, &with_status_miso(&[0x17, 0x00, 0x00, 0x00]));

    let legacy = run(CommandSet::Legacy, &events);
    assert_eq!(
        legacy[0].text,
        "0x17 (unknown command) (STBY_RC dataAvail)"
    );

    let extended = run(CommandSet::Extended, &events);
    assert!(extended[0].text.starts_with("GetDeviceErrors"));
}

// ============================================================================
// Framing Edge Cases
// ============================================================================

#[test]
fn test_wake_up_pulse() {
    let events = transaction(100, 600, &[]);
    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].text, "500μs");
}

#[test]
fn test_unknown_opcode_does_not_disturb_later_transactions() {
    let mut events = transaction(0, 10, &with_status_miso(&[0xFF, 0x00]));
    events.extend(transaction(20, 30, &with_status_miso(&[0x84])));

    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(annotations.len(), 2);
    assert!(annotations[0].text.contains("0xff"), "{}", annotations[0].text);
    assert!(
        annotations[0].text.contains("unknown command"),
        "{}",
        annotations[0].text
    );
    assert_eq!(annotations[1].text, "SetSleep");
}

#[test]
fn test_error_and_stray_transfer_produce_no_annotation() {
    let events = [
        CaptureEvent::Error,
        CaptureEvent::Transfer {
            mosi: 0x80,
            miso: 0x00,
        },
    ];
    assert!(run(CommandSet::Legacy, &events).is_empty());
}

#[test]
fn test_missing_frame_end_loses_exactly_one_transaction() {
    let mut events = vec![
        CaptureEvent::FrameStart {
            time: Duration::from_micros(0),
        },
        CaptureEvent::Transfer {
            mosi: 0x86,
            miso: 0x24,
        },
    ];
    events.extend(transaction(50, 70, &with_status_miso(&[0x80, 0x00])));

    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(annotations.len(), 1);
    assert_eq!(
        annotations[0].text,
        "SetStandby STDBY_RC (STBY_RC dataAvail)"
    );
}

#[test]
fn test_annotation_spans_the_transaction() {
    let events = transaction(15, 45, &with_status_miso(&[0x84]));
    let annotations = run(CommandSet::Legacy, &events);
    assert_eq!(annotations[0].start, Duration::from_micros(15));
    assert_eq!(annotations[0].end, Duration::from_micros(45));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_replaying_a_stream_yields_identical_annotations() {
    let mut events = transaction(0, 20, &with_status_miso(&[0x8A, 0x01]));
    events.extend(transaction(
        30,
        80,
        &with_status_miso(&[0x8C, 0x00, 0x08, 0x00, 0x0C, 0x00, 0x00]),
    ));
    events.extend(transaction(90, 100, &with_status_miso(&[0xFF])));

    let first = run(CommandSet::Legacy, &events);
    let second = run(CommandSet::Legacy, &events);
    assert_eq!(first, second);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn capture_event() -> impl Strategy<Value = CaptureEvent> {
        prop_oneof![
            (0u64..10_000_000).prop_map(|us| CaptureEvent::FrameStart {
                time: Duration::from_micros(us)
            }),
            (any::<u8>(), any::<u8>())
                .prop_map(|(mosi, miso)| CaptureEvent::Transfer { mosi, miso }),
            (0u64..10_000_000).prop_map(|us| CaptureEvent::FrameEnd {
                time: Duration::from_micros(us)
            }),
            Just(CaptureEvent::Error),
        ]
    }

    fn command_set() -> impl Strategy<Value = CommandSet> {
        prop_oneof![Just(CommandSet::Legacy), Just(CommandSet::Extended)]
    }

    proptest! {
        #[test]
        fn arbitrary_streams_never_panic(
            set in command_set(),
            events in prop::collection::vec(capture_event(), 0..200)
        ) {
            let mut annotator = Annotator::new(set);
            for event in events {
                annotator.process_event(event);
            }
        }

        #[test]
        fn one_annotation_per_frame_end(
            set in command_set(),
            events in prop::collection::vec(capture_event(), 0..200)
        ) {
            let mut annotator = Annotator::new(set);
            let mut emitted = 0usize;
            let mut frame_ends = 0usize;
            for event in events {
                if matches!(event, CaptureEvent::FrameEnd { .. }) {
                    frame_ends += 1;
                }
                if annotator.process_event(event).is_some() {
                    emitted += 1;
                }
            }
            prop_assert_eq!(emitted, frame_ends);
        }

        #[test]
        fn annotation_text_is_never_empty(
            set in command_set(),
            bytes in prop::collection::vec((any::<u8>(), any::<u8>()), 0..32)
        ) {
            let events = helpers::transaction(0, 100, &bytes);
            for annotation in helpers::run(set, &events) {
                prop_assert!(!annotation.text.is_empty());
            }
        }
    }
}
