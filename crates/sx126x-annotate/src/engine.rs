//! Transaction accumulator
//!
//! Assembles the per-transaction byte sequences from the capture event
//! stream and drives the decode-and-emit step. The state machine is
//! Idle → Accumulating → (emit) → Idle; a transaction that never sees its
//! frame end is silently replaced by the next frame start.

use std::time::Duration;

use tracing::{debug, warn};

use sx126x_protocol::{describe_transaction, CommandSet, CommandTable, DecodeCtx, PacketType};

use crate::annotation::{format_duration, Annotation};
use crate::events::CaptureEvent;

/// Text emitted for a frame end with no transaction accumulated at all
const EMPTY_TRANSACTION: &str = "?? wake ??";

enum State {
    Idle,
    Accumulating {
        start: Duration,
        mosi: Vec<u8>,
        miso: Vec<u8>,
        /// Buffers still hold only the alignment sentinel
        seeded: bool,
    },
}

/// The annotation engine
///
/// Owns the accumulation buffers and the packet-type context; processes one
/// capture event at a time and emits at most one [`Annotation`] per call
/// (exactly one per [`CaptureEvent::FrameEnd`]).
pub struct Annotator {
    set: CommandSet,
    table: &'static CommandTable,
    ctx: DecodeCtx,
    state: State,
}

impl Annotator {
    /// Create an annotator decoding against the given command set
    pub fn new(set: CommandSet) -> Self {
        Self {
            set,
            table: set.table(),
            ctx: DecodeCtx::default(),
            state: State::Idle,
        }
    }

    /// The command set this annotator decodes against
    pub fn command_set(&self) -> CommandSet {
        self.set
    }

    /// Packet type most recently observed on the bus
    pub fn packet_type(&self) -> PacketType {
        self.ctx.packet_type
    }

    /// Process one capture event
    ///
    /// Returns an annotation exactly when the event is a frame end. Framing
    /// anomalies (a transfer outside a transaction, a capture-layer error)
    /// are logged and otherwise ignored.
    pub fn process_event(&mut self, event: CaptureEvent) -> Option<Annotation> {
        match event {
            CaptureEvent::FrameStart { time } => {
                if matches!(self.state, State::Accumulating { .. }) {
                    debug!("frame start while accumulating; discarding partial transaction");
                }
                // Seed both sequences with the alignment sentinel; the first
                // real transfer replaces it
                self.state = State::Accumulating {
                    start: time,
                    mosi: vec![0x00],
                    miso: vec![0x00],
                    seeded: true,
                };
                None
            }
            CaptureEvent::Transfer { mosi, miso } => {
                match &mut self.state {
                    State::Accumulating {
                        mosi: mosi_buf,
                        miso: miso_buf,
                        seeded,
                        ..
                    } => {
                        if *seeded {
                            mosi_buf.clear();
                            miso_buf.clear();
                            *seeded = false;
                        }
                        mosi_buf.push(mosi);
                        miso_buf.push(miso);
                    }
                    State::Idle => {
                        warn!(mosi, miso, "transfer outside a transaction; ignoring");
                    }
                }
                None
            }
            CaptureEvent::FrameEnd { time } => Some(self.finish(time)),
            CaptureEvent::Error => {
                warn!("capture layer reported malformed framing");
                None
            }
        }
    }

    fn finish(&mut self, end: Duration) -> Annotation {
        let state = std::mem::replace(&mut self.state, State::Idle);
        let annotation = match state {
            State::Idle => Annotation {
                start: end,
                end,
                text: EMPTY_TRANSACTION.to_string(),
            },
            State::Accumulating {
                start, mosi, miso, ..
            } => {
                let text = if mosi == [0x00] {
                    // Wake-up pulse: chip select toggled without a command
                    format_duration(end.saturating_sub(start))
                } else {
                    describe_transaction(self.table, &mut self.ctx, &mosi, &miso)
                };
                Annotation { start, end, text }
            }
        };
        debug!(text = %annotation.text, "transaction decoded");
        annotation
    }
}
