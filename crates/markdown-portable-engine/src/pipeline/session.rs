use std::{
    future::Future,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::{debug, warn};

use super::{
    preview::{ConversionOutcome, PreviewSnapshot, PreviewStatus},
    stages::{Conversion, ConversionError, convert_cancellable},
};

/// Submission order token. Only the latest issued ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConversionTicket {
    generation: u64,
}

impl ConversionTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct PreviewState {
    snapshot: PreviewSnapshot,
    has_good_result: bool,
}

/// Live-preview conversion for one editing session.
///
/// Results commit by submission order, not completion order: a conversion
/// finishing after a newer one was submitted is discarded on arrival.
/// Clones share the same session.
#[derive(Debug, Clone, Default)]
pub struct ConversionPipeline {
    latest: Arc<AtomicU64>,
    state: Arc<Mutex<PreviewState>>,
}

impl ConversionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, superseding all earlier ones.
    pub fn begin(&self) -> ConversionTicket {
        ConversionTicket {
            generation: self.latest.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    pub fn is_current(&self, ticket: ConversionTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// Commits `result` if `ticket` is still the latest issued.
    pub fn finish(
        &self,
        ticket: ConversionTicket,
        result: Result<Conversion, ConversionError>,
    ) -> ConversionOutcome {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) || ticket.generation <= state.snapshot.generation {
            debug!("discarding superseded conversion {}", ticket.generation);
            return ConversionOutcome::Superseded;
        }

        let next = match result {
            Ok(conv) => {
                state.has_good_result = true;
                PreviewSnapshot {
                    generation: ticket.generation,
                    status: if conv.blocks.is_empty() {
                        PreviewStatus::Empty
                    } else {
                        PreviewStatus::Current
                    },
                    blocks: conv.blocks.into(),
                    warnings: conv.warnings.into(),
                    content_hash: Some(conv.content_hash),
                    error: None,
                }
            }
            Err(e) => {
                warn!("conversion {} failed: {e}", ticket.generation);
                if state.has_good_result {
                    PreviewSnapshot {
                        generation: ticket.generation,
                        status: PreviewStatus::Degraded,
                        error: Some(e.to_string()),
                        ..state.snapshot.clone()
                    }
                } else {
                    PreviewSnapshot {
                        generation: ticket.generation,
                        status: PreviewStatus::Failed,
                        error: Some(e.to_string()),
                        ..PreviewSnapshot::initial()
                    }
                }
            }
        };

        let status = next.status;
        state.snapshot = next;
        ConversionOutcome::Committed(status)
    }

    /// Submits `text` for conversion.
    ///
    /// The ticket is issued at call time, so submission order is the order
    /// of `convert` calls even if the returned futures are polled later.
    /// The work runs on the blocking pool and stops early once superseded.
    pub fn convert(
        &self,
        text: String,
    ) -> impl Future<Output = ConversionOutcome> + Send + 'static + use<> {
        let ticket = self.begin();
        let this = self.clone();
        async move {
            let latest = this.latest.clone();
            let joined = tokio::task::spawn_blocking(move || {
                convert_cancellable(&text, || {
                    latest.load(Ordering::SeqCst) != ticket.generation
                })
            })
            .await;

            match joined {
                Ok(Ok(Some(conv))) => this.finish(ticket, Ok(conv)),
                Ok(Ok(None)) => {
                    debug!("conversion {} abandoned", ticket.generation);
                    ConversionOutcome::Superseded
                }
                Ok(Err(e)) => this.finish(ticket, Err(e)),
                Err(e) => this.finish(ticket, Err(ConversionError::Task(e.to_string()))),
            }
        }
    }

    pub fn preview(&self) -> PreviewSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }
}
