//! The dispatch loop: drives each fetched record through delivery and
//! status writeback.
//!
//! Records are processed strictly one at a time. The delivery channel is a
//! single shared resource and must never see two in-flight sends, so the
//! loop finishes one record's acknowledgment before touching the next.

use tracing::{debug, error, info, warn};

use crate::channel::DeliveryChannel;
use crate::message::format_message;
use crate::notion::{RecordStore, StoreError};
use crate::record::{Record, SendStatus, STATUS_NOT_SENT};

/// Terminal state of one record after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Status was anything other than "Not Sent"; nothing was attempted.
    Skipped { status: String },
    /// The message went out. `acked` reports whether the "Sent" writeback
    /// stuck; when it did not, the record stays eligible for the next run.
    Delivered { acked: bool },
    /// Delivery failed. `acked` reports whether the "Error Sending"
    /// writeback stuck.
    Failed { acked: bool },
}

/// Tally of one dispatch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Records that read "Not Sent" at fetch time.
    pub pending: usize,
    /// Records a delivery was attempted for.
    pub processed: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Status writebacks that did not stick.
    pub ack_failures: usize,
    /// Per-record outcomes in store order.
    pub outcomes: Vec<(String, RecordOutcome)>,
}

/// Sequential dispatcher over one fetched batch.
pub struct Dispatcher<'a, S, C> {
    store: &'a S,
    channel: &'a C,
    destination: String,
}

impl<'a, S: RecordStore, C: DeliveryChannel> Dispatcher<'a, S, C> {
    pub fn new(store: &'a S, channel: &'a C, destination: String) -> Self {
        Self {
            store,
            channel,
            destination,
        }
    }

    /// Fetch the current batch and dispatch every record.
    ///
    /// Only the initial fetch can fail the run as a whole; per-record
    /// faults are absorbed into the report and the loop moves on.
    pub fn run(&self) -> Result<RunReport, StoreError> {
        let records = self.store.fetch_records()?;

        let pending = records
            .iter()
            .filter(|record| record.send_status() == STATUS_NOT_SENT)
            .count();
        let mut report = RunReport {
            pending,
            ..RunReport::default()
        };
        info!(
            total = records.len(),
            pending = report.pending,
            "fetched records"
        );

        for record in &records {
            let outcome = self.dispatch_record(record);
            match &outcome {
                RecordOutcome::Skipped { .. } => report.skipped += 1,
                RecordOutcome::Delivered { acked } => {
                    report.processed += 1;
                    report.delivered += 1;
                    if !acked {
                        report.ack_failures += 1;
                    }
                }
                RecordOutcome::Failed { acked } => {
                    report.processed += 1;
                    report.failed += 1;
                    if !acked {
                        report.ack_failures += 1;
                    }
                }
            }
            report.outcomes.push((record.id.clone(), outcome));
        }

        info!(
            processed = report.processed,
            delivered = report.delivered,
            failed = report.failed,
            skipped = report.skipped,
            ack_failures = report.ack_failures,
            "dispatch complete"
        );
        Ok(report)
    }

    fn dispatch_record(&self, record: &Record) -> RecordOutcome {
        let status = record.send_status();
        if status != STATUS_NOT_SENT {
            debug!(record = %record.id, status, "skipping record");
            return RecordOutcome::Skipped {
                status: status.to_string(),
            };
        }

        info!(record = %record.id, "delivering record");
        let message = format_message(record);

        let delivered = match self.channel.send(&self.destination, &message) {
            Ok(result) if result.success => {
                info!(record = %record.id, message_id = %result.message_id, "message delivered");
                true
            }
            Ok(result) => {
                warn!(
                    record = %record.id,
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "channel rejected message"
                );
                false
            }
            Err(err) => {
                warn!(record = %record.id, %err, "delivery failed");
                false
            }
        };

        let target = if delivered {
            SendStatus::Sent
        } else {
            SendStatus::ErrorSending
        };

        // Writeback failure is logged and counted but never blocks the
        // next record and is not retried within this run.
        let acked = match self.store.update_send_status(&record.id, target) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    record = %record.id,
                    status = target.as_str(),
                    %err,
                    "failed to write back send status"
                );
                false
            }
        };

        if delivered {
            RecordOutcome::Delivered { acked }
        } else {
            RecordOutcome::Failed { acked }
        }
    }
}
