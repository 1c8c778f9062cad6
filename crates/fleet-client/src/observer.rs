//! Observability sink for backend calls
//!
//! The client hands exactly one [`CallRecord`] to its observer per call
//! attempt, after the outcome is known.

use std::time::Duration;

use fleet_core::FailureKind;
use reqwest::Method;
use tracing::{info, warn};

/// Outcome class of a single backend call
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Success { status: u16 },
    Failure(FailureKind),
}

impl CallOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CallOutcome::Success { .. } => "success",
            CallOutcome::Failure(kind) => kind.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success { .. })
    }
}

/// What the observer is told about each call
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: Method,
    pub url: String,
    pub outcome: CallOutcome,
    pub elapsed: Duration,
}

impl CallRecord {
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Receives one record per backend call
pub trait CallObserver: Send + Sync {
    fn record(&self, record: &CallRecord);
}

/// Default observer: one structured log event per call
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn record(&self, record: &CallRecord) {
        match &record.outcome {
            CallOutcome::Success { status } => info!(
                method = %record.method,
                url = %record.url,
                outcome = record.outcome.label(),
                status = *status,
                elapsed_ms = record.elapsed_ms(),
                "Backend call completed"
            ),
            CallOutcome::Failure(kind) => warn!(
                method = %record.method,
                url = %record.url,
                outcome = record.outcome.label(),
                status = kind.status_code(),
                elapsed_ms = record.elapsed_ms(),
                "Backend call failed"
            ),
        }
    }
}
