//! Batch reporting.
//!
//! Batches iterate a collection of records and delegate each one to a domain
//! service. A failing item is an anomaly: it is logged and counted, and the
//! batch moves on.

use serde::{Deserialize, Serialize};

use crate::error::DomainResult;

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub done: u32,
    pub anomaly: u32,
    pub comments: Vec<String>,
}

impl BatchReport {
    pub fn increment_done(&mut self) {
        self.done += 1;
    }

    pub fn increment_anomaly(&mut self, comment: impl Into<String>) {
        self.anomaly += 1;
        self.comments.push(comment.into());
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.done += other.done;
        self.anomaly += other.anomaly;
        self.comments.extend(other.comments);
    }
}

/// Apply `f` to every item, counting successes and anomalies.
pub fn run_batch<I, T, F>(name: &str, items: I, mut f: F) -> BatchReport
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> DomainResult<()>,
{
    let mut report = BatchReport::default();
    for item in items {
        match f(item) {
            Ok(()) => report.increment_done(),
            Err(e) => {
                tracing::warn!(batch = name, error = %e, "batch item failed");
                report.increment_anomaly(e.message().to_string());
            }
        }
    }
    tracing::info!(
        batch = name,
        done = report.done,
        anomaly = report.anomaly,
        "batch finished"
    );
    report
}
