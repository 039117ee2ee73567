//! Durations (N months / N days) and prorata ratios between date ranges.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::money::{self, COMPUTATION_SCALING};
use erpsuite_core::{DomainError, DomainResult};

use crate::messages;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationKind {
    Month,
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    pub name: String,
    pub kind: DurationKind,
    pub value: u32,
}

/// `date` shifted by `duration`, or `date` itself when no duration is given.
pub fn compute_duration(duration: Option<&Duration>, date: NaiveDate) -> DomainResult<NaiveDate> {
    let Some(duration) = duration else {
        return Ok(date);
    };
    let shifted = match duration.kind {
        DurationKind::Month => date.checked_add_months(Months::new(duration.value)),
        DurationKind::Day => date.checked_add_days(Days::new(u64::from(duration.value))),
    };
    shifted.ok_or_else(|| DomainError::inconsistency(messages::DATE_OUT_OF_RANGE))
}

/// Share of `[total_start, total_end]` covered by `[start, end]`.
///
/// Both ranges include their end date.
pub fn compute_ratio(
    start: NaiveDate,
    end: NaiveDate,
    total_start: NaiveDate,
    total_end: NaiveDate,
) -> DomainResult<Decimal> {
    let total_days = (total_end - total_start).num_days() + 1;
    let computed_days = (end - start).num_days() + 1;
    money::divide(
        Decimal::from(computed_days),
        Decimal::from(total_days),
        COMPUTATION_SCALING,
    )
}
