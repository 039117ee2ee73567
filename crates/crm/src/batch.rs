//! CRM batches: event reminders, sales targets and call-for-tenders reminders.

use std::collections::BTreeMap;

use chrono::{Duration as TimeDelta, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_base::{Duration, DurationKind, compute_duration};
use erpsuite_core::i18n::Message;
use erpsuite_core::{BatchReport, DomainError, DomainResult, UserId, run_batch};

use crate::messages;
use crate::model::{CrmBatch, CrmBatchAction, CrmEvent, Opportunity, Target, TargetConfiguration};

/// Placeholder replaced by the list of opportunities in call-for-tenders templates.
pub const CALL_FOR_TENDERS_LIST: &str = "_callForTendersList";

/// An email produced by a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEmail {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to_user: Option<UserId>,
    pub subject: String,
    pub body: String,
}

/// Records a CRM batch works on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrmBatchData {
    pub events: Vec<CrmEvent>,
    pub opportunities: Vec<Opportunity>,
    pub target_configurations: Vec<TargetConfiguration>,
    pub targets: Vec<Target>,
    pub outbox: Vec<ReminderEmail>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrmBatchService;

impl CrmBatchService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(
        &self,
        batch: &CrmBatch,
        data: &mut CrmBatchData,
        now: NaiveDateTime,
    ) -> DomainResult<BatchReport> {
        let action = CrmBatchAction::from_code(batch.action_select).ok_or_else(|| {
            DomainError::inconsistency(
                Message::new(messages::BATCH_UNKNOWN_ACTION)
                    .arg(batch.action_select)
                    .arg(&batch.code),
            )
        })?;
        tracing::info!(batch = %batch.code, ?action, "running crm batch");

        match action {
            CrmBatchAction::EventReminder => Ok(self.event_reminder(data, now)),
            CrmBatchAction::Target => Ok(self.target(data)),
            CrmBatchAction::CallForTendersReminder => {
                self.call_for_tenders_reminder(batch, data, now)
            }
        }
    }

    /// Queue a reminder for every event whose reminder time has passed.
    pub fn event_reminder(&self, data: &mut CrmBatchData, now: NaiveDateTime) -> BatchReport {
        let CrmBatchData { events, outbox, .. } = data;
        let pending = events
            .iter_mut()
            .filter(|e| !e.is_reminded && e.reminder_minutes.is_some());

        run_batch("crm.event_reminder", pending, |event| {
            let start = event.start_date_time.ok_or_else(|| {
                DomainError::missing_field(
                    Message::new(messages::EVENT_WITHOUT_START).arg(&event.subject),
                )
            })?;
            let minutes = i64::from(event.reminder_minutes.unwrap_or_default());
            if now < start - TimeDelta::minutes(minutes) {
                return Ok(());
            }
            event.is_reminded = true;
            outbox.push(ReminderEmail {
                from: None,
                to_user: None,
                subject: event.subject.clone(),
                body: format!("{} starts at {}", event.subject, start.format("%Y-%m-%d %H:%M")),
            });
            Ok(())
        })
    }

    /// Recompute the achievement of every target configuration from won opportunities.
    pub fn target(&self, data: &mut CrmBatchData) -> BatchReport {
        let CrmBatchData {
            opportunities,
            target_configurations,
            targets,
            ..
        } = data;

        run_batch("crm.target", target_configurations.iter(), |config| {
            if config.to_date < config.from_date {
                return Err(DomainError::inconsistency(
                    Message::new(messages::TARGET_INVALID_PERIOD).arg(&config.code),
                ));
            }
            let won: Vec<&Opportunity> = opportunities
                .iter()
                .filter(|o| o.is_won() && o.user_id == Some(config.user_id))
                .filter(|o| {
                    o.expected_close_date
                        .is_some_and(|d| d >= config.from_date && d <= config.to_date)
                })
                .collect();

            let target = Target {
                configuration_id: config.id,
                user_id: config.user_id,
                from_date: config.from_date,
                to_date: config.to_date,
                opportunity_amount_won: won.iter().map(|o| o.amount).sum::<Decimal>(),
                opportunity_amount_won_target: config.opportunity_amount_won_target,
                opportunity_won_count: u32::try_from(won.len()).unwrap_or(u32::MAX),
            };
            targets.retain(|t| t.configuration_id != config.id);
            targets.push(target);
            Ok(())
        })
    }

    /// Email each user the open opportunities whose call-for-tenders deadline
    /// falls within the batch month limit.
    pub fn call_for_tenders_reminder(
        &self,
        batch: &CrmBatch,
        data: &mut CrmBatchData,
        now: NaiveDateTime,
    ) -> DomainResult<BatchReport> {
        let months = u32::try_from(batch.month_limit_nbr)
            .ok()
            .filter(|m| *m > 0)
            .ok_or_else(|| DomainError::inconsistency(messages::BATCH_MONTH_NOT_POSITIVE))?;
        let template = batch
            .template
            .as_ref()
            .filter(|t| t.content.contains(CALL_FOR_TENDERS_LIST))
            .ok_or_else(|| DomainError::inconsistency(messages::BATCH_IMPROPER_TEMPLATE))?;
        let sender = batch
            .sender_email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DomainError::configuration(messages::BATCH_SENDER_EMAIL_NOT_CONFIGURED))?;

        let today = now.date();
        let limit = compute_duration(
            Some(&Duration {
                name: format!("{months} months"),
                kind: DurationKind::Month,
                value: months,
            }),
            today,
        )?;

        let mut per_user: BTreeMap<UserId, Vec<&Opportunity>> = BTreeMap::new();
        for opp in data.opportunities.iter().filter(|o| !o.is_closed()) {
            let due = opp
                .call_for_tenders_deadline
                .is_some_and(|d| d >= today && d <= limit);
            if let (true, Some(user_id)) = (due, opp.user_id) {
                per_user.entry(user_id).or_default().push(opp);
            }
        }

        let outbox = &mut data.outbox;
        Ok(run_batch("crm.call_for_tenders", per_user, |(user_id, opps)| {
            let list = opps
                .iter()
                .map(|o| {
                    let deadline = o
                        .call_for_tenders_deadline
                        .map(|d| d.to_string())
                        .unwrap_or_default();
                    format!("- {} ({})", o.name, deadline)
                })
                .collect::<Vec<_>>()
                .join("\n");
            outbox.push(ReminderEmail {
                from: Some(sender.to_string()),
                to_user: Some(user_id),
                subject: messages::CALL_FOR_TENDERS_SUBJECT.to_string(),
                body: template.content.replace(CALL_FOR_TENDERS_LIST, &list),
            });
            Ok(())
        }))
    }
}
