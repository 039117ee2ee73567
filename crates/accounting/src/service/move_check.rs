use std::sync::Arc;

use erpsuite_core::i18n::Message;
use erpsuite_core::record_context::Values;
use erpsuite_core::{ActionContext, DomainError, DomainResult};

use crate::directory::AccountingDirectory;
use crate::entry::{Move, MoveStatus};
use crate::messages;
use crate::model::PeriodStatus;

#[derive(Clone)]
pub struct MoveCheckService {
    directory: Arc<dyn AccountingDirectory>,
}

impl MoveCheckService {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self { directory }
    }

    /// Every dated line must fall inside the move period.
    pub fn check_dates(&self, mv: &Move) -> DomainResult<()> {
        let Some(period) = mv.period.as_ref() else {
            return Ok(());
        };
        for line in &mv.lines {
            if let Some(date) = line.date {
                if !period.contains(date) {
                    return Err(DomainError::inconsistency(
                        Message::new(messages::LINE_DATE_OUTSIDE_PERIOD)
                            .arg(line.counter)
                            .arg(&period.code),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Open periods accept everyone. Temporarily closed periods accept the
    /// roles listed on the period. Closed periods accept nobody.
    pub fn is_authorized_to_account_on_period(&self, mv: &Move, ctx: &ActionContext) -> bool {
        let Some(period) = mv.period.as_ref() else {
            return true;
        };
        match period.status {
            PeriodStatus::Opened => true,
            PeriodStatus::TemporarilyClosed => period.authorized_roles.iter().any(|r| ctx.has_role(r)),
            PeriodStatus::Closed => false,
        }
    }

    pub fn check_period_permission(&self, mv: &Move, ctx: &ActionContext) -> DomainResult<()> {
        let Some(period) = mv.period.as_ref() else {
            return Ok(());
        };
        if period.is_closed() && !self.is_authorized_to_account_on_period(mv, ctx) {
            return Err(DomainError::inconsistency(
                Message::new(messages::PERIOD_NO_PERMISSION).arg(&period.code),
            ));
        }
        Ok(())
    }

    pub fn check_period_and_status(&self, mv: &Move) -> Values {
        let period_closed = mv.period.as_ref().is_some_and(|p| p.is_closed());
        let simulated = mv.status == MoveStatus::Simulated;

        let mut values = Values::new();
        values.insert(
            "$simulatedPeriodClosed".into(),
            (simulated && mv.period.as_ref().is_some_and(|p| p.status == PeriodStatus::Closed)).into(),
        );
        values.insert("$periodClosed".into(), (!simulated && period_closed).into());
        values
    }

    pub fn check_related_cut_off_moves(&self, mv: &Move) -> bool {
        self.directory.has_related_cut_off_moves(mv.id)
    }

    pub fn check_partner_compatible(&self, mv: &Move) -> DomainResult<()> {
        let (Some(partner), Some(journal)) = (mv.partner.as_ref(), mv.journal.as_ref()) else {
            return Ok(());
        };
        if journal.compatible_partner_types.is_empty()
            || journal
                .compatible_partner_types
                .iter()
                .any(|t| partner.has_type(*t))
        {
            return Ok(());
        }
        Err(DomainError::inconsistency(
            Message::new(messages::PARTNER_INCOMPATIBLE)
                .arg(&partner.name)
                .arg(&journal.code),
        ))
    }

    pub fn check_duplicated_move_origin(&self, mv: &Move) -> DomainResult<()> {
        let Some(journal) = mv.journal.as_ref() else {
            return Ok(());
        };
        let Some(origin) = mv.origin.as_deref().filter(|o| !o.is_empty()) else {
            return Ok(());
        };
        if !journal.has_duplicate_detection_on_origin {
            return Ok(());
        }

        let duplicates = self.directory.moves_with_same_origin(mv);
        if duplicates.is_empty() {
            return Ok(());
        }
        Err(DomainError::inconsistency(
            Message::new(messages::DUPLICATE_ORIGIN)
                .arg(origin)
                .arg(duplicates.join(", ")),
        ))
    }

    pub fn check_origin(&self, mv: &Move) -> DomainResult<()> {
        let Some(journal) = mv.journal.as_ref() else {
            return Ok(());
        };
        let has_origin = mv.origin.as_deref().is_some_and(|o| !o.trim().is_empty());
        if journal.has_required_origin && !has_origin {
            return Err(DomainError::missing_field(
                Message::new(messages::ORIGIN_REQUIRED).arg(&journal.code),
            ));
        }
        Ok(())
    }

    /// Reconciled lines of the saved move cannot disappear.
    pub fn check_removed_lines(&self, mv: &Move) -> DomainResult<()> {
        let Some(stored) = self.directory.find_move(mv.id) else {
            return Ok(());
        };
        for line in stored.lines.iter().filter(|l| l.is_reconciled()) {
            if !mv.lines.iter().any(|l| l.id == line.id) {
                return Err(DomainError::inconsistency(
                    Message::new(messages::RECONCILED_LINE_REMOVED).arg(line.counter),
                ));
            }
        }
        Ok(())
    }

    pub fn check_analytic_account(&self, mv: &Move) -> DomainResult<()> {
        for line in &mv.lines {
            let Some(account) = line.account.as_ref() else {
                continue;
            };
            if account.analytic_distribution_required && line.analytic_codes.is_empty() {
                return Err(DomainError::missing_field(
                    Message::new(messages::ANALYTIC_REQUIRED)
                        .arg(line.counter)
                        .arg(&account.code),
                ));
            }
        }
        Ok(())
    }
}
