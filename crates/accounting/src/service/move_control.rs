use std::sync::Arc;

use rust_decimal::Decimal;

use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainError, DomainResult, RepositoryHooks, TenantId};

use crate::directory::AccountingDirectory;
use crate::entry::{Move, MoveStatus};
use crate::messages;
use crate::service::{MoveCheckService, MoveComputeService};

#[derive(Clone)]
pub struct MoveControlService {
    check: MoveCheckService,
    compute: MoveComputeService,
}

impl MoveControlService {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self {
            check: MoveCheckService::new(directory),
            compute: MoveComputeService::new(),
        }
    }

    /// Checks run on every save, whatever the status.
    pub fn check_validity(&self, mv: &Move) -> DomainResult<()> {
        tracing::debug!(move_id = %mv.id, "checking validity of move");
        self.check.check_removed_lines(mv)
    }

    /// Accounting rules a move must satisfy once it is in the day-book,
    /// accounted or simulated.
    pub fn control_accounting(&self, mv: &Move) -> DomainResult<()> {
        let label = mv.label();

        if mv.company.is_none() {
            return Err(DomainError::missing_field(
                Message::new(messages::MOVE_MISSING_COMPANY).arg(&label),
            ));
        }
        if mv.journal.is_none() {
            return Err(DomainError::missing_field(
                Message::new(messages::MOVE_MISSING_JOURNAL).arg(&label),
            ));
        }
        if mv.date.is_none() {
            return Err(DomainError::missing_field(
                Message::new(messages::MOVE_MISSING_DATE).arg(&label),
            ));
        }
        let Some(period) = mv.period.as_ref() else {
            return Err(DomainError::missing_field(
                Message::new(messages::MOVE_MISSING_PERIOD).arg(&label),
            ));
        };
        if mv.status == MoveStatus::Accounted && period.is_closed() {
            return Err(DomainError::inconsistency(
                Message::new(messages::MOVE_PERIOD_CLOSED)
                    .arg(&period.code)
                    .arg(&label),
            ));
        }

        if mv.lines.is_empty() {
            return Err(DomainError::inconsistency(
                Message::new(messages::MOVE_NO_LINES).arg(&label),
            ));
        }

        for line in &mv.lines {
            if line.account.is_none() {
                return Err(DomainError::missing_field(
                    Message::new(messages::MOVE_LINE_NO_ACCOUNT).arg(line.counter),
                ));
            }
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(DomainError::inconsistency(
                    Message::new(messages::MOVE_LINE_NEGATIVE).arg(line.counter),
                ));
            }
            if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
                return Err(DomainError::inconsistency(
                    Message::new(messages::MOVE_LINE_DEBIT_AND_CREDIT).arg(line.counter),
                ));
            }
        }

        let (debit, credit) = self.compute.totals(mv);
        if debit != credit {
            return Err(DomainError::inconsistency(
                Message::new(messages::MOVE_NOT_BALANCED)
                    .arg(&label)
                    .arg(debit)
                    .arg(credit),
            ));
        }

        Ok(())
    }

    pub fn before_save(&self, mv: &Move) -> DomainResult<()> {
        tracing::debug!(move_id = %mv.id, status = ?mv.status, "applying pre-save operations on move");
        self.check_validity(mv)?;
        if mv.status.requires_accounting_control() {
            self.control_accounting(mv)?;
        }
        Ok(())
    }
}

/// Repository hooks for moves.
#[derive(Clone)]
pub struct MoveHooks {
    control: MoveControlService,
}

impl MoveHooks {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self {
            control: MoveControlService::new(directory),
        }
    }
}

impl RepositoryHooks<Move> for MoveHooks {
    /// A copy starts as a new, unreconciled move without invoice terms.
    fn copy(&self, entity: &Move, _deep: bool) -> Move {
        let mut copy = entity.clone();
        copy.reference = None;
        copy.status = MoveStatus::New;
        copy.period = None;
        for line in &mut copy.lines {
            line.reconcile_group = None;
            line.amount_remaining = line.amount();
            line.invoice_terms.clear();
            line.account_code = None;
            line.partner_full_name = None;
        }
        copy
    }

    fn before_save(&self, _tenant_id: TenantId, entity: &mut Move) -> DomainResult<()> {
        self.control.before_save(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::{balanced_move, directory};
    use erpsuite_core::ErrorCategory;
    use proptest::prelude::*;

    fn accounted(mut mv: Move) -> Move {
        mv.status = MoveStatus::Accounted;
        mv.period = directory().period_for_date(mv.company.as_ref().unwrap(), mv.date.unwrap());
        mv
    }

    #[test]
    fn balanced_accounted_move_passes() {
        let control = MoveControlService::new(directory());
        assert!(control.before_save(&accounted(balanced_move(10000))).is_ok());
    }

    #[test]
    fn unbalanced_move_is_rejected() {
        let control = MoveControlService::new(directory());
        let mut mv = accounted(balanced_move(10000));
        mv.lines[1].credit = Decimal::new(9000, 2);

        match control.before_save(&mv).unwrap_err() {
            DomainError::Inconsistency(msg) if msg.key() == messages::MOVE_NOT_BALANCED => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn new_moves_skip_accounting_control() {
        let control = MoveControlService::new(directory());
        let mut mv = balanced_move(10000);
        mv.lines[1].credit = Decimal::ZERO;
        assert!(control.before_save(&mv).is_ok());
    }

    #[test]
    fn line_with_debit_and_credit_is_rejected() {
        let control = MoveControlService::new(directory());
        let mut mv = accounted(balanced_move(10000));
        mv.lines[0].credit = Decimal::ONE;
        mv.lines[1].debit = Decimal::ONE;
        assert!(control.control_accounting(&mv).is_err());
    }

    #[test]
    fn missing_period_is_a_missing_field() {
        let control = MoveControlService::new(directory());
        let mut mv = balanced_move(10000);
        mv.status = MoveStatus::Daybook;
        let err = control.control_accounting(&mv).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MissingField);
    }

    #[test]
    fn copy_resets_status_and_reconciliation() {
        let hooks = MoveHooks::new(directory());
        let mut mv = accounted(balanced_move(10000));
        mv.reference = Some("VT-0001".into());
        mv.lines[0].reconcile_group = Some("L1".into());
        mv.lines[0].amount_remaining = Decimal::ZERO;

        let copy = hooks.copy(&mv, true);
        assert_eq!(copy.status, MoveStatus::New);
        assert!(copy.reference.is_none());
        assert!(copy.lines[0].reconcile_group.is_none());
        assert_eq!(copy.lines[0].amount_remaining, Decimal::new(10000, 2));
    }

    proptest! {
        #[test]
        fn accepted_moves_always_balance(
            amounts in proptest::collection::vec((0i64..1_000_000i64, any::<bool>()), 1..10)
        ) {
            let control = MoveControlService::new(directory());
            let mut mv = accounted(balanced_move(0));
            mv.lines.clear();
            for (amount, is_debit) in amounts {
                let amount = Decimal::new(amount, 2);
                let account = crate::service::fixtures::revenue_account();
                let line = if is_debit {
                    crate::entry::MoveLine::new(account, amount, Decimal::ZERO)
                } else {
                    crate::entry::MoveLine::new(account, Decimal::ZERO, amount)
                };
                mv.lines.push(line);
            }

            if control.control_accounting(&mv).is_ok() {
                let debit: Decimal = mv.lines.iter().map(|l| l.debit).sum();
                let credit: Decimal = mv.lines.iter().map(|l| l.credit).sum();
                prop_assert_eq!(debit, credit);
            }
        }
    }
}
