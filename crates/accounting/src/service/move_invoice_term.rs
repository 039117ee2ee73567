use std::sync::Arc;

use chrono::NaiveDate;

use erpsuite_core::i18n::Message;
use erpsuite_core::{DomainResult, RecordId};

use crate::directory::AccountingDirectory;
use crate::entry::{Move, MoveStatus};
use crate::invoice::InvoiceTerm;
use crate::messages;
use crate::model::JournalTechnicalType;
use crate::service::InvoiceTermService;

#[derive(Clone)]
pub struct MoveInvoiceTermService {
    directory: Arc<dyn AccountingDirectory>,
    invoice_terms: InvoiceTermService,
}

impl MoveInvoiceTermService {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self {
            directory,
            invoice_terms: InvoiceTermService::new(),
        }
    }

    /// Default terms for lines on invoice-term accounts that have none.
    pub fn generate_invoice_terms(&self, mv: &mut Move) -> DomainResult<()> {
        let condition = mv.payment_condition.clone();
        let base_date = mv.origin_date.or(mv.date);
        for line in &mut mv.lines {
            if line.has_invoice_term_account() && line.invoice_terms.is_empty() {
                line.invoice_terms =
                    self.invoice_terms
                        .generate_terms(condition.as_ref(), line.amount(), base_date)?;
            }
        }
        Ok(())
    }

    pub fn round_invoice_term_percentages(&self, mv: &mut Move) -> DomainResult<()> {
        for line in &mut mv.lines {
            if !line.invoice_terms.is_empty() {
                let total = line.amount();
                self.invoice_terms.round_percentages(&mut line.invoice_terms, total)?;
            }
        }
        Ok(())
    }

    /// Push header payment fields onto editable terms of untouched lines.
    ///
    /// Returns `true` when every term of the move was updated.
    pub fn update_invoice_terms(&self, mv: &mut Move) -> bool {
        let header = mv.clone();
        let mut updated = 0usize;
        for line in &mut mv.lines {
            if line.amount_remaining != line.amount()
                || !line.has_invoice_term_account()
                || line.invoice_terms.is_empty()
            {
                continue;
            }
            for term in &mut line.invoice_terms {
                if self.invoice_terms.is_not_readonly_except_pfp(term) {
                    self.invoice_terms.update_from_move_header(&header, term);
                    updated += 1;
                }
            }
        }
        updated == mv.lines.iter().map(|l| l.invoice_terms.len()).sum::<usize>()
    }

    /// Regenerate the terms of invoice-term lines whose terms are all editable.
    pub fn recreate_invoice_terms(&self, mv: &mut Move) -> DomainResult<()> {
        let condition = mv.payment_condition.clone();
        let base_date = mv.origin_date.or(mv.date);
        for line in &mut mv.lines {
            if !line.has_invoice_term_account() {
                continue;
            }
            if line.invoice_terms.iter().all(|t| self.invoice_terms.is_not_readonly(t)) {
                line.invoice_terms =
                    self.invoice_terms
                        .generate_terms(condition.as_ref(), line.amount(), base_date)?;
            }
        }
        Ok(())
    }

    pub fn update_move_line_due_dates(&self, mv: &mut Move) {
        for line in &mut mv.lines {
            line.due_date = self.invoice_terms.due_date_of(&line.invoice_terms, line.origin_date);
        }
    }

    /// The header due date is shown for single-term moves outside treasury journals.
    pub fn display_due_date(&self, mv: &Move) -> bool {
        mv.journal
            .as_ref()
            .is_some_and(|j| j.technical_type != JournalTechnicalType::Treasury)
            && self.is_single_term(mv)
    }

    pub fn is_single_term(&self, mv: &Move) -> bool {
        match mv.payment_condition.as_ref() {
            Some(condition) if condition.lines.len() <= 1 => {}
            _ => return false,
        }

        let mut term_lines = mv.lines.iter().filter(|l| l.has_invoice_term_account());
        match (term_lines.next(), term_lines.next()) {
            (None, _) => true,
            (Some(line), None) => line.invoice_terms.len() <= 1,
            (Some(_), Some(_)) => false,
        }
    }

    pub fn compute_due_date(&self, mv: &Move, is_single_term: bool, is_date_change: bool) -> Option<NaiveDate> {
        let condition = mv.payment_condition.as_ref()?;
        let [condition_line] = condition.lines.as_slice() else {
            return None;
        };

        if is_single_term && !is_date_change {
            if let Some(due_date) = self.single_invoice_term(mv).and_then(|t| t.due_date) {
                return Some(due_date);
            }
        }

        self.invoice_terms.compute_due_date_for_move(mv, condition_line)
    }

    /// Apply a due date typed on the header to the single term of the move.
    pub fn update_single_invoice_term_due_date(&self, mv: &mut Move, due_date: Option<NaiveDate>) {
        let Some(due_date) = due_date else {
            return;
        };
        let invoice_terms = self.invoice_terms;
        let Some(line) = mv
            .lines
            .iter_mut()
            .find(|l| l.has_invoice_term_account() && !l.invoice_terms.is_empty())
        else {
            return;
        };
        let Some(term) = line.invoice_terms.first_mut() else {
            return;
        };
        if invoice_terms.is_not_readonly(term) && term.due_date != Some(due_date) {
            term.due_date = Some(due_date);
            line.due_date = Some(due_date);
        }
    }

    fn single_invoice_term<'a>(&self, mv: &'a Move) -> Option<&'a InvoiceTerm> {
        mv.lines
            .iter()
            .filter(|l| l.has_invoice_term_account())
            .flat_map(|l| l.invoice_terms.iter())
            .next()
    }

    /// Reason why the terms of a posted move cannot be changed, if any.
    pub fn check_if_invoice_term_in_payment(&self, mv: &Move) -> Option<Message> {
        if !matches!(mv.status, MoveStatus::Daybook | MoveStatus::Accounted) {
            return None;
        }
        let terms: Vec<&InvoiceTerm> = mv.all_invoice_terms().collect();
        if terms.is_empty() {
            return None;
        }

        let ids: Vec<RecordId> = terms.iter().map(|t| t.id).collect();
        let vouchers = self.directory.payment_voucher_refs(&ids);
        if !vouchers.is_empty() {
            return Some(Message::new(messages::INVOICE_TERM_IN_PAYMENT_VOUCHER).arg(vouchers.join(", ")));
        }

        let sessions: Vec<&str> = terms.iter().filter_map(|t| t.payment_session.as_deref()).collect();
        if !sessions.is_empty() {
            return Some(Message::new(messages::INVOICE_TERM_IN_PAYMENT_SESSION).arg(sessions.join(", ")));
        }

        if terms.iter().any(|t| !self.invoice_terms.is_not_readonly_except_pfp(t)) {
            return Some(Message::new(messages::INVOICE_TERM_AWAITING_PAYMENT));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaymentCondition, PaymentConditionLine};
    use crate::service::fixtures::{balanced_move, d, directory};
    use rust_decimal::Decimal;

    fn service() -> (MoveInvoiceTermService, Arc<crate::InMemoryAccountingDirectory>) {
        let dir = directory();
        (MoveInvoiceTermService::new(dir.clone()), dir)
    }

    fn with_terms(mut mv: Move, condition: PaymentCondition) -> Move {
        mv.payment_condition = Some(condition);
        mv
    }

    #[test]
    fn terms_are_generated_only_for_invoice_term_accounts() {
        let (svc, _) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));

        svc.generate_invoice_terms(&mut mv).unwrap();

        assert_eq!(mv.lines[0].invoice_terms.len(), 1);
        assert!(mv.lines[1].invoice_terms.is_empty());
        assert_eq!(mv.lines[0].invoice_terms[0].due_date, Some(d(2024, 4, 14)));
    }

    #[test]
    fn due_date_display_and_computation() {
        let (svc, _) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));
        assert!(svc.display_due_date(&mv));
        assert_eq!(svc.compute_due_date(&mv, true, false), Some(d(2024, 4, 14)));

        mv.origin_date = Some(d(2024, 3, 1));
        assert_eq!(svc.compute_due_date(&mv, true, true), Some(d(2024, 3, 31)));

        let mut split = PaymentCondition::net("SPLIT", 30);
        split.lines.push(PaymentConditionLine {
            sequence: 2,
            payment_percentage: Decimal::new(50, 0),
            payment_time: 60,
            delay_unit: Default::default(),
            end_of_month: false,
        });
        mv.payment_condition = Some(split);
        assert!(!svc.display_due_date(&mv));
        assert_eq!(svc.compute_due_date(&mv, false, false), None);
    }

    #[test]
    fn header_due_date_updates_single_term() {
        let (svc, _) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));
        svc.generate_invoice_terms(&mut mv).unwrap();

        svc.update_single_invoice_term_due_date(&mut mv, Some(d(2024, 6, 30)));

        assert_eq!(mv.lines[0].invoice_terms[0].due_date, Some(d(2024, 6, 30)));
        assert_eq!(mv.lines[0].due_date, Some(d(2024, 6, 30)));
    }

    #[test]
    fn partially_paid_terms_are_not_updated_from_header() {
        let (svc, _) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));
        svc.generate_invoice_terms(&mut mv).unwrap();
        assert!(svc.update_invoice_terms(&mut mv));

        mv.lines[0].invoice_terms[0].amount_remaining = Decimal::ONE;
        assert!(!svc.update_invoice_terms(&mut mv));
    }

    #[test]
    fn terms_in_payment_voucher_block_changes() {
        let (svc, dir) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));
        svc.generate_invoice_terms(&mut mv).unwrap();
        mv.status = MoveStatus::Accounted;
        assert!(svc.check_if_invoice_term_in_payment(&mv).is_none());

        dir.register_pay_voucher(mv.lines[0].invoice_terms[0].id, "PV-0003");
        let msg = svc.check_if_invoice_term_in_payment(&mv).unwrap();
        assert!(msg.to_string().contains("PV-0003"));
    }

    #[test]
    fn terms_in_payment_session_block_changes() {
        let (svc, _) = service();
        let mut mv = with_terms(balanced_move(12000), PaymentCondition::net("30D", 30));
        svc.generate_invoice_terms(&mut mv).unwrap();
        mv.status = MoveStatus::Daybook;
        mv.lines[0].invoice_terms[0].payment_session = Some("PS-12".into());

        let msg = svc.check_if_invoice_term_in_payment(&mv).unwrap();
        assert_eq!(msg.key(), messages::INVOICE_TERM_IN_PAYMENT_SESSION);
    }
}
