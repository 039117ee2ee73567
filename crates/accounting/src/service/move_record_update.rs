use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use erpsuite_base::CurrencyService;
use erpsuite_core::money;
use erpsuite_core::{ActionContext, DomainResult, RecordContext};

use crate::directory::AccountingDirectory;
use crate::entry::{Move, MoveStatus};
use crate::messages;
use crate::service::{MoveControlService, MoveInvoiceTermService};

#[derive(Clone)]
pub struct MoveRecordUpdateService {
    currencies: Arc<CurrencyService>,
    move_invoice_terms: MoveInvoiceTermService,
    control: MoveControlService,
    nb_decimal_digits: u32,
}

impl MoveRecordUpdateService {
    pub fn new(
        directory: Arc<dyn AccountingDirectory>,
        currencies: Arc<CurrencyService>,
        nb_decimal_digits: u32,
    ) -> Self {
        Self {
            currencies,
            move_invoice_terms: MoveInvoiceTermService::new(directory.clone()),
            control: MoveControlService::new(directory),
            nb_decimal_digits,
        }
    }

    /// The header partner applies to every line.
    pub fn update_partner(&self, mv: &mut Move) {
        let partner = mv.partner.clone();
        for line in &mut mv.lines {
            line.partner = partner.clone();
        }
    }

    /// Recompute company-currency debit/credit from the signed currency
    /// amount of each line, at the rate of the move date.
    pub fn update_move_lines_currency_rate(&self, mv: &mut Move, ctx: &ActionContext) -> DomainResult<()> {
        let (Some(currency), Some(company_currency)) = (mv.currency.clone(), mv.company_currency().map(str::to_string))
        else {
            return Ok(());
        };
        let date = mv.date.unwrap_or(ctx.today);
        let rate = self.currencies.rate_at_date(&currency, &company_currency, date)?;

        for line in &mut mv.lines {
            line.currency_rate = rate;
            if currency == company_currency || line.currency_amount.is_zero() {
                continue;
            }
            let amount = money::multiply(line.currency_amount.abs(), rate, self.nb_decimal_digits)?;
            if line.currency_amount.is_sign_positive() {
                line.debit = amount;
                line.credit = Decimal::ZERO;
            } else {
                line.debit = Decimal::ZERO;
                line.credit = amount;
            }
            line.amount_remaining = amount;
        }
        Ok(())
    }

    /// Push header changes onto invoice terms once the form flagged them.
    pub fn update_invoice_terms(&self, mv: &mut Move, ctx: &ActionContext) -> DomainResult<RecordContext> {
        let mut result = RecordContext::new();
        if !ctx.flag("$paymentConditionChange") && !ctx.flag("$headerChange") {
            return Ok(result);
        }

        if self.move_invoice_terms.update_invoice_terms(mv) {
            self.move_invoice_terms.recreate_invoice_terms(mv)?;
        } else {
            result.put_in_notify(messages::INVOICE_TERMS_NOT_UPDATED);
        }
        self.move_invoice_terms.generate_invoice_terms(mv)?;
        self.move_invoice_terms.update_move_line_due_dates(mv);
        Ok(result)
    }

    pub fn update_round_invoice_term_percentages(&self, mv: &mut Move) -> DomainResult<()> {
        self.move_invoice_terms.round_invoice_term_percentages(mv)
    }

    /// Apply the due date typed on the header to a single-term move.
    pub fn update_due_date(&self, mv: &mut Move, ctx: &ActionContext) {
        if !self.move_invoice_terms.display_due_date(mv) {
            return;
        }
        let due_date = ctx
            .get("dueDate")
            .and_then(|v| serde_json::from_value::<Option<NaiveDate>>(v.clone()).ok())
            .flatten();
        self.move_invoice_terms.update_single_invoice_term_due_date(mv, due_date);
        self.move_invoice_terms.update_move_line_due_dates(mv);
    }

    /// Moves in the day-book are controlled and their lines get a snapshot
    /// of the account code and partner name.
    pub fn update_in_day_book_mode(&self, mv: &mut Move) -> DomainResult<()> {
        if !matches!(mv.status, MoveStatus::Daybook | MoveStatus::Accounted) {
            return Ok(());
        }
        self.control.control_accounting(mv)?;
        for line in &mut mv.lines {
            line.account_code = line.account.as_ref().map(|a| a.code.clone());
            line.partner_full_name = line.partner.as_ref().map(|p| p.name.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentCondition;
    use crate::service::fixtures::{balanced_move, customer, d, directory};
    use erpsuite_base::CurrencyRate;

    fn service() -> MoveRecordUpdateService {
        let currencies = CurrencyService::new(vec![CurrencyRate {
            from: "USD".into(),
            to: "EUR".into(),
            rate: Decimal::new(9, 1),
            date: d(2024, 1, 1),
        }]);
        MoveRecordUpdateService::new(directory(), Arc::new(currencies), 2)
    }

    #[test]
    fn partner_is_copied_on_lines() {
        let mut mv = balanced_move(100);
        mv.partner = Some(customer());
        service().update_partner(&mut mv);
        assert!(mv.lines.iter().all(|l| l.partner.as_ref().map(|p| p.name.as_str()) == Some("Globex")));
    }

    #[test]
    fn foreign_currency_lines_are_converted() {
        let mut mv = balanced_move(10000);
        mv.currency = Some("USD".into());
        service()
            .update_move_lines_currency_rate(&mut mv, &ActionContext::new(d(2024, 3, 15)))
            .unwrap();

        assert_eq!(mv.lines[0].currency_rate, Decimal::new(9, 1));
        assert_eq!(mv.lines[0].debit, Decimal::new(9000, 2));
        assert_eq!(mv.lines[1].credit, Decimal::new(9000, 2));
    }

    #[test]
    fn missing_rate_is_a_no_value_error() {
        let mut mv = balanced_move(100);
        mv.currency = Some("GBP".into());
        let err = service()
            .update_move_lines_currency_rate(&mut mv, &ActionContext::new(d(2024, 3, 15)))
            .unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::NoValue);
    }

    #[test]
    fn invoice_terms_untouched_without_header_change() {
        let mut mv = balanced_move(100);
        let result = service().update_invoice_terms(&mut mv, &ActionContext::default()).unwrap();
        assert!(result.is_empty());
        assert!(mv.lines[0].invoice_terms.is_empty());
    }

    #[test]
    fn payment_condition_change_regenerates_terms() {
        let svc = service();
        let mut mv = balanced_move(10000);
        mv.payment_condition = Some(PaymentCondition::net("30D", 30));
        let mut ctx = ActionContext::default();
        ctx.put("$paymentConditionChange", true);

        let result = svc.update_invoice_terms(&mut mv, &ctx).unwrap();

        assert!(result.notify().is_empty());
        assert_eq!(mv.lines[0].invoice_terms.len(), 1);
        assert_eq!(mv.lines[0].due_date, Some(d(2024, 4, 14)));
    }

    #[test]
    fn paid_terms_are_reported_as_not_updated() {
        let svc = service();
        let mut mv = balanced_move(10000);
        mv.payment_condition = Some(PaymentCondition::net("30D", 30));
        svc.move_invoice_terms.generate_invoice_terms(&mut mv).unwrap();
        mv.lines[0].invoice_terms[0].amount_remaining = Decimal::new(5000, 2);

        let mut ctx = ActionContext::default();
        ctx.put("$headerChange", true);
        let result = svc.update_invoice_terms(&mut mv, &ctx).unwrap();

        assert_eq!(result.notify().len(), 1);
    }

    #[test]
    fn day_book_snapshot_requires_a_valid_move() {
        let svc = service();
        let mut mv = balanced_move(100);
        mv.status = MoveStatus::Daybook;
        assert!(svc.update_in_day_book_mode(&mut mv).is_err());

        mv.period = directory().period_for_date(mv.company.as_ref().unwrap(), d(2024, 3, 15));
        svc.update_in_day_book_mode(&mut mv).unwrap();
        assert_eq!(mv.lines[0].account_code.as_deref(), Some("411000"));
    }
}
