use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;

use erpsuite_core::money::{self, COMPUTATION_SCALING, DEFAULT_NB_DECIMAL_DIGITS};
use erpsuite_core::DomainResult;

use crate::directory::last_day_of_month;
use crate::entry::Move;
use crate::invoice::{Invoice, InvoiceTerm, PfpStatus};
use crate::model::{DelayUnit, PaymentCondition, PaymentConditionLine};

#[derive(Debug, Default, Clone, Copy)]
pub struct InvoiceTermService;

impl InvoiceTermService {
    pub fn new() -> Self {
        Self
    }

    /// Due date of a payment condition line counted from `base`.
    pub fn compute_due_date(&self, base: NaiveDate, line: &PaymentConditionLine) -> Option<NaiveDate> {
        let shifted = match line.delay_unit {
            DelayUnit::Days => base.checked_add_days(Days::new(u64::from(line.payment_time))),
            DelayUnit::Months => base.checked_add_months(Months::new(line.payment_time)),
        }?;
        if line.end_of_month {
            last_day_of_month(shifted)
        } else {
            Some(shifted)
        }
    }

    /// Due date for a move: counted from the origin date, else the move date.
    pub fn compute_due_date_for_move(&self, mv: &Move, line: &PaymentConditionLine) -> Option<NaiveDate> {
        let base = mv.origin_date.or(mv.date)?;
        self.compute_due_date(base, line)
    }

    /// Split `total` into terms following the payment condition.
    ///
    /// The last term absorbs rounding so amounts sum to `total`. Without a
    /// payment condition a single 100% term is produced.
    pub fn generate_terms(
        &self,
        condition: Option<&PaymentCondition>,
        total: Decimal,
        base_date: Option<NaiveDate>,
    ) -> DomainResult<Vec<InvoiceTerm>> {
        let lines = condition.map(|c| c.lines.as_slice()).unwrap_or_default();
        if lines.is_empty() {
            return Ok(vec![InvoiceTerm::new(1, Decimal::ONE_HUNDRED, total, base_date)]);
        }

        let mut terms = Vec::with_capacity(lines.len());
        let mut allocated = Decimal::ZERO;
        for (index, line) in lines.iter().enumerate() {
            let amount = if index + 1 == lines.len() {
                total - allocated
            } else {
                money::percentage_of(total, line.payment_percentage, DEFAULT_NB_DECIMAL_DIGITS)?
            };
            allocated += amount;

            let due_date = base_date.and_then(|d| self.compute_due_date(d, line));
            let mut term = InvoiceTerm::new(index as u32 + 1, line.payment_percentage, amount, due_date);
            term.payment_condition_percentage = Some(line.payment_percentage);
            terms.push(term);
        }
        Ok(terms)
    }

    /// Recompute percentages from amounts so they sum to exactly 100.
    pub fn round_percentages(&self, terms: &mut [InvoiceTerm], total: Decimal) -> DomainResult<()> {
        if terms.is_empty() || total.is_zero() {
            return Ok(());
        }
        let last = terms.len() - 1;
        let mut percentages = Vec::with_capacity(last);
        for term in &terms[..last] {
            percentages.push(self.customized_percentage(term.amount, total)?);
        }
        let sum: Decimal = percentages.iter().sum();
        for (term, percentage) in terms.iter_mut().zip(percentages) {
            term.percentage = percentage;
        }
        terms[last].percentage = Decimal::ONE_HUNDRED - sum;
        Ok(())
    }

    /// Amount of a term from its percentage of `total`.
    pub fn customized_amount(&self, term: &InvoiceTerm, total: Decimal) -> DomainResult<Decimal> {
        if total.is_zero() {
            return Ok(Decimal::ZERO);
        }
        money::percentage_of(total, term.percentage, DEFAULT_NB_DECIMAL_DIGITS)
    }

    /// Share of `total` that `amount` represents, in percent at
    /// `COMPUTATION_SCALING`. Zero when `total` is zero.
    pub fn customized_percentage(&self, amount: Decimal, total: Decimal) -> DomainResult<Decimal> {
        if total.is_zero() {
            return Ok(Decimal::ZERO);
        }
        money::divide(money::checked_mul(amount, Decimal::ONE_HUNDRED)?, total, COMPUTATION_SCALING)
    }

    /// Editable apart from the passed-for-payment workflow.
    pub fn is_not_readonly_except_pfp(&self, term: &InvoiceTerm) -> bool {
        !term.is_paid && term.amount == term.amount_remaining && term.payment_session.is_none()
    }

    pub fn is_not_readonly(&self, term: &InvoiceTerm) -> bool {
        self.is_not_readonly_except_pfp(term)
            && matches!(term.pfp_status, None | Some(PfpStatus::AwaitingValidation))
    }

    /// Unpaid terms outside any payment session, by due date then sequence.
    pub fn unpaid_terms_filtered(&self, invoice: &Invoice) -> Vec<InvoiceTerm> {
        let mut terms: Vec<InvoiceTerm> = invoice
            .invoice_terms
            .iter()
            .filter(|t| !t.is_paid && t.amount_remaining > Decimal::ZERO)
            .filter(|t| t.payment_session.is_none())
            .filter(|t| t.pfp_status != Some(PfpStatus::Litigation))
            .cloned()
            .collect();
        terms.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.sequence.cmp(&b.sequence)));
        terms
    }

    /// Latest due date among the terms, or `default` when there is none.
    pub fn due_date_of(&self, terms: &[InvoiceTerm], default: Option<NaiveDate>) -> Option<NaiveDate> {
        terms.iter().filter_map(|t| t.due_date).max().or(default)
    }

    pub fn total_amount(&self, terms: &[InvoiceTerm]) -> Decimal {
        terms.iter().map(|t| t.amount).sum()
    }

    /// Copy the payment fields of the move header onto a term.
    pub fn update_from_move_header(&self, mv: &Move, term: &mut InvoiceTerm) {
        term.payment_mode = mv.payment_mode.clone();
        term.bank_details = mv.partner_bank_details.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn condition(lines: &[(i64, u32)]) -> PaymentCondition {
        PaymentCondition {
            id: Default::default(),
            code: "SPLIT".into(),
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, (pct, days))| PaymentConditionLine {
                    sequence: i as u32 + 1,
                    payment_percentage: Decimal::from(*pct),
                    payment_time: *days,
                    delay_unit: DelayUnit::Days,
                    end_of_month: false,
                })
                .collect(),
        }
    }

    #[test]
    fn end_of_month_due_date() {
        let svc = InvoiceTermService::new();
        let line = PaymentConditionLine {
            sequence: 1,
            payment_percentage: Decimal::ONE_HUNDRED,
            payment_time: 30,
            delay_unit: DelayUnit::Days,
            end_of_month: true,
        };
        assert_eq!(svc.compute_due_date(d(2024, 1, 15), &line), Some(d(2024, 2, 29)));
    }

    #[test]
    fn month_delay() {
        let svc = InvoiceTermService::new();
        let line = PaymentConditionLine {
            sequence: 1,
            payment_percentage: Decimal::ONE_HUNDRED,
            payment_time: 2,
            delay_unit: DelayUnit::Months,
            end_of_month: false,
        };
        assert_eq!(svc.compute_due_date(d(2024, 1, 31), &line), Some(d(2024, 3, 31)));
    }

    #[test]
    fn generated_terms_sum_to_total() {
        let svc = InvoiceTermService::new();
        let cond = condition(&[(30, 0), (30, 30), (40, 60)]);
        let terms = svc
            .generate_terms(Some(&cond), Decimal::new(10001, 2), Some(d(2024, 1, 1)))
            .unwrap();

        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].amount, Decimal::new(3000, 2));
        assert_eq!(terms[1].amount, Decimal::new(3000, 2));
        assert_eq!(terms[2].amount, Decimal::new(4001, 2));
        assert_eq!(terms[1].due_date, Some(d(2024, 1, 31)));
        assert_eq!(terms.iter().map(|t| t.amount).sum::<Decimal>(), Decimal::new(10001, 2));
    }

    #[test]
    fn no_condition_gives_single_full_term() {
        let svc = InvoiceTermService::new();
        let terms = svc.generate_terms(None, Decimal::new(500, 0), Some(d(2024, 5, 1))).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].percentage, Decimal::ONE_HUNDRED);
        assert_eq!(terms[0].due_date, Some(d(2024, 5, 1)));
    }

    #[test]
    fn readonly_rules() {
        let svc = InvoiceTermService::new();
        let mut term = InvoiceTerm::new(1, Decimal::ONE_HUNDRED, Decimal::TEN, None);
        assert!(svc.is_not_readonly(&term));

        term.pfp_status = Some(PfpStatus::Validated);
        assert!(svc.is_not_readonly_except_pfp(&term));
        assert!(!svc.is_not_readonly(&term));

        term.amount_remaining = Decimal::ONE;
        assert!(!svc.is_not_readonly_except_pfp(&term));
    }

    #[test]
    fn unpaid_terms_are_sorted_by_due_date() {
        let svc = InvoiceTermService::new();
        let mut invoice = Invoice::new("EUR", Decimal::new(300, 0));
        let mut paid = InvoiceTerm::new(1, Decimal::ONE, Decimal::TEN, Some(d(2024, 1, 1)));
        paid.is_paid = true;
        invoice.invoice_terms = vec![
            InvoiceTerm::new(2, Decimal::ONE, Decimal::TEN, Some(d(2024, 3, 1))),
            paid,
            InvoiceTerm::new(3, Decimal::ONE, Decimal::TEN, Some(d(2024, 2, 1))),
        ];

        let seqs: Vec<u32> = svc
            .unpaid_terms_filtered(&invoice)
            .iter()
            .map(|t| t.sequence)
            .collect();
        assert_eq!(seqs, vec![3, 2]);
    }

    #[test]
    fn customized_amount_follows_the_percentage() {
        let svc = InvoiceTermService::new();
        let term = InvoiceTerm::new(1, Decimal::new(3333, 2), Decimal::ZERO, None);

        // 33.33% of 250.00 = 83.325 -> 83.33
        assert_eq!(svc.customized_amount(&term, Decimal::new(25000, 2)).unwrap(), Decimal::new(8333, 2));
        assert_eq!(svc.customized_amount(&term, Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn customized_percentage_keeps_ten_decimals() {
        let svc = InvoiceTermService::new();

        let pct = svc.customized_percentage(Decimal::ONE, Decimal::from(3)).unwrap();
        assert_eq!(pct, Decimal::new(333_333_333_333, 10));
        assert_eq!(pct.scale(), COMPUTATION_SCALING);

        assert_eq!(svc.customized_percentage(Decimal::TEN, Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn customized_amount_overflow_is_an_error() {
        let svc = InvoiceTermService::new();
        let term = InvoiceTerm::new(1, Decimal::ONE_HUNDRED, Decimal::ZERO, None);
        let err = svc.customized_amount(&term, Decimal::MAX).unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::Inconsistency);
    }

    proptest! {
        #[test]
        fn rounded_percentages_sum_to_one_hundred(
            amounts in proptest::collection::vec(1i64..1_000_000i64, 1..8)
        ) {
            let svc = InvoiceTermService::new();
            let mut terms: Vec<InvoiceTerm> = amounts
                .iter()
                .enumerate()
                .map(|(i, a)| InvoiceTerm::new(i as u32 + 1, Decimal::ZERO, Decimal::new(*a, 2), None))
                .collect();
            let total: Decimal = terms.iter().map(|t| t.amount).sum();

            svc.round_percentages(&mut terms, total).unwrap();

            let sum: Decimal = terms.iter().map(|t| t.percentage).sum();
            prop_assert_eq!(sum, Decimal::ONE_HUNDRED);
        }
    }
}
