use chrono::Days;
use rust_decimal::Decimal;

use erpsuite_core::DomainResult;
use erpsuite_core::money::{self, DEFAULT_NB_DECIMAL_DIGITS};

use crate::invoice::{DiscountBase, FinancialDiscount, Invoice};

#[derive(Debug, Default, Clone, Copy)]
pub struct InvoiceFinancialDiscountService;

impl InvoiceFinancialDiscountService {
    pub fn new() -> Self {
        Self
    }

    /// Fill the discount fields from the invoice's financial discount, or
    /// reset them when there is none. The invoice is left untouched when the
    /// amounts can not be computed.
    pub fn set_financial_discount_informations(&self, invoice: &mut Invoice) -> DomainResult<()> {
        let Some(discount) = invoice.financial_discount.clone() else {
            self.reset_financial_discount_informations(invoice);
            return Ok(());
        };

        let total_amount = self.compute_total_amount(invoice, &discount)?;
        invoice.legal_notice = discount.legal_notice.clone();
        invoice.financial_discount_rate = discount.discount_rate;
        invoice.financial_discount_total_amount = total_amount;
        invoice.remaining_amount_after_fin_discount =
            invoice.in_tax_total - invoice.financial_discount_total_amount;

        if invoice.due_date.is_some() {
            invoice.financial_discount_deadline_date = self.deadline_date(invoice, &discount);
        }
        Ok(())
    }

    pub fn reset_financial_discount_informations(&self, invoice: &mut Invoice) {
        invoice.legal_notice = None;
        invoice.financial_discount_rate = Decimal::ZERO;
        invoice.financial_discount_total_amount = Decimal::ZERO;
        invoice.remaining_amount_after_fin_discount = Decimal::ZERO;
        invoice.financial_discount_deadline_date = None;
    }

    fn compute_total_amount(&self, invoice: &Invoice, discount: &FinancialDiscount) -> DomainResult<Decimal> {
        match discount.discount_base {
            DiscountBase::VatIncluded => self.discount_amount(discount, invoice.in_tax_total),
            DiscountBase::VatExcluded => {
                let without_tax = self.discount_amount(discount, invoice.ex_tax_total)?;
                let tax_share = self.discount_tax_amount(invoice, discount)?;
                money::checked_add(without_tax, tax_share)
            }
        }
    }

    fn discount_amount(&self, discount: &FinancialDiscount, amount: Decimal) -> DomainResult<Decimal> {
        money::percentage_of(amount, discount.discount_rate, DEFAULT_NB_DECIMAL_DIGITS)
    }

    /// Tax share of the discount: `tax * ex_tax * rate / (in_tax * 100)`.
    /// A zero tax-included total is a division by zero.
    fn discount_tax_amount(&self, invoice: &Invoice, discount: &FinancialDiscount) -> DomainResult<Decimal> {
        let numerator = money::checked_mul(
            money::checked_mul(invoice.tax_total, invoice.ex_tax_total)?,
            discount.discount_rate,
        )?;
        let denominator = money::checked_mul(invoice.in_tax_total, Decimal::ONE_HUNDRED)?;
        money::divide(numerator, denominator, DEFAULT_NB_DECIMAL_DIGITS)
    }

    /// Due date minus the discount delay, not earlier than the invoice date.
    fn deadline_date(&self, invoice: &Invoice, discount: &FinancialDiscount) -> Option<chrono::NaiveDate> {
        let due_date = invoice.due_date?;
        let deadline = due_date.checked_sub_days(Days::new(u64::from(discount.discount_delay)))?;
        match invoice.invoice_date {
            Some(invoice_date) if deadline < invoice_date => Some(invoice_date),
            _ => Some(deadline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use erpsuite_core::RecordId;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn invoice(base: DiscountBase) -> Invoice {
        let mut invoice = Invoice::new("EUR", Decimal::new(120, 0));
        invoice.ex_tax_total = Decimal::new(100, 0);
        invoice.tax_total = Decimal::new(20, 0);
        invoice.invoice_date = Some(d(2024, 3, 1));
        invoice.due_date = Some(d(2024, 3, 31));
        invoice.financial_discount = Some(FinancialDiscount {
            id: RecordId::new(),
            discount_rate: Decimal::TWO,
            discount_base: base,
            discount_delay: 20,
            legal_notice: Some("2% if paid within 10 days".into()),
        });
        invoice
    }

    #[test]
    fn vat_included_base() {
        let mut inv = invoice(DiscountBase::VatIncluded);
        InvoiceFinancialDiscountService::new().set_financial_discount_informations(&mut inv).unwrap();

        assert_eq!(inv.financial_discount_total_amount, Decimal::new(240, 2));
        assert_eq!(inv.remaining_amount_after_fin_discount, Decimal::new(11760, 2));
        assert_eq!(inv.financial_discount_deadline_date, Some(d(2024, 3, 11)));
        assert!(inv.legal_notice.is_some());
    }

    #[test]
    fn vat_excluded_base_adds_tax_share() {
        let mut inv = invoice(DiscountBase::VatExcluded);
        InvoiceFinancialDiscountService::new().set_financial_discount_informations(&mut inv).unwrap();
        // 2.00 + 20 * 100 * 2 / 12000 = 2.00 + 0.33
        assert_eq!(inv.financial_discount_total_amount, Decimal::new(233, 2));
    }

    #[test]
    fn deadline_not_before_invoice_date() {
        let mut inv = invoice(DiscountBase::VatIncluded);
        if let Some(discount) = inv.financial_discount.as_mut() {
            discount.discount_delay = 60;
        }
        InvoiceFinancialDiscountService::new().set_financial_discount_informations(&mut inv).unwrap();
        assert_eq!(inv.financial_discount_deadline_date, Some(d(2024, 3, 1)));
    }

    #[test]
    fn missing_discount_resets_fields() {
        let mut inv = invoice(DiscountBase::VatIncluded);
        let svc = InvoiceFinancialDiscountService::new();
        svc.set_financial_discount_informations(&mut inv).unwrap();
        inv.financial_discount = None;
        svc.set_financial_discount_informations(&mut inv).unwrap();

        assert_eq!(inv.financial_discount_total_amount, Decimal::ZERO);
        assert!(inv.legal_notice.is_none());
        assert!(inv.financial_discount_deadline_date.is_none());
    }

    #[test]
    fn overflowing_vat_excluded_amounts_are_rejected() {
        let mut inv = invoice(DiscountBase::VatExcluded);
        inv.ex_tax_total = Decimal::from(1_000_000_000_000_000i64);
        inv.tax_total = Decimal::from(200_000_000_000_000i64);
        inv.in_tax_total = inv.ex_tax_total + inv.tax_total;

        let err = InvoiceFinancialDiscountService::new()
            .set_financial_discount_informations(&mut inv)
            .unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::Inconsistency);
        assert_eq!(inv.financial_discount_total_amount, Decimal::ZERO);
    }

    #[test]
    fn zero_tax_included_total_is_rejected() {
        let mut inv = invoice(DiscountBase::VatExcluded);
        inv.in_tax_total = Decimal::ZERO;

        let err = InvoiceFinancialDiscountService::new()
            .set_financial_discount_informations(&mut inv)
            .unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::Inconsistency);
    }
}
