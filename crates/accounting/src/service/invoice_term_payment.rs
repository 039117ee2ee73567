use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use erpsuite_base::CurrencyService;
use erpsuite_core::i18n::Message;
use erpsuite_core::money::{self, DEFAULT_NB_DECIMAL_DIGITS};
use erpsuite_core::{DomainError, DomainResult};

use crate::invoice::{Invoice, InvoicePayment, InvoiceTerm, InvoiceTermPayment};
use crate::messages;
use crate::service::InvoiceTermService;

#[derive(Debug, Clone)]
pub struct InvoiceTermPaymentService {
    currencies: Arc<CurrencyService>,
    invoice_terms: InvoiceTermService,
}

impl InvoiceTermPaymentService {
    pub fn new(currencies: Arc<CurrencyService>) -> Self {
        Self {
            currencies,
            invoice_terms: InvoiceTermService::new(),
        }
    }

    /// Replace the payment's allocations with the full remaining amount of each term.
    pub fn init_invoice_term_payments(
        &self,
        payment: &mut InvoicePayment,
        terms: &[InvoiceTerm],
    ) -> DomainResult<()> {
        let allocations = terms
            .iter()
            .map(|term| self.create_invoice_term_payment(Some(&*payment), term, term.amount_remaining))
            .collect::<DomainResult<Vec<_>>>()?;
        payment.invoice_term_payments = allocations;
        Ok(())
    }

    /// Allocate the payment amount over the invoice terms.
    ///
    /// Terms selected in a payment voucher are paid in voucher order;
    /// otherwise unpaid terms are paid by due date.
    pub fn create_invoice_payment_terms(
        &self,
        payment: &mut InvoicePayment,
        invoice: &Invoice,
    ) -> DomainResult<()> {
        if invoice.invoice_terms.is_empty() {
            return Ok(());
        }

        let terms = if payment.pay_voucher_elements.is_empty() {
            self.invoice_terms.unpaid_terms_filtered(invoice)
        } else {
            let mut elements = payment.pay_voucher_elements.clone();
            elements.sort_by_key(|e| e.sequence);
            elements
                .iter()
                .map(|e| {
                    invoice
                        .invoice_terms
                        .iter()
                        .find(|t| t.id == e.invoice_term_id)
                        .cloned()
                        .ok_or_else(|| {
                            DomainError::inconsistency(
                                Message::new(messages::INVOICE_TERM_UNKNOWN).arg(e.invoice_term_id),
                            )
                        })
                })
                .collect::<DomainResult<Vec<_>>>()?
        };

        if terms.is_empty() {
            return Ok(());
        }

        let allocations = self.init_invoice_term_payments_with_amount(Some(&*payment), &terms, payment.amount)?;
        tracing::debug!(
            invoice = %invoice.id,
            terms = allocations.len(),
            amount = %payment.amount,
            "invoice payment allocated over terms"
        );
        payment.invoice_term_payments.extend(allocations);
        Ok(())
    }

    /// Greedy allocation of `available` over the terms, in order.
    ///
    /// The allocations sum to `min(available, total remaining)` and never
    /// exceed a term's remaining amount.
    pub fn init_invoice_term_payments_with_amount(
        &self,
        payment: Option<&InvoicePayment>,
        terms: &[InvoiceTerm],
        available: Decimal,
    ) -> DomainResult<Vec<InvoiceTermPayment>> {
        let mut available = available;
        let mut allocations = Vec::new();

        for term in terms {
            if available <= Decimal::ZERO {
                break;
            }
            let remaining = term.amount_remaining;
            if remaining >= available {
                allocations.push(self.create_invoice_term_payment(payment, term, available)?);
                available = Decimal::ZERO;
            } else {
                allocations.push(self.create_invoice_term_payment(payment, term, remaining)?);
                available -= remaining;
            }
        }

        Ok(allocations)
    }

    /// One allocation, with its share of the payment's financial discount.
    pub fn create_invoice_term_payment(
        &self,
        payment: Option<&InvoicePayment>,
        term: &InvoiceTerm,
        paid_amount: Decimal,
    ) -> DomainResult<InvoiceTermPayment> {
        let financial_discount_amount = match payment {
            Some(p) if p.apply_financial_discount && !p.amount.is_zero() => money::divide(
                money::checked_mul(paid_amount, p.financial_discount_total_amount)?,
                p.amount,
                DEFAULT_NB_DECIMAL_DIGITS,
            )?,
            _ => Decimal::ZERO,
        };

        Ok(InvoiceTermPayment {
            invoice_term_id: term.id,
            paid_amount,
            financial_discount_amount,
        })
    }

    /// Sum of the allocations, net of financial discount, converted from
    /// the invoice currency into the payment currency at `today`.
    pub fn compute_invoice_payment_amount(
        &self,
        payment: &InvoicePayment,
        invoice: &Invoice,
        allocations: &[InvoiceTermPayment],
        today: NaiveDate,
    ) -> DomainResult<Decimal> {
        let discount_divisor = match (&payment.financial_discount, payment.apply_financial_discount) {
            (Some(discount), true) => {
                let base = money::round_half_up(
                    discount.discount_rate / Decimal::ONE_HUNDRED,
                    DEFAULT_NB_DECIMAL_DIGITS,
                );
                Some(base + Decimal::ONE)
            }
            _ => None,
        };

        let mut sum = Decimal::ZERO;
        for allocation in allocations {
            let paid = match discount_divisor {
                Some(divisor) => money::divide(allocation.paid_amount, divisor, DEFAULT_NB_DECIMAL_DIGITS)?,
                None => allocation.paid_amount,
            };
            sum += paid;
        }

        let converted = self.currencies.convert_at_date(
            &invoice.currency,
            &payment.currency,
            sum,
            today,
            DEFAULT_NB_DECIMAL_DIGITS,
        )?;
        Ok(money::round_half_up(converted, DEFAULT_NB_DECIMAL_DIGITS))
    }

    pub fn update_invoice_payment_amount(
        &self,
        payment: &mut InvoicePayment,
        invoice: &Invoice,
        today: NaiveDate,
    ) -> DomainResult<()> {
        payment.amount =
            self.compute_invoice_payment_amount(payment, invoice, &payment.invoice_term_payments, today)?;
        Ok(())
    }
}
