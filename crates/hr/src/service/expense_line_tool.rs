use rust_decimal::Decimal;

use erpsuite_core::i18n::Message;
use erpsuite_core::money::{self, DEFAULT_NB_DECIMAL_DIGITS};
use erpsuite_core::{DomainError, DomainResult};

use crate::messages;
use crate::model::{ExpenseLine, KilometricType};

/// Product code of kilometric allowance lines.
pub const KILOMETRIC_PRODUCT: &str = "KILOMETRIC";

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpenseLineToolService;

impl ExpenseLineToolService {
    pub fn new() -> Self {
        Self
    }

    pub fn is_kilometric_expense_line(&self, line: &ExpenseLine) -> bool {
        line.kilometric_allow_param.is_some() || line.expense_product.as_deref() == Some(KILOMETRIC_PRODUCT)
    }

    /// A provided distance replaces the line's one, doubled for round trips.
    pub fn compute_distance(&self, distance: Option<Decimal>, line: &mut ExpenseLine) -> DomainResult<()> {
        let Some(distance) = distance else {
            return Ok(());
        };
        line.distance = match line.kilometric_type {
            Some(KilometricType::RoundTrip) => money::checked_mul(distance, Decimal::TWO)?,
            _ => distance,
        };
        Ok(())
    }

    /// `distance * rate`, with no tax.
    pub fn compute_amount(&self, line: &mut ExpenseLine) -> DomainResult<()> {
        let rate = line.kilometric_allow_param.as_ref().map(|p| p.rate).ok_or_else(|| {
            DomainError::configuration(Message::new(messages::KILOMETRIC_ALLOWANCE_MISSING).arg(line.id))
        })?;
        let amount = money::multiply(line.distance, rate, DEFAULT_NB_DECIMAL_DIGITS)?;
        line.total_amount = amount;
        line.untaxed_amount = amount;
        line.total_tax = Decimal::ZERO;
        Ok(())
    }

    pub fn set_general_expense_line_info(
        &self,
        expense_product: Option<&str>,
        total_amount: Option<Decimal>,
        total_tax: Option<Decimal>,
        justification_file: Option<&str>,
        line: &mut ExpenseLine,
    ) {
        if let Some(product) = expense_product {
            line.expense_product = Some(product.to_string());
        }
        if let Some(total) = total_amount {
            line.total_amount = total;
        }
        if let Some(tax) = total_tax {
            line.total_tax = tax;
        }
        if let Some(file) = justification_file {
            line.justification_file = Some(file.to_string());
        }
        line.untaxed_amount = line.total_amount - line.total_tax;
    }
}
