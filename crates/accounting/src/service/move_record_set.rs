use std::sync::Arc;

use erpsuite_core::i18n::Message;
use erpsuite_core::record_context::{Values, to_json};
use erpsuite_core::{DomainError, DomainResult};

use crate::directory::AccountingDirectory;
use crate::entry::Move;
use crate::messages;
use crate::model::JournalTechnicalType;

#[derive(Clone)]
pub struct MoveRecordSetService {
    directory: Arc<dyn AccountingDirectory>,
}

fn single(field: &str, value: serde_json::Value) -> Values {
    let mut values = Values::new();
    values.insert(field.to_string(), value);
    values
}

impl MoveRecordSetService {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self { directory }
    }

    /// Manual miscellaneous-operations journal of the company, when none is set.
    pub fn set_journal(&self, mv: &mut Move) -> Values {
        if mv.journal.is_none() {
            mv.journal = mv.company.as_ref().and_then(|c| c.manual_misc_journal.clone());
        }
        single("journal", to_json(&mv.journal))
    }

    /// Active period of the company at the move date.
    pub fn set_period(&self, mv: &mut Move) -> DomainResult<Values> {
        if let (Some(company), Some(date)) = (mv.company.as_ref(), mv.date) {
            let period = self.directory.period_for_date(company, date).ok_or_else(|| {
                DomainError::configuration(Message::new(messages::PERIOD_NOT_FOUND).arg(&company.code))
            })?;
            mv.period = Some(period);
        }
        Ok(single("period", to_json(&mv.period)))
    }

    /// The journal's functional origin when it authorizes exactly one.
    pub fn set_functional_origin_select(&self, mv: &mut Move) -> Values {
        mv.functional_origin = mv.journal.as_ref().and_then(|j| match j.authorized_functional_origins.as_slice() {
            [only] => Some(*only),
            _ => None,
        });
        single("functionalOrigin", to_json(&mv.functional_origin))
    }

    pub fn set_move_line_dates(&self, mv: &mut Move) -> Values {
        let date = mv.date;
        for line in &mut mv.lines {
            line.date = date;
        }
        single("lines", to_json(&mv.lines))
    }

    pub fn set_move_line_origin_dates(&self, mv: &mut Move) -> Values {
        let origin_date = mv.origin_date;
        for line in &mut mv.lines {
            line.origin_date = origin_date;
        }
        single("lines", to_json(&mv.lines))
    }

    pub fn set_origin_on_move_line_list(&self, mv: &mut Move) -> Values {
        let origin = mv.origin.clone();
        for line in &mut mv.lines {
            line.origin = origin.clone();
        }
        single("lines", to_json(&mv.lines))
    }

    pub fn set_currency_by_partner(&self, mv: &mut Move) -> Values {
        if let Some(currency) = mv.partner.as_ref().and_then(|p| p.currency.clone()) {
            mv.currency = Some(currency);
        }
        single("currency", to_json(&mv.currency))
    }

    /// Partner's incoming mode on sale journals, outgoing mode on expense journals.
    pub fn set_payment_mode(&self, mv: &mut Move) -> Values {
        mv.payment_mode = match (mv.partner.as_ref(), mv.journal.as_ref().map(|j| j.technical_type)) {
            (Some(partner), Some(JournalTechnicalType::Sale)) => partner.in_payment_mode.clone(),
            (Some(partner), Some(JournalTechnicalType::Expense)) => partner.out_payment_mode.clone(),
            _ => None,
        };
        single("paymentMode", to_json(&mv.payment_mode))
    }

    pub fn set_payment_condition(&self, mv: &mut Move) -> Values {
        mv.payment_condition = match (mv.partner.as_ref(), mv.journal.as_ref().map(|j| j.technical_type)) {
            (Some(partner), Some(JournalTechnicalType::Sale | JournalTechnicalType::Expense)) => {
                partner.payment_condition.clone()
            }
            _ => None,
        };
        single("paymentCondition", to_json(&mv.payment_condition))
    }

    pub fn set_partner_bank_details(&self, mv: &mut Move) -> Values {
        mv.partner_bank_details = mv
            .partner
            .as_ref()
            .and_then(|p| p.default_bank_details().cloned());
        single("partnerBankDetails", to_json(&mv.partner_bank_details))
    }

    pub fn set_company_bank_details(&self, mv: &mut Move) -> Values {
        mv.company_bank_details = mv
            .company
            .as_ref()
            .and_then(|c| c.default_bank_details.clone())
            .filter(|b| b.active);
        single("companyBankDetails", to_json(&mv.company_bank_details))
    }
}
