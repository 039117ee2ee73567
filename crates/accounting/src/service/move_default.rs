use std::sync::Arc;

use erpsuite_core::record_context::{Values, to_json};
use erpsuite_core::ActionContext;

use crate::directory::AccountingDirectory;
use crate::entry::{Move, MoveStatus, TechnicalOrigin};

#[derive(Clone)]
pub struct MoveDefaultService {
    directory: Arc<dyn AccountingDirectory>,
}

impl MoveDefaultService {
    pub fn new(directory: Arc<dyn AccountingDirectory>) -> Self {
        Self { directory }
    }

    /// Company (when missing), date, status and technical origin.
    pub fn set_default_move_values(&self, mv: &mut Move, ctx: &ActionContext) -> Values {
        if mv.company.is_none() {
            mv.company = self.directory.default_company();
        }
        mv.date = Some(ctx.today);
        mv.status = MoveStatus::New;
        mv.technical_origin = TechnicalOrigin::Entry;

        let mut values = Values::new();
        values.insert("company".into(), to_json(&mv.company));
        values.insert("date".into(), to_json(&mv.date));
        values.insert("status".into(), to_json(&mv.status));
        values.insert("technicalOrigin".into(), to_json(&mv.technical_origin));
        values
    }

    /// Company currency, overridden by the partner's currency.
    pub fn set_default_currency(&self, mv: &mut Move) -> Values {
        let partner_currency = mv.partner.as_ref().and_then(|p| p.currency.clone());
        let company_currency = mv.company_currency().map(str::to_string);
        mv.currency = partner_currency.or(company_currency.clone());

        let mut values = Values::new();
        values.insert("currency".into(), to_json(&mv.currency));
        values.insert("$companyCurrency".into(), to_json(&company_currency));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fixtures::{customer, d, directory};
    use serde_json::json;

    #[test]
    fn new_move_gets_company_and_today() {
        let svc = MoveDefaultService::new(directory());
        let mut mv = Move::default();
        let ctx = ActionContext::new(d(2024, 5, 2));

        let values = svc.set_default_move_values(&mut mv, &ctx);

        assert_eq!(mv.company.as_ref().map(|c| c.code.as_str()), Some("ACME"));
        assert_eq!(values["date"], json!("2024-05-02"));
        assert_eq!(values["status"], json!("new"));
    }

    #[test]
    fn partner_currency_wins_over_company_currency() {
        let svc = MoveDefaultService::new(directory());
        let mut mv = Move::default();
        svc.set_default_move_values(&mut mv, &ActionContext::default());

        svc.set_default_currency(&mut mv);
        assert_eq!(mv.currency.as_deref(), Some("EUR"));

        mv.partner = Some(customer());
        let values = svc.set_default_currency(&mut mv);
        assert_eq!(values["currency"], json!("USD"));
        assert_eq!(values["$companyCurrency"], json!("EUR"));
    }
}
