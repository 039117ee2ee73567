use rust_decimal::Decimal;
use serde::Serialize;

use erpsuite_core::i18n::Message;
use erpsuite_core::money;
use erpsuite_core::{DomainError, DomainResult, RecordId};

use crate::messages;
use crate::model::{MergeChoices, SaleOrder, SaleOrderStatus};

/// Values shared by every order of the merge. A field is `None` once two
/// orders disagree on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeCommonFields {
    pub company: Option<String>,
    pub currency: Option<String>,
    pub client_partner: Option<String>,
    pub contact_partner: Option<String>,
    pub tax_number: Option<String>,
    pub fiscal_position: Option<String>,
    pub team: Option<String>,
    pub price_list: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeChecks {
    pub exist_currency_diff: bool,
    pub exist_company_diff: bool,
    pub exist_client_partner_diff: bool,
    pub exist_tax_number_diff: bool,
    pub exist_fiscal_position_diff: bool,
    pub exist_team_diff: bool,
    pub exist_contact_partner_diff: bool,
    pub exist_price_list_diff: bool,
}

impl MergeChecks {
    /// Differences the user may settle by picking a value.
    pub fn needs_confirmation(&self) -> bool {
        self.exist_contact_partner_diff || self.exist_team_diff || self.exist_price_list_diff
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrderMergingResult {
    pub common_fields: MergeCommonFields,
    pub checks: MergeChecks,
    pub confirmation_needed: bool,
    /// The merged order, once the merge went through.
    pub sale_order: Option<SaleOrder>,
}

fn update_diff(common: &mut Option<String>, exist_diff: &mut bool, value: &Option<String>) {
    if !*exist_diff && common != value {
        *common = None;
        *exist_diff = true;
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SaleOrderMergingService;

impl SaleOrderMergingService {
    pub fn new() -> Self {
        Self
    }

    /// Collect the common fields of `orders` and flag those that differ.
    pub fn compare(&self, orders: &[SaleOrder]) -> DomainResult<SaleOrderMergingResult> {
        let Some((first, others)) = orders.split_first() else {
            return Err(DomainError::inconsistency(messages::SALE_ORDER_MERGE_LIST_EMPTY));
        };

        let mut common = self.fill_common_fields(first);
        let mut checks = MergeChecks::default();
        for order in others {
            self.update_diffs_common_fields(order, &mut common, &mut checks);
        }

        Ok(SaleOrderMergingResult {
            common_fields: common,
            checks,
            confirmation_needed: false,
            sale_order: None,
        })
    }

    fn fill_common_fields(&self, first: &SaleOrder) -> MergeCommonFields {
        MergeCommonFields {
            company: first.company.clone(),
            currency: first.currency.clone(),
            client_partner: first.client_partner.clone(),
            contact_partner: first.contact_partner.clone(),
            tax_number: first.tax_number.clone(),
            fiscal_position: first.fiscal_position.clone(),
            team: first.team.clone(),
            price_list: first.price_list.clone(),
        }
    }

    fn update_diffs_common_fields(&self, order: &SaleOrder, common: &mut MergeCommonFields, checks: &mut MergeChecks) {
        update_diff(&mut common.currency, &mut checks.exist_currency_diff, &order.currency);
        update_diff(
            &mut common.client_partner,
            &mut checks.exist_client_partner_diff,
            &order.client_partner,
        );
        update_diff(&mut common.company, &mut checks.exist_company_diff, &order.company);
        update_diff(
            &mut common.contact_partner,
            &mut checks.exist_contact_partner_diff,
            &order.contact_partner,
        );
        update_diff(&mut common.team, &mut checks.exist_team_diff, &order.team);
        update_diff(&mut common.price_list, &mut checks.exist_price_list_diff, &order.price_list);
        update_diff(&mut common.tax_number, &mut checks.exist_tax_number_diff, &order.tax_number);
        update_diff(
            &mut common.fiscal_position,
            &mut checks.exist_fiscal_position_diff,
            &order.fiscal_position,
        );
    }

    /// Differences that forbid the merge. Currency, client and company are
    /// also required.
    pub fn check_errors(&self, result: &SaleOrderMergingResult) -> DomainResult<()> {
        let common = &result.common_fields;
        let checks = &result.checks;
        let mut errors: Vec<(&str, &'static str)> = Vec::new();
        if checks.exist_currency_diff || common.currency.is_none() {
            errors.push(("currency", messages::SALE_ORDER_MERGE_ERROR_CURRENCY));
        }
        if checks.exist_client_partner_diff || common.client_partner.is_none() {
            errors.push(("client", messages::SALE_ORDER_MERGE_ERROR_CLIENT_PARTNER));
        }
        if checks.exist_company_diff || common.company.is_none() {
            errors.push(("company", messages::SALE_ORDER_MERGE_ERROR_COMPANY));
        }
        if checks.exist_tax_number_diff {
            errors.push(("tax number", messages::SALE_ORDER_MERGE_ERROR_TAX_NUMBER));
        }
        if checks.exist_fiscal_position_diff {
            errors.push(("fiscal position", messages::SALE_ORDER_MERGE_ERROR_FISCAL_POSITION));
        }

        match errors.as_slice() {
            [] => Ok(()),
            [(_, key)] => Err(DomainError::inconsistency(*key)),
            _ => {
                let fields: Vec<&str> = errors.iter().map(|(field, _)| *field).collect();
                Err(DomainError::inconsistency(
                    Message::new(messages::SALE_ORDER_MERGE_ERRORS).arg(fields.join(", ")),
                ))
            }
        }
    }

    /// Merge quotations into a new draft order.
    ///
    /// When contact, team or price list differ and `choices` is `None`, the
    /// result asks for confirmation and nothing is merged. With `choices`,
    /// the picked values replace the differing ones.
    pub fn merge_sale_orders(
        &self,
        orders: &[SaleOrder],
        choices: Option<&MergeChoices>,
    ) -> DomainResult<SaleOrderMergingResult> {
        let mut result = self.compare(orders)?;

        if let Some(order) = orders.iter().find(|o| !o.status.is_quotation()) {
            return Err(DomainError::inconsistency(
                Message::new(messages::SALE_ORDER_MERGE_NOT_DRAFT).arg(order.label()),
            ));
        }
        self.check_errors(&result)?;

        match choices {
            None if result.checks.needs_confirmation() => {
                result.confirmation_needed = true;
                return Ok(result);
            }
            None => {}
            Some(choices) => self.apply_choices(&mut result, choices),
        }

        let merged = self.build_merged_order(orders, &result.common_fields)?;
        tracing::info!(
            orders = orders.len(),
            merged = %merged.id,
            total = %merged.in_tax_total,
            "sale orders merged"
        );
        result.sale_order = Some(merged);
        Ok(result)
    }

    fn apply_choices(&self, result: &mut SaleOrderMergingResult, choices: &MergeChoices) {
        let common = &mut result.common_fields;
        if result.checks.exist_contact_partner_diff {
            common.contact_partner = choices.contact_partner.clone();
        }
        if result.checks.exist_team_diff {
            common.team = choices.team.clone();
        }
        if result.checks.exist_price_list_diff {
            common.price_list = choices.price_list.clone();
        }
    }

    fn build_merged_order(&self, orders: &[SaleOrder], common: &MergeCommonFields) -> DomainResult<SaleOrder> {
        let mut ex_tax_total = Decimal::ZERO;
        let mut in_tax_total = Decimal::ZERO;
        for order in orders {
            ex_tax_total = money::checked_add(ex_tax_total, order.ex_tax_total)?;
            in_tax_total = money::checked_add(in_tax_total, order.in_tax_total)?;
        }

        Ok(SaleOrder {
            id: RecordId::new(),
            sale_order_seq: None,
            status: SaleOrderStatus::Draft,
            company: common.company.clone(),
            currency: common.currency.clone(),
            client_partner: common.client_partner.clone(),
            contact_partner: common.contact_partner.clone(),
            tax_number: common.tax_number.clone(),
            fiscal_position: common.fiscal_position.clone(),
            team: common.team.clone(),
            price_list: common.price_list.clone(),
            confirmation_date_time: None,
            lines: orders.iter().flat_map(|o| o.lines.iter().cloned()).collect(),
            ex_tax_total,
            in_tax_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SaleOrderLine;
    use proptest::prelude::*;

    fn order(client: &str, total: i64) -> SaleOrder {
        let mut order = SaleOrder::new(client, "ACME", "EUR");
        order.ex_tax_total = Decimal::new(total, 2);
        order.in_tax_total = Decimal::new(total * 12, 3);
        order.lines = vec![SaleOrderLine {
            product_name: format!("P-{total}"),
            qty: Decimal::ONE,
            ex_tax_total: order.ex_tax_total,
            in_tax_total: order.in_tax_total,
        }];
        order
    }

    fn inconsistency_key(err: DomainError) -> String {
        match err {
            DomainError::Inconsistency(msg) => msg.key().to_string(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = SaleOrderMergingService::new().merge_sale_orders(&[], None).unwrap_err();
        assert_eq!(inconsistency_key(err), messages::SALE_ORDER_MERGE_LIST_EMPTY);
    }

    #[test]
    fn compatible_orders_merge_lines_and_totals() {
        let orders = vec![order("C-001", 10000), order("C-001", 5000)];
        let result = SaleOrderMergingService::new().merge_sale_orders(&orders, None).unwrap();

        assert!(!result.confirmation_needed);
        assert_eq!(result.checks, MergeChecks::default());
        let merged = result.sale_order.unwrap();
        assert_eq!(merged.status, SaleOrderStatus::Draft);
        assert_eq!(merged.client_partner.as_deref(), Some("C-001"));
        assert_eq!(merged.lines.len(), 2);
        assert_eq!(merged.ex_tax_total, Decimal::new(15000, 2));
        assert_eq!(merged.in_tax_total, Decimal::new(180000, 3));
        assert!(orders.iter().all(|o| o.id != merged.id));
    }

    #[test]
    fn currency_difference_blocks_the_merge() {
        let mut usd = order("C-001", 100);
        usd.currency = Some("USD".into());
        let err = SaleOrderMergingService::new()
            .merge_sale_orders(&[order("C-001", 100), usd], None)
            .unwrap_err();
        assert_eq!(inconsistency_key(err), messages::SALE_ORDER_MERGE_ERROR_CURRENCY);
    }

    #[test]
    fn several_blocking_differences_are_listed_together() {
        let mut other = order("C-002", 100);
        other.company = Some("GLOBEX".into());
        other.fiscal_position = Some("EU".into());
        let err = SaleOrderMergingService::new()
            .merge_sale_orders(&[order("C-001", 100), other], None)
            .unwrap_err();
        match err {
            DomainError::Inconsistency(msg) => {
                assert_eq!(msg.key(), messages::SALE_ORDER_MERGE_ERRORS);
                assert_eq!(msg.args().to_vec(), vec!["client, company, fiscal position".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn a_missing_fiscal_position_on_one_order_is_a_difference() {
        let mut first = order("C-001", 100);
        first.fiscal_position = Some("EU".into());
        let result = SaleOrderMergingService::new()
            .compare(&[first, order("C-001", 100)])
            .unwrap();
        assert!(result.checks.exist_fiscal_position_diff);
        assert!(result.common_fields.fiscal_position.is_none());
    }

    #[test]
    fn missing_company_is_an_error_even_without_difference() {
        let mut a = order("C-001", 100);
        a.company = None;
        let mut b = order("C-001", 100);
        b.company = None;
        let err = SaleOrderMergingService::new().merge_sale_orders(&[a, b], None).unwrap_err();
        assert_eq!(inconsistency_key(err), messages::SALE_ORDER_MERGE_ERROR_COMPANY);
    }

    #[test]
    fn confirmed_order_cannot_be_merged() {
        let mut confirmed = order("C-001", 100);
        confirmed.status = SaleOrderStatus::Confirmed;
        confirmed.sale_order_seq = Some("SO-0002".into());
        let err = SaleOrderMergingService::new()
            .merge_sale_orders(&[order("C-001", 100), confirmed], None)
            .unwrap_err();
        match err {
            DomainError::Inconsistency(msg) => {
                assert_eq!(msg.key(), messages::SALE_ORDER_MERGE_NOT_DRAFT);
                assert_eq!(msg.args().to_vec(), vec!["SO-0002".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn soft_differences_ask_for_confirmation_then_use_the_choices() {
        let svc = SaleOrderMergingService::new();
        let mut a = order("C-001", 100);
        a.price_list = Some("RETAIL".into());
        a.team = Some("NORTH".into());
        let mut b = order("C-001", 200);
        b.price_list = Some("WHOLESALE".into());
        b.team = Some("NORTH".into());
        let orders = [a, b];

        let pending = svc.merge_sale_orders(&orders, None).unwrap();
        assert!(pending.confirmation_needed);
        assert!(pending.checks.exist_price_list_diff);
        assert!(!pending.checks.exist_team_diff);
        assert!(pending.sale_order.is_none());

        let choices = MergeChoices {
            price_list: Some("WHOLESALE".into()),
            team: Some("SOUTH".into()),
            ..MergeChoices::default()
        };
        let merged = svc
            .merge_sale_orders(&orders, Some(&choices))
            .unwrap()
            .sale_order
            .unwrap();
        assert_eq!(merged.price_list.as_deref(), Some("WHOLESALE"));
        // Only differing fields take the picked value.
        assert_eq!(merged.team.as_deref(), Some("NORTH"));
    }

    proptest! {
        #[test]
        fn merged_total_is_the_sum_of_the_orders(totals in proptest::collection::vec(0i64..10_000_000, 1..8)) {
            let orders: Vec<SaleOrder> = totals.iter().map(|t| order("C-001", *t)).collect();
            let merged = SaleOrderMergingService::new()
                .merge_sale_orders(&orders, None)
                .unwrap()
                .sale_order
                .unwrap();
            let expected: Decimal = totals.iter().map(|t| Decimal::new(*t, 2)).sum();
            prop_assert_eq!(merged.ex_tax_total, expected);
            prop_assert_eq!(merged.lines.len(), orders.len());
        }
    }
}
