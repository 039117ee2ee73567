//! Lifecycle coordinator of the move form.
//!
//! Each handler runs the cascade of move services for one form event and
//! collects their contributions into a [`RecordContext`]. The move is updated
//! in place so the caller can return the new state of the record alongside
//! the patch.

use std::sync::Arc;

use serde_json::Value;

use erpsuite_base::CurrencyService;
use erpsuite_core::{ActionContext, DomainResult, RecordContext};

use crate::directory::AccountingDirectory;
use crate::entry::Move;
use crate::service::{
    MoveAttrsService, MoveCheckService, MoveComputeService, MoveDefaultService, MoveInvoiceTermService,
    MoveRecordSetService, MoveRecordUpdateService,
};

#[derive(Clone)]
pub struct MoveRecordService {
    defaults: MoveDefaultService,
    attrs: MoveAttrsService,
    check: MoveCheckService,
    compute: MoveComputeService,
    record_set: MoveRecordSetService,
    record_update: MoveRecordUpdateService,
}

impl MoveRecordService {
    pub fn new(
        directory: Arc<dyn AccountingDirectory>,
        currencies: Arc<CurrencyService>,
        nb_decimal_digits: u32,
    ) -> Self {
        Self {
            defaults: MoveDefaultService::new(directory.clone()),
            attrs: MoveAttrsService::new(MoveInvoiceTermService::new(directory.clone())),
            check: MoveCheckService::new(directory.clone()),
            compute: MoveComputeService::new(),
            record_set: MoveRecordSetService::new(directory.clone()),
            record_update: MoveRecordUpdateService::new(directory, currencies, nb_decimal_digits),
        }
    }

    pub fn on_new(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move on new");
        let mut result = RecordContext::new();

        result.put_in_values(self.defaults.set_default_move_values(mv, ctx));
        result.put_in_values(self.defaults.set_default_currency(mv));
        result.put_in_values(self.record_set.set_journal(mv));
        result.put_in_values(self.record_set.set_period(mv)?);
        result.put_in_attrs(self.attrs.hidden_attribute_values(mv));
        result.put_attr("$reconcileTags", "hidden", self.attrs.is_hidden_move_line_list_viewer(mv));
        self.put_validate_period(mv, ctx, &mut result);
        result.put_in_values(self.check.check_period_and_status(mv));
        result.put_in_attrs(self.attrs.functional_origin_select_domain(mv));
        result.put_in_values(self.record_set.set_functional_origin_select(mv));
        self.check.check_period_permission(mv, ctx)?;
        result.put_in_attrs(self.attrs.move_line_analytic_attrs(mv));

        Ok(result)
    }

    pub fn on_load(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move on load");
        let mut result = RecordContext::new();

        result.put_in_attrs(self.attrs.hidden_attribute_values(mv));
        result.put_in_values(self.compute.compute_totals(mv));
        result.put_attr("$reconcileTags", "hidden", self.attrs.is_hidden_move_line_list_viewer(mv));
        self.put_validate_period(mv, ctx, &mut result);
        result.put_value("$isThereRelatedCutOffMoves", self.check.check_related_cut_off_moves(mv));
        result.put_in_values(self.check.check_period_and_status(mv));
        result.put_in_attrs(self.attrs.functional_origin_select_domain(mv));
        result.put_in_attrs(self.attrs.compute_and_get_due_date(mv, ctx));
        result.put_in_attrs(self.attrs.move_line_analytic_attrs(mv));

        Ok(result)
    }

    pub fn on_change_date(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, date = ?mv.date, "move date changed");
        let mut result = RecordContext::new();

        result.put_in_values(self.record_set.set_period(mv)?);
        self.put_validate_period(mv, ctx, &mut result);
        self.check.check_period_permission(mv, ctx)?;
        result.put_in_values(self.record_set.set_move_line_dates(mv));
        self.record_update.update_move_lines_currency_rate(mv, ctx)?;
        result.put_in_values(self.compute.compute_totals(mv));
        mark_date_change(ctx);
        result.put_in_attrs(self.attrs.compute_and_get_due_date(mv, ctx));

        Ok(result)
    }

    pub fn on_change_journal(&self, mv: &mut Move, _ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move journal changed");
        let mut result = RecordContext::new();

        result.put_in_attrs(self.attrs.functional_origin_select_domain(mv));
        result.put_in_values(self.record_set.set_functional_origin_select(mv));
        self.check_partner_compatible(mv, &mut result);
        result.put_in_values(self.record_set.set_payment_mode(mv));
        result.put_in_values(self.record_set.set_payment_condition(mv));
        result.put_in_values(self.record_set.set_partner_bank_details(mv));

        Ok(result)
    }

    pub fn on_change_partner(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move partner changed");
        let mut result = RecordContext::new();

        result.put_in_values(self.record_set.set_currency_by_partner(mv));
        result.put_in_values(self.record_set.set_payment_mode(mv));
        result.put_in_values(self.record_set.set_payment_condition(mv));
        result.put_in_values(self.record_set.set_partner_bank_details(mv));
        result.put_in_attrs(self.attrs.compute_and_get_due_date(mv, ctx));
        result.put_in_attrs(self.attrs.hidden_attribute_values(mv));
        result.put_in_values(self.record_set.set_company_bank_details(mv));

        Ok(result)
    }

    pub fn on_change_move_line_list(
        &self,
        mv: &mut Move,
        ctx: &mut ActionContext,
    ) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, lines = mv.lines.len(), "move lines changed");
        let mut result = RecordContext::new();

        result.put_in_values(self.compute.compute_totals(mv));
        result.put_in_attrs(self.attrs.compute_and_get_due_date(mv, ctx));
        result.put_in_attrs(self.attrs.move_line_analytic_attrs(mv));

        Ok(result)
    }

    pub fn on_change_origin_date(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, origin_date = ?mv.origin_date, "move origin date changed");
        let mut result = RecordContext::new();

        self.check_duplicate_origin(mv, &mut result);
        result.put_in_values(self.record_set.set_move_line_origin_dates(mv));
        mark_date_change(ctx);
        result.put_in_attrs(self.attrs.compute_and_get_due_date(mv, ctx));
        result.put_value("$paymentConditionChange", true);

        Ok(result)
    }

    pub fn on_change_origin(&self, mv: &mut Move, _ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move origin changed");
        let mut result = RecordContext::new();

        if let Err(e) = self.check.check_origin(mv) {
            result.put_in_alert(e.message());
        }
        self.check_duplicate_origin(mv, &mut result);
        result.put_in_values(self.record_set.set_origin_on_move_line_list(mv));

        Ok(result)
    }

    pub fn on_save_before(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, "move before save");

        self.check.check_dates(mv)?;
        self.check.check_period_permission(mv, ctx)?;
        self.check.check_removed_lines(mv)?;
        self.check.check_analytic_account(mv)?;
        self.record_update.update_partner(mv);

        Ok(RecordContext::new())
    }

    pub fn on_save_after(&self, mv: &mut Move, ctx: &mut ActionContext) -> DomainResult<RecordContext> {
        tracing::debug!(move_id = %mv.id, status = ?mv.status, "move after save");
        let mut result = RecordContext::new();

        result.merge(self.record_update.update_invoice_terms(mv, ctx)?);
        self.record_update.update_round_invoice_term_percentages(mv)?;
        self.record_update.update_due_date(mv, ctx);
        self.record_update.update_in_day_book_mode(mv)?;

        Ok(result)
    }

    fn put_validate_period(&self, mv: &Move, ctx: &ActionContext, result: &mut RecordContext) {
        result.put_value(
            "$validatePeriod",
            !self.check.is_authorized_to_account_on_period(mv, ctx),
        );
    }

    /// An incompatible partner is dropped from the move and the user is told why.
    fn check_partner_compatible(&self, mv: &mut Move, result: &mut RecordContext) {
        if let Err(e) = self.check.check_partner_compatible(mv) {
            mv.partner = None;
            result.put_value("partner", Value::Null);
            result.put_in_notify(e.message());
        }
    }

    fn check_duplicate_origin(&self, mv: &Move, result: &mut RecordContext) {
        if let Err(e) = self.check.check_duplicated_move_origin(mv) {
            result.put_in_alert(e.message());
        }
    }
}

fn mark_date_change(ctx: &mut ActionContext) {
    ctx.put("$dateChange", true);
    ctx.put("dueDate", Value::Null);
}
