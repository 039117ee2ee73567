use serde_json::Value;

use erpsuite_core::record_context::{Attrs, to_json};
use erpsuite_core::ActionContext;

use crate::entry::{Move, MoveStatus};
use crate::service::MoveInvoiceTermService;

const ANALYTIC_AXES: u8 = 5;

#[derive(Clone)]
pub struct MoveAttrsService {
    move_invoice_terms: MoveInvoiceTermService,
}

fn put(attrs: &mut Attrs, field: &str, attr: &str, value: Value) {
    attrs
        .entry(field.to_string())
        .or_default()
        .insert(attr.to_string(), value);
}

impl MoveAttrsService {
    pub fn new(move_invoice_terms: MoveInvoiceTermService) -> Self {
        Self { move_invoice_terms }
    }

    /// Line columns that make no sense for the move's status or currency.
    pub fn hidden_attribute_values(&self, mv: &Move) -> Attrs {
        let not_posted = matches!(mv.status, MoveStatus::New | MoveStatus::Simulated);
        let same_currency = !mv.is_other_currency();
        let no_cut_off = mv
            .lines
            .iter()
            .all(|l| l.cut_off_start_date.is_none() && l.cut_off_end_date.is_none());

        let mut attrs = Attrs::new();
        put(&mut attrs, "lines.partner", "hidden", mv.partner.is_some().into());
        put(&mut attrs, "lines.counter", "hidden", not_posted.into());
        put(
            &mut attrs,
            "lines.amountRemaining",
            "hidden",
            (not_posted || mv.status == MoveStatus::Canceled).into(),
        );
        put(&mut attrs, "lines.reconcileGroup", "hidden", not_posted.into());
        put(&mut attrs, "lines.currencyRate", "hidden", same_currency.into());
        put(&mut attrs, "lines.currencyAmount", "hidden", same_currency.into());
        put(&mut attrs, "lines.cutOffStartDate", "hidden", no_cut_off.into());
        put(&mut attrs, "lines.cutOffEndDate", "hidden", no_cut_off.into());
        attrs
    }

    /// The reconcile tags viewer only shows on posted moves with reconciled lines.
    pub fn is_hidden_move_line_list_viewer(&self, mv: &Move) -> bool {
        matches!(mv.status, MoveStatus::New | MoveStatus::Simulated)
            || !mv.lines.iter().any(|l| l.is_reconciled())
    }

    pub fn functional_origin_select_domain(&self, mv: &Move) -> Attrs {
        let mut attrs = Attrs::new();
        if let Some(journal) = mv.journal.as_ref() {
            if !journal.authorized_functional_origins.is_empty() {
                put(
                    &mut attrs,
                    "functionalOrigin",
                    "selection-in",
                    to_json(&journal.authorized_functional_origins),
                );
            }
        }
        attrs
    }

    /// Visibility of the header due date and, when it has to be refreshed, its value.
    pub fn compute_and_get_due_date(&self, mv: &Move, ctx: &ActionContext) -> Attrs {
        let mut attrs = Attrs::new();
        let display = self.move_invoice_terms.display_due_date(mv);
        put(&mut attrs, "$dueDate", "hidden", (!display).into());

        if display {
            let is_date_change = ctx.flag("$dateChange");
            let due_date_missing = ctx.get("dueDate").is_none_or(Value::is_null);
            if due_date_missing || is_date_change {
                let is_single_term = self.move_invoice_terms.is_single_term(mv);
                let due_date = self
                    .move_invoice_terms
                    .compute_due_date(mv, is_single_term, is_date_change);
                put(&mut attrs, "$dueDate", "value", to_json(&due_date));
            }
        }
        attrs
    }

    /// Analytic columns beyond the company's configured axes are hidden.
    pub fn move_line_analytic_attrs(&self, mv: &Move) -> Attrs {
        let (enabled, axes) = mv
            .company
            .as_ref()
            .map(|c| (c.analytic_enabled, c.analytic_axes))
            .unwrap_or((false, 0));

        let mut attrs = Attrs::new();
        put(&mut attrs, "lines.analyticCodes", "hidden", (!enabled).into());
        for axis in 1..=ANALYTIC_AXES {
            put(
                &mut attrs,
                &format!("lines.axis{axis}AnalyticAccount"),
                "hidden",
                (!enabled || axis > axes).into(),
            );
        }
        attrs
    }
}
