//! Accounting domain services.
//!
//! Each service implements one cohesive rule set; [`MoveRecordService`]
//! composes them per lifecycle event of a move.

pub mod invoice_financial_discount;
pub mod invoice_term;
pub mod invoice_term_payment;
pub mod move_attrs;
pub mod move_check;
pub mod move_compute;
pub mod move_control;
pub mod move_default;
pub mod move_invoice_term;
pub mod move_record;
pub mod move_record_set;
pub mod move_record_update;

pub use invoice_financial_discount::InvoiceFinancialDiscountService;
pub use invoice_term::InvoiceTermService;
pub use invoice_term_payment::InvoiceTermPaymentService;
pub use move_attrs::MoveAttrsService;
pub use move_check::MoveCheckService;
pub use move_compute::MoveComputeService;
pub use move_control::{MoveControlService, MoveHooks};
pub use move_default::MoveDefaultService;
pub use move_invoice_term::MoveInvoiceTermService;
pub use move_record::MoveRecordService;
pub use move_record_set::MoveRecordSetService;
pub use move_record_update::MoveRecordUpdateService;

#[cfg(test)]
pub(crate) mod fixtures;
