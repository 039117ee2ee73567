//! Accounting module: journal entries (moves), invoice terms and payments.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Lookups
//! that need stored data (periods, other moves) go through
//! [`AccountingDirectory`].

pub mod directory;
pub mod entry;
pub mod invoice;
pub mod messages;
pub mod model;
pub mod service;

pub use directory::{AccountingDirectory, InMemoryAccountingDirectory};
pub use entry::{FunctionalOrigin, Move, MoveLine, MoveStatus, TechnicalOrigin};
pub use invoice::{
    BudgetDistribution, DiscountBase, FinancialDiscount, Invoice, InvoicePayment, InvoiceTerm,
    InvoiceTermPayment, PayVoucherElement, PfpStatus,
};
pub use model::{
    Account, AccountKind, BankDetails, Company, DelayUnit, InOut, Journal, JournalTechnicalType, Partner,
    PartnerType, PaymentCondition, PaymentConditionLine, PaymentMode, Period, PeriodStatus,
};
pub use service::{
    InvoiceFinancialDiscountService, InvoiceTermPaymentService, InvoiceTermService, MoveAttrsService,
    MoveCheckService, MoveComputeService, MoveControlService, MoveDefaultService, MoveHooks,
    MoveInvoiceTermService, MoveRecordService, MoveRecordSetService, MoveRecordUpdateService,
};
