//! Human resources module: expense reports and their lines.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod messages;
pub mod model;
pub mod service;

pub use model::{
    Employee, Expense, ExpenseLine, ExpenseLineUpdate, ExpenseStatus, KilometricAllowParam, KilometricType,
};
pub use service::{ExpenseComputationService, ExpenseLineToolService, ExpenseLineUpdateService};
