//! Budget module: budget keys, automatic budget distribution of move lines
//! and budget exceed control.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod directory;
pub mod hooks;
pub mod key;
pub mod messages;
pub mod model;
pub mod service;

pub use directory::{BudgetDirectory, InMemoryBudgetDirectory};
pub use erpsuite_accounting::BudgetDistribution;
pub use hooks::BudgetLevelHooks;
pub use key::BudgetKey;
pub use model::{Budget, BudgetControl, BudgetLevel, GlobalBudget, SaleOrder, SaleOrderLine};
pub use service::{BudgetAccess, MoveBudgetService, SaleOrderCheckBudgetService};
