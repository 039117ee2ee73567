mod exceed;
pub mod move_budget;
pub mod sale_order_check_budget;

pub use move_budget::{BudgetAccess, MoveBudgetService};
pub use sale_order_check_budget::SaleOrderCheckBudgetService;

#[cfg(test)]
pub(crate) mod fixtures;
