pub mod expense_computation;
pub mod expense_line_tool;
pub mod expense_line_update;

pub use expense_computation::ExpenseComputationService;
pub use expense_line_tool::ExpenseLineToolService;
pub use expense_line_update::ExpenseLineUpdateService;
