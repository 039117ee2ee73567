pub mod stock_move_line;
pub mod stock_move_update;
pub mod unit_conversion;
