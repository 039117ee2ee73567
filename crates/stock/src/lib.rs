//! Stock domain module.
//!
//! This crate contains business rules for stock moves and their lines,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod messages;
pub mod model;
pub mod service;

pub use model::{
    Conformity, StockLocation, StockMove, StockMoveLine, StockMoveStatus, Unit,
};
pub use service::stock_move_line::StockMoveLineService;
pub use service::stock_move_update::StockMoveUpdateService;
pub use service::unit_conversion::UnitConversionService;
