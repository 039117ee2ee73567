//! Sales module: sale order merging and customer loyalty accounts.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod messages;
pub mod model;
pub mod service;

pub use model::{LoyaltyAccount, LoyaltyHistoryLine, MergeChoices, SaleOrder, SaleOrderLine, SaleOrderStatus};
pub use service::{
    LoyaltyAccountService, MergeChecks, MergeCommonFields, SaleOrderMergingResult, SaleOrderMergingService,
};
