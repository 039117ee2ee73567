pub mod loyalty_account;
pub mod sale_order_merging;

pub use loyalty_account::LoyaltyAccountService;
pub use sale_order_merging::{MergeChecks, MergeCommonFields, SaleOrderMergingResult, SaleOrderMergingService};
