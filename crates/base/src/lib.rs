//! Shared business services used by every functional module.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod anonymize;
pub mod currency;
pub mod duration;
pub mod messages;
pub mod sequence;

pub use anonymize::{FieldType, anonymize_json, anonymize_value};
pub use currency::{Currency, CurrencyRate, CurrencyService};
pub use duration::{Duration, DurationKind, compute_duration, compute_ratio};
pub use sequence::SequenceGenerator;
