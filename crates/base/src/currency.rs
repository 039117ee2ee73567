//! Currencies and dated conversion rates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use erpsuite_core::i18n::Message;
use erpsuite_core::money::{self, COMPUTATION_SCALING};
use erpsuite_core::{DomainError, DomainResult, ValueObject};

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub number_of_decimals: u32,
}

impl Currency {
    pub fn new(code: impl Into<String>, number_of_decimals: u32) -> Self {
        Self {
            code: code.into(),
            number_of_decimals,
        }
    }
}

impl ValueObject for Currency {}

/// `1 from = rate to`, valid from `date` until a newer rate exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct CurrencyService {
    rates: Vec<CurrencyRate>,
}

impl CurrencyService {
    pub fn new(rates: Vec<CurrencyRate>) -> Self {
        Self { rates }
    }

    pub fn add_rate(&mut self, rate: CurrencyRate) {
        self.rates.push(rate);
    }

    /// Latest rate on or before `date`. An inverse rate is used when only
    /// the opposite direction is known.
    pub fn rate_at_date(&self, from: &str, to: &str, date: NaiveDate) -> DomainResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        if let Some(direct) = self.latest(from, to, date) {
            return Ok(direct.rate);
        }

        if let Some(inverse) = self.latest(to, from, date) {
            return money::divide(Decimal::ONE, inverse.rate, COMPUTATION_SCALING);
        }

        Err(DomainError::no_value(
            Message::new(messages::CURRENCY_RATE_MISSING)
                .arg(from)
                .arg(to)
                .arg(date),
        ))
    }

    /// Convert `amount`, rounded HALF_UP to `scale` decimals.
    pub fn convert_at_date(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
        date: NaiveDate,
        scale: u32,
    ) -> DomainResult<Decimal> {
        if from == to || amount.is_zero() {
            return Ok(amount);
        }
        let rate = self.rate_at_date(from, to, date)?;
        money::multiply(amount, rate, scale)
    }

    fn latest(&self, from: &str, to: &str, date: NaiveDate) -> Option<&CurrencyRate> {
        self.rates
            .iter()
            .filter(|r| r.from == from && r.to == to && r.date <= date)
            .max_by_key(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erpsuite_core::ErrorCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn service() -> CurrencyService {
        CurrencyService::new(vec![
            CurrencyRate {
                from: "EUR".into(),
                to: "USD".into(),
                rate: Decimal::new(110, 2),
                date: d(2024, 1, 1),
            },
            CurrencyRate {
                from: "EUR".into(),
                to: "USD".into(),
                rate: Decimal::new(120, 2),
                date: d(2024, 6, 1),
            },
        ])
    }

    #[test]
    fn uses_latest_rate_on_or_before_date() {
        let svc = service();
        let march = svc
            .convert_at_date("EUR", "USD", Decimal::new(10000, 2), d(2024, 3, 1), 2)
            .unwrap();
        assert_eq!(march, Decimal::new(11000, 2));

        let july = svc
            .convert_at_date("EUR", "USD", Decimal::new(10000, 2), d(2024, 7, 1), 2)
            .unwrap();
        assert_eq!(july, Decimal::new(12000, 2));
    }

    #[test]
    fn inverse_rate_is_used_when_direct_is_missing() {
        let svc = service();
        // 120 USD / 1.20 = 100 EUR
        let v = svc
            .convert_at_date("USD", "EUR", Decimal::new(120, 0), d(2024, 7, 1), 2)
            .unwrap();
        assert_eq!(v, Decimal::new(10000, 2));
    }

    #[test]
    fn same_currency_is_identity() {
        let svc = CurrencyService::default();
        let v = svc
            .convert_at_date("EUR", "EUR", Decimal::new(1234, 2), d(2024, 1, 1), 2)
            .unwrap();
        assert_eq!(v, Decimal::new(1234, 2));
    }

    #[test]
    fn missing_rate_is_a_no_value_error() {
        let err = service()
            .convert_at_date("EUR", "USD", Decimal::ONE, d(2023, 12, 31), 2)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NoValue);
    }

    #[test]
    fn conversion_overflow_is_an_inconsistency() {
        let err = service()
            .convert_at_date("EUR", "USD", Decimal::MAX, d(2024, 7, 1), 2)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Inconsistency);
    }
}
