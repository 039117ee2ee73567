use std::collections::HashMap;

use rust_decimal::Decimal;

use erpsuite_core::i18n::Message;
use erpsuite_core::money::{self, COMPUTATION_SCALING};
use erpsuite_core::{DomainError, DomainResult};

use crate::messages;
use crate::model::Unit;

/// Table of `from → to` multiplication factors.
///
/// A factor registered one way also converts the other way through its
/// inverse.
#[derive(Debug, Clone, Default)]
pub struct UnitConversionService {
    factors: HashMap<(Unit, Unit), Decimal>,
}

impl UnitConversionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factor(mut self, from: Unit, to: Unit, factor: Decimal) -> Self {
        self.factors.insert((from, to), factor);
        self
    }

    fn factor(&self, from: &Unit, to: &Unit) -> DomainResult<Decimal> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        if let Some(f) = self.factors.get(&(from.clone(), to.clone())) {
            return Ok(*f);
        }
        if let Some(f) = self.factors.get(&(to.clone(), from.clone())) {
            return money::divide(Decimal::ONE, *f, COMPUTATION_SCALING);
        }
        Err(DomainError::configuration(
            Message::new(messages::UNIT_CONVERSION_MISSING)
                .arg(from)
                .arg(to),
        ))
    }

    /// Convert `value` from one unit to another, rounded HALF_UP to `scale`.
    pub fn convert(
        &self,
        from: &Unit,
        to: &Unit,
        value: Decimal,
        scale: u32,
    ) -> DomainResult<Decimal> {
        let factor = self.factor(from, to)?;
        money::multiply(value, factor, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn service() -> UnitConversionService {
        UnitConversionService::new().with_factor(Unit::new("BOX"), Unit::new("PCE"), Decimal::new(12, 0))
    }

    #[test]
    fn converts_both_ways() {
        let s = service();
        assert_eq!(
            s.convert(&Unit::new("BOX"), &Unit::new("PCE"), Decimal::new(3, 0), 2).unwrap(),
            Decimal::new(3600, 2)
        );
        assert_eq!(
            s.convert(&Unit::new("PCE"), &Unit::new("BOX"), Decimal::new(18, 0), 2).unwrap(),
            Decimal::new(150, 2)
        );
    }

    #[test]
    fn missing_factor_is_a_configuration_error() {
        let err = service()
            .convert(&Unit::new("KG"), &Unit::new("PCE"), Decimal::ONE, 2)
            .unwrap_err();
        match err {
            DomainError::Configuration(msg) if msg.key() == messages::UNIT_CONVERSION_MISSING => {
                assert_eq!(msg.to_string(), "Please configure unit conversion from 'KG' to 'PCE'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn overflowing_quantity_is_rejected() {
        let err = service()
            .convert(&Unit::new("BOX"), &Unit::new("PCE"), Decimal::MAX, 2)
            .unwrap_err();
        assert_eq!(err.category(), erpsuite_core::ErrorCategory::Inconsistency);
    }

    proptest! {
        #[test]
        fn same_unit_is_identity(units in -1_000_000i64..1_000_000i64) {
            let value = Decimal::new(units, 3);
            let unit = Unit::new("PCE");
            prop_assert_eq!(
                UnitConversionService::new().convert(&unit, &unit, value, 3).unwrap(),
                value
            );
        }
    }
}
