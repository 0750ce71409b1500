use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime, ValidationError};

/// Live NSE quote snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveQuote {
    pub symbol: Symbol,
    pub company_name: Option<String>,
    pub last_price: f64,
    pub open: Option<f64>,
    pub prev_close: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub volume: Option<u64>,
    pub as_of: UtcDateTime,
}

impl LiveQuote {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: Symbol,
        company_name: Option<String>,
        last_price: f64,
        open: Option<f64>,
        prev_close: Option<f64>,
        day_high: Option<f64>,
        day_low: Option<f64>,
        volume: Option<u64>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("last_price", last_price)?;
        validate_optional_non_negative("open", open)?;
        validate_optional_non_negative("prev_close", prev_close)?;
        validate_optional_non_negative("day_high", day_high)?;
        validate_optional_non_negative("day_low", day_low)?;

        Ok(Self {
            symbol,
            company_name,
            last_price,
            open,
            prev_close,
            day_high,
            day_low,
            volume,
            as_of,
        })
    }
}

/// Secondary market snapshot from the Yahoo chart endpoint.
///
/// Every metric beyond the symbol is optional; upstream omits fields
/// freely and a missing value is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: Symbol,
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub as_of: UtcDateTime,
}

impl MarketSnapshot {
    pub fn new(
        symbol: Symbol,
        currency: Option<String>,
        regular_market_price: Option<f64>,
        previous_close: Option<f64>,
        fifty_two_week_high: Option<f64>,
        fifty_two_week_low: Option<f64>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        validate_optional_non_negative("regular_market_price", regular_market_price)?;
        validate_optional_non_negative("previous_close", previous_close)?;
        validate_optional_non_negative("fifty_two_week_high", fifty_two_week_high)?;
        validate_optional_non_negative("fifty_two_week_low", fifty_two_week_low)?;

        Ok(Self {
            symbol,
            currency,
            regular_market_price,
            previous_close,
            fifty_two_week_high,
            fifty_two_week_low,
            as_of,
        })
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    if let Some(value) = value {
        validate_non_negative(field, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol() -> Symbol {
        Symbol::parse("HDFCBANK").expect("valid symbol")
    }

    #[test]
    fn rejects_negative_price() {
        let err = LiveQuote::new(
            symbol(),
            None,
            -1.0,
            None,
            None,
            None,
            None,
            None,
            UtcDateTime::now(),
        )
        .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NegativeValue {
                field: "last_price"
            }
        ));
    }

    #[test]
    fn snapshot_tolerates_all_optional_fields_missing() {
        let snapshot =
            MarketSnapshot::new(symbol(), None, None, None, None, None, UtcDateTime::now())
                .expect("snapshot should build");
        assert!(snapshot.regular_market_price.is_none());
        assert!(snapshot.fifty_two_week_high.is_none());
    }

    #[test]
    fn rejects_non_finite_snapshot_field() {
        let err = MarketSnapshot::new(
            symbol(),
            Some(String::from("INR")),
            Some(f64::NAN),
            None,
            None,
            None,
            UtcDateTime::now(),
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }
}
