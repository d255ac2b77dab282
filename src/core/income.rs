use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// `name` of income entries that describe stock option grants.
pub const OPTIONS_KIND: &str = "options";

/// Taxable income entry as written in a configuration file.
///
/// The kind of entry is inferred from the fields present, see
/// [`IncomeItem::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_preferred_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_price: Option<Decimal>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IncomeItemError {
    #[error("cannot calculate taxable income amount from {0}")]
    UnrecognizedKind(String),
    #[error("'{kind}' income is missing required field '{field}'")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("'{kind}' income must vest over a positive number of years, got {years}")]
    InvalidYears { kind: &'static str, years: Decimal },
    #[error("taxable income amount is out of range for {0}")]
    Overflow(String),
}

/// Taxable income entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeItem {
    /// Cash amount taken as is (salary, bonus, ...)
    DirectCash { amount: Decimal },
    /// Stock option grant vesting evenly over `years`, taxed as ordinary
    /// income on the spread between market price and strike price.
    /// `years` is always positive.
    EquityCompensation {
        total: Decimal,
        years: Decimal,
        last_preferred_price: Decimal,
        strike_price: Decimal,
    },
}

impl IncomeItem {
    /// Taxable amount of this entry for one year, `None` on overflow.
    pub fn amount(&self) -> Option<Decimal> {
        match *self {
            IncomeItem::DirectCash { amount } => Some(amount),
            IncomeItem::EquityCompensation {
                total,
                years,
                last_preferred_price,
                strike_price,
            } => {
                let amount_per_year = total.checked_div(years)?;
                let market_price = amount_per_year.checked_mul(last_preferred_price)?;
                let exercise_cost = amount_per_year.checked_mul(strike_price)?;
                market_price.checked_sub(exercise_cost)
            }
        }
    }
}

impl TryFrom<IncomeItemInput> for IncomeItem {
    type Error = IncomeItemError;

    /// A present `cash_value` always wins, even when it is zero. Otherwise the
    /// entry `name` selects the kind.
    fn try_from(input: IncomeItemInput) -> Result<Self, Self::Error> {
        if let Some(amount) = input.cash_value {
            return Ok(IncomeItem::DirectCash { amount });
        }

        match input.name.as_deref() {
            Some(OPTIONS_KIND) => {
                let required = |value: Option<Decimal>, field| {
                    value.ok_or(IncomeItemError::MissingField {
                        kind: OPTIONS_KIND,
                        field,
                    })
                };
                let total = required(input.total, "total")?;
                let last_preferred_price =
                    required(input.last_preferred_price, "last_preferred_price")?;
                let strike_price = required(input.strike_price, "strike_price")?;

                let years = input.years.unwrap_or(dec!(1));
                if years <= Decimal::ZERO {
                    return Err(IncomeItemError::InvalidYears {
                        kind: OPTIONS_KIND,
                        years,
                    });
                }

                let item = IncomeItem::EquityCompensation {
                    total,
                    years,
                    last_preferred_price,
                    strike_price,
                };
                match item.amount() {
                    Some(_) => Ok(item),
                    None => Err(IncomeItemError::Overflow(describe(&input))),
                }
            }
            _ => Err(IncomeItemError::UnrecognizedKind(describe(&input))),
        }
    }
}

fn describe(input: &IncomeItemInput) -> String {
    serde_json::to_string(input).unwrap_or_else(|_| format!("{input:?}"))
}
