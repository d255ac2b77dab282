use super::warnings::Warning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal slice `[min, max)` of a progressive tax schedule.
/// An absent `max` is the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min: Decimal,
    #[serde(default)]
    pub max: Option<Decimal>,
    pub rate: Decimal,
}

/// How income landing exactly on a bracket's `max` is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryMode {
    /// Income equal to `max` is taxed through the full bracket width.
    #[default]
    Inclusive,
    /// Income equal to `max` accrues nothing from that bracket: it is neither
    /// above the bracket nor strictly inside it. Matches figures computed
    /// before the boundary was made inclusive.
    Strict,
}

impl TaxBracket {
    /// Tax accrued within this bracket alone for the given income, `None` on
    /// overflow.
    pub fn tax_on(&self, income: Decimal, mode: BoundaryMode) -> Option<Decimal> {
        let taxed = match self.max {
            Some(upper)
                if income > upper || (mode == BoundaryMode::Inclusive && income == upper) =>
            {
                upper.checked_sub(self.min)?
            }
            Some(upper) if income > self.min && income < upper => income.checked_sub(self.min)?,
            None if income > self.min => income.checked_sub(self.min)?,
            _ => return Some(Decimal::ZERO),
        };
        taxed.checked_mul(self.rate)
    }
}

/// Apply a progressive bracket schedule to adjusted gross income.
///
/// Brackets are accumulated independently in the order given. They are not
/// sorted or checked for overlaps here, see [`lint_brackets`]. Negative income
/// is not clamped. Returns `None` if the total leaves the `Decimal` range.
pub fn calculate_tax_liability(
    adjusted_gross_income: Decimal,
    brackets: &[TaxBracket],
    mode: BoundaryMode,
) -> Option<Decimal> {
    brackets.iter().try_fold(Decimal::ZERO, |total, bracket| {
        let tax = bracket.tax_on(adjusted_gross_income, mode)?;
        log::debug!(
            "Bracket {}..{} @ {}: {} on {}",
            bracket.min,
            bracket.max.map_or("inf".to_string(), |m| m.to_string()),
            bracket.rate,
            tax,
            adjusted_gross_income
        );
        total.checked_add(tax)
    })
}

/// Check a bracket schedule for shapes that silently skew the total.
pub fn lint_brackets(brackets: &[TaxBracket]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            warnings.push(Warning::RateOutOfRange {
                index,
                rate: bracket.rate,
            });
        }
        if let Some(max) = bracket.max {
            if max < bracket.min {
                warnings.push(Warning::InvertedBracket {
                    index,
                    min: bracket.min,
                    max,
                });
            }
        }

        let Some(previous) = index.checked_sub(1).and_then(|i| brackets.get(i)) else {
            continue;
        };

        match previous.max {
            None => warnings.push(Warning::UnboundedBracketNotLast { index: index - 1 }),
            Some(_) if bracket.min < previous.min => warnings.push(Warning::UnorderedBracket {
                index,
                min: bracket.min,
                previous_min: previous.min,
            }),
            Some(previous_max) if bracket.min < previous_max => {
                warnings.push(Warning::OverlappingBracket {
                    index,
                    min: bracket.min,
                    previous_max,
                })
            }
            Some(previous_max) if bracket.min > previous_max => {
                warnings.push(Warning::BracketGap {
                    index,
                    min: bracket.min,
                    previous_max,
                })
            }
            Some(_) => {}
        }
    }

    warnings
}
