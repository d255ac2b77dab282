use rust_decimal::Decimal;
use std::fmt;

/// Bracket schedule warnings emitted while linting the configuration.
///
/// None of these stop a calculation: brackets are always applied in the
/// order given, so a suspicious schedule still produces a (possibly
/// unintended) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Bracket `min` is lower than the previous bracket's `min`.
    UnorderedBracket {
        index: usize,
        min: Decimal,
        previous_min: Decimal,
    },
    /// Bracket starts before the previous bracket ends.
    OverlappingBracket {
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },
    /// Income between the previous bracket's `max` and this `min` is untaxed.
    BracketGap {
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },
    /// Bracket `max` is below its own `min`.
    InvertedBracket {
        index: usize,
        min: Decimal,
        max: Decimal,
    },
    /// An unbounded bracket is followed by further brackets.
    UnboundedBracketNotLast { index: usize },
    /// Rate is negative or above 100%.
    RateOutOfRange { index: usize, rate: Decimal },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnorderedBracket {
                index,
                min,
                previous_min,
            } => write!(
                f,
                "bracket #{index} min {min} is below the previous bracket min {previous_min}"
            ),
            Warning::OverlappingBracket {
                index,
                min,
                previous_max,
            } => write!(
                f,
                "bracket #{index} min {min} overlaps the previous bracket ending at {previous_max}"
            ),
            Warning::BracketGap {
                index,
                min,
                previous_max,
            } => write!(
                f,
                "bracket #{index} min {min} leaves income from {previous_max} untaxed"
            ),
            Warning::InvertedBracket { index, min, max } => {
                write!(f, "bracket #{index} max {max} is below its min {min}")
            }
            Warning::UnboundedBracketNotLast { index } => {
                write!(f, "bracket #{index} has no max but is not the last bracket")
            }
            Warning::RateOutOfRange { index, rate } => {
                write!(f, "bracket #{index} rate {rate} is outside 0..=1")
            }
        }
    }
}
