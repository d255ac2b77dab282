pub mod bracket;
pub mod income;
pub mod job;
pub mod warnings;

// Flat public surface for domain types and functions.
pub use bracket::{lint_brackets, BoundaryMode, TaxBracket};
pub use income::{IncomeItem, IncomeItemError, IncomeItemInput};
pub use job::{net_income, CalculationError, IncomeResult, Job, PretaxExpense};
