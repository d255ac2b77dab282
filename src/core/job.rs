use super::bracket::{calculate_tax_liability, BoundaryMode, TaxBracket};
use super::income::IncomeItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deduction taken from gross income before tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PretaxExpense {
    pub amount: Decimal,
}

/// One income source with its deductions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub taxable_income: Vec<IncomeItem>,
    pub pretax_expense: Vec<PretaxExpense>,
}

/// Derived figures for a single job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeResult {
    pub job: String,
    pub gross_taxable_income: Decimal,
    pub adjusted_gross_income: Decimal,
    pub tax_liability: Decimal,
    pub net_income: Decimal,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("job '{job}': {figure} is out of range")]
    Overflow { job: String, figure: &'static str },
}

/// Calculate net income for a job against a shared bracket schedule
pub fn net_income(
    job: &Job,
    tax_brackets: &[TaxBracket],
    mode: BoundaryMode,
) -> Result<IncomeResult, CalculationError> {
    let overflow = |figure| CalculationError::Overflow {
        job: job.name.clone(),
        figure,
    };

    let gross_taxable_income = job
        .taxable_income
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.amount()?))
        .ok_or_else(|| overflow("gross taxable income"))?;
    let pretax_expenses = job
        .pretax_expense
        .iter()
        .try_fold(Decimal::ZERO, |total, expense| total.checked_add(expense.amount))
        .ok_or_else(|| overflow("pretax expense"))?;
    let adjusted_gross_income = gross_taxable_income
        .checked_sub(pretax_expenses)
        .ok_or_else(|| overflow("adjusted gross income"))?;
    let tax_liability = calculate_tax_liability(adjusted_gross_income, tax_brackets, mode)
        .ok_or_else(|| overflow("tax liability"))?;
    let net_income = adjusted_gross_income
        .checked_sub(tax_liability)
        .ok_or_else(|| overflow("net income"))?;

    log::debug!(
        "Job '{}': gross {} - pretax {} = adjusted {}, tax {}",
        job.name,
        gross_taxable_income,
        pretax_expenses,
        adjusted_gross_income,
        tax_liability
    );

    Ok(IncomeResult {
        job: job.name.clone(),
        gross_taxable_income,
        adjusted_gross_income,
        tax_liability,
        net_income,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn brackets() -> Vec<TaxBracket> {
        vec![
            TaxBracket {
                min: dec!(0),
                max: Some(dec!(10000)),
                rate: dec!(0.1),
            },
            TaxBracket {
                min: dec!(10000),
                max: None,
                rate: dec!(0.2),
            },
        ]
    }

    fn cash(amount: Decimal) -> IncomeItem {
        IncomeItem::DirectCash { amount }
    }

    #[test]
    fn empty_job_is_all_zero() {
        let job = Job {
            name: "sabbatical".to_string(),
            taxable_income: vec![],
            pretax_expense: vec![],
        };

        let result = net_income(&job, &brackets(), BoundaryMode::Inclusive).unwrap();
        assert_eq!(
            result,
            IncomeResult {
                job: "sabbatical".to_string(),
                gross_taxable_income: dec!(0),
                adjusted_gross_income: dec!(0),
                tax_liability: dec!(0),
                net_income: dec!(0),
            }
        );
    }

    #[test]
    fn cash_and_options_less_expenses() {
        let job = Job {
            name: "startup".to_string(),
            taxable_income: vec![
                cash(dec!(90000)),
                IncomeItem::EquityCompensation {
                    total: dec!(4000),
                    years: dec!(4),
                    last_preferred_price: dec!(3),
                    strike_price: dec!(1),
                },
            ],
            pretax_expense: vec![
                PretaxExpense { amount: dec!(20000) },
                PretaxExpense { amount: dec!(2000) },
            ],
        };

        let result = net_income(&job, &brackets(), BoundaryMode::Inclusive).unwrap();
        assert_eq!(result.gross_taxable_income, dec!(92000));
        assert_eq!(result.adjusted_gross_income, dec!(70000));
        // 1000 + 60000 * 0.2
        assert_eq!(result.tax_liability, dec!(13000));
        assert_eq!(result.net_income, dec!(57000));
    }

    #[test]
    fn expenses_without_income_go_negative() {
        let job = Job {
            name: "between jobs".to_string(),
            taxable_income: vec![],
            pretax_expense: vec![PretaxExpense { amount: dec!(500) }],
        };

        let result = net_income(&job, &brackets(), BoundaryMode::Inclusive).unwrap();
        assert_eq!(result.adjusted_gross_income, dec!(-500));
        assert_eq!(result.tax_liability, dec!(0));
        assert_eq!(result.net_income, dec!(-500));
    }

    #[test]
    fn boundary_mode_reaches_tax_liability() {
        let job = Job {
            name: "exact".to_string(),
            taxable_income: vec![cash(dec!(10000))],
            pretax_expense: vec![],
        };

        let inclusive = net_income(&job, &brackets(), BoundaryMode::Inclusive).unwrap();
        let strict = net_income(&job, &brackets(), BoundaryMode::Strict).unwrap();
        assert_eq!(inclusive.net_income, dec!(9000));
        assert_eq!(strict.net_income, dec!(10000));
    }

    #[test]
    fn gross_income_out_of_decimal_range() {
        let job = Job {
            name: "lottery".to_string(),
            taxable_income: vec![cash(Decimal::MAX), cash(Decimal::MAX)],
            pretax_expense: vec![],
        };

        assert_eq!(
            net_income(&job, &brackets(), BoundaryMode::Inclusive),
            Err(CalculationError::Overflow {
                job: "lottery".to_string(),
                figure: "gross taxable income"
            })
        );
    }

    #[test]
    fn tax_out_of_decimal_range() {
        let job = Job {
            name: "whale".to_string(),
            taxable_income: vec![cash(Decimal::MAX)],
            pretax_expense: vec![],
        };
        let brackets = vec![TaxBracket {
            min: dec!(0),
            max: None,
            rate: dec!(2),
        }];

        let err = net_income(&job, &brackets, BoundaryMode::Inclusive).unwrap_err();
        assert_eq!(err.to_string(), "job 'whale': tax liability is out of range");
    }
}
