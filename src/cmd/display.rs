use crate::core::IncomeResult;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Row for table, JSON and CSV output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct IncomeRow {
    #[tabled(rename = "Job")]
    pub job: String,

    #[tabled(rename = "Gross Taxable Income")]
    pub gross_taxable_income: String,

    #[tabled(rename = "Adjusted Gross Income")]
    pub adjusted_gross_income: String,

    #[tabled(rename = "Tax Liability")]
    pub tax_liability: String,

    #[tabled(rename = "Net Income")]
    pub net_income: String,
}

impl From<&IncomeResult> for IncomeRow {
    fn from(result: &IncomeResult) -> Self {
        IncomeRow {
            job: result.job.clone(),
            gross_taxable_income: format_amount(result.gross_taxable_income),
            adjusted_gross_income: format_amount(result.adjusted_gross_income),
            tax_liability: format_amount(result.tax_liability),
            net_income: format_amount(result.net_income),
        }
    }
}

/// Two decimal places, half away from zero
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// One labelled block per job
pub fn write_text<W: Write>(results: &[IncomeResult], mut writer: W) -> std::io::Result<()> {
    for result in results {
        writeln!(writer, "{}", result.job)?;
        writeln!(
            writer,
            "  gross taxable income  {}",
            format_amount(result.gross_taxable_income)
        )?;
        writeln!(
            writer,
            "  adjusted gross income {}",
            format_amount(result.adjusted_gross_income)
        )?;
        writeln!(
            writer,
            "  tax liability         {}",
            format_amount(result.tax_liability)
        )?;
        writeln!(
            writer,
            "  net income            {}",
            format_amount(result.net_income)
        )?;
    }
    Ok(())
}

pub fn render_table(results: &[IncomeResult]) -> String {
    let rows: Vec<IncomeRow> = results.iter().map(IncomeRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

pub fn render_json(results: &[IncomeResult]) -> serde_json::Result<String> {
    let rows: Vec<IncomeRow> = results.iter().map(IncomeRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// CSV with a header row named after the `IncomeRow` fields
pub fn write_csv<W: Write>(results: &[IncomeResult], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in results.iter().map(IncomeRow::from) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
