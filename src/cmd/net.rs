//! Net income command - per job income, deductions and tax from one configuration file

use crate::cmd::display;
use crate::config;
use crate::core::{lint_brackets, net_income, BoundaryMode, IncomeResult};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Calculate net income for each job in a configuration file")]
pub struct NetIncomeCommand {
    /// JSON, TOML or YAML file containing jobs and tax brackets
    config: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Treatment of income exactly on a bracket's max
    #[arg(short, long, value_enum, default_value_t = BoundaryArg::Inclusive)]
    bracket_boundary: BoundaryArg,

    /// Fail when the bracket schedule is unordered, overlapping or has gaps
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Labelled block per job
    #[default]
    Text,
    /// One table row per job
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BoundaryArg {
    /// Income equal to a bracket max is taxed through that whole bracket
    #[default]
    Inclusive,
    /// Income equal to a bracket max accrues nothing from that bracket (legacy)
    Strict,
}

impl From<BoundaryArg> for BoundaryMode {
    fn from(arg: BoundaryArg) -> Self {
        match arg {
            BoundaryArg::Inclusive => BoundaryMode::Inclusive,
            BoundaryArg::Strict => BoundaryMode::Strict,
        }
    }
}

impl NetIncomeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let config = config::load(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;

        let warnings = lint_brackets(&config.tax_brackets);
        for warning in &warnings {
            log::warn!("{}", warning);
        }
        if self.deny_warnings && !warnings.is_empty() {
            let messages: Vec<String> = warnings.iter().map(ToString::to_string).collect();
            anyhow::bail!(
                "{} tax bracket warning(s): {}",
                warnings.len(),
                messages.join("; ")
            );
        }

        let mode: BoundaryMode = self.bracket_boundary.into();
        let results: Vec<IncomeResult> = config
            .jobs
            .iter()
            .map(|job| net_income(job, &config.tax_brackets, mode))
            .collect::<Result<_, _>>()?;

        self.render(&results)
    }

    fn render(&self, results: &[IncomeResult]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => display::write_text(results, io::stdout().lock())?,
            OutputFormat::Table => {
                if results.is_empty() {
                    println!("No jobs found in configuration");
                } else {
                    println!("{}", display::render_table(results));
                }
            }
            OutputFormat::Json => println!("{}", display::render_json(results)?),
            OutputFormat::Csv => display::write_csv(results, io::stdout())?,
        }
        Ok(())
    }
}
