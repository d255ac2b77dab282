//! Configuration loading - jobs and the shared tax bracket schedule

use crate::core::{IncomeItem, IncomeItemError, IncomeItemInput, Job, PretaxExpense, TaxBracket};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration not found: {}", path.display())]
    ConfigurationNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),
    #[error("job '{job}': cannot calculate taxable income amount from {item}")]
    UnrecognizedIncomeKind { job: String, item: String },
}

/// Input root for configuration files
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigInput {
    pub jobs: Vec<JobInput>,
    pub tax_brackets: Vec<TaxBracket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    pub name: String,
    pub taxable_income: Vec<IncomeItemInput>,
    pub pretax_expense: Vec<PretaxExpense>,
}

/// Jobs with classified income entries, ready for calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub jobs: Vec<Job>,
    pub tax_brackets: Vec<TaxBracket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.toml` and `.yaml`/`.yml` by extension, anything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Resolve a relative path against the current working directory
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Read and classify a configuration file
pub fn load(path: &Path) -> Result<Configuration, ConfigError> {
    let resolved = resolve_path(path).map_err(|source| ConfigError::ConfigurationNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let contents =
        fs::read_to_string(&resolved).map_err(|source| ConfigError::ConfigurationNotFound {
            path: resolved.clone(),
            source,
        })?;

    log::info!("Loading configuration from {}", resolved.display());
    parse(&contents, ConfigFormat::from_path(&resolved))
}

pub fn parse(contents: &str, format: ConfigFormat) -> Result<Configuration, ConfigError> {
    let input: ConfigInput = match format {
        ConfigFormat::Json => serde_json::from_str(contents)
            .map_err(|e| ConfigError::MalformedConfiguration(e.to_string()))?,
        ConfigFormat::Toml => {
            toml::from_str(contents).map_err(|e| ConfigError::MalformedConfiguration(e.to_string()))?
        }
        ConfigFormat::Yaml => serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::MalformedConfiguration(e.to_string()))?,
    };
    Configuration::try_from(input)
}

impl TryFrom<ConfigInput> for Configuration {
    type Error = ConfigError;

    fn try_from(input: ConfigInput) -> Result<Self, Self::Error> {
        let jobs = input
            .jobs
            .into_iter()
            .map(Job::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Read {} jobs and {} tax brackets",
            jobs.len(),
            input.tax_brackets.len()
        );

        Ok(Configuration {
            jobs,
            tax_brackets: input.tax_brackets,
        })
    }
}

impl TryFrom<JobInput> for Job {
    type Error = ConfigError;

    fn try_from(input: JobInput) -> Result<Self, Self::Error> {
        let taxable_income = input
            .taxable_income
            .into_iter()
            .map(|item| {
                IncomeItem::try_from(item).map_err(|e| match e {
                    IncomeItemError::UnrecognizedKind(item) => ConfigError::UnrecognizedIncomeKind {
                        job: input.name.clone(),
                        item,
                    },
                    other => ConfigError::MalformedConfiguration(format!(
                        "job '{}': {}",
                        input.name, other
                    )),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Job {
            name: input.name,
            taxable_income,
            pretax_expense: input.pretax_expense,
        })
    }
}
