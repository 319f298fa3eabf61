//! Run configuration, loaded from a TOML file.
//!
//! ```toml
//! input = "EXPORTAR.XLS"
//! default_goal = 18000.00
//! month_style = "abbreviated"
//!
//! [[salespeople]]
//! key = "Fulano"
//! name = "Fulano da Silva"
//! goal = 20000.00
//! ```

use std::{collections::HashSet, fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{error::Error, goal::Goal, period::MonthStyle};

pub const DEFAULT_CONFIG_PATH: &str = "ranking.toml";

fn default_input() -> String {
    "EXPORTAR.XLS".to_string()
}

fn default_goal() -> Decimal {
    Decimal::from(18000)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_input")]
    pub input: String,
    #[serde(default = "default_goal")]
    pub default_goal: Decimal,
    #[serde(default)]
    pub month_style: MonthStyle,
    #[serde(default)]
    pub salespeople: Vec<SalespersonConfig>,
    #[serde(default)]
    pub columns: Columns,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalespersonConfig {
    pub key: String,
    pub name: String,
    pub goal: Option<Decimal>,
}

/// Header names of the export columns.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Columns {
    pub salesperson: String,
    pub customer: String,
    pub final_value: String,
    pub plan: String,
    pub registration_date: String,
    pub activation_date: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            salesperson: "vendedor".to_string(),
            customer: "nome_cliente".to_string(),
            final_value: "valor_final".to_string(),
            plan: "nome_do_plano".to_string(),
            registration_date: "data_lancamento".to_string(),
            activation_date: "data_primeira_ativacao".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub logo: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
            logo: None,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        toml::from_str(text).map_err(|e| Error::InvalidConfiguration(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfiguration(format!("cannot read `{}`: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)?;
        info!(
            path = %path.display(),
            salespeople = config.salespeople.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Validate the salespeople section into a roster.
    pub fn roster(&self) -> Result<Roster, Error> {
        let default_goal = Goal::new(self.default_goal)?;
        if self.salespeople.is_empty() {
            return Err(Error::InvalidConfiguration(
                "no salespeople configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.salespeople.len());
        for person in &self.salespeople {
            if !seen.insert(person.key.as_str()) {
                return Err(Error::InvalidConfiguration(format!(
                    "salesperson key `{}` is duplicated",
                    person.key
                )));
            }
            let goal = match person.goal {
                Some(amount) => Goal::new(amount).map_err(|_| {
                    Error::InvalidConfiguration(format!(
                        "goal of salesperson `{}` must be greater than zero, got {}",
                        person.key, amount
                    ))
                })?,
                None => default_goal,
            };
            entries.push(RosterEntry {
                key: person.key.clone(),
                display_name: person.name.clone(),
                goal,
            });
        }

        Ok(Roster::new(entries))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub key: String,
    /// Name as written in the export's salesperson column.
    pub display_name: String,
    pub goal: Goal,
}

/// Salespeople to rank, in configuration order. Salespeople configured
/// without a goal already carry the default one.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Roster { entries }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }
}
