use std::fmt;

use serde::Deserialize;

use crate::error::Error;

const MONTHS: [(&str, &str); 12] = [
    ("Jan", "January"),
    ("Feb", "February"),
    ("Mar", "March"),
    ("Apr", "April"),
    ("May", "May"),
    ("Jun", "June"),
    ("Jul", "July"),
    ("Aug", "August"),
    ("Sep", "September"),
    ("Oct", "October"),
    ("Nov", "November"),
    ("Dec", "December"),
];

/// How the export writes the month segment of its dates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStyle {
    /// `15-07-25`
    Numeric,
    /// `15-Jul-25`
    Abbreviated,
}

impl Default for MonthStyle {
    fn default() -> Self {
        MonthStyle::Abbreviated
    }
}

/// Target month and year, as the segment tokens the export uses.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    number: u32,
    month: String,
    year: String,
}

impl Period {
    /// Build a period from a month number (1-12) and a `YY` or `YYYY` year.
    pub fn new(month: u32, year: &str, style: MonthStyle) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidConfiguration(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        let year = year.trim();
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidConfiguration(format!(
                "year `{}` is not a number",
                year
            )));
        }
        let year = match year.len() {
            2 => year.to_string(),
            4 => year[2..].to_string(),
            _ => {
                return Err(Error::InvalidConfiguration(format!(
                    "year `{}` must be given as YY or YYYY",
                    year
                )))
            }
        };
        let token = match style {
            MonthStyle::Numeric => format!("{:02}", month),
            MonthStyle::Abbreviated => MONTHS[month as usize - 1].0.to_string(),
        };
        Ok(Period {
            number: month,
            month: token,
            year,
        })
    }

    /// Month segment as it appears in the export, e.g. `07` or `Jul`.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Two-digit year segment, e.g. `25`.
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn month_name(&self) -> &'static str {
        MONTHS[self.number as usize - 1].1
    }

    pub fn full_year(&self) -> String {
        format!("20{}", self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.full_year())
    }
}
