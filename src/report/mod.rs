//! Rendering of a [`Ranking`](crate::ranking::Ranking) into text and HTML.

use std::{fs, path::Path, path::PathBuf};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::{config::ReportConfig, error::Error, ranking::Ranking};

pub mod html;
pub mod text;

/// Number formatting shared by the renderers.
#[derive(Debug, Clone)]
pub struct Style {
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub logo: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Style::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for Style {
    fn from(config: &ReportConfig) -> Self {
        Style {
            currency_symbol: config.currency_symbol.clone(),
            decimal_separator: config.decimal_separator,
            logo: config.logo.clone(),
        }
    }
}

impl Style {
    /// Round half away from zero to `dp` places, using the configured separator.
    pub fn number(&self, value: Decimal, dp: u32) -> String {
        let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.*}", dp as usize, rounded);
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// `R$ 1234,50`
    pub fn money(&self, value: Decimal) -> String {
        format!("{} {}", self.currency_symbol, self.number(value, 2))
    }

    /// `R$ 18.0k`
    pub fn thousands(&self, value: Decimal, dp: u32) -> String {
        format!(
            "{} {}k",
            self.currency_symbol,
            self.number(value / Decimal::ONE_THOUSAND, dp)
        )
    }
}

/// File names for the rendered ranking, e.g. `ranking_Jul_25.txt`.
pub fn output_paths(dir: &Path, ranking: &Ranking) -> (PathBuf, PathBuf) {
    let stem = format!(
        "ranking_{}_{}",
        ranking.period.month(),
        ranking.period.year()
    );
    (
        dir.join(format!("{}.txt", stem)),
        dir.join(format!("{}.html", stem)),
    )
}

/// Write the text and HTML renderings of `ranking` to `dir`.
pub fn write_reports(
    dir: &Path,
    ranking: &Ranking,
    style: &Style,
) -> Result<(PathBuf, PathBuf), Error> {
    let (text_path, html_path) = output_paths(dir, ranking);
    fs::create_dir_all(dir)?;
    fs::write(&text_path, text::ranking(ranking, style))?;
    fs::write(&html_path, html::ranking(ranking, style))?;
    info!(
        text = %text_path.display(),
        html = %html_path.display(),
        "reports written"
    );
    Ok((text_path, html_path))
}
