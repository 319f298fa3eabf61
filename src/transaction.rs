use std::str::FromStr;

use rust_decimal::Decimal;

/// One row of the sales export.
///
/// Dates are kept as the export writes them (`DD-MM-YY` or `DD-Mon-YY`);
/// the final value is kept as raw text and only parsed when summed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleRecord {
    pub salesperson: String,
    pub customer: String,
    pub final_value: String,
    pub plan: String,
    pub registration_date: String,
    pub activation_date: String,
}

impl SaleRecord {
    /// Monetary value of the sale, `None` when the cell is blank or not a number.
    pub fn parsed_value(&self) -> Option<Decimal> {
        let raw = self.final_value.trim();
        if raw.is_empty() {
            return None;
        }
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .ok()
    }

    /// Monetary value of the sale; unparsable values count as zero.
    pub fn value(&self) -> Decimal {
        self.parsed_value().unwrap_or_default()
    }
}
