//! Loading of the sales export.
//!
//! Spreadsheets (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`) are read with
//! calamine from their first worksheet; anything with a `.csv` extension goes
//! through the csv reader. In both cases the first row holds the headers.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{info, warn};

use crate::{
    config::Columns,
    date::{DateText, MalformedDate},
    error::Error,
    transaction::SaleRecord,
};

struct ColumnIndices {
    salesperson: usize,
    customer: usize,
    final_value: usize,
    plan: usize,
    registration_date: usize,
    activation_date: usize,
}

impl ColumnIndices {
    fn locate<S: AsRef<str>>(headers: &[S], columns: &Columns) -> Result<Self, Error> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(ColumnIndices {
            salesperson: find(&columns.salesperson)?,
            customer: find(&columns.customer)?,
            final_value: find(&columns.final_value)?,
            plan: find(&columns.plan)?,
            registration_date: find(&columns.registration_date)?,
            activation_date: find(&columns.activation_date)?,
        })
    }

    fn record<F>(&self, cell: F) -> SaleRecord
    where
        F: Fn(usize) -> String,
    {
        SaleRecord {
            salesperson: cell(self.salesperson),
            customer: cell(self.customer),
            final_value: cell(self.final_value),
            plan: cell(self.plan),
            registration_date: cell(self.registration_date),
            activation_date: cell(self.activation_date),
        }
    }
}

fn unavailable(path: &Path, reason: impl ToString) -> Error {
    Error::DataSourceUnavailable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Read every record of the export at `path`.
///
/// A missing, unreadable or empty export is fatal; individual cell contents
/// are never rejected here.
pub fn load_records<P: AsRef<Path>>(path: P, columns: &Columns) -> Result<Vec<SaleRecord>, Error> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(unavailable(path, "file not found"));
    }
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));

    let records = if is_csv {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .map_err(|e| unavailable(path, e))?;
        read_csv(rdr, columns).map_err(|e| match e {
            Error::Io(reason) => unavailable(path, reason),
            other => other,
        })?
    } else {
        read_workbook(path, columns)?
    };

    if records.is_empty() {
        return Err(unavailable(path, "no records found"));
    }
    check_dates(&records);
    info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Read records from CSV data whose first row holds the headers.
pub fn read_csv<R>(mut rdr: csv::Reader<R>, columns: &Columns) -> Result<Vec<SaleRecord>, Error>
where
    R: std::io::Read,
{
    let headers = rdr.headers().map_err(|e| Error::Io(e.to_string()))?.clone();
    let headers: Vec<&str> = headers.iter().collect();
    let indices = ColumnIndices::locate(&headers, columns)?;

    rdr.records()
        .map(|row| -> Result<SaleRecord, Error> {
            let row = row.map_err(|e| Error::Io(e.to_string()))?;
            Ok(indices.record(|i| row.get(i).unwrap_or_default().to_string()))
        })
        .collect()
}

fn read_workbook(path: &Path, columns: &Columns) -> Result<Vec<SaleRecord>, Error> {
    let mut workbook = open_workbook_auto(path).map_err(|e| unavailable(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| unavailable(path, "workbook has no worksheet"))?
        .map_err(|e| unavailable(path, e))?;

    let mut rows = range.rows();
    let Some(headers) = rows.next() else {
        return Err(unavailable(path, "worksheet is empty"));
    };
    let headers: Vec<String> = headers.iter().map(cell_text).collect();
    let indices = ColumnIndices::locate(&headers, columns)?;

    Ok(rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| indices.record(|i| row.get(i).map(cell_text).unwrap_or_default()))
        .collect())
}

/// Strictly parse every date and report the malformed ones.
///
/// Malformed dates never match a period, so they are only logged.
pub fn malformed_dates(records: &[SaleRecord]) -> Vec<Error> {
    records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| {
            [&record.registration_date, &record.activation_date]
                .into_iter()
                .filter_map(move |date| match DateText::parse(date) {
                    Err(MalformedDate(value)) => Some(Error::MalformedDate {
                        record: index,
                        value,
                    }),
                    Ok(_) => None,
                })
        })
        .collect()
}

fn check_dates(records: &[SaleRecord]) {
    for error in malformed_dates(records) {
        warn!("{}", error);
    }
}
