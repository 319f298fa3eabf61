//! Matching of export dates against the target period.
//!
//! The export writes dates as three `-` separated segments (`15-07-25` or
//! `15-Jul-25`). A date that was never filled in shows up as blank segments,
//! e.g. `"  -   -  "`.

use crate::transaction::SaleRecord;

/// Text that is neither a set nor an unset date.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedDate(pub String);

/// A well-formed `DD-MM-YY` date, kept as its textual segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateText<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

impl<'a> DateText<'a> {
    /// Strict parse.
    ///
    /// `Ok(None)` means the date is unset (empty, or any segment blank).
    /// Anything that is not three `-` separated segments is an error.
    pub fn parse(text: &'a str) -> Result<Option<Self>, MalformedDate> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let segments: Vec<&str> = text.split('-').collect();
        let &[day, month, year] = segments.as_slice() else {
            return Err(MalformedDate(text.to_string()));
        };
        if [day, month, year].iter().any(|s| s.trim().is_empty()) {
            return Ok(None);
        }
        Ok(Some(DateText { day, month, year }))
    }

    pub fn is_in(&self, month: &str, year: &str) -> bool {
        self.month == month && self.year == year
    }
}

/// True when the date is set and its month and year segments equal the
/// targets exactly. No numeric normalization: `"7"` does not match `"07"`.
pub fn belongs_to_period(date_text: &str, month: &str, year: &str) -> bool {
    match DateText::parse(date_text) {
        Ok(Some(date)) => date.is_in(month, year),
        _ => false,
    }
}

/// True when the date is empty or carries the blank-segment sentinel.
pub fn is_unset(date_text: &str) -> bool {
    matches!(DateText::parse(date_text), Ok(None))
}

/// A sale counts as registered for the period when it was registered in the
/// period, or when it has not been activated yet.
pub fn is_registration_relevant(record: &SaleRecord, month: &str, year: &str) -> bool {
    belongs_to_period(&record.registration_date, month, year) || is_unset(&record.activation_date)
}

#[cfg(test)]
mod tests {
    mod matching {
        use crate::date::belongs_to_period;

        macro_rules! test_belongs_to_period {
            ($($name:ident: $date:literal in $month:literal / $year:literal => $expected:literal,)*) => {
            $(
                paste::paste! {
                #[test]
                fn [<period_ $name>]() {
                    assert_eq!(belongs_to_period($date, $month, $year), $expected);
                }
            }
            )*
            }
        }

        test_belongs_to_period! {
            numeric_match: "15-07-25" in "07" / "25" => true,
            abbreviated_match: "15-Jul-25" in "Jul" / "25" => true,
            other_month: "15-08-25" in "07" / "25" => false,
            other_year: "15-07-24" in "07" / "25" => false,
            no_normalization: "15-7-25" in "07" / "25" => false,
            blank_month_sentinel: "15-   -25" in "07" / "25" => false,
            fully_blank_sentinel: "  -   -  " in "07" / "25" => false,
            empty: "" in "07" / "25" => false,
            malformed: "2025/07/15" in "07" / "25" => false,
            too_many_segments: "15-07-25-1" in "07" / "25" => false,
        }
    }

    mod strict_parsing {
        use crate::date::{is_unset, DateText, MalformedDate};

        #[test]
        fn well_formed() {
            assert_eq!(
                DateText::parse("05-Jul-25"),
                Ok(Some(DateText {
                    day: "05",
                    month: "Jul",
                    year: "25"
                }))
            );
        }

        #[test]
        fn unset_dates() {
            assert_eq!(DateText::parse(""), Ok(None));
            assert_eq!(DateText::parse("  -   -  "), Ok(None));
            assert!(is_unset("15-   -25"));
            assert!(!is_unset("15-07-25"));
        }

        #[test]
        fn malformed_dates_fail_loudly() {
            assert_eq!(
                DateText::parse("15/07/25"),
                Err(MalformedDate("15/07/25".to_string()))
            );
            assert!(!is_unset("15/07/25"));
        }
    }

    mod registration {
        use crate::date::is_registration_relevant;
        use crate::transaction::SaleRecord;

        fn record(registration: &str, activation: &str) -> SaleRecord {
            SaleRecord {
                registration_date: registration.to_string(),
                activation_date: activation.to_string(),
                ..SaleRecord::default()
            }
        }

        #[test]
        fn registered_in_period() {
            assert!(is_registration_relevant(
                &record("02-07-25", "20-08-25"),
                "07",
                "25"
            ));
        }

        #[test]
        fn pending_activation_from_another_period() {
            assert!(is_registration_relevant(
                &record("02-03-25", "  -   -  "),
                "07",
                "25"
            ));
            assert!(is_registration_relevant(&record("02-03-25", ""), "07", "25"));
        }

        #[test]
        fn activated_and_registered_elsewhere() {
            assert!(!is_registration_relevant(
                &record("02-03-25", "10-04-25"),
                "07",
                "25"
            ));
        }
    }
}
