//! Per-salesperson sales ranking against monthly monetary goals.
//!
//! Records come from a spreadsheet export ([`source`]), are aggregated per
//! configured salesperson for a target [`period::Period`] ([`ranking`]) and
//! rendered as text or HTML ([`report`]).

pub mod config;
pub mod date;
pub mod error;
pub mod goal;
pub mod period;
pub mod ranking;
pub mod report;
pub mod source;
pub mod transaction;
