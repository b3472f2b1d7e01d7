use crate::models::Period;
use crate::utils::parse_int;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// `?month=&year=` on the dashboard, exports and JSON report.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl PeriodParams {
    /// Absent values default to `today`'s month and year; present values are
    /// coerced and passed through unchecked.
    pub fn resolve(&self, today: NaiveDate) -> Period {
        let month = match self.month.as_deref() {
            Some(raw) => parse_int(Some(raw)),
            None => today.month() as i32,
        };
        let year = match self.year.as_deref() {
            Some(raw) => parse_int(Some(raw)),
            None => today.year(),
        };
        Period::new(month, year)
    }
}
