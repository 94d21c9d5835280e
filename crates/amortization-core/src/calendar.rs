//! Payment-date generation.
//!
//! Payments fall one calendar month apart. Dates are derived from a single
//! anchor (`anchor + k months`) rather than chained month by month, so a
//! schedule anchored on the 31st returns to the 31st after a short month.

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::AmortizationResult;

/// How the first payment date is derived from the loan's start date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateConvention {
    /// Payments on the first of each month. A start date that is not the
    /// first of a month rolls forward to the next month start.
    #[default]
    MonthStart,
    /// Payments on the start date's day of month, clamped to month end.
    AnchorDay,
}

impl DateConvention {
    /// Date of the first payment for a loan starting on `start`.
    pub fn first_payment_date(self, start: NaiveDate) -> AmortizationResult<NaiveDate> {
        match self {
            DateConvention::MonthStart if start.day() == 1 => Ok(start),
            DateConvention::MonthStart => first_of_next_month(start),
            DateConvention::AnchorDay => Ok(start),
        }
    }
}

/// First day of the month following `date`.
pub fn first_of_next_month(date: NaiveDate) -> AmortizationResult<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .and_then(|d| d.checked_add_months(Months::new(1)))
        .ok_or_else(|| AmortizationError::DateError(format!("no month start after {date}")))
}

/// Payment date of the period `offset` months after the first payment.
pub fn payment_date(first: NaiveDate, offset: u32) -> AmortizationResult<NaiveDate> {
    first
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| {
            AmortizationError::DateError(format!("{first} + {offset} months is out of range"))
        })
}

/// Default start date: the first day of next month, local time.
pub fn default_start_date() -> NaiveDate {
    let today = Local::now().date_naive();
    // Only fails at the very end of chrono's calendar.
    first_of_next_month(today).unwrap_or(today)
}
