use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::builder::Schedule;
use crate::types::Money;

/// Interest paid within one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualInterest {
    pub year: i32,
    pub interest: Money,
}

/// Interest grouped by calendar year, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnualInterestAggregate {
    years: Vec<AnnualInterest>,
}

impl AnnualInterestAggregate {
    pub fn years(&self) -> &[AnnualInterest] {
        &self.years
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnnualInterest> {
        self.years.iter()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn get(&self, year: i32) -> Option<Money> {
        self.years
            .binary_search_by_key(&year, |entry| entry.year)
            .ok()
            .map(|idx| self.years[idx].interest)
    }

    pub fn total(&self) -> Money {
        self.years.iter().map(|entry| entry.interest).sum()
    }
}

/// Sum the schedule's interest by the calendar year of each payment date.
pub fn group_interest_by_year(schedule: &Schedule) -> AnnualInterestAggregate {
    let mut by_year: BTreeMap<i32, Money> = BTreeMap::new();
    for record in schedule {
        *by_year
            .entry(record.payment_date.year())
            .or_insert(Decimal::ZERO) += record.interest;
    }

    AnnualInterestAggregate {
        years: by_year
            .into_iter()
            .map(|(year, interest)| AnnualInterest { year, interest })
            .collect(),
    }
}
