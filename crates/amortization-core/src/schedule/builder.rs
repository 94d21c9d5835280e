use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{self, DateConvention};
use crate::error::AmortizationError;
use crate::schedule::aggregate::{group_interest_by_year, AnnualInterestAggregate};
use crate::schedule::periods::compute_periods;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, Money, MoneyRounding, Rate};
use crate::AmortizationResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms of a fixed-rate, level-payment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Annual interest rate (e.g., 0.0325 = 3.25%).
    pub interest_rate: Rate,
    /// Loan term in years.
    pub years: u32,
    /// Number of payments per year.
    pub payments_per_year: u32,
    /// Amount borrowed.
    pub principal: Money,
    /// Extra principal paid every period on top of the level payment.
    #[serde(default)]
    pub additional_payment: Money,
    /// Loan start date. Defaults to the first day of next month.
    #[serde(default = "calendar::default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub date_convention: DateConvention,
    #[serde(default)]
    pub rounding: MoneyRounding,
}

impl LoanParameters {
    pub fn new(interest_rate: Rate, years: u32, payments_per_year: u32, principal: Money) -> Self {
        LoanParameters {
            interest_rate,
            years,
            payments_per_year,
            principal,
            additional_payment: Decimal::ZERO,
            start_date: calendar::default_start_date(),
            date_convention: DateConvention::default(),
            rounding: MoneyRounding::default(),
        }
    }

    pub fn with_additional_payment(mut self, additional_payment: Money) -> Self {
        self.additional_payment = additional_payment;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn with_date_convention(mut self, date_convention: DateConvention) -> Self {
        self.date_convention = date_convention;
        self
    }

    pub fn with_rounding(mut self, rounding: MoneyRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Reject terms that cannot describe an amortizing loan.
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.years == 0 {
            return Err(AmortizationError::invalid(
                "years",
                "Loan term must be at least one year",
            ));
        }
        if self.payments_per_year == 0 {
            return Err(AmortizationError::invalid(
                "payments_per_year",
                "Payments per year must be greater than zero",
            ));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "interest_rate",
                "Interest rate cannot be negative",
            ));
        }
        if self.additional_payment < Decimal::ZERO {
            return Err(AmortizationError::invalid(
                "additional_payment",
                "Additional payment cannot be negative",
            ));
        }
        if self.years.checked_mul(self.payments_per_year).is_none() {
            return Err(AmortizationError::invalid(
                "payments_per_year",
                "Total number of payments overflows",
            ));
        }
        Ok(())
    }

    /// Interest rate applied in one payment period.
    pub fn period_rate(&self) -> Rate {
        self.interest_rate / Decimal::from(self.payments_per_year)
    }

    /// Number of payments in the nominal term.
    pub fn total_periods(&self) -> u32 {
        self.years.saturating_mul(self.payments_per_year)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One row of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// 1-based period index.
    pub period: u32,
    pub payment_date: NaiveDate,
    /// Principal repaid this period, additional payment included.
    pub principal: Money,
    pub interest: Money,
    pub additional_payment: Money,
    /// principal + interest.
    pub total_payment: Money,
    pub cumulative_principal: Money,
    /// Balance outstanding after this period.
    pub balance: Money,
}

/// Ordered periods of one loan, serialized as a plain array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    periods: Vec<PeriodRecord>,
}

impl Schedule {
    pub fn periods(&self) -> &[PeriodRecord] {
        &self.periods
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PeriodRecord> {
        self.periods.iter()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn first(&self) -> Option<&PeriodRecord> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&PeriodRecord> {
        self.periods.last()
    }

    pub fn total_interest(&self) -> Money {
        self.periods.iter().map(|p| p.interest).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.periods.iter().map(|p| p.total_payment).sum()
    }

    pub fn into_periods(self) -> Vec<PeriodRecord> {
        self.periods
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PeriodRecord;
    type IntoIter = std::slice::Iter<'a, PeriodRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

/// Payoff summary derived from a completed schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub payoff_date: NaiveDate,
    pub interest_rate: Rate,
    pub years: u32,
    pub principal: Money,
    /// Level payment, excluding additional principal.
    pub payment: Money,
    pub additional_payment: Money,
    pub total_interest: Money,
    pub number_of_payments: u32,
    pub total_paid: Money,
}

impl SummaryStats {
    fn from_schedule(
        params: &LoanParameters,
        payment: Money,
        schedule: &Schedule,
    ) -> AmortizationResult<Self> {
        let last = schedule.last().ok_or_else(|| {
            AmortizationError::InsufficientData("schedule has no periods".into())
        })?;

        Ok(SummaryStats {
            payoff_date: last.payment_date,
            interest_rate: params.interest_rate,
            years: params.years,
            principal: params.principal,
            payment,
            additional_payment: params.additional_payment,
            total_interest: schedule.total_interest(),
            number_of_payments: last.period,
            total_paid: schedule.total_paid(),
        })
    }
}

/// Schedule, summary and annual interest of one loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAnalysis {
    pub summary: SummaryStats,
    pub annual_interest: AnnualInterestAggregate,
    pub schedule: Schedule,
}

/// Annual interest of one loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualInterestOutput {
    pub total_interest: Money,
    pub payoff_date: NaiveDate,
    pub annual_interest: AnnualInterestAggregate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed periodic payment, rounded to cents.
pub fn level_payment(params: &LoanParameters) -> AmortizationResult<Money> {
    params.validate()?;
    let raw = annuity_payment(params.period_rate(), params.total_periods(), params.principal)?;
    Ok(params.rounding.to_cents(raw))
}

/// Build the full amortization schedule and its summary.
pub fn build_schedule(params: &LoanParameters) -> AmortizationResult<(Schedule, SummaryStats)> {
    let payment = level_payment(params)?;
    if payment.is_zero() {
        return Err(AmortizationError::PaymentInsufficient {
            installment: params.additional_payment,
            interest: params
                .rounding
                .to_cents(params.principal.saturating_mul(params.period_rate())),
        });
    }
    let total_periods = params.total_periods();
    let first_date = params.date_convention.first_payment_date(params.start_date)?;

    let flows = compute_periods(
        params.principal,
        params.period_rate(),
        payment,
        params.additional_payment,
    )?
    .with_rounding(params.rounding)?
    .with_final_period(total_periods);

    // Extra principal can retire a loan long before its nominal term.
    let mut periods = Vec::with_capacity(total_periods.min(1 << 12) as usize);
    let mut cumulative_principal = Decimal::ZERO;

    for (offset, flow) in (0u32..).zip(flows) {
        cumulative_principal += flow.principal_paid;
        periods.push(PeriodRecord {
            period: offset + 1,
            payment_date: calendar::payment_date(first_date, offset)?,
            principal: flow.principal_paid,
            interest: flow.interest_paid,
            additional_payment: params.additional_payment,
            total_payment: flow.principal_paid + flow.interest_paid,
            cumulative_principal,
            balance: flow.remaining_balance,
        });
    }

    let schedule = Schedule { periods };
    let summary = SummaryStats::from_schedule(params, payment, &schedule)?;

    debug!(
        payment = %payment,
        periods = schedule.len(),
        total_interest = %summary.total_interest,
        "built amortization schedule"
    );

    Ok((schedule, summary))
}

/// Build a schedule and wrap it, with its summary and annual interest, in
/// the standard output envelope.
pub fn analyze_loan(params: &LoanParameters) -> AmortizationResult<ComputationOutput<LoanAnalysis>> {
    let start = Instant::now();

    let (schedule, summary) = build_schedule(params)?;
    let warnings = schedule_warnings(params, &schedule, &summary)?;
    let annual_interest = group_interest_by_year(&schedule);

    let output = LoanAnalysis {
        summary,
        annual_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortization (PMT, cent-rounded interest)",
        params,
        warnings,
        elapsed,
        output,
    ))
}

/// Interest paid per calendar year for one loan.
pub fn analyze_annual_interest(
    params: &LoanParameters,
) -> AmortizationResult<ComputationOutput<AnnualInterestOutput>> {
    let start = Instant::now();

    let (schedule, summary) = build_schedule(params)?;
    let warnings = schedule_warnings(params, &schedule, &summary)?;
    let output = AnnualInterestOutput {
        total_interest: summary.total_interest,
        payoff_date: summary.payoff_date,
        annual_interest: group_interest_by_year(&schedule),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annual interest by calendar year of payment",
        params,
        warnings,
        elapsed,
        output,
    ))
}

fn schedule_warnings(
    params: &LoanParameters,
    schedule: &Schedule,
    summary: &SummaryStats,
) -> AmortizationResult<Vec<String>> {
    let mut warnings = Vec::new();

    let first_date = params.date_convention.first_payment_date(params.start_date)?;
    if first_date != params.start_date {
        warnings.push(format!(
            "Start date {} rolled forward to month start {}",
            params.start_date, first_date
        ));
    }

    let total_periods = params.total_periods();
    if let Some(last) = schedule.last() {
        let regular = summary.payment + params.additional_payment;
        if last.period == total_periods && last.total_payment > regular {
            warnings.push(format!(
                "Final payment in period {} raised by {} to retire the rounding residual",
                last.period,
                last.total_payment - regular
            ));
        }
        if summary.number_of_payments < total_periods && params.additional_payment > Decimal::ZERO {
            warnings.push(format!(
                "Additional payments retire the loan {} periods early",
                total_periods - summary.number_of_payments
            ));
        }
    }

    Ok(warnings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
