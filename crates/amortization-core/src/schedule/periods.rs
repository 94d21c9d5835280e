//! Lazy period-by-period amortization.
//!
//! Each step accrues cent-rounded interest on the outstanding balance and
//! applies the rest of the installment to principal. The iterator stops
//! once the balance reaches zero.

use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::types::{Money, MoneyRounding, Rate};
use crate::AmortizationResult;

/// Flows of a single period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFlow {
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub remaining_balance: Money,
}

/// Iterator over the periods of a level-payment loan.
///
/// Finite for any installment that exceeds the first period's interest,
/// which [`compute_periods`] checks before handing one out.
#[derive(Debug, Clone)]
pub struct AmortizationPeriods {
    balance: Money,
    period_rate: Rate,
    installment: Money,
    rounding: MoneyRounding,
    final_period: Option<u32>,
    elapsed: u32,
}

/// Start iterating the periods of a loan.
///
/// `payment` is the fixed periodic payment and `additional_payment` the
/// extra principal paid on top of it every period.
pub fn compute_periods(
    principal: Money,
    period_rate: Rate,
    payment: Money,
    additional_payment: Money,
) -> AmortizationResult<AmortizationPeriods> {
    if principal <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if period_rate < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "period_rate",
            "Period rate cannot be negative",
        ));
    }
    if payment <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "payment",
            "Payment must be positive",
        ));
    }
    if additional_payment < Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "additional_payment",
            "Additional payment cannot be negative",
        ));
    }

    let periods = AmortizationPeriods {
        balance: principal,
        period_rate,
        installment: payment.checked_add(additional_payment).ok_or_else(|| {
            AmortizationError::FinancialImpossibility(format!(
                "installment {payment} + {additional_payment} overflows"
            ))
        })?,
        rounding: MoneyRounding::default(),
        final_period: None,
        elapsed: 0,
    };
    periods.ensure_progress()?;
    Ok(periods)
}

impl AmortizationPeriods {
    /// Use a different midpoint rule for the interest accrual.
    pub fn with_rounding(mut self, rounding: MoneyRounding) -> AmortizationResult<Self> {
        self.rounding = rounding;
        self.ensure_progress()?;
        Ok(self)
    }

    /// Retire whatever balance remains in period `period`.
    ///
    /// A payment rounded down to cents leaves a small residual after the
    /// nominal term; this folds it into the last scheduled payment.
    pub fn with_final_period(mut self, period: u32) -> Self {
        self.final_period = Some(period);
        self
    }

    /// Balance still outstanding before the next period.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Periods yielded so far.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Payment plus additional principal.
    pub fn installment(&self) -> Money {
        self.installment
    }

    fn accrued_interest(&self) -> Option<Money> {
        self.balance
            .checked_mul(self.period_rate)
            .map(|interest| self.rounding.to_cents(interest))
    }

    // Interest only falls as the balance falls, so an installment that beats
    // the first period's interest keeps reducing the balance every period.
    fn ensure_progress(&self) -> AmortizationResult<()> {
        let interest = self.accrued_interest().ok_or_else(|| {
            AmortizationError::FinancialImpossibility(format!(
                "interest on {} at {} per period overflows",
                self.balance, self.period_rate
            ))
        })?;
        if self.installment <= interest {
            return Err(AmortizationError::PaymentInsufficient {
                installment: self.installment,
                interest,
            });
        }
        Ok(())
    }
}

impl Iterator for AmortizationPeriods {
    type Item = PeriodFlow;

    fn next(&mut self) -> Option<PeriodFlow> {
        if self.balance <= Decimal::ZERO {
            return None;
        }
        self.elapsed += 1;

        // The balance only falls, so this cannot overflow once the first
        // period's accrual has been checked.
        let interest = self.accrued_interest()?;
        let principal_paid = if self.final_period == Some(self.elapsed) {
            self.balance
        } else {
            self.balance.min(self.installment - interest)
        };
        self.balance -= principal_paid;

        Some(PeriodFlow {
            principal_paid,
            interest_paid: interest,
            remaining_balance: self.balance,
        })
    }
}

impl FusedIterator for AmortizationPeriods {}
