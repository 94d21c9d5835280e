use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Growth factor (1 + rate)^nper using exact integer powers.
pub fn compound_factor(rate: Rate, nper: u32) -> AmortizationResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            AmortizationError::FinancialImpossibility(format!(
                "compound factor (1 + {rate})^{nper} overflows"
            ))
        })
}

/// Payment (PMT), spreadsheet sign convention: a positive present value
/// (money received) yields a negative payment.
pub fn pmt(
    rate: Rate,
    nper: u32,
    present_value: Money,
    future_value: Money,
) -> AmortizationResult<Money> {
    if nper == 0 {
        return Err(AmortizationError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    let overflow = || {
        AmortizationError::FinancialImpossibility(format!(
            "PMT of {present_value} over {nper} periods at {rate} overflows"
        ))
    };

    if rate.is_zero() {
        let total = present_value
            .checked_add(future_value)
            .ok_or_else(overflow)?;
        return Ok(-total / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = (factor - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(overflow)?;

    if annuity_factor.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let future_total = present_value
        .checked_mul(factor)
        .and_then(|grown| grown.checked_add(future_value))
        .ok_or_else(overflow)?;
    let payment = future_total
        .checked_div(annuity_factor)
        .ok_or_else(overflow)?;
    Ok(-payment)
}

/// Level payment that fully amortizes `principal` over `nper` periods,
/// seen from the borrower's side (positive), before rounding.
pub fn annuity_payment(period_rate: Rate, nper: u32, principal: Money) -> AmortizationResult<Money> {
    Ok(-pmt(period_rate, nper, principal, Decimal::ZERO)?)
}
