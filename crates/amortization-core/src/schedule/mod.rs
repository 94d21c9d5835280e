pub mod aggregate;
pub mod builder;
pub mod periods;

pub use aggregate::{group_interest_by_year, AnnualInterest, AnnualInterestAggregate};
pub use builder::{
    analyze_annual_interest, analyze_loan, build_schedule, level_payment, AnnualInterestOutput,
    LoanAnalysis, LoanParameters, PeriodRecord, Schedule, SummaryStats,
};
pub use periods::{compute_periods, AmortizationPeriods, PeriodFlow};
