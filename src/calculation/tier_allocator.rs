//! Tiered hour allocation.
//!
//! This module contains the stateful per-employee allocator that assigns
//! worked hours to the Regular, Overtime and Doubletime tiers with cascading
//! overflow, and accumulates wage and benefit totals.
//!
//! Hours fill Regular up to its cap (40), then Overtime up to its cap (8);
//! everything beyond goes to Doubletime. A single punch that crosses one or
//! more caps is split across the tiers it touches, and each portion is paid
//! at its own tier multiplier. Benefits accrue on every hour regardless of
//! tier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, PayrollError};
use crate::models::JobRate;

/// Regular hours cap before overtime applies.
pub const REGULAR_HOURS_CAP: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Overtime hours cap before doubletime applies.
pub const OVERTIME_HOURS_CAP: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Wage multiplier for regular hours (1.0).
pub const REGULAR_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 1);

/// Wage multiplier for overtime hours (1.5).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Wage multiplier for doubletime hours (2.0).
pub const DOUBLETIME_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// Caps and multipliers for the three pay tiers.
///
/// The default policy is 40 regular hours at 1.0, 8 overtime hours at 1.5
/// and unbounded doubletime at 2.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierPolicy {
    /// Hours paid at the regular multiplier before overtime starts.
    pub regular_cap: Decimal,
    /// Hours paid at the overtime multiplier before doubletime starts.
    pub overtime_cap: Decimal,
    /// Multiplier applied to the hourly rate for regular hours.
    pub regular_multiplier: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Multiplier applied to the hourly rate for doubletime hours.
    pub doubletime_multiplier: Decimal,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            regular_cap: REGULAR_HOURS_CAP,
            overtime_cap: OVERTIME_HOURS_CAP,
            regular_multiplier: REGULAR_MULTIPLIER,
            overtime_multiplier: OVERTIME_MULTIPLIER,
            doubletime_multiplier: DOUBLETIME_MULTIPLIER,
        }
    }
}

/// Accumulated hours and totals for one employee.
///
/// `regular` stays within `[0, regular_cap]` and `overtime` within
/// `[0, overtime_cap]`. Every field is monotonically non-decreasing across a
/// payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorState {
    /// Hours accrued in the regular tier.
    pub regular: Decimal,
    /// Hours accrued in the overtime tier.
    pub overtime: Decimal,
    /// Hours accrued in the doubletime tier.
    pub doubletime: Decimal,
    /// Wages across all tiers.
    pub wage_total: Decimal,
    /// Benefits across all hours.
    pub benefit_total: Decimal,
}

/// What a single call to [`TierAllocator::apply`] contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAllocation {
    /// Hours that landed in the regular tier.
    pub regular_hours: Decimal,
    /// Hours that landed in the overtime tier.
    pub overtime_hours: Decimal,
    /// Hours that landed in the doubletime tier.
    pub doubletime_hours: Decimal,
    /// Wages earned, summed per tier portion.
    pub wage: Decimal,
    /// Benefits earned.
    pub benefit: Decimal,
}

/// The per-employee cascading tier allocator.
///
/// Create one allocator per employee and feed it that employee's validated
/// punches in input order.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::{TierAllocator, TierPolicy};
/// use punch_payroll::models::JobRate;
/// use rust_decimal::Decimal;
///
/// let rate = JobRate::new("A", Decimal::TEN, Decimal::ONE);
/// let mut allocator = TierAllocator::new(TierPolicy::default());
///
/// // One 50 hour punch: 40 regular, 8 overtime, 2 doubletime.
/// allocator.apply(Decimal::new(50, 0), &rate).unwrap();
///
/// let state = allocator.state();
/// assert_eq!(state.regular, Decimal::new(40, 0));
/// assert_eq!(state.overtime, Decimal::new(8, 0));
/// assert_eq!(state.doubletime, Decimal::new(2, 0));
/// assert_eq!(state.wage_total, Decimal::new(560, 0));
/// assert_eq!(state.benefit_total, Decimal::new(50, 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TierAllocator {
    policy: TierPolicy,
    state: AllocatorState,
}

impl TierAllocator {
    /// Creates an allocator with empty totals.
    pub fn new(policy: TierPolicy) -> Self {
        Self {
            policy,
            state: AllocatorState::default(),
        }
    }

    /// Allocates one punch's worth of hours at the given job's rates.
    ///
    /// `hours` must be non-negative; negative punches are rejected by
    /// [`punch_duration`](super::punch_duration) before they get here.
    ///
    /// All three tier checks run on every call, so hours that overflow a tier
    /// are carried into the next tier within the same call.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::ArithmeticOverflow`] if a wage or benefit
    /// amount does not fit in a [`Decimal`]. The accumulated totals are left
    /// unchanged in that case.
    pub fn apply(&mut self, hours: Decimal, rate: &JobRate) -> EngineResult<TierAllocation> {
        debug_assert!(hours >= Decimal::ZERO, "negative hours reached the allocator");

        let policy = &self.policy;
        let mut state = self.state.clone();
        let mut allocation = TierAllocation::default();
        let mut remaining = hours;
        let overflow = |quantity: &'static str| PayrollError::ArithmeticOverflow {
            job_id: rate.job_id.clone(),
            quantity,
        };

        allocation.benefit = rate
            .benefits_rate
            .checked_mul(hours)
            .ok_or_else(|| overflow("benefit"))?;
        state.benefit_total = state
            .benefit_total
            .checked_add(allocation.benefit)
            .ok_or_else(|| overflow("benefit total"))?;

        if state.regular < policy.regular_cap && remaining > Decimal::ZERO {
            let taken = fill_tier(&mut state.regular, policy.regular_cap, &mut remaining);
            let wage = tier_wage(taken, policy.regular_multiplier, rate)
                .ok_or_else(|| overflow("regular wage"))?;
            allocation.regular_hours = taken;
            allocation.wage = wage;
        }

        if state.regular == policy.regular_cap
            && state.overtime < policy.overtime_cap
            && remaining > Decimal::ZERO
        {
            let taken = fill_tier(&mut state.overtime, policy.overtime_cap, &mut remaining);
            let wage = tier_wage(taken, policy.overtime_multiplier, rate)
                .and_then(|wage| allocation.wage.checked_add(wage))
                .ok_or_else(|| overflow("overtime wage"))?;
            allocation.overtime_hours = taken;
            allocation.wage = wage;
        }

        if state.regular == policy.regular_cap
            && state.overtime == policy.overtime_cap
            && remaining > Decimal::ZERO
        {
            let wage = tier_wage(remaining, policy.doubletime_multiplier, rate)
                .and_then(|wage| allocation.wage.checked_add(wage))
                .ok_or_else(|| overflow("doubletime wage"))?;
            state.doubletime = state
                .doubletime
                .checked_add(remaining)
                .ok_or_else(|| overflow("doubletime hours"))?;
            allocation.doubletime_hours = remaining;
            allocation.wage = wage;
        }

        state.wage_total = state
            .wage_total
            .checked_add(allocation.wage)
            .ok_or_else(|| overflow("wage total"))?;

        self.state = state;
        Ok(allocation)
    }

    /// Returns the totals accumulated so far.
    pub fn state(&self) -> &AllocatorState {
        &self.state
    }

    /// Returns the policy this allocator was built with.
    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Consumes the allocator, returning its final totals.
    pub fn finish(self) -> AllocatorState {
        self.state
    }
}

/// `hours * multiplier * hourly_rate`, or `None` on overflow.
fn tier_wage(hours: Decimal, multiplier: Decimal, rate: &JobRate) -> Option<Decimal> {
    hours.checked_mul(multiplier)?.checked_mul(rate.hourly_rate)
}

/// Moves as many `remaining` hours as fit into a capped tier.
///
/// A tier that fills is set to exactly `cap` rather than summed up to it, so
/// the equality checks that gate the next tier always hold once it is full.
/// Returns the hours taken.
fn fill_tier(accrued: &mut Decimal, cap: Decimal, remaining: &mut Decimal) -> Decimal {
    let room = cap - *accrued;
    if *remaining >= room {
        *accrued = cap;
        *remaining -= room;
        room
    } else {
        let taken = *remaining;
        *accrued += taken;
        *remaining = Decimal::ZERO;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn job(rate: &str, benefits: &str) -> JobRate {
        JobRate::new("A", dec(rate), dec(benefits))
    }

    fn allocator() -> TierAllocator {
        TierAllocator::new(TierPolicy::default())
    }

    // ==========================================================================
    // Single punches
    // ==========================================================================

    #[test]
    fn test_regular_only_punch() {
        let mut allocator = allocator();
        let allocation = allocator.apply(dec("8"), &job("10", "1")).unwrap();

        assert_eq!(allocation.regular_hours, dec("8"));
        assert_eq!(allocation.overtime_hours, Decimal::ZERO);
        assert_eq!(allocation.wage, dec("80"));
        assert_eq!(allocation.benefit, dec("8"));
        assert_eq!(allocator.state().regular, dec("8"));
    }

    #[test]
    fn test_single_punch_cascades_through_every_tier() {
        let mut allocator = allocator();
        let allocation = allocator.apply(dec("50"), &job("10", "1")).unwrap();

        assert_eq!(allocation.regular_hours, dec("40"));
        assert_eq!(allocation.overtime_hours, dec("8"));
        assert_eq!(allocation.doubletime_hours, dec("2"));
        // 40 * 1.0 * 10 + 8 * 1.5 * 10 + 2 * 2.0 * 10
        assert_eq!(allocation.wage, dec("560"));

        let state = allocator.finish();
        assert_eq!(state.regular, dec("40"));
        assert_eq!(state.overtime, dec("8"));
        assert_eq!(state.doubletime, dec("2"));
        assert_eq!(state.wage_total, dec("560"));
        assert_eq!(state.benefit_total, dec("50"));
    }

    #[test]
    fn test_punch_exactly_filling_regular_does_not_spill() {
        let mut allocator = allocator();
        let allocation = allocator.apply(dec("40"), &job("10", "0")).unwrap();

        assert_eq!(allocation.regular_hours, dec("40"));
        assert_eq!(allocation.overtime_hours, Decimal::ZERO);
        assert_eq!(allocator.state().overtime, Decimal::ZERO);
    }

    #[test]
    fn test_zero_hour_punch_changes_nothing() {
        let mut allocator = allocator();
        let allocation = allocator.apply(Decimal::ZERO, &job("10", "1")).unwrap();

        assert_eq!(allocation, TierAllocation::default());
        assert_eq!(allocator.state(), &AllocatorState::default());
    }

    // ==========================================================================
    // Cascades across punches
    // ==========================================================================

    #[test]
    fn test_two_regular_punches() {
        let mut allocator = allocator();
        allocator.apply(dec("8"), &job("10", "1")).unwrap();
        allocator.apply(dec("6"), &job("10", "1")).unwrap();

        let state = allocator.finish();
        assert_eq!(state.regular, dec("14"));
        assert_eq!(state.overtime, Decimal::ZERO);
        assert_eq!(state.wage_total, dec("140"));
        assert_eq!(state.benefit_total, dec("14"));
    }

    #[test]
    fn test_second_punch_crosses_into_overtime() {
        let mut allocator = allocator();
        allocator.apply(dec("38"), &job("10", "0")).unwrap();
        let allocation = allocator.apply(dec("5"), &job("10", "0")).unwrap();

        assert_eq!(allocation.regular_hours, dec("2"));
        assert_eq!(allocation.overtime_hours, dec("3"));
        assert_eq!(allocation.wage, dec("65"));

        let state = allocator.state();
        assert_eq!(state.regular, dec("40"));
        assert_eq!(state.overtime, dec("3"));
    }

    #[test]
    fn test_punch_starting_in_overtime_crosses_into_doubletime() {
        let mut allocator = allocator();
        allocator.apply(dec("46"), &job("10", "0")).unwrap();
        let allocation = allocator.apply(dec("5"), &job("10", "0")).unwrap();

        assert_eq!(allocation.regular_hours, Decimal::ZERO);
        assert_eq!(allocation.overtime_hours, dec("2"));
        assert_eq!(allocation.doubletime_hours, dec("3"));
        assert_eq!(allocation.wage, dec("90"));
        assert_eq!(allocator.state().doubletime, dec("3"));
    }

    #[test]
    fn test_doubletime_accumulates_without_cap() {
        let mut allocator = allocator();
        allocator.apply(dec("48"), &job("10", "0")).unwrap();
        allocator.apply(dec("12"), &job("10", "0")).unwrap();
        allocator.apply(dec("12"), &job("10", "0")).unwrap();

        let state = allocator.finish();
        assert_eq!(state.regular, dec("40"));
        assert_eq!(state.overtime, dec("8"));
        assert_eq!(state.doubletime, dec("24"));
    }

    #[test]
    fn test_tier_portions_use_each_punch_job_rate() {
        let mut allocator = allocator();
        allocator.apply(dec("39"), &job("10", "0")).unwrap();
        // 1 regular hour at 20, 2 overtime hours at 20 * 1.5.
        let allocation = allocator.apply(dec("3"), &job("20", "0")).unwrap();

        assert_eq!(allocation.wage, dec("80"));
        assert_eq!(allocator.state().wage_total, dec("470"));
    }

    #[test]
    fn test_benefits_ignore_tiers() {
        let mut allocator = allocator();
        allocator.apply(dec("45"), &job("10", "2")).unwrap();
        let allocation = allocator.apply(dec("10"), &job("10", "0.5")).unwrap();

        assert_eq!(allocation.benefit, dec("5"));
        assert_eq!(allocator.state().benefit_total, dec("95"));
    }

    #[test]
    fn test_thirds_of_an_hour_still_reach_caps_exactly() {
        let third = Decimal::ONE / dec("3");
        let mut allocator = allocator();
        for _ in 0..200 {
            allocator.apply(third, &job("1", "0")).unwrap();
        }

        let state = allocator.state();
        assert_eq!(state.regular, REGULAR_HOURS_CAP);
        assert_eq!(state.overtime, OVERTIME_HOURS_CAP);
        assert!(state.doubletime > dec("18"));
    }

    #[test]
    fn test_overflowing_wage_is_an_error() {
        let huge = job("1000000000000000000000000000", "0");
        let mut allocator = allocator();
        allocator.apply(dec("8"), &job("10", "1")).unwrap();

        let err = allocator.apply(dec("336"), &huge).unwrap_err();

        assert!(matches!(
            err,
            PayrollError::ArithmeticOverflow {
                quantity: "doubletime wage",
                ..
            }
        ));
        // Totals from earlier punches are untouched by the failed call.
        assert_eq!(allocator.state().regular, dec("8"));
        assert_eq!(allocator.state().wage_total, dec("80"));
        assert_eq!(allocator.state().benefit_total, dec("8"));
    }

    #[test]
    fn test_overflowing_benefit_is_an_error() {
        let mut allocator = allocator();
        let err = allocator
            .apply(dec("336"), &job("1", "1000000000000000000000000000"))
            .unwrap_err();

        assert!(matches!(
            err,
            PayrollError::ArithmeticOverflow {
                quantity: "benefit",
                ..
            }
        ));
        assert_eq!(allocator.state(), &AllocatorState::default());
    }

    // ==========================================================================
    // Policy
    // ==========================================================================

    #[test]
    fn test_default_policy_constants() {
        let policy = TierPolicy::default();
        assert_eq!(policy.regular_cap, dec("40"));
        assert_eq!(policy.overtime_cap, dec("8"));
        assert_eq!(policy.regular_multiplier, dec("1.0"));
        assert_eq!(policy.overtime_multiplier, dec("1.5"));
        assert_eq!(policy.doubletime_multiplier, dec("2.0"));
    }

    #[test]
    fn test_custom_policy_caps() {
        let policy = TierPolicy {
            regular_cap: dec("38"),
            overtime_cap: dec("2"),
            ..TierPolicy::default()
        };
        let mut allocator = TierAllocator::new(policy);
        allocator.apply(dec("45"), &job("10", "0")).unwrap();

        let state = allocator.finish();
        assert_eq!(state.regular, dec("38"));
        assert_eq!(state.overtime, dec("2"));
        assert_eq!(state.doubletime, dec("5"));
        assert_eq!(state.wage_total, dec("510"));
    }

    #[test]
    fn test_partial_policy_deserializes_with_defaults() {
        let policy: TierPolicy = serde_json::from_str(r#"{"regular_cap": "38"}"#).unwrap();
        assert_eq!(policy.regular_cap, dec("38"));
        assert_eq!(policy.overtime_cap, OVERTIME_HOURS_CAP);
    }
}
