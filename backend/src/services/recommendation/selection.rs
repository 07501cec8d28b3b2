//! Choosing which plan days to train

use super::random::{shuffle, RandomSource};
use fitcoach_shared::PlanDay;
use std::cmp::Reverse;

/// Below this many training days the busiest days are preferred
pub const FULL_BODY_THRESHOLD: usize = 3;

/// Pick `days_per_week` days from a plan.
///
/// The days are shuffled first. Short weeks (fewer than three days) then
/// keep the days touching the most distinct muscle groups, ties in shuffled
/// order; longer weeks take a prefix of the shuffle. Never returns more
/// days than the plan has.
pub fn select_days<'a>(days: &'a [PlanDay], days_per_week: usize, rng: &mut dyn RandomSource) -> Vec<&'a PlanDay> {
    let mut order: Vec<&PlanDay> = days.iter().collect();
    shuffle(&mut order, rng);

    if days_per_week < FULL_BODY_THRESHOLD {
        // sort_by_key is stable, so equal counts keep their shuffled order
        order.sort_by_key(|day| Reverse(day.distinct_muscle_groups()));
    }

    order.truncate(days_per_week);
    order
}
