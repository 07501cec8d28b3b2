//! Body composition trend analysis
//!
//! Compares the most recent measurement against the average of a short
//! window of weekly measurements and reports, per dimension, whether the
//! user is moving in the right direction. A dimension is only assessed
//! when the user's current tier makes that dimension worth watching.

use crate::classification::{BodyFatTier, LeanMassTier};
use crate::models::BodyMeasurementSnapshot;
use serde::{Deserialize, Serialize};

/// Maximum number of weekly measurements considered
pub const TREND_WINDOW: usize = 4;

/// Fewer snapshots than this leave both signals `Unknown`
pub const MIN_TREND_SNAPSHOTS: usize = 3;

/// Direction of one body-composition dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    /// Not enough data, or the dimension was not evaluated for this tier
    #[default]
    Unknown,
    Improving,
    NotImproving,
}

impl TrendSignal {
    fn from_improving(improving: bool) -> Self {
        if improving {
            TrendSignal::Improving
        } else {
            TrendSignal::NotImproving
        }
    }

    #[inline]
    pub fn is_not_improving(&self) -> bool {
        matches!(self, TrendSignal::NotImproving)
    }

    #[inline]
    pub fn is_improving(&self) -> bool {
        matches!(self, TrendSignal::Improving)
    }
}

/// Trend signals fed into the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSignals {
    pub fat_decreasing: TrendSignal,
    pub lean_mass_increasing: TrendSignal,
}

impl TrendSignals {
    /// Fat is coming down while lean mass is not building: likely overtraining.
    pub fn overtraining_suspected(&self) -> bool {
        self.fat_decreasing.is_improving() && self.lean_mass_increasing.is_not_improving()
    }
}

fn fat_is_tracked(tier: BodyFatTier) -> bool {
    matches!(
        tier,
        BodyFatTier::Average | BodyFatTier::BelowAverage | BodyFatTier::Poor
    )
}

fn lean_mass_is_tracked(tier: LeanMassTier) -> bool {
    matches!(
        tier,
        LeanMassTier::Skinny | LeanMassTier::Average | LeanMassTier::IntermediateBuilt
    )
}

/// Derive trend signals from recent measurements.
///
/// `window` is ordered most recent first; only the first [`TREND_WINDOW`]
/// entries are used. Each dimension compares the window mean against the
/// most recent sample:
///
/// * fat is improving when `mean(body_fat_percent) - recent < 0`
/// * lean mass is improving when `mean(muscle_mass) - recent > 0`
///
/// The lean-mass comparison keeps the polarity the coaching rules were
/// written with, even though it reads as the inverse of "increasing".
/// A zero difference is `NotImproving` for both.
pub fn analyze_trend(
    window: &[BodyMeasurementSnapshot],
    body_fat_tier: BodyFatTier,
    lean_mass_tier: LeanMassTier,
) -> TrendSignals {
    let window = &window[..window.len().min(TREND_WINDOW)];
    if window.len() < MIN_TREND_SNAPSHOTS {
        return TrendSignals::default();
    }

    let fat_decreasing = if fat_is_tracked(body_fat_tier) {
        TrendSignal::from_improving(mean_minus_recent(window, |m| m.body_fat_percent) < 0.0)
    } else {
        TrendSignal::Unknown
    };

    let lean_mass_increasing = if lean_mass_is_tracked(lean_mass_tier) {
        TrendSignal::from_improving(mean_minus_recent(window, |m| m.muscle_mass) > 0.0)
    } else {
        TrendSignal::Unknown
    };

    TrendSignals {
        fat_decreasing,
        lean_mass_increasing,
    }
}

fn mean_minus_recent(window: &[BodyMeasurementSnapshot], value: impl Fn(&BodyMeasurementSnapshot) -> f64) -> f64 {
    let mean = window.iter().map(&value).sum::<f64>() / window.len() as f64;
    mean - value(&window[0])
}
