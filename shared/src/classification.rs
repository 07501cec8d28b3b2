//! Body composition classification
//!
//! Turns raw measurements into the qualitative tiers the recommendation
//! engine reasons about: a body-fat tier per age group and gender, and a
//! lean-mass tier derived from the height-normalised lean-mass index.
//!
//! Every function here is pure. Inputs outside the charts (negative values,
//! NaN, gaps between bands) classify as `OutOfRange` instead of failing.

use crate::models::Gender;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// Age
// ============================================================================

/// Whole years elapsed between `date_of_birth` and `today`
pub fn age_from_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Age band of the body-fat chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-29")]
    Under30,
    #[serde(rename = "30-39")]
    Thirties,
    #[serde(rename = "40-49")]
    Forties,
    #[serde(rename = "50-59")]
    Fifties,
    #[serde(rename = "60+")]
    SixtyPlus,
}

impl AgeGroup {
    /// Ages of 17 and under share the 18-29 band.
    pub fn for_age(age: i32) -> Self {
        match age {
            i32::MIN..=29 => AgeGroup::Under30,
            30..=39 => AgeGroup::Thirties,
            40..=49 => AgeGroup::Forties,
            50..=59 => AgeGroup::Fifties,
            _ => AgeGroup::SixtyPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Under30 => "18-29",
            AgeGroup::Thirties => "30-39",
            AgeGroup::Forties => "40-49",
            AgeGroup::Fifties => "50-59",
            AgeGroup::SixtyPlus => "60+",
        }
    }
}

// ============================================================================
// Body Fat
// ============================================================================

/// Body-fat classification tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyFatTier {
    #[serde(rename = "Essential Fat")]
    EssentialFat,
    #[serde(rename = "Athletes")]
    Athletes,
    #[serde(rename = "Fit")]
    Fit,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Out of classification range")]
    OutOfRange,
}

impl BodyFatTier {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatTier::EssentialFat => "Essential Fat",
            BodyFatTier::Athletes => "Athletes",
            BodyFatTier::Fit => "Fit",
            BodyFatTier::Average => "Average",
            BodyFatTier::BelowAverage => "Below Average",
            BodyFatTier::Poor => "Poor",
            BodyFatTier::OutOfRange => "Out of classification range",
        }
    }
}

/// Inclusive percentage band; `max` is infinite for the open-ended top tier
#[derive(Debug, Clone, Copy)]
struct Band {
    tier: BodyFatTier,
    min: f64,
    max: f64,
}

impl Band {
    const fn new(tier: BodyFatTier, min: f64, max: f64) -> Self {
        Self { tier, min, max }
    }

    #[inline]
    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

use BodyFatTier::{Athletes, Average as Avg, BelowAverage, EssentialFat, Fit, Poor};

const OPEN: f64 = f64::INFINITY;

const MALE_18_29: [Band; 6] = [
    Band::new(EssentialFat, 2.0, 5.0),
    Band::new(Athletes, 5.1, 9.3),
    Band::new(Fit, 9.4, 14.0),
    Band::new(Avg, 14.1, 17.5),
    Band::new(BelowAverage, 17.6, 22.5),
    Band::new(Poor, 22.6, OPEN),
];
const FEMALE_18_29: [Band; 6] = [
    Band::new(EssentialFat, 10.0, 13.0),
    Band::new(Athletes, 13.1, 17.0),
    Band::new(Fit, 17.1, 20.5),
    Band::new(Avg, 20.6, 23.6),
    Band::new(BelowAverage, 23.7, 27.6),
    Band::new(Poor, 27.7, OPEN),
];
const MALE_30_39: [Band; 6] = [
    Band::new(EssentialFat, 2.0, 5.0),
    Band::new(Athletes, 5.1, 13.8),
    Band::new(Fit, 13.9, 17.4),
    Band::new(Avg, 17.5, 20.4),
    Band::new(BelowAverage, 20.5, 24.1),
    Band::new(Poor, 24.2, OPEN),
];
const FEMALE_30_39: [Band; 6] = [
    Band::new(EssentialFat, 10.0, 13.0),
    Band::new(Athletes, 13.1, 17.9),
    Band::new(Fit, 18.0, 21.5),
    Band::new(Avg, 21.6, 24.8),
    Band::new(BelowAverage, 24.9, 29.2),
    Band::new(Poor, 29.3, OPEN),
];
const MALE_40_49: [Band; 6] = [
    Band::new(EssentialFat, 2.0, 5.0),
    Band::new(Athletes, 5.1, 16.2),
    Band::new(Fit, 16.3, 19.5),
    Band::new(Avg, 19.6, 22.4),
    Band::new(BelowAverage, 22.5, 26.0),
    Band::new(Poor, 26.1, OPEN),
];
const FEMALE_40_49: [Band; 6] = [
    Band::new(EssentialFat, 10.0, 13.0),
    Band::new(Athletes, 13.1, 21.2),
    Band::new(Fit, 21.3, 24.8),
    Band::new(Avg, 24.9, 28.0),
    Band::new(BelowAverage, 28.1, 32.0),
    Band::new(Poor, 32.1, OPEN),
];
const MALE_50_59: [Band; 6] = [
    Band::new(EssentialFat, 2.0, 5.0),
    Band::new(Athletes, 5.1, 17.8),
    Band::new(Fit, 17.9, 21.2),
    Band::new(Avg, 21.3, 24.0),
    Band::new(BelowAverage, 24.1, 27.4),
    Band::new(Poor, 27.5, OPEN),
];
const FEMALE_50_59: [Band; 6] = [
    Band::new(EssentialFat, 10.0, 13.0),
    Band::new(Athletes, 13.1, 24.9),
    Band::new(Fit, 25.0, 28.4),
    Band::new(Avg, 28.5, 31.5),
    Band::new(BelowAverage, 31.6, 35.5),
    Band::new(Poor, 35.6, OPEN),
];
const MALE_60_PLUS: [Band; 6] = [
    Band::new(EssentialFat, 2.0, 5.0),
    Band::new(Athletes, 5.1, 18.3),
    Band::new(Fit, 18.4, 21.9),
    Band::new(Avg, 22.0, 25.0),
    Band::new(BelowAverage, 25.1, 28.4),
    Band::new(Poor, 28.5, OPEN),
];
const FEMALE_60_PLUS: [Band; 6] = [
    Band::new(EssentialFat, 10.0, 13.0),
    Band::new(Athletes, 13.1, 25.0),
    Band::new(Fit, 25.1, 29.2),
    Band::new(Avg, 29.3, 32.4),
    Band::new(BelowAverage, 32.5, 36.5),
    Band::new(Poor, 36.6, OPEN),
];

fn body_fat_bands(group: AgeGroup, gender: Gender) -> &'static [Band; 6] {
    match (group, gender) {
        (AgeGroup::Under30, Gender::Male) => &MALE_18_29,
        (AgeGroup::Under30, Gender::Female) => &FEMALE_18_29,
        (AgeGroup::Thirties, Gender::Male) => &MALE_30_39,
        (AgeGroup::Thirties, Gender::Female) => &FEMALE_30_39,
        (AgeGroup::Forties, Gender::Male) => &MALE_40_49,
        (AgeGroup::Forties, Gender::Female) => &FEMALE_40_49,
        (AgeGroup::Fifties, Gender::Male) => &MALE_50_59,
        (AgeGroup::Fifties, Gender::Female) => &FEMALE_50_59,
        (AgeGroup::SixtyPlus, Gender::Male) => &MALE_60_PLUS,
        (AgeGroup::SixtyPlus, Gender::Female) => &FEMALE_60_PLUS,
    }
}

/// Classify a body-fat percentage for the given age and gender.
///
/// The first band containing the value (inclusive on both ends) wins.
/// Values below the essential-fat floor, inside the 0.1 gaps between
/// bands, or NaN yield [`BodyFatTier::OutOfRange`].
pub fn classify_body_fat(body_fat_percent: f64, age: i32, gender: Gender) -> BodyFatTier {
    body_fat_bands(AgeGroup::for_age(age), gender)
        .iter()
        .find(|band| band.contains(body_fat_percent))
        .map(|band| band.tier)
        .unwrap_or(BodyFatTier::OutOfRange)
}

/// One row of the displayable body-fat chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyFatChartRow {
    pub classification: BodyFatTier,
    pub min: f64,
    /// `None` for the open-ended top tier
    pub max: Option<f64>,
    /// "14.1 - 17.5%" or ">22.6%"
    pub display: String,
}

/// Body-fat chart applicable to one age group and gender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyFatChart {
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub rows: Vec<BodyFatChartRow>,
}

/// Chart used to classify someone of this age and gender
pub fn body_fat_chart(age: i32, gender: Gender) -> BodyFatChart {
    let group = AgeGroup::for_age(age);
    let rows = body_fat_bands(group, gender)
        .iter()
        .map(|band| {
            let (max, display) = if band.max.is_infinite() {
                (None, format!(">{}%", band.min))
            } else {
                (Some(band.max), format!("{} - {}%", band.min, band.max))
            };
            BodyFatChartRow {
                classification: band.tier,
                min: band.min,
                max,
                display,
            }
        })
        .collect();

    BodyFatChart {
        age_group: group,
        gender,
        rows,
    }
}

/// Jackson-Pollock three-site skinfold estimate (sum of chest, abdomen and
/// thigh folds in mm), converted with the Siri equation and rounded to
/// one decimal place.
pub fn skinfold_body_fat(age: i32, gender: Gender, chest_mm: f64, abdomen_mm: f64, thigh_mm: f64) -> f64 {
    let sum = chest_mm + abdomen_mm + thigh_mm;
    let age = f64::from(age);
    let density = match gender {
        Gender::Male => 1.10938 - 0.0008267 * sum + 0.0000016 * sum * sum - 0.0002574 * age,
        Gender::Female => 1.0994921 - 0.0009929 * sum + 0.0000023 * sum * sum - 0.0001392 * age,
    };
    round_one_decimal(495.0 / density - 450.0)
}

// ============================================================================
// Lean Mass
// ============================================================================

/// Fat-free body mass in kg, rounded to one decimal place
pub fn lean_muscle_mass(weight_kg: f64, body_fat_percent: f64) -> f64 {
    round_one_decimal(weight_kg * (1.0 - body_fat_percent / 100.0))
}

/// Height-normalised lean-mass index, rounded to one decimal place:
/// `lean / h^2 + 6.3 * (1.8 - h)` with lean mass in kg and height in metres.
pub fn lean_mass_index(height_cm: f64, weight_kg: f64, body_fat_percent: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let lean = weight_kg * (1.0 - body_fat_percent / 100.0);
    round_one_decimal(lean / (height_m * height_m) + 6.3 * (1.8 - height_m))
}

/// Lean-mass classification tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeanMassTier {
    #[serde(rename = "Skinny")]
    Skinny,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Intermediate Built")]
    IntermediateBuilt,
    #[serde(rename = "Advanced Built")]
    AdvancedBuilt,
    #[serde(rename = "Extremely Muscular")]
    ExtremelyMuscular,
    #[serde(rename = "Out of classification range")]
    OutOfRange,
}

impl LeanMassTier {
    pub fn label(&self) -> &'static str {
        match self {
            LeanMassTier::Skinny => "Skinny",
            LeanMassTier::Average => "Average",
            LeanMassTier::IntermediateBuilt => "Intermediate Built",
            LeanMassTier::AdvancedBuilt => "Advanced Built",
            LeanMassTier::ExtremelyMuscular => "Extremely Muscular",
            LeanMassTier::OutOfRange => "Out of classification range",
        }
    }
}

/// (tier, min, max) with inclusive bounds on one-decimal index values
const MALE_LEAN_MASS: [(LeanMassTier, f64, f64); 5] = [
    (LeanMassTier::Skinny, 0.0, 17.9),
    (LeanMassTier::Average, 18.0, 19.9),
    (LeanMassTier::IntermediateBuilt, 20.0, 21.9),
    (LeanMassTier::AdvancedBuilt, 22.0, 24.9),
    (LeanMassTier::ExtremelyMuscular, 25.0, OPEN),
];
const FEMALE_LEAN_MASS: [(LeanMassTier, f64, f64); 5] = [
    (LeanMassTier::Skinny, 0.0, 14.9),
    (LeanMassTier::Average, 15.0, 16.9),
    (LeanMassTier::IntermediateBuilt, 17.0, 18.9),
    (LeanMassTier::AdvancedBuilt, 19.0, 21.9),
    (LeanMassTier::ExtremelyMuscular, 22.0, OPEN),
];

/// Classify a lean-mass index (as produced by [`lean_mass_index`]).
pub fn classify_lean_mass(index: f64, gender: Gender) -> LeanMassTier {
    let table = match gender {
        Gender::Male => &MALE_LEAN_MASS,
        Gender::Female => &FEMALE_LEAN_MASS,
    };
    table
        .iter()
        .find(|(_, min, max)| index >= *min && index <= *max)
        .map(|(tier, _, _)| *tier)
        .unwrap_or(LeanMassTier::OutOfRange)
}

#[inline]
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // Age Tests
    // =========================================================================

    #[test]
    fn test_age_counts_whole_years() {
        assert_eq!(age_from_birth_date(date(1990, 6, 15), date(2024, 6, 14)), 33);
        assert_eq!(age_from_birth_date(date(1990, 6, 15), date(2024, 6, 15)), 34);
        assert_eq!(age_from_birth_date(date(1990, 6, 15), date(2024, 12, 1)), 34);
    }

    #[rstest]
    #[case(12, AgeGroup::Under30)]
    #[case(29, AgeGroup::Under30)]
    #[case(30, AgeGroup::Thirties)]
    #[case(49, AgeGroup::Forties)]
    #[case(55, AgeGroup::Fifties)]
    #[case(60, AgeGroup::SixtyPlus)]
    #[case(91, AgeGroup::SixtyPlus)]
    fn test_age_group_bands(#[case] age: i32, #[case] expected: AgeGroup) {
        assert_eq!(AgeGroup::for_age(age), expected);
    }

    // =========================================================================
    // Body Fat Tests
    // =========================================================================

    #[rstest]
    #[case(25, Gender::Male, 15.0, BodyFatTier::Average)]
    #[case(45, Gender::Female, 30.0, BodyFatTier::BelowAverage)]
    #[case(55, Gender::Male, 22.0, BodyFatTier::Average)]
    #[case(35, Gender::Male, 24.2, BodyFatTier::Poor)]
    #[case(62, Gender::Female, 10.0, BodyFatTier::EssentialFat)]
    #[case(25, Gender::Male, 5.0, BodyFatTier::EssentialFat)]
    #[case(25, Gender::Male, 5.1, BodyFatTier::Athletes)]
    fn test_classify_body_fat(
        #[case] age: i32,
        #[case] gender: Gender,
        #[case] body_fat: f64,
        #[case] expected: BodyFatTier,
    ) {
        assert_eq!(classify_body_fat(body_fat, age, gender), expected);
    }

    #[test]
    fn test_body_fat_out_of_range() {
        assert_eq!(classify_body_fat(1.0, 25, Gender::Male), BodyFatTier::OutOfRange);
        assert_eq!(classify_body_fat(9.0, 25, Gender::Female), BodyFatTier::OutOfRange);
        assert_eq!(classify_body_fat(5.05, 25, Gender::Male), BodyFatTier::OutOfRange);
        assert_eq!(classify_body_fat(f64::NAN, 25, Gender::Male), BodyFatTier::OutOfRange);
    }

    #[test]
    fn test_body_fat_top_tier_is_open_ended() {
        assert_eq!(classify_body_fat(70.0, 40, Gender::Male), BodyFatTier::Poor);
    }

    #[test]
    fn test_chart_display_strings() {
        let chart = body_fat_chart(25, Gender::Male);
        assert_eq!(chart.age_group, AgeGroup::Under30);
        assert_eq!(chart.rows.len(), 6);
        assert_eq!(chart.rows[0].display, "2 - 5%");
        assert_eq!(chart.rows[3].display, "14.1 - 17.5%");
        assert_eq!(chart.rows[5].display, ">22.6%");
        assert_eq!(chart.rows[5].max, None);
    }

    #[test]
    fn test_tier_serializes_as_label() {
        let json = serde_json::to_string(&BodyFatTier::BelowAverage).unwrap();
        assert_eq!(json, "\"Below Average\"");
    }

    #[test]
    fn test_skinfold_estimate() {
        // 30 year old male, folds summing to 60mm: density ~1.0578
        let bf = skinfold_body_fat(30, Gender::Male, 20.0, 25.0, 15.0);
        assert!((bf - 17.9).abs() < 0.15, "got {bf}");
        let bf_f = skinfold_body_fat(30, Gender::Female, 20.0, 25.0, 15.0);
        assert!(bf_f > 20.0 && bf_f < 30.0, "got {bf_f}");
    }

    // =========================================================================
    // Lean Mass Tests
    // =========================================================================

    #[test]
    fn test_lean_mass_index_reference_value() {
        // 180cm, 80kg, 15% -> lean 68kg -> 68 / 3.24 = 20.99
        assert_eq!(lean_mass_index(180.0, 80.0, 15.0), 21.0);
        assert_eq!(lean_muscle_mass(80.0, 15.0), 68.0);
    }

    #[rstest]
    #[case(16.5, Gender::Male, LeanMassTier::Skinny)]
    #[case(19.0, Gender::Male, LeanMassTier::Average)]
    #[case(21.0, Gender::Male, LeanMassTier::IntermediateBuilt)]
    #[case(23.4, Gender::Male, LeanMassTier::AdvancedBuilt)]
    #[case(26.0, Gender::Male, LeanMassTier::ExtremelyMuscular)]
    #[case(14.0, Gender::Female, LeanMassTier::Skinny)]
    #[case(17.5, Gender::Female, LeanMassTier::IntermediateBuilt)]
    #[case(-1.0, Gender::Female, LeanMassTier::OutOfRange)]
    fn test_classify_lean_mass(#[case] index: f64, #[case] gender: Gender, #[case] expected: LeanMassTier) {
        assert_eq!(classify_lean_mass(index, gender), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: anyone 17 or younger is charted like an 18-29 year old
        #[test]
        fn prop_minors_use_youngest_band(age in 0i32..=17, bf in 0.0f64..60.0, female in any::<bool>()) {
            let gender = if female { Gender::Female } else { Gender::Male };
            prop_assert_eq!(classify_body_fat(bf, age, gender), classify_body_fat(bf, 25, gender));
        }

        /// Property: more body fat never raises the lean-mass index
        #[test]
        fn prop_lean_mass_index_non_increasing_in_body_fat(
            height in 150.0f64..200.0,
            weight in 45.0f64..140.0,
            bf_low in 3.0f64..40.0,
            delta in 0.0f64..20.0,
        ) {
            let lower = lean_mass_index(height, weight, bf_low);
            let higher = lean_mass_index(height, weight, bf_low + delta);
            prop_assert!(higher <= lower);
        }

        /// Property: the top band has no upper bound
        #[test]
        fn prop_poor_band_is_open_ended(bf in 40.0f64..100.0, age in 18i32..90) {
            prop_assert_eq!(classify_body_fat(bf, age, Gender::Male), BodyFatTier::Poor);
        }
    }
}
