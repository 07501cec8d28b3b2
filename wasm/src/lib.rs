//! FitCoach WASM Module
//!
//! WebAssembly bindings over the shared body composition calculators, so
//! the browser can preview results before a measurement is saved.

use fitcoach_shared::classification::{
    body_fat_chart as chart_for, classify_body_fat, classify_lean_mass, lean_mass_index as index_for,
    lean_muscle_mass as lean_mass_for, skinfold_body_fat as skinfold_for,
};
use fitcoach_shared::Gender;
use wasm_bindgen::prelude::*;

fn gender(is_male: bool) -> Gender {
    if is_male {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Lean-mass index from height (cm), weight (kg) and body fat (%)
#[wasm_bindgen]
pub fn lean_mass_index(height_cm: f64, weight_kg: f64, body_fat_percent: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    index_for(height_cm, weight_kg, body_fat_percent)
}

/// Fat-free mass in kg
#[wasm_bindgen]
pub fn lean_muscle_mass(weight_kg: f64, body_fat_percent: f64) -> f64 {
    lean_mass_for(weight_kg, body_fat_percent)
}

/// Three-site skinfold body fat estimate (%)
#[wasm_bindgen]
pub fn skinfold_body_fat(age_years: i32, is_male: bool, chest_mm: f64, abdomen_mm: f64, thigh_mm: f64) -> f64 {
    skinfold_for(age_years, gender(is_male), chest_mm, abdomen_mm, thigh_mm)
}

/// Body-fat tier label, e.g. "Fit"
#[wasm_bindgen]
pub fn body_fat_label(body_fat_percent: f64, age_years: i32, is_male: bool) -> String {
    classify_body_fat(body_fat_percent, age_years, gender(is_male))
        .label()
        .to_string()
}

/// Lean-mass tier label, e.g. "Intermediate Built"
#[wasm_bindgen]
pub fn lean_mass_label(lean_mass_index: f64, is_male: bool) -> String {
    classify_lean_mass(lean_mass_index, gender(is_male)).label().to_string()
}

/// Body-fat chart for the age group and gender, as JSON
#[wasm_bindgen]
pub fn body_fat_chart(age_years: i32, is_male: bool) -> String {
    serde_json::to_string(&chart_for(age_years, gender(is_male))).unwrap_or_default()
}
