use serde::{Deserialize, Serialize};

use crate::model::intensity::Period;
use crate::model::{Mode, Model};

pub const NATIONAL_NAME: &str = "UK";
pub const LOCAL_NAME: &str = "Local";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub mode: Mode,
    pub national_name: String,
    pub national_intensity: Vec<IntensityPoint>,
    pub national_mix: Vec<GenerationMixPoint>,
    pub local_name: String,
    pub local_intensity: Vec<IntensityPoint>,
    pub local_mix: Vec<GenerationMixPoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntensityPoint {
    /// Start of the period, RFC 3339.
    pub date: String,
    pub forecast: i32,
    pub actual: Option<i32>,
}

/// One fuel's share of one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationMixPoint {
    pub date: String,
    pub hh_mm: String,
    pub fuel: String,
    pub perc: f32,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let local_name = model
            .location
            .as_ref()
            .map(|location| format!("{}, {}", location.admin_district, location.outcode))
            .unwrap_or_else(|| LOCAL_NAME.to_string());

        ViewModel {
            mode: model.mode,
            national_name: NATIONAL_NAME.to_string(),
            national_intensity: intensity_points(&model.national.intensity),
            national_mix: mix_points(&model.national.mix),
            local_name,
            local_intensity: intensity_points(&model.local.intensity),
            local_mix: mix_points(&model.local.mix),
        }
    }
}

fn intensity_points(periods: &[Period]) -> Vec<IntensityPoint> {
    periods
        .iter()
        .filter_map(|period| {
            let intensity = period.intensity.as_ref()?;
            Some(IntensityPoint {
                date: period.from.to_rfc3339(),
                forecast: intensity.forecast,
                actual: intensity.actual,
            })
        })
        .collect()
}

fn mix_points(periods: &[Period]) -> Vec<GenerationMixPoint> {
    periods
        .iter()
        .flat_map(|period| {
            let date = period.from.to_rfc3339();
            let hh_mm = period.from.format("%H:%M").to_string();
            period
                .generation_mix
                .iter()
                .flatten()
                .map(move |mix| GenerationMixPoint {
                    date: date.clone(),
                    hh_mm: hh_mm.clone(),
                    fuel: mix.fuel.clone(),
                    perc: mix.percentage,
                })
        })
        .collect()
}
