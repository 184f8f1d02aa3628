//! Snow-depth query construction and response reshaping.
//!
//! Turns a year into a Frost [`Filter`] for one station and element,
//! and reduces the returned records to [`SnowDepth`] points.

use chrono::{DateTime, Utc};
use snowdepth_frost::{DataEnvelope, Filter, JsonDisplay};
use tracing::warn;

/// Default station: Tromsø (`SN90450`).
pub const DEFAULT_STATION: &str = "SN90450";

/// Default element: snow thickness on the ground.
pub const DEFAULT_ELEMENT: &str = "surface_snow_thickness";

/// Which station and element the snow endpoint queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowSettings {
    /// Frost source id.
    pub station: String,
    /// Frost element id.
    pub element: String,
}

impl Default for SnowSettings {
    fn default() -> Self {
        Self {
            station: DEFAULT_STATION.to_owned(),
            element: DEFAULT_ELEMENT.to_owned(),
        }
    }
}

/// One snow-depth point as served to clients.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnowDepth {
    /// Observed thickness, in the upstream unit (cm).
    #[serde(rename = "Thickness")]
    pub thickness: f64,
    /// Reference time of the observation.
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
}

/// Filter covering January 1 through December 30 of `year`.
pub fn snow_filter(settings: &SnowSettings, year: i32) -> Filter {
    Filter::default()
        .sources([settings.station.as_str()])
        .reference_time(format!(
            "{year:04}-01-01T00:00:00.000Z/{year:04}-12-30T00:00:00.000Z"
        ))
        .elements([settings.element.as_str()])
}

/// Reduce Frost records to snow-depth points.
///
/// Each record contributes its first observation's value and its
/// reference time. Records missing either are skipped.
pub fn to_snow_depths(data: &[DataEnvelope]) -> Vec<SnowDepth> {
    data.iter()
        .filter_map(|record| {
            let (Some(observation), Some(date)) =
                (record.first_observation(), record.reference_time)
            else {
                warn!(record = %JsonDisplay(record), "skipping record without observation");
                return None;
            };
            Some(SnowDepth {
                thickness: observation.value,
                date,
            })
        })
        .collect()
}
