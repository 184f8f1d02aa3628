//! Frost API response types and decoding.
//!
//! The Frost API wraps every answer in a [`ResponseEnvelope`] carrying
//! paging metadata and a list of [`DataEnvelope`] records. The same
//! record type is used for both the sources catalog and observation
//! queries, so almost every field is optional or defaulted; unknown
//! fields are ignored.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FrostError;

/// Top-level JSON-LD envelope returned by every Frost endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseEnvelope {
    /// JSON-LD context URL.
    #[serde(rename = "@context")]
    pub context: Option<String>,
    /// JSON-LD type, e.g. `ObservationResponse`.
    #[serde(rename = "@type")]
    pub response_type: Option<String>,
    /// API version string.
    pub api_version: Option<String>,
    /// License URL for the returned data.
    pub license: Option<String>,
    /// When the response was produced.
    pub created_at: Option<DateTime<Utc>>,
    /// Server-side query time in seconds.
    pub query_time: Option<f64>,
    /// Items in this page.
    pub current_item_count: Option<u64>,
    /// Page size.
    pub items_per_page: Option<u64>,
    /// Offset of this page.
    pub offset: Option<u64>,
    /// Items across all pages.
    pub total_item_count: Option<u64>,
    /// Link to the next page, if any.
    pub next_link: Option<String>,
    /// Link to the previous page, if any.
    pub previous_link: Option<String>,
    /// Link to this page.
    pub current_link: Option<String>,
    /// The records.
    pub data: Vec<DataEnvelope>,
}

impl ResponseEnvelope {
    /// Whether the upstream reported further pages.
    pub const fn has_more_pages(&self) -> bool {
        self.next_link.is_some()
    }
}

/// One station/time entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataEnvelope {
    /// Record id (sources catalog).
    pub id: Option<String>,
    /// Station name (sources catalog).
    pub name: Option<String>,
    /// Country (sources catalog).
    pub country: Option<String>,
    /// Source id the observations belong to, e.g. `SN90450:0`.
    pub source_id: Option<String>,
    /// Station location.
    pub geometry: Option<Geometry>,
    /// Vertical levels.
    pub levels: Vec<Level>,
    /// Reference time of the observations.
    pub reference_time: Option<DateTime<Utc>>,
    /// Observed values.
    pub observations: Vec<Observation>,
    /// Start of validity (sources catalog).
    pub valid_from: Option<String>,
    /// Legacy MET Norway element-code convention.
    pub legacy_met_no_convention: Option<LegacyMetNoConvention>,
    /// CF convention metadata.
    pub cf_convention: Option<CfConvention>,
}

impl DataEnvelope {
    /// The first observation, if any.
    pub fn first_observation(&self) -> Option<&Observation> {
        self.observations.first()
    }
}

/// GeoJSON-like point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Geometry type, e.g. `Point`.
    #[serde(rename = "@type")]
    pub geometry_type: Option<String>,
    /// Coordinate pair.
    pub coordinates: Vec<f64>,
    /// Whether the position was interpolated.
    pub interpolated: bool,
}

/// A vertical level, e.g. height above ground.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Level {
    /// Level type, e.g. `height_above_ground`.
    pub level_type: Option<String>,
    /// Level value.
    pub value: Option<f64>,
    /// Unit of `value`.
    pub unit: Option<String>,
}

/// A single observed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Element id, e.g. `surface_snow_thickness`. Absent when the
    /// query's `fields` selector leaves it out.
    #[serde(default)]
    pub element_id: Option<String>,
    /// Observed value.
    pub value: f64,
    /// Unit of `value`, e.g. `cm`.
    #[serde(default)]
    pub unit: Option<String>,
    /// Code table reference for coded values.
    #[serde(default)]
    pub code_table: Option<String>,
    /// Performance category.
    #[serde(default)]
    pub performance_category: Option<String>,
    /// Exposure category.
    #[serde(default)]
    pub exposure_category: Option<String>,
    /// Quality code.
    #[serde(default)]
    pub quality_code: Option<i32>,
    /// Data version tag.
    #[serde(default)]
    pub data_version: Option<String>,
}

/// Legacy MET Norway element-code mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyMetNoConvention {
    /// Legacy element codes.
    pub elem_codes: Vec<String>,
    /// Category.
    pub category: Option<String>,
    /// Unit.
    pub unit: Option<String>,
}

/// CF standard-name metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CfConvention {
    /// CF standard name.
    pub standard_name: Option<String>,
    /// CF unit.
    pub unit: Option<String>,
    /// CF status.
    pub status: Option<String>,
}

/// Parse a raw Frost response body.
///
/// # Errors
///
/// Returns [`FrostError::Decode`] if the body is not valid JSON or does
/// not match the envelope schema.
pub fn decode_response(body: &[u8]) -> Result<ResponseEnvelope, FrostError> {
    Ok(serde_json::from_slice(body)?)
}

/// Displays any serializable value as compact JSON.
///
/// Used for logging records without writing a formatter per type.
pub struct JsonDisplay<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> fmt::Display for JsonDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self.0) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
