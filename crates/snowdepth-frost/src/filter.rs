//! Query filters for the Frost API and URL construction.
//!
//! A [`Filter`] is a set of optional selectors. Each non-empty list
//! selector becomes one comma-joined query parameter, each non-empty
//! scalar selector becomes one parameter verbatim, and empty selectors
//! contribute nothing. Values are never validated here; the upstream
//! API is the authority on what a valid element or station id is.

use reqwest::Url;

use crate::error::FrostError;

/// Optional selectors for a Frost query.
///
/// Built with the chained setters and then handed to the client by
/// reference. See <https://frost.met.no/api.html> for which selectors
/// each endpoint accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    sources: Vec<String>,
    reference_time: Option<String>,
    elements: Vec<String>,
    performance_categories: Vec<String>,
    exposure_categories: Vec<String>,
    fields: Vec<String>,
    ids: Vec<String>,
    types: Vec<String>,
    geometry: Option<String>,
    valid_time: Option<String>,
}

fn collect<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl Filter {
    /// Restrict to these source (station) ids, e.g. `SN90450`.
    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = collect(sources);
        self
    }

    /// Restrict to an ISO-8601 reference-time interval
    /// (`start/end`).
    #[must_use]
    pub fn reference_time(mut self, interval: impl Into<String>) -> Self {
        self.reference_time = Some(interval.into());
        self
    }

    /// Restrict to these element ids, e.g. `surface_snow_thickness`.
    #[must_use]
    pub fn elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = collect(elements);
        self
    }

    /// Restrict to these performance categories.
    #[must_use]
    pub fn performance_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.performance_categories = collect(categories);
        self
    }

    /// Restrict to these exposure categories.
    #[must_use]
    pub fn exposure_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposure_categories = collect(categories);
        self
    }

    /// Only return these fields in each record.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = collect(fields);
        self
    }

    /// Restrict to these record ids.
    #[must_use]
    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = collect(ids);
        self
    }

    /// Restrict to these source types, e.g. `SensorSystem`.
    #[must_use]
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = collect(types);
        self
    }

    /// Restrict to a geometry selector (WKT or `nearest(...)`).
    #[must_use]
    pub fn geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Restrict to sources valid at this time or interval.
    #[must_use]
    pub fn valid_time(mut self, valid_time: impl Into<String>) -> Self {
        self.valid_time = Some(valid_time.into());
        self
    }

    /// Whether no selector is set.
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// The query parameters this filter contributes, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let lists: [(&'static str, &[String]); 7] = [
            ("sources", self.sources.as_slice()),
            ("elements", self.elements.as_slice()),
            ("performancecategory", self.performance_categories.as_slice()),
            ("exposurecategory", self.exposure_categories.as_slice()),
            ("fields", self.fields.as_slice()),
            ("ids", self.ids.as_slice()),
            ("types", self.types.as_slice()),
        ];
        let scalars: [(&'static str, Option<&String>); 3] = [
            ("referencetime", self.reference_time.as_ref()),
            ("geometry", self.geometry.as_ref()),
            ("validtime", self.valid_time.as_ref()),
        ];

        let joined = lists
            .into_iter()
            .map(|(name, values)| (name, values.join(",")));
        let verbatim = scalars
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v.clone())));

        joined
            .chain(verbatim)
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

/// Build the full request URL for `path` under `base` with the
/// filter's parameters.
///
/// `path` is resolved relative to `base`, so `base` should end in `/`.
/// A filter with no selectors yields a URL without a query component.
pub fn build_url(base: &Url, path: &str, filter: &Filter) -> Result<Url, FrostError> {
    let mut url = base
        .join(path)
        .map_err(|e| FrostError::Configuration(format!("invalid endpoint {path}: {e}")))?;

    if !filter.is_empty() {
        let mut query = url.query_pairs_mut();
        for (name, value) in filter.query_pairs() {
            query.append_pair(name, &value);
        }
    }

    Ok(url)
}
