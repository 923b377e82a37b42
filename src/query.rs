//! Query URL construction.
//!
//! Filters map field names to one or many scalar values; every value becomes
//! a repeated `key=value` pair on the collection URL, which is how the API
//! expresses id-set filters (`patient_id=1&patient_id=2`). Pair order follows
//! insertion order so built URLs are deterministic.

use reqwest::Url;

use crate::error::ApiError;

/// One or many scalar values for a filter field. Scalars are normalized to
/// one-element sequences when the URL is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::One(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::One(v.to_string())
    }
}

impl From<Vec<i64>> for FilterValue {
    fn from(v: Vec<i64>) -> Self {
        Self::Many(v.into_iter().map(|id| id.to_string()).collect())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

/// An insertion-ordered set of filter fields for a collection read.
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    pairs: Vec<(String, FilterValue)>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. Sequences fan out into repeated pairs.
    pub fn field(mut self, key: &str, value: impl Into<FilterValue>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Flattened `(key, value)` pairs in insertion order.
    fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().flat_map(|(key, value)| {
            let values: &[String] = match value {
                FilterValue::One(v) => std::slice::from_ref(v),
                FilterValue::Many(vs) => vs.as_slice(),
            };
            values.iter().map(move |v| (key.as_str(), v.as_str()))
        })
    }
}

/// Build the read URL for a collection, with percent-encoded repeated
/// `key=value` pairs and no trailing separator. An absent or empty filter
/// yields the bare collection URL.
pub fn build_url(
    base: &str,
    path: &str,
    filter: Option<&QueryFilter>,
) -> Result<Url, ApiError> {
    let bare = format!("{}/{}", base.trim_end_matches('/'), path);
    let mut url =
        Url::parse(&bare).map_err(|e| ApiError::InvalidUrl(format!("{bare}: {e}")))?;

    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in filter.entries() {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
