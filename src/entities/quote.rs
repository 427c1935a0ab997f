//! Quote search records returned by the quoting service

use serde::Deserialize;

/// One row of a quote-number search.
///
/// The search endpoint returns a list; the resolver requires exactly one
/// match before it walks any further down the hierarchy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub id: String,

    /// Quote number echoed back by the search, when present.
    #[serde(default)]
    pub number: Option<u32>,
}
