//! Data-source contract for the quoting service
//!
//! The resolver walks the hierarchy exclusively through this trait, so the
//! HTTP client stays swappable and tests drive the resolver with an
//! in-memory source.

use thiserror::Error;

use crate::entities::material::{InputMaterial, MaterialDetails};
use crate::entities::part::PartLineItem;
use crate::entities::quote::QuoteSummary;

/// An upstream call failed after exhausting its retry budget.
#[derive(Debug, Clone, Error)]
#[error("upstream call failed after {attempts} attempt(s): {message}")]
pub struct SourceError {
    pub attempts: u32,
    pub message: String,
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Read-only view of the quoting service.
///
/// Every operation is a blocking round trip; dependent fetches need the
/// identifiers an upstream fetch returned. Nothing here mutates the
/// service - the quote lookup is a search, not a write.
pub trait QuoteSource {
    /// Search quotes by quote number. A valid number matches exactly one.
    fn find_quotes_by_number(&self, number: u32) -> SourceResult<Vec<QuoteSummary>>;

    /// List the part line items on a quote.
    fn list_parts(&self, quote_id: &str) -> SourceResult<Vec<PartLineItem>>;

    /// List the routing step ids from a part's make summary.
    fn list_routing_ids(&self, quote_id: &str, part_id: &str) -> SourceResult<Vec<String>>;

    /// List the input materials one routing step consumes.
    fn list_input_materials(
        &self,
        quote_id: &str,
        part_id: &str,
        routing_id: &str,
    ) -> SourceResult<Vec<InputMaterial>>;

    /// Resolve a vendor's display name.
    fn vendor_name(&self, vendor_id: &str) -> SourceResult<String>;

    /// Resolve a material's detail record (family reference).
    fn material_details(&self, material_id: &str) -> SourceResult<MaterialDetails>;
}
