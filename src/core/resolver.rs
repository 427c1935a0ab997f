//! Quote hierarchy traversal and rollup
//!
//! Walks quote -> part line item -> routing -> input material through a
//! [`QuoteSource`] and folds each material's contribution upward with one
//! merge operation at every level. Per-material failures become warnings
//! on the report; only a missing/ambiguous quote or an exhausted upstream
//! call aborts the run.

use serde::Serialize;
use thiserror::Error;

use crate::core::aggregate::MaterialTotals;
use crate::core::dimensions::DimensionTuple;
use crate::core::shape::{self, MaterialIssue};
use crate::core::source::{QuoteSource, SourceError, SourceResult};
use crate::entities::material::InputMaterial;
use crate::entities::part::PartLineItem;

/// Fatal resolution failures.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no quote found for number {number}")]
    NotFound { number: u32 },

    /// More than one quote matched. Never guess which one was meant.
    #[error("quote number {number} matched {count} quotes")]
    Ambiguous { number: u32, count: usize },

    /// Strict mode promotes a per-material issue to fatal.
    #[error("strict mode: {issue}")]
    Strict {
        part_id: String,
        routing_id: String,
        #[source]
        issue: MaterialIssue,
    },

    #[error(transparent)]
    Upstream(#[from] SourceError),
}

/// Resolution policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverOptions {
    /// Abort on the first malformed or unsupported material instead of
    /// recording a warning.
    pub strict: bool,

    /// Resolve vendor display names, first price breaks and material
    /// family codes per material line. Informational only; never part of
    /// the aggregation math.
    pub with_vendors: bool,
}

/// The outcome of a successful run: totals plus every warning collected
/// along the way.
#[derive(Debug, Serialize)]
pub struct QuoteReport {
    pub quote_number: u32,
    pub quote_id: String,
    pub parts: Vec<PartReport>,
    pub totals: MaterialTotals,
    pub warnings: Vec<Warning>,
}

/// Rollup for a single part line item.
#[derive(Debug, Serialize)]
pub struct PartReport {
    pub part_id: String,
    /// First line of the part description.
    pub description: String,
    pub totals: MaterialTotals,
    pub materials: Vec<MaterialLine>,
}

/// One material detail line, for the report body.
#[derive(Debug, Serialize)]
pub struct MaterialLine {
    pub material_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub form: String,
    pub dimension: String,
    pub dimensions: DimensionTuple,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorQuote>,
}

/// Resolved vendor info for a material line.
#[derive(Debug, Serialize)]
pub struct VendorQuote {
    pub name: String,
    /// First listed price break, per pound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_lb: Option<f64>,
}

/// A per-material failure, located within the hierarchy.
#[derive(Debug, Serialize)]
pub struct Warning {
    pub part_id: String,
    pub routing_id: String,
    #[serde(flatten)]
    pub issue: MaterialIssue,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "part {} routing {}: {}",
            self.part_id, self.routing_id, self.issue
        )
    }
}

/// Drives the traversal against an injected [`QuoteSource`].
pub struct Resolver<'a, S: QuoteSource + ?Sized> {
    source: &'a S,
    options: ResolverOptions,
}

impl<'a, S: QuoteSource + ?Sized> Resolver<'a, S> {
    pub fn new(source: &'a S, options: ResolverOptions) -> Self {
        Self { source, options }
    }

    /// Resolve one quote number into a full rollup report.
    pub fn resolve(&self, number: u32) -> Result<QuoteReport, ResolveError> {
        let quote_id = self.lookup_quote(number)?;
        let parts = self.source.list_parts(&quote_id)?;

        let mut part_reports = Vec::with_capacity(parts.len());
        let mut totals = MaterialTotals::new();
        let mut warnings = Vec::new();

        for part in &parts {
            let part_report = self.resolve_part(&quote_id, part, &mut warnings)?;
            totals = totals.absorb(part_report.totals.clone());
            part_reports.push(part_report);
        }

        Ok(QuoteReport {
            quote_number: number,
            quote_id,
            parts: part_reports,
            totals,
            warnings,
        })
    }

    fn lookup_quote(&self, number: u32) -> Result<String, ResolveError> {
        let mut matches = self.source.find_quotes_by_number(number)?;
        match matches.len() {
            1 => Ok(matches.remove(0).id),
            0 => Err(ResolveError::NotFound { number }),
            count => Err(ResolveError::Ambiguous { number, count }),
        }
    }

    fn resolve_part(
        &self,
        quote_id: &str,
        part: &PartLineItem,
        warnings: &mut Vec<Warning>,
    ) -> Result<PartReport, ResolveError> {
        let routing_ids = self.source.list_routing_ids(quote_id, &part.id)?;

        let mut totals = MaterialTotals::new();
        let mut materials = Vec::new();

        for routing_id in &routing_ids {
            if let Some(routing_totals) =
                self.resolve_routing(quote_id, part, routing_id, &mut materials, warnings)?
            {
                totals = totals.absorb(routing_totals);
            }
        }

        Ok(PartReport {
            part_id: part.id.clone(),
            description: part.summary_line().to_string(),
            totals,
            materials,
        })
    }

    /// Roll up one routing. Returns `None` when any of its materials was
    /// malformed or unsupported: a routing with a bad record contributes
    /// nothing, though every failure is still collected so none vanish.
    fn resolve_routing(
        &self,
        quote_id: &str,
        part: &PartLineItem,
        routing_id: &str,
        materials: &mut Vec<MaterialLine>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Option<MaterialTotals>, ResolveError> {
        let records = self
            .source
            .list_input_materials(quote_id, &part.id, routing_id)?;

        let mut totals = MaterialTotals::new();
        let mut clean = true;

        for record in &records {
            match classify_material(record) {
                Ok((key, quantity, dims)) => {
                    totals = totals.merge(key, quantity);
                    materials.push(self.describe_material(record, dims)?);
                }
                Err(issue) => {
                    if self.options.strict {
                        return Err(ResolveError::Strict {
                            part_id: part.id.clone(),
                            routing_id: routing_id.to_string(),
                            issue,
                        });
                    }
                    clean = false;
                    warnings.push(Warning {
                        part_id: part.id.clone(),
                        routing_id: routing_id.to_string(),
                        issue,
                    });
                }
            }
        }

        Ok(clean.then_some(totals))
    }

    /// Build the report line for one good material, resolving vendor and
    /// family details when asked to.
    fn describe_material(
        &self,
        record: &InputMaterial,
        dims: DimensionTuple,
    ) -> SourceResult<MaterialLine> {
        let shape = &record.material_shape;

        let reference = if shape.material_reference_id.is_some() {
            shape.material_reference_id.clone()
        } else if self.options.with_vendors {
            self.source
                .material_details(&record.material_id)?
                .material_reference_id
        } else {
            None
        };

        let vendor = if self.options.with_vendors {
            match shape.vendors.first() {
                Some(vendor_ref) => Some(VendorQuote {
                    name: self.source.vendor_name(&vendor_ref.vendor_id)?,
                    price_per_lb: vendor_ref.price_breaks.first().map(|pb| pb.price),
                }),
                None => None,
            }
        } else {
            None
        };

        Ok(MaterialLine {
            material_id: record.material_id.clone(),
            reference,
            form: shape.form.clone(),
            dimension: shape::normalize_label(&shape.dimension),
            dimensions: dims,
            vendor,
        })
    }
}

/// Extract and classify one material record. Only the first nesting entry
/// is consulted; an empty nesting list counts as missing dimensions.
fn classify_material(
    record: &InputMaterial,
) -> Result<(shape::StockKey, shape::StockQuantity, DimensionTuple), MaterialIssue> {
    let nesting = record
        .nestings
        .first()
        .ok_or_else(|| MaterialIssue::MissingDimensions {
            material_id: record.material_id.clone(),
        })?;

    let dims = DimensionTuple::extract(&record.material_id, nesting)?;
    let (key, quantity) = shape::classify(&record.material_id, &record.material_shape, &dims)?;
    Ok((key, quantity, dims))
}
