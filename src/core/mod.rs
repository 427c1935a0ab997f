//! Core module - rollup domain logic

pub mod aggregate;
pub mod config;
pub mod dimensions;
pub mod resolver;
pub mod shape;
pub mod source;

pub use aggregate::MaterialTotals;
pub use config::{Config, ConfigError, DEFAULT_BASE_URL};
pub use dimensions::DimensionTuple;
pub use resolver::{
    MaterialLine, PartReport, QuoteReport, ResolveError, Resolver, ResolverOptions, VendorQuote,
    Warning,
};
pub use shape::{MaterialIssue, ShapeForm, StockKey, StockQuantity};
pub use source::{QuoteSource, SourceError, SourceResult};
