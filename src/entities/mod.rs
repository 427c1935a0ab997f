//! Wire record definitions
//!
//! Deserialized shapes of the quoting service's responses, one module per
//! level of the quote hierarchy:
//!
//! - [`QuoteSummary`] - quote-number search rows
//! - [`PartLineItem`] / [`RoutingRef`] - line items and their routing steps
//! - [`InputMaterial`] - raw materials with shape, vendors and nestings
//!
//! Field names are camelCase on the wire and renamed via serde. Records are
//! read-only: nothing here is ever serialized back to the service.

pub mod material;
pub mod part;
pub mod quote;

pub use material::{
    InputMaterial, MaterialDetails, MaterialShape, Nesting, PriceBreak, VendorRecord, VendorRef,
};
pub use part::{PartLineItem, RoutingRef};
pub use quote::QuoteSummary;
