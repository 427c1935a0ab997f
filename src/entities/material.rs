//! Input material records returned by the quoting service
//!
//! These mirror the wire shape of the input-materials endpoint: a material
//! id, a shape descriptor (form, size class, reference, vendors) and one or
//! more nesting records describing the physical size per placed instance.

use serde::Deserialize;

/// One input material consumed by a routing step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMaterial {
    pub material_id: String,

    pub material_shape: MaterialShape,

    /// Placement records. Only the first entry is consulted when rolling
    /// up stock totals; additional placements are ignored.
    #[serde(default)]
    pub nestings: Vec<Nesting>,
}

/// Shape descriptor for a raw material.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialShape {
    /// Physical form family, e.g. "roundBar" or "sheet".
    pub form: String,

    /// Size class within the form family: gauge, thickness or diameter,
    /// e.g. "12 GA" or "0.25\"".
    pub dimension: String,

    /// Material family code, e.g. "SS-304".
    #[serde(default)]
    pub material_reference_id: Option<String>,

    /// Human-readable material family, e.g. "Stainless steel".
    #[serde(default)]
    pub material_reference_name: Option<String>,

    #[serde(default)]
    pub vendors: Vec<VendorRef>,
}

/// A vendor offering this material, with quantity-based pricing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRef {
    pub vendor_id: String,

    #[serde(default)]
    pub price_breaks: Vec<PriceBreak>,
}

/// One price break. Price is per pound.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreak {
    pub price: f64,
}

/// One placement record: up to three optional scalar lengths in inches.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Nesting {
    #[serde(default)]
    pub d1: Option<f64>,
    #[serde(default)]
    pub d2: Option<f64>,
    #[serde(default)]
    pub d3: Option<f64>,
}

/// Detail record from the materials endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDetails {
    /// Material family code, e.g. "SS-304".
    #[serde(default)]
    pub material_reference_id: Option<String>,
}

/// Vendor detail record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_material_deserializes_wire_record() {
        let json = r#"{
            "materialId": "SS-304-#4|SS-304-#4-Sheet-0.06",
            "materialShape": {
                "form": "sheet",
                "dimension": "12 GA",
                "materialReferenceId": "SS-304",
                "materialReferenceName": "Stainless steel",
                "vendors": [
                    {"vendorId": "vn-3", "priceBreaks": [{"price": 2.15}, {"price": 1.98}]}
                ]
            },
            "nestings": [{"d2": 12.0, "d3": 24.0}]
        }"#;

        let mat: InputMaterial = serde_json::from_str(json).unwrap();
        assert_eq!(mat.material_shape.form, "sheet");
        assert_eq!(mat.material_shape.dimension, "12 GA");
        assert_eq!(mat.material_shape.vendors[0].vendor_id, "vn-3");
        assert_eq!(mat.material_shape.vendors[0].price_breaks[0].price, 2.15);
        assert_eq!(mat.nestings[0].d2, Some(12.0));
        assert_eq!(mat.nestings[0].d1, None);
    }

    #[test]
    fn test_input_material_tolerates_sparse_shape() {
        let json = r#"{
            "materialId": "AL-6061-Bar-1.0",
            "materialShape": {"form": "roundBar", "dimension": "1\""},
            "nestings": []
        }"#;

        let mat: InputMaterial = serde_json::from_str(json).unwrap();
        assert!(mat.material_shape.vendors.is_empty());
        assert!(mat.nestings.is_empty());
        assert_eq!(mat.material_shape.material_reference_id, None);
    }
}
