//! Shape classification: physical form to aggregation policy
//!
//! Each supported form family maps a material's dimension tuple onto one
//! (key, quantity) contribution. Round bar consumes linear stock, so its
//! quantity is the bar length. Sheet consumes an additively tracked
//! (length, width) pair; length and width stay separable for downstream
//! cut planning rather than collapsing into a swept area.

use serde::Serialize;
use thiserror::Error;

use crate::core::dimensions::DimensionTuple;
use crate::entities::material::MaterialShape;

/// Physical form family of a raw material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeForm {
    RoundBar,
    Sheet,
}

impl ShapeForm {
    /// Parse the wire form string. Unknown forms return `None`.
    pub fn parse(form: &str) -> Option<ShapeForm> {
        match form {
            "roundBar" => Some(ShapeForm::RoundBar),
            "sheet" => Some(ShapeForm::Sheet),
            _ => None,
        }
    }
}

impl std::fmt::Display for ShapeForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeForm::RoundBar => write!(f, "round bar"),
            ShapeForm::Sheet => write!(f, "sheet"),
        }
    }
}

/// Aggregation grouping key: one size class within one shape family.
///
/// Materials with the same form and size label are treated as fungible
/// stock even when their material references differ; keys are per-form so
/// a 1" bar diameter never pools with a 1" sheet thickness.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StockKey {
    pub form: ShapeForm,
    pub label: String,
}

impl StockKey {
    pub fn new(form: ShapeForm, label: impl Into<String>) -> Self {
        Self {
            form,
            label: label.into(),
        }
    }
}

/// Accumulated stock for one key. The variant carries its combine rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockQuantity {
    /// Linear stock: total bar length in inches.
    BarLength(f64),
    /// Sheet stock: independently summed length and width, in inches.
    SheetExtent { length: f64, width: f64 },
}

impl StockQuantity {
    /// Additive combine. Associative and commutative per variant, so fold
    /// order never matters across routings or parts.
    pub fn combine(self, other: StockQuantity) -> StockQuantity {
        match (self, other) {
            (StockQuantity::BarLength(a), StockQuantity::BarLength(b)) => {
                StockQuantity::BarLength(a + b)
            }
            (
                StockQuantity::SheetExtent {
                    length: l1,
                    width: w1,
                },
                StockQuantity::SheetExtent {
                    length: l2,
                    width: w2,
                },
            ) => StockQuantity::SheetExtent {
                length: l1 + l2,
                width: w1 + w2,
            },
            // Keys carry the form, so entries under one key share a variant.
            (lhs, _) => lhs,
        }
    }
}

/// Per-material failures. Recoverable: the resolver records them as
/// warnings and excludes the material from totals, unless strict mode
/// promotes them to fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaterialIssue {
    /// The nesting record yields no usable dimension scalar.
    #[error("material {material_id}: nesting record has no usable dimensions")]
    MissingDimensions { material_id: String },

    /// The declared form is neither round bar nor sheet.
    #[error("material {material_id}: unsupported shape form \"{form}\"")]
    UnsupportedForm { material_id: String, form: String },
}

/// Normalize a size label for grouping: vendors write `0.25"` for
/// quarter-inch plate, reports use `0.25in`.
pub fn normalize_label(raw: &str) -> String {
    raw.replace('"', "in")
}

/// Classify one material into its aggregation contribution.
pub fn classify(
    material_id: &str,
    shape: &MaterialShape,
    dims: &DimensionTuple,
) -> Result<(StockKey, StockQuantity), MaterialIssue> {
    let form = ShapeForm::parse(&shape.form).ok_or_else(|| MaterialIssue::UnsupportedForm {
        material_id: material_id.to_string(),
        form: shape.form.clone(),
    })?;

    let key = StockKey::new(form, normalize_label(&shape.dimension));
    let quantity = match form {
        ShapeForm::RoundBar => StockQuantity::BarLength(dims.first),
        ShapeForm::Sheet => {
            // Sheet needs a (length, width) pair; a lone scalar cannot be
            // attributed to either axis.
            let (length, width) = dims.pair().ok_or_else(|| MaterialIssue::MissingDimensions {
                material_id: material_id.to_string(),
            })?;
            StockQuantity::SheetExtent { length, width }
        }
    };

    Ok((key, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::material::Nesting;

    fn shape(form: &str, dimension: &str) -> MaterialShape {
        MaterialShape {
            form: form.to_string(),
            dimension: dimension.to_string(),
            material_reference_id: None,
            material_reference_name: None,
            vendors: Vec::new(),
        }
    }

    fn dims(d1: f64, d2: Option<f64>) -> DimensionTuple {
        DimensionTuple::extract(
            "MAT-1",
            &Nesting {
                d1: Some(d1),
                d2,
                d3: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_round_bar_contributes_length() {
        let (key, qty) = classify("MAT-1", &shape("roundBar", "1\""), &dims(10.0, None)).unwrap();

        assert_eq!(key, StockKey::new(ShapeForm::RoundBar, "1in"));
        assert_eq!(qty, StockQuantity::BarLength(10.0));
    }

    #[test]
    fn test_sheet_contributes_length_width_pair() {
        let (key, qty) =
            classify("MAT-2", &shape("sheet", "12 GA"), &dims(12.0, Some(24.0))).unwrap();

        assert_eq!(key, StockKey::new(ShapeForm::Sheet, "12 GA"));
        assert_eq!(
            qty,
            StockQuantity::SheetExtent {
                length: 12.0,
                width: 24.0
            }
        );
    }

    #[test]
    fn test_sheet_with_single_scalar_is_malformed() {
        let err = classify("MAT-3", &shape("sheet", "12 GA"), &dims(12.0, None)).unwrap_err();

        assert_eq!(
            err,
            MaterialIssue::MissingDimensions {
                material_id: "MAT-3".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_form_is_unsupported() {
        let err = classify("MAT-4", &shape("tube", "1\""), &dims(10.0, None)).unwrap_err();

        assert_eq!(
            err,
            MaterialIssue::UnsupportedForm {
                material_id: "MAT-4".to_string(),
                form: "tube".to_string()
            }
        );
    }

    #[test]
    fn test_label_normalization() {
        assert_eq!(normalize_label("0.25\""), "0.25in");
        assert_eq!(normalize_label("12 GA"), "12 GA");
    }

    #[test]
    fn test_combine_is_additive_per_variant() {
        assert_eq!(
            StockQuantity::BarLength(10.0).combine(StockQuantity::BarLength(15.0)),
            StockQuantity::BarLength(25.0)
        );
        assert_eq!(
            StockQuantity::SheetExtent {
                length: 12.0,
                width: 24.0
            }
            .combine(StockQuantity::SheetExtent {
                length: 8.0,
                width: 10.0
            }),
            StockQuantity::SheetExtent {
                length: 20.0,
                width: 34.0
            }
        );
    }
}
