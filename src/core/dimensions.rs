//! Dimension extraction from nesting records
//!
//! A nesting record carries up to three optional scalar lengths (d1, d2,
//! d3, in inches). Extraction prefers the richest combination available
//! and never invents a missing scalar: all three if present, else the
//! first present pair in the order (d1,d2), (d1,d3), (d2,d3), else the
//! single present scalar checked d1, d2, d3. A scalar is usable only when
//! present and positive.

use serde::Serialize;

use crate::core::shape::MaterialIssue;
use crate::entities::material::Nesting;

/// An ordered tuple of one to three positive lengths, in inches.
///
/// Never empty: extraction fails instead of producing an empty tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionTuple {
    pub first: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third: Option<f64>,
}

impl DimensionTuple {
    fn one(first: f64) -> Self {
        Self {
            first,
            second: None,
            third: None,
        }
    }

    fn two(first: f64, second: f64) -> Self {
        Self {
            first,
            second: Some(second),
            third: None,
        }
    }

    fn three(first: f64, second: f64, third: f64) -> Self {
        Self {
            first,
            second: Some(second),
            third: Some(third),
        }
    }

    /// Number of scalars carried (1 to 3).
    pub fn len(&self) -> usize {
        1 + self.second.iter().count() + self.third.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// First two scalars as a (length, width) pair, when both exist.
    pub fn pair(&self) -> Option<(f64, f64)> {
        self.second.map(|second| (self.first, second))
    }

    /// Extract a dimension tuple from one nesting record.
    ///
    /// `material_id` is only used to name the offending material when the
    /// record carries no usable scalar.
    pub fn extract(material_id: &str, nesting: &Nesting) -> Result<Self, MaterialIssue> {
        let d1 = usable(nesting.d1);
        let d2 = usable(nesting.d2);
        let d3 = usable(nesting.d3);

        match (d1, d2, d3) {
            (Some(a), Some(b), Some(c)) => Ok(Self::three(a, b, c)),
            (Some(a), Some(b), None) => Ok(Self::two(a, b)),
            (Some(a), None, Some(c)) => Ok(Self::two(a, c)),
            (None, Some(b), Some(c)) => Ok(Self::two(b, c)),
            (Some(a), None, None) => Ok(Self::one(a)),
            (None, Some(b), None) => Ok(Self::one(b)),
            (None, None, Some(c)) => Ok(Self::one(c)),
            (None, None, None) => Err(MaterialIssue::MissingDimensions {
                material_id: material_id.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DimensionTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\"", self.first)?;
        if let Some(second) = self.second {
            write!(f, " x {}\"", second)?;
        }
        if let Some(third) = self.third {
            write!(f, " x {}\"", third)?;
        }
        Ok(())
    }
}

/// A scalar is usable when present and positive. Zero means "not nested".
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting(d1: Option<f64>, d2: Option<f64>, d3: Option<f64>) -> Nesting {
        Nesting { d1, d2, d3 }
    }

    fn extract(d1: Option<f64>, d2: Option<f64>, d3: Option<f64>) -> DimensionTuple {
        DimensionTuple::extract("MAT-1", &nesting(d1, d2, d3)).unwrap()
    }

    #[test]
    fn test_all_three_present() {
        let dims = extract(Some(2.0), Some(3.0), Some(4.0));
        assert_eq!(dims, DimensionTuple::three(2.0, 3.0, 4.0));
        assert_eq!(dims.len(), 3);
    }

    #[test]
    fn test_pair_priority_order() {
        assert_eq!(
            extract(Some(2.0), Some(3.0), None),
            DimensionTuple::two(2.0, 3.0)
        );
        assert_eq!(
            extract(Some(2.0), None, Some(5.0)),
            DimensionTuple::two(2.0, 5.0)
        );
        assert_eq!(
            extract(None, Some(3.0), Some(5.0)),
            DimensionTuple::two(3.0, 5.0)
        );
    }

    #[test]
    fn test_single_scalar_checked_in_order() {
        assert_eq!(extract(Some(7.0), None, None), DimensionTuple::one(7.0));
        assert_eq!(extract(None, Some(7.0), None), DimensionTuple::one(7.0));
        assert_eq!(extract(None, None, Some(7.0)), DimensionTuple::one(7.0));
    }

    #[test]
    fn test_zero_counts_as_absent() {
        // d1 = 0 drops out; the (d2, d3) pair remains.
        assert_eq!(
            extract(Some(0.0), Some(3.0), Some(5.0)),
            DimensionTuple::two(3.0, 5.0)
        );
    }

    #[test]
    fn test_empty_record_is_malformed() {
        let err = DimensionTuple::extract("MAT-9", &nesting(None, None, None)).unwrap_err();
        assert_eq!(
            err,
            MaterialIssue::MissingDimensions {
                material_id: "MAT-9".to_string()
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(extract(Some(12.0), Some(24.0), None).to_string(), "12\" x 24\"");
        assert_eq!(extract(Some(10.0), None, None).to_string(), "10\"");
    }
}
