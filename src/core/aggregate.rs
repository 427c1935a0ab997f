//! Running stock totals keyed by shape and size class
//!
//! One total set exists per aggregation scope (routing, part, quote).
//! `merge` folds a single contribution in; `absorb` folds a whole child
//! scope into its parent. Both consume `self`, so a total already handed
//! to another holder can never be mutated behind its back, and both
//! reduce to per-key addition, which is associative and commutative:
//! routing, part and quote folds may happen in any order or grouping.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::core::shape::{ShapeForm, StockKey, StockQuantity};

/// Accumulated stock per (form, size label) key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTotals {
    entries: BTreeMap<StockKey, StockQuantity>,
}

impl MaterialTotals {
    /// An empty total set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one contribution into the entry for `key`, inserting when
    /// absent.
    pub fn merge(mut self, key: StockKey, quantity: StockQuantity) -> Self {
        self.entries
            .entry(key)
            .and_modify(|current| *current = current.combine(quantity))
            .or_insert(quantity);
        self
    }

    /// Fold an entire child total set into this one.
    pub fn absorb(self, other: MaterialTotals) -> Self {
        other
            .entries
            .into_iter()
            .fold(self, |acc, (key, quantity)| acc.merge(key, quantity))
    }

    pub fn get(&self, form: ShapeForm, label: &str) -> Option<StockQuantity> {
        self.entries
            .get(&StockKey::new(form, label))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order (form, then label).
    pub fn iter(&self) -> impl Iterator<Item = (&StockKey, &StockQuantity)> {
        self.entries.iter()
    }
}

impl Serialize for MaterialTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Entry<'a> {
            form: ShapeForm,
            dimension: &'a str,
            quantity: StockQuantity,
        }

        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, quantity) in &self.entries {
            seq.serialize_element(&Entry {
                form: key.form,
                dimension: &key.label,
                quantity: *quantity,
            })?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(label: &str) -> StockKey {
        StockKey::new(ShapeForm::RoundBar, label)
    }

    fn sheet(label: &str) -> StockKey {
        StockKey::new(ShapeForm::Sheet, label)
    }

    #[test]
    fn test_round_bar_accumulates_by_scalar_addition() {
        let totals = MaterialTotals::new()
            .merge(bar("1in"), StockQuantity::BarLength(10.0))
            .merge(bar("1in"), StockQuantity::BarLength(15.0));

        assert_eq!(
            totals.get(ShapeForm::RoundBar, "1in"),
            Some(StockQuantity::BarLength(25.0))
        );
        assert_eq!(totals.len(), 1);
    }

    #[test]
    fn test_sheet_accumulates_pairwise() {
        let totals = MaterialTotals::new()
            .merge(
                sheet("0.06in"),
                StockQuantity::SheetExtent {
                    length: 12.0,
                    width: 24.0,
                },
            )
            .merge(
                sheet("0.06in"),
                StockQuantity::SheetExtent {
                    length: 8.0,
                    width: 10.0,
                },
            );

        assert_eq!(
            totals.get(ShapeForm::Sheet, "0.06in"),
            Some(StockQuantity::SheetExtent {
                length: 20.0,
                width: 34.0
            })
        );
    }

    #[test]
    fn test_forms_keep_separate_keys() {
        let totals = MaterialTotals::new()
            .merge(bar("1in"), StockQuantity::BarLength(10.0))
            .merge(
                sheet("1in"),
                StockQuantity::SheetExtent {
                    length: 5.0,
                    width: 5.0,
                },
            );

        assert_eq!(totals.len(), 2);
        assert_eq!(
            totals.get(ShapeForm::RoundBar, "1in"),
            Some(StockQuantity::BarLength(10.0))
        );
    }

    #[test]
    fn test_merge_order_and_grouping_do_not_matter() {
        let a = (bar("1in"), StockQuantity::BarLength(3.0));
        let b = (bar("1in"), StockQuantity::BarLength(4.0));
        let c = (bar("1in"), StockQuantity::BarLength(5.0));

        let forward = MaterialTotals::new()
            .merge(a.0.clone(), a.1)
            .merge(b.0.clone(), b.1)
            .merge(c.0.clone(), c.1);
        let reversed = MaterialTotals::new()
            .merge(c.0.clone(), c.1)
            .merge(b.0.clone(), b.1)
            .merge(a.0.clone(), a.1);

        // Grouped: (a+b) absorbed into (c).
        let left = MaterialTotals::new()
            .merge(a.0.clone(), a.1)
            .merge(b.0.clone(), b.1);
        let right = MaterialTotals::new().merge(c.0.clone(), c.1);
        let grouped = right.absorb(left);

        assert_eq!(forward, reversed);
        assert_eq!(forward, grouped);
    }

    #[test]
    fn test_absorb_into_empty() {
        let child = MaterialTotals::new().merge(bar("0.5in"), StockQuantity::BarLength(7.0));
        let parent = MaterialTotals::new().absorb(child.clone());

        assert_eq!(parent, child);
    }

    #[test]
    fn test_serializes_as_entry_sequence() {
        let totals = MaterialTotals::new().merge(bar("1in"), StockQuantity::BarLength(10.0));
        let json = serde_json::to_value(&totals).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"form": "round_bar", "dimension": "1in", "quantity": {"bar_length": 10.0}}
            ])
        );
    }
}
