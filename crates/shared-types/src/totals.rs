//! Derived monetary aggregates
//!
//! [`ComputedTotals`] is recomputed from the current value set on every
//! render and never persisted; only value sets are stored, so totals can
//! never drift from their inputs.

use serde::{Deserialize, Serialize};

/// Per-section aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTotals {
    pub section_id: String,
    /// Amounts for included rows, in row order. Skipped rows (empty key
    /// field) do not appear here.
    pub row_amounts: Vec<f64>,
    pub subtotal: f64,
}

/// All derived totals for one document. Full precision; display rounding
/// happens only at formatting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedTotals {
    /// Enabled sections only, in template order.
    pub sections: Vec<SectionTotals>,
    /// Sum of enabled section subtotals.
    pub items_subtotal: f64,
    pub other_costs: f64,
    /// `items_subtotal + other_costs`.
    pub grand_subtotal: f64,
    /// Tax rate as a percentage (e.g. 10 for 10%).
    pub tax_rate: f64,
    pub tax_amount: f64,
    /// `grand_subtotal + tax_amount`.
    pub total: f64,
}

impl ComputedTotals {
    /// Totals for a document with no monetary content (e.g. a letterhead).
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
            items_subtotal: 0.0,
            other_costs: 0.0,
            grand_subtotal: 0.0,
            tax_rate: 0.0,
            tax_amount: 0.0,
            total: 0.0,
        }
    }

    pub fn section(&self, id: &str) -> Option<&SectionTotals> {
        self.sections.iter().find(|s| s.section_id == id)
    }
}
