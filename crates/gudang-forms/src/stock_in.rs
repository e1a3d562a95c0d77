//! # Stock-In Draft
//!
//! The draft behind the stock-in (goods receipt) entry page.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Stock-In Draft Operations                             │
//! │                                                                         │
//! │  Frontend Action           Draft Change                                 │
//! │  ───────────────           ────────────                                 │
//! │  Pick product+lot ───────► add_line(line)     (merges same lot)         │
//! │  Change quantity ────────► update_quantity()  (0 removes the line)      │
//! │  Click remove ───────────► remove_line()                                │
//! │  Cancel document ────────► clear()                                      │
//! │  Footer row ─────────────► totals()           (recomputed on read)      │
//! │                                                                         │
//! │  Receipts are RECORDED, not stock-validated: incoming goods have no     │
//! │  ceiling. Lines still refuse unresolved units and corrupt packaging.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gudang_core::MAX_DRAFT_LINES;

use crate::error::{FormError, FormResult};
use crate::line::{totals_of, DraftLine, DraftTotals};

/// A stock-in document being assembled on the client.
///
/// ## Invariants
/// - At most [`MAX_DRAFT_LINES`] lines
/// - Lines of the same product, unit, and packaging merge (one lot, one row)
/// - Each draft is an independent, locally-owned value; last submission
///   wins at the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInDraft {
    /// Supplier chosen in the document header, once selected.
    pub supplier_id: Option<String>,

    /// Receipt lines.
    pub lines: Vec<DraftLine>,

    /// When the draft was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl StockInDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        StockInDraft {
            supplier_id: None,
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line, merging into an existing row when the same product
    /// arrives in the same unit and packaging (one lot, one row).
    pub fn add_line(&mut self, line: DraftLine) -> FormResult<()> {
        debug!(product_id = %line.product_id, quantity = line.quantity, "stock-in add_line");

        if let Some(existing) = self.lines.iter_mut().find(|l| {
            l.product_id == line.product_id
                && l.unit.id == line.unit.id
                && l.packaging == line.packaging
        }) {
            let merged = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(gudang_core::EngineError::AmountOverflow)?;
            return existing.set_quantity(merged);
        }

        if self.lines.len() >= MAX_DRAFT_LINES {
            return Err(FormError::DraftFull {
                max: MAX_DRAFT_LINES,
            });
        }

        self.lines.push(line);
        Ok(())
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity 0: removes the line
    /// - Product not found: returns error
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> FormResult<()> {
        debug!(product_id = %product_id, quantity, "stock-in update_quantity");

        if quantity == 0 {
            return self.remove_line(product_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| FormError::LineNotFound {
                product_id: product_id.to_string(),
            })?;

        line.set_quantity(quantity)
    }

    /// Removes a line by product ID.
    pub fn remove_line(&mut self, product_id: &str) -> FormResult<()> {
        debug!(product_id = %product_id, "stock-in remove_line");

        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(FormError::LineNotFound {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Clears the draft for a fresh document.
    pub fn clear(&mut self) {
        debug!("stock-in clear");
        self.supplier_id = None;
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Number of lines in the draft.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Footer totals, recomputed on read.
    pub fn totals(&self) -> FormResult<DraftTotals> {
        totals_of(&self.lines)
    }
}

impl Default for StockInDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gudang_core::{Money, PackagingStructure, Unit};

    fn unit(name: &str) -> Unit {
        Unit {
            id: "9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d".to_string(),
            name: name.to_string(),
            abbreviation: name.to_lowercase(),
        }
    }

    fn line(product_id: &str, quantity: i64) -> DraftLine {
        DraftLine::new(
            product_id,
            "Indomie Goreng 85g",
            unit("Dus"),
            PackagingStructure::new(12, 5).unwrap(),
            quantity,
            Money::from_rupiah(150_000),
        )
        .unwrap()
    }

    const PRODUCT_A: &str = "550e8400-e29b-41d4-a716-446655440000";
    const PRODUCT_B: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    #[test]
    fn test_add_line_and_totals() {
        let mut draft = StockInDraft::new();
        draft.add_line(line(PRODUCT_A, 2)).unwrap();

        let totals = draft.totals().unwrap();
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.total_pieces, 120);
        assert_eq!(totals.total_amount.rupiah(), 300_000);
    }

    #[test]
    fn test_same_lot_merges_into_one_row() {
        let mut draft = StockInDraft::new();
        draft.add_line(line(PRODUCT_A, 2)).unwrap();
        draft.add_line(line(PRODUCT_A, 3)).unwrap();

        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.lines[0].quantity, 5);
        assert_eq!(draft.lines[0].total_pieces, 300);
    }

    #[test]
    fn test_different_packaging_stays_a_separate_line() {
        let mut draft = StockInDraft::new();
        draft.add_line(line(PRODUCT_A, 2)).unwrap();

        // Same product, same unit, but this receipt is packed 6 per pack
        let other_lot = DraftLine::new(
            PRODUCT_A,
            "Indomie Goreng 85g",
            unit("Dus"),
            PackagingStructure::new(6, 5).unwrap(),
            1,
            Money::from_rupiah(80_000),
        )
        .unwrap();
        draft.add_line(other_lot).unwrap();

        assert_eq!(draft.line_count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut draft = StockInDraft::new();
        draft.add_line(line(PRODUCT_A, 2)).unwrap();

        draft.update_quantity(PRODUCT_A, 0).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_update_unknown_product_errors() {
        let mut draft = StockInDraft::new();
        draft.add_line(line(PRODUCT_A, 2)).unwrap();

        assert!(matches!(
            draft.update_quantity(PRODUCT_B, 1),
            Err(FormError::LineNotFound { .. })
        ));
    }

    #[test]
    fn test_draft_full() {
        let mut draft = StockInDraft::new();
        // Fill with distinct synthetic product UUIDs
        for i in 0..MAX_DRAFT_LINES {
            let id = format!("550e8400-e29b-41d4-a716-4466554{:05}", i);
            draft.add_line(line(&id, 1)).unwrap();
        }
        let overflow = line(PRODUCT_B, 1);
        assert!(matches!(
            draft.add_line(overflow),
            Err(FormError::DraftFull { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut draft = StockInDraft::new();
        draft.supplier_id = Some(PRODUCT_B.to_string());
        draft.add_line(line(PRODUCT_A, 2)).unwrap();

        draft.clear();
        assert!(draft.is_empty());
        assert!(draft.supplier_id.is_none());
    }
}
