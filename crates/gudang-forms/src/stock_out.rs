//! # Stock-Out Draft
//!
//! The draft behind the stock-out (goods issue) entry page.
//!
//! Identical shape to the stock-in draft, with one addition: every line
//! carries a stock snapshot and every recompute revalidates the quantity
//! against the snapshot ceiling. The per-line `max_quantity` is exposed so
//! the form can cap the input field immediately, before the backend's
//! authoritative check at submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gudang_core::{StockSnapshot, MAX_DRAFT_LINES};

use crate::error::{FormError, FormResult};
use crate::line::{totals_of, DraftLine, DraftTotals};

/// A stock-out document being assembled on the client.
///
/// ## Invariants
/// - Every line has a stock snapshot ([`FormError::MissingSnapshot`] otherwise)
/// - Merged quantities revalidate against the snapshot, so a merge can fail
///   exactly like an oversized manual entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOutDraft {
    /// Issue lines.
    pub lines: Vec<DraftLine>,

    /// When the draft was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl StockOutDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        StockOutDraft {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line, merging same product+unit+packaging rows.
    pub fn add_line(&mut self, line: DraftLine) -> FormResult<()> {
        debug!(product_id = %line.product_id, quantity = line.quantity, "stock-out add_line");

        if line.stock.is_none() {
            return Err(FormError::MissingSnapshot);
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| {
            l.product_id == line.product_id
                && l.unit.id == line.unit.id
                && l.packaging == line.packaging
        }) {
            let merged = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(gudang_core::EngineError::AmountOverflow)?;
            // Revalidates against the snapshot; an over-ceiling merge fails
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

    /// Updates the quantity of a line (0 removes it).
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> FormResult<()> {
        debug!(product_id = %product_id, quantity, "stock-out update_quantity");

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

    /// Replaces a line's snapshot after a fresh current-stock load and
    /// revalidates the entered quantity against the new ceiling.
    pub fn refresh_stock(&mut self, product_id: &str, snapshot: StockSnapshot) -> FormResult<()> {
        debug!(product_id = %product_id, stock = snapshot.current_stock_pieces, "stock-out refresh_stock");

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| FormError::LineNotFound {
                product_id: product_id.to_string(),
            })?;

        line.refresh_stock(snapshot)
    }

    /// Removes a line by product ID.
    pub fn remove_line(&mut self, product_id: &str) -> FormResult<()> {
        debug!(product_id = %product_id, "stock-out remove_line");

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
        debug!("stock-out clear");
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

impl Default for StockOutDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
