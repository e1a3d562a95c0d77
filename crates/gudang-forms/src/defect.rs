//! # Defect Draft
//!
//! The draft behind the defect-reporting page.
//!
//! A defect report references the stock-in item it originated from - that
//! lot fixes the packaging ratios - and is validated against the current
//! stock snapshot exactly like a stock-out line. A new report always
//! enters the status machine at `Pending`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use gudang_core::validation::validate_uuid;
use gudang_core::{DefectStatus, EngineError, Money, StockSnapshot, ValidationError};

use crate::error::{FormError, FormResult};
use crate::line::DraftLine;

/// Longest accepted defect reason text.
const MAX_REASON_LEN: usize = 500;

/// A defect report being assembled on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectDraft {
    /// The stock-in item this defect originates from (fixes the lot).
    pub stock_in_item_id: String,

    /// The defective product line, snapshot-validated.
    pub line: DraftLine,

    /// Free-text reason entered by the user.
    pub reason: String,

    /// Always `Pending` for a draft; transitions happen server-side after
    /// submission.
    pub status: DefectStatus,

    /// When the draft was created.
    pub created_at: DateTime<Utc>,
}

impl DefectDraft {
    /// Creates a defect draft from its originating stock-in item.
    ///
    /// ## Errors
    /// - `MissingSnapshot` if the line has no stock snapshot
    /// - Validation errors for a malformed item id or empty reason
    /// - Any conversion/ceiling failure already held by the line
    pub fn new(
        stock_in_item_id: impl Into<String>,
        line: DraftLine,
        reason: impl Into<String>,
    ) -> FormResult<Self> {
        let stock_in_item_id = stock_in_item_id.into();
        let reason = reason.into();

        debug!(stock_in_item_id = %stock_in_item_id, product_id = %line.product_id, "defect new");

        validate_uuid(&stock_in_item_id).map_err(EngineError::from)?;
        validate_reason(&reason).map_err(EngineError::from)?;

        if line.stock.is_none() {
            return Err(FormError::MissingSnapshot);
        }

        Ok(DefectDraft {
            stock_in_item_id,
            line,
            reason,
            status: DefectStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// Updates the defective quantity and revalidates against the snapshot.
    pub fn set_quantity(&mut self, quantity: i64) -> FormResult<()> {
        debug!(quantity, "defect set_quantity");
        self.line.set_quantity(quantity)
    }

    /// Updates the reason text.
    pub fn set_reason(&mut self, reason: impl Into<String>) -> FormResult<()> {
        let reason = reason.into();
        validate_reason(&reason).map_err(EngineError::from)?;
        self.reason = reason;
        Ok(())
    }

    /// Replaces the stock snapshot after a fresh current-stock load.
    pub fn refresh_stock(&mut self, snapshot: StockSnapshot) -> FormResult<()> {
        self.line.refresh_stock(snapshot)
    }

    /// Total defective quantity in base-unit pieces.
    pub fn total_pieces(&self) -> i64 {
        self.line.total_pieces
    }

    /// Monetary value of the defective goods.
    pub fn total_amount(&self) -> Money {
        self.line.total_amount
    }
}

fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    let reason = reason.trim();

    if reason.is_empty() {
        return Err(ValidationError::Required {
            field: "reason".to_string(),
        });
    }

    if reason.len() > MAX_REASON_LEN {
        return Err(ValidationError::TooLong {
            field: "reason".to_string(),
            max: MAX_REASON_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gudang_core::{PackagingStructure, Unit};

    const STOCK_IN_ITEM: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
    const PRODUCT_A: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn unit(name: &str) -> Unit {
        Unit {
            id: "9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d".to_string(),
            name: name.to_string(),
            abbreviation: name.to_lowercase(),
        }
    }

    fn line(quantity: i64, stock_pieces: i64) -> DraftLine {
        DraftLine::with_snapshot(
            PRODUCT_A,
            "Indomie Goreng 85g",
            unit("Pack"),
            PackagingStructure::new(12, 5).unwrap(),
            StockSnapshot::new(stock_pieces),
            quantity,
            Money::from_rupiah(30_000),
        )
        .unwrap()
    }

    #[test]
    fn test_new_defect_is_pending() {
        let draft = DefectDraft::new(STOCK_IN_ITEM, line(2, 100), "water damage").unwrap();

        assert_eq!(draft.status, DefectStatus::Pending);
        assert_eq!(draft.total_pieces(), 24);
        assert_eq!(draft.total_amount().rupiah(), 60_000);
    }

    #[test]
    fn test_empty_reason_is_rejected() {
        assert!(DefectDraft::new(STOCK_IN_ITEM, line(2, 100), "   ").is_err());
    }

    #[test]
    fn test_line_without_snapshot_is_rejected() {
        let no_snapshot = DraftLine::new(
            PRODUCT_A,
            "Indomie Goreng 85g",
            unit("Pack"),
            PackagingStructure::new(12, 5).unwrap(),
            1,
            Money::from_rupiah(30_000),
        )
        .unwrap();

        assert!(matches!(
            DefectDraft::new(STOCK_IN_ITEM, no_snapshot, "crushed box"),
            Err(FormError::MissingSnapshot)
        ));
    }

    #[test]
    fn test_set_quantity_revalidates_against_snapshot() {
        let mut draft = DefectDraft::new(STOCK_IN_ITEM, line(2, 100), "water damage").unwrap();

        // floor(100/12) = 8 packs is the ceiling
        assert!(draft.set_quantity(8).is_ok());
        assert!(draft.set_quantity(9).is_err());
    }

    #[test]
    fn test_malformed_item_id_is_rejected() {
        assert!(DefectDraft::new("not-a-uuid", line(1, 100), "torn packaging").is_err());
    }
}
