//! # Draft Line
//!
//! One product row in a form draft, with snapshot-frozen reference data
//! and derived values recomputed on every change.
//!
//! ## Recompute-on-Change
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Line Derivation                                │
//! │                                                                         │
//! │  Frozen at selection          Mutations            Derived (recomputed) │
//! │  ───────────────────          ─────────            ───────────────────  │
//! │  product id + name            set_quantity ──┐                          │
//! │  unit + classification        set_price ─────┤──►  total_pieces         │
//! │  packaging (per lot)          set_unit ──────┤     total_amount         │
//! │  stock snapshot               change_product ┘     max_quantity         │
//! │                                                                         │
//! │  Every mutation DISCARDS the previous derivation and recomputes from    │
//! │  scratch. A product or unit change must never leave a stale             │
//! │  cross-product value behind.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use gudang_core::convert::line_totals;
use gudang_core::stock::{max_quantity, validate_against_max};
use gudang_core::validation::{validate_product_name, validate_unit_name, validate_uuid};
use gudang_core::{
    classify_unit, Classification, EngineError, Money, PackagingStructure, QuantityRequest,
    StockSnapshot, Unit,
};

use crate::error::FormResult;

/// One line of a stock-in, stock-out, or defect draft.
///
/// ## Design Notes
/// - Reference data (product, unit, packaging, snapshot) is frozen at
///   selection time; a later backend change does not ripple into an open
///   draft.
/// - `stock` is `None` for stock-in receipts (recorded, not validated)
///   and `Some` for stock-out and defect lines (validated against the
///   snapshot ceiling).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    /// Product ID (UUID), frozen at selection.
    pub product_id: String,

    /// Product name at selection time (frozen).
    pub product_name: String,

    /// Selected unit record (frozen).
    pub unit: Unit,

    /// Classification of the selected unit.
    pub classification: Classification,

    /// Packaging ratios of this lot (frozen; per-receipt, not per-product).
    pub packaging: PackagingStructure,

    /// Stock snapshot for ceiling checks; `None` on stock-in lines.
    pub stock: Option<StockSnapshot>,

    /// Quantity entered, in the selected unit.
    pub quantity: i64,

    /// Price of one selected unit, entered directly.
    pub price_per_unit: Money,

    /// Derived: quantity in base-unit pieces.
    pub total_pieces: i64,

    /// Derived: `quantity × price_per_unit`.
    pub total_amount: Money,

    /// Derived: ceiling in the selected unit; `None` without a snapshot.
    pub max_quantity: Option<i64>,

    /// When this line was added to the draft.
    pub added_at: DateTime<Utc>,
}

impl DraftLine {
    /// Creates a stock-in line (no stock ceiling).
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit: Unit,
        packaging: PackagingStructure,
        quantity: i64,
        price_per_unit: Money,
    ) -> FormResult<Self> {
        Self::build(
            product_id.into(),
            product_name.into(),
            unit,
            packaging,
            None,
            quantity,
            price_per_unit,
        )
    }

    /// Creates a stock-out/defect line validated against a snapshot.
    pub fn with_snapshot(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit: Unit,
        packaging: PackagingStructure,
        snapshot: StockSnapshot,
        quantity: i64,
        price_per_unit: Money,
    ) -> FormResult<Self> {
        Self::build(
            product_id.into(),
            product_name.into(),
            unit,
            packaging,
            Some(snapshot),
            quantity,
            price_per_unit,
        )
    }

    fn build(
        product_id: String,
        product_name: String,
        unit: Unit,
        packaging: PackagingStructure,
        stock: Option<StockSnapshot>,
        quantity: i64,
        price_per_unit: Money,
    ) -> FormResult<Self> {
        validate_uuid(&product_id).map_err(EngineError::from)?;
        validate_product_name(&product_name).map_err(EngineError::from)?;
        validate_unit_name(&unit.name).map_err(EngineError::from)?;

        let classification = Self::classify(&unit);

        let mut line = DraftLine {
            product_id,
            product_name,
            unit,
            classification,
            packaging,
            stock,
            quantity,
            price_per_unit,
            total_pieces: 0,
            total_amount: Money::zero(),
            max_quantity: None,
            added_at: Utc::now(),
        };
        line.recompute()?;
        Ok(line)
    }

    /// Updates the quantity and recomputes.
    pub fn set_quantity(&mut self, quantity: i64) -> FormResult<()> {
        self.quantity = quantity;
        self.recompute()
    }

    /// Updates the per-unit price and recomputes.
    pub fn set_price(&mut self, price_per_unit: Money) -> FormResult<()> {
        self.price_per_unit = price_per_unit;
        self.recompute()
    }

    /// Switches the selected unit, reclassifies, and recomputes.
    pub fn set_unit(&mut self, unit: Unit) -> FormResult<()> {
        validate_unit_name(&unit.name).map_err(EngineError::from)?;
        self.classification = Self::classify(&unit);
        self.unit = unit;
        self.recompute()
    }

    /// Replaces the product selection entirely. The previous lot's
    /// packaging and snapshot go with it; nothing carries over.
    pub fn change_product(
        &mut self,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit: Unit,
        packaging: PackagingStructure,
        stock: Option<StockSnapshot>,
    ) -> FormResult<()> {
        let product_id = product_id.into();
        let product_name = product_name.into();
        validate_uuid(&product_id).map_err(EngineError::from)?;
        validate_product_name(&product_name).map_err(EngineError::from)?;
        validate_unit_name(&unit.name).map_err(EngineError::from)?;

        self.product_id = product_id;
        self.product_name = product_name;
        self.classification = Self::classify(&unit);
        self.unit = unit;
        self.packaging = packaging;
        self.stock = stock;
        self.recompute()
    }

    /// Replaces the stock snapshot after a fresh current-stock load.
    pub fn refresh_stock(&mut self, snapshot: StockSnapshot) -> FormResult<()> {
        self.stock = Some(snapshot);
        self.recompute()
    }

    /// Whether the line currently derives cleanly (used to gate submit).
    pub fn is_computable(&self) -> bool {
        self.classification.kind.is_resolved() && self.packaging.validate().is_ok()
    }

    fn classify(unit: &Unit) -> Classification {
        let classification = classify_unit(unit);
        if classification.ambiguous {
            warn!(
                unit_id = %unit.id,
                unit_name = %unit.name,
                kind = ?classification.kind,
                "unit name matches more than one kind; flag for master-data review"
            );
        }
        classification
    }

    /// Recomputes all derived values from scratch.
    ///
    /// The previous derivation is discarded first; on failure the line
    /// holds zeroed derived values and the caller blocks submission.
    fn recompute(&mut self) -> FormResult<()> {
        self.total_pieces = 0;
        self.total_amount = Money::zero();
        self.max_quantity = None;

        let request = QuantityRequest {
            unit_kind: self.classification.kind,
            quantity: self.quantity,
        };
        let totals = line_totals(&request, &self.packaging, self.price_per_unit)?;

        if let Some(snapshot) = &self.stock {
            let max = max_quantity(self.classification.kind, snapshot, &self.packaging)?;
            self.max_quantity = Some(max);
            validate_against_max(self.quantity, max)?;
        }

        self.total_pieces = totals.total_pieces;
        self.total_amount = totals.total_amount;
        Ok(())
    }
}

// =============================================================================
// Draft Totals
// =============================================================================

/// Summary totals over a draft's lines, for the footer row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTotals {
    pub line_count: usize,
    pub total_pieces: i64,
    pub total_amount: Money,
}

/// Sums derived values across lines with overflow surfaced, not wrapped.
pub(crate) fn totals_of(lines: &[DraftLine]) -> FormResult<DraftTotals> {
    let mut total_pieces: i64 = 0;
    let mut total_amount = Money::zero();

    for line in lines {
        total_pieces = total_pieces
            .checked_add(line.total_pieces)
            .ok_or(EngineError::AmountOverflow)?;
        total_amount = total_amount.checked_add(line.total_amount)?;
    }

    Ok(DraftTotals {
        line_count: lines.len(),
        total_pieces,
        total_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
