//! # Domain Types
//!
//! Core domain types used throughout the Gudang dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │     Unit        │   │ PackagingStructure   │   │ StockSnapshot   │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id (UUID)      │   │  pieces_per_pack ≥ 1 │   │  pieces on hand │  │
//! │  │  name           │   │  packs_per_box  ≥ 1  │   │  fetched_at     │  │
//! │  │  abbreviation   │   │  (fixed per lot)     │   │  (stale copy)   │  │
//! │  └────────┬────────┘   └──────────┬───────────┘   └────────┬────────┘  │
//! │           │ classify              │                        │           │
//! │           ▼                       ▼                        ▼           │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │    UnitKind     │──►│   QuantityRequest    │──►│   LineTotals    │  │
//! │  │  Piece/Pack/    │   │  unit_kind, quantity │   │  total_pieces   │  │
//! │  │  Box/Unknown    │   │                      │   │  total_amount   │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these cross the wasm boundary to the dashboard frontend, so every
//! one carries serde camelCase renames and a ts-rs export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EngineError, EngineResult};
use crate::money::Money;

// =============================================================================
// Unit
// =============================================================================

/// A unit of measure, as supplied by the backend's unit master data.
///
/// Units are immutable reference data created by administrators and never
/// deleted while referenced. There is no structured "kind" field upstream;
/// the kind is recovered from the free-text name/abbreviation by
/// [`crate::unit::classify_unit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, e.g. "Piece", "Pack", "Dus Besar".
    pub name: String,

    /// Short form shown in table columns, e.g. "pcs".
    pub abbreviation: String,
}

// =============================================================================
// Unit Kind
// =============================================================================

/// The semantic kind of a unit, recovered from its free-text name.
///
/// `Unknown` is a first-class state, not a fallback: an unclassifiable unit
/// blocks calculation instead of silently acting as a multiplier of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// The smallest indivisible unit of a product (base unit).
    Piece,
    /// An intermediate packaging unit containing `pieces_per_pack` pieces.
    Pack,
    /// The largest packaging unit ("Dus"), containing `packs_per_box` packs.
    Box,
    /// Classification failed; calculation must not proceed.
    Unknown,
}

impl UnitKind {
    /// The number of base-unit pieces one unit of this kind represents
    /// under the given packaging structure.
    ///
    /// Returns `None` for `Unknown` - there is no honest multiplier to give.
    ///
    /// ## Errors
    /// `AmountOverflow` if `pieces_per_pack × packs_per_box` leaves i64.
    pub fn multiplier(&self, packaging: &PackagingStructure) -> EngineResult<Option<i64>> {
        match self {
            UnitKind::Piece => Ok(Some(1)),
            UnitKind::Pack => Ok(Some(packaging.pieces_per_pack)),
            UnitKind::Box => packaging
                .pieces_per_pack
                .checked_mul(packaging.packs_per_box)
                .ok_or(EngineError::AmountOverflow)
                .map(Some),
            UnitKind::Unknown => Ok(None),
        }
    }

    /// Whether classification produced a usable kind.
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, UnitKind::Unknown)
    }
}

// =============================================================================
// Packaging Structure
// =============================================================================

/// Per-product-lot packaging ratios, sourced from a stock-in item record.
///
/// Set once when the lot is received and not mutated afterward; different
/// receipts of the same product may carry different ratios, which is why
/// this travels with the line and not with the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackagingStructure {
    /// Base-unit pieces in one pack. Must be >= 1.
    pub pieces_per_pack: i64,

    /// Packs in one box. Must be >= 1.
    pub packs_per_box: i64,
}

impl PackagingStructure {
    /// Creates a packaging structure, rejecting unusable factors.
    pub fn new(pieces_per_pack: i64, packs_per_box: i64) -> EngineResult<Self> {
        let packaging = PackagingStructure {
            pieces_per_pack,
            packs_per_box,
        };
        packaging.validate()?;
        Ok(packaging)
    }

    /// Checks the factor invariants.
    ///
    /// Backend DTOs deserialize without passing through [`Self::new`], so
    /// every calculator re-checks this before touching the numbers.
    pub fn validate(&self) -> EngineResult<()> {
        if self.pieces_per_pack < 1 || self.packs_per_box < 1 {
            return Err(EngineError::InvalidPackagingStructure {
                pieces_per_pack: self.pieces_per_pack,
                packs_per_box: self.packs_per_box,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Quantity Request
// =============================================================================

/// An ephemeral user input: a quantity in a selected unit kind.
///
/// Quantities are integers end-to-end. Total pieces must come out whole,
/// and integer inputs make a fractional result unrepresentable rather than
/// merely guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRequest {
    /// Classified kind of the selected unit.
    pub unit_kind: UnitKind,

    /// Quantity entered by the user. Must be positive.
    pub quantity: i64,
}

// =============================================================================
// Stock Snapshot
// =============================================================================

/// The last-fetched available quantity for a product, in base-unit pieces.
///
/// The client shows this stale copy until the next successful load; it is
/// used for immediate feedback only. The authoritative check happens
/// server-side at submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    /// Available pieces at fetch time. May be negative if the backend's
    /// ledger is; a negative snapshot authorizes nothing.
    pub current_stock_pieces: i64,

    /// When the current-stock report was fetched.
    #[ts(as = "String")]
    pub fetched_at: DateTime<Utc>,
}

impl StockSnapshot {
    /// Creates a snapshot stamped with the current time.
    pub fn new(current_stock_pieces: i64) -> Self {
        StockSnapshot {
            current_stock_pieces,
            fetched_at: Utc::now(),
        }
    }
}

// =============================================================================
// Line Totals
// =============================================================================

/// The derived values every call site needs: total base-unit pieces and
/// the monetary line total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotals {
    /// Quantity expressed in base-unit pieces. Always non-negative.
    pub total_pieces: i64,

    /// `quantity × price_per_unit`, price per the *selected* unit.
    pub total_amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
