//! # Max-Quantity / Stock Validator
//!
//! Computes the maximum quantity a user may enter in the selected unit
//! given a stock snapshot, and validates a requested quantity against it.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stock-out / defect form                                                │
//! │                                                                         │
//! │  User picks unit "Dus"          Snapshot: 100 pieces on hand            │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  max_quantity(Box, snapshot, 12×5) ──► floor(100 / 60) = 1             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI caps the quantity field at 1; submission of 2 is rejected           │
//! │  with InsufficientStock { max_quantity: 1 }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This check is advisory: the snapshot can be stale by submission time and
//! the backend performs the authoritative check. The client check exists
//! purely for immediate feedback and is not a security boundary.

use crate::convert::total_pieces;
use crate::error::{EngineError, EngineResult};
use crate::types::{PackagingStructure, StockSnapshot, UnitKind};

/// Maximum quantity enterable in the given unit kind against a snapshot.
///
/// ## Rules
/// - Piece → `current_stock_pieces`
/// - Pack → `floor(current_stock_pieces / pieces_per_pack)`
/// - Box → `floor(current_stock_pieces / (pieces_per_pack × packs_per_box))`
/// - Unknown → `0` (blocks any submission until the unit is resolved)
///
/// Negative snapshots clamp to 0: a snapshot can deny stock, never grant
/// stock the ledger doesn't show.
pub fn max_quantity(
    unit_kind: UnitKind,
    snapshot: &StockSnapshot,
    packaging: &PackagingStructure,
) -> EngineResult<i64> {
    packaging.validate()?;

    let stock = snapshot.current_stock_pieces.max(0);

    let max = match unit_kind.multiplier(packaging)? {
        Some(multiplier) => stock / multiplier,
        None => 0,
    };

    Ok(max)
}

/// Validates a requested quantity against a computed maximum.
///
/// Passes iff `0 < requested <= max`. The failure carries the maximum so
/// the UI can show "only N available in this unit".
pub fn validate_against_max(requested: i64, max: i64) -> EngineResult<()> {
    if requested > 0 && requested <= max {
        Ok(())
    } else {
        Err(EngineError::InsufficientStock {
            requested,
            max_quantity: max,
        })
    }
}

/// Full stock-out authorization for one line: converts the request to
/// pieces, computes the ceiling, validates, and returns the total pieces
/// the submission will deduct.
///
/// ## Example
/// ```rust
/// use gudang_core::stock::authorize;
/// use gudang_core::types::{PackagingStructure, StockSnapshot, UnitKind};
///
/// let packaging = PackagingStructure::new(12, 5).unwrap();
/// let snapshot = StockSnapshot::new(120);
///
/// assert_eq!(authorize(UnitKind::Box, 2, &snapshot, &packaging).unwrap(), 120);
/// assert!(authorize(UnitKind::Box, 3, &snapshot, &packaging).is_err());
/// ```
pub fn authorize(
    unit_kind: UnitKind,
    requested: i64,
    snapshot: &StockSnapshot,
    packaging: &PackagingStructure,
) -> EngineResult<i64> {
    // UnresolvedUnit surfaces here for Unknown kinds, before the ceiling
    // check can mask it as a plain InsufficientStock
    let pieces = total_pieces(unit_kind, requested, packaging)?;

    let max = max_quantity(unit_kind, snapshot, packaging)?;
    validate_against_max(requested, max)?;

    Ok(pieces)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn packaging(ppp: i64, ppb: i64) -> PackagingStructure {
        PackagingStructure::new(ppp, ppb).unwrap()
    }

    fn snapshot(pieces: i64) -> StockSnapshot {
        StockSnapshot::new(pieces)
    }

    #[test]
    fn test_max_quantity_per_kind() {
        let p = packaging(12, 5);
        let s = snapshot(100);

        assert_eq!(max_quantity(UnitKind::Piece, &s, &p).unwrap(), 100);
        assert_eq!(max_quantity(UnitKind::Pack, &s, &p).unwrap(), 8); // floor(100/12)
        assert_eq!(max_quantity(UnitKind::Box, &s, &p).unwrap(), 1); // floor(100/60)
        assert_eq!(max_quantity(UnitKind::Unknown, &s, &p).unwrap(), 0);
    }

    #[test]
    fn test_max_quantity_negative_snapshot_clamps_to_zero() {
        let p = packaging(12, 5);
        assert_eq!(max_quantity(UnitKind::Piece, &snapshot(-40), &p).unwrap(), 0);
    }

    #[test]
    fn test_max_quantity_rejects_bad_packaging() {
        let bad = PackagingStructure {
            pieces_per_pack: -2,
            packs_per_box: 5,
        };
        assert!(matches!(
            max_quantity(UnitKind::Pack, &snapshot(100), &bad),
            Err(EngineError::InvalidPackagingStructure { .. })
        ));
    }

    #[test]
    fn test_validate_against_max() {
        assert!(validate_against_max(1, 5).is_ok());
        assert!(validate_against_max(5, 5).is_ok());

        assert!(matches!(
            validate_against_max(6, 5),
            Err(EngineError::InsufficientStock { requested: 6, max_quantity: 5 })
        ));
        assert!(validate_against_max(0, 5).is_err());
        assert!(validate_against_max(-1, 5).is_err());
    }

    #[test]
    fn test_authorize_box_against_tight_stock() {
        // 50 pieces on hand cannot cover one 60-piece box
        let p = packaging(12, 5);
        let result = authorize(UnitKind::Box, 1, &snapshot(50), &p);
        assert!(matches!(
            result,
            Err(EngineError::InsufficientStock { max_quantity: 0, .. })
        ));
    }

    #[test]
    fn test_authorize_box_exactly_covered() {
        // 120 pieces covers exactly 2 boxes of 60
        let p = packaging(12, 5);
        assert_eq!(authorize(UnitKind::Box, 2, &snapshot(120), &p).unwrap(), 120);
    }

    #[test]
    fn test_authorize_unknown_unit_is_unresolved_not_insufficient() {
        let p = packaging(12, 5);
        assert!(matches!(
            authorize(UnitKind::Unknown, 1, &snapshot(1_000), &p),
            Err(EngineError::UnresolvedUnit)
        ));
    }

    proptest! {
        /// The ceiling never overestimates stock:
        /// max_quantity × multiplier <= current stock, always.
        #[test]
        fn prop_max_quantity_never_overestimates(
            stock in 0i64..1_000_000,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            let s = snapshot(stock);
            for kind in [UnitKind::Piece, UnitKind::Pack, UnitKind::Box] {
                let max = max_quantity(kind, &s, &p).unwrap();
                let multiplier = kind.multiplier(&p).unwrap().unwrap();
                prop_assert!(max * multiplier <= stock);
            }
        }

        /// validate(q, max) passes iff total_pieces(q) <= stock.
        #[test]
        fn prop_validate_iff_pieces_fit(
            q in 1i64..2_000,
            stock in 0i64..1_000_000,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            let s = snapshot(stock);
            for kind in [UnitKind::Piece, UnitKind::Pack, UnitKind::Box] {
                let max = max_quantity(kind, &s, &p).unwrap();
                let fits = total_pieces(kind, q, &p).unwrap() <= stock;
                prop_assert_eq!(validate_against_max(q, max).is_ok(), fits);
            }
        }

        /// Round-trip through box units then back down never inflates the
        /// piece count the snapshot can cover.
        #[test]
        fn prop_floor_round_trip_never_inflates(
            stock in 0i64..1_000_000,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            let s = snapshot(stock);

            let max_boxes = max_quantity(UnitKind::Box, &s, &p).unwrap();
            if max_boxes > 0 {
                let pieces = total_pieces(UnitKind::Box, max_boxes, &p).unwrap();
                prop_assert!(pieces <= stock);

                // Re-derive the equivalent pack quantity from those pieces
                let packs = pieces / ppp;
                let pieces_via_packs = total_pieces(UnitKind::Pack, packs, &p).unwrap();
                prop_assert!(pieces_via_packs <= stock);
            }
        }
    }
}
