//! # Total-Pieces Calculator
//!
//! Converts a quantity in a selected unit into base-unit pieces, and
//! derives the monetary line total alongside it.
//!
//! Every call site (stock-in item entry, stock-out item entry, defect
//! creation) goes through these two functions. The stock-level comparison
//! itself lives in [`crate::stock`].
//!
//! ## Rule Table
//! ```text
//! unit kind   total pieces
//! ─────────   ─────────────────────────────────────
//! Piece       quantity
//! Pack        quantity × pieces_per_pack
//! Box         quantity × packs_per_box × pieces_per_pack
//! Unknown     Err(UnresolvedUnit) - caller blocks submission
//! ```
//!
//! No side effects; pure functions of their inputs.

use crate::error::{EngineError, EngineResult};
use crate::money::Money;
use crate::types::{LineTotals, PackagingStructure, QuantityRequest, UnitKind};
use crate::validation::{validate_price_rupiah, validate_quantity};

/// Converts a quantity in the given unit kind into base-unit pieces.
///
/// ## Check Order
/// 1. Packaging factors (`InvalidPackagingStructure` fires before any
///    arithmetic touches them)
/// 2. Quantity positivity/range
/// 3. Unit kind resolution (`UnresolvedUnit` for `Unknown`)
/// 4. Checked multiplication (`AmountOverflow` instead of wrapping)
///
/// ## Example
/// ```rust
/// use gudang_core::convert::total_pieces;
/// use gudang_core::types::{PackagingStructure, UnitKind};
///
/// let packaging = PackagingStructure::new(12, 5).unwrap();
/// assert_eq!(total_pieces(UnitKind::Box, 2, &packaging).unwrap(), 120);
/// ```
pub fn total_pieces(
    unit_kind: UnitKind,
    quantity: i64,
    packaging: &PackagingStructure,
) -> EngineResult<i64> {
    packaging.validate()?;
    validate_quantity(quantity)?;

    let multiplier = unit_kind
        .multiplier(packaging)?
        .ok_or(EngineError::UnresolvedUnit)?;

    quantity
        .checked_mul(multiplier)
        .ok_or(EngineError::AmountOverflow)
}

/// Computes the derived values of one form line: total pieces and the
/// monetary total.
///
/// `price_per_unit` is the price of the *selected* unit, entered directly
/// by the user (or defaulted from the product master). It is never derived
/// from a base-unit price via the packaging factors.
///
/// ## Example
/// ```rust
/// use gudang_core::convert::line_totals;
/// use gudang_core::money::Money;
/// use gudang_core::types::{PackagingStructure, QuantityRequest, UnitKind};
///
/// let packaging = PackagingStructure::new(10, 4).unwrap();
/// let request = QuantityRequest { unit_kind: UnitKind::Pack, quantity: 3 };
///
/// let totals = line_totals(&request, &packaging, Money::from_rupiah(5_000)).unwrap();
/// assert_eq!(totals.total_pieces, 30);
/// assert_eq!(totals.total_amount.rupiah(), 15_000);
/// ```
pub fn line_totals(
    request: &QuantityRequest,
    packaging: &PackagingStructure,
    price_per_unit: Money,
) -> EngineResult<LineTotals> {
    let pieces = total_pieces(request.unit_kind, request.quantity, packaging)?;

    validate_price_rupiah(price_per_unit.rupiah())?;
    let amount = price_per_unit.line_total(request.quantity)?;

    Ok(LineTotals {
        total_pieces: pieces,
        total_amount: amount,
    })
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

    #[test]
    fn test_piece_is_identity() {
        assert_eq!(total_pieces(UnitKind::Piece, 7, &packaging(12, 5)).unwrap(), 7);
        assert_eq!(total_pieces(UnitKind::Piece, 7, &packaging(99, 99)).unwrap(), 7);
    }

    #[test]
    fn test_pack_multiplies_by_pieces_per_pack() {
        assert_eq!(total_pieces(UnitKind::Pack, 3, &packaging(10, 4)).unwrap(), 30);
    }

    #[test]
    fn test_box_multiplies_by_both_factors() {
        // 2 boxes of 5 packs of 12 pieces = 120 pieces
        assert_eq!(total_pieces(UnitKind::Box, 2, &packaging(12, 5)).unwrap(), 120);
    }

    #[test]
    fn test_unknown_kind_blocks() {
        assert!(matches!(
            total_pieces(UnitKind::Unknown, 1, &packaging(12, 5)),
            Err(EngineError::UnresolvedUnit)
        ));
    }

    #[test]
    fn test_bad_packaging_fails_before_arithmetic() {
        let bad = PackagingStructure {
            pieces_per_pack: 0,
            packs_per_box: 5,
        };
        // Even a Piece request fails: the lot's packaging data is unusable
        assert!(matches!(
            total_pieces(UnitKind::Piece, 1, &bad),
            Err(EngineError::InvalidPackagingStructure { .. })
        ));
    }

    #[test]
    fn test_non_positive_quantity_is_rejected() {
        assert!(total_pieces(UnitKind::Piece, 0, &packaging(12, 5)).is_err());
        assert!(total_pieces(UnitKind::Piece, -3, &packaging(12, 5)).is_err());
    }

    #[test]
    fn test_line_totals_scenario() {
        // 3 packs of 10 pieces at Rp5.000 per pack
        let request = QuantityRequest {
            unit_kind: UnitKind::Pack,
            quantity: 3,
        };
        let totals = line_totals(&request, &packaging(10, 4), Money::from_rupiah(5_000)).unwrap();
        assert_eq!(totals.total_pieces, 30);
        assert_eq!(totals.total_amount.rupiah(), 15_000);
    }

    #[test]
    fn test_line_totals_rejects_negative_price() {
        let request = QuantityRequest {
            unit_kind: UnitKind::Piece,
            quantity: 1,
        };
        assert!(line_totals(&request, &packaging(12, 5), Money::from_rupiah(-1)).is_err());
    }

    proptest! {
        /// Box-to-pack-to-piece conversion is associative:
        /// q boxes = q × packs_per_box packs.
        #[test]
        fn prop_box_pack_associativity(
            q in 1i64..500,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            let via_box = total_pieces(UnitKind::Box, q, &p).unwrap();
            let via_pack = total_pieces(UnitKind::Pack, q * ppb, &p).unwrap();
            prop_assert_eq!(via_box, via_pack);
        }

        /// Piece conversion is the identity regardless of packaging.
        #[test]
        fn prop_piece_identity(
            q in 1i64..999_999,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            prop_assert_eq!(total_pieces(UnitKind::Piece, q, &p).unwrap(), q);
        }

        /// Total pieces is always positive for valid input.
        #[test]
        fn prop_total_pieces_positive(
            q in 1i64..500,
            ppp in 1i64..200,
            ppb in 1i64..200,
        ) {
            let p = packaging(ppp, ppb);
            for kind in [UnitKind::Piece, UnitKind::Pack, UnitKind::Box] {
                prop_assert!(total_pieces(kind, q, &p).unwrap() > 0);
            }
        }
    }
}
