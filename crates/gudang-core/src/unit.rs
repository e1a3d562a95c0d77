//! # Unit Classification
//!
//! Recovers a [`UnitKind`] from a unit's free-text name and abbreviation.
//!
//! The backend's unit master has no structured kind field, so the kind is
//! detected by case-insensitive keyword matching. "Dus" is the localized
//! term for box and matches alongside "box".
//!
//! ## Matching Rules
//! ```text
//! name or abbreviation contains          classified as
//! ─────────────────────────────          ─────────────
//! "box" or "dus"                         Box
//! else "pack"                            Pack
//! else "piece" or "pcs"                  Piece
//! else                                   Unknown  (blocks calculation)
//! ```
//!
//! A name matching more than one keyword class (e.g. "Piece Box Combo")
//! classifies by the priority order above but is flagged ambiguous so the
//! form layer can log it for data-quality review. Classification never
//! guesses silently.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Unit, UnitKind};

/// Keywords that mark a box unit. "Dus" is the localized term.
const BOX_KEYWORDS: [&str; 2] = ["box", "dus"];

/// Keywords that mark a pack unit.
const PACK_KEYWORDS: [&str; 1] = ["pack"];

/// Keywords that mark a piece unit.
const PIECE_KEYWORDS: [&str; 2] = ["piece", "pcs"];

// =============================================================================
// Classification Result
// =============================================================================

/// The outcome of classifying a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Detected kind; `Unknown` when no keyword matched.
    pub kind: UnitKind,

    /// True when the text matched more than one keyword class. The kind is
    /// still usable (priority order decides), but the unit's master data
    /// deserves review.
    pub ambiguous: bool,
}

// =============================================================================
// Classifiers
// =============================================================================

/// Classifies a unit record by its name and abbreviation.
pub fn classify_unit(unit: &Unit) -> Classification {
    classify_name(&unit.name, &unit.abbreviation)
}

/// Classifies raw name/abbreviation text.
///
/// ## Example
/// ```rust
/// use gudang_core::unit::classify_name;
/// use gudang_core::types::UnitKind;
///
/// assert_eq!(classify_name("Dus Besar", "dus").kind, UnitKind::Box);
/// assert_eq!(classify_name("Lusin", "lsn").kind, UnitKind::Unknown);
/// ```
pub fn classify_name(name: &str, abbreviation: &str) -> Classification {
    let haystack = format!("{} {}", name, abbreviation).to_lowercase();

    let is_box = contains_any(&haystack, &BOX_KEYWORDS);
    let is_pack = contains_any(&haystack, &PACK_KEYWORDS);
    let is_piece = contains_any(&haystack, &PIECE_KEYWORDS);

    let kind = if is_box {
        UnitKind::Box
    } else if is_pack {
        UnitKind::Pack
    } else if is_piece {
        UnitKind::Piece
    } else {
        UnitKind::Unknown
    };

    let matches = [is_box, is_pack, is_piece].iter().filter(|m| **m).count();

    Classification {
        kind,
        ambiguous: matches > 1,
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, abbreviation: &str) -> Unit {
        Unit {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
        }
    }

    #[test]
    fn test_classify_plain_names() {
        assert_eq!(classify_unit(&unit("Piece", "pcs")).kind, UnitKind::Piece);
        assert_eq!(classify_unit(&unit("Pack", "pk")).kind, UnitKind::Pack);
        assert_eq!(classify_unit(&unit("Box", "bx")).kind, UnitKind::Box);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify_name("PIECE", "").kind, UnitKind::Piece);
        assert_eq!(classify_name("BoX", "").kind, UnitKind::Box);
    }

    #[test]
    fn test_dus_synonym_classifies_as_box() {
        // "Dus Besar" is a box, not unknown
        let c = classify_name("Dus Besar", "dus");
        assert_eq!(c.kind, UnitKind::Box);
        assert!(!c.ambiguous);
    }

    #[test]
    fn test_abbreviation_alone_is_enough() {
        assert_eq!(classify_name("Satuan", "pcs").kind, UnitKind::Piece);
    }

    #[test]
    fn test_unrecognized_is_unknown() {
        let c = classify_name("Lusin", "lsn");
        assert_eq!(c.kind, UnitKind::Unknown);
        assert!(!c.ambiguous);
    }

    #[test]
    fn test_ambiguous_name_is_flagged() {
        let c = classify_name("Piece Box Combo", "");
        // Priority order still decides the kind...
        assert_eq!(c.kind, UnitKind::Box);
        // ...but the ambiguity is surfaced, never swallowed
        assert!(c.ambiguous);
    }

    #[test]
    fn test_pack_beats_piece_in_priority() {
        let c = classify_name("Pack of Pieces", "");
        assert_eq!(c.kind, UnitKind::Pack);
        assert!(c.ambiguous);
    }
}
