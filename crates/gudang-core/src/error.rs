//! # Error Types
//!
//! Engine-specific error types for gudang-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gudang-core errors (this file)                                        │
//! │  ├── EngineError      - Conversion / stock / status failures           │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  gudang-forms errors (separate crate)                                  │
//! │  └── FormError        - Draft-level failures (line not found, full)    │
//! │                                                                         │
//! │  Dashboard payload (apps/dashboard-wasm)                               │
//! │  └── ErrorPayload     - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → EngineError → FormError → ErrorPayload → UI   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Errors carry the values the UI needs (`max_quantity`, factors, etc.)
//! 3. Errors are enum variants, never String
//! 4. No failure is ever reported as NaN, a negative sentinel, or a
//!    silently clamped number - those are the historical bugs this engine
//!    exists to close out

use thiserror::Error;

use crate::defect::DefectStatus;

// =============================================================================
// Engine Error
// =============================================================================

/// Conversion engine errors.
///
/// These errors represent calculation failures the caller must surface;
/// every one of them blocks form submission until the user corrects input
/// or the backend supplies usable reference data.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Packaging factors are unusable.
    ///
    /// ## When This Occurs
    /// - `pieces_per_pack` or `packs_per_box` is zero or negative
    /// - A stock-in item record arrived with corrupt packaging data
    ///
    /// Calculation must not proceed; the form shows a corrective message
    /// instead of guessing a multiplier.
    #[error(
        "invalid packaging structure: piecesPerPack={pieces_per_pack}, packsPerBox={packs_per_box} (both must be >= 1)"
    )]
    InvalidPackagingStructure {
        pieces_per_pack: i64,
        packs_per_box: i64,
    },

    /// The selected unit could not be classified as piece, pack, or box.
    ///
    /// ## When This Occurs
    /// - Unit master data uses a name/abbreviation with no recognized
    ///   keyword ("box", "dus", "pack", "piece", "pcs")
    ///
    /// Never defaulted to a multiplier of 1. An unrecognized unit with
    /// packaging data implying otherwise would corrupt the stock ledger.
    #[error("unit could not be resolved to piece, pack, or box")]
    UnresolvedUnit,

    /// Requested quantity exceeds what the stock snapshot allows.
    ///
    /// ## User Workflow
    /// ```text
    /// Stock-out form, unit "Dus" (12 x 5 = 60 pieces)
    ///      │
    ///      ▼
    /// Snapshot: 50 pieces on hand → max 0 boxes
    ///      │
    ///      ▼
    /// InsufficientStock { requested: 1, max_quantity: 0 }
    ///      │
    ///      ▼
    /// UI shows: "Only 0 Dus available"
    /// ```
    #[error("insufficient stock: requested {requested}, maximum {max_quantity} in the selected unit")]
    InsufficientStock { requested: i64, max_quantity: i64 },

    /// Checked arithmetic overflowed i64.
    ///
    /// Surfaced instead of wrapping or clamping; a wrapped total would
    /// pass the stock ceiling check with a garbage value.
    #[error("quantity arithmetic overflowed")]
    AmountOverflow,

    /// Defect status machine rejected a transition.
    ///
    /// Only `pending` may move, and only to a terminal state. The server
    /// enforces the same rule; this variant is what lets the client
    /// disable action buttons with an honest reason.
    #[error("defect status cannot change from {from:?} to {to:?}")]
    InvalidStatusTransition { from: DefectStatus, to: DefectStatus },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// These occur when user input doesn't meet requirements.
/// Used for early validation before conversion logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
