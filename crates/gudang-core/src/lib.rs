//! # gudang-core: Pure Conversion Engine for the Gudang Dashboard
//!
//! This crate is the **heart** of the Gudang dashboard. It contains the
//! quantity-conversion and stock-validation logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gudang Dashboard Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard Frontend (browser)                 │   │
//! │  │   Stock-In Form ──► Stock-Out Form ──► Defect Form ──► Reports  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ wasm-bindgen                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/dashboard-wasm                          │   │
//! │  │    classify_unit, compute_line, max_quantity, ...               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gudang-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   unit    │  │  convert  │  │   stock   │  │  defect   │   │   │
//! │  │   │ classify  │  │  pieces   │  │  ceiling  │  │  status   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO DOM • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        REST Backend (external collaborator, authoritative)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Unit, PackagingStructure, StockSnapshot, ...)
//! - [`unit`] - Keyword classification of free-text unit names
//! - [`convert`] - Total-pieces and line-total calculation
//! - [`stock`] - Max-quantity ceilings and stock validation
//! - [`money`] - Whole-Rupiah integer money (no floating point!)
//! - [`defect`] - Defect status state machine
//! - [`validation`] - Field-level input validation
//! - [`error`] - Engine error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input,
//!    same output; callers recompute on every input change instead of
//!    patching derived values
//! 2. **No I/O**: network, storage, and DOM access are FORBIDDEN here;
//!    the engine only consumes values already fetched into local state
//! 3. **Integer Arithmetic**: quantities and Rupiah amounts are i64;
//!    overflow is a typed error, never a wrap or a clamp
//! 4. **Explicit Errors**: an unclassifiable unit or corrupt packaging
//!    blocks calculation - there is no silent multiplier-of-1 fallback
//!
//! ## Example Usage
//!
//! ```rust
//! use gudang_core::convert::line_totals;
//! use gudang_core::money::Money;
//! use gudang_core::types::{PackagingStructure, QuantityRequest, UnitKind};
//! use gudang_core::unit::classify_name;
//!
//! // Classify the unit the user selected
//! let kind = classify_name("Dus", "dus").kind;
//! assert_eq!(kind, UnitKind::Box);
//!
//! // 2 boxes, 12 pieces per pack, 5 packs per box, Rp150.000 per box
//! let packaging = PackagingStructure::new(12, 5).unwrap();
//! let request = QuantityRequest { unit_kind: kind, quantity: 2 };
//! let totals = line_totals(&request, &packaging, Money::from_rupiah(150_000)).unwrap();
//!
//! assert_eq!(totals.total_pieces, 120);
//! assert_eq!(totals.total_amount.rupiah(), 300_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod convert;
pub mod defect;
pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod unit;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use gudang_core::Money` instead of
// `use gudang_core::money::Money`

pub use defect::{DefectAction, DefectStatus};
pub use error::{EngineError, EngineResult, ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;
pub use unit::{classify_name, classify_unit, Classification};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single form draft
///
/// ## Business Reason
/// Keeps a stock-in/stock-out document reviewable and bounds the payload
/// the backend accepts in one submission.
pub const MAX_DRAFT_LINES: usize = 100;

/// Maximum quantity enterable in one line, in the selected unit
///
/// ## Business Reason
/// Guards against keyboard-repeat over-entry (e.g. 10000000 instead of
/// 1000). Warehouse receipts are counted in pieces, so the cap is well
/// above any real document line.
pub const MAX_REQUEST_QUANTITY: i64 = 999_999;
