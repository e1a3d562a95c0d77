//! # Form Error Type
//!
//! Draft-level errors layered over the engine's error taxonomy.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Error Flow in the Dashboard                            │
//! │                                                                         │
//! │  Engine failure? ── EngineError::InsufficientStock ──┐                  │
//! │                                                      │                  │
//! │  Draft failure? ─── FormError::LineNotFound ─────── FormError ──►       │
//! │                                                      │                  │
//! │                                   apps/dashboard-wasm serializes        │
//! │                                   into the frontend's error payload     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use gudang_core::EngineError;

/// Errors from draft manipulation.
///
/// Engine errors pass through transparently so the frontend sees the
/// original discriminant (`InsufficientStock` carrying its max, etc.).
#[derive(Debug, Error)]
pub enum FormError {
    /// A conversion/stock/status failure from gudang-core.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The referenced line is not in the draft.
    #[error("line for product {product_id} not found in draft")]
    LineNotFound { product_id: String },

    /// The draft is at its line capacity.
    #[error("draft cannot have more than {max} lines")]
    DraftFull { max: usize },

    /// A stock-out or defect line was built without a stock snapshot.
    #[error("stock-out and defect lines require a stock snapshot")]
    MissingSnapshot,
}

/// Convenience type alias for Results with FormError.
pub type FormResult<T> = Result<T, FormError>;
