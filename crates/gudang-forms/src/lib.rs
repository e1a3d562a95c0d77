//! # gudang-forms: Draft State for the Gudang Dashboard Forms
//!
//! Local, per-form drafts for the three pages that enter quantities:
//! stock-in, stock-out, and defect reporting. All conversion math comes
//! from `gudang-core`; this crate adds the stateful shell the pages hold
//! while the user edits.
//!
//! ## Module Organization
//! ```text
//! gudang_forms/
//! ├── lib.rs          ◄─── You are here (exports, tracing init)
//! ├── line.rs         ◄─── DraftLine: one row, frozen refs + derived values
//! ├── stock_in.rs     ◄─── StockInDraft: receipt document
//! ├── stock_out.rs    ◄─── StockOutDraft: issue document with ceilings
//! ├── defect.rs       ◄─── DefectDraft: single-line report, starts Pending
//! └── error.rs        ◄─── FormError layered over EngineError
//! ```
//!
//! ## Draft Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Draft Ownership Model                               │
//! │                                                                         │
//! │  Each open form instance owns ONE draft value. No locks, no sharing:    │
//! │  the browser event loop is the only executor, and two tabs are two      │
//! │  independent drafts. Conflicts resolve at the backend (last submission  │
//! │  wins), never on the client.                                            │
//! │                                                                         │
//! │  Page lifecycle:  fetch refs ──► build lines ──► edit (recompute on    │
//! │  every change) ──► submit to backend ──► clear()                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod defect;
pub mod error;
pub mod line;
pub mod stock_in;
pub mod stock_out;

pub use defect::DefectDraft;
pub use error::{FormError, FormResult};
pub use line::{DraftLine, DraftTotals};
pub use stock_in::StockInDraft;
pub use stock_out::StockOutDraft;

/// Initializes the tracing subscriber for native harness runs.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show per-mutation draft logging
/// - `RUST_LOG=gudang=trace` - Trace for gudang crates only
/// - Default: INFO level
///
/// The browser build does not call this; subscriber wiring there belongs
/// to the host page.
#[cfg(feature = "dev-tools")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gudang=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
