//! WebAssembly module for the Gudang inventory dashboard
//!
//! Provides client-side computation for:
//! - Unit classification (piece / pack / box / unknown)
//! - Total-pieces and line-total derivation
//! - Max-quantity ceilings against stock snapshots
//! - Defect status actions and transitions
//! - Form drafts for the stock-in, stock-out, and defect pages
//!
//! Everything here is a thin shim: JSON in, `gudang-core` / `gudang-forms`
//! in the middle, JSON (or a discriminated error payload) out. Errors are
//! never NaN, never clamped numbers - the frontend switches on
//! `payload.error`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use gudang_core::convert::line_totals;
use gudang_core::stock::{authorize, max_quantity};
use gudang_core::unit::classify_unit as classify;
use gudang_core::{
    DefectStatus, EngineError, Money, PackagingStructure, QuantityRequest, StockSnapshot, Unit,
};
use gudang_forms::FormError;

pub mod forms;

pub use forms::{DefectForm, StockInForm, StockOutForm};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"gudang-dashboard-wasm initialized".into());
}

// =============================================================================
// Error Payload
// =============================================================================

/// The discriminated error shape the frontend receives.
///
/// ```json
/// { "error": "InsufficientStockError",
///   "message": "insufficient stock: requested 3, maximum 1 ...",
///   "maxQuantity": 1 }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_quantity: Option<i64>,
}

impl ErrorPayload {
    fn from_engine(err: &EngineError) -> Self {
        let (code, max_quantity) = match err {
            EngineError::InvalidPackagingStructure { .. } => ("InvalidPackagingStructureError", None),
            EngineError::UnresolvedUnit => ("UnresolvedUnitError", None),
            EngineError::InsufficientStock { max_quantity, .. } => {
                ("InsufficientStockError", Some(*max_quantity))
            }
            EngineError::AmountOverflow => ("AmountOverflowError", None),
            EngineError::InvalidStatusTransition { .. } => ("InvalidStatusTransitionError", None),
            EngineError::Validation(_) => ("ValidationError", None),
        };
        ErrorPayload {
            error: code,
            message: err.to_string(),
            max_quantity,
        }
    }

    fn from_form(err: &FormError) -> Self {
        match err {
            FormError::Engine(e) => Self::from_engine(e),
            FormError::LineNotFound { .. } => ErrorPayload {
                error: "LineNotFoundError",
                message: err.to_string(),
                max_quantity: None,
            },
            FormError::DraftFull { .. } => ErrorPayload {
                error: "DraftFullError",
                message: err.to_string(),
                max_quantity: None,
            },
            FormError::MissingSnapshot => ErrorPayload {
                error: "MissingSnapshotError",
                message: err.to_string(),
                max_quantity: None,
            },
        }
    }

    fn invalid_request(message: impl Into<String>) -> Self {
        ErrorPayload {
            error: "InvalidRequestError",
            message: message.into(),
            max_quantity: None,
        }
    }

    fn into_js(self) -> JsValue {
        match serde_json::to_string(&self) {
            Ok(json) => JsValue::from_str(&json),
            Err(_) => JsValue::from_str(&self.message),
        }
    }
}

pub(crate) fn engine_err(err: EngineError) -> JsValue {
    ErrorPayload::from_engine(&err).into_js()
}

pub(crate) fn form_err(err: FormError) -> JsValue {
    ErrorPayload::from_form(&err).into_js()
}

pub(crate) fn request_err(err: impl std::fmt::Display) -> JsValue {
    ErrorPayload::invalid_request(err.to_string()).into_js()
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(request_err)
}

// =============================================================================
// Parsing Helpers
// =============================================================================

fn parse_unit(unit_json: &str) -> Result<Unit, JsValue> {
    serde_json::from_str(unit_json).map_err(|e| request_err(format!("invalid unit JSON: {}", e)))
}

fn parse_status(status: &str) -> Result<DefectStatus, JsValue> {
    serde_json::from_value(serde_json::Value::String(status.to_string()))
        .map_err(|_| request_err(format!("unknown defect status: {}", status)))
}

// =============================================================================
// Engine Exports
// =============================================================================

/// Classify a unit record; returns `{"kind": "...", "ambiguous": bool}`.
#[wasm_bindgen]
pub fn classify_unit(unit_json: &str) -> Result<String, JsValue> {
    let unit = parse_unit(unit_json)?;
    to_json(&classify(&unit))
}

/// Derive one line's totals from the selected unit, quantity, packaging,
/// and per-unit price; returns `{"totalPieces": n, "totalAmount": n}`.
#[wasm_bindgen]
pub fn compute_line(
    unit_json: &str,
    quantity: i64,
    pieces_per_pack: i64,
    packs_per_box: i64,
    price_per_unit: i64,
) -> Result<String, JsValue> {
    let unit = parse_unit(unit_json)?;
    let packaging = PackagingStructure {
        pieces_per_pack,
        packs_per_box,
    };
    let request = QuantityRequest {
        unit_kind: classify(&unit).kind,
        quantity,
    };

    let totals = line_totals(&request, &packaging, Money::from_rupiah(price_per_unit))
        .map_err(engine_err)?;
    to_json(&totals)
}

/// Maximum quantity enterable in the selected unit against the snapshot.
#[wasm_bindgen]
pub fn max_quantity_for(
    unit_json: &str,
    current_stock_pieces: i64,
    pieces_per_pack: i64,
    packs_per_box: i64,
) -> Result<i64, JsValue> {
    let unit = parse_unit(unit_json)?;
    let packaging = PackagingStructure {
        pieces_per_pack,
        packs_per_box,
    };
    let snapshot = StockSnapshot::new(current_stock_pieces);

    max_quantity(classify(&unit).kind, &snapshot, &packaging).map_err(engine_err)
}

/// Full stock-out authorization for one line; returns the total pieces
/// the submission will deduct, or the discriminated error payload.
#[wasm_bindgen]
pub fn authorize_stock_out(
    unit_json: &str,
    quantity: i64,
    current_stock_pieces: i64,
    pieces_per_pack: i64,
    packs_per_box: i64,
) -> Result<i64, JsValue> {
    let unit = parse_unit(unit_json)?;
    let packaging = PackagingStructure {
        pieces_per_pack,
        packs_per_box,
    };
    let snapshot = StockSnapshot::new(current_stock_pieces);

    authorize(classify(&unit).kind, quantity, &snapshot, &packaging).map_err(engine_err)
}

// =============================================================================
// Defect Status Exports
// =============================================================================

/// Actions the dashboard may enable for a defect status.
///
/// Returns an array of action names, empty once the status is terminal.
#[wasm_bindgen]
pub fn defect_available_actions(status: &str) -> Result<js_sys::Array, JsValue> {
    let status = parse_status(status)?;

    let actions = js_sys::Array::new();
    for action in status.available_actions() {
        let name = to_json(action)?;
        // to_json wraps in quotes; push the bare name
        actions.push(&JsValue::from_str(name.trim_matches('"')));
    }
    Ok(actions)
}

/// Attempts a defect status transition; returns the new status name.
#[wasm_bindgen]
pub fn defect_transition(from: &str, to: &str) -> Result<String, JsValue> {
    let from = parse_status(from)?;
    let to = parse_status(to)?;

    let next = from.transition(to).map_err(engine_err)?;
    Ok(to_json(&next)?.trim_matches('"').to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
// Success paths never construct a JsValue, so they run as plain native
// tests. Anything that materializes a JS error payload or a js_sys::Array
// lives in the wasm32-gated module below and runs under wasm-pack test.

#[cfg(test)]
mod tests {
    use super::*;

    const DUS: &str =
        r#"{"id":"9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d","name":"Dus","abbreviation":"dus"}"#;

    #[test]
    fn test_classify_unit_roundtrip() {
        let json = classify_unit(DUS).unwrap();
        assert_eq!(json, r#"{"kind":"box","ambiguous":false}"#);
    }

    #[test]
    fn test_compute_line_box() {
        let json = compute_line(DUS, 2, 12, 5, 150_000).unwrap();
        assert_eq!(json, r#"{"totalPieces":120,"totalAmount":300000}"#);
    }

    #[test]
    fn test_defect_transition_ok_path() {
        assert_eq!(defect_transition("pending", "returned").unwrap(), "returned");
    }

    #[test]
    fn test_insufficient_stock_payload_shape() {
        let payload = ErrorPayload::from_engine(&EngineError::InsufficientStock {
            requested: 1,
            max_quantity: 0,
        });
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"error\":\"InsufficientStockError\""));
        assert!(json.contains("\"maxQuantity\":0"));
    }

    #[test]
    fn test_unresolved_unit_payload_omits_max() {
        let payload = ErrorPayload::from_engine(&EngineError::UnresolvedUnit);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"error\":\"UnresolvedUnitError\""));
        assert!(!json.contains("maxQuantity"));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    const DUS: &str =
        r#"{"id":"9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d","name":"Dus","abbreviation":"dus"}"#;

    #[wasm_bindgen_test]
    fn insufficient_stock_error_crosses_the_boundary() {
        let err = authorize_stock_out(DUS, 1, 50, 12, 5).unwrap_err();
        let payload = err.as_string().unwrap();
        assert!(payload.contains("\"error\":\"InsufficientStockError\""));
        assert!(payload.contains("\"maxQuantity\":0"));
    }

    #[wasm_bindgen_test]
    fn defect_actions_array() {
        let actions = defect_available_actions("pending").unwrap();
        assert_eq!(actions.length(), 2);

        let none = defect_available_actions("returned").unwrap();
        assert_eq!(none.length(), 0);
    }

    #[wasm_bindgen_test]
    fn terminal_transition_is_rejected() {
        assert!(defect_transition("returned", "pending").is_err());
    }
}
