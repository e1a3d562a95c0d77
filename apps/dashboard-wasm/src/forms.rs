//! # Form Classes
//!
//! wasm-bindgen classes holding one draft each for the three entry pages.
//! The JS side constructs a form when the page mounts, feeds it line
//! requests as the user edits, and reads the serialized draft back for
//! rendering and submission.
//!
//! ## Page Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  const form = new StockOutForm();                                       │
//! │  form.add_line(JSON.stringify({ productId, productName, unit,           │
//! │                                 packaging, currentStockPieces,          │
//! │                                 quantity, pricePerUnit }));             │
//! │  form.update_quantity(productId, 3n);   // recomputes + revalidates    │
//! │  const draft = JSON.parse(form.to_json());                             │
//! │  // submit draft to the REST backend; it re-checks everything          │
//! │  form.clear();                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use gudang_core::{Money, PackagingStructure, StockSnapshot, Unit};
use gudang_forms::{DefectDraft, DraftLine, FormError, StockInDraft, StockOutDraft};

use crate::{form_err, request_err, to_json};

// =============================================================================
// Line Request DTO
// =============================================================================

/// What the frontend sends to add or rebuild a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineRequest {
    product_id: String,
    product_name: String,
    unit: Unit,
    packaging: PackagingStructure,
    /// Present on stock-out and defect lines; absent on stock-in receipts.
    #[serde(default)]
    current_stock_pieces: Option<i64>,
    quantity: i64,
    price_per_unit: i64,
}

impl LineRequest {
    fn parse(line_json: &str) -> Result<Self, JsValue> {
        serde_json::from_str(line_json)
            .map_err(|e| request_err(format!("invalid line JSON: {}", e)))
    }

    fn into_line(self) -> Result<DraftLine, FormError> {
        match self.current_stock_pieces {
            Some(pieces) => DraftLine::with_snapshot(
                self.product_id,
                self.product_name,
                self.unit,
                self.packaging,
                StockSnapshot::new(pieces),
                self.quantity,
                Money::from_rupiah(self.price_per_unit),
            ),
            None => DraftLine::new(
                self.product_id,
                self.product_name,
                self.unit,
                self.packaging,
                self.quantity,
                Money::from_rupiah(self.price_per_unit),
            ),
        }
    }
}

// =============================================================================
// Stock-In Form
// =============================================================================

/// Draft holder for the stock-in (goods receipt) page.
#[wasm_bindgen]
pub struct StockInForm {
    draft: StockInDraft,
}

#[wasm_bindgen]
impl StockInForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> StockInForm {
        StockInForm {
            draft: StockInDraft::new(),
        }
    }

    /// Sets the document-header supplier.
    pub fn set_supplier(&mut self, supplier_id: &str) {
        self.draft.supplier_id = Some(supplier_id.to_string());
    }

    /// Adds a receipt line (merges same product/unit/packaging rows).
    pub fn add_line(&mut self, line_json: &str) -> Result<(), JsValue> {
        let line = LineRequest::parse(line_json)?.into_line().map_err(form_err)?;
        self.draft.add_line(line).map_err(form_err)
    }

    /// Updates a line's quantity (0 removes the line).
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), JsValue> {
        self.draft
            .update_quantity(product_id, quantity)
            .map_err(form_err)
    }

    /// Removes a line.
    pub fn remove_line(&mut self, product_id: &str) -> Result<(), JsValue> {
        self.draft.remove_line(product_id).map_err(form_err)
    }

    /// Clears the draft for a fresh document.
    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// The whole draft as JSON, for rendering and submission.
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.draft)
    }

    /// Footer totals as JSON.
    pub fn totals(&self) -> Result<String, JsValue> {
        let totals = self.draft.totals().map_err(form_err)?;
        to_json(&totals)
    }
}

impl Default for StockInForm {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Stock-Out Form
// =============================================================================

/// Draft holder for the stock-out (goods issue) page.
///
/// Lines must carry `currentStockPieces`; every mutation revalidates the
/// quantity against the snapshot ceiling.
#[wasm_bindgen]
pub struct StockOutForm {
    draft: StockOutDraft,
}

#[wasm_bindgen]
impl StockOutForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> StockOutForm {
        StockOutForm {
            draft: StockOutDraft::new(),
        }
    }

    /// Adds an issue line validated against its snapshot.
    pub fn add_line(&mut self, line_json: &str) -> Result<(), JsValue> {
        let line = LineRequest::parse(line_json)?.into_line().map_err(form_err)?;
        self.draft.add_line(line).map_err(form_err)
    }

    /// Updates a line's quantity (0 removes the line).
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), JsValue> {
        self.draft
            .update_quantity(product_id, quantity)
            .map_err(form_err)
    }

    /// Replaces a line's snapshot after a fresh current-stock load.
    pub fn refresh_stock(
        &mut self,
        product_id: &str,
        current_stock_pieces: i64,
    ) -> Result<(), JsValue> {
        self.draft
            .refresh_stock(product_id, StockSnapshot::new(current_stock_pieces))
            .map_err(form_err)
    }

    /// Removes a line.
    pub fn remove_line(&mut self, product_id: &str) -> Result<(), JsValue> {
        self.draft.remove_line(product_id).map_err(form_err)
    }

    /// Clears the draft.
    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// The whole draft as JSON.
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.draft)
    }

    /// Footer totals as JSON.
    pub fn totals(&self) -> Result<String, JsValue> {
        let totals = self.draft.totals().map_err(form_err)?;
        to_json(&totals)
    }
}

impl Default for StockOutForm {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Defect Form
// =============================================================================

/// What the frontend sends to open a defect report.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DefectRequest {
    /// Originating stock-in item; its lot fixes the packaging.
    stock_in_item_id: String,
    reason: String,
    #[serde(flatten)]
    line: LineRequest,
}

/// Draft holder for the defect-reporting page.
#[wasm_bindgen]
pub struct DefectForm {
    draft: DefectDraft,
}

#[wasm_bindgen]
impl DefectForm {
    /// Builds a defect draft; fails if the line has no snapshot, the
    /// quantity exceeds the ceiling, or the reason is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(request_json: &str) -> Result<DefectForm, JsValue> {
        let request: DefectRequest = serde_json::from_str(request_json)
            .map_err(|e| request_err(format!("invalid defect JSON: {}", e)))?;

        let line = request.line.into_line().map_err(form_err)?;
        let draft =
            DefectDraft::new(request.stock_in_item_id, line, request.reason).map_err(form_err)?;

        Ok(DefectForm { draft })
    }

    /// Updates the defective quantity and revalidates.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), JsValue> {
        self.draft.set_quantity(quantity).map_err(form_err)
    }

    /// Updates the reason text.
    pub fn set_reason(&mut self, reason: &str) -> Result<(), JsValue> {
        self.draft.set_reason(reason).map_err(form_err)
    }

    /// Replaces the stock snapshot after a fresh load.
    pub fn refresh_stock(&mut self, current_stock_pieces: i64) -> Result<(), JsValue> {
        self.draft
            .refresh_stock(StockSnapshot::new(current_stock_pieces))
            .map_err(form_err)
    }

    /// Total defective quantity in base-unit pieces.
    pub fn total_pieces(&self) -> i64 {
        self.draft.total_pieces()
    }

    /// The whole draft as JSON, for rendering and submission.
    pub fn to_json(&self) -> Result<String, JsValue> {
        to_json(&self.draft)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// Only the pure DTO plumbing is testable natively; the wasm classes
// construct JsValue on their error paths.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_request_without_snapshot_builds_stock_in_line() {
        let json = r#"{
            "productId": "550e8400-e29b-41d4-a716-446655440000",
            "productName": "Indomie Goreng 85g",
            "unit": {"id": "9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d", "name": "Dus", "abbreviation": "dus"},
            "packaging": {"piecesPerPack": 12, "packsPerBox": 5},
            "quantity": 2,
            "pricePerUnit": 150000
        }"#;

        let request: LineRequest = serde_json::from_str(json).unwrap();
        let line = request.into_line().unwrap();

        assert_eq!(line.total_pieces, 120);
        assert_eq!(line.total_amount.rupiah(), 300_000);
        assert!(line.stock.is_none());
    }

    #[test]
    fn test_line_request_with_snapshot_enforces_ceiling() {
        let json = r#"{
            "productId": "550e8400-e29b-41d4-a716-446655440000",
            "productName": "Indomie Goreng 85g",
            "unit": {"id": "9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d", "name": "Dus", "abbreviation": "dus"},
            "packaging": {"piecesPerPack": 12, "packsPerBox": 5},
            "currentStockPieces": 50,
            "quantity": 1,
            "pricePerUnit": 150000
        }"#;

        let request: LineRequest = serde_json::from_str(json).unwrap();
        assert!(request.into_line().is_err());
    }

    #[test]
    fn test_defect_request_flattens_line_fields() {
        let json = r#"{
            "stockInItemId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "reason": "water damage",
            "productId": "550e8400-e29b-41d4-a716-446655440000",
            "productName": "Indomie Goreng 85g",
            "unit": {"id": "9f1b0c5e-4a1d-4e22-9d35-0f6a1f0b2c3d", "name": "Pack", "abbreviation": "pk"},
            "packaging": {"piecesPerPack": 12, "packsPerBox": 5},
            "currentStockPieces": 100,
            "quantity": 2,
            "pricePerUnit": 30000
        }"#;

        let request: DefectRequest = serde_json::from_str(json).unwrap();
        let line = request.line.into_line().unwrap();
        let draft = DefectDraft::new(request.stock_in_item_id, line, request.reason).unwrap();

        assert_eq!(draft.total_pieces(), 24);
    }
}
