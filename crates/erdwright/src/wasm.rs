//! WebAssembly bindings for Erdwright
//!
//! Browser-facing wrappers. Schema models cross the boundary as JSON strings
//! in the same camelCase shape the serde derives produce. Failures become
//! JavaScript errors carrying the error message.

use wasm_bindgen::prelude::*;

use crate::plugins::er::{ErParser, NotationRenderer, SchemaModel, SAMPLE_DIAGRAM};
use crate::sql::{generate_script, Dialect};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn model_from_json(model_json: &str) -> Result<SchemaModel, JsValue> {
    serde_json::from_str(model_json).map_err(|e| to_js_error(format!("Invalid schema model: {}", e)))
}

fn dialect_from_str(dialect: &str) -> Result<Dialect, JsValue> {
    dialect.parse::<Dialect>().map_err(to_js_error)
}

/// Parse notation and return the schema model as JSON
#[wasm_bindgen]
pub fn parse_notation(input: &str) -> Result<String, JsValue> {
    let model = ErParser::new().parse_model(input);
    serde_json::to_string(&model).map_err(to_js_error)
}

/// Parse notation and return `{ model, skipped }` as JSON
///
/// `skipped` lists `{ line, text, reason }` for every ignored line.
#[wasm_bindgen]
pub fn parse_notation_report(input: &str) -> Result<String, JsValue> {
    let (model, skipped) = ErParser::new().parse_with_report(input);
    let skipped: Vec<_> = skipped
        .iter()
        .map(|s| {
            serde_json::json!({
                "line": s.line,
                "text": s.text,
                "reason": s.reason.to_string(),
            })
        })
        .collect();
    let report = serde_json::json!({ "model": model, "skipped": skipped });
    serde_json::to_string(&report).map_err(to_js_error)
}

/// Render a JSON schema model as notation
#[wasm_bindgen]
pub fn generate_notation(model_json: &str) -> Result<String, JsValue> {
    let model = model_from_json(model_json)?;
    Ok(NotationRenderer::new().render_model(&model))
}

/// Render a JSON schema model as a DDL script for `dialect`
#[wasm_bindgen]
pub fn generate_ddl(model_json: &str, dialect: &str) -> Result<String, JsValue> {
    let model = model_from_json(model_json)?;
    Ok(generate_script(&model, dialect_from_str(dialect)?))
}

/// Download file name for a dialect's script, e.g. `schema_mysql.sql`
#[wasm_bindgen]
pub fn script_file_name(dialect: &str) -> Result<String, JsValue> {
    Ok(dialect_from_str(dialect)?.script_file_name())
}

/// Advisory diagnostics for a JSON schema model, as a JSON array
#[wasm_bindgen]
pub fn diagnose(model_json: &str) -> Result<String, JsValue> {
    let model = model_from_json(model_json)?;
    serde_json::to_string(&model.diagnostics()).map_err(to_js_error)
}

/// The built-in sample diagram
#[wasm_bindgen]
pub fn sample_diagram() -> String {
    SAMPLE_DIAGRAM.to_string()
}
