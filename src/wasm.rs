//! WebAssembly bindings for the ClassA pipeline.
//!
//! ## Usage (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { WasmClassAEngine, classify } from 'classa-entropy';
//!
//! await init();
//!
//! const rr = new Float64Array([0.81, 0.79, 0.83, 0.80, 0.78, 0.82, 0.84, 0.80, 0.79, 0.81, 0.83]);
//! const result = JSON.parse(classify(rr, '{"K": 4, "symbolization": "equal"}'));
//! console.log(`RAS = ${result.stats.ras}, H = ${result.entropy}`);
//! ```

use crate::config::ClassAConfig;
use crate::engine::ClassAEngine;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module (call once at startup)
#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
}

/// Reusable engine holding one configuration
#[wasm_bindgen]
pub struct WasmClassAEngine {
    engine: ClassAEngine,
}

#[wasm_bindgen]
impl WasmClassAEngine {
    /// Create an engine with default options
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            engine: ClassAEngine::new(),
        }
    }

    /// Create with options given as JSON
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(options_json: &str) -> Result<WasmClassAEngine, JsValue> {
        let config = ClassAConfig::from_json(options_json)?;
        Ok(Self {
            engine: ClassAEngine::with_config(config),
        })
    }

    /// Run the pipeline; returns the result as JSON
    pub fn classify(&self, signal: Vec<f64>) -> Result<String, JsValue> {
        let result = self.engine.classify(&signal)?;
        Ok(result.to_json()?)
    }

    /// Run once per scale; returns a JSON array of results or error strings
    #[wasm_bindgen(js_name = "classifyScales")]
    pub fn classify_scales(&self, signal: Vec<f64>, scales: Vec<u32>) -> Result<String, JsValue> {
        let scales: Vec<usize> = scales.into_iter().map(|s| s as usize).collect();
        let results: Vec<Result<_, String>> = self
            .engine
            .classify_scales(&signal, &scales)
            .into_iter()
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();

        serde_json::to_string(&results)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Current options as JSON
    #[wasm_bindgen(js_name = "getConfig")]
    pub fn get_config(&self) -> Result<String, JsValue> {
        Ok(self.engine.config().to_json()?)
    }
}

impl Default for WasmClassAEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot classification with options given as JSON
#[wasm_bindgen]
pub fn classify(signal: Vec<f64>, options_json: &str) -> Result<String, JsValue> {
    let config = ClassAConfig::from_json(options_json)?;
    let result = crate::engine::classify(&signal, &config)?;
    Ok(result.to_json()?)
}

/// Crate version
#[wasm_bindgen]
pub fn version() -> String {
    crate::VERSION.to_string()
}
