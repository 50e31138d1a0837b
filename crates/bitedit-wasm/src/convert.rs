use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Options accepted by `WasmProgram::apply_with_options`, e.g. `{"start": 8, "end": 64}`.
#[derive(Debug, Deserialize, Default)]
pub struct OptionsDef {
    #[serde(default)]
    pub start: usize,
    /// 0 or absent means the end of the data.
    #[serde(default)]
    pub end: usize,
}

impl From<OptionsDef> for bitedit::EditOptions {
    fn from(value: OptionsDef) -> Self {
        let mut options = bitedit::EditOptions::new();
        options.set_start(value.start).set_end(value.end);
        options
    }
}

pub fn error_to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
