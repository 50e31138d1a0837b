//! WASM bindings for the `bitedit` bit stream editor.
//!
//! Compile an edit program once from JavaScript, then apply it to as many
//! `Uint8Array`s as needed:
//!
//! ```text
//! // Pseudo TypeScript example
//! //
//! // const program = new WasmProgram("s16t8");
//! // const out = program.apply(bytes, 0, 0);           // whole input
//! // const window = program.apply_with_options(bytes, JSON.stringify({ start: 8, end: 64 }));
//! // console.log(program.describe());                  // decoded commands
//! ```
//!
//! Errors are returned as `JsValue` strings holding the error message.

mod convert;

use bitedit::{EditOptions, Program, serde::ProgramDef};
use wasm_bindgen::prelude::*;

/// A compiled edit program usable from JavaScript.
#[wasm_bindgen]
pub struct WasmProgram {
    program: Program,
}

#[wasm_bindgen]
impl WasmProgram {
    /// Compiles `program_text`, e.g. `"[vn]8"`.
    #[wasm_bindgen(constructor)]
    pub fn new(program_text: &str) -> Result<WasmProgram, JsValue> {
        let program = Program::compile(program_text).map_err(convert::error_to_js)?;
        Ok(WasmProgram { program })
    }

    /// Runs the program over `data` within `[start, end)` bits.
    /// `end == 0` means the end of the data.
    pub fn apply(&self, data: &[u8], start: usize, end: usize) -> Result<Vec<u8>, JsValue> {
        let mut options = EditOptions::new();
        options.set_start(start).set_end(end);
        self.program.apply(data, &options).map_err(convert::error_to_js)
    }

    /// Like [`apply`](WasmProgram::apply), with the range given as JSON,
    /// e.g. `{"start": 8, "end": 64}`.
    pub fn apply_with_options(&self, data: &[u8], options_json: &str) -> Result<Vec<u8>, JsValue> {
        let def: convert::OptionsDef =
            serde_json::from_str(options_json).map_err(convert::error_to_js)?;
        self.program.apply(data, &def.into()).map_err(convert::error_to_js)
    }

    /// The decoded commands as a JS object (see `bitedit::serde::ProgramDef`).
    pub fn describe(&self) -> Result<JsValue, JsValue> {
        let def = ProgramDef::from(&self.program);
        serde_wasm_bindgen::to_value(&def).map_err(convert::error_to_js)
    }

    /// Canonical program text.
    #[wasm_bindgen(js_name = toString)]
    pub fn to_js_string(&self) -> String {
        self.program.to_string()
    }
}
