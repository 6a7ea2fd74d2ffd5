//! WASM facade - the surface the web host sees
//!
//! Thin delegation around SessionCore. The player script arrives as a JS
//! function; JsScript adapts it to the ScriptRunner contract, and anything
//! it throws or malforms becomes a diagnostic rather than a crash.

use wasm_bindgen::prelude::*;

use super::{ScriptCache, ScriptReply, ScriptRunner, SessionCore, TickOutcome};
use crate::domain::cells::Cell;

fn outcome_code(outcome: TickOutcome) -> i32 {
    match outcome {
        TickOutcome::Continuing => 0,
        TickOutcome::Success => 1,
        TickOutcome::Failure => 2,
    }
}

#[wasm_bindgen]
pub struct Session {
    core: SessionCore,
}

#[wasm_bindgen]
impl Session {
    /// Start a session on a built-in level
    #[wasm_bindgen(constructor)]
    pub fn new(level: usize) -> Result<Session, JsValue> {
        SessionCore::builtin_level(level)
            .map(|core| Session { core })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Start a session on a level from a bundle JSON
    #[wasm_bindgen(js_name = fromBundleJson)]
    pub fn from_bundle_json(json: String, level: usize) -> Result<Session, JsValue> {
        SessionCore::from_bundle_json(&json, level)
            .map(|core| Session { core })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.core.width() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.core.height() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn tick_count(&self) -> u64 {
        self.core.tick_count()
    }

    #[wasm_bindgen(getter)]
    pub fn player_row(&self) -> u32 {
        self.core.position().row as u32
    }

    #[wasm_bindgen(getter)]
    pub fn player_col(&self) -> u32 {
        self.core.position().col as u32
    }

    /// Active gravity as its arrow token ("g↓" etc.)
    #[wasm_bindgen(getter)]
    pub fn gravity(&self) -> String {
        self.core.gravity().token().to_string()
    }

    /// 0 = continuing, 1 = success, 2 = failure
    #[wasm_bindgen(getter)]
    pub fn outcome(&self) -> i32 {
        outcome_code(self.core.outcome())
    }

    /// Advance one tick; `script` is the player behavior function
    /// `(view, cachedData) => ({ response, cachedData })`.
    /// Returns the tick outcome code.
    pub fn tick(&mut self, script: &js_sys::Function) -> Result<i32, JsValue> {
        let mut runner = JsScript {
            func: script.clone(),
        };
        self.core
            .tick(&mut runner)
            .map(outcome_code)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Full scene snapshot as a token matrix (JSON)
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&self.core.grid().to_tokens()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Fog-of-war scene snapshot as a token matrix (JSON)
    pub fn visible_scene_json(&self) -> String {
        serde_json::to_string(&self.core.masked_scene().to_tokens())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Current windowed player view as a token matrix (JSON)
    pub fn view_json(&self) -> String {
        let tokens: Vec<Vec<&'static str>> = self
            .core
            .player_view()
            .iter()
            .map(|row| row.iter().map(|c| c.token()).collect())
            .collect();
        serde_json::to_string(&tokens).unwrap_or_else(|_| "[]".to_string())
    }

    /// Visibility mask as a 0/1 matrix (JSON)
    pub fn visibility_json(&self) -> String {
        serde_json::to_string(&self.core.visibility_mask().to_rows())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Drain pending script diagnostics as a JSON string array
    pub fn take_diagnostics(&mut self) -> String {
        serde_json::to_string(&self.core.take_diagnostics()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get pointer to the cell-id buffer (for JS rendering)
    pub fn cells_ptr(&self) -> *const u8 {
        self.core.grid().cells_ptr()
    }

    /// Get cell-id buffer length
    pub fn cells_len(&self) -> usize {
        self.core.grid().cells_len()
    }
}

struct JsScript {
    func: js_sys::Function,
}

impl ScriptRunner for JsScript {
    fn invoke(&mut self, view: &[Vec<Cell>], cache: ScriptCache) -> Result<ScriptReply, String> {
        let view_json = serde_json::to_string(view).map_err(|e| e.to_string())?;
        let view_js = js_sys::JSON::parse(&view_json).map_err(describe_js_error)?;
        let cache_js = js_sys::JSON::parse(&cache.to_string()).map_err(describe_js_error)?;

        let ret = self
            .func
            .call2(&JsValue::NULL, &view_js, &cache_js)
            .map_err(describe_js_error)?;

        let response = js_sys::Reflect::get(&ret, &JsValue::from_str("response"))
            .map_err(describe_js_error)?
            .as_f64()
            .ok_or_else(|| "response is not a number".to_string())?;
        if response.fract() != 0.0 {
            return Err(format!("response {} is not an integer", response));
        }

        let cached = js_sys::Reflect::get(&ret, &JsValue::from_str("cachedData"))
            .map_err(describe_js_error)?;
        // JSON.stringify(undefined) yields no string; treat it as null.
        let cached_data = js_sys::JSON::stringify(&cached)
            .ok()
            .and_then(|s| s.as_string())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or(ScriptCache::Null);

        Ok(ScriptReply {
            response: response as i64,
            cached_data,
        })
    }
}

fn describe_js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| "script invocation failed".to_string())
}
