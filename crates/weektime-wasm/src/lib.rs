//! WASM bindings for the access-window editor.
//!
//! Values cross the boundary as JSON strings in the wire shapes the console
//! already persists, so the JS side only needs `JSON.parse` / `JSON.stringify`.

use wasm_bindgen::prelude::*;
use weektime_engine::error::Result;
use weektime_engine::wire::{parse_ranges, parse_selections, to_json};
use weektime_engine::{
    builtin_templates, merge_time_range, normalize_time_ranges, split_time_range, week_cells,
};

/// `[{day, value}]` → `[{weekdays, start_time, end_time}]`.
#[wasm_bindgen(js_name = mergeTimeRange)]
pub fn merge_time_range_js(day_selections: &str) -> std::result::Result<String, JsError> {
    merge_json(day_selections).map_err(|e| JsError::new(&e.to_string()))
}

/// `[{weekdays, start_time, end_time}]` → `[{day, value}]`.
#[wasm_bindgen(js_name = splitTimeRange)]
pub fn split_time_range_js(merged_ranges: &str) -> std::result::Result<String, JsError> {
    split_json(merged_ranges).map_err(|e| JsError::new(&e.to_string()))
}

/// Canonical merged form of a possibly overlapping range list.
#[wasm_bindgen(js_name = normalizeTimeRange)]
pub fn normalize_time_range_js(merged_ranges: &str) -> std::result::Result<String, JsError> {
    normalize_json(merged_ranges).map_err(|e| JsError::new(&e.to_string()))
}

/// The 7 x 48 grid layout the editor renders.
#[wasm_bindgen(js_name = weekTimeData)]
pub fn week_time_data_js() -> std::result::Result<String, JsError> {
    to_json(&week_cells(), false).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen(js_name = builtinTemplates)]
pub fn builtin_templates_js() -> std::result::Result<String, JsError> {
    to_json(&builtin_templates(), false).map_err(|e| JsError::new(&e.to_string()))
}

fn merge_json(input: &str) -> Result<String> {
    to_json(&merge_time_range(&parse_selections(input)?), false)
}

fn split_json(input: &str) -> Result<String> {
    to_json(&split_time_range(&parse_ranges(input)?), false)
}

fn normalize_json(input: &str) -> Result<String> {
    to_json(&normalize_time_ranges(&parse_ranges(input)?), false)
}
