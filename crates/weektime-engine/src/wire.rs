//! JSON encoding of the wire shapes, shared by the CLI and WASM bindings.

use serde::Serialize;

use crate::error::Result;
use crate::range::{DaySelection, MergedRange};

/// Parse a JSON array of `{"day": 1, "value": ["09:00~09:30", ...]}`.
pub fn parse_selections(json: &str) -> Result<Vec<DaySelection>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a JSON array of `{"weekdays": [1], "start_time": "09:00", "end_time": "10:00"}`.
pub fn parse_ranges(json: &str) -> Result<Vec<MergedRange>> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
