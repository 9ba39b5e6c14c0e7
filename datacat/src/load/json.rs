// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! JSON raw-row source
//!
//! The document is an array of row objects. Each element is decoded on its
//! own, so one bad element does not sink the rest.

use serde_json::Value as JsonValue;

use super::raw::RawRow;
use super::report::RowFailure;
use super::RawSource;
use crate::error::{CatalogError, Result};

/// Parse a JSON array of raw rows; `line` is the 1-based element index
pub fn parse_json_rows(text: &str) -> Result<RawSource> {
    let elements: Vec<JsonValue> = serde_json::from_str(text)?;
    let mut source = RawSource::default();

    for (index, element) in elements.into_iter().enumerate() {
        let line = index + 1;
        let name = element
            .get("name")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        match serde_json::from_value::<RawRow>(element) {
            Ok(mut row) => {
                row.line = line;
                source.rows.push(row);
            }
            Err(e) => {
                let error = CatalogError::parse(line, e.to_string());
                source.failures.push(RowFailure::new(line, name, &error));
            }
        }
    }

    Ok(source)
}
