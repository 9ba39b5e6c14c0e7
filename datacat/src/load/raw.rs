// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Raw metadata rows as supplied by an external parser

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::normalize::join_use_cases;

/// Coverage as it appears in a source: one cell (`2015-01-02 → 2024-12-31`)
/// or an explicit pair of bound strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDateRange {
    Pair(Option<String>, Option<String>),
    Text(String),
}

/// Unnormalized metadata for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    /// Position in the source, 1-based
    #[serde(skip)]
    pub line: usize,
    pub name: String,
    #[serde(default, alias = "rows", deserialize_with = "text_cell")]
    pub row_count: String,
    #[serde(default, deserialize_with = "text_cell")]
    pub size: String,
    #[serde(default)]
    pub date_range: Option<RawDateRange>,
    #[serde(default, deserialize_with = "text_cell")]
    pub ideal_use: String,
}

impl RawRow {
    pub fn new(line: usize, name: impl Into<String>) -> Self {
        Self {
            line,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn row_count(mut self, text: impl Into<String>) -> Self {
        self.row_count = text.into();
        self
    }

    pub fn size(mut self, text: impl Into<String>) -> Self {
        self.size = text.into();
        self
    }

    pub fn date_range(mut self, text: impl Into<String>) -> Self {
        self.date_range = Some(RawDateRange::Text(text.into()));
        self
    }

    pub fn date_pair(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.date_range = Some(RawDateRange::Pair(Some(start.into()), Some(end.into())));
        self
    }

    pub fn ideal_use(mut self, text: impl Into<String>) -> Self {
        self.ideal_use = text.into();
        self
    }
}

/// Accept a JSON string, number, null or list of strings as cell text
fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(String::new()),
        JsonValue::String(s) => Ok(s),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::String(s) => Ok(s),
                other => Err(de::Error::custom(format!(
                    "expected a list of strings, found {}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|tags| join_use_cases(tags.iter().map(String::as_str))),
        other => Err(de::Error::custom(format!(
            "expected text or number, found {}",
            other
        ))),
    }
}
