// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dataset metadata record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::date_range::DateRange;
use crate::error::{CatalogError, Result};

/// One catalog entry describing a named dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Unique dataset name
    pub name: String,
    /// Number of rows, if known
    pub row_count: Option<u64>,
    /// Size on disk in bytes, if known
    pub size_bytes: Option<u64>,
    /// Temporal coverage; `None` when the dataset has none
    pub date_range: Option<DateRange>,
    /// Intended analytical applications
    #[serde(default)]
    pub ideal_use: BTreeSet<String>,
}

impl DatasetRecord {
    /// Create a record with only a name; every other field is unknown
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            row_count: None,
            size_bytes: None,
            date_range: None,
            ideal_use: BTreeSet::new(),
        }
    }

    pub fn with_row_count(mut self, rows: u64) -> Self {
        self.row_count = Some(rows);
        self
    }

    pub fn with_size_bytes(mut self, bytes: u64) -> Self {
        self.size_bytes = Some(bytes);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_use_case(mut self, tag: impl Into<String>) -> Self {
        self.ideal_use.insert(tag.into());
        self
    }

    /// Whether the record carries this use-case tag exactly
    pub fn has_use_case(&self, tag: &str) -> bool {
        self.ideal_use.contains(tag)
    }

    /// Check record invariants before it enters the store
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::validation("dataset name must not be empty"));
        }
        if self.name.trim() != self.name {
            return Err(CatalogError::validation(format!(
                "dataset name '{}' has surrounding whitespace",
                self.name
            )));
        }
        if let Some(tag) = self.ideal_use.iter().find(|t| t.trim().is_empty()) {
            return Err(CatalogError::validation(format!(
                "dataset '{}' has a blank use-case tag '{}'",
                self.name, tag
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let record = DatasetRecord::new("phrasebank")
            .with_row_count(2_264)
            .with_size_bytes(700_000)
            .with_use_case("sentiment editing & classification");

        assert_eq!(record.row_count, Some(2_264));
        assert_eq!(record.size_bytes, Some(700_000));
        assert!(record.date_range.is_none());
        assert!(record.has_use_case("sentiment editing & classification"));
        assert!(!record.has_use_case("sentiment"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        assert!(matches!(
            DatasetRecord::new("").validate(),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            DatasetRecord::new("   ").validate(),
            Err(CatalogError::Validation(_))
        ));
        assert!(DatasetRecord::new(" ch").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_tag() {
        let record = DatasetRecord::new("ch").with_use_case(" ");
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_tag_order_irrelevant_for_equality() {
        let a = DatasetRecord::new("rns").with_use_case("x").with_use_case("y");
        let b = DatasetRecord::new("rns").with_use_case("y").with_use_case("x");
        assert_eq!(a, b);
    }
}
