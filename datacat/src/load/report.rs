// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Batch summary of a catalog load

use serde::Serialize;
use std::fmt;

use crate::error::CatalogError;

/// A source row that was not registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// Line (markdown) or element index (JSON), 1-based
    pub line: usize,
    /// Dataset name, when the row got far enough to have one
    pub name: Option<String>,
    /// Error kind, e.g. `parse` or `duplicate_name`
    pub kind: String,
    pub message: String,
}

impl RowFailure {
    pub fn new(line: usize, name: Option<String>, error: &CatalogError) -> Self {
        Self {
            line,
            name,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Outcome of loading one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Newly registered records
    pub registered: usize,
    /// Existing records overwritten under the replace policy
    pub replaced: usize,
    pub failures: Vec<RowFailure>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    pub fn total_rows(&self) -> usize {
        self.registered + self.replaced + self.skipped()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures of one kind
    pub fn failures_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a RowFailure> + 'a {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    pub fn summary(&self) -> String {
        format!(
            "registered {} dataset(s), replaced {}, skipped {} row(s)",
            self.registered,
            self.replaced,
            self.skipped()
        )
    }

    pub(crate) fn record_failure(&mut self, failure: RowFailure) {
        self.failures.push(failure);
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for failure in &self.failures {
            write!(f, "\n  line {}: {}", failure.line, failure.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_display() {
        let mut report = LoadReport {
            registered: 8,
            replaced: 1,
            failures: Vec::new(),
        };
        assert!(report.is_clean());

        report.record_failure(RowFailure::new(
            12,
            None,
            &CatalogError::parse(12, "expected 5 cells, found 1"),
        ));

        assert_eq!(report.skipped(), 1);
        assert_eq!(report.total_rows(), 10);
        assert_eq!(report.summary(), "registered 8 dataset(s), replaced 1, skipped 1 row(s)");
        assert_eq!(report.failures_of_kind("parse").count(), 1);
        assert!(report
            .to_string()
            .contains("line 12: Parse error on line 12: expected 5 cells, found 1"));
    }
}
