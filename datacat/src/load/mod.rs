// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog loading
//!
//! Raw metadata rows come from an external source (a markdown overview
//! table or a JSON array), are normalized into records and registered one
//! by one. A bad row is recorded in the `LoadReport` and loading moves on to
//! the next row.

pub mod json;
pub mod markdown;
pub mod normalize;
pub mod raw;
pub mod report;

pub use json::parse_json_rows;
pub use markdown::parse_markdown_table;
pub use normalize::normalize_row;
pub use raw::{RawDateRange, RawRow};
pub use report::{LoadReport, RowFailure};

use log::{debug, info, warn};
use std::path::Path;

use crate::catalog::CatalogStore;
use crate::config::{CatalogConfig, DuplicatePolicy, SizeUnit};
use crate::error::{CatalogError, Result};

/// Rows extracted from one source, plus the lines that could not be read
#[derive(Debug, Clone, Default)]
pub struct RawSource {
    pub rows: Vec<RawRow>,
    pub failures: Vec<RowFailure>,
    /// Size unit declared by the source itself, overriding the configured one
    pub size_unit: Option<SizeUnit>,
}

/// Normalize and register rows in order, using the configured size unit
pub fn load_rows<I>(store: &CatalogStore, rows: I, config: &CatalogConfig) -> LoadReport
where
    I: IntoIterator<Item = RawRow>,
{
    let mut report = LoadReport::default();
    register_rows(store, rows, config.size_unit, config, &mut report);
    finish(&report);
    report
}

/// Load an already parsed source, keeping its read failures in the report
pub fn load_source(store: &CatalogStore, source: RawSource, config: &CatalogConfig) -> LoadReport {
    let mut report = LoadReport::default();
    for failure in source.failures {
        report.record_failure(failure);
    }

    let size_unit = source.size_unit.unwrap_or(config.size_unit);
    register_rows(store, source.rows, size_unit, config, &mut report);

    report.failures.sort_by_key(|f| f.line);
    finish(&report);
    report
}

/// Load a markdown overview table from text
pub fn load_markdown_str(store: &CatalogStore, text: &str, config: &CatalogConfig) -> Result<LoadReport> {
    Ok(load_source(store, parse_markdown_table(text)?, config))
}

/// Load a markdown overview table from a file
pub fn load_markdown_file(
    store: &CatalogStore,
    path: impl AsRef<Path>,
    config: &CatalogConfig,
) -> Result<LoadReport> {
    let path = path.as_ref();
    info!("Loading catalog from markdown table {:?}", path);
    let text = std::fs::read_to_string(path)?;
    load_markdown_str(store, &text, config)
}

/// Load a JSON array of raw rows from a file
pub fn load_json_file(
    store: &CatalogStore,
    path: impl AsRef<Path>,
    config: &CatalogConfig,
) -> Result<LoadReport> {
    let path = path.as_ref();
    info!("Loading catalog from JSON rows {:?}", path);
    let text = std::fs::read_to_string(path)?;
    Ok(load_source(store, parse_json_rows(&text)?, config))
}

fn register_rows<I>(
    store: &CatalogStore,
    rows: I,
    size_unit: SizeUnit,
    config: &CatalogConfig,
    report: &mut LoadReport,
) where
    I: IntoIterator<Item = RawRow>,
{
    for raw in rows {
        let line = raw.line;
        let record = match normalize_row(&raw, size_unit, config) {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping row on line {}: {}", line, e);
                let name = Some(normalize::normalize_name(&raw.name)).filter(|n| !n.is_empty());
                report.record_failure(RowFailure::new(line, name, &e));
                continue;
            }
        };

        let name = record.name.clone();
        let outcome = match config.duplicate_policy {
            DuplicatePolicy::Reject => store.register(record).map(|_| false),
            DuplicatePolicy::Replace => store.upsert(record).map(|previous| previous.is_some()),
        };

        match outcome {
            Ok(false) => report.registered += 1,
            Ok(true) => {
                debug!("Row on line {} replaced dataset '{}'", line, name);
                report.replaced += 1;
            }
            Err(e) => {
                warn!("Skipping row on line {}: {}", line, e);
                report.record_failure(RowFailure::new(line, Some(name), &e));
            }
        }
    }
}

fn finish(report: &LoadReport) {
    if report.is_clean() {
        info!("Catalog load: {}", report.summary());
    } else {
        warn!("Catalog load: {}", report.summary());
        for failure in &report.failures {
            debug!("  line {} [{}]: {}", failure.line, failure.kind, failure.message);
        }
    }
}

/// Read a source file, choosing the parser by extension (`.json` or markdown)
pub fn load_file(store: &CatalogStore, path: impl AsRef<Path>, config: &CatalogConfig) -> Result<LoadReport> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json_file(store, path, config),
        Some(ext) if ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown") => {
            load_markdown_file(store, path, config)
        }
        _ => Err(CatalogError::Config(format!(
            "cannot tell source format of {:?}; use a .md or .json file",
            path
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rows_partial_failure() {
        let store = CatalogStore::new();
        let rows = vec![
            RawRow::new(1, "a").row_count("10"),
            RawRow::new(2, "b").row_count("ten"),
            RawRow::new(3, "c").date_range("2024-01-01 → 2020-01-01"),
            RawRow::new(4, "d"),
        ];

        let report = load_rows(&store, rows, &CatalogConfig::without_inference());
        assert_eq!(report.registered, 2);
        assert_eq!(report.skipped(), 2);
        assert_eq!(report.failures[0].kind, "parse");
        assert_eq!(report.failures[0].name.as_deref(), Some("b"));
        assert_eq!(report.failures[1].kind, "validation");
        assert!(store.contains("a"));
        assert!(store.contains("d"));
    }

    #[test]
    fn test_duplicate_rows_rejected_by_default() {
        let store = CatalogStore::new();
        let rows = vec![
            RawRow::new(1, "ch").row_count("1"),
            RawRow::new(2, "ch").row_count("2"),
        ];

        let report = load_rows(&store, rows, &CatalogConfig::default());
        assert_eq!(report.registered, 1);
        assert_eq!(report.failures[0].kind, "duplicate_name");
        assert_eq!(store.get("ch").unwrap().row_count, Some(1));
    }

    #[test]
    fn test_duplicate_rows_replaced_under_replace_policy() {
        let store = CatalogStore::new();
        let rows = vec![
            RawRow::new(1, "ch").row_count("1"),
            RawRow::new(2, "ch").row_count("2"),
        ];

        let config = CatalogConfig::with_duplicate_policy(DuplicatePolicy::Replace);
        let report = load_rows(&store, rows, &config);
        assert_eq!(report.registered, 1);
        assert_eq!(report.replaced, 1);
        assert!(report.is_clean());
        assert_eq!(store.get("ch").unwrap().row_count, Some(2));
    }

    #[test]
    fn test_source_size_unit_overrides_config() {
        let store = CatalogStore::new();
        let source = RawSource {
            rows: vec![RawRow::new(1, "a").size("5")],
            failures: Vec::new(),
            size_unit: Some(SizeUnit::Kilobytes),
        };

        load_source(&store, source, &CatalogConfig::default());
        assert_eq!(store.get("a").unwrap().size_bytes, Some(5_000));
    }

    #[test]
    fn test_load_file_unknown_extension() {
        let store = CatalogStore::new();
        assert!(matches!(
            load_file(&store, "catalog.csv", &CatalogConfig::default()),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let store = CatalogStore::new();
        assert!(matches!(
            load_file(&store, "/definitely/not/here.md", &CatalogConfig::default()),
            Err(CatalogError::Io(_))
        ));
    }
}
