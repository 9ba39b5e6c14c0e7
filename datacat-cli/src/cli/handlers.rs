// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for DataCat

use chrono::{DateTime, Utc};
use colored::Colorize;
use datacat::{load, CatalogConfig, CatalogStore, FilterSpec, LoadReport, SortKey};
use std::path::Path;

use super::commands::OutputFormat;
use super::output::{RecordFormatter, ReportFormatter};

/// Load the catalog named on the command line
///
/// Row-level failures don't stop the command; they are summarized on
/// stderr so stdout stays machine-readable.
pub fn load_catalog(
    source: &Path,
    config_path: Option<&Path>,
) -> Result<(CatalogStore, LoadReport), Box<dyn std::error::Error>> {
    if !source.exists() {
        return Err(format!("Catalog source not found at {:?}", source).into());
    }

    let config = match config_path {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::default(),
    };

    let store = CatalogStore::new();
    let report = load::load_file(&store, source, &config)?;

    if !report.is_clean() {
        eprintln!(
            "{}",
            format!(
                "Loaded {:?} with problems: {} (run 'datacat report' for details)",
                source,
                report.summary()
            )
            .yellow()
        );
    }

    Ok((store, report))
}

/// Handle the list command
pub fn handle_list(
    store: &CatalogStore,
    sort: Option<SortKey>,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let records: Vec<_> = match sort {
        Some(key) => store.list_sorted(key).collect(),
        None => store.list_all().collect(),
    };
    println!("{}", RecordFormatter::format(&records, output));
    Ok(())
}

/// Handle the show command
pub fn handle_show(
    store: &CatalogStore,
    name: &str,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = store.get(name)?;
    println!("{}", RecordFormatter::format(&[record], output));
    Ok(())
}

/// Handle the filter command
pub fn handle_filter(
    store: &CatalogStore,
    use_case: Option<String>,
    min_rows: Option<u64>,
    max_size_bytes: Option<u64>,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = FilterSpec {
        use_case,
        min_rows,
        max_size_bytes,
        overlaps_range: range,
    };

    if spec.is_empty() {
        eprintln!("{}", "No filter options given; listing every dataset".yellow());
    }

    let records = store.filter(&spec)?;
    println!("{}", RecordFormatter::format(&records, output));
    Ok(())
}

/// Handle the report command
pub fn handle_report(report: &LoadReport, output: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let text = ReportFormatter::format(report, output);
    if report.is_clean() || output == OutputFormat::Json {
        println!("{}", text);
    } else {
        println!("{}", text.yellow());
    }
    Ok(())
}

/// Handle the version command
pub fn handle_version() {
    println!("{}", format!("datacat {}", env!("CARGO_PKG_VERSION")).bold().green());
    println!("  Sources: markdown overview tables (.md), JSON raw rows (.json)");
    println!("  Filters: use case, min rows, max size, date range overlap");
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERVIEW: &str = "| Dataset | Rows | Size (MB) | Date Range | Ideal Use |\n\
|---|---|---|---|---|\n\
| `ch` | 15,549,299 | 2650.4 | 1856-01-01 → 2024-12-31 | filings timeline & belief edits |\n\
3333333333333333333333\n\
| `px` | 34 | 0.0 | - | price-based trend edits |\n";

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data_overview.md");
        std::fs::write(&path, OVERVIEW).unwrap();

        let (store, report) = load_catalog(&path, None).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_load_catalog_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_catalog(&dir.path().join("missing.md"), None).is_err());
    }

    #[test]
    fn test_load_catalog_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"name": "a", "size": "2"}]"#).unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"size_unit": "kilobytes"}"#).unwrap();

        let (store, _) = load_catalog(&path, Some(config.as_path())).unwrap();
        assert_eq!(store.get("a").unwrap().size_bytes, Some(2_000));
    }

    #[test]
    fn test_show_missing_dataset_fails() {
        let store = CatalogStore::new();
        assert!(handle_show(&store, "ghost", OutputFormat::Table).is_err());
    }
}
