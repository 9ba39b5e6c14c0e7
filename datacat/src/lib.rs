// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! DataCat - an in-memory catalog of dataset metadata
//!
//! Tracks named datasets with their row counts, sizes, temporal coverage and
//! intended-use tags, and answers lookups, listings and filters over them.
//!
//! ```no_run
//! use datacat::{load, CatalogConfig, CatalogStore, FilterSpec};
//!
//! # fn main() -> datacat::Result<()> {
//! let store = CatalogStore::new();
//! let report = load::load_markdown_file(&store, "data_overview.md", &CatalogConfig::default())?;
//! println!("{}", report.summary());
//!
//! for record in store.filter(&FilterSpec::new().min_rows(1_000_000))? {
//!     println!("{} has {:?} rows", record.name, record.row_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod load;
pub mod render;

pub use catalog::{CatalogIter, CatalogStore, DateRange, DatasetRecord, FilterSpec, SortKey};
pub use config::{CatalogConfig, DuplicatePolicy, SizeUnit, UseCaseRule};
pub use error::{CatalogError, Result};
pub use load::{LoadReport, RawRow, RowFailure};
