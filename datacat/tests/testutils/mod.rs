// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Shared fixtures for catalog integration tests

#![allow(dead_code)]

use datacat::{load, CatalogConfig, CatalogStore, LoadReport};
use std::path::PathBuf;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Row counts of the overview fixture, in table order
pub const OVERVIEW_ROW_COUNTS: [u64; 9] = [
    64_205, 3_000, 5_655_315, 13_646, 15_549_299, 14_780, 2_595, 34, 2_536_260,
];

/// A fresh catalog loaded from the markdown overview fixture
pub fn overview_catalog() -> (CatalogStore, LoadReport) {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = CatalogStore::new();
    let report = load::load_markdown_file(
        &store,
        fixture_path("data_overview.md"),
        &CatalogConfig::default(),
    )
    .expect("Failed to load overview fixture");
    (store, report)
}

pub fn names<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a std::sync::Arc<datacat::DatasetRecord>>,
{
    records.into_iter().map(|r| r.name.clone()).collect()
}
