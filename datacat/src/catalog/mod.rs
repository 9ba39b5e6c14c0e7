// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Dataset catalog
//!
//! This module provides:
//! - The dataset metadata record and its temporal coverage type
//! - The in-memory catalog store (register, upsert, update, get, list, filter, deregister)
//! - Filter and sort options for queries over the catalog

pub mod date_range;
pub mod filter;
pub mod record;
pub mod store;

pub use date_range::DateRange;
pub use filter::{FilterSpec, SortKey};
pub use record::DatasetRecord;
pub use store::{CatalogIter, CatalogStore};
