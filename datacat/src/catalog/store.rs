// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory catalog store
//!
//! Maps dataset name to its metadata record. Mutations take the write half
//! of a single readers-writer lock for their whole duration; lookups,
//! listings and filters share the read half.

use log::{debug, info};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::filter::{FilterSpec, SortKey};
use super::record::DatasetRecord;
use crate::error::{CatalogError, Result};

struct Entry {
    /// Insertion sequence, stable across upsert/update
    seq: u64,
    record: Arc<DatasetRecord>,
}

#[derive(Default)]
struct CatalogState {
    records: HashMap<String, Entry>,
    /// seq -> name, iterated for insertion order
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl CatalogState {
    fn insert_new(&mut self, record: DatasetRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, record.name.clone());
        self.records.insert(
            record.name.clone(),
            Entry {
                seq,
                record: Arc::new(record),
            },
        );
    }

    fn snapshot(&self) -> Vec<Arc<DatasetRecord>> {
        self.order
            .values()
            .filter_map(|name| self.records.get(name))
            .map(|entry| Arc::clone(&entry.record))
            .collect()
    }
}

/// Registry of dataset metadata records
///
/// The store is an owned value; share it by reference (or `Arc`) with
/// whoever needs it.
#[derive(Default)]
pub struct CatalogStore {
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new record
    ///
    /// Fails with `DuplicateName` if the name is taken; the existing record
    /// is left as it was.
    pub fn register(&self, record: DatasetRecord) -> Result<()> {
        record.validate()?;

        let mut state = self.state.write();
        if state.records.contains_key(&record.name) {
            return Err(CatalogError::DuplicateName(record.name));
        }

        debug!("Registering dataset '{}'", record.name);
        state.insert_new(record);
        Ok(())
    }

    /// Register or overwrite a record, returning the one it replaced
    ///
    /// An overwritten record keeps its original insertion position.
    pub fn upsert(&self, record: DatasetRecord) -> Result<Option<Arc<DatasetRecord>>> {
        record.validate()?;

        let mut state = self.state.write();
        if let Some(entry) = state.records.get_mut(&record.name) {
            debug!("Replacing dataset '{}'", record.name);
            let previous = std::mem::replace(&mut entry.record, Arc::new(record));
            return Ok(Some(previous));
        }

        debug!("Registering dataset '{}'", record.name);
        state.insert_new(record);
        Ok(None)
    }

    /// Replace an existing record wholesale
    ///
    /// Fields are not merged: the new record is stored exactly as given.
    pub fn update(&self, record: DatasetRecord) -> Result<Arc<DatasetRecord>> {
        record.validate()?;

        let mut state = self.state.write();
        let entry = state
            .records
            .get_mut(&record.name)
            .ok_or_else(|| CatalogError::NotFound(record.name.clone()))?;

        debug!("Updating dataset '{}'", record.name);
        Ok(std::mem::replace(&mut entry.record, Arc::new(record)))
    }

    /// Look up a record by name
    pub fn get(&self, name: &str) -> Result<Arc<DatasetRecord>> {
        self.state
            .read()
            .records
            .get(name)
            .map(|entry| Arc::clone(&entry.record))
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.read().records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all records in insertion order
    ///
    /// Each call starts a fresh traversal over the catalog as it stands at
    /// the time of the call.
    pub fn list_all(&self) -> CatalogIter {
        CatalogIter {
            inner: self.state.read().snapshot().into_iter(),
        }
    }

    /// All records ordered by `key`, ties kept in insertion order
    pub fn list_sorted(&self, key: SortKey) -> CatalogIter {
        let mut records = self.state.read().snapshot();
        records.sort_by(|a, b| key.compare(a, b));
        CatalogIter {
            inner: records.into_iter(),
        }
    }

    /// Records satisfying every option set in `spec`, in insertion order
    pub fn filter(&self, spec: &FilterSpec) -> Result<Vec<Arc<DatasetRecord>>> {
        spec.validate()?;

        let state = self.state.read();
        let matched: Vec<_> = state
            .order
            .values()
            .filter_map(|name| state.records.get(name))
            .filter(|entry| spec.matches(&entry.record))
            .map(|entry| Arc::clone(&entry.record))
            .collect();

        debug!("Filter {:?} matched {} dataset(s)", spec, matched.len());
        Ok(matched)
    }

    /// Remove a record, returning it
    pub fn deregister(&self, name: &str) -> Result<Arc<DatasetRecord>> {
        let mut state = self.state.write();
        let entry = state
            .records
            .remove(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        state.order.remove(&entry.seq);

        debug!("Deregistered dataset '{}'", name);
        Ok(entry.record)
    }

    /// Remove every record
    pub fn clear(&self) {
        let mut state = self.state.write();
        let count = state.records.len();
        state.records.clear();
        state.order.clear();
        info!("Cleared {} dataset(s) from catalog", count);
    }
}

/// Finite traversal over a catalog snapshot
pub struct CatalogIter {
    inner: std::vec::IntoIter<Arc<DatasetRecord>>,
}

impl Iterator for CatalogIter {
    type Item = Arc<DatasetRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CatalogIter {}
