// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Query options over catalog records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::record::DatasetRecord;
use crate::error::{CatalogError, Result};

/// Recognized filter options
///
/// Every option that is set must hold for a record to match. A record that
/// lacks the field an option inspects never matches that option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    /// Exact use-case tag
    pub use_case: Option<String>,
    /// Inclusive lower bound on row count
    pub min_rows: Option<u64>,
    /// Inclusive upper bound on size in bytes
    pub max_size_bytes: Option<u64>,
    /// Inclusive interval the record's coverage must intersect
    pub overlaps_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_case(mut self, tag: impl Into<String>) -> Self {
        self.use_case = Some(tag.into());
        self
    }

    pub fn min_rows(mut self, rows: u64) -> Self {
        self.min_rows = Some(rows);
        self
    }

    pub fn max_size_bytes(mut self, bytes: u64) -> Self {
        self.max_size_bytes = Some(bytes);
        self
    }

    pub fn overlaps(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.overlaps_range = Some((start, end));
        self
    }

    /// No options set: every record matches
    pub fn is_empty(&self) -> bool {
        self.use_case.is_none()
            && self.min_rows.is_none()
            && self.max_size_bytes.is_none()
            && self.overlaps_range.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((start, end)) = self.overlaps_range {
            if start > end {
                return Err(CatalogError::validation(format!(
                    "overlap range start {} is after end {}",
                    start, end
                )));
            }
        }
        Ok(())
    }

    pub fn matches(&self, record: &DatasetRecord) -> bool {
        if let Some(tag) = &self.use_case {
            if !record.has_use_case(tag) {
                return false;
            }
        }

        if let Some(min) = self.min_rows {
            match record.row_count {
                Some(rows) if rows >= min => {}
                _ => return false,
            }
        }

        if let Some(max) = self.max_size_bytes {
            match record.size_bytes {
                Some(bytes) if bytes <= max => {}
                _ => return false,
            }
        }

        if let Some((start, end)) = self.overlaps_range {
            match &record.date_range {
                Some(range) if range.overlaps(start, end) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Ordering for sorted listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    RowCount,
    SizeBytes,
    Start,
}

impl SortKey {
    /// Compare two records; records missing the key sort last
    pub fn compare(&self, a: &DatasetRecord, b: &DatasetRecord) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::RowCount => missing_last(a.row_count, b.row_count),
            SortKey::SizeBytes => missing_last(a.size_bytes, b.size_bytes),
            SortKey::Start => missing_last(
                a.date_range.and_then(|r| r.start()),
                b.date_range.and_then(|r| r.start()),
            ),
        }
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rows" | "row_count" => Ok(SortKey::RowCount),
            "size" | "size_bytes" => Ok(SortKey::SizeBytes),
            "start" | "date" => Ok(SortKey::Start),
            _ => Err(format!(
                "Unknown sort key: {}. Valid options: name, rows, size, start",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DateRange;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        let spec = FilterSpec::new();
        assert!(spec.is_empty());
        assert!(spec.matches(&DatasetRecord::new("anything")));
    }

    #[test]
    fn test_absent_fields_never_match() {
        let bare = DatasetRecord::new("bare");
        assert!(!FilterSpec::new().min_rows(0).matches(&bare));
        assert!(!FilterSpec::new().max_size_bytes(u64::MAX).matches(&bare));
        assert!(!FilterSpec::new()
            .overlaps(day(1900, 1, 1), day(2100, 1, 1))
            .matches(&bare));
        assert!(!FilterSpec::new().use_case("x").matches(&bare));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let record = DatasetRecord::new("ch")
            .with_row_count(3_000)
            .with_size_bytes(1_000);
        assert!(FilterSpec::new().min_rows(3_000).matches(&record));
        assert!(!FilterSpec::new().min_rows(3_001).matches(&record));
        assert!(FilterSpec::new().max_size_bytes(1_000).matches(&record));
        assert!(!FilterSpec::new().max_size_bytes(999).matches(&record));
    }

    #[test]
    fn test_options_combine_with_and() {
        let record = DatasetRecord::new("rns")
            .with_row_count(13_646)
            .with_size_bytes(52_000_000)
            .with_date_range(DateRange::bounded(day(2018, 1, 1), day(2024, 1, 1)).unwrap())
            .with_use_case("announcement parsing & hallucination tests");

        let spec = FilterSpec::new()
            .use_case("announcement parsing & hallucination tests")
            .min_rows(10_000)
            .max_size_bytes(100_000_000)
            .overlaps(day(2020, 1, 1), day(2020, 12, 31));
        assert!(spec.matches(&record));

        assert!(!spec.clone().min_rows(20_000).matches(&record));
        assert!(!spec.overlaps(day(2025, 1, 1), day(2026, 1, 1)).matches(&record));
    }

    #[test]
    fn test_inverted_overlap_range_invalid() {
        let spec = FilterSpec::new().overlaps(day(2024, 1, 1), day(2023, 1, 1));
        assert!(matches!(spec.validate(), Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_sort_key_missing_last() {
        let a = DatasetRecord::new("a").with_row_count(10);
        let b = DatasetRecord::new("b");
        assert_eq!(SortKey::RowCount.compare(&a, &b), Ordering::Less);
        assert_eq!(SortKey::RowCount.compare(&b, &a), Ordering::Greater);
        assert_eq!(SortKey::Name.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("rows".parse::<SortKey>().unwrap(), SortKey::RowCount);
        assert_eq!("SIZE".parse::<SortKey>().unwrap(), SortKey::SizeBytes);
        assert!("colour".parse::<SortKey>().is_err());
    }
}
