// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Temporal coverage of a dataset
//!
//! A `DateRange` always has at least one known bound. "No temporal coverage"
//! is expressed as `Option<DateRange>::None` on the record, never as a range
//! with two unknown bounds.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CatalogError, Result};

/// Coverage interval with inclusive bounds, either of which may be unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateRangeRepr")]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct DateRangeRepr {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TryFrom<DateRangeRepr> for DateRange {
    type Error = CatalogError;

    fn try_from(repr: DateRangeRepr) -> Result<Self> {
        DateRange::from_bounds(repr.start, repr.end)?
            .ok_or_else(|| CatalogError::validation("date range needs at least one known bound"))
    }
}

impl DateRange {
    /// Build a range from two optional bounds
    ///
    /// Returns `Ok(None)` when both bounds are unknown, which callers store
    /// as "no temporal coverage".
    pub fn from_bounds(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Option<Self>> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(s), Some(e)) if s > e => Err(CatalogError::validation(format!(
                "date range start {} is after end {}",
                format_timestamp(&s),
                format_timestamp(&e)
            ))),
            _ => Ok(Some(Self { start, end })),
        }
    }

    /// Range with both bounds known
    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(CatalogError::validation(format!(
                "date range start {} is after end {}",
                format_timestamp(&start),
                format_timestamp(&end)
            )));
        }
        Ok(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    /// Range with a known start and an unknown end
    pub fn starting(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Range with an unknown start and a known end
    pub fn ending(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether this range intersects the inclusive interval `[start, end]`
    ///
    /// An unknown bound is open in its direction.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| s <= end) && self.end.map_or(true, |e| e >= start)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: &Option<DateTime<Utc>>| match b {
            Some(ts) => format_timestamp(ts),
            None => "?".to_string(),
        };
        write!(f, "{} → {}", bound(&self.start), bound(&self.end))
    }
}

/// Date only when the timestamp falls on midnight, full time otherwise
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}
