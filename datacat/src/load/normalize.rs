// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Normalization of raw rows into catalog records
//!
//! All absence markers (`-`, `NaT`, `None`, empty cells, ...) are resolved
//! here. Nothing downstream looks at raw text again.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, opt, rest},
    multi::separated_list1,
    sequence::{pair, preceded, separated_pair},
    IResult,
};
use std::collections::BTreeSet;

use super::raw::{RawDateRange, RawRow};
use crate::catalog::{DateRange, DatasetRecord};
use crate::config::{CatalogConfig, SizeUnit};
use crate::error::{CatalogError, Result};

const ABSENCE_MARKERS: &[&str] = &["", "-", "?", "nat", "none", "null", "nan", "n/a"];

/// Whether a cell means "no value"
pub fn is_absent(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    ABSENCE_MARKERS.contains(&lowered.as_str())
}

/// Turn one raw row into a validated record
pub fn normalize_row(raw: &RawRow, size_unit: SizeUnit, config: &CatalogConfig) -> Result<DatasetRecord> {
    let name = normalize_name(&raw.name);
    if name.is_empty() {
        return Err(CatalogError::validation(format!(
            "row on line {} has no dataset name",
            raw.line
        )));
    }

    let row_count = parse_count(&raw.row_count)
        .map_err(|e| in_field(raw.line, &name, "rows", e))?;
    let size_bytes = parse_size(&raw.size, size_unit)
        .map_err(|e| in_field(raw.line, &name, "size", e))?;
    let date_range = match &raw.date_range {
        None => Ok(None),
        Some(RawDateRange::Text(text)) => parse_date_range(text),
        Some(RawDateRange::Pair(start, end)) => parse_date_pair(
            start.as_deref().unwrap_or_default(),
            end.as_deref().unwrap_or_default(),
        ),
    }
    .map_err(|e| in_field(raw.line, &name, "date range", e))?;

    let mut ideal_use = parse_use_cases(&raw.ideal_use);
    if ideal_use.is_empty() {
        if let Some(tag) = config.infer_use_case(&name) {
            ideal_use.insert(tag.to_string());
        }
    }

    let record = DatasetRecord {
        name,
        row_count,
        size_bytes,
        date_range,
        ideal_use,
    };
    record.validate()?;
    Ok(record)
}

/// Strip surrounding whitespace and markdown code ticks
pub fn normalize_name(text: &str) -> String {
    text.trim().trim_matches('`').trim().to_string()
}

/// Attach row context to a field error, keeping its kind
fn in_field(line: usize, name: &str, field: &str, error: CatalogError) -> CatalogError {
    match error {
        CatalogError::Validation(msg) => {
            CatalogError::Validation(format!("dataset '{}' {}: {}", name, field, msg))
        }
        CatalogError::Parse { message, .. } => {
            CatalogError::parse(line, format!("dataset '{}' {}: {}", name, field, message))
        }
        other => other,
    }
}

/// Digit groups, optionally separated by thousands commas
fn grouped_digits(input: &str) -> IResult<&str, String> {
    map(separated_list1(char(','), digit1), |groups: Vec<&str>| {
        groups.concat()
    })(input)
}

/// Non-negative decimal number with optional thousands commas, split into
/// whole and fractional digits
fn decimal(input: &str) -> IResult<&str, (String, &str)> {
    pair(
        grouped_digits,
        map(opt(preceded(char('.'), digit1)), |f: Option<&str>| f.unwrap_or_default()),
    )(input)
}

fn reject_negative(text: &str) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.starts_with('-') && trimmed.len() > 1 {
        return Err(CatalogError::validation(format!(
            "'{}' is negative",
            trimmed
        )));
    }
    Ok(())
}

/// Parse a row count such as `64,205`
pub fn parse_count(text: &str) -> Result<Option<u64>> {
    if is_absent(text) {
        return Ok(None);
    }
    reject_negative(text)?;

    let trimmed = text.trim();
    let (_, digits) = all_consuming(grouped_digits)(trimmed)
        .map_err(|_| CatalogError::parse(0, format!("'{}' is not a row count", trimmed)))?;
    digits
        .parse::<u64>()
        .map(Some)
        .map_err(|_| CatalogError::parse(0, format!("'{}' is out of range", trimmed)))
}

/// Parse a size in `unit` (fractions allowed) into whole bytes
pub fn parse_size(text: &str, unit: SizeUnit) -> Result<Option<u64>> {
    if is_absent(text) {
        return Ok(None);
    }
    reject_negative(text)?;

    let trimmed = text.trim();
    let (_, (whole, fraction)) = all_consuming(decimal)(trimmed)
        .map_err(|_| CatalogError::parse(0, format!("'{}' is not a size", trimmed)))?;
    let out_of_range = || CatalogError::parse(0, format!("'{}' is out of range", trimmed));

    // Fraction scaled to the unit's decimal places, rounded half up on the
    // first dropped digit.
    let places = unit.decimal_places();
    let kept: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(places)
        .collect();
    let round_up = fraction.chars().nth(places).map_or(false, |d| d >= '5');

    let whole: u128 = whole.parse().map_err(|_| out_of_range())?;
    let kept: u128 = if kept.is_empty() { 0 } else { kept.parse().map_err(|_| out_of_range())? };
    let bytes = whole
        .checked_mul(10u128.pow(places as u32))
        .and_then(|b| b.checked_add(kept))
        .and_then(|b| b.checked_add(u128::from(round_up)))
        .ok_or_else(out_of_range)?;
    u64::try_from(bytes).map(Some).map_err(|_| out_of_range())
}

fn range_separator(input: &str) -> IResult<&str, (&str, &str)> {
    alt((
        separated_pair(take_until("→"), tag("→"), rest),
        separated_pair(take_until("->"), tag("->"), rest),
        separated_pair(take_until(" to "), tag(" to "), rest),
    ))(input)
}

/// Parse a coverage cell such as `2015-01-02 → 2024-12-31` or `NaT → NaT`
pub fn parse_date_range(text: &str) -> Result<Option<DateRange>> {
    if is_absent(text) {
        return Ok(None);
    }

    let trimmed = text.trim();
    let (_, (start, end)) = range_separator(trimmed).map_err(|_| {
        CatalogError::parse(0, format!("'{}' is not of the form 'start → end'", trimmed))
    })?;
    parse_date_pair(start, end)
}

/// Parse a pair of bound strings; absent bounds are unknown
pub fn parse_date_pair(start: &str, end: &str) -> Result<Option<DateRange>> {
    let bound = |text: &str| -> Result<Option<DateTime<Utc>>> {
        if is_absent(text) {
            Ok(None)
        } else {
            parse_timestamp(text).map(Some)
        }
    };
    DateRange::from_bounds(bound(start)?, bound(end)?)
}

/// Parse a timestamp; dates without a time are midnight UTC
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let trimmed = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(CatalogError::parse(0, format!("'{}' is not a timestamp", trimmed)))
}

/// Split use-case text on unescaped `;` into tags
///
/// `\;` and `\\` stand for a literal `;` and `\` inside a tag; any other
/// backslash is kept as written.
pub fn parse_use_cases(text: &str) -> BTreeSet<String> {
    if is_absent(text) {
        return BTreeSet::new();
    }

    let mut tags = BTreeSet::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ (';' | '\\')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ';' => push_tag(&mut tags, &mut current),
            _ => current.push(c),
        }
    }
    push_tag(&mut tags, &mut current);
    tags
}

fn push_tag(tags: &mut BTreeSet<String>, current: &mut String) {
    let tag = current.trim();
    if !tag.is_empty() {
        tags.insert(tag.to_string());
    }
    current.clear();
}

/// Join tags into one use-case cell that `parse_use_cases` splits back
pub fn join_use_cases<'a, I>(tags: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .map(|tag| tag.replace('\\', "\\\\").replace(';', "\\;"))
        .collect::<Vec<_>>()
        .join("; ")
}
