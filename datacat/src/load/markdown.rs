// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Markdown overview table source
//!
//! Reads the first pipe table in a document:
//!
//! ```text
//! | Dataset | Rows | Size (MB) | Date Range | Ideal Use |
//! |---|---|---|---|---|
//! | `ch` | 15,549,299 | 2650.4 | 2015-01-01 → 2024-12-31 | filings timeline & belief edits |
//! ```
//!
//! The header decides which column feeds which field. Body lines that are
//! not well-formed rows are reported as parse failures; the rest of the
//! table still loads.

use log::debug;
use nom::{
    character::complete::{char, space0},
    combinator::rest,
    multi::many0,
    sequence::{pair, preceded, terminated},
    IResult,
};

use super::raw::RawRow;
use super::report::RowFailure;
use super::RawSource;
use crate::config::SizeUnit;
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Rows,
    Size,
    DateRange,
    IdealUse,
    Other,
}

impl Column {
    fn from_header(header: &str) -> Self {
        let lowered = header.trim().to_lowercase();
        match lowered.as_str() {
            "dataset" | "name" | "dataset name" => Column::Name,
            "rows" | "row count" | "num_rows" | "row_count" => Column::Rows,
            "date range" | "date_range" | "dates" | "coverage" => Column::DateRange,
            "ideal use" | "ideal_use" | "use case" | "use cases" => Column::IdealUse,
            h if h.starts_with("size") => Column::Size,
            h if h.starts_with("rows") => Column::Rows,
            _ => Column::Other,
        }
    }
}

/// Text up to the next unescaped `|`; `\|` stays inside the cell
fn cell_text(input: &str) -> IResult<&str, &str> {
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '|' => return Ok((&input[i..], &input[..i])),
            _ => {}
        }
    }
    Ok(("", input))
}

/// Resolve `\|` and `\\` in a cell; other backslashes are kept
pub(crate) fn unescape_cell(cell: &str) -> String {
    let mut out = String::with_capacity(cell.len());
    let mut chars = cell.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped @ ('|' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of `unescape_cell`
pub(crate) fn escape_cell(text: &str) -> String {
    text.replace('\\', "\\\\").replace('|', "\\|")
}

/// Cells of a `| a | b |` line, or an error if the line is not a table row
fn table_row(input: &str) -> IResult<&str, Vec<&str>> {
    let (input, (cells, trailing)) = preceded(
        pair(space0, char('|')),
        pair(many0(terminated(cell_text, char('|'))), rest),
    )(input)?;

    let mut cells = cells;
    if !trailing.trim().is_empty() {
        cells.push(trailing);
    }
    Ok((input, cells))
}

fn is_divider(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let cell = cell.trim().trim_start_matches(':').trim_end_matches(':');
            !cell.is_empty() && cell.chars().all(|c| c == '-')
        })
}

enum State {
    Searching,
    ExpectDivider { line: usize, columns: Vec<Column>, size_unit: Option<SizeUnit> },
    Body { columns: Vec<Column> },
}

/// Parse the first overview table in `text`
///
/// Fails only when a table header lacks a dataset name column; row-level
/// problems end up in `RawSource::failures`.
pub fn parse_markdown_table(text: &str) -> Result<RawSource> {
    let mut source = RawSource::default();
    let mut state = State::Searching;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;

        state = match state {
            State::Searching => header_candidate(line, line_no),
            State::ExpectDivider { line: header_line, columns, size_unit } => {
                match table_row(line) {
                    Ok((_, cells)) if is_divider(&cells) => {
                        if !columns.contains(&Column::Name) {
                            return Err(CatalogError::parse(
                                header_line,
                                "table header has no Dataset column",
                            ));
                        }
                        source.size_unit = size_unit;
                        debug!("Overview table header on line {}", header_line);
                        State::Body { columns }
                    }
                    _ => header_candidate(line, line_no),
                }
            }
            State::Body { columns } => {
                if line.trim().is_empty() {
                    break;
                }
                match table_row(line) {
                    Ok((_, cells)) if is_divider(&cells) => {}
                    Ok((_, cells)) if cells.len() != columns.len() => {
                        let error = CatalogError::parse(
                            line_no,
                            format!("expected {} cells, found {}", columns.len(), cells.len()),
                        );
                        source.failures.push(RowFailure::new(line_no, None, &error));
                    }
                    Ok((_, cells)) => source.rows.push(build_row(line_no, &columns, &cells)),
                    Err(_) => {
                        let error = CatalogError::parse(
                            line_no,
                            format!("'{}' is not a table row", line.trim()),
                        );
                        source.failures.push(RowFailure::new(line_no, None, &error));
                    }
                }
                State::Body { columns }
            }
        };
    }

    Ok(source)
}

fn header_candidate(line: &str, line_no: usize) -> State {
    match table_row(line) {
        Ok((_, cells)) if !is_divider(&cells) => State::ExpectDivider {
            line: line_no,
            columns: cells.iter().map(|c| Column::from_header(c)).collect(),
            size_unit: cells
                .iter()
                .filter(|c| Column::from_header(c) == Column::Size)
                .find_map(|c| SizeUnit::from_header(c)),
        },
        _ => State::Searching,
    }
}

fn build_row(line: usize, columns: &[Column], cells: &[&str]) -> RawRow {
    let mut row = RawRow::new(line, "");
    for (column, cell) in columns.iter().zip(cells) {
        let cell = unescape_cell(cell.trim());
        let cell = cell.as_str();
        row = match column {
            Column::Name => RawRow { name: cell.to_string(), ..row },
            Column::Rows => row.row_count(cell),
            Column::Size => row.size(cell),
            Column::DateRange => row.date_range(cell),
            Column::IdealUse => row.ideal_use(cell),
            Column::Other => row,
        };
    }
    row
}
