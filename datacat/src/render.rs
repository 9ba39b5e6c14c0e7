// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Renders catalog records back into the markdown overview table

use crate::catalog::DatasetRecord;
use crate::load::markdown::escape_cell;
use crate::load::normalize::join_use_cases;

const HEADER: &str = "| Dataset | Rows | Size (MB) | Date Range | Ideal Use |";
const DIVIDER: &str = "|---|---|---|---|---|";

/// `1234567` -> `1,234,567`
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Exact decimal megabytes, with at least one decimal place
///
/// `2_650_400_000` -> `2650.4`, `12_345` -> `0.012345`
pub fn megabytes(bytes: u64) -> String {
    let fraction = format!("{:06}", bytes % 1_000_000);
    let fraction = fraction.trim_end_matches('0');
    format!(
        "{}.{}",
        bytes / 1_000_000,
        if fraction.is_empty() { "0" } else { fraction }
    )
}

fn cell<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| "-".to_string())
}

/// One table row for a record
pub fn markdown_row(record: &DatasetRecord) -> String {
    let tags = if record.ideal_use.is_empty() {
        "-".to_string()
    } else {
        escape_cell(&join_use_cases(record.ideal_use.iter().map(String::as_str)))
    };

    format!(
        "| `{}` | {} | {} | {} | {} |",
        escape_cell(&record.name),
        cell(record.row_count, thousands),
        cell(record.size_bytes, megabytes),
        cell(record.date_range, |r| r.to_string()),
        tags
    )
}

/// Full overview document for `records`, in the order given
pub fn render_markdown<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a DatasetRecord>,
{
    let mut lines = vec![
        "# Data Overview".to_string(),
        String::new(),
        HEADER.to_string(),
        DIVIDER.to_string(),
    ];
    lines.extend(records.into_iter().map(markdown_row));
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DateRange;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(15_549_299), "15,549,299");
    }

    #[test]
    fn test_megabytes_is_exact() {
        assert_eq!(megabytes(0), "0.0");
        assert_eq!(megabytes(700_000), "0.7");
        assert_eq!(megabytes(2_650_400_000), "2650.4");
        assert_eq!(megabytes(12_345), "0.012345");
        assert_eq!(megabytes(1), "0.000001");
        assert_eq!(megabytes(u64::MAX), "18446744073709.551615");
    }

    #[test]
    fn test_markdown_row() {
        let record = DatasetRecord::new("ch")
            .with_row_count(15_549_299)
            .with_size_bytes(2_650_400_000)
            .with_date_range(DateRange::starting(
                Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap(),
            ))
            .with_use_case("filings timeline & belief edits");

        assert_eq!(
            markdown_row(&record),
            "| `ch` | 15,549,299 | 2650.4 | 2015-01-01 → ? | filings timeline & belief edits |"
        );
        assert_eq!(
            markdown_row(&DatasetRecord::new("bare")),
            "| `bare` | - | - | - | - |"
        );
    }

    #[test]
    fn test_markdown_row_escapes_separators() {
        let record = DatasetRecord::new("q|r")
            .with_use_case("a | b")
            .with_use_case("x; y");
        assert_eq!(markdown_row(&record), r"| `q\|r` | - | - | - | a \| b; x\\; y |");
    }

    #[test]
    fn test_render_document() {
        let records = [DatasetRecord::new("a"), DatasetRecord::new("b")];
        let doc = render_markdown(&records);
        assert!(doc.starts_with("# Data Overview\n\n| Dataset |"));
        assert_eq!(doc.lines().count(), 6);
    }
}
