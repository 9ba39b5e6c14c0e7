// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Output formatting for catalog records and load reports

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use datacat::{render, DatasetRecord, LoadReport};
use std::sync::Arc;

use super::commands::OutputFormat;

pub struct RecordFormatter;

impl RecordFormatter {
    /// Format records in the requested output format
    pub fn format(records: &[Arc<DatasetRecord>], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::table(records),
            OutputFormat::Json => {
                let plain: Vec<&DatasetRecord> = records.iter().map(|r| &**r).collect();
                serde_json::to_string_pretty(&plain).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
            }
            OutputFormat::Markdown => render::render_markdown(records.iter().map(|r| &**r)),
        }
    }

    fn table(records: &[Arc<DatasetRecord>]) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Dataset", "Rows", "Size (MB)", "Date Range", "Ideal Use"]);

        for record in records {
            table.add_row(vec![
                Cell::new(&record.name),
                Cell::new(record.row_count.map(render::thousands).unwrap_or_else(|| "-".into())),
                Cell::new(record.size_bytes.map(render::megabytes).unwrap_or_else(|| "-".into())),
                Cell::new(
                    record
                        .date_range
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "-".into()),
                ),
                Cell::new(if record.ideal_use.is_empty() {
                    "-".to_string()
                } else {
                    record.ideal_use.iter().cloned().collect::<Vec<_>>().join("\n")
                }),
            ]);
        }

        format!("{}\n{} dataset(s)", table, records.len())
    }
}

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(report: &LoadReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
            OutputFormat::Table | OutputFormat::Markdown => {
                if report.is_clean() {
                    return report.summary();
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["Line", "Dataset", "Kind", "Reason"]);
                for failure in &report.failures {
                    table.add_row(vec![
                        Cell::new(failure.line),
                        Cell::new(failure.name.as_deref().unwrap_or("-")),
                        Cell::new(&failure.kind),
                        Cell::new(&failure.message),
                    ]);
                }
                format!("{}\n{}", report.summary(), table)
            }
        }
    }
}
