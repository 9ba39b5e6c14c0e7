// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog configuration
//!
//! Controls how raw metadata rows are normalized and registered at load
//! time. Loaded from a JSON file; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CatalogError, Result};

/// What the loader does when a row names an already registered dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Report the row as a failure and keep the existing record
    #[default]
    Reject,
    /// Overwrite the existing record
    Replace,
}

/// Unit of the size column in raw rows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    /// Decimal megabytes (1e6 bytes)
    #[default]
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    /// Power of ten taking one unit to bytes
    pub fn decimal_places(&self) -> usize {
        match self {
            SizeUnit::Bytes => 0,
            SizeUnit::Kilobytes => 3,
            SizeUnit::Megabytes => 6,
            SizeUnit::Gigabytes => 9,
        }
    }

    /// Unit named in a column header such as `Size (MB)`
    pub fn from_header(header: &str) -> Option<Self> {
        let open = header.find('(')?;
        let close = header[open..].find(')')? + open;
        header[open + 1..close].trim().parse().ok()
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeUnit::Bytes => "bytes",
            SizeUnit::Kilobytes => "KB",
            SizeUnit::Megabytes => "MB",
            SizeUnit::Gigabytes => "GB",
        }
    }
}

impl std::str::FromStr for SizeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "b" | "bytes" => Ok(SizeUnit::Bytes),
            "kb" | "kilobytes" => Ok(SizeUnit::Kilobytes),
            "mb" | "megabytes" => Ok(SizeUnit::Megabytes),
            "gb" | "gigabytes" => Ok(SizeUnit::Gigabytes),
            _ => Err(format!(
                "Unknown size unit: {}. Valid options: bytes, kb, mb, gb",
                s
            )),
        }
    }
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Infers a use-case tag for rows that carry none
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UseCaseRule {
    /// Substring of the dataset name
    pub pattern: String,
    /// Tag applied on match
    pub tag: String,
}

impl UseCaseRule {
    pub fn new(pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            tag: tag.into(),
        }
    }
}

/// Loader configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Size unit used when the source does not name one
    pub size_unit: SizeUnit,
    /// Checked in order; the first rule whose pattern occurs in the name wins
    pub use_case_rules: Vec<UseCaseRule>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            size_unit: SizeUnit::Megabytes,
            use_case_rules: default_use_case_rules(),
        }
    }
}

impl CatalogConfig {
    /// Configuration without name-based tag inference
    pub fn without_inference() -> Self {
        Self {
            use_case_rules: Vec::new(),
            ..Default::default()
        }
    }

    pub fn with_duplicate_policy(policy: DuplicatePolicy) -> Self {
        Self {
            duplicate_policy: policy,
            ..Default::default()
        }
    }

    /// Read configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Config(format!("cannot read {:?}: {}", path, e)))?;
        Self::from_json(&text)
            .map_err(|e| CatalogError::Config(format!("invalid config {:?}: {}", path, e)))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Tag inferred from the dataset name, if any rule matches
    pub fn infer_use_case(&self, name: &str) -> Option<&str> {
        self.use_case_rules
            .iter()
            .find(|rule| name.contains(rule.pattern.as_str()))
            .map(|rule| rule.tag.as_str())
    }
}

fn default_use_case_rules() -> Vec<UseCaseRule> {
    vec![
        UseCaseRule::new("transcripts", "speech→text RAG & memory augment"),
        UseCaseRule::new("finnli", "NLI reasoning & contradiction tests"),
        UseCaseRule::new("boe_cls", "stance classification & editing"),
        UseCaseRule::new("investing_strat", "signal backtest & RAG"),
        UseCaseRule::new("revisit_llm", "domain pretraining"),
        UseCaseRule::new("px", "price-based trend edits"),
        UseCaseRule::new("boe", "macro time-series grounding"),
        UseCaseRule::new("rns", "announcement parsing & hallucination tests"),
        UseCaseRule::new("ch", "filings timeline & belief edits"),
    ]
}
