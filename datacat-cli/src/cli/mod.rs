// Copyright (c) 2024-2025 DataCat Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for DataCat
//!
//! Loads a catalog source at startup and answers listing, lookup, filter
//! and load-report commands against it.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_filter, handle_list, handle_report, handle_show, handle_version, load_catalog};
