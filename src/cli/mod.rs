// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lexmatch command-line interface.
//!
//! Every command works on a directory store given with `--store`. `import`
//! loads a term bank, `lookup` runs the hover matcher on a string, and `list`,
//! `delete` and `orphans` manage what is installed.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lexmatch",
    about = "Dictionary hover lookup for Japanese text",
    version
)]
pub struct Cli {
    /// Directory holding the dictionary store (created if missing)
    #[arg(short, long, default_value = "lexmatch-store")]
    pub store: PathBuf,

    /// Engine configuration file (JSON, camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a term bank (JSON array of 8-field records) as a dictionary
    Import {
        /// Dictionary name
        name: String,

        /// Path to the term bank file
        file: PathBuf,

        /// Dictionary title shown by `list` (defaults to the name)
        #[arg(long)]
        title: Option<String>,

        /// Revision recorded for the dictionary
        #[arg(long, default_value = "1")]
        revision: String,
    },

    /// Look up the longest matching prefix of some text
    Lookup {
        /// Text starting at the hovered character
        text: String,

        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print entries as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List installed dictionaries
    List,

    /// Delete a dictionary and all of its buckets
    Delete {
        /// Dictionary name
        name: String,
    },

    /// Report buckets whose dictionary is no longer installed
    Orphans {
        /// Delete the orphaned buckets
        #[arg(long)]
        cleanup: bool,
    },
}
