//! Command implementations behind the `bnbox` binary.

use clap::ValueEnum;

pub mod commands;

/// How records and reports are printed on stdout
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Sender, time and text per message
    Pretty,
    /// The same document layout that is saved to disk
    Json,
    /// One aligned row per message
    Table,
}
