use crate::OutputFormat;
use anyhow::Result;
use bnbox_core::message::{MessageDocument, MessageRecord, MessageWriter};
use console::style;

const SENDER_WIDTH: usize = 16;
const TIME_WIDTH: usize = 19;

/// Render records in the requested format
pub(crate) fn records(records: &[MessageRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(MessageWriter::to_string(&MessageDocument::new(
            records.to_vec(),
        ))?),
        OutputFormat::Table => Ok(table(records)),
        OutputFormat::Pretty => Ok(pretty(records)),
    }
}

fn pretty(records: &[MessageRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let marker = if record.is_last_message { " (last)" } else { "" };
        out.push_str(&format!(
            "{} {}{}\n  {}\n",
            style(&record.sender).bold(),
            style(record.datetime.to_string()).dim(),
            marker,
            record.message
        ));
    }
    out
}

fn table(records: &[MessageRecord]) -> String {
    let mut out = format!(
        "{:<sw$}  {:<tw$}  {:<4}  {}\n",
        "SENDER",
        "SENT",
        "LAST",
        "MESSAGE",
        sw = SENDER_WIDTH,
        tw = TIME_WIDTH
    );
    for record in records {
        out.push_str(&format!(
            "{:<sw$}  {:<tw$}  {:<4}  {}\n",
            truncate(&record.sender, SENDER_WIDTH),
            record.datetime.to_string(),
            if record.is_last_message { "yes" } else { "" },
            record.message,
            sw = SENDER_WIDTH,
            tw = TIME_WIDTH
        ));
    }
    out
}

/// Cut to `max` characters, marking the cut with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
