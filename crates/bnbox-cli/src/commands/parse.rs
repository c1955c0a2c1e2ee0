use super::render;
use crate::OutputFormat;
use anyhow::Result;
use bnbox_core::message::{MessageRecord, parse_label};

/// Decode accessibility labels without a browser
pub fn parse_labels(labels: &[String], last: bool) -> Vec<MessageRecord> {
    labels
        .iter()
        .map(|label| parse_label(label).into_record(last))
        .collect()
}

pub fn execute(labels: &[String], last: bool, format: OutputFormat) -> Result<()> {
    tracing::debug!("Parsing {} labels", labels.len());

    let records = parse_labels(labels, last);
    print!("{}", render::records(&records, format)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(())
}
