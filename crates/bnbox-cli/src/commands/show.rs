use super::render;
use crate::OutputFormat;
use anyhow::{Context, Result};
use bnbox_core::message::{MessageDocument, MessageReader};
use std::path::Path;

/// Load a saved message document
pub fn load(file: &Path) -> Result<MessageDocument> {
    MessageReader::from_file(file)
        .with_context(|| format!("Failed to read messages from {}", file.display()))
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let doc = load(file)?;

    print!("{}", render::records(&doc.messages, format)?);
    if format == OutputFormat::Json {
        println!();
    } else {
        println!();
        println!(
            "{} messages, {} without a parsed timestamp",
            doc.messages.len(),
            doc.unparsed_count()
        );
    }

    Ok(())
}
