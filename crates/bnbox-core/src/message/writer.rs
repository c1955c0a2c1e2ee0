use super::types::{MessageDocument, MessageRecord};
use crate::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct MessageWriter;

impl MessageWriter {
    /// Write a message document to a file, replacing any existing content
    pub fn to_file(doc: &MessageDocument, path: &Path) -> Result<()> {
        tracing::debug!("Writing message document to: {}", path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.flush()?;

        tracing::info!(
            "Messages saved to {} ({} records)",
            path.display(),
            doc.messages.len()
        );

        Ok(())
    }

    /// Save records as a side output.
    ///
    /// Errors are logged and absorbed so the caller can carry on. Returns
    /// whether the file was written.
    pub fn save_best_effort(messages: &[MessageRecord], path: &Path) -> bool {
        let doc = MessageDocument::new(messages.to_vec());
        match Self::to_file(&doc, path) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error while saving messages to JSON.");
                tracing::error!("{}", e);
                false
            }
        }
    }

    /// Convert a message document to a pretty JSON string
    pub fn to_string(doc: &MessageDocument) -> Result<String> {
        Ok(serde_json::to_string_pretty(doc)?)
    }
}
