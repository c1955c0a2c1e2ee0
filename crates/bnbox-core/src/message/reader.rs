use super::types::MessageDocument;
use crate::Result;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct MessageReader;

impl MessageReader {
    /// Read a message document previously written by `MessageWriter`
    pub fn from_file(path: &Path) -> Result<MessageDocument> {
        tracing::debug!("Reading message document from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let doc: MessageDocument = serde_json::from_reader(reader)?;

        tracing::debug!("Read {} messages", doc.messages.len());

        Ok(doc)
    }

    /// Parse a message document from a JSON string
    pub fn from_str(content: &str) -> Result<MessageDocument> {
        Ok(serde_json::from_str(content)?)
    }
}
