use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sender used when the label carries no `" sent"` marker
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Message text used when the content markers are missing
pub const CONTENT_NOT_FOUND: &str = "Content not found";

/// Serialized form of a timestamp that could not be parsed
pub const DATE_NOT_FOUND: &str = "Date not found";

/// Format used for parsed timestamps in the output document
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Time a message was sent, as far as the label told us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTimestamp {
    Parsed(NaiveDateTime),
    Unparsed,
}

impl MessageTimestamp {
    pub fn is_parsed(&self) -> bool {
        matches!(self, MessageTimestamp::Parsed(_))
    }
}

impl fmt::Display for MessageTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTimestamp::Parsed(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            MessageTimestamp::Unparsed => f.write_str(DATE_NOT_FOUND),
        }
    }
}

impl Serialize for MessageTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MessageTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Anything that is not a timestamp we wrote reads back as unparsed
        Ok(NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(MessageTimestamp::Parsed)
            .unwrap_or(MessageTimestamp::Unparsed))
    }
}

/// One message decoded from a thread view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub sender: String,
    pub message: String,
    pub datetime: MessageTimestamp,
    pub is_last_message: bool,
}

/// Output document written by the persister
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDocument {
    pub messages: Vec<MessageRecord>,
}

impl MessageDocument {
    pub fn new(messages: Vec<MessageRecord>) -> Self {
        Self { messages }
    }

    /// Number of records whose timestamp could not be parsed
    pub fn unparsed_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.datetime.is_parsed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_parsed_timestamp_serializes_as_iso_string() {
        let json = serde_json::to_string(&MessageTimestamp::Parsed(sample_time())).unwrap();
        assert_eq!(json, "\"2024-01-05T14:30:00\"");
    }

    #[test]
    fn test_unparsed_timestamp_serializes_as_sentinel() {
        let json = serde_json::to_string(&MessageTimestamp::Unparsed).unwrap();
        assert_eq!(json, "\"Date not found\"");
    }

    #[test]
    fn test_foreign_timestamp_string_reads_as_unparsed() {
        let ts: MessageTimestamp = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(ts, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_record_serializes_all_four_fields() {
        let record = MessageRecord {
            sender: UNKNOWN_SENDER.to_string(),
            message: CONTENT_NOT_FOUND.to_string(),
            datetime: MessageTimestamp::Unparsed,
            is_last_message: false,
        };

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["sender"], "Unknown");
        assert_eq!(obj["message"], "Content not found");
        assert_eq!(obj["datetime"], "Date not found");
        assert_eq!(obj["is_last_message"], false);
    }

    #[test]
    fn test_document_counts_unparsed() {
        let doc = MessageDocument::new(vec![
            MessageRecord {
                sender: "Alice".to_string(),
                message: "Hi".to_string(),
                datetime: MessageTimestamp::Parsed(sample_time()),
                is_last_message: false,
            },
            MessageRecord {
                sender: "Bob".to_string(),
                message: "Hi".to_string(),
                datetime: MessageTimestamp::Unparsed,
                is_last_message: true,
            },
        ]);

        assert_eq!(doc.unparsed_count(), 1);
    }
}
