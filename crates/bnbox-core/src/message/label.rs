//! Decoding of the accessibility label attached to each message bubble.
//!
//! Labels follow the loose grammar `"<sender> sent <content>. Sent <date-time>"`.
//! Messages written by the signed-in user drop the sender, so every field is
//! looked up on its own and falls back to a sentinel instead of failing the
//! whole record.

use super::types::{CONTENT_NOT_FOUND, MessageRecord, MessageTimestamp, UNKNOWN_SENDER};
use chrono::NaiveDateTime;

const SENDER_MARKER: &str = " sent";
const CONTENT_START_MARKER: &str = "sent ";
const CONTENT_END_MARKER: &str = ". Sent";
const TIMESTAMP_MARKER: &str = "Sent ";

/// `05 Jan 2024, 14:30`
const LABEL_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";
const LABEL_TIMESTAMP_PARTS: usize = 4;

/// Text fields recovered from a single label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFields {
    pub sender: String,
    pub message: String,
    pub datetime: MessageTimestamp,
}

impl LabelFields {
    pub fn into_record(self, is_last_message: bool) -> MessageRecord {
        MessageRecord {
            sender: self.sender,
            message: self.message,
            datetime: self.datetime,
            is_last_message,
        }
    }
}

/// Split a label into sender, content and timestamp.
///
/// Never fails: a field that cannot be located takes its sentinel value and
/// the remaining fields are still extracted.
pub fn parse_label(label: &str) -> LabelFields {
    LabelFields {
        sender: parse_sender(label),
        message: parse_content(label),
        datetime: parse_timestamp(label),
    }
}

fn parse_sender(label: &str) -> String {
    // A sender whose name contains " sent" is split there
    match label.find(SENDER_MARKER) {
        Some(end) => label[..end].trim().to_string(),
        None => UNKNOWN_SENDER.to_string(),
    }
}

fn parse_content(label: &str) -> String {
    let span = label.find(CONTENT_START_MARKER).and_then(|idx| {
        let start = idx + CONTENT_START_MARKER.len();
        label[start..]
            .find(CONTENT_END_MARKER)
            .map(|len| &label[start..start + len])
    });

    match span {
        Some(content) => content.trim().to_string(),
        None => CONTENT_NOT_FOUND.to_string(),
    }
}

fn parse_timestamp(label: &str) -> MessageTimestamp {
    // "Sent" may also appear inside the content, so search from the end
    let Some(idx) = label.rfind(TIMESTAMP_MARKER) else {
        return MessageTimestamp::Unparsed;
    };

    let raw = label[idx + TIMESTAMP_MARKER.len()..].trim();

    // chrono lets a format space match no whitespace at all; the four parts
    // must be separated
    if raw.split_whitespace().count() != LABEL_TIMESTAMP_PARTS {
        return MessageTimestamp::Unparsed;
    }

    NaiveDateTime::parse_from_str(raw, LABEL_TIMESTAMP_FORMAT)
        .map(MessageTimestamp::Parsed)
        .unwrap_or(MessageTimestamp::Unparsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> MessageTimestamp {
        MessageTimestamp::Parsed(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_parse_full_label() {
        let fields = parse_label("Alice sent Hello there. Sent 05 Jan 2024, 14:30");

        assert_eq!(fields.sender, "Alice");
        assert_eq!(fields.message, "Hello there");
        assert_eq!(fields.datetime, at(2024, 1, 5, 14, 30));
    }

    #[test]
    fn test_label_without_sender_text_is_unknown() {
        // Only "sent " at the very start; no " sent" with a leading space
        let fields = parse_label("sent a photo. Sent 05 Jan 2024, 14:30");

        assert_eq!(fields.sender, "Unknown");
        assert_eq!(fields.message, "a photo");
        assert_eq!(fields.datetime, at(2024, 1, 5, 14, 30));
    }

    #[test]
    fn test_malformed_date_keeps_sender_and_content() {
        let fields = parse_label("Bob sent Hi. Sent tomorrow");

        assert_eq!(fields.sender, "Bob");
        assert_eq!(fields.message, "Hi");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_missing_content_end_keeps_sender_and_date() {
        let fields = parse_label("Dana sent nothing here Sent 02 Apr 2024, 10:15");

        assert_eq!(fields.sender, "Dana");
        assert_eq!(fields.message, "Content not found");
        assert_eq!(fields.datetime, at(2024, 4, 2, 10, 15));
    }

    #[test]
    fn test_sent_inside_content_uses_last_marker_for_date() {
        let fields = parse_label("Carol sent Sent from my phone. Sent 06 Feb 2024, 09:05");

        assert_eq!(fields.sender, "Carol");
        assert_eq!(fields.message, "Sent from my phone");
        assert_eq!(fields.datetime, at(2024, 2, 6, 9, 5));
    }

    #[test]
    fn test_sender_containing_marker_is_split_early() {
        let fields = parse_label("The sentinel team sent Update. Sent 01 Mar 2024, 08:00");

        assert_eq!(fields.sender, "The");
        assert_eq!(fields.message, "Update");
        assert_eq!(fields.datetime, at(2024, 3, 1, 8, 0));
    }

    #[test]
    fn test_content_end_before_start_falls_back() {
        let fields = parse_label("Hi. Sent 05 Jan 2024, 14:30 then sent x");

        assert_eq!(fields.sender, "Hi. Sent 05 Jan 2024, 14:30 then");
        assert_eq!(fields.message, "Content not found");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_unrelated_text_yields_all_sentinels() {
        let fields = parse_label("hello world");

        assert_eq!(fields.sender, "Unknown");
        assert_eq!(fields.message, "Content not found");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_empty_label_yields_all_sentinels() {
        let fields = parse_label("");

        assert_eq!(fields.sender, "Unknown");
        assert_eq!(fields.message, "Content not found");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_invalid_calendar_date_is_unparsed() {
        let fields = parse_label("Eve sent Hi. Sent 31 Feb 2024, 10:00");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);

        let fields = parse_label("Eve sent Hi. Sent 05 Jan 2024, 25:00");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_date_without_separators_is_unparsed() {
        let fields = parse_label("Bob sent Hi. Sent 05Jan2024,14:30");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);

        let fields = parse_label("Bob sent Hi. Sent 05 Jan 2024,14:30");
        assert_eq!(fields.datetime, MessageTimestamp::Unparsed);
    }

    #[test]
    fn test_extra_whitespace_between_date_parts_is_accepted() {
        let fields = parse_label("Bob sent Hi. Sent 05  Jan 2024,   14:30");
        assert_eq!(fields.datetime, at(2024, 1, 5, 14, 30));
    }

    #[test]
    fn test_content_and_sender_are_trimmed() {
        let fields = parse_label("  Frank   sent    spaced out   . Sent 07 Jul 2024, 23:59  ");

        assert_eq!(fields.sender, "Frank");
        assert_eq!(fields.message, "spaced out");
        assert_eq!(fields.datetime, at(2024, 7, 7, 23, 59));
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        let fields = parse_label("Zoë sent Merci beaucoup 🙏. Sent 12 Dec 2023, 18:45");

        assert_eq!(fields.sender, "Zoë");
        assert_eq!(fields.message, "Merci beaucoup 🙏");
        assert_eq!(fields.datetime, at(2023, 12, 12, 18, 45));
    }

    #[test]
    fn test_into_record_carries_last_message_flag() {
        let record = parse_label("Bob sent Hi. Sent tomorrow").into_record(true);

        assert_eq!(record.sender, "Bob");
        assert_eq!(record.message, "Hi");
        assert_eq!(record.datetime, MessageTimestamp::Unparsed);
        assert!(record.is_last_message);
    }
}
