//! Transcript record and exported message types.

use serde::Deserialize;
use serde_json::Value;

/// Placeholder rendered in place of a tool result payload.
pub const TOOL_RESULT_MARKER: &str = "[Tool Result]";

/// Tool name used when a `tool_use` block carries none.
const UNKNOWN_TOOL: &str = "unknown";

/// A single line of a Claude Code transcript.
///
/// Every field is optional on disk; anything this type cannot represent
/// (a non-string `type`, a `message` that is not an object, ...) makes the
/// whole line fail to deserialize, and the parser skips it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TranscriptRecord {
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub message: Option<RecordMessage>,
}

/// The `type` of a transcript record.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    User,
    Assistant,
    /// Progress, summary, system, file-history-snapshot and anything else.
    #[default]
    #[serde(other)]
    Other,
}

impl RecordKind {
    /// Whether records of this kind are conversation turns.
    pub fn is_turn(&self) -> bool {
        matches!(self, RecordKind::User | RecordKind::Assistant)
    }

    /// The on-disk spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::User => "user",
            RecordKind::Assistant => "assistant",
            RecordKind::Other => "other",
        }
    }
}

/// The nested `message` object of a record.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RecordMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Content,
}

/// Message content: a plain string, a sequence of blocks, or anything else.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Blocks(Vec<ContentItem>),
    Other(Value),
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

/// One element of a block sequence.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Block(ContentBlock),
    Other(Value),
}

/// A typed content block, dispatched on its `type` tag.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    /// `name` is kept as raw JSON so a non-string name still renders.
    ToolUse {
        #[serde(default)]
        name: Option<Value>,
    },
    /// The payload is never rendered, so it is not kept.
    ToolResult,
    #[serde(other)]
    Unknown,
}

impl Content {
    /// Reduce the content to a single display string.
    ///
    /// Block sequences are joined with newlines; tool calls and tool results
    /// become short markers. Any other JSON value, `null` included, is
    /// rendered as compact JSON.
    pub fn extract_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Blocks(items) => items
                .iter()
                .filter_map(ContentItem::display_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Content::Other(value) => value.to_string(),
        }
    }
}

impl ContentItem {
    fn display_text(&self) -> Option<String> {
        match self {
            ContentItem::Text(text) => Some(text.clone()),
            ContentItem::Block(block) => block.display_text(),
            ContentItem::Other(_) => None,
        }
    }
}

impl ContentBlock {
    fn display_text(&self) -> Option<String> {
        match self {
            ContentBlock::Text { text } => Some(text.clone()),
            ContentBlock::ToolUse { name } => {
                let name = match name {
                    Some(Value::String(name)) => name.clone(),
                    Some(Value::Null) | None => UNKNOWN_TOOL.to_string(),
                    Some(other) => other.to_string(),
                };
                Some(format!("[Tool: {name}]"))
            }
            ContentBlock::ToolResult => Some(TOOL_RESULT_MARKER.to_string()),
            ContentBlock::Unknown => None,
        }
    }
}

/// A conversation turn ready to be written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMessage {
    /// Raw record timestamp, empty when the record had none.
    pub timestamp: String,
    /// Uppercased role label (`USER`, `ASSISTANT`, ...).
    pub role: String,
    /// Extracted message body.
    pub content: String,
}

impl ExportedMessage {
    pub fn new(
        timestamp: impl Into<String>,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            role: role.into(),
            content: content.into(),
        }
    }
}

/// The exported messages of one transcript, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<ExportedMessage>,
    /// Lines that were blank, not JSON, or not shaped like a record.
    pub skipped_lines: usize,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: Value) -> Content {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_plain_string_returned_unchanged() {
        let c = content(json!("  hello\nworld  "));
        assert_eq!(c, Content::Text("  hello\nworld  ".to_string()));
        assert_eq!(c.extract_text(), "  hello\nworld  ");
    }

    #[test]
    fn test_text_blocks_joined_with_newline() {
        let c = content(json!([
            {"type": "text", "text": "first"},
            {"type": "text", "text": "second"}
        ]));
        assert_eq!(c.extract_text(), "first\nsecond");
    }

    #[test]
    fn test_text_block_without_text_is_empty() {
        let c = content(json!([{"type": "text"}]));
        assert_eq!(c.extract_text(), "");
    }

    #[test]
    fn test_tool_use_marker() {
        let c = content(json!([{"type": "tool_use", "id": "t1", "name": "Grep", "input": {"pattern": "x"}}]));
        assert_eq!(c.extract_text(), "[Tool: Grep]");
    }

    #[test]
    fn test_tool_use_without_name() {
        let c = content(json!([{"type": "tool_use"}]));
        assert_eq!(c.extract_text(), "[Tool: unknown]");
    }

    #[test]
    fn test_tool_result_payload_not_rendered() {
        let c = content(json!([{
            "type": "tool_result",
            "tool_use_id": "t1",
            "content": [{"type": "text", "text": "secret file contents"}]
        }]));
        let text = c.extract_text();
        assert_eq!(text, "[Tool Result]");
        assert!(!text.contains("secret"));
    }

    #[test]
    fn test_mixed_sequence_preserves_order() {
        let c = content(json!([
            "bare string",
            {"type": "thinking", "thinking": "hidden"},
            {"type": "text", "text": "visible"},
            42,
            {"no_type": true},
            {"type": "tool_use", "name": "Read"},
            {"type": "tool_result", "content": "ok"}
        ]));
        assert_eq!(
            c.extract_text(),
            "bare string\nvisible\n[Tool: Read]\n[Tool Result]"
        );
    }

    #[test]
    fn test_unknown_blocks_contribute_nothing() {
        let c = content(json!([{"type": "image", "source": {}}]));
        assert_eq!(c.extract_text(), "");
    }

    #[test]
    fn test_other_shapes_stringified() {
        assert_eq!(content(json!(42)).extract_text(), "42");
        assert_eq!(content(json!(true)).extract_text(), "true");
        assert_eq!(content(json!({"a": 1})).extract_text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_null_content_rendered_as_json() {
        assert_eq!(content(Value::Null).extract_text(), "null");
    }

    #[test]
    fn test_tool_use_non_string_name() {
        let c = content(json!([{"type": "tool_use", "name": 42}]));
        assert_eq!(c.extract_text(), "[Tool: 42]");

        let c = content(json!([{"type": "tool_use", "name": {"id": "x"}}]));
        assert_eq!(c.extract_text(), r#"[Tool: {"id":"x"}]"#);
    }

    #[test]
    fn test_tool_use_null_name() {
        let c = content(json!([{"type": "tool_use", "name": null}]));
        assert_eq!(c.extract_text(), "[Tool: unknown]");
    }

    #[test]
    fn test_record_defaults() {
        let record: TranscriptRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.kind, RecordKind::Other);
        assert!(record.timestamp.is_none());
        assert!(record.message.is_none());
    }

    #[test]
    fn test_record_kind_other_values() {
        let record: TranscriptRecord =
            serde_json::from_str(r#"{"type":"file-history-snapshot"}"#).unwrap();
        assert_eq!(record.kind, RecordKind::Other);
        assert!(!record.kind.is_turn());
    }

    #[test]
    fn test_record_message_defaults() {
        let record: TranscriptRecord =
            serde_json::from_str(r#"{"type":"assistant","message":{}}"#).unwrap();
        let message = record.message.unwrap();
        assert!(message.role.is_none());
        assert_eq!(message.content, Content::Text(String::new()));
    }

    #[test]
    fn test_record_with_non_object_message_rejected() {
        let result = serde_json::from_str::<TranscriptRecord>(r#"{"type":"user","message":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_transcript_len() {
        let mut transcript = Transcript::default();
        assert!(transcript.is_empty());
        transcript
            .messages
            .push(ExportedMessage::new("", "USER", "hello"));
        assert_eq!(transcript.len(), 1);
    }
}
