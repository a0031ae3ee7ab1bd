use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One unit of a backend's structured response. Anything that is not a
/// recognized text block falls into the `Other` catch-all; there is no
/// attribute probing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "block_type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Normalized run result: the decoded block sequence plus the raw payload
/// kept for diagnostics.
#[derive(Debug, Clone)]
pub struct AgentOutput {
    blocks: Vec<ContentBlock>,
    raw: Value,
}

impl AgentOutput {
    pub fn new(blocks: Vec<ContentBlock>, raw: Value) -> Self {
        Self { blocks, raw }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Extracts the first textual content block. An empty sequence or a
    /// non-text first block is a contract violation against the backend.
    pub fn first_text(&self) -> Result<String> {
        match self.blocks.first() {
            Some(ContentBlock::Text { text }) => Ok(text.clone()),
            _ => Err(Error::InvalidResponse(self.raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_text_returns_leading_text_block() {
        let raw = json!({"blocks": [{"block_type": "text", "text": "hello"}]});
        let output = AgentOutput::new(
            vec![ContentBlock::Text {
                text: "hello".to_owned(),
            }],
            raw,
        );

        assert_eq!(output.first_text().expect("text expected"), "hello");
    }

    #[test]
    fn empty_block_sequence_is_invalid() {
        let raw = json!({"blocks": []});
        let output = AgentOutput::new(Vec::new(), raw.clone());

        let error = output.first_text().expect_err("should fail");
        assert!(matches!(error, Error::InvalidResponse(_)));
        assert!(error.to_string().contains(&raw.to_string()));
    }

    #[test]
    fn non_text_first_block_is_invalid() {
        let raw = json!({"blocks": [{"block_type": "image", "url": "x"}]});
        let output = AgentOutput::new(
            vec![
                ContentBlock::Other,
                ContentBlock::Text {
                    text: "later".to_owned(),
                },
            ],
            raw,
        );

        assert!(matches!(
            output.first_text(),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn unknown_block_kinds_decode_as_other() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(json!([
            {"block_type": "image", "url": "http://example.com/cat.png"},
            {"block_type": "text", "text": "caption"}
        ]))
        .expect("blocks should decode");

        assert_eq!(blocks[0], ContentBlock::Other);
        assert_eq!(
            blocks[1],
            ContentBlock::Text {
                text: "caption".to_owned()
            }
        );
    }
}
