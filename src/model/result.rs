//! Pipeline output.

use super::FigureRecord;
use serde::{Deserialize, Serialize};

/// The annotated text stream plus the figures it references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Prose interleaved with figure, formula and table markers
    pub text_with_images: String,

    /// Extracted figures in document order
    pub images: Vec<FigureRecord>,
}

impl ExtractionResult {
    /// Create a result.
    pub fn new(text_with_images: String, images: Vec<FigureRecord>) -> Self {
        Self {
            text_with_images,
            images,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, pretty: bool) -> crate::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let result = ExtractionResult::new("hello".to_string(), Vec::new());
        let json = result.to_json(false).unwrap();
        assert_eq!(json, r#"{"text_with_images":"hello","images":[]}"#);
    }
}
