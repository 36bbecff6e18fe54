//! Page content as reported by the layout parser.

use super::{BBox, ImageDescriptor};
use serde::{Deserialize, Serialize};

/// A line of text made of runs that share a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextLine {
    /// Run texts in reading order
    pub runs: Vec<String>,
}

impl TextLine {
    /// Create a line from run texts.
    pub fn new<S: Into<String>>(runs: impl IntoIterator<Item = S>) -> Self {
        Self {
            runs: runs.into_iter().map(Into::into).collect(),
        }
    }

    /// Concatenated run text, without separators.
    pub fn text(&self) -> String {
        self.runs.concat()
    }
}

/// Kind of a content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// A text block
    Text {
        /// Lines in the block
        #[serde(default)]
        lines: Vec<TextLine>,
    },
    /// An image placement
    Image,
}

/// A positioned, typed unit of page content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block kind and payload
    #[serde(flatten)]
    pub kind: BlockKind,

    /// Bounding box on the page
    pub bbox: BBox,
}

impl ContentBlock {
    /// Create a text block from lines of runs.
    pub fn text(bbox: BBox, lines: Vec<TextLine>) -> Self {
        Self {
            kind: BlockKind::Text { lines },
            bbox,
        }
    }

    /// Create an image block.
    pub fn image(bbox: BBox) -> Self {
        Self {
            kind: BlockKind::Image,
            bbox,
        }
    }

    /// Check if this is an image block.
    pub fn is_image(&self) -> bool {
        matches!(self.kind, BlockKind::Image)
    }

    /// Text of a text block: runs concatenated, lines joined by newline.
    ///
    /// Returns `None` for image blocks.
    pub fn plain_text(&self) -> Option<String> {
        match &self.kind {
            BlockKind::Text { lines } => Some(
                lines
                    .iter()
                    .map(TextLine::text)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            BlockKind::Image => None,
        }
    }
}

/// Everything the parser reports for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Content blocks in source order
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,

    /// Image descriptors available for matching
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

impl PageContent {
    /// Create page content.
    pub fn new(blocks: Vec<ContentBlock>, images: Vec<ImageDescriptor>) -> Self {
        Self { blocks, images }
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
