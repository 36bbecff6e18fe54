//! Page source backed by a JSON layout dump.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ExtractedImage, ImageHandle, PageContent, TableCandidate};

use super::PageSource;

/// An image object referenced by descriptor handles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    /// Path to the encoded image, relative to the dump's directory
    pub path: PathBuf,

    /// File extension; taken from `path` when absent
    #[serde(default)]
    pub ext: Option<String>,
}

/// One page of a layout dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Blocks and image descriptors
    #[serde(flatten)]
    pub content: PageContent,

    /// Native table candidates
    #[serde(default)]
    pub tables: Vec<TableCandidate>,
}

/// A whole-document layout dump as written by an upstream parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDump {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<LayoutPage>,

    /// Image objects keyed by handle
    #[serde(default)]
    pub objects: HashMap<u32, ImageObject>,
}

/// A [`PageSource`] over a [`LayoutDump`].
#[derive(Debug, Clone)]
pub struct JsonPageSource {
    dump: LayoutDump,
    base_dir: PathBuf,
}

impl JsonPageSource {
    /// Open a layout dump file.
    ///
    /// Image object paths resolve against the file's directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        let json = fs::read_to_string(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::from_json(&json, base_dir)
    }

    /// Parse a layout dump from a JSON string.
    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let dump: LayoutDump = serde_json::from_str(json)?;
        log::debug!(
            "layout dump: {} pages, {} image objects",
            dump.pages.len(),
            dump.objects.len()
        );
        Ok(Self::from_dump(dump, base_dir))
    }

    /// Wrap an in-memory dump.
    pub fn from_dump(dump: LayoutDump, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            dump,
            base_dir: base_dir.into(),
        }
    }

    /// The underlying dump.
    pub fn dump(&self) -> &LayoutDump {
        &self.dump
    }

    fn layout_page(&self, number: u32) -> Result<&LayoutPage> {
        let count = self.page_count();
        if number == 0 || number > count {
            return Err(Error::PageOutOfRange(number, count));
        }
        Ok(&self.dump.pages[(number - 1) as usize])
    }
}

impl PageSource for JsonPageSource {
    fn page_count(&self) -> u32 {
        self.dump.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<PageContent> {
        Ok(self.layout_page(number)?.content.clone())
    }

    fn extract_image(&self, handle: ImageHandle) -> Result<ExtractedImage> {
        let object = self.dump.objects.get(&handle.0).ok_or_else(|| {
            Error::ImageExtract(format!("no image object for handle {}", handle.0))
        })?;

        let path = self.base_dir.join(&object.path);
        let data = fs::read(&path)
            .map_err(|e| Error::ImageExtract(format!("{}: {}", path.display(), e)))?;

        let ext = object
            .ext
            .clone()
            .or_else(|| {
                object
                    .path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "png".to_string());

        Ok(ExtractedImage::new(data, ext))
    }

    fn detect_tables(&self, number: u32) -> Result<Vec<TableCandidate>> {
        Ok(self.layout_page(number)?.tables.clone())
    }
}
