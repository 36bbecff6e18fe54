//! Block ordering and image association for one page.

use std::fs;

use crate::annotate::{FigureStatus, Marker};
use crate::error::Result;
use crate::model::{BBox, BlockKind, ContentBlock, FigureRecord, ImageDescriptor, ImageHandle};
use crate::source::PageSource;

use super::options::ImageMatching;
use super::PipelineContext;

/// Orders a page's blocks top to bottom and turns image blocks into figure
/// markers.
#[derive(Debug, Clone)]
pub struct BlockMerger {
    matching: ImageMatching,
    tolerance: f32,
}

impl BlockMerger {
    /// Create a merger.
    pub fn new(matching: ImageMatching, tolerance: f32) -> Self {
        Self {
            matching,
            tolerance,
        }
    }

    /// Merge one page into stream pieces, one per block in vertical order.
    ///
    /// Figures that extract successfully are written to the context's
    /// output directory and recorded; failures degrade to failure markers.
    pub fn merge_page<S: PageSource + ?Sized>(
        &self,
        ctx: &mut PipelineContext,
        source: &S,
        page: u32,
        blocks: &[ContentBlock],
        descriptors: &[ImageDescriptor],
    ) -> Vec<String> {
        let mut ordered: Vec<&ContentBlock> = blocks.iter().collect();
        ordered.sort_by(|a, b| a.bbox.top().total_cmp(&b.bbox.top()));

        let mut claimed = vec![false; descriptors.len()];
        let mut pieces = Vec::with_capacity(ordered.len());

        for block in ordered {
            match &block.kind {
                BlockKind::Text { .. } => {
                    // Empty blocks add nothing, not even a line break
                    if let Some(text) = block.plain_text().filter(|t| !t.is_empty()) {
                        pieces.push(text);
                    }
                }
                BlockKind::Image => {
                    let id = ctx.next_figure_id();
                    let nearest = self.nearest_descriptor(&block.bbox, descriptors, &claimed);
                    let status = match nearest {
                        Some(index) => {
                            if self.matching == ImageMatching::Exclusive {
                                claimed[index] = true;
                            }
                            let handle = descriptors[index].handle;
                            self.extract_figure(ctx, source, &id, page, block.bbox, handle)
                        }
                        None => {
                            log::debug!(
                                "{} on page {}: no descriptor within {}",
                                id,
                                page,
                                self.tolerance
                            );
                            FigureStatus::NoXref
                        }
                    };
                    pieces.push(Marker::Figure { id: &id, status }.to_string());
                }
            }
        }

        pieces
    }

    /// Index of the unclaimed descriptor whose vertical center is nearest to
    /// the block's, strictly within the tolerance. Ties go to the earlier
    /// descriptor.
    pub fn nearest_descriptor(
        &self,
        block: &BBox,
        descriptors: &[ImageDescriptor],
        claimed: &[bool],
    ) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (index, descriptor) in descriptors.iter().enumerate() {
            if claimed.get(index).copied().unwrap_or(false) {
                continue;
            }
            let distance = block.vertical_center_distance(&descriptor.bbox);
            if distance < self.tolerance && best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    fn extract_figure<S: PageSource + ?Sized>(
        &self,
        ctx: &mut PipelineContext,
        source: &S,
        id: &str,
        page: u32,
        bbox: BBox,
        handle: ImageHandle,
    ) -> FigureStatus {
        if !handle.is_valid() {
            log::debug!("{} on page {}: descriptor has no image object", id, page);
            return FigureStatus::NoXref;
        }

        match persist_figure(ctx, source, id, page, bbox, handle) {
            Ok(record) => {
                log::debug!("{} on page {} saved as {}", id, page, record.filename);
                ctx.images.push(record);
                FigureStatus::Extracted
            }
            Err(e) => {
                log::warn!("Failed to extract image {}: {}", id, e);
                FigureStatus::ExtractionFailed
            }
        }
    }
}

fn persist_figure<S: PageSource + ?Sized>(
    ctx: &PipelineContext,
    source: &S,
    id: &str,
    page: u32,
    bbox: BBox,
    handle: ImageHandle,
) -> Result<FigureRecord> {
    let image = source.extract_image(handle)?;
    let filename = image.filename(id);
    fs::write(ctx.output_dir().join(&filename), &image.data)?;

    Ok(FigureRecord {
        id: id.to_string(),
        filename,
        page,
        bbox,
    })
}
