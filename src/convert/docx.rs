//! Word document converter implementation.

use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::layout::translate_with_options;
use crate::model::Document;
use crate::parser::DocxReader;
use crate::render::{layout_plain, paginate, write_pdf, RenderOptions, StandardMetrics};

use super::{ConversionStage, ConvertOptions, ConvertResult, DocumentConverter, LayoutMode};

/// Word document converter.
///
/// Converts `.docx` documents to PDF.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Resolve the render options for one document.
    ///
    /// Document geometry replaces the configured page size and margins when
    /// enabled, and the document's properties fill in missing metadata.
    pub fn render_options_for(&self, doc: &Document, options: &ConvertOptions) -> RenderOptions {
        let mut render = options.render.clone();

        if options.use_document_geometry {
            if let Some(section) = &doc.section {
                render = render.with_section(section);
            }
        }

        let metadata = &mut render.metadata;
        let source = &doc.metadata;
        if metadata.title.is_none() {
            metadata.title = source.title.clone();
        }
        if metadata.author.is_none() {
            metadata.author = source.author.clone();
        }
        if metadata.subject.is_none() {
            metadata.subject = source.subject.clone();
        }
        if metadata.keywords.is_none() {
            metadata.keywords = source.keywords.clone();
        }
        if metadata.created.is_none() {
            metadata.created = source.created;
        }
        if metadata.modified.is_none() {
            metadata.modified = source.modified;
        }

        render
    }

    /// Lay out and write an already-read document.
    pub fn convert_document(
        &self,
        doc: &Document,
        output: &Path,
        options: &ConvertOptions,
        on_stage: &mut dyn FnMut(ConversionStage),
    ) -> Result<ConvertResult> {
        let t0 = Instant::now();
        let render = self.render_options_for(doc, options);
        let metrics = StandardMetrics::new();

        let paged = match options.mode {
            LayoutMode::Preserving => {
                on_stage(ConversionStage::Translating);
                let blocks = translate_with_options(doc, &options.translate);
                on_stage(ConversionStage::Layout);
                paginate(&blocks, &render, &metrics)?
            }
            LayoutMode::Plain => {
                on_stage(ConversionStage::Layout);
                layout_plain(doc, &render, &metrics)?
            }
        };
        let t_layout = t0.elapsed();

        on_stage(ConversionStage::Writing);
        write_pdf(&paged, &render, output)?;
        let t_total = t0.elapsed();

        log::info!(
            "Timing: layout={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages)",
            t_layout.as_secs_f64() * 1000.0,
            (t_total - t_layout).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            paged.stats.page_count,
        );

        Ok(ConvertResult::new(output, doc.metadata.clone(), paged.stats))
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert_with_progress(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
        on_stage: &mut dyn FnMut(ConversionStage),
    ) -> Result<ConvertResult> {
        let t0 = Instant::now();
        on_stage(ConversionStage::Reading);
        let doc = DocxReader::open_with_options(input, options.read.clone())?.read()?;
        log::info!(
            "Read {} in {:.1}ms",
            input.display(),
            t0.elapsed().as_secs_f64() * 1000.0
        );

        self.convert_document(&doc, output, options, on_stage)
    }

    fn convert_bytes(&self, bytes: &[u8], output: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let doc = DocxReader::from_bytes_with_options(bytes, options.read.clone())?.read()?;
        self.convert_document(&doc, output, options, &mut |_| {})
    }
}
