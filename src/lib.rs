//! # wordpdf
//!
//! Formatting-preserving Word (.docx) to PDF conversion.
//!
//! A document is read into a flow model of paragraphs and runs, translated
//! into a flat sequence of layout blocks (spacers and styled text), then
//! wrapped, paginated and written as a PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wordpdf::{layout, read_docx, render};
//!
//! fn main() -> wordpdf::Result<()> {
//!     // Read a Word document
//!     let doc = read_docx("letter.docx")?;
//!
//!     // Translate paragraphs into layout blocks
//!     let blocks = layout::translate(&doc);
//!
//!     // Paginate and write the PDF
//!     let stats = render::build(&blocks, &render::RenderOptions::default(), "letter.pdf")?;
//!     println!("{} pages", stats.page_count);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paragraph formatting**: alignment, spacing, line spacing and indents
//! - **Run styling**: bold, italic and underline, freely combined
//! - **Plain fallback**: unformatted text layout at a fixed font
//! - **Background and batch conversion**: worker thread with progress
//!   events, parallel batches using Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, LayoutMode,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, InputFormat};
pub use error::{Error, Result};
pub use layout::{BlockStyle, LayoutBlock, TextAlign, TranslateOptions};
pub use model::{
    Alignment, Document, Length, LineSpacing, Metadata, Paragraph, ParagraphStyle, RunStyle,
    SectionLayout, TextRun,
};
pub use parser::{DocxReader, ReadOptions};
pub use render::{JsonFormat, Margins, PageSize, RenderOptions, RenderStats};

use std::io::{Read, Seek};
use std::path::Path;

/// Read a Word document from a file.
///
/// # Example
///
/// ```no_run
/// use wordpdf::read_docx;
///
/// let doc = read_docx("letter.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    DocxReader::open(path)?.read()
}

/// Read a Word document from a file with custom options.
///
/// # Example
///
/// ```no_run
/// use wordpdf::{read_docx_with_options, ReadOptions};
///
/// let options = ReadOptions::new().lenient();
/// let doc = read_docx_with_options("letter.docx", options).unwrap();
/// ```
pub fn read_docx_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Document> {
    DocxReader::open_with_options(path, options)?.read()
}

/// Read a Word document from bytes.
pub fn read_docx_bytes(data: &[u8]) -> Result<Document> {
    DocxReader::from_bytes(data)?.read()
}

/// Read a Word document from a seekable reader.
pub fn read_docx_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    DocxReader::from_reader(reader)?.read()
}

/// Convert a Word document to PDF with default options.
///
/// # Example
///
/// ```no_run
/// use wordpdf::convert_file;
///
/// let result = convert_file("letter.docx", "letter.pdf").unwrap();
/// println!("{} pages", result.page_count());
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ConvertResult> {
    convert_file_with_options(input, output, &ConvertOptions::default())
}

/// Convert a Word document to PDF with custom options.
pub fn convert_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    ConverterRegistry::with_defaults().convert(input.as_ref(), output.as_ref(), options)
}

/// Builder for reading and converting Word documents.
///
/// # Example
///
/// ```no_run
/// use wordpdf::{PageSize, WordPdf};
///
/// let stats = WordPdf::new()
///     .with_page_size(PageSize::LETTER)
///     .with_margin(54.0)
///     .lenient()
///     .read("letter.docx")?
///     .save("letter.pdf")?;
/// # Ok::<(), wordpdf::Error>(())
/// ```
pub struct WordPdf {
    options: ConvertOptions,
}

impl WordPdf {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Enable lenient reading mode.
    pub fn lenient(mut self) -> Self {
        self.options.read = self.options.read.lenient();
        self
    }

    /// Use the plain fallback layout.
    pub fn plain(mut self) -> Self {
        self.options = self.options.plain();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.options.render = self.options.render.with_page_size(page_size);
        self
    }

    /// Set the same margin on every side, in points.
    pub fn with_margin(mut self, points: f32) -> Self {
        self.options.render = self.options.render.with_margins(Margins::uniform(points));
        self
    }

    /// Use the page geometry declared by the document.
    pub fn with_document_geometry(mut self) -> Self {
        self.options = self.options.with_document_geometry(true);
        self
    }

    /// Set translation options.
    pub fn with_translate_options(mut self, options: TranslateOptions) -> Self {
        self.options.translate = options;
        self
    }

    /// Read a Word document and return a result wrapper.
    pub fn read<P: AsRef<Path>>(self, path: P) -> Result<WordPdfResult> {
        let document = read_docx_with_options(path, self.options.read.clone())?;
        Ok(WordPdfResult {
            document,
            options: self.options,
        })
    }

    /// Read a Word document from bytes.
    pub fn read_bytes(self, data: &[u8]) -> Result<WordPdfResult> {
        let document = DocxReader::from_bytes_with_options(data, self.options.read.clone())?.read()?;
        Ok(WordPdfResult {
            document,
            options: self.options,
        })
    }
}

impl Default for WordPdf {
    fn default() -> Self {
        Self::new()
    }
}

/// A document read by [`WordPdf`], ready to be laid out.
pub struct WordPdfResult {
    /// The document
    pub document: Document,
    /// Conversion options to use
    options: ConvertOptions,
}

impl WordPdfResult {
    /// Translate into layout blocks.
    pub fn blocks(&self) -> Vec<LayoutBlock> {
        layout::translate_with_options(&self.document, &self.options.translate)
    }

    /// Lay the document out onto pages without writing anything.
    pub fn paginate(&self) -> Result<render::PagedDocument> {
        let render = convert::DocxConverter::new().render_options_for(&self.document, &self.options);
        let metrics = render::StandardMetrics::new();
        match self.options.mode {
            LayoutMode::Preserving => render::paginate(&self.blocks(), &render, &metrics),
            LayoutMode::Plain => render::layout_plain(&self.document, &render, &metrics),
        }
    }

    /// Text preview of the paginated layout.
    pub fn preview(&self) -> Result<String> {
        Ok(render::to_preview(&self.paginate()?))
    }

    /// Layout blocks as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.blocks(), format)
    }

    /// Write the PDF to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<RenderStats> {
        let result = convert::DocxConverter::new().convert_document(
            &self.document,
            path.as_ref(),
            &self.options,
            &mut |_| {},
        )?;
        Ok(result.stats)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
