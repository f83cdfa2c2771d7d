//! Document converter module providing a plugin architecture for input formats.
//!
//! Converters are registered per file extension and write their output to a
//! PDF file. Conversions can run inline, on a worker thread that reports
//! progress events, or in parallel over a batch of files.
//!
//! # Example
//!
//! ```no_run
//! use wordpdf::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> wordpdf::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!
//!     let result = registry.convert(
//!         Path::new("letter.docx"),
//!         Path::new("letter.pdf"),
//!         &ConvertOptions::default(),
//!     )?;
//!     println!("{} pages", result.stats.page_count);
//!     Ok(())
//! }
//! ```

mod batch;
mod docx;
mod worker;

pub use batch::{convert_batch, BatchJob, BatchOutcome};
pub use docx::DocxConverter;
pub use worker::{spawn_conversion, ConversionEvent, ConversionHandle};

use crate::detect::InputFormat;
use crate::error::{Error, Result};
use crate::layout::TranslateOptions;
use crate::model::Metadata;
use crate::parser::ReadOptions;
use crate::render::{RenderOptions, RenderStats};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How paragraphs are laid out on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Keep alignment, spacing, indents and run styling
    #[default]
    Preserving,

    /// Plain text at a fixed font and leading
    Plain,
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Reading options
    pub read: ReadOptions,

    /// Translation options
    pub translate: TranslateOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Layout mode
    pub mode: LayoutMode,

    /// Use the page size and margins declared by the document
    pub use_document_geometry: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set reading options.
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read = options;
        self
    }

    /// Set translation options.
    pub fn with_translate_options(mut self, options: TranslateOptions) -> Self {
        self.translate = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the layout mode.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use the plain fallback layout.
    pub fn plain(mut self) -> Self {
        self.mode = LayoutMode::Plain;
        self
    }

    /// Use the document's own page size and margins when it declares them.
    pub fn with_document_geometry(mut self, enabled: bool) -> Self {
        self.use_document_geometry = enabled;
        self
    }
}

/// A step of a conversion, reported to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Reading the source document
    Reading,
    /// Translating paragraphs into layout blocks
    Translating,
    /// Wrapping and paginating
    Layout,
    /// Writing the PDF file
    Writing,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConversionStage::Reading => "reading",
            ConversionStage::Translating => "translating",
            ConversionStage::Layout => "laying out",
            ConversionStage::Writing => "writing",
        };
        f.write_str(label)
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Path of the written PDF
    pub output: PathBuf,

    /// Source document metadata
    pub metadata: Metadata,

    /// Layout statistics
    pub stats: RenderStats,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(output: impl Into<PathBuf>, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            output: output.into(),
            metadata,
            stats,
        }
    }

    /// Get the number of pages written.
    pub fn page_count(&self) -> u32 {
        self.stats.page_count
    }
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new input format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert the file at `input` into a PDF at `output`, reporting each
    /// stage as it starts.
    fn convert_with_progress(
        &self,
        input: &Path,
        output: &Path,
        options: &ConvertOptions,
        on_stage: &mut dyn FnMut(ConversionStage),
    ) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], output: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert the file at `input` into a PDF at `output`.
    fn convert(&self, input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.convert_with_progress(input, output, options, &mut |_| {})
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default converters (Word documents).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name.insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Find the converter for a path by its extension.
    pub fn converter_for(&self, path: &Path) -> Result<Arc<dyn DocumentConverter>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedConversion(format!("{} has no extension", path.display())))?;
        self.converter_for_extension(ext)
    }

    fn converter_for_extension(&self, ext: &str) -> Result<Arc<dyn DocumentConverter>> {
        if let Some(converter) = self.get_by_extension(ext) {
            return Ok(converter);
        }
        if ext.eq_ignore_ascii_case(InputFormat::Pdf.extension()) {
            return Err(Error::UnsupportedConversion(
                "PDF input is not supported; only Word documents are converted to PDF".into(),
            ));
        }
        Err(Error::UnsupportedConversion(format!("no converter for extension: {}", ext)))
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        self.converter_for(input)?.convert(input, output, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        output: &Path,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        self.converter_for_extension(ext)?.convert_bytes(bytes, output, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Default output path for an input file: the same name with a `.pdf` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}
