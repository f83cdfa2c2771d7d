//! PDF output.
//!
//! Pages are written with the standard Type 1 fonts in WinAnsiEncoding, so
//! no font programs are embedded. The file is produced in memory, written
//! to a temporary file beside the destination and then persisted over it,
//! so a failed build never leaves a partial file behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document as PdfDocument, Object, ObjectId, Stream, StringFormat};
use tempfile::NamedTempFile;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::layout::LayoutBlock;
use crate::model::Metadata;

use super::metrics::StandardMetrics;
use super::paginate::{paginate, Page, PagedDocument};
use super::{RenderOptions, RenderStats};

const PRODUCER: &str = concat!("wordpdf ", env!("CARGO_PKG_VERSION"));

/// Lay out blocks and write them to a PDF file at `path`.
///
/// # Example
///
/// ```no_run
/// use wordpdf::layout::{BlockStyle, LayoutBlock};
/// use wordpdf::render::{build, RenderOptions};
///
/// let blocks = vec![
///     LayoutBlock::spacer(10.0),
///     LayoutBlock::text("<b>Hello</b> World", BlockStyle::default()),
/// ];
/// let stats = build(&blocks, &RenderOptions::default(), "hello.pdf")?;
/// println!("{} pages", stats.page_count);
/// # Ok::<(), wordpdf::Error>(())
/// ```
pub fn build(blocks: &[LayoutBlock], options: &RenderOptions, path: impl AsRef<Path>) -> Result<RenderStats> {
    let paged = paginate(blocks, options, &StandardMetrics::new())?;
    write_pdf(&paged, options, path)?;
    Ok(paged.stats)
}

/// Write an already paginated document to `path`, replacing any existing file.
pub fn write_pdf(paged: &PagedDocument, options: &RenderOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_pdf_bytes(paged, options)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |e: std::io::Error| Error::Render(format!("cannot write {}: {}", path.display(), e));
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(&bytes).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Serialize a paginated document to PDF bytes.
pub fn to_pdf_bytes(paged: &PagedDocument, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = FontResources::collect(&paged.pages);
    let font_dict = fonts.register(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut kids = Vec::with_capacity(paged.pages.len());
    for page in &paged.pages {
        let content = page_content(page, &fonts)?;
        let stream = content_stream(content, options.compress)?;
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                paged.page_size.width.into(),
                paged.page_size.height.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(info_dictionary(&options.metadata, Utc::now()));
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::Render(format!("failed to serialize PDF: {}", e)))?;
    Ok(bytes)
}

/// Resource names of the fonts used on the pages.
struct FontResources {
    names: BTreeMap<&'static str, String>,
}

impl FontResources {
    fn collect(pages: &[Page]) -> Self {
        let mut used: Vec<&'static str> = pages
            .iter()
            .flat_map(|page| page.lines.iter())
            .flat_map(|line| line.runs.iter())
            .map(|run| run.font.base_font())
            .collect();
        used.sort_unstable();
        used.dedup();

        let names = used
            .into_iter()
            .enumerate()
            .map(|(i, base)| (base, format!("F{}", i + 1)))
            .collect();
        Self { names }
    }

    fn name(&self, base_font: &str) -> Result<&str> {
        self.names
            .get(base_font)
            .map(String::as_str)
            .ok_or_else(|| Error::Render(format!("font {} was not registered", base_font)))
    }

    fn register(&self, doc: &mut PdfDocument) -> Dictionary {
        let mut fonts = Dictionary::new();
        for (base, name) in &self.names {
            let id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => *base,
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(name.as_bytes().to_vec(), id);
        }
        fonts
    }
}

fn page_content(page: &Page, fonts: &FontResources) -> Result<Content> {
    let mut operations = Vec::new();

    for line in &page.lines {
        for run in &line.runs {
            let name = fonts.name(run.font.base_font())?;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(name.as_bytes().to_vec()), run.font.size.into()],
            ));
            operations.push(Operation::new("Td", vec![run.x.into(), line.baseline.into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(&run.text), StringFormat::Literal)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
    }

    for rule in &page.rules {
        let y = rule.y - rule.thickness / 2.0;
        operations.push(Operation::new(
            "re",
            vec![
                rule.x1.into(),
                y.into(),
                (rule.x2 - rule.x1).into(),
                rule.thickness.into(),
            ],
        ));
        operations.push(Operation::new("f", vec![]));
    }

    Ok(Content { operations })
}

fn content_stream(content: Content, compress: bool) -> Result<Stream> {
    let data = content
        .encode()
        .map_err(|e| Error::Render(format!("failed to encode page content: {}", e)))?;

    if !compress {
        return Ok(Stream::new(Dictionary::new(), data));
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&data)?;
    let compressed = encoder.finish()?;

    let mut stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
    stream.allows_compression = false;
    Ok(stream)
}

fn info_dictionary(metadata: &Metadata, now: DateTime<Utc>) -> Dictionary {
    let mut info = Dictionary::new();

    let fields = [
        ("Title", &metadata.title),
        ("Author", &metadata.author),
        ("Subject", &metadata.subject),
        ("Keywords", &metadata.keywords),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            info.set(key, text_string(value));
        }
    }

    info.set("Producer", text_string(PRODUCER));
    info.set("CreationDate", pdf_date(metadata.created.unwrap_or(now)));
    info.set("ModDate", pdf_date(metadata.modified.unwrap_or(now)));
    info
}

fn pdf_date(date: DateTime<Utc>) -> Object {
    let formatted = date.format("D:%Y%m%d%H%M%S+00'00'").to_string();
    Object::String(formatted.into_bytes(), StringFormat::Literal)
}

/// Document information strings: ASCII as is, anything else as UTF-16BE.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Encode text for a WinAnsiEncoding font.
///
/// Text is NFC-composed first. Characters the encoding cannot represent are
/// replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    let mut unmapped = 0usize;

    for c in text.nfc() {
        match win_ansi_byte(c) {
            Some(b) => bytes.push(b),
            None => {
                unmapped += 1;
                bytes.push(b'?');
            }
        }
    }

    if unmapped > 0 {
        log::warn!(
            "{} character(s) not representable in the standard fonts were replaced",
            unmapped
        );
    }
    bytes
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x09 | 0x0A | 0x0D => Some(b' '),
        0x20..=0x7E => Some(code as u8),
        0xA0..=0xFF => Some(code as u8),
        _ => {
            let b = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201C}' => 0x93,
                '\u{201D}' => 0x94,
                '•' => 0x95,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(b)
        }
    }
}
