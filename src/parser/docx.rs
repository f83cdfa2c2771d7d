//! Word (.docx) document reader using zip and quick-xml.
//!
//! Only direct formatting is read: paragraph properties from `w:pPr`, run
//! properties from `w:rPr` and the page geometry from `w:sectPr`. Style
//! inheritance from `styles.xml` is not resolved.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{detect_format_from_path, InputFormat};
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Document, Length, LineSpacing, Metadata, Paragraph, ParagraphStyle, RunStyle,
    SectionLayout, TextRun,
};

use super::options::{ErrorMode, ReadOptions};

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";

/// Twips per line in `w:spacing/@w:line` for single spacing.
const SINGLE_LINE_TWIPS: f32 = 240.0;

/// Word document reader.
pub struct DocxReader<R> {
    archive: ZipArchive<R>,
    options: ReadOptions,
}

impl DocxReader<File> {
    /// Open a Word document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    /// Open a Word document with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();

        match detect_format_from_path(path)? {
            InputFormat::Docx => {}
            other => {
                return Err(Error::UnsupportedConversion(format!(
                    "{} input cannot be read as a Word document",
                    other
                )))
            }
        }

        let file = File::open(path)?;
        Self::from_reader_with_options(file, options)
    }
}

impl DocxReader<Cursor<Vec<u8>>> {
    /// Read a Word document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ReadOptions::default())
    }

    /// Read a Word document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ReadOptions) -> Result<Self> {
        Self::from_reader_with_options(Cursor::new(data.to_vec()), options)
    }
}

impl<R: Read + Seek> DocxReader<R> {
    /// Read a Word document from a seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ReadOptions::default())
    }

    /// Read a Word document from a seekable reader with custom options.
    pub fn from_reader_with_options(reader: R, options: ReadOptions) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive, options })
    }

    /// Read the document body, properties and page geometry.
    pub fn read(&mut self) -> Result<Document> {
        let xml = self
            .read_part(DOCUMENT_PART)?
            .ok_or_else(|| Error::Translation(format!("missing {}", DOCUMENT_PART)))?;
        let mut doc = parse_body(&xml, self.options.error_mode)?;

        if self.options.include_metadata {
            if let Some(core) = self.read_part(CORE_PART)? {
                match parse_core_properties(&core) {
                    Ok(metadata) => doc.metadata = metadata,
                    Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                        log::warn!("Ignoring unreadable document properties: {}", e);
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        log::debug!(
            "Read {} paragraphs (section: {})",
            doc.paragraph_count(),
            if doc.section.is_some() { "yes" } else { "no" }
        );

        Ok(doc)
    }

    /// Check whether the archive contains a document body.
    pub fn has_document_part(&mut self) -> bool {
        self.archive.by_name(DOCUMENT_PART).is_ok()
    }

    fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Translation(format!("cannot read {}: {}", name, e)))?;
        Ok(Some(content))
    }
}

/// Extract an attribute value by key from an element.
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(|a| a.ok())
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Check if a toggle property is switched off by its `w:val`.
fn check_val_off(e: &BytesStart) -> bool {
    matches!(
        get_attr(e, b"w:val").as_deref(),
        Some("0") | Some("false") | Some("off")
    )
}

fn parse_alignment(value: &str) -> Alignment {
    match value {
        "left" | "start" => Alignment::Left,
        "center" => Alignment::Center,
        "right" | "end" => Alignment::Right,
        "both" | "distribute" => Alignment::Justify,
        _ => Alignment::Default,
    }
}

/// Page geometry collected from `w:pgSz` and `w:pgMar`, in twips.
#[derive(Default)]
struct SectionBuilder {
    width: Option<f32>,
    height: Option<f32>,
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

impl SectionBuilder {
    fn build(&self) -> Option<SectionLayout> {
        let fields = [
            self.width,
            self.height,
            self.top,
            self.right,
            self.bottom,
            self.left,
        ];
        if fields.iter().all(Option::is_none) {
            return None;
        }

        // Word's defaults: US Letter with one-inch margins.
        Some(SectionLayout {
            page_width: Length::twips(self.width.unwrap_or(12240.0)),
            page_height: Length::twips(self.height.unwrap_or(15840.0)),
            margin_top: Length::twips(self.top.unwrap_or(1440.0)),
            margin_right: Length::twips(self.right.unwrap_or(1440.0)),
            margin_bottom: Length::twips(self.bottom.unwrap_or(1440.0)),
            margin_left: Length::twips(self.left.unwrap_or(1440.0)),
        })
    }
}

/// Walk state for `word/document.xml`.
struct BodyState {
    mode: ErrorMode,
    paragraphs: Vec<Paragraph>,
    paragraph: Option<Paragraph>,
    /// Depth of open tables and text boxes whose content is skipped
    skip_depth: usize,
    in_ppr: bool,
    in_rpr: bool,
    in_run: bool,
    in_text: bool,
    run_style: RunStyle,
    /// Index of the current `w:r` in the paragraph's runs, once it has text
    run_index: Option<usize>,
    section: SectionBuilder,
}

impl BodyState {
    fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            paragraphs: Vec::new(),
            paragraph: None,
            skip_depth: 0,
            in_ppr: false,
            in_rpr: false,
            in_run: false,
            in_text: false,
            run_style: RunStyle::default(),
            run_index: None,
            section: SectionBuilder::default(),
        }
    }

    fn in_paragraph_properties(&self) -> bool {
        self.paragraph.is_some() && self.in_ppr && !self.in_rpr
    }

    fn in_run_properties(&self) -> bool {
        self.in_run && self.in_rpr
    }

    fn wants_text(&self) -> bool {
        self.in_text && self.skip_depth == 0
    }

    fn handle_start(&mut self, e: &BytesStart) -> Result<()> {
        match e.name().as_ref() {
            // Tables, text boxes and the previous formatting kept by tracked changes
            b"w:tbl" | b"w:txbxContent" | b"w:rPrChange" | b"w:pPrChange" | b"w:sectPrChange" => {
                self.skip_depth += 1
            }
            _ if self.skip_depth > 0 => {}
            b"w:p" => self.paragraph = Some(Paragraph::new()),
            b"w:pPr" => self.in_ppr = true,
            b"w:rPr" => self.in_rpr = true,
            b"w:r" => {
                self.in_run = true;
                self.run_style = RunStyle::default();
                self.run_index = None;
            }
            b"w:t" => self.in_text = self.in_run,
            _ => self.handle_property(e)?,
        }
        Ok(())
    }

    fn handle_empty(&mut self, e: &BytesStart) -> Result<()> {
        if self.skip_depth > 0 {
            return Ok(());
        }
        match e.name().as_ref() {
            b"w:p" => self.paragraphs.push(Paragraph::new()),
            b"w:tab" if self.in_run && !self.in_rpr => self.push_text("\t"),
            b"w:br" | b"w:cr" if self.in_run && !self.in_rpr => self.push_text("\n"),
            _ => self.handle_property(e)?,
        }
        Ok(())
    }

    fn handle_end(&mut self, name: &[u8]) {
        match name {
            b"w:tbl" | b"w:txbxContent" | b"w:rPrChange" | b"w:pPrChange" | b"w:sectPrChange" => {
                self.skip_depth = self.skip_depth.saturating_sub(1)
            }
            _ if self.skip_depth > 0 => {}
            b"w:p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    self.paragraphs.push(paragraph);
                }
                self.in_ppr = false;
            }
            b"w:pPr" => self.in_ppr = false,
            b"w:rPr" => self.in_rpr = false,
            b"w:r" => {
                self.in_run = false;
                self.run_index = None;
            }
            b"w:t" => self.in_text = false,
            _ => {}
        }
    }

    fn handle_property(&mut self, e: &BytesStart) -> Result<()> {
        match e.name().as_ref() {
            b"w:jc" if self.in_paragraph_properties() => {
                let alignment = get_attr(e, b"w:val")
                    .map(|v| parse_alignment(&v))
                    .unwrap_or_default();
                self.paragraph_style(|style| style.alignment = alignment);
            }
            b"w:spacing" if self.in_paragraph_properties() => {
                let before = self.twips_attr(e, b"w:before")?;
                let after = self.twips_attr(e, b"w:after")?;
                let line = self.number_attr(e, b"w:line")?;
                let line_spacing = line.map(|line| match get_attr(e, b"w:lineRule").as_deref() {
                    Some("exact") | Some("atLeast") => LineSpacing::Exact(Length::twips(line)),
                    _ => LineSpacing::Multiple(line / SINGLE_LINE_TWIPS),
                });
                self.paragraph_style(|style| {
                    if before.is_some() {
                        style.space_before = before;
                    }
                    if after.is_some() {
                        style.space_after = after;
                    }
                    if line_spacing.is_some() {
                        style.line_spacing = line_spacing;
                    }
                });
            }
            b"w:ind" if self.in_paragraph_properties() => {
                let left = self.twips_attr_any(e, &[b"w:left", b"w:start"])?;
                let right = self.twips_attr_any(e, &[b"w:right", b"w:end"])?;
                let first_line = self.number_attr(e, b"w:firstLine")?;
                let hanging = self.number_attr(e, b"w:hanging")?;
                let first = match (hanging, first_line) {
                    (Some(hanging), _) => Some(Length::twips(-hanging)),
                    (None, Some(first)) => Some(Length::twips(first)),
                    (None, None) => None,
                };
                self.paragraph_style(|style| {
                    if left.is_some() {
                        style.left_indent = left;
                    }
                    if right.is_some() {
                        style.right_indent = right;
                    }
                    if first.is_some() {
                        style.first_line_indent = first;
                    }
                });
            }
            b"w:b" if self.in_run_properties() => self.run_style.bold = !check_val_off(e),
            b"w:i" if self.in_run_properties() => self.run_style.italic = !check_val_off(e),
            b"w:u" if self.in_run_properties() => {
                self.run_style.underline = !matches!(
                    get_attr(e, b"w:val").as_deref(),
                    Some("none") | Some("0") | Some("false")
                );
            }
            b"w:pgSz" => {
                self.section.width = self.number_attr(e, b"w:w")?.or(self.section.width);
                self.section.height = self.number_attr(e, b"w:h")?.or(self.section.height);
            }
            b"w:pgMar" => {
                self.section.top = self.number_attr(e, b"w:top")?.or(self.section.top);
                self.section.right = self.number_attr(e, b"w:right")?.or(self.section.right);
                self.section.bottom = self.number_attr(e, b"w:bottom")?.or(self.section.bottom);
                self.section.left = self.number_attr(e, b"w:left")?.or(self.section.left);
            }
            _ => {}
        }
        Ok(())
    }

    fn paragraph_style(&mut self, update: impl FnOnce(&mut ParagraphStyle)) {
        if let Some(paragraph) = self.paragraph.as_mut() {
            update(&mut paragraph.style);
        }
    }

    /// Parse a numeric attribute. Invalid numbers fail in strict mode and
    /// are ignored in lenient mode.
    fn number_attr(&self, e: &BytesStart, key: &[u8]) -> Result<Option<f32>> {
        let Some(value) = get_attr(e, key) else {
            return Ok(None);
        };
        match value.trim().parse::<f32>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => {
                let message = format!(
                    "invalid value '{}' for {}",
                    value,
                    String::from_utf8_lossy(key)
                );
                match self.mode {
                    ErrorMode::Strict => Err(Error::Translation(message)),
                    ErrorMode::Lenient => {
                        log::warn!("Ignoring {}", message);
                        Ok(None)
                    }
                }
            }
        }
    }

    fn twips_attr(&self, e: &BytesStart, key: &[u8]) -> Result<Option<Length>> {
        Ok(self.number_attr(e, key)?.map(Length::twips))
    }

    fn twips_attr_any(&self, e: &BytesStart, keys: &[&[u8]]) -> Result<Option<Length>> {
        for key in keys {
            if let Some(length) = self.twips_attr(e, key)? {
                return Ok(Some(length));
            }
        }
        Ok(None)
    }

    fn push_text(&mut self, text: &str) {
        let Some(paragraph) = self.paragraph.as_mut() else {
            return;
        };
        match self.run_index {
            Some(index) => paragraph.runs[index].text.push_str(text),
            None => {
                paragraph.add_run(TextRun::new(text).with_style(self.run_style));
                self.run_index = Some(paragraph.runs.len() - 1);
            }
        }
    }

    fn finish(self) -> Document {
        let mut doc = Document::new();
        for paragraph in self.paragraphs {
            doc.add_paragraph(paragraph);
        }
        doc.section = self.section.build();
        doc
    }
}

/// Parse the main document part into paragraphs.
fn parse_body(xml: &str, mode: ErrorMode) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside w:t is significant.
    reader.trim_text(false);

    let mut state = BodyState::new(mode);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => state.handle_start(&e)?,
            Event::Empty(e) => state.handle_empty(&e)?,
            Event::End(e) => state.handle_end(e.name().as_ref()),
            Event::Text(e) if state.wants_text() => {
                let text = e.unescape()?;
                state.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(state.finish())
}

/// Parse `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => current = Some(e.name().as_ref().to_vec()),
            Event::End(_) => current = None,
            Event::Text(e) => {
                let text = e.unescape()?;
                let text = text.trim();
                match current.as_deref() {
                    _ if text.is_empty() => {}
                    Some(b"dc:title") => metadata.title = Some(text.to_string()),
                    Some(b"dc:creator") => metadata.author = Some(text.to_string()),
                    Some(b"dc:subject") => metadata.subject = Some(text.to_string()),
                    Some(b"cp:keywords") => metadata.keywords = Some(text.to_string()),
                    Some(b"dcterms:created") => metadata.created = parse_datetime(text),
                    Some(b"dcterms:modified") => metadata.modified = parse_datetime(text),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

/// Parse a W3CDTF timestamp such as `2024-01-15T10:30:00Z`.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring invalid document date '{}': {}", s, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut cursor);
            for (name, content) in parts {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    fn read_body(body: &str) -> Document {
        parse_body(&document_xml(body), ErrorMode::Strict).unwrap()
    }

    #[test]
    fn test_runs_and_toggles() {
        let doc = read_body(
            r#"<w:p>
                <w:r><w:rPr><w:b/></w:rPr><w:t>Hello</w:t></w:r>
                <w:r><w:t xml:space="preserve"> World</w:t></w:r>
                <w:r><w:rPr><w:b w:val="0"/><w:i/><w:u w:val="single"/></w:rPr><w:t>!</w:t></w:r>
            </w:p>"#,
        );

        let runs = &doc.paragraphs()[0].runs;
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "Hello");
        assert!(runs[0].style.bold);
        assert_eq!(runs[1].text, " World");
        assert!(!runs[1].style.has_styling());
        assert!(!runs[2].style.bold);
        assert!(runs[2].style.italic);
        assert!(runs[2].style.underline);
    }

    #[test]
    fn test_underline_none() {
        let doc = read_body(r#"<w:p><w:r><w:rPr><w:u w:val="none"/></w:rPr><w:t>x</w:t></w:r></w:p>"#);
        assert!(!doc.paragraphs()[0].runs[0].style.underline);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let doc = read_body(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b&amp;c</w:t><w:br/><w:t>d</w:t></w:r></w:p>"#,
        );
        let runs = &doc.paragraphs()[0].runs;
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a\tb&c\nd");
    }

    #[test]
    fn test_paragraph_properties() {
        let doc = read_body(
            r#"<w:p>
                <w:pPr>
                    <w:jc w:val="center"/>
                    <w:spacing w:before="200" w:after="100" w:line="360" w:lineRule="auto"/>
                    <w:ind w:left="720" w:right="360" w:hanging="360"/>
                    <w:rPr><w:b/></w:rPr>
                </w:pPr>
                <w:r><w:t>x</w:t></w:r>
            </w:p>"#,
        );

        let para = &doc.paragraphs()[0];
        let style = &para.style;
        assert_eq!(style.alignment, Alignment::Center);
        assert_eq!(style.space_before.unwrap().to_points(), 10.0);
        assert_eq!(style.space_after.unwrap().to_points(), 5.0);
        assert_eq!(style.line_spacing, Some(LineSpacing::Multiple(1.5)));
        assert_eq!(style.left_indent.unwrap().to_points(), 36.0);
        assert_eq!(style.right_indent.unwrap().to_points(), 18.0);
        assert_eq!(style.first_line_indent.unwrap().to_points(), -18.0);
        // paragraph mark formatting does not leak into runs
        assert!(!para.runs[0].style.bold);
    }

    #[test]
    fn test_exact_line_spacing() {
        let doc = read_body(
            r#"<w:p><w:pPr><w:spacing w:line="280" w:lineRule="exact"/></w:pPr></w:p>"#,
        );
        assert_eq!(
            doc.paragraphs()[0].style.line_spacing,
            Some(LineSpacing::Exact(Length::twips(280.0)))
        );
    }

    #[test]
    fn test_alignment_values() {
        assert_eq!(parse_alignment("both"), Alignment::Justify);
        assert_eq!(parse_alignment("end"), Alignment::Right);
        assert_eq!(parse_alignment("start"), Alignment::Left);
        assert_eq!(parse_alignment("thaiDistribute"), Alignment::Default);
    }

    #[test]
    fn test_empty_paragraphs_kept() {
        let doc = read_body(r#"<w:p/><w:p><w:pPr><w:spacing w:after="240"/></w:pPr></w:p>"#);
        assert_eq!(doc.paragraph_count(), 2);
        assert!(doc.paragraphs()[0].runs.is_empty());
        assert_eq!(doc.paragraphs()[1].style.space_after, Some(Length::twips(240.0)));
    }

    #[test]
    fn test_tables_and_text_boxes_skipped() {
        let doc = read_body(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>
               <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p>
                   <w:tbl><w:tr><w:tc><w:p><w:r><w:t>nested</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
               </w:tc></w:tr></w:tbl>
               <w:p><w:r><w:t>after</w:t></w:r>
                   <w:r><w:pict><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></w:pict></w:r>
               </w:p>"#,
        );

        let text: Vec<String> = doc.paragraphs().iter().map(|p| p.plain_text()).collect();
        assert_eq!(text, vec!["before", "after"]);
    }

    #[test]
    fn test_tracked_formatting_changes_ignored() {
        let doc = read_body(
            r#"<w:p>
                <w:pPr>
                    <w:jc w:val="right"/>
                    <w:pPrChange w:id="1" w:author="A"><w:pPr><w:jc w:val="center"/></w:pPr></w:pPrChange>
                </w:pPr>
                <w:r>
                    <w:rPr>
                        <w:i/>
                        <w:rPrChange w:id="2" w:author="A"><w:rPr><w:b/></w:rPr></w:rPrChange>
                        <w:u w:val="single"/>
                    </w:rPr>
                    <w:t>changed</w:t>
                </w:r>
            </w:p>
            <w:sectPr>
                <w:pgSz w:w="12240" w:h="15840"/>
                <w:sectPrChange w:id="3"><w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:sectPrChange>
            </w:sectPr>"#,
        );

        let para = &doc.paragraphs()[0];
        assert_eq!(para.style.alignment, Alignment::Right);
        let run = &para.runs[0];
        assert_eq!(run.text, "changed");
        assert!(run.style.italic);
        assert!(!run.style.bold);
        // properties after the change record still apply
        assert!(run.style.underline);
        assert_eq!(doc.section.unwrap().page_width.to_points(), 612.0);
    }

    #[test]
    fn test_section_layout() {
        let doc = read_body(
            r#"<w:p/><w:sectPr><w:pgSz w:w="11906" w:h="16838"/>
               <w:pgMar w:top="1440" w:right="1134" w:bottom="1440" w:left="1134"/></w:sectPr>"#,
        );
        let section = doc.section.unwrap();
        assert_eq!(section.page_width.to_points(), 595.3);
        assert_eq!(section.margin_left.to_points(), 56.7);
        assert_eq!(section.margin_top.to_points(), 72.0);
    }

    #[test]
    fn test_no_section_without_geometry() {
        assert!(read_body("<w:p/>").section.is_none());
    }

    #[test]
    fn test_invalid_number_strict_and_lenient() {
        let xml = document_xml(r#"<w:p><w:pPr><w:spacing w:before="lots"/></w:pPr></w:p>"#);

        assert!(matches!(
            parse_body(&xml, ErrorMode::Strict),
            Err(Error::Translation(_))
        ));

        let doc = parse_body(&xml, ErrorMode::Lenient).unwrap();
        assert_eq!(doc.paragraphs()[0].style.space_before, None);
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_body("<w:document><w:body><w:p></w:body>", ErrorMode::Strict);
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[test]
    fn test_core_properties() {
        let metadata = parse_core_properties(
            r#"<cp:coreProperties xmlns:cp="cp" xmlns:dc="dc" xmlns:dcterms="dcterms">
                <dc:title>Annual Report</dc:title>
                <dc:creator>Jane Roe</dc:creator>
                <cp:keywords>finance, 2024</cp:keywords>
                <dcterms:created>2024-01-15T10:30:00Z</dcterms:created>
                <dcterms:modified>not a date</dcterms:modified>
            </cp:coreProperties>"#,
        )
        .unwrap();

        assert_eq!(metadata.title.as_deref(), Some("Annual Report"));
        assert_eq!(metadata.author.as_deref(), Some("Jane Roe"));
        assert_eq!(metadata.keywords.as_deref(), Some("finance, 2024"));
        assert!(metadata.created.is_some());
        assert!(metadata.modified.is_none());
    }

    #[test]
    fn test_reader_from_bytes() {
        let data = archive(&[
            (
                DOCUMENT_PART,
                &document_xml(r#"<w:p><w:r><w:t>Hi</w:t></w:r></w:p>"#),
            ),
            (
                CORE_PART,
                r#"<cp:coreProperties xmlns:cp="cp" xmlns:dc="dc"><dc:title>T</dc:title></cp:coreProperties>"#,
            ),
        ]);

        let doc = DocxReader::from_bytes(&data).unwrap().read().unwrap();
        assert_eq!(doc.plain_text(), "Hi");
        assert_eq!(doc.metadata.title.as_deref(), Some("T"));

        let options = ReadOptions::new().with_metadata(false);
        let doc = DocxReader::from_bytes_with_options(&data, options)
            .unwrap()
            .read()
            .unwrap();
        assert!(doc.metadata.title.is_none());
    }

    #[test]
    fn test_missing_document_part() {
        let data = archive(&[("word/styles.xml", "<w:styles/>")]);
        let mut reader = DocxReader::from_bytes(&data).unwrap();
        assert!(!reader.has_document_part());
        assert!(matches!(reader.read(), Err(Error::Translation(_))));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            DocxReader::from_bytes(b"plain text, not an archive"),
            Err(Error::Translation(_))
        ));
    }
}
