//! Plain fallback layout: paragraph text only, no formatting.

use crate::error::Result;
use crate::layout::normalize;
use crate::model::Document;

use super::metrics::{FontFamily, FontSpec, TextMeasure};
use super::paginate::{PagedDocument, Paginator};
use super::wrap::wrap_words;
use super::RenderOptions;

/// Font size of the plain layout.
pub const PLAIN_FONT_SIZE: f32 = 11.0;

/// Distance between baselines in the plain layout.
pub const PLAIN_LEADING: f32 = 14.0;

/// Lay out the plain text of each paragraph at a fixed font and leading.
///
/// Lines are wrapped against the page width minus twice the left margin.
/// A hard line break (`\n`) ends the line. An empty paragraph, or an empty
/// line between two breaks, advances by one blank line.
pub fn layout_plain<M>(doc: &Document, options: &RenderOptions, measure: &M) -> Result<PagedDocument>
where
    M: TextMeasure + ?Sized,
{
    options.validate()?;

    let font = FontSpec::regular(FontFamily::Helvetica, PLAIN_FONT_SIZE);
    let max_width = options.page_size.width - 2.0 * options.margins.left;
    let mut paginator = Paginator::new(options, measure);

    for paragraph in doc.paragraphs() {
        let text = normalize(&paragraph.plain_text());

        // Hard line breaks start a new line; each segment wraps on its own.
        for segment in text.split('\n') {
            let words: Vec<&str> = segment.split_whitespace().collect();

            if words.is_empty() {
                paginator.cursor_mut().place_line(PLAIN_LEADING);
                continue;
            }

            let lines = wrap_words(&words, max_width, |line| measure.width(line, &font))?;
            for line in &lines {
                paginator.push_plain_line(line, font, PLAIN_LEADING)?;
            }
        }
    }

    Ok(paginator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, TextRun};
    use crate::render::{Margins, PageSize};

    fn fixed(text: &str, _font: &FontSpec) -> Result<f32> {
        Ok(text.chars().count() as f32 * 5.0)
    }

    fn small_page() -> RenderOptions {
        RenderOptions::new()
            .with_page_size(PageSize::new(140.0, 400.0))
            .with_margins(Margins::uniform(20.0))
    }

    #[test]
    fn test_plain_layout_drops_formatting() {
        let mut doc = Document::new();
        let mut para = Paragraph::new();
        para.add_run(TextRun::bold("Bold"));
        para.add_run(TextRun::new(" text"));
        doc.add_paragraph(para);

        let paged = layout_plain(&doc, &small_page(), &fixed).unwrap();
        let line = &paged.pages[0].lines[0];

        assert_eq!(line.text(), "Bold text");
        assert!(!line.runs[0].font.face.bold);
        assert_eq!(line.runs[0].font.size, PLAIN_FONT_SIZE);
        assert_eq!(line.runs[0].x, 20.0);
        assert_eq!(line.baseline, 380.0 - PLAIN_LEADING);
    }

    #[test]
    fn test_plain_layout_wraps() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("aaaa bbbb cccc dddd eeee"));

        let paged = layout_plain(&doc, &small_page(), &fixed).unwrap();
        let lines: Vec<String> = paged.pages[0].lines.iter().map(|l| l.text()).collect();
        assert_eq!(lines, vec!["aaaa bbbb cccc dddd", "eeee"]);
    }

    #[test]
    fn test_empty_paragraph_advances_one_line() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("first"));
        doc.add_paragraph(Paragraph::new());
        doc.add_paragraph(Paragraph::with_text("second"));

        let paged = layout_plain(&doc, &small_page(), &fixed).unwrap();
        let lines = &paged.pages[0].lines;

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].baseline, 380.0 - 3.0 * PLAIN_LEADING);
    }

    #[test]
    fn test_hard_break_starts_new_line() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("first\nsecond\n\nfourth"));

        let paged = layout_plain(&doc, &small_page(), &fixed).unwrap();
        let lines = &paged.pages[0].lines;

        let texts: Vec<String> = lines.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["first", "second", "fourth"]);
        assert_eq!(lines[2].baseline, 380.0 - 4.0 * PLAIN_LEADING);
    }
}
