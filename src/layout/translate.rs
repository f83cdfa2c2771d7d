//! Translation of flow-formatted paragraphs into layout blocks.

use crate::model::{Document, Length, LineSpacing, Paragraph, ParagraphStyle, TextRun};

use super::normalize::{escape_markup, normalize};
use super::{BlockStyle, LayoutBlock, TextAlign, TranslateOptions};

/// Translate a document into layout blocks with default options.
///
/// # Example
///
/// ```
/// use wordpdf::model::{Document, Paragraph, TextRun};
/// use wordpdf::layout::{translate, LayoutBlock};
///
/// let mut doc = Document::new();
/// let mut p = Paragraph::new();
/// p.add_run(TextRun::bold("Hello"));
/// p.add_text(" World");
/// doc.add_paragraph(p);
///
/// let blocks = translate(&doc);
/// assert_eq!(blocks[0].markup(), Some("<b>Hello</b> World"));
/// ```
pub fn translate(doc: &Document) -> Vec<LayoutBlock> {
    translate_with_options(doc, &TranslateOptions::default())
}

/// Translate a document into layout blocks.
///
/// Blocks are produced in one forward pass, in paragraph order.
pub fn translate_with_options(doc: &Document, options: &TranslateOptions) -> Vec<LayoutBlock> {
    let mut blocks = Vec::with_capacity(doc.paragraph_count() * 2);

    for paragraph in doc.paragraphs() {
        translate_paragraph(paragraph, options, &mut blocks);
    }

    log::debug!(
        "Translated {} paragraphs into {} layout blocks",
        doc.paragraph_count(),
        blocks.len()
    );

    blocks
}

fn translate_paragraph(paragraph: &Paragraph, options: &TranslateOptions, out: &mut Vec<LayoutBlock>) {
    let style = &paragraph.style;

    let space_before = points_or_zero(style.space_before);
    let space_after = points_or_zero(style.space_after);

    if space_before > 0.0 {
        out.push(LayoutBlock::spacer(space_before));
    }

    let markup = compose_markup(&paragraph.runs);
    if !markup.is_empty() {
        out.push(LayoutBlock::text(markup, resolve_style(style, options)));
    }

    if space_after > 0.0 {
        out.push(LayoutBlock::spacer(space_after));
    }
}

/// Resolve a paragraph's formatting into a block style.
pub fn resolve_style(style: &ParagraphStyle, options: &TranslateOptions) -> BlockStyle {
    BlockStyle {
        font: options.font.clone(),
        size: options.font_size,
        leading: resolve_leading(style.line_spacing, options),
        alignment: TextAlign::from(style.alignment),
        left_indent: points_or_zero(style.left_indent),
        right_indent: points_or_zero(style.right_indent),
        first_line_indent: points_or_zero(style.first_line_indent),
    }
}

fn resolve_leading(spacing: Option<LineSpacing>, options: &TranslateOptions) -> f32 {
    match spacing {
        None => options.default_leading,
        Some(LineSpacing::Exact(length)) => length.to_points(),
        Some(LineSpacing::Multiple(factor)) => factor * options.base_font_size,
    }
}

fn points_or_zero(length: Option<Length>) -> f32 {
    length.map(|l| l.to_points()).unwrap_or(0.0)
}

/// Concatenate the tagged text of every non-empty run.
pub fn compose_markup(runs: &[TextRun]) -> String {
    let mut markup = String::new();
    for run in runs {
        let text = normalize(&run.text);
        if text.is_empty() {
            continue;
        }
        markup.push_str(&tag_run(&escape_markup(&text), run));
    }
    markup
}

/// Wrap escaped text in formatting tags: bold outermost, then italic, then underline.
fn tag_run(escaped: &str, run: &TextRun) -> String {
    let mut text = escaped.to_string();
    if run.style.underline {
        text = format!("<u>{}</u>", text);
    }
    if run.style.italic {
        text = format!("<i>{}</i>", text);
    }
    if run.style.bold {
        text = format!("<b>{}</b>", text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, RunStyle};

    fn run(text: &str, bold: bool, italic: bool, underline: bool) -> TextRun {
        TextRun::new(text).with_style(RunStyle {
            bold,
            italic,
            underline,
        })
    }

    #[test]
    fn test_tag_nesting_order() {
        assert_eq!(
            compose_markup(&[run("t", true, true, true)]),
            "<b><i><u>t</u></i></b>"
        );
        assert_eq!(compose_markup(&[run("t", true, true, false)]), "<b><i>t</i></b>");
        assert_eq!(compose_markup(&[run("t", false, true, true)]), "<i><u>t</u></i>");
        assert_eq!(compose_markup(&[run("t", false, false, false)]), "t");
    }

    #[test]
    fn test_empty_runs_skipped() {
        let runs = [
            run("", true, false, false),
            run("\u{1}\u{2}", false, true, false),
            run("kept", false, false, true),
        ];
        assert_eq!(compose_markup(&runs), "<u>kept</u>");
    }

    #[test]
    fn test_runs_concatenate_without_separator() {
        let runs = [run("a", true, false, false), run("b", false, false, false)];
        assert_eq!(compose_markup(&runs), "<b>a</b>b");
    }

    #[test]
    fn test_escaping_before_tagging() {
        assert_eq!(
            compose_markup(&[run("x<y & z>w", true, false, false)]),
            "<b>x&lt;y &amp; z&gt;w</b>"
        );
    }

    #[test]
    fn test_leading_resolution() {
        let options = TranslateOptions::default();
        assert_eq!(resolve_leading(None, &options), 14.0);
        assert_eq!(
            resolve_leading(Some(LineSpacing::Exact(Length::pt(18.0))), &options),
            18.0
        );
        assert_eq!(
            resolve_leading(Some(LineSpacing::Exact(Length::twips(360.0))), &options),
            18.0
        );
        assert_eq!(resolve_leading(Some(LineSpacing::Multiple(1.5)), &options), 18.0);
        assert_eq!(resolve_leading(Some(LineSpacing::Multiple(2.0)), &options), 24.0);
    }

    #[test]
    fn test_resolve_style_defaults() {
        let style = resolve_style(&ParagraphStyle::default(), &TranslateOptions::default());
        assert_eq!(style, BlockStyle::default());
    }

    #[test]
    fn test_resolve_style_indents() {
        let paragraph_style = ParagraphStyle::new()
            .with_alignment(Alignment::Justify)
            .with_indents(
                Some(Length::inches(0.5)),
                Some(Length::pt(10.0)),
                Some(Length::pt(-18.0)),
            );
        let style = resolve_style(&paragraph_style, &TranslateOptions::default());

        assert_eq!(style.alignment, TextAlign::Justify);
        assert_eq!(style.left_indent, 36.0);
        assert_eq!(style.right_indent, 10.0);
        assert_eq!(style.first_line_indent, -18.0);
    }

    #[test]
    fn test_zero_spacing_emits_no_spacer() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("x").with_style(
            ParagraphStyle::new().with_spacing(Some(Length::zero()), Some(Length::pt(-2.0))),
        ));

        let blocks = translate(&doc);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].is_text());
    }
}
