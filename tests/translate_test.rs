//! Integration tests for paragraph translation.

use wordpdf::layout::{normalize, translate, translate_with_options, unescape_markup};
use wordpdf::model::{Alignment, Document, Length, LineSpacing, Paragraph, ParagraphStyle, RunStyle, TextRun};
use wordpdf::{LayoutBlock, TextAlign, TranslateOptions};

fn styled(text: &str, bold: bool, italic: bool, underline: bool) -> TextRun {
    TextRun::new(text).with_style(RunStyle {
        bold,
        italic,
        underline,
    })
}

#[test]
fn test_centered_paragraph_with_spacing() {
    let mut doc = Document::new();
    let mut p = Paragraph::new().with_style(
        ParagraphStyle::new()
            .with_alignment(Alignment::Center)
            .with_spacing(Some(Length::pt(10.0)), Some(Length::pt(5.0))),
    );
    p.add_run(TextRun::bold("Hello"));
    p.add_text(" World");
    doc.add_paragraph(p);

    let blocks = translate(&doc);

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0], LayoutBlock::Spacer { height: 10.0 });
    match &blocks[1] {
        LayoutBlock::Text { markup, style } => {
            assert_eq!(markup, "<b>Hello</b> World");
            assert_eq!(style.alignment, TextAlign::Center);
        }
        other => panic!("expected text block, got {:?}", other),
    }
    assert_eq!(blocks[2], LayoutBlock::Spacer { height: 5.0 });
}

#[test]
fn test_paragraph_order_is_preserved() {
    let mut doc = Document::new();
    for i in 0..20 {
        doc.add_paragraph(Paragraph::with_text(format!("Paragraph {}", i)));
    }

    let blocks = translate(&doc);
    let texts: Vec<&str> = blocks.iter().filter_map(LayoutBlock::markup).collect();

    assert_eq!(texts.len(), 20);
    for (i, text) in texts.iter().enumerate() {
        assert_eq!(*text, format!("Paragraph {}", i));
    }
}

#[test]
fn test_empty_paragraph_keeps_spacing() {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::new().with_style(
        ParagraphStyle::new().with_spacing(Some(Length::twips(240.0)), None),
    ));
    doc.add_paragraph(Paragraph::new());

    let blocks = translate(&doc);

    assert_eq!(blocks, vec![LayoutBlock::Spacer { height: 12.0 }]);
}

#[test]
fn test_zero_spacing_emits_no_spacers() {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text("Only text").with_style(
        ParagraphStyle::new().with_spacing(Some(Length::pt(0.0)), Some(Length::pt(0.0))),
    ));

    let blocks = translate(&doc);
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].is_text());
}

#[test]
fn test_run_tags_nest_bold_italic_underline() {
    let mut doc = Document::new();
    let mut p = Paragraph::new();
    p.add_run(styled("all", true, true, true));
    p.add_run(styled(" slanted", false, true, false));
    p.add_run(styled(" lined", false, false, true));
    doc.add_paragraph(p);

    let blocks = translate(&doc);
    assert_eq!(
        blocks[0].markup(),
        Some("<b><i><u>all</u></i></b><i> slanted</i><u> lined</u>")
    );
}

#[test]
fn test_markup_characters_are_escaped() {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text("a < b & c > d"));

    let blocks = translate(&doc);
    let markup = blocks[0].markup().unwrap();

    assert_eq!(markup, "a &lt; b &amp; c &gt; d");
    assert_eq!(unescape_markup(markup), "a < b & c > d");
}

#[test]
fn test_normalize_is_idempotent() {
    let samples = [
        "plain",
        "line\r\nbreak",
        "tab\there",
        "no\u{a0}break",
        "cafe\u{301}",
        "",
    ];

    for sample in samples {
        let once = normalize(sample);
        assert_eq!(normalize(&once), once, "normalizing {:?} twice", sample);
    }
}

#[test]
fn test_line_spacing_resolves_to_leading() {
    let mut doc = Document::new();
    doc.add_paragraph(
        Paragraph::with_text("exact")
            .with_style(ParagraphStyle::new().with_line_spacing(LineSpacing::Exact(Length::pt(18.0)))),
    );
    doc.add_paragraph(
        Paragraph::with_text("double")
            .with_style(ParagraphStyle::new().with_line_spacing(LineSpacing::Multiple(2.0))),
    );
    doc.add_paragraph(Paragraph::with_text("default"));

    let options = TranslateOptions::new()
        .with_base_font_size(10.0)
        .with_default_leading(13.0);
    let leadings: Vec<f32> = translate_with_options(&doc, &options)
        .iter()
        .map(|block| match block {
            LayoutBlock::Text { style, .. } => style.leading,
            LayoutBlock::Spacer { .. } => panic!("unexpected spacer"),
        })
        .collect();

    assert_eq!(leadings, vec![18.0, 20.0, 13.0]);
}

#[test]
fn test_indents_resolve_to_points() {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text("indented").with_style(ParagraphStyle::new().with_indents(
        Some(Length::twips(720.0)),
        Some(Length::inches(0.5)),
        Some(Length::twips(-360.0)),
    )));

    let blocks = translate(&doc);
    let LayoutBlock::Text { style, .. } = &blocks[0] else {
        panic!("expected text block");
    };

    assert_eq!(style.left_indent, 36.0);
    assert_eq!(style.right_indent, 36.0);
    assert_eq!(style.first_line_indent, -18.0);
}
