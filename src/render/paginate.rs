//! Pagination of layout blocks onto fixed-size pages.
//!
//! Coordinates follow PDF conventions: points, origin at the bottom-left
//! corner, `y` growing upwards. A line of height `h` occupies the band
//! `[y - h, y]` below the cursor and its baseline sits at `y - h`.

use crate::error::Result;
use crate::layout::{BlockStyle, LayoutBlock, TextAlign};

use super::markup::{parse_markup, Span};
use super::metrics::{FontFace, FontFamily, FontSpec, TextMeasure};
use super::wrap::break_lines;
use super::{PageSize, RenderOptions, RenderStats};

/// A piece of text at an absolute position on its line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    /// Left edge of the text
    pub x: f32,
    /// Text to draw
    pub text: String,
    /// Font to draw it in
    pub font: FontSpec,
    /// Measured width
    pub width: f32,
}

/// One line of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Baseline position
    pub baseline: f32,
    /// Runs in left-to-right order
    pub runs: Vec<PlacedRun>,
}

impl PlacedLine {
    /// Text of the line with single spaces between runs that are not adjacent.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut last_end: Option<f32> = None;
        for run in &self.runs {
            if let Some(end) = last_end {
                if run.x - end > 0.01 {
                    text.push(' ');
                }
            }
            text.push_str(&run.text);
            last_end = Some(run.x + run.width);
        }
        text
    }
}

/// A horizontal stroke, used for underlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    /// Start of the stroke
    pub x1: f32,
    /// End of the stroke
    pub x2: f32,
    /// Vertical position of the stroke's centre
    pub y: f32,
    /// Stroke width
    pub thickness: f32,
}

/// A laid-out page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    /// Text lines top to bottom
    pub lines: Vec<PlacedLine>,
    /// Underline strokes
    pub rules: Vec<Rule>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rules.is_empty()
    }
}

/// The paginated result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedDocument {
    /// Page dimensions shared by every page
    pub page_size: PageSize,
    /// Pages in order; never empty
    pub pages: Vec<Page>,
    /// Layout statistics
    pub stats: RenderStats,
}

impl PagedDocument {
    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Vertical position on the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    top: f32,
    bottom: f32,
    y: f32,
    page: usize,
}

impl PageCursor {
    /// Start at the top margin of the first page.
    pub fn new(options: &RenderOptions) -> Self {
        let top = options.page_size.height - options.margins.top;
        Self {
            top,
            bottom: options.margins.bottom,
            y: top,
            page: 0,
        }
    }

    /// Current vertical position.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Current page index (0-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Check if nothing has been placed on the current page yet.
    pub fn at_top(&self) -> bool {
        self.y >= self.top
    }

    /// Move to the top of a new page.
    pub fn new_page(&mut self) {
        self.page += 1;
        self.y = self.top;
    }

    /// Move the cursor to `y`, e.g. to resume a layout at a known position.
    pub fn set_y(&mut self, y: f32) {
        self.y = y.min(self.top);
    }

    /// Reserve a line of `height` and return `(page index, baseline)`.
    ///
    /// If the line would cross the bottom margin a new page is started
    /// first. A line taller than the whole content area is still placed,
    /// at the top of its page.
    pub fn place_line(&mut self, height: f32) -> (usize, f32) {
        if self.y - height < self.bottom && !self.at_top() {
            self.new_page();
        }
        self.y -= height;
        (self.page, self.y)
    }

    /// Advance by vertical whitespace.
    ///
    /// Whitespace that does not fit ends the page and is not carried over.
    /// At the top of a page it is dropped, so it never produces a blank page.
    pub fn skip(&mut self, height: f32) {
        if self.y - height < self.bottom {
            if !self.at_top() {
                self.new_page();
            }
        } else {
            self.y -= height;
        }
    }
}

/// A fragment of a word sharing one face.
#[derive(Debug, Clone)]
struct Fragment {
    text: String,
    face: FontFace,
    underline: bool,
    width: f32,
}

#[derive(Debug, Clone, Default)]
struct Word {
    fragments: Vec<Fragment>,
    /// Whether the whitespace before this word was underlined
    gap_underlined: bool,
    width: f32,
}

/// Split styled spans into words at whitespace, grouped into segments
/// separated by hard line breaks (`\n`).
///
/// There is always at least one segment; a segment may be empty.
fn split_segments(spans: &[Span]) -> Vec<Vec<Word>> {
    let mut segments = Vec::new();
    let mut words = Vec::new();
    let mut current = Word::default();
    let mut gap_underlined = false;

    for span in spans {
        let face = FontFace {
            bold: span.bold,
            italic: span.italic,
        };
        let mut fragment_open = false;
        for c in span.text.chars() {
            if c == '\n' {
                if !current.fragments.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                segments.push(std::mem::take(&mut words));
                gap_underlined = false;
                fragment_open = false;
                continue;
            }
            if c.is_whitespace() {
                if !current.fragments.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                gap_underlined = span.underline;
                fragment_open = false;
                continue;
            }
            if current.fragments.is_empty() {
                current.gap_underlined = gap_underlined;
            }
            if !fragment_open {
                current.fragments.push(Fragment {
                    text: String::new(),
                    face,
                    underline: span.underline,
                    width: 0.0,
                });
                fragment_open = true;
            }
            if let Some(fragment) = current.fragments.last_mut() {
                fragment.text.push(c);
            }
        }
    }
    if !current.fragments.is_empty() {
        words.push(current);
    }
    segments.push(words);

    segments
}

/// Lays blocks out onto pages.
pub struct Paginator<'a, M: TextMeasure + ?Sized> {
    options: &'a RenderOptions,
    measure: &'a M,
    cursor: PageCursor,
    pages: Vec<Page>,
    stats: RenderStats,
}

impl<'a, M: TextMeasure + ?Sized> Paginator<'a, M> {
    /// Create a paginator positioned at the top of the first page.
    pub fn new(options: &'a RenderOptions, measure: &'a M) -> Self {
        Self {
            options,
            measure,
            cursor: PageCursor::new(options),
            pages: Vec::new(),
            stats: RenderStats::new(),
        }
    }

    /// Current cursor state.
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Mutable access to the cursor.
    pub fn cursor_mut(&mut self) -> &mut PageCursor {
        &mut self.cursor
    }

    fn page_mut(&mut self, index: usize) -> &mut Page {
        while self.pages.len() <= index {
            let number = self.pages.len() as u32 + 1;
            self.pages.push(Page::new(number));
        }
        &mut self.pages[index]
    }

    /// Lay out one block.
    pub fn push_block(&mut self, block: &LayoutBlock) -> Result<()> {
        match block {
            LayoutBlock::Spacer { height } => {
                self.cursor.skip(*height);
                self.stats.add_spacer();
                Ok(())
            }
            LayoutBlock::Text { markup, style } => self.push_text(markup, style),
        }
    }

    fn push_text(&mut self, markup: &str, style: &BlockStyle) -> Result<()> {
        let family = FontFamily::from_name(&style.font);
        let spans = parse_markup(markup)?;
        let mut segments = split_segments(&spans);

        for word in segments.iter_mut().flatten() {
            let mut total = 0.0;
            for fragment in &mut word.fragments {
                let font = FontSpec::new(family, fragment.face, style.size);
                fragment.width = self.measure.width(&fragment.text, &font)?;
                total += fragment.width;
            }
            word.width = total;
        }

        let space = self
            .measure
            .width(" ", &FontSpec::regular(family, style.size))?;
        let line_width = self.options.content_width() - style.left_indent - style.right_indent;
        let available = |line: usize| {
            if line == 0 {
                line_width - style.first_line_indent
            } else {
                line_width
            }
        };
        let natural = |words: &[Word]| {
            let gaps = words.len().saturating_sub(1) as f32;
            words.iter().map(|w| w.width).sum::<f32>() + gaps * space
        };

        if segments.iter().all(Vec::is_empty) {
            self.stats.add_text_block();
            return Ok(());
        }

        let mut first_line = 0;
        for words in &segments {
            // An empty segment between hard breaks is a blank line.
            if words.is_empty() {
                self.cursor.place_line(style.leading);
                first_line += 1;
                continue;
            }

            let ranges = break_lines(words.len(), |range, line| {
                Ok(natural(&words[range]) <= available(first_line + line))
            })?;

            let line_count = ranges.len();
            for (index, range) in ranges.into_iter().enumerate() {
                let line_number = first_line + index;
                let line_words = &words[range];
                let avail = available(line_number);
                let width = natural(line_words);
                let slack = avail - width;

                let mut gap = space;
                let offset = match style.alignment {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => (slack / 2.0).max(0.0),
                    TextAlign::Right => slack.max(0.0),
                    TextAlign::Justify => {
                        // Lines ending a paragraph or a hard break stay ragged.
                        let last = index + 1 == line_count;
                        if !last && line_words.len() > 1 && slack > 0.0 {
                            gap += slack / (line_words.len() - 1) as f32;
                        }
                        0.0
                    }
                };

                // A hanging indent larger than the left indent starts the
                // first line inside the left margin, as word processors do.
                let indent = if line_number == 0 { style.first_line_indent } else { 0.0 };
                let x0 = self.options.margins.left + style.left_indent + indent + offset;

                let (page, baseline) = self.cursor.place_line(style.leading);
                let (line, rules) = place_words(line_words, family, style.size, x0, gap, baseline);
                let page = self.page_mut(page);
                page.lines.push(line);
                page.rules.extend(rules);

                self.stats.add_line(line_words.len());
            }
            first_line += line_count;
        }

        self.stats.add_text_block();
        Ok(())
    }

    /// Lay out a single line of plain text at the left margin.
    pub fn push_plain_line(&mut self, text: &str, font: FontSpec, height: f32) -> Result<()> {
        let (page, baseline) = self.cursor.place_line(height);
        let width = self.measure.width(text, &font)?;
        let x = self.options.margins.left;
        let words = text.split_whitespace().count();
        self.page_mut(page).lines.push(PlacedLine {
            baseline,
            runs: vec![PlacedRun {
                x,
                text: text.to_string(),
                font,
                width,
            }],
        });
        self.stats.add_line(words);
        Ok(())
    }

    /// Finish the layout.
    pub fn finish(mut self) -> PagedDocument {
        if self.pages.is_empty() {
            self.pages.push(Page::new(1));
        }
        self.stats.page_count = self.pages.len() as u32;

        log::debug!(
            "Laid out {} lines on {} pages",
            self.stats.line_count,
            self.stats.page_count
        );

        PagedDocument {
            page_size: self.options.page_size,
            pages: self.pages,
            stats: self.stats,
        }
    }
}

fn place_words(
    words: &[Word],
    family: FontFamily,
    size: f32,
    x0: f32,
    gap: f32,
    baseline: f32,
) -> (PlacedLine, Vec<Rule>) {
    let underline_y = baseline - size * 0.1;
    let thickness = size * 0.05;

    let mut runs = Vec::new();
    let mut rules = Vec::new();
    let mut x = x0;
    let mut previous_end: Option<f32> = None;

    for word in words {
        if let Some(end) = previous_end {
            x = end + gap;
            if word.gap_underlined {
                rules.push(Rule {
                    x1: end,
                    x2: x,
                    y: underline_y,
                    thickness,
                });
            }
        }
        for fragment in &word.fragments {
            if fragment.underline {
                rules.push(Rule {
                    x1: x,
                    x2: x + fragment.width,
                    y: underline_y,
                    thickness,
                });
            }
            runs.push(PlacedRun {
                x,
                text: fragment.text.clone(),
                font: FontSpec::new(family, fragment.face, size),
                width: fragment.width,
            });
            x += fragment.width;
        }
        previous_end = Some(x);
    }

    (PlacedLine { baseline, runs }, rules)
}

/// Lay out blocks onto pages.
pub fn paginate<M>(blocks: &[LayoutBlock], options: &RenderOptions, measure: &M) -> Result<PagedDocument>
where
    M: TextMeasure + ?Sized,
{
    options.validate()?;
    let mut paginator = Paginator::new(options, measure);
    for block in blocks {
        paginator.push_block(block)?;
    }
    Ok(paginator.finish())
}
