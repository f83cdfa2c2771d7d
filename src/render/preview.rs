//! Plain-text preview of a paginated layout.

use super::paginate::PagedDocument;

/// Width of the indentation grid, in points per character.
const POINTS_PER_COLUMN: f32 = 6.0;

/// Render pages as text, one section per page.
///
/// Each line is indented by its horizontal offset from the leftmost line
/// on the page, so centring and indents remain visible.
pub fn to_preview(paged: &PagedDocument) -> String {
    let mut output = String::new();

    for page in &paged.pages {
        output.push_str(&format!("--- Page {} ---\n", page.number));

        let left = page
            .lines
            .iter()
            .filter_map(|line| line.runs.first())
            .map(|run| run.x)
            .fold(f32::INFINITY, f32::min);

        for line in &page.lines {
            let offset = line.runs.first().map_or(0.0, |run| run.x - left);
            let columns = (offset / POINTS_PER_COLUMN).round().max(0.0) as usize;
            output.push_str(&" ".repeat(columns));
            output.push_str(&line.text());
            output.push('\n');
        }
    }

    output
}
