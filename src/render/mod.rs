//! Rendering of layout blocks onto PDF pages.
//!
//! The pipeline runs markup parsing, measurement, greedy line wrapping and
//! pagination, then serializes the pages with [`pdf::write_pdf`].

mod json;
pub mod markup;
pub mod metrics;
mod options;
pub mod paginate;
pub mod pdf;
mod plain;
mod preview;
mod result;
pub mod wrap;

pub use json::{to_json, value_to_json, JsonFormat};
pub use markup::{parse_markup, Span};
pub use metrics::{FontFace, FontFamily, FontSpec, StandardMetrics, TextMeasure};
pub use options::{Margins, PageSize, RenderOptions};
pub use paginate::{paginate, Page, PageCursor, PagedDocument, PlacedLine, PlacedRun, Rule};
pub use pdf::{build, to_pdf_bytes, write_pdf};
pub use plain::{layout_plain, PLAIN_FONT_SIZE, PLAIN_LEADING};
pub use preview::to_preview;
pub use result::RenderStats;
pub use wrap::{break_lines, wrap_words};
