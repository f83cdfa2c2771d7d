//! Word document reading.

mod docx;
mod options;

pub use docx::DocxReader;
pub use options::{ErrorMode, ReadOptions};
