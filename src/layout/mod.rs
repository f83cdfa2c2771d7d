//! Layout translation from flow formatting to fixed-layout blocks.
//!
//! The translator walks a [`Document`](crate::model::Document) and produces a
//! flat sequence of [`LayoutBlock`]s: spacers for paragraph spacing and text
//! blocks carrying escaped markup plus a resolved [`BlockStyle`]. The blocks
//! are consumed by the paginating renderer in [`crate::render`].

mod block;
pub mod normalize;
mod options;
mod translate;

pub use block::{BlockStyle, LayoutBlock, TextAlign};
pub use normalize::{escape_markup, normalize, unescape_markup};
pub use options::TranslateOptions;
pub use translate::{compose_markup, resolve_style, translate, translate_with_options};
