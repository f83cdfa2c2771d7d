//! JSON output of layout blocks.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::layout::LayoutBlock;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert layout blocks to JSON.
pub fn to_json(blocks: &[LayoutBlock], format: JsonFormat) -> Result<String> {
    value_to_json(blocks, format)
}

/// Serialize any value with the given format.
pub fn value_to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BlockStyle;

    #[test]
    fn test_to_json_pretty() {
        let blocks = vec![
            LayoutBlock::spacer(10.0),
            LayoutBlock::text("<b>Hi</b>", BlockStyle::default()),
        ];

        let json = to_json(&blocks, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"spacer\""));
        assert!(json.contains("<b>Hi</b>"));
        assert!(json.contains("\"LEFT\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&[LayoutBlock::spacer(5.0)], JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"[{"type":"spacer","height":5.0}]"#);
    }
}
