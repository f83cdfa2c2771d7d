//! Statistics collected while laying out and writing pages.

use serde::{Deserialize, Serialize};

/// Statistics collected during layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of pages produced
    pub page_count: u32,

    /// Number of text lines placed
    pub line_count: u32,

    /// Number of text blocks laid out
    pub text_block_count: u32,

    /// Number of spacers applied
    pub spacer_count: u32,

    /// Number of words placed
    pub word_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment text block count.
    pub fn add_text_block(&mut self) {
        self.text_block_count += 1;
    }

    /// Increment spacer count.
    pub fn add_spacer(&mut self) {
        self.spacer_count += 1;
    }

    /// Record a placed line holding `words` words.
    pub fn add_line(&mut self, words: usize) {
        self.line_count += 1;
        self.word_count += words as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.page_count += other.page_count;
        self.line_count += other.line_count;
        self.text_block_count += other.text_block_count;
        self.spacer_count += other.spacer_count;
        self.word_count += other.word_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line() {
        let mut stats = RenderStats::new();
        stats.add_line(4);
        stats.add_line(2);

        assert_eq!(stats.line_count, 2);
        assert_eq!(stats.word_count, 6);
    }

    #[test]
    fn test_render_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.page_count = 2;
        stats1.text_block_count = 5;

        let stats2 = RenderStats {
            page_count: 1,
            text_block_count: 3,
            spacer_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.page_count, 3);
        assert_eq!(stats1.text_block_count, 8);
        assert_eq!(stats1.spacer_count, 4);
    }
}
