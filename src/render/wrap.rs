//! Greedy first-fit line breaking.

use crate::error::Result;
use std::ops::Range;

/// Break `count` words into lines, first-fit.
///
/// `fits(range, line)` reports whether words `range` fit on line number
/// `line`. Words are added to the current line until the next one would
/// overflow; the line is then committed and the overflowing word starts the
/// next line. A line always holds at least one word, so a word wider than
/// the line is placed on its own.
pub fn break_lines<F>(count: usize, mut fits: F) -> Result<Vec<Range<usize>>>
where
    F: FnMut(Range<usize>, usize) -> Result<bool>,
{
    let mut lines = Vec::new();
    if count == 0 {
        return Ok(lines);
    }

    let mut start = 0;
    for end in 1..count {
        if !fits(start..end + 1, lines.len())? {
            lines.push(start..end);
            start = end;
        }
    }
    lines.push(start..count);

    Ok(lines)
}

/// Wrap words into lines no wider than `max_width`.
///
/// Candidate lines are measured as the words joined by single spaces.
pub fn wrap_words<S, F>(words: &[S], max_width: f32, mut measure: F) -> Result<Vec<String>>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Result<f32>,
{
    let join = |range: Range<usize>| {
        words[range]
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let ranges = break_lines(words.len(), |range, _| {
        Ok(measure(&join(range))? <= max_width)
    })?;

    Ok(ranges.into_iter().map(join).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_greedy_first_fit() {
        let words = ["alpha", "beta", "gamma"];
        let measure = |line: &str| -> Result<f32> {
            Ok(if line == "alpha beta gamma" { 100.0 } else { 50.0 })
        };

        let lines = wrap_words(&words, 60.0, measure).unwrap();
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_everything_fits() {
        let words = ["one", "two", "three"];
        let lines = wrap_words(&words, 1000.0, |s: &str| Ok(s.len() as f32)).unwrap();
        assert_eq!(lines, vec!["one two three"]);
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let words = ["a", "enormous", "b"];
        let lines = wrap_words(&words, 3.0, |s: &str| Ok(s.len() as f32)).unwrap();
        assert_eq!(lines, vec!["a", "enormous", "b"]);
    }

    #[test]
    fn test_deterministic() {
        let words: Vec<String> = "the quick brown fox jumps over the lazy dog"
            .split(' ')
            .map(String::from)
            .collect();
        let measure = |s: &str| -> Result<f32> { Ok(s.len() as f32) };

        let first = wrap_words(&words, 12.0, measure).unwrap();
        let second = wrap_words(&words, 12.0, measure).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["the quick", "brown fox", "jumps over", "the lazy dog"]);
    }

    #[test]
    fn test_empty_input() {
        let words: [&str; 0] = [];
        let lines = wrap_words(&words, 10.0, |_: &str| Ok(0.0)).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_measure_error_propagates() {
        let words = ["a", "b"];
        let result = wrap_words(&words, 10.0, |_: &str| -> Result<f32> {
            Err(Error::Translation("no metrics".into()))
        });
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[test]
    fn test_break_lines_uses_line_index() {
        // First line holds two words, later lines hold three.
        let ranges = break_lines(8, |range, line| Ok(range.len() <= if line == 0 { 2 } else { 3 }))
            .unwrap();
        assert_eq!(ranges, vec![0..2, 2..5, 5..8]);
    }
}
