//! Text normalization and markup escaping for run text.

/// Remove control characters from run text.
///
/// Drops C0 controls except newline, tab and carriage return, plus DEL and
/// the C1 range. Whitespace and punctuation are left untouched, so the
/// function is idempotent.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|&c| !is_stripped_control(c)).collect()
}

fn is_stripped_control(c: char) -> bool {
    match c {
        '\n' | '\t' | '\r' => false,
        '\u{0}'..='\u{1F}' => true,
        '\u{7F}'..='\u{9F}' => true,
        _ => false,
    }
}

/// Escape the characters reserved by block markup.
///
/// `&` is replaced first so the entities introduced for `<` and `>` are not
/// escaped a second time.
pub fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reverse [`escape_markup`].
///
/// `&amp;` is resolved last so that `&amp;lt;` yields the literal `&lt;`.
pub fn unescape_markup(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_controls() {
        assert_eq!(normalize("a\u{0}b\u{7}c"), "abc");
        assert_eq!(normalize("x\u{7F}y\u{85}z\u{9F}"), "xyz");
    }

    #[test]
    fn test_normalize_keeps_whitespace() {
        let text = "line one\nline\ttwo\r\n  spaced  ,  punct .";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_normalize_keeps_unicode() {
        assert_eq!(normalize("Grüße – “quoted” 日本"), "Grüße – “quoted” 日本");
        assert_eq!(normalize("\u{A0}nbsp"), "\u{A0}nbsp");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "",
            "plain",
            "\u{1}\u{2}\n\t\r",
            "mixed\u{80}\u{9F}\u{A0}text\u{7F}",
            "  many   spaces  ",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_markup("no specials"), "no specials");
    }

    #[test]
    fn test_escape_does_not_double_escape() {
        assert_eq!(escape_markup("&amp;"), "&amp;amp;");
        assert_eq!(escape_markup("<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for s in ["a < b", "&amp;", "&lt;literal&gt;", "x & y > z"] {
            assert_eq!(unescape_markup(&escape_markup(s)), s);
        }
    }
}
