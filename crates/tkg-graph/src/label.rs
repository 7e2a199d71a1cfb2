//! Word wrapping for node labels

/// Wraps label text at word boundaries to a fixed column width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormatter {
    /// Maximum characters per line
    pub width: usize,
    /// Split words longer than `width` into `width`-sized pieces
    pub break_long_words: bool,
}

impl LabelFormatter {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            break_long_words: true,
        }
    }

    /// Keep overlong words whole instead of splitting them
    pub fn with_break_long_words(mut self, enabled: bool) -> Self {
        self.break_long_words = enabled;
        self
    }

    /// Wrap `text` into `\n`-separated lines of at most `width` characters.
    ///
    /// Runs of whitespace collapse to a single space. A hyphen that follows a
    /// letter is also a break point and stays at the end of its line. With
    /// long-word breaking disabled, a word longer than the width sits alone on
    /// its own line.
    pub fn wrap(&self, text: &str) -> String {
        let width = self.width.max(1);
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            for (i, piece) in hyphen_pieces(word).into_iter().enumerate() {
                // Only the first piece of a word is preceded by a space
                let sep = usize::from(i == 0 && current_len > 0);
                let piece_len = piece.chars().count();

                if current_len + sep + piece_len <= width {
                    if sep == 1 {
                        current.push(' ');
                    }
                    current.push_str(piece);
                    current_len += sep + piece_len;
                    continue;
                }

                if piece_len <= width || !self.break_long_words {
                    if current_len > 0 {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push_str(piece);
                    current_len = piece_len;
                    continue;
                }

                // Fill the remainder of the current line, then emit full chunks
                let mut chars = piece.chars().peekable();
                if current_len > 0 {
                    let room = width.saturating_sub(current_len + sep);
                    if room > 0 {
                        if sep == 1 {
                            current.push(' ');
                        }
                        current.extend(chars.by_ref().take(room));
                    }
                    lines.push(std::mem::take(&mut current));
                }

                current_len = 0;
                while chars.peek().is_some() {
                    let chunk: String = chars.by_ref().take(width).collect();
                    current_len = chunk.chars().count();
                    if chars.peek().is_some() {
                        lines.push(chunk);
                    } else {
                        current = chunk;
                    }
                }
            }
        }

        if current_len > 0 {
            lines.push(current);
        }

        lines.join("\n")
    }
}

/// Split a word after every hyphen that follows a letter and precedes a
/// letter or digit. `some-longname` becomes `["some-", "longname"]`.
fn hyphen_pieces(word: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = word.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if c == '-'
            && prev.is_some_and(char::is_alphabetic)
            && next.is_some_and(char::is_alphanumeric)
        {
            let end = i + c.len_utf8();
            pieces.push(&word[start..end]);
            start = end;
        }
        prev = Some(c);
    }

    pieces.push(&word[start..]);
    pieces
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::new(15)
    }
}

/// Wrap `text` to `width` columns, breaking overlong words
pub fn wrap_label(text: &str, width: usize) -> String {
    LabelFormatter::new(width).wrap(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_label_unchanged() {
        assert_eq!(wrap_label("Alice Smith", 15), "Alice Smith");
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        assert_eq!(
            wrap_label("Maria Fernanda Oliveira", 15),
            "Maria Fernanda\nOliveira"
        );
    }

    #[test]
    fn test_breaks_long_email() {
        assert_eq!(
            wrap_label("geoffrey.hinton@toronto.edu", 15),
            "geoffrey.hinton\n@toronto.edu"
        );
    }

    #[test]
    fn test_breaks_after_hyphen() {
        assert_eq!(wrap_label("some-longname@x.io", 15), "some-\nlongname@x.io");
        assert_eq!(wrap_label("Mary-Kate Olsen", 6), "Mary-\nKate\nOlsen");
        assert_eq!(wrap_label("Jean-Luc Picard", 15), "Jean-Luc Picard");
    }

    #[test]
    fn test_hyphen_without_letter_before_is_not_a_break() {
        assert_eq!(hyphen_pieces("some-longname"), vec!["some-", "longname"]);
        assert_eq!(hyphen_pieces("2-factor"), vec!["2-factor"]);
        assert_eq!(hyphen_pieces("--flag"), vec!["--flag"]);
        assert_eq!(hyphen_pieces("trailing-"), vec!["trailing-"]);
    }

    #[test]
    fn test_long_word_fills_current_line_first() {
        assert_eq!(wrap_label("Dr abcdefghij", 6), "Dr abc\ndefghi\nj");
    }

    #[test]
    fn test_long_word_kept_whole_when_breaking_disabled() {
        let formatter = LabelFormatter::new(10).with_break_long_words(false);
        assert_eq!(
            formatter.wrap("to averyverylongword now"),
            "to\naveryverylongword\nnow"
        );
    }

    #[test]
    fn test_collapses_whitespace_and_empty_input() {
        assert_eq!(wrap_label("  Bob    Lee  ", 15), "Bob Lee");
        assert_eq!(wrap_label("", 15), "");
        assert_eq!(wrap_label("abc", 0), "a\nb\nc");
    }

    proptest! {
        #[test]
        fn prop_lines_fit_width(text in "[a-z@. -]{0,80}", width in 1usize..30) {
            let wrapped = wrap_label(&text, width);
            for line in wrapped.lines() {
                prop_assert!(line.chars().count() <= width);
            }
            let original: String = text.split_whitespace().collect();
            let rejoined: String = wrapped.split_whitespace().collect();
            prop_assert_eq!(original, rejoined);
        }
    }
}
