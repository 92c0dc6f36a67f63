use std::ops::AddAssign;

/// Characters that count as sentence marks.
pub const SENTENCE_MARKS: [char; 3] = ['.', '!', '?'];

/// Word separators: Unicode whitespace plus the ASCII information
/// separators U+001C to U+001F.
fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Basic statistics of a piece of text.
///
/// `sentences` is the number of sentence marks (`.`, `!`, `?`) anywhere in
/// the text, not a count of grammatical sentences: ellipses, decimal points
/// and abbreviations all add to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Unicode scalar values, whitespace and line terminators included.
    pub characters: usize,
    /// Tokens delimited by whitespace or information separators.
    pub words: usize,
    pub sentences: usize,
}

impl TextStats {
    /// Computes the statistics of `text` from scratch.
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split(is_word_separator).filter(|w| !w.is_empty()).count(),
            sentences: text.chars().filter(|c| SENTENCE_MARKS.contains(c)).count(),
        }
    }
}

/// Adds the statistics of a following chunk.
///
/// Only exact when the text counted so far ends in whitespace (or is empty),
/// otherwise a word split across the boundary is counted twice. Lines read
/// with their terminator satisfy this.
impl AddAssign for TextStats {
    fn add_assign(&mut self, rhs: Self) {
        self.characters += rhs.characters;
        self.words += rhs.words;
        self.sentences += rhs.sentences;
    }
}
