use std::ops::Range;

/// Character cursor over one block of input with a single character of lookahead.
///
/// `current` indexes the character under the cursor. Once every character has
/// been consumed the cursor rests at `len`, where `ch()` reports end of input.
#[derive(Debug, Clone)]
pub struct Scanner {
    source: String,
    chars: Vec<char>,
    /// Byte offset of each character, plus one trailing entry for `source.len()`.
    byte_pos: Vec<usize>,
    current: usize,
}

impl Scanner {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let chars: Vec<char> = source.chars().collect();
        let mut byte_pos = Vec::with_capacity(chars.len() + 1);
        let mut offset = 0;
        for c in &chars {
            byte_pos.push(offset);
            offset += c.len_utf8();
        }
        byte_pos.push(offset);

        Scanner {
            source,
            chars,
            byte_pos,
            current: 0,
        }
    }

    /// The character under the cursor, `None` at end of input.
    pub fn ch(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn at_eof(&self) -> bool {
        self.current >= self.chars.len()
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Move forward one character. Saturates at end of input.
    pub fn advance(&mut self) {
        if self.current < self.chars.len() {
            self.current += 1;
        }
    }

    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// The character `n` positions past the lookahead position.
    /// `peek_ahead(0)` is the character right after the cursor.
    pub fn peek_ahead(&self, n: usize) -> Option<char> {
        self.char_at(self.current + 1 + n)
    }

    /// The character `n` positions behind the cursor, clamped to the first
    /// character at the low end.
    pub fn peek_behind(&self, n: usize) -> Option<char> {
        self.char_at(self.current.saturating_sub(n))
    }

    /// Source text between two character indices.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        &self.source[self.byte_pos[start]..self.byte_pos[end]]
    }

    /// Byte span of the source between two character indices.
    pub fn byte_span(&self, start: usize, end: usize) -> Range<usize> {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.byte_pos[start]..self.byte_pos[end]
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance_saturates_at_end() {
        let mut scanner = Scanner::new("ab");
        scanner.advance_by(5);
        assert!(scanner.at_eof());
        assert_eq!(scanner.ch(), None);
        assert_eq!(scanner.position(), 2);
    }

    #[test]
    fn empty_input_starts_at_eof() {
        let scanner = Scanner::new("");
        assert!(scanner.at_eof());
        assert_eq!(scanner.peek_ahead(0), None);
        assert_eq!(scanner.peek_behind(1), None);
    }

    #[test]
    fn lookahead_does_not_move_the_cursor() {
        let scanner = Scanner::new("abc");
        assert_eq!(scanner.peek_ahead(0), Some('b'));
        assert_eq!(scanner.peek_ahead(1), Some('c'));
        assert_eq!(scanner.peek_ahead(2), None);
        assert_eq!(scanner.ch(), Some('a'));
    }

    #[test]
    fn peek_behind_clamps_to_first_character() {
        let mut scanner = Scanner::new("xyz");
        scanner.advance();
        assert_eq!(scanner.peek_behind(1), Some('x'));
        assert_eq!(scanner.peek_behind(10), Some('x'));
        scanner.advance_by(2);
        assert_eq!(scanner.peek_behind(0), None);
        assert_eq!(scanner.peek_behind(1), Some('z'));
    }

    #[test]
    fn slices_respect_multibyte_characters() {
        let scanner = Scanner::new("héllo wörld");
        assert_eq!(scanner.slice(1, 5), "éllo");
        assert_eq!(scanner.slice(6, 99), "wörld");
        assert_eq!(scanner.byte_span(0, 2), 0..3);
    }
}
