//! Lookahead predicates. Nothing in here moves the cursor.

use crate::node::NodeKind;
use crate::parser::scanner::Scanner;

/// An inline construct that has a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Bold,
    Italic,
    Code,
    Image,
    Link,
    Escaped,
    UnorderedList,
    OrderedList,
}

impl Construct {
    pub fn kind(self) -> NodeKind {
        match self {
            Construct::Bold => NodeKind::Bold,
            Construct::Italic => NodeKind::Italic,
            Construct::Code => NodeKind::Code,
            Construct::Image => NodeKind::Image,
            Construct::Link => NodeKind::Link,
            Construct::Escaped => NodeKind::Escaped,
            Construct::UnorderedList => NodeKind::UnorderedList,
            Construct::OrderedList => NodeKind::OrderedList,
        }
    }
}

/// Decide the root construct of a block.
pub fn block_type(s: &Scanner) -> NodeKind {
    match s.ch() {
        Some('>') if s.peek_ahead(0) == Some(' ') => NodeKind::Quote,
        Some('-') if s.peek_ahead(0) == Some(' ') => NodeKind::UnorderedList,
        Some('#') => NodeKind::heading(heading_run(s)),
        Some(c) if c.is_ascii_digit() && is_ordered_list_marker(s) => NodeKind::OrderedList,
        _ => NodeKind::Paragraph,
    }
}

/// Length of the `#` run starting at the cursor.
fn heading_run(s: &Scanner) -> usize {
    let start = s.position();
    let mut index = start;
    while s.char_at(index) == Some('#') {
        index += 1;
    }
    index - start
}

/// Decide whether an inline construct starts at the cursor.
/// `None` means the character is plain text.
pub fn inline_type(s: &Scanner) -> Option<Construct> {
    match s.ch()? {
        '*' if s.peek_ahead(0) == Some('*') => Some(Construct::Bold),
        '*' => Some(Construct::Italic),
        '`' if s.peek_ahead(0) == Some('`') && s.peek_ahead(1) == Some('`') => {
            Some(Construct::Code)
        }
        '!' if s.peek_ahead(0) == Some('[') => Some(Construct::Image),
        '[' => Some(Construct::Link),
        '-' if s.peek_ahead(0) == Some(' ') => Some(Construct::UnorderedList),
        '\\' => Some(Construct::Escaped),
        c if c.is_ascii_digit() && is_ordered_list_marker(s) => Some(Construct::OrderedList),
        _ => None,
    }
}

/// `**` opens bold only when a third `*` does not follow.
pub fn check_bold(s: &Scanner) -> bool {
    s.ch() == Some('*') && s.peek_ahead(0) == Some('*') && s.peek_ahead(1) != Some('*')
}

/// A run of one or more digits followed by `. ` starts at the cursor.
pub fn is_ordered_list_marker(s: &Scanner) -> bool {
    let start = s.position();
    let mut index = start;
    while s.char_at(index).is_some_and(|c| c.is_ascii_digit()) {
        index += 1;
    }

    index > start && s.char_at(index) == Some('.') && s.char_at(index + 1) == Some(' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("> quoted", NodeKind::Quote)]
    #[case(">no space", NodeKind::Paragraph)]
    #[case("- item", NodeKind::UnorderedList)]
    #[case("-item", NodeKind::Paragraph)]
    #[case("# one", NodeKind::Heading1)]
    #[case("### three", NodeKind::Heading3)]
    #[case("###### six", NodeKind::Heading6)]
    #[case("######### nine", NodeKind::Heading6)]
    #[case("12. twelve", NodeKind::OrderedList)]
    #[case("12.no space", NodeKind::Paragraph)]
    #[case("2024 was a year", NodeKind::Paragraph)]
    #[case("plain", NodeKind::Paragraph)]
    #[case("", NodeKind::Paragraph)]
    fn classifies_blocks(#[case] input: &str, #[case] expected: NodeKind) {
        assert_eq!(block_type(&Scanner::new(input)), expected);
    }

    #[rstest]
    #[case("**b**", Some(Construct::Bold))]
    #[case("*i*", Some(Construct::Italic))]
    #[case("```c```", Some(Construct::Code))]
    #[case("`c`", None)]
    #[case("![a](b)", Some(Construct::Image))]
    #[case("!bang", None)]
    #[case("[a](b)", Some(Construct::Link))]
    #[case("- x", Some(Construct::UnorderedList))]
    #[case("3. x", Some(Construct::OrderedList))]
    #[case("3 x", None)]
    #[case("\\*", Some(Construct::Escaped))]
    #[case("a", None)]
    #[case("", None)]
    fn classifies_inline_constructs(#[case] input: &str, #[case] expected: Option<Construct>) {
        assert_eq!(inline_type(&Scanner::new(input)), expected);
    }

    #[test]
    fn triple_asterisk_is_not_bold() {
        assert!(check_bold(&Scanner::new("**x")));
        assert!(!check_bold(&Scanner::new("***x")));
        assert!(check_bold(&Scanner::new("**")));
    }

    #[test]
    fn ordered_marker_needs_digits() {
        assert!(is_ordered_list_marker(&Scanner::new("1. a")));
        assert!(is_ordered_list_marker(&Scanner::new("100. a")));
        assert!(!is_ordered_list_marker(&Scanner::new(". a")));
        assert!(!is_ordered_list_marker(&Scanner::new("1.")));
    }
}
