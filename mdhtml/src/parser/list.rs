use crate::node::{Node, NodeKind};
use crate::parser::Parser;
use crate::parser::classify;
use crate::parser::scanner::Scanner;

fn starts_unordered_item(s: &Scanner) -> bool {
    s.ch() == Some('-') && s.peek_ahead(0) == Some(' ')
}

impl Parser {
    /// One `- ` item. The enclosing block wraps consecutive items in its own list node.
    pub(super) fn parse_unordered_item(&mut self) -> Node {
        self.scanner.advance_by(2);
        self.parse_children(0, starts_unordered_item, NodeKind::ListElement)
    }

    /// One `N. ` item. The marker is consumed here, so the item itself has no delimiter.
    pub(super) fn parse_ordered_item(&mut self) -> Node {
        while self.scanner.ch().is_some_and(|c| c.is_ascii_digit()) {
            self.scanner.advance();
        }
        self.scanner.advance_by(2);
        self.parse_children(0, classify::is_ordered_list_marker, NodeKind::ListElement)
    }
}
