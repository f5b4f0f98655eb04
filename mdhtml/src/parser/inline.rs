use crate::node::{Attribute, Node, NodeKind};
use crate::parser::classify::{self, Construct};
use crate::parser::scanner::Scanner;
use crate::parser::{FallbackReason, Parser};

fn closes_bold(s: &Scanner) -> bool {
    s.ch() == Some('*') && s.peek_ahead(0) == Some('*')
}

fn closes_italic(s: &Scanner) -> bool {
    s.ch() == Some('*') && s.peek_ahead(0) != Some('*')
}

fn closes_code(s: &Scanner) -> bool {
    s.ch() == Some('`') && s.peek_ahead(0) == Some('`') && s.peek_ahead(1) == Some('`')
}

fn closes_label(s: &Scanner) -> bool {
    s.ch() == Some(']')
}

fn closes_target(s: &Scanner) -> bool {
    s.ch() == Some(')')
}

impl Parser {
    /// Bold and italic share an entry point; `check_bold` picks the delimiter width.
    pub(super) fn parse_emphasis(&mut self) -> Node {
        if classify::check_bold(&self.scanner) {
            self.parse_children(2, closes_bold, NodeKind::Bold)
        } else {
            self.parse_children(1, closes_italic, NodeKind::Italic)
        }
    }

    /// Code spans still run the inline loop, so markup inside them is parsed.
    pub(super) fn parse_code(&mut self) -> Node {
        self.parse_children(3, closes_code, NodeKind::Code)
    }

    pub(super) fn parse_escaped(&mut self) -> Node {
        self.scanner.advance();
        match self.scanner.ch() {
            Some(escaped) => {
                self.scanner.advance();
                Node::text(escaped.to_string())
            }
            // A trailing backslash has nothing to escape and stays literal.
            None => Node::text("\\"),
        }
    }

    pub(super) fn parse_image_link(&mut self, construct: Construct) -> Node {
        let kind = construct.kind();
        let start = self.scanner.position();
        if construct == Construct::Image {
            self.scanner.advance();
        }

        let label = self.collect_children(1, closes_label);
        if !label.closed {
            self.record_fallback(kind, FallbackReason::Unterminated, start);
            return self.verbatim_from(start);
        }
        if self.scanner.ch() != Some('(') {
            self.record_fallback(kind, FallbackReason::MissingTarget, start);
            return self.verbatim_from(start);
        }

        let target = self.collect_children(1, closes_target);
        if !target.closed {
            self.record_fallback(kind, FallbackReason::UnclosedTarget, start);
            return self.verbatim_from(start);
        }

        let label = Node::parent(NodeKind::PlainText, label.nodes).to_html();
        let target = Node::parent(NodeKind::PlainText, target.nodes).to_html();
        match construct {
            Construct::Image => Node::leaf(
                NodeKind::Image,
                "",
                vec![Attribute::new("alt", label), Attribute::new("src", target)],
            ),
            _ => Node::leaf(NodeKind::Link, label, vec![Attribute::new("href", target)]),
        }
    }
}
