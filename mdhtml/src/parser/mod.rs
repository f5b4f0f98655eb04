pub mod classify;
pub mod fallback;
mod inline;
mod list;
pub mod scanner;

pub use fallback::{Fallback, FallbackReason};

use tracing::trace;

use crate::node::{Node, NodeKind};
use crate::parser::classify::Construct;
use crate::parser::scanner::Scanner;

/// Predicate deciding where a construct's content ends.
type BreakCondition = fn(&Scanner) -> bool;

/// The result of parsing one block.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub root: Node,
    /// Constructs that degraded to literal text, in the order they were closed.
    pub fallbacks: Vec<Fallback>,
}

/// Parser entry point. One parser handles exactly one block.
pub struct Parser {
    scanner: Scanner,
    fallbacks: Vec<Fallback>,
}

impl Parser {
    pub fn new(source: impl Into<String>) -> Self {
        Parser {
            scanner: Scanner::new(source),
            fallbacks: Vec::new(),
        }
    }

    /// Parse the whole block into a root node of the block's kind.
    pub fn parse(mut self) -> Parsed {
        let root = self.parse_block();
        Parsed {
            root,
            fallbacks: self.fallbacks,
        }
    }

    fn parse_block(&mut self) -> Node {
        let kind = classify::block_type(&self.scanner);
        self.scanner.advance_by(block_marker_width(kind));

        let mut run = TextRun::new(self.scanner.position());
        while !self.scanner.at_eof() {
            self.build_nested_or_read(&mut run);
        }
        run.flush(&self.scanner);

        Node::parent(kind, run.into_nodes())
    }

    /// Generic loop shared by every delimited construct.
    ///
    /// Reaching end of input before the closing delimiter degrades the
    /// construct to its verbatim source, unless `kind` is block-terminated.
    fn parse_children(&mut self, width: usize, until: BreakCondition, kind: NodeKind) -> Node {
        let construct_start = self.scanner.position();
        let children = self.collect_children(width, until);

        if !children.closed && !kind.terminates_at_eof() {
            if kind != NodeKind::PlainText {
                self.record_fallback(kind, FallbackReason::Unterminated, construct_start);
            }
            return Node::parent(NodeKind::PlainText, vec![self.verbatim_from(construct_start)]);
        }

        Node::parent(kind, children.nodes)
    }

    /// Skips `width` opening characters and collects children until `until`
    /// holds, then skips `width` closing characters.
    fn collect_children(&mut self, width: usize, until: BreakCondition) -> Children {
        self.scanner.advance_by(width);

        let mut run = TextRun::new(self.scanner.position());
        let mut closed = false;
        while !self.scanner.at_eof() {
            if until(&self.scanner) {
                closed = true;
                break;
            }
            self.build_nested_or_read(&mut run);
        }

        run.flush(&self.scanner);
        if closed {
            self.scanner.advance_by(width);
        }

        Children {
            nodes: run.into_nodes(),
            closed,
        }
    }

    /// One step of the inline loop: build the construct at the cursor, or
    /// extend the pending text run by one character.
    fn build_nested_or_read(&mut self, run: &mut TextRun) {
        match classify::inline_type(&self.scanner) {
            None => self.scanner.advance(),
            Some(construct) => {
                run.flush(&self.scanner);
                let node = self.build(construct);
                run.push(node);
                run.restart(self.scanner.position());
            }
        }
    }

    fn build(&mut self, construct: Construct) -> Node {
        match construct {
            Construct::Bold | Construct::Italic => self.parse_emphasis(),
            Construct::Code => self.parse_code(),
            Construct::Escaped => self.parse_escaped(),
            Construct::Image | Construct::Link => self.parse_image_link(construct),
            Construct::UnorderedList => self.parse_unordered_item(),
            Construct::OrderedList => self.parse_ordered_item(),
        }
    }

    /// Literal leaf holding the source from `start` to the cursor.
    fn verbatim_from(&self, start: usize) -> Node {
        Node::text(self.scanner.slice(start, self.scanner.position()))
    }

    fn record_fallback(&mut self, kind: NodeKind, reason: FallbackReason, start: usize) {
        let span = self.scanner.byte_span(start, self.scanner.position());
        trace!(construct = kind.describe(), ?reason, ?span, "construct rendered as literal text");
        self.fallbacks.push(Fallback { kind, reason, span });
    }
}

/// Characters consumed before a block's content starts.
fn block_marker_width(kind: NodeKind) -> usize {
    match kind {
        NodeKind::Quote => 2,
        kind => kind.heading_level().map_or(0, |level| level + 1),
    }
}

/// Output of [`Parser::collect_children`].
struct Children {
    nodes: Vec<Node>,
    /// Whether the closing delimiter was seen before end of input.
    closed: bool,
}

/// Children collected by one loop, plus the start of the plain text not yet
/// turned into a leaf.
struct TextRun {
    start: usize,
    nodes: Vec<Node>,
}

impl TextRun {
    fn new(start: usize) -> Self {
        TextRun {
            start,
            nodes: Vec::new(),
        }
    }

    fn flush(&mut self, scanner: &Scanner) {
        let end = scanner.position();
        if self.start < end {
            self.nodes.push(Node::text(scanner.slice(self.start, end)));
        }
        self.start = end;
    }

    fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    fn restart(&mut self, position: usize) {
        self.start = position;
    }

    fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
