pub mod node;
pub mod parser;

pub use node::{Attribute, Leaf, Node, NodeKind, Parent};
pub use parser::{Fallback, FallbackReason, Parsed, Parser};

/// Parse one block of source text into its root node.
pub fn parse(source: &str) -> Node {
    Parser::new(source).parse().root
}

/// Parse one block and serialize it straight to HTML.
pub fn to_html(source: &str) -> String {
    parse(source).to_html()
}
