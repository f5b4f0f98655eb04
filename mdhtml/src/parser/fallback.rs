use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::node::NodeKind;

/// Why a construct was rendered as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// End of input reached before the closing delimiter.
    Unterminated,
    /// An image or link label not followed by `(`.
    MissingTarget,
    /// An image or link target without its closing `)`.
    UnclosedTarget,
}

/// A malformed construct that degraded to its verbatim source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fallback {
    pub kind: NodeKind,
    pub reason: FallbackReason,
    /// Byte span within the parsed block.
    pub span: Range<usize>,
}

impl Fallback {
    /// Move the span by `offset` bytes, for blocks cut out of a larger document.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.start + offset..self.span.end + offset;
        self
    }

    /// Convert to a codespan-reporting warning for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::warning()
            .with_message(self.to_string())
            .with_labels(vec![
                Label::primary(file_id, self.span.clone()).with_message("rendered as literal text"),
            ])
            .with_notes(vec![self.hint().to_string()])
    }

    fn hint(&self) -> &'static str {
        match (self.reason, self.kind) {
            (FallbackReason::MissingTarget, _) => "expected `(` right after the closing `]`",
            (FallbackReason::UnclosedTarget, _) => "add a closing `)` after the target",
            (_, NodeKind::Bold) => "close it with `**`",
            (_, NodeKind::Italic) => "close it with `*`",
            (_, NodeKind::Code) => "close it with three backticks",
            (_, NodeKind::Image | NodeKind::Link) => "close the label with `]`",
            _ => "add the closing delimiter",
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind.describe();
        match self.reason {
            FallbackReason::Unterminated => write!(f, "unterminated {}", name),
            FallbackReason::MissingTarget => write!(f, "{} label without a target", name),
            FallbackReason::UnclosedTarget => write!(f, "{} target is not closed", name),
        }
    }
}
