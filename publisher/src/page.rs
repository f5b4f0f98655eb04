use std::path::Path;

use mdhtml::{Fallback, Parser};

use crate::error::PublishError;
use crate::segment::segment;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Base for every page produced by the publisher.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>

<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title> {{ Title }} </title>
    <link href="./index.css" rel="stylesheet">
</head>

<body>
    <article>
        {{ Content }}
    </article>
</body>

</html>
"#;

/// An HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
}

impl Default for Template {
    fn default() -> Self {
        Template {
            source: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Template {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, PublishError> {
        std::fs::read_to_string(path)
            .map(Template::new)
            .map_err(|source| PublishError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Substitute the first occurrence of each placeholder.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replacen(TITLE_PLACEHOLDER, title, 1)
            .replacen(CONTENT_PLACEHOLDER, content, 1)
    }
}

/// A document converted block by block.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Serialized blocks, each followed by a newline.
    pub content: String,
    /// Fallbacks from every block, with spans relative to the whole document.
    pub fallbacks: Vec<Fallback>,
}

impl RenderedDocument {
    pub fn title(&self) -> Option<&str> {
        extract_title(&self.content)
    }

    pub fn to_page(&self, template: &Template, default_title: &str) -> String {
        let title = self.title().unwrap_or(default_title);
        template.render(title, &self.content)
    }
}

/// Segment `source` into blocks and convert each one.
pub fn render_document(source: &str) -> RenderedDocument {
    let mut content = String::new();
    let mut fallbacks = Vec::new();

    for block in segment(source) {
        let parsed = Parser::new(block.text).parse();
        content.push_str(&parsed.root.to_html());
        content.push('\n');
        fallbacks.extend(parsed.fallbacks.into_iter().map(|f| f.shifted(block.offset)));
    }

    RenderedDocument { content, fallbacks }
}

/// Text of the first `<h1>` element, if the content has one.
pub fn extract_title(content: &str) -> Option<&str> {
    let start = content.find("<h1>")? + "<h1>".len();
    let len = content[start..].find("</h1>")?;
    Some(&content[start..start + len])
}
