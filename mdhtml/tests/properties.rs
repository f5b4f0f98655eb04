use mdhtml::Parser;
use proptest::prelude::*;

/// Markup characters the classifier reacts to, plus letters and line breaks.
const MARKUP: &str = r"[*`\[\]()!\\#>0-9. a-zA-Z\n-]{0,48}";

proptest! {
    #[test]
    fn parsing_never_panics(source in MARKUP) {
        let parsed = Parser::new(source.as_str()).parse();
        let html = parsed.root.to_html();
        prop_assert!(html.starts_with('<'));
    }

    #[test]
    fn fallback_source_survives_serialization(source in MARKUP) {
        let parsed = Parser::new(source.as_str()).parse();
        let html = parsed.root.to_html();
        for fallback in &parsed.fallbacks {
            let text = &source[fallback.span.clone()];
            prop_assert!(
                html.contains(text),
                "{:?} not reproduced in {:?} ({})",
                text,
                html,
                fallback
            );
        }
    }

    #[test]
    fn arbitrary_unicode_is_accepted(source in "\\PC{0,32}") {
        let parsed = Parser::new(source.as_str()).parse();
        for fallback in &parsed.fallbacks {
            prop_assert!(source.get(fallback.span.clone()).is_some());
        }
    }
}
