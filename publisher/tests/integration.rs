use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use publisher::{Config, Publisher, Template, extract_title, output_path, render_document, segment};

fn content(source: &str) -> String {
    render_document(source).content
}

fn publisher_into(dir: &Path) -> Publisher {
    Publisher::new(dir.join("html_files"), Template::default(), "Page")
}

#[test]
fn segments_split_on_blank_lines() {
    let source = "# Title\n\nfirst line\nsecond line\n  \n- a\n- b\n";
    let blocks: Vec<&str> = segment(source).iter().map(|s| s.text).collect();
    assert_eq!(blocks, vec!["# Title", "first line\nsecond line", "- a\n- b"]);
}

#[test]
fn segment_offsets_point_into_source() {
    let source = "\n\nalpha\r\n\r\nbeta";
    for block in segment(source) {
        assert_eq!(&source[block.offset..block.offset + block.text.len()], block.text);
    }
    let blocks: Vec<&str> = segment(source).iter().map(|s| s.text).collect();
    assert_eq!(blocks, vec!["alpha", "beta"]);
}

#[test]
fn empty_document_has_no_segments() {
    assert!(segment("").is_empty());
    assert!(segment("\n \n\t\n").is_empty());
}

#[test]
fn document_blocks_are_newline_terminated() {
    assert_eq!(
        content("# Hello\n\nSome **bold** text\n\n1. one\n2. two\n"),
        "<h1>Hello</h1>\n<p>Some <b>bold</b> text</p>\n<ol><li>one\n</li><li>two</li></ol>\n"
    );
}

#[test]
fn fallback_spans_are_relative_to_document() {
    let source = "# ok\n\nplain **open";
    let document = render_document(source);
    assert_eq!(document.fallbacks.len(), 1);
    assert_eq!(&source[document.fallbacks[0].span.clone()], "**open");
}

#[test]
fn title_comes_from_first_h1() {
    assert_eq!(extract_title("<p>x</p>\n<h1>First</h1>\n<h1>Second</h1>"), Some("First"));
    assert_eq!(extract_title("<h2>h1 mentioned</h2>"), None);
    assert_eq!(extract_title("<h1>unclosed"), None);
}

#[test]
fn page_falls_back_to_default_title() {
    let page = render_document("just text").to_page(&Template::new("[{{ Title }}]{{ Content }}"), "Page");
    assert_eq!(page, "[Page]<p>just text</p>\n");
}

#[test]
fn default_template_receives_title_and_content() {
    let page = render_document("# Welcome").to_page(&Template::default(), "Page");
    assert!(page.contains("<title> Welcome </title>"));
    assert!(page.contains("<h1>Welcome</h1>\n"));
    assert!(!page.contains("{{"));
}

#[test]
fn output_path_uses_file_stem() {
    let out = PathBuf::from("/out");
    assert_eq!(output_path(&out, Path::new("docs/readme.md")), PathBuf::from("/out/readme.html"));
    assert_eq!(output_path(&out, Path::new("notes")), PathBuf::from("/out/notes.html"));
}

#[test]
fn publish_writes_pages_and_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.md");
    std::fs::write(&input, "# Post\n\nBody with [link](http://x).\n").unwrap();

    let publisher = publisher_into(dir.path());
    let summary = publisher.publish(&[&input]).unwrap();

    let expected = dir.path().join("html_files").join("post.html");
    assert_eq!(summary.written, vec![expected.clone()]);
    assert!(summary.skipped.is_empty());
    let page = std::fs::read_to_string(expected).unwrap();
    assert!(page.contains("<title> Post </title>"));
    assert!(page.contains("<p>Body with <a href=http://x>link</a>.</p>"));
}

#[test]
fn unreadable_inputs_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.md");
    let missing = dir.path().join("missing.md");
    std::fs::write(&good, "text **open").unwrap();

    let summary = publisher_into(dir.path()).publish(&[&missing, &good]).unwrap();
    assert_eq!(summary.skipped, vec![missing]);
    assert_eq!(summary.written.len(), 1);
    assert_eq!(summary.fallbacks, 1);
}

#[test]
fn output_directory_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let input = dir.path().join("a.md");
    std::fs::write(&input, "a").unwrap();

    let publisher = Publisher::new(blocker.join("out"), Template::default(), "Page");
    assert!(publisher.publish(&[&input]).is_err());
}

#[test]
fn config_defaults_and_overrides() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());

    std::fs::write(
        dir.path().join("mdhtml.toml"),
        "output_dir = \"site\"\ndefault_title = \"Untitled\"\n",
    )
    .unwrap();
    let config = Config::discover(dir.path()).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("site"));
    assert_eq!(config.default_title, "Untitled");
    assert_eq!(config.template, None);
}

#[test]
fn config_rejects_unknown_keys() {
    let err = Config::from_toml("colour = \"blue\"", Path::new("mdhtml.toml")).unwrap_err();
    assert!(err.to_string().starts_with("invalid config 'mdhtml.toml'"));
}

#[test]
fn publisher_from_config_loads_template() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), "<main>{{ Content }}</main>").unwrap();
    let config = Config {
        template: Some(PathBuf::from("page.html")),
        ..Config::default()
    };

    let publisher = Publisher::from_config(&config, dir.path()).unwrap();
    assert_eq!(publisher.output_dir(), dir.path().join("html_files"));

    let input = dir.path().join("x.md");
    std::fs::write(&input, "*hi*").unwrap();
    assert_eq!(publisher.render_file(&input).unwrap(), "<main><p><i>hi</i></p>\n</main>");
}
