use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use mdhtml::{Fallback, Parser};
use publisher::{extract_title, render_document};

const FIXTURE_SUFFIX: &str = ".test.md";
const DEFAULT_TITLE: &str = "Page";

/// How the fixture source is fed to the converter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Segment into blocks like a file conversion.
    #[default]
    Document,
    /// Parse the whole source as one block, like a REPL line.
    Line,
}

#[derive(Debug, Deserialize)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub mode: Mode,

    /// Expected HTML content (trimmed comparison).
    #[serde(default)]
    pub expect_html: Option<String>,

    /// Expected page title; documents without `<h1>` get "Page".
    #[serde(default)]
    pub expect_title: Option<String>,

    /// Expected number of constructs rendered as literal text.
    #[serde(default)]
    pub expect_fallbacks: Option<usize>,
}

/// Split a `.test.md` file into its TOML config and Markdown source.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + "\n---".len()..];
    let source = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

impl TestResult {
    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.trim_end_matches(FIXTURE_SUFFIX))
                .unwrap_or("?")
        })
    }
}

/// What the converter produced for one fixture.
struct Conversion {
    html: String,
    fallbacks: Vec<Fallback>,
}

fn convert(source: &str, mode: Mode) -> Conversion {
    match mode {
        Mode::Document => {
            let document = render_document(source);
            Conversion {
                html: document.content,
                fallbacks: document.fallbacks,
            }
        }
        Mode::Line => {
            let line = source.trim_end_matches(['\n', '\r']);
            let parsed = Parser::new(line).parse();
            Conversion {
                html: parsed.root.to_html(),
                fallbacks: parsed.fallbacks,
            }
        }
    }
}

pub fn run_single_test(path: &Path) -> TestResult {
    let fail = |description: Option<String>, reason: String| TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(None, format!("cannot read file: {}", e)),
    };

    let (config, source) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(None, format!("frontmatter error: {}", e)),
    };
    let description = config.description.clone();

    let conversion = convert(source, config.mode);

    if let Some(expected) = &config.expect_html {
        let expected = expected.trim();
        let actual = conversion.html.trim();
        if actual != expected {
            return fail(
                description,
                format!("html mismatch\n  expected: {}\n  actual:   {}", expected, actual),
            );
        }
    }

    if let Some(expected) = &config.expect_title {
        let actual = extract_title(&conversion.html).unwrap_or(DEFAULT_TITLE);
        if actual != expected {
            return fail(
                description,
                format!("title mismatch\n  expected: {}\n  actual:   {}", expected, actual),
            );
        }
    }

    if let Some(expected) = config.expect_fallbacks {
        if conversion.fallbacks.len() != expected {
            let listed: Vec<String> = conversion
                .fallbacks
                .iter()
                .map(|f| format!("  - line {}: {}", byte_offset_to_line(source, f.span.start), f))
                .collect();
            return fail(
                description,
                format!(
                    "expected {} fallback(s), got {}\n{}",
                    expected,
                    conversion.fallbacks.len(),
                    if listed.is_empty() {
                        "  (none)".to_string()
                    } else {
                        listed.join("\n")
                    }
                ),
            );
        }
    }

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome: TestOutcome::Pass,
    }
}

/// Convert a byte offset in `source` to a 1-based line number.
fn byte_offset_to_line(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|&b| b == b'\n')
        .count()
        + 1
}

/// Discover fixtures grouped by sub-folder relative to `root`.
/// Files directly in `root` get the empty category.
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(FIXTURE_SUFFIX))
        {
            let category = path
                .parent()
                .and_then(|p| p.strip_prefix(root).ok())
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            out.entry(category).or_default().push(path);
        }
    }
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (category, files) in &categories {
        eprintln!("  {} ({} tests)", category_label(category), files.len());
    }
}

/// Keep the categories matching `requested` (a prefix match on sub-folders).
fn filter_categories(
    all: BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<String, Vec<PathBuf>> {
    if requested.is_empty() {
        return all;
    }

    for req in requested {
        let req = req.trim_matches('/');
        let known = all
            .keys()
            .any(|cat| cat == req || cat.starts_with(&format!("{}/", req)));
        if !known {
            let available: Vec<&str> = all.keys().map(|k| category_label(k)).collect();
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                available.join(", ")
            );
        }
    }

    all.into_iter()
        .filter(|(cat, _)| {
            requested.iter().any(|req| {
                let req = req.trim_matches('/');
                cat == req || cat.starts_with(&format!("{}/", req))
            })
        })
        .collect()
}

fn paint(text: &str, code: &str, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

/// Run every fixture under `path` (or the single file `path`).
/// Returns the process exit code: 0 when all pass, 1 otherwise.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let selected = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        let all = discover_categorized(path);
        if all.is_empty() {
            eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
            return 1;
        }
        filter_categories(all, categories)
    };

    if selected.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (category, files) in &selected {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", paint(category_label(category), "1", no_color));
        }

        for file in files {
            let result = run_single_test(file);
            match result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", paint("PASS", "32", no_color), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", paint("FAIL", "31", no_color), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for failure in &failures {
            eprintln!();
            eprintln!("  --- {} ---", failure.path.display());
            if let TestOutcome::Fail(reason) = &failure.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    if failures.is_empty() {
        eprintln!("test result: {}. {} passed, 0 failed", paint("ok", "32", no_color), passed);
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            paint("FAILED", "31", no_color),
            passed,
            failures.len(),
            passed + failures.len()
        );
        1
    }
}
