mod repl;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use publisher::{Config, Publisher, render_document};

const SUBCOMMANDS: &[&str] = &["convert", "repl", "test", "help"];
const VALUE_FLAGS: &[&str] = &["--log-level", "-o", "--out-dir", "--config", "--template"];

#[derive(Parser)]
#[command(name = "mdhtml", version, about = "Markdown to HTML converter")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert Markdown files into HTML pages
    Convert(ConvertArgs),

    /// Convert lines typed on standard input
    Repl(ReplArgs),

    /// Run .test.md conformance fixtures
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Markdown files to convert
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Config file (defaults to ./mdhtml.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page template (overrides the config file)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Report malformed constructs without writing anything (exit 1 if any)
    #[arg(long)]
    check: bool,

    /// Print pages to stdout instead of writing files
    #[arg(long)]
    stdout: bool,
}

#[derive(clap::Args)]
struct ReplArgs {
    /// Print the parsed tree instead of HTML
    #[arg(long)]
    ast: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: PathBuf,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // `mdhtml a.md b.md` means `mdhtml convert a.md b.md`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = (1..args.len()).find(|&i| !args[i].starts_with('-') && !follows_value_flag(&args, i));
    if let Some(pos) = first_pos {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "convert".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    init_logging(&cli.log_level);

    match cli.command {
        Some(Command::Convert(convert_args)) => do_convert(convert_args, cli.no_color),
        Some(Command::Repl(repl_args)) => do_repl(repl_args.ast),
        Some(Command::Test(test_args)) => {
            if test_args.list_categories {
                test_runner::list_categories(&test_args.path);
                return;
            }
            let exit_code =
                test_runner::run_tests(&test_args.path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
        None => do_repl(false),
    }
}

/// Whether `args[pos]` is the value of a flag such as `--log-level debug`.
fn follows_value_flag(args: &[String], pos: usize) -> bool {
    pos > 1 && VALUE_FLAGS.contains(&args[pos - 1].as_str())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn do_repl(show_ast: bool) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = repl::run(stdin.lock(), &mut stdout, show_ast) {
        eprintln!("error reading line: {}", e);
        process::exit(1);
    }
}

fn load_config(args: &ConvertArgs, cwd: &Path) -> Result<Config, publisher::PublishError> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::discover(cwd)?,
    };
    if let Some(dir) = &args.out_dir {
        config.output_dir = dir.clone();
    }
    if let Some(template) = &args.template {
        config.template = Some(template.clone());
    }
    Ok(config)
}

fn do_convert(args: ConvertArgs, no_color: bool) {
    if args.check {
        process::exit(check_files(&args.files, no_color));
    }

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: unable to determine working directory: {}", e);
            process::exit(1);
        }
    };

    let publisher = match load_config(&args, &cwd).and_then(|c| Publisher::from_config(&c, &cwd)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if args.stdout {
        for file in &args.files {
            match publisher.render_file(file) {
                Ok(page) => print!("{}", page),
                Err(e) => error!("{}", e),
            }
        }
        return;
    }

    match publisher.publish(&args.files) {
        Ok(summary) => {
            info!(
                written = summary.written.len(),
                skipped = summary.skipped.len(),
                fallbacks = summary.fallbacks,
                "conversion finished"
            );
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Parse every file and report each construct that fell back to literal text.
fn check_files(files: &[PathBuf], no_color: bool) -> i32 {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();

    let mut sources = SimpleFiles::new();
    let mut total = 0usize;
    let mut unreadable = false;

    for path in files {
        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path.display(), e);
                unreadable = true;
                continue;
            }
        };

        let document = render_document(&source);
        let file_id = sources.add(path.display().to_string(), source);
        for fallback in &document.fallbacks {
            let diagnostic = fallback.to_diagnostic(file_id);
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &sources, &diagnostic);
        }
        total += document.fallbacks.len();
    }

    if total == 0 && !unreadable {
        eprintln!("ok: {} file(s) parsed cleanly", files.len());
        0
    } else {
        if total > 0 {
            eprintln!("{} construct(s) would render as literal text", total);
        }
        1
    }
}
