use std::io::{self, BufRead, Write};

const BANNER: &str = "Markdown to HTML - enter a blank line to exit.\n\
Pass file names on the command line to convert files instead.";

/// Read one block per line and print its HTML until a blank line or end of input.
pub fn run<R: BufRead, W: Write>(mut input: R, output: &mut W, show_ast: bool) -> io::Result<()> {
    writeln!(output, "{}", BANNER)?;

    loop {
        writeln!(output)?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let line = line.strip_suffix('\n').unwrap_or(&line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return Ok(());
        }

        let root = mdhtml::parse(line);
        if show_ast {
            writeln!(output, "{:#?}", root)?;
        } else {
            writeln!(output, "{}", root)?;
        }
    }
}
