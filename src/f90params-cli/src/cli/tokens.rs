// f90params-cli/src/cli/tokens.rs

use super::Status;
use anyhow::Context;
use f90params::Scanner;
use std::io::Write;
use std::path::Path;

/// Print the merged token stream of `input`, one token per line.
pub fn print_tokens<W: Write>(input: &Path, writer: &mut W) -> anyhow::Result<Status> {
    let source = fs_err::read_to_string(input)
        .with_context(|| format!("Failed to read source file {}", input.display()))?;

    let mut scanner = Scanner::new(&source);
    while let Some(token) = scanner.next_token() {
        writeln!(writer, "{:>5}:{:<3} {}", token.line, token.column, token)?;
    }

    Ok(Status::from_flags(scanner.has_error(), false))
}
