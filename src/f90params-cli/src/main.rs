// f90params-cli/src/main.rs

use anyhow::Result;
use clap::Parser;
use f90params_cli::cli::{generate, print_tokens, GenerateOptions, Status, FATAL_EXIT_CODE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "f90params")]
#[command(about = "Generate a parameter template from Fortran namelist declarations", long_about = None)]
#[command(version)]
struct Cli {
    /// Fortran source file to read
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Template file to write
    #[arg(short, long, value_name = "FILE", env = "F90PARAMS_OUTPUT", default_value = "parameters.par")]
    output: PathBuf,

    /// Overwrite the template if it already exists
    #[arg(short, long, env = "F90PARAMS_FORCE")]
    force: bool,

    /// Leave documentation annotations out of the template
    #[arg(long)]
    no_annotations: bool,

    /// Print the token stream instead of writing a template
    #[arg(long)]
    tokens: bool,

    /// Also write the resolved namelists as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn entrypoint() -> Result<Status> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if cli.tokens {
        let stdout = std::io::stdout();
        return print_tokens(&cli.input, &mut stdout.lock());
    }

    generate(&GenerateOptions {
        input: cli.input,
        output: cli.output,
        force: cli.force,
        annotations: !cli.no_annotations,
        json: cli.json,
    })
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(FATAL_EXIT_CODE)
        }
        Ok(status) => status.into(),
    }
}
