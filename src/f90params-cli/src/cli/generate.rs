// f90params-cli/src/cli/generate.rs

use super::Status;
use anyhow::Context;
use f90params::{TemplateOptions, TemplateReport};
use std::path::PathBuf;

/// What to read and where to write it.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Overwrite an existing template
    pub force: bool,
    /// Copy documentation annotations into the template
    pub annotations: bool,
    /// Also write the resolved namelists as JSON
    pub json: Option<PathBuf>,
}

/// Extract the namelists of one source file and write its parameter template.
///
/// The template is written even when an error flag is raised; the flags
/// only decide the returned [`Status`].
pub fn generate(options: &GenerateOptions) -> anyhow::Result<Status> {
    let source = fs_err::read_to_string(&options.input)
        .with_context(|| format!("Failed to read source file {}", options.input.display()))?;

    let extraction = f90params::extract(&source)
        .with_context(|| format!("Failed to extract namelists from {}", options.input.display()))?;

    let template_options = TemplateOptions {
        force: options.force,
        annotations: options.annotations,
        ..TemplateOptions::default()
    };
    let report = f90params::write_template_file(&extraction.namelists, &options.output, &template_options)
        .with_context(|| format!("Failed to write template {}", options.output.display()))?;

    if let Some(json_path) = &options.json {
        let json = f90params::to_json(&extraction.namelists)?;
        fs_err::write(json_path, json)
            .with_context(|| format!("Error writing file {}", json_path.display()))?;
        log::info!("Wrote JSON export to {}", json_path.display());
    }

    print_summary(&extraction.namelists, &report, options);
    Ok(Status::from_flags(extraction.lexical_error, extraction.syntax_error))
}

fn print_summary(namelists: &[f90params::Namelist], report: &TemplateReport, options: &GenerateOptions) {
    let parameters: usize = namelists.iter().map(|nml| nml.len()).sum();
    println!(
        "Wrote {} namelists ({} parameters) to {}",
        namelists.len(),
        parameters,
        options.output.display()
    );
    if report.missing_defaults > 0 {
        println!(
            "Found {} parameters without a default value",
            report.missing_defaults
        );
    }
    if report.type_mismatches > 0 {
        println!(
            "Found {} parameters with a default of the wrong type",
            report.type_mismatches
        );
    }
}
