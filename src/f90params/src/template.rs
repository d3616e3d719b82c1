// f90params/src/template.rs

//! Parameter template output.
//!
//! Every namelist becomes one `&name ... /` group listing all parameters
//! with their default values. Comment lines above each parameter carry its
//! annotations and anything a user editing the template should know about:
//! maximum string lengths, array sizes, missing defaults and defaults that
//! do not fit the declared type.

use crate::error::{Error, Result};
use crate::fortran_types::{Compatibility, Dimension, TypeKind};
use crate::namelist::{Namelist, Parameter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options for controlling template output.
#[derive(Debug, Clone)]
pub struct TemplateOptions {
    /// Force overwrite existing files
    pub force: bool,
    /// Comment line written above and below each group header
    pub separator: String,
    /// Whether to write `! tag: text` lines for documentation annotations
    pub annotations: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            force: false,
            separator: "!-----------------------------".to_string(),
            annotations: true,
        }
    }
}

/// Counters collected while writing a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateReport {
    /// Parameters without any default assignment
    pub missing_defaults: usize,
    /// Parameters with a default that cannot be converted to the declared type
    pub type_mismatches: usize,
}

/// Write the template for `namelists` to a file.
pub fn write_template_file<P: AsRef<Path>>(
    namelists: &[Namelist],
    path: P,
    options: &TemplateOptions,
) -> Result<TemplateReport> {
    let path = path.as_ref();

    if !options.force && path.exists() {
        return Err(Error::FileAlreadyExists(path.to_path_buf()));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let report = write_template(namelists, &mut writer, options)?;
    writer.flush()?;

    log::info!("Wrote {} namelist(s) to {}", namelists.len(), path.display());
    Ok(report)
}

/// Write the template for `namelists` to any writer.
pub fn write_template<W: Write>(
    namelists: &[Namelist],
    writer: &mut W,
    options: &TemplateOptions,
) -> Result<TemplateReport> {
    let mut report = TemplateReport::default();

    for namelist in namelists {
        writeln!(writer, "{}", options.separator)?;
        writeln!(writer, "&{}", namelist.name())?;
        writeln!(writer, "{}", options.separator)?;

        for parameter in namelist.parameters() {
            writeln!(writer)?;
            write_parameter(parameter, writer, options, &mut report)?;
        }

        writeln!(writer, "/")?;
        writeln!(writer)?;
    }

    if report.missing_defaults > 0 {
        log::warn!(
            "Found {} parameters without a default value",
            report.missing_defaults
        );
    }
    Ok(report)
}

fn write_parameter<W: Write>(
    parameter: &Parameter,
    writer: &mut W,
    options: &TemplateOptions,
    report: &mut TemplateReport,
) -> Result<()> {
    if let Some(define) = parameter.define() {
        if options.annotations {
            for annotation in define.annotations() {
                writeln!(writer, "! {}", annotation)?;
            }
        }

        let ty = define.ty();
        if let (TypeKind::Character, Some(length)) = (ty.kind(), ty.length()) {
            writeln!(writer, "! Max length: {}", length)?;
        }

        match ty.dimension() {
            Some(Dimension::Runtime) => writeln!(writer, "! WARNING: Dimension set at runtime")?,
            Some(Dimension::Fixed(size)) => writeln!(writer, "! Dimension size: {}", size)?,
            None => {}
        }

        if !parameter.has_values() {
            writeln!(writer, "! WARNING: Default value not found")?;
            report.missing_defaults += 1;
        } else {
            if !parameter.has_all_values() {
                writeln!(writer, "! WARNING: Not all default values set in array")?;
            }
            if parameter.value_check() == Compatibility::Incompatible {
                writeln!(
                    writer,
                    "! ERROR: Invalid conversion for default value to {}",
                    ty.kind()
                )?;
                report.type_mismatches += 1;
            }
        }
    }

    writeln!(
        writer,
        "{} = {}",
        parameter.name(),
        parameter.formatted_values().join(" ")
    )?;
    Ok(())
}
