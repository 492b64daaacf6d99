//! `phonesan sanitize`: clean mailing files and write the workbooks.
//!
//! Every input is processed before anything is written, so a failure in any
//! of them leaves no output behind.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use phonesan_core::{
    headless_sanitize_upload, Artifact, BlacklistSource, FileSource, HttpSource, SanitizeReport, SanitizerConfig,
    SessionCache,
};

use crate::commands::{info_msg, success_msg, warn_msg};
use crate::ui::summary;

#[derive(Error, Debug)]
pub enum SanitizeCommandError {
    #[error("--output can only be used with a single input ({0} given); use --output-dir instead")]
    OutputWithMultipleInputs(usize),

    #[error("input path '{0}' has no file name")]
    InputWithoutName(PathBuf),
}

/// Where the blacklist comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlacklistChoice {
    File(PathBuf),
    Url(String),
}

impl BlacklistChoice {
    /// A local file wins over a URL; the configured URL is the fallback.
    pub fn resolve(file: Option<PathBuf>, url: Option<String>, config: &SanitizerConfig) -> Self {
        match (file, url) {
            (Some(path), _) => BlacklistChoice::File(path),
            (None, Some(url)) => BlacklistChoice::Url(url),
            (None, None) => BlacklistChoice::Url(config.blacklist.url.clone()),
        }
    }

    fn into_source(self) -> Box<dyn BlacklistSource> {
        match self {
            BlacklistChoice::File(path) => Box::new(FileSource::new(path)),
            BlacklistChoice::Url(url) => Box::new(HttpSource::new(url)),
        }
    }
}

/// Options for the ergonomic `run_sanitize_opts` API.
pub struct SanitizeOptions {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub blacklist: BlacklistChoice,
    pub json: bool,
    pub no_summary: bool,
    pub quiet: bool,
}

/// What was done for one input; printed with `--json`.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: SanitizeReport,
}

/// Decides where each input's workbook goes.
pub fn output_paths(
    inputs: &[PathBuf],
    output: Option<&Path>,
    output_dir: &Path,
    file_name: &str,
) -> Result<Vec<PathBuf>, SanitizeCommandError> {
    if let Some(output) = output {
        if inputs.len() != 1 {
            return Err(SanitizeCommandError::OutputWithMultipleInputs(inputs.len()));
        }
        return Ok(vec![output.to_path_buf()]);
    }

    if inputs.len() == 1 {
        return Ok(vec![output_dir.join(file_name)]);
    }

    inputs
        .iter()
        .map(|input| {
            let stem = input
                .file_stem()
                .ok_or_else(|| SanitizeCommandError::InputWithoutName(input.clone()))?;
            Ok(output_dir.join(format!("{}_{}", stem.to_string_lossy(), file_name)))
        })
        .collect()
}

const STAGING_SUFFIX: &str = ".partial";

fn staging_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Writes every artifact next to its destination, then renames them all into
/// place. If any write fails the staged files are removed and no output lands.
pub fn write_outputs(outputs: &[(&Path, &Artifact)]) -> Result<()> {
    let mut staged: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for (output, artifact) in outputs {
        let tmp_path = staging_path(output);
        let written = stage_artifact(output, &tmp_path, artifact);
        if let Err(e) = written {
            for path in staged.iter().chain(std::iter::once(&tmp_path)) {
                let _ = std::fs::remove_file(path);
            }
            return Err(e);
        }
        staged.push(tmp_path);
    }

    for ((output, _), tmp_path) in outputs.iter().zip(&staged) {
        std::fs::rename(tmp_path, output)
            .with_context(|| format!("Failed to move output into place: {}", output.display()))?;
    }
    Ok(())
}

fn stage_artifact(output: &Path, tmp_path: &Path, artifact: &Artifact) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    artifact
        .write_to(tmp_path)
        .with_context(|| format!("Failed to write output file: {}", output.display()))
}

/// The main operation runner for `phonesan sanitize`.
pub fn run_sanitize_opts(
    config: &SanitizerConfig,
    opts: SanitizeOptions,
    cache: &mut SessionCache,
) -> Result<Vec<RunSummary>> {
    info!("Starting sanitize operation for {} input(s).", opts.inputs.len());

    let outputs = output_paths(&opts.inputs, opts.output.as_deref(), &opts.output_dir, &config.output.file_name)?;
    let source = opts.blacklist.clone().into_source();

    let mut finished: Vec<(PathBuf, PathBuf, SanitizeReport, Artifact)> = Vec::with_capacity(opts.inputs.len());
    for (input, output) in opts.inputs.iter().zip(outputs) {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SanitizeCommandError::InputWithoutName(input.clone()))?;
        let bytes = std::fs::read(input).with_context(|| format!("Failed to read input file: {}", input.display()))?;

        let outcome = headless_sanitize_upload(&name, &bytes, config, source.as_ref(), cache)
            .with_context(|| format!("Failed to sanitize {}", input.display()))?;

        if !opts.quiet {
            for warning in &outcome.report.warnings {
                warn_msg(format!("{}: {}", input.display(), warning));
            }
            info_msg(format!(
                "Columns found for validation and blacklist in {}: {}",
                input.display(),
                outcome.report.phone_columns.join(", ")
            ));
        }
        if !opts.no_summary && !opts.quiet {
            let stderr = io::stderr();
            let supports_color = stderr.is_terminal();
            summary::print_report(&mut stderr.lock(), &input.display().to_string(), &outcome.report, supports_color)?;
        }

        finished.push((input.clone(), output, outcome.report, outcome.artifact));
    }

    let staged: Vec<(&Path, &Artifact)> = finished
        .iter()
        .map(|(_, output, _, artifact)| (output.as_path(), artifact))
        .collect();
    write_outputs(&staged)?;

    let mut summaries = Vec::with_capacity(finished.len());
    for (input, output, report, artifact) in finished {
        debug!("Wrote {} bytes ({}) to {}", artifact.bytes.len(), artifact.mime, output.display());
        if !opts.quiet {
            success_msg(format!("Sanitized workbook written to {}", output.display()));
        }
        summaries.push(RunSummary { input, output, report });
    }

    if opts.json {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        serde_json::to_writer_pretty(&mut writer, &summaries).context("Failed to serialize reports")?;
        writeln!(writer)?;
    }

    info!("Sanitize operation completed.");
    Ok(summaries)
}
