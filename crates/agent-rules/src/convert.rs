//! File-system drivers for both conversions.
//!
//! Per-file functions return a [`Result`]; the batch functions catch every
//! per-file error, log it, and move on to the next file so one bad input
//! never aborts a run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::agent::parse_agent;
use crate::error::{Error, Result};
use crate::rule::{render_rule, rule_file_name};
use crate::wrap::{wrap_document, wrapped_file_name};

/// Extension of the input files picked up by [`markdown_files`].
pub const MARKDOWN_EXTENSION: &str = "md";

/// Result of converting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output was written to this path.
    Written(PathBuf),
    /// Nothing was written.
    Skipped(SkipReason),
}

/// Why a file produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkipReason {
    /// The agent definition has no `name`.
    MissingName,
    /// The output file already exists and is left untouched.
    OutputExists(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "missing required field: name"),
            Self::OutputExists(path) => write!(f, "{} already exists", path.display()),
        }
    }
}

/// Counts collected over a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Files that produced an output.
    pub converted: usize,
    /// Files skipped without error.
    pub skipped: usize,
    /// Files that failed with an error.
    pub failed: usize,
}

impl BatchReport {
    /// Total number of files processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}

/// Lists the markdown files under `root`, recursively, sorted by path.
///
/// Unreadable subdirectories are logged and skipped.
///
/// # Errors
///
/// Returns `Error::ReadFile` if `root` itself cannot be read.
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let path = err.path().unwrap_or(root).to_path_buf();
                return Err(Error::ReadFile {
                    path,
                    source: err.into(),
                });
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Output directory for `input` that mirrors its location under `root`.
///
/// `root/engineering/a.md` maps to `out_dir/engineering`. Inputs outside
/// `root` map to `out_dir` itself.
#[must_use]
pub fn mirrored_dir(root: &Path, input: &Path, out_dir: &Path) -> PathBuf {
    input
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map_or_else(|| out_dir.to_path_buf(), |relative| out_dir.join(relative))
}

/// Converts one agent definition into a rule document inside `out_dir`.
///
/// An agent without a name is skipped. An existing rule with the same
/// name is overwritten.
///
/// # Errors
///
/// Returns `Error::ReadFile` or `Error::WriteFile` on I/O failure.
pub fn convert_agent_file(input: &Path, out_dir: &Path) -> Result<Outcome> {
    let content = read_input(input)?;
    let agent = parse_agent(&content);
    debug!(
        input = %input.display(),
        triggers = agent.triggers.len(),
        examples = agent.examples.len(),
        responsibilities = agent.responsibilities.len(),
        "parsed agent definition"
    );

    let Some(rendered) = render_rule(&agent) else {
        return Ok(Outcome::Skipped(SkipReason::MissingName));
    };

    let output = out_dir.join(rule_file_name(&agent.name));
    write_output(&output, &rendered)?;
    Ok(Outcome::Written(output))
}

/// Wraps one markdown file with rule frontmatter inside `out_dir`.
///
/// Skipped when the `.mdc` output already exists.
///
/// # Errors
///
/// Returns `Error::InvalidPath` if `input` has no usable file stem, and
/// `Error::ReadFile` or `Error::WriteFile` on I/O failure.
pub fn wrap_markdown_file(input: &Path, out_dir: &Path) -> Result<Outcome> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidPath(input.to_path_buf()))?;

    let output = out_dir.join(wrapped_file_name(stem));
    if output.exists() {
        return Ok(Outcome::Skipped(SkipReason::OutputExists(output)));
    }

    let content = read_input(input)?;
    write_output(&output, &wrap_document(&content, stem))?;
    Ok(Outcome::Written(output))
}

/// Converts every agent definition in `inputs`, logging each result.
///
/// Each rule is written to the subdirectory of `out_dir` that mirrors the
/// input's location under `root`.
pub fn convert_agents<P: AsRef<Path>>(root: &Path, inputs: &[P], out_dir: &Path) -> BatchReport {
    run_batch(inputs, |input| {
        convert_agent_file(input, &mirrored_dir(root, input, out_dir))
    })
}

/// Wraps every markdown file in `inputs`, logging each result.
///
/// With `out_dir == root` every `.mdc` file lands next to its source.
pub fn wrap_markdown<P: AsRef<Path>>(root: &Path, inputs: &[P], out_dir: &Path) -> BatchReport {
    run_batch(inputs, |input| {
        wrap_markdown_file(input, &mirrored_dir(root, input, out_dir))
    })
}

fn run_batch<P, F>(inputs: &[P], mut convert: F) -> BatchReport
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<Outcome>,
{
    let mut report = BatchReport::default();
    for input in inputs {
        let input = input.as_ref();
        match convert(input) {
            Ok(Outcome::Written(output)) => {
                info!(input = %input.display(), output = %output.display(), "converted");
                report.converted += 1;
            }
            Ok(Outcome::Skipped(reason)) => {
                info!(input = %input.display(), %reason, "skipped");
                report.skipped += 1;
            }
            Err(err) => {
                error!(input = %input.display(), error = %err, "conversion failed");
                report.failed += 1;
            }
        }
    }
    report
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::WriteFile {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
