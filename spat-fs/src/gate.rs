//! Output write-safety gate.
//!
//! Validates a batch of planned output filenames before a pipeline produces
//! anything: outputs must not alias inputs or each other, existing outputs
//! are only replaced when overwriting is allowed (taking their sidecar
//! metadata files with them), and new outputs must be creatable.
//!
//! The gate is advisory. It checks, then the caller writes later; nothing is
//! rolled back if a later output fails after an earlier one was deleted.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::logger::{Logger, NullLogger};
use crate::probe::{can_write, directory_of_file_exists, file_exists, remove_file};
use crate::vfs::{is_virtual, Filesystem};

/// Sidecar suffixes removed together with an overwritten output.
pub const SIDECAR_EXTENSIONS: [&str; 4] = [".vat.dbf", ".vat.cpg", ".json", ".aux.xml"];

/// Reasons the gate refuses a batch.
///
/// `Display` is the user-facing message; the offending path is available
/// through [`GateError::path`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("source and target filename cannot be the same")]
    SameSourceAndTarget { path: String },

    #[error("duplicate filenames")]
    DuplicateFilenames { path: String },

    #[error("file exists. You can use 'overwrite=TRUE' to overwrite it")]
    FileExists { path: String },

    #[error("cannot overwrite existing file")]
    CannotOverwrite { path: String },

    #[error("path does not exist")]
    PathDoesNotExist { path: String },

    #[error("cannot write file")]
    CannotWrite { path: String },
}

impl GateError {
    /// The output filename the error is about, in its original casing.
    pub fn path(&self) -> &str {
        match self {
            GateError::SameSourceAndTarget { path }
            | GateError::DuplicateFilenames { path }
            | GateError::FileExists { path }
            | GateError::CannotOverwrite { path }
            | GateError::PathDoesNotExist { path }
            | GateError::CannotWrite { path } => path,
        }
    }
}

/// Configuration for the write gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Compare filenames case-insensitively.
    /// Defaults to on for Windows, where the filesystem ignores case.
    pub case_insensitive: bool,

    /// Suffixes appended to an output name to find its sidecar files.
    pub sidecar_extensions: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            case_insensitive: cfg!(windows),
            sidecar_extensions: SIDECAR_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GateConfig {
    pub fn new(case_insensitive: bool, sidecar_extensions: Vec<String>) -> Self {
        Self {
            case_insensitive,
            sidecar_extensions,
        }
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Add a sidecar suffix on top of the current list.
    pub fn with_sidecar_extension(mut self, ext: impl Into<String>) -> Self {
        self.sidecar_extensions.push(ext.into());
        self
    }
}

/// What a successful check did to the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GateReport {
    /// Existing outputs that were deleted to make room.
    pub overwritten: Vec<String>,

    /// Sidecar files deleted along with them.
    pub sidecars_removed: Vec<String>,

    /// Virtual outputs whose writability probe failed and was ignored.
    pub virtual_skipped: Vec<String>,
}

fn fold(name: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        name.to_lowercase()
    } else {
        name.to_string()
    }
}

/// Check that no non-empty input is also an output, and that outputs are unique.
///
/// Empty input names stand for in-memory sources and are ignored. Empty
/// output names take part in the duplicate check like any other name.
pub fn validate_distinct_names<S, T>(
    inputs: &[S],
    outputs: &[T],
    case_insensitive: bool,
) -> Result<(), GateError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let folded: Vec<String> = outputs
        .iter()
        .map(|o| fold(o.as_ref(), case_insensitive))
        .collect();

    for input in inputs {
        let input = input.as_ref();
        if input.is_empty() {
            continue;
        }
        let input = fold(input, case_insensitive);
        if let Some(i) = folded.iter().position(|o| *o == input) {
            return Err(GateError::SameSourceAndTarget {
                path: outputs[i].as_ref().to_string(),
            });
        }
    }

    let mut seen = HashSet::with_capacity(folded.len());
    for (i, name) in folded.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            return Err(GateError::DuplicateFilenames {
                path: outputs[i].as_ref().to_string(),
            });
        }
    }

    Ok(())
}

/// Write gate bound to a filesystem, a logger and a configuration.
pub struct WriteGate<'a, F: Filesystem + ?Sized, L: Logger + ?Sized> {
    fs: &'a F,
    logger: &'a L,
    config: GateConfig,
}

impl<'a, F: Filesystem + ?Sized, L: Logger + ?Sized> WriteGate<'a, F, L> {
    pub fn new(fs: &'a F, logger: &'a L, config: GateConfig) -> Self {
        Self { fs, logger, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// [`validate_distinct_names`] with this gate's case handling.
    pub fn check_distinct<S, T>(&self, inputs: &[S], outputs: &[T]) -> Result<(), GateError>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if self.config.case_insensitive {
            self.logger.debug("comparing filenames case-insensitively");
        }
        validate_distinct_names(inputs, outputs, self.config.case_insensitive)
    }

    /// Validate `outputs` for writing, deleting existing outputs if `overwrite` is set.
    ///
    /// Outputs are processed in order and the first failure is returned.
    /// Empty output names are skipped.
    pub fn check<S, T>(
        &self,
        outputs: &[S],
        inputs: &[T],
        overwrite: bool,
    ) -> Result<GateReport, GateError>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        self.check_distinct(inputs, outputs)?;

        let mut report = GateReport::default();
        for output in outputs {
            let output = output.as_ref();
            if output.is_empty() {
                continue;
            }

            if file_exists(self.fs, output) {
                if !overwrite {
                    return Err(GateError::FileExists {
                        path: output.to_string(),
                    });
                }
                self.replace_existing(output, &mut report)?;
            } else if !can_write(self.fs, output) {
                if is_virtual(output) {
                    // virtual backends may refuse the probe but accept the real write
                    self.logger
                        .debug(&format!("ignoring failed write probe for {}", output));
                    report.virtual_skipped.push(output.to_string());
                    continue;
                }
                let path = output.to_string();
                return Err(if directory_of_file_exists(self.fs, output) {
                    GateError::CannotWrite { path }
                } else {
                    GateError::PathDoesNotExist { path }
                });
            }
        }

        Ok(report)
    }

    fn replace_existing(&self, output: &str, report: &mut GateReport) -> Result<(), GateError> {
        if !remove_file(self.fs, output) {
            return Err(GateError::CannotOverwrite {
                path: output.to_string(),
            });
        }
        self.logger
            .verbose(&format!("removed existing output {}", output));
        report.overwritten.push(output.to_string());

        // best effort: a sidecar that cannot be removed does not fail the gate
        for ext in &self.config.sidecar_extensions {
            let sidecar = format!("{}{}", output, ext);
            if !file_exists(self.fs, &sidecar) {
                continue;
            }
            if remove_file(self.fs, &sidecar) {
                self.logger.verbose(&format!("removed sidecar {}", sidecar));
                report.sidecars_removed.push(sidecar);
            } else {
                self.logger
                    .debug(&format!("could not remove sidecar {}", sidecar));
            }
        }
        Ok(())
    }
}

/// Run the gate with the default configuration and no logging.
pub fn can_write_batch<F, S, T>(
    fs: &F,
    outputs: &[S],
    inputs: &[T],
    overwrite: bool,
) -> Result<GateReport, GateError>
where
    F: Filesystem + ?Sized,
    S: AsRef<str>,
    T: AsRef<str>,
{
    WriteGate::new(fs, &NullLogger, GateConfig::default()).check(outputs, inputs, overwrite)
}
