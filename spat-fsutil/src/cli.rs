//! CLI argument parsing for spat-fsutil.
//!
//! Each subcommand maps onto one group of `spat_fs` operations: the write
//! gate, temp names, filename helpers, text I/O and existence checks.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use spat_fs::GateConfig;
use thiserror::Error;

/// Default directory for `temp`.
pub const DEFAULT_TEMP_DIR: &str = ".";

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("at least one non-empty --output is required")]
    NoOutputs,

    #[error("--name must not be empty")]
    EmptyName,

    #[error("extension must start with '.', got {0:?}")]
    InvalidExtension(String),

    #[error("set-ext requires --ext")]
    MissingExtension,
}

/// Path helpers and output write-safety checks for spat pipelines.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "spat-fsutil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check that planned output files can be written.
    Check(CheckArgs),
    /// Print a temporary filename that does not exist yet.
    Temp(TempArgs),
    /// Take a filename string apart.
    Path(PathArgs),
    /// Print a text file line by line.
    Read(ReadArgs),
    /// Write lines to a text file, after running the write gate on it.
    Write(WriteArgs),
    /// Test whether a path exists.
    Exists(ExistsArgs),
}

/// Output format for `check`.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON report
    Json,
}

/// Arguments for the check command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// Planned output file (repeatable)
    #[arg(short, long = "output", required = true)]
    pub outputs: Vec<String>,

    /// Input file the outputs must not alias (repeatable)
    #[arg(short, long = "input")]
    pub inputs: Vec<String>,

    /// Delete existing outputs and their sidecar files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Compare filenames ignoring case (default on Windows)
    #[arg(long, conflicts_with = "case_sensitive")]
    pub case_insensitive: bool,

    /// Compare filenames exactly (default elsewhere)
    #[arg(long)]
    pub case_sensitive: bool,

    /// Additional sidecar suffix to delete on overwrite (repeatable)
    #[arg(long = "sidecar")]
    pub sidecars: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CheckArgs {
    pub fn validate(&self) -> Result<(), CliError> {
        if self.outputs.iter().all(|o| o.is_empty()) {
            return Err(CliError::NoOutputs);
        }
        for ext in &self.sidecars {
            validate_extension(ext)?;
        }
        Ok(())
    }

    /// Gate configuration from the defaults plus the case and sidecar flags.
    pub fn gate_config(&self) -> GateConfig {
        let mut config = GateConfig::default();
        if self.case_insensitive {
            config.case_insensitive = true;
        } else if self.case_sensitive {
            config.case_insensitive = false;
        }
        for ext in &self.sidecars {
            config = config.with_sidecar_extension(ext.clone());
        }
        config
    }
}

/// Arguments for the temp command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TempArgs {
    /// Directory the name is placed in
    #[arg(long, default_value = DEFAULT_TEMP_DIR)]
    pub dir: String,

    /// Name hint embedded after the `spat_` prefix
    #[arg(long)]
    pub name: String,

    /// Extension including the dot, e.g. ".tif"
    #[arg(long, default_value = "")]
    pub ext: String,

    /// Seed the generator for reproducible names
    #[arg(long)]
    pub seed: Option<u64>,
}

impl TempArgs {
    pub fn validate(&self) -> Result<(), CliError> {
        if self.name.is_empty() {
            return Err(CliError::EmptyName);
        }
        if !self.ext.is_empty() {
            validate_extension(&self.ext)?;
        }
        Ok(())
    }
}

/// Filename operation for the path command.
#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum PathOp {
    /// Extension from the last dot
    Ext,
    /// Path without its extension
    Noext,
    /// Last path component
    Base,
    /// Last path component without extension
    BaseNoext,
    /// Everything before the last separator
    Dir,
    /// Replace or append the extension given by --ext
    SetExt,
}

/// Arguments for the path command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PathArgs {
    #[arg(value_enum)]
    pub op: PathOp,

    pub path: String,

    /// New extension for set-ext
    #[arg(long)]
    pub ext: Option<String>,
}

impl PathArgs {
    pub fn validate(&self) -> Result<(), CliError> {
        if self.op == PathOp::SetExt && self.ext.is_none() {
            return Err(CliError::MissingExtension);
        }
        Ok(())
    }
}

/// Arguments for the read command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReadArgs {
    pub path: String,

    /// Fail on unreadable files instead of printing nothing
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Arguments for the write command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct WriteArgs {
    pub path: String,

    /// Lines to write, each followed by a newline
    pub lines: Vec<String>,

    /// Replace the file if it exists
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// Arguments for the exists command.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExistsArgs {
    pub path: String,

    /// Require a directory
    #[arg(long, conflicts_with = "parent")]
    pub dir: bool,

    /// Test the directory containing the path instead
    #[arg(long)]
    pub parent: bool,
}

fn validate_extension(ext: &str) -> Result<(), CliError> {
    if ext.starts_with('.') {
        Ok(())
    } else {
        Err(CliError::InvalidExtension(ext.to_string()))
    }
}

/// Parse CLI arguments from an iterator (for testing).
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_args(cli: Cli) -> CheckArgs {
        match cli.command {
            Command::Check(args) => args,
            other => panic!("expected Check, got {:?}", other),
        }
    }

    // --- check ---

    #[test]
    fn test_check_requires_output() {
        let err = parse_from(["spat-fsutil", "check"]).unwrap_err();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn test_check_repeatable_args() {
        let cli = parse_from([
            "spat-fsutil", "check", "-o", "a.tif", "--output", "b.tif", "-i", "in.tif", "--overwrite",
        ])
        .expect("parse");
        let args = check_args(cli);

        assert_eq!(args.outputs, vec!["a.tif", "b.tif"]);
        assert_eq!(args.inputs, vec!["in.tif"]);
        assert!(args.overwrite);
        assert_eq!(args.format, OutputFormat::Text);
        args.validate().expect("valid");
    }

    #[test]
    fn test_check_case_flags_conflict() {
        let result = parse_from([
            "spat-fsutil", "check", "-o", "a.tif", "--case-insensitive", "--case-sensitive",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_gate_config_case() {
        let args = check_args(
            parse_from(["spat-fsutil", "check", "-o", "a.tif", "--case-insensitive"]).expect("parse"),
        );
        assert!(args.gate_config().case_insensitive);

        let args = check_args(
            parse_from(["spat-fsutil", "check", "-o", "a.tif", "--case-sensitive"]).expect("parse"),
        );
        assert!(!args.gate_config().case_insensitive);

        let args = check_args(parse_from(["spat-fsutil", "check", "-o", "a.tif"]).expect("parse"));
        assert_eq!(args.gate_config().case_insensitive, cfg!(windows));
    }

    #[test]
    fn test_check_sidecars_extend_defaults() {
        let args = check_args(
            parse_from(["spat-fsutil", "check", "-o", "a.tif", "--sidecar", ".ovr"]).expect("parse"),
        );
        let config = args.gate_config();
        assert_eq!(config.sidecar_extensions.len(), 5);
        assert_eq!(config.sidecar_extensions.last().map(String::as_str), Some(".ovr"));
    }

    #[test]
    fn test_check_validate_rejects_bad_sidecar() {
        let args = check_args(
            parse_from(["spat-fsutil", "check", "-o", "a.tif", "--sidecar", "ovr"]).expect("parse"),
        );
        assert_eq!(args.validate(), Err(CliError::InvalidExtension("ovr".into())));
    }

    #[test]
    fn test_check_validate_rejects_only_empty_outputs() {
        let args = check_args(parse_from(["spat-fsutil", "check", "-o", ""]).expect("parse"));
        assert_eq!(args.validate(), Err(CliError::NoOutputs));
    }

    #[test]
    fn test_check_json_format() {
        let args = check_args(
            parse_from(["spat-fsutil", "check", "-o", "a.tif", "--format", "json"]).expect("parse"),
        );
        assert_eq!(args.format, OutputFormat::Json);
    }

    // --- temp ---

    #[test]
    fn test_temp_defaults() {
        let cli = parse_from(["spat-fsutil", "temp", "--name", "x"]).expect("parse");
        match cli.command {
            Command::Temp(args) => {
                assert_eq!(args.dir, DEFAULT_TEMP_DIR);
                assert_eq!(args.ext, "");
                assert_eq!(args.seed, None);
                args.validate().expect("valid");
            }
            other => panic!("expected Temp, got {:?}", other),
        }
    }

    #[test]
    fn test_temp_validation() {
        let args = TempArgs {
            dir: ".".into(),
            name: String::new(),
            ext: ".tif".into(),
            seed: None,
        };
        assert_eq!(args.validate(), Err(CliError::EmptyName));

        let args = TempArgs {
            name: "x".into(),
            ext: "tif".into(),
            ..args
        };
        assert_eq!(args.validate(), Err(CliError::InvalidExtension("tif".into())));
    }

    // --- path ---

    #[test]
    fn test_path_ops_parse() {
        for (op, expected) in [
            ("ext", PathOp::Ext),
            ("noext", PathOp::Noext),
            ("base", PathOp::Base),
            ("base-noext", PathOp::BaseNoext),
            ("dir", PathOp::Dir),
            ("set-ext", PathOp::SetExt),
        ] {
            let cli = parse_from(["spat-fsutil", "path", op, "a/b.tif"]).expect("parse");
            match cli.command {
                Command::Path(args) => assert_eq!(args.op, expected),
                other => panic!("expected Path, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_path_set_ext_requires_ext() {
        let args = PathArgs {
            op: PathOp::SetExt,
            path: "a.tif".into(),
            ext: None,
        };
        assert_eq!(args.validate(), Err(CliError::MissingExtension));
    }

    // --- read / write / exists ---

    #[test]
    fn test_write_collects_lines() {
        let cli = parse_from(["spat-fsutil", "write", "out.txt", "one", "two"]).expect("parse");
        match cli.command {
            Command::Write(args) => {
                assert_eq!(args.path, "out.txt");
                assert_eq!(args.lines, vec!["one", "two"]);
                assert!(!args.overwrite);
            }
            other => panic!("expected Write, got {:?}", other),
        }
    }

    #[test]
    fn test_read_strict_flag() {
        let cli = parse_from(["spat-fsutil", "read", "--strict", "in.txt"]).expect("parse");
        assert_eq!(
            cli.command,
            Command::Read(ReadArgs {
                path: "in.txt".into(),
                strict: true
            })
        );
    }

    #[test]
    fn test_exists_dir_and_parent_conflict() {
        assert!(parse_from(["spat-fsutil", "exists", "--dir", "--parent", "x"]).is_err());
    }

    #[test]
    fn test_global_verbosity() {
        let cli = parse_from(["spat-fsutil", "read", "in.txt", "-vv"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }
}
