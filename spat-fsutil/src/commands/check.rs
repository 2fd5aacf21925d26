//! Check command orchestration.
//!
//! Runs the write gate over a batch of planned outputs and renders what it
//! deleted or skipped.

use spat_fs::{Filesystem, GateReport, Logger, WriteGate};

use crate::cli::{CheckArgs, OutputFormat};

use super::CommandResult;

/// Execute the check command.
///
/// Existing outputs (and their sidecars) are deleted when `--overwrite` is
/// given, so this is not a dry run.
pub fn execute_check<F, L>(args: &CheckArgs, fs: &F, logger: &L) -> CommandResult<GateReport>
where
    F: Filesystem + ?Sized,
    L: Logger + ?Sized,
{
    args.validate()?;

    let gate = WriteGate::new(fs, logger, args.gate_config());
    let report = gate.check(&args.outputs, &args.inputs, args.overwrite)?;
    Ok(report)
}

/// Render a gate report for stdout.
pub fn render_report(report: &GateReport, format: OutputFormat) -> CommandResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            let mut lines = vec!["ok".to_string()];
            lines.extend(report.overwritten.iter().map(|p| format!("removed {}", p)));
            lines.extend(
                report
                    .sidecars_removed
                    .iter()
                    .map(|p| format!("removed sidecar {}", p)),
            );
            lines.extend(
                report
                    .virtual_skipped
                    .iter()
                    .map(|p| format!("unverified {}", p)),
            );
            Ok(lines.join("\n"))
        }
    }
}
