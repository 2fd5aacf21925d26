//! Read and write commands: text files as lines.

use spat_fs::{
    read_lines, read_text, write_lines, Filesystem, GateConfig, GateReport, Logger, WriteGate,
};

use crate::cli::{ReadArgs, WriteArgs};

use super::CommandResult;

/// Execute the read command.
///
/// Without `--strict` an unreadable file reads as empty.
pub fn execute_read<F>(args: &ReadArgs, fs: &F) -> CommandResult<Vec<String>>
where
    F: Filesystem + ?Sized,
{
    if args.strict {
        Ok(read_lines(fs, &args.path)?)
    } else {
        Ok(read_text(fs, &args.path))
    }
}

/// Execute the write command: gate the target, then write the lines.
pub fn execute_write<F, L>(args: &WriteArgs, fs: &F, logger: &L) -> CommandResult<GateReport>
where
    F: Filesystem + ?Sized,
    L: Logger + ?Sized,
{
    let outputs = [args.path.as_str()];
    let inputs: [&str; 0] = [];
    let report = WriteGate::new(fs, logger, GateConfig::default()).check(
        &outputs,
        &inputs,
        args.overwrite,
    )?;

    write_lines(fs, &args.path, &args.lines)?;
    logger.verbose(&format!("wrote {} lines to {}", args.lines.len(), args.path));
    Ok(report)
}
