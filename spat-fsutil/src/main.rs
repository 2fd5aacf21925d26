//! spat-fsutil binary.
//!
//! Entry point for the `spat-fsutil` command-line tool.

use std::process::ExitCode;

use clap::Parser;
use spat_fs::{RealSleeper, StderrLogger, Verbosity, VsiFilesystem};
use spat_fsutil::exit::{codes, exit_code};
use spat_fsutil::{
    execute_check, execute_exists, execute_path, execute_read, execute_temp, execute_write,
    render_report, Cli, Command, CommandError, CommandResult,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = StderrLogger::new(Verbosity::from_count(cli.verbose));
    let fs: VsiFilesystem = VsiFilesystem::default();

    match run(cli.command, &fs, &logger) {
        Ok(()) => ExitCode::from(codes::SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(command: Command, fs: &VsiFilesystem, logger: &StderrLogger) -> CommandResult<()> {
    match command {
        Command::Check(args) => {
            let report = execute_check(&args, fs, logger)?;
            println!("{}", render_report(&report, args.format)?);
        }
        Command::Temp(args) => {
            println!("{}", execute_temp(&args, fs, &RealSleeper::new())?);
        }
        Command::Path(args) => {
            println!("{}", execute_path(&args)?);
        }
        Command::Read(args) => {
            for line in execute_read(&args, fs)? {
                println!("{}", line);
            }
        }
        Command::Write(args) => {
            execute_write(&args, fs, logger)?;
        }
        Command::Exists(args) => {
            let found = execute_exists(&args, fs);
            println!("{}", found);
            if !found {
                return Err(CommandError::NotFound(args.path));
            }
        }
    }
    Ok(())
}
