//! Temp command: print a temporary filename.

use rand::rngs::StdRng;
use rand::SeedableRng;
use spat_fs::{temp_file, Filesystem, Sleeper};

use crate::cli::TempArgs;

use super::CommandResult;

/// Execute the temp command.
///
/// With `--seed` the same name is produced for the same filesystem state.
pub fn execute_temp<F, S>(args: &TempArgs, fs: &F, sleeper: &S) -> CommandResult<String>
where
    F: Filesystem + ?Sized,
    S: Sleeper + ?Sized,
{
    args.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(temp_file(fs, &mut rng, sleeper, &args.dir, &args.name, &args.ext))
}
