//! Temporary filename generation.
//!
//! Names look like `<dir>/spat_<name>_<token><ext>` with a 15-character
//! alphanumeric token. A candidate is redrawn (after a 1 ms pause) until one
//! is found that does not exist yet.
//!
//! The only guarantee is that nothing existed at the returned path when it
//! was checked. The file is not created here, so a concurrent writer can still
//! take the name before the caller does. Tokens are not suitable for anything
//! security related.

use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::probe::file_exists;
use crate::sleeper::{RealSleeper, Sleeper};
use crate::vfs::Filesystem;

/// Length of the random token.
pub const TOKEN_LEN: usize = 15;

/// Prefix of every generated file name.
pub const TEMP_PREFIX: &str = "spat_";

/// Pause between collision retries.
pub const RETRY_DELAY: Duration = Duration::from_millis(1);

/// Draw a token of [`TOKEN_LEN`] characters uniformly from `[0-9A-Za-z]`.
pub fn random_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| {
            let byte: u8 = rng.sample(Alphanumeric);
            char::from(byte)
        })
        .collect()
}

/// Return a path under `dir` that does not exist at the time of the check.
///
/// Retries without limit while candidates collide.
pub fn temp_file<F, R, S>(
    fs: &F,
    rng: &mut R,
    sleeper: &S,
    dir: &str,
    name: &str,
    ext: &str,
) -> String
where
    F: Filesystem + ?Sized,
    R: Rng + ?Sized,
    S: Sleeper + ?Sized,
{
    loop {
        let candidate = format!(
            "{}/{}{}_{}{}",
            dir,
            TEMP_PREFIX,
            name,
            random_token(rng),
            ext
        );
        if !file_exists(fs, &candidate) {
            return candidate;
        }
        sleeper.sleep(RETRY_DELAY);
    }
}

/// Owns the filesystem, sleeper and random generator used for temp names.
///
/// Taking `&mut self` keeps draws from one generator serialized; share a
/// namer across threads behind a `Mutex`.
#[derive(Debug)]
pub struct TempNamer<F, S = RealSleeper, R = StdRng> {
    fs: F,
    sleeper: S,
    rng: R,
}

impl<F: Filesystem> TempNamer<F, RealSleeper, StdRng> {
    /// Namer with a real sleeper and an OS-seeded generator.
    pub fn from_entropy(fs: F) -> Self {
        Self::new(fs, RealSleeper::new(), StdRng::from_entropy())
    }
}

impl<F: Filesystem, S: Sleeper, R: Rng> TempNamer<F, S, R> {
    pub fn new(fs: F, sleeper: S, rng: R) -> Self {
        Self { fs, sleeper, rng }
    }

    /// See [`temp_file`].
    pub fn temp_file(&mut self, dir: &str, name: &str, ext: &str) -> String {
        temp_file(&self.fs, &mut self.rng, &self.sleeper, dir, name, ext)
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }
}
