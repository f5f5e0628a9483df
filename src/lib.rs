pub mod builder;
pub mod clean;
pub mod compiler;
pub mod fs;
pub mod logger;
pub mod watch;

#[cfg(test)]
mod testing;

pub use builder::Builder;
pub use compiler::{CompileJob, CompileOutcome, Compiler};

use std::num::NonZeroUsize;
use std::path::PathBuf;

pub const DEFAULT_SHADER_DIR: &str = "assets/shaders";

#[derive(Debug, Clone)]
pub struct Config {
    pub shader_dir: PathBuf,
    pub compiler: PathBuf,
    pub jobs: NonZeroUsize,
    /// Keep rebuilding on source changes after the first run.
    pub watch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shader_dir: DEFAULT_SHADER_DIR.into(),
            compiler: Compiler::default().path().to_owned(),
            jobs: builder::default_jobs(),
            watch: false,
        }
    }
}

/// Deletes all compiled shaders below `config.shader_dir` and compiles
/// every file there again.
pub fn sync(config: &Config) -> Result<Vec<CompileOutcome>, anyhow::Error> {
    let removed = clean::clean(&config.shader_dir)?;
    log::debug!("removed {removed} stale SPIR-V files");

    let builder = Builder::new(Compiler::new(&config.compiler), config.jobs);
    let outcomes = builder.build(&config.shader_dir)?;
    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    log::debug!("compiled {} shaders, {failed} failed", outcomes.len());
    Ok(outcomes)
}
