use spvsync::{logger, watch, Config, DEFAULT_SHADER_DIR};

use clap::Parser;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Deletes stale SPIR-V files and recompiles every shader in a directory tree.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Root of the shader sources
    #[arg(default_value = DEFAULT_SHADER_DIR)]
    shader_dir: PathBuf,

    /// Shader compiler, called as `<compiler> <source> -o <source>.spv`
    #[arg(long, env = "GLSLC", default_value = "glslc")]
    compiler: PathBuf,

    /// Number of compiler processes to run at once [default: number of cpus]
    #[arg(short, long)]
    jobs: Option<NonZeroUsize>,

    /// Keep running and rebuild whenever a source file changes
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    logger::init();

    let mut config = Config {
        shader_dir: args.shader_dir,
        compiler: args.compiler,
        watch: args.watch,
        ..Default::default()
    };
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }

    spvsync::sync(&config)?;
    if config.watch {
        watch::watch(&config)?;
    }
    Ok(())
}
