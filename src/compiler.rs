use crate::fs;

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One source file and the artifact it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl CompileJob {
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        let source = source.into();
        let output = fs::spirv_path(&source);
        Self { source, output }
    }
}

/// What happened to a finished [`CompileJob`].
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub job: CompileJob,
    pub command: String,
    pub error: Option<String>,
}

impl CompileOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The lines logged on completion: always the command, then the
    /// error if there was one.
    pub fn log_lines(&self) -> Vec<(log::Level, &str)> {
        let mut lines = vec![(log::Level::Info, self.command.as_str())];
        if let Some(error) = &self.error {
            lines.push((log::Level::Error, error.as_str()));
        }
        lines
    }

    pub fn log(&self) {
        for (level, line) in self.log_lines() {
            log::log!(level, "{line}");
        }
    }
}

/// The external shader compiler, invoked as `<path> <source> -o <output>`.
#[derive(Debug, Clone)]
pub struct Compiler {
    path: PathBuf,
}

impl Compiler {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn command_line<'a>(&'a self, job: &'a CompileJob) -> CommandLine<'a> {
        CommandLine { compiler: self, job }
    }

    /// Runs the compiler for `job` and waits for it to exit.
    ///
    /// Failing to spawn and a non zero exit are both reported in the
    /// outcome, never as an `Err`.
    pub fn run(&self, job: CompileJob) -> CompileOutcome {
        let command = self.command_line(&job).to_string();
        log::debug!("starting {command}");

        let result = Command::new(&self.path)
            .arg(&job.source)
            .arg("-o")
            .arg(&job.output)
            .output();
        let error = match result {
            Ok(output) if output.status.success() => None,
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stdout = String::from_utf8_lossy(&output.stdout);
                let mut msg = format!("Command failed ({}): {command}", output.status);
                for text in [stderr.trim_end(), stdout.trim_end()] {
                    if !text.is_empty() {
                        msg.push('\n');
                        msg.push_str(text);
                    }
                }
                Some(msg)
            }
            Err(err) => Some(format!("Failed to run {}: {err}", self.path.display())),
        };

        CompileOutcome { job, command, error }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new("glslc")
    }
}

/// Shell-like rendering of a compile invocation, used for logging.
pub struct CommandLine<'a> {
    compiler: &'a Compiler,
    job: &'a CompileJob,
}

impl fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" \"{}\" -o \"{}\"",
            self.compiler.path.display(),
            self.job.source.display(),
            self.job.output.display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempDir;

    #[test]
    fn output_appends_suffix() {
        let job = CompileJob::new("shaders/post/blur.frag");
        assert_eq!(job.output, PathBuf::from("shaders/post/blur.frag.spv"));
    }

    #[test]
    fn command_line_quotes_paths() {
        let compiler = Compiler::new("/sdk/bin/glslc");
        let job = CompileJob::new("my shaders/a.vert");
        assert_eq!(
            compiler.command_line(&job).to_string(),
            r#""/sdk/bin/glslc" "my shaders/a.vert" -o "my shaders/a.vert.spv""#,
        );
    }

    #[test]
    fn missing_compiler_is_reported() {
        let tmp = TempDir::new("no_compiler");
        let source = tmp.write("a.vert", "");
        let compiler = Compiler::new(tmp.path().join("does-not-exist"));

        let outcome = compiler.run(CompileJob::new(&source));
        assert!(!outcome.is_ok());
        assert!(outcome.error.unwrap().contains("Failed to run"));
        assert!(!fs::spirv_path(&source).exists());
    }

    #[test]
    fn successful_outcome_logs_only_command() {
        let job = CompileJob::new("a.vert");
        let command = Compiler::default().command_line(&job).to_string();
        let outcome = CompileOutcome { job, command: command.clone(), error: None };
        assert_eq!(outcome.log_lines(), [(log::Level::Info, command.as_str())]);
    }

    #[test]
    fn missing_compiler_logs_error_line() {
        let tmp = TempDir::new("no_compiler_log");
        let source = tmp.write("a.vert", "");
        let outcome = Compiler::new(tmp.path().join("does-not-exist")).run(CompileJob::new(&source));

        let lines = outcome.log_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (log::Level::Info, outcome.command.as_str()));
        assert_eq!(lines[1].0, log::Level::Error);
        assert!(lines[1].1.contains("does-not-exist"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_outcome_logs_stderr() {
        use crate::testing::{BAD_SHADER, SHELL};

        let tmp = TempDir::new("run_err_log");
        let source = tmp.write("broken.frag", BAD_SHADER);
        let outcome = Compiler::new(SHELL).run(CompileJob::new(&source));

        let lines = outcome.log_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (log::Level::Info, outcome.command.as_str()));
        assert_eq!(lines[1].0, log::Level::Error);
        assert!(lines[1].1.contains("bad shader"));
    }

    #[cfg(unix)]
    #[test]
    fn runs_compiler() {
        use crate::testing::{GOOD_SHADER, SHELL};

        let tmp = TempDir::new("run_ok");
        let source = tmp.write("a.vert", GOOD_SHADER);
        let outcome = Compiler::new(SHELL).run(CompileJob::new(&source));

        assert!(outcome.is_ok(), "{:?}", outcome.error);
        assert!(outcome.command.starts_with("\"/bin/sh\""));
        assert_eq!(tmp.files(), ["a.vert", "a.vert.spv"]);
    }

    #[cfg(unix)]
    #[test]
    fn failure_carries_stderr() {
        use crate::testing::{BAD_SHADER, SHELL};

        let tmp = TempDir::new("run_err");
        let source = tmp.write("broken.frag", BAD_SHADER);
        let outcome = Compiler::new(SHELL).run(CompileJob::new(&source));

        let error = outcome.error.expect("compile should fail");
        assert!(error.contains("Command failed"));
        assert!(error.contains("bad shader"));
        assert_eq!(tmp.files(), ["broken.frag"]);
    }
}
