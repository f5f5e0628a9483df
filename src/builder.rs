use crate::compiler::{CompileJob, CompileOutcome, Compiler};
use crate::fs::{self, DirListing};

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

/// Compiles every file below a directory with a bounded number of
/// compiler processes running at once.
#[derive(Debug, Clone)]
pub struct Builder {
    compiler: Compiler,
    jobs: NonZeroUsize,
}

impl Builder {
    pub fn new(compiler: Compiler, jobs: NonZeroUsize) -> Self {
        Self { compiler, jobs }
    }

    /// Queues a compile job for every file below `root` and waits for all of
    /// them. Outcomes are returned in completion order.
    ///
    /// Compile failures end up in the outcomes. Only a directory that can't
    /// be listed is an error, and jobs queued before it still run.
    pub fn build<P: AsRef<Path>>(&self, root: P) -> Result<Vec<CompileOutcome>, anyhow::Error> {
        let (job_tx, job_rx) = mpsc::channel::<CompileJob>();
        let job_rx = Mutex::new(job_rx);
        let (outcome_tx, outcome_rx) = mpsc::channel();

        thread::scope(|scope| {
            for _ in 0..self.jobs.get() {
                let outcome_tx = outcome_tx.clone();
                let job_rx = &job_rx;
                scope.spawn(move || {
                    while let Some(job) = next_job(job_rx) {
                        let outcome = self.compiler.run(job);
                        outcome.log();
                        // the receiver lives until the scope ends
                        let _ = outcome_tx.send(outcome);
                    }
                });
            }
            drop(outcome_tx);

            // dropping the sender lets the workers drain the queue and stop
            let queued = queue_dir(root.as_ref(), &job_tx);
            drop(job_tx);
            queued
        })?;

        Ok(outcome_rx.into_iter().collect())
    }
}

pub fn default_jobs() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

fn next_job(rx: &Mutex<mpsc::Receiver<CompileJob>>) -> Option<CompileJob> {
    rx.lock().unwrap_or_else(PoisonError::into_inner).recv().ok()
}

fn queue_dir(dir: &Path, tx: &mpsc::Sender<CompileJob>) -> Result<(), anyhow::Error> {
    let DirListing { files, subdirs } = fs::list_dir(dir)?;
    for name in files {
        let job = CompileJob::new(dir.join(name));
        log::trace!("queueing {}", job.source.display());
        if tx.send(job).is_err() {
            anyhow::bail!("all compile workers stopped");
        }
    }
    for subdir in subdirs {
        queue_dir(&subdir, tx)?;
    }
    Ok(())
}
