use crate::fs::{self, DirListing};

use anyhow::Context;
use std::path::Path;

/// Recursively deletes every `.spv` file below `dir`.
///
/// Returns the number of removed files. The first failing deletion aborts.
pub fn clean<P: AsRef<Path>>(dir: P) -> Result<usize, anyhow::Error> {
    let dir = dir.as_ref();
    let DirListing { files, subdirs } = fs::list_dir(dir)?;

    let mut removed = 0;
    for name in files.iter().filter(|name| fs::is_spirv(name)) {
        let path = dir.join(name);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        log::trace!("removed {}", path.display());
        removed += 1;
    }
    for subdir in subdirs {
        removed += clean(subdir)?;
    }
    Ok(removed)
}
