use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub const SPIRV_SUFFIX: &str = ".spv";

/// The immediate entries of one directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Names of regular files, relative to the listed directory.
    pub files: Vec<OsString>,
    /// Full paths of subdirectories.
    pub subdirs: Vec<PathBuf>,
}

/// Lists the files and subdirectories directly inside `dir`.
///
/// Entry types come from the directory entry and are not followed through
/// symlinks, so links end up in neither list.
pub fn list_dir<P: AsRef<Path>>(dir: P) -> Result<DirListing, anyhow::Error> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut listing = DirListing::default();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read an entry in {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to get file type of {}", entry.path().display()))?;
        if file_type.is_file() {
            listing.files.push(entry.file_name());
        } else if file_type.is_dir() {
            listing.subdirs.push(entry.path());
        }
    }
    Ok(listing)
}

pub fn is_spirv<S: AsRef<OsStr>>(name: S) -> bool {
    name.as_ref().as_encoded_bytes().ends_with(SPIRV_SUFFIX.as_bytes())
}

/// Path of the compiled artifact for `source`, the suffix is appended
/// so `a.vert` becomes `a.vert.spv`.
pub fn spirv_path<P: AsRef<Path>>(source: P) -> PathBuf {
    let mut output = source.as_ref().as_os_str().to_owned();
    output.push(SPIRV_SUFFIX);
    output.into()
}
