use std::path::{Path, PathBuf};

/// `/bin/sh` stands in for glslc: `sh <source> -o <output>` runs the
/// source as a script with `$0` the source and `$2` the output path.
#[cfg(unix)]
pub const SHELL: &str = "/bin/sh";
#[cfg(unix)]
pub const GOOD_SHADER: &str = "cp \"$0\" \"$2\"\n";
#[cfg(unix)]
pub const BAD_SHADER: &str = "echo \"bad shader $0\" >&2\nexit 3\n";

/// Scratch shader tree, removed again when dropped.
pub struct TempDir {
    dir: tempfile::TempDir,
}

impl TempDir {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("spvsync-{name}-"))
            .tempdir()
            .expect("Unable to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// All file paths below the root, relative and sorted.
    pub fn files(&self) -> Vec<String> {
        fn walk(dir: &Path, root: &Path, out: &mut Vec<String>) {
            for entry in std::fs::read_dir(dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    walk(&path, root, out);
                } else {
                    let rel = path.strip_prefix(root).unwrap();
                    out.push(rel.to_string_lossy().replace('\\', "/"));
                }
            }
        }
        let mut out = Vec::new();
        walk(self.path(), self.path(), &mut out);
        out.sort();
        out
    }
}
