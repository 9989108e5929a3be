//! Capability-based output helpers built on `cap-std` and `camino`.
//!
//! Destinations are opened through an ambient directory handle for their
//! parent rather than by raw path, so every write is scoped to one directory.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// Create every missing directory above `path`.
///
/// Paths without a parent, or whose parent is the current directory or the
/// filesystem root, need no work.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (anchor, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Replace the contents of `path` with `contents`.
///
/// The file is created when absent and truncated otherwise. The parent
/// directory must already exist; see [`ensure_parent_dir`].
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let (dir, file_name) = open_parent(path)?;
    dir.write(file_name, contents)
}

fn open_parent(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Split `dir` into an ambient anchor (root, drive prefix, or `.`) and the
/// relative remainder below it.
fn split_anchor(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_dir = dir.as_std_path();
    let anchor = match std_dir.components().next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(format!("{prefix}{}", std::path::MAIN_SEPARATOR))
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if anchor.as_str() == "." {
        dir.to_path_buf()
    } else {
        dir.strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("failed to strip {anchor} from {dir}")))?
            .to_path_buf()
    };
    let handle = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((handle, relative))
}
