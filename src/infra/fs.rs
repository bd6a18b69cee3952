//! Filesystem infrastructure — hashing, directory creation, and file moves.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::application::ports::{FileHasher, LocalFs};

/// Production filesystem implementation of the `LocalFs` and `FileHasher`
/// ports.
pub struct StdFs;

impl LocalFs for StdFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("creating directory {}", path.display()))
    }
}

impl FileHasher for StdFs {
    fn sha256_file(&self, path: &Path) -> Result<String> {
        sha256_file(path)
    }
}

/// Compute the SHA256 hex digest of a file.
///
/// Reads the file in 64 KB chunks to avoid loading large images into memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 65536];
    loop {
        let n = file.read(&mut buf).context("reading file")?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex_encode(&hasher.finalize()))
}

/// Move a file, falling back to copy + remove when the rename crosses
/// filesystems.
///
/// The fallback copies into `<dest>.partial` first and renames into place,
/// so a crashed copy never leaves a truncated file under the final name.
///
/// # Errors
///
/// Returns an error if neither the rename nor the copy fallback succeeds.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if std::fs::rename(src, dest).is_ok() {
        return Ok(());
    }

    let partial = partial_path(dest);
    std::fs::copy(src, &partial)
        .with_context(|| format!("copying {} to {}", src.display(), partial.display()))?;
    std::fs::rename(&partial, dest)
        .with_context(|| format!("finalizing {}", dest.display()))?;
    std::fs::remove_file(src)
        .with_context(|| format!("removing source {}", src.display()))?;
    Ok(())
}

fn partial_path(dest: &Path) -> std::path::PathBuf {
    let name = dest
        .file_name()
        .map_or_else(|| ".partial".into(), |n| {
            let mut name = n.to_os_string();
            name.push(".partial");
            name
        });
    dest.with_file_name(name)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
