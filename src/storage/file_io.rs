//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SplitrError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, SplitrError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(SplitrError::Io(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| SplitrError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SplitrError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), data, false)
}

/// Like [`write_json_atomic`], but the file is readable by its owner only
///
/// On unix the temp file is created with mode 0600, so the data is never
/// visible to other users, not even before the rename.
pub fn write_private_json_atomic<T, P>(path: P, data: &T) -> Result<(), SplitrError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), data, true)
}

fn write_atomic<T: Serialize>(path: &Path, data: &T, private: bool) -> Result<(), SplitrError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SplitrError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must be in the same directory for the rename to be atomic
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    // A leftover temp file would keep its old permissions
    match fs::remove_file(temp_path) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            return Err(SplitrError::Io(format!(
                "Failed to remove stale temp file: {}",
                e
            )))
        }
        _ => {}
    }

    let file = open_temp(temp_path, private)
        .map_err(|e| SplitrError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SplitrError::Json(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SplitrError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SplitrError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        SplitrError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(unix)]
fn open_temp(path: &Path, private: bool) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    if private {
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(not(unix))]
fn open_temp(path: &Path, _private: bool) -> std::io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
