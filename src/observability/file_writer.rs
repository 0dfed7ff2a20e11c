//! Size-rotated line writer for the span log.
//!
//! Appends lines to one file. Before a write that would push the file past
//! its size limit, the file is shifted to `<name>.1`, `<name>.1` to
//! `<name>.2` and so on; the oldest backup falls off the end.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold: 5 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Backups kept next to the live file.
pub const MAX_BACKUP_FILES: usize = 2;

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so constructing a writer
/// for a directory that does not exist yet is fine.
pub struct RotatingWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    state: Mutex<Option<OpenFile>>,
}

struct OpenFile {
    file: File,
    len: u64,
}

impl RotatingWriter {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            state: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening or writing
    /// fails, or if the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| io::Error::other(format!("writer lock poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;
        let current = match state.as_ref() {
            Some(open) => open.len,
            None => fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0),
        };
        if current > 0 && current + incoming > self.max_bytes {
            *state = None;
            self.rotate()?;
        }

        if state.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            let len = file.metadata()?.len();
            *state = Some(OpenFile { file, len });
        }

        let open = state
            .as_mut()
            .ok_or_else(|| io::Error::other("span log not open"))?;
        writeln!(open.file, "{line}")?;
        open.file.flush()?;
        open.len += incoming;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}
