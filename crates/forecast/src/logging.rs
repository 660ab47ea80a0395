//! File logging for the CLI
//!
//! Everything goes to `{data_dir}/forecast.log`; stdout is reserved for
//! reports so they can be piped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "forecast.log";

/// Log size that triggers rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Tail kept after rotation (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

const ROTATION_MARKER: &[u8] = b"--- log rotated, older entries removed ---\n";

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE_NAME)
}

/// Trim the log to its most recent `keep` bytes once it grows past `max`.
///
/// The cut is moved forward to the next line start so no entry is left
/// half-written. Returns whether the file was rotated.
pub fn rotate_log_if_needed(path: &Path, max: u64, keep: u64) -> io::Result<bool> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if size <= max {
        return Ok(false);
    }

    let mut tail = Vec::new();
    {
        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(size.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }

    let start = tail
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(path)?;
    file.write_all(ROTATION_MARKER)?;
    file.write_all(&tail[start..])?;
    Ok(true)
}

/// Log file shared by every writer the subscriber hands out
#[derive(Clone)]
struct SharedLogFile(Arc<Mutex<File>>);

struct SharedLogWriter(Arc<Mutex<File>>);

impl SharedLogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for SharedLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for SharedLogFile {
    type Writer = SharedLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SharedLogWriter(Arc::clone(&self.0))
    }
}

/// Install the global subscriber writing to `{data_dir}/forecast.log`.
///
/// `RUST_LOG` takes precedence over `level`. The engine crate is held at
/// `warn` by default so skipped-year warnings still reach the log.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let path = log_path(data_dir);

    if let Err(e) = rotate_log_if_needed(&path, MAX_LOG_SIZE, KEEP_SIZE) {
        eprintln!("warning: failed to rotate {}: {e}", path.display());
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let writer = SharedLogFile(Arc::new(Mutex::new(file)));

    let default_filter = format!("forecast={level},forecast_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    tracing::info!(log_path = %path.display(), "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_small_log_untouched() {
        let dir = tempdir().unwrap();
        let path = log_path(dir.path());
        fs::write(&path, "one\ntwo\n").unwrap();

        assert!(!rotate_log_if_needed(&path, 100, 10).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_missing_log_is_not_an_error() {
        let dir = tempdir().unwrap();
        assert!(!rotate_log_if_needed(&log_path(dir.path()), 100, 10).unwrap());
    }

    #[test]
    fn test_rotation_keeps_whole_recent_lines() {
        let dir = tempdir().unwrap();
        let path = log_path(dir.path());
        let lines: String = (0..50).map(|i| format!("entry {i:02}\n")).collect();
        fs::write(&path, &lines).unwrap();

        assert!(rotate_log_if_needed(&path, 100, 40).unwrap());

        let rotated = fs::read_to_string(&path).unwrap();
        let body = rotated
            .strip_prefix(std::str::from_utf8(ROTATION_MARKER).unwrap())
            .unwrap();
        assert!(body.len() <= 40);
        assert!(body.ends_with("entry 49\n"));
        assert!(body.lines().all(|line| line.starts_with("entry ")));
    }
}
