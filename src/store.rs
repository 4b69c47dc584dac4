//! The append-only weight log on disk.
//!
//! The log is a plain text file with one [Entry] per line, see
//! [log_format](crate::log_format). Entries are only ever appended; reading
//! returns them in the order they were written.

use crate::log_format::Entry;

use log::{debug, info};
use std::{
    borrow::Cow,
    env, fmt,
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

/// Name of the data file when no other location is configured.
pub const DEFAULT_DATA_FILE: &str = "weight.dat";

/// Things that can go wrong while reading or appending to the log.
#[derive(Debug)]
pub enum LogError {
    /// Returned when the file cannot be opened, read, or written.
    IoError(io::Error),

    /// Returned when a line of the log is not a valid entry.
    Parse {
        /// 1-based line number of the bad line
        line: usize,
        /// The offending text
        text: String,
    },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            LogError::IoError(error) => Cow::from(format!("io error: {}", error)),
            LogError::Parse { line, text } => {
                Cow::from(format!("line {} is not a valid entry: {:?}", line, text))
            }
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for LogError {}

impl From<io::Error> for LogError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

/// A handle to the weight log. Nothing is read or written until one of the
/// methods is called.
#[derive(Debug, Clone)]
pub struct WeightLog {
    path: PathBuf,
}

impl WeightLog {
    /// Refer to the log stored at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        WeightLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Where the log is stored.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry in file order. A log that does not exist yet is
    /// simply empty.
    pub fn read(&self) -> Result<Vec<Entry>, LogError> {
        let handle = match File::open(&self.path) {
            Ok(handle) => handle,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let entries = Self::read_from(BufReader::new(handle))?;
        debug!("Read {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Read entries from any buffered source, skipping blank lines.
    pub fn read_from(reader: impl BufRead) -> Result<Vec<Entry>, LogError> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = line.parse::<Entry>().map_err(|_| LogError::Parse {
                line: idx + 1,
                text: line.clone(),
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }

    /// The last `n` entries, or all of them if there are fewer.
    pub fn tail(&self, n: usize) -> Result<Vec<Entry>, LogError> {
        let mut entries = self.read()?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.split_off(skip))
    }

    /// Append one entry as a new line, creating the file if needed.
    pub fn append(&self, entry: &Entry) -> Result<(), LogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(handle, "{}", entry)?;
        info!("Appended `{}` to {}", entry, self.path.display());
        Ok(())
    }
}

/// The directory holding the running executable.
pub(crate) fn executable_dir() -> io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn entry(d: u32, text: &str) -> Entry {
        Entry::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), text).unwrap()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = WeightLog::open(dir.path().join("nothing.dat"));
        assert!(log.read().unwrap().is_empty());
        assert!(log.tail(30).unwrap().is_empty());
    }

    #[test]
    fn append_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let log = WeightLog::open(dir.path().join("nested").join("weight.dat"));

        log.append(&entry(1, "80.1")).unwrap();
        log.append(&entry(2, "79.9")).unwrap();

        let raw = fs::read_to_string(log.path()).unwrap();
        assert_eq!(raw, "01.01.2024 80.1\n02.01.2024 79.9\n");

        let entries = log.read().unwrap();
        assert_eq!(entries, vec![entry(1, "80.1"), entry(2, "79.9")]);
    }

    #[test]
    fn tail_keeps_the_newest() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let log = WeightLog::open(file.path());
        for d in 1..=5 {
            log.append(&entry(d, &format!("{}", 70 + d))).unwrap();
        }

        let weights: Vec<f64> = log.tail(2).unwrap().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![74.0, 75.0]);
        assert_eq!(log.tail(100).unwrap().len(), 5);
        assert!(log.tail(0).unwrap().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "01.01.2024 80\n\n02.01.2024 81\n   \n";
        let entries = WeightLog::read_from(Cursor::new(text)).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn bad_line_reports_its_number() {
        let text = "01.01.2024 80\n02.01.2024 eighty\n";
        match WeightLog::read_from(Cursor::new(text)) {
            Err(LogError::Parse { line, text }) => {
                assert_eq!(line, 2);
                assert_eq!(text, "02.01.2024 eighty");
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
