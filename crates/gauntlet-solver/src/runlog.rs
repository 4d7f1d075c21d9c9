//! Append-only attempt log and screenshot artifacts.
//!
//! Every attempt produces one immutable row plus the persisted left/right
//! JPEGs it references. Ground truth columns are written empty and filled
//! in later by an offline labeling tool that reads the log and the images;
//! that tool rewrites the whole file, so this writer never updates or
//! deletes rows.

use gauntlet_core::TaskKind;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Column names of the attempt log, fixed at first use.
pub const LOG_HEADER: [&str; 10] = [
    "run_timestamp",
    "filename_left",
    "filename_right",
    "extracted_left",
    "extracted_right",
    "left_model",
    "right_model",
    "left_ground_truth",
    "right_ground_truth",
    "task_type",
];

/// One attempt's facts, never mutated after creation.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// Round start key, `YYYYMMDD_HHMMSS`
    pub run_timestamp: String,
    /// Persisted reference (left) image path
    pub filename_left: String,
    /// Persisted candidate (right) image path
    pub filename_right: String,
    /// Extracted reference value; empty when extraction failed
    pub extracted_left: String,
    /// Extracted candidate value; empty when extraction failed
    pub extracted_right: String,
    /// Model that read the reference image
    pub left_model: String,
    /// Model that read the candidate image
    pub right_model: String,
    /// The session's task kind
    pub task_type: TaskKind,
}

impl AttemptRecord {
    fn to_row(&self) -> String {
        // Ground truth columns stay empty placeholders.
        let fields = [
            self.run_timestamp.as_str(),
            self.filename_left.as_str(),
            self.filename_right.as_str(),
            self.extracted_left.as_str(),
            self.extracted_right.as_str(),
            self.left_model.as_str(),
            self.right_model.as_str(),
            "",
            "",
            self.task_type.as_str(),
        ];
        fields
            .iter()
            .map(|f| quote_field(f))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Quote a field when it contains the delimiter, a quote, or a newline.
fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append-only writer for the attempt log.
///
/// The header row is written exactly once, when the file is created; it is
/// never rewritten by subsequent appends. Single writer per file: callers
/// running concurrent sessions must give each its own log.
#[derive(Debug)]
pub struct RunLogger {
    path: PathBuf,
}

impl RunLogger {
    /// Open the log at `path`, creating it (and its parent directories)
    /// with the header row if it does not yet exist.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            let mut file = File::create(&path)?;
            writeln!(file, "{}", LOG_HEADER.join(","))?;
        }
        Ok(Self { path })
    }

    /// Append one attempt row.
    pub fn append(&self, record: &AttemptRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", record.to_row())?;
        Ok(())
    }

    /// Path of the underlying log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Session-scoped store for persisted screenshot halves.
///
/// File names carry the round key plus round/attempt indices so the
/// offline labeling tool can correlate them with log rows.
#[derive(Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create the store, making the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Persist the reference (left) half for a round.
    pub fn save_reference(&self, key: &str, round: u32, jpeg: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.join(format!("{key}_round{round}_left.jpg"));
        fs::write(&path, jpeg)?;
        Ok(path)
    }

    /// Persist the candidate (right) half for an attempt.
    pub fn save_candidate(
        &self,
        key: &str,
        round: u32,
        attempt: u32,
        jpeg: &[u8],
    ) -> std::io::Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{key}_round{round}_attempt{attempt}_right.jpg"));
        fs::write(&path, jpeg)?;
        Ok(path)
    }

    /// Directory the artifacts land in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: &str) -> AttemptRecord {
        AttemptRecord {
            run_timestamp: ts.to_string(),
            filename_left: "/data/a_left.jpg".to_string(),
            filename_right: "/data/a_right.jpg".to_string(),
            extracted_left: "7".to_string(),
            extracted_right: "5".to_string(),
            left_model: "model-a".to_string(),
            right_model: "model-b".to_string(),
            task_type: TaskKind::Length,
        }
    }

    #[test]
    fn test_header_written_once_across_reopen() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("runs.csv");

        let logger = RunLogger::open(&path).expect("open log");
        logger.append(&record("20250101_000000")).expect("append");

        // Reopening must not rewrite the header or truncate rows.
        let logger = RunLogger::open(&path).expect("reopen log");
        logger.append(&record("20250101_000001")).expect("append");

        let contents = fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LOG_HEADER.join(","));
        assert!(lines[1].starts_with("20250101_000000"));
        assert!(lines[2].starts_with("20250101_000001"));
    }

    #[test]
    fn test_row_column_count_matches_header() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("runs.csv");
        let logger = RunLogger::open(&path).expect("open log");
        logger.append(&record("20250101_000000")).expect("append");

        let contents = fs::read_to_string(&path).expect("read log");
        for line in contents.lines() {
            assert_eq!(line.split(',').count(), LOG_HEADER.len());
        }
    }

    #[test]
    fn test_ground_truth_columns_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("runs.csv");
        let logger = RunLogger::open(&path).expect("open log");
        logger.append(&record("20250101_000000")).expect("append");

        let contents = fs::read_to_string(&path).expect("read log");
        let row: Vec<&str> = contents.lines().nth(1).expect("data row").split(',').collect();
        assert_eq!(row[7], "");
        assert_eq!(row[8], "");
        assert_eq!(row[9], "length");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested/data/runs.csv");
        let logger = RunLogger::open(&path).expect("open log");
        assert!(logger.path().exists());
    }

    #[test]
    fn test_artifact_store_names() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = ArtifactStore::new(dir.path().join("shots")).expect("create store");

        let left = store
            .save_reference("20250101_000000", 2, &[1, 2, 3])
            .expect("save left");
        assert!(left
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name")
            .ends_with("round2_left.jpg"));

        let right = store
            .save_candidate("20250101_000000", 2, 4, &[1, 2, 3])
            .expect("save right");
        assert!(right
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name")
            .ends_with("round2_attempt4_right.jpg"));
        assert!(right.exists());
    }
}
