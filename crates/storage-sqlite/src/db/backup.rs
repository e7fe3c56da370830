//! Datastore snapshots with bounded retention.
//!
//! A rotation copies the live datastore file into the backup directory under a
//! timestamped name, then deletes the oldest files until at most `max_kept`
//! remain. Rotation is best-effort: it never returns an error and never
//! panics. Anything that goes wrong is reported to a [`BackupEventSink`] and
//! summarized in the returned [`RotationOutcome`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{Local, NaiveDateTime};
use diesel::connection::{Connection, SimpleConnection};
use diesel::sqlite::SqliteConnection;
use log::{info, warn};
use thiserror::Error;

use crate::errors::StorageError;
use ledgerbook_core::errors::Result;

/// File name prefix of every snapshot.
pub const SNAPSHOT_PREFIX: &str = "backup_";

/// Snapshot file extension.
pub const SNAPSHOT_EXTENSION: &str = "db";

/// Second-resolution timestamp embedded in snapshot names. Sorts lexically.
const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Highest same-second counter. Keeps the suffix at three digits so names
/// sort in creation order.
pub const MAX_SAME_SECOND_COUNTER: u32 = 999;

/// Step of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupStage {
    CreateDir,
    Checkpoint,
    Copy,
    List,
    Prune,
}

impl fmt::Display for BackupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            BackupStage::CreateDir => "creating the backup directory",
            BackupStage::Checkpoint => "folding the write-ahead log into the datastore",
            BackupStage::Copy => "copying the datastore",
            BackupStage::List => "listing backups",
            BackupStage::Prune => "removing old backups",
        };
        f.write_str(stage)
    }
}

/// Something that happened during a rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupEvent {
    /// No datastore file yet, nothing to copy.
    Skipped { db_path: PathBuf },
    Created { snapshot: PathBuf },
    Pruned { snapshot: PathBuf },
    /// A step failed; the rotation stopped there.
    Failed { stage: BackupStage, reason: String },
}

/// Receives rotation events.
///
/// `emit` must not fail or block; rotation runs on the startup path.
pub trait BackupEventSink: Send + Sync {
    fn emit(&self, event: BackupEvent);
}

/// Writes rotation events to the application log.
#[derive(Clone, Default)]
pub struct LogBackupEventSink;

impl BackupEventSink for LogBackupEventSink {
    fn emit(&self, event: BackupEvent) {
        match event {
            BackupEvent::Skipped { db_path } => {
                info!("No datastore at {}, skipping backup", db_path.display())
            }
            BackupEvent::Created { snapshot } => {
                info!("Datastore backup created at {}", snapshot.display())
            }
            BackupEvent::Pruned { snapshot } => {
                info!("Removed old backup {}", snapshot.display())
            }
            BackupEvent::Failed { stage, reason } => {
                warn!("Datastore backup failed while {}: {}", stage, reason)
            }
        }
    }
}

/// Discards rotation events.
#[derive(Clone, Default)]
pub struct NoOpBackupEventSink;

impl BackupEventSink for NoOpBackupEventSink {
    fn emit(&self, _event: BackupEvent) {}
}

impl<S: BackupEventSink + ?Sized> BackupEventSink for Arc<S> {
    fn emit(&self, event: BackupEvent) {
        (**self).emit(event)
    }
}

/// Summary of one rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The datastore file does not exist; nothing on disk was touched.
    Skipped,
    Rotated {
        snapshot: PathBuf,
        pruned: Vec<PathBuf>,
    },
    /// A step failed. `snapshot` is set when the copy itself succeeded.
    Failed {
        stage: BackupStage,
        snapshot: Option<PathBuf>,
        reason: String,
    },
}

#[derive(Debug, Error)]
#[error("{stage}: {source}")]
struct RotationError {
    stage: BackupStage,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl RotationError {
    fn at<E>(stage: BackupStage) -> impl FnOnce(E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        move |source| RotationError {
            stage,
            source: source.into(),
        }
    }
}

/// Snapshots `db_path` into `backup_dir` and keeps the newest `max_kept` files.
pub fn rotate(
    db_path: &Path,
    backup_dir: &Path,
    max_kept: usize,
    sink: &dyn BackupEventSink,
) -> RotationOutcome {
    rotate_at(db_path, backup_dir, max_kept, Local::now().naive_local(), sink)
}

/// [`rotate`] with an explicit clock reading for the snapshot name.
pub fn rotate_at(
    db_path: &Path,
    backup_dir: &Path,
    max_kept: usize,
    now: NaiveDateTime,
    sink: &dyn BackupEventSink,
) -> RotationOutcome {
    if !db_path.exists() {
        sink.emit(BackupEvent::Skipped {
            db_path: db_path.to_path_buf(),
        });
        return RotationOutcome::Skipped;
    }

    let snapshot = match create_snapshot(db_path, backup_dir, now) {
        Ok(snapshot) => snapshot,
        Err(err) => return failed(sink, err, None),
    };
    sink.emit(BackupEvent::Created {
        snapshot: snapshot.clone(),
    });

    let mut pruned = Vec::new();
    if let Err(err) = prune(backup_dir, max_kept, sink, &mut pruned) {
        return failed(sink, err, Some(snapshot));
    }

    RotationOutcome::Rotated { snapshot, pruned }
}

/// Snapshot files in `backup_dir`, oldest first.
///
/// Every regular file counts, whatever its name; subdirectories do not.
pub fn list_snapshots(backup_dir: &Path) -> Result<Vec<PathBuf>> {
    if !backup_dir.exists() {
        return Ok(Vec::new());
    }
    let files = backup_files(backup_dir).map_err(StorageError::from)?;
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Name for a snapshot taken at `now`.
///
/// Rotations within the same second get a zero-padded counter one past the
/// highest already used for that second (`backup_<ts>_001.db`, ...), so no
/// snapshot overwrites another and names keep sorting in creation order.
/// Fails once the counter for that second has reached
/// [`MAX_SAME_SECOND_COUNTER`].
pub fn snapshot_path(backup_dir: &Path, now: NaiveDateTime) -> io::Result<PathBuf> {
    let stem = format!("{}{}", SNAPSHOT_PREFIX, now.format(SNAPSHOT_TIMESTAMP_FORMAT));
    match highest_counter(backup_dir, &stem) {
        None => Ok(backup_dir.join(format!("{}.{}", stem, SNAPSHOT_EXTENSION))),
        Some(n) if n >= MAX_SAME_SECOND_COUNTER => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} snapshots already taken at {}", n + 1, stem),
        )),
        Some(n) => Ok(backup_dir.join(format!("{}_{:03}.{}", stem, n + 1, SNAPSHOT_EXTENSION))),
    }
}

/// Highest counter among existing snapshots named after `stem`; the bare
/// name counts as 0.
fn highest_counter(backup_dir: &Path, stem: &str) -> Option<u32> {
    let entries = fs::read_dir(backup_dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let rest = name
                .strip_prefix(stem)?
                .strip_suffix(SNAPSHOT_EXTENSION)?
                .strip_suffix('.')?
                .to_string();
            if rest.is_empty() {
                Some(0)
            } else {
                rest.strip_prefix('_')?.parse::<u32>().ok()
            }
        })
        .max()
}

fn create_snapshot(
    db_path: &Path,
    backup_dir: &Path,
    now: NaiveDateTime,
) -> std::result::Result<PathBuf, RotationError> {
    fs::create_dir_all(backup_dir).map_err(RotationError::at(BackupStage::CreateDir))?;
    checkpoint_wal(db_path)?;
    let snapshot = snapshot_path(backup_dir, now).map_err(RotationError::at(BackupStage::Copy))?;
    fs::copy(db_path, &snapshot).map_err(RotationError::at(BackupStage::Copy))?;
    Ok(snapshot)
}

/// `<db>-wal` next to the datastore file.
fn wal_path(db_path: &Path) -> PathBuf {
    let mut name = db_path.as_os_str().to_os_string();
    name.push("-wal");
    PathBuf::from(name)
}

/// Moves committed pages still sitting in `<db>-wal` into the main file.
///
/// A clean shutdown leaves no WAL behind; after a crash it may hold committed
/// rows the main file does not have yet.
fn checkpoint_wal(db_path: &Path) -> std::result::Result<(), RotationError> {
    if !wal_path(db_path).exists() {
        return Ok(());
    }
    let url = db_path.to_string_lossy();
    let mut conn =
        SqliteConnection::establish(&url).map_err(RotationError::at(BackupStage::Checkpoint))?;
    conn.batch_execute(
        "
        PRAGMA busy_timeout = 30000;
        PRAGMA wal_checkpoint(TRUNCATE);
    ",
    )
    .map_err(RotationError::at(BackupStage::Checkpoint))?;
    info!("Checkpointed write-ahead log of {}", db_path.display());
    Ok(())
}

fn prune(
    backup_dir: &Path,
    max_kept: usize,
    sink: &dyn BackupEventSink,
    pruned: &mut Vec<PathBuf>,
) -> std::result::Result<(), RotationError> {
    let files = backup_files(backup_dir).map_err(RotationError::at(BackupStage::List))?;
    let excess = files.len().saturating_sub(max_kept);

    for (_, path) in files.into_iter().take(excess) {
        fs::remove_file(&path).map_err(RotationError::at(BackupStage::Prune))?;
        sink.emit(BackupEvent::Pruned {
            snapshot: path.clone(),
        });
        pruned.push(path);
    }
    Ok(())
}

/// Regular files in `dir` with their mtimes, oldest first, ties by name.
fn backup_files(dir: &Path) -> io::Result<Vec<(SystemTime, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let metadata = fs::metadata(&path)?;
        if metadata.is_file() {
            files.push((metadata.modified()?, path));
        }
    }
    files.sort();
    Ok(files)
}

fn failed(
    sink: &dyn BackupEventSink,
    err: RotationError,
    snapshot: Option<PathBuf>,
) -> RotationOutcome {
    let reason = err.source.to_string();
    sink.emit(BackupEvent::Failed {
        stage: err.stage,
        reason: reason.clone(),
    });
    RotationOutcome::Failed {
        stage: err.stage,
        snapshot,
        reason,
    }
}
