//! Explicit backup import/export.
//!
//! Backups are the library envelope as pretty-printed JSON, written and read
//! out-of-band from the autosave path. Import validates before anything is
//! touched: a malformed or inconsistent payload leaves the in-memory library
//! unchanged. After a successful import the session must reset its history
//! and re-baseline the autosave coordinator, otherwise the stale baseline
//! would mask the imported content from change detection.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::envelope::LibraryEnvelope;
use crate::error::{PersistenceError, Result};

/// Serialize the envelope as a pretty JSON backup payload.
pub fn export_backup(envelope: &LibraryEnvelope) -> Result<String> {
    serde_json::to_string_pretty(envelope)
        .map_err(|e| PersistenceError::Serialization { source: e })
}

/// Parse and validate a backup payload.
///
/// Rejects malformed JSON, envelopes written by a newer version, and
/// duplicate novel ids. Selection entries that point at novels or chapters
/// not contained in the backup are dropped rather than rejected.
pub fn import_backup(raw: &str) -> Result<LibraryEnvelope> {
    let mut envelope: LibraryEnvelope = serde_json::from_str(raw)
        .map_err(|e| PersistenceError::Deserialization { source: e })?;
    envelope.check_version()?;
    envelope.check_integrity()?;
    envelope.prune_selection();
    tracing::info!(novels = envelope.novels.len(), "imported backup");
    Ok(envelope)
}

/// Write a backup file with the atomic temp-file-then-rename discipline.
pub fn write_backup(envelope: &LibraryEnvelope, path: &Path) -> Result<()> {
    let payload = export_backup(envelope)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(payload.as_bytes())
        .map_err(|e| PersistenceError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path,
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "wrote backup");
    Ok(())
}

/// Read and validate a backup file.
pub fn read_backup(path: &Path) -> Result<LibraryEnvelope> {
    let raw = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    import_backup(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nws_model::Novel;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_envelope() -> LibraryEnvelope {
        let novel = Novel::new("Backup Draft");
        let mut chapters = BTreeMap::new();
        chapters.insert(novel.id, novel.first_chapter_id().unwrap());
        LibraryEnvelope::new(vec![novel.clone()], Some(novel.id), chapters)
    }

    #[test]
    fn test_export_import_round_trip() {
        let envelope = sample_envelope();
        let payload = export_backup(&envelope).unwrap();
        let imported = import_backup(&payload).unwrap();
        assert_eq!(imported, envelope);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(
            import_backup("definitely not json"),
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_import_rejects_duplicate_novel_ids() {
        let novel = Novel::new("Twin");
        let envelope =
            LibraryEnvelope::new(vec![novel.clone(), novel], None, BTreeMap::new());
        let payload = export_backup(&envelope).unwrap();
        assert!(matches!(
            import_backup(&payload),
            Err(PersistenceError::InvalidBackup { .. })
        ));
    }

    #[test]
    fn test_import_drops_dangling_selection() {
        let kept = Novel::new("Kept");
        let gone = Novel::new("Gone");
        let mut chapters = BTreeMap::new();
        chapters.insert(gone.id, gone.first_chapter_id().unwrap());
        let envelope = LibraryEnvelope::new(vec![kept], Some(gone.id), chapters);

        let imported = import_backup(&export_backup(&envelope).unwrap()).unwrap();
        assert_eq!(imported.active_novel_id, None);
        assert!(imported.active_chapter_ids.is_empty());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let envelope = sample_envelope();

        write_backup(&envelope, &path).unwrap();
        let loaded = read_backup(&path).unwrap();
        assert_eq!(loaded, envelope);

        // No temp file left behind.
        assert!(!dir.path().join("backup.json.tmp").exists());
    }

    #[test]
    fn test_read_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_backup(&dir.path().join("absent.json")),
            Err(PersistenceError::Io { .. })
        ));
    }
}
